/// A manager action reachable from a key binding or a client message.
///
/// Workspace numbers are 1-based, as the user writes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a shell command.
    Execute(String),
    /// Ask the focused window to close.
    CloseWindow,
    FocusWindowNext,
    FocusWindowPrevious,
    SwapWindowNext,
    SwapWindowPrevious,
    SendToWorkspace(usize),
    GoToWorkspace(usize),
    IncreaseWeight,
    DecreaseWeight,
    IncreaseGap,
    DecreaseGap,
    /// Give the focused window the whole screen, or take it back.
    ToggleFullscreen,
    /// Switch the visible workspace to its next layout.
    CycleLayout,
}
