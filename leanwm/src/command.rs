use serde::{Deserialize, Serialize};

/// The command half of a key binding as written in `config.toml`.
///
/// TOML cannot carry `leanwm_core::Command` with its payloads directly, so the argument lives
/// in the binding's `value` field and is parsed when the binding is resolved.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseCommand {
    Execute,
    CloseWindow,
    FocusWindowNext,
    FocusWindowPrevious,
    SwapWindowNext,
    SwapWindowPrevious,
    SendToWorkspace,
    GoToWorkspace,
    IncreaseWeight,
    DecreaseWeight,
    IncreaseGap,
    DecreaseGap,
    ToggleFullscreen,
    CycleLayout,
}

impl BaseCommand {
    /// Whether the command needs a `value`.
    pub const fn takes_value(self) -> bool {
        matches!(
            self,
            Self::Execute | Self::SendToWorkspace | Self::GoToWorkspace
        )
    }
}
