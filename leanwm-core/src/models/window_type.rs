/// How a newly mapped window is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Tiled on the current workspace.
    #[default]
    Normal,
    /// Excluded from tiling; reserves the dock strip.
    Dock,
}
