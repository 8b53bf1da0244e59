use std::path::PathBuf;
use std::time::Duration;

use crate::models::DockEdge;
use crate::Command;

/// A resolved key binding: modifier names, a keysym name and the command it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub command: Command,
    pub modifier: Vec<String>,
    pub key: String,
}

/// Everything the core needs from the user configuration. Read once at startup.
pub trait Config {
    /// Number of workspaces. Fixed for the lifetime of the process.
    fn workspace_count(&self) -> usize;

    /// Names published as `_NET_DESKTOP_NAMES`.
    fn workspace_names(&self) -> Vec<String> {
        (1..=self.workspace_count()).map(|i| i.to_string()).collect()
    }

    fn gap(&self) -> u32;

    fn gap_step(&self) -> u32;

    /// Whether the gap is also applied around the tiled area.
    fn outer_gaps(&self) -> bool;

    fn border_width(&self) -> u32;

    fn focused_border_color(&self) -> String;

    fn normal_border_color(&self) -> String;

    fn dock_height(&self) -> u32;

    fn dock_edge(&self) -> DockEdge;

    fn weight_step(&self) -> f32;

    fn min_weight(&self) -> f32;

    /// Upper bound for a client's weight, so growing one client cannot squeeze the others
    /// out of the row.
    fn max_weight(&self) -> f32;

    /// How long a window gets to honour `WM_DELETE_WINDOW` before it is killed.
    fn close_timeout(&self) -> Duration;

    fn focus_follows_pointer(&self) -> bool;

    /// Script to run once the manager is up.
    fn autostart(&self) -> Option<PathBuf>;

    fn mapped_bindings(&self) -> Vec<Keybind>;
}

#[cfg(test)]
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub workspaces: usize,
    pub gap: u32,
    pub outer_gaps: bool,
    pub border_width: u32,
    pub dock_height: u32,
    pub dock_edge: DockEdge,
    pub focus_follows_pointer: bool,
    pub close_timeout: Duration,
    pub keybinds: Vec<Keybind>,
}

#[cfg(test)]
impl Default for TestConfig {
    fn default() -> Self {
        Self {
            workspaces: 4,
            gap: 0,
            outer_gaps: false,
            border_width: 0,
            dock_height: 30,
            dock_edge: DockEdge::Top,
            focus_follows_pointer: true,
            close_timeout: Duration::from_millis(2000),
            keybinds: vec![],
        }
    }
}

#[cfg(test)]
impl Config for TestConfig {
    fn workspace_count(&self) -> usize {
        self.workspaces
    }
    fn gap(&self) -> u32 {
        self.gap
    }
    fn gap_step(&self) -> u32 {
        2
    }
    fn outer_gaps(&self) -> bool {
        self.outer_gaps
    }
    fn border_width(&self) -> u32 {
        self.border_width
    }
    fn focused_border_color(&self) -> String {
        "#ffffff".to_owned()
    }
    fn normal_border_color(&self) -> String {
        "#000000".to_owned()
    }
    fn dock_height(&self) -> u32 {
        self.dock_height
    }
    fn dock_edge(&self) -> DockEdge {
        self.dock_edge
    }
    fn weight_step(&self) -> f32 {
        0.25
    }
    fn min_weight(&self) -> f32 {
        0.25
    }
    fn max_weight(&self) -> f32 {
        4.0
    }
    fn close_timeout(&self) -> Duration {
        self.close_timeout
    }
    fn focus_follows_pointer(&self) -> bool {
        self.focus_follows_pointer
    }
    fn autostart(&self) -> Option<PathBuf> {
        None
    }
    fn mapped_bindings(&self) -> Vec<Keybind> {
        self.keybinds.clone()
    }
}
