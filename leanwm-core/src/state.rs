//! Manager state shared by every handler.
use std::collections::VecDeque;
use std::time::Duration;

use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::hints::DesktopHints;
use crate::layouts::{self, Gaps};
use crate::models::{
    ClientRegistry, CloseRequest, DockStrip, Handle, Screen, WindowHandle, WorkspaceId, Xyhw,
};
use crate::utils::key_bindings::KeyBindings;

/// Configuration values the transitions need, copied out of the [`Config`] at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub workspace_names: Vec<String>,
    pub outer_gaps: bool,
    pub gap_step: u32,
    pub border_width: u32,
    pub dock_strip: DockStrip,
    pub weight_step: f32,
    pub min_weight: f32,
    pub max_weight: f32,
    pub close_timeout: Duration,
    pub focus_follows_pointer: bool,
}

impl Settings {
    fn new(config: &impl Config) -> Self {
        Self {
            workspace_names: config.workspace_names(),
            outer_gaps: config.outer_gaps(),
            gap_step: config.gap_step(),
            border_width: config.border_width(),
            dock_strip: DockStrip {
                edge: config.dock_edge(),
                height: i32::try_from(config.dock_height()).unwrap_or(i32::MAX),
            },
            weight_step: config.weight_step(),
            min_weight: config.min_weight(),
            max_weight: config.max_weight().max(config.min_weight()),
            close_timeout: config.close_timeout(),
            focus_follows_pointer: config.focus_follows_pointer(),
        }
    }
}

#[derive(Debug)]
pub struct State<H: Handle> {
    pub registry: ClientRegistry<H>,
    pub screen: Screen,
    pub docks: Vec<WindowHandle<H>>,
    pub current_workspace: WorkspaceId,
    pub gap: u32,
    pub settings: Settings,
    pub key_bindings: KeyBindings,
    pub closing: Vec<CloseRequest<H>>,
    pub hints: DesktopHints<H>,
    pub actions: VecDeque<DisplayAction<H>>,
}

impl<H: Handle> State<H> {
    pub(crate) fn new(config: &impl Config) -> Self {
        Self {
            registry: ClientRegistry::new(config.workspace_count()),
            screen: Screen::default(),
            docks: vec![],
            current_workspace: 0,
            gap: config.gap(),
            settings: Settings::new(config),
            key_bindings: KeyBindings::new(&config.mapped_bindings()),
            closing: vec![],
            hints: DesktopHints::default(),
            actions: VecDeque::new(),
        }
    }

    /// The focused client of the visible workspace.
    #[must_use]
    pub fn focused_window(&self) -> Option<WindowHandle<H>> {
        self.registry.focused_on(self.current_workspace)
    }

    /// Recomputes the layout of `workspace` and queues a configure request for every client
    /// whose geometry changed. Hidden workspaces are left alone until they are shown.
    ///
    /// A fullscreen client covers the whole screen, dock included, and is raised. The other
    /// clients keep their geometry underneath it.
    pub fn reflow(&mut self, workspace: WorkspaceId) -> bool {
        if workspace != self.current_workspace {
            return false;
        }
        if let Some(fullscreen) = self.registry.fullscreen_on(workspace) {
            let changed = self.configure(fullscreen, self.screen.bbox, 0);
            self.actions.push_back(DisplayAction::RaiseWindow(fullscreen));
            return changed;
        }

        let Some(layout) = self.registry.workspace(workspace).map(|ws| ws.layout) else {
            return false;
        };
        let (handles, weights): (Vec<_>, Vec<_>) = self
            .registry
            .clients_on(workspace)
            .map(|c| (c.handle, c.weight))
            .unzip();
        let gaps = Gaps::new(self.gap, self.settings.outer_gaps);
        let slots = layout.generate(self.screen.usable_area(), &weights, gaps);

        let border = self.settings.border_width;
        let mut changed = false;
        for (handle, xyhw) in handles.into_iter().zip(slots) {
            changed |= self.configure(handle, xyhw, border);
        }
        changed
    }

    fn configure(&mut self, handle: WindowHandle<H>, xyhw: Xyhw, border: u32) -> bool {
        let Some(client) = self.registry.get_mut(&handle) else {
            return false;
        };
        if client.geometry == xyhw {
            return false;
        }
        client.geometry = xyhw;
        self.actions.push_back(DisplayAction::ConfigureWindow {
            window: handle,
            xyhw,
            border,
        });
        true
    }

    /// The border a managed window is drawn with.
    #[must_use]
    pub fn border_of(&self, handle: &WindowHandle<H>) -> u32 {
        if self.registry.is_fullscreen(handle) {
            0
        } else {
            self.settings.border_width
        }
    }

    /// Stretches every dock across the reserved strip.
    pub(crate) fn place_docks(&mut self) {
        let Some(area) = self.screen.dock_area() else {
            return;
        };
        for dock in &self.docks {
            self.actions.push_back(DisplayAction::ConfigureWindow {
                window: *dock,
                xyhw: area,
                border: 0,
            });
        }
    }

    /// Queues whatever desktop hints went stale since the last call.
    pub fn publish_hints(&mut self) {
        let focused = self.focused_window();
        let actions = self.hints.publish(
            &self.settings.workspace_names,
            self.current_workspace,
            &self.registry,
            focused,
        );
        self.actions.extend(actions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;
    use crate::layouts::Layout;
    use crate::models::{Client, DockEdge, MockHandle};

    fn state() -> State<MockHandle> {
        let mut state = State::new(&TestConfig::default());
        state.screen = Screen::new(Xyhw::new(0, 0, 1000, 700));
        state
    }

    #[test]
    fn reflow_only_reports_changed_geometry() {
        let mut state = state();
        state.registry.register(Client::new(WindowHandle(1), 0)).unwrap();
        assert!(state.reflow(0));
        assert_eq!(
            state.actions.pop_front(),
            Some(DisplayAction::ConfigureWindow {
                window: WindowHandle(1),
                xyhw: Xyhw::new(0, 0, 1000, 700),
                border: 0,
            })
        );
        assert!(!state.reflow(0));
        assert!(state.actions.is_empty());
    }

    #[test]
    fn reflow_follows_the_workspace_layout() {
        let mut state = state();
        for handle in [1, 2] {
            state.registry.register(Client::new(WindowHandle(handle), 0)).unwrap();
        }
        assert_eq!(state.registry.cycle_layout(0), Some(Layout::Master));
        assert_eq!(state.registry.cycle_layout(0), Some(Layout::Vertical));
        state.reflow(0);
        assert_eq!(
            state.registry.get(&WindowHandle(2)).unwrap().geometry,
            Xyhw::new(0, 350, 1000, 350)
        );
    }

    #[test]
    fn fullscreen_client_covers_the_dock_and_is_raised() {
        let mut state = state();
        state.screen.dock = Some(DockStrip {
            edge: DockEdge::Top,
            height: 20,
        });
        for handle in [1, 2] {
            state.registry.register(Client::new(WindowHandle(handle), 0)).unwrap();
        }
        state.reflow(0);
        state.actions.clear();

        state.registry.set_fullscreen(&WindowHandle(1), true);
        assert!(state.reflow(0));
        let actions: Vec<_> = state.actions.drain(..).collect();
        assert_eq!(
            actions,
            vec![
                DisplayAction::ConfigureWindow {
                    window: WindowHandle(1),
                    xyhw: Xyhw::new(0, 0, 1000, 700),
                    border: 0,
                },
                DisplayAction::RaiseWindow(WindowHandle(1)),
            ]
        );
        assert_eq!(state.border_of(&WindowHandle(1)), 0);
    }

    #[test]
    fn hidden_workspaces_are_not_laid_out() {
        let mut state = state();
        state.registry.register(Client::new(WindowHandle(1), 2)).unwrap();
        assert!(!state.reflow(2));
        assert!(state.actions.is_empty());
        assert_eq!(
            state.registry.get(&WindowHandle(1)).unwrap().geometry,
            Xyhw::default()
        );
    }

    #[test]
    fn docks_are_stretched_over_the_strip() {
        let mut state = state();
        state.docks.push(WindowHandle(9));
        state.screen.dock = Some(DockStrip {
            edge: DockEdge::Bottom,
            height: 20,
        });
        state.place_docks();
        assert_eq!(
            state.actions.pop_front(),
            Some(DisplayAction::ConfigureWindow {
                window: WindowHandle(9),
                xyhw: Xyhw::new(0, 680, 1000, 20),
                border: 0,
            })
        );
    }
}
