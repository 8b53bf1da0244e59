use crate::display_action::DisplayAction;
use crate::models::{Handle, WindowHandle};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Queues the input focus change from `previous` to whatever is focused now, if any.
    ///
    /// Every transition that can move focus captures `previous` first, mutates, then calls
    /// this so the backend sees exactly one focus request.
    pub fn sync_focus(&mut self, previous: Option<WindowHandle<H>>) {
        let now = self.focused_window();
        if now == previous {
            return;
        }
        // A window that just went away has no border left to repaint.
        let previous = previous.filter(|h| self.registry.contains(h));
        let act = match now {
            Some(window) => {
                if let Some(client) = self.registry.get_mut(&window) {
                    client.urgent = false;
                }
                DisplayAction::WindowTakeFocus { window, previous }
            }
            None => DisplayAction::Unfocus(previous),
        };
        self.actions.push_back(act);
    }

    /// Whether a fullscreen client on the visible workspace keeps focus to itself.
    fn focus_locked(&self) -> bool {
        self.registry
            .fullscreen_on(self.current_workspace)
            .is_some()
    }

    /// Focuses a client on the visible workspace. Ignored while a fullscreen client is
    /// shown.
    pub fn focus_window(&mut self, handle: &WindowHandle<H>) -> bool {
        if self.focus_locked() {
            return false;
        }
        let on_current = self
            .registry
            .get(handle)
            .is_some_and(|c| c.workspace == self.current_workspace);
        if !on_current {
            return false;
        }
        let previous = self.focused_window();
        if previous.as_ref() == Some(handle) {
            return false;
        }
        self.registry.set_focus(handle);
        self.sync_focus(previous);
        true
    }

    /// The pointer entered a window.
    pub fn pointer_entered(&mut self, handle: &WindowHandle<H>) -> bool {
        if !self.settings.focus_follows_pointer {
            return false;
        }
        self.focus_window(handle)
    }

    /// A pager asked for a window: show its workspace and focus it.
    pub fn activate_window(&mut self, handle: &WindowHandle<H>) -> bool {
        if self.focus_locked() {
            return false;
        }
        let Some(workspace) = self.registry.get(handle).map(|c| c.workspace) else {
            return false;
        };
        let previous = self.focused_window();
        self.registry.set_focus(handle);
        if workspace != self.current_workspace {
            self.show_workspace(workspace);
        }
        self.sync_focus(previous);
        true
    }

    /// Moves focus `offset` steps through the visible workspace, wrapping around.
    pub fn focus_relative(&mut self, offset: isize) -> bool {
        let Some(workspace) = self.registry.workspace(self.current_workspace) else {
            return false;
        };
        let Some(target) = workspace
            .focused_index()
            .and_then(|index| workspace.relative_index(index, offset))
            .and_then(|index| workspace.clients().get(index).copied())
        else {
            return false;
        };
        self.focus_window(&target)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::display_action::DisplayAction;
    use crate::handlers::tests::manager_with;
    use crate::models::WindowHandle;
    use crate::{Command, DisplayEvent};

    #[test]
    fn newest_window_takes_focus() {
        let manager = manager_with(&[1, 2, 3], TestConfig::default());
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(3)));
    }

    #[test]
    fn focus_next_wraps_around() {
        let mut manager = manager_with(&[1, 2, 3], TestConfig::default());
        assert!(manager.state.focus_relative(1));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(1)));
        assert!(manager.state.focus_relative(-1));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(3)));
    }

    #[test]
    fn focus_change_names_the_previous_window() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        assert!(manager.state.focus_window(&WindowHandle(1)));
        assert_eq!(
            manager.state.actions.pop_front(),
            Some(DisplayAction::WindowTakeFocus {
                window: WindowHandle(1),
                previous: Some(WindowHandle(2)),
            })
        );
    }

    #[test]
    fn refocusing_the_focused_window_does_nothing() {
        let mut manager = manager_with(&[1], TestConfig::default());
        assert!(!manager.state.focus_window(&WindowHandle(1)));
        assert!(manager.state.actions.is_empty());
    }

    #[test]
    fn pointer_focus_can_be_disabled() {
        let config = TestConfig {
            focus_follows_pointer: false,
            ..TestConfig::default()
        };
        let mut manager = manager_with(&[1, 2], config);
        manager.display_event_handler(DisplayEvent::WindowTakeFocus(WindowHandle(1)));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(2)));
    }

    #[test]
    fn pointer_focus_follows_the_pointer() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        manager.display_event_handler(DisplayEvent::WindowTakeFocus(WindowHandle(1)));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(1)));
    }

    #[test]
    fn fullscreen_keeps_focus() {
        let mut manager = manager_with(&[1, 2, 3], TestConfig::default());
        manager.command_handler(&Command::ToggleFullscreen);
        manager.state.actions.clear();

        manager.display_event_handler(DisplayEvent::WindowTakeFocus(WindowHandle(1)));
        manager.command_handler(&Command::FocusWindowNext);
        manager.display_event_handler(DisplayEvent::ActivateWindow(WindowHandle(2)));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(3)));
        assert!(manager.state.actions.iter().all(|act| !matches!(
            act,
            DisplayAction::WindowTakeFocus { .. }
        )));

        manager.command_handler(&Command::ToggleFullscreen);
        assert!(manager.state.focus_window(&WindowHandle(1)));
    }

    #[test]
    fn activating_a_hidden_window_switches_workspace() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        manager.display_event_handler(DisplayEvent::MoveWindowToWorkspace(WindowHandle(1), 2));
        manager.display_event_handler(DisplayEvent::ActivateWindow(WindowHandle(1)));
        assert_eq!(manager.state.current_workspace, 2);
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(1)));
    }
}
