use crate::display_action::DisplayAction;
use crate::models::{Handle, WindowHandle, WorkspaceId};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Makes `workspace` the visible one. Focus is left to the caller.
    pub(crate) fn show_workspace(&mut self, workspace: WorkspaceId) {
        let hidden: Vec<_> = self.handles_on(self.current_workspace);
        self.actions
            .extend(hidden.into_iter().map(DisplayAction::HideWindow));

        self.current_workspace = workspace;
        self.reflow(workspace);

        let shown: Vec<_> = self.handles_on(workspace);
        self.actions
            .extend(shown.into_iter().map(DisplayAction::ShowWindow));
    }

    /// Switches to another workspace. Unknown or already visible workspaces are ignored.
    pub fn goto_workspace(&mut self, workspace: WorkspaceId) -> bool {
        if workspace >= self.registry.workspace_count() || workspace == self.current_workspace {
            return false;
        }
        tracing::debug!(from = self.current_workspace, to = workspace, "Switching workspace");
        let previous = self.focused_window();
        self.show_workspace(workspace);
        self.sync_focus(previous);
        true
    }

    /// Sends a client to another workspace. The workspace it left is reflowed if visible;
    /// the one it joined only if it is the visible one.
    pub fn move_window_to_workspace(
        &mut self,
        handle: &WindowHandle<H>,
        workspace: WorkspaceId,
    ) -> bool {
        let Some(from) = self.registry.get(handle).map(|c| c.workspace) else {
            return false;
        };
        let previous = self.focused_window();
        let was_fullscreen = self.registry.is_fullscreen(handle);
        match self.registry.move_client(handle, workspace) {
            Ok(true) => {}
            Ok(false) => return false,
            Err(err) => {
                tracing::debug!(%err, "Ignoring move to a missing workspace");
                return false;
            }
        }

        // Fullscreen stays with the workspace, not the window.
        if was_fullscreen {
            self.actions
                .push_back(DisplayAction::SetFullscreen(*handle, false));
        }
        if from == self.current_workspace {
            self.actions.push_back(DisplayAction::HideWindow(*handle));
            self.reflow(from);
        } else if workspace == self.current_workspace {
            self.reflow(workspace);
            self.actions.push_back(DisplayAction::ShowWindow(*handle));
        }
        self.sync_focus(previous);
        true
    }

    /// Shows the desktop a previous window manager left current, before any window is
    /// adopted.
    pub fn restore_desktop(&mut self, workspace: WorkspaceId) -> bool {
        if workspace >= self.registry.workspace_count() {
            tracing::debug!(workspace, "Not restoring a desktop we do not have");
            return false;
        }
        self.goto_workspace(workspace)
    }

    fn handles_on(&self, workspace: WorkspaceId) -> Vec<WindowHandle<H>> {
        self.registry
            .clients_on(workspace)
            .map(|c| c.handle)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::display_action::DisplayAction;
    use crate::handlers::tests::manager_with;
    use crate::models::{TestManager, Window, WindowHandle, Xyhw};
    use crate::{Command, DisplayEvent};

    #[test]
    fn sending_a_window_away_reflows_only_the_visible_workspace() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        manager.command_handler(&Command::SendToWorkspace(4));
        manager.state.publish_hints();
        let actions: Vec<_> = manager.state.actions.drain(..).collect();

        assert!(actions.contains(&DisplayAction::HideWindow(WindowHandle(2))));
        assert!(actions.contains(&DisplayAction::ConfigureWindow {
            window: WindowHandle(1),
            xyhw: Xyhw::new(0, 0, 1000, 700),
            border: 0,
        }));
        assert!(!actions.iter().any(|act| matches!(
            act,
            DisplayAction::ConfigureWindow { window, .. } if *window == WindowHandle(2)
        )));
        assert!(actions.contains(&DisplayAction::SetWindowDesktop(WindowHandle(2), 3)));
        assert_eq!(manager.state.registry.get(&WindowHandle(2)).unwrap().workspace, 3);
    }

    #[test]
    fn a_hidden_workspace_is_laid_out_when_shown() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        manager.command_handler(&Command::SendToWorkspace(4));
        manager.state.actions.clear();

        assert!(manager.command_handler(&Command::GoToWorkspace(4)));
        let actions: Vec<_> = manager.state.actions.drain(..).collect();
        assert_eq!(
            actions,
            vec![
                DisplayAction::HideWindow(WindowHandle(1)),
                DisplayAction::ConfigureWindow {
                    window: WindowHandle(2),
                    xyhw: Xyhw::new(0, 0, 1000, 700),
                    border: 0,
                },
                DisplayAction::ShowWindow(WindowHandle(2)),
                DisplayAction::WindowTakeFocus {
                    window: WindowHandle(2),
                    previous: Some(WindowHandle(1)),
                },
            ]
        );
        assert_eq!(manager.state.current_workspace, 3);
    }

    #[test]
    fn out_of_range_workspaces_are_ignored() {
        let mut manager = manager_with(&[1], TestConfig::default());
        assert!(!manager.command_handler(&Command::GoToWorkspace(0)));
        assert!(!manager.command_handler(&Command::GoToWorkspace(5)));
        assert!(!manager.command_handler(&Command::SendToWorkspace(9)));
        assert_eq!(manager.state.current_workspace, 0);
        assert_eq!(manager.state.registry.get(&WindowHandle(1)).unwrap().workspace, 0);
    }

    #[test]
    fn startup_restores_the_previous_desktop() {
        let mut manager = TestManager::new_test(TestConfig::default());
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 1000, 700)));
        manager.display_event_handler(DisplayEvent::RestoreDesktop(2));
        let mut kept = Window::new(WindowHandle(1), None);
        kept.desktop = Some(0);
        manager.display_event_handler(DisplayEvent::WindowCreate(kept));
        manager.display_event_handler(DisplayEvent::WindowCreate(Window::new(
            WindowHandle(2),
            None,
        )));

        assert_eq!(manager.state.current_workspace, 2);
        assert!(manager.state.actions.contains(&DisplayAction::SetCurrentDesktop(2)));
        let registry = &manager.state.registry;
        assert_eq!(registry.get(&WindowHandle(1)).unwrap().workspace, 0);
        assert_eq!(registry.get(&WindowHandle(2)).unwrap().workspace, 2);
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(2)));

        assert!(!manager.display_event_handler(DisplayEvent::RestoreDesktop(7)));
        assert_eq!(manager.state.current_workspace, 2);
    }

    #[test]
    fn sending_a_fullscreen_window_away_drops_fullscreen() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        manager.command_handler(&Command::ToggleFullscreen);
        manager.state.actions.clear();

        manager.command_handler(&Command::SendToWorkspace(2));
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::SetFullscreen(WindowHandle(2), false)));
        assert_eq!(manager.state.registry.fullscreen_on(0), None);
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(1)));
        assert_eq!(
            manager.state.registry.get(&WindowHandle(1)).unwrap().geometry,
            Xyhw::new(0, 0, 1000, 700)
        );
    }

    #[test]
    fn switching_to_an_empty_workspace_clears_focus() {
        let mut manager = manager_with(&[1], TestConfig::default());
        assert!(manager.state.goto_workspace(1));
        assert_eq!(manager.state.focused_window(), None);
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::Unfocus(Some(WindowHandle(1))))
        );
    }
}
