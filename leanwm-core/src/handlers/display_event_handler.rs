use std::time::Instant;

use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::models::{Handle, Manager};
use crate::DisplayEvent;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Applies one event to the manager and queues the resulting display actions, desktop
    /// hints included. Returns true if the layout changed.
    pub fn display_event_handler(&mut self, event: DisplayEvent<H>) -> bool {
        tracing::trace!(?event, "Display event");
        let changed = match event {
            DisplayEvent::ScreenCreate(bbox) => self.state.screen_create(bbox),
            DisplayEvent::WindowCreate(window) => self.state.window_created(window),
            DisplayEvent::WindowDestroy(handle) => self.state.window_destroyed(&handle),
            DisplayEvent::ConfigureRequest(handle, change) => {
                self.state.configure_request(&handle, change)
            }
            DisplayEvent::WindowTakeFocus(handle) => self.state.pointer_entered(&handle),

            DisplayEvent::KeyCombo(mod_mask, xkeysym) => {
                // Look through the bindings and run the command if one is defined.
                let command = self.state.key_bindings.lookup(mod_mask, xkeysym).cloned();
                command.map_or(false, |cmd| self.command_handler(&cmd))
            }
            DisplayEvent::KeyGrabReload => {
                self.state
                    .actions
                    .push_back(DisplayAction::ReloadKeyGrabs(self.config.mapped_bindings()));
                false
            }

            DisplayEvent::ProtocolsChanged(handle, supports_delete) => {
                self.state.protocols_changed(&handle, supports_delete)
            }
            DisplayEvent::CloseRequest(handle) => {
                self.state.close_window(&handle, Instant::now())
            }
            DisplayEvent::ActivateWindow(handle) => self.state.activate_window(&handle),
            DisplayEvent::MoveWindowToWorkspace(handle, workspace) => {
                self.state.move_window_to_workspace(&handle, workspace)
            }
            DisplayEvent::FullscreenRequest(handle, change) => {
                let on = change.apply(self.state.registry.is_fullscreen(&handle));
                self.state.set_fullscreen(&handle, on)
            }
            DisplayEvent::UrgencyChanged(handle, urgent) => {
                self.state.urgency_changed(&handle, urgent)
            }
            DisplayEvent::RestoreDesktop(workspace) => self.state.restore_desktop(workspace),
            DisplayEvent::SendCommand(command) => self.command_handler(&command),
        };
        self.state.publish_hints();
        changed
    }

    /// Forces every close request whose deadline passed.
    pub fn close_timeout_handler(&mut self, now: Instant) -> bool {
        let changed = self.state.expire_close_requests(now);
        self.state.publish_hints();
        changed
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::TestConfig;
    use crate::display_action::DisplayAction;
    use crate::handlers::tests::manager_with;
    use crate::models::WindowHandle;
    use crate::{Command, DisplayEvent};

    #[test]
    fn desktop_messages_use_zero_based_workspaces() {
        let mut manager = manager_with(&[1], TestConfig::default());
        manager.display_event_handler(DisplayEvent::SendCommand(Command::GoToWorkspace(3)));
        assert_eq!(manager.state.current_workspace, 2);
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::SetCurrentDesktop(2)));
    }

    #[test]
    fn keyboard_mapping_changes_regrab_the_bindings() {
        let mut manager = manager_with(&[], TestConfig::default());
        manager.display_event_handler(DisplayEvent::KeyGrabReload);
        assert_eq!(
            manager.state.actions.pop_front(),
            Some(DisplayAction::ReloadKeyGrabs(vec![]))
        );
    }

    #[test]
    fn forced_close_unregisters_and_publishes() {
        let mut manager = manager_with(&[1, 2], TestConfig::default());
        manager.display_event_handler(DisplayEvent::ProtocolsChanged(WindowHandle(2), true));
        manager.display_event_handler(DisplayEvent::CloseRequest(WindowHandle(2)));
        manager.state.actions.clear();

        let later = Instant::now() + Duration::from_secs(3);
        assert!(manager.close_timeout_handler(later));
        let actions: Vec<_> = manager.state.actions.drain(..).collect();
        assert!(actions.contains(&DisplayAction::KillWindow(WindowHandle(2))));
        assert!(actions.contains(&DisplayAction::SetClientList(vec![WindowHandle(1)])));
        assert!(!manager.close_timeout_handler(later));
    }

    #[test]
    fn every_window_stays_on_exactly_one_workspace() {
        let mut manager = manager_with(&[1, 2, 3, 4], TestConfig::default());
        let events = vec![
            DisplayEvent::MoveWindowToWorkspace(WindowHandle(1), 2),
            DisplayEvent::WindowDestroy(WindowHandle(3)),
            DisplayEvent::SendCommand(Command::GoToWorkspace(3)),
            DisplayEvent::MoveWindowToWorkspace(WindowHandle(2), 2),
            DisplayEvent::WindowDestroy(WindowHandle(3)),
            DisplayEvent::ActivateWindow(WindowHandle(4)),
            DisplayEvent::MoveWindowToWorkspace(WindowHandle(4), 9),
        ];
        for event in events {
            manager.display_event_handler(event);
            let registry = &manager.state.registry;
            let mut seen: Vec<_> = registry
                .workspaces()
                .flat_map(|ws| ws.clients().iter().copied())
                .collect();
            assert_eq!(seen.len(), registry.len());
            seen.sort_by_key(|h| h.0);
            seen.dedup();
            assert_eq!(seen.len(), registry.len());
            for workspace in registry.workspaces() {
                if let Some(focused) = workspace.focused() {
                    assert!(workspace.contains(&focused));
                }
            }
        }
        assert_eq!(manager.state.registry.len(), 3);
    }
}
