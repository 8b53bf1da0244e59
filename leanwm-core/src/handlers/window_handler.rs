use crate::display_action::DisplayAction;
use crate::models::{Client, Handle, Window, WindowHandle, Xyhw, XyhwChange};
use crate::state::State;

impl<H: Handle> State<H> {
    /// A window asked to be mapped. Normal windows join the workspace named by their
    /// `_NET_WM_DESKTOP`, or the visible one. On the visible workspace they are laid out,
    /// mapped and focused, unless a fullscreen client holds the screen. Docks reserve the
    /// strip instead.
    pub fn window_created(&mut self, window: Window<H>) -> bool {
        // Don't add the window if the manager already knows about it.
        if self.registry.contains(&window.handle) || self.docks.contains(&window.handle) {
            return false;
        }
        if window.is_dock() {
            return self.dock_created(window.handle);
        }

        let previous = self.focused_window();
        let workspace = window
            .desktop
            .filter(|desktop| *desktop < self.registry.workspace_count())
            .unwrap_or(self.current_workspace);
        let handle = match self.registry.register(Client::from_window(window, workspace)) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::warn!(%err, "Not managing window");
                return false;
            }
        };
        tracing::debug!(?handle, workspace, "Managing window");

        // Let the display server know we are managing this window.
        self.actions.push_back(DisplayAction::AddedWindow(handle));
        if workspace != self.current_workspace {
            self.actions.push_back(DisplayAction::HideWindow(handle));
            return false;
        }

        self.reflow(workspace);
        self.actions.push_back(DisplayAction::ShowWindow(handle));
        match self.registry.fullscreen_on(workspace) {
            // Don't steal focus from a fullscreen window, and stay underneath it.
            Some(fullscreen) => self.actions.push_back(DisplayAction::RaiseWindow(fullscreen)),
            None => {
                self.registry.set_focus(&handle);
            }
        }
        self.sync_focus(previous);
        true
    }

    fn dock_created(&mut self, handle: WindowHandle<H>) -> bool {
        tracing::debug!(?handle, "Reserving the dock strip");
        self.docks.push(handle);
        self.actions.push_back(DisplayAction::AddedDock(handle));
        if self.screen.dock.is_none() {
            self.screen.dock = Some(self.settings.dock_strip);
        }
        self.place_docks();
        self.actions.push_back(DisplayAction::ShowWindow(handle));
        self.reflow(self.current_workspace);
        true
    }

    /// A window was unmapped or destroyed. Repeats and unknown windows are ignored.
    pub fn window_destroyed(&mut self, handle: &WindowHandle<H>) -> bool {
        if let Some(index) = self.docks.iter().position(|d| d == handle) {
            self.docks.remove(index);
            self.actions
                .push_back(DisplayAction::DestroyedWindow(*handle));
            // The strip is released with the last dock.
            if self.docks.is_empty() {
                self.screen.dock = None;
                self.reflow(self.current_workspace);
            }
            return true;
        }

        let previous = self.focused_window();
        let Some(client) = self.registry.unregister(handle) else {
            return false;
        };
        tracing::debug!(?handle, "Window gone");
        self.closing.retain(|request| &request.handle != handle);
        self.actions
            .push_back(DisplayAction::DestroyedWindow(*handle));
        self.reflow(client.workspace);
        self.sync_focus(previous);
        true
    }

    /// Managed windows are told where they are and stay there. Windows we do not manage yet
    /// get exactly what they asked for.
    pub fn configure_request(&mut self, handle: &WindowHandle<H>, change: XyhwChange) -> bool {
        let act = if self.docks.contains(handle) {
            DisplayAction::ConfigureNotify {
                window: *handle,
                xyhw: self.screen.dock_area().unwrap_or_default(),
                border: 0,
            }
        } else if let Some(client) = self.registry.get(handle) {
            DisplayAction::ConfigureNotify {
                window: *handle,
                xyhw: client.geometry,
                border: self.border_of(handle),
            }
        } else {
            DisplayAction::PassthroughConfigure(*handle, change)
        };
        self.actions.push_back(act);
        false
    }

    /// `WM_PROTOCOLS` changed on a window.
    pub fn protocols_changed(&mut self, handle: &WindowHandle<H>, supports_delete: bool) -> bool {
        if let Some(client) = self.registry.get_mut(handle) {
            client.supports_delete = supports_delete;
        }
        false
    }

    /// Puts a client in or out of fullscreen on its workspace. A client going fullscreen
    /// takes that workspace's focus and replaces any other fullscreen client there.
    pub fn set_fullscreen(&mut self, handle: &WindowHandle<H>, on: bool) -> bool {
        let Some(workspace) = self.registry.get(handle).map(|c| c.workspace) else {
            return false;
        };
        let current = self.registry.fullscreen_on(workspace);
        if on == (current.as_ref() == Some(handle)) {
            return false;
        }
        tracing::debug!(?handle, on, "Fullscreen");

        let previous = self.focused_window();
        if on {
            if let Some(other) = current {
                self.actions
                    .push_back(DisplayAction::SetFullscreen(other, false));
            }
            self.registry.set_fullscreen(handle, true);
            self.registry.set_focus(handle);
        } else {
            self.registry.set_fullscreen(handle, false);
        }
        self.actions
            .push_back(DisplayAction::SetFullscreen(*handle, on));
        self.reflow(workspace);
        self.sync_focus(previous);
        true
    }

    /// The urgency bit of `WM_HINTS` changed. Focused windows never stay urgent.
    pub fn urgency_changed(&mut self, handle: &WindowHandle<H>, urgent: bool) -> bool {
        let focused = self.registry.is_focused(handle);
        if let Some(client) = self.registry.get_mut(handle) {
            client.urgent = urgent && !focused;
            if client.urgent {
                tracing::debug!(?handle, "Window demands attention");
            }
        }
        false
    }

    /// The root window geometry is known or changed.
    pub fn screen_create(&mut self, bbox: Xyhw) -> bool {
        tracing::debug!(?bbox, "Screen geometry");
        self.screen.bbox = bbox;
        self.place_docks();
        self.reflow(self.current_workspace)
    }
}
