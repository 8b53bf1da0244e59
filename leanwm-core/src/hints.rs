//! EWMH desktop hints for pagers and status bars.
//!
//! The manager only ever writes these properties; it never reads them back. [`DesktopHints`]
//! remembers what was last written so each call only emits what went stale.
use std::collections::HashMap;

use crate::display_action::DisplayAction;
use crate::models::{ClientRegistry, Handle, WindowHandle, WorkspaceId};

#[derive(Debug, Clone)]
pub struct DesktopHints<H: Handle> {
    desktops: Option<Vec<String>>,
    current: Option<WorkspaceId>,
    window_desktops: HashMap<WindowHandle<H>, WorkspaceId>,
    client_list: Option<Vec<WindowHandle<H>>>,
    active: Option<Option<WindowHandle<H>>>,
}

impl<H: Handle> Default for DesktopHints<H> {
    fn default() -> Self {
        Self {
            desktops: None,
            current: None,
            window_desktops: HashMap::new(),
            client_list: None,
            active: None,
        }
    }
}

impl<H: Handle> DesktopHints<H> {
    /// Compares the published hints with the manager's state and returns the writes needed
    /// to bring them in line.
    pub fn publish(
        &mut self,
        names: &[String],
        current: WorkspaceId,
        registry: &ClientRegistry<H>,
        active: Option<WindowHandle<H>>,
    ) -> Vec<DisplayAction<H>> {
        let mut actions = vec![];

        if self.desktops.as_deref() != Some(names) {
            self.desktops = Some(names.to_vec());
            actions.push(DisplayAction::SetDesktops(names.to_vec()));
        }

        if self.current != Some(current) {
            self.current = Some(current);
            actions.push(DisplayAction::SetCurrentDesktop(current));
        }

        self.window_desktops.retain(|handle, _| registry.contains(handle));
        let clients: Vec<WindowHandle<H>> = registry.handles().collect();
        for handle in &clients {
            let Some(workspace) = registry.get(handle).map(|c| c.workspace) else {
                continue;
            };
            if self.window_desktops.insert(*handle, workspace) != Some(workspace) {
                actions.push(DisplayAction::SetWindowDesktop(*handle, workspace));
            }
        }

        if self.client_list.as_ref() != Some(&clients) {
            actions.push(DisplayAction::SetClientList(clients.clone()));
            self.client_list = Some(clients);
        }

        if self.active != Some(active) {
            self.active = Some(active);
            actions.push(DisplayAction::SetActiveWindow(active));
        }

        actions
    }
}
