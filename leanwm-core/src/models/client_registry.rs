//! The authoritative map from window handles to client records.
use std::collections::HashMap;

use super::{Client, Handle, WindowHandle, Workspace, WorkspaceId};
use crate::errors::{LeanError, Result};
use crate::layouts::Layout;

/// Owns every [`Client`] and the fixed set of [`Workspace`]s.
///
/// Every registered handle is a member of exactly one workspace, the one named by its
/// client's `workspace` field. Workspaces are never added or removed after construction.
#[derive(Debug, Clone)]
pub struct ClientRegistry<H: Handle> {
    clients: HashMap<WindowHandle<H>, Client<H>>,
    workspaces: Vec<Workspace<H>>,
}

impl<H: Handle> ClientRegistry<H> {
    /// Creates a registry with `workspace_count` workspaces (at least one).
    #[must_use]
    pub fn new(workspace_count: usize) -> Self {
        Self {
            clients: HashMap::new(),
            workspaces: (0..workspace_count.max(1)).map(Workspace::new).collect(),
        }
    }

    #[must_use]
    pub fn workspace_count(&self) -> usize {
        self.workspaces.len()
    }

    #[must_use]
    pub fn workspace(&self, id: WorkspaceId) -> Option<&Workspace<H>> {
        self.workspaces.get(id)
    }

    pub fn workspaces(&self) -> impl Iterator<Item = &Workspace<H>> {
        self.workspaces.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    #[must_use]
    pub fn contains(&self, handle: &WindowHandle<H>) -> bool {
        self.clients.contains_key(handle)
    }

    #[must_use]
    pub fn get(&self, handle: &WindowHandle<H>) -> Option<&Client<H>> {
        self.clients.get(handle)
    }

    pub fn get_mut(&mut self, handle: &WindowHandle<H>) -> Option<&mut Client<H>> {
        self.clients.get_mut(handle)
    }

    /// Adds a client to the end of its workspace.
    ///
    /// # Errors
    ///
    /// Fails if the handle is already registered or the workspace does not exist.
    pub fn register(&mut self, client: Client<H>) -> Result<WindowHandle<H>> {
        let handle = client.handle;
        if self.clients.contains_key(&handle) {
            return Err(LeanError::AlreadyManaged(format!("{:?}", handle.0)));
        }
        let workspace = self
            .workspaces
            .get_mut(client.workspace)
            .ok_or(LeanError::InvalidWorkspace(client.workspace))?;
        workspace.push(handle);
        self.clients.insert(handle, client);
        Ok(handle)
    }

    /// Forgets a client. Unknown handles are ignored.
    pub fn unregister(&mut self, handle: &WindowHandle<H>) -> Option<Client<H>> {
        let client = self.clients.remove(handle)?;
        if let Some(workspace) = self.workspaces.get_mut(client.workspace) {
            workspace.remove(handle);
        }
        Some(client)
    }

    /// Moves a client to the end of another workspace. Returns false when nothing moved.
    ///
    /// # Errors
    ///
    /// Fails if `to` is not a workspace.
    pub fn move_client(&mut self, handle: &WindowHandle<H>, to: WorkspaceId) -> Result<bool> {
        if to >= self.workspaces.len() {
            return Err(LeanError::InvalidWorkspace(to));
        }
        let Some(client) = self.clients.get_mut(handle) else {
            return Ok(false);
        };
        let from = client.workspace;
        if from == to {
            return Ok(false);
        }
        client.workspace = to;
        self.workspaces[from].remove(handle);
        self.workspaces[to].push(*handle);
        Ok(true)
    }

    /// Focuses a client within its own workspace, replacing any previous focus there.
    pub fn set_focus(&mut self, handle: &WindowHandle<H>) -> bool {
        let Some(client) = self.clients.get(handle) else {
            return false;
        };
        self.workspaces[client.workspace].set_focus(handle)
    }

    #[must_use]
    pub fn focused_on(&self, id: WorkspaceId) -> Option<WindowHandle<H>> {
        self.workspaces.get(id).and_then(Workspace::focused)
    }

    #[must_use]
    pub fn is_focused(&self, handle: &WindowHandle<H>) -> bool {
        self.clients
            .get(handle)
            .is_some_and(|c| self.focused_on(c.workspace).as_ref() == Some(handle))
    }

    /// Clients of a workspace in insertion order.
    pub fn clients_on(&self, id: WorkspaceId) -> impl Iterator<Item = &Client<H>> {
        self.workspaces
            .get(id)
            .map(Workspace::clients)
            .unwrap_or_default()
            .iter()
            .filter_map(|h| self.clients.get(h))
    }

    /// Exchanges two positions on a workspace.
    pub fn swap(&mut self, id: WorkspaceId, a: usize, b: usize) -> bool {
        self.workspaces
            .get_mut(id)
            .is_some_and(|workspace| workspace.swap(a, b))
    }

    /// The fullscreen client of a workspace.
    #[must_use]
    pub fn fullscreen_on(&self, id: WorkspaceId) -> Option<WindowHandle<H>> {
        self.workspaces.get(id).and_then(Workspace::fullscreen)
    }

    #[must_use]
    pub fn is_fullscreen(&self, handle: &WindowHandle<H>) -> bool {
        self.clients
            .get(handle)
            .is_some_and(|c| self.fullscreen_on(c.workspace).as_ref() == Some(handle))
    }

    /// Makes a client the fullscreen one of its workspace, or clears that workspace's
    /// fullscreen client when `on` is false.
    pub fn set_fullscreen(&mut self, handle: &WindowHandle<H>, on: bool) -> bool {
        let Some(client) = self.clients.get(handle) else {
            return false;
        };
        let workspace = &mut self.workspaces[client.workspace];
        workspace.set_fullscreen(on.then_some(*handle))
    }

    /// Switches a workspace to its next layout and returns it.
    pub fn cycle_layout(&mut self, id: WorkspaceId) -> Option<Layout> {
        let workspace = self.workspaces.get_mut(id)?;
        workspace.layout = workspace.layout.next();
        Some(workspace.layout)
    }

    /// Every managed handle, workspace by workspace.
    pub fn handles(&self) -> impl Iterator<Item = WindowHandle<H>> + '_ {
        self.workspaces
            .iter()
            .flat_map(|workspace| workspace.clients().iter().copied())
    }
}
