use super::{Handle, WindowHandle, WorkspaceId};
use crate::layouts::Layout;

/// An ordered set of clients plus a focus pointer.
///
/// The order is insertion order and doubles as stacking and swap order. At most one client
/// is fullscreen; it is always a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace<H: Handle> {
    pub id: WorkspaceId,
    pub layout: Layout,
    clients: Vec<WindowHandle<H>>,
    focused: Option<WindowHandle<H>>,
    fullscreen: Option<WindowHandle<H>>,
}

impl<H: Handle> Workspace<H> {
    #[must_use]
    pub fn new(id: WorkspaceId) -> Self {
        Self {
            id,
            layout: Layout::default(),
            clients: vec![],
            focused: None,
            fullscreen: None,
        }
    }

    #[must_use]
    pub fn clients(&self) -> &[WindowHandle<H>] {
        &self.clients
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
        self.clients.contains(handle)
    }

    #[must_use]
    pub fn index_of(&self, handle: &WindowHandle<H>) -> Option<usize> {
        self.clients.iter().position(|h| h == handle)
    }

    #[must_use]
    pub const fn focused(&self) -> Option<WindowHandle<H>> {
        self.focused
    }

    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        self.focused.as_ref().and_then(|h| self.index_of(h))
    }

    #[must_use]
    pub const fn fullscreen(&self) -> Option<WindowHandle<H>> {
        self.fullscreen
    }

    /// Makes a member fullscreen, or clears it with `None`.
    pub(crate) fn set_fullscreen(&mut self, handle: Option<WindowHandle<H>>) -> bool {
        if handle.is_some_and(|h| !self.contains(&h)) {
            return false;
        }
        self.fullscreen = handle;
        true
    }

    /// Appends a client. The first client of an empty workspace takes focus.
    pub(crate) fn push(&mut self, handle: WindowHandle<H>) {
        self.clients.push(handle);
        if self.focused.is_none() {
            self.focused = Some(handle);
        }
    }

    /// Removes a client. If it held focus, focus moves to the client that followed it,
    /// or to the new last client, or is cleared.
    pub(crate) fn remove(&mut self, handle: &WindowHandle<H>) -> bool {
        let Some(index) = self.index_of(handle) else {
            return false;
        };
        self.clients.remove(index);
        if self.fullscreen.as_ref() == Some(handle) {
            self.fullscreen = None;
        }
        if self.focused.as_ref() == Some(handle) {
            let next = index.min(self.clients.len().saturating_sub(1));
            self.focused = self.clients.get(next).copied();
        }
        true
    }

    /// Points focus at `handle`, replacing any previous focus. Ignored for non-members.
    pub(crate) fn set_focus(&mut self, handle: &WindowHandle<H>) -> bool {
        if !self.contains(handle) {
            return false;
        }
        self.focused = Some(*handle);
        true
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.clients.len() || b >= self.clients.len() || a == b {
            return false;
        }
        self.clients.swap(a, b);
        true
    }

    /// Index `offset` steps away from `index`, wrapping around.
    #[must_use]
    pub fn relative_index(&self, index: usize, offset: isize) -> Option<usize> {
        let len = self.clients.len();
        if len == 0 {
            return None;
        }
        let len = len as isize;
        Some((index as isize + offset).rem_euclid(len) as usize)
    }
}
