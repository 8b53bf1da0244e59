//! Window identity as handed to us by the display server.
#![allow(clippy::module_name_repetitions)]

use std::fmt::Debug;
use std::hash::Hash;

use super::{WindowType, WorkspaceId};

/// A trait which backend specific window handles need to implement
pub trait Handle: Debug + Clone + Copy + PartialEq + Eq + Hash + Default + Send + 'static {}

/// A Backend-agnostic handle to a window used to identify it.
///
/// Handles are assigned by the display server. The manager never invents one, and must cope
/// with the server invalidating a handle while actions for it are still queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle<H: Handle>(pub H);

/// Handle for testing purposes
pub type MockHandle = i32;
impl Handle for MockHandle {}

/// What the display server knows about a window asking to be mapped.
#[derive(Debug, Clone)]
pub struct Window<H: Handle> {
    pub handle: WindowHandle<H>,
    pub r#type: WindowType,
    /// The window lists `WM_DELETE_WINDOW` in its `WM_PROTOCOLS`.
    pub supports_delete: bool,
    /// The urgency bit of `WM_HINTS` is set.
    pub urgent: bool,
    /// `_NET_WM_DESKTOP` left on the window, e.g. by a previous window manager.
    pub desktop: Option<WorkspaceId>,
    pub name: Option<String>,
}

impl<H: Handle> Window<H> {
    #[must_use]
    pub fn new(handle: WindowHandle<H>, name: Option<String>) -> Self {
        Self {
            handle,
            r#type: WindowType::Normal,
            supports_delete: false,
            urgent: false,
            desktop: None,
            name,
        }
    }

    #[must_use]
    pub fn is_dock(&self) -> bool {
        self.r#type == WindowType::Dock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_windows_are_normal_and_cannot_be_asked_to_close() {
        let window = Window::new(WindowHandle::<MockHandle>(1), Some("term".to_owned()));
        assert_eq!(window.r#type, WindowType::Normal);
        assert!(!window.supports_delete);
        assert!(!window.urgent);
        assert_eq!(window.desktop, None);
        assert!(!window.is_dock());
    }
}
