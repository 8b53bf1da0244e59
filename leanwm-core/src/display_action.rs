use crate::config::Keybind;
use crate::models::{Handle, WindowHandle, WorkspaceId, Xyhw, XyhwChange};

/// These are responses from the Window manager.
/// The display server should act on these actions.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayAction<H: Handle> {
    /// Start managing a tiled window: subscribe to its events and give it a border.
    AddedWindow(WindowHandle<H>),

    /// Start tracking a dock window. Docks get no border and no focus.
    AddedDock(WindowHandle<H>),

    /// The window is gone; drop any backend bookkeeping for it.
    DestroyedWindow(WindowHandle<H>),

    /// Move and resize a window. `xyhw` is the outer rectangle, border included.
    ConfigureWindow {
        window: WindowHandle<H>,
        xyhw: Xyhw,
        border: u32,
    },

    /// Tell a managed window where it is without moving it, in answer to a configure
    /// request it is not allowed to fulfil itself.
    ConfigureNotify {
        window: WindowHandle<H>,
        xyhw: Xyhw,
        border: u32,
    },

    /// Honour a configure request from a window we do not manage, field for field.
    PassthroughConfigure(WindowHandle<H>, XyhwChange),

    /// Map a window.
    ShowWindow(WindowHandle<H>),

    /// Put a window on top of the stack.
    RaiseWindow(WindowHandle<H>),

    /// `_NET_WM_STATE` of a window: fullscreen or nothing.
    SetFullscreen(WindowHandle<H>, bool),

    /// Unmap a window without reporting the unmap back as a withdrawal.
    HideWindow(WindowHandle<H>),

    /// Give a window input focus and the focused border colour.
    WindowTakeFocus {
        window: WindowHandle<H>,
        previous: Option<WindowHandle<H>>,
    },

    /// Move input focus back to the root window.
    Unfocus(Option<WindowHandle<H>>),

    /// Send `WM_DELETE_WINDOW`.
    SendDeleteRequest(WindowHandle<H>),

    /// Terminate the window's client connection.
    KillWindow(WindowHandle<H>),

    /// `_NET_NUMBER_OF_DESKTOPS` and `_NET_DESKTOP_NAMES`.
    SetDesktops(Vec<String>),

    /// `_NET_CURRENT_DESKTOP`.
    SetCurrentDesktop(WorkspaceId),

    /// `_NET_WM_DESKTOP` of a window.
    SetWindowDesktop(WindowHandle<H>, WorkspaceId),

    /// `_NET_CLIENT_LIST`.
    SetClientList(Vec<WindowHandle<H>>),

    /// `_NET_ACTIVE_WINDOW`.
    SetActiveWindow(Option<WindowHandle<H>>),

    /// Grab the given key bindings, dropping any previous grabs.
    ReloadKeyGrabs(Vec<Keybind>),
}
