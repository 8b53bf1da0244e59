use crate::models::{Handle, Window, WindowHandle, WorkspaceId, Xyhw, XyhwChange};
use crate::utils::keysym_lookup::XKeysym;
use crate::utils::modmask_lookup::ModMask;
use crate::Command;

/// Events the display server reports to the manager, already decoded.
#[derive(Debug, Clone)]
pub enum DisplayEvent<H: Handle> {
    /// Geometry of the root window, at startup and whenever it changes.
    ScreenCreate(Xyhw),
    /// A window asked to be mapped.
    WindowCreate(Window<H>),
    /// A managed window was unmapped or destroyed.
    WindowDestroy(WindowHandle<H>),
    /// A window asked for a new geometry.
    ConfigureRequest(WindowHandle<H>, XyhwChange),
    /// The pointer entered a window.
    WindowTakeFocus(WindowHandle<H>),
    /// A grabbed key chord was pressed.
    KeyCombo(ModMask, XKeysym),
    /// The keyboard mapping changed; key grabs need to be redone.
    KeyGrabReload,
    /// `WM_PROTOCOLS` changed; the flag says whether `WM_DELETE_WINDOW` is listed now.
    ProtocolsChanged(WindowHandle<H>, bool),
    /// `_NET_CLOSE_WINDOW` from a pager.
    CloseRequest(WindowHandle<H>),
    /// `_NET_ACTIVE_WINDOW` from a pager.
    ActivateWindow(WindowHandle<H>),
    /// `_NET_WM_DESKTOP` from a pager. The workspace is zero-based.
    MoveWindowToWorkspace(WindowHandle<H>, WorkspaceId),
    /// `_NET_WM_STATE` asked to add, remove or toggle fullscreen.
    FullscreenRequest(WindowHandle<H>, StateChange),
    /// The urgency bit of `WM_HINTS` changed.
    UrgencyChanged(WindowHandle<H>, bool),
    /// `_NET_CURRENT_DESKTOP` found on the root at startup. Sent before any window is
    /// adopted.
    RestoreDesktop(WorkspaceId),
    SendCommand(Command),
}

/// The action field of a `_NET_WM_STATE` client message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Remove,
    Add,
    Toggle,
}

impl StateChange {
    /// Whether the state ends up set, given whether it is set now.
    #[must_use]
    pub const fn apply(self, current: bool) -> bool {
        match self {
            Self::Remove => false,
            Self::Add => true,
            Self::Toggle => !current,
        }
    }
}
