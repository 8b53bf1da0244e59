use leanwm_core::models::WindowHandle;
use leanwm_core::DisplayEvent;
use x11rb::protocol::xproto;

use crate::xwrap::XWrap;
use crate::{error::Result, X11rbWindowHandle};

pub(crate) fn from_event(
    event: &xproto::PropertyNotifyEvent,
    xw: &XWrap,
) -> Result<Option<DisplayEvent<X11rbWindowHandle>>> {
    if event.window == xw.get_default_root() || !xw.managed_windows.contains(&event.window) {
        return Ok(None);
    }

    if event.atom == xw.atoms.WMProtocols {
        let supports_delete = event.state != xproto::Property::DELETE
            && xw.supports_delete(event.window)?;
        tracing::trace!(window = event.window, supports_delete, "WM_PROTOCOLS changed");
        let handle = WindowHandle(X11rbWindowHandle(event.window));
        return Ok(Some(DisplayEvent::ProtocolsChanged(handle, supports_delete)));
    }

    if event.atom == u32::from(xproto::AtomEnum::WM_HINTS) {
        let urgent =
            event.state != xproto::Property::DELETE && xw.get_window_urgency(event.window)?;
        tracing::trace!(window = event.window, urgent, "WM_HINTS changed");
        let handle = WindowHandle(X11rbWindowHandle(event.window));
        return Ok(Some(DisplayEvent::UrgencyChanged(handle, urgent)));
    }

    Ok(None)
}
