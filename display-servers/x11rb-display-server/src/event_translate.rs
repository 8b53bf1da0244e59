use leanwm_core::models::{WindowHandle, Xyhw, XyhwChange};
use leanwm_core::DisplayEvent;
use x11rb::protocol::{xproto, Event};

use crate::xatom::WMStateWindowState;
use crate::xwrap::{keyboard::from_x_state, XWrap};
use crate::{error::Result, X11rbWindowHandle};

mod client_message;
mod property_notify;

/// Translate events from x11rb to leanwm's `DisplayEvent`
pub(crate) fn translate(event: Event, xw: &mut XWrap) -> Option<DisplayEvent<X11rbWindowHandle>> {
    let res = match &event {
        Event::MapRequest(e) => xw.setup_window(e.window),
        Event::UnmapNotify(e) => from_unmap_event(e, xw),
        Event::DestroyNotify(e) => Ok(from_destroy_notify(e, xw)),
        Event::ConfigureRequest(e) => Ok(Some(from_configure_request(e))),
        Event::ConfigureNotify(e) => Ok(from_configure_notify(e, xw)),
        Event::EnterNotify(e) => Ok(from_enter_notify(e, xw)),
        Event::KeyPress(e) => Ok(from_key_press(e, xw)),
        Event::MappingNotify(e) => from_mapping_notify(e, xw),
        Event::ClientMessage(e) => client_message::from_event(e, xw),
        Event::PropertyNotify(e) => property_notify::from_event(e, xw),
        Event::Error(e) => {
            // Mostly requests racing a window that is already gone.
            tracing::debug!(error = ?e, "X error");
            Ok(None)
        }
        _ => return None,
    };
    match res {
        Ok(display_event) => display_event,
        Err(e) => {
            tracing::error!(?event, error = ?e, "An error occured when processing an event");
            None
        }
    }
}

fn from_unmap_event(
    event: &xproto::UnmapNotifyEvent,
    xw: &mut XWrap,
) -> Result<Option<DisplayEvent<X11rbWindowHandle>>> {
    if !xw.is_managed(event.window) {
        return Ok(None);
    }
    // The window withdrew itself; hidden windows never reach us.
    let h = WindowHandle(X11rbWindowHandle(event.window));
    xw.set_wm_state(event.window, WMStateWindowState::Withdrawn)?;
    Ok(Some(DisplayEvent::WindowDestroy(h)))
}

fn from_destroy_notify(
    event: &xproto::DestroyNotifyEvent,
    xw: &XWrap,
) -> Option<DisplayEvent<X11rbWindowHandle>> {
    xw.is_managed(event.window)
        .then(|| DisplayEvent::WindowDestroy(WindowHandle(X11rbWindowHandle(event.window))))
}

fn from_configure_request(
    event: &xproto::ConfigureRequestEvent,
) -> DisplayEvent<X11rbWindowHandle> {
    let mask = u16::from(event.value_mask);
    let requested = |flag: xproto::ConfigWindow| mask & u16::from(flag) != 0;
    let change = XyhwChange {
        x: requested(xproto::ConfigWindow::X).then_some(event.x.into()),
        y: requested(xproto::ConfigWindow::Y).then_some(event.y.into()),
        w: requested(xproto::ConfigWindow::WIDTH).then_some(event.width.into()),
        h: requested(xproto::ConfigWindow::HEIGHT).then_some(event.height.into()),
        border: requested(xproto::ConfigWindow::BORDER_WIDTH)
            .then_some(event.border_width.into()),
    };
    DisplayEvent::ConfigureRequest(WindowHandle(X11rbWindowHandle(event.window)), change)
}

/// Only the root is interesting here: its size is the screen size.
fn from_configure_notify(
    event: &xproto::ConfigureNotifyEvent,
    xw: &XWrap,
) -> Option<DisplayEvent<X11rbWindowHandle>> {
    (event.window == xw.get_default_root()).then(|| {
        DisplayEvent::ScreenCreate(Xyhw::new(
            event.x.into(),
            event.y.into(),
            event.width.into(),
            event.height.into(),
        ))
    })
}

fn from_enter_notify(
    event: &xproto::EnterNotifyEvent,
    xw: &XWrap,
) -> Option<DisplayEvent<X11rbWindowHandle>> {
    if event.mode != xproto::NotifyMode::NORMAL
        || event.detail == xproto::NotifyDetail::INFERIOR
        || event.event == xw.get_default_root()
    {
        return None;
    }

    let h = WindowHandle(X11rbWindowHandle(event.event));
    Some(DisplayEvent::WindowTakeFocus(h))
}

fn from_key_press(
    event: &xproto::KeyPressEvent,
    xw: &XWrap,
) -> Option<DisplayEvent<X11rbWindowHandle>> {
    let Some(keysym) = xw.keycode_to_keysym(event.detail) else {
        tracing::debug!(keycode = event.detail, "Key press without a keysym");
        return None;
    };
    Some(DisplayEvent::KeyCombo(from_x_state(event.state), keysym))
}

fn from_mapping_notify(
    event: &xproto::MappingNotifyEvent,
    xw: &mut XWrap,
) -> Result<Option<DisplayEvent<X11rbWindowHandle>>> {
    if event.request == xproto::Mapping::POINTER {
        return Ok(None);
    }
    xw.refresh_keyboard_mapping()?;
    Ok(Some(DisplayEvent::KeyGrabReload))
}
