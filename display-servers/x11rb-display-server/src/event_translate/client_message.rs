use leanwm_core::models::WindowHandle;
use leanwm_core::{Command, DisplayEvent, StateChange};
use x11rb::protocol::xproto;

use crate::error::Result;
use crate::{xwrap::XWrap, X11rbWindowHandle};

/// Requests from pagers and bars, as described by EWMH.
pub(crate) fn from_event(
    event: &xproto::ClientMessageEvent,
    xw: &XWrap,
) -> Result<Option<DisplayEvent<X11rbWindowHandle>>> {
    if !xw.managed_windows.contains(&event.window) && event.window != xw.get_default_root() {
        return Ok(None);
    }
    let atom_name = xw.atoms.get_name(event.type_);
    tracing::trace!(window = event.window, atom = atom_name, "ClientMessage");

    let handle = WindowHandle(X11rbWindowHandle(event.window));
    let value = event.data.as_data32()[0];

    if event.type_ == xw.atoms.NetCurrentDesktop {
        let Some(index) = desktop_index(value) else {
            return Ok(None);
        };
        let event = DisplayEvent::SendCommand(Command::GoToWorkspace(index + 1));
        return Ok(Some(event));
    }

    if event.window == xw.get_default_root() {
        return Ok(None);
    }

    if event.type_ == xw.atoms.NetWMDesktop {
        return Ok(desktop_index(value)
            .map(|index| DisplayEvent::MoveWindowToWorkspace(handle, index)));
    }

    if event.type_ == xw.atoms.NetCloseWindow {
        return Ok(Some(DisplayEvent::CloseRequest(handle)));
    }

    if event.type_ == xw.atoms.NetActiveWindow {
        return Ok(Some(DisplayEvent::ActivateWindow(handle)));
    }

    if event.type_ == xw.atoms.NetWMState {
        let data = event.data.as_data32();
        let touches_fullscreen = data[1..3].contains(&xw.atoms.NetWMStateFullscreen);
        return Ok(state_change(value)
            .filter(|_| touches_fullscreen)
            .map(|change| DisplayEvent::FullscreenRequest(handle, change)));
    }

    Ok(None)
}

/// The action field of `_NET_WM_STATE`.
fn state_change(value: u32) -> Option<StateChange> {
    match value {
        0 => Some(StateChange::Remove),
        1 => Some(StateChange::Add),
        2 => Some(StateChange::Toggle),
        _ => {
            tracing::debug!(value, "Received invalid _NET_WM_STATE action");
            None
        }
    }
}

fn desktop_index(value: u32) -> Option<usize> {
    match usize::try_from(value) {
        Ok(index) => Some(index),
        Err(err) => {
            tracing::debug!(value, %err, "Received invalid desktop index");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wm_state_actions_follow_ewmh() {
        assert_eq!(state_change(0), Some(StateChange::Remove));
        assert_eq!(state_change(1), Some(StateChange::Add));
        assert_eq!(state_change(2), Some(StateChange::Toggle));
        assert_eq!(state_change(3), None);
    }
}
