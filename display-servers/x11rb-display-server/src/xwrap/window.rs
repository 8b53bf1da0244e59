//! X calls related to a single window.

use leanwm_core::models::{Window, WindowHandle, Xyhw, XyhwChange};
use leanwm_core::DisplayEvent;
use x11rb::protocol::xproto::{self, ConnectionExt as _};

use crate::xatom::WMStateWindowState;
use crate::{error::Result, X11rbWindowHandle};

use super::{root_event_mask, XWrap};

impl XWrap {
    /// Reads what the core needs to know about a window that wants to be mapped.
    pub fn setup_window(
        &self,
        window: xproto::Window,
    ) -> Result<Option<DisplayEvent<X11rbWindowHandle>>> {
        // Check that the window isn't requesting to be unmanaged
        let attrs = self.get_window_attrs(window)?;
        if attrs.override_redirect
            || window == self.check_window
            || self.managed_windows.contains(&window)
            || self.docks.contains(&window)
        {
            return Ok(None);
        }
        let handle = WindowHandle(X11rbWindowHandle(window));
        let mut w = Window::new(handle, self.get_window_name(window)?);
        w.r#type = self.get_window_type(window)?;
        w.supports_delete = self.supports_delete(window)?;
        w.urgent = self.get_window_urgency(window)?;
        w.desktop = self.get_window_desktop(window)?;
        Ok(Some(DisplayEvent::WindowCreate(w)))
    }

    /// Sets up a window that we want to tile.
    pub fn setup_managed_window(&mut self, window: xproto::Window) -> Result<()> {
        self.subscribe_to_window_events(window)?;
        self.managed_windows.push(window);
        self.conn.change_window_attributes(
            window,
            &xproto::ChangeWindowAttributesAux::new().border_pixel(self.colors.normal),
        )?;
        self.set_window_config(
            window,
            &xproto::ConfigureWindowAux::new().border_width(self.border_width),
        )?;
        // Set WM_STATE to normal state to allow window sharing.
        self.set_wm_state(window, WMStateWindowState::Normal)?;
        Ok(())
    }

    /// Sets up a dock: no border, no focus, only property changes are interesting.
    pub fn setup_dock(&mut self, window: xproto::Window) -> Result<()> {
        self.subscribe_to_event(window, xproto::EventMask::PROPERTY_CHANGE)?;
        self.docks.push(window);
        self.set_window_config(window, &xproto::ConfigureWindowAux::new().border_width(0))?;
        self.set_wm_state(window, WMStateWindowState::Normal)?;
        Ok(())
    }

    /// Forgets a window. Whether it was unmapped or destroyed has already been dealt with.
    pub fn teardown_managed_window(&mut self, window: xproto::Window) {
        self.managed_windows.retain(|x| *x != window);
        self.docks.retain(|x| *x != window);
    }

    /// Maps or unmaps a window without the root seeing the unmap as a withdrawal.
    pub fn toggle_window_visibility(&self, window: xproto::Window, visible: bool) -> Result<()> {
        let change_mask = |mask| -> Result<()> {
            let attrs = xproto::ChangeWindowAttributesAux::new().event_mask(mask);
            self.conn.change_window_attributes(self.root, &attrs)?;
            Ok(())
        };
        // We don't want to receive this potential map or unmap event.
        let quiet =
            u32::from(root_event_mask()) & !u32::from(xproto::EventMask::SUBSTRUCTURE_NOTIFY);
        change_mask(xproto::EventMask::from(quiet))?;

        let result = if visible {
            self.conn
                .map_window(window)
                .map_err(Into::into)
                .and_then(|_| self.set_wm_state(window, WMStateWindowState::Normal))
        } else {
            self.conn
                .unmap_window(window)
                .map_err(Into::into)
                .and_then(|_| self.set_wm_state(window, WMStateWindowState::Iconic))
        };

        // The root mask is restored even if the window vanished in the meantime.
        change_mask(root_event_mask())?;
        result
    }

    /// Moves and resizes a window so its outer rectangle, border included, is `xyhw`.
    pub fn move_resize_window(&self, window: xproto::Window, xyhw: Xyhw, border: u32) -> Result<()> {
        let (width, height) = inner_size(xyhw, border);
        let changes = xproto::ConfigureWindowAux::new()
            .x(xyhw.x)
            .y(xyhw.y)
            .width(width)
            .height(height)
            .border_width(border);
        self.set_window_config(window, &changes)
    }

    /// Send a synthetic `ConfigureNotify` telling a window where it is.
    pub fn configure_notify(&self, window: xproto::Window, xyhw: Xyhw, border: u32) -> Result<()> {
        let (width, height) = inner_size(xyhw, border);
        let configure_event = xproto::ConfigureNotifyEvent {
            response_type: xproto::CONFIGURE_NOTIFY_EVENT,
            event: window,
            window,
            x: i16::try_from(xyhw.x)?,
            y: i16::try_from(xyhw.y)?,
            width: u16::try_from(width)?,
            height: u16::try_from(height)?,
            border_width: u16::try_from(border)?,
            above_sibling: x11rb::NONE,
            override_redirect: false,
            ..Default::default()
        };
        self.conn.send_event(
            false,
            window,
            xproto::EventMask::STRUCTURE_NOTIFY,
            configure_event,
        )?;
        Ok(())
    }

    /// Applies a configure request from a window we do not manage, field for field.
    pub fn passthrough_configure(&self, window: xproto::Window, change: XyhwChange) -> Result<()> {
        let to_u32 = |value: Option<i32>| value.map(u32::try_from).transpose();
        let changes = xproto::ConfigureWindowAux {
            x: change.x,
            y: change.y,
            width: to_u32(change.w)?,
            height: to_u32(change.h)?,
            border_width: to_u32(change.border)?,
            ..Default::default()
        };
        self.set_window_config(window, &changes)
    }

    /// Makes a window take focus.
    pub fn window_take_focus(
        &self,
        window: xproto::Window,
        previous: Option<xproto::Window>,
    ) -> Result<()> {
        // Update previous window.
        if let Some(previous) = previous.filter(|p| *p != window) {
            self.set_window_border_color(previous, self.colors.normal)?;
        }
        self.set_window_border_color(window, self.colors.active)?;
        self.conn.set_input_focus(
            xproto::InputFocus::POINTER_ROOT,
            window,
            x11rb::CURRENT_TIME,
        )?;
        // Tell the window to take focus
        if self.can_send_xevent_atom(window, self.atoms.WMTakeFocus)? {
            self.send_xevent_atom(window, self.atoms.WMTakeFocus)?;
        }
        Ok(())
    }

    /// Unfocuses all windows.
    pub fn unfocus(&self, previous: Option<xproto::Window>) -> Result<()> {
        if let Some(previous) = previous {
            self.set_window_border_color(previous, self.colors.normal)?;
        }
        self.conn.set_input_focus(
            xproto::InputFocus::POINTER_ROOT,
            self.root,
            x11rb::CURRENT_TIME,
        )?;
        Ok(())
    }

    /// Asks a window to close itself through `WM_DELETE_WINDOW`.
    pub fn send_delete_request(&self, window: xproto::Window) -> Result<()> {
        self.send_xevent_atom(window, self.atoms.WMDelete)
    }

    /// Kills a window's client.
    pub fn kill_window(&self, window: xproto::Window) -> Result<()> {
        self.conn.grab_server()?;
        self.conn
            .set_close_down_mode(xproto::CloseDown::DESTROY_ALL)?;
        self.conn.kill_client(window)?;
        self.conn.ungrab_server()?;
        Ok(())
    }

    /// Subscribe to an event of a window.
    pub fn subscribe_to_event(
        &self,
        window: xproto::Window,
        mask: xproto::EventMask,
    ) -> Result<()> {
        let attrs = xproto::ChangeWindowAttributesAux::new().event_mask(mask);
        self.conn.change_window_attributes(window, &attrs)?;
        Ok(())
    }

    /// Subscribe to the wanted events of a window.
    pub fn subscribe_to_window_events(&self, window: xproto::Window) -> Result<()> {
        let mask = xproto::EventMask::ENTER_WINDOW | xproto::EventMask::PROPERTY_CHANGE;
        self.subscribe_to_event(window, mask)
    }

    /// Whether a window should be adopted at startup.
    pub fn is_adoptable(&self, window: xproto::Window) -> Result<bool> {
        if window == self.check_window {
            return Ok(false);
        }
        let attrs = self.get_window_attrs(window)?;
        Ok(!attrs.override_redirect && attrs.map_state == xproto::MapState::VIEWABLE)
    }

    /// Whether a window is one of our docks.
    pub fn is_dock(&self, window: xproto::Window) -> bool {
        self.docks.contains(&window)
    }

    /// Whether a window is tiled or docked by us.
    pub fn is_managed(&self, window: xproto::Window) -> bool {
        self.managed_windows.contains(&window) || self.is_dock(window)
    }
}

/// The size X expects for a window whose outer rectangle is `xyhw`. Never below one pixel.
pub(crate) fn inner_size(xyhw: Xyhw, border: u32) -> (u32, u32) {
    let border = i64::from(border) * 2;
    let clamp = |side: i32| u32::try_from((i64::from(side) - border).max(1)).unwrap_or(1);
    (clamp(xyhw.w), clamp(xyhw.h))
}
