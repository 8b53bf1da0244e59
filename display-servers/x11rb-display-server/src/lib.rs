//! x11rb backend for leanwm
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

use std::future::Future;
use std::pin::Pin;

use leanwm_core::models::{Handle, WindowHandle, WorkspaceId, Xyhw, XyhwChange};
use leanwm_core::{Config, DisplayAction, DisplayEvent, DisplayServer, Keybind};
use x11rb::protocol::xproto;

use crate::xwrap::XWrap;
use error::Result;

mod error;
mod event_translate;
mod xatom;
mod xwrap;

pub use error::Error;

/// An X window id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct X11rbWindowHandle(pub xproto::Window);

impl Handle for X11rbWindowHandle {}

type Event = DisplayEvent<X11rbWindowHandle>;
type Action = DisplayAction<X11rbWindowHandle>;
type XHandle = WindowHandle<X11rbWindowHandle>;

pub struct X11rbDisplayServer {
    xw: XWrap,
    initial_events: Vec<Event>,
}

impl DisplayServer<X11rbWindowHandle> for X11rbDisplayServer {
    type Error = Error;

    fn new(config: &impl Config) -> std::result::Result<Self, Error> {
        let xw = XWrap::new(config)?;
        let mut instance = Self {
            xw,
            initial_events: Vec::new(),
        };
        instance.initial_events = instance.initial_events()?;
        Ok(instance)
    }

    fn get_next_events(&mut self) -> Vec<Event> {
        let mut events = std::mem::take(&mut self.initial_events);

        loop {
            match self.xw.poll_next_event() {
                Ok(Some(ev)) => {
                    if let Some(ev) = event_translate::translate(ev, &mut self.xw) {
                        events.push(ev);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = ?e, "An error occurred when polling for events.");
                    break;
                }
            }
        }

        events
    }

    fn execute_action(&mut self, act: Action) -> Option<Event> {
        let xw = &mut self.xw;
        let event: Result<Option<Event>> = match act.clone() {
            DisplayAction::AddedWindow(h) => from_added_window(xw, h),
            DisplayAction::AddedDock(h) => from_added_dock(xw, h),
            DisplayAction::DestroyedWindow(h) => from_destroyed_window(xw, h),
            DisplayAction::ConfigureWindow {
                window,
                xyhw,
                border,
            } => from_configure_window(xw, window, xyhw, border),
            DisplayAction::ConfigureNotify {
                window,
                xyhw,
                border,
            } => from_configure_notify(xw, window, xyhw, border),
            DisplayAction::PassthroughConfigure(h, change) => {
                from_passthrough_configure(xw, h, change)
            }
            DisplayAction::ShowWindow(h) => from_toggle_visibility(xw, h, true),
            DisplayAction::RaiseWindow(h) => from_raise_window(xw, h),
            DisplayAction::SetFullscreen(h, on) => from_set_fullscreen(xw, h, on),
            DisplayAction::HideWindow(h) => from_toggle_visibility(xw, h, false),
            DisplayAction::WindowTakeFocus { window, previous } => {
                from_window_take_focus(xw, window, previous)
            }
            DisplayAction::Unfocus(previous) => from_unfocus(xw, previous),
            DisplayAction::SendDeleteRequest(h) => from_send_delete_request(xw, h),
            DisplayAction::KillWindow(h) => from_kill_window(xw, h),
            DisplayAction::SetDesktops(names) => from_set_desktops(xw, &names),
            DisplayAction::SetCurrentDesktop(id) => from_set_current_desktop(xw, id),
            DisplayAction::SetWindowDesktop(h, id) => from_set_window_desktop(xw, h, id),
            DisplayAction::SetClientList(handles) => from_set_client_list(xw, &handles),
            DisplayAction::SetActiveWindow(h) => from_set_active_window(xw, h),
            DisplayAction::ReloadKeyGrabs(keybinds) => from_reload_key_grabs(xw, &keybinds),
        };
        match event {
            Ok(ev) => {
                if ev.is_some() {
                    tracing::trace!(?ev, "DisplayEvent");
                }
                ev
            }
            Err(e) => {
                tracing::error!(action = ?act, error = ?e, "Error when processing a display action.");
                None
            }
        }
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        let fd = self.xw.readiness();
        Box::pin(async move {
            match fd.readable().await {
                Ok(mut guard) => guard.clear_ready(),
                Err(e) => tracing::error!(error = ?e, "Unable to wait on the X connection."),
            }
        })
    }

    fn flush(&self) {
        if let Err(e) = self.xw.flush() {
            tracing::error!(error = ?e, "Error when flushing the connection.");
        }
    }
}

impl X11rbDisplayServer {
    /// The screen geometry, the desktop a previous window manager left current, then every
    /// window that was already mapped before we started.
    fn initial_events(&self) -> Result<Vec<Event>> {
        let mut events = vec![Event::ScreenCreate(self.xw.get_root_geometry()?)];
        match self.xw.get_current_desktop() {
            Ok(Some(desktop)) => events.push(Event::RestoreDesktop(desktop)),
            Ok(None) => {}
            Err(e) => tracing::debug!(error = ?e, "Unable to read the current desktop."),
        }
        events.append(&mut self.find_all_windows());
        Ok(events)
    }

    fn find_all_windows(&self) -> Vec<Event> {
        let handles = match self.xw.get_all_windows() {
            Ok(handles) => handles,
            Err(err) => {
                tracing::error!(error = ?err, "Unable to list existing windows.");
                return vec![];
            }
        };
        handles
            .into_iter()
            .filter_map(|handle| {
                let adopted = match self.xw.is_adoptable(handle) {
                    Ok(true) => self.xw.setup_window(handle),
                    Ok(false) => Ok(None),
                    Err(e) => Err(e),
                };
                adopted.unwrap_or_else(|e| {
                    tracing::error!(window_handle = handle, error = ?e, "Error when adopting window.");
                    None
                })
            })
            .collect()
    }
}

fn raw(handle: XHandle) -> xproto::Window {
    let WindowHandle(X11rbWindowHandle(window)) = handle;
    window
}

// Display actions.
fn from_added_window(xw: &mut XWrap, handle: XHandle) -> Result<Option<Event>> {
    xw.setup_managed_window(raw(handle))?;
    Ok(None)
}

fn from_added_dock(xw: &mut XWrap, handle: XHandle) -> Result<Option<Event>> {
    xw.setup_dock(raw(handle))?;
    Ok(None)
}

fn from_destroyed_window(xw: &mut XWrap, handle: XHandle) -> Result<Option<Event>> {
    xw.teardown_managed_window(raw(handle));
    Ok(None)
}

fn from_configure_window(
    xw: &mut XWrap,
    handle: XHandle,
    xyhw: Xyhw,
    border: u32,
) -> Result<Option<Event>> {
    xw.move_resize_window(raw(handle), xyhw, border)?;
    Ok(None)
}

fn from_configure_notify(
    xw: &mut XWrap,
    handle: XHandle,
    xyhw: Xyhw,
    border: u32,
) -> Result<Option<Event>> {
    xw.configure_notify(raw(handle), xyhw, border)?;
    Ok(None)
}

fn from_passthrough_configure(
    xw: &mut XWrap,
    handle: XHandle,
    change: XyhwChange,
) -> Result<Option<Event>> {
    xw.passthrough_configure(raw(handle), change)?;
    Ok(None)
}

fn from_toggle_visibility(xw: &mut XWrap, handle: XHandle, visible: bool) -> Result<Option<Event>> {
    xw.toggle_window_visibility(raw(handle), visible)?;
    Ok(None)
}

fn from_raise_window(xw: &mut XWrap, handle: XHandle) -> Result<Option<Event>> {
    xw.raise_window(raw(handle))?;
    Ok(None)
}

fn from_set_fullscreen(xw: &mut XWrap, handle: XHandle, on: bool) -> Result<Option<Event>> {
    xw.set_fullscreen_state(raw(handle), on)?;
    Ok(None)
}

fn from_window_take_focus(
    xw: &mut XWrap,
    window: XHandle,
    previous: Option<XHandle>,
) -> Result<Option<Event>> {
    xw.window_take_focus(raw(window), previous.map(raw))?;
    Ok(None)
}

fn from_unfocus(xw: &mut XWrap, previous: Option<XHandle>) -> Result<Option<Event>> {
    xw.unfocus(previous.map(raw))?;
    Ok(None)
}

fn from_send_delete_request(xw: &mut XWrap, handle: XHandle) -> Result<Option<Event>> {
    xw.send_delete_request(raw(handle))?;
    Ok(None)
}

fn from_kill_window(xw: &mut XWrap, handle: XHandle) -> Result<Option<Event>> {
    xw.kill_window(raw(handle))?;
    Ok(None)
}

fn from_set_desktops(xw: &mut XWrap, names: &[String]) -> Result<Option<Event>> {
    xw.set_desktops(names)?;
    Ok(None)
}

fn from_set_current_desktop(xw: &mut XWrap, workspace: WorkspaceId) -> Result<Option<Event>> {
    xw.set_current_desktop(workspace)?;
    Ok(None)
}

fn from_set_window_desktop(
    xw: &mut XWrap,
    handle: XHandle,
    workspace: WorkspaceId,
) -> Result<Option<Event>> {
    xw.set_window_desktop(raw(handle), workspace)?;
    Ok(None)
}

fn from_set_client_list(xw: &mut XWrap, handles: &[XHandle]) -> Result<Option<Event>> {
    let windows: Vec<xproto::Window> = handles.iter().copied().map(raw).collect();
    xw.set_client_list(&windows)?;
    Ok(None)
}

fn from_set_active_window(xw: &mut XWrap, handle: Option<XHandle>) -> Result<Option<Event>> {
    xw.set_active_window(handle.map(raw))?;
    Ok(None)
}

fn from_reload_key_grabs(xw: &mut XWrap, keybinds: &[Keybind]) -> Result<Option<Event>> {
    xw.reload_key_grabs(keybinds)?;
    Ok(None)
}
