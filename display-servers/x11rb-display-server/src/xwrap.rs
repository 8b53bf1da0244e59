use std::os::fd::{AsRawFd, RawFd};
use std::sync::Arc;

use leanwm_core::Config;
use tokio::io::{unix::AsyncFd, Interest};
use x11rb::{
    connection::Connection,
    protocol::xproto::{self, ConnectionExt as _},
    rust_connection::RustConnection,
    wrapper::ConnectionExt as _,
    COPY_DEPTH_FROM_PARENT,
};

use crate::error::{Error, Result};
use crate::xatom::AtomCollection;

mod getters;
pub(crate) mod keyboard;
mod setters;
mod window;

pub(crate) use keyboard::KeyboardMapping;

const MAX_PROPERTY_VALUE_LEN: u32 = 4096;
const WM_NAME: &str = "leanwm";

#[inline]
pub fn root_event_mask() -> xproto::EventMask {
    xproto::EventMask::SUBSTRUCTURE_REDIRECT
        | xproto::EventMask::SUBSTRUCTURE_NOTIFY
        | xproto::EventMask::STRUCTURE_NOTIFY
        | xproto::EventMask::PROPERTY_CHANGE
}

/// Border pixels, allocated once from the configured colours.
pub struct Colors {
    normal: u32,
    active: u32,
}

/// Contains Xserver information and origins.
pub(crate) struct XWrap {
    conn: RustConnection,
    fd: Arc<AsyncFd<RawFd>>,
    screen: usize,
    root: xproto::Window,
    check_window: xproto::Window,
    pub atoms: AtomCollection,

    colors: Colors,
    border_width: u32,
    keymap: KeyboardMapping,
    pub managed_windows: Vec<xproto::Window>,
    pub docks: Vec<xproto::Window>,
}

impl XWrap {
    /// Connects to the display named by `$DISPLAY` and becomes its window manager.
    ///
    /// # Errors
    ///
    /// Fails when the server cannot be reached, another window manager holds the root, or the
    /// supporting-check window cannot be created.
    pub fn new(config: &impl Config) -> Result<Self> {
        let (conn, screen) = x11rb::connect(None)?;
        let root = conn.setup().roots[screen].root;
        tracing::debug!(screen, root, "Connected to the X server");

        // Only one client may select substructure redirect on the root.
        let became_wm = conn
            .change_window_attributes(
                root,
                &xproto::ChangeWindowAttributesAux::new().event_mask(root_event_mask()),
            )?
            .check();
        if let Err(err) = became_wm {
            tracing::error!(error = ?err, "Unable to select substructure redirect on the root");
            return Err(Error::AnotherWmRunning);
        }

        let atoms = AtomCollection::new(&conn)?.reply()?;

        let check_window = conn.generate_id()?;
        conn.create_window(
            COPY_DEPTH_FROM_PARENT,
            check_window,
            root,
            -1,
            -1,
            1,
            1,
            0,
            xproto::WindowClass::INPUT_ONLY,
            x11rb::COPY_FROM_PARENT,
            &xproto::CreateWindowAux::new().override_redirect(1_u32),
        )?
        .check()?;

        let fd = AsyncFd::with_interest(conn.stream().as_raw_fd(), Interest::READABLE)
            .map_err(|e| Error::Connection(e.into()))?;

        let keymap = KeyboardMapping::fetch(&conn)?;

        let mut xw = Self {
            conn,
            fd: Arc::new(fd),
            screen,
            root,
            check_window,
            atoms,

            colors: Colors {
                normal: 0,
                active: 0,
            },
            border_width: config.border_width(),
            keymap,
            managed_windows: vec![],
            docks: vec![],
        };
        xw.colors = Colors {
            normal: xw.get_color(&config.normal_border_color())?,
            active: xw.get_color(&config.focused_border_color())?,
        };
        xw.init_hints()?;
        xw.sync()?;
        Ok(xw)
    }

    /// The supporting-check window and the hints that never change while we run.
    fn init_hints(&self) -> Result<()> {
        let root = self.root;
        let check = self.check_window;
        let window_type: xproto::Atom = xproto::AtomEnum::WINDOW.into();
        self.replace_property_u32(root, self.atoms.NetSupportingWmCheck, window_type, &[check])?;
        self.replace_property_u32(check, self.atoms.NetSupportingWmCheck, window_type, &[check])?;
        self.conn.change_property8(
            xproto::PropMode::REPLACE,
            check,
            self.atoms.NetWMName,
            self.atoms.UTF8String,
            WM_NAME.as_bytes(),
        )?;

        // EWMH compliance.
        let supported = self.atoms.net_supported();
        self.replace_property_u32(
            root,
            self.atoms.NetSupported,
            xproto::AtomEnum::ATOM.into(),
            &supported,
        )?;
        self.conn.delete_property(root, self.atoms.NetClientList)?;
        Ok(())
    }

    /// A handle on the connection socket that resolves when it becomes readable.
    pub fn readiness(&self) -> Arc<AsyncFd<RawFd>> {
        Arc::clone(&self.fd)
    }

    /// Returns the next event already received, without blocking.
    pub fn poll_next_event(&self) -> Result<Option<x11rb::protocol::Event>> {
        Ok(self.conn.poll_for_event()?)
    }

    /// Send a client message carrying `atom` under `WM_PROTOCOLS`.
    // `XSendEvent`: https://tronche.com/gui/x/xlib/event-handling/XSendEvent.html
    fn send_xevent_atom(&self, window: xproto::Window, atom: xproto::Atom) -> Result<()> {
        let msg = xproto::ClientMessageEvent::new(
            32,
            window,
            self.atoms.WMProtocols,
            [atom, x11rb::CURRENT_TIME, 0, 0, 0],
        );
        self.conn
            .send_event(false, window, xproto::EventMask::NO_EVENT, msg)?;
        Ok(())
    }

    /// Returns whether a window lists `atom` in its `WM_PROTOCOLS`.
    // `XGetWMProtocols`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMProtocols.html
    pub fn can_send_xevent_atom(&self, window: xproto::Window, atom: xproto::Atom) -> Result<bool> {
        let reply = self
            .conn
            .get_property(
                false,
                window,
                self.atoms.WMProtocols,
                xproto::AtomEnum::ATOM,
                0,
                MAX_PROPERTY_VALUE_LEN / 4,
            )?
            .reply()?;

        Ok(reply
            .value32()
            .is_some_and(|mut atoms| atoms.any(|a| a == atom)))
    }

    /// Flush and sync the xserver.
    pub fn sync(&self) -> Result<()> {
        self.conn.sync()?;
        Ok(())
    }

    /// Flush the xserver.
    // `XFlush`: https://tronche.com/gui/x/xlib/event-handling/XFlush.html
    pub fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }
}
