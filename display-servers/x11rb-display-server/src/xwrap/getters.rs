use leanwm_core::models::{WindowType, Xyhw};
use leanwm_core::models::WorkspaceId;
use x11rb::{
    connection::Connection,
    properties::WmHints,
    protocol::xproto::{self, ConnectionExt as _},
};

use crate::error::{Error, Result};

use super::{XWrap, MAX_PROPERTY_VALUE_LEN};

impl XWrap {
    // Public functions.

    /// Returns the direct children of the root, bottom of the stack first.
    pub fn get_all_windows(&self) -> Result<Vec<xproto::Window>> {
        Ok(self.conn.query_tree(self.root)?.reply()?.children)
    }

    /// Allocates the pixel for a `#RRGGBB` colour in the default colormap.
    pub fn get_color(&self, color: &str) -> Result<u32> {
        let screen = &self.conn.setup().roots[self.screen];
        let (red, green, blue) = parse_color_string(color)?;

        let rep = self
            .conn
            .alloc_color(screen.default_colormap, red, green, blue)?
            .reply()?;
        Ok(rep.pixel)
    }

    /// Returns the default root.
    #[must_use]
    pub const fn get_default_root(&self) -> xproto::Window {
        self.root
    }

    /// Geometry of the root window, i.e. the whole screen.
    pub fn get_root_geometry(&self) -> Result<Xyhw> {
        self.get_window_geometry(self.root)
    }

    /// Returns the attributes of a window.
    // `XGetWindowAttributes`: https://tronche.com/gui/x/xlib/window-information/XGetWindowAttributes.html
    pub fn get_window_attrs(
        &self,
        window: xproto::Window,
    ) -> Result<xproto::GetWindowAttributesReply> {
        Ok(self.conn.get_window_attributes(window)?.reply()?)
    }

    /// Returns the geometry of a window.
    // `XGetGeometry`: https://tronche.com/gui/x/xlib/window-information/XGetGeometry.html
    pub fn get_window_geometry(&self, window: xproto::Window) -> Result<Xyhw> {
        let geo = self.conn.get_geometry(window)?.reply()?;
        Ok(Xyhw::new(
            geo.x.into(),
            geo.y.into(),
            geo.width.into(),
            geo.height.into(),
        ))
    }

    /// Returns a windows name, `_NET_WM_NAME` first, then `WM_NAME`.
    pub fn get_window_name(&self, window: xproto::Window) -> Result<Option<String>> {
        if let Some(text) = self.get_text_prop(window, self.atoms.NetWMName)? {
            return Ok(Some(text));
        }
        self.get_text_prop(window, xproto::AtomEnum::WM_NAME.into())
    }

    /// Classifies a window by the first entry of its `_NET_WM_WINDOW_TYPE`.
    pub fn get_window_type(&self, window: xproto::Window) -> Result<WindowType> {
        let reply = self
            .conn
            .get_property(
                false,
                window,
                self.atoms.NetWMWindowType,
                xproto::AtomEnum::ATOM,
                0,
                1,
            )?
            .reply()?;

        let first = reply.value32().and_then(|mut atoms| atoms.next());
        Ok(if first == Some(self.atoms.NetWMWindowTypeDock) {
            WindowType::Dock
        } else {
            WindowType::Normal
        })
    }

    /// The desktop a window was left on, from `_NET_WM_DESKTOP`.
    pub fn get_window_desktop(&self, window: xproto::Window) -> Result<Option<WorkspaceId>> {
        self.get_desktop_prop(window, self.atoms.NetWMDesktop)
    }

    /// `_NET_CURRENT_DESKTOP` as a previous window manager left it on the root.
    pub fn get_current_desktop(&self) -> Result<Option<WorkspaceId>> {
        self.get_desktop_prop(self.root, self.atoms.NetCurrentDesktop)
    }

    pub fn get_wmhints(&self, window: xproto::Window) -> Result<Option<WmHints>> {
        Ok(WmHints::get(&self.conn, window)?.reply()?)
    }

    /// Whether the urgency bit of `WM_HINTS` is set.
    pub fn get_window_urgency(&self, window: xproto::Window) -> Result<bool> {
        Ok(is_urgent(self.get_wmhints(window)?.as_ref()))
    }

    /// Whether the window speaks `WM_DELETE_WINDOW`.
    pub fn supports_delete(&self, window: xproto::Window) -> Result<bool> {
        self.can_send_xevent_atom(window, self.atoms.WMDelete)
    }

    // Internal functions.

    /// A single `CARDINAL` desktop index.
    fn get_desktop_prop(
        &self,
        window: xproto::Window,
        atom: xproto::Atom,
    ) -> Result<Option<WorkspaceId>> {
        let reply = self
            .conn
            .get_property(false, window, atom, xproto::AtomEnum::CARDINAL, 0, 1)?
            .reply()?;
        let value = reply.value32().and_then(|mut values| values.next());
        Ok(value.and_then(|index| WorkspaceId::try_from(index).ok()))
    }

    /// Returns a text property for a window, `None` if it is unset or empty.
    // `XGetTextProperty`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetTextProperty.html
    fn get_text_prop(&self, window: xproto::Window, atom: xproto::Atom) -> Result<Option<String>> {
        let prop = self
            .conn
            .get_property(
                false,
                window,
                atom,
                xproto::AtomEnum::ANY,
                0,
                MAX_PROPERTY_VALUE_LEN,
            )?
            .reply()?;
        if prop.value.is_empty() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&prop.value).into_owned()))
    }
}

pub(crate) fn is_urgent(hints: Option<&WmHints>) -> bool {
    hints.is_some_and(|hints| hints.urgent)
}

/// Parses a color string written in the hex format #RRGGBB to a tuple of u16.
/// Since colors in hex format are represented using 8 bits, we need to adjust them to represent
/// the right proportion of color on a 16 bits value by multiplying by 257
pub(crate) fn parse_color_string(color: &str) -> Result<(u16, u16, u16)> {
    let hex = color
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6 && hex.is_ascii())
        .ok_or_else(|| Error::InvalidColor(color.to_owned()))?;
    let channel = |range: std::ops::Range<usize>| -> Result<u16> {
        Ok(u16::from_str_radix(&hex[range], 16)? * 257)
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_scale_to_sixteen_bits() {
        assert_eq!(
            parse_color_string("#ff8000").ok(),
            Some((0xffff, 0x8080, 0x0000))
        );
    }

    #[test]
    fn urgency_comes_from_the_hints() {
        assert!(!is_urgent(None));
        assert!(!is_urgent(Some(&WmHints::default())));
        let hints = WmHints {
            urgent: true,
            ..WmHints::default()
        };
        assert!(is_urgent(Some(&hints)));
    }

    #[test]
    fn malformed_colors_are_rejected() {
        for color in ["ff8000", "#ff80", "#gg0000", "#ff80000"] {
            assert!(
                matches!(parse_color_string(color), Err(Error::InvalidColor(_))),
                "{color}"
            );
        }
    }
}
