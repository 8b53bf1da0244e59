use leanwm_core::models::WorkspaceId;
use x11rb::{
    protocol::xproto::{self, ChangeWindowAttributesAux, ConnectionExt as _, PropMode},
    wrapper::ConnectionExt as _,
};

use crate::error::Result;
use crate::xatom::WMStateWindowState;

use super::XWrap;

impl XWrap {
    // Public functions.

    /// Replaces a window property.
    pub fn replace_property_u32(
        &self,
        window: xproto::Window,
        property: xproto::Atom,
        r#type: xproto::Atom,
        data: &[u32],
    ) -> Result<()> {
        self.conn
            .change_property32(PropMode::REPLACE, window, property, r#type, data)?;
        Ok(())
    }

    /// Sets the client list to the given windows, oldest first.
    pub fn set_client_list(&self, windows: &[xproto::Window]) -> Result<()> {
        self.replace_property_u32(
            self.root,
            self.atoms.NetClientList,
            xproto::AtomEnum::WINDOW.into(),
            windows,
        )
    }

    /// Sets `_NET_ACTIVE_WINDOW` on the root, `None` clears it.
    pub fn set_active_window(&self, window: Option<xproto::Window>) -> Result<()> {
        self.replace_property_u32(
            self.root,
            self.atoms.NetActiveWindow,
            xproto::AtomEnum::WINDOW.into(),
            &[window.unwrap_or(x11rb::NONE)],
        )
    }

    /// Sets the number of desktops, their names and their viewports.
    // `Xutf8TextListToTextProperty`: https://linux.die.net/man/3/xutf8textlisttotextproperty
    pub fn set_desktops(&self, names: &[String]) -> Result<()> {
        let count = u32::try_from(names.len())?;
        self.set_desktop_prop(&[count], self.atoms.NetNumberOfDesktops)?;
        self.set_desktop_prop(&desktop_viewport(names.len()), self.atoms.NetDesktopViewport)?;

        // A list of null terminated strings.
        let bytes: Vec<u8> = names
            .iter()
            .flat_map(|name| name.bytes().chain(std::iter::once(0)))
            .collect();
        self.conn.change_property8(
            PropMode::REPLACE,
            self.root,
            self.atoms.NetDesktopNames,
            self.atoms.UTF8String,
            &bytes,
        )?;
        Ok(())
    }

    /// Sets the current desktop.
    pub fn set_current_desktop(&self, workspace: WorkspaceId) -> Result<()> {
        let index = u32::try_from(workspace)?;
        self.set_desktop_prop(&[index], self.atoms.NetCurrentDesktop)
    }

    /// Sets a desktop property.
    pub fn set_desktop_prop(&self, data: &[u32], atom: xproto::Atom) -> Result<()> {
        self.replace_property_u32(self.root, atom, xproto::AtomEnum::CARDINAL.into(), data)
    }

    /// Sets what desktop a window is on.
    pub fn set_window_desktop(&self, window: xproto::Window, workspace: WorkspaceId) -> Result<()> {
        let index = u32::try_from(workspace)?;
        self.replace_property_u32(
            window,
            self.atoms.NetWMDesktop,
            xproto::AtomEnum::CARDINAL.into(),
            &[index],
        )
    }

    /// Sets `_NET_WM_STATE` to fullscreen, or clears it.
    pub fn set_fullscreen_state(&self, window: xproto::Window, fullscreen: bool) -> Result<()> {
        let states: &[xproto::Atom] = if fullscreen {
            &[self.atoms.NetWMStateFullscreen]
        } else {
            &[]
        };
        self.replace_property_u32(
            window,
            self.atoms.NetWMState,
            xproto::AtomEnum::ATOM.into(),
            states,
        )
    }

    /// Puts a window on top of its siblings.
    pub fn raise_window(&self, window: xproto::Window) -> Result<()> {
        self.set_window_config(
            window,
            &xproto::ConfigureWindowAux::new().stack_mode(xproto::StackMode::ABOVE),
        )
    }

    /// Sets a windows border color.
    pub fn set_window_border_color(&self, window: xproto::Window, color: u32) -> Result<()> {
        self.conn.change_window_attributes(
            window,
            &ChangeWindowAttributesAux::new().border_pixel(color),
        )?;
        Ok(())
    }

    /// Sets a windows configuration.
    pub fn set_window_config(
        &self,
        window: xproto::Window,
        window_changes: &xproto::ConfigureWindowAux,
    ) -> Result<()> {
        self.conn.configure_window(window, window_changes)?;
        Ok(())
    }

    /// Sets the `WM_STATE` of a window.
    pub fn set_wm_state(&self, window: xproto::Window, state: WMStateWindowState) -> Result<()> {
        self.replace_property_u32(
            window,
            self.atoms.WMState,
            self.atoms.WMState,
            &[state.into(), x11rb::NONE],
        )
    }
}

/// One `(0, 0)` origin per desktop: every desktop is exactly one screen.
fn desktop_viewport(desktops: usize) -> Vec<u32> {
    vec![0; desktops * 2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_has_an_origin_per_desktop() {
        assert_eq!(desktop_viewport(3), vec![0; 6]);
        assert!(desktop_viewport(0).is_empty());
    }
}
