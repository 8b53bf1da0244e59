use x11rb::{atom_manager, protocol::xproto};

atom_manager! {
    /// A collection of Atoms.
    pub AtomCollection:

    /// A handle to a response from the X11 server.
    AtomCollectionCookie {
        WMProtocols: b"WM_PROTOCOLS" as &[u8],
        WMDelete: b"WM_DELETE_WINDOW",
        WMState: b"WM_STATE",
        WMTakeFocus: b"WM_TAKE_FOCUS",
        NetActiveWindow: b"_NET_ACTIVE_WINDOW",
        NetSupported: b"_NET_SUPPORTED",
        NetWMName: b"_NET_WM_NAME",
        NetCloseWindow: b"_NET_CLOSE_WINDOW",

        NetWMWindowType: b"_NET_WM_WINDOW_TYPE",
        NetWMWindowTypeDock: b"_NET_WM_WINDOW_TYPE_DOCK",
        NetSupportingWmCheck: b"_NET_SUPPORTING_WM_CHECK",

        NetClientList: b"_NET_CLIENT_LIST",
        NetDesktopViewport: b"_NET_DESKTOP_VIEWPORT",
        NetNumberOfDesktops: b"_NET_NUMBER_OF_DESKTOPS",
        NetCurrentDesktop: b"_NET_CURRENT_DESKTOP",
        NetDesktopNames: b"_NET_DESKTOP_NAMES",
        NetWMDesktop: b"_NET_WM_DESKTOP",
        NetWMState: b"_NET_WM_STATE",
        NetWMStateFullscreen: b"_NET_WM_STATE_FULLSCREEN",

        UTF8String: b"UTF8_STRING",
    }
}

impl AtomCollection {
    /// Everything we advertise in `_NET_SUPPORTED`.
    pub fn net_supported(&self) -> Vec<xproto::Atom> {
        vec![
            self.NetActiveWindow,
            self.NetSupported,
            self.NetWMName,
            self.NetCloseWindow,
            self.NetWMWindowType,
            self.NetWMWindowTypeDock,
            self.NetSupportingWmCheck,
            self.NetClientList,
            self.NetDesktopViewport,
            self.NetNumberOfDesktops,
            self.NetCurrentDesktop,
            self.NetDesktopNames,
            self.NetWMDesktop,
            self.NetWMState,
            self.NetWMStateFullscreen,
        ]
    }

    pub fn get_name(&self, atom: xproto::Atom) -> &'static str {
        match atom {
            x if x == self.WMProtocols => "WM_PROTOCOLS",
            x if x == self.WMDelete => "WM_DELETE_WINDOW",
            x if x == self.WMState => "WM_STATE",
            x if x == self.WMTakeFocus => "WM_TAKE_FOCUS",
            x if x == self.NetActiveWindow => "_NET_ACTIVE_WINDOW",
            x if x == self.NetSupported => "_NET_SUPPORTED",
            x if x == self.NetWMName => "_NET_WM_NAME",
            x if x == self.NetCloseWindow => "_NET_CLOSE_WINDOW",
            x if x == self.NetWMWindowType => "_NET_WM_WINDOW_TYPE",
            x if x == self.NetWMWindowTypeDock => "_NET_WM_WINDOW_TYPE_DOCK",
            x if x == self.NetSupportingWmCheck => "_NET_SUPPORTING_WM_CHECK",
            x if x == self.NetClientList => "_NET_CLIENT_LIST",
            x if x == self.NetDesktopViewport => "_NET_DESKTOP_VIEWPORT",
            x if x == self.NetNumberOfDesktops => "_NET_NUMBER_OF_DESKTOPS",
            x if x == self.NetCurrentDesktop => "_NET_CURRENT_DESKTOP",
            x if x == self.NetDesktopNames => "_NET_DESKTOP_NAMES",
            x if x == self.NetWMDesktop => "_NET_WM_DESKTOP",
            x if x == self.NetWMState => "_NET_WM_STATE",
            x if x == self.NetWMStateFullscreen => "_NET_WM_STATE_FULLSCREEN",
            x if x == self.UTF8String => "UTF8_STRING",
            _ => "(UNKNOWN)",
        }
    }
}

/// Possible values of the `state` field of `WM_STATE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WMStateWindowState {
    Withdrawn,
    Normal,
    Iconic,
}

pub struct InvalidWindowState;

impl TryFrom<u32> for WMStateWindowState {
    type Error = InvalidWindowState;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Withdrawn),
            1 => Ok(Self::Normal),
            3 => Ok(Self::Iconic),
            _ => Err(InvalidWindowState),
        }
    }
}

impl From<WMStateWindowState> for u32 {
    fn from(value: WMStateWindowState) -> Self {
        match value {
            WMStateWindowState::Withdrawn => 0,
            WMStateWindowState::Normal => 1,
            WMStateWindowState::Iconic => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wm_state_uses_icccm_values() {
        assert_eq!(u32::from(WMStateWindowState::Iconic), 3);
        assert!(matches!(
            WMStateWindowState::try_from(1),
            Ok(WMStateWindowState::Normal)
        ));
        assert!(WMStateWindowState::try_from(2).is_err());
    }
}
