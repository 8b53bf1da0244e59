//! Key grabs and keycode translation.

use leanwm_core::utils::keysym_lookup::{into_keysym, XKeysym};
use leanwm_core::utils::modmask_lookup::{into_modmask, ModMask};
use leanwm_core::Keybind;
use x11rb::{
    connection::Connection,
    protocol::xproto::{self, ConnectionExt as _},
};

use crate::error::Result;

use super::XWrap;

/// Modifier pairs shared by the core mask and the X protocol.
const MODIFIERS: [(ModMask, xproto::ModMask); 7] = [
    (ModMask::Shift, xproto::ModMask::SHIFT),
    (ModMask::Control, xproto::ModMask::CONTROL),
    (ModMask::Alt, xproto::ModMask::M1),
    (ModMask::NumLock, xproto::ModMask::M2),
    (ModMask::Mod3, xproto::ModMask::M3),
    (ModMask::Super, xproto::ModMask::M4),
    (ModMask::Mod5, xproto::ModMask::M5),
];

/// The keysym table as returned by `GetKeyboardMapping`.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyboardMapping {
    min_keycode: u8,
    keysyms_per_keycode: u8,
    keysyms: Vec<XKeysym>,
}

impl KeyboardMapping {
    pub fn fetch(conn: &impl Connection) -> Result<Self> {
        let setup = conn.setup();
        let (min, max) = (setup.min_keycode, setup.max_keycode);
        let reply = conn.get_keyboard_mapping(min, max - min + 1)?.reply()?;
        Ok(Self {
            min_keycode: min,
            keysyms_per_keycode: reply.keysyms_per_keycode,
            keysyms: reply.keysyms,
        })
    }

    /// The unshifted keysym of a keycode.
    pub fn keysym(&self, keycode: xproto::Keycode) -> Option<XKeysym> {
        let row = usize::from(keycode.checked_sub(self.min_keycode)?);
        let index = row * usize::from(self.keysyms_per_keycode);
        self.keysyms.get(index).copied().filter(|&sym| sym != 0)
    }

    /// Every keycode producing `keysym` without modifiers.
    pub fn keycodes(&self, keysym: XKeysym) -> Vec<xproto::Keycode> {
        let per = usize::from(self.keysyms_per_keycode).max(1);
        self.keysyms
            .chunks(per)
            .enumerate()
            .filter(|(_, row)| row.first() == Some(&keysym))
            .filter_map(|(row, _)| u8::try_from(row).ok())
            .filter_map(|row| self.min_keycode.checked_add(row))
            .collect()
    }
}

/// The X modifier mask for a binding.
pub(crate) fn into_x_modmask(mask: ModMask) -> xproto::ModMask {
    MODIFIERS
        .iter()
        .filter(|(ours, _)| mask.contains(*ours))
        .fold(xproto::ModMask::from(0u16), |acc, (_, theirs)| acc | *theirs)
}

/// The binding mask for the modifier state of a key event.
pub(crate) fn from_x_state(state: xproto::KeyButMask) -> ModMask {
    let state = u16::from(state);
    MODIFIERS
        .iter()
        .filter(|(_, theirs)| state & u16::from(*theirs) != 0)
        .fold(ModMask::Zero, |acc, (ours, _)| acc | *ours)
}

impl XWrap {
    /// Drops every key grab on the root and grabs the given bindings.
    ///
    /// Each chord is also grabbed with Lock and NumLock held, so they do not get in the way.
    pub fn reload_key_grabs(&mut self, keybinds: &[Keybind]) -> Result<()> {
        self.conn
            .ungrab_key(xproto::Grab::ANY, self.root, xproto::ModMask::ANY)?;

        let lock = xproto::ModMask::LOCK;
        let numlock = xproto::ModMask::M2;
        for keybind in keybinds {
            let Some(keysym) = into_keysym(&keybind.key) else {
                tracing::warn!(key = %keybind.key, "Not grabbing unknown key");
                continue;
            };
            let modmask = into_x_modmask(into_modmask(&keybind.modifier));
            let keycodes = self.keymap.keycodes(keysym);
            if keycodes.is_empty() {
                tracing::warn!(key = %keybind.key, "No key produces this keysym unshifted");
            }
            for keycode in keycodes {
                for extra in [xproto::ModMask::from(0u16), lock, numlock, lock | numlock] {
                    self.conn.grab_key(
                        true,
                        self.root,
                        modmask | extra,
                        keycode,
                        xproto::GrabMode::ASYNC,
                        xproto::GrabMode::ASYNC,
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Re-reads the keysym table after a `MappingNotify`.
    pub fn refresh_keyboard_mapping(&mut self) -> Result<()> {
        self.keymap = KeyboardMapping::fetch(&self.conn)?;
        Ok(())
    }

    pub fn keycode_to_keysym(&self, keycode: xproto::Keycode) -> Option<XKeysym> {
        self.keymap.keysym(keycode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> KeyboardMapping {
        // Keycodes 8..=10 with two columns each.
        KeyboardMapping {
            min_keycode: 8,
            keysyms_per_keycode: 2,
            keysyms: vec![0x0031, 0x0021, 0x006a, 0x004a, 0, 0],
        }
    }

    #[test]
    fn keycodes_resolve_through_the_first_column() {
        let map = mapping();
        assert_eq!(map.keysym(9), Some(0x006a));
        assert_eq!(map.keysym(10), None);
        assert_eq!(map.keysym(7), None);
        assert_eq!(map.keycodes(0x006a), vec![9]);
        assert!(map.keycodes(0x004a).is_empty());
    }

    #[test]
    fn modifier_masks_follow_the_x_bit_layout() {
        let x = into_x_modmask(ModMask::Super | ModMask::Shift);
        assert_eq!(u16::from(x), 0x41);

        let state =
            xproto::KeyButMask::MOD4 | xproto::KeyButMask::LOCK | xproto::KeyButMask::CONTROL;
        assert_eq!(from_x_state(state), ModMask::Super | ModMask::Control);
    }
}
