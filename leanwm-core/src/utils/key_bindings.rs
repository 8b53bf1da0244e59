//! Lookup from a pressed chord to the bound command.
use std::collections::HashMap;

use super::keysym_lookup::{into_keysym, XKeysym};
use super::modmask_lookup::{into_modmask, ModMask};
use crate::config::Keybind;
use crate::Command;

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<(ModMask, XKeysym), Command>,
}

impl KeyBindings {
    /// Builds the table. Bindings with an unknown key name are skipped with a warning; a later
    /// binding for the same chord replaces an earlier one.
    #[must_use]
    pub fn new(keybinds: &[Keybind]) -> Self {
        let mut bindings = HashMap::new();
        for keybind in keybinds {
            let Some(keysym) = into_keysym(&keybind.key) else {
                tracing::warn!(key = %keybind.key, "Ignoring binding for unknown key");
                continue;
            };
            let mask = into_modmask(&keybind.modifier);
            bindings.insert((mask, keysym), keybind.command.clone());
        }
        Self { bindings }
    }

    /// The command bound to a chord, if any. Lock-style modifiers in `mask` are ignored.
    #[must_use]
    pub fn lookup(&self, mask: ModMask, keysym: XKeysym) -> Option<&Command> {
        self.bindings.get(&(mask.clean(), keysym))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind(modifier: &[&str], key: &str, command: Command) -> Keybind {
        Keybind {
            command,
            modifier: modifier.iter().map(|m| (*m).to_owned()).collect(),
            key: key.to_owned(),
        }
    }

    #[test]
    fn chords_resolve_to_their_command() {
        let bindings = KeyBindings::new(&[
            bind(&["Mod4"], "j", Command::FocusWindowNext),
            bind(&["Mod4", "Shift"], "j", Command::SwapWindowNext),
        ]);
        assert_eq!(
            bindings.lookup(ModMask::Super, 0x006a),
            Some(&Command::FocusWindowNext)
        );
        assert_eq!(
            bindings.lookup(ModMask::Super | ModMask::Shift, 0x006a),
            Some(&Command::SwapWindowNext)
        );
    }

    #[test]
    fn numlock_does_not_break_a_chord() {
        let bindings = KeyBindings::new(&[bind(&["Mod4"], "Return", Command::CloseWindow)]);
        assert_eq!(
            bindings.lookup(ModMask::Super | ModMask::NumLock, 0xff0d),
            Some(&Command::CloseWindow)
        );
    }

    #[test]
    fn unmapped_chords_are_ignored() {
        let bindings = KeyBindings::new(&[bind(&["Mod4"], "j", Command::FocusWindowNext)]);
        assert_eq!(bindings.lookup(ModMask::Alt, 0x006a), None);
        assert_eq!(bindings.lookup(ModMask::Super, 0x006b), None);
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let bindings = KeyBindings::new(&[bind(&["Mod4"], "Nope", Command::CloseWindow)]);
        assert!(bindings.is_empty());
    }
}
