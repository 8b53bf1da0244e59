//! Key names as they appear in the configuration, mapped to X keysyms.
//!
//! Names are resolved by libxkbcommon, so anything listed in `keysymdef.h` or
//! `XF86keysym.h` works, as do the `0x1234` and `U1234` forms.

use xkbcommon::xkb::{self, keysym_from_name, Keysym};

pub type XKeysym = u32;

/// Resolves a key name to its keysym.
#[must_use]
pub fn into_keysym(key: &str) -> Option<XKeysym> {
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let sym = keysym_from_name(key, xkb::KEYSYM_NO_FLAGS);
    (sym != Keysym::NoSymbol).then(|| sym.raw())
}

/// Whether the keysym is the upper case form of a letter.
///
/// Grabs are matched against the unshifted keysym of each key, so such a keysym never
/// fires. It has to be bound as its lower case letter plus `Shift`.
#[must_use]
pub fn is_shifted_letter(keysym: XKeysym) -> bool {
    let ch = xkb::keysym_to_utf32(Keysym::new(keysym));
    char::from_u32(ch).is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_use_their_code_point() {
        assert_eq!(into_keysym("j"), Some(0x006a));
        assert_eq!(into_keysym("J"), Some(0x004a));
        assert_eq!(into_keysym("1"), Some(0x0031));
    }

    #[test]
    fn named_keys_resolve() {
        assert_eq!(into_keysym("Return"), Some(0xff0d));
        assert_eq!(into_keysym("space"), Some(0x0020));
        assert_eq!(into_keysym("Page_Up"), into_keysym("Prior"));
    }

    #[test]
    fn keys_outside_the_basic_set_resolve() {
        assert_eq!(into_keysym("plus"), Some(0x002b));
        assert_eq!(into_keysym("exclam"), Some(0x0021));
        assert_eq!(into_keysym("KP_Enter"), Some(0xff8d));
        assert_eq!(into_keysym("Super_L"), Some(0xffeb));
        assert_eq!(into_keysym("Caps_Lock"), Some(0xffe5));
        assert_eq!(into_keysym("XF86AudioPlay"), Some(0x1008_ff14));
    }

    #[test]
    fn function_keys_resolve() {
        assert_eq!(into_keysym("F1"), Some(0xffbe));
        assert_eq!(into_keysym("F12"), Some(0xffc9));
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(into_keysym("NotAKey"), None);
        assert_eq!(into_keysym(""), None);
    }

    #[test]
    fn upper_case_letters_are_shifted() {
        assert!(is_shifted_letter(0x0041));
        assert!(is_shifted_letter(0x00c9));
        assert!(!is_shifted_letter(0x0061));
        assert!(!is_shifted_letter(0x0031));
        assert!(!is_shifted_letter(0xff0d));
        assert!(!is_shifted_letter(0x0021));
    }
}
