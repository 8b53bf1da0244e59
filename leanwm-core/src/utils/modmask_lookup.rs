use bitflags::bitflags;

bitflags! {
    /// Represents the state of modifier keys
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 {
        /// Used as the zero value
        const Zero = 0;
        const Any = 1;
        const Shift = 1 << 1;
        const Control = 1 << 2;
        /// Mod1
        const Alt = 1 << 3;
        /// Mod2
        const NumLock = 1 << 4;
        const Mod3 = 1 << 5;
        /// Mod4
        const Super = 1 << 6;
        const Mod5 = 1 << 7;
    }
}

impl ModMask {
    /// Drops the bits that never take part in a binding.
    #[must_use]
    pub fn clean(self) -> Self {
        self.intersection(
            Self::Shift | Self::Control | Self::Alt | Self::Mod3 | Self::Super | Self::Mod5,
        )
    }
}

#[must_use]
pub fn into_modmask(keys: &[String]) -> ModMask {
    let mut mask = ModMask::Zero;
    for s in keys {
        mask |= into_mod(s);
    }
    mask.clean()
}

#[must_use]
pub fn into_mod(key: &str) -> ModMask {
    try_into_mod(key).unwrap_or(ModMask::Zero)
}

/// Like [`into_mod`] but `None` for names that are not modifiers.
#[must_use]
pub fn try_into_mod(key: &str) -> Option<ModMask> {
    let mask = match key {
        "None" => ModMask::Any,
        "Shift" => ModMask::Shift,
        "Control" => ModMask::Control,
        "Mod1" | "Alt" => ModMask::Alt,
        // NOTE: we are ignoring the state of Numlock
        "Mod2" | "NumLock" => ModMask::NumLock,
        "Mod3" => ModMask::Mod3,
        "Mod4" | "Super" => ModMask::Super,
        "Mod5" => ModMask::Mod5,
        _ => return None,
    };
    Some(mask)
}
