//! Various shared functions that leanwm uses.
pub mod child_process;
pub mod key_bindings;
pub mod keysym_lookup;
pub mod modmask_lookup;
