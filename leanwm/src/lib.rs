//! Configuration and startup for the leanwm window manager.
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod command;
mod config;
pub mod utils;

pub use command::*;
pub use config::*;
