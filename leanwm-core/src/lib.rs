//! Core of leanwm: client bookkeeping, weighted tiling and event dispatch.
// We deny clippy pedantic lints, primarily to keep code as correct as possible.
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::default_trait_access
)]
mod command;
pub mod config;
mod display_action;
mod display_event;
pub mod display_servers;
pub mod errors;
mod event_loop;
mod handlers;
pub mod hints;
pub mod layouts;
pub mod models;
pub mod state;
pub mod utils;

pub use command::Command;
pub use config::{Config, Keybind};
pub use display_action::DisplayAction;
pub use display_event::{DisplayEvent, StateChange};
pub use display_servers::DisplayServer;
pub use models::Manager;
pub use state::State;
pub use utils::child_process;
