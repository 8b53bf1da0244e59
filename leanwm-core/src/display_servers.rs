#[cfg(test)]
mod mock_display_server;

use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::models::Handle;
use crate::DisplayEvent;

use futures::prelude::*;
use std::pin::Pin;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

/// The connection to the display server.
///
/// Events come out in the order the server delivered them. Requests are fire and forget:
/// a failing request is logged by the implementation, never returned.
pub trait DisplayServer<H: Handle> {
    /// Errors that prevent the manager from starting.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Connects, takes over the root window and sets up the supporting-check window.
    ///
    /// # Errors
    ///
    /// Any failure here is fatal.
    fn new(config: &impl Config) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Every event already received, without blocking.
    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>>;

    fn execute_action(&mut self, act: DisplayAction<H>) -> Option<DisplayEvent<H>>;

    /// Resolves once the connection has something to read.
    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>>;

    fn flush(&self);
}
