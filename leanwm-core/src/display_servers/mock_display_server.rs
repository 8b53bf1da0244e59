use std::convert::Infallible;

use super::Config;
use super::DisplayAction;
use super::DisplayEvent;
use super::DisplayServer;
use crate::models::Handle;

/// Records executed actions and hands out queued events.
#[derive(Debug, Clone, Default)]
pub struct MockDisplayServer<H: Handle> {
    pub events: Vec<DisplayEvent<H>>,
    pub executed: Vec<DisplayAction<H>>,
}

impl<H: Handle> DisplayServer<H> for MockDisplayServer<H> {
    type Error = Infallible;

    fn new(_: &impl Config) -> Result<Self, Self::Error> {
        Ok(Self {
            events: vec![],
            executed: vec![],
        })
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>> {
        std::mem::take(&mut self.events)
    }

    fn execute_action(&mut self, act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        self.executed.push(act);
        None
    }

    fn wait_readable(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()>>> {
        Box::pin(std::future::pending())
    }

    fn flush(&self) {}
}
