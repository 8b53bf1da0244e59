use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::Handle;
use crate::state::State;
use crate::utils::child_process::Children;
use std::sync::{atomic::AtomicBool, Arc};

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager<H: Handle, C, SERVER> {
    pub state: State<H>,
    pub config: C,

    pub(crate) children: Children,
    pub(crate) reap_requested: Arc<AtomicBool>,
    pub display_server: SERVER,
}

impl<H, C, SERVER> Manager<H, C, SERVER>
where
    H: Handle,
    C: Config,
    SERVER: DisplayServer<H>,
{
    /// Connects to the display server and builds the initial state.
    ///
    /// # Errors
    ///
    /// Returns the display server's error when it cannot take over the display.
    pub fn new(config: C) -> Result<Self, SERVER::Error> {
        let display_server = SERVER::new(&config)?;

        Ok(Self {
            state: State::new(&config),
            config,
            children: Children::default(),
            reap_requested: Arc::default(),
            display_server,
        })
    }

    pub fn register_child_hook(&self) {
        crate::child_process::register_child_hook(self.reap_requested.clone());
    }
}

#[cfg(test)]
pub type TestManager = Manager<
    super::MockHandle,
    crate::config::TestConfig,
    crate::display_servers::MockDisplayServer<super::MockHandle>,
>;

#[cfg(test)]
impl TestManager {
    pub fn new_test(config: crate::config::TestConfig) -> Self {
        match Self::new(config) {
            Ok(manager) => manager,
            Err(never) => match never {},
        }
    }
}
