use crate::child_process::Nanny;
use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::models::Handle;
use crate::{DisplayEvent, DisplayServer, Manager};
use std::sync::{atomic::Ordering, Once};
use std::time::Instant;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Runs the manager until the process is killed.
    ///
    /// Each turn executes the queued display actions, then either handles the events already
    /// read, waits for the connection to become readable, or wakes up for the nearest close
    /// deadline. Handlers never await, so every event is fully applied before the next one.
    pub async fn event_loop(mut self) {
        self.state
            .actions
            .push_back(DisplayAction::ReloadKeyGrabs(self.config.mapped_bindings()));
        self.state.publish_hints();

        let after_first_loop: Once = Once::new();

        let mut event_buffer = vec![];
        loop {
            self.execute_actions(&mut event_buffer);

            // After the very first loop run the autostart script, once the screen is known
            // and key grabs are in place.
            after_first_loop.call_once(|| {
                let Some(path) = self.config.autostart() else {
                    return;
                };
                match Nanny::run_autostart(&path) {
                    Ok(child) => {
                        child.map(|child| self.children.insert(child));
                    }
                    Err(err) => tracing::error!(%err, path = %path.display(), "Autostart failed"),
                }
            });

            if self.reap_requested.swap(false, Ordering::SeqCst) {
                self.children.remove_finished_children();
            }

            self.next_turn(&mut event_buffer).await;
        }
    }

    /// Performs the actions requested by the handlers, then flushes the connection.
    fn execute_actions(&mut self, event_buffer: &mut Vec<DisplayEvent<H>>) {
        while let Some(act) = self.state.actions.pop_front() {
            tracing::trace!(?act, "Display action");
            if let Some(event) = self.display_server.execute_action(act) {
                event_buffer.push(event);
            }
        }
        self.display_server.flush();
    }

    async fn next_turn(&mut self, event_buffer: &mut Vec<DisplayEvent<H>>) {
        if event_buffer.is_empty() {
            event_buffer.append(&mut self.display_server.get_next_events());
        }

        let deadline = self.state.next_close_deadline();
        tokio::select! {
            () = self.display_server.wait_readable(), if event_buffer.is_empty() => {}
            () = close_deadline(deadline), if event_buffer.is_empty() && deadline.is_some() => {
                self.close_timeout_handler(tokio::time::Instant::now().into_std());
            }
            else => {
                for event in event_buffer.drain(..) {
                    self.display_event_handler(event);
                }
            }
        }
    }
}

async fn close_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
