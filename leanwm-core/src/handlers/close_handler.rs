use std::time::Instant;

use crate::display_action::DisplayAction;
use crate::models::{CloseRequest, Handle, WindowHandle};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Starts closing a client.
    ///
    /// Windows that speak `WM_DELETE_WINDOW` are asked politely and given until
    /// `now + close_timeout` to go away. Everything else has its connection killed at once.
    /// Asking again while a request is pending does not move the deadline.
    pub fn close_window(&mut self, handle: &WindowHandle<H>, now: Instant) -> bool {
        let Some(client) = self.registry.get(handle) else {
            return false;
        };
        if self.closing.iter().any(|r| &r.handle == handle) {
            return false;
        }
        if !client.supports_delete {
            return self.force_close(handle);
        }

        tracing::debug!(?handle, "Requesting window close");
        self.actions
            .push_back(DisplayAction::SendDeleteRequest(*handle));
        let deadline = now + self.settings.close_timeout;
        self.closing.push(CloseRequest::requested(*handle, deadline));
        true
    }

    /// Kills every client whose close deadline has passed and forgets it.
    pub fn expire_close_requests(&mut self, now: Instant) -> bool {
        let expired: Vec<_> = self
            .closing
            .iter_mut()
            .filter_map(|request| request.expire(now).then_some(request.handle))
            .collect();

        let mut changed = false;
        for handle in expired {
            tracing::info!(?handle, "Window ignored WM_DELETE_WINDOW, killing its client");
            changed |= self.force_close(&handle);
        }
        changed
    }

    /// The earliest pending close deadline.
    #[must_use]
    pub fn next_close_deadline(&self) -> Option<Instant> {
        self.closing
            .iter()
            .filter_map(CloseRequest::deadline)
            .min()
    }

    fn force_close(&mut self, handle: &WindowHandle<H>) -> bool {
        self.actions.push_back(DisplayAction::KillWindow(*handle));
        // The destroy notification that follows the kill is then a no-op.
        self.window_destroyed(handle)
    }
}
