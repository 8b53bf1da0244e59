use std::time::Instant;

use super::{Handle, WindowHandle};

/// Progress of one attempt to close a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseState {
    /// `WM_DELETE_WINDOW` was sent; the window has until `deadline` to go away.
    Requested { deadline: Instant },
    /// The client connection was killed.
    Forced,
}

/// A pending close. The deadline is one-shot: it is never pushed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseRequest<H: Handle> {
    pub handle: WindowHandle<H>,
    pub state: CloseState,
}

impl<H: Handle> CloseRequest<H> {
    #[must_use]
    pub const fn requested(handle: WindowHandle<H>, deadline: Instant) -> Self {
        Self {
            handle,
            state: CloseState::Requested { deadline },
        }
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        match self.state {
            CloseState::Requested { deadline } => Some(deadline),
            CloseState::Forced => None,
        }
    }

    /// Moves to [`CloseState::Forced`] once the deadline has passed. Returns true only on
    /// that transition.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.state {
            CloseState::Requested { deadline } if deadline <= now => {
                self.state = CloseState::Forced;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockHandle;
    use std::time::Duration;

    #[test]
    fn expires_exactly_once() {
        let start = Instant::now();
        let mut request =
            CloseRequest::<MockHandle>::requested(WindowHandle(1), start + Duration::from_secs(2));
        assert!(!request.expire(start));
        assert!(request.expire(start + Duration::from_secs(2)));
        assert_eq!(request.state, CloseState::Forced);
        assert!(!request.expire(start + Duration::from_secs(10)));
        assert_eq!(request.deadline(), None);
    }
}
