mod close_handler;
pub mod command_handler;
pub mod display_event_handler;
mod focus_handler;
mod window_handler;
mod workspace_handler;

#[cfg(test)]
pub(crate) mod tests {
    use crate::config::TestConfig;
    use crate::models::{MockHandle, TestManager, Window, WindowHandle, Xyhw};
    use crate::DisplayEvent;

    /// A manager on a 1000x700 screen with `windows` mapped in order and the queued
    /// actions cleared.
    pub(crate) fn manager_with(windows: &[MockHandle], config: TestConfig) -> TestManager {
        let mut manager = TestManager::new_test(config);
        manager.display_event_handler(DisplayEvent::ScreenCreate(Xyhw::new(0, 0, 1000, 700)));
        for handle in windows {
            manager.display_event_handler(DisplayEvent::WindowCreate(Window::new(
                WindowHandle(*handle),
                None,
            )));
        }
        manager.state.actions.clear();
        manager
    }
}
