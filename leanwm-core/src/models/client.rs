use super::{Handle, Window, WindowHandle, WorkspaceId, Xyhw};

/// A managed, tiled application window.
#[derive(Debug, Clone, PartialEq)]
pub struct Client<H: Handle> {
    pub handle: WindowHandle<H>,
    pub workspace: WorkspaceId,
    /// Relative share of the tiled width. Always positive.
    pub weight: f32,
    /// Last geometry the manager assigned.
    pub geometry: Xyhw,
    pub urgent: bool,
    pub supports_delete: bool,
    pub name: Option<String>,
}

impl<H: Handle> Client<H> {
    #[must_use]
    pub fn new(handle: WindowHandle<H>, workspace: WorkspaceId) -> Self {
        Self {
            handle,
            workspace,
            weight: 1.0,
            geometry: Xyhw::default(),
            urgent: false,
            supports_delete: false,
            name: None,
        }
    }

    #[must_use]
    pub fn from_window(window: Window<H>, workspace: WorkspaceId) -> Self {
        Self {
            supports_delete: window.supports_delete,
            urgent: window.urgent,
            name: window.name,
            ..Self::new(window.handle, workspace)
        }
    }

    /// Changes the weight by `delta`, keeping it within `min..=max`.
    pub fn adjust_weight(&mut self, delta: f32, min: f32, max: f32) {
        self.weight = (self.weight + delta).min(max).max(min);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockHandle;

    #[test]
    fn weight_is_floored_at_the_minimum() {
        let mut client = Client::new(WindowHandle::<MockHandle>(1), 0);
        client.adjust_weight(-0.75, 0.25, 4.0);
        assert!((client.weight - 0.25).abs() < f32::EPSILON);
        client.adjust_weight(-0.25, 0.25, 4.0);
        assert!((client.weight - 0.25).abs() < f32::EPSILON);
        client.adjust_weight(0.5, 0.25, 4.0);
        assert!((client.weight - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn weight_is_capped_at_the_maximum() {
        let mut client = Client::new(WindowHandle::<MockHandle>(1), 0);
        client.adjust_weight(10.0, 0.25, 4.0);
        assert!((client.weight - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn capability_flag_is_taken_from_the_window() {
        let mut window = Window::new(WindowHandle::<MockHandle>(4), None);
        window.supports_delete = true;
        window.urgent = true;
        let client = Client::from_window(window, 2);
        assert!(client.supports_delete);
        assert!(client.urgent);
        assert_eq!(client.workspace, 2);
        assert!((client.weight - 1.0).abs() < f32::EPSILON);
    }
}
