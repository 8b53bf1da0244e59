mod client;
mod client_registry;
mod close_request;
mod manager;
mod screen;
mod window;
mod window_type;
mod workspace;
mod xyhw;
mod xyhw_change;

pub use client::Client;
pub use client_registry::ClientRegistry;
pub use close_request::{CloseRequest, CloseState};
pub use manager::Manager;
#[cfg(test)]
pub use manager::TestManager;
pub use screen::{DockEdge, DockStrip, Screen};
pub use window::{Handle, MockHandle, Window, WindowHandle};
pub use window_type::WindowType;
pub use workspace::Workspace;
pub use xyhw::Xyhw;
pub use xyhw_change::XyhwChange;

/// Zero-based index of a workspace.
pub type WorkspaceId = usize;
