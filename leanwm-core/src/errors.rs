use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeanError>;

#[derive(Debug, Error)]
pub enum LeanError {
    #[error("Window {0} is already managed")]
    AlreadyManaged(String),
    #[error("Workspace index {0} is out of range")]
    InvalidWorkspace(usize),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
