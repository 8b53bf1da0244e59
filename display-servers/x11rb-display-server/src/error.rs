//! Error handling and reporting for this backend

use std::num::{ParseIntError, TryFromIntError};

use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError, ReplyOrIdError};

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to connect to the X server: {0}")]
    Connect(#[from] ConnectError),

    #[error("Another window manager is already running")]
    AnotherWmRunning,

    #[error("Invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),

    #[error("Value out of range for the X protocol: {0}")]
    IntConversion(#[from] TryFromIntError),

    // Errors from x11rb
    #[error("Connection error occured: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Unable to parse reply: {0}")]
    Reply(#[from] ReplyError),

    #[error("Unable to parse reply: {0}")]
    ReplyOrId(#[from] ReplyOrIdError),
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Self::InvalidColor(err.to_string())
    }
}
