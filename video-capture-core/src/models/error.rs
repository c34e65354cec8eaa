use thiserror::Error;

use super::command::CommandKind;
use super::state::SessionState;

/// Errors that can occur during video capture operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The capture driver at this slot refused the connection (busy or missing).
    #[error("capture device {index} not available")]
    DeviceUnavailable { index: u8 },

    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// A driver command returned a failure reply.
    #[error("driver command {command} failed (reply {code})")]
    CommandFailed { command: CommandKind, code: isize },

    #[error("capture window error: {0}")]
    Window(String),

    /// The thread owning the display surface is no longer running.
    #[error("display surface unavailable")]
    SurfaceUnavailable,

    #[error("no capture driver in slot {slot}")]
    ProbeFailed { slot: u8 },

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),
}
