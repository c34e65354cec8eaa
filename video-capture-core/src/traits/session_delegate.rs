use crate::models::error::CaptureError;
use crate::models::recording_result::RecordingResult;
use crate::models::state::SessionState;

/// Event delegate for capture session notifications.
///
/// All methods are called synchronously on the thread that drives the
/// session. Implementations should marshal to the UI thread if needed.
pub trait SessionDelegate: Send + Sync {
    /// Called when the session state changes.
    fn on_state_changed(&self, state: &SessionState);

    /// Called when a lifecycle operation fails.
    fn on_error(&self, error: &CaptureError);

    /// Called once the driver has been told where to save the clip.
    fn on_recording_saved(&self, result: &RecordingResult);
}
