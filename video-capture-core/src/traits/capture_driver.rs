use crate::models::command::DriverCommand;
use crate::models::device::DriverDescription;
use crate::models::error::CaptureError;
use crate::models::surface::{NativeHandle, SurfaceBounds, WindowId, WindowStyle};

/// Interface to a platform capture subsystem.
///
/// Implemented by:
/// - `VfwDriver` (Windows, `avicap32`)
///
/// A driver is addressed through capture windows: the session creates one,
/// sends integer-coded commands to it, and destroys it. Every call returns a
/// typed result so the session can decide what a failure means.
pub trait CaptureDriver: Send + Sync {
    /// Probe driver slot `slot`. Returns `ProbeFailed` when the slot is empty.
    fn describe(&self, slot: u8) -> Result<DriverDescription, CaptureError>;

    /// Create a capture window at (0, 0) with the given size, parented to
    /// `parent`.
    fn create_window(
        &self,
        title: &str,
        style: WindowStyle,
        bounds: SurfaceBounds,
        parent: NativeHandle,
    ) -> Result<WindowId, CaptureError>;

    /// Send `command` to `window`. A failure reply becomes `CommandFailed`.
    fn send(&self, window: WindowId, command: &DriverCommand) -> Result<(), CaptureError>;

    /// Resize `window` without moving it or changing its z-order.
    fn resize_window(&self, window: WindowId, bounds: SurfaceBounds) -> Result<(), CaptureError>;

    fn destroy_window(&self, window: WindowId) -> Result<(), CaptureError>;
}
