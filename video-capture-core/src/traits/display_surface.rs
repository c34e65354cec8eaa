use crate::models::error::CaptureError;
use crate::models::surface::NativeHandle;

/// Properties of a host display surface.
///
/// Only valid on the thread that owns the surface. Code running elsewhere
/// goes through [`DisplaySurface::invoke`].
pub trait SurfaceGeometry {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn native_handle(&self) -> NativeHandle;
}

/// A job run against the surface geometry on its owning thread.
pub type SurfaceJob = Box<dyn FnOnce(&dyn SurfaceGeometry) + Send + 'static>;

/// A host surface the capture preview is embedded into.
///
/// Implementations own the thread affinity rules: `invoke` must run `job` on
/// the owning thread and return only after it has finished. When the caller
/// already is the owning thread the job runs inline.
pub trait DisplaySurface: Send + Sync {
    fn invoke(&self, job: SurfaceJob) -> Result<(), CaptureError>;
}
