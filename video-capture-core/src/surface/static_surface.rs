use crate::models::error::CaptureError;
use crate::models::surface::{NativeHandle, SurfaceBounds};
use crate::traits::display_surface::{DisplaySurface, SurfaceGeometry, SurfaceJob};

/// A surface with fixed geometry and no thread affinity.
///
/// Useful for hosts that already know the target window's size and handle,
/// and for headless tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSurface {
    bounds: SurfaceBounds,
    handle: NativeHandle,
}

impl StaticSurface {
    pub fn new(bounds: SurfaceBounds, handle: NativeHandle) -> Self {
        Self { bounds, handle }
    }
}

impl SurfaceGeometry for StaticSurface {
    fn width(&self) -> i32 {
        self.bounds.width
    }

    fn height(&self) -> i32 {
        self.bounds.height
    }

    fn native_handle(&self) -> NativeHandle {
        self.handle
    }
}

impl DisplaySurface for StaticSurface {
    fn invoke(&self, job: SurfaceJob) -> Result<(), CaptureError> {
        job(self);
        Ok(())
    }
}
