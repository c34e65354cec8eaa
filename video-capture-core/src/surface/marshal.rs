//! Synchronous queries against a display surface from any thread.
//!
//! Every geometry read goes through [`query`], which hands the closure to
//! [`DisplaySurface::invoke`] and blocks until the owning thread has produced
//! the value. There is no timeout: a stalled owner thread stalls the caller.

use crate::models::error::CaptureError;
use crate::models::surface::{NativeHandle, SurfaceBounds};
use crate::traits::display_surface::{DisplaySurface, SurfaceGeometry};

/// Run `f` against the surface geometry on its owning thread and return the
/// result.
pub fn query<S, R, F>(surface: &S, f: F) -> Result<R, CaptureError>
where
    S: DisplaySurface + ?Sized,
    R: Send + 'static,
    F: FnOnce(&dyn SurfaceGeometry) -> R + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);
    surface.invoke(Box::new(move |geometry: &dyn SurfaceGeometry| {
        let _ = tx.send(f(geometry));
    }))?;
    // invoke has returned, so the job either ran or never will.
    rx.try_recv().map_err(|_| CaptureError::SurfaceUnavailable)
}

pub fn surface_width<S: DisplaySurface + ?Sized>(surface: &S) -> Result<i32, CaptureError> {
    query(surface, |g| g.width())
}

pub fn surface_height<S: DisplaySurface + ?Sized>(surface: &S) -> Result<i32, CaptureError> {
    query(surface, |g| g.height())
}

pub fn surface_handle<S: DisplaySurface + ?Sized>(surface: &S) -> Result<NativeHandle, CaptureError> {
    query(surface, |g| g.native_handle())
}

/// Width and height read in a single rendezvous.
pub fn surface_bounds<S: DisplaySurface + ?Sized>(surface: &S) -> Result<SurfaceBounds, CaptureError> {
    query(surface, |g| SurfaceBounds::new(g.width(), g.height()))
}
