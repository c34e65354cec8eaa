use std::sync::Arc;

use crate::models::command::DriverCommand;
use crate::models::error::CaptureError;
use crate::models::surface::{NativeHandle, SurfaceBounds, WindowId, WindowStyle};
use crate::traits::capture_driver::CaptureDriver;

/// An owned capture window.
///
/// The native window is destroyed exactly once: by [`CaptureWindow::destroy`]
/// when the caller wants the result, otherwise when the value is dropped.
pub struct CaptureWindow<D: CaptureDriver + ?Sized> {
    driver: Arc<D>,
    id: WindowId,
    destroyed: bool,
}

impl<D: CaptureDriver + ?Sized> CaptureWindow<D> {
    pub fn create(
        driver: Arc<D>,
        title: &str,
        style: WindowStyle,
        bounds: SurfaceBounds,
        parent: NativeHandle,
    ) -> Result<Self, CaptureError> {
        let id = driver.create_window(title, style, bounds, parent)?;
        if !id.is_valid() {
            return Err(CaptureError::Window("driver returned a null capture window".into()));
        }
        log::debug!("created capture window {:?} ({}x{})", id, bounds.width, bounds.height);
        Ok(Self {
            driver,
            id,
            destroyed: false,
        })
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn send(&self, command: &DriverCommand) -> Result<(), CaptureError> {
        self.driver.send(self.id, command)
    }

    pub fn resize(&self, bounds: SurfaceBounds) -> Result<(), CaptureError> {
        self.driver.resize_window(self.id, bounds)
    }

    pub fn destroy(mut self) -> Result<(), CaptureError> {
        self.destroyed = true;
        log::debug!("destroying capture window {:?}", self.id);
        self.driver.destroy_window(self.id)
    }
}

impl<D: CaptureDriver + ?Sized> Drop for CaptureWindow<D> {
    fn drop(&mut self) {
        if self.destroyed {
            return;
        }
        if let Err(e) = self.driver.destroy_window(self.id) {
            log::warn!("failed to destroy capture window {:?}: {}", self.id, e);
        }
    }
}
