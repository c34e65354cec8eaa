//! Geometry of a host `HWND`.

use std::ffi::c_void;

use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

use video_capture_core::models::surface::{NativeHandle, SurfaceBounds};
use video_capture_core::traits::display_surface::SurfaceGeometry;

/// Client-area geometry of a host window, such as a picture box.
///
/// The size is the client rectangle, not the outer window size, so a host
/// control with a border yields a preview slightly smaller than the control.
///
/// Must be read on the thread that owns the window: construct it inside
/// `UiThread::spawn`, or behind whatever `DisplaySurface` the host provides.
#[derive(Debug, Clone, Copy)]
pub struct HwndGeometry {
    handle: NativeHandle,
}

impl HwndGeometry {
    pub fn new(handle: NativeHandle) -> Self {
        Self { handle }
    }

    /// Current client-area size. A window that cannot be queried reports 0x0.
    pub fn client_bounds(&self) -> SurfaceBounds {
        let mut rect = RECT::default();
        let hwnd = HWND(self.handle.0 as *mut c_void);
        match unsafe { GetClientRect(hwnd, &mut rect) } {
            Ok(()) => SurfaceBounds::new(rect.right - rect.left, rect.bottom - rect.top),
            Err(e) => {
                log::warn!("GetClientRect failed for {:?}: {}", self.handle, e);
                SurfaceBounds::default()
            }
        }
    }
}

impl SurfaceGeometry for HwndGeometry {
    fn width(&self) -> i32 {
        self.client_bounds().width
    }

    fn height(&self) -> i32 {
        self.client_bounds().height
    }

    fn native_handle(&self) -> NativeHandle {
        self.handle
    }
}
