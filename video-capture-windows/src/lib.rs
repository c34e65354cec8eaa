//! # video-capture-windows
//!
//! Windows Video for Windows backend for video-capture-kit.
//!
//! Provides:
//! - `VfwDriver` — capture driver over `avicap32` capture windows
//! - `HwndGeometry` — client-area geometry of a host window
//!
//! ## Platform Requirements
//! - A Video for Windows capture driver (or the WDM-to-VfW bridge) installed
//! - Visual Studio Build Tools 2022 + Windows SDK for linking
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use video_capture_core::{CaptureSession, DeviceRegistry, NativeHandle, UiThread};
//! use video_capture_windows::{HwndGeometry, VfwDriver};
//!
//! let driver = Arc::new(VfwDriver::new());
//! let registry = DeviceRegistry::enumerate(&*driver);
//! let picture_box: isize = host_window_handle();
//! let surface = UiThread::spawn("preview", move || HwndGeometry::new(NativeHandle(picture_box)))?;
//! let mut session = CaptureSession::new(driver);
//! session.connect(&surface, &registry.devices()[0])?;
//! ```

#[cfg(target_os = "windows")]
pub mod hwnd_surface;
#[cfg(target_os = "windows")]
pub mod vfw_driver;

#[cfg(target_os = "windows")]
pub use hwnd_surface::HwndGeometry;
#[cfg(target_os = "windows")]
pub use vfw_driver::VfwDriver;
