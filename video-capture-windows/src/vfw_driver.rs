//! Video for Windows capture driver.
//!
//! Wraps `avicap32` (driver probing and capture-window creation) and the
//! `user32` window calls used to address capture windows. Every command is
//! a `SendMessageW` to the capture window; the reply is checked and turned
//! into a typed result.
//!
//! Capture windows belong to the thread that created them, so a session
//! using this driver must be driven from a single thread.

use std::ffi::c_void;

use windows::core::{HSTRING, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::Media::Multimedia::{capCreateCaptureWindowW, capGetDriverDescriptionW};
use windows::Win32::UI::WindowsAndMessaging::{
    DestroyWindow, SendMessageW, SetWindowPos, SWP_NOMOVE, SWP_NOZORDER,
};

use video_capture_core::models::command::{DriverCommand, WM_CAP_START};
use video_capture_core::models::device::{DriverDescription, DESCRIPTION_BUFFER_LEN};
use video_capture_core::models::error::CaptureError;
use video_capture_core::models::surface::{NativeHandle, SurfaceBounds, WindowId, WindowStyle};
use video_capture_core::traits::capture_driver::CaptureDriver;

/// Start of the wide-string capture messages.
const WM_CAP_UNICODE_START: u32 = WM_CAP_START + 100;
const WM_CAP_FILE_SAVEASW: u32 = WM_CAP_UNICODE_START + 23;

/// Capture driver backed by `avicap32`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VfwDriver;

impl VfwDriver {
    pub fn new() -> Self {
        Self
    }
}

fn hwnd(window: WindowId) -> HWND {
    HWND(window.0 as *mut c_void)
}

/// Decode a NUL-terminated UTF-16 buffer.
fn from_wide(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

impl CaptureDriver for VfwDriver {
    fn describe(&self, slot: u8) -> Result<DriverDescription, CaptureError> {
        let mut name = [0u16; DESCRIPTION_BUFFER_LEN];
        let mut version = [0u16; DESCRIPTION_BUFFER_LEN];

        let found = unsafe { capGetDriverDescriptionW(slot as u32, &mut name, &mut version) };
        if !found.as_bool() {
            return Err(CaptureError::ProbeFailed { slot });
        }

        Ok(DriverDescription::new(from_wide(&name), from_wide(&version)))
    }

    fn create_window(
        &self,
        title: &str,
        style: WindowStyle,
        bounds: SurfaceBounds,
        parent: NativeHandle,
    ) -> Result<WindowId, CaptureError> {
        let title = HSTRING::from(title);
        let parent = HWND(parent.0 as *mut c_void);

        let window = unsafe {
            capCreateCaptureWindowW(
                &title,
                style.bits(),
                0,
                0,
                bounds.width,
                bounds.height,
                Some(parent),
                0,
            )
        };

        if window.is_invalid() {
            return Err(CaptureError::Window(
                "capCreateCaptureWindowW returned a null window".into(),
            ));
        }
        Ok(WindowId(window.0 as isize))
    }

    fn send(&self, window: WindowId, command: &DriverCommand) -> Result<(), CaptureError> {
        let reply = match command {
            DriverCommand::SaveAs(path) => {
                let path = HSTRING::from(path.as_os_str());
                let path = PCWSTR(path.as_ptr());
                unsafe {
                    SendMessageW(
                        hwnd(window),
                        WM_CAP_FILE_SAVEASW,
                        Some(WPARAM(0)),
                        Some(LPARAM(path.0 as isize)),
                    )
                }
            }
            _ => unsafe {
                SendMessageW(
                    hwnd(window),
                    command.message(),
                    Some(WPARAM(command.wparam())),
                    Some(LPARAM(0)),
                )
            },
        };

        if reply.0 <= 0 {
            log::warn!("capture window {:?} rejected {}: reply {}", window, command.kind(), reply.0);
            return Err(CaptureError::CommandFailed {
                command: command.kind(),
                code: reply.0,
            });
        }
        Ok(())
    }

    fn resize_window(&self, window: WindowId, bounds: SurfaceBounds) -> Result<(), CaptureError> {
        unsafe {
            SetWindowPos(
                hwnd(window),
                None,
                0,
                0,
                bounds.width,
                bounds.height,
                SWP_NOMOVE | SWP_NOZORDER,
            )
        }
        .map_err(|e| CaptureError::Window(format!("SetWindowPos failed: {}", e)))
    }

    fn destroy_window(&self, window: WindowId) -> Result<(), CaptureError> {
        unsafe { DestroyWindow(hwnd(window)) }
            .map_err(|e| CaptureError::Window(format!("DestroyWindow failed: {}", e)))
    }
}
