//! # video-capture-core
//!
//! Platform-agnostic video capture core library.
//!
//! Provides device enumeration, the capture session state machine, and the
//! rendezvous used to read host surface geometry from its owning thread.
//! Platform-specific backends (Windows Video for Windows) implement the
//! `CaptureDriver` trait and plug into the generic `CaptureSession`.
//!
//! ## Architecture
//!
//! ```text
//! video-capture-core (this crate)
//! ├── traits/      ← CaptureDriver, DisplaySurface, SurfaceGeometry, SessionDelegate
//! ├── models/      ← CaptureError, SessionState, SessionConfiguration, DeviceDescriptor, DriverCommand
//! ├── registry/    ← DeviceRegistry (slot probing)
//! ├── session/     ← CaptureSession (state machine), CaptureWindow (owned window)
//! ├── surface/     ← marshal::query, UiThread, StaticSurface
//! ├── storage/     ← clip output path, metadata sidecar
//! └── simulated    ← SimulatedDriver (no hardware required)
//! ```
//!
//! ## Usage
//! ```
//! use std::sync::Arc;
//! use video_capture_core::{
//!     CaptureSession, DeviceRegistry, NativeHandle, SimulatedDriver, StaticSurface, SurfaceBounds,
//! };
//!
//! let driver = Arc::new(SimulatedDriver::new().with_device(0, "USB Video Device", "1.0"));
//! let registry = DeviceRegistry::enumerate(&*driver);
//! let surface = StaticSurface::new(SurfaceBounds::new(320, 240), NativeHandle(0x1));
//!
//! let mut session = CaptureSession::new(Arc::clone(&driver));
//! session.connect(&surface, &registry.devices()[0]).unwrap();
//! assert!(session.is_connected());
//! session.disconnect().unwrap();
//! ```

pub mod models;
pub mod registry;
pub mod session;
pub mod simulated;
pub mod storage;
pub mod surface;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::command::{CommandKind, DriverCommand};
pub use models::config::SessionConfiguration;
pub use models::device::{DeviceDescriptor, DriverDescription, DESCRIPTION_BUFFER_LEN, MAX_DRIVER_SLOTS};
pub use models::error::CaptureError;
pub use models::recording_result::{RecordingMetadata, RecordingResult};
pub use models::state::SessionState;
pub use models::surface::{NativeHandle, SurfaceBounds, WindowId, WindowStyle};
pub use registry::device_registry::DeviceRegistry;
pub use session::capture_session::CaptureSession;
pub use session::capture_window::CaptureWindow;
pub use simulated::SimulatedDriver;
pub use surface::static_surface::StaticSurface;
pub use surface::ui_thread::UiThread;
pub use traits::capture_driver::CaptureDriver;
pub use traits::display_surface::{DisplaySurface, SurfaceGeometry, SurfaceJob};
pub use traits::session_delegate::SessionDelegate;
