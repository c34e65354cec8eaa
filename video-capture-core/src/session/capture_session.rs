use std::path::PathBuf;
use std::sync::Arc;

use crate::models::command::DriverCommand;
use crate::models::config::SessionConfiguration;
use crate::models::device::DeviceDescriptor;
use crate::models::error::CaptureError;
use crate::models::recording_result::{RecordingMetadata, RecordingResult};
use crate::models::state::SessionState;
use crate::models::surface::{WindowId, WindowStyle};
use crate::session::capture_window::CaptureWindow;
use crate::storage::metadata::write_metadata;
use crate::storage::output;
use crate::surface::marshal;
use crate::traits::capture_driver::CaptureDriver;
use crate::traits::display_surface::DisplaySurface;
use crate::traits::session_delegate::SessionDelegate;

/// Drives one capture device through preview and recording.
///
/// The session owns at most one capture window. The window is created by
/// [`connect`](Self::connect), released by [`disconnect`](Self::disconnect)
/// or [`stop_record`](Self::stop_record), and destroyed automatically if the
/// session is dropped while still holding it.
///
/// ```text
/// connect ─→ [create window] → driver-connect → scale → rate → preview → resize
/// record  ─→ sequence
/// stop    ─→ driver-disconnect → remove old clip → save-as → destroy window
/// ```
pub struct CaptureSession<D: CaptureDriver + ?Sized> {
    driver: Arc<D>,
    config: SessionConfiguration,
    window: Option<CaptureWindow<D>>,
    device: Option<DeviceDescriptor>,
    state: SessionState,
    delegate: Option<Arc<dyn SessionDelegate>>,
}

impl<D: CaptureDriver + ?Sized> CaptureSession<D> {
    pub fn new(driver: Arc<D>) -> Self {
        Self {
            driver,
            config: SessionConfiguration::default(),
            window: None,
            device: None,
            state: SessionState::Idle,
            delegate: None,
        }
    }

    pub fn with_config(driver: Arc<D>, config: SessionConfiguration) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        let mut session = Self::new(driver);
        session.config = config;
        Ok(session)
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    /// Whether the session currently owns a live capture window.
    pub fn has_valid_handle(&self) -> bool {
        self.window.is_some()
    }

    pub fn window_id(&self) -> Option<WindowId> {
        self.window.as_ref().map(CaptureWindow::id)
    }

    /// The device bound by the last successful `connect`, while it is bound.
    pub fn current_device(&self) -> Option<&DeviceDescriptor> {
        self.device.as_ref()
    }

    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    /// Where `stop_record` will ask the driver to save the clip.
    pub fn output_path(&self) -> Result<PathBuf, CaptureError> {
        output::clip_path(&self.config)
    }

    /// Embed a live preview of `device` in `surface`. Transitions: idle → connected.
    ///
    /// Surface geometry is read through the surface's owning thread. If the
    /// driver refuses the device, the capture window is destroyed again and
    /// `DeviceUnavailable` is returned.
    pub fn connect<S>(&mut self, surface: &S, device: &DeviceDescriptor) -> Result<(), CaptureError>
    where
        S: DisplaySurface + ?Sized,
    {
        if !self.state.is_idle() {
            return Err(self.invalid_state("connect"));
        }

        match self.open_preview(surface, device) {
            Ok(window) => {
                log::info!("connected to capture device {} ({})", device.index, device.name);
                self.window = Some(window);
                self.device = Some(device.clone());
                self.set_state(SessionState::Connected);
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Start capturing the sequence. Transitions: connected → recording.
    pub fn record(&mut self) -> Result<(), CaptureError> {
        if !self.state.is_connected() {
            return Err(self.invalid_state("record"));
        }
        let Some(window) = self.window.as_ref() else {
            return Err(self.invalid_state("record"));
        };

        if let Err(e) = window.send(&DriverCommand::StartSequence) {
            self.report(&e);
            return Err(e);
        }

        self.set_state(SessionState::Recording);
        Ok(())
    }

    /// Unbind the device, save the captured sequence, and release the window.
    /// Transitions: recording/connected → idle.
    ///
    /// Any earlier clip at the output path is deleted before the driver is
    /// asked to save, so the path only ever holds the latest recording. The
    /// session ends idle whether or not saving succeeded.
    pub fn stop_record(&mut self) -> Result<RecordingResult, CaptureError> {
        if self.state.is_idle() {
            return Err(self.invalid_state("stop recording"));
        }

        let window = self.window.take();
        let device = self.device.take();
        let result = match (window, device) {
            (Some(window), Some(device)) => self.save_and_release(window, device),
            _ => Err(CaptureError::InvalidState {
                operation: "stop recording",
                state: self.state,
            }),
        };

        self.set_state(SessionState::Idle);

        match result {
            Ok(recording) => {
                if let Some(ref delegate) = self.delegate {
                    delegate.on_recording_saved(&recording);
                }
                Ok(recording)
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Destroy the capture window, whatever the current state.
    ///
    /// Calling this while idle does nothing. The session is idle afterwards
    /// even if the platform failed to destroy the window.
    pub fn disconnect(&mut self) -> Result<(), CaptureError> {
        self.device = None;
        let Some(window) = self.window.take() else {
            if !self.state.is_idle() {
                self.set_state(SessionState::Idle);
            }
            return Ok(());
        };

        let result = window.destroy();
        self.set_state(SessionState::Idle);

        if let Err(ref e) = result {
            self.report(e);
        }
        result
    }

    // --- Internal helpers ---

    fn open_preview<S>(&self, surface: &S, device: &DeviceDescriptor) -> Result<CaptureWindow<D>, CaptureError>
    where
        S: DisplaySurface + ?Sized,
    {
        let bounds = marshal::surface_bounds(surface)?;
        if !bounds.is_visible() {
            return Err(CaptureError::Window(format!(
                "surface has no visible area ({}x{})",
                bounds.width, bounds.height
            )));
        }
        let parent = marshal::surface_handle(surface)?;

        let window = CaptureWindow::create(
            Arc::clone(&self.driver),
            &device.index.to_string(),
            WindowStyle::EMBEDDED,
            bounds,
            parent,
        )?;

        if let Err(e) = window.send(&DriverCommand::Connect { index: device.index }) {
            log::warn!("capture driver {} refused connection: {}", device.index, e);
            if let Err(e) = window.destroy() {
                log::warn!("failed to tear down capture window: {}", e);
            }
            return Err(CaptureError::DeviceUnavailable { index: device.index });
        }

        if let Err(e) = self.start_preview(&window, surface) {
            Self::release(window, device.index);
            return Err(e);
        }

        Ok(window)
    }

    fn start_preview<S>(&self, window: &CaptureWindow<D>, surface: &S) -> Result<(), CaptureError>
    where
        S: DisplaySurface + ?Sized,
    {
        window.send(&DriverCommand::SetScale(self.config.scale_preview))?;
        window.send(&DriverCommand::SetPreviewRate(self.config.preview_rate_ms))?;
        window.send(&DriverCommand::SetPreview(true))?;

        // The surface may have been resized while the driver was connecting.
        let bounds = marshal::surface_bounds(surface)?;
        window.resize(bounds)
    }

    fn save_and_release(
        &self,
        window: CaptureWindow<D>,
        device: DeviceDescriptor,
    ) -> Result<RecordingResult, CaptureError> {
        if let Err(e) = window.send(&DriverCommand::Disconnect { index: device.index }) {
            log::warn!("failed to disconnect capture driver {}: {}", device.index, e);
        }

        let path = output::clip_path(&self.config)?;
        let replaced_previous = output::remove_existing(&path)?;
        if replaced_previous {
            log::debug!("removed previous clip at {}", path.display());
        }

        window.send(&DriverCommand::SaveAs(path.clone()))?;
        window.destroy()?;

        let metadata = RecordingMetadata::new(&device, &path.to_string_lossy());
        if self.config.write_metadata {
            // The clip is already on disk; a missing sidecar does not undo it.
            if let Err(e) = write_metadata(&metadata, &path) {
                log::warn!("clip saved without metadata sidecar: {}", e);
                self.report(&e);
            }
        }

        log::info!("saved clip from {} to {}", device.name, path.display());
        Ok(RecordingResult {
            file_path: path,
            device,
            replaced_previous,
            metadata,
        })
    }

    /// Unbind the driver and destroy the window, logging failures.
    fn release(window: CaptureWindow<D>, index: u8) {
        if let Err(e) = window.send(&DriverCommand::Disconnect { index }) {
            log::warn!("failed to disconnect capture driver {}: {}", index, e);
        }
        if let Err(e) = window.destroy() {
            log::warn!("failed to tear down capture window: {}", e);
        }
    }

    fn invalid_state(&self, operation: &'static str) -> CaptureError {
        let error = CaptureError::InvalidState {
            operation,
            state: self.state,
        };
        self.report(&error);
        error
    }

    fn report(&self, error: &CaptureError) {
        log::warn!("capture session error: {}", error);
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(error);
        }
    }

    fn set_state(&mut self, new_state: SessionState) {
        log::debug!("capture session {} -> {}", self.state, new_state);
        debug_assert_eq!(new_state.holds_window(), self.window.is_some());
        self.state = new_state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&new_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::models::command::CommandKind;
    use crate::models::surface::{NativeHandle, SurfaceBounds};
    use crate::simulated::{DriverCall, SimulatedDriver};
    use crate::surface::static_surface::StaticSurface;

    fn surface() -> StaticSurface {
        StaticSurface::new(SurfaceBounds::new(320, 240), NativeHandle(0x2A))
    }

    fn device(index: u8) -> DeviceDescriptor {
        DeviceDescriptor {
            index,
            name: format!("Camera {}", index),
            version: "1.0".into(),
        }
    }

    fn session_in(dir: &tempfile::TempDir) -> (Arc<SimulatedDriver>, CaptureSession<SimulatedDriver>) {
        let driver = Arc::new(SimulatedDriver::new().with_device(0, "Camera 0", "1.0"));
        let config = SessionConfiguration {
            output_directory: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let session = CaptureSession::with_config(Arc::clone(&driver), config).unwrap();
        (driver, session)
    }

    #[derive(Default)]
    struct EventLog {
        states: Mutex<Vec<SessionState>>,
        errors: Mutex<Vec<CaptureError>>,
        saved: Mutex<Vec<PathBuf>>,
    }

    impl SessionDelegate for EventLog {
        fn on_state_changed(&self, state: &SessionState) {
            self.states.lock().push(*state);
        }

        fn on_error(&self, error: &CaptureError) {
            self.errors.lock().push(error.clone());
        }

        fn on_recording_saved(&self, result: &RecordingResult) {
            self.saved.lock().push(result.file_path.clone());
        }
    }

    #[test]
    fn connect_configures_preview_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);

        session.connect(&surface(), &device(0)).unwrap();

        assert_eq!(session.state(), SessionState::Connected);
        assert_eq!(
            driver.commands(),
            vec![
                DriverCommand::Connect { index: 0 },
                DriverCommand::SetScale(true),
                DriverCommand::SetPreviewRate(30),
                DriverCommand::SetPreview(true),
            ]
        );

        let window = driver.window(session.window_id().unwrap()).unwrap();
        assert_eq!(window.title, "0");
        assert_eq!(window.parent, NativeHandle(0x2A));
        assert_eq!(window.bounds, SurfaceBounds::new(320, 240));
        assert!(window.previewing);
        assert_eq!(session.current_device(), Some(&device(0)));
    }

    #[test]
    fn connect_creates_embedded_window_and_resizes_it() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        session.connect(&surface(), &device(0)).unwrap();

        let calls = driver.calls();
        assert!(matches!(
            &calls[0],
            DriverCall::CreateWindow { style, .. } if *style == WindowStyle::EMBEDDED
        ));
        assert!(matches!(
            calls.last(),
            Some(DriverCall::ResizeWindow { bounds, .. }) if *bounds == SurfaceBounds::new(320, 240)
        ));
    }

    #[test]
    fn busy_device_leaves_session_idle_without_window() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        driver.set_busy(0, true);

        let err = session.connect(&surface(), &device(0)).unwrap_err();

        assert_eq!(err, CaptureError::DeviceUnavailable { index: 0 });
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.has_valid_handle());
        assert_eq!(driver.live_windows(), 0);
        assert!(session.current_device().is_none());
    }

    #[test]
    fn preview_failure_releases_driver_and_window() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        driver.fail_command(CommandKind::SetPreviewRate);

        let err = session.connect(&surface(), &device(0)).unwrap_err();

        assert!(matches!(
            err,
            CaptureError::CommandFailed {
                command: CommandKind::SetPreviewRate,
                ..
            }
        ));
        assert_eq!(driver.live_windows(), 0);
        assert_eq!(driver.commands().last(), Some(&DriverCommand::Disconnect { index: 0 }));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn second_connect_is_rejected_without_new_window() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        session.connect(&surface(), &device(0)).unwrap();

        let err = session.connect(&surface(), &device(0)).unwrap_err();

        assert_eq!(
            err,
            CaptureError::InvalidState {
                operation: "connect",
                state: SessionState::Connected
            }
        );
        assert_eq!(driver.live_windows(), 1);
    }

    #[test]
    fn record_and_stop_from_idle_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);

        assert!(matches!(session.record(), Err(CaptureError::InvalidState { .. })));
        assert!(matches!(session.stop_record(), Err(CaptureError::InvalidState { .. })));
        assert!(driver.calls().is_empty());
    }

    #[test]
    fn record_failure_keeps_preview_running() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        driver.fail_command(CommandKind::StartSequence);
        session.connect(&surface(), &device(0)).unwrap();

        assert!(session.record().is_err());
        assert_eq!(session.state(), SessionState::Connected);
        assert!(session.has_valid_handle());
    }

    #[test]
    fn stop_record_saves_and_returns_to_idle() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        session.connect(&surface(), &device(0)).unwrap();
        session.record().unwrap();

        let result = session.stop_record().unwrap();

        assert_eq!(result.file_path, dir.path().join("Clip.avi"));
        assert!(result.file_path.exists());
        assert!(!result.replaced_previous);
        assert_eq!(result.device, device(0));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.has_valid_handle());
        assert_eq!(driver.live_windows(), 0);

        let tail: Vec<_> = driver.commands().into_iter().rev().take(2).collect();
        assert_eq!(tail[1], DriverCommand::Disconnect { index: 0 });
        assert_eq!(tail[0], DriverCommand::SaveAs(dir.path().join("Clip.avi")));
    }

    #[test]
    fn stop_from_connected_without_sequence_still_tears_down() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        session.connect(&surface(), &device(0)).unwrap();

        let err = session.stop_record().unwrap_err();

        assert!(matches!(
            err,
            CaptureError::CommandFailed {
                command: CommandKind::SaveAs,
                ..
            }
        ));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(driver.live_windows(), 0);
    }

    #[test]
    fn disconnect_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);

        session.disconnect().unwrap();
        session.connect(&surface(), &device(0)).unwrap();
        session.disconnect().unwrap();
        session.disconnect().unwrap();

        assert!(!session.has_valid_handle());
        assert_eq!(driver.live_windows(), 0);
        let destroys = driver
            .calls()
            .iter()
            .filter(|c| matches!(c, DriverCall::DestroyWindow { .. }))
            .count();
        assert_eq!(destroys, 1);
    }

    #[test]
    fn dropping_connected_session_destroys_window() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        session.connect(&surface(), &device(0)).unwrap();
        session.record().unwrap();

        drop(session);

        assert_eq!(driver.live_windows(), 0);
    }

    #[test]
    fn delegate_sees_transitions_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let (_driver, mut session) = session_in(&dir);
        let events = Arc::new(EventLog::default());
        session.set_delegate(events.clone());

        let _ = session.record();
        session.connect(&surface(), &device(0)).unwrap();
        session.record().unwrap();
        session.stop_record().unwrap();

        assert_eq!(
            *events.states.lock(),
            vec![SessionState::Connected, SessionState::Recording, SessionState::Idle]
        );
        assert_eq!(events.errors.lock().len(), 1);
        assert_eq!(*events.saved.lock(), vec![dir.path().join("Clip.avi")]);
    }

    #[test]
    fn collapsed_surface_is_rejected_before_window_creation() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        let collapsed = StaticSurface::new(SurfaceBounds::new(-5, 0), NativeHandle(0x2A));

        let err = session.connect(&collapsed, &device(0)).unwrap_err();

        assert!(matches!(err, CaptureError::Window(_)));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(driver.calls().is_empty());
    }

    #[test]
    fn unremovable_previous_clip_fails_but_tears_down() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        std::fs::create_dir(dir.path().join("Clip.avi")).unwrap();
        session.connect(&surface(), &device(0)).unwrap();
        session.record().unwrap();

        let err = session.stop_record().unwrap_err();

        assert!(matches!(err, CaptureError::StorageError(_)));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.has_valid_handle());
        assert_eq!(driver.live_windows(), 0);
        assert!(!driver
            .commands()
            .iter()
            .any(|c| matches!(c, DriverCommand::SaveAs(_))));
    }

    #[test]
    fn sidecar_failure_keeps_saved_recording() {
        let dir = tempfile::tempdir().unwrap();
        let driver = Arc::new(SimulatedDriver::new().with_device(0, "Camera 0", "1.0"));
        let config = SessionConfiguration {
            output_directory: Some(dir.path().to_path_buf()),
            write_metadata: true,
            ..Default::default()
        };
        let mut session = CaptureSession::with_config(Arc::clone(&driver), config).unwrap();
        let events = Arc::new(EventLog::default());
        session.set_delegate(events.clone());
        std::fs::create_dir(dir.path().join("Clip.avi.metadata.json")).unwrap();

        session.connect(&surface(), &device(0)).unwrap();
        session.record().unwrap();
        let result = session.stop_record().unwrap();

        assert!(result.file_path.is_file());
        assert_eq!(*events.saved.lock(), vec![dir.path().join("Clip.avi")]);
        assert!(matches!(
            events.errors.lock().as_slice(),
            [CaptureError::StorageError(_)]
        ));
        assert_eq!(driver.live_windows(), 0);
    }

    #[test]
    fn failed_window_destruction_still_leaves_session_idle() {
        let dir = tempfile::tempdir().unwrap();
        let (driver, mut session) = session_in(&dir);
        session.connect(&surface(), &device(0)).unwrap();
        driver.fail_destroy(true);

        let err = session.disconnect().unwrap_err();

        assert!(matches!(err, CaptureError::Window(_)));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.has_valid_handle());
        session.disconnect().unwrap();
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let driver = Arc::new(SimulatedDriver::new());
        let config = SessionConfiguration {
            preview_rate_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            CaptureSession::with_config(driver, config),
            Err(CaptureError::ConfigurationFailed(_))
        ));
    }
}
