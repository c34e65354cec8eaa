use std::fs;
use std::sync::Arc;
use std::thread;

use video_capture_core::simulated::DriverCall;
use video_capture_core::{
    CaptureError, CaptureSession, DeviceRegistry, NativeHandle, SessionConfiguration, SessionState,
    SimulatedDriver, StaticSurface, SurfaceBounds, SurfaceGeometry, UiThread,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn two_slot_driver() -> Arc<SimulatedDriver> {
    Arc::new(
        SimulatedDriver::new()
            .with_device(3, "USB Video Device", "10.0.19041")
            .with_device(0, "Microsoft WDM Image Capture (Win32)", "10.0.19041"),
    )
}

fn session_writing_to(
    driver: &Arc<SimulatedDriver>,
    dir: &tempfile::TempDir,
) -> CaptureSession<SimulatedDriver> {
    let config = SessionConfiguration {
        output_directory: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    CaptureSession::with_config(Arc::clone(driver), config).unwrap()
}

struct PictureBox {
    width: i32,
    height: i32,
}

impl SurfaceGeometry for PictureBox {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn native_handle(&self) -> NativeHandle {
        NativeHandle(0xBEEF)
    }
}

#[test]
fn enumerates_only_present_slots_in_order() {
    init_logging();
    let registry = DeviceRegistry::enumerate(&*two_slot_driver());

    let indices: Vec<u8> = registry.iter().map(|d| d.index).collect();
    assert_eq!(indices, vec![0, 3]);
    assert_eq!(registry.devices()[1].name, "USB Video Device");
}

#[test]
fn connect_then_disconnect_leaves_no_file_and_no_window() {
    init_logging();
    let driver = two_slot_driver();
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_writing_to(&driver, &dir);
    let registry = DeviceRegistry::enumerate(&*driver);
    let surface = StaticSurface::new(SurfaceBounds::new(320, 240), NativeHandle(0x10));

    session.connect(&surface, registry.get(0).unwrap()).unwrap();
    assert!(session.has_valid_handle());
    session.disconnect().unwrap();

    assert!(!session.has_valid_handle());
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(driver.live_windows(), 0);
    assert!(!dir.path().join("Clip.avi").exists());
}

#[test]
fn each_recording_replaces_the_previous_clip() {
    init_logging();
    let driver = two_slot_driver();
    let dir = tempfile::tempdir().unwrap();
    let clip = dir.path().join("Clip.avi");
    fs::write(&clip, b"stale clip from an earlier run").unwrap();

    let mut session = session_writing_to(&driver, &dir);
    let registry = DeviceRegistry::enumerate(&*driver);
    let surface = StaticSurface::new(SurfaceBounds::new(320, 240), NativeHandle(0x10));
    let camera = registry.get(3).unwrap();

    session.connect(&surface, camera).unwrap();
    session.record().unwrap();
    let first = session.stop_record().unwrap();
    assert!(first.replaced_previous);
    assert_eq!(fs::read_to_string(&clip).unwrap(), "3 sequence 1\n");

    session.connect(&surface, camera).unwrap();
    session.record().unwrap();
    let second = session.stop_record().unwrap();
    assert!(second.replaced_previous);
    assert_eq!(fs::read_to_string(&clip).unwrap(), "3 sequence 2\n");

    let clips = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(clips, 1);
}

#[test]
fn record_before_connect_is_rejected_without_driver_traffic() {
    init_logging();
    let driver = two_slot_driver();
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_writing_to(&driver, &dir);

    let err = session.record().unwrap_err();

    assert_eq!(
        err,
        CaptureError::InvalidState {
            operation: "record",
            state: SessionState::Idle
        }
    );
    assert!(driver.calls().is_empty());
}

#[test]
fn surface_geometry_is_read_on_its_owner_thread() {
    init_logging();
    let driver = two_slot_driver();
    let dir = tempfile::tempdir().unwrap();
    let surface = Arc::new(
        UiThread::spawn("picture-box", || PictureBox {
            width: 640,
            height: 480,
        })
        .unwrap(),
    );

    let worker_driver = Arc::clone(&driver);
    let worker_surface = Arc::clone(&surface);
    let config = SessionConfiguration {
        output_directory: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let worker = thread::spawn(move || {
        let registry = DeviceRegistry::enumerate(&*worker_driver);
        let mut session = CaptureSession::with_config(worker_driver, config)?;
        session.connect(&*worker_surface, &registry.devices()[0])?;
        let window = session.window_id();
        session.disconnect()?;
        Ok::<_, CaptureError>(window)
    });

    let window = worker.join().unwrap().unwrap().unwrap();
    let created = driver.calls().into_iter().find_map(|call| match call {
        DriverCall::CreateWindow { bounds, parent, .. } => Some((bounds, parent)),
        _ => None,
    });
    assert_eq!(created, Some((SurfaceBounds::new(640, 480), NativeHandle(0xBEEF))));
    assert!(driver.window(window).is_none());
}

#[test]
fn metadata_sidecar_written_when_enabled() {
    init_logging();
    let driver = two_slot_driver();
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfiguration {
        output_directory: Some(dir.path().to_path_buf()),
        write_metadata: true,
        ..Default::default()
    };
    let mut session = CaptureSession::with_config(Arc::clone(&driver), config).unwrap();
    let registry = DeviceRegistry::enumerate(&*driver);
    let surface = StaticSurface::new(SurfaceBounds::new(320, 240), NativeHandle(0x10));

    session.connect(&surface, registry.get(0).unwrap()).unwrap();
    session.record().unwrap();
    let result = session.stop_record().unwrap();

    let sidecar = video_capture_core::storage::metadata::read_metadata(&result.file_path).unwrap();
    assert_eq!(sidecar, result.metadata);
    assert_eq!(sidecar.device_index, 0);
    assert_eq!(sidecar.device_name, "Microsoft WDM Image Capture (Win32)");
}
