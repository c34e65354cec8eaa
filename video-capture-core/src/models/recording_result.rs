use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::device::DeviceDescriptor;

/// Result returned when `stop_record` hands the sequence to the driver.
///
/// The file itself is written by the driver; `file_path` is where it was
/// asked to save.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingResult {
    pub file_path: PathBuf,
    pub device: DeviceDescriptor,
    /// Whether an earlier clip at `file_path` was removed first.
    pub replaced_previous: bool,
    pub metadata: RecordingMetadata,
}

/// Metadata describing a saved clip.
///
/// Serializable for the optional JSON sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub id: String,
    pub device_index: u8,
    pub device_name: String,
    pub device_version: String,
    pub file_path: String,
    pub created_at: String,
}

impl RecordingMetadata {
    pub fn new(device: &DeviceDescriptor, file_path: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            device_index: device.index,
            device_name: device.name.clone(),
            device_version: device.version.clone(),
            file_path: file_path.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
