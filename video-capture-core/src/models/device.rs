use serde::{Deserialize, Serialize};

/// Number of driver slots the capture subsystem exposes (indices 0 through 9).
pub const MAX_DRIVER_SLOTS: u8 = 10;

/// Size of the name/version buffers handed to the driver probe, in UTF-16
/// code units including the terminator.
pub const DESCRIPTION_BUFFER_LEN: usize = 80;

/// A capture device found during enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Driver slot, in `0..MAX_DRIVER_SLOTS`.
    pub index: u8,
    pub name: String,
    pub version: String,
}

/// Name and version reported by a single slot probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverDescription {
    pub name: String,
    pub version: String,
}

impl DriverDescription {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Clamp both strings to what fits in the probe buffers.
    pub fn truncated(self) -> Self {
        Self {
            name: truncate_utf16(&self.name, DESCRIPTION_BUFFER_LEN - 1),
            version: truncate_utf16(&self.version, DESCRIPTION_BUFFER_LEN - 1),
        }
    }
}

/// Truncate `s` to at most `max_units` UTF-16 code units without splitting a
/// surrogate pair.
pub fn truncate_utf16(s: &str, max_units: usize) -> String {
    let mut units = 0;
    let mut end = 0;
    for (offset, ch) in s.char_indices() {
        if units + ch.len_utf16() > max_units {
            break;
        }
        units += ch.len_utf16();
        end = offset + ch.len_utf8();
    }
    s[..end].to_string()
}
