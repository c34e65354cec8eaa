//! Capture device enumeration.
//!
//! Probes every driver slot the capture subsystem exposes and keeps the ones
//! that report a driver, in slot order.

use crate::models::device::{DeviceDescriptor, MAX_DRIVER_SLOTS};
use crate::traits::capture_driver::CaptureDriver;

/// Ordered list of capture devices found at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRegistry {
    devices: Vec<DeviceDescriptor>,
}

impl DeviceRegistry {
    /// Probe slots `0..MAX_DRIVER_SLOTS`.
    ///
    /// A slot whose probe fails is skipped. Enumeration itself never fails;
    /// with no drivers installed the registry is simply empty.
    pub fn enumerate<D: CaptureDriver + ?Sized>(driver: &D) -> Self {
        let mut devices = Vec::with_capacity(MAX_DRIVER_SLOTS as usize);

        for slot in 0..MAX_DRIVER_SLOTS {
            let description = match driver.describe(slot) {
                Ok(d) => d.truncated(),
                Err(e) => {
                    log::debug!("skipping driver slot {}: {}", slot, e);
                    continue;
                }
            };

            devices.push(DeviceDescriptor {
                index: slot,
                name: description.name,
                version: description.version,
            });
        }

        log::debug!("enumerated {} capture device(s)", devices.len());
        Self { devices }
    }

    pub fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }

    /// Look up a device by driver slot.
    pub fn get(&self, index: u8) -> Option<&DeviceDescriptor> {
        self.devices.iter().find(|d| d.index == index)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&DeviceDescriptor> {
        self.devices.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeviceDescriptor> {
        self.devices.iter()
    }
}

impl<'a> IntoIterator for &'a DeviceRegistry {
    type Item = &'a DeviceDescriptor;
    type IntoIter = std::slice::Iter<'a, DeviceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
