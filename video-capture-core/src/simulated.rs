//! In-memory capture driver.
//!
//! Behaves like a capture subsystem with a configurable set of installed
//! drivers: windows are bookkept, commands are validated against the
//! window's binding, and `SaveAs` writes a small text file describing the
//! captured sequence. Every call is logged so hosts and tests can inspect
//! the exact command stream a session produced.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use parking_lot::Mutex;

use crate::models::command::{CommandKind, DriverCommand};
use crate::models::device::DriverDescription;
use crate::models::error::CaptureError;
use crate::models::surface::{NativeHandle, SurfaceBounds, WindowId, WindowStyle};
use crate::traits::capture_driver::CaptureDriver;

/// One call made against a [`SimulatedDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    CreateWindow {
        title: String,
        style: WindowStyle,
        bounds: SurfaceBounds,
        parent: NativeHandle,
    },
    Send {
        window: WindowId,
        command: DriverCommand,
    },
    ResizeWindow {
        window: WindowId,
        bounds: SurfaceBounds,
    },
    DestroyWindow {
        window: WindowId,
    },
}

/// Snapshot of a live simulated capture window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedWindow {
    pub title: String,
    pub bounds: SurfaceBounds,
    pub parent: NativeHandle,
    pub bound_slot: Option<u8>,
    pub previewing: bool,
    pub scaled: bool,
    pub preview_rate_ms: u32,
    /// Sequence number of the last capture started in this window.
    pub sequence: Option<u64>,
}

#[derive(Default)]
struct DriverState {
    slots: BTreeMap<u8, DriverDescription>,
    busy: HashSet<u8>,
    failing: HashSet<CommandKind>,
    failing_destroy: bool,
    windows: HashMap<WindowId, SimulatedWindow>,
    next_window: isize,
    sequences: u64,
    calls: Vec<DriverCall>,
}

/// A capture driver that needs no hardware.
#[derive(Default)]
pub struct SimulatedDriver {
    state: Mutex<DriverState>,
}

impl SimulatedDriver {
    /// A driver with no devices installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a device in `slot`.
    pub fn with_device(self, slot: u8, name: &str, version: &str) -> Self {
        self.state
            .lock()
            .slots
            .insert(slot, DriverDescription::new(name, version));
        self
    }

    /// Make connections to `slot` fail as if another application held it.
    pub fn set_busy(&self, slot: u8, busy: bool) {
        let mut s = self.state.lock();
        if busy {
            s.busy.insert(slot);
        } else {
            s.busy.remove(&slot);
        }
    }

    /// Make every command of this kind fail.
    pub fn fail_command(&self, kind: CommandKind) {
        self.state.lock().failing.insert(kind);
    }

    /// Make window destruction fail. The window stays alive.
    pub fn fail_destroy(&self, fail: bool) {
        self.state.lock().failing_destroy = fail;
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.state.lock().calls.clone()
    }

    /// Commands sent so far, in order, without window ids.
    pub fn commands(&self) -> Vec<DriverCommand> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::Send { command, .. } => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn live_windows(&self) -> usize {
        self.state.lock().windows.len()
    }

    pub fn window(&self, id: WindowId) -> Option<SimulatedWindow> {
        self.state.lock().windows.get(&id).cloned()
    }
}

fn rejected(command: &DriverCommand) -> CaptureError {
    CaptureError::CommandFailed {
        command: command.kind(),
        code: 0,
    }
}

impl CaptureDriver for SimulatedDriver {
    fn describe(&self, slot: u8) -> Result<DriverDescription, CaptureError> {
        self.state
            .lock()
            .slots
            .get(&slot)
            .cloned()
            .ok_or(CaptureError::ProbeFailed { slot })
    }

    fn create_window(
        &self,
        title: &str,
        style: WindowStyle,
        bounds: SurfaceBounds,
        parent: NativeHandle,
    ) -> Result<WindowId, CaptureError> {
        let mut s = self.state.lock();
        s.calls.push(DriverCall::CreateWindow {
            title: title.to_string(),
            style,
            bounds,
            parent,
        });

        if style.child && !parent.is_valid() {
            return Err(CaptureError::Window("child window needs a parent".into()));
        }

        s.next_window += 1;
        let id = WindowId(0x1000 + s.next_window);
        s.windows.insert(
            id,
            SimulatedWindow {
                title: title.to_string(),
                bounds,
                parent,
                bound_slot: None,
                previewing: false,
                scaled: false,
                preview_rate_ms: 0,
                sequence: None,
            },
        );
        Ok(id)
    }

    fn send(&self, window: WindowId, command: &DriverCommand) -> Result<(), CaptureError> {
        let mut s = self.state.lock();
        s.calls.push(DriverCall::Send {
            window,
            command: command.clone(),
        });

        if s.failing.contains(&command.kind()) {
            return Err(rejected(command));
        }

        let installed = match command {
            DriverCommand::Connect { index } => s.slots.contains_key(index) && !s.busy.contains(index),
            _ => false,
        };
        let next_sequence = s.sequences + 1;

        let w = s.windows.get_mut(&window).ok_or_else(|| rejected(command))?;
        match command {
            DriverCommand::Connect { index } => {
                if !installed || w.bound_slot.is_some() {
                    return Err(rejected(command));
                }
                w.bound_slot = Some(*index);
            }
            DriverCommand::Disconnect { .. } => {
                if w.bound_slot.take().is_none() {
                    return Err(rejected(command));
                }
                w.previewing = false;
            }
            DriverCommand::SetPreview(on) => {
                if w.bound_slot.is_none() {
                    return Err(rejected(command));
                }
                w.previewing = *on;
            }
            DriverCommand::SetScale(on) => {
                if w.bound_slot.is_none() {
                    return Err(rejected(command));
                }
                w.scaled = *on;
            }
            DriverCommand::SetPreviewRate(ms) => {
                if w.bound_slot.is_none() {
                    return Err(rejected(command));
                }
                w.preview_rate_ms = *ms;
            }
            DriverCommand::StartSequence => {
                if w.bound_slot.is_none() {
                    return Err(rejected(command));
                }
                w.sequence = Some(next_sequence);
                s.sequences = next_sequence;
            }
            DriverCommand::SaveAs(path) => {
                let Some(sequence) = w.sequence else {
                    return Err(rejected(command));
                };
                let contents = format!("{} sequence {}\n", w.title, sequence);
                write_clip(path, &contents)?;
            }
        }
        Ok(())
    }

    fn resize_window(&self, window: WindowId, bounds: SurfaceBounds) -> Result<(), CaptureError> {
        let mut s = self.state.lock();
        s.calls.push(DriverCall::ResizeWindow { window, bounds });
        let w = s
            .windows
            .get_mut(&window)
            .ok_or_else(|| CaptureError::Window(format!("no capture window {:?}", window)))?;
        w.bounds = bounds;
        Ok(())
    }

    fn destroy_window(&self, window: WindowId) -> Result<(), CaptureError> {
        let mut s = self.state.lock();
        s.calls.push(DriverCall::DestroyWindow { window });
        if s.failing_destroy {
            return Err(CaptureError::Window(format!("could not destroy {:?}", window)));
        }
        s.windows
            .remove(&window)
            .map(|_| ())
            .ok_or_else(|| CaptureError::Window(format!("no capture window {:?}", window)))
    }
}

fn write_clip(path: &Path, contents: &str) -> Result<(), CaptureError> {
    fs::write(path, contents)
        .map_err(|e| CaptureError::StorageError(format!("failed to write {}: {}", path.display(), e)))
}
