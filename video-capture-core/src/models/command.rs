use std::fmt;
use std::path::PathBuf;

/// Base of the capture-window message range (`WM_USER`).
pub const WM_CAP_START: u32 = 0x400;

pub const WM_CAP_DRIVER_CONNECT: u32 = WM_CAP_START + 10;
pub const WM_CAP_DRIVER_DISCONNECT: u32 = WM_CAP_START + 11;
pub const WM_CAP_FILE_SAVEAS: u32 = WM_CAP_START + 23;
pub const WM_CAP_SET_PREVIEW: u32 = WM_CAP_START + 50;
pub const WM_CAP_SET_PREVIEWRATE: u32 = WM_CAP_START + 52;
pub const WM_CAP_SET_SCALE: u32 = WM_CAP_START + 53;
pub const WM_CAP_SEQUENCE: u32 = WM_CAP_START + 62;

/// A command sent to a capture window.
///
/// Every variant maps to one integer-coded window message plus its `wParam`.
/// Only `SaveAs` carries an `lParam` payload (the destination path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCommand {
    /// Bind the capture window to the driver in the given slot.
    Connect { index: u8 },
    Disconnect { index: u8 },
    SetPreview(bool),
    /// Stretch the preview to the window's client area.
    SetScale(bool),
    /// Preview frame interval in milliseconds.
    SetPreviewRate(u32),
    /// Start streaming capture into the driver's capture file.
    StartSequence,
    /// Copy the captured sequence to `path`.
    SaveAs(PathBuf),
}

impl DriverCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Connect { .. } => CommandKind::Connect,
            Self::Disconnect { .. } => CommandKind::Disconnect,
            Self::SetPreview(_) => CommandKind::SetPreview,
            Self::SetScale(_) => CommandKind::SetScale,
            Self::SetPreviewRate(_) => CommandKind::SetPreviewRate,
            Self::StartSequence => CommandKind::StartSequence,
            Self::SaveAs(_) => CommandKind::SaveAs,
        }
    }

    /// Window message identifier for this command.
    pub fn message(&self) -> u32 {
        match self {
            Self::Connect { .. } => WM_CAP_DRIVER_CONNECT,
            Self::Disconnect { .. } => WM_CAP_DRIVER_DISCONNECT,
            Self::SetPreview(_) => WM_CAP_SET_PREVIEW,
            Self::SetScale(_) => WM_CAP_SET_SCALE,
            Self::SetPreviewRate(_) => WM_CAP_SET_PREVIEWRATE,
            Self::StartSequence => WM_CAP_SEQUENCE,
            Self::SaveAs(_) => WM_CAP_FILE_SAVEAS,
        }
    }

    /// `wParam` value sent with the message.
    pub fn wparam(&self) -> usize {
        match self {
            Self::Connect { index } | Self::Disconnect { index } => *index as usize,
            Self::SetPreview(on) | Self::SetScale(on) => usize::from(*on),
            Self::SetPreviewRate(ms) => *ms as usize,
            Self::StartSequence | Self::SaveAs(_) => 0,
        }
    }
}

/// Payload-free identifier of a [`DriverCommand`], used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Connect,
    Disconnect,
    SetPreview,
    SetScale,
    SetPreviewRate,
    StartSequence,
    SaveAs,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connect => "driver-connect",
            Self::Disconnect => "driver-disconnect",
            Self::SetPreview => "set-preview",
            Self::SetScale => "set-scale",
            Self::SetPreviewRate => "set-preview-rate",
            Self::StartSequence => "sequence",
            Self::SaveAs => "file-save-as",
        };
        f.write_str(name)
    }
}
