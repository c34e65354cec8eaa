use std::path::PathBuf;

/// File name the captured sequence is saved under.
pub const DEFAULT_CLIP_NAME: &str = "Clip.avi";

/// Preview frame interval in milliseconds.
pub const DEFAULT_PREVIEW_RATE_MS: u32 = 30;

/// Configuration for a capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfiguration {
    /// Preview frame interval in milliseconds (default: 30).
    pub preview_rate_ms: u32,

    /// Stretch the preview to fit the capture window (default: true).
    pub scale_preview: bool,

    /// Name of the saved clip (default: `Clip.avi`).
    pub clip_file_name: String,

    /// Directory the clip is saved to, or None for the directory of the
    /// running executable.
    pub output_directory: Option<PathBuf>,

    /// Write `<clip>.metadata.json` next to the clip after each save.
    pub write_metadata: bool,
}

impl SessionConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=1000).contains(&self.preview_rate_ms) {
            return Err(format!("unsupported preview rate: {} ms", self.preview_rate_ms));
        }
        if self.clip_file_name.is_empty() {
            return Err("clip file name must not be empty".into());
        }
        if self.clip_file_name.contains(['/', '\\']) {
            return Err(format!(
                "clip file name must not contain a path separator: {}",
                self.clip_file_name
            ));
        }
        Ok(())
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            preview_rate_ms: DEFAULT_PREVIEW_RATE_MS,
            scale_preview: true,
            clip_file_name: DEFAULT_CLIP_NAME.into(),
            output_directory: None,
            write_metadata: false,
        }
    }
}
