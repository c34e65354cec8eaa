/// Client-area size of a display surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceBounds {
    pub width: i32,
    pub height: i32,
}

impl SurfaceBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are positive.
    pub fn is_visible(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Opaque platform window handle of a host surface. Zero is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativeHandle(pub isize);

impl NativeHandle {
    pub const INVALID: NativeHandle = NativeHandle(0);

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

/// Handle of a capture window created by a driver. Zero is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub isize);

impl WindowId {
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

/// Window style bits for a new capture window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStyle {
    pub child: bool,
    pub visible: bool,
}

impl WindowStyle {
    pub const WS_CHILD: u32 = 0x4000_0000;
    pub const WS_VISIBLE: u32 = 0x1000_0000;

    /// A visible child of the host surface, which is how previews are embedded.
    pub const EMBEDDED: WindowStyle = WindowStyle {
        child: true,
        visible: true,
    };

    pub fn bits(&self) -> u32 {
        let mut bits = 0;
        if self.child {
            bits |= Self::WS_CHILD;
        }
        if self.visible {
            bits |= Self::WS_VISIBLE;
        }
        bits
    }
}
