use std::fmt;

/// Capture session state machine.
///
/// State transitions:
/// ```text
/// idle ──connect──→ connected ──record──→ recording
///  ↑                   │                      │
///  └─────disconnect────┴──────stop_record─────┘
/// ```
///
/// `disconnect` is accepted from every state; `stop_record` is also accepted
/// from `connected`, in which case an empty sequence is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Connected,
    Recording,
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    /// Whether a capture window is expected to be alive in this state.
    pub fn holds_window(&self) -> bool {
        !self.is_idle()
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Connected => "connected",
            Self::Recording => "recording",
        };
        f.write_str(name)
    }
}
