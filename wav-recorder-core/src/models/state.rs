/// Recording session state machine.
///
/// State transitions:
/// ```text
/// idle → recording → finalizing → stopped
///            ↑                       │
///            └───────── start ───────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    /// `stop()` was accepted and the finalize pipeline is still running.
    Finalizing,
    Stopped,
}

impl RecorderState {
    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_finalizing(&self) -> bool {
        matches!(self, Self::Finalizing)
    }

    /// Whether `start()` is accepted from this state.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle | Self::Stopped)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Finalizing => "finalizing",
            Self::Stopped => "stopped",
        }
    }
}
