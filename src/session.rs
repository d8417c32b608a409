use serde::Serialize;

/// Hint echoed whenever the user needs reminding of the sentence shape the
/// parser accepts.
pub const FORMAT_HINT: &str = "Speak marks in format: \"Roll number X question Y Z marks\"";

const UNAVAILABLE_MSG: &str = "Speech capture is not supported in this environment";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Listening,
}

/// What the shell told us about the capture device at startup. Unknown means
/// `capture.init` has not arrived yet; start/stop stay inert until it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSupport {
    Unknown,
    Available,
    Unavailable,
}

/// One status-region update: message text, the binary error flag, and the
/// session state the shell styles from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub message: String,
    pub error: bool,
    pub state: &'static str,
}

/// Outcome of a start/stop transition: the status to show and the control
/// enablement the shell should apply. `inert` marks the no-op case where the
/// capture device is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub status: Status,
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub inert: bool,
}

/// Capture lifecycle state, owned by the dispatch loop. Mutated only by
/// `capture.init`, `session.start`, and `session.stop`.
#[derive(Debug)]
pub struct Session {
    pub phase: Phase,
    pub capture: CaptureSupport,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            capture: CaptureSupport::Unknown,
        }
    }

    pub fn status(&self, message: impl Into<String>, error: bool) -> Status {
        Status {
            message: message.into(),
            error,
            state: match self.phase {
                Phase::Idle => "idle",
                Phase::Listening => "listening",
            },
        }
    }

    pub fn is_listening(&self) -> bool {
        self.phase == Phase::Listening
    }

    fn capture_missing(&self) -> bool {
        !matches!(self.capture, CaptureSupport::Available)
    }

    /// Record the shell's one-time device report. Unavailability is reported
    /// as an error status exactly once, here.
    pub fn init_capture(&mut self, available: bool) -> Transition {
        self.capture = if available {
            CaptureSupport::Available
        } else {
            CaptureSupport::Unavailable
        };

        if available {
            Transition {
                status: self.status(format!("Ready. {}", FORMAT_HINT), false),
                start_enabled: true,
                stop_enabled: false,
                inert: false,
            }
        } else {
            Transition {
                status: self.status(UNAVAILABLE_MSG, true),
                start_enabled: false,
                stop_enabled: false,
                inert: false,
            }
        }
    }

    /// Idle -> Listening. Idempotent when already listening; inert when the
    /// capture device is missing.
    pub fn start(&mut self) -> Transition {
        if self.capture_missing() {
            return self.inert_transition();
        }

        self.phase = Phase::Listening;
        Transition {
            status: self.status(format!("Listening... {}", FORMAT_HINT), false),
            start_enabled: false,
            stop_enabled: true,
            inert: false,
        }
    }

    /// Listening -> Idle. Does not cancel pipelines already in flight; it
    /// only stops new utterances from being produced.
    pub fn stop(&mut self) -> Transition {
        if self.capture_missing() {
            return self.inert_transition();
        }

        self.phase = Phase::Idle;
        Transition {
            status: self.status("Recording stopped", false),
            start_enabled: true,
            stop_enabled: false,
            inert: false,
        }
    }

    fn inert_transition(&self) -> Transition {
        Transition {
            status: self.status(UNAVAILABLE_MSG, true),
            start_enabled: false,
            stop_enabled: false,
            inert: true,
        }
    }
}
