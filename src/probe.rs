use crate::config::Target;
use std::fmt;

#[derive(Clone, Debug)]
pub struct RawProbeResult {
    pub target: Target,
    pub raw_text: String,
    pub process_error: Option<ProbeError>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ProbeErrorKind {
    Timeout,
    NonZeroExit,
    Io,
}

impl ProbeErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProbeErrorKind::Timeout => "timeout",
            ProbeErrorKind::NonZeroExit => "nonzero_exit",
            ProbeErrorKind::Io => "io_error",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProbeError {
    pub kind: ProbeErrorKind,
    pub message: String,
}

impl ProbeError {
    pub fn new(kind: ProbeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

impl std::error::Error for ProbeError {}
