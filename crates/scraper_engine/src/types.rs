use std::fmt;

use thiserror::Error;

/// Coarse error taxonomy: the network failed, or the response had the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transport,
    Protocol,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidRequest,
    MalformedResponse,
    EmptyTaskId,
}

impl FailureKind {
    pub fn class(&self) -> ErrorClass {
        match self {
            FailureKind::InvalidUrl
            | FailureKind::HttpStatus(_)
            | FailureKind::Timeout
            | FailureKind::Network => ErrorClass::Transport,
            FailureKind::InvalidRequest
            | FailureKind::MalformedResponse
            | FailureKind::EmptyTaskId => ErrorClass::Protocol,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::EmptyTaskId => write!(f, "empty task id"),
        }
    }
}
