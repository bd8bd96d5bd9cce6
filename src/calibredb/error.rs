//! Error taxonomy for calibredb invocations.
//!
//! Validation failures are detected before any process exists; everything
//! in the execution family has already run the failure callback by the time
//! the caller sees it.

use std::time::Duration;
use thiserror::Error;

/// Errors produced while validating, running or decoding a calibredb call.
#[derive(Error, Debug)]
pub enum CalibreError {
    /// One or more mandatory option fields were empty.
    #[error("{command}: missing required field(s): {}", fields.join(", "))]
    MissingRequiredField {
        command: &'static str,
        fields: Vec<&'static str>,
    },

    /// The executable could not be started (not found, not executable, ...).
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process outlived the configured timeout and was killed.
    #[error("{program} timed out after {}s: {message}", after.as_secs())]
    Timeout {
        program: String,
        after: Duration,
        message: String,
    },

    /// The process exited unsuccessfully. `message` is the classified last line.
    #[error("{message}")]
    Command { message: String, status: Option<i32> },

    /// Invalid construction-time configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Machine-readable output could not be decoded.
    #[error("failed to decode calibredb output: {0}")]
    Decode(#[from] serde_json::Error),

    /// The blocking wrapper could not build its runtime.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Coarse classification used by callers (CLI exit codes, HTTP status).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    Execution,
    Config,
    Decode,
}

impl CalibreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CalibreError::MissingRequiredField { .. } => ErrorKind::Validation,
            CalibreError::Spawn { .. }
            | CalibreError::Timeout { .. }
            | CalibreError::Command { .. }
            | CalibreError::Runtime(_) => ErrorKind::Execution,
            CalibreError::Config(_) => ErrorKind::Config,
            CalibreError::Decode(_) => ErrorKind::Decode,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Exit status of the tool, when it ran to completion.
    pub fn exit_status(&self) -> Option<i32> {
        match self {
            CalibreError::Command { status, .. } => *status,
            _ => None,
        }
    }
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Execution => "execution",
            ErrorKind::Config => "config",
            ErrorKind::Decode => "decode",
        }
    }

    /// Status an HTTP facade should answer with.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Execution | ErrorKind::Config => 500,
            ErrorKind::Decode => 502,
        }
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Execution => 1,
        ErrorKind::Validation => 2,
        ErrorKind::Config => 3,
        ErrorKind::Decode => 4,
    }
}

pub type Result<T> = std::result::Result<T, CalibreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_carries_marker() {
        let err = CalibreError::MissingRequiredField {
            command: "add",
            fields: vec!["files"],
        };
        assert_eq!(err.to_string(), "add: missing required field(s): files");
        assert!(err.to_string().contains("required"));
        assert!(err.is_validation());
    }

    #[test]
    fn command_error_displays_only_the_message() {
        let err = CalibreError::Command {
            message: "apsw.ConstraintError: UNIQUE constraint failed".into(),
            status: Some(1),
        };
        assert_eq!(
            err.to_string(),
            "apsw.ConstraintError: UNIQUE constraint failed"
        );
        assert_eq!(err.kind(), ErrorKind::Execution);
        assert_eq!(err.exit_status(), Some(1));
    }

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Execution, 1),
            (ErrorKind::Validation, 2),
            (ErrorKind::Config, 3),
            (ErrorKind::Decode, 4),
        ];
        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn validation_maps_to_client_error() {
        assert_eq!(ErrorKind::Validation.http_status(), 400);
        assert!(ErrorKind::Execution.http_status() >= 500);
    }
}
