//! # Errors
//!
//! Error kinds for every stage of a vipe run, plus the tagged outcome of an
//! editor process.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Result alias for vipe library operations.
pub type Result<T, E = VipeError> = std::result::Result<T, E>;

/// Everything that can go wrong between reading input and streaming it back.
#[derive(Debug, Error)]
pub enum VipeError {
    /// No temp file could be allocated
    #[error("Failed to create temp file in {}", dir.display())]
    CreateTemp {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input could not be buffered into the temp file
    #[error("Failed to write input to temp file {}", path.display())]
    WriteTemp {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The temp file could not be finalized before editing
    #[error("Failed to close temp file {}", path.display())]
    CloseTemp {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `$EDITOR` or `$VISUAL` is not a valid shell command line
    #[error("Invalid ${variable} value: {value:?} ({reason})")]
    EditorSpecParse {
        variable: &'static str,
        value: String,
        reason: &'static str,
    },

    /// No terminal to attach the editor to
    #[error("Failed to open terminal {}", device.display())]
    TerminalOpen {
        device: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The editor could not be started
    #[error("Failed to launch editor: {command}")]
    EditorExec {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The editor ran and reported failure
    #[error("Editor {command} exited with error ({status}), aborting")]
    EditorExitedNonZero { command: String, status: ExitStatus },

    /// The edited temp file could not be opened for reading
    #[error("Failed to reopen temp file {}", path.display())]
    ReopenTemp {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The edited contents could not be written to the output
    #[error("Failed to copy edited contents to output")]
    CopyOutput {
        #[source]
        source: io::Error,
    },
}

impl VipeError {
    /// Exit code of the editor, if it exited on its own with a non-zero code.
    ///
    /// `None` for every other kind, and for editors killed by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::EditorExitedNonZero { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// How an editor process ended.
///
/// Keeps "ran but failed" apart from "could not run at all" so callers can
/// decide whether the file may have been touched.
#[derive(Debug)]
pub enum EditorOutcome {
    /// Exited with status zero
    Success,
    /// Ran and exited non-zero (or was killed by a signal)
    RanButFailed(ExitStatus),
    /// Never started, or could not be waited on
    CouldNotRun(io::Error),
}

impl EditorOutcome {
    /// Classifies the result of `Command::status`.
    pub fn from_status(result: io::Result<ExitStatus>) -> Self {
        match result {
            Ok(status) if status.success() => Self::Success,
            Ok(status) => Self::RanButFailed(status),
            Err(err) => Self::CouldNotRun(err),
        }
    }

    /// Converts the outcome into a result, labelling errors with `command`.
    pub fn into_result(self, command: &str) -> Result<()> {
        match self {
            Self::Success => Ok(()),
            Self::RanButFailed(status) => Err(VipeError::EditorExitedNonZero {
                command: command.to_string(),
                status,
            }),
            Self::CouldNotRun(source) => Err(VipeError::EditorExec {
                command: command.to_string(),
                source,
            }),
        }
    }
}
