//! # Terminal
//!
//! Scoped access to the terminal the editor talks to. The process's own stdin
//! and stdout are usually pipes, so the editor is wired to the controlling
//! terminal device instead.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    fmt,
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
    process::Stdio,
};

use log::debug;

use crate::error::{Result, VipeError};

/// Where the editor's input and output come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TerminalSource {
    /// The controlling terminal of the session
    #[default]
    Controlling,
    /// A specific device opened for both reading and writing
    Device(PathBuf),
}

impl TerminalSource {
    /// Opens the terminal. The handle is released when the returned value drops.
    pub fn open(&self) -> Result<Terminal> {
        let terminal = match self {
            Self::Controlling => Terminal::controlling(),
            Self::Device(path) => Terminal::device(path),
        }?;
        debug!("Opened terminal {self}");
        Ok(terminal)
    }
}

impl fmt::Display for TerminalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Controlling => f.write_str("controlling terminal"),
            Self::Device(path) => write!(f, "{}", path.display()),
        }
    }
}

/// An open terminal, split into its input and output sides.
///
/// Both handles close when this value is dropped.
#[derive(Debug)]
pub struct Terminal {
    input: File,
    output: File,
}

impl Terminal {
    #[cfg(unix)]
    fn controlling() -> Result<Self> {
        Self::device(Path::new(crate::constants::UNIX_TTY_PATH))
    }

    #[cfg(windows)]
    fn controlling() -> Result<Self> {
        use crate::constants::{WINDOWS_CONSOLE_INPUT, WINDOWS_CONSOLE_OUTPUT};

        let input = open_rw(Path::new(WINDOWS_CONSOLE_INPUT))?;
        let output = open_rw(Path::new(WINDOWS_CONSOLE_OUTPUT))?;
        Ok(Self { input, output })
    }

    fn device(path: &Path) -> Result<Self> {
        let input = open_rw(path)?;
        let output = input.try_clone().map_err(|source| VipeError::TerminalOpen {
            device: path.to_path_buf(),
            source,
        })?;
        Ok(Self { input, output })
    }

    /// Hands both sides to a child process as its stdin and stdout.
    ///
    /// The terminal is released once the returned handles are dropped.
    pub fn into_stdio(self) -> (Stdio, Stdio) {
        (Stdio::from(self.input), Stdio::from(self.output))
    }
}

fn open_rw(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| VipeError::TerminalOpen {
            device: path.to_path_buf(),
            source,
        })
}
