//! # Pipeline
//!
//! Ties the stages together: capture input, edit it, stream the result back
//! and remove the temp file.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    ffi::OsString,
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use tempfile::TempPath;

use crate::{
    capture::{capture, capture_in},
    editor::{self, EditorCommand, EditorEnv},
    error::{Result, VipeError},
    terminal::TerminalSource,
};

/// Options for one edit of piped data.
///
/// ```no_run
/// use std::io;
///
/// vipe::Vipe::new()
///     .args(["+1"])
///     .run(io::stdin().lock(), io::stdout().lock())?;
/// # Ok::<(), vipe::VipeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vipe {
    args: Vec<OsString>,
    env: Option<EditorEnv>,
    terminal: TerminalSource,
    temp_dir: Option<PathBuf>,
}

impl Vipe {
    /// Defaults: no extra args, process environment, controlling terminal,
    /// system temp directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra editor arguments, placed before the file path.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve the editor from this snapshot instead of the process environment.
    #[must_use]
    pub fn env(mut self, env: EditorEnv) -> Self {
        self.env = Some(env);
        self
    }

    /// Where the editor reads and writes.
    #[must_use]
    pub fn terminal(mut self, terminal: TerminalSource) -> Self {
        self.terminal = terminal;
        self
    }

    /// Directory for the temp file.
    #[must_use]
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// The editor this run would launch.
    pub fn editor(&self) -> Result<EditorCommand> {
        match &self.env {
            Some(env) => EditorCommand::resolve(env),
            None => EditorCommand::resolve(&EditorEnv::from_process()),
        }
    }

    /// Runs the editor on an existing file. The caller keeps the file.
    pub fn edit_file(&self, path: &Path) -> Result<()> {
        let command = self.editor()?;
        editor::run(&command, &self.terminal, path, &self.args)
    }

    /// Captures `input` into a temp file, lets the user edit it and returns
    /// the result opened for reading from the start.
    ///
    /// On any error the temp file has already been removed.
    pub fn edit<R: Read>(&self, input: R) -> Result<EditedFile> {
        let path = match &self.temp_dir {
            Some(dir) => capture_in(dir, input)?,
            None => capture(input)?,
        };

        if let Err(err) = self.edit_file(&path) {
            discard(path);
            return Err(err);
        }

        match File::open(&path) {
            Ok(file) => Ok(EditedFile { file, path }),
            Err(source) => {
                let err = VipeError::ReopenTemp {
                    path: path.to_path_buf(),
                    source,
                };
                discard(path);
                Err(err)
            }
        }
    }

    /// Full pipeline: edit `input` and copy the result to `output`.
    ///
    /// Nothing is written to `output` unless the editor succeeded. The temp
    /// file is removed before returning, whatever the outcome. Returns the
    /// number of bytes written.
    pub fn run<R: Read, W: Write>(&self, input: R, mut output: W) -> Result<u64> {
        let mut edited = self.edit(input)?;

        let copied = io::copy(&mut edited, &mut output).and_then(|n| output.flush().map(|()| n));
        edited.close();

        let bytes = copied.map_err(|source| VipeError::CopyOutput { source })?;
        debug!("Streamed {bytes} bytes to output");
        Ok(bytes)
    }
}

/// An edited temp file, open for reading.
///
/// The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct EditedFile {
    // Declared before `path` so the handle closes before the file is removed
    file: File,
    path: TempPath,
}

impl EditedFile {
    /// Location of the temp file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes and deletes the file, logging (not returning) a failed delete.
    pub fn close(self) {
        let Self { file, path } = self;
        drop(file);
        discard(path);
    }
}

impl Read for EditedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

/// Best-effort removal of a temp file.
fn discard(path: TempPath) {
    let shown = path.display().to_string();
    match path.close() {
        Ok(()) => debug!("Removed {shown}"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!("Failed to remove temp file {shown}: {err}"),
    }
}
