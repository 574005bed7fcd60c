//! # Temp Capture
//!
//! Buffers an input stream into a freshly created temp file.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    env,
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use log::debug;
use tempfile::TempPath;

use crate::{
    constants::TEMP_FILE_PREFIX,
    error::{Result, VipeError},
};

/// Copies `input` into a new temp file in the system temp directory.
///
/// See [`capture_in`].
pub fn capture<R: Read>(input: R) -> Result<TempPath> {
    capture_in(&env::temp_dir(), input)
}

/// Copies `input` byte-for-byte into a new, uniquely named file in `dir`.
///
/// The returned [`TempPath`] owns the file: it is deleted when the path is
/// dropped. The file is also deleted when any step here fails, so a failed
/// capture leaves nothing behind.
pub fn capture_in<R: Read>(dir: &Path, input: R) -> Result<TempPath> {
    capture_through(dir, input, |file| file)
}

/// Creates the temp file and fills it through the writer `wrap` builds
/// around it.
fn capture_through<R, W, F>(dir: &Path, mut input: R, wrap: F) -> Result<TempPath>
where
    R: Read,
    W: Write,
    F: FnOnce(File) -> W,
{
    let file = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .tempfile_in(dir)
        .map_err(|source| VipeError::CreateTemp {
            dir: dir.to_path_buf(),
            source,
        })?;

    // From here on `path` removes the file when dropped
    let (file, path) = file.into_parts();

    let bytes = fill(&path, &mut input, wrap(file))?;

    debug!("Captured {bytes} bytes into {}", path.display());
    Ok(path)
}

/// Copies `input` into `sink`, then flushes and closes it.
fn fill<R: Read, W: Write>(path: &Path, input: &mut R, sink: W) -> Result<u64> {
    let close_failed = |source| VipeError::CloseTemp {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(sink);
    let bytes = io::copy(input, &mut writer).map_err(|source| VipeError::WriteTemp {
        path: path.to_path_buf(),
        source,
    })?;

    // Flushing is the last write; the handle is closed when `sink` drops
    let mut sink = writer
        .into_inner()
        .map_err(|err| close_failed(err.into_error()))?;
    sink.flush().map_err(close_failed)?;
    drop(sink);

    Ok(bytes)
}
