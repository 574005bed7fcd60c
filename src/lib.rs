//! # vipe
//!
//! Edit the data flowing through a shell pipeline.
//!
//! Input is buffered into a temp file, the user's editor is opened on it with
//! the terminal attached, and the edited contents are streamed back out.
//!
//! ## Features
//!
//! - **Byte Transparent**: Input is copied verbatim, no encoding or line-ending changes
//! - **Editor Choice**: `$VISUAL`, then `$EDITOR` (shell-quoted), then `vi`
//! - **Terminal Aware**: The editor talks to the controlling terminal even when stdin/stdout are pipes
//! - **No Leftovers**: The temp file is removed on success and on every failure
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod capture;
pub mod constants;
pub mod editor;
pub mod error;
pub mod pipeline;
pub mod terminal;

pub use capture::{capture, capture_in};
pub use editor::{edit_file, EditorCommand, EditorEnv};
pub use error::{EditorOutcome, Result, VipeError};
pub use pipeline::{EditedFile, Vipe};
pub use terminal::{Terminal, TerminalSource};
