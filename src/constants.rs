//! # Constants
//!
//! Centralized constants for magic values used throughout vipe.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

// =============================================================================
// Editor Resolution
// =============================================================================

/// Editor used when neither `$VISUAL` nor `$EDITOR` is set.
pub const DEFAULT_EDITOR: &str = "vi";

/// Environment variable naming the line-oriented editor.
pub const ENV_EDITOR: &str = "EDITOR";

/// Environment variable naming the screen-oriented editor (wins over `$EDITOR`).
pub const ENV_VISUAL: &str = "VISUAL";

// =============================================================================
// Terminal
// =============================================================================

/// Controlling terminal device (Unix).
pub const UNIX_TTY_PATH: &str = "/dev/tty";

/// Console input device (Windows).
pub const WINDOWS_CONSOLE_INPUT: &str = "CONIN$";

/// Console output device (Windows).
pub const WINDOWS_CONSOLE_OUTPUT: &str = "CONOUT$";

// =============================================================================
// File System
// =============================================================================

/// Prefix for temp file names.
pub const TEMP_FILE_PREFIX: &str = "vipe-";

// =============================================================================
// Logging
// =============================================================================

/// Environment variable holding the `env_logger` filter (e.g. `debug`).
pub const LOG_ENV: &str = "VIPE_LOG";
