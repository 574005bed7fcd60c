//! # Editor Session
//!
//! Resolves the user's preferred editor and runs it on a file, attached to the
//! terminal.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    collections::HashMap,
    env,
    ffi::{OsStr, OsString},
    fmt,
    path::Path,
    process::{Command, Stdio},
};

use log::debug;

use crate::{
    constants::{DEFAULT_EDITOR, ENV_EDITOR, ENV_VISUAL},
    error::{EditorOutcome, Result, VipeError},
    terminal::TerminalSource,
};

// =============================================================================
// Environment Snapshot
// =============================================================================

/// The environment variables that pick the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorEnv {
    vars: HashMap<&'static str, OsString>,
}

impl EditorEnv {
    /// Snapshot of `$EDITOR` and `$VISUAL` from the running process.
    pub fn from_process() -> Self {
        Self::from_lookup(env::var_os)
    }

    /// Builds a snapshot from any name/value mapping. Other names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OsString>,
    {
        let mut map: HashMap<String, OsString> = vars
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.into()))
            .collect();
        Self::from_lookup(|name| map.remove(name))
    }

    fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&'static str) -> Option<OsString>,
    {
        let vars = [ENV_EDITOR, ENV_VISUAL]
            .into_iter()
            .filter_map(|name| lookup(name).map(|value| (name, value)))
            .filter(|(_, value)| !value.is_empty())
            .collect();
        Self { vars }
    }

    /// Value of a variable, if set and non-empty.
    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.vars.get(name).map(OsString::as_os_str)
    }
}

// =============================================================================
// Editor Command
// =============================================================================

/// A resolved editor: program plus the arguments it always gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    /// Picks the editor from the environment.
    ///
    /// The editor is determined by (in order of priority):
    /// 1. `$VISUAL`
    /// 2. `$EDITOR`
    /// 3. Fallback to `vi`
    ///
    /// Variables are split with shell quoting rules, so `"my editor" --flag`
    /// is the program `my editor` with one argument.
    ///
    /// Every variable that is set must parse, even one that gets overridden.
    pub fn resolve(env: &EditorEnv) -> Result<Self> {
        let mut editor = Self::default();
        for name in [ENV_EDITOR, ENV_VISUAL] {
            if let Some(value) = env.get(name) {
                editor = Self::parse(name, value)?;
            }
        }
        Ok(editor)
    }

    fn parse(variable: &'static str, value: &OsStr) -> Result<Self> {
        let invalid = |reason| VipeError::EditorSpecParse {
            variable,
            value: value.to_string_lossy().into_owned(),
            reason,
        };

        let value = value.to_str().ok_or_else(|| invalid("not valid UTF-8"))?;
        let parts = shlex::split(value).ok_or_else(|| invalid("unbalanced quotes"))?;
        let (program, args) = parts.split_first().ok_or_else(|| invalid("empty command"))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Program to execute.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments taken from the environment variable.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Full invocation: program, its own args, `extra`, then `path` last.
    pub fn argv<S: AsRef<OsStr>>(&self, extra: &[S], path: &Path) -> Vec<OsString> {
        std::iter::once(OsString::from(&self.program))
            .chain(self.args.iter().map(OsString::from))
            .chain(extra.iter().map(|arg| arg.as_ref().to_os_string()))
            .chain(std::iter::once(path.as_os_str().to_os_string()))
            .collect()
    }

    fn command<S: AsRef<OsStr>>(&self, extra: &[S], path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).args(extra).arg(path);
        cmd
    }
}

impl Default for EditorCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_EDITOR.to_string(),
            args: Vec::new(),
        }
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Session
// =============================================================================

/// Runs `editor` on `path` and waits for it to exit.
///
/// The editor's stdin and stdout are bound to `terminal`; its stderr is ours.
/// `extra` goes between the editor's own args and the path. The terminal is
/// held only for the life of the editor and released on every return.
pub fn run<S: AsRef<OsStr>>(
    editor: &EditorCommand,
    terminal: &TerminalSource,
    path: &Path,
    extra: &[S],
) -> Result<()> {
    let command = editor.to_string();
    let (stdin, stdout) = terminal.open()?.into_stdio();

    // `cmd` owns the terminal handles; both are released at the end of this block
    let outcome = {
        let mut cmd = editor.command(extra, path);
        cmd.stdin(stdin).stdout(stdout).stderr(Stdio::inherit());
        debug!("Launching {command} on {} ({terminal})", path.display());
        EditorOutcome::from_status(cmd.status())
    };

    debug!("Editor finished: {outcome:?}");
    outcome.into_result(&command)
}

/// Opens an existing file in the editor picked by the process environment,
/// attached to the controlling terminal.
///
/// The caller keeps ownership of the file.
pub fn edit_file<S: AsRef<OsStr>>(path: &Path, extra: &[S]) -> Result<()> {
    let editor = EditorCommand::resolve(&EditorEnv::from_process())?;
    run(&editor, &TerminalSource::Controlling, path, extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ARGS: &[&str] = &[];

    fn resolve(vars: &[(&str, &str)]) -> Result<EditorCommand> {
        EditorCommand::resolve(&EditorEnv::from_vars(vars.iter().copied()))
    }

    #[test]
    fn test_default_editor() {
        let editor = resolve(&[]).unwrap();
        assert_eq!(editor.program(), "vi");
        assert!(editor.args().is_empty());
        assert_eq!(editor.to_string(), "vi");
    }

    #[test]
    fn test_editor_overrides_default() {
        let editor = resolve(&[("EDITOR", "ed1 -x")]).unwrap();
        assert_eq!(editor.program(), "ed1");
        assert_eq!(editor.args(), ["-x"]);
    }

    #[test]
    fn test_visual_beats_editor() {
        let editor = resolve(&[("EDITOR", "ed1 -x"), ("VISUAL", "ed2 -y")]).unwrap();
        assert_eq!(editor.to_string(), "ed2 -y");
    }

    #[test]
    fn test_empty_values_are_unset() {
        let editor = resolve(&[("EDITOR", "ed1"), ("VISUAL", "")]).unwrap();
        assert_eq!(editor.program(), "ed1");

        let editor = resolve(&[("EDITOR", ""), ("VISUAL", "")]).unwrap();
        assert_eq!(editor.program(), "vi");
    }

    #[test]
    fn test_unrelated_vars_ignored() {
        let editor = resolve(&[("GIT_EDITOR", "nano"), ("PAGER", "less")]).unwrap();
        assert_eq!(editor, EditorCommand::default());
    }

    #[test]
    fn test_quoted_program() {
        let editor = resolve(&[("EDITOR", "\"my editor\" --flag")]).unwrap();
        assert_eq!(editor.program(), "my editor");
        assert_eq!(editor.args(), ["--flag"]);
    }

    #[test]
    fn test_quoted_argument() {
        let editor = resolve(&[("VISUAL", "nvim -c ':normal G'")]).unwrap();
        assert_eq!(editor.args(), ["-c", ":normal G"]);
    }

    #[test]
    fn test_unbalanced_quotes_fail() {
        let err = resolve(&[("VISUAL", "\"vim -u")]).unwrap_err();
        match err {
            VipeError::EditorSpecParse {
                variable, reason, ..
            } => {
                assert_eq!(variable, "VISUAL");
                assert_eq!(reason, "unbalanced quotes");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_visual_fails_even_with_good_editor() {
        let err = resolve(&[("EDITOR", "nano"), ("VISUAL", "'vim")]).unwrap_err();
        assert!(matches!(err, VipeError::EditorSpecParse { .. }));
    }

    #[test]
    fn test_bad_editor_fails_even_with_good_visual() {
        let err = resolve(&[("EDITOR", "\"bad"), ("VISUAL", "vim")]).unwrap_err();
        match err {
            VipeError::EditorSpecParse { variable, .. } => assert_eq!(variable, "EDITOR"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_only_is_empty_command() {
        let err = resolve(&[("EDITOR", "   ")]).unwrap_err();
        assert!(err.to_string().contains("empty command"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_value_fails() {
        use std::os::unix::ffi::OsStringExt;

        let env = EditorEnv::from_vars([("EDITOR", OsString::from_vec(vec![b'v', 0xff]))]);
        let err = EditorCommand::resolve(&env).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_argv_puts_path_last() {
        let editor = resolve(&[("EDITOR", "vim -n")]).unwrap();
        let argv = editor.argv(&["+10"], Path::new("/tmp/xyz"));
        assert_eq!(argv, ["vim", "-n", "+10", "/tmp/xyz"]);
    }

    #[test]
    fn test_argv_without_extra_args() {
        let argv = EditorCommand::default().argv(NO_ARGS, Path::new("/tmp/xyz"));
        assert_eq!(argv, ["vi", "/tmp/xyz"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_terminal_released_when_editor_exits() {
        use std::fs;

        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("fake-tty");
        fs::write(&device, "").unwrap();
        let device = fs::canonicalize(device).unwrap();

        let editor = EditorCommand {
            program: "true".to_string(),
            args: Vec::new(),
        };
        let terminal = TerminalSource::Device(device.clone());
        run(&editor, &terminal, &dir.path().join("file"), NO_ARGS).unwrap();

        let still_open = fs::read_dir("/proc/self/fd")
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| fs::read_link(entry.path()).ok())
            .any(|target| target == device);
        assert!(!still_open, "terminal handle outlived the editor");
    }

    #[test]
    fn test_terminal_failure_launches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let editor = EditorCommand {
            program: "touch".to_string(),
            args: vec![marker.to_string_lossy().into_owned()],
        };
        let terminal = TerminalSource::Device(dir.path().join("missing-tty"));

        let err = run(&editor, &terminal, &dir.path().join("file"), NO_ARGS).unwrap_err();

        assert!(matches!(err, VipeError::TerminalOpen { .. }));
        assert!(!marker.exists());
    }
}
