use crate::history::History;
use crate::jobs::BackgroundJobs;
use crate::HISTORY_LEN;
use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Mutable, user-level view of the process state used by the interpreter.
///
/// The environment contains:
/// - `vars`: variables set on top of the inherited process environment.
/// - `current_dir`: the working directory, kept in sync with the process one.
/// - `should_exit`: set by the `exit` builtin; the loop terminates once it sees it.
/// - `history`: the lines entered so far.
/// - `jobs`: background children that have not been reaped yet.
#[derive(Debug)]
pub struct Environment {
    /// Overrides applied on top of the process environment (e.g., PATH, HOME).
    ///
    /// Launched programs inherit the process environment untouched, plus these.
    pub vars: HashMap<String, String>,
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// When set to true, indicates that the interactive loop should exit.
    pub should_exit: bool,
    /// Bounded log of the lines handed to the interpreter.
    pub history: History,
    /// Children launched with a trailing `&`.
    pub jobs: BackgroundJobs,
}

impl Environment {
    /// Capture the current process state into a new `Environment` instance.
    ///
    /// No variables are copied; lookups fall through to the process environment.
    /// `current_dir` is initialized from `std::env::current_dir()`.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_vars(HashMap::new(), current_dir)
    }

    /// Build an environment from explicit variables and working directory.
    pub fn with_vars(vars: HashMap<String, String>, current_dir: PathBuf) -> Self {
        Self {
            vars,
            current_dir,
            should_exit: false,
            history: History::new(HISTORY_LEN),
            jobs: BackgroundJobs::default(),
        }
    }

    /// Get the value of an environment variable.
    ///
    /// Looks up the key in `self.vars` first, falling back to `std::env::var`.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .cloned()
            .or_else(|| stdenv::var(key).ok())
    }

    /// Like [`get_var`](Self::get_var), but keeps values that are not valid UTF-8.
    pub fn get_var_os(&self, key: &str) -> Option<OsString> {
        self.vars
            .get(key)
            .map(OsString::from)
            .or_else(|| stdenv::var_os(key))
    }

    /// Set or override an environment variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Change the working directory of the whole process.
    ///
    /// Relative targets are taken relative to `current_dir`. On failure nothing changes.
    pub fn change_dir(&mut self, target: &Path) -> io::Result<()> {
        let new_dir = if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.current_dir.join(target)
        };
        let canonical = fs::canonicalize(&new_dir)?;
        stdenv::set_current_dir(&canonical)?;
        self.current_dir = canonical;
        Ok(())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
