use crate::command::{CommandFactory, ExecutableCommand, ExecutionMode, ExitCode, Stdin, Stdout};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::Result;
use log::{debug, warn};
use std::ffi::{OsStr, OsString};
use std::io::{Read, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins run in-process without spawning a child and always run in the
/// foreground; a trailing `&` is accepted and ignored. They take no options, every
/// argument is passed through verbatim.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name() -> &'static str;

    /// Builds the command from the words that followed its name.
    fn from_args(args: &[&OsStr]) -> Self;

    /// Executes the command using provided IO streams and environment.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(
        self,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        mut stdin: Box<dyn Stdin>,
        mut stdout: Box<dyn Stdout>,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let code = match BuiltinCommand::execute(*self, &mut stdin, &mut stdout, env) {
            Ok(x) => x,
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                1
            }
        };
        stdout.flush()?;
        Ok(code)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &OsStr,
        args: &[&OsStr],
        _mode: ExecutionMode,
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            debug!("builtin {} with {} argument(s)", T::name(), args.len());
            Some(Box::new(T::from_args(args)))
        } else {
            None
        }
    }
}

/// Print the current working directory to standard output.
pub struct Pwd;

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn from_args(_args: &[&OsStr]) -> Self {
        Pwd
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        writeln!(stdout, "{}", env.current_dir.to_string_lossy())?;
        Ok(0)
    }
}

/// Change the current working directory.
///
/// If no target is provided, changes to the directory named by `HOME`. A failed
/// change prints nothing; the directory simply stays where it was.
pub struct Cd {
    /// Directory to switch to; absolute or relative to the current directory.
    pub target: Option<OsString>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn from_args(args: &[&OsStr]) -> Self {
        Cd {
            target: args.first().map(|s| s.to_os_string()),
        }
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        _stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let target = match self.target {
            Some(t) => PathBuf::from(t),
            None => match env.get_var_os("HOME") {
                Some(home) => PathBuf::from(home),
                None => {
                    warn!("cd: no target and HOME not set");
                    return Ok(1);
                }
            },
        };

        match env.change_dir(&target) {
            Ok(()) => Ok(0),
            Err(e) => {
                warn!("cd: can't chdir to {}: {}", target.display(), e);
                Ok(1)
            }
        }
    }
}

/// Exit the shell process with status 0, ignoring any arguments.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn from_args(_args: &[&OsStr]) -> Self {
        Exit
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        _stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        env.should_exit = true;
        Ok(0)
    }
}

/// Write the arguments to standard output, separated by spaces.
///
/// Prints nothing at all, not even a newline, when there are no arguments.
pub struct Echo {
    /// Values to print as-is, separated by spaces.
    pub args: Vec<OsString>,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn from_args(args: &[&OsStr]) -> Self {
        Echo {
            args: args.iter().map(|s| s.to_os_string()).collect(),
        }
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        if self.args.is_empty() {
            return Ok(0);
        }
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                stdout.write_all(b" ")?;
            }
            stdout.write_all(arg.as_bytes())?;
        }
        stdout.write_all(b"\n")?;
        Ok(0)
    }
}

/// Print the recorded command lines, oldest first.
pub struct ShowHistory;

impl BuiltinCommand for ShowHistory {
    fn name() -> &'static str {
        "history"
    }

    fn from_args(_args: &[&OsStr]) -> Self {
        ShowHistory
    }

    fn execute(
        self,
        _stdin: &mut dyn Read,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        for line in env.history.all() {
            stdout.write_all(line.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
        Ok(0)
    }
}
