use crate::command::{CommandFactory, ExecutionMode, ExitCode, Stdin, Stdout};
use crate::env::Environment;
use crate::errors::ShellError;
use crate::history::History;
use crate::input::{self, LineSource, ReadOutcome};
use crate::lexer;
use log::debug;
use std::ffi::OsStr;
use std::io::Read;
use std::process::Stdio;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate: the builtins and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// The interpreter maintains an [`Environment`] and a list of [`CommandFactory`] objects
/// that are queried in order to create commands by name. See [`default_factories`] for
/// the factories included out of the box.
///
/// Each line goes through the same steps: it is recorded in the history, split into
/// words, checked for a trailing `&`, and finally handed to the first factory that
/// recognizes its first word.
///
/// Example
/// ```
/// use dsh::Interpreter;
/// let mut sh = Interpreter::default();
/// let code = sh.execute_line("echo hello world").unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(sh.history().all().collect::<Vec<_>>(), ["echo hello world"]);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self::with_environment(Environment::new(), commands)
    }

    /// Create an interpreter around an existing environment.
    pub fn with_environment(env: Environment, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { env, commands }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn history(&self) -> &History {
        &self.env.history
    }

    /// True once the `exit` builtin ran.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Execute one trimmed input line with the process's standard streams.
    pub fn execute_line(&mut self, line: impl AsRef<OsStr>) -> anyhow::Result<ExitCode> {
        self.execute_line_with_streams(
            line.as_ref(),
            Box::new(InheritedStdin),
            Box::new(std::io::stdout()),
        )
    }

    /// Execute one trimmed input line with explicit standard streams.
    ///
    /// The line is recorded before anything else happens, so failing commands
    /// show up in `history` too. A line made only of `&` runs nothing.
    pub fn execute_line_with_streams(
        &mut self,
        line: &OsStr,
        stdin: Box<dyn Stdin>,
        stdout: Box<dyn Stdout>,
    ) -> anyhow::Result<ExitCode> {
        self.env.history.record(line);

        let mut tokens = lexer::split_into_tokens(line);
        let mode = lexer::take_execution_mode(&mut tokens);
        debug!("tokens = {:?}, mode = {:?}", tokens, mode);

        let Some((name, rest)) = tokens.split_first() else {
            return Ok(0);
        };
        let args: Vec<&OsStr> = rest.iter().map(|arg| arg.as_os_str()).collect();
        self.dispatch(name, &args, mode, stdin, stdout)
    }

    fn dispatch(
        &mut self,
        name: &OsStr,
        args: &[&OsStr],
        mode: ExecutionMode,
        stdin: Box<dyn Stdin>,
        stdout: Box<dyn Stdout>,
    ) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args, mode) {
                return cmd.execute(stdin, stdout, &mut self.env);
            }
        }
        Err(ShellError::CommandNotFound(name.to_string_lossy().into_owned()).into())
    }

    /// Read-Eval-Print Loop.
    ///
    /// Shows `prompt`, reads a line from `source`, and executes it until `exit`
    /// runs or the source is exhausted. Errors of a single line are printed and
    /// the loop goes on; only failures of the source itself are returned.
    pub fn repl(&mut self, source: &mut dyn LineSource, prompt: &str) -> anyhow::Result<()> {
        while !self.env.should_exit {
            self.env.jobs.reap();

            let raw = match source.read_line(prompt)? {
                ReadOutcome::Line(raw) => raw,
                ReadOutcome::TooLong => {
                    println!("{}", ShellError::InputTooLong);
                    continue;
                }
                ReadOutcome::Eof => break,
            };
            let Some(line) = input::prepare_line(&raw) else {
                continue;
            };

            if let Err(err) = self.execute_line(line) {
                report(&err);
            }
        }
        Ok(())
    }
}

/// Prints a failed line's error the way the user expects to see it.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ShellError>() {
        Some(ShellError::Spawn { .. }) => eprintln!("{err}"),
        Some(shell_err) => println!("{shell_err}"),
        None => eprintln!("dsh: {err:#}"),
    }
}

/// The standard set of commands:
/// - built-ins: `cd`, `pwd`, `echo`, `history`, `exit`
/// - external command launcher, consulted last
pub fn default_factories() -> Vec<Box<dyn CommandFactory>> {
    use crate::builtin::*;
    use crate::external::ExternalCommand;
    vec![
        Box::new(Factory::<Cd>::default()),
        Box::new(Factory::<Pwd>::default()),
        Box::new(Factory::<Echo>::default()),
        Box::new(Factory::<ShowHistory>::default()),
        Box::new(Factory::<Exit>::default()),
        Box::new(Factory::<ExternalCommand>::default()),
    ]
}

impl Default for Interpreter {
    /// Create an interpreter over the process environment with [`default_factories`].
    fn default() -> Self {
        Self::new(default_factories())
    }
}

/// The process's standard input, handed to children as is.
struct InheritedStdin;

impl Read for InheritedStdin {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        std::io::stdin().read(buf)
    }
}

impl Stdin for InheritedStdin {
    fn stdio(self: Box<Self>) -> Stdio {
        Stdio::inherit()
    }
}
