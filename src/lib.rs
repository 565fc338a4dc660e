//! A small interactive command interpreter.
//!
//! The crate reads command lines, runs a handful of builtins in-process and launches
//! everything else as a child process, either in the foreground (the interpreter
//! waits) or in the background (a trailing `&` token). External programs are looked
//! up in the current working directory first and then in every `PATH` directory.
//!
//! The main entry point is [`Interpreter`], which executes whole input lines using a
//! set of pluggable factories. The public modules [`command`] and [`env`] expose the
//! traits and types needed to implement your own commands, and [`input`] provides the
//! line sources used by the interactive loop.

pub mod banner;
mod builtin;
pub mod command;
pub mod env;
pub mod errors;
mod external;
pub mod history;
pub mod input;
mod interpreter;
pub mod io_adapters;
pub mod jobs;
mod lexer;

/// Maximum length of one input line, terminator included.
pub const MAX_LINE_LEN: usize = 256;

/// Number of lines kept by the `history` builtin.
pub const HISTORY_LEN: usize = 100;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, default_factories};
