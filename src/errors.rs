//! # Errors
//!
//! User-facing failures of a single input line. None of them stops the interactive
//! loop; they are printed and the next prompt is shown.

use crate::MAX_LINE_LEN;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// The name matched no builtin and no executable in the working directory or `PATH`.
    #[error("ERROR: {0} not found!")]
    CommandNotFound(String),

    /// A path typed directly by the user is missing or lacks execute permission.
    #[error("ERROR: {} does not exist or is not executable.", .0.display())]
    NotExecutable(PathBuf),

    /// The operating system refused to start the program.
    #[error("ERROR: {}: {}", .path.display(), .source)]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The line did not fit into the input buffer and was discarded.
    #[error("Exceeded max input length of {} characters", MAX_LINE_LEN)]
    InputTooLong,
}
