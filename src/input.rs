//! Line sources for the interactive loop.
//!
//! Every source enforces the same bound: a line may hold at most
//! `MAX_LINE_LEN - 1` bytes before its newline. Longer lines are reported as
//! [`ReadOutcome::TooLong`] and their remainder is discarded.

use crate::MAX_LINE_LEN;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::ffi::{OsStr, OsString};
use std::io::{BufRead, Read, Write};
use std::os::unix::ffi::{OsStrExt, OsStringExt};

/// Prompt shown before each line unless configured otherwise.
pub const DEFAULT_PROMPT: &str = "dsh> ";

/// Longest accepted line, newline excluded.
const MAX_CONTENT_LEN: usize = MAX_LINE_LEN - 1;

/// What a single read produced.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line without its trailing newline, bytes untouched. Not trimmed yet.
    Line(OsString),
    /// The line exceeded the bound and was thrown away.
    TooLong,
    /// No more input.
    Eof,
}

/// Anything that can show a prompt and hand back one line of input.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Strips leading and trailing spaces and tabs.
///
/// Returns `None` when nothing printable is left, in which case the line must
/// be ignored entirely.
pub fn prepare_line(raw: &OsStr) -> Option<&OsStr> {
    let is_blank = |b: &u8| *b == b' ' || *b == b'\t';
    let bytes = raw.as_bytes();
    let start = bytes.iter().position(|b| !is_blank(b))?;
    let end = bytes.iter().rposition(|b| !is_blank(b))? + 1;
    let line = &bytes[start..end];
    if line[0].is_ascii_control() {
        None
    } else {
        Some(OsStr::from_bytes(line))
    }
}

/// Bounded reader over any buffered byte stream, used for pipes and files.
pub struct PlainSource<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> PlainSource<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for PlainSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        write!(self.prompt_out, "{prompt}")?;
        self.prompt_out.flush()?;

        let mut buf = Vec::with_capacity(MAX_LINE_LEN);
        let n = (&mut self.reader)
            .take(MAX_CONTENT_LEN as u64)
            .read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(ReadOutcome::Eof);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
        } else if buf.len() == MAX_CONTENT_LEN {
            self.reader.skip_until(b'\n')?;
            return Ok(ReadOutcome::TooLong);
        }
        // A short final line without newline is still a line.
        Ok(ReadOutcome::Line(OsString::from_vec(buf)))
    }
}

/// Interactive source backed by the `rustyline` line editor.
///
/// Ctrl-C abandons the current line; Ctrl-D ends the session.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) if line.len() >= MAX_CONTENT_LEN => Ok(ReadOutcome::TooLong),
            Ok(line) => {
                if prepare_line(OsStr::new(&line)).is_some() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(ReadOutcome::Line(line.into()))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Line(OsString::new())),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }
}
