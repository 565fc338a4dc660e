//! Splitting of a trimmed command line into words.
//!
//! The grammar is deliberately tiny: words are separated by runs of the space
//! character, and a final standalone `&` requests background execution. Tabs, quotes
//! and every other byte are ordinary word characters. Lines are handled as raw
//! bytes so arguments that are not valid UTF-8 reach programs unchanged.

use crate::command::ExecutionMode;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};

/// Token that, when it ends a line, sends the command to the background.
pub const BACKGROUND_MARKER: &str = "&";

/// Splits `line` on runs of `' '` into non-empty words.
pub fn split_into_tokens(line: &OsStr) -> Vec<OsString> {
    line.as_bytes()
        .split(|&b| b == b' ')
        .filter(|word| !word.is_empty())
        .map(|word| OsString::from_vec(word.to_vec()))
        .collect()
}

/// Removes a trailing standalone `&` from `tokens` and reports the resulting mode.
///
/// An `&` anywhere else, or glued to another word (`sleep&`), is left alone.
pub fn take_execution_mode(tokens: &mut Vec<OsString>) -> ExecutionMode {
    if tokens.last().is_some_and(|last| last == BACKGROUND_MARKER) {
        tokens.pop();
        ExecutionMode::Background
    } else {
        ExecutionMode::Foreground
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<OsString> {
        split_into_tokens(OsStr::new(line))
    }

    #[test]
    fn splits_on_single_spaces() {
        assert_eq!(tokens("ls -l /tmp"), ["ls", "-l", "/tmp"]);
    }

    #[test]
    fn collapses_runs_of_spaces() {
        assert_eq!(tokens("echo   a    b"), ["echo", "a", "b"]);
    }

    #[test]
    fn tabs_are_word_characters() {
        assert_eq!(tokens("echo a\tb c"), ["echo", "a\tb", "c"]);
    }

    #[test]
    fn quotes_are_not_special() {
        assert_eq!(tokens("echo \"hello world\""), ["echo", "\"hello", "world\""]);
    }

    #[test]
    fn non_utf8_bytes_are_kept() {
        let line = OsStr::from_bytes(b"printf \xff\xfe x");
        let words = split_into_tokens(line);
        assert_eq!(words.len(), 3);
        assert_eq!(words[1].as_bytes(), b"\xff\xfe");
    }

    #[test]
    fn trailing_marker_selects_background() {
        let mut words = tokens("sleep 5 &");
        assert_eq!(take_execution_mode(&mut words), ExecutionMode::Background);
        assert_eq!(words, ["sleep", "5"]);
    }

    #[test]
    fn marker_elsewhere_is_ordinary() {
        let mut words = tokens("echo & done");
        assert_eq!(take_execution_mode(&mut words), ExecutionMode::Foreground);
        assert_eq!(words, ["echo", "&", "done"]);

        let mut glued = tokens("sleep 5&");
        assert_eq!(take_execution_mode(&mut glued), ExecutionMode::Foreground);
        assert_eq!(glued, ["sleep", "5&"]);
    }

    #[test]
    fn lone_marker_leaves_no_command() {
        let mut words = tokens("&");
        assert_eq!(take_execution_mode(&mut words), ExecutionMode::Background);
        assert!(words.is_empty());
    }
}
