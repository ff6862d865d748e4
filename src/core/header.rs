//! Filepath: src/core/header.rs
//! Leading block-comment extraction for function files.
//!
//! A function file documents itself with a single `/* ... */` comment that
//! opens on line 1 or 2 (blank lines are not counted). The scanner is a
//! small state machine fed one line at a time:
//!
//! ```text
//! BeforeComment --"/*"--> InComment --"*/"--> Done
//! ```
//!
//! Comment lines lose their leading `*`/whitespace decoration, are trimmed,
//! and are joined with `\r\n`. Lines that are empty after stripping are
//! dropped.

use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::infra::io::NonBlankLines;

/// Separator used to join comment body lines.
pub const LINE_SEPARATOR: &str = "\r\n";

/// The comment must open before this line number.
const MAX_OPENING_LINE: usize = 3;

static OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*/\*").expect("valid comment-open pattern"));
static CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*/\s*$").expect("valid comment-close pattern"));

/// Why a file's header comment could not be extracted.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("empty file")]
    EmptyFile,
    #[error("missing documentation?")]
    MissingDocumentation,
    #[error("header comment is never closed")]
    IncompleteComment,
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    BeforeComment,
    InComment,
    Done,
}

/// Outcome of feeding one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep reading.
    Continue,
    /// The comment closed; no further input is needed.
    Finished,
}

#[derive(Debug)]
pub struct HeaderScanner {
    state: ScanState,
    lines_read: usize,
    body: Vec<String>,
}

impl Default for HeaderScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::BeforeComment,
            lines_read: 0,
            body: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Advance the machine by one (non-blank) line.
    pub fn feed(&mut self, line: &str) -> Result<Step, HeaderError> {
        self.lines_read += 1;

        match self.state {
            ScanState::BeforeComment => {
                if self.lines_read >= MAX_OPENING_LINE {
                    return Err(HeaderError::MissingDocumentation);
                }
                if OPEN_RE.is_match(line) {
                    self.state = ScanState::InComment;
                }
                Ok(Step::Continue)
            }
            ScanState::InComment => {
                if CLOSE_RE.is_match(line) {
                    self.state = ScanState::Done;
                    return Ok(Step::Finished);
                }

                let text = line
                    .trim_start_matches(|c: char| c == '*' || c.is_whitespace())
                    .trim();
                if !text.is_empty() {
                    self.body.push(text.to_string());
                }
                Ok(Step::Continue)
            }
            ScanState::Done => Ok(Step::Finished),
        }
    }

    /// Close the machine at end of input (or after `Step::Finished`).
    pub fn finish(self) -> Result<String, HeaderError> {
        match self.state {
            ScanState::Done => Ok(self.body.join(LINE_SEPARATOR)),
            _ if self.lines_read < 2 => Err(HeaderError::EmptyFile),
            ScanState::BeforeComment => Err(HeaderError::MissingDocumentation),
            ScanState::InComment => Err(HeaderError::IncompleteComment),
        }
    }
}

fn scan<I, S>(lines: I) -> Result<String, HeaderError>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut scanner = HeaderScanner::new();

    for line in lines {
        if scanner.feed(line?.as_ref())? == Step::Finished {
            break;
        }
    }

    scanner.finish()
}

/// Extract the header comment from already-split, non-blank lines.
pub fn scan_lines<I, S>(lines: I) -> Result<String, HeaderError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    scan(lines.into_iter().map(Ok))
}

/// Extract the header comment of the file at `path`.
/// Reading stops as soon as the comment closes.
pub fn scan_file(path: &Path) -> Result<String, HeaderError> {
    scan(NonBlankLines::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_decorated_comment_is_stripped() {
        let text = scan_lines(["/*", " * Line one.", " * Line two.", " */"]).unwrap();
        assert_eq!(text, "Line one.\r\nLine two.");
    }

    #[test]
    fn test_comment_may_open_on_line_two() {
        let text = scan_lines(["#include \"script_component.hpp\"", "/*", "Doc", "*/"]).unwrap();
        assert_eq!(text, "Doc");
    }

    #[test]
    fn test_opening_on_line_three_is_missing_documentation() {
        let err = scan_lines(["a", "b", "/*", "doc", "*/"]).unwrap_err();
        assert!(matches!(err, HeaderError::MissingDocumentation));
    }

    #[test]
    fn test_no_comment_is_missing_documentation() {
        let err = scan_lines(["private _a = 1;", "_a"]).unwrap_err();
        assert!(matches!(err, HeaderError::MissingDocumentation));
    }

    #[test]
    fn test_short_input_is_empty_file() {
        assert!(matches!(
            scan_lines(Vec::<&str>::new()).unwrap_err(),
            HeaderError::EmptyFile
        ));
        assert!(matches!(scan_lines(["/*"]).unwrap_err(), HeaderError::EmptyFile));
        assert!(matches!(scan_lines(["x"]).unwrap_err(), HeaderError::EmptyFile));
    }

    #[test]
    fn test_unclosed_comment_is_incomplete() {
        let err = scan_lines(["/*", " * never closed", "code();"]).unwrap_err();
        assert!(matches!(err, HeaderError::IncompleteComment));
    }

    #[test]
    fn test_empty_comment_body_is_valid() {
        assert_eq!(scan_lines(["/*", "*/"]).unwrap(), "");
        assert_eq!(scan_lines(["/*", " ***", "   ", " */"]).unwrap(), "");
    }

    #[test]
    fn test_closing_requires_own_line() {
        // "*/" followed by text does not close; decoration strip leaves "/ x"
        let text = scan_lines(["/*", "a", " */ x", " */"]).unwrap();
        assert_eq!(text, "a\r\n/ x");
    }

    #[test]
    fn test_closing_tolerates_surrounding_whitespace() {
        let text = scan_lines(["  /**", "\t** Author: x", "\t */\t"]).unwrap();
        assert_eq!(text, "Author: x");
    }

    #[test]
    fn test_lines_after_close_are_ignored() {
        let mut scanner = HeaderScanner::new();
        for line in ["/*", "doc", "*/"] {
            scanner.feed(line).unwrap();
        }
        assert_eq!(scanner.state(), ScanState::Done);
        assert_eq!(scanner.feed("/* again").unwrap(), Step::Finished);
        assert_eq!(scanner.finish().unwrap(), "doc");
    }

    #[test]
    fn test_transitions() {
        let mut scanner = HeaderScanner::new();
        assert_eq!(scanner.state(), ScanState::BeforeComment);
        assert_eq!(scanner.feed("/*").unwrap(), Step::Continue);
        assert_eq!(scanner.state(), ScanState::InComment);
        assert_eq!(scanner.feed(" * x").unwrap(), Step::Continue);
        assert_eq!(scanner.feed(" */").unwrap(), Step::Finished);
        assert_eq!(scanner.state(), ScanState::Done);
        assert_eq!(scanner.lines_read(), 3);
    }

    #[test]
    fn test_scan_file_skips_blank_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fnDoStuff.sqf");
        std::fs::write(&path, "\r\n\r\n/*\r\n\r\n * Author: Someone\r\n *\r\n * Arguments:\r\n */\r\nparams [];\r\n").unwrap();

        assert_eq!(scan_file(&path).unwrap(), "Author: Someone\r\nArguments:");
    }

    #[test]
    fn test_scan_file_keeps_latin1_comment_lossily() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fnA.sqf");
        std::fs::write(&path, b"/*\n * Author: J\xf6rg\n * Does stuff.\n */\n").unwrap();

        assert_eq!(scan_file(&path).unwrap(), "Author: J\u{fffd}rg\r\nDoes stuff.");
    }

    #[test]
    fn test_scan_file_cr_only_line_endings() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fnOldMac.sqf");
        std::fs::write(&path, "/*\r * Doc.\r */\rparams [];\r").unwrap();

        assert_eq!(scan_file(&path).unwrap(), "Doc.");
    }

    #[test]
    fn test_scan_file_missing_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = scan_file(&tmp.path().join("fnGone.sqf")).unwrap_err();
        assert!(matches!(err, HeaderError::Io(_)));
    }

    #[test]
    fn test_scan_file_stops_before_invalid_tail() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fnBinaryTail.sqf");
        let mut bytes = b"/*\nDoc\n*/\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        std::fs::write(&path, bytes).unwrap();

        assert_eq!(scan_file(&path).unwrap(), "Doc");
    }
}
