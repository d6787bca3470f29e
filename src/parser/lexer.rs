//! G-code Lexer
//!
//! Zero-copy segmentation of a G-code buffer into lines and of a line
//! into words.

/// Comment delimiter; everything after it on a line is ignored
pub const COMMENT_DELIMITER: char = ';';

/// One line of the source buffer with its 0-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub index: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(index: usize, text: &'a str) -> Self {
        Self { index, text }
    }
}

/// Split a buffer into indexed lines
///
/// Lines end at `\n`. A `\r` directly before the `\n` belongs to the
/// terminator and is not part of the slice. The last line may lack a
/// terminator; a terminator at the very end does not open an empty line.
pub fn extract_lines(text: &str) -> Vec<Line<'_>> {
    text.split_terminator('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(index, text)| Line::new(index, text))
        .collect()
}

/// The part of a line before the comment delimiter
pub fn strip_comment(line: &str) -> &str {
    match line.split_once(COMMENT_DELIMITER) {
        Some((code, _comment)) => code,
        None => line,
    }
}

/// Whitespace separated words of a line, comment excluded
pub fn tokenize_line(line: &str) -> impl Iterator<Item = &str> {
    strip_comment(line).split_whitespace()
}
