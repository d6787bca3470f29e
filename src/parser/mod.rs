//! G-code Parser
//!
//! Zero-copy extraction of instructions from G-code text.
//! Each line is handled on its own, so extraction can run in parallel.

pub mod ast;
pub mod lexer;

pub use ast::{find_param, parse_parameter, Instruction, Parameter};
pub use lexer::{extract_lines, strip_comment, tokenize_line, Line};

use crate::error::ExtractError;

/// Extract the instruction, if any, from a single line
///
/// Blank and comment-only lines yield `Ok(None)`.
pub fn extract_instruction<'a>(line: &Line<'a>) -> Result<Option<Instruction<'a>>, ExtractError> {
    ast::words_to_instruction(line.index, lexer::tokenize_line(line.text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<Instruction<'_>> {
        extract_instruction(&Line::new(0, text)).expect("valid line")
    }

    #[test]
    fn test_extract_simple_command() {
        let instruction = extract("G1 X10 Y20").expect("instruction");

        assert_eq!(instruction.command, "G1");
        assert_eq!(instruction.params.len(), 2);
        assert_eq!(instruction.params[0].key, 'X');
        assert_eq!(instruction.params[0].value, 10.0);
    }

    #[test]
    fn test_comment_is_stripped() {
        let with_comment = extract("G1 X10 ; move right").expect("instruction");
        let without = extract("G1 X10").expect("instruction");

        assert_eq!(with_comment.command, without.command);
        assert_eq!(with_comment.params, without.params);
    }

    #[test]
    fn test_empty_and_comment_lines() {
        assert!(extract("").is_none());
        assert!(extract("   ").is_none());
        assert!(extract("; just a comment").is_none());
        assert!(extract(";LAYER:0").is_none());
    }

    #[test]
    fn test_command_is_case_sensitive() {
        assert_eq!(extract("g1 X1").expect("instruction").command, "g1");
    }

    #[test]
    fn test_line_number_is_kept() {
        let line = Line::new(42, "M104 S200");
        let instruction = extract_instruction(&line).unwrap().unwrap();
        assert_eq!(instruction.line_no, 42);
    }

    #[test]
    fn test_malformed_parameter() {
        let line = Line::new(3, "G1 X1O");
        assert!(matches!(
            extract_instruction(&line),
            Err(ExtractError::InvalidValue { key: 'X', .. })
        ));
    }
}
