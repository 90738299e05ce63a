//! Integer expression calculator.
//!
//! Expressions use C-like operators over signed 64-bit wrapping arithmetic.
//! Bare literals are hexadecimal; `0x`, `0b`, `0n` and a leading `0` select
//! hex, binary, decimal and octal. `@` and `#` followed by one of `b s i l`
//! read an unsigned or signed 1/2/4/8-byte value at the buffer cursor,
//! little-endian for lowercase letters and big-endian for uppercase.

mod lexer;
mod parser;
mod readout;

use thiserror::Error;

use crate::buffer::Buffer;

pub use lexer::{BinaryOp, Endian, MemRead, UnaryOp, parse_literal};
pub use parser::{Expr, parse};
pub use readout::Readout;

/// What went wrong while reading an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    Empty,
    MalformedLiteral(String),
    MalformedRead(String),
    UnexpectedCharacter(char),
    UnexpectedToken(String),
    UnexpectedEnd,
    UnbalancedParen,
    /// Parentheses or unary operators nested too deeply.
    TooDeep,
    /// More tokens than one expression may hold.
    TooLong,
}

impl std::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("empty expression"),
            Self::MalformedLiteral(word) => write!(f, "malformed literal `{word}`"),
            Self::MalformedRead(word) => write!(f, "malformed memory read `{word}`"),
            Self::UnexpectedCharacter(c) => write!(f, "unexpected character `{c}`"),
            Self::UnexpectedToken(token) => write!(f, "unexpected `{token}`"),
            Self::UnexpectedEnd => f.write_str("unexpected end of expression"),
            Self::UnbalancedParen => f.write_str("unbalanced parenthesis"),
            Self::TooDeep => f.write_str("expression nested too deeply"),
            Self::TooLong => f.write_str("expression too long"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("{kind} at column {offset}")]
    Syntax { offset: usize, kind: SyntaxErrorKind },

    #[error("{width}-byte read at {address:#x} runs past end of buffer ({size} bytes)")]
    ReadOutOfBounds {
        address: usize,
        width: usize,
        size: usize,
    },
}

impl CalcError {
    pub(crate) const fn syntax(offset: usize, kind: SyntaxErrorKind) -> Self {
        Self::Syntax { offset, kind }
    }
}

/// Parse and evaluate `text` against `buffer`.
///
/// # Errors
///
/// Returns a [`CalcError`] if the text does not parse or a memory read
/// falls outside the buffer.
pub fn evaluate(buffer: &Buffer, text: &str) -> Result<i64, CalcError> {
    let expr = parse(text)?;
    let value = expr.eval(buffer)?;
    tracing::trace!(text, value, "evaluated expression");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const TEST_DATA: [u8; 8] = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];

    fn check(cases: &[(&str, i64)]) {
        let buffer = Buffer::from_bytes(TEST_DATA);
        for &(text, expected) in cases {
            assert_eq!(evaluate(&buffer, text), Ok(expected), "{text}");
        }
    }

    #[test]
    fn test_number_formats() {
        check(&[
            ("101", 257),
            ("aaa", 2730),
            ("0x101", 257),
            ("0xaaa", 2730),
            ("0n101", 101),
            ("0b101", 5),
            ("0101", 65),
        ]);
    }

    #[test]
    fn test_basic_arithmetic() {
        check(&[
            ("1 + 1", 2),
            ("100 + 100", 512),
            ("1 + 2 + 3", 6),
            ("1 - 1", 0),
            ("0 - 1", -1),
            ("1 - 0", 1),
            ("0 - 0", 0),
            ("10 - 4 - 7", 5),
            ("1 * 1", 1),
            ("0 * 1", 0),
            ("1 * 0", 0),
            ("0 * 0", 0),
            ("42 * 42", 4356),
            ("3 * 100 * 100", 196_608),
        ]);
    }

    #[test]
    fn test_division_by_zero_yields_zero() {
        check(&[
            ("1 / 1", 1),
            ("0 / 1", 0),
            ("1 / 0", 0),
            ("0 / 0", 0),
            ("42 / 100", 0),
            ("84 / 42", 2),
            ("1 % 1", 0),
            ("0 % 1", 0),
            ("1 % 0", 0),
            ("0 % 0", 0),
            ("2 % 100", 2),
            ("20 % 2", 0),
        ]);
    }

    #[test]
    fn test_bit_operators() {
        check(&[
            ("20 & 1", 0),
            ("21 & 1", 1),
            ("20 | 1", 33),
            ("21 | 1", 33),
            ("20 ^ 1", 33),
            ("21 ^ 1", 32),
            ("20 << 1", 64),
            ("20 >> 1", 16),
            ("~0", -1),
            ("~20", -33),
        ]);
    }

    #[test]
    fn test_logic_operators() {
        check(&[("1 || 0", 1), ("1 && 0", 0), ("!0", 1), ("!1", 0)]);
    }

    #[test]
    fn test_comparison_operators() {
        check(&[
            ("20 > 1", 1),
            ("20 > 21", 0),
            ("20 > 20", 0),
            ("20 >= 1", 1),
            ("20 >= 21", 0),
            ("20 >= 20", 1),
            ("20 < 1", 0),
            ("20 < 21", 1),
            ("20 < 20", 0),
            ("20 <= 1", 0),
            ("20 <= 21", 1),
            ("20 <= 20", 1),
            ("20 == 1", 0),
            ("20 == 20", 1),
            ("20 != 1", 1),
            ("20 != 20", 0),
        ]);
    }

    #[test]
    fn test_mixed_expressions() {
        check(&[
            ("1 + 2 * 3 / 4", 2),
            ("3 + 4 % 10", 7),
            ("~0b00 + 0n10 * 0x20 << 030 != 40 < 50", 1),
            ("~0b00 + 0n10 * 0x20 << ((030 != 40) < 50)", 638),
            ("(1) + (2) + (3)", 6),
        ]);
    }

    #[test]
    fn test_unsigned_reads() {
        check(&[
            ("@b", 1),
            ("@B", 1),
            ("@s", 8961),
            ("@S", 291),
            ("@i", 1_732_584_193),
            ("@I", 19_088_743),
            ("@l", 0xefcd_ab89_6745_2301_u64.cast_signed()),
            ("@L", 81_985_529_216_486_895),
        ]);
    }

    #[test]
    fn test_signed_reads() {
        check(&[
            ("#b", 1),
            ("#B", 1),
            ("#s", 8961),
            ("#S", 291),
            ("#i", 1_732_584_193),
            ("#I", 19_088_743),
            ("#l", -1_167_088_121_787_636_991),
            ("#L", 81_985_529_216_486_895),
        ]);
    }

    #[test]
    fn test_signed_read_sign_extends() {
        let mut buffer = Buffer::from_bytes(TEST_DATA);
        buffer.set_cursor(4);
        assert_eq!(evaluate(&buffer, "#b"), Ok(-0x77));
        assert_eq!(evaluate(&buffer, "@b"), Ok(0x89));
        assert_eq!(evaluate(&buffer, "#S"), Ok(-0x7655));
    }

    #[test]
    fn test_read_past_end_fails() {
        let mut buffer = Buffer::from_bytes(TEST_DATA);
        buffer.set_cursor(6);
        assert_eq!(
            evaluate(&buffer, "@l"),
            Err(CalcError::ReadOutOfBounds {
                address: 6,
                width: 8,
                size: 8
            })
        );
        assert_eq!(evaluate(&buffer, "@s"), Ok(0xefcd));
    }

    #[test]
    fn test_read_on_empty_buffer_fails() {
        let buffer = Buffer::from_bytes(Vec::new());
        assert!(matches!(
            evaluate(&buffer, "@b"),
            Err(CalcError::ReadOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_errors_carry_column() {
        let buffer = Buffer::from_bytes(TEST_DATA);
        let err = evaluate(&buffer, "1 + zz").unwrap_err();
        assert_eq!(
            err,
            CalcError::syntax(4, SyntaxErrorKind::MalformedLiteral("zz".to_string()))
        );
        assert_eq!(err.to_string(), "malformed literal `zz` at column 4");
    }

    fn nested(depth: usize) -> String {
        format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_at_limit_evaluates() {
        let buffer = Buffer::from_bytes(TEST_DATA);
        assert_eq!(evaluate(&buffer, &nested(parser::MAX_NESTING)), Ok(1));
        let complements = format!("{}0", "~".repeat(parser::MAX_NESTING));
        assert_eq!(evaluate(&buffer, &complements), Ok(0));
    }

    #[test]
    fn test_nesting_past_limit_is_syntax_error() {
        let buffer = Buffer::from_bytes(TEST_DATA);
        let depth = parser::MAX_NESTING + 1;
        assert_eq!(
            evaluate(&buffer, &nested(depth)),
            Err(CalcError::syntax(
                parser::MAX_NESTING,
                SyntaxErrorKind::TooDeep
            ))
        );
        let nots = format!("{}1", "!".repeat(depth));
        assert!(matches!(
            evaluate(&buffer, &nots),
            Err(CalcError::Syntax {
                kind: SyntaxErrorKind::TooDeep,
                ..
            })
        ));
    }

    #[test]
    fn test_huge_inputs_fail_without_overflowing() {
        let buffer = Buffer::from_bytes(TEST_DATA);
        assert!(matches!(
            evaluate(&buffer, &nested(10_000)),
            Err(CalcError::Syntax { .. })
        ));
        let chain = vec!["1"; 10_000].join("+");
        assert!(matches!(
            evaluate(&buffer, &chain),
            Err(CalcError::Syntax {
                kind: SyntaxErrorKind::TooLong,
                ..
            })
        ));
    }

    proptest! {
        #[test]
        fn prop_decimal_literals_round_trip(n in any::<u64>()) {
            let buffer = Buffer::from_bytes(TEST_DATA);
            prop_assert_eq!(evaluate(&buffer, &format!("0n{n}")), Ok(n.cast_signed()));
        }

        #[test]
        fn prop_hex_literals_match_with_and_without_prefix(n in any::<u64>()) {
            let buffer = Buffer::from_bytes(TEST_DATA);
            let bare = evaluate(&buffer, &format!("{n:x}"));
            let prefixed = evaluate(&buffer, &format!("0x{n:x}"));
            // A bare literal whose first digit is 0 reads as octal instead.
            if !format!("{n:x}").starts_with('0') {
                prop_assert_eq!(bare, prefixed.clone());
            }
            prop_assert_eq!(prefixed, Ok(n.cast_signed()));
        }

        #[test]
        fn prop_addition_wraps(a in any::<i64>(), b in any::<i64>()) {
            let buffer = Buffer::from_bytes(TEST_DATA);
            let text = format!("0x{:x} + 0x{:x}", a.cast_unsigned(), b.cast_unsigned());
            prop_assert_eq!(evaluate(&buffer, &text), Ok(a.wrapping_add(b)));
        }
    }
}
