//! Precedence-climbing parser and evaluator over the token stream.

use crate::buffer::Buffer;

use super::lexer::{BinaryOp, Endian, MemRead, Spanned, Token, UnaryOp, tokenize};
use super::{CalcError, SyntaxErrorKind};

/// Deepest nesting of parentheses and unary operators the parser accepts.
pub(super) const MAX_NESTING: usize = 64;
/// Longest token stream the parser accepts; bounds the depth of operator
/// chains, which the evaluator walks recursively.
pub(super) const MAX_TOKENS: usize = 512;

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(i64),
    Read(MemRead),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate with 64-bit wrapping arithmetic. Memory reads decode the
    /// bytes at the buffer's cursor.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::ReadOutOfBounds`] when a read does not fit.
    pub fn eval(&self, buffer: &Buffer) -> Result<i64, CalcError> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::Read(read) => read_at_cursor(*read, buffer),
            Self::Unary(op, operand) => {
                let value = operand.eval(buffer)?;
                Ok(match op {
                    UnaryOp::Complement => !value,
                    UnaryOp::Not => i64::from(value == 0),
                })
            }
            Self::Binary(op, lhs, rhs) => {
                let lhs = lhs.eval(buffer)?;
                let rhs = rhs.eval(buffer)?;
                Ok(apply(*op, lhs, rhs))
            }
        }
    }
}

/// Combine two operands. Division and remainder by zero yield 0.
pub fn apply(op: BinaryOp, lhs: i64, rhs: i64) -> i64 {
    match op {
        BinaryOp::LogicOr => truth(lhs != 0 || rhs != 0),
        BinaryOp::LogicAnd => truth(lhs != 0 && rhs != 0),
        BinaryOp::BitOr => lhs | rhs,
        BinaryOp::BitXor => lhs ^ rhs,
        BinaryOp::BitAnd => lhs & rhs,
        BinaryOp::Eq => truth(lhs == rhs),
        BinaryOp::Ne => truth(lhs != rhs),
        BinaryOp::Lt => truth(lhs < rhs),
        BinaryOp::Le => truth(lhs <= rhs),
        BinaryOp::Gt => truth(lhs > rhs),
        BinaryOp::Ge => truth(lhs >= rhs),
        BinaryOp::Shl => match shift_amount(rhs) {
            Some(amount) => lhs << amount,
            None => 0,
        },
        BinaryOp::Shr => match shift_amount(rhs) {
            Some(amount) => lhs >> amount,
            None if lhs < 0 => -1,
            None => 0,
        },
        BinaryOp::Add => lhs.wrapping_add(rhs),
        BinaryOp::Sub => lhs.wrapping_sub(rhs),
        BinaryOp::Mul => lhs.wrapping_mul(rhs),
        BinaryOp::Div => {
            if rhs == 0 {
                0
            } else {
                lhs.wrapping_div(rhs)
            }
        }
        BinaryOp::Rem => {
            if rhs == 0 {
                0
            } else {
                lhs.wrapping_rem(rhs)
            }
        }
    }
}

fn shift_amount(rhs: i64) -> Option<u32> {
    u32::try_from(rhs).ok().filter(|amount| *amount < 64)
}

const fn truth(value: bool) -> i64 {
    if value { 1 } else { 0 }
}

fn read_at_cursor(read: MemRead, buffer: &Buffer) -> Result<i64, CalcError> {
    let at = buffer.cursor();
    let little = read.endian == Endian::Little;
    let value = match (read.width, read.signed) {
        (1, false) => buffer.read_u8(at).map(i64::from),
        (1, true) => buffer.read_i8(at).map(i64::from),
        (2, false) if little => buffer.read_u16_le(at).map(i64::from),
        (2, false) => buffer.read_u16_be(at).map(i64::from),
        (2, true) if little => buffer.read_i16_le(at).map(i64::from),
        (2, true) => buffer.read_i16_be(at).map(i64::from),
        (4, false) if little => buffer.read_u32_le(at).map(i64::from),
        (4, false) => buffer.read_u32_be(at).map(i64::from),
        (4, true) if little => buffer.read_i32_le(at).map(i64::from),
        (4, true) => buffer.read_i32_be(at).map(i64::from),
        (_, false) if little => buffer.read_u64_le(at).map(u64::cast_signed),
        (_, false) => buffer.read_u64_be(at).map(u64::cast_signed),
        (_, true) if little => buffer.read_i64_le(at),
        (_, true) => buffer.read_i64_be(at),
    };
    value.map_err(|_| CalcError::ReadOutOfBounds {
        address: at,
        width: read.width,
        size: buffer.size(),
    })
}

/// Parse `input` into an expression tree.
///
/// # Errors
///
/// Returns [`CalcError::Syntax`] for empty input, malformed tokens,
/// unexpected or missing operands and unbalanced parentheses.
pub fn parse(input: &str) -> Result<Expr, CalcError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::syntax(0, SyntaxErrorKind::Empty));
    }
    if let Some(extra) = tokens.get(MAX_TOKENS) {
        return Err(CalcError::syntax(extra.offset, SyntaxErrorKind::TooLong));
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: input.chars().count(),
        depth: 0,
    };
    let expr = parser.expression(1)?;
    if let Some(stray) = parser.peek() {
        let kind = if stray.token == Token::RParen {
            SyntaxErrorKind::UnbalancedParen
        } else {
            SyntaxErrorKind::UnexpectedToken(stray.token.to_string())
        };
        return Err(CalcError::syntax(stray.offset, kind));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    end: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Spanned> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Result<Spanned, CalcError> {
        let token = self
            .peek()
            .ok_or_else(|| CalcError::syntax(self.end, SyntaxErrorKind::UnexpectedEnd))?;
        self.pos += 1;
        Ok(token)
    }

    /// Enter one level of nesting at `offset`; pair with `self.depth -= 1`.
    fn descend(&mut self, offset: usize) -> Result<(), CalcError> {
        if self.depth >= MAX_NESTING {
            return Err(CalcError::syntax(offset, SyntaxErrorKind::TooDeep));
        }
        self.depth += 1;
        Ok(())
    }

    fn peek_binary(&self) -> Option<BinaryOp> {
        match self.peek()?.token {
            Token::Binary(op) => Some(op),
            _ => None,
        }
    }

    /// Parse operands joined by operators binding at least `min_precedence`.
    fn expression(&mut self, min_precedence: u8) -> Result<Expr, CalcError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek_binary()
            && op.precedence() >= min_precedence
        {
            self.pos += 1;
            let rhs = self.expression(op.precedence() + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        if let Some(Spanned {
            token: Token::Unary(op),
            offset,
        }) = self.peek()
        {
            self.descend(offset)?;
            self.pos += 1;
            let operand = self.unary()?;
            self.depth -= 1;
            return Ok(Expr::Unary(op, Box::new(operand)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        let Spanned { token, offset } = self.next()?;
        match token {
            Token::Number(value) => Ok(Expr::Literal(value)),
            Token::Read(read) => Ok(Expr::Read(read)),
            Token::LParen => {
                self.descend(offset)?;
                let inner = self.expression(1)?;
                self.depth -= 1;
                match self.peek() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    Some(other) => Err(CalcError::syntax(
                        other.offset,
                        SyntaxErrorKind::UnexpectedToken(other.token.to_string()),
                    )),
                    None => Err(CalcError::syntax(
                        self.end,
                        SyntaxErrorKind::UnbalancedParen,
                    )),
                }
            }
            Token::RParen => Err(CalcError::syntax(offset, SyntaxErrorKind::UnbalancedParen)),
            Token::Binary(_) | Token::Unary(_) => Err(CalcError::syntax(
                offset,
                SyntaxErrorKind::UnexpectedToken(token.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    fn lit(value: i64) -> Expr {
        Expr::Literal(value)
    }

    #[test]
    fn test_multiplicative_binds_tighter_than_additive() {
        assert_eq!(
            parse("1 + 2 * 3").unwrap(),
            binary(BinaryOp::Add, lit(1), binary(BinaryOp::Mul, lit(2), lit(3)))
        );
    }

    #[test]
    fn test_same_level_is_left_associative() {
        assert_eq!(
            parse("10 - 4 - 7").unwrap(),
            binary(
                BinaryOp::Sub,
                binary(BinaryOp::Sub, lit(0x10), lit(4)),
                lit(7)
            )
        );
    }

    #[test]
    fn test_relational_binds_tighter_than_equality() {
        assert_eq!(
            parse("1 == 2 < 3").unwrap(),
            binary(BinaryOp::Eq, lit(1), binary(BinaryOp::Lt, lit(2), lit(3)))
        );
    }

    #[test]
    fn test_shift_binds_tighter_than_relational() {
        assert_eq!(
            parse("1 < 2 << 3").unwrap(),
            binary(BinaryOp::Lt, lit(1), binary(BinaryOp::Shl, lit(2), lit(3)))
        );
    }

    #[test]
    fn test_bitwise_levels_order_and_xor_or() {
        assert_eq!(
            parse("1 | 2 ^ 3 & 4").unwrap(),
            binary(
                BinaryOp::BitOr,
                lit(1),
                binary(
                    BinaryOp::BitXor,
                    lit(2),
                    binary(BinaryOp::BitAnd, lit(3), lit(4))
                )
            )
        );
    }

    #[test]
    fn test_bit_and_binds_looser_than_equality() {
        assert_eq!(
            parse("1 & 2 == 2").unwrap(),
            binary(BinaryOp::BitAnd, lit(1), binary(BinaryOp::Eq, lit(2), lit(2)))
        );
    }

    #[test]
    fn test_logic_and_binds_tighter_than_logic_or() {
        assert_eq!(
            parse("1 || 0 && 0").unwrap(),
            binary(
                BinaryOp::LogicOr,
                lit(1),
                binary(BinaryOp::LogicAnd, lit(0), lit(0))
            )
        );
    }

    #[test]
    fn test_unary_operators_nest_and_bind_tightest() {
        assert_eq!(
            parse("~!1 * 2").unwrap(),
            binary(
                BinaryOp::Mul,
                Expr::Unary(
                    UnaryOp::Complement,
                    Box::new(Expr::Unary(UnaryOp::Not, Box::new(lit(1))))
                ),
                lit(2)
            )
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            parse("(1 + 2) * 3").unwrap(),
            binary(BinaryOp::Mul, binary(BinaryOp::Add, lit(1), lit(2)), lit(3))
        );
    }

    #[test]
    fn test_syntax_errors() {
        let cases = [
            ("", SyntaxErrorKind::Empty),
            ("   ", SyntaxErrorKind::Empty),
            ("1 +", SyntaxErrorKind::UnexpectedEnd),
            ("(1 + 2", SyntaxErrorKind::UnbalancedParen),
            ("1 + 2)", SyntaxErrorKind::UnbalancedParen),
            ("()", SyntaxErrorKind::UnbalancedParen),
            ("1 2", SyntaxErrorKind::UnexpectedToken("0x2".to_string())),
            ("* 2", SyntaxErrorKind::UnexpectedToken("*".to_string())),
            ("(1 2)", SyntaxErrorKind::UnexpectedToken("0x2".to_string())),
        ];
        for (input, expected) in cases {
            match parse(input) {
                Err(CalcError::Syntax { kind, .. }) => assert_eq!(kind, expected, "{input:?}"),
                other => panic!("{input:?}: expected syntax error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_apply_shift_out_of_range() {
        assert_eq!(apply(BinaryOp::Shl, 1, 64), 0);
        assert_eq!(apply(BinaryOp::Shl, 1, -1), 0);
        assert_eq!(apply(BinaryOp::Shr, -8, 70), -1);
        assert_eq!(apply(BinaryOp::Shr, 8, 70), 0);
        assert_eq!(apply(BinaryOp::Shr, -8, 1), -4);
    }

    #[test]
    fn test_apply_wraps_on_overflow() {
        assert_eq!(apply(BinaryOp::Add, i64::MAX, 1), i64::MIN);
        assert_eq!(apply(BinaryOp::Div, i64::MIN, -1), i64::MIN);
        assert_eq!(apply(BinaryOp::Rem, i64::MIN, -1), 0);
    }
}
