//! Tokenizer for calculator expressions.

use std::fmt;

use super::{CalcError, SyntaxErrorKind};

/// Byte order of a memory read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// A typed read of the bytes under the cursor, e.g. `@i` or `#L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemRead {
    /// Width in bytes: 1, 2, 4 or 8.
    pub width: usize,
    pub endian: Endian,
    pub signed: bool,
}

impl MemRead {
    /// Decode the read letter (`b s i l`, uppercase for big-endian).
    fn from_letter(letter: char, signed: bool) -> Option<Self> {
        let width = match letter.to_ascii_lowercase() {
            'b' => 1,
            's' => 2,
            'i' => 4,
            'l' => 8,
            _ => return None,
        };
        let endian = if letter.is_ascii_uppercase() {
            Endian::Big
        } else {
            Endian::Little
        };
        Some(Self {
            width,
            endian,
            signed,
        })
    }
}

/// Binary operators, tightest-binding last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    LogicOr,
    LogicAnd,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    /// Binding strength; higher binds tighter. All levels are left-associative.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::LogicOr => 1,
            Self::LogicAnd => 2,
            Self::BitOr => 3,
            Self::BitXor => 4,
            Self::BitAnd => 5,
            Self::Eq | Self::Ne => 6,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 7,
            Self::Shl | Self::Shr => 8,
            Self::Add | Self::Sub => 9,
            Self::Mul | Self::Div | Self::Rem => 10,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::LogicOr => "||",
            Self::LogicAnd => "&&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `~`
    Complement,
    /// `!`
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Number(i64),
    Read(MemRead),
    Binary(BinaryOp),
    Unary(UnaryOp),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n:#x}"),
            Self::Read(read) => {
                let sigil = if read.signed { '#' } else { '@' };
                let letter = match read.width {
                    1 => 'b',
                    2 => 's',
                    4 => 'i',
                    _ => 'l',
                };
                let letter = match read.endian {
                    Endian::Little => letter,
                    Endian::Big => letter.to_ascii_uppercase(),
                };
                write!(f, "{sigil}{letter}")
            }
            Self::Binary(op) => f.write_str(op.symbol()),
            Self::Unary(UnaryOp::Complement) => f.write_str("~"),
            Self::Unary(UnaryOp::Not) => f.write_str("!"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

/// A token and the character offset it started at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

/// Split `input` into tokens. Spaces and tabs separate tokens and are
/// otherwise ignored.
///
/// # Errors
///
/// Returns [`CalcError::Syntax`] for malformed literals or memory reads and
/// for characters that start no token.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let offset = i;
        let next = chars.get(i + 1).copied();

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_alphanumeric() {
            let end = scan_word(&chars, i);
            let word: String = chars[i..end].iter().collect();
            let value = parse_literal(&word).ok_or_else(|| {
                CalcError::syntax(offset, SyntaxErrorKind::MalformedLiteral(word.clone()))
            })?;
            tokens.push(Spanned {
                token: Token::Number(value),
                offset,
            });
            i = end;
            continue;
        }

        if c == '@' || c == '#' {
            let end = scan_word(&chars, i + 1);
            let word: String = chars[i..end].iter().collect();
            let read = match &chars[i + 1..end] {
                [letter] => MemRead::from_letter(*letter, c == '#'),
                _ => None,
            }
            .ok_or_else(|| CalcError::syntax(offset, SyntaxErrorKind::MalformedRead(word)))?;
            tokens.push(Spanned {
                token: Token::Read(read),
                offset,
            });
            i = end;
            continue;
        }

        let (token, len) = match (c, next) {
            ('|', Some('|')) => (Token::Binary(BinaryOp::LogicOr), 2),
            ('&', Some('&')) => (Token::Binary(BinaryOp::LogicAnd), 2),
            ('=', Some('=')) => (Token::Binary(BinaryOp::Eq), 2),
            ('!', Some('=')) => (Token::Binary(BinaryOp::Ne), 2),
            ('<', Some('<')) => (Token::Binary(BinaryOp::Shl), 2),
            ('>', Some('>')) => (Token::Binary(BinaryOp::Shr), 2),
            ('<', Some('=')) => (Token::Binary(BinaryOp::Le), 2),
            ('>', Some('=')) => (Token::Binary(BinaryOp::Ge), 2),
            ('|', _) => (Token::Binary(BinaryOp::BitOr), 1),
            ('&', _) => (Token::Binary(BinaryOp::BitAnd), 1),
            ('^', _) => (Token::Binary(BinaryOp::BitXor), 1),
            ('<', _) => (Token::Binary(BinaryOp::Lt), 1),
            ('>', _) => (Token::Binary(BinaryOp::Gt), 1),
            ('+', _) => (Token::Binary(BinaryOp::Add), 1),
            ('-', _) => (Token::Binary(BinaryOp::Sub), 1),
            ('*', _) => (Token::Binary(BinaryOp::Mul), 1),
            ('/', _) => (Token::Binary(BinaryOp::Div), 1),
            ('%', _) => (Token::Binary(BinaryOp::Rem), 1),
            ('~', _) => (Token::Unary(UnaryOp::Complement), 1),
            ('!', _) => (Token::Unary(UnaryOp::Not), 1),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            _ => {
                return Err(CalcError::syntax(
                    offset,
                    SyntaxErrorKind::UnexpectedCharacter(c),
                ));
            }
        };
        tokens.push(Spanned { token, offset });
        i += len;
    }

    Ok(tokens)
}

fn scan_word(chars: &[char], start: usize) -> usize {
    chars[start..]
        .iter()
        .position(|c| !c.is_ascii_alphanumeric())
        .map_or(chars.len(), |n| start + n)
}

/// Parse a numeric literal.
///
/// Prefixes are tried in order: `0x` hex, `0b` binary, `0n` decimal, then a
/// leading `0` means octal. Anything else is hexadecimal, so `101` is 0x101.
/// Values are parsed as 64-bit unsigned and reinterpreted as signed.
pub fn parse_literal(word: &str) -> Option<i64> {
    let (digits, radix) = match word.as_bytes() {
        [b'0', b'x' | b'X', ..] => (&word[2..], 16),
        [b'0', b'b' | b'B', ..] => (&word[2..], 2),
        [b'0', b'n' | b'N', ..] => (&word[2..], 10),
        [b'0', _, ..] => (&word[1..], 8),
        _ => (word, 16),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(u64::cast_signed)
}
