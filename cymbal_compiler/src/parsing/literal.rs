//! Literal values.
use super::{Parse, Parser};
use crate::{lex::Base, tokens::TokenKind};

use smol_str::SmolStr;
use std::{fmt, num::IntErrorKind};

/// A signed 16-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub value: i16,
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Option<Self> {
        use TokenKind as T;

        match input.current().kind {
            T::Int => {
                let token = input.advance();
                match parse_int(&token.lexeme) {
                    Ok(value) => Some(Literal { value }),
                    Err(err) => {
                        input.error(token.line, err);
                        None
                    }
                }
            }
            T::Char => {
                let token = input.advance();
                let value = char_value(&token.lexeme);
                if value.is_none() {
                    let message = format!("malformed character literal {}", token.lexeme);
                    input.error(token.line, message);
                }
                value.map(|value| Literal { value })
            }
            _ => {
                input.error_expected("expression");
                None
            }
        }
    }
}

/// Convert the text of an integer literal token to its value,
/// honoring the base marker.
///
/// ```
/// use cymbal_compiler::parsing::parse_int;
///
/// assert_eq!(parse_int("0x18"), Ok(24));
/// assert_eq!(parse_int("0b11"), Ok(3));
/// assert_eq!(parse_int("42"), Ok(42));
/// ```
pub fn parse_int(lexeme: &str) -> Result<i16, IntLiteralError> {
    let marker = lexeme
        .char_indices()
        .find_map(|(index, c)| Base::from_marker(c).map(|base| (index, base)));

    let (base, digits) = match marker {
        Some((index, base)) => {
            // Only a single zero may come before the marker.
            if &lexeme[..index] != "0" {
                return Err(IntLiteralError::Malformed(lexeme.into()));
            }
            (base, &lexeme[index + 1..])
        }
        None => (Base::Decimal, lexeme),
    };

    // Signs are not part of the literal syntax.
    if digits.is_empty() || !digits.chars().all(|c| base.is_digit(c)) {
        return Err(IntLiteralError::Malformed(lexeme.into()));
    }

    i16::from_str_radix(digits, base.radix()).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => IntLiteralError::Overflow,
        _ => IntLiteralError::Malformed(lexeme.into()),
    })
}

/// Numeric code of the byte in a character literal token.
///
/// The literal byte always sits right before the closing quote,
/// whether it was escaped or not. Returns `None` when the text is
/// not a quoted literal.
///
/// ```
/// use cymbal_compiler::parsing::char_value;
///
/// assert_eq!(char_value("'a'"), Some(97));
/// assert_eq!(char_value("''"), None);
/// ```
pub fn char_value(lexeme: &str) -> Option<i16> {
    lexeme
        .strip_prefix('\'')?
        .strip_suffix('\'')?
        .bytes()
        .last()
        .map(i16::from)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntLiteralError {
    /// Value does not fit in a signed 16-bit integer.
    Overflow,
    Malformed(SmolStr),
}

impl std::error::Error for IntLiteralError {}

impl fmt::Display for IntLiteralError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "integer overflow/underflow"),
            Self::Malformed(lexeme) => write!(f, "malformed integer literal '{lexeme}'"),
        }
    }
}
