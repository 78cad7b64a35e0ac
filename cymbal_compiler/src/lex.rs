//! Lexical analysis (tokenizer)
use crate::tokens::{Keyword, Token, TokenKind};

use itertools::{multipeek, MultiPeek};
use std::{error, fmt, iter::Iterator, str::CharIndices};

/// Lexical analyzer.
pub struct Lexer<'a> {
    source: SourceText<'a>,
    /// Byte position where the current token starts.
    token_start: usize,
    /// Line where the current token starts.
    token_line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source_code: &'a str) -> Self {
        Self {
            source: SourceText::new(source_code),
            token_start: 0,
            token_line: 1,
        }
    }

    /// Scan the source characters and construct the next token.
    ///
    /// Once the end of the source is reached, every call returns
    /// an end-of-file token.
    #[rustfmt::skip]
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        use TokenKind as T;

        self.skip_trivia();
        self.start_token();

        let next_char = match self.source.next_char() {
            Some(c) => c,
            None => return Ok(Token::new(T::EOF, "<eof>", self.token_line)),
        };

        match next_char {
            '{'             => Ok(self.make_token(T::LeftBrace)),
            '}'             => Ok(self.make_token(T::RightBrace)),
            '('             => Ok(self.make_token(T::LeftParen)),
            ')'             => Ok(self.make_token(T::RightParen)),
            ','             => Ok(self.make_token(T::Comma)),
            '+'             => Ok(self.make_token(T::Plus)),
            '-'             => Ok(self.make_token(T::Minus)),
            '*'             => Ok(self.make_token(T::Star)),
            '/'             => Ok(self.make_token(T::Slash)),
            '\''            => self.consume_char(),
            '0'..='9'       => self.consume_number(),
            '_' | 'a'..='z'
                | 'A'..='Z' => Ok(self.consume_ident()),
            _               => Err(self.error(LexErrorKind::UnknownCharacter(next_char))),
        }
    }

    /// Prime the lexer state for recording a new token.
    fn start_token(&mut self) {
        self.token_start = self.source.offset;
        self.token_line = self.source.line;
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.token_fragment(), self.token_line)
    }

    #[cold]
    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            line: self.token_line,
        }
    }

    fn token_fragment(&self) -> &'a str {
        &self.source.original[self.token_start..self.source.offset]
    }

    /// Consume whitespace and comment lines until a
    /// token starting character is encountered.
    fn skip_trivia(&mut self) {
        loop {
            match self.source.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.source.next_char();
                }
                Some('#') => self.erase_comment(),
                _ => break,
            }
        }
    }

    /// Erase comment line up to, but not including, the trailing newline.
    fn erase_comment(&mut self) {
        while let Some(c) = self.source.peek_char() {
            if c == '\n' {
                break;
            }
            self.source.next_char();
        }
    }

    fn consume_ident(&mut self) -> Token {
        while let Some('_' | 'a'..='z' | 'A'..='Z' | '0'..='9') = self.source.peek_char() {
            self.source.next_char();
        }

        // Reserved words take priority over user defined identifiers.
        let token_kind = Keyword::parse(self.token_fragment())
            .map(TokenKind::Keyword)
            .unwrap_or(TokenKind::Ident);
        self.make_token(token_kind)
    }

    /// Make an integer literal token.
    ///
    /// A run of decimal digits may be followed by a base
    /// marker and a run of digits valid in that base.
    fn consume_number(&mut self) -> Result<Token, LexError> {
        while let Some('0'..='9') = self.source.peek_char() {
            self.source.next_char();
        }

        if let Some(base) = self.source.peek_char().and_then(Base::from_marker) {
            self.source.next_char();

            let mut scanned = false;
            while let Some(c) = self.source.peek_char() {
                if !base.is_digit(c) {
                    break;
                }
                self.source.next_char();
                scanned = true;
            }

            if !scanned {
                return Err(self.error(LexErrorKind::NoDigits(base)));
            }
        }

        Ok(self.make_token(TokenKind::Int))
    }

    /// Make a character literal token. The opening quote
    /// has already been consumed.
    fn consume_char(&mut self) -> Result<Token, LexError> {
        let c = match self.source.next_char() {
            // Escape introducer, the following byte is taken as is.
            Some('\\') => self.source.next_char(),
            other => other,
        }
        .ok_or_else(|| self.error(LexErrorKind::UnterminatedChar))?;

        if self.source.peek_char() != Some('\'') {
            return Err(self.error(LexErrorKind::UnterminatedChar));
        }
        self.source.next_char();

        if !c.is_ascii() {
            return Err(self.error(LexErrorKind::NonAsciiChar(c)));
        }

        Ok(self.make_token(TokenKind::Char))
    }
}

impl<'a> IntoIterator for Lexer<'a> {
    type Item = Result<Token, LexError>;
    type IntoIter = LexerIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        LexerIter {
            lexer: self,
            done: false,
        }
    }
}

/// Convenience iterator that wraps the lexer.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LexerIter<'a> {
    // Track end so an EOF token is emitted once.
    done: bool,
    lexer: Lexer<'a>,
}

impl<'a> Iterator for LexerIter<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.lexer.next_token();
        if let Ok(Token {
            kind: TokenKind::EOF, ..
        }) = result
        {
            self.done = true;
        }
        Some(result)
    }
}

/// Numeral notation of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Decimal,
    Hexadecimal,
    Binary,
}

impl Base {
    /// Notation selected by the marker character following the leading digits.
    #[rustfmt::skip]
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            'x' => Some(Self::Hexadecimal),
            'b' => Some(Self::Binary),
            _   => None,
        }
    }

    #[rustfmt::skip]
    pub fn radix(self) -> u32 {
        match self {
            Self::Decimal     => 10,
            Self::Hexadecimal => 16,
            Self::Binary      => 2,
        }
    }

    pub fn is_digit(self, c: char) -> bool {
        c.is_digit(self.radix())
    }
}

impl fmt::Display for Base {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Decimal     => write!(f, "decimal"),
            Self::Hexadecimal => write!(f, "hexadecimal"),
            Self::Binary      => write!(f, "binary"),
        }
    }
}

/// Wrapper for source code that keeps a cursor position
/// and the current line.
struct SourceText<'a> {
    /// Keep reference to the source so tokens can
    /// slice fragments from it.
    original: &'a str,

    /// Iterator over UTF-8 encoded source code.
    ///
    /// Peeking advances an internal peek cursor, which is
    /// restored when calling `MultiPeek::next()` or
    /// `MultiPeek::reset_peek()`.
    chars: MultiPeek<CharIndices<'a>>,

    /// Byte position of the next unconsumed character.
    offset: usize,
    line: u32,
}

impl<'a> SourceText<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            original: source,
            chars: multipeek(source.char_indices()),
            offset: 0,
            line: 1,
        }
    }

    /// Advance the cursor and return the consumed character.
    fn next_char(&mut self) -> Option<char> {
        let (index, c) = self.chars.next()?;
        self.offset = index + c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Peeks the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.reset_peek();
        self.chars.peek().map(|(_, c)| *c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Line where the malformed token starts.
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    UnknownCharacter(char),
    /// Base marker without any digits following it.
    NoDigits(Base),
    UnterminatedChar,
    NonAsciiChar(char),
}

impl error::Error for LexError {}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use LexErrorKind as E;
        match self {
            E::UnknownCharacter(c) => write!(f, "unrecognized character {c:?}"),
            E::NoDigits(base) => write!(f, "no digits in {base} literal"),
            E::UnterminatedChar => write!(f, "unterminated character literal"),
            E::NonAsciiChar(c) => {
                write!(f, "character literal must be a single byte, found {c:?}")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn kinds(source: &str) -> Vec<Result<TokenKind, LexErrorKind>> {
        Lexer::new(source)
            .into_iter()
            .map(|result| result.map(|t| t.kind).map_err(|e| e.kind))
            .collect()
    }

    #[test]
    fn test_number_bases() {
        let mut lexer = Lexer::new("42 0x1f 0b101");
        assert_eq!(lexer.next_token().unwrap().lexeme, "42");
        assert_eq!(lexer.next_token().unwrap().lexeme, "0x1f");
        assert_eq!(lexer.next_token().unwrap().lexeme, "0b101");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
    }

    #[test]
    fn test_number_without_digits() {
        assert_eq!(
            kinds("5x"),
            vec![
                Err(LexErrorKind::NoDigits(Base::Hexadecimal)),
                Ok(TokenKind::EOF)
            ]
        );
        assert_eq!(
            kinds("0b2"),
            vec![
                Err(LexErrorKind::NoDigits(Base::Binary)),
                Ok(TokenKind::Int),
                Ok(TokenKind::EOF)
            ]
        );
    }

    #[test]
    fn test_char_literal() {
        let mut lexer = Lexer::new(r"'a' '\'' '\\'");
        assert_eq!(lexer.next_token().unwrap().lexeme, "'a'");
        assert_eq!(lexer.next_token().unwrap().lexeme, r"'\''");
        assert_eq!(lexer.next_token().unwrap().lexeme, r"'\\'");
    }

    #[test]
    fn test_unterminated_char() {
        assert_eq!(
            kinds("'a"),
            vec![Err(LexErrorKind::UnterminatedChar), Ok(TokenKind::EOF)]
        );
        assert_eq!(
            kinds("'"),
            vec![Err(LexErrorKind::UnterminatedChar), Ok(TokenKind::EOF)]
        );
    }

    #[test]
    fn test_non_ascii_char() {
        assert_eq!(
            kinds("'é'"),
            vec![Err(LexErrorKind::NonAsciiChar('é')), Ok(TokenKind::EOF)]
        );
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(
            kinds("{ $ }"),
            vec![
                Ok(TokenKind::LeftBrace),
                Err(LexErrorKind::UnknownCharacter('$')),
                Ok(TokenKind::RightBrace),
                Ok(TokenKind::EOF)
            ]
        );
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("  # only a comment");
        for _ in 0..3 {
            let token = lexer.next_token().unwrap();
            assert_eq!(token.kind, TokenKind::EOF);
            assert_eq!(token.line, 1);
        }
    }

    #[test]
    fn test_error_messages() {
        let err = Lexer::new("0x").next_token().unwrap_err();
        assert_eq!(err.to_string(), "no digits in hexadecimal literal");
        let err = Lexer::new("'a").next_token().unwrap_err();
        assert_eq!(err.to_string(), "unterminated character literal");
        let err = Lexer::new("\n\n@").next_token().unwrap_err();
        assert_eq!(err.to_string(), "unrecognized character '@'");
        assert_eq!(err.line, 3);
    }
}
