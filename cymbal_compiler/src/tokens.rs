use smol_str::SmolStr;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token.
    pub lexeme: SmolStr,
    /// Line the token starts on, counting from 1.
    pub line: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: impl Into<SmolStr>, line: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum TokenKind {
    LeftBrace,  // `{`
    RightBrace, // `}`
    LeftParen,  // `(`
    RightParen, // `)`
    Comma,      // `,`
    Plus,       // `+`
    Minus,      // `-`
    Star,       // `*`
    Slash,      // `/`

    Ident,
    /// Integer literal, possibly with a base prefix.
    Int,
    /// Character literal, including the quotes.
    Char,

    /// Identifier in the set of reserved words.
    Keyword(Keyword),

    /// End-of-file
    EOF,
}

impl fmt::Display for TokenKind {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenKind as T;
        match self {
            T::LeftBrace  => write!(f, "'{{'"),
            T::RightBrace => write!(f, "'}}'"),
            T::LeftParen  => write!(f, "'('"),
            T::RightParen => write!(f, "')'"),
            T::Comma      => write!(f, "','"),
            T::Plus       => write!(f, "'+'"),
            T::Minus      => write!(f, "'-'"),
            T::Star       => write!(f, "'*'"),
            T::Slash      => write!(f, "'/'"),
            T::Ident      => write!(f, "identifier"),
            T::Int        => write!(f, "integer literal"),
            T::Char       => write!(f, "character literal"),
            T::Keyword(k) => write!(f, "keyword '{k}'"),
            T::EOF        => write!(f, "end of file"),
        }
    }
}

/// Reserved keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Fn,
    Main,
    Deo,
}

impl Keyword {
    #[rustfmt::skip]
    pub fn parse(text: impl AsRef<str>) -> Option<Self> {
        match text.as_ref() {
            "fn"   => Some(Self::Fn),
            "main" => Some(Self::Main),
            "deo"  => Some(Self::Deo),
            _      => None,
        }
    }
}

impl fmt::Display for Keyword {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Fn   => write!(f, "fn"),
            Self::Main => write!(f, "main"),
            Self::Deo  => write!(f, "deo"),
        }
    }
}

impl FromStr for Keyword {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Keyword::parse(s).ok_or(())
    }
}
