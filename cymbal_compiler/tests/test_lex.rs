use cymbal_compiler::{
    lex::{Base, LexErrorKind, Lexer},
    tokens::{Keyword, TokenKind},
};

const HELLO: &str = include_str!("programs/hello.cym");

#[test]
fn test_lex_program() {
    use TokenKind as T;

    let tokens = Lexer::new(HELLO)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
    assert_eq!(
        &kinds[..7],
        &[
            T::Keyword(Keyword::Main),
            T::LeftBrace,
            T::Keyword(Keyword::Deo),
            T::Int,
            T::Comma,
            T::Char,
            T::Keyword(Keyword::Deo),
        ]
    );
    assert_eq!(kinds.last(), Some(&T::EOF));
    assert_eq!(tokens.iter().filter(|t| t.kind == T::EOF).count(), 1);
}

#[test]
fn test_comment_line_numbers() {
    let tokens = Lexer::new(HELLO)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    // The leading comment is skipped, but still counts as a line.
    assert_eq!(tokens[0].lexeme, "main");
    assert_eq!(tokens[0].line, 2);

    let newline = tokens.iter().find(|t| t.lexeme == "10").unwrap();
    assert_eq!(newline.line, 5);

    let right_brace = tokens.iter().find(|t| t.kind == TokenKind::RightBrace).unwrap();
    assert_eq!(right_brace.line, 6);
}

#[test]
fn test_comment_at_end_of_input() {
    let mut lexer = Lexer::new("main # no newline after this");
    assert_eq!(lexer.next_token().unwrap().lexeme, "main");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_base_marker_without_digits() {
    let results = Lexer::new("5x").into_iter().collect::<Vec<_>>();

    assert_eq!(results.len(), 2);
    let err = results[0].as_ref().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::NoDigits(Base::Hexadecimal));
    assert_eq!(err.to_string(), "no digits in hexadecimal literal");
    assert_eq!(results[1].as_ref().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_unterminated_char_at_end() {
    let results = Lexer::new("'a").into_iter().collect::<Vec<_>>();

    assert_eq!(results.len(), 2);
    let err = results[0].as_ref().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedChar);
    assert_eq!(err.line, 1);
    assert_eq!(results[1].as_ref().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("");
    for _ in 0..3 {
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::EOF);
        assert_eq!(token.lexeme, "<eof>");
    }
}

#[test]
fn test_identifiers_and_keywords() {
    let tokens = Lexer::new("fn mainly deo_x _x1")
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Fn));
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[2].kind, TokenKind::Ident);
    assert_eq!(tokens[3].kind, TokenKind::Ident);
    assert_eq!(tokens[3].lexeme, "_x1");
}

#[test]
fn test_operators_and_parens() {
    use TokenKind as T;

    let tokens = Lexer::new("( ) + - * /")
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let pairs = tokens
        .iter()
        .map(|t| (t.kind, t.lexeme.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        [
            (T::LeftParen, "("),
            (T::RightParen, ")"),
            (T::Plus, "+"),
            (T::Minus, "-"),
            (T::Star, "*"),
            (T::Slash, "/"),
            (T::EOF, "<eof>"),
        ]
    );
}

#[test]
fn test_operators_without_spaces() {
    use TokenKind as T;

    let kinds = Lexer::new("(1+2)*3")
        .into_iter()
        .map(|result| result.unwrap().kind)
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        [T::LeftParen, T::Int, T::Plus, T::Int, T::RightParen, T::Star, T::Int, T::EOF]
    );
}
