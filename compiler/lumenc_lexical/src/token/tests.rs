use lumenc_base::{handler::Storage, source_file::SourceFile};

use super::{CommentKind, KeywordKind, NumericLiteralKind, Token};
use crate::error;

fn tokenize(source: &str) -> Token {
    let source_file = SourceFile::temp(source).unwrap();
    let mut iterator = source_file.iter();

    let storage: Storage<error::Error> = Storage::new();
    let token = Token::lex(&source_file, &mut iterator, &storage).unwrap();

    assert!(storage.as_vec().is_empty());

    token
}

#[test]
fn keywords_are_case_insensitive() {
    for source in ["begin", "BEGIN", "Begin"] {
        let token = tokenize(source).into_keyword().unwrap();
        assert_eq!(token.keyword, KeywordKind::Begin);
        assert_eq!(token.span.str(), source);
    }
}

#[test]
fn identifier() {
    let token = tokenize("counter_1 := 0").into_identifier().unwrap();
    assert_eq!(token.span.str(), "counter_1");
}

#[test]
fn forward_is_an_identifier_not_a_keyword() {
    let token = tokenize("forward;").into_identifier().unwrap();
    assert_eq!(token.span.str(), "forward");
}

#[test]
fn integer_literal() {
    let token = tokenize("42;").into_numeric_literal().unwrap();
    assert_eq!(token.kind, NumericLiteralKind::Integer);
    assert_eq!(token.span.str(), "42");
}

#[test]
fn real_literal() {
    let token = tokenize("3.14;").into_numeric_literal().unwrap();
    assert_eq!(token.kind, NumericLiteralKind::Real);
    assert_eq!(token.span.str(), "3.14");
}

#[test]
fn integer_followed_by_program_terminator() {
    // the dot must not be folded into the literal
    let token = tokenize("42.").into_numeric_literal().unwrap();
    assert_eq!(token.kind, NumericLiteralKind::Integer);
    assert_eq!(token.span.str(), "42");
}

#[test]
fn brace_comment() {
    let token = tokenize("{ a comment } begin").into_comment().unwrap();
    assert_eq!(token.kind, CommentKind::Brace);
    assert_eq!(token.span.str(), "{ a comment }");
}

#[test]
fn parenthesized_comment() {
    let token = tokenize("(* a comment *) begin").into_comment().unwrap();
    assert_eq!(token.kind, CommentKind::Parenthesized);
    assert_eq!(token.span.str(), "(* a comment *)");
}

#[test]
fn lone_parenthesis_is_a_punctuation() {
    let token = tokenize("(x)").into_punctuation().unwrap();
    assert_eq!(token.punctuation, '(');
}

#[test]
fn whitespaces() {
    let token = tokenize("  \t\n  begin").into_white_spaces().unwrap();
    assert_eq!(token.span.str(), "  \t\n  ");
}

#[test]
fn unterminated_comment_is_fatal() {
    let source_file = SourceFile::temp("{ never closed").unwrap();
    let mut iterator = source_file.iter();

    let storage: Storage<error::Error> = Storage::new();
    let result = Token::lex(&source_file, &mut iterator, &storage);

    assert_eq!(result, Err(super::Error::FatalLexicalError));

    let errors = storage.into_vec();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].span().str(), "{");
}
