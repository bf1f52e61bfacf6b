use lumenc_base::{handler::Storage, source_file::SourceFile};

use super::TokenStream;
use crate::{error, token::KeywordKind};

fn tokenize(source: &str) -> TokenStream {
    let source_file = SourceFile::temp(source).unwrap();

    let storage: Storage<error::Error> = Storage::new();
    let token_stream = TokenStream::tokenize(source_file, &storage);

    assert!(storage.as_vec().is_empty());

    token_stream
}

#[test]
fn tokenize_routine_declaration() {
    let token_stream =
        tokenize("procedure ratio(x: integer); { header } begin end;");

    let significant = token_stream
        .iter()
        .filter(|token| token.is_significant())
        .collect::<Vec<_>>();

    assert_eq!(significant.len(), 11);

    assert_eq!(
        significant[0].as_keyword().unwrap().keyword,
        KeywordKind::Procedure
    );
    assert_eq!(significant[1].as_identifier().unwrap().span.str(), "ratio");
    assert_eq!(significant[2].as_punctuation().unwrap().punctuation, '(');
    assert_eq!(significant[3].as_identifier().unwrap().span.str(), "x");
    assert_eq!(significant[4].as_punctuation().unwrap().punctuation, ':');
    assert_eq!(
        significant[5].as_identifier().unwrap().span.str(),
        "integer"
    );
    assert_eq!(significant[6].as_punctuation().unwrap().punctuation, ')');
    assert_eq!(significant[7].as_punctuation().unwrap().punctuation, ';');
    assert_eq!(
        significant[8].as_keyword().unwrap().keyword,
        KeywordKind::Begin
    );
    assert_eq!(
        significant[9].as_keyword().unwrap().keyword,
        KeywordKind::End
    );
    assert_eq!(significant[10].as_punctuation().unwrap().punctuation, ';');
}

#[test]
fn tokenize_assignment_tokens() {
    let token_stream = tokenize("x := 1.5");

    let significant = token_stream
        .iter()
        .filter(|token| token.is_significant())
        .collect::<Vec<_>>();

    assert_eq!(significant.len(), 4);
    assert_eq!(significant[0].as_identifier().unwrap().span.str(), "x");
    assert_eq!(significant[1].as_punctuation().unwrap().punctuation, ':');
    assert_eq!(significant[2].as_punctuation().unwrap().punctuation, '=');
    assert_eq!(
        significant[3].as_numeric_literal().unwrap().span.str(),
        "1.5"
    );
}

#[test]
fn unterminated_comment_is_reported_and_dropped() {
    let source_file = SourceFile::temp("begin (* never closed").unwrap();

    let storage: Storage<error::Error> = Storage::new();
    let token_stream = TokenStream::tokenize(source_file, &storage);

    assert_eq!(storage.as_vec().len(), 1);

    // only the tokens before the unterminated comment survive
    let significant = token_stream
        .iter()
        .filter(|token| token.is_significant())
        .count();
    assert_eq!(significant, 1);
}
