use lumenc_base::{
    handler::{Panic, Storage},
    source_file::SourceFile,
};
use lumenc_lexical::token_stream::TokenStream;

use crate::{error, parser::Parser};

fn tokenize(source: &str) -> TokenStream {
    let source_file = SourceFile::temp(source).unwrap();

    TokenStream::tokenize(source_file, &Panic)
}

fn parse<T>(
    source: &str,
    f: impl FnOnce(&mut Parser, &Storage<error::Error>) -> T,
) -> (T, Vec<error::Error>) {
    let token_stream = tokenize(source);
    let mut parser = Parser::new(&token_stream);

    let storage: Storage<error::Error> = Storage::new();
    let result = f(&mut parser, &storage);

    (result, storage.into_vec())
}

#[test]
fn parse_assignment_statement() {
    let (statement, errors) = parse("ratio := count + 1", |parser, storage| {
        parser.parse_statement(storage)
    });

    assert!(errors.is_empty());

    let assignment = statement.unwrap().into_assignment().unwrap();
    assert_eq!(assignment.variable().span.str(), "ratio");

    let expression = assignment.expression();
    assert!(expression.relational().is_none());
    assert_eq!(expression.left().rest().len(), 1);
}

#[test]
fn parse_compound_statement_with_nested_blocks() {
    let source = "begin \
                  x := 1; \
                  if x = 1 then x := 2 else begin y := 3 end; \
                  while x < 10 do x := x + 1 \
                  end";

    let (statement, errors) = parse(source, |parser, storage| {
        parser.parse_compound_statement(storage)
    });

    assert!(errors.is_empty());

    let compound = statement.unwrap();
    assert_eq!(compound.statements().len(), 3);

    assert!(compound.statements()[0].is_assignment());

    let if_statement = compound.statements()[1].as_if().unwrap();
    assert!(if_statement.then_statement().is_assignment());
    assert!(if_statement
        .else_portion()
        .as_ref()
        .unwrap()
        .statement()
        .is_compound());

    let while_statement = compound.statements()[2].as_while().unwrap();
    assert!(while_statement.statement().is_assignment());
}

#[test]
fn missing_semicolon_between_statements_is_recovered() {
    let (statement, errors) = parse("begin x := 1 y := 2 end", |parser, storage| {
        parser.parse_compound_statement(storage)
    });

    let compound = statement.unwrap();
    assert_eq!(compound.statements().len(), 2);

    assert_eq!(errors.len(), 1);
    let error = errors[0].as_punctuation_expected().unwrap();
    assert_eq!(error.expected, ';');
}

#[test]
fn redundant_semicolons_are_tolerated() {
    let (statement, errors) = parse("begin ; x := 1 ;; end", |parser, storage| {
        parser.parse_compound_statement(storage)
    });

    assert!(errors.is_empty());
    assert_eq!(statement.unwrap().statements().len(), 1);
}

#[test]
fn parse_formal_parameters() {
    let (parameters, errors) =
        parse("(x, y: integer; var z: real)", |parser, storage| {
            parser.parse_formal_parameters(storage)
        });

    assert!(errors.is_empty());

    let parameters = parameters.unwrap();
    let groups = parameters
        .parameter_groups()
        .as_ref()
        .unwrap()
        .elements()
        .collect::<Vec<_>>();

    assert_eq!(groups.len(), 2);

    assert!(groups[0].var_keyword().is_none());
    assert_eq!(groups[0].identifiers().len(), 2);
    assert_eq!(
        groups[0].type_specifier().identifier().span.str(),
        "integer"
    );

    assert!(groups[1].var_keyword().is_some());
    assert_eq!(groups[1].identifiers().len(), 1);
    assert_eq!(groups[1].type_specifier().identifier().span.str(), "real");
}

#[test]
fn parse_empty_formal_parameters() {
    let (parameters, errors) = parse("()", |parser, storage| {
        parser.parse_formal_parameters(storage)
    });

    assert!(errors.is_empty());
    assert!(parameters.unwrap().parameter_groups().is_none());
}

#[test]
fn parse_var_section() {
    let (section, errors) =
        parse("var x, y: integer; z: real; begin", |parser, storage| {
            parser.parse_var_section(storage)
        });

    assert!(errors.is_empty());

    let section = section.unwrap();
    assert_eq!(section.declarations().len(), 2);
    assert_eq!(section.declarations()[0].identifiers().len(), 2);
    assert_eq!(
        section.declarations()[1]
            .type_specifier()
            .identifier()
            .span
            .str(),
        "real"
    );
}

#[test]
fn expression_precedence() {
    let (expression, errors) = parse("1 + 2 * 3", |parser, storage| {
        parser.parse_expression(storage)
    });

    assert!(errors.is_empty());

    let expression = expression.unwrap();
    let simple = expression.left();

    // the addition chains two terms; the multiplication stays inside the
    // second term
    assert_eq!(simple.rest().len(), 1);
    assert!(simple.rest()[0].0.is_plus());
    assert_eq!(simple.rest()[0].1.rest().len(), 1);
    assert!(simple.rest()[0].1.rest()[0].0.is_times());
}

#[test]
fn relational_operators() {
    for source in ["a = b", "a <> b", "a <= b", "a >= b", "a < b", "a > b"] {
        let (expression, errors) = parse(source, |parser, storage| {
            parser.parse_expression(storage)
        });

        assert!(errors.is_empty(), "failed on {source}");
        assert!(
            expression.unwrap().relational().is_some(),
            "failed on {source}"
        );
    }
}

#[test]
fn statement_expected_error() {
    let (statement, errors) = parse("42", |parser, storage| {
        parser.parse_statement(storage)
    });

    assert!(statement.is_none());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_statement_expected());
}
