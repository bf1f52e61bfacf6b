//! Contains all kinds of errors that can occur while parsing the source
//! code.

use derive_more::From;
use enum_as_inner::EnumAsInner;
use lumenc_base::{
    diagnostic::{Diagnostic, Report},
    log::Severity,
};
use lumenc_lexical::token::{KeywordKind, Token};

fn found_string(found: Option<&Token>) -> String {
    let Some(token) = found else {
        return "the end of the file".to_string();
    };

    match token {
        Token::WhiteSpaces(..) => "whitespaces".to_string(),
        Token::Identifier(..) => {
            format!("`{}` identifier", token.span().str())
        }
        Token::Keyword(..) => format!("`{}` keyword", token.span().str()),
        Token::Punctuation(..) | Token::NumericLiteral(..) => {
            format!("`{}`", token.span().str())
        }
        Token::Comment(..) => "a comment".to_string(),
    }
}

fn expectation_diagnostic(
    found: Option<&Token>,
    message: String,
    label: &str,
) -> Option<Diagnostic> {
    found.map(|token| Diagnostic {
        span: token.span().clone(),
        message,
        severity: Severity::Error,
        help_message: Some(label.to_string()),
        related: Vec::new(),
    })
}

/// An identifier is expected but found another invalid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierExpected {
    /// The invalid token that was found.
    pub found: Option<Token>,
}

impl Report for IdentifierExpected {
    fn report(&self) -> Option<Diagnostic> {
        expectation_diagnostic(
            self.found.as_ref(),
            format!(
                "an identifier is expected, found: {}",
                found_string(self.found.as_ref())
            ),
            "identifier expected here",
        )
    }
}

/// A keyword of a particular kind is expected but found another invalid
/// token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordExpected {
    /// The kind of the expected keyword.
    pub expected: KeywordKind,

    /// The invalid token that was found.
    pub found: Option<Token>,
}

impl Report for KeywordExpected {
    fn report(&self) -> Option<Diagnostic> {
        expectation_diagnostic(
            self.found.as_ref(),
            format!(
                "the keyword `{}` is expected, found: {}",
                self.expected,
                found_string(self.found.as_ref())
            ),
            "keyword expected here",
        )
    }
}

/// A punctuation of a particular character is expected but found another
/// invalid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctuationExpected {
    /// The character of the expected punctuation.
    pub expected: char,

    /// The invalid token that was found.
    pub found: Option<Token>,
}

impl Report for PunctuationExpected {
    fn report(&self) -> Option<Diagnostic> {
        expectation_diagnostic(
            self.found.as_ref(),
            format!(
                "a punctuation of character `{}` is expected, found: {}",
                self.expected,
                found_string(self.found.as_ref())
            ),
            "punctuation expected here",
        )
    }
}

/// A type specifier syntax is expected but found another invalid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpecifierExpected {
    /// The invalid token that was found.
    pub found: Option<Token>,
}

impl Report for TypeSpecifierExpected {
    fn report(&self) -> Option<Diagnostic> {
        expectation_diagnostic(
            self.found.as_ref(),
            format!(
                "a type specifier syntax is expected, found: {}",
                found_string(self.found.as_ref())
            ),
            "type specifier expected here",
        )
    }
}

/// A statement syntax is expected but found another invalid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementExpected {
    /// The invalid token that was found.
    pub found: Option<Token>,
}

impl Report for StatementExpected {
    fn report(&self) -> Option<Diagnostic> {
        expectation_diagnostic(
            self.found.as_ref(),
            format!(
                "a statement syntax is expected, found: {}",
                found_string(self.found.as_ref())
            ),
            "statement expected here",
        )
    }
}

/// An expression syntax is expected but found another invalid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionExpected {
    /// The invalid token that was found.
    pub found: Option<Token>,
}

impl Report for ExpressionExpected {
    fn report(&self) -> Option<Diagnostic> {
        expectation_diagnostic(
            self.found.as_ref(),
            format!(
                "an expression syntax is expected, found: {}",
                found_string(self.found.as_ref())
            ),
            "expression expected here",
        )
    }
}

/// Is an enumeration containing all kinds of syntactic errors that can occur
/// while parsing the source code.
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    IdentifierExpected(IdentifierExpected),
    KeywordExpected(KeywordExpected),
    PunctuationExpected(PunctuationExpected),
    TypeSpecifierExpected(TypeSpecifierExpected),
    StatementExpected(StatementExpected),
    ExpressionExpected(ExpressionExpected),
}

impl Report for Error {
    fn report(&self) -> Option<Diagnostic> {
        match self {
            Self::IdentifierExpected(error) => error.report(),
            Self::KeywordExpected(error) => error.report(),
            Self::PunctuationExpected(error) => error.report(),
            Self::TypeSpecifierExpected(error) => error.report(),
            Self::StatementExpected(error) => error.report(),
            Self::ExpressionExpected(error) => error.report(),
        }
    }
}
