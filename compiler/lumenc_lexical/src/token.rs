//! Is a module containing the [`Token`] type and all of its related types.

use std::{str::FromStr, sync::Arc};

use derive_more::From;
use enum_as_inner::EnumAsInner;
use lumenc_base::{
    handler::Handler,
    source_file::{SourceElement, SourceFile, SourceIterator, Span},
};
use strum_macros::{Display, EnumString};
use thiserror::Error;

use crate::error::{self, UnterminatedComment};

/// Is an enumeration of all the reserved words of the language.
///
/// The language is case-insensitive, so `begin`, `BEGIN`, and `Begin` all
/// map to [`KeywordKind::Begin`]. Note that `forward` is deliberately not a
/// keyword: it is a directive recognized as a plain identifier right after a
/// routine header.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum KeywordKind {
    And,
    Begin,
    Div,
    Do,
    Else,
    End,
    Function,
    If,
    Mod,
    Not,
    Or,
    Procedure,
    Program,
    Then,
    Var,
    While,
}

/// Represents a contiguous sequence of whitespace characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WhiteSpaces {
    /// Is the span that makes up the token.
    pub span: Span,
}

impl SourceElement for WhiteSpaces {
    fn span(&self) -> Span { self.span.clone() }
}

/// Is an enumeration of the two comment forms of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommentKind {
    /// A comment enclosed in `{` and `}`.
    Brace,

    /// A comment enclosed in `(*` and `*)`.
    Parenthesized,
}

/// Represents a comment, including its delimiters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Comment {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the kind of the comment.
    pub kind: CommentKind,
}

impl SourceElement for Comment {
    fn span(&self) -> Span { self.span.clone() }
}

/// Represents an identifier token: a name that is not a reserved word.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    /// Is the span that makes up the token.
    pub span: Span,
}

impl SourceElement for Identifier {
    fn span(&self) -> Span { self.span.clone() }
}

/// Represents a reserved word of the language.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keyword {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the [`KeywordKind`] of the keyword.
    pub keyword: KeywordKind,
}

impl SourceElement for Keyword {
    fn span(&self) -> Span { self.span.clone() }
}

/// Is an enumeration of the two numeric literal forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericLiteralKind {
    /// A whole number, e.g. `42`.
    Integer,

    /// A number with a fractional part, e.g. `3.14`.
    Real,
}

/// Represents a hardcoded numeric literal value in the source code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumericLiteral {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the kind of the numeric literal.
    pub kind: NumericLiteralKind,
}

impl SourceElement for NumericLiteral {
    fn span(&self) -> Span { self.span.clone() }
}

/// Represents a single punctuation character, e.g. `;`, `(`, `.`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Punctuation {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the character of the punctuation.
    pub punctuation: char,
}

impl SourceElement for Punctuation {
    fn span(&self) -> Span { self.span.clone() }
}

/// Is an enumeration of all the tokens of the language.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From,
)]
#[allow(missing_docs)]
pub enum Token {
    WhiteSpaces(WhiteSpaces),
    Identifier(Identifier),
    Keyword(Keyword),
    NumericLiteral(NumericLiteral),
    Punctuation(Punctuation),
    Comment(Comment),
}

impl Token {
    /// Gets the span that makes up the token.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::WhiteSpaces(token) => &token.span,
            Self::Identifier(token) => &token.span,
            Self::Keyword(token) => &token.span,
            Self::NumericLiteral(token) => &token.span,
            Self::Punctuation(token) => &token.span,
            Self::Comment(token) => &token.span,
        }
    }

    /// Returns `true` if the token is significant to the parser (not a
    /// whitespace or a comment).
    #[must_use]
    pub const fn is_significant(&self) -> bool {
        !matches!(self, Self::WhiteSpaces(..) | Self::Comment(..))
    }
}

impl SourceElement for Token {
    fn span(&self) -> Span { self.span().clone() }
}

/// Is an error that can occur when invoking [`Token::lex`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error,
)]
#[allow(missing_docs)]
pub enum Error {
    #[error("encountered the end of the source code iterator")]
    EndOfSourceCodeIteratorArgument,

    #[error("encountered a fatal lexical error; the error is reported to the handler")]
    FatalLexicalError,
}

/// Checks if the given character can start an identifier.
fn is_first_identifier_character(character: char) -> bool {
    character == '_' || character.is_ascii_alphabetic()
}

/// Checks if the given character can continue an identifier.
fn is_identifier_character(character: char) -> bool {
    character == '_' || character.is_ascii_alphanumeric()
}

/// Increments the iterator until the predicate returns false.
fn walk_iter(iter: &mut SourceIterator, predicate: impl Fn(char) -> bool) {
    while let Some((_, character)) = iter.peek() {
        if !predicate(character) {
            break;
        }

        iter.next();
    }
}

impl Token {
    /// Lexes a single token out of the given iterator.
    ///
    /// The iterator must iterate over the content of the given
    /// `source_file`; the spans of the produced tokens point into it.
    ///
    /// # Errors
    /// - [`Error::EndOfSourceCodeIteratorArgument`]: the iterator is
    ///   exhausted.
    /// - [`Error::FatalLexicalError`]: an unrecoverable lexical error was
    ///   found and reported to the `handler`.
    pub fn lex(
        source_file: &Arc<SourceFile>,
        iter: &mut SourceIterator,
        handler: &dyn Handler<error::Error>,
    ) -> Result<Self, Error> {
        let (start, character) =
            iter.next().ok_or(Error::EndOfSourceCodeIteratorArgument)?;

        // whitespaces
        if character.is_whitespace() {
            walk_iter(iter, char::is_whitespace);
            return Ok(WhiteSpaces {
                span: span_from(source_file, iter, start),
            }
            .into());
        }

        // identifier or keyword
        if is_first_identifier_character(character) {
            walk_iter(iter, is_identifier_character);
            let span = span_from(source_file, iter, start);

            return Ok(KeywordKind::from_str(span.str()).map_or_else(
                |_| Identifier { span: span.clone() }.into(),
                |keyword| Keyword { span: span.clone(), keyword }.into(),
            ));
        }

        // numeric literal
        if character.is_ascii_digit() {
            walk_iter(iter, |x| x.is_ascii_digit());

            // a dot makes the literal a real number only when a digit
            // follows, so that the program-terminating dot is left alone
            let mut kind = NumericLiteralKind::Integer;
            let mut lookahead = iter.clone();
            if matches!(lookahead.next(), Some((_, '.')))
                && lookahead.peek().is_some_and(|(_, x)| x.is_ascii_digit())
            {
                iter.next();
                walk_iter(iter, |x| x.is_ascii_digit());
                kind = NumericLiteralKind::Real;
            }

            return Ok(NumericLiteral {
                span: span_from(source_file, iter, start),
                kind,
            }
            .into());
        }

        // brace comment
        if character == '{' {
            loop {
                match iter.next() {
                    Some((_, '}')) => {
                        return Ok(Comment {
                            span: span_from(source_file, iter, start),
                            kind: CommentKind::Brace,
                        }
                        .into())
                    }
                    Some(..) => (),
                    None => {
                        handler.receive(
                            UnterminatedComment {
                                span: Span::new(
                                    source_file.clone(),
                                    start,
                                    start + 1,
                                ),
                            }
                            .into(),
                        );
                        return Err(Error::FatalLexicalError);
                    }
                }
            }
        }

        // parenthesized comment
        if character == '(' && matches!(iter.peek(), Some((_, '*'))) {
            iter.next();

            loop {
                match iter.next() {
                    Some((_, '*'))
                        if matches!(iter.peek(), Some((_, ')'))) =>
                    {
                        iter.next();
                        return Ok(Comment {
                            span: span_from(source_file, iter, start),
                            kind: CommentKind::Parenthesized,
                        }
                        .into());
                    }
                    Some(..) => (),
                    None => {
                        handler.receive(
                            UnterminatedComment {
                                span: Span::new(
                                    source_file.clone(),
                                    start,
                                    start + 2,
                                ),
                            }
                            .into(),
                        );
                        return Err(Error::FatalLexicalError);
                    }
                }
            }
        }

        // any other character is a punctuation
        Ok(Punctuation {
            span: Span::new(
                source_file.clone(),
                start,
                start + character.len_utf8(),
            ),
            punctuation: character,
        }
        .into())
    }
}

/// Creates a span from the given start byte index up to the current position
/// of the iterator.
fn span_from(
    source_file: &Arc<SourceFile>,
    iter: &mut SourceIterator,
    start: usize,
) -> Span {
    let end = iter
        .peek()
        .map_or_else(|| source_file.content().len(), |(index, _)| index);

    Span::new(source_file.clone(), start, end)
}

#[cfg(test)]
mod tests;
