//! Contains the [`Parser`] type, the cursor that the parsing functions in
//! [`crate::syntax_tree`] drive over a [`TokenStream`].

use lumenc_base::handler::Handler;
use lumenc_lexical::{
    token::{Identifier, Keyword, KeywordKind, Punctuation, Token},
    token_stream::TokenStream,
};

use crate::error::{
    self, IdentifierExpected, KeywordExpected, PunctuationExpected,
};

/// Represents a cursor walking through a [`TokenStream`] producing syntax
/// trees.
///
/// The parser reports the syntactic errors it encounters to the [`Handler`]
/// passed to the individual `parse_*` methods; a method returning [`None`]
/// has already reported the reason.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    token_stream: &'a TokenStream,
    index: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser positioned at the beginning of the given token
    /// stream.
    #[must_use]
    pub const fn new(token_stream: &'a TokenStream) -> Self {
        Self { token_stream, index: 0 }
    }

    /// Returns the token at the current position without consuming it.
    ///
    /// Returns [`None`] if the token stream is exhausted.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> {
        self.token_stream.get(self.index)
    }

    /// Moves the cursor past the current token.
    pub fn forward(&mut self) { self.index += 1; }

    /// Finds the next significant token in the token stream, consuming all
    /// insignificant tokens along the way and leaving the cursor at the
    /// significant token.
    ///
    /// A token is considered significant if it is not a whitespace or a
    /// comment.
    ///
    /// Returns [`None`] if the token stream is exhausted before a significant
    /// token is found.
    pub fn stop_at_significant(&mut self) -> Option<&'a Token> {
        while let Some(token) = self.peek() {
            if token.is_significant() {
                return Some(token);
            }

            self.index += 1;
        }

        None
    }

    /// Skips tokens until the given predicate returns `true`, leaving the
    /// cursor at the token that satisfied it.
    ///
    /// This is used for error recovery. Returns [`None`] if the token stream
    /// is exhausted before any token satisfies the predicate.
    pub fn stop_at(
        &mut self,
        predicate: impl Fn(&Token) -> bool,
    ) -> Option<&'a Token> {
        while let Some(token) = self.peek() {
            if predicate(token) {
                return Some(token);
            }

            self.index += 1;
        }

        None
    }

    /// Expects the next significant token to be an [`Identifier`] and
    /// consumes it.
    ///
    /// Otherwise, reports an [`IdentifierExpected`] error and leaves the
    /// cursor at the offending token.
    pub fn parse_identifier(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<Identifier> {
        match self.stop_at_significant() {
            Some(Token::Identifier(identifier)) => {
                self.forward();
                Some(identifier.clone())
            }
            found => {
                handler.receive(error::Error::IdentifierExpected(
                    IdentifierExpected { found: found.cloned() },
                ));
                None
            }
        }
    }

    /// Expects the next significant token to be a [`Keyword`] of the given
    /// kind and consumes it.
    ///
    /// Otherwise, reports a [`KeywordExpected`] error and leaves the cursor
    /// at the offending token.
    pub fn parse_keyword(
        &mut self,
        expected: KeywordKind,
        handler: &dyn Handler<error::Error>,
    ) -> Option<Keyword> {
        match self.stop_at_significant() {
            Some(Token::Keyword(keyword)) if keyword.keyword == expected => {
                self.forward();
                Some(keyword.clone())
            }
            found => {
                handler.receive(error::Error::KeywordExpected(
                    KeywordExpected { expected, found: found.cloned() },
                ));
                None
            }
        }
    }

    /// Expects the next token to be a [`Punctuation`] of the given character
    /// and consumes it.
    ///
    /// If `skip_insignificant` is `true`, the insignificant tokens before the
    /// punctuation are skipped; otherwise the punctuation must be exactly at
    /// the current position.
    ///
    /// On mismatch, reports a [`PunctuationExpected`] error and leaves the
    /// cursor at the offending token.
    pub fn parse_punctuation(
        &mut self,
        expected: char,
        skip_insignificant: bool,
        handler: &dyn Handler<error::Error>,
    ) -> Option<Punctuation> {
        let found = if skip_insignificant {
            self.stop_at_significant()
        } else {
            self.peek()
        };

        match found {
            Some(Token::Punctuation(punctuation))
                if punctuation.punctuation == expected =>
            {
                self.forward();
                Some(punctuation.clone())
            }
            found => {
                handler.receive(error::Error::PunctuationExpected(
                    PunctuationExpected { expected, found: found.cloned() },
                ));
                None
            }
        }
    }
}
