//! Contains the [`TokenStream`] struct and its related types.

use std::sync::Arc;

use derive_more::Deref;
use getset::Getters;
use lumenc_base::{handler::Handler, source_file::SourceFile};

use crate::{
    error,
    token::{self, Token},
};

/// Is the flat list of tokens produced by the lexical analysis phase.
///
/// Blocks of the language are delimited by the `begin`/`end` keywords and
/// `{` opens a comment, so no delimiter tree is built; the parser walks the
/// stream by index instead.
#[derive(Debug, Clone, PartialEq, Eq, Deref, Getters)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,

    /// The source file used to generate the tokens.
    #[get = "pub"]
    source_file: Arc<SourceFile>,
}

impl TokenStream {
    /// Tokenizes the given source code.
    ///
    /// This function tokenizes the given source file by calling
    /// [`Token::lex()`] repeatedly until the source code is exhausted.
    /// Lexical errors encountered along the way are reported to the
    /// `handler`; the erroneous portions are excluded from the stream.
    #[must_use]
    pub fn tokenize(
        source_file: Arc<SourceFile>,
        handler: &dyn Handler<error::Error>,
    ) -> Self {
        let mut tokens = Vec::new();
        let mut iterator = source_file.iter();

        loop {
            match Token::lex(&source_file, &mut iterator, handler) {
                Ok(token) => tokens.push(token),
                Err(token::Error::EndOfSourceCodeIteratorArgument) => break,
                Err(token::Error::FatalLexicalError) => (),
            }
        }

        Self { tokens, source_file }
    }
}

#[cfg(test)]
mod tests;
