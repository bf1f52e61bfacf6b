//! Contains all kinds of lexical errors that can occur while tokenizing the
//! source code.

use derive_more::From;
use enum_as_inner::EnumAsInner;
use lumenc_base::{
    diagnostic::{Diagnostic, Report},
    log::Severity,
    source_file::Span,
};

/// A comment was opened but never closed before the end of the file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnterminatedComment {
    /// The span of the opening delimiter of the comment.
    pub span: Span,
}

impl Report for UnterminatedComment {
    fn report(&self) -> Option<Diagnostic> {
        Some(Diagnostic {
            span: self.span.clone(),
            message: "found an unterminated comment".to_string(),
            severity: Severity::Error,
            help_message: Some(
                "this comment is opened here but never closed".to_string(),
            ),
            related: Vec::new(),
        })
    }
}

/// Is an enumeration containing all kinds of lexical errors that can occur
/// while tokenizing the source code.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From,
)]
#[allow(missing_docs)]
pub enum Error {
    UnterminatedComment(UnterminatedComment),
}

impl Error {
    /// Gets the span where the error occurred.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::UnterminatedComment(error) => &error.span,
        }
    }
}

impl Report for Error {
    fn report(&self) -> Option<Diagnostic> {
        match self {
            Self::UnterminatedComment(error) => error.report(),
        }
    }
}
