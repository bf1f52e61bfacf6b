//! Contains the definition of all binding errors that can occur while
//! parsing routine declarations.

use derive_more::From;
use enum_as_inner::EnumAsInner;
use lumenc_base::{
    diagnostic::{Diagnostic, Related, Report},
    log::Severity,
    source_file::Span,
};
use lumenc_lexical::token::Token;

/// A routine that was already forward-declared is re-declared with header
/// text, even though the forward declaration already fixed its signature.
///
/// This condition is recoverable: the header is re-parsed to keep the token
/// stream synchronized, but the forwarded signature stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlreadyForwarded {
    /// The case-folded name of the forwarded routine.
    pub routine_name: String,

    /// The first header token found where the terminator was expected.
    pub found: Option<Token>,
}

impl Report for AlreadyForwarded {
    fn report(&self) -> Option<Diagnostic> {
        self.found.as_ref().map(|token| Diagnostic {
            span: token.span().clone(),
            message: format!(
                "the routine `{}` was already forward-declared with its \
                 signature",
                self.routine_name
            ),
            severity: Severity::Error,
            help_message: Some(
                "the parameter list must not be repeated at the defining \
                 declaration"
                    .to_string(),
            ),
            related: Vec::new(),
        })
    }
}

/// A semicolon terminator was expected after a routine header but is absent.
///
/// This condition is recoverable: parsing continues from the current token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSemicolon {
    /// The token found where the semicolon was expected.
    pub found: Option<Token>,
}

impl Report for MissingSemicolon {
    fn report(&self) -> Option<Diagnostic> {
        self.found.as_ref().map(|token| Diagnostic {
            span: token.span().clone(),
            message: "a `;` is expected here".to_string(),
            severity: Severity::Error,
            help_message: None,
            related: Vec::new(),
        })
    }
}

/// An identifier is declared with a name that is already bound in the local
/// scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRedefined {
    /// The case-folded name being redefined.
    pub name: String,

    /// The span of the redefining occurrence.
    pub span: Span,

    /// The span of the previous definition, if it has one.
    pub previous_span: Option<Span>,
}

impl Report for IdentifierRedefined {
    fn report(&self) -> Option<Diagnostic> {
        Some(Diagnostic {
            span: self.span.clone(),
            message: format!("the identifier `{}` is redefined", self.name),
            severity: Severity::Error,
            help_message: None,
            related: self
                .previous_span
                .clone()
                .map(|span| Related {
                    span,
                    message: "previously defined here".to_string(),
                })
                .into_iter()
                .collect(),
        })
    }
}

/// The terminating `.` of a program is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPeriod {
    /// The token found where the period was expected.
    pub found: Option<Token>,
}

impl Report for MissingPeriod {
    fn report(&self) -> Option<Diagnostic> {
        self.found.as_ref().map(|token| Diagnostic {
            span: token.span().clone(),
            message: "a `.` is expected at the end of the program".to_string(),
            severity: Severity::Error,
            help_message: None,
            related: Vec::new(),
        })
    }
}

/// Is an enumeration of all binding errors that can occur while parsing
/// routine declarations.
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    AlreadyForwarded(AlreadyForwarded),
    MissingSemicolon(MissingSemicolon),
    IdentifierRedefined(IdentifierRedefined),
    MissingPeriod(MissingPeriod),
}

impl Report for Error {
    fn report(&self) -> Option<Diagnostic> {
        match self {
            Self::AlreadyForwarded(error) => error.report(),
            Self::MissingSemicolon(error) => error.report(),
            Self::IdentifierRedefined(error) => error.report(),
            Self::MissingPeriod(error) => error.report(),
        }
    }
}
