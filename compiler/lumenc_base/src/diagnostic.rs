//! Contains the definition of the [`Diagnostic`] struct and related types.

use crate::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

/// Implement this trait for a type that can report a diagnostic.
///
/// This trait is typically implemented by error and warning types.
pub trait Report {
    /// Creates a diagnostic out of the value.
    ///
    /// Returns [`None`] if the value carries no source location to report
    /// against (for example, a condition found at the end of the file).
    fn report(&self) -> Option<Diagnostic>;
}

/// A struct containing all the information required to display the diagnostic
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Diagnostic {
    /// The span location where the diagnostic occurred.
    pub span: Span,

    /// The message to display to the user.
    pub message: String,

    /// The severity of the diagnostic.
    pub severity: Severity,

    /// The optional help message to display to the user. This will be
    /// displayed alongside the main message.
    pub help_message: Option<String>,

    /// List of related useful information to display to the user.
    pub related: Vec<Related>,
}

/// The related information that is displayed alongside the main
/// [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Related {
    /// The span location to display the message.
    pub span: Span,

    /// The message to display to the user.
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(self.severity, &self.message),
            SourceCodeDisplay::new(&self.span, self.help_message.as_deref())
        )?;

        for related in &self.related {
            write!(
                f,
                "\n{}",
                SourceCodeDisplay::new(&related.span, Some(&related.message))
            )?;
        }

        Ok(())
    }
}
