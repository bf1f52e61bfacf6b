//! Provides the types used for displaying messages and source code snippets
//! to the console.

use colored::Colorize;

use crate::source_file::{SourceFile, Span};

/// Represents the severity of a message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// An error that prevents the program from compiling.
    Error,

    /// A warning that does not prevent the program from compiling.
    Warning,

    /// An informational message.
    Info,
}

/// A console message consisting of a colored severity header followed by the
/// message text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Message {
    /// The severity of the message.
    pub severity: Severity,

    /// The text of the message.
    pub message: String,
}

impl Message {
    /// Creates a new [`Message`] with the given severity and text.
    pub fn new(severity: Severity, message: impl std::fmt::Display) -> Self {
        Self { severity, message: message.to_string() }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = match self.severity {
            Severity::Error => "[error]:".bright_red().bold(),
            Severity::Warning => "[warning]:".yellow().bold(),
            Severity::Info => "[info]:".bright_green().bold(),
        };

        write!(f, "{header} {}", self.message.bold())
    }
}

/// Displays a region of the source code pointed to by a [`Span`], with an
/// optional help message printed underneath the highlighted region.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceCodeDisplay<'a> {
    /// The span of the source code to display.
    pub span: &'a Span,

    /// The help message to display underneath the highlighted region.
    pub help_message: Option<&'a str>,
}

impl<'a> SourceCodeDisplay<'a> {
    /// Creates a new [`SourceCodeDisplay`] with the given span and optional
    /// help message.
    #[must_use]
    pub const fn new(span: &'a Span, help_message: Option<&'a str>) -> Self {
        Self { span, help_message }
    }
}

fn digit_count(mut number: usize) -> usize {
    let mut digits = 0;

    while number > 0 {
        number /= 10;
        digits += 1;
    }

    digits.max(1)
}

impl std::fmt::Display for SourceCodeDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source_file = self.span.source_file();
        let start_location = self.span.start_location();
        let end_location = self.span.end_location();

        let start_line = start_location.line;
        let end_line = end_location
            .map_or_else(|| source_file.line_number(), |location| location.line);
        let is_multiline = start_line != end_line;

        let line_number_width = digit_count(end_line);
        let pipe = "┃".bright_cyan().bold();

        writeln!(
            f,
            "{:width$} {} {}:{}:{}",
            "",
            "-->".bright_cyan().bold(),
            source_file.full_path().display(),
            start_location.line,
            start_location.column,
            width = line_number_width
        )?;
        writeln!(f, "{:width$} {pipe}", "", width = line_number_width)?;

        for line_number in start_line..=end_line {
            let Some(line) = source_file.get_line(line_number) else {
                continue;
            };

            write!(f, "{line_number:<line_number_width$} {pipe} ")?;

            for character in line.chars() {
                if character != SourceFile::NEW_LINE {
                    write!(f, "{character}")?;
                }
            }
            writeln!(f)?;
        }

        if is_multiline {
            write!(f, "{:width$} {pipe}", "", width = line_number_width)?;

            if let Some(help_message) = self.help_message {
                write!(f, " {}: {help_message}", "help".bold())?;
            }
        } else {
            // highlight the span with a caret line
            write!(f, "{:width$} {pipe} ", "", width = line_number_width)?;

            let caret_count = self
                .span
                .str()
                .chars()
                .filter(|x| *x != SourceFile::NEW_LINE)
                .count()
                .max(1);

            write!(
                f,
                "{:space$}{}",
                "",
                "^".repeat(caret_count).bright_red().bold(),
                space = start_location.column - 1
            )?;

            if let Some(help_message) = self.help_message {
                write!(f, " {}: {help_message}", "help".bold())?;
            }
        }

        Ok(())
    }
}
