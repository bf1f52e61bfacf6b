//! Contains the code related to the source code input.

use std::{
    cmp::Ordering,
    fmt::Debug,
    fs::File,
    hash::{Hash, Hasher},
    io::{Read, Write},
    iter::Peekable,
    ops::Range,
    path::PathBuf,
    str::CharIndices,
    sync::Arc,
};

use getset::Getters;
use thiserror::Error;

/// The index of a byte in a source file.
pub type ByteIndex = usize;

/// Represents an error that occurs when loading/creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

/// Represents a source file input for the compiler.
#[derive(Clone, Getters)]
pub struct SourceFile {
    content: String,

    /// Gets the full path to the source file.
    #[get = "pub"]
    full_path: PathBuf,

    /// The byte ranges for each line in the source file (including the
    /// newline)
    lines: Vec<Range<ByteIndex>>,
}

impl SourceFile {
    /// The character that terminates a line.
    pub const NEW_LINE: char = '\n';
    /// [`Self::NEW_LINE`] as a string slice.
    pub const NEW_LINE_STR: &'static str = "\n";

    /// Creates a new source file from the given content.
    #[must_use]
    pub fn new(content: String, full_path: PathBuf) -> Self {
        let lines = get_line_byte_positions(&content);
        Self { content, full_path, lines }
    }

    /// Reads the whole content of the given file and creates a new source
    /// file out of it.
    pub fn load(mut file: File, full_path: PathBuf) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        let content = std::str::from_utf8(&bytes)?.to_owned();
        Ok(Self::new(content, full_path))
    }

    /// Creates a temporary file containing the given source and loads it.
    ///
    /// This is mainly useful for tests that need a [`SourceFile`] out of an
    /// inline string.
    pub fn temp(source: impl std::fmt::Display) -> Result<Arc<Self>, Error> {
        let content = source.to_string();

        let (mut file, path) = tempfile::NamedTempFile::new()?
            .keep()
            .map_err(|error| Error::Io(error.error))?;
        file.write_all(content.as_bytes())?;

        Ok(Arc::new(Self::new(content, path)))
    }

    /// Gets the content of the source file.
    #[must_use]
    pub fn content(&self) -> &str { &self.content }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_number(&self) -> usize { self.lines.len() }

    /// Gets the line of the source file at the given line number.
    ///
    /// The line number starts at 1.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }

        self.lines.get(line - 1).map(|range| &self.content[range.clone()])
    }

    /// Translates the given byte index into a [`Location`].
    ///
    /// Returns [`None`] if the byte index doesn't point into the source file
    /// or doesn't lie on a character boundary.
    #[must_use]
    pub fn get_location(&self, byte_index: ByteIndex) -> Option<Location> {
        if !self.content.is_char_boundary(byte_index)
            || byte_index >= self.content.len()
        {
            return None;
        }

        // the index of the line that contains the byte index
        let line = self.lines.partition_point(|range| range.end <= byte_index);
        let line_range = &self.lines[line];

        let column = self.content[line_range.start..byte_index].chars().count() + 1;

        Some(Location { line: line + 1, column })
    }

    /// Returns an iterator over the characters of the source file along with
    /// their byte positions.
    #[must_use]
    pub fn iter(&self) -> SourceIterator<'_> {
        SourceIterator { iterator: self.content.char_indices().peekable() }
    }
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("full_path", &self.full_path)
            .field("lines", &self.lines.len())
            .finish()
    }
}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        self.full_path == other.full_path && self.content == other.content
    }
}

impl Eq for SourceFile {}

/// Is an iterator over the characters of a [`SourceFile`], yielding the byte
/// position of each character along with the character itself.
#[derive(Debug, Clone)]
pub struct SourceIterator<'a> {
    iterator: Peekable<CharIndices<'a>>,
}

impl SourceIterator<'_> {
    /// Peeks at the next character without consuming it.
    pub fn peek(&mut self) -> Option<(ByteIndex, char)> {
        self.iterator.peek().copied()
    }
}

impl Iterator for SourceIterator<'_> {
    type Item = (ByteIndex, char);

    fn next(&mut self) -> Option<Self::Item> { self.iterator.next() }
}

/// Represents a location in a source file, expressed in line and column
/// numbers.
///
/// Both the line and the column start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// The line number of the location.
    pub line: usize,

    /// The column number of the location.
    pub column: usize,
}

/// Represents a continuous range of characters in a [`SourceFile`].
#[derive(Clone, Getters)]
pub struct Span {
    /// Gets the source file that the span points to.
    #[get = "pub"]
    source_file: Arc<SourceFile>,

    start: ByteIndex,
    end: ByteIndex,
}

impl Span {
    /// Creates a span from the given start and end byte indices in the
    /// source file.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: ByteIndex, end: ByteIndex) -> Self {
        debug_assert!(start <= end);
        Self { source_file, start, end }
    }

    /// Gets the byte index where the span starts (inclusive).
    #[must_use]
    pub const fn start(&self) -> ByteIndex { self.start }

    /// Gets the byte index where the span ends (exclusive).
    #[must_use]
    pub const fn end(&self) -> ByteIndex { self.end }

    /// Gets the string slice of the source code that the span covers.
    #[must_use]
    pub fn str(&self) -> &str { &self.source_file.content()[self.start..self.end] }

    /// Gets the starting [`Location`] of the span.
    #[must_use]
    pub fn start_location(&self) -> Location {
        self.source_file.get_location(self.start).unwrap()
    }

    /// Gets the ending [`Location`] of the span.
    ///
    /// Returns [`None`] if the span ends at the end of the source file.
    #[must_use]
    pub fn end_location(&self) -> Option<Location> {
        self.source_file.get_location(self.end)
    }

    /// Joins this span with another span of the same source file, covering
    /// both of them.
    ///
    /// Returns [`None`] if the two spans point to different source files.
    #[must_use]
    pub fn join(&self, other: &Self) -> Option<Self> {
        if !Arc::ptr_eq(&self.source_file, &other.source_file) {
            return None;
        }

        Some(Self {
            source_file: self.source_file.clone(),
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        })
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("str", &self.str())
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source_file, &other.source_file)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        Arc::as_ptr(&self.source_file)
            .cmp(&Arc::as_ptr(&other.source_file))
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
    }
}

impl Hash for Span {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.source_file).hash(state);
        self.start.hash(state);
        self.end.hash(state);
    }
}

/// Represents an element of the syntax tree that lives in a region of the
/// source code.
pub trait SourceElement {
    /// Gets the span of the element.
    fn span(&self) -> Span;
}

impl<T: SourceElement> SourceElement for Box<T> {
    fn span(&self) -> Span { self.as_ref().span() }
}

fn get_line_byte_positions(text: &str) -> Vec<Range<ByteIndex>> {
    let mut lines = Vec::new();
    let mut start = 0;

    for (byte_index, character) in text.char_indices() {
        if character == SourceFile::NEW_LINE {
            lines.push(start..byte_index + 1);
            start = byte_index + 1;
        }
    }

    // the last line has no trailing newline
    lines.push(start..text.len());

    lines
}

#[cfg(test)]
mod tests;
