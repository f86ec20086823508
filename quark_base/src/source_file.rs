//! Contains the code related to the source code input.

use std::{
    fmt::{Debug, Display},
    fs::File,
    ops::Range,
    path::PathBuf,
    sync::Arc,
};

use getset::{CopyGetters, Getters};
use memmap::MmapOptions;
use ouroboros::self_referencing;
use thiserror::Error;

/// Represents an error that occurs when loading/creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),
}

#[self_referencing]
struct MappedSource {
    mapped: Option<memmap::Mmap>,

    #[borrows(mapped)]
    mapped_str: &'this str,
}

impl MappedSource {
    fn create(file: &File) -> Result<Self, Error> {
        let mapped = if file.metadata()?.len() == 0 {
            None
        } else {
            // SAFETY: the mapping is read-only and the text is validated as UTF-8 below.
            Some(unsafe { MmapOptions::new().map(file)? })
        };

        MappedSourceTryBuilder {
            mapped,
            mapped_str_builder: |mapped| {
                mapped
                    .as_ref()
                    .map_or(Ok(""), |mapped| std::str::from_utf8(mapped).map_err(Error::from))
            },
        }
        .try_build()
    }
}

/// Where the text of a [`SourceFile`] lives.
enum Content {
    Owned(String),
    Mapped(MappedSource),
}

impl Content {
    fn as_str(&self) -> &str {
        match self {
            Self::Owned(text) => text,
            Self::Mapped(mapped) => mapped.borrow_mapped_str(),
        }
    }
}

/// Represents an immutable source text together with the path it was read from.
///
/// The text never changes after construction; tokenizers share it through an [`Arc`].
#[derive(Getters)]
pub struct SourceFile {
    content: Content,

    /// Gets the full path to the source file.
    #[get = "pub"]
    full_path: PathBuf,

    lines: Vec<Range<ByteIndex>>,
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("full_path", &self.full_path)
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl SourceFile {
    fn new(full_path: PathBuf, content: Content) -> Arc<Self> {
        let lines = get_line_byte_positions(content.as_str());
        Arc::new(Self {
            content,
            full_path,
            lines,
        })
    }

    /// Creates a source file that owns the given text.
    ///
    /// `full_path` is only used for display purposes; nothing is read from disk.
    #[must_use]
    pub fn in_memory(full_path: impl Into<PathBuf>, text: impl Into<String>) -> Arc<Self> {
        Self::new(full_path.into(), Content::Owned(text.into()))
    }

    /// Loads the source file from the given file by mapping it into memory.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when mapping the file to memory.
    /// - [`Error::Utf8Error`]: Error occurred when converting the mapped bytes to a string.
    pub fn load(file: &File, path: PathBuf) -> Result<Arc<Self>, Error> {
        let mapped = MappedSource::create(file)?;
        Ok(Self::new(path, Content::Mapped(mapped)))
    }

    /// Creates a temporary source file and writes the given displayable object to it.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when creating the temporary file, writing to, and
    ///   mapping it to memory.
    /// - [`Error::Utf8Error`]: Error occurred when converting the mapped bytes to a string.
    pub fn temp(display: impl Display) -> Result<Arc<Self>, Error> {
        use std::io::Write;

        let mut tempfile = tempfile::Builder::new()
            .prefix("quark")
            .suffix(".qk")
            .tempfile()?;

        write!(tempfile.as_file_mut(), "{display}")?;
        tempfile.as_file_mut().flush()?;
        let path = tempfile.path().to_owned();

        Self::load(tempfile.as_file(), path)
    }

    /// Gets the content of the source file.
    #[must_use]
    pub fn content(&self) -> &str { self.content.as_str() }

    /// Gets the line of the source file at the given line number, including its line terminator.
    ///
    /// The line number starts at 1.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        self.get_line_range(line)
            .map(|range| &self.content.as_str()[range])
    }

    /// Gets the byte range of the line at the given line number (starts at 1).
    #[must_use]
    pub fn get_line_range(&self, line: usize) -> Option<Range<ByteIndex>> {
        self.lines.get(line.checked_sub(1)?).cloned()
    }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_number(&self) -> usize { self.lines.len() }

    /// Gets the [`Location`] of the given byte index.
    ///
    /// The index equal to the content length is the location right after the last character.
    #[must_use]
    pub fn get_location(&self, byte_index: ByteIndex) -> Option<Location> {
        let content = self.content.as_str();
        if !content.is_char_boundary(byte_index) {
            return None;
        }

        // the last line range is the only one allowed to end at the content length
        let line = self
            .lines
            .partition_point(|range| range.end <= byte_index)
            .min(self.lines.len() - 1);

        let line_start = self.lines[line].start;
        let column = content[line_start..byte_index].chars().count() + 1;

        Some(Location {
            line: line + 1,
            column,
        })
    }
}

/// Is an unsigned integer that represents a byte index in the source code.
pub type ByteIndex = usize;

/// Represents a range of characters in a source file.
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Gets the start byte index of the span.
    #[get_copy = "pub"]
    start: ByteIndex,

    /// Gets the end byte index of the span (exclusive).
    #[get_copy = "pub"]
    end: ByteIndex,

    /// Gets the source file that the span is located in.
    #[get = "pub"]
    source_file: Arc<SourceFile>,
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("content", &self.str())
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

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        Arc::as_ptr(&self.source_file).hash(state);
    }
}

/// Is a struct pointing to a particular location in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 1).
    pub line: usize,

    /// The column number of the location (starts at 1).
    pub column: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Span {
    /// Creates a span from the given start and end byte indices in the source file.
    ///
    /// Indices past the end of the content are clamped to it, and `start` never exceeds `end`.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: ByteIndex, end: ByteIndex) -> Self {
        let end = end.min(source_file.content().len());
        let start = start.min(end);

        Self {
            start,
            end,
            source_file,
        }
    }

    /// Creates a span from the given start byte index to the end of the source file.
    #[must_use]
    pub fn to_end(source_file: Arc<SourceFile>, start: ByteIndex) -> Self {
        let end = source_file.content().len();
        Self::new(source_file, start, end)
    }

    /// Gets the string slice of the source code that the span represents.
    #[must_use]
    pub fn str(&self) -> &str {
        self.source_file
            .content()
            .get(self.start..self.end)
            .unwrap_or_default()
    }

    /// Gets the starting [`Location`] of the span.
    #[must_use]
    pub fn start_location(&self) -> Location {
        self.source_file
            .get_location(self.start)
            .unwrap_or_default()
    }

    /// Gets the [`Location`] of the last character covered by the span.
    ///
    /// Empty spans report their start location.
    #[must_use]
    pub fn last_location(&self) -> Location {
        let last = self.str().char_indices().last().map_or(0, |(index, _)| index);
        self.source_file
            .get_location(self.start + last)
            .unwrap_or_default()
    }

    /// Joins the starting position of this span with the end position of the given span.
    #[must_use]
    pub fn join(&self, end: &Self) -> Option<Self> {
        if !Arc::ptr_eq(&self.source_file, &end.source_file) || self.start > end.end {
            return None;
        }

        Some(Self {
            start: self.start,
            end: end.end,
            source_file: self.source_file.clone(),
        })
    }
}

fn get_line_byte_positions(text: &str) -> Vec<Range<ByteIndex>> {
    let bytes = text.as_bytes();
    let mut results = Vec::new();
    let mut line_start = 0;
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'\n' => {
                results.push(line_start..index + 1);
                line_start = index + 1;
            }
            b'\r' => {
                // crlf counts as a single terminator
                if bytes.get(index + 1) == Some(&b'\n') {
                    index += 1;
                }
                results.push(line_start..index + 1);
                line_start = index + 1;
            }
            _ => {}
        }

        index += 1;
    }

    results.push(line_start..text.len());

    results
}
