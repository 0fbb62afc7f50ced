use std::fmt;
use thiserror::Error;

/// Half-open byte range `start..end` within a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A line or offset that does not exist in the buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BadLocation {
    #[error("line {line} is outside the buffer ({line_count} lines)")]
    Line { line: usize, line_count: usize },
    #[error("offset {offset} is outside the buffer (length {len})")]
    Offset { offset: usize, len: usize },
    #[error("offset {offset} is not on a character boundary")]
    CharBoundary { offset: usize },
}

/// The rendered text surface a locator reads and drives.
///
/// Lines are 1-based; offsets are 0-based byte positions in the full text.
pub trait TextBuffer {
    fn text(&self) -> &str;

    fn line_count(&self) -> usize;

    /// Offset of the first byte of `line`.
    fn line_start_offset(&self, line: usize) -> Result<usize, BadLocation>;

    /// Offset just past `line`, including its terminator. The last line
    /// ends at the buffer length.
    fn line_end_offset(&self, line: usize) -> Result<usize, BadLocation>;

    fn caret(&self) -> usize;

    /// Moves the caret and drops any selection.
    fn set_caret(&mut self, offset: usize) -> Result<(), BadLocation>;

    fn selection(&self) -> Option<Span>;

    /// Selects `span` and parks the caret at its start.
    fn select(&mut self, span: Span) -> Result<(), BadLocation>;

    fn len(&self) -> usize {
        self.text().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn text_at(&self, span: Span) -> Result<&str, BadLocation> {
        let text = self.text();
        check_offset(text, span.start)?;
        check_offset(text, span.end)?;
        if span.start > span.end {
            return Err(BadLocation::Offset {
                offset: span.start,
                len: text.len(),
            });
        }
        Ok(&text[span.start..span.end])
    }

    /// 1-based line containing `offset`.
    fn line_of_offset(&self, offset: usize) -> Result<usize, BadLocation> {
        check_offset(self.text(), offset)?;
        let mut lo = 1;
        let mut hi = self.line_count();
        while lo < hi {
            let mid = (lo + hi + 1) / 2;
            if self.line_start_offset(mid)? <= offset {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        Ok(lo)
    }
}

fn check_offset(text: &str, offset: usize) -> Result<(), BadLocation> {
    if offset > text.len() {
        return Err(BadLocation::Offset {
            offset,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(offset) {
        return Err(BadLocation::CharBoundary { offset });
    }
    Ok(())
}

/// In-memory [`TextBuffer`] holding the whole file.
#[derive(Debug, Clone, Default)]
pub struct StringBuffer {
    text: String,
    line_starts: Vec<usize>,
    caret: usize,
    selection: Option<Span>,
}

impl StringBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            text,
            line_starts,
            caret: 0,
            selection: None,
        }
    }

    fn line_index(&self, line: usize) -> Result<usize, BadLocation> {
        if line == 0 || line > self.line_starts.len() {
            return Err(BadLocation::Line {
                line,
                line_count: self.line_starts.len(),
            });
        }
        Ok(line - 1)
    }
}

impl TextBuffer for StringBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_start_offset(&self, line: usize) -> Result<usize, BadLocation> {
        let idx = self.line_index(line)?;
        Ok(self.line_starts[idx])
    }

    fn line_end_offset(&self, line: usize) -> Result<usize, BadLocation> {
        let idx = self.line_index(line)?;
        Ok(self
            .line_starts
            .get(idx + 1)
            .copied()
            .unwrap_or(self.text.len()))
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_caret(&mut self, offset: usize) -> Result<(), BadLocation> {
        check_offset(&self.text, offset)?;
        self.caret = offset;
        self.selection = None;
        Ok(())
    }

    fn selection(&self) -> Option<Span> {
        self.selection
    }

    fn select(&mut self, span: Span) -> Result<(), BadLocation> {
        self.text_at(span)?;
        self.caret = span.start;
        self.selection = Some(span);
        Ok(())
    }
}
