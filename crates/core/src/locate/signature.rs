use super::buffer::{BadLocation, Span, TextBuffer};
use crate::model::SourceRange;

const BODY_OPEN: char = '{';
const TERMINATOR: char = ';';
const ESCAPE: char = '\\';

/// The literal header of a declaration as it appears in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Raw text from the declaration start up to (not including) the first
    /// unescaped `{` or `;`. Embedded newlines and indentation are kept.
    pub text: String,
    /// Buffer offset the text was read from.
    pub start: usize,
}

impl Signature {
    /// Text to search for: the signature without trailing whitespace.
    pub fn needle(&self) -> &str {
        self.text.trim_end()
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.start + self.needle().len())
    }
}

/// Reads the signature of the declaration at `range` from `buffer`.
///
/// Scans character by character from `(begin_line, begin_column)` to the end
/// of `end_line`, stopping at the first unescaped body-open or terminator.
/// Fails if the recorded position does not exist in the buffer.
pub fn extract_signature<B: TextBuffer + ?Sized>(
    buffer: &B,
    range: &SourceRange,
) -> Result<Signature, BadLocation> {
    let line_start = buffer.line_start_offset(range.begin_line)?;
    let line_end = buffer.line_end_offset(range.begin_line)?;
    let end = buffer.line_end_offset(range.end_line)?;

    let line_text = buffer.text_at(Span::new(line_start, line_end))?;
    let content_end = line_start + line_text.trim_end_matches(['\n', '\r']).len();

    // The column must land on a character of the line itself, not its terminator.
    let start = line_start + range.begin_column.saturating_sub(1);
    if start >= content_end {
        return Err(BadLocation::Offset {
            offset: start,
            len: content_end,
        });
    }

    let region = buffer.text_at(Span::new(start, end))?;

    let mut text = String::new();
    let mut escaped = false;
    for ch in region.chars() {
        if !escaped && (ch == BODY_OPEN || ch == TERMINATOR) {
            break;
        }
        escaped = !escaped && ch == ESCAPE;
        text.push(ch);
    }

    Ok(Signature { text, start })
}
