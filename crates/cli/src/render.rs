use declscope_core::locate::{Span, TextBuffer};
use declscope_core::view::StatusEvent;
use nu_ansi_term::{Color, Style};
use tokio::sync::mpsc::UnboundedReceiver;

pub fn highlight_style() -> Style {
    Style::new().on(Color::Yellow).fg(Color::Black)
}

/// Prints every pending status event to stderr.
pub fn drain_status(status: &mut UnboundedReceiver<StatusEvent>) {
    while let Ok(event) = status.try_recv() {
        let style = match event {
            StatusEvent::NothingFound(_) | StatusEvent::RegexError(_) => Color::Red.normal(),
            _ => Color::DarkGray.normal(),
        };
        eprintln!("{}", style.paint(event.to_string()));
    }
}

/// Renders the lines around the buffer's selection, gutter-numbered, with
/// the selected text painted in `style`. Empty when nothing is selected.
pub fn render_selection<B: TextBuffer + ?Sized>(buffer: &B, context: usize, style: Style) -> String {
    let Some(span) = buffer.selection() else {
        return String::new();
    };
    let (Ok(first), Ok(last)) = (
        buffer.line_of_offset(span.start),
        buffer.line_of_offset(span.end),
    ) else {
        return String::new();
    };

    let from = first.saturating_sub(context).max(1);
    let to = (last + context).min(buffer.line_count());
    let width = to.to_string().len();

    let mut out = Vec::new();
    for line in from..=to {
        let (Ok(start), Ok(end)) = (buffer.line_start_offset(line), buffer.line_end_offset(line))
        else {
            continue;
        };
        let Ok(text) = buffer.text_at(Span::new(start, end)) else {
            continue;
        };
        let text = text.trim_end_matches(['\n', '\r']);
        let end = start + text.len();

        let lo = span.start.clamp(start, end) - start;
        let hi = span.end.clamp(start, end) - start;
        let rendered = if lo < hi {
            format!(
                "{}{}{}",
                &text[..lo],
                style.paint(&text[lo..hi]),
                &text[hi..]
            )
        } else {
            text.to_string()
        };

        let marker = if (first..=last).contains(&line) { '>' } else { ' ' };
        out.push(format!("{} {:>width$} | {}", marker, line, rendered, width = width));
    }
    out.join("\n")
}
