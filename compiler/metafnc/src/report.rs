//! Diagnostic rendering.

use ariadne::{Config, Label, Report, ReportKind, Source};
use metafn_java::SyntaxError;

/// Ariadne needs a non-empty span inside the source to draw a label.
fn label_range(error: &SyntaxError, len: usize) -> std::ops::Range<usize> {
    let start = error.span.start.min(len.saturating_sub(1));
    start..error.span.end.min(len).max(start + 1)
}

/// Render a syntax error against its source text.
pub fn render_syntax_error(file: &str, source: &str, error: &SyntaxError, color: bool) -> String {
    let range = label_range(error, source.len());
    let mut out = Vec::new();
    let written = Report::build(ReportKind::Error, file, range.start)
        .with_config(Config::default().with_color(color))
        .with_message("syntax error")
        .with_label(Label::new((file, range)).with_message(&error.message))
        .finish()
        .write((file, Source::from(source)), &mut out);

    match written {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        // Fall back to a plain line if the report cannot be drawn.
        Err(_) => format!("error: {file}: {} at {}\n", error.message, error.span),
    }
}
