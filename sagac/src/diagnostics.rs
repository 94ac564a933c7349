//! Diagnostics reported by the front-end and the analysis.
//!
//! A [`Diagnostic`] is plain data; [`Diagnostic::render`] turns it into an
//! annotated source snippet with `ariadne`. Every diagnostic is an error:
//! it either rejects the module or skips one declaration.

use ariadne::{Config, IndexType, Label as ReportLabel, Report, ReportKind, Source};

use crate::span::Span;

/// A secondary annotation attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

/// A located message about the analyzed module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub code: Option<String>,
    pub labels: Vec<Label>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            code: None,
            labels: Vec::new(),
        }
    }

    /// Attach an error code such as `E0001`.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach a secondary label.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
        });
        self
    }

    /// Render the diagnostic against its source text. Spans are byte
    /// offsets, so the report is configured with [`IndexType::Byte`].
    ///
    /// Falls back to `file:line:col: message` if the report cannot be
    /// written.
    pub fn render(&self, file: &str, source: &str, color: bool) -> String {
        let file_id = file.to_string();
        let primary = clamp(self.span, source);

        let mut report = Report::build(ReportKind::Error, file_id.clone(), primary.start)
            .with_config(
                Config::default()
                    .with_color(color)
                    .with_index_type(IndexType::Byte),
            )
            .with_message(&self.message)
            .with_label(ReportLabel::new((file_id.clone(), primary.range())).with_message(&self.message));
        if let Some(code) = &self.code {
            report = report.with_code(code);
        }
        for label in &self.labels {
            let span = clamp(label.span, source);
            report = report.with_label(
                ReportLabel::new((file_id.clone(), span.range())).with_message(&label.message),
            );
        }

        let mut out = Vec::new();
        match report
            .finish()
            .write((file_id, Source::from(source.to_string())), &mut out)
        {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => {
                let (line, col) = self.span.line_col(source);
                format!("{file}:{line}:{col}: {}", self.message)
            }
        }
    }
}

/// Keep report spans inside the source and at least one character wide
/// where possible.
fn clamp(span: Span, source: &str) -> Span {
    let len = source.len();
    let start = span.start.min(len);
    let end = span.end.clamp(start, len);
    if start != end {
        return Span::new(start, end);
    }
    match source.get(end..).and_then(|rest| rest.chars().next()) {
        Some(ch) => Span::new(start, end + ch.len_utf8()),
        None => Span::new(start, end),
    }
}
