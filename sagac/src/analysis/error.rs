//! Analysis errors.

use serde::Serialize;
use thiserror::Error;

use crate::diagnostics::Diagnostic;
use crate::span::Span;

/// Error code for an expression the renderer cannot print.
pub const UNSUPPORTED_EXPRESSION: &str = "E0101";
/// Error code for a saga parameter that is not an object pattern.
pub const UNSUPPORTED_PARAMETER: &str = "E0102";
/// Error code for an exported binding that is not a plain identifier.
pub const UNSUPPORTED_BINDING: &str = "E0103";

/// A construct the analysis has no rule for.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Unsupported {
    #[error("unsupported expression `{node}`")]
    Expression { node: &'static str, span: Span },
    #[error("unsupported parameter pattern `{node}`")]
    ParameterPattern { node: &'static str, span: Span },
    #[error("unsupported binding `{node}`")]
    Binding { node: &'static str, span: Span },
}

impl Unsupported {
    /// Location of the offending node.
    pub fn span(&self) -> Span {
        match self {
            Unsupported::Expression { span, .. }
            | Unsupported::ParameterPattern { span, .. }
            | Unsupported::Binding { span, .. } => *span,
        }
    }

    /// ESTree name of the offending node.
    pub fn node(&self) -> &'static str {
        match self {
            Unsupported::Expression { node, .. }
            | Unsupported::ParameterPattern { node, .. }
            | Unsupported::Binding { node, .. } => *node,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Unsupported::Expression { .. } => UNSUPPORTED_EXPRESSION,
            Unsupported::ParameterPattern { .. } => UNSUPPORTED_PARAMETER,
            Unsupported::Binding { .. } => UNSUPPORTED_BINDING,
        }
    }
}

/// A declaration that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("cannot analyze `{declaration}`: {source}")]
pub struct AnalysisError {
    /// Name of the exported declaration.
    pub declaration: String,
    /// Span of the whole declaration.
    pub declaration_span: Span,
    pub source: Unsupported,
}

impl AnalysisError {
    pub fn new(declaration: impl Into<String>, declaration_span: Span, source: Unsupported) -> Self {
        Self {
            declaration: declaration.into(),
            declaration_span,
            source,
        }
    }

    /// Convert to a [`Diagnostic`] pointing at the offending node.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string(), self.source.span())
            .with_code(self.source.code())
            .with_label(
                self.declaration_span,
                format!("while analyzing `{}`", self.declaration),
            )
    }
}
