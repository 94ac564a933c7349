//! Declaration collector.
//!
//! Top-level `export function` declarations are sagas, `export const|let|var`
//! declarations are selects. Everything else in the module is ignored.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{AnalysisError, Unsupported};
use super::params::summarize_all;
use super::trace::{Path, PathTracer};
use super::AnalysisOptions;
use crate::ast::{Function, Module, PatternKind, StmtKind, VarDecl};
use crate::span::Span;

/// Saga or select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// An exported function, driven step by step in generated tests.
    Saga,
    /// An exported value binding.
    Select,
}

/// One analyzed export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// Summarized parameters; always empty for selects.
    pub params: Vec<String>,
    pub paths: Vec<Path>,
    pub span: Span,
}

/// Result of analyzing one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleAnalysis {
    /// Declarations that analyzed cleanly, in source order.
    pub declarations: Vec<Declaration>,
    /// One entry per declaration that could not be analyzed.
    pub failures: Vec<AnalysisError>,
}

impl ModuleAnalysis {
    pub fn sagas(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations
            .iter()
            .filter(|declaration| declaration.kind == DeclarationKind::Saga)
    }

    pub fn selects(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations
            .iter()
            .filter(|declaration| declaration.kind == DeclarationKind::Select)
    }

    /// Whether every export was analyzed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Analyze every exported declaration of `module`.
pub fn collect(module: &Module, options: &AnalysisOptions) -> ModuleAnalysis {
    let mut analysis = ModuleAnalysis::default();

    for stmt in &module.body {
        let StmtKind::ExportNamed(inner) = &stmt.kind else {
            continue;
        };

        let result = match &inner.kind {
            StmtKind::Function(function) => saga(function, stmt.span, options),
            StmtKind::Var(decl) => select(decl, stmt.span, options),
            _ => continue,
        };

        match result {
            Ok(declaration) => {
                debug!(
                    "{:?} `{}`: {} path(s)",
                    declaration.kind,
                    declaration.name,
                    declaration.paths.len()
                );
                analysis.declarations.push(declaration);
            }
            Err(err) => {
                warn!("{}", err);
                analysis.failures.push(err);
            }
        }
    }

    analysis
}

fn saga(function: &Function, span: Span, options: &AnalysisOptions) -> Result<Declaration, AnalysisError> {
    let name = function
        .name
        .as_ref()
        .map(|ident| ident.name.clone())
        .unwrap_or_default();
    let fail = |source| AnalysisError::new(name.clone(), span, source);

    let params = summarize_all(&function.params, &options.placeholder_prefix).map_err(fail)?;

    let mut tracer = PathTracer::new(options);
    tracer.trace_body(&function.body).map_err(fail)?;

    Ok(Declaration {
        kind: DeclarationKind::Saga,
        name,
        params,
        paths: tracer.finish(),
        span,
    })
}

fn select(decl: &VarDecl, span: Span, options: &AnalysisOptions) -> Result<Declaration, AnalysisError> {
    let Some(first) = decl.declarators.first() else {
        return Err(AnalysisError::new(
            String::new(),
            span,
            Unsupported::Binding {
                node: "VariableDeclaration",
                span,
            },
        ));
    };

    let name = match &first.id.kind {
        PatternKind::Ident(name) => name.clone(),
        other => {
            return Err(AnalysisError::new(
                format!("<{}>", other.name()),
                span,
                Unsupported::Binding {
                    node: other.name(),
                    span: first.id.span,
                },
            ))
        }
    };

    let mut tracer = PathTracer::new(options);
    for declarator in &decl.declarators {
        if let Some(init) = &declarator.init {
            tracer
                .trace_initializer(init)
                .map_err(|source| AnalysisError::new(name.clone(), span, source))?;
        }
    }

    Ok(Declaration {
        kind: DeclarationKind::Select,
        name,
        params: Vec::new(),
        paths: tracer.finish(),
        span,
    })
}
