//! Path tracer.
//!
//! Walks a declaration body and enumerates its execution paths. Paths live
//! in a [`PathArena`]; a branch with an alternate arm (an `else`, or a
//! `catch` handler) snapshots the current path before the first arm runs
//! and registers the snapshot once the first arm is done, so paths come out
//! in depth-first source order.
//!
//! A `return` freezes its path. The enclosing block then moves on with the
//! first path in the arena that is still open, or stops when there is none.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::error::Unsupported;
use super::render::Renderer;
use super::AnalysisOptions;
use crate::ast::{Block, Expr, ExprKind, Stmt, StmtKind};

/// How a generated test drives the generator to reach an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// `saga.next()`
    Next,
    /// `saga.throw()`: the assertion is only reached through a failure.
    Throw,
}

impl StepKind {
    /// Name of the generator method that performs the step.
    pub fn method(self) -> &'static str {
        match self {
            StepKind::Next => "next",
            StepKind::Throw => "throw",
        }
    }
}

/// One expected effect on a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    pub step: StepKind,
    /// Rendered yielded expression.
    pub effect: String,
}

/// One execution trace through a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// One marker per alternate arm taken to reach this path.
    pub variation: String,
    pub assertions: Vec<Assertion>,
    /// Set by a `return`. A returned path takes no more assertions.
    pub returned: bool,
}

/// Index of a path in its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathId(usize);

impl PathId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns every path discovered for one declaration.
#[derive(Debug, Clone, Default)]
pub struct PathArena {
    paths: Vec<Path>,
}

impl PathArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path and return its id.
    pub fn push(&mut self, path: Path) -> PathId {
        self.paths.push(path);
        PathId(self.paths.len() - 1)
    }

    pub fn get(&self, id: PathId) -> &Path {
        &self.paths[id.0]
    }

    pub fn get_mut(&mut self, id: PathId) -> &mut Path {
        &mut self.paths[id.0]
    }

    /// Copy of `id` with `marker` appended to its variation. The copy is
    /// not registered.
    pub fn snapshot(&self, id: PathId, marker: &str) -> Path {
        let source = self.get(id);
        Path {
            variation: format!("{}{marker}", source.variation),
            assertions: source.assertions.clone(),
            returned: source.returned,
        }
    }

    /// The earliest registered path that has not returned.
    pub fn first_open(&self) -> Option<PathId> {
        self.paths.iter().position(|path| !path.returned).map(PathId)
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }
}

/// Traces one declaration.
pub struct PathTracer<'a> {
    renderer: Renderer<'a>,
    marker: &'a str,
    arena: PathArena,
    root: PathId,
}

impl<'a> PathTracer<'a> {
    /// Create a tracer holding a single empty root path.
    pub fn new(options: &'a AnalysisOptions) -> Self {
        let mut arena = PathArena::new();
        let root = arena.push(Path::default());
        Self {
            renderer: Renderer::new(&options.placeholder_prefix),
            marker: &options.variation_marker,
            arena,
            root,
        }
    }

    /// Trace a function body starting from the root path.
    pub fn trace_body(&mut self, body: &Block) -> Result<(), Unsupported> {
        self.block(&body.stmts, self.root, StepKind::Next)
    }

    /// Trace a bound value's initializer on the root path.
    pub fn trace_initializer(&mut self, init: &Expr) -> Result<(), Unsupported> {
        self.yields(init, self.root, StepKind::Next)
    }

    /// The discovered paths in discovery order.
    pub fn finish(self) -> Vec<Path> {
        self.arena.into_paths()
    }

    fn block(&mut self, stmts: &[Stmt], mut cursor: PathId, step: StepKind) -> Result<(), Unsupported> {
        for stmt in stmts {
            self.statement(stmt, cursor, step)?;
            if self.arena.get(cursor).returned {
                match self.arena.first_open() {
                    Some(next) => {
                        trace!("path {} returned, continuing on path {}", cursor.index(), next.index());
                        cursor = next;
                    }
                    None => {
                        trace!("every path returned, skipping the rest of the block");
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }

    fn statement(&mut self, stmt: &Stmt, cursor: PathId, step: StepKind) -> Result<(), Unsupported> {
        match &stmt.kind {
            StmtKind::Block(block) => self.block(&block.stmts, cursor, step),
            StmtKind::Expr(expr) => self.yields(expr, cursor, step),
            StmtKind::Var(decl) => {
                for declarator in &decl.declarators {
                    if let Some(init) = &declarator.init {
                        self.yields(init, cursor, step)?;
                    }
                }
                Ok(())
            }
            StmtKind::Return(_) => {
                self.arena.get_mut(cursor).returned = true;
                Ok(())
            }
            StmtKind::If {
                consequent,
                alternate,
                ..
            } => {
                let fork = self.arena.snapshot(cursor, self.marker);
                self.statement(consequent, cursor, StepKind::Next)?;
                if let Some(alternate) = alternate {
                    let forked = self.arena.push(fork);
                    debug!("if at {}..{}: forked path {}", stmt.span.start, stmt.span.end, forked.index());
                    self.statement(alternate, forked, StepKind::Next)?;
                }
                Ok(())
            }
            StmtKind::Try { block, handler, .. } => {
                let fork = self.arena.snapshot(cursor, self.marker);
                self.block(&block.stmts, cursor, StepKind::Next)?;
                if let Some(handler) = handler {
                    let forked = self.arena.push(fork);
                    debug!("try at {}..{}: forked path {}", stmt.span.start, stmt.span.end, forked.index());
                    self.block(&handler.body.stmts, forked, StepKind::Throw)?;
                }
                Ok(())
            }
            // Not modeled: loops, labels, switch, throw, nested declarations.
            _ => Ok(()),
        }
    }

    /// Record every yield of `expr` in source order. Nested function
    /// bodies are not entered.
    fn yields(&mut self, expr: &Expr, cursor: PathId, step: StepKind) -> Result<(), Unsupported> {
        if let ExprKind::Yield { argument, .. } = &expr.kind {
            let effect = match argument {
                Some(argument) => self.renderer.render(argument, true)?,
                None => "undefined".to_string(),
            };
            self.record(cursor, step, effect);
            return Ok(());
        }

        for child in expr.children() {
            self.yields(child, cursor, step)?;
        }
        Ok(())
    }

    /// `cursor` is always open here: `block` leaves a returned path before
    /// its next statement.
    fn record(&mut self, cursor: PathId, step: StepKind, effect: String) {
        let path = self.arena.get_mut(cursor);
        debug_assert!(!path.returned, "recording on returned path {}", cursor.index());
        trace!("path {}: {}() -> {}", cursor.index(), step.method(), effect);
        path.assertions.push(Assertion { step, effect });
    }
}
