//! Path enumeration and effect rendering for saga modules.
//!
//! `sagac` reads a JavaScript module of generator functions (redux-saga
//! style sagas), enumerates every control-flow path through each exported
//! saga, and records the effects each path yields as source text. The
//! result feeds test generators such as `saga-testgen`.
//!
//! # Pipeline
//!
//! ```text
//! source ─► lexer ─► parser ─► ast::Module ─► analysis::collect ─► ModuleAnalysis
//! ```
//!
//! # Example
//!
//! ```
//! use sagac::{analyze_source, AnalysisOptions};
//!
//! let source = r#"
//!     export function* load({ id }) {
//!         try {
//!             yield call(api.load, id)
//!         } catch (error) {
//!             yield put(loadFailed(error))
//!         }
//!     }
//! "#;
//!
//! let analysis = analyze_source(source, &AnalysisOptions::default()).expect("parses");
//! let saga = &analysis.declarations[0];
//! assert_eq!(saga.params, vec!["{ id: sampleId }"]);
//! assert_eq!(saga.paths.len(), 2);
//! assert_eq!(saga.paths[1].variation, "fail to ");
//! ```

pub mod analysis;
pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod span;

pub use analysis::{
    AnalysisError, AnalysisOptions, Assertion, Declaration, DeclarationKind, ModuleAnalysis, Path,
    StepKind, Unsupported,
};
pub use diagnostics::Diagnostic;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use span::Span;

use tracing::debug;

/// Parse `source` and analyze its exports.
///
/// A syntax error rejects the whole module. Declarations that cannot be
/// analyzed are reported in [`ModuleAnalysis::failures`] without affecting
/// the others.
pub fn analyze_source(source: &str, options: &AnalysisOptions) -> Result<ModuleAnalysis, Vec<Diagnostic>> {
    let module = Parser::new(source).parse_module()?;
    debug!("parsed {} top-level statement(s)", module.body.len());
    Ok(analysis::collect(&module, options))
}
