//! Path enumeration and effect rendering.
//!
//! The analysis runs per exported declaration:
//!
//! 1. [`collect`] classifies each export as a saga or a select.
//! 2. [`params`] summarizes saga parameters into call-site arguments.
//! 3. [`trace`] walks the body, forking a [`Path`] at every branch with an
//!    alternate arm and recording one [`Assertion`] per yield.
//! 4. [`render`] turns each yielded expression back into source text.
//!
//! Everything here is a pure function of the parsed [`Module`](crate::ast::Module).

pub mod collect;
pub mod error;
pub mod naming;
pub mod params;
pub mod render;
pub mod trace;

pub use collect::{collect, Declaration, DeclarationKind, ModuleAnalysis};
pub use error::{AnalysisError, Unsupported};
pub use naming::placeholder;
pub use params::summarize;
pub use render::Renderer;
pub use trace::{Assertion, Path, PathArena, PathId, PathTracer, StepKind};

use serde::{Deserialize, Serialize};

/// Default prefix for placeholder names.
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "sample";

/// Default marker prepended to the variation of an alternate path.
pub const DEFAULT_VARIATION_MARKER: &str = "fail to ";

/// Knobs of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Prefix of generated placeholder names (`sample` + `Id`).
    pub placeholder_prefix: String,
    /// Appended to a path's variation each time it takes an alternate arm.
    pub variation_marker: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            variation_marker: DEFAULT_VARIATION_MARKER.to_string(),
        }
    }
}
