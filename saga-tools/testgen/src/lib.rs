//! Saga Test Generator
//!
//! Generates a Jest test file for a module of redux-saga style generators:
//! one test per control-flow path of every exported saga.
//!
//! # Example
//!
//! ```
//! use saga_testgen::{generate, Config};
//!
//! let source = "export function* ping() { yield call(api.ping) }";
//! let generated = generate(source, "ping", &Config::default()).expect("valid module");
//! assert!(generated.text.contains("it(\"should ping\""));
//! assert_eq!(generated.tests["ping"], 1);
//! ```

pub mod assemble;
pub mod config;
pub mod output;

pub use assemble::Assembler;
pub use config::Config;

use indexmap::IndexMap;
use sagac::{analyze_source, Diagnostic, ModuleAnalysis};
use thiserror::Error;
use tracing::debug;

/// Errors that stop a module from producing any output.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("module has {} syntax error(s)", .0.len())]
    Malformed(Vec<Diagnostic>),
}

/// A generated test file and the analysis it came from.
#[derive(Debug)]
pub struct Generated {
    /// Contents of the test file.
    pub text: String,
    pub analysis: ModuleAnalysis,
    /// Number of tests per saga, in source order.
    pub tests: IndexMap<String, usize>,
}

impl Generated {
    pub fn test_count(&self) -> usize {
        self.tests.values().sum()
    }
}

/// Analyze `source` and assemble the test file for the module `stem`.
///
/// Declarations that cannot be analyzed are left out of the file and
/// listed in `analysis.failures`.
pub fn generate(source: &str, stem: &str, config: &Config) -> Result<Generated, GenerateError> {
    let analysis =
        analyze_source(source, &config.analysis_options()).map_err(GenerateError::Malformed)?;

    let tests: IndexMap<String, usize> = analysis
        .sagas()
        .map(|saga| (saga.name.clone(), saga.paths.len()))
        .collect();
    debug!("{stem}: {} saga(s), {} test(s)", tests.len(), tests.values().sum::<usize>());

    let text = Assembler::new(config).file(stem, &analysis);
    Ok(Generated {
        text,
        analysis,
        tests,
    })
}
