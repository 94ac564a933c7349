//! Test file assembly.
//!
//! Turns a [`ModuleAnalysis`] into a Jest test file: one `it` block per
//! saga path, a constant per placeholder, and namespace imports for the
//! action and helper modules the tests mention.

use sagac::{Declaration, ModuleAnalysis, Path, StepKind};

use crate::config::Config;

/// Blank line between the blocks of one test.
const BLOCK_SEPARATOR: &str = "\n\n";
/// Three blank lines between tests and between file sections.
const SECTION_SEPARATOR: &str = "\n\n\n\n";

/// Builds test text from analysis results.
pub struct Assembler<'c> {
    config: &'c Config,
}

impl<'c> Assembler<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// One `it` block driving `saga` along `path`.
    pub fn test_case(&self, saga: &Declaration, path: &Path) -> String {
        let header = format!(
            "  it(\"should {}{}\", () => {{\n    const saga = {}.{}({})",
            path.variation,
            saga.name,
            self.config.sagas_binding,
            saga.name,
            saga.params.join(", ")
        );

        let mut blocks = Vec::with_capacity(path.assertions.len() + 2);
        blocks.push(header);
        for assertion in &path.assertions {
            blocks.push(format!(
                "    expect(saga.{}().value)\n      .toEqual({})",
                assertion.step.method(),
                assertion.effect
            ));
        }
        blocks.push(format!(
            "    expect(saga.{}().done)\n      .toBe(true)\n  }})",
            StepKind::Next.method()
        ));

        blocks.join(BLOCK_SEPARATOR)
    }

    /// Every test of the module: sagas in source order, paths in discovery
    /// order. Selects have no tests.
    pub fn tests(&self, analysis: &ModuleAnalysis) -> Vec<String> {
        analysis
            .sagas()
            .flat_map(|saga| saga.paths.iter().map(move |path| self.test_case(saga, path)))
            .collect()
    }

    /// The complete test file for the module `stem`.
    pub fn file(&self, stem: &str, analysis: &ModuleAnalysis) -> String {
        let tests = self.tests(analysis).join(SECTION_SEPARATOR);
        let identifiers = identifiers(&tests);

        let mut imports = vec![format!(
            "import * as {} from \"./{stem}\"",
            self.config.sagas_binding
        )];
        imports.extend(self.namespace_imports(&identifiers));

        let mut out = imports.join("\n");
        out.push_str(SECTION_SEPARATOR);
        out.push_str(&format!("describe(\"{stem} {}\", () => {{", self.config.suite_suffix));

        let samples = self.sample_constants(&identifiers);
        if !samples.is_empty() {
            out.push_str(BLOCK_SEPARATOR);
            out.push_str(&samples.join("\n"));
        }
        if !tests.is_empty() {
            out.push_str(SECTION_SEPARATOR);
            out.push_str(&tests);
        }
        out.push_str(BLOCK_SEPARATOR);
        out.push_str("})\n");
        out
    }

    /// Sorted, de-duplicated `import * as` lines for identifiers ending in
    /// a configured suffix.
    fn namespace_imports(&self, identifiers: &[&str]) -> Vec<String> {
        let mut imports: Vec<String> = identifiers
            .iter()
            .filter_map(|ident| {
                self.config.imports.groups.iter().find_map(|group| {
                    let module = ident.strip_suffix(group.suffix.as_str())?;
                    if module.is_empty() {
                        return None;
                    }
                    Some(format!(
                        "import * as {ident} from \"{}/{module}\"",
                        group.directory.trim_end_matches('/')
                    ))
                })
            })
            .collect();
        imports.sort();
        imports.dedup();
        imports
    }

    /// `const sampleX = "Sample"` for every placeholder, names padded to
    /// one width.
    fn sample_constants(&self, identifiers: &[&str]) -> Vec<String> {
        let prefix = self.config.placeholder_prefix.as_str();
        let mut samples: Vec<&str> = identifiers
            .iter()
            .copied()
            .filter(|ident| {
                ident
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.chars().next())
                    .is_some_and(|first| !first.is_ascii_lowercase() && !first.is_ascii_digit())
            })
            .collect();
        samples.sort_unstable();
        samples.dedup();

        let width = samples.iter().map(|name| name.len()).max().unwrap_or(0);
        samples
            .into_iter()
            .map(|name| format!("  const {name:<width$} = {}", self.config.sample_value))
            .collect()
    }
}

/// Identifiers in `text` that are not property names, in order of
/// appearance.
fn identifiers(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let is_start = |b: u8| b.is_ascii_alphabetic() || b == b'_' || b == b'$';
    let is_part = |b: u8| is_start(b) || b.is_ascii_digit();

    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if is_start(b) {
            let start = i;
            while i < bytes.len() && is_part(bytes[i]) {
                i += 1;
            }
            if start == 0 || bytes[start - 1] != b'.' {
                found.push(&text[start..i]);
            }
        } else if b.is_ascii_digit() {
            // Skip numeric literals such as `0x1F` whole.
            while i < bytes.len() && is_part(bytes[i]) {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    found
}
