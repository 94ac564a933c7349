//! Output file naming.

use std::path::{Path, PathBuf};

/// Where the tests for `source` are written: `client.js` becomes
/// `client.test.js`. A path without an extension gets `.test.js`.
pub fn test_path_for(source: &Path, test_suffix: &str) -> PathBuf {
    let stem = module_stem(source);
    let extension = source
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "js".to_string());
    source.with_file_name(format!("{stem}.{test_suffix}.{extension}"))
}

/// File name without its extension, used in the import of the module under
/// test and in the suite title.
pub fn module_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
