//! Placeholder naming shared by the renderer, the parameter summarizer and
//! the sample constants of generated files.

/// `name` with its first character upper-cased.
pub fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Placeholder for a free variable: `prefix` followed by the upper-first
/// variable name.
pub fn placeholder(prefix: &str, name: &str) -> String {
    format!("{prefix}{}", upper_first(name))
}
