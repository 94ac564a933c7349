//! Parameter pattern summarizer.
//!
//! A saga parameter `{ id, page: current }` becomes the call-site argument
//! `{ id: sampleId, page: sampleCurrent }` of the generated test.

use super::error::Unsupported;
use super::naming::placeholder;
use crate::ast::{Pattern, PatternKind, PropKey};

/// Summarize one parameter pattern.
pub fn summarize(pattern: &Pattern, prefix: &str) -> Result<String, Unsupported> {
    let PatternKind::Object { props, rest } = &pattern.kind else {
        return Err(unsupported(pattern));
    };
    if let Some(rest) = rest {
        return Err(unsupported(rest));
    }
    if props.is_empty() {
        return Ok("{}".to_string());
    }

    let mut entries = Vec::with_capacity(props.len());
    for prop in props {
        let key = match &prop.key {
            PropKey::Ident(ident) => ident.name.as_str(),
            PropKey::Literal(raw) => raw.as_str(),
            PropKey::Computed(expr) => {
                return Err(Unsupported::ParameterPattern {
                    node: expr.kind.name(),
                    span: expr.span,
                })
            }
            PropKey::Spread => return Err(unsupported(&prop.value)),
        };
        entries.push(format!("{key}: {}", placeholder(prefix, binding_name(&prop.value)?)));
    }

    Ok(format!("{{ {} }}", entries.join(", ")))
}

/// Summarize a whole parameter list.
pub fn summarize_all(params: &[Pattern], prefix: &str) -> Result<Vec<String>, Unsupported> {
    params.iter().map(|param| summarize(param, prefix)).collect()
}

/// The variable a property binds: `b` in `{ a: b }` and `{ a: b = 1 }`.
fn binding_name(value: &Pattern) -> Result<&str, Unsupported> {
    match &value.kind {
        PatternKind::Ident(name) => Ok(name.as_str()),
        PatternKind::Assign { target, .. } => match &target.kind {
            PatternKind::Ident(name) => Ok(name.as_str()),
            _ => Err(unsupported(target)),
        },
        _ => Err(unsupported(value)),
    }
}

fn unsupported(pattern: &Pattern) -> Unsupported {
    Unsupported::ParameterPattern {
        node: pattern.kind.name(),
        span: pattern.span,
    }
}
