//! Property tests for the expression renderer.

use proptest::prelude::*;

use sagac::analysis::naming::{placeholder, upper_first};
use sagac::analysis::Renderer;
use sagac::ast::{Expr, StmtKind};
use sagac::{Lexer, Parser, TokenKind};

fn parse_expr(source: &str) -> Expr {
    let module = match Parser::new(source).parse_module() {
        Ok(module) => module,
        Err(errors) => panic!("failed to parse {source:?}: {errors:?}"),
    };
    match module.body.into_iter().next().map(|stmt| stmt.kind) {
        Some(StmtKind::Expr(expr)) => expr,
        other => panic!("expected expression statement in {source:?}, got {other:?}"),
    }
}

fn render(source: &str, substitute: bool) -> String {
    match Renderer::new("sample").render(&parse_expr(source), substitute) {
        Ok(text) => text,
        Err(err) => panic!("failed to render {source:?}: {err}"),
    }
}

// ============================================================
// Strategies
// ============================================================

/// Identifiers that lex as identifiers, not reserved words.
fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,6}".prop_filter("reserved word", |name| {
        Lexer::new(name).next().map(|token| token.kind) == Some(TokenKind::Ident)
    })
}

fn member() -> impl Strategy<Value = String> {
    (ident(), ident()).prop_map(|(object, property)| format!("{object}.{property}"))
}

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        ident(),
        member(),
        (0u32..10_000).prop_map(|n| n.to_string()),
        "[a-z ]{0,8}".prop_map(|text| format!("\"{text}\"")),
    ]
}

/// Renderable expressions written the way the renderer prints them.
fn canonical_expr() -> impl Strategy<Value = String> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (prop_oneof![ident(), member()], prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(callee, args)| format!("{callee}({})", args.join(", "))),
            prop::collection::vec(inner, 0..4)
                .prop_map(|elements| format!("[{}]", elements.join(", "))),
        ]
    })
}

// ============================================================
// Properties
// ============================================================

proptest! {
    #[test]
    fn rendering_is_deterministic(source in canonical_expr(), substitute in any::<bool>()) {
        prop_assert_eq!(render(&source, substitute), render(&source, substitute));
    }

    #[test]
    fn plain_rendering_reproduces_canonical_source(source in canonical_expr()) {
        prop_assert_eq!(render(&source, false), source);
    }

    #[test]
    fn identifiers_become_placeholders(name in ident()) {
        prop_assert_eq!(render(&name, true), format!("sample{}", upper_first(&name)));
        prop_assert_eq!(render(&name, true), placeholder("sample", &name));
    }

    #[test]
    fn callee_and_first_argument_are_never_substituted(
        callee in prop_oneof![ident(), member()],
        first in ident(),
        rest in prop::collection::vec(ident(), 0..4),
    ) {
        let args: Vec<String> = std::iter::once(first.clone()).chain(rest.iter().cloned()).collect();
        let source = format!("{callee}({})", args.join(", "));

        let expected_rest: Vec<String> = rest.iter().map(|name| placeholder("sample", name)).collect();
        let expected = if expected_rest.is_empty() {
            format!("{callee}({first})")
        } else {
            format!("{callee}({first}, {})", expected_rest.join(", "))
        };
        prop_assert_eq!(render(&source, true), expected);
    }

    #[test]
    fn template_parts_follow_source_order(
        parts in prop::collection::vec(("[a-z /-]{0,5}", ident()), 0..5),
        tail in "[a-z /-]{0,5}",
    ) {
        let mut source = String::from("`");
        let mut expected = String::from("\"");
        for (text, name) in &parts {
            source.push_str(&format!("{text}${{{name}}}"));
            expected.push_str(&format!("{text}${{{}}}", placeholder("sample", name)));
        }
        source.push_str(&tail);
        source.push('`');
        expected.push_str(&tail);
        expected.push('"');

        prop_assert_eq!(render(&source, true), expected);
    }
}
