//! Expression renderer.
//!
//! Prints a yielded expression back to source text. In substitution mode
//! free variables become placeholders, except where the expression names
//! the effect target:
//!
//! - a call's callee and its first argument are printed as written,
//! - a member's property name is never substituted.
//!
//! Only literals, identifiers, `a.b` members, calls, arrays and template
//! literals have a printing rule; anything else is [`Unsupported`].

use super::error::Unsupported;
use super::naming::placeholder;
use crate::ast::{Expr, ExprKind, TemplateLiteral};

/// Renders expressions with a fixed placeholder prefix.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    prefix: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(prefix: &'a str) -> Self {
        Self { prefix }
    }

    /// Render `expr`, replacing free variables with placeholders when
    /// `substitute` is set.
    pub fn render(&self, expr: &Expr, substitute: bool) -> Result<String, Unsupported> {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(literal.raw.clone()),
            ExprKind::Ident(name) => Ok(self.ident(name, substitute)),
            ExprKind::Member { object, property } => match &object.kind {
                ExprKind::Ident(name) => Ok(format!("{}.{}", self.ident(name, substitute), property.name)),
                other => Err(Unsupported::Expression {
                    node: other.name(),
                    span: object.span,
                }),
            },
            ExprKind::Call { callee, args } => {
                let callee = self.render(callee, false)?;
                let args = args
                    .iter()
                    .enumerate()
                    .map(|(index, arg)| self.render(arg, substitute && index > 0))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{callee}({})", args.join(", ")))
            }
            ExprKind::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| self.render(element, substitute))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("[{}]", elements.join(", ")))
            }
            ExprKind::Template(template) => self.template(template, substitute),
            other => Err(Unsupported::Expression {
                node: other.name(),
                span: expr.span,
            }),
        }
    }

    fn ident(&self, name: &str, substitute: bool) -> String {
        if substitute {
            placeholder(self.prefix, name)
        } else {
            name.to_string()
        }
    }

    /// Merge quasis and substitutions by source offset into one
    /// double-quoted string.
    fn template(&self, template: &TemplateLiteral, substitute: bool) -> Result<String, Unsupported> {
        enum Part<'t> {
            Text(&'t str),
            Expr(&'t Expr),
        }

        let mut parts: Vec<(usize, Part<'_>)> = template
            .quasis
            .iter()
            .map(|quasi| (quasi.span.start, Part::Text(&quasi.raw)))
            .chain(template.exprs.iter().map(|expr| (expr.span.start, Part::Expr(expr))))
            .collect();
        parts.sort_by_key(|(offset, _)| *offset);

        let mut out = String::from("\"");
        for (_, part) in parts {
            match part {
                Part::Text(text) => out.push_str(text),
                Part::Expr(expr) => {
                    out.push_str("${");
                    out.push_str(&self.render(expr, substitute)?);
                    out.push('}');
                }
            }
        }
        out.push('"');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Literal, LiteralKind, StmtKind, TemplateElement};
    use crate::parser::Parser;
    use crate::span::Span;

    fn parse_expr(source: &str) -> Expr {
        let mut parser = Parser::new(source);
        let module = match parser.parse_module() {
            Ok(module) => module,
            Err(errors) => panic!("failed to parse {source:?}: {errors:?}"),
        };
        match module.body.into_iter().next().map(|stmt| stmt.kind) {
            Some(StmtKind::Expr(expr)) => expr,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    fn render(source: &str, substitute: bool) -> String {
        Renderer::new("sample")
            .render(&parse_expr(source), substitute)
            .unwrap_or_else(|err| panic!("failed to render {source:?}: {err}"))
    }

    #[test]
    fn test_literals_verbatim() {
        assert_eq!(render("'single'", true), "'single'");
        assert_eq!(render(r#""esc\"aped""#, true), r#""esc\"aped""#);
        assert_eq!(render("0x1F", true), "0x1F");
        assert_eq!(render("null", true), "null");
    }

    #[test]
    fn test_identifier_substitution() {
        assert_eq!(render("userId", false), "userId");
        assert_eq!(render("userId", true), "sampleUserId");
    }

    #[test]
    fn test_member_property_is_kept() {
        assert_eq!(render("action.payload", true), "sampleAction.payload");
        assert_eq!(render("action.payload", false), "action.payload");
    }

    #[test]
    fn test_call_keeps_callee_and_first_argument() {
        assert_eq!(
            render("call(api.fetchUser, id, page)", true),
            "call(api.fetchUser, id, samplePage)"
        );
        assert_eq!(
            render("put(userActions.loaded(user))", true),
            "put(userActions.loaded(user))"
        );
        assert_eq!(
            render("call(fn, a, [b, c])", true),
            "call(fn, a, [sampleB, sampleC])"
        );
    }

    #[test]
    fn test_nested_call_in_payload_position() {
        // The inner call keeps its own first argument.
        assert_eq!(
            render("call(fn, helper(x, y))", true),
            "call(fn, helper(x, sampleY))"
        );
    }

    #[test]
    fn test_no_substitution_mode() {
        assert_eq!(render("call(fn, a, b)", false), "call(fn, a, b)");
    }

    #[test]
    fn test_template_literal() {
        assert_eq!(
            render("call(get, `users/${id}/posts`, `${a}-${b}`)", true),
            r#"call(get, "users/${id}/posts", "${sampleA}-${sampleB}")"#
        );
        assert_eq!(render("`plain`", true), r#""plain""#);
    }

    #[test]
    fn test_template_order_comes_from_offsets() {
        // Quasis listed after the expression they follow in source.
        let template = TemplateLiteral {
            quasis: vec![
                TemplateElement {
                    raw: "tail".into(),
                    span: Span::new(10, 14),
                },
                TemplateElement {
                    raw: "head-".into(),
                    span: Span::new(1, 6),
                },
            ],
            exprs: vec![Expr::new(
                ExprKind::Literal(Literal {
                    kind: LiteralKind::Number,
                    raw: "42".into(),
                }),
                Span::new(8, 10),
            )],
        };
        let expr = Expr::new(ExprKind::Template(template), Span::new(0, 15));
        let rendered = Renderer::new("sample").render(&expr, true);
        assert_eq!(rendered.as_deref(), Ok("\"head-${42}tail\""));
    }

    #[test]
    fn test_unsupported_kinds() {
        let renderer = Renderer::new("sample");
        for (source, node) in [
            ("({ a: 1 })", "ObjectExpression"),
            ("a + b", "BinaryExpression"),
            ("a && b", "LogicalExpression"),
            ("x => x", "ArrowFunctionExpression"),
            ("a ? b : c", "ConditionalExpression"),
            ("api.users.fetch", "MemberExpression"),
            ("call(fn, ...args)", "SpreadElement"),
            ("this", "ThisExpression"),
        ] {
            match renderer.render(&parse_expr(source), true) {
                Err(Unsupported::Expression { node: found, .. }) => {
                    assert_eq!(found, node, "wrong node for {source:?}")
                }
                other => panic!("expected unsupported {node} for {source:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_custom_prefix() {
        let rendered = Renderer::new("mock").render(&parse_expr("call(fn, user)"), true);
        assert_eq!(rendered.as_deref(), Ok("call(fn, mockUser)"));
    }
}
