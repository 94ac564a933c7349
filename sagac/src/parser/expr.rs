//! Expression parsing.
//!
//! Binary operators use precedence climbing over the table in
//! [`Parser::binary_op`]. Arrow functions are recognized by looking past the
//! matching `)` for a `=>`.

use super::{PResult, Parser, SYNTAX_ERROR};
use crate::ast::*;
use crate::diagnostics::Diagnostic;
use crate::lexer::TokenKind;
use crate::span::Span;

impl<'src> Parser<'src> {
    /// Comma-separated expression.
    pub(super) fn parse_expression(&mut self) -> PResult<Expr> {
        let first = self.parse_assign()?;
        if !self.check(TokenKind::Comma) {
            return Ok(first);
        }

        let start = first.span;
        let mut exprs = vec![first];
        while self.try_consume(TokenKind::Comma) {
            exprs.push(self.parse_assign()?);
        }
        Ok(Expr::new(
            ExprKind::Sequence(exprs),
            start.merge(self.previous.span),
        ))
    }

    /// Assignment-level expression: yields, arrows, assignments.
    pub(super) fn parse_assign(&mut self) -> PResult<Expr> {
        if self.check(TokenKind::Yield) {
            return self.parse_yield();
        }
        if self.is_arrow_start() {
            return self.parse_arrow();
        }

        let target = self.parse_conditional()?;
        let op = match self.current.kind {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::AddAssign,
            TokenKind::MinusEq => AssignOp::SubAssign,
            TokenKind::StarEq => AssignOp::MulAssign,
            TokenKind::SlashEq => AssignOp::DivAssign,
            TokenKind::PercentEq => AssignOp::RemAssign,
            _ => return Ok(target),
        };

        if !matches!(
            target.kind,
            ExprKind::Ident(_) | ExprKind::Member { .. } | ExprKind::Index { .. }
        ) {
            return Err(Diagnostic::error("invalid assignment target", target.span)
                .with_code(SYNTAX_ERROR));
        }

        self.advance();
        let value = self.parse_assign()?;
        let span = target.span.merge(value.span);
        Ok(Expr::new(
            ExprKind::Assign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    /// Run `f` with `in` allowed as an operator again.
    fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let previous = std::mem::replace(&mut self.no_in, false);
        let result = f(self);
        self.no_in = previous;
        result
    }

    fn parse_yield(&mut self) -> PResult<Expr> {
        let start = self.advance().span;
        let delegate = !self.current.newline_before && self.try_consume(TokenKind::Star);

        let argument = if delegate
            || (!self.current.newline_before && self.current.kind.starts_expr())
        {
            Some(Box::new(self.parse_assign()?))
        } else {
            None
        };

        Ok(Expr::new(
            ExprKind::Yield { argument, delegate },
            start.merge(self.previous.span),
        ))
    }

    // ============================================================
    // Arrow functions
    // ============================================================

    fn is_arrow_start(&self) -> bool {
        // `async x =>` and `async (x) =>`; a bare `async => x` takes the
        // plain identifier path.
        let offset = usize::from(
            self.check_contextual("async")
                && self.peek_token(1).is_some_and(|next| {
                    !next.newline_before && matches!(next.kind, TokenKind::Ident | TokenKind::LParen)
                }),
        );

        match self.peek_kind(offset) {
            TokenKind::Ident => self.peek_kind(offset + 1) == TokenKind::FatArrow,
            TokenKind::LParen => self
                .matching_close(self.pos + offset)
                .and_then(|close| self.tokens.get(close + 1))
                .is_some_and(|next| next.kind == TokenKind::FatArrow),
            _ => false,
        }
    }

    fn parse_arrow(&mut self) -> PResult<Expr> {
        let start = self.current.span;
        let is_async = if self.check_contextual("async") && self.peek_kind(1) != TokenKind::FatArrow {
            self.advance();
            true
        } else {
            false
        };

        let params = if self.check(TokenKind::Ident) {
            let ident = self.binding_ident()?;
            vec![Pattern {
                kind: PatternKind::Ident(ident.name),
                span: ident.span,
            }]
        } else {
            self.parse_params()?
        };

        if self.current.newline_before {
            return Err(self.error_here("line break before `=>`"));
        }
        self.expect(TokenKind::FatArrow, "`=>`")?;

        let body = if self.check(TokenKind::LBrace) {
            ArrowBody::Block(self.allow_in(|p| p.parse_block())?)
        } else {
            ArrowBody::Expr(Box::new(self.parse_assign()?))
        };

        Ok(Expr::new(
            ExprKind::Arrow(Box::new(ArrowFunction {
                params,
                body,
                is_async,
            })),
            start.merge(self.previous.span),
        ))
    }

    // ============================================================
    // Operators
    // ============================================================

    fn parse_conditional(&mut self) -> PResult<Expr> {
        let test = self.parse_binary(1)?;
        if !self.try_consume(TokenKind::Question) {
            return Ok(test);
        }

        let consequent = self.allow_in(|p| p.parse_assign())?;
        self.expect(TokenKind::Colon, "`:`")?;
        let alternate = self.parse_assign()?;
        let span = test.span.merge(alternate.span);
        Ok(Expr::new(
            ExprKind::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            span,
        ))
    }

    /// Binary operator at the cursor with its precedence.
    fn binary_op(&self) -> Option<(BinaryOp, u8)> {
        let entry = match self.current.kind {
            TokenKind::QuestionQuestion => (BinaryOp::Nullish, 1),
            TokenKind::OrOr => (BinaryOp::Or, 2),
            TokenKind::AndAnd => (BinaryOp::And, 3),
            TokenKind::Or => (BinaryOp::BitOr, 4),
            TokenKind::Caret => (BinaryOp::BitXor, 5),
            TokenKind::And => (BinaryOp::BitAnd, 6),
            TokenKind::EqEq => (BinaryOp::Eq, 7),
            TokenKind::NotEq => (BinaryOp::NotEq, 7),
            TokenKind::EqEqEq => (BinaryOp::StrictEq, 7),
            TokenKind::NotEqEq => (BinaryOp::StrictNotEq, 7),
            TokenKind::Lt => (BinaryOp::Lt, 8),
            TokenKind::Gt => (BinaryOp::Gt, 8),
            TokenKind::LtEq => (BinaryOp::LtEq, 8),
            TokenKind::GtEq => (BinaryOp::GtEq, 8),
            TokenKind::Instanceof => (BinaryOp::Instanceof, 8),
            TokenKind::In if !self.no_in => (BinaryOp::In, 8),
            TokenKind::Shl => (BinaryOp::Shl, 9),
            TokenKind::Shr => (BinaryOp::Shr, 9),
            TokenKind::UShr => (BinaryOp::UShr, 9),
            TokenKind::Plus => (BinaryOp::Add, 10),
            TokenKind::Minus => (BinaryOp::Sub, 10),
            TokenKind::Star => (BinaryOp::Mul, 11),
            TokenKind::Slash => (BinaryOp::Div, 11),
            TokenKind::Percent => (BinaryOp::Rem, 11),
            TokenKind::StarStar => (BinaryOp::Exp, 12),
            _ => return None,
        };
        Some(entry)
    }

    fn parse_binary(&mut self, min_prec: u8) -> PResult<Expr> {
        let mut left = self.parse_unary()?;

        while let Some((op, prec)) = self.binary_op() {
            if prec < min_prec {
                break;
            }
            self.advance();
            // `**` is right-associative.
            let next_min = if op == BinaryOp::Exp { prec } else { prec + 1 };
            let right = self.parse_binary(next_min)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        let start = self.current.span;

        let op = match self.current.kind {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::Typeof => UnaryOp::Typeof,
            TokenKind::Void => UnaryOp::Void,
            TokenKind::Delete => UnaryOp::Delete,
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = if self.advance().kind == TokenKind::PlusPlus {
                    UpdateOp::Increment
                } else {
                    UpdateOp::Decrement
                };
                let operand = self.parse_unary()?;
                let span = start.merge(operand.span);
                return Ok(Expr::new(
                    ExprKind::Update {
                        op,
                        prefix: true,
                        operand: Box::new(operand),
                    },
                    span,
                ));
            }
            TokenKind::Await => {
                self.advance();
                let operand = self.parse_unary()?;
                let span = start.merge(operand.span);
                return Ok(Expr::new(ExprKind::Await(Box::new(operand)), span));
            }
            _ => return self.parse_postfix(),
        };

        self.advance();
        let operand = self.parse_unary()?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_postfix(&mut self) -> PResult<Expr> {
        let operand = self.parse_call_member()?;
        let op = match self.current.kind {
            TokenKind::PlusPlus if !self.current.newline_before => UpdateOp::Increment,
            TokenKind::MinusMinus if !self.current.newline_before => UpdateOp::Decrement,
            _ => return Ok(operand),
        };
        self.advance();
        let span = operand.span.merge(self.previous.span);
        Ok(Expr::new(
            ExprKind::Update {
                op,
                prefix: false,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    // ============================================================
    // Calls and member access
    // ============================================================

    fn parse_call_member(&mut self) -> PResult<Expr> {
        let mut expr = if self.check(TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };

        loop {
            expr = match self.current.kind {
                TokenKind::Dot | TokenKind::LBracket => self.parse_member_suffix(expr)?,
                TokenKind::LParen => {
                    let args = self.parse_arguments()?;
                    let span = expr.span.merge(self.previous.span);
                    Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    )
                }
                TokenKind::Template => {
                    let quasi = self.parse_template()?;
                    let span = expr.span.merge(self.previous.span);
                    Expr::new(
                        ExprKind::TaggedTemplate {
                            tag: Box::new(expr),
                            quasi,
                        },
                        span,
                    )
                }
                _ => return Ok(expr),
            };
        }
    }

    /// `.name` or `[index]` applied to `object`.
    fn parse_member_suffix(&mut self, object: Expr) -> PResult<Expr> {
        if self.try_consume(TokenKind::Dot) {
            let property = self.ident_name()?;
            let span = object.span.merge(property.span);
            return Ok(Expr::new(
                ExprKind::Member {
                    object: Box::new(object),
                    property,
                },
                span,
            ));
        }

        self.expect(TokenKind::LBracket, "`[`")?;
        let index = self.allow_in(|p| p.parse_expression())?;
        self.expect(TokenKind::RBracket, "`]`")?;
        let span = object.span.merge(self.previous.span);
        Ok(Expr::new(
            ExprKind::Index {
                object: Box::new(object),
                index: Box::new(index),
            },
            span,
        ))
    }

    fn parse_new(&mut self) -> PResult<Expr> {
        let start = self.expect(TokenKind::New, "`new`")?.span;
        if self.check(TokenKind::Dot) {
            return Err(self.unsupported("`new.target` expressions"));
        }

        let mut callee = if self.check(TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        while matches!(self.current.kind, TokenKind::Dot | TokenKind::LBracket) {
            callee = self.parse_member_suffix(callee)?;
        }

        let args = if self.check(TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };

        Ok(Expr::new(
            ExprKind::New {
                callee: Box::new(callee),
                args,
            },
            start.merge(self.previous.span),
        ))
    }

    fn parse_arguments(&mut self) -> PResult<Vec<Expr>> {
        self.expect(TokenKind::LParen, "`(`")?;
        self.allow_in(|p| {
            let mut args = Vec::new();
            while !p.check(TokenKind::RParen) && !p.is_at_end() {
                args.push(p.parse_spread_or_assign()?);
                if !p.try_consume(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "`)`")?;
            Ok(args)
        })
    }

    fn parse_spread_or_assign(&mut self) -> PResult<Expr> {
        if !self.check(TokenKind::Ellipsis) {
            return self.parse_assign();
        }
        let start = self.advance().span;
        let inner = self.parse_assign()?;
        let span = start.merge(inner.span);
        Ok(Expr::new(ExprKind::Spread(Box::new(inner)), span))
    }

    // ============================================================
    // Primary expressions
    // ============================================================

    fn parse_primary(&mut self) -> PResult<Expr> {
        let span = self.current.span;

        let kind = match self.current.kind {
            TokenKind::Number => self.literal(LiteralKind::Number, span),
            TokenKind::String => self.literal(LiteralKind::String, span),
            TokenKind::True | TokenKind::False => self.literal(LiteralKind::Boolean, span),
            TokenKind::Null => self.literal(LiteralKind::Null, span),
            TokenKind::This => ExprKind::This,
            TokenKind::Ident if !self.at_async_function() => {
                ExprKind::Ident(self.text(span).to_string())
            }
            TokenKind::Ident | TokenKind::Function => {
                let function = self.parse_function(false)?;
                let span = function.span;
                return Ok(Expr::new(ExprKind::Function(Box::new(function)), span));
            }
            TokenKind::Template => {
                let template = self.parse_template()?;
                return Ok(Expr::new(ExprKind::Template(template), span));
            }
            TokenKind::LParen => {
                self.advance();
                if self.check(TokenKind::RParen) {
                    return Err(self.error_expected("expression"));
                }
                let expr = self.allow_in(|p| p.parse_expression())?;
                self.expect(TokenKind::RParen, "`)`")?;
                return Ok(expr);
            }
            TokenKind::LBracket => return self.allow_in(|p| p.parse_array_literal()),
            TokenKind::LBrace => return self.allow_in(|p| p.parse_object_literal()),
            TokenKind::Class => {
                let class = self.parse_class(false)?;
                let span = class.span;
                return Ok(Expr::new(ExprKind::Class(Box::new(class)), span));
            }
            TokenKind::Slash | TokenKind::SlashEq => {
                let token = self.rescan_regex()?;
                let kind = self.literal(LiteralKind::RegExp, token.span);
                self.advance();
                return Ok(Expr::new(kind, token.span));
            }
            _ => return Err(self.error_expected("expression")),
        };

        self.advance();
        Ok(Expr::new(kind, span))
    }

    /// `class [Name] [extends Base] { ... }`. The body is skipped to its
    /// matching brace without being parsed.
    pub(super) fn parse_class(&mut self, require_name: bool) -> PResult<Class> {
        let start = self.expect(TokenKind::Class, "`class`")?.span;
        let name = if self.check(TokenKind::Ident) && !self.check_contextual("extends") {
            Some(self.binding_ident()?)
        } else if require_name {
            return Err(self.error_expected("class name"));
        } else {
            None
        };
        let super_class = if self.check_contextual("extends") {
            self.advance();
            Some(Box::new(self.parse_call_member()?))
        } else {
            None
        };

        if !self.check(TokenKind::LBrace) {
            return Err(self.error_expected("`{`"));
        }
        let close = self
            .matching_close(self.pos)
            .ok_or_else(|| self.error_here("unclosed class body"))?;
        while self.pos < close {
            self.advance();
        }
        self.expect(TokenKind::RBrace, "`}`")?;

        Ok(Class {
            name,
            super_class,
            span: start.merge(self.previous.span),
        })
    }

    fn literal(&self, kind: LiteralKind, span: Span) -> ExprKind {
        ExprKind::Literal(Literal {
            kind,
            raw: self.text(span).to_string(),
        })
    }

    fn parse_array_literal(&mut self) -> PResult<Expr> {
        let start = self.expect(TokenKind::LBracket, "`[`")?.span;
        let mut elements = Vec::new();

        while !self.check(TokenKind::RBracket) && !self.is_at_end() {
            if self.check(TokenKind::Comma) {
                return Err(self.unsupported("array holes"));
            }
            elements.push(self.parse_spread_or_assign()?);
            if !self.try_consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBracket, "`]`")?;

        Ok(Expr::new(
            ExprKind::Array(elements),
            start.merge(self.previous.span),
        ))
    }

    fn parse_object_literal(&mut self) -> PResult<Expr> {
        let start = self.expect(TokenKind::LBrace, "`{`")?.span;
        let mut props = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            props.push(self.parse_property()?);
            if !self.try_consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "`}`")?;

        Ok(Expr::new(
            ExprKind::Object(props),
            start.merge(self.previous.span),
        ))
    }

    fn parse_property(&mut self) -> PResult<Property> {
        let start = self.current.span;

        if self.check(TokenKind::Ellipsis) {
            let value = self.parse_spread_or_assign()?;
            return Ok(Property {
                key: PropKey::Spread,
                span: value.span,
                value,
                shorthand: false,
            });
        }

        if (self.check_contextual("get") || self.check_contextual("set"))
            && !matches!(
                self.peek_kind(1),
                TokenKind::Colon | TokenKind::LParen | TokenKind::Comma | TokenKind::RBrace
            )
        {
            return Err(self.unsupported("getters and setters"));
        }

        let is_async = self.check_contextual("async")
            && !matches!(
                self.peek_kind(1),
                TokenKind::Colon | TokenKind::LParen | TokenKind::Comma | TokenKind::RBrace
            );
        if is_async {
            self.advance();
        }
        let is_generator = self.try_consume(TokenKind::Star);

        let key_kind = self.current.kind;
        let key = self.parse_property_key()?;

        if is_async || is_generator || self.check(TokenKind::LParen) {
            let value = self.parse_method(start, is_async, is_generator)?;
            return Ok(Property {
                key,
                span: value.span,
                value,
                shorthand: false,
            });
        }

        if self.try_consume(TokenKind::Colon) {
            let value = self.parse_assign()?;
            return Ok(Property {
                key,
                span: start.merge(value.span),
                value,
                shorthand: false,
            });
        }

        match &key {
            PropKey::Ident(ident) if key_kind == TokenKind::Ident => {
                let value = Expr::new(ExprKind::Ident(ident.name.clone()), ident.span);
                Ok(Property {
                    span: ident.span,
                    key,
                    value,
                    shorthand: true,
                })
            }
            _ => Err(self.error_expected("`:`")),
        }
    }

    fn parse_property_key(&mut self) -> PResult<PropKey> {
        match self.current.kind {
            TokenKind::LBracket => {
                self.advance();
                let expr = self.parse_assign()?;
                self.expect(TokenKind::RBracket, "`]`")?;
                Ok(PropKey::Computed(Box::new(expr)))
            }
            TokenKind::String | TokenKind::Number => {
                let token = self.advance();
                Ok(PropKey::Literal(self.text(token.span).to_string()))
            }
            _ => Ok(PropKey::Ident(self.ident_name()?)),
        }
    }

    /// Method shorthand `name(params) { body }` as a function expression.
    fn parse_method(&mut self, start: Span, is_async: bool, is_generator: bool) -> PResult<Expr> {
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(Expr::new(
            ExprKind::Function(Box::new(Function {
                name: None,
                params,
                body,
                is_generator,
                is_async,
                span,
            })),
            span,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{parse, parse_err};
    use crate::ast::*;

    fn expr(source: &str) -> Expr {
        let module = parse(source);
        match module.body.into_iter().next().map(|stmt| stmt.kind) {
            Some(StmtKind::Expr(expr)) => expr,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    fn binary_op(expr: &Expr) -> BinaryOp {
        match &expr.kind {
            ExprKind::Binary { op, .. } => *op,
            other => panic!("expected binary expression, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence() {
        let e = expr("a + b * c");
        assert_eq!(binary_op(&e), BinaryOp::Add);
        let ExprKind::Binary { right, .. } = &e.kind else { unreachable!() };
        assert_eq!(binary_op(right), BinaryOp::Mul);

        let e = expr("a || b && c === d");
        assert_eq!(binary_op(&e), BinaryOp::Or);
    }

    #[test]
    fn test_exponent_is_right_associative() {
        let e = expr("a ** b ** c");
        let ExprKind::Binary { left, right, .. } = &e.kind else {
            panic!("expected binary expression");
        };
        assert!(matches!(left.kind, ExprKind::Ident(_)));
        assert_eq!(binary_op(right), BinaryOp::Exp);
    }

    #[test]
    fn test_member_call_chain() {
        let e = expr("api.users.fetch(id, ...rest).then(done)");
        let ExprKind::Call { callee, args } = &e.kind else {
            panic!("expected call, got {:?}", e.kind);
        };
        assert_eq!(args.len(), 1);
        let ExprKind::Member { object, property } = &callee.kind else {
            panic!("expected member, got {:?}", callee.kind);
        };
        assert_eq!(property.name, "then");
        let ExprKind::Call { args, .. } = &object.kind else {
            panic!("expected inner call");
        };
        assert!(matches!(args[1].kind, ExprKind::Spread(_)));
    }

    #[test]
    fn test_keyword_property_names() {
        let e = expr("promise.finally(cleanup)");
        let ExprKind::Call { callee, .. } = &e.kind else {
            panic!("expected call");
        };
        assert!(matches!(&callee.kind, ExprKind::Member { property, .. } if property.name == "finally"));
    }

    #[test]
    fn test_arrow_functions() {
        assert!(matches!(expr("x => x + 1").kind, ExprKind::Arrow(_)));
        assert!(matches!(expr("({ a }, b) => { return a }").kind, ExprKind::Arrow(_)));
        match expr("async (a) => await a").kind {
            ExprKind::Arrow(arrow) => {
                assert!(arrow.is_async);
                assert!(matches!(arrow.body, ArrowBody::Expr(_)));
            }
            other => panic!("expected arrow, got {other:?}"),
        }
        // A call to a function named async is not an arrow.
        assert!(matches!(expr("async(a)").kind, ExprKind::Call { .. }));
    }

    #[test]
    fn test_object_literal_forms() {
        let e = expr("({ a, b: 1, 'c': 2, [d]: 3, ...e, f() {}, *g() {} })");
        let ExprKind::Object(props) = &e.kind else {
            panic!("expected object, got {:?}", e.kind);
        };
        assert_eq!(props.len(), 7);
        assert!(props[0].shorthand);
        assert!(matches!(props[2].key, PropKey::Literal(_)));
        assert!(matches!(props[3].key, PropKey::Computed(_)));
        assert!(matches!(props[4].key, PropKey::Spread));
        assert!(matches!(&props[6].value.kind, ExprKind::Function(f) if f.is_generator));
    }

    #[test]
    fn test_yield_forms() {
        let module = parse("function* f() {\n  const a = yield call(api)\n  yield\n  yield* other()\n}");
        let StmtKind::Function(function) = &module.body[0].kind else {
            panic!("expected function");
        };
        assert_eq!(function.body.stmts.len(), 3);
        match &function.body.stmts[1].kind {
            StmtKind::Expr(Expr {
                kind: ExprKind::Yield { argument, delegate },
                ..
            }) => {
                assert!(argument.is_none());
                assert!(!delegate);
            }
            other => panic!("expected bare yield, got {other:?}"),
        }
        assert!(matches!(
            &function.body.stmts[2].kind,
            StmtKind::Expr(Expr { kind: ExprKind::Yield { delegate: true, .. }, .. })
        ));
    }

    #[test]
    fn test_conditional_and_assignment() {
        assert!(matches!(expr("a ? b : c").kind, ExprKind::Conditional { .. }));
        assert!(matches!(expr("state.user = action.payload").kind, ExprKind::Assign { .. }));
        let diag = parse_err("a + b = c");
        assert_eq!(diag.message, "invalid assignment target");
    }

    #[test]
    fn test_new_expression() {
        let e = expr("new Error(`failed ${code}`).message");
        let ExprKind::Member { object, .. } = &e.kind else {
            panic!("expected member, got {:?}", e.kind);
        };
        assert!(matches!(&object.kind, ExprKind::New { args, .. } if args.len() == 1));
    }

    #[test]
    fn test_unsupported_literals() {
        assert!(parse_err("x = [1, , 2]").message.contains("array holes"));
        assert!(parse_err("x = /ab+c\n/").message.contains("unterminated regular expression"));
    }

    fn regex_raw(expr: &Expr) -> &str {
        match &expr.kind {
            ExprKind::Literal(Literal {
                kind: LiteralKind::RegExp,
                raw,
            }) => raw,
            other => panic!("expected regular expression, got {other:?}"),
        }
    }

    #[test]
    fn test_regex_literals() {
        let e = expr("/ab+c/gi.test(s)");
        let ExprKind::Call { callee, .. } = &e.kind else {
            panic!("expected call, got {:?}", e.kind);
        };
        let ExprKind::Member { object, property } = &callee.kind else {
            panic!("expected member, got {:?}", callee.kind);
        };
        assert_eq!(regex_raw(object), "/ab+c/gi");
        assert_eq!(property.name, "test");

        // Quotes and brackets inside the body do not leak into later tokens.
        let e = expr(r#"f(/["'`(]/, "after", /=\//)"#);
        let ExprKind::Call { args, .. } = &e.kind else {
            panic!("expected call, got {:?}", e.kind);
        };
        assert_eq!(args.len(), 3);
        assert_eq!(regex_raw(&args[0]), r#"/["'`(]/"#);
        assert!(matches!(&args[1].kind, ExprKind::Literal(Literal { raw, .. }) if raw == "\"after\""));
        assert_eq!(regex_raw(&args[2]), r"/=\//");

        // `/` after an operand is still division.
        assert_eq!(binary_op(&expr("a / b / c")), BinaryOp::Div);
    }

    #[test]
    fn test_class_expression_is_opaque() {
        let e = expr("Base = class extends mixin(Model) { save() { return `}` } }");
        let ExprKind::Assign { value, .. } = &e.kind else {
            panic!("expected assignment, got {:?}", e.kind);
        };
        match &value.kind {
            ExprKind::Class(class) => {
                assert!(class.name.is_none());
                assert!(matches!(
                    class.super_class.as_deref().map(|base| &base.kind),
                    Some(ExprKind::Call { .. })
                ));
            }
            other => panic!("expected class, got {other:?}"),
        }
        assert_eq!(value.kind.name(), "ClassExpression");
    }
}
