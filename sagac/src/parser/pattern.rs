//! Binding patterns: parameters, declarators and catch parameters.

use super::{PResult, Parser};
use crate::ast::{ObjectPatternProp, Pattern, PatternKind, PropKey};
use crate::lexer::TokenKind;

impl<'src> Parser<'src> {
    /// `(a, { b, c: d }, ...rest)`
    pub(super) fn parse_params(&mut self) -> PResult<Vec<Pattern>> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut params = Vec::new();
        while !self.check(TokenKind::RParen) && !self.is_at_end() {
            if self.check(TokenKind::Ellipsis) {
                params.push(self.parse_rest_pattern()?);
                break;
            }
            params.push(self.parse_binding_element()?);
            if !self.try_consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(params)
    }

    /// An identifier, object pattern or array pattern.
    pub(super) fn parse_binding_pattern(&mut self) -> PResult<Pattern> {
        match self.current.kind {
            TokenKind::Ident => {
                let ident = self.binding_ident()?;
                Ok(Pattern {
                    kind: PatternKind::Ident(ident.name),
                    span: ident.span,
                })
            }
            TokenKind::LBrace => self.parse_object_pattern(),
            TokenKind::LBracket => self.parse_array_pattern(),
            _ => Err(self.error_expected("binding pattern")),
        }
    }

    /// A binding pattern with an optional `= default`.
    fn parse_binding_element(&mut self) -> PResult<Pattern> {
        let target = self.parse_binding_pattern()?;
        if !self.try_consume(TokenKind::Eq) {
            return Ok(target);
        }
        let default = self.parse_assign()?;
        let span = target.span.merge(default.span);
        Ok(Pattern {
            kind: PatternKind::Assign {
                target: Box::new(target),
                default: Box::new(default),
            },
            span,
        })
    }

    fn parse_rest_pattern(&mut self) -> PResult<Pattern> {
        let start = self.expect(TokenKind::Ellipsis, "`...`")?.span;
        let target = self.parse_binding_pattern()?;
        let span = start.merge(target.span);
        Ok(Pattern {
            kind: PatternKind::Rest(Box::new(target)),
            span,
        })
    }

    fn parse_object_pattern(&mut self) -> PResult<Pattern> {
        let start = self.expect(TokenKind::LBrace, "`{`")?.span;
        let mut props = Vec::new();
        let mut rest = None;

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if self.check(TokenKind::Ellipsis) {
                rest = Some(Box::new(self.parse_rest_pattern()?));
                break;
            }
            props.push(self.parse_object_pattern_prop()?);
            if !self.try_consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "`}`")?;

        Ok(Pattern {
            kind: PatternKind::Object { props, rest },
            span: start.merge(self.previous.span),
        })
    }

    fn parse_object_pattern_prop(&mut self) -> PResult<ObjectPatternProp> {
        let start = self.current.span;
        let key_kind = self.current.kind;

        let key = match key_kind {
            TokenKind::LBracket => {
                self.advance();
                let expr = self.parse_assign()?;
                self.expect(TokenKind::RBracket, "`]`")?;
                PropKey::Computed(Box::new(expr))
            }
            TokenKind::String | TokenKind::Number => {
                let token = self.advance();
                PropKey::Literal(self.text(token.span).to_string())
            }
            _ => PropKey::Ident(self.ident_name()?),
        };

        let value = if self.try_consume(TokenKind::Colon) {
            self.parse_binding_element()?
        } else {
            // Shorthand `{ a }` or `{ a = 1 }`: the key doubles as the binding.
            let PropKey::Ident(ident) = &key else {
                return Err(self.error_expected("`:`"));
            };
            if key_kind != TokenKind::Ident {
                return Err(self.error_expected("`:`"));
            }
            let target = Pattern {
                kind: PatternKind::Ident(ident.name.clone()),
                span: ident.span,
            };
            if self.try_consume(TokenKind::Eq) {
                let default = self.parse_assign()?;
                let span = target.span.merge(default.span);
                Pattern {
                    kind: PatternKind::Assign {
                        target: Box::new(target),
                        default: Box::new(default),
                    },
                    span,
                }
            } else {
                target
            }
        };

        Ok(ObjectPatternProp {
            key,
            span: start.merge(self.previous.span),
            value,
        })
    }

    fn parse_array_pattern(&mut self) -> PResult<Pattern> {
        let start = self.expect(TokenKind::LBracket, "`[`")?.span;
        let mut elements = Vec::new();

        while !self.check(TokenKind::RBracket) && !self.is_at_end() {
            if self.try_consume(TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            if self.check(TokenKind::Ellipsis) {
                elements.push(Some(self.parse_rest_pattern()?));
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.try_consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBracket, "`]`")?;

        Ok(Pattern {
            kind: PatternKind::Array(elements),
            span: start.merge(self.previous.span),
        })
    }
}
