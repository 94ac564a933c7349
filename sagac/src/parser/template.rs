//! Template literal splitting.
//!
//! The lexer hands over a whole template as one token. Each `${ ... }`
//! substitution is parsed by a nested parser over the same source, so the
//! embedded expressions carry module offsets.

use super::{PResult, Parser};
use crate::ast::{TemplateElement, TemplateLiteral};
use crate::lexer::{substitution_len, TokenKind};
use crate::span::Span;

impl<'src> Parser<'src> {
    /// Consume a template token and split it into quasis and expressions.
    pub(super) fn parse_template(&mut self) -> PResult<TemplateLiteral> {
        let token = self.expect(TokenKind::Template, "template literal")?;
        let source = self.source;
        // Strip the backticks.
        let body_start = token.span.start + 1;
        let body_end = token.span.end.saturating_sub(1).max(body_start);
        let bytes = source.as_bytes();

        let mut quasis = Vec::new();
        let mut exprs = Vec::new();
        let mut quasi_start = body_start;
        let mut i = body_start;

        while i < body_end {
            match bytes[i] {
                b'\\' => i += 2,
                b'$' if i + 1 < body_end && bytes[i + 1] == b'{' => {
                    quasis.push(element(source, quasi_start, i));

                    let expr_start = i + 2;
                    let expr_end = source
                        .get(expr_start..body_end)
                        .and_then(substitution_len)
                        .map(|len| expr_start + len)
                        .ok_or_else(|| self.error_here("unterminated template substitution"))?;

                    let mut nested = Parser::over(source, expr_start, expr_end);
                    let expr = nested.parse_expression()?;
                    if !nested.is_at_end() {
                        return Err(nested.error_expected("`}`"));
                    }
                    exprs.push(expr);

                    i = expr_end + 1;
                    quasi_start = i;
                }
                _ => i += 1,
            }
        }
        quasis.push(element(source, quasi_start, body_end));

        Ok(TemplateLiteral { quasis, exprs })
    }
}

fn element(source: &str, start: usize, end: usize) -> TemplateElement {
    TemplateElement {
        raw: source.get(start..end).unwrap_or("").to_string(),
        span: Span::new(start, end),
    }
}
