//! Recursive descent parser for the supported JavaScript module subset.
//!
//! The parser stops at the first syntax error: a module that does not parse
//! is rejected as a whole and nothing is analyzed.
//!
//! # Example
//!
//! ```
//! use sagac::Parser;
//!
//! let mut parser = Parser::new("export function* f() { yield call(api) }");
//! let module = parser.parse_module().expect("parses");
//! assert_eq!(module.body.len(), 1);
//! ```

mod expr;
mod pattern;
mod stmt;
mod template;

use crate::ast::{Ident, Module};
use crate::diagnostics::Diagnostic;
use crate::lexer::{regex_len, Lexer, Token, TokenKind};
use crate::span::Span;

/// Error code for syntax errors.
pub const SYNTAX_ERROR: &str = "E0001";

pub(crate) type PResult<T> = Result<T, Diagnostic>;

/// Parser over a token buffer.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    current: Token,
    previous: Token,
    /// End of the parsed range in `source`.
    end: usize,
    /// Disallow `in` as a binary operator (head of a `for` statement).
    no_in: bool,
}

/// Tokens of `source[start..end]` with absolute spans.
fn lex(source: &str, start: usize, end: usize) -> Vec<Token> {
    let slice = source.get(start..end).unwrap_or("");
    Lexer::new(slice)
        .map(|token| Token {
            span: token.span.shift(start),
            ..token
        })
        .collect()
}

impl<'src> Parser<'src> {
    /// Create a parser over a whole module.
    pub fn new(source: &'src str) -> Self {
        Self::over(source, 0, source.len())
    }

    /// Create a parser over `source[start..end]`. Spans stay absolute, so
    /// nodes parsed from a template substitution point into the module.
    fn over(source: &'src str, start: usize, end: usize) -> Self {
        let tokens = lex(source, start, end);
        let eof = Token {
            kind: TokenKind::Eof,
            span: Span::new(end, end),
            newline_before: false,
        };
        let current = tokens.first().copied().unwrap_or(eof);

        Self {
            source,
            tokens,
            pos: 0,
            current,
            previous: current,
            end,
            no_in: false,
        }
    }

    /// Parse a complete module.
    pub fn parse_module(&mut self) -> Result<Module, Vec<Diagnostic>> {
        let mut body = Vec::new();
        while !self.is_at_end() {
            match self.parse_module_item() {
                Ok(stmt) => body.push(stmt),
                Err(diag) => return Err(vec![diag]),
            }
        }
        Ok(Module {
            body,
            span: Span::new(0, self.source.len()),
        })
    }

    // ============================================================
    // Token cursor
    // ============================================================

    /// Advance to the next token and return the one just consumed.
    fn advance(&mut self) -> Token {
        self.previous = self.current;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
            self.current = self.tokens[self.pos];
        }
        self.previous
    }

    /// Kind of the token `n` positions ahead of the current one.
    fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    fn peek_token(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    fn try_consume(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(what))
        }
    }

    /// Whether the current token is the identifier `word`. Used for
    /// contextual keywords (`async`, `of`, `from`, `as`).
    fn check_contextual(&self, word: &str) -> bool {
        self.check(TokenKind::Ident) && self.text(self.current.span) == word
    }

    fn expect_contextual(&mut self, word: &str) -> PResult<Token> {
        if self.check_contextual(word) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(&format!("`{word}`")))
        }
    }

    /// `async` directly followed by `function` on the same line.
    fn at_async_function(&self) -> bool {
        self.check_contextual("async")
            && self
                .peek_token(1)
                .is_some_and(|next| next.kind == TokenKind::Function && !next.newline_before)
    }

    /// Consume a statement terminator, applying automatic semicolon
    /// insertion before `}`, end of input, or a line break.
    fn consume_semicolon(&mut self) -> PResult<()> {
        if self.try_consume(TokenKind::Semi)
            || self.check(TokenKind::RBrace)
            || self.is_at_end()
            || self.current.newline_before
        {
            Ok(())
        } else {
            Err(self.error_expected("`;`"))
        }
    }

    /// Rescan the current `/` or `/=` as a regular expression literal and
    /// make it the current token. The lexer read the literal's body as
    /// ordinary tokens, so everything after it is lexed again.
    fn rescan_regex(&mut self) -> PResult<Token> {
        let start = self.current.span.start;
        let len = self
            .source
            .get(start..self.end)
            .and_then(regex_len)
            .ok_or_else(|| self.error_here("unterminated regular expression literal"))?;
        let regex = Token {
            kind: TokenKind::RegExp,
            span: Span::new(start, start + len),
            ..self.current
        };

        self.tokens.truncate(self.pos);
        self.tokens.push(regex);
        self.tokens.extend(lex(self.source, regex.span.end, self.end));
        self.current = regex;
        Ok(regex)
    }

    /// Index of the token closing the bracket at `open`.
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(index);
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
        }
        None
    }

    // ============================================================
    // Text and names
    // ============================================================

    fn text(&self, span: Span) -> &'src str {
        self.source.get(span.range()).unwrap_or("")
    }

    /// A binding identifier.
    fn binding_ident(&mut self) -> PResult<Ident> {
        let token = self.expect(TokenKind::Ident, "identifier")?;
        Ok(Ident {
            name: self.text(token.span).to_string(),
            span: token.span,
        })
    }

    /// A property name: any identifier, reserved words included.
    fn ident_name(&mut self) -> PResult<Ident> {
        if self.check(TokenKind::Ident) || self.current.kind.is_keyword() {
            let token = self.advance();
            Ok(Ident {
                name: self.text(token.span).to_string(),
                span: token.span,
            })
        } else {
            Err(self.error_expected("property name"))
        }
    }

    // ============================================================
    // Errors
    // ============================================================

    fn describe_current(&self) -> String {
        match self.current.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("`{}`", self.text(self.current.span)),
        }
    }

    fn error_expected(&self, what: &str) -> Diagnostic {
        if self.check(TokenKind::Error) {
            return self.error_here("unexpected character");
        }
        self.error_here(&format!("expected {what}, found {}", self.describe_current()))
    }

    fn error_here(&self, message: &str) -> Diagnostic {
        Diagnostic::error(message, self.current.span).with_code(SYNTAX_ERROR)
    }

    fn unsupported(&self, construct: &str) -> Diagnostic {
        self.error_here(&format!("{construct} are not supported"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    pub(super) fn parse(source: &str) -> Module {
        let mut parser = Parser::new(source);
        match parser.parse_module() {
            Ok(module) => module,
            Err(errors) => panic!("failed to parse {source:?}: {:?}", errors),
        }
    }

    pub(super) fn parse_err(source: &str) -> Diagnostic {
        let mut parser = Parser::new(source);
        match parser.parse_module() {
            Ok(module) => panic!("expected a syntax error, parsed {module:?}"),
            Err(mut errors) => errors.remove(0),
        }
    }

    #[test]
    fn test_empty_module() {
        assert!(parse("").body.is_empty());
        assert!(parse("// only a comment\n").body.is_empty());
    }

    #[test]
    fn test_semicolons_are_optional() {
        let module = parse("const a = 1\nconst b = 2; const c = 3");
        assert_eq!(module.body.len(), 3);
    }

    #[test]
    fn test_missing_semicolon_on_same_line() {
        let diag = parse_err("const a = 1 const b = 2");
        assert!(diag.message.contains("expected `;`"), "{}", diag.message);
        assert_eq!(diag.code.as_deref(), Some(SYNTAX_ERROR));
    }

    #[test]
    fn test_unexpected_character() {
        let diag = parse_err("const a = #b");
        assert_eq!(diag.message, "unexpected character");
    }

    #[test]
    fn test_unexpected_end() {
        let diag = parse_err("export function* f() {");
        assert!(diag.message.contains("end of input"), "{}", diag.message);
    }

    #[test]
    fn test_call_on_next_line_continues_expression() {
        let module = parse("foo\n(bar)");
        assert_eq!(module.body.len(), 1);
        match &module.body[0].kind {
            StmtKind::Expr(expr) => assert!(matches!(expr.kind, ExprKind::Call { .. })),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }
}
