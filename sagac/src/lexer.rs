//! Lexer for the supported JavaScript module subset.
//!
//! Built on `logos`. Template literals are lexed as a single token; the
//! parser splits them into quasis and embedded expressions.

use logos::Logos;

use crate::span::Span;

/// Token kinds.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f\u{00a0}\u{feff}]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum TokenKind {
    // Keywords
    #[token("export")]
    Export,
    #[token("import")]
    Import,
    #[token("default")]
    Default,
    #[token("function")]
    Function,
    #[token("class")]
    Class,
    #[token("const")]
    Const,
    #[token("let")]
    Let,
    #[token("var")]
    Var,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("return")]
    Return,
    #[token("throw")]
    Throw,
    #[token("yield")]
    Yield,
    #[token("await")]
    Await,
    #[token("new")]
    New,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("in")]
    In,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("this")]
    This,
    #[token("typeof")]
    Typeof,
    #[token("void")]
    Void,
    #[token("delete")]
    Delete,
    #[token("instanceof")]
    Instanceof,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Literals
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[oO][0-7_]+")]
    #[regex(r"0[bB][01_]+")]
    Number,
    #[regex(r#""([^"\\\n]|\\[\s\S])*""#)]
    #[regex(r"'([^'\\\n]|\\[\s\S])*'")]
    String,
    #[token("`", lex_template)]
    Template,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("?")]
    Question,
    #[token("=>")]
    FatArrow,

    // Operators
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    NotEqEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("!")]
    Not,
    #[token("~")]
    Tilde,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("??")]
    QuestionQuestion,
    #[token("&")]
    And,
    #[token("|")]
    Or,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token(">>>")]
    UShr,

    /// `/pattern/flags`. Never produced by the lexer: a `/` in operand
    /// position is rescanned by the parser with [`regex_len`].
    RegExp,
    /// A character that starts no token.
    Error,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Whether the token is a reserved word. Reserved words are still
    /// valid property names (`effects.all`, `promise.finally`).
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Export
                | Import
                | Default
                | Function
                | Class
                | Const
                | Let
                | Var
                | If
                | Else
                | Try
                | Catch
                | Finally
                | Return
                | Throw
                | Yield
                | Await
                | New
                | For
                | While
                | Do
                | In
                | Switch
                | Case
                | Break
                | Continue
                | This
                | Typeof
                | Void
                | Delete
                | Instanceof
                | True
                | False
                | Null
        )
    }

    /// Whether the token can begin an expression. Decides whether a
    /// `yield` has an argument.
    pub fn starts_expr(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Ident
                | Number
                | String
                | Template
                | RegExp
                | Slash
                | SlashEq
                | This
                | True
                | False
                | Null
                | Function
                | New
                | Typeof
                | Void
                | Delete
                | Await
                | Yield
                | LParen
                | LBracket
                | LBrace
                | Plus
                | Minus
                | Not
                | Tilde
                | PlusPlus
                | MinusMinus
                | Ellipsis
        )
    }
}

/// A token with its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A line terminator appears between the previous token and this one.
    /// Drives automatic semicolon insertion.
    pub newline_before: bool,
}

/// Lexer over a module's source. Yields a final [`TokenKind::Eof`] token.
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
    last_end: usize,
    done: bool,
}

impl<'src> Lexer<'src> {
    /// Create a lexer for `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            last_end: 0,
            done: false,
        }
    }

    fn newline_between(&self, start: usize) -> bool {
        self.source
            .get(self.last_end..start)
            .is_some_and(|gap| gap.contains('\n'))
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        let (kind, range) = match self.inner.next() {
            Some(Ok(kind)) => (kind, self.inner.span()),
            Some(Err(())) => (TokenKind::Error, self.inner.span()),
            None => {
                self.done = true;
                let end = self.source.len();
                (TokenKind::Eof, end..end)
            }
        };

        let token = Token {
            kind,
            span: Span::new(range.start, range.end),
            newline_before: self.newline_between(range.start),
        };
        self.last_end = range.end;
        Some(token)
    }
}

/// Consume the rest of a template literal after its opening backtick.
fn lex_template(lex: &mut logos::Lexer<TokenKind>) -> bool {
    match template_len(lex.remainder()) {
        Some(len) => {
            lex.bump(len);
            true
        }
        None => false,
    }
}

/// Byte length of a template literal body including its closing backtick.
/// `None` if the literal is unterminated.
pub(crate) fn template_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return Some(i + 1),
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                i += 2;
                i += substitution_len(&rest[i..])? + 1;
            }
            _ => i += 1,
        }
    }

    None
}

/// Offset of the `}` closing a `${` substitution whose body starts at
/// `rest[0]`. Nested braces, strings and templates are skipped.
pub(crate) fn substitution_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(i),
            b'}' => depth -= 1,
            b'\'' | b'"' => {
                i += quoted_len(&bytes[i..])?;
                continue;
            }
            b'`' => {
                i += 1 + template_len(&rest[i + 1..])?;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Byte length of a regular expression literal starting at the `/` in
/// `rest[0]`, flags included. `None` if the body is not closed on its line.
pub(crate) fn regex_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 1;
    let mut in_class = false;

    loop {
        match *bytes.get(i)? {
            b'\\' => i += 2,
            b'\n' | b'\r' => return None,
            b'[' => {
                in_class = true;
                i += 1;
            }
            b']' => {
                in_class = false;
                i += 1;
            }
            b'/' if !in_class => break,
            _ => i += 1,
        }
    }

    i += 1;
    while bytes
        .get(i)
        .is_some_and(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$'))
    {
        i += 1;
    }
    Some(i)
}

/// Byte length of a quoted string starting at `bytes[0]`.
fn quoted_len(bytes: &[u8]) -> Option<usize> {
    let quote = *bytes.first()?;
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i + 1),
            b'\n' => return None,
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("export function* fetchUser"),
            vec![
                TokenKind::Export,
                TokenKind::Function,
                TokenKind::Star,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("a // trailing\n/* block\n comment */ b"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_newline_before() {
        let tokens: Vec<_> = Lexer::new("yield a\nyield b").collect();
        assert!(!tokens[1].newline_before);
        assert!(tokens[2].newline_before);
    }

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(
            kinds(r#"42 3.14 0xFF .5 "say \"hi\"" 'it\'s'"#),
            vec![
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::String,
                TokenKind::String,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_template_is_one_token() {
        let source = "`users/${id}/posts/${ {a: `x${y}`}.a }` + 1";
        let tokens: Vec<_> = Lexer::new(source).collect();
        assert_eq!(tokens[0].kind, TokenKind::Template);
        assert_eq!(
            &source[tokens[0].span.range()],
            "`users/${id}/posts/${ {a: `x${y}`}.a }`"
        );
        assert_eq!(tokens[1].kind, TokenKind::Plus);
    }

    #[test]
    fn test_unterminated_template_is_error() {
        assert_eq!(kinds("`abc")[0], TokenKind::Error);
    }

    #[test]
    fn test_regex_len() {
        assert_eq!(regex_len("/ab+c/gi.test(s)"), Some(8));
        assert_eq!(regex_len("/[/\\]]+/ x"), Some(8));
        assert_eq!(regex_len("/a\\/b/"), Some(6));
        assert_eq!(regex_len("/\"'`/, 1"), Some(5));
        assert_eq!(regex_len("/abc\n/"), None);
        assert_eq!(regex_len("/[/"), None);
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(
            kinds("=== !== >>> ... =>"),
            vec![
                TokenKind::EqEqEq,
                TokenKind::NotEqEq,
                TokenKind::UShr,
                TokenKind::Ellipsis,
                TokenKind::FatArrow,
                TokenKind::Eof
            ]
        );
    }
}
