//! Statement and module item parsing.

use super::{PResult, Parser};
use crate::ast::*;
use crate::lexer::TokenKind;

impl<'src> Parser<'src> {
    /// Parse a top-level item: import, export, or statement.
    pub(super) fn parse_module_item(&mut self) -> PResult<Stmt> {
        match self.current.kind {
            TokenKind::Import if !matches!(self.peek_kind(1), TokenKind::LParen | TokenKind::Dot) => {
                self.parse_import()
            }
            TokenKind::Export => self.parse_export(),
            _ => self.parse_statement(),
        }
    }

    fn parse_import(&mut self) -> PResult<Stmt> {
        let start = self.advance().span;
        let mut decl = ImportDecl {
            default: None,
            namespace: None,
            named: Vec::new(),
            source: String::new(),
        };

        if !self.check(TokenKind::String) {
            if self.check(TokenKind::Ident) {
                decl.default = Some(self.binding_ident()?);
                if self.try_consume(TokenKind::Comma) {
                    self.parse_import_clause(&mut decl)?;
                }
            } else {
                self.parse_import_clause(&mut decl)?;
            }
            self.expect_contextual("from")?;
        }

        let source = self.expect(TokenKind::String, "module specifier")?;
        decl.source = self.text(source.span).to_string();
        self.consume_semicolon()?;

        Ok(Stmt {
            kind: StmtKind::Import(decl),
            span: start.merge(self.previous.span),
        })
    }

    /// `* as ns` or `{ a, b as c }`
    fn parse_import_clause(&mut self, decl: &mut ImportDecl) -> PResult<()> {
        if self.try_consume(TokenKind::Star) {
            self.expect_contextual("as")?;
            decl.namespace = Some(self.binding_ident()?);
            return Ok(());
        }

        self.expect(TokenKind::LBrace, "`{`, `*` or a default import")?;
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let imported = self.ident_name()?;
            let local = if self.check_contextual("as") {
                self.advance();
                self.binding_ident()?
            } else {
                imported.clone()
            };
            decl.named.push((imported, local));
            if !self.try_consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(())
    }

    fn parse_export(&mut self) -> PResult<Stmt> {
        let start = self.advance().span;

        let kind = match self.current.kind {
            TokenKind::Default => {
                self.advance();
                let inner = if self.check(TokenKind::Function) || self.at_async_function() {
                    self.parse_function_declaration(false)?
                } else if self.check(TokenKind::Class) {
                    self.parse_class_declaration(false)?
                } else {
                    let expr = self.parse_assign()?;
                    self.consume_semicolon()?;
                    let span = expr.span;
                    Stmt {
                        kind: StmtKind::Expr(expr),
                        span,
                    }
                };
                StmtKind::ExportDefault(Box::new(inner))
            }
            TokenKind::Function => StmtKind::ExportNamed(Box::new(self.parse_function_declaration(true)?)),
            TokenKind::Ident if self.at_async_function() => {
                StmtKind::ExportNamed(Box::new(self.parse_function_declaration(true)?))
            }
            TokenKind::Const | TokenKind::Let | TokenKind::Var => {
                StmtKind::ExportNamed(Box::new(self.parse_var_statement()?))
            }
            TokenKind::Star => {
                self.advance();
                if self.check_contextual("as") {
                    self.advance();
                    self.ident_name()?;
                }
                self.expect_contextual("from")?;
                let source = self.expect(TokenKind::String, "module specifier")?;
                self.consume_semicolon()?;
                StmtKind::ExportList(ExportList {
                    specifiers: Vec::new(),
                    source: Some(self.text(source.span).to_string()),
                })
            }
            TokenKind::LBrace => StmtKind::ExportList(self.parse_export_list()?),
            TokenKind::Class => StmtKind::ExportNamed(Box::new(self.parse_class_declaration(true)?)),
            _ => return Err(self.error_expected("declaration after `export`")),
        };

        Ok(Stmt {
            kind,
            span: start.merge(self.previous.span),
        })
    }

    fn parse_export_list(&mut self) -> PResult<ExportList> {
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut specifiers = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let local = self.ident_name()?;
            let exported = if self.check_contextual("as") {
                self.advance();
                self.ident_name()?
            } else {
                local.clone()
            };
            specifiers.push((local, exported));
            if !self.try_consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "`}`")?;

        let source = if self.check_contextual("from") {
            self.advance();
            let token = self.expect(TokenKind::String, "module specifier")?;
            Some(self.text(token.span).to_string())
        } else {
            None
        };
        self.consume_semicolon()?;

        Ok(ExportList { specifiers, source })
    }

    fn parse_class_declaration(&mut self, require_name: bool) -> PResult<Stmt> {
        let class = self.parse_class(require_name)?;
        let span = class.span;
        Ok(Stmt {
            kind: StmtKind::Class(class),
            span,
        })
    }

    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> PResult<Stmt> {
        let start = self.current.span;

        let kind = match self.current.kind {
            TokenKind::LBrace => StmtKind::Block(self.parse_block()?),
            TokenKind::Var | TokenKind::Let | TokenKind::Const => return self.parse_var_statement(),
            TokenKind::Function => return self.parse_function_declaration(true),
            TokenKind::Ident if self.at_async_function() => return self.parse_function_declaration(true),
            TokenKind::Ident if self.peek_kind(1) == TokenKind::Colon => {
                let label = self.binding_ident()?;
                self.advance();
                let body = Box::new(self.parse_statement()?);
                StmtKind::Labeled { label, body }
            }
            TokenKind::If => self.parse_if()?,
            TokenKind::Try => self.parse_try()?,
            TokenKind::Return => {
                self.advance();
                let argument = if self.check(TokenKind::Semi)
                    || self.check(TokenKind::RBrace)
                    || self.is_at_end()
                    || self.current.newline_before
                {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.consume_semicolon()?;
                StmtKind::Return(argument)
            }
            TokenKind::Throw => {
                self.advance();
                if self.current.newline_before {
                    return Err(self.error_here("line break after `throw`"));
                }
                let argument = self.parse_expression()?;
                self.consume_semicolon()?;
                StmtKind::Throw(argument)
            }
            TokenKind::For => self.parse_for()?,
            TokenKind::While => {
                self.advance();
                let test = self.parse_paren_expression()?;
                let body = Box::new(self.parse_statement()?);
                StmtKind::While { test, body }
            }
            TokenKind::Do => {
                self.advance();
                let body = Box::new(self.parse_statement()?);
                self.expect(TokenKind::While, "`while`")?;
                let test = self.parse_paren_expression()?;
                self.try_consume(TokenKind::Semi);
                StmtKind::DoWhile { body, test }
            }
            TokenKind::Switch => self.parse_switch()?,
            TokenKind::Break | TokenKind::Continue => {
                let is_break = self.advance().kind == TokenKind::Break;
                let label = if self.check(TokenKind::Ident) && !self.current.newline_before {
                    Some(self.binding_ident()?)
                } else {
                    None
                };
                self.consume_semicolon()?;
                if is_break {
                    StmtKind::Break(label)
                } else {
                    StmtKind::Continue(label)
                }
            }
            TokenKind::Semi => {
                self.advance();
                StmtKind::Empty
            }
            TokenKind::Class => return self.parse_class_declaration(true),
            TokenKind::Import | TokenKind::Export => {
                return Err(self.error_here("import and export are only allowed at the top level"))
            }
            _ => {
                let expr = self.parse_expression()?;
                self.consume_semicolon()?;
                StmtKind::Expr(expr)
            }
        };

        Ok(Stmt {
            kind,
            span: start.merge(self.previous.span),
        })
    }

    /// Parse `{ statements }`.
    pub(super) fn parse_block(&mut self) -> PResult<Block> {
        let start = self.expect(TokenKind::LBrace, "`{`")?.span;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            stmts.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(Block {
            stmts,
            span: start.merge(self.previous.span),
        })
    }

    fn parse_paren_expression(&mut self) -> PResult<Expr> {
        self.expect(TokenKind::LParen, "`(`")?;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(expr)
    }

    fn parse_if(&mut self) -> PResult<StmtKind> {
        self.advance();
        let test = self.parse_paren_expression()?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.try_consume(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(StmtKind::If {
            test,
            consequent,
            alternate,
        })
    }

    fn parse_try(&mut self) -> PResult<StmtKind> {
        self.advance();
        let block = self.parse_block()?;

        let handler = if self.check(TokenKind::Catch) {
            let start = self.advance().span;
            let param = if self.try_consume(TokenKind::LParen) {
                let param = self.parse_binding_pattern()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                param,
                span: start.merge(body.span),
                body,
            })
        } else {
            None
        };

        let finalizer = if self.try_consume(TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_expected("`catch` or `finally`"));
        }

        Ok(StmtKind::Try {
            block,
            handler,
            finalizer,
        })
    }

    fn parse_for(&mut self) -> PResult<StmtKind> {
        self.advance();
        if self.check(TokenKind::Await) {
            return Err(self.unsupported("`for await` loops"));
        }
        self.expect(TokenKind::LParen, "`(`")?;

        let init = if self.check(TokenKind::Semi) {
            None
        } else {
            let start = self.current.span;
            let previous_no_in = std::mem::replace(&mut self.no_in, true);
            let head = if matches!(
                self.current.kind,
                TokenKind::Var | TokenKind::Let | TokenKind::Const
            ) {
                self.parse_var_decl().map(StmtKind::Var)
            } else {
                self.parse_expression().map(StmtKind::Expr)
            };
            self.no_in = previous_no_in;
            Some(Box::new(Stmt {
                kind: head?,
                span: start.merge(self.previous.span),
            }))
        };

        let each = if self.check(TokenKind::In) {
            Some(ForEachKind::In)
        } else if self.check_contextual("of") {
            Some(ForEachKind::Of)
        } else {
            None
        };

        let init = match (each, init) {
            (Some(kind), Some(left)) => {
                self.advance();
                let right = if kind == ForEachKind::Of {
                    self.parse_assign()?
                } else {
                    self.parse_expression()?
                };
                self.expect(TokenKind::RParen, "`)`")?;
                let body = Box::new(self.parse_statement()?);
                return Ok(StmtKind::ForEach {
                    kind,
                    left,
                    right,
                    body,
                });
            }
            (_, init) => init,
        };

        self.expect(TokenKind::Semi, "`;`")?;
        let test = if self.check(TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semi, "`;`")?;
        let update = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RParen, "`)`")?;
        let body = Box::new(self.parse_statement()?);

        Ok(StmtKind::For {
            init,
            test,
            update,
            body,
        })
    }

    fn parse_switch(&mut self) -> PResult<StmtKind> {
        self.advance();
        let discriminant = self.parse_paren_expression()?;
        self.expect(TokenKind::LBrace, "`{`")?;

        let mut cases = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let start = self.current.span;
            let test = if self.try_consume(TokenKind::Case) {
                Some(self.parse_expression()?)
            } else {
                self.expect(TokenKind::Default, "`case` or `default`")?;
                None
            };
            self.expect(TokenKind::Colon, "`:`")?;

            let mut body = Vec::new();
            while !matches!(
                self.current.kind,
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
            ) {
                body.push(self.parse_statement()?);
            }
            cases.push(SwitchCase {
                test,
                body,
                span: start.merge(self.previous.span),
            });
        }
        self.expect(TokenKind::RBrace, "`}`")?;

        Ok(StmtKind::Switch {
            discriminant,
            cases,
        })
    }

    /// `var|let|const` declarators followed by a statement terminator.
    pub(super) fn parse_var_statement(&mut self) -> PResult<Stmt> {
        let start = self.current.span;
        let decl = self.parse_var_decl()?;
        self.consume_semicolon()?;
        Ok(Stmt {
            kind: StmtKind::Var(decl),
            span: start.merge(self.previous.span),
        })
    }

    fn parse_var_decl(&mut self) -> PResult<VarDecl> {
        let kind = match self.advance().kind {
            TokenKind::Let => VarKind::Let,
            TokenKind::Const => VarKind::Const,
            _ => VarKind::Var,
        };

        let mut declarators = Vec::new();
        loop {
            let id = self.parse_binding_pattern()?;
            let init = if self.try_consume(TokenKind::Eq) {
                Some(self.parse_assign()?)
            } else {
                None
            };
            let span = id.span.merge(self.previous.span);
            declarators.push(Declarator { id, init, span });
            if !self.try_consume(TokenKind::Comma) {
                break;
            }
        }

        Ok(VarDecl { kind, declarators })
    }

    /// `[async] function [*] name (params) { body }` as a statement.
    pub(super) fn parse_function_declaration(&mut self, require_name: bool) -> PResult<Stmt> {
        let function = self.parse_function(require_name)?;
        let span = function.span;
        Ok(Stmt {
            kind: StmtKind::Function(function),
            span,
        })
    }

    pub(super) fn parse_function(&mut self, require_name: bool) -> PResult<Function> {
        let start = self.current.span;
        let is_async = if self.check_contextual("async") {
            self.advance();
            true
        } else {
            false
        };
        self.expect(TokenKind::Function, "`function`")?;
        let is_generator = self.try_consume(TokenKind::Star);

        let name = if self.check(TokenKind::Ident) {
            Some(self.binding_ident()?)
        } else if require_name {
            return Err(self.error_expected("function name"));
        } else {
            None
        };

        let params = self.parse_params()?;
        let body = self.parse_block()?;

        Ok(Function {
            name,
            params,
            span: start.merge(body.span),
            body,
            is_generator,
            is_async,
        })
    }
}
