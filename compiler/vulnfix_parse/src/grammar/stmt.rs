//! Statements and blocks.

use vulnfix_ir::{
    Block, CatchClause, Comment, ExprId, LocalVar, Resource, Span, Stmt, StmtId, StmtKind,
    SwitchCase, VarDeclarator,
};
use vulnfix_lexer::TokenKind;

use super::ty::DeclPrefix;
use crate::error::{PResult, ParseError};
use crate::stack::ensure_sufficient_stack;
use crate::Parser;

impl Parser<'_> {
    fn alloc_stmt(&mut self, kind: StmtKind, span: Span, comments: Vec<Comment>) -> StmtId {
        let mut stmt = Stmt::new(kind, span);
        stmt.comments = comments;
        self.arena.alloc_stmt(stmt)
    }

    /// `{ stmts }`, keeping comments before the closing brace.
    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        self.cursor.expect(TokenKind::LBrace)?;
        let stmts = self.parse_stmt_list(|kind| kind == TokenKind::RBrace)?;
        let trailing_comments = self.leading_comments();
        self.cursor.expect(TokenKind::RBrace)?;
        Ok(Block {
            stmts,
            trailing_comments,
        })
    }

    /// Statements until `at_end` matches the current token (not consumed).
    fn parse_stmt_list(&mut self, at_end: impl Fn(TokenKind) -> bool) -> PResult<Vec<StmtId>> {
        let mut stmts = Vec::new();
        while !at_end(self.cursor.current_kind()) && !self.cursor.is_at_end() {
            let id = self.parse_statement()?;
            if let Some(comment) = self.trailing_comment() {
                self.arena.get_stmt_mut(id).trailing = Some(comment);
            }
            stmts.push(id);
        }
        Ok(stmts)
    }

    pub(crate) fn parse_statement(&mut self) -> PResult<StmtId> {
        ensure_sufficient_stack(|| {
            let comments = self.leading_comments();
            let start = self.cursor.current_span();
            let kind = self.parse_statement_kind()?;
            let span = self.span_from(start);
            Ok(self.alloc_stmt(kind, span, comments))
        })
    }

    fn parse_statement_kind(&mut self) -> PResult<StmtKind> {
        match self.cursor.current_kind() {
            TokenKind::LBrace => Ok(StmtKind::Block(self.parse_block()?)),
            TokenKind::Semi => {
                self.cursor.advance();
                Ok(StmtKind::Empty)
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => {
                self.cursor.advance();
                let cond = self.parse_paren_expr()?;
                let body = self.parse_statement()?;
                Ok(StmtKind::While { cond, body })
            }
            TokenKind::Do => {
                self.cursor.advance();
                let body = self.parse_statement()?;
                self.cursor.expect(TokenKind::While)?;
                let cond = self.parse_paren_expr()?;
                self.cursor.expect(TokenKind::Semi)?;
                Ok(StmtKind::DoWhile { body, cond })
            }
            TokenKind::For => self.parse_for(),
            TokenKind::Return => {
                self.cursor.advance();
                let value = if self.cursor.check(TokenKind::Semi) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.cursor.expect(TokenKind::Semi)?;
                Ok(StmtKind::Return(value))
            }
            TokenKind::Throw => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                self.cursor.expect(TokenKind::Semi)?;
                Ok(StmtKind::Throw(value))
            }
            TokenKind::Break | TokenKind::Continue => {
                let is_break = self.cursor.check(TokenKind::Break);
                self.cursor.advance();
                let label = if self.cursor.check_ident() {
                    Some(self.cursor.expect_ident()?)
                } else {
                    None
                };
                self.cursor.expect(TokenKind::Semi)?;
                Ok(if is_break {
                    StmtKind::Break(label)
                } else {
                    StmtKind::Continue(label)
                })
            }
            TokenKind::Try => self.parse_try(),
            TokenKind::Switch => {
                self.cursor.advance();
                let selector = self.parse_paren_expr()?;
                let cases = self.parse_switch_body()?;
                Ok(StmtKind::Switch { selector, cases })
            }
            TokenKind::Synchronized if self.cursor.peek_kind(1) == TokenKind::LParen => {
                self.cursor.advance();
                let lock = self.parse_paren_expr()?;
                let body = self.parse_block()?;
                Ok(StmtKind::Synchronized { lock, body })
            }
            TokenKind::Assert => {
                self.cursor.advance();
                let cond = self.parse_expr()?;
                let message = if self.cursor.eat(TokenKind::Colon) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                self.cursor.expect(TokenKind::Semi)?;
                Ok(StmtKind::Assert { cond, message })
            }
            TokenKind::Ident if self.cursor.peek_kind(1) == TokenKind::Colon => {
                let label = self.cursor.expect_ident()?;
                self.cursor.advance();
                let body = self.parse_statement()?;
                Ok(StmtKind::Labeled { label, body })
            }
            TokenKind::Ident if self.at_yield() => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                self.cursor.expect(TokenKind::Semi)?;
                Ok(StmtKind::Yield(value))
            }
            TokenKind::Class | TokenKind::Interface | TokenKind::Enum => {
                let ty = self.parse_type_decl(Vec::new(), DeclPrefix::default())?;
                Ok(StmtKind::LocalType(Box::new(ty)))
            }
            TokenKind::Ident if self.at_record_decl() => {
                let ty = self.parse_type_decl(Vec::new(), DeclPrefix::default())?;
                Ok(StmtKind::LocalType(Box::new(ty)))
            }
            TokenKind::At | TokenKind::Final | TokenKind::Abstract | TokenKind::Static => {
                let prefix = self.parse_decl_prefix()?;
                if self.at_type_decl_keyword() {
                    let ty = self.parse_type_decl(Vec::new(), prefix)?;
                    return Ok(StmtKind::LocalType(Box::new(ty)));
                }
                let local = self.parse_local_var_rest(prefix)?;
                self.cursor.expect(TokenKind::Semi)?;
                Ok(StmtKind::LocalVar(local))
            }
            _ => {
                if let Some(local) = self.try_parse(|p| {
                    let local = p.parse_local_var_rest(DeclPrefix::default())?;
                    p.cursor.expect(TokenKind::Semi)?;
                    Ok(local)
                }) {
                    return Ok(StmtKind::LocalVar(local));
                }
                let expr = self.parse_expr()?;
                self.cursor.expect(TokenKind::Semi)?;
                Ok(StmtKind::Expr(expr))
            }
        }
    }

    /// Contextual `yield` starting a yield statement.
    fn at_yield(&self) -> bool {
        self.cursor.check_contextual("yield")
            && !matches!(
                self.cursor.peek_kind(1),
                TokenKind::Eq
                    | TokenKind::Dot
                    | TokenKind::LBracket
                    | TokenKind::PlusPlus
                    | TokenKind::MinusMinus
                    | TokenKind::Semi
                    | TokenKind::ColonColon
                    | TokenKind::PlusEq
                    | TokenKind::MinusEq
            )
    }

    pub(crate) fn at_record_decl(&self) -> bool {
        self.cursor.check_contextual("record")
            && self.cursor.peek_kind(1) == TokenKind::Ident
            && matches!(self.cursor.peek_kind(2), TokenKind::LParen | TokenKind::Lt)
    }

    pub(crate) fn at_type_decl_keyword(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Class | TokenKind::Interface | TokenKind::Enum
        ) || (self.cursor.check(TokenKind::At) && self.cursor.peek_kind(1) == TokenKind::Interface)
            || self.at_record_decl()
    }

    /// `Type name [= init], ...` after the modifiers, without the `;`.
    fn parse_local_var_rest(&mut self, prefix: DeclPrefix) -> PResult<LocalVar> {
        let ty = self.parse_type()?;
        if !self.cursor.check_ident() {
            return Err(ParseError::expected(
                "variable name",
                self.cursor.current_kind(),
                self.cursor.current_span(),
            ));
        }
        let declarators = self.parse_declarators()?;
        Ok(LocalVar {
            modifiers: prefix.modifiers,
            annotations: prefix.annotations,
            ty,
            declarators,
        })
    }

    /// `a = 1, b[] = {2}, c`
    pub(crate) fn parse_declarators(&mut self) -> PResult<Vec<VarDeclarator>> {
        let mut declarators = Vec::new();
        loop {
            let name = self.cursor.expect_ident()?;
            let dims = self.parse_dims();
            let init = if self.cursor.eat(TokenKind::Eq) {
                Some(self.parse_var_init()?)
            } else {
                None
            };
            declarators.push(VarDeclarator { name, dims, init });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(declarators)
    }

    fn parse_if(&mut self) -> PResult<StmtKind> {
        self.cursor.expect(TokenKind::If)?;
        let cond = self.parse_paren_expr()?;
        let then_stmt = self.parse_statement()?;
        let else_stmt = if self.cursor.eat(TokenKind::Else) {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(StmtKind::If {
            cond,
            then_stmt,
            else_stmt,
        })
    }

    fn parse_for(&mut self) -> PResult<StmtKind> {
        self.cursor.expect(TokenKind::For)?;
        self.cursor.expect(TokenKind::LParen)?;

        // Enhanced for: `for (T x : xs)`
        let foreach_var = self.try_parse(|p| {
            let prefix = p.parse_decl_prefix()?;
            let ty = p.parse_type()?;
            let name = p.cursor.expect_ident()?;
            p.cursor.expect(TokenKind::Colon)?;
            Ok(LocalVar {
                modifiers: prefix.modifiers,
                annotations: prefix.annotations,
                ty,
                declarators: vec![VarDeclarator::new(name, None)],
            })
        });
        if let Some(var) = foreach_var {
            let iterable = self.parse_expr()?;
            self.cursor.expect(TokenKind::RParen)?;
            let body = self.parse_statement()?;
            return Ok(StmtKind::ForEach {
                var,
                iterable,
                body,
            });
        }

        let mut init = Vec::new();
        if !self.cursor.check(TokenKind::Semi) {
            let start = self.cursor.current_span();
            let local = self.try_parse(|p| {
                let prefix = p.parse_decl_prefix()?;
                p.parse_local_var_rest(prefix)
            });
            if let Some(local) = local {
                let span = self.span_from(start);
                init.push(self.alloc_stmt(StmtKind::LocalVar(local), span, Vec::new()));
            } else {
                loop {
                    let expr = self.parse_expr()?;
                    let span = self.arena.get_expr(expr).span;
                    init.push(self.alloc_stmt(StmtKind::Expr(expr), span, Vec::new()));
                    if !self.cursor.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
        }
        self.cursor.expect(TokenKind::Semi)?;
        let cond = if self.cursor.check(TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.cursor.expect(TokenKind::Semi)?;
        let mut update = Vec::new();
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                update.push(self.parse_expr()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect(TokenKind::RParen)?;
        let body = self.parse_statement()?;
        Ok(StmtKind::For {
            init,
            cond,
            update,
            body,
        })
    }

    fn parse_try(&mut self) -> PResult<StmtKind> {
        let try_span = self.cursor.expect(TokenKind::Try)?.span;
        let mut resources = Vec::new();
        if self.cursor.eat(TokenKind::LParen) {
            while !self.cursor.check(TokenKind::RParen) {
                resources.push(self.parse_resource()?);
                if !self.cursor.eat(TokenKind::Semi) {
                    break;
                }
            }
            self.cursor.expect(TokenKind::RParen)?;
        }
        let body = self.parse_block()?;
        let mut catches = Vec::new();
        while self.cursor.eat(TokenKind::Catch) {
            self.cursor.expect(TokenKind::LParen)?;
            let prefix = self.parse_decl_prefix()?;
            let mut types = vec![self.parse_type()?];
            while self.cursor.eat(TokenKind::Pipe) {
                types.push(self.parse_type()?);
            }
            let name = self.cursor.expect_ident()?;
            self.cursor.expect(TokenKind::RParen)?;
            let body = self.parse_block()?;
            catches.push(CatchClause {
                modifiers: prefix.modifiers,
                types,
                name,
                body,
            });
        }
        let finally = if self.cursor.eat(TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };
        if resources.is_empty() && catches.is_empty() && finally.is_none() {
            return Err(ParseError::Syntax {
                message: "try without catch, finally, or resources".to_string(),
                span: try_span,
            });
        }
        Ok(StmtKind::Try {
            resources,
            body,
            catches,
            finally,
        })
    }

    fn parse_resource(&mut self) -> PResult<Resource> {
        let decl = self.try_parse(|p| {
            let prefix = p.parse_decl_prefix()?;
            let ty = p.parse_type()?;
            let name = p.cursor.expect_ident()?;
            p.cursor.expect(TokenKind::Eq)?;
            let init = p.parse_expr()?;
            Ok(LocalVar {
                modifiers: prefix.modifiers,
                annotations: prefix.annotations,
                ty,
                declarators: vec![VarDeclarator::new(name, Some(init))],
            })
        });
        match decl {
            Some(local) => Ok(Resource::Decl(local)),
            None => Ok(Resource::Expr(self.parse_expr()?)),
        }
    }

    /// `{ case ...: ... case ... -> ... default ... }`
    pub(crate) fn parse_switch_body(&mut self) -> PResult<Vec<SwitchCase>> {
        self.cursor.expect(TokenKind::LBrace)?;
        let mut cases = Vec::new();
        // Comments before the closing brace are left for whatever follows
        // the switch.
        while !self.cursor.check(TokenKind::RBrace) {
            let comments = self.leading_comments();
            let labels = if self.cursor.eat(TokenKind::Default) {
                Vec::new()
            } else {
                self.cursor.expect(TokenKind::Case)?;
                self.parse_case_labels()?
            };
            let arrow = if self.cursor.eat(TokenKind::Arrow) {
                true
            } else {
                self.cursor.expect(TokenKind::Colon)?;
                false
            };
            let body = if arrow {
                vec![self.parse_arrow_body()?]
            } else {
                self.parse_stmt_list(|kind| {
                    matches!(kind, TokenKind::Case | TokenKind::Default | TokenKind::RBrace)
                })?
            };
            cases.push(SwitchCase {
                labels,
                arrow,
                body,
                comments,
            });
        }
        self.cursor.expect(TokenKind::RBrace)?;
        Ok(cases)
    }

    fn parse_case_labels(&mut self) -> PResult<Vec<ExprId>> {
        let mut labels = Vec::new();
        loop {
            if self.cursor.check(TokenKind::Default) {
                return Err(ParseError::unsupported(
                    "`case null, default`",
                    self.cursor.current_span(),
                ));
            }
            let label = self.parse_conditional()?;
            if self.cursor.check_ident() {
                return Err(ParseError::unsupported(
                    "type pattern in switch label",
                    self.cursor.current_span(),
                ));
            }
            labels.push(label);
            if !self.cursor.eat(TokenKind::Comma) {
                return Ok(labels);
            }
        }
    }

    /// Body of `case X -> ...`: a block, a throw, or an expression.
    fn parse_arrow_body(&mut self) -> PResult<StmtId> {
        match self.cursor.current_kind() {
            TokenKind::LBrace | TokenKind::Throw => {
                let id = self.parse_statement()?;
                if let Some(comment) = self.trailing_comment() {
                    self.arena.get_stmt_mut(id).trailing = Some(comment);
                }
                Ok(id)
            }
            _ => {
                let comments = self.leading_comments();
                let start = self.cursor.current_span();
                let expr = self.parse_expr()?;
                self.cursor.expect(TokenKind::Semi)?;
                let span = self.span_from(start);
                let id = self.alloc_stmt(StmtKind::Expr(expr), span, comments);
                if let Some(comment) = self.trailing_comment() {
                    self.arena.get_stmt_mut(id).trailing = Some(comment);
                }
                Ok(id)
            }
        }
    }
}
