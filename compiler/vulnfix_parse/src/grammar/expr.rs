//! Expression parsing.
//!
//! Assignment and conditional are handled by hand; binary operators use
//! precedence climbing over [`BinaryOp::precedence`]. `>>`, `>>>` and their
//! compound assignments are assembled here from adjacent `>`/`>=` tokens.

use vulnfix_ir::{
    AssignOp, BinaryOp, Expr, ExprId, ExprKind, LambdaBody, LambdaParams, Literal, Param,
    Span, TypeRef, UnaryOp,
};
use vulnfix_lexer::TokenKind;

use crate::error::{PResult, ParseError};
use crate::stack::ensure_sufficient_stack;
use crate::Parser;

/// Lowest binary precedence (`||`).
const MIN_PRECEDENCE: u8 = 3;
/// Relational precedence, shared by `instanceof`.
const RELATIONAL_PRECEDENCE: u8 = 9;

impl Parser<'_> {
    pub(crate) fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    /// Parse a full expression, including assignment and lambdas.
    pub(crate) fn parse_expr(&mut self) -> PResult<ExprId> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    fn parse_assignment(&mut self) -> PResult<ExprId> {
        if self.at_lambda() {
            return self.parse_lambda();
        }
        let target = self.parse_conditional()?;
        let Some((op, width)) = self.peek_assign_op() else {
            return Ok(target);
        };
        for _ in 0..width {
            self.cursor.advance();
        }
        let value = self.parse_expr()?;
        let span = self.arena.span_between(target, value);
        Ok(self.alloc_expr(ExprKind::Assign { op, target, value }, span))
    }

    fn peek_assign_op(&self) -> Option<(AssignOp, usize)> {
        let op = match self.cursor.current_kind() {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::Add,
            TokenKind::MinusEq => AssignOp::Sub,
            TokenKind::StarEq => AssignOp::Mul,
            TokenKind::SlashEq => AssignOp::Div,
            TokenKind::PercentEq => AssignOp::Rem,
            TokenKind::AmpEq => AssignOp::BitAnd,
            TokenKind::PipeEq => AssignOp::BitOr,
            TokenKind::CaretEq => AssignOp::BitXor,
            TokenKind::ShlEq => AssignOp::Shl,
            TokenKind::Gt => {
                return match self.gt_run() {
                    GtRun::ShrAssign => Some((AssignOp::Shr, 2)),
                    GtRun::UShrAssign => Some((AssignOp::UShr, 3)),
                    _ => None,
                }
            }
            _ => return None,
        };
        Some((op, 1))
    }

    /// Classify a run of adjacent `>`/`>=` tokens at the cursor.
    fn gt_run(&self) -> GtRun {
        let c = &self.cursor;
        if c.peek_kind(1) == TokenKind::GtEq && c.adjacent(0) {
            return GtRun::ShrAssign;
        }
        if c.peek_kind(1) == TokenKind::Gt && c.adjacent(0) {
            if c.peek_kind(2) == TokenKind::GtEq && c.adjacent(1) {
                return GtRun::UShrAssign;
            }
            if c.peek_kind(2) == TokenKind::Gt && c.adjacent(1) {
                return GtRun::UShr;
            }
            return GtRun::Shr;
        }
        GtRun::Gt
    }

    /// `cond ? a : b` (or just the binary expression).
    pub(crate) fn parse_conditional(&mut self) -> PResult<ExprId> {
        let cond = self.parse_binary(MIN_PRECEDENCE)?;
        if !self.cursor.eat(TokenKind::Question) {
            return Ok(cond);
        }
        let then_expr = self.parse_expr()?;
        self.cursor.expect(TokenKind::Colon)?;
        let else_expr = if self.at_lambda() {
            self.parse_lambda()?
        } else {
            ensure_sufficient_stack(|| self.parse_conditional())?
        };
        let span = self.arena.span_between(cond, else_expr);
        Ok(self.alloc_expr(
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            },
            span,
        ))
    }

    fn peek_binary_op(&self) -> Option<(BinaryOp, usize)> {
        let op = match self.cursor.current_kind() {
            TokenKind::OrOr => BinaryOp::Or,
            TokenKind::AndAnd => BinaryOp::And,
            TokenKind::Pipe => BinaryOp::BitOr,
            TokenKind::Caret => BinaryOp::BitXor,
            TokenKind::Amp => BinaryOp::BitAnd,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::Shl => BinaryOp::Shl,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Rem,
            TokenKind::Gt => {
                return match self.gt_run() {
                    GtRun::Gt => Some((BinaryOp::Gt, 1)),
                    GtRun::Shr => Some((BinaryOp::Shr, 2)),
                    GtRun::UShr => Some((BinaryOp::UShr, 3)),
                    GtRun::ShrAssign | GtRun::UShrAssign => None,
                }
            }
            _ => return None,
        };
        Some((op, 1))
    }

    fn parse_binary(&mut self, min_prec: u8) -> PResult<ExprId> {
        let mut left = self.parse_unary()?;
        loop {
            if self.cursor.check(TokenKind::Instanceof) {
                if RELATIONAL_PRECEDENCE < min_prec {
                    break;
                }
                left = self.parse_instanceof(left)?;
                continue;
            }
            let Some((op, width)) = self.peek_binary_op() else {
                break;
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            for _ in 0..width {
                self.cursor.advance();
            }
            let right = ensure_sufficient_stack(|| self.parse_binary(prec + 1))?;
            let span = self.arena.span_between(left, right);
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    fn parse_instanceof(&mut self, expr: ExprId) -> PResult<ExprId> {
        self.cursor.expect(TokenKind::Instanceof)?;
        self.cursor.eat(TokenKind::Final);
        let ty = self.parse_type()?;
        if self.cursor.check(TokenKind::LParen) {
            return Err(ParseError::unsupported(
                "record pattern",
                self.cursor.current_span(),
            ));
        }
        let binding = if self.cursor.check_ident() {
            Some(self.cursor.expect_ident()?)
        } else {
            None
        };
        let span = self.span_from(self.arena.get_expr(expr).span);
        Ok(self.alloc_expr(ExprKind::InstanceOf { expr, ty, binding }, span))
    }

    fn parse_unary(&mut self) -> PResult<ExprId> {
        let start = self.cursor.current_span();
        let op = match self.cursor.current_kind() {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::PlusPlus => Some(UnaryOp::PreInc),
            TokenKind::MinusMinus => Some(UnaryOp::PreDec),
            _ => None,
        };
        if let Some(op) = op {
            self.cursor.advance();
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = self.span_from(start);
            return Ok(self.alloc_expr(ExprKind::Unary { op, operand }, span));
        }
        if self.cursor.check(TokenKind::LParen) {
            if let Some(ty) = self.try_parse(Self::parse_cast_prefix) {
                let expr = if self.at_lambda() {
                    self.parse_lambda()?
                } else {
                    ensure_sufficient_stack(|| self.parse_unary())?
                };
                let span = self.span_from(start);
                return Ok(self.alloc_expr(ExprKind::Cast { ty, expr }, span));
            }
        }
        let primary = self.parse_primary()?;
        self.parse_postfix(primary)
    }

    /// `(Type)` followed by something a cast can apply to.
    fn parse_cast_prefix(&mut self) -> PResult<TypeRef> {
        let open = self.cursor.expect(TokenKind::LParen)?;
        let ty = self.parse_type()?;
        while self.cursor.eat(TokenKind::Amp) {
            self.parse_type()?;
        }
        self.cursor.expect(TokenKind::RParen)?;
        let next = self.cursor.current_kind();
        let castable = if ty.is_primitive() {
            starts_unary(next)
        } else {
            starts_unary_not_plus_minus(next)
        };
        if castable {
            Ok(ty)
        } else {
            Err(ParseError::expected("cast operand", next, open.span))
        }
    }

    fn parse_postfix(&mut self, mut expr: ExprId) -> PResult<ExprId> {
        loop {
            let start = self.arena.get_expr(expr).span;
            match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    expr = self.parse_member_suffix(expr, start)?;
                }
                TokenKind::LBracket => {
                    if self.cursor.peek_kind(1) == TokenKind::RBracket {
                        let mut ty = self.expr_to_type(expr)?;
                        ty.dims = self.parse_dims();
                        expr = self.parse_type_suffix(ty, start)?;
                        continue;
                    }
                    self.cursor.advance();
                    let index = self.parse_expr()?;
                    self.cursor.expect(TokenKind::RBracket)?;
                    let span = self.span_from(start);
                    expr = self.alloc_expr(ExprKind::Index { target: expr, index }, span);
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.cursor.check(TokenKind::PlusPlus) {
                        UnaryOp::PostInc
                    } else {
                        UnaryOp::PostDec
                    };
                    self.cursor.advance();
                    let span = self.span_from(start);
                    expr = self.alloc_expr(ExprKind::Unary { op, operand: expr }, span);
                }
                TokenKind::ColonColon => {
                    self.cursor.advance();
                    let name = if self.cursor.eat(TokenKind::New) {
                        "new".to_string()
                    } else {
                        self.cursor.expect_ident()?
                    };
                    let span = self.span_from(start);
                    expr = self.alloc_expr(ExprKind::MethodRef { target: expr, name }, span);
                }
                _ => return Ok(expr),
            }
        }
    }

    /// After `target.`: field, method call, `.class`, `.this`, `.super`,
    /// or an explicitly typed generic call.
    fn parse_member_suffix(&mut self, target: ExprId, start: Span) -> PResult<ExprId> {
        match self.cursor.current_kind() {
            TokenKind::Class => {
                self.cursor.advance();
                let ty = self.expr_to_type(target)?;
                let span = self.span_from(start);
                Ok(self.alloc_expr(ExprKind::ClassLit(ty), span))
            }
            TokenKind::This | TokenKind::Super => {
                let name = self.cursor.current_text().to_string();
                self.cursor.advance();
                let span = self.span_from(start);
                Ok(self.alloc_expr(ExprKind::FieldAccess { target, name }, span))
            }
            TokenKind::New => Err(ParseError::unsupported(
                "qualified inner class creation",
                self.cursor.current_span(),
            )),
            TokenKind::Lt => {
                let type_args = self.parse_explicit_type_args()?;
                let name = self.cursor.expect_ident()?;
                let args = self.parse_args()?;
                let span = self.span_from(start);
                Ok(self.alloc_expr(
                    ExprKind::MethodCall {
                        target: Some(target),
                        type_args,
                        name,
                        args,
                    },
                    span,
                ))
            }
            _ => {
                let name = self.cursor.expect_ident()?;
                if self.cursor.check(TokenKind::LParen) {
                    let args = self.parse_args()?;
                    let span = self.span_from(start);
                    Ok(self.alloc_expr(
                        ExprKind::MethodCall {
                            target: Some(target),
                            type_args: Vec::new(),
                            name,
                            args,
                        },
                        span,
                    ))
                } else {
                    let span = self.span_from(start);
                    Ok(self.alloc_expr(ExprKind::FieldAccess { target, name }, span))
                }
            }
        }
    }

    /// `<A, B>` before a generic method name; wildcards are not allowed here.
    fn parse_explicit_type_args(&mut self) -> PResult<Vec<TypeRef>> {
        self.cursor.expect(TokenKind::Lt)?;
        let mut args = vec![self.parse_type()?];
        while self.cursor.eat(TokenKind::Comma) {
            args.push(self.parse_type()?);
        }
        self.cursor.expect(TokenKind::Gt)?;
        Ok(args)
    }

    /// A type in expression position must be followed by `.class` or `::`.
    fn parse_type_suffix(&mut self, ty: TypeRef, start: Span) -> PResult<ExprId> {
        if self.cursor.check(TokenKind::Dot) && self.cursor.peek_kind(1) == TokenKind::Class {
            self.cursor.advance();
            self.cursor.advance();
            let span = self.span_from(start);
            return Ok(self.alloc_expr(ExprKind::ClassLit(ty), span));
        }
        if self.cursor.check(TokenKind::ColonColon) {
            let span = self.span_from(start);
            return Ok(self.alloc_expr(ExprKind::TypeExpr(ty), span));
        }
        Err(ParseError::expected(
            "`.class` or `::` after type",
            self.cursor.current_kind(),
            self.cursor.current_span(),
        ))
    }

    /// Reinterpret a dotted name expression as a type.
    fn expr_to_type(&self, id: ExprId) -> PResult<TypeRef> {
        fn dotted(arena: &vulnfix_ir::ExprArena, id: ExprId, out: &mut String) -> bool {
            match arena.kind(id) {
                ExprKind::Name(name) => {
                    out.push_str(name);
                    true
                }
                ExprKind::FieldAccess { target, name } => {
                    if !dotted(arena, *target, out) {
                        return false;
                    }
                    out.push('.');
                    out.push_str(name);
                    true
                }
                _ => false,
            }
        }
        if let ExprKind::TypeExpr(ty) = self.arena.kind(id) {
            return Ok(ty.clone());
        }
        let mut name = String::new();
        if dotted(&self.arena, id, &mut name) {
            Ok(TypeRef::simple(name))
        } else {
            Err(ParseError::Syntax {
                message: "expected a type name".to_string(),
                span: self.arena.get_expr(id).span,
            })
        }
    }

    /// `(a, b, c)`
    pub(crate) fn parse_args(&mut self) -> PResult<Vec<ExprId>> {
        self.cursor.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if self.cursor.eat(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> PResult<ExprId> {
        let comments = self.leading_comments();
        let inner = self.parse_primary_inner()?;
        if comments.is_empty() {
            return Ok(inner);
        }
        let span = self.arena.get_expr(inner).span;
        Ok(self.alloc_expr(
            ExprKind::Commented {
                comments,
                expr: inner,
            },
            span,
        ))
    }

    fn parse_primary_inner(&mut self) -> PResult<ExprId> {
        let token = self.cursor.current();
        let start = token.span;
        let text = self.cursor.current_text();
        let literal = match token.kind {
            TokenKind::IntLit => Some(Literal::Int(text.to_string())),
            TokenKind::FloatLit => Some(Literal::Float(text.to_string())),
            TokenKind::CharLit => Some(Literal::Char(strip(text, 1))),
            TokenKind::StringLit => Some(Literal::String(strip(text, 1))),
            TokenKind::TextBlock => Some(Literal::TextBlock(strip(text, 3))),
            TokenKind::True => Some(Literal::Bool(true)),
            TokenKind::False => Some(Literal::Bool(false)),
            TokenKind::Null => Some(Literal::Null),
            _ => None,
        };
        if let Some(literal) = literal {
            self.cursor.advance();
            return Ok(self.alloc_expr(ExprKind::Literal(literal), start));
        }

        match token.kind {
            TokenKind::Ident => {
                let name = text.to_string();
                self.cursor.advance();
                if self.cursor.check(TokenKind::LParen) {
                    let args = self.parse_args()?;
                    let span = self.span_from(start);
                    return Ok(self.alloc_expr(
                        ExprKind::MethodCall {
                            target: None,
                            type_args: Vec::new(),
                            name,
                            args,
                        },
                        span,
                    ));
                }
                if self.cursor.check(TokenKind::Lt) {
                    // `List<String>::new`
                    let snapshot = self.snapshot();
                    if let Ok(args) = self.parse_type_args() {
                        if self.cursor.check(TokenKind::ColonColon) {
                            let ty = TypeRef {
                                name,
                                args: Some(args),
                                dims: self.parse_dims(),
                            };
                            let span = self.span_from(start);
                            return Ok(self.alloc_expr(ExprKind::TypeExpr(ty), span));
                        }
                    }
                    self.restore(snapshot);
                }
                Ok(self.alloc_expr(ExprKind::Name(name), start))
            }
            TokenKind::This | TokenKind::Super => {
                let is_this = token.kind == TokenKind::This;
                self.cursor.advance();
                if self.cursor.check(TokenKind::LParen) {
                    let args = self.parse_args()?;
                    let span = self.span_from(start);
                    let name = if is_this { "this" } else { "super" };
                    return Ok(self.alloc_expr(
                        ExprKind::MethodCall {
                            target: None,
                            type_args: Vec::new(),
                            name: name.to_string(),
                            args,
                        },
                        span,
                    ));
                }
                let kind = if is_this {
                    ExprKind::This
                } else {
                    ExprKind::Super
                };
                Ok(self.alloc_expr(kind, start))
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen)?;
                let span = self.span_from(start);
                Ok(self.alloc_expr(ExprKind::Paren(inner), span))
            }
            TokenKind::New => self.parse_new(),
            TokenKind::Switch => {
                self.cursor.advance();
                let selector = self.parse_paren_expr()?;
                let cases = self.parse_switch_body()?;
                let span = self.span_from(start);
                Ok(self.alloc_expr(ExprKind::Switch { selector, cases }, span))
            }
            kind if kind.is_primitive_type() || kind == TokenKind::Void => {
                let ty = self.parse_type()?;
                self.parse_type_suffix(ty, start)
            }
            kind => Err(ParseError::expected("expression", kind, start)),
        }
    }

    /// `(expr)` as used by `if`, `while`, `switch`, `synchronized`.
    pub(crate) fn parse_paren_expr(&mut self) -> PResult<ExprId> {
        self.cursor.expect(TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        self.cursor.expect(TokenKind::RParen)?;
        Ok(expr)
    }

    fn parse_new(&mut self) -> PResult<ExprId> {
        let start = self.cursor.expect(TokenKind::New)?.span;
        if self.cursor.check(TokenKind::Lt) {
            return Err(ParseError::unsupported(
                "constructor type arguments",
                self.cursor.current_span(),
            ));
        }
        let ty = self.parse_type_no_dims()?;

        if self.cursor.check(TokenKind::LBracket) {
            let mut dims = Vec::new();
            let mut extra_dims = 0u8;
            while self.cursor.check(TokenKind::LBracket) {
                if self.cursor.peek_kind(1) == TokenKind::RBracket {
                    extra_dims = self.parse_dims();
                    break;
                }
                self.cursor.advance();
                dims.push(self.parse_expr()?);
                self.cursor.expect(TokenKind::RBracket)?;
            }
            let init = if dims.is_empty() && self.cursor.check(TokenKind::LBrace) {
                Some(self.parse_array_init()?)
            } else {
                None
            };
            let span = self.span_from(start);
            return Ok(self.alloc_expr(
                ExprKind::NewArray {
                    ty,
                    dims,
                    extra_dims,
                    init,
                },
                span,
            ));
        }

        let args = self.parse_args()?;
        let body = if self.cursor.check(TokenKind::LBrace) {
            Some(self.parse_class_body(&ty.name)?)
        } else {
            None
        };
        let span = self.span_from(start);
        Ok(self.alloc_expr(ExprKind::New { ty, args, body }, span))
    }

    /// `{a, b, {c}}`
    pub(crate) fn parse_array_init(&mut self) -> PResult<ExprId> {
        let start = self.cursor.expect(TokenKind::LBrace)?.span;
        let mut items = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            let item = if self.cursor.check(TokenKind::LBrace) {
                self.parse_array_init()?
            } else {
                self.parse_expr()?
            };
            items.push(item);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RBrace)?;
        let span = self.span_from(start);
        Ok(self.alloc_expr(ExprKind::ArrayInit(items), span))
    }

    /// Variable initializer: array initializer or expression.
    pub(crate) fn parse_var_init(&mut self) -> PResult<ExprId> {
        if self.cursor.check(TokenKind::LBrace) {
            self.parse_array_init()
        } else {
            self.parse_expr()
        }
    }

    // Lambdas

    /// `x ->`, `() ->`, `(a, b) ->`, `(T a) ->`.
    fn at_lambda(&self) -> bool {
        match self.cursor.current_kind() {
            TokenKind::Ident => self.cursor.peek_kind(1) == TokenKind::Arrow,
            TokenKind::LParen => self
                .cursor
                .skip_balanced(0, TokenKind::LParen, TokenKind::RParen)
                .is_some_and(|after| self.cursor.peek_kind(after) == TokenKind::Arrow),
            _ => false,
        }
    }

    fn parse_lambda(&mut self) -> PResult<ExprId> {
        let start = self.cursor.current_span();
        let params = if self.cursor.check_ident() {
            LambdaParams::Inferred {
                names: vec![self.cursor.expect_ident()?],
                parenthesized: false,
            }
        } else {
            self.parse_lambda_params()?
        };
        self.cursor.expect(TokenKind::Arrow)?;
        let body = if self.cursor.check(TokenKind::LBrace) {
            LambdaBody::Block(self.parse_block()?)
        } else {
            LambdaBody::Expr(self.parse_expr()?)
        };
        let span = self.span_from(start);
        Ok(self.alloc_expr(ExprKind::Lambda { params, body }, span))
    }

    fn parse_lambda_params(&mut self) -> PResult<LambdaParams> {
        self.cursor.expect(TokenKind::LParen)?;
        let inferred = self.look_ahead(|p| {
            loop {
                if !p.cursor.check_ident() {
                    return p.cursor.check(TokenKind::RParen);
                }
                p.cursor.advance();
                if !p.cursor.eat(TokenKind::Comma) {
                    return p.cursor.check(TokenKind::RParen);
                }
            }
        });
        let params = if inferred {
            let mut names = Vec::new();
            while self.cursor.check_ident() {
                names.push(self.cursor.expect_ident()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            LambdaParams::Inferred {
                names,
                parenthesized: true,
            }
        } else {
            let mut params: Vec<Param> = Vec::new();
            loop {
                params.push(self.parse_param()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            LambdaParams::Typed(params)
        };
        self.cursor.expect(TokenKind::RParen)?;
        Ok(params)
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum GtRun {
    Gt,
    Shr,
    UShr,
    ShrAssign,
    UShrAssign,
}

/// Tokens that can begin a unary expression.
fn starts_unary(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Plus | TokenKind::Minus | TokenKind::PlusPlus | TokenKind::MinusMinus
    ) || starts_unary_not_plus_minus(kind)
}

/// Tokens that can begin the operand of a reference-type cast.
fn starts_unary_not_plus_minus(kind: TokenKind) -> bool {
    kind.is_literal()
        || kind.is_primitive_type()
        || matches!(
            kind,
            TokenKind::Ident
                | TokenKind::LParen
                | TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::New
                | TokenKind::Switch
                | TokenKind::Void
        )
}

/// Drop `n` delimiter bytes from each end of a literal's text.
fn strip(text: &str, n: usize) -> String {
    text.get(n..text.len().saturating_sub(n))
        .unwrap_or_default()
        .to_string()
}
