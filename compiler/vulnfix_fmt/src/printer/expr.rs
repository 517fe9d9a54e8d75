//! Expressions.
//!
//! Parentheses that were written in source survive as `Paren` nodes. Trees
//! built by rewrites may nest operators without them, so operands are
//! wrapped whenever their precedence is lower than the position requires.

use vulnfix_ir::{
    ExprArena, ExprId, ExprKind, LambdaBody, LambdaParams, Literal, UnaryOp,
};

use super::Printer;
use crate::emitter::Emitter;

/// Assignment and lambda.
const ASSIGNMENT: u8 = 1;
const CONDITIONAL: u8 = 2;
/// `||`, the loosest binary operator.
const LOGICAL_OR: u8 = 3;
/// Relational operators and `instanceof`.
const RELATIONAL: u8 = 9;
/// Prefix unary operators, casts, and switch expressions.
const PREFIX: u8 = 13;
const POSTFIX: u8 = 14;
const PRIMARY: u8 = 15;

fn precedence(arena: &ExprArena, id: ExprId) -> u8 {
    match arena.kind(id) {
        ExprKind::Assign { .. } | ExprKind::Lambda { .. } => ASSIGNMENT,
        ExprKind::Conditional { .. } => CONDITIONAL,
        ExprKind::Binary { op, .. } => op.precedence(),
        ExprKind::InstanceOf { .. } => RELATIONAL,
        ExprKind::Unary { op, .. } if op.is_postfix() => POSTFIX,
        ExprKind::Unary { .. } | ExprKind::Cast { .. } | ExprKind::Switch { .. } => PREFIX,
        ExprKind::Commented { expr, .. } => precedence(arena, *expr),
        _ => PRIMARY,
    }
}

/// Prefix `+`/`-`/`++`/`--` directly followed by another one would lex
/// as a different operator.
fn sign_clash(arena: &ExprArena, op: UnaryOp, operand: ExprId) -> bool {
    let sign = |op: UnaryOp| {
        matches!(
            op,
            UnaryOp::Plus | UnaryOp::Neg | UnaryOp::PreInc | UnaryOp::PreDec
        )
    };
    match arena.kind(operand) {
        ExprKind::Unary { op: inner, .. } => sign(op) && sign(*inner),
        _ => false,
    }
}

impl<E: Emitter> Printer<'_, E> {
    pub(crate) fn expr(&mut self, id: ExprId) {
        self.expr_at(id, ASSIGNMENT);
    }

    /// Print `id`, parenthesized when it binds looser than `min`.
    fn expr_at(&mut self, id: ExprId, min: u8) {
        if precedence(self.arena, id) < min {
            self.emit("(");
            self.expr_kind(id);
            self.emit(")");
        } else {
            self.expr_kind(id);
        }
    }

    pub(super) fn args(&mut self, args: &[ExprId]) {
        self.emit("(");
        self.comma_list(args, |p, &arg| p.expr(arg));
        self.emit(")");
    }

    fn expr_kind(&mut self, id: ExprId) {
        let arena = self.arena;
        match arena.kind(id) {
            ExprKind::Literal(literal) => self.literal(literal),
            ExprKind::Name(name) => self.emit(name),
            ExprKind::This => self.emit("this"),
            ExprKind::Super => self.emit("super"),
            ExprKind::FieldAccess { target, name } => {
                self.expr_at(*target, PRIMARY);
                self.emit(".");
                self.emit(name);
            }
            ExprKind::MethodCall {
                target,
                type_args,
                name,
                args,
            } => {
                if let Some(target) = target {
                    self.expr_at(*target, PRIMARY);
                    self.emit(".");
                    if !type_args.is_empty() {
                        self.emit("<");
                        self.comma_list(type_args, Self::type_ref);
                        self.emit(">");
                    }
                }
                self.emit(name);
                self.args(args);
            }
            ExprKind::New { ty, args, body } => {
                self.emit("new ");
                self.type_ref(ty);
                self.args(args);
                if let Some(body) = body {
                    self.emit(" ");
                    self.class_body(body);
                }
            }
            ExprKind::NewArray {
                ty,
                dims,
                extra_dims,
                init,
            } => {
                self.emit("new ");
                self.type_ref_no_dims(ty);
                for &dim in dims {
                    self.emit("[");
                    self.expr(dim);
                    self.emit("]");
                }
                self.dims(*extra_dims);
                if let Some(init) = init {
                    self.emit(" ");
                    self.expr(*init);
                }
            }
            ExprKind::ArrayInit(items) => {
                self.emit("{");
                self.comma_list(items, |p, &item| p.expr(item));
                self.emit("}");
            }
            ExprKind::Unary { op, operand } => {
                if op.is_postfix() {
                    self.expr_at(*operand, PRIMARY);
                    self.emit(op.as_str());
                } else {
                    self.emit(op.as_str());
                    if sign_clash(arena, *op, *operand) {
                        self.emit("(");
                        self.expr(*operand);
                        self.emit(")");
                    } else {
                        self.expr_at(*operand, PREFIX);
                    }
                }
            }
            ExprKind::Binary { op, left, right } => {
                let prec = op.precedence();
                self.expr_at(*left, prec);
                self.emit(" ");
                self.emit(op.as_str());
                self.emit(" ");
                self.expr_at(*right, prec + 1);
            }
            ExprKind::Assign { op, target, value } => {
                self.expr_at(*target, PRIMARY);
                self.emit(" ");
                self.emit(op.as_str());
                self.emit(" ");
                self.expr(*value);
            }
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                self.expr_at(*cond, LOGICAL_OR);
                self.emit(" ? ");
                self.expr_at(*then_expr, CONDITIONAL);
                self.emit(" : ");
                self.expr_at(*else_expr, CONDITIONAL);
            }
            ExprKind::Cast { ty, expr } => {
                self.emit("(");
                self.type_ref(ty);
                self.emit(") ");
                if matches!(arena.kind(*expr), ExprKind::Lambda { .. }) {
                    self.expr(*expr);
                } else {
                    self.expr_at(*expr, PREFIX);
                }
            }
            ExprKind::InstanceOf { expr, ty, binding } => {
                self.expr_at(*expr, RELATIONAL);
                self.emit(" instanceof ");
                self.type_ref(ty);
                if let Some(binding) = binding {
                    self.emit(" ");
                    self.emit(binding);
                }
            }
            ExprKind::Index { target, index } => {
                self.expr_at(*target, PRIMARY);
                self.emit("[");
                self.expr(*index);
                self.emit("]");
            }
            ExprKind::Lambda { params, body } => {
                match params {
                    LambdaParams::Inferred {
                        names,
                        parenthesized,
                    } => {
                        let parens = *parenthesized || names.len() != 1;
                        if parens {
                            self.emit("(");
                        }
                        self.emit(&names.join(", "));
                        if parens {
                            self.emit(")");
                        }
                    }
                    LambdaParams::Typed(params) => {
                        self.emit("(");
                        self.comma_list(params, Self::param);
                        self.emit(")");
                    }
                }
                self.emit(" -> ");
                match body {
                    LambdaBody::Expr(expr) => self.expr(*expr),
                    LambdaBody::Block(block) => self.block(block),
                }
            }
            ExprKind::MethodRef { target, name } => {
                self.expr_at(*target, PRIMARY);
                self.emit("::");
                self.emit(name);
            }
            ExprKind::ClassLit(ty) => {
                self.type_ref(ty);
                self.emit(".class");
            }
            ExprKind::TypeExpr(ty) => self.type_ref(ty),
            ExprKind::Switch { selector, cases } => self.switch(*selector, cases),
            ExprKind::Paren(inner) => {
                self.emit("(");
                self.expr(*inner);
                self.emit(")");
            }
            ExprKind::Annotation(annotation) => self.annotation(annotation),
            ExprKind::Commented { comments, expr } => {
                self.inline_comments(comments);
                self.expr_kind(*expr);
            }
        }
    }

    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::String(text) => {
                self.emit("\"");
                self.emit(text);
                self.emit("\"");
            }
            Literal::TextBlock(text) => {
                self.emit("\"\"\"");
                self.emit(text);
                self.emit("\"\"\"");
            }
            Literal::Char(text) => {
                self.emit("'");
                self.emit(text);
                self.emit("'");
            }
            Literal::Int(text) | Literal::Float(text) => self.emit(text),
            Literal::Bool(value) => self.emit(if *value { "true" } else { "false" }),
            Literal::Null => self.emit("null"),
        }
    }
}
