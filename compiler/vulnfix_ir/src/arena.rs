//! Arena storage for expressions and statements.
//!
//! Nodes are never removed. Replacing a node swaps its kind in place so the
//! id held by the parent stays valid; children of the old kind are either
//! moved into the new kind or simply become unreachable.

use std::mem;

use crate::ast::{Expr, ExprKind, Stmt, StmtKind};
use crate::{ExprId, Span, StmtId};

/// Contiguous storage for every expression and statement of one unit.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on source size.
    /// Heuristic: ~1 expression per 12 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated_exprs = source_len / 12;
        ExprArena {
            exprs: Vec::with_capacity(estimated_exprs),
            stmts: Vec::with_capacity(estimated_exprs / 3),
        }
    }

    // Expressions

    /// Allocate expression, return ID.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Allocate a synthesized expression with no source span.
    #[inline]
    pub fn alloc(&mut self, kind: ExprKind) -> ExprId {
        self.alloc_expr(Expr::synthetic(kind))
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    /// Shorthand for `get_expr(id).kind`.
    #[inline]
    #[track_caller]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()].kind
    }

    /// Swap the kind of `id`, returning the previous kind.
    #[track_caller]
    pub fn replace_expr(&mut self, id: ExprId, kind: ExprKind) -> ExprKind {
        mem::replace(&mut self.exprs[id.index()].kind, kind)
    }

    /// Move the node at `id` into a fresh slot and return the new id.
    ///
    /// Used to wrap an expression in place: the returned id becomes a child
    /// of whatever new kind is then written to `id`.
    #[track_caller]
    pub fn relocate_expr(&mut self, id: ExprId) -> ExprId {
        let span = self.exprs[id.index()].span;
        let kind = self.replace_expr(id, ExprKind::This);
        self.alloc_expr(Expr::new(kind, span))
    }

    /// Deep-copy an expression subtree.
    ///
    /// Returns `None` for subtrees that own statements (lambdas with block
    /// bodies, anonymous classes, switch expressions) or annotations.
    pub fn try_clone_expr(&mut self, id: ExprId) -> Option<ExprId> {
        let span = self.get_expr(id).span;
        let kind = match self.kind(id).clone() {
            kind @ (ExprKind::Literal(_)
            | ExprKind::Name(_)
            | ExprKind::This
            | ExprKind::Super
            | ExprKind::ClassLit(_)
            | ExprKind::TypeExpr(_)) => kind,
            ExprKind::FieldAccess { target, name } => ExprKind::FieldAccess {
                target: self.try_clone_expr(target)?,
                name,
            },
            ExprKind::MethodCall {
                target,
                type_args,
                name,
                args,
            } => ExprKind::MethodCall {
                target: match target {
                    Some(t) => Some(self.try_clone_expr(t)?),
                    None => None,
                },
                type_args,
                name,
                args: self.try_clone_all(&args)?,
            },
            ExprKind::New {
                ty,
                args,
                body: None,
            } => ExprKind::New {
                ty,
                args: self.try_clone_all(&args)?,
                body: None,
            },
            ExprKind::NewArray {
                ty,
                dims,
                extra_dims,
                init,
            } => ExprKind::NewArray {
                ty,
                dims: self.try_clone_all(&dims)?,
                extra_dims,
                init: match init {
                    Some(i) => Some(self.try_clone_expr(i)?),
                    None => None,
                },
            },
            ExprKind::ArrayInit(items) => ExprKind::ArrayInit(self.try_clone_all(&items)?),
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op,
                operand: self.try_clone_expr(operand)?,
            },
            ExprKind::Binary { op, left, right } => ExprKind::Binary {
                op,
                left: self.try_clone_expr(left)?,
                right: self.try_clone_expr(right)?,
            },
            ExprKind::Assign { op, target, value } => ExprKind::Assign {
                op,
                target: self.try_clone_expr(target)?,
                value: self.try_clone_expr(value)?,
            },
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => ExprKind::Conditional {
                cond: self.try_clone_expr(cond)?,
                then_expr: self.try_clone_expr(then_expr)?,
                else_expr: self.try_clone_expr(else_expr)?,
            },
            ExprKind::Cast { ty, expr } => ExprKind::Cast {
                ty,
                expr: self.try_clone_expr(expr)?,
            },
            ExprKind::InstanceOf { expr, ty, binding } => ExprKind::InstanceOf {
                expr: self.try_clone_expr(expr)?,
                ty,
                binding,
            },
            ExprKind::Index { target, index } => ExprKind::Index {
                target: self.try_clone_expr(target)?,
                index: self.try_clone_expr(index)?,
            },
            ExprKind::MethodRef { target, name } => ExprKind::MethodRef {
                target: self.try_clone_expr(target)?,
                name,
            },
            ExprKind::Paren(inner) => ExprKind::Paren(self.try_clone_expr(inner)?),
            ExprKind::Commented { comments, expr } => ExprKind::Commented {
                comments,
                expr: self.try_clone_expr(expr)?,
            },
            ExprKind::New { body: Some(_), .. }
            | ExprKind::Lambda { .. }
            | ExprKind::Switch { .. }
            | ExprKind::Annotation(_) => return None,
        };
        Some(self.alloc_expr(Expr::new(kind, span)))
    }

    fn try_clone_all(&mut self, ids: &[ExprId]) -> Option<Vec<ExprId>> {
        ids.iter().map(|&id| self.try_clone_expr(id)).collect()
    }

    /// Strip parentheses and attached comments.
    pub fn unwrap_parens(&self, mut id: ExprId) -> ExprId {
        loop {
            match self.kind(id) {
                ExprKind::Paren(inner) | ExprKind::Commented { expr: inner, .. } => id = *inner,
                _ => return id,
            }
        }
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // Statements

    /// Allocate statement, return ID.
    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(self.stmts.len() as u32);
        self.stmts.push(stmt);
        id
    }

    /// Allocate a synthesized statement with no source span.
    #[inline]
    pub fn alloc_stmt_kind(&mut self, kind: StmtKind) -> StmtId {
        self.alloc_stmt(Stmt::synthetic(kind))
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_stmt_mut(&mut self, id: StmtId) -> &mut Stmt {
        &mut self.stmts[id.index()]
    }

    /// Swap the kind of `id`, returning the previous kind.
    #[track_caller]
    pub fn replace_stmt(&mut self, id: StmtId, kind: StmtKind) -> StmtKind {
        mem::replace(&mut self.stmts[id.index()].kind, kind)
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    /// Span covering `first` through `last` expression.
    pub fn span_between(&self, first: ExprId, last: ExprId) -> Span {
        self.get_expr(first).span.merge(self.get_expr(last).span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;

    #[test]
    fn replace_keeps_id() {
        let mut arena = ExprArena::new();
        let id = arena.alloc(ExprKind::Name("x".into()));
        let old = arena.replace_expr(id, ExprKind::Literal(Literal::Null));
        assert_eq!(old, ExprKind::Name("x".into()));
        assert!(arena.kind(id).is_null());
    }

    #[test]
    fn relocate_moves_node_to_new_slot() {
        let mut arena = ExprArena::new();
        let id = arena.alloc(ExprKind::Name("x".into()));
        let moved = arena.relocate_expr(id);
        assert_ne!(id, moved);
        assert_eq!(arena.kind(moved), &ExprKind::Name("x".into()));
        arena.replace_expr(id, ExprKind::Paren(moved));
        assert_eq!(arena.unwrap_parens(id), moved);
    }

    #[test]
    fn clone_copies_subtree() {
        let mut arena = ExprArena::new();
        let this = arena.alloc(ExprKind::This);
        let access = arena.alloc(ExprKind::FieldAccess {
            target: this,
            name: "created".into(),
        });
        let copy = arena.try_clone_expr(access);
        let Some(copy) = copy else {
            panic!("field access should be clonable");
        };
        assert_ne!(copy, access);
        let ExprKind::FieldAccess { target, name } = arena.kind(copy) else {
            panic!("expected field access");
        };
        assert_ne!(*target, this);
        assert_eq!(name, "created");
    }
}
