//! Constructors for synthesized nodes.
//!
//! Rules build replacement subtrees through these helpers. Every node they
//! allocate carries [`Span::DUMMY`](crate::Span::DUMMY).

use crate::ast::{BinaryOp, ExprKind, Literal, StmtKind, TypeRef, UnaryOp};
use crate::{ExprArena, ExprId, StmtId};

/// Escape a raw value for use between double quotes.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

impl ExprArena {
    pub fn name(&mut self, name: impl Into<String>) -> ExprId {
        self.alloc(ExprKind::Name(name.into()))
    }

    /// A dotted name such as `System.out`, built as a field-access chain.
    pub fn path(&mut self, dotted: &str) -> ExprId {
        let mut segments = dotted.split('.');
        let first = segments.next().unwrap_or(dotted);
        let mut id = self.name(first);
        for segment in segments {
            id = self.field(id, segment);
        }
        id
    }

    pub fn field(&mut self, target: ExprId, name: impl Into<String>) -> ExprId {
        self.alloc(ExprKind::FieldAccess {
            target,
            name: name.into(),
        })
    }

    /// String literal from already-escaped content.
    pub fn string_literal(&mut self, escaped: impl Into<String>) -> ExprId {
        self.alloc(ExprKind::Literal(Literal::String(escaped.into())))
    }

    /// String literal from a raw value, escaping as needed.
    pub fn string_value(&mut self, value: &str) -> ExprId {
        self.string_literal(escape_string(value))
    }

    /// Numeric or char literal from its source spelling.
    pub fn int_literal(&mut self, spelling: impl Into<String>) -> ExprId {
        self.alloc(ExprKind::Literal(Literal::Int(spelling.into())))
    }

    pub fn null_literal(&mut self) -> ExprId {
        self.alloc(ExprKind::Literal(Literal::Null))
    }

    pub fn call(
        &mut self,
        target: Option<ExprId>,
        name: impl Into<String>,
        args: Vec<ExprId>,
    ) -> ExprId {
        self.alloc(ExprKind::MethodCall {
            target,
            type_args: Vec::new(),
            name: name.into(),
            args,
        })
    }

    /// `Target.name(args)` where `Target` is a dotted name.
    pub fn static_call(&mut self, class: &str, name: &str, args: Vec<ExprId>) -> ExprId {
        let target = self.path(class);
        self.call(Some(target), name, args)
    }

    pub fn new_object(&mut self, ty: TypeRef, args: Vec<ExprId>) -> ExprId {
        self.alloc(ExprKind::New {
            ty,
            args,
            body: None,
        })
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.alloc(ExprKind::Binary { op, left, right })
    }

    pub fn not(&mut self, operand: ExprId) -> ExprId {
        self.alloc(ExprKind::Unary {
            op: UnaryOp::Not,
            operand,
        })
    }

    pub fn class_literal(&mut self, name: &str) -> ExprId {
        self.alloc(ExprKind::ClassLit(TypeRef::simple(name)))
    }

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.alloc_stmt_kind(StmtKind::Expr(expr))
    }

    pub fn return_stmt(&mut self, value: Option<ExprId>) -> StmtId {
        self.alloc_stmt_kind(StmtKind::Return(value))
    }
}
