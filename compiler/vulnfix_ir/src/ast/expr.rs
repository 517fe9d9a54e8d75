//! Expression nodes.

use std::fmt;

use super::items::{Annotation, Member, Param};
use super::operators::{AssignOp, BinaryOp, UnaryOp};
use super::stmt::{Block, SwitchCase};
use super::types::TypeRef;
use crate::{Comment, ExprId, Span};

/// Expression node.
#[derive(Clone, Eq, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// A node with no source location.
    pub fn synthetic(kind: ExprKind) -> Self {
        Expr {
            kind,
            span: Span::DUMMY,
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Literal values, kept in their source spelling.
///
/// String and char contents are stored *escaped*, exactly as they appear
/// between the quotes, so rendering reproduces the original text.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    String(String),
    /// Content between the `"""` delimiters, including the leading newline.
    TextBlock(String),
    Char(String),
    Int(String),
    Float(String),
    Bool(bool),
    Null,
}

impl Literal {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Lambda parameter list.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum LambdaParams {
    /// `x -> ..` or `(x, y) -> ..`
    Inferred { names: Vec<String>, parenthesized: bool },
    /// `(String x, int y) -> ..`
    Typed(Vec<Param>),
}

/// Lambda body.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum LambdaBody {
    Expr(ExprId),
    Block(Block),
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    Literal(Literal),
    /// Simple identifier.
    Name(String),
    This,
    Super,
    /// `target.name` (also `Outer.this`).
    FieldAccess {
        target: ExprId,
        name: String,
    },
    /// `target.<T>name(args)`; `this(..)`/`super(..)` use the keyword as name.
    MethodCall {
        target: Option<ExprId>,
        type_args: Vec<TypeRef>,
        name: String,
        args: Vec<ExprId>,
    },
    /// `new T(args)` with an optional anonymous class body.
    New {
        ty: TypeRef,
        args: Vec<ExprId>,
        body: Option<Vec<Member>>,
    },
    /// `new T[dims]..[]..` or `new T[]..{init}`.
    NewArray {
        ty: TypeRef,
        dims: Vec<ExprId>,
        extra_dims: u8,
        init: Option<ExprId>,
    },
    /// `{a, b, c}`
    ArrayInit(Vec<ExprId>),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },
    Conditional {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },
    Cast {
        ty: TypeRef,
        expr: ExprId,
    },
    /// `expr instanceof T` or `expr instanceof T binding`.
    InstanceOf {
        expr: ExprId,
        ty: TypeRef,
        binding: Option<String>,
    },
    Index {
        target: ExprId,
        index: ExprId,
    },
    Lambda {
        params: LambdaParams,
        body: LambdaBody,
    },
    /// `target::name` (`name` is `new` for constructor references).
    MethodRef {
        target: ExprId,
        name: String,
    },
    /// `T.class`
    ClassLit(TypeRef),
    /// A type in expression position, e.g. `int[]` in `int[]::new`.
    TypeExpr(TypeRef),
    Switch {
        selector: ExprId,
        cases: Vec<SwitchCase>,
    },
    Paren(ExprId),
    /// Nested annotation used as an annotation value.
    Annotation(Box<Annotation>),
    /// An expression preceded by comments written inside an expression.
    Commented {
        comments: Vec<Comment>,
        expr: ExprId,
    },
}

/// Discriminant of [`ExprKind`], used by kind queries.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprTag {
    Literal,
    Name,
    This,
    Super,
    FieldAccess,
    MethodCall,
    New,
    NewArray,
    ArrayInit,
    Unary,
    Binary,
    Assign,
    Conditional,
    Cast,
    InstanceOf,
    Index,
    Lambda,
    MethodRef,
    ClassLit,
    TypeExpr,
    Switch,
    Paren,
    Annotation,
    Commented,
}

impl ExprKind {
    pub fn tag(&self) -> ExprTag {
        match self {
            ExprKind::Literal(_) => ExprTag::Literal,
            ExprKind::Name(_) => ExprTag::Name,
            ExprKind::This => ExprTag::This,
            ExprKind::Super => ExprTag::Super,
            ExprKind::FieldAccess { .. } => ExprTag::FieldAccess,
            ExprKind::MethodCall { .. } => ExprTag::MethodCall,
            ExprKind::New { .. } => ExprTag::New,
            ExprKind::NewArray { .. } => ExprTag::NewArray,
            ExprKind::ArrayInit(_) => ExprTag::ArrayInit,
            ExprKind::Unary { .. } => ExprTag::Unary,
            ExprKind::Binary { .. } => ExprTag::Binary,
            ExprKind::Assign { .. } => ExprTag::Assign,
            ExprKind::Conditional { .. } => ExprTag::Conditional,
            ExprKind::Cast { .. } => ExprTag::Cast,
            ExprKind::InstanceOf { .. } => ExprTag::InstanceOf,
            ExprKind::Index { .. } => ExprTag::Index,
            ExprKind::Lambda { .. } => ExprTag::Lambda,
            ExprKind::MethodRef { .. } => ExprTag::MethodRef,
            ExprKind::ClassLit(_) => ExprTag::ClassLit,
            ExprKind::TypeExpr(_) => ExprTag::TypeExpr,
            ExprKind::Switch { .. } => ExprTag::Switch,
            ExprKind::Paren(_) => ExprTag::Paren,
            ExprKind::Annotation(_) => ExprTag::Annotation,
            ExprKind::Commented { .. } => ExprTag::Commented,
        }
    }

    /// The string literal's escaped content, if this is one.
    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            ExprKind::Literal(lit) => lit.as_string(),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, ExprKind::Literal(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ExprKind::Literal(Literal::Null))
    }
}
