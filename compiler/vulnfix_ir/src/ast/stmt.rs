//! Statement nodes.

use std::fmt;

use super::items::{Annotation, TypeDecl};
use super::types::TypeRef;
use crate::{Comment, ExprId, Modifiers, Span, StmtId};

/// Statement node.
#[derive(Clone, Eq, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
    /// Comments on the lines before the statement.
    pub comments: Vec<Comment>,
    /// A comment on the same line, after the statement.
    pub trailing: Option<Comment>,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt {
            kind,
            span,
            comments: Vec::new(),
            trailing: None,
        }
    }

    /// A statement with no source location.
    pub fn synthetic(kind: StmtKind) -> Self {
        Stmt::new(kind, Span::DUMMY)
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// A brace-delimited statement list.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Block {
    pub stmts: Vec<StmtId>,
    /// Comments between the last statement and the closing brace.
    pub trailing_comments: Vec<Comment>,
}

impl Block {
    pub fn new(stmts: Vec<StmtId>) -> Self {
        Block {
            stmts,
            trailing_comments: Vec::new(),
        }
    }

    /// No statements (comments alone do not count).
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

/// One variable in a declaration: `name[] = init`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct VarDeclarator {
    pub name: String,
    /// C-style array dimensions written after the name.
    pub dims: u8,
    pub init: Option<ExprId>,
}

impl VarDeclarator {
    pub fn new(name: impl Into<String>, init: Option<ExprId>) -> Self {
        VarDeclarator {
            name: name.into(),
            dims: 0,
            init,
        }
    }
}

/// A local variable declaration.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LocalVar {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    pub declarators: Vec<VarDeclarator>,
}

/// A try-with-resources header entry.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Resource {
    /// `Type name = init` (always exactly one declarator).
    Decl(LocalVar),
    /// An effectively-final variable or field reference.
    Expr(ExprId),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CatchClause {
    pub modifiers: Modifiers,
    /// One entry per alternative of a multi-catch.
    pub types: Vec<TypeRef>,
    pub name: String,
    pub body: Block,
}

/// One `case`/`default` group of a switch.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SwitchCase {
    /// Case labels; empty for `default`.
    pub labels: Vec<ExprId>,
    /// `->` form rather than `:`.
    pub arrow: bool,
    pub body: Vec<StmtId>,
    pub comments: Vec<Comment>,
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum StmtKind {
    Expr(ExprId),
    LocalVar(LocalVar),
    /// Local class, interface, enum, or record.
    LocalType(Box<TypeDecl>),
    Block(Block),
    If {
        cond: ExprId,
        then_stmt: StmtId,
        else_stmt: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    DoWhile {
        body: StmtId,
        cond: ExprId,
    },
    /// Classic `for`; `init` holds local-variable or expression statements.
    For {
        init: Vec<StmtId>,
        cond: Option<ExprId>,
        update: Vec<ExprId>,
        body: StmtId,
    },
    ForEach {
        var: LocalVar,
        iterable: ExprId,
        body: StmtId,
    },
    Return(Option<ExprId>),
    Throw(ExprId),
    Break(Option<String>),
    Continue(Option<String>),
    Yield(ExprId),
    Try {
        resources: Vec<Resource>,
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    },
    Switch {
        selector: ExprId,
        cases: Vec<SwitchCase>,
    },
    Synchronized {
        lock: ExprId,
        body: Block,
    },
    Labeled {
        label: String,
        body: StmtId,
    },
    Assert {
        cond: ExprId,
        message: Option<ExprId>,
    },
    Empty,
}

/// Discriminant of [`StmtKind`], used by kind queries.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtTag {
    Expr,
    LocalVar,
    LocalType,
    Block,
    If,
    While,
    DoWhile,
    For,
    ForEach,
    Return,
    Throw,
    Break,
    Continue,
    Yield,
    Try,
    Switch,
    Synchronized,
    Labeled,
    Assert,
    Empty,
}

impl StmtKind {
    pub fn tag(&self) -> StmtTag {
        match self {
            StmtKind::Expr(_) => StmtTag::Expr,
            StmtKind::LocalVar(_) => StmtTag::LocalVar,
            StmtKind::LocalType(_) => StmtTag::LocalType,
            StmtKind::Block(_) => StmtTag::Block,
            StmtKind::If { .. } => StmtTag::If,
            StmtKind::While { .. } => StmtTag::While,
            StmtKind::DoWhile { .. } => StmtTag::DoWhile,
            StmtKind::For { .. } => StmtTag::For,
            StmtKind::ForEach { .. } => StmtTag::ForEach,
            StmtKind::Return(_) => StmtTag::Return,
            StmtKind::Throw(_) => StmtTag::Throw,
            StmtKind::Break(_) => StmtTag::Break,
            StmtKind::Continue(_) => StmtTag::Continue,
            StmtKind::Yield(_) => StmtTag::Yield,
            StmtKind::Try { .. } => StmtTag::Try,
            StmtKind::Switch { .. } => StmtTag::Switch,
            StmtKind::Synchronized { .. } => StmtTag::Synchronized,
            StmtKind::Labeled { .. } => StmtTag::Labeled,
            StmtKind::Assert { .. } => StmtTag::Assert,
            StmtKind::Empty => StmtTag::Empty,
        }
    }
}
