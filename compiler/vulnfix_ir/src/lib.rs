//! Vulnfix IR - mutable Java syntax tree.
//!
//! This crate contains the data structures shared by the parser, the
//! renderer, and the remediation rules:
//! - Spans for source locations
//! - `ExprId`/`StmtId` node identities
//! - The arena holding every expression and statement of a unit
//! - AST nodes for declarations, statements, and expressions
//! - Node constructors and pre-order traversal
//!
//! # Design
//!
//! - **Flatten expressions and statements**: no `Box<Expr>`, children are
//!   `ExprId(u32)`/`StmtId(u32)` indices into the unit's arena.
//! - **Replace in place**: a rewrite swaps a node's kind at its id, so a
//!   parent never needs to be told about the change.
//! - **Declarations are owned trees**: types and members are plain nested
//!   structs, small and rarely rewritten.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
pub mod builder;
mod comment;
mod expr_id;
mod modifiers;
mod span;
pub mod visitor;

pub use arena::ExprArena;
pub use ast::{
    Annotation, AnnotationArgs, AssignOp, BinaryOp, Block, CatchClause, CompilationUnit,
    EnumConstant, Expr, ExprKind, ExprTag, FieldDecl, ImportDecl, LambdaBody, LambdaParams,
    Literal, LocalVar, Member, MemberKind, MethodDecl, PackageDecl, Param, Resource, Stmt,
    StmtKind, StmtTag, SwitchCase, TypeArg, TypeDecl, TypeKind, TypeParam, TypeRef, UnaryOp,
    VarDeclarator, WildcardBound,
};
pub use comment::{Comment, CommentKind};
pub use expr_id::{ExprId, StmtId};
pub use modifiers::Modifiers;
pub use span::Span;
pub use visitor::{Node, Scope};
