//! Java syntax tree.
//!
//! - `types`: type references and type parameters
//! - `operators`: binary, unary, and assignment operators
//! - `expr`: expression nodes (arena-allocated)
//! - `stmt`: statement nodes (arena-allocated)
//! - `items`: compilation unit, type declarations, members

mod expr;
mod items;
mod operators;
mod stmt;
mod types;

pub use expr::{Expr, ExprKind, ExprTag, LambdaBody, LambdaParams, Literal};
pub use items::{
    Annotation, AnnotationArgs, CompilationUnit, EnumConstant, FieldDecl, ImportDecl, Member,
    MemberKind, MethodDecl, PackageDecl, Param, TypeDecl, TypeKind,
};
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use stmt::{
    Block, CatchClause, LocalVar, Resource, Stmt, StmtKind, StmtTag, SwitchCase, VarDeclarator,
};
pub use types::{TypeArg, TypeParam, TypeRef, WildcardBound};
