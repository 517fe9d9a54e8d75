//! Grammar productions, one file per syntactic category.
//!
//! - `item`: compilation unit, type declarations, members
//! - `ty`: types, type parameters, modifiers, annotations
//! - `stmt`: statements and blocks
//! - `expr`: expressions (precedence climbing)

mod expr;
mod item;
mod stmt;
mod ty;
