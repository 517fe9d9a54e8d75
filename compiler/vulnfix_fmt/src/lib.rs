//! Java renderer.
//!
//! Prints a [`CompilationUnit`] back to source text with a fixed layout:
//! four-space indentation, K&R braces, one blank line between members
//! (consecutive fields stay together), and declarations in tree order.
//! Comments come back where the parser attached them.
//!
//! Rendering is a fixed point of parsing:
//! `render(parse(render(u))) == render(u)`.
//!
//! # Modules
//!
//! - [`emitter`]: Output abstraction
//! - `printer`: Tree walk for declarations, statements, and expressions

mod comments;
pub mod emitter;
mod printer;

pub use emitter::{Emitter, StringEmitter};

use printer::Printer;
use vulnfix_ir::{CompilationUnit, ExprArena, ExprId, StmtId};

/// Render a whole compilation unit. The result ends with one newline.
pub fn render(unit: &CompilationUnit) -> String {
    let mut printer = Printer::new(&unit.arena, StringEmitter::with_capacity(4096));
    printer.unit(unit);
    let mut out = printer.finish();
    out.ensure_trailing_newline();
    out.output()
}

/// Render a single expression on one logical line.
pub fn render_expr(arena: &ExprArena, id: ExprId) -> String {
    let mut printer = Printer::new(arena, StringEmitter::new());
    printer.expr(id);
    printer.finish().output()
}

/// Render a statement at indentation level zero, without a trailing newline.
pub fn render_stmt(arena: &ExprArena, id: StmtId) -> String {
    let mut printer = Printer::new(arena, StringEmitter::new());
    printer.stmt(id);
    printer.finish().output()
}

#[cfg(test)]
mod tests;
