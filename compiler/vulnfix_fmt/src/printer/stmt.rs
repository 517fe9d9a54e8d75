//! Statements and blocks.

use vulnfix_ir::{Block, LocalVar, Resource, StmtId, StmtKind, SwitchCase};

use super::Printer;
use crate::emitter::Emitter;

impl<E: Emitter> Printer<'_, E> {
    pub(crate) fn block(&mut self, block: &Block) {
        if block.stmts.is_empty() && block.trailing_comments.is_empty() {
            self.emit("{}");
            return;
        }
        self.emit("{");
        self.indent += 1;
        for &stmt in &block.stmts {
            self.newline();
            self.stmt(stmt);
        }
        self.closing_comments(&block.trailing_comments);
        self.indent -= 1;
        self.newline();
        self.emit("}");
    }

    /// A statement with its leading comments on their own lines.
    pub(crate) fn stmt(&mut self, id: StmtId) {
        let arena = self.arena;
        let stmt = arena.get_stmt(id);
        self.own_line_comments(&stmt.comments);
        self.stmt_kind(&stmt.kind);
        self.trailing_comment(stmt.trailing.as_ref());
    }

    /// Body of a compound statement: a brace block on the same line, or
    /// the statement alone on the next, deeper line. Returns whether the
    /// body ended in `}` on the same line.
    fn body(&mut self, id: StmtId) -> bool {
        let arena = self.arena;
        let stmt = arena.get_stmt(id);
        if let StmtKind::Block(block) = &stmt.kind {
            if stmt.comments.is_empty() && stmt.trailing.is_none() {
                self.emit(" ");
                self.block(block);
                return true;
            }
        }
        self.indent += 1;
        self.newline();
        self.stmt(id);
        self.indent -= 1;
        false
    }

    fn stmt_kind(&mut self, kind: &StmtKind) {
        let arena = self.arena;
        match kind {
            StmtKind::Expr(expr) => {
                self.expr(*expr);
                self.emit(";");
            }
            StmtKind::LocalVar(local) => {
                self.local_var(local);
                self.emit(";");
            }
            StmtKind::LocalType(ty) => self.type_decl(ty),
            StmtKind::Block(block) => self.block(block),
            StmtKind::If {
                cond,
                then_stmt,
                else_stmt,
            } => {
                self.emit("if (");
                self.expr(*cond);
                self.emit(")");
                let braced = self.body(*then_stmt);
                if let Some(else_stmt) = *else_stmt {
                    if braced {
                        self.emit(" else");
                    } else {
                        self.newline();
                        self.emit("else");
                    }
                    let nested = arena.get_stmt(else_stmt);
                    if matches!(nested.kind, StmtKind::If { .. }) && nested.comments.is_empty() {
                        self.emit(" ");
                        self.stmt(else_stmt);
                    } else {
                        self.body(else_stmt);
                    }
                }
            }
            StmtKind::While { cond, body } => {
                self.emit("while (");
                self.expr(*cond);
                self.emit(")");
                self.body(*body);
            }
            StmtKind::DoWhile { body, cond } => {
                self.emit("do");
                if self.body(*body) {
                    self.emit(" ");
                } else {
                    self.newline();
                }
                self.emit("while (");
                self.expr(*cond);
                self.emit(");");
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                self.emit("for (");
                self.comma_list(init, |p, &id| p.for_init(id));
                self.emit(";");
                if let Some(cond) = cond {
                    self.emit(" ");
                    self.expr(*cond);
                }
                self.emit(";");
                if !update.is_empty() {
                    self.emit(" ");
                    self.comma_list(update, |p, &e| p.expr(e));
                }
                self.emit(")");
                self.body(*body);
            }
            StmtKind::ForEach {
                var,
                iterable,
                body,
            } => {
                self.emit("for (");
                self.local_var(var);
                self.emit(" : ");
                self.expr(*iterable);
                self.emit(")");
                self.body(*body);
            }
            StmtKind::Return(value) => match value {
                Some(value) => {
                    self.emit("return ");
                    self.expr(*value);
                    self.emit(";");
                }
                None => self.emit("return;"),
            },
            StmtKind::Throw(value) => {
                self.emit("throw ");
                self.expr(*value);
                self.emit(";");
            }
            StmtKind::Break(label) => self.jump("break", label.as_deref()),
            StmtKind::Continue(label) => self.jump("continue", label.as_deref()),
            StmtKind::Yield(value) => {
                self.emit("yield ");
                self.expr(*value);
                self.emit(";");
            }
            StmtKind::Try {
                resources,
                body,
                catches,
                finally,
            } => {
                self.emit("try ");
                if !resources.is_empty() {
                    self.emit("(");
                    for (index, resource) in resources.iter().enumerate() {
                        if index > 0 {
                            self.emit("; ");
                        }
                        match resource {
                            Resource::Decl(local) => self.local_var(local),
                            Resource::Expr(expr) => self.expr(*expr),
                        }
                    }
                    self.emit(") ");
                }
                self.block(body);
                for catch in catches {
                    self.emit(" catch (");
                    self.modifiers(catch.modifiers);
                    for (index, ty) in catch.types.iter().enumerate() {
                        if index > 0 {
                            self.emit(" | ");
                        }
                        self.type_ref(ty);
                    }
                    self.emit(" ");
                    self.emit(&catch.name);
                    self.emit(") ");
                    self.block(&catch.body);
                }
                if let Some(finally) = finally {
                    self.emit(" finally ");
                    self.block(finally);
                }
            }
            StmtKind::Switch { selector, cases } => self.switch(*selector, cases),
            StmtKind::Synchronized { lock, body } => {
                self.emit("synchronized (");
                self.expr(*lock);
                self.emit(") ");
                self.block(body);
            }
            StmtKind::Labeled { label, body } => {
                self.emit(label);
                self.emit(": ");
                self.stmt(*body);
            }
            StmtKind::Assert { cond, message } => {
                self.emit("assert ");
                self.expr(*cond);
                if let Some(message) = message {
                    self.emit(" : ");
                    self.expr(*message);
                }
                self.emit(";");
            }
            StmtKind::Empty => self.emit(";"),
        }
    }

    fn jump(&mut self, keyword: &str, label: Option<&str>) {
        self.emit(keyword);
        if let Some(label) = label {
            self.emit(" ");
            self.emit(label);
        }
        self.emit(";");
    }

    /// A `for` initializer: a declaration or expression without its `;`.
    fn for_init(&mut self, id: StmtId) {
        let arena = self.arena;
        match &arena.get_stmt(id).kind {
            StmtKind::LocalVar(local) => self.local_var(local),
            StmtKind::Expr(expr) => self.expr(*expr),
            other => self.stmt_kind(other),
        }
    }

    pub(crate) fn local_var(&mut self, local: &LocalVar) {
        self.inline_annotations(&local.annotations);
        self.modifiers(local.modifiers);
        self.type_ref(&local.ty);
        self.emit(" ");
        self.declarators(&local.declarators);
    }

    /// `switch (selector) { cases }`, shared by statements and expressions.
    pub(crate) fn switch(&mut self, selector: vulnfix_ir::ExprId, cases: &[SwitchCase]) {
        self.emit("switch (");
        self.expr(selector);
        self.emit(") ");
        if cases.is_empty() {
            self.emit("{}");
            return;
        }
        self.emit("{");
        self.indent += 1;
        for case in cases {
            self.newline();
            self.own_line_comments(&case.comments);
            if case.labels.is_empty() {
                self.emit("default");
            } else {
                self.emit("case ");
                self.comma_list(&case.labels, |p, &label| p.expr(label));
            }
            if case.arrow {
                self.emit(" -> ");
                for &id in &case.body {
                    self.arrow_body(id);
                }
            } else {
                self.emit(":");
                self.indent += 1;
                for &id in &case.body {
                    self.newline();
                    self.stmt(id);
                }
                self.indent -= 1;
            }
        }
        self.indent -= 1;
        self.newline();
        self.emit("}");
    }

    /// The statement after `->`, with its comments kept on the same line.
    fn arrow_body(&mut self, id: StmtId) {
        let arena = self.arena;
        let stmt = arena.get_stmt(id);
        self.inline_comments(&stmt.comments);
        self.stmt_kind(&stmt.kind);
        self.trailing_comment(stmt.trailing.as_ref());
    }
}
