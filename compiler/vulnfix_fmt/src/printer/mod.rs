//! Tree printer.
//!
//! Walks a [`CompilationUnit`](vulnfix_ir::CompilationUnit) top-down and
//! writes it to an [`Emitter`]. Every construct starts on a line whose
//! indentation has already been emitted and leaves the cursor right after
//! its last character; callers decide what separates siblings.

mod decl;
mod expr;
mod stmt;

use vulnfix_ir::{Comment, ExprArena};

use crate::comments::comment_lines;
use crate::emitter::Emitter;

pub(crate) struct Printer<'a, E: Emitter> {
    arena: &'a ExprArena,
    out: E,
    indent: usize,
}

impl<'a, E: Emitter> Printer<'a, E> {
    pub(crate) fn new(arena: &'a ExprArena, out: E) -> Self {
        Printer {
            arena,
            out,
            indent: 0,
        }
    }

    pub(crate) fn finish(self) -> E {
        self.out
    }

    fn emit(&mut self, text: &str) {
        self.out.emit(text);
    }

    /// Start a new line at the current indentation.
    fn newline(&mut self) {
        self.out.emit_newline();
        self.out.emit_indent(self.indent);
    }

    /// Leave one empty line, then start a new one.
    fn blank_line(&mut self) {
        self.out.emit_newline();
        self.newline();
    }

    /// A comment on its own line(s), followed by a fresh line.
    fn own_line_comment(&mut self, comment: &Comment) {
        let lines = comment_lines(comment);
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                self.newline();
            }
            self.emit(line);
        }
        self.newline();
    }

    fn own_line_comments(&mut self, comments: &[Comment]) {
        for comment in comments {
            self.own_line_comment(comment);
        }
    }

    /// Comments printed inside a line, before the construct they precede.
    fn inline_comments(&mut self, comments: &[Comment]) {
        for comment in comments {
            self.emit(&comment.inline_text());
            self.out.emit_space();
        }
    }

    /// A same-line comment after a statement or member.
    fn trailing_comment(&mut self, comment: Option<&Comment>) {
        if let Some(comment) = comment {
            self.out.emit_space();
            self.emit(comment.text.trim_end());
        }
    }

    /// Comments before a closing brace, one per line at body indentation.
    fn closing_comments(&mut self, comments: &[Comment]) {
        for comment in comments {
            self.newline();
            let lines = comment_lines(comment);
            for (index, line) in lines.iter().enumerate() {
                if index > 0 {
                    self.newline();
                }
                self.emit(line);
            }
        }
    }

    /// `items` separated by `", "`.
    fn comma_list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.emit(", ");
            }
            each(self, item);
        }
    }
}
