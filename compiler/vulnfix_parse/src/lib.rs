//! Recursive-descent parser for Java 17 source.
//!
//! Produces a [`CompilationUnit`] whose expressions and statements live in
//! the unit's arena. Parsing is all-or-nothing: the first error aborts and
//! is returned as a [`ParseError`].
//!
//! Comments come from the lexer's side table. Each declaration, member,
//! statement, switch case, and primary expression takes the comments that
//! precede it; statements and members also take a comment on the same line
//! after them. Anything left before a closing brace stays with that block,
//! so no comment is dropped.

mod cursor;
mod error;
mod grammar;
mod stack;

use vulnfix_ir::{Comment, CompilationUnit, ExprArena, Span};
use vulnfix_lexer::lex;

use crate::cursor::Cursor;
pub use crate::error::ParseError;
use crate::error::PResult;
pub use crate::stack::ensure_sufficient_stack;

/// Parse a Java compilation unit.
pub fn parse(source: &str) -> Result<CompilationUnit, ParseError> {
    let lexed = lex(source)?;
    let mut parser = Parser::new(&lexed.tokens, source, lexed.comments);
    parser.parse_unit()
}

/// Parser state.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
    comments: Vec<Comment>,
    /// Index of the first comment not yet attached.
    next_comment: usize,
}

/// Restore point for speculative parsing.
#[derive(Copy, Clone)]
pub(crate) struct Snapshot {
    pos: usize,
    next_comment: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [vulnfix_lexer::Token], source: &'a str, comments: Vec<Comment>) -> Self {
        Parser {
            cursor: Cursor::new(tokens, source),
            arena: ExprArena::with_capacity(source.len()),
            comments,
            next_comment: 0,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos: self.cursor.position(),
            next_comment: self.next_comment,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.cursor.reset(snapshot.pos);
        self.next_comment = snapshot.next_comment;
    }

    /// Run `f` and rewind if it fails.
    fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        let snapshot = self.snapshot();
        match f(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.restore(snapshot);
                None
            }
        }
    }

    /// Run a predicate that may consume tokens, then rewind.
    fn look_ahead(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let snapshot = self.snapshot();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    // Comment attachment

    /// Take every unattached comment that starts before the current token.
    fn leading_comments(&mut self) -> Vec<Comment> {
        let limit = self.cursor.current_span().start;
        let mut taken = Vec::new();
        while let Some(comment) = self.comments.get(self.next_comment) {
            if comment.span.start >= limit {
                break;
            }
            taken.push(comment.clone());
            self.next_comment += 1;
        }
        taken
    }

    /// Take one comment that sits on the same line as the previous token.
    fn trailing_comment(&mut self) -> Option<Comment> {
        let prev_end = self.cursor.previous_span().end;
        let comment = self.comments.get(self.next_comment)?;
        if comment.span.start < prev_end || comment.span.start >= self.cursor.current_span().start
        {
            return None;
        }
        let gap = self
            .cursor
            .source()
            .get(prev_end as usize..comment.span.start as usize)?;
        if gap.contains('\n') {
            return None;
        }
        self.next_comment += 1;
        Some(comment.clone())
    }

    /// Span from `start` to the end of the previous token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }
}

#[cfg(test)]
mod tests;
