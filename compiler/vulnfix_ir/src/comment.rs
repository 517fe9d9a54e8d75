//! Source comments.
//!
//! The lexer collects comments into a side table; the parser attaches them
//! to the nearest following declaration, statement, or expression so the
//! renderer can put them back.

use crate::Span;

/// A source comment, stored verbatim including its delimiters.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Comment {
    pub kind: CommentKind,
    /// Full comment text, e.g. `// note` or `/** doc */`.
    pub text: String,
    pub span: Span,
}

/// The kind of comment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
    /// `/** ... */`
    Doc,
}

impl Comment {
    pub fn new(kind: CommentKind, text: impl Into<String>, span: Span) -> Self {
        Comment {
            kind,
            text: text.into(),
            span,
        }
    }

    /// A synthesized block comment with the given body.
    pub fn block(body: &str) -> Self {
        Comment::new(CommentKind::Block, format!("/* {body} */"), Span::DUMMY)
    }

    /// Text usable inside an expression: line comments are turned into block
    /// comments so no line break is needed after them.
    pub fn inline_text(&self) -> String {
        match self.kind {
            CommentKind::Line => {
                let body = self.text.trim_start_matches('/').trim();
                format!("/* {} */", body.replace("*/", "* /"))
            }
            CommentKind::Block | CommentKind::Doc => self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_comment_inline_text() {
        let c = Comment::new(CommentKind::Line, "// keep this", Span::DUMMY);
        assert_eq!(c.inline_text(), "/* keep this */");
    }

    #[test]
    fn block_comment_inline_text_is_verbatim() {
        let c = Comment::block("use a PreparedStatement");
        assert_eq!(c.inline_text(), "/* use a PreparedStatement */");
    }
}
