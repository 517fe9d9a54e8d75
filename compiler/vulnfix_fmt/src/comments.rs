//! Comment re-indentation.
//!
//! Comments keep their text but not their original column. Continuation
//! lines of block and doc comments are re-aligned to the current indent,
//! with a leading `*` placed one column in, javadoc style.

use vulnfix_ir::{Comment, CommentKind};

/// The lines of `comment`, without indentation. Continuation lines that
/// start with `*` get one leading space.
pub(crate) fn comment_lines(comment: &Comment) -> Vec<String> {
    if comment.kind == CommentKind::Line {
        return vec![comment.text.trim_end().to_string()];
    }
    comment
        .text
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let line = if index == 0 { line.trim_end() } else { line.trim() };
            if index > 0 && line.starts_with('*') {
                format!(" {line}")
            } else {
                line.to_string()
            }
        })
        .collect()
}
