//! Lexer errors.

use thiserror::Error;
use vulnfix_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LexError {
    #[error("source is too large to lex ({len} bytes)")]
    SourceTooLarge { len: usize },
    #[error("unterminated string literal at {span}")]
    UnterminatedString { span: Span },
    #[error("unterminated character literal at {span}")]
    UnterminatedChar { span: Span },
    #[error("unterminated text block at {span}")]
    UnterminatedTextBlock { span: Span },
    #[error("unterminated comment at {span}")]
    UnterminatedComment { span: Span },
    #[error("unexpected character `{found}` at {span}")]
    InvalidCharacter { found: char, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::SourceTooLarge { .. } => Span::DUMMY,
            LexError::UnterminatedString { span }
            | LexError::UnterminatedChar { span }
            | LexError::UnterminatedTextBlock { span }
            | LexError::UnterminatedComment { span }
            | LexError::InvalidCharacter { span, .. } => *span,
        }
    }

    /// Classify a logos error by the text it stopped on.
    pub(crate) fn from_slice(slice: &str, span: Span) -> Self {
        if slice.starts_with("\"\"\"") {
            LexError::UnterminatedTextBlock { span }
        } else if slice.starts_with('"') {
            LexError::UnterminatedString { span }
        } else if slice.starts_with('\'') {
            LexError::UnterminatedChar { span }
        } else if slice.starts_with("/*") {
            LexError::UnterminatedComment { span }
        } else {
            LexError::InvalidCharacter {
                found: slice.chars().next().unwrap_or('\0'),
                span,
            }
        }
    }
}
