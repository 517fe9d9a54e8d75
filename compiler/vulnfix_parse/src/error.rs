//! Parse errors.

use thiserror::Error;
use vulnfix_ir::Span;
use vulnfix_lexer::{LexError, TokenKind};

/// Why a file could not be turned into a tree.
///
/// Parsing never recovers: the first error aborts the file, and the engine
/// skips it.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("{message} at {span}")]
    Syntax { message: String, span: Span },
    #[error("unsupported syntax: {what} at {span}")]
    Unsupported { what: &'static str, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::Syntax { span, .. } | ParseError::Unsupported { span, .. } => *span,
        }
    }

    pub(crate) fn expected(what: &str, found: TokenKind, span: Span) -> Self {
        ParseError::Syntax {
            message: format!("expected {what}, found {}", found.describe()),
            span,
        }
    }

    pub(crate) fn unsupported(what: &'static str, span: Span) -> Self {
        ParseError::Unsupported { what, span }
    }
}

pub(crate) type PResult<T> = Result<T, ParseError>;
