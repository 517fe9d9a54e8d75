//! Java lexer for vulnfix using logos.
//!
//! Produces a flat token list plus a side table of comments. Comments never
//! appear in the token stream; the parser consults the side table by span to
//! attach them to declarations, statements, and expressions.

mod keywords;
mod lex_error;
mod raw_token;
mod token;

use logos::Logos;
use vulnfix_ir::{Comment, CommentKind, Span};

pub use lex_error::LexError;
use raw_token::RawToken;
pub use token::{Token, TokenKind};

/// Lexer output: tokens terminated by [`TokenKind::Eof`], and every comment
/// in source order.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
}

/// Lex Java source text.
pub fn lex(source: &str) -> Result<LexOutput, LexError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LexError::SourceTooLarge { len: source.len() });
    }

    let mut out = LexOutput {
        tokens: Vec::with_capacity(source.len() / 4),
        comments: Vec::new(),
    };
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();
        let raw = result.map_err(|()| LexError::from_slice(slice, span))?;
        match raw {
            RawToken::LineComment => {
                out.comments.push(Comment::new(CommentKind::Line, slice, span));
            }
            RawToken::BlockComment => {
                let kind = if slice.starts_with("/**") && slice != "/**/" {
                    CommentKind::Doc
                } else {
                    CommentKind::Block
                };
                out.comments.push(Comment::new(kind, slice, span));
            }
            RawToken::Ident => {
                let kind = keywords::lookup(slice).unwrap_or(TokenKind::Ident);
                out.tokens.push(Token::new(kind, span));
            }
            raw => out.tokens.push(Token::new(convert(raw), span)),
        }
    }

    out.tokens.push(Token::new(
        TokenKind::Eof,
        Span::from_range(source.len()..source.len()),
    ));
    Ok(out)
}

fn convert(raw: RawToken) -> TokenKind {
    match raw {
        // Handled by the caller.
        RawToken::LineComment | RawToken::BlockComment | RawToken::Ident => TokenKind::Ident,

        RawToken::IntLit => TokenKind::IntLit,
        RawToken::FloatLit => TokenKind::FloatLit,
        RawToken::CharLit => TokenKind::CharLit,
        RawToken::StringLit => TokenKind::StringLit,
        RawToken::TextBlock => TokenKind::TextBlock,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::At => TokenKind::At,
        RawToken::ColonColon => TokenKind::ColonColon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Question => TokenKind::Question,
        RawToken::Arrow => TokenKind::Arrow,

        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Shl => TokenKind::Shl,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::AmpEq => TokenKind::AmpEq,
        RawToken::PipeEq => TokenKind::PipeEq,
        RawToken::CaretEq => TokenKind::CaretEq,
        RawToken::ShlEq => TokenKind::ShlEq,
    }
}
