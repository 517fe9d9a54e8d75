//! Token cursor for navigating the token stream.

use vulnfix_ir::Span;
use vulnfix_lexer::{Token, TokenKind};

use crate::error::{PResult, ParseError};

/// Cursor over a lexed token list. The list always ends with `Eof`.
pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Cursor {
            tokens,
            source,
            pos: 0,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    // Token access

    pub fn current(&self) -> Token {
        self.peek(0)
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// The token `n` positions ahead (clamped to `Eof`).
    pub fn peek(&self, n: usize) -> Token {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens
            .get((self.pos + n).min(last))
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY))
    }

    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.peek(n).kind
    }

    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Source text of the current token.
    pub fn current_text(&self) -> &'a str {
        self.current().text(self.source)
    }

    pub fn peek_text(&self, n: usize) -> &'a str {
        self.peek(n).text(self.source)
    }

    // Lookahead

    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn check_ident(&self) -> bool {
        self.check(TokenKind::Ident)
    }

    /// Current token is the contextual keyword `word`.
    pub fn check_contextual(&self, word: &str) -> bool {
        self.check_ident() && self.current_text() == word
    }

    /// Tokens `n` and `n + 1` touch with no whitespace between them.
    pub fn adjacent(&self, n: usize) -> bool {
        self.peek(n).span.end == self.peek(n + 1).span.start
    }

    /// Index of the token after the bracket matching the opener at `n`,
    /// relative to the current position.
    pub fn skip_balanced(&self, n: usize, open: TokenKind, close: TokenKind) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = n;
        loop {
            let kind = self.peek_kind(i);
            if kind == TokenKind::Eof {
                return None;
            }
            if kind == open {
                depth += 1;
            } else if kind == close {
                if depth <= 1 {
                    return Some(i + 1);
                }
                depth -= 1;
            }
            i += 1;
        }
    }

    // Consumption

    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(
                kind.describe(),
                self.current_kind(),
                self.current_span(),
            ))
        }
    }

    pub fn expect_ident(&mut self) -> PResult<String> {
        if self.check_ident() {
            let text = self.current_text().to_string();
            self.advance();
            Ok(text)
        } else {
            Err(ParseError::expected(
                "identifier",
                self.current_kind(),
                self.current_span(),
            ))
        }
    }

    // Snapshots

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }
}
