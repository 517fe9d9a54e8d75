#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vulnfix_ir::CommentKind;
use vulnfix_lexer::{lex, LexError, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .unwrap()
        .tokens
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn keywords_identifiers_and_literals() {
    assert_eq!(
        kinds("public class Foo { int x = 42; }"),
        vec![
            TokenKind::Public,
            TokenKind::Class,
            TokenKind::Ident,
            TokenKind::LBrace,
            TokenKind::Int,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::IntLit,
            TokenKind::Semi,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn shift_right_is_two_tokens() {
    assert_eq!(
        kinds("a >> b >>= c"),
        vec![
            TokenKind::Ident,
            TokenKind::Gt,
            TokenKind::Gt,
            TokenKind::Ident,
            TokenKind::Gt,
            TokenKind::GtEq,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn numeric_literal_forms() {
    for src in ["0x1F", "0b1010", "1_000L", "077"] {
        assert_eq!(kinds(src), vec![TokenKind::IntLit, TokenKind::Eof], "{src}");
    }
    for src in ["1.5", "1.5f", ".5", "1e10", "2d", "3.0e-2D"] {
        assert_eq!(kinds(src), vec![TokenKind::FloatLit, TokenKind::Eof], "{src}");
    }
}

#[test]
fn string_char_and_text_block() {
    let source = "\"a\\\"b\" '\\'' \"\"\"\n    hello \"quoted\"\n    \"\"\"";
    let out = lex(source).unwrap();
    let kinds: Vec<_> = out.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::StringLit,
            TokenKind::CharLit,
            TokenKind::TextBlock,
            TokenKind::Eof
        ]
    );
    assert_eq!(out.tokens[0].text(source), r#""a\"b""#);
}

#[test]
fn empty_string_is_not_a_text_block() {
    assert_eq!(
        kinds(r#"x("")"#),
        vec![
            TokenKind::Ident,
            TokenKind::LParen,
            TokenKind::StringLit,
            TokenKind::RParen,
            TokenKind::Eof
        ]
    );
}

#[test]
fn comments_go_to_side_table() {
    let out = lex("/** doc */ int /* b */ x; // tail\n").unwrap();
    let comments: Vec<_> = out
        .comments
        .iter()
        .map(|c| (c.kind, c.text.as_str()))
        .collect();
    assert_eq!(
        comments,
        vec![
            (CommentKind::Doc, "/** doc */"),
            (CommentKind::Block, "/* b */"),
            (CommentKind::Line, "// tail"),
        ]
    );
    assert_eq!(out.tokens.len(), 4);
}

#[test]
fn contextual_keywords_lex_as_identifiers() {
    assert_eq!(
        kinds("var record yield"),
        vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
    );
}

#[test]
fn unterminated_comment_is_an_error() {
    assert!(matches!(
        lex("int x; /* never closed"),
        Err(LexError::UnterminatedComment { .. })
    ));
}

#[test]
fn unterminated_string_is_an_error() {
    assert!(matches!(
        lex("String s = \"open;\n"),
        Err(LexError::UnterminatedString { .. })
    ));
}

#[test]
fn invalid_character_is_an_error() {
    assert!(matches!(
        lex("int x = 1 # 2;"),
        Err(LexError::InvalidCharacter { found: '#', .. })
    ));
}
