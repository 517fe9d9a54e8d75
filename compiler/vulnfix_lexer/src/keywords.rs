//! Reserved keyword lookup.
//!
//! Contextual keywords (`var`, `record`, `yield`, `sealed`, `permits`,
//! `non-sealed`) are not reserved: they lex as identifiers and the parser
//! recognizes them by position.

use crate::TokenKind;

/// Look up a reserved keyword by text.
///
/// Uses length-bucketing for fast rejection: Java keywords are 2-12 chars.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let len = text.len();
    if !(2..=12).contains(&len) || !text.as_bytes()[0].is_ascii_lowercase() {
        return None;
    }

    match len {
        2 => match text {
            "do" => Some(TokenKind::Do),
            "if" => Some(TokenKind::If),
            _ => None,
        },
        3 => match text {
            "for" => Some(TokenKind::For),
            "int" => Some(TokenKind::Int),
            "new" => Some(TokenKind::New),
            "try" => Some(TokenKind::Try),
            _ => None,
        },
        4 => match text {
            "byte" => Some(TokenKind::Byte),
            "case" => Some(TokenKind::Case),
            "char" => Some(TokenKind::Char),
            "else" => Some(TokenKind::Else),
            "enum" => Some(TokenKind::Enum),
            "goto" => Some(TokenKind::Goto),
            "long" => Some(TokenKind::Long),
            "null" => Some(TokenKind::Null),
            "this" => Some(TokenKind::This),
            "true" => Some(TokenKind::True),
            "void" => Some(TokenKind::Void),
            _ => None,
        },
        5 => match text {
            "break" => Some(TokenKind::Break),
            "catch" => Some(TokenKind::Catch),
            "class" => Some(TokenKind::Class),
            "const" => Some(TokenKind::Const),
            "false" => Some(TokenKind::False),
            "final" => Some(TokenKind::Final),
            "float" => Some(TokenKind::Float),
            "short" => Some(TokenKind::Short),
            "super" => Some(TokenKind::Super),
            "throw" => Some(TokenKind::Throw),
            "while" => Some(TokenKind::While),
            _ => None,
        },
        6 => match text {
            "assert" => Some(TokenKind::Assert),
            "double" => Some(TokenKind::Double),
            "import" => Some(TokenKind::Import),
            "native" => Some(TokenKind::Native),
            "public" => Some(TokenKind::Public),
            "return" => Some(TokenKind::Return),
            "static" => Some(TokenKind::Static),
            "switch" => Some(TokenKind::Switch),
            "throws" => Some(TokenKind::Throws),
            _ => None,
        },
        7 => match text {
            "boolean" => Some(TokenKind::Boolean),
            "default" => Some(TokenKind::Default),
            "extends" => Some(TokenKind::Extends),
            "finally" => Some(TokenKind::Finally),
            "package" => Some(TokenKind::Package),
            "private" => Some(TokenKind::Private),
            _ => None,
        },
        8 => match text {
            "abstract" => Some(TokenKind::Abstract),
            "continue" => Some(TokenKind::Continue),
            "strictfp" => Some(TokenKind::Strictfp),
            "volatile" => Some(TokenKind::Volatile),
            _ => None,
        },
        9 => match text {
            "interface" => Some(TokenKind::Interface),
            "protected" => Some(TokenKind::Protected),
            "transient" => Some(TokenKind::Transient),
            _ => None,
        },
        10 => match text {
            "implements" => Some(TokenKind::Implements),
            "instanceof" => Some(TokenKind::Instanceof),
            _ => None,
        },
        12 => match text {
            "synchronized" => Some(TokenKind::Synchronized),
            _ => None,
        },
        _ => None,
    }
}
