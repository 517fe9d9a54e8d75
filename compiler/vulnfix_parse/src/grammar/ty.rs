//! Types, type parameters, modifiers, and annotations.

use vulnfix_ir::{
    Annotation, AnnotationArgs, ExprKind, Modifiers, TypeArg, TypeParam, TypeRef, WildcardBound,
};
use vulnfix_lexer::TokenKind;

use crate::error::{PResult, ParseError};
use crate::Parser;

/// Modifiers and annotations in front of a declaration.
#[derive(Default)]
pub(crate) struct DeclPrefix {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
}

impl Parser<'_> {
    /// Parse a type: primitive or qualified name, optional type arguments,
    /// and trailing `[]` dimensions.
    pub(crate) fn parse_type(&mut self) -> PResult<TypeRef> {
        let mut ty = self.parse_type_no_dims()?;
        ty.dims = self.parse_dims();
        Ok(ty)
    }

    /// A type without array dimensions (used by `new T[..]`).
    pub(crate) fn parse_type_no_dims(&mut self) -> PResult<TypeRef> {
        let kind = self.cursor.current_kind();
        if kind.is_primitive_type() || kind == TokenKind::Void {
            let name = self.cursor.current_text().to_string();
            self.cursor.advance();
            return Ok(TypeRef::simple(name));
        }
        if self.cursor.check(TokenKind::At) {
            return Err(ParseError::unsupported(
                "type-use annotation",
                self.cursor.current_span(),
            ));
        }
        let mut name = self.cursor.expect_ident()?;
        let mut args = None;
        loop {
            if self.cursor.check(TokenKind::Lt) {
                args = Some(self.parse_type_args()?);
            }
            if self.cursor.check(TokenKind::Dot) && self.cursor.peek_kind(1) == TokenKind::Ident {
                if args.is_some() {
                    return Err(ParseError::unsupported(
                        "type arguments on a qualifying type",
                        self.cursor.current_span(),
                    ));
                }
                self.cursor.advance();
                name.push('.');
                name.push_str(&self.cursor.expect_ident()?);
            } else {
                break;
            }
        }
        Ok(TypeRef {
            name,
            args,
            dims: 0,
        })
    }

    /// Count `[]` pairs.
    pub(crate) fn parse_dims(&mut self) -> u8 {
        let mut dims = 0u8;
        while self.cursor.check(TokenKind::LBracket)
            && self.cursor.peek_kind(1) == TokenKind::RBracket
        {
            self.cursor.advance();
            self.cursor.advance();
            dims = dims.saturating_add(1);
        }
        dims
    }

    /// `<...>`, where an empty list is the diamond.
    pub(crate) fn parse_type_args(&mut self) -> PResult<Vec<TypeArg>> {
        self.cursor.expect(TokenKind::Lt)?;
        let mut args = Vec::new();
        if self.cursor.eat(TokenKind::Gt) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_type_arg()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::Gt)?;
        Ok(args)
    }

    fn parse_type_arg(&mut self) -> PResult<TypeArg> {
        if !self.cursor.eat(TokenKind::Question) {
            return Ok(TypeArg::Type(self.parse_type()?));
        }
        let bound = if self.cursor.eat(TokenKind::Extends) {
            Some(WildcardBound::Extends)
        } else if self.cursor.eat(TokenKind::Super) {
            Some(WildcardBound::Super)
        } else {
            None
        };
        match bound {
            Some(bound) => Ok(TypeArg::Wildcard(Some((bound, self.parse_type()?)))),
            None => Ok(TypeArg::Wildcard(None)),
        }
    }

    /// `<T extends A & B, U>` on a type or method declaration.
    pub(crate) fn parse_type_params(&mut self) -> PResult<Vec<TypeParam>> {
        let mut params = Vec::new();
        if !self.cursor.eat(TokenKind::Lt) {
            return Ok(params);
        }
        loop {
            while self.cursor.check(TokenKind::At) {
                self.parse_annotation()?;
            }
            let name = self.cursor.expect_ident()?;
            let mut bounds = Vec::new();
            if self.cursor.eat(TokenKind::Extends) {
                loop {
                    bounds.push(self.parse_type()?);
                    if !self.cursor.eat(TokenKind::Amp) {
                        break;
                    }
                }
            }
            params.push(TypeParam { name, bounds });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::Gt)?;
        Ok(params)
    }

    /// Comma-separated types (`implements`, `throws`, `permits`).
    pub(crate) fn parse_type_list(&mut self) -> PResult<Vec<TypeRef>> {
        let mut types = vec![self.parse_type()?];
        while self.cursor.eat(TokenKind::Comma) {
            types.push(self.parse_type()?);
        }
        Ok(types)
    }

    /// Modifiers and annotations in any order.
    pub(crate) fn parse_decl_prefix(&mut self) -> PResult<DeclPrefix> {
        let mut prefix = DeclPrefix::default();
        loop {
            let kind = self.cursor.current_kind();
            if kind == TokenKind::At && self.cursor.peek_kind(1) != TokenKind::Interface {
                prefix.annotations.push(self.parse_annotation()?);
            } else if kind.is_modifier() && !self.is_switch_default() {
                if let Some(flag) = Modifiers::from_keyword(self.cursor.current_text()) {
                    prefix.modifiers |= flag;
                }
                self.cursor.advance();
            } else if self.cursor.check_contextual("sealed") && self.modifier_follows(1) {
                prefix.modifiers |= Modifiers::SEALED;
                self.cursor.advance();
            } else if self.at_non_sealed() {
                prefix.modifiers |= Modifiers::NON_SEALED;
                self.cursor.advance();
                self.cursor.advance();
                self.cursor.advance();
            } else {
                return Ok(prefix);
            }
        }
    }

    /// `default` opening a switch label rather than an interface method.
    fn is_switch_default(&self) -> bool {
        self.cursor.check(TokenKind::Default)
            && matches!(
                self.cursor.peek_kind(1),
                TokenKind::Colon | TokenKind::Arrow
            )
    }

    /// Whether the token at `n` continues a declaration header, so that a
    /// preceding contextual `sealed` is a modifier and not a type name.
    fn modifier_follows(&self, n: usize) -> bool {
        let kind = self.cursor.peek_kind(n);
        kind.is_modifier()
            || matches!(
                kind,
                TokenKind::Class | TokenKind::Interface | TokenKind::At
            )
            || (kind == TokenKind::Ident
                && matches!(self.cursor.peek_text(n), "record" | "sealed" | "non"))
    }

    fn at_non_sealed(&self) -> bool {
        self.cursor.check_contextual("non")
            && self.cursor.peek_kind(1) == TokenKind::Minus
            && self.cursor.peek_text(2) == "sealed"
            && self.cursor.adjacent(0)
            && self.cursor.adjacent(1)
    }

    /// `@Name`, `@Name(value)`, or `@Name(k = v, ...)`.
    pub(crate) fn parse_annotation(&mut self) -> PResult<Annotation> {
        self.cursor.expect(TokenKind::At)?;
        let mut name = self.cursor.expect_ident()?;
        while self.cursor.check(TokenKind::Dot) && self.cursor.peek_kind(1) == TokenKind::Ident {
            self.cursor.advance();
            name.push('.');
            name.push_str(&self.cursor.expect_ident()?);
        }
        if !self.cursor.eat(TokenKind::LParen) {
            return Ok(Annotation {
                name,
                args: AnnotationArgs::Marker,
            });
        }
        let args = if self.cursor.check(TokenKind::RParen) {
            AnnotationArgs::Named(Vec::new())
        } else if self.cursor.check_ident() && self.cursor.peek_kind(1) == TokenKind::Eq {
            let mut pairs = Vec::new();
            loop {
                let key = self.cursor.expect_ident()?;
                self.cursor.expect(TokenKind::Eq)?;
                pairs.push((key, self.parse_element_value()?));
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            AnnotationArgs::Named(pairs)
        } else {
            AnnotationArgs::Single(self.parse_element_value()?)
        };
        self.cursor.expect(TokenKind::RParen)?;
        Ok(Annotation { name, args })
    }

    /// Annotation element value: nested annotation, `{...}` array, or a
    /// conditional expression.
    pub(crate) fn parse_element_value(&mut self) -> PResult<vulnfix_ir::ExprId> {
        if self.cursor.check(TokenKind::At) {
            let start = self.cursor.current_span();
            let annotation = self.parse_annotation()?;
            let span = self.span_from(start);
            return Ok(self.alloc_expr(ExprKind::Annotation(Box::new(annotation)), span));
        }
        if self.cursor.check(TokenKind::LBrace) {
            let start = self.cursor.current_span();
            self.cursor.advance();
            let mut items = Vec::new();
            while !self.cursor.check(TokenKind::RBrace) {
                items.push(self.parse_element_value()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect(TokenKind::RBrace)?;
            let span = self.span_from(start);
            return Ok(self.alloc_expr(ExprKind::ArrayInit(items), span));
        }
        self.parse_conditional()
    }
}

#[cfg(test)]
mod tests;
