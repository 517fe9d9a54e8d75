//! Compilation unit, type declarations, and members.

use vulnfix_ir::{
    Comment, CompilationUnit, EnumConstant, FieldDecl, ImportDecl, Member, MemberKind,
    MethodDecl, PackageDecl, Param, TypeDecl, TypeKind,
};
use vulnfix_lexer::TokenKind;

use super::ty::DeclPrefix;
use crate::error::{PResult, ParseError};
use crate::Parser;

impl Parser<'_> {
    pub(crate) fn parse_unit(&mut self) -> PResult<CompilationUnit> {
        let mut unit = CompilationUnit::default();

        let at_header = matches!(
            self.cursor.current_kind(),
            TokenKind::Package | TokenKind::Import
        ) || (self.cursor.check(TokenKind::At) && self.package_follows_annotations());
        if at_header {
            unit.header_comments = self.leading_comments();
        }

        if self.cursor.check(TokenKind::At) && self.package_follows_annotations() {
            let prefix = self.parse_decl_prefix()?;
            unit.package = Some(self.parse_package(prefix.annotations)?);
        } else if self.cursor.check(TokenKind::Package) {
            unit.package = Some(self.parse_package(Vec::new())?);
        }

        while self.cursor.check(TokenKind::Import) {
            unit.imports.push(self.parse_import()?);
        }

        loop {
            while self.cursor.eat(TokenKind::Semi) {}
            if self.cursor.is_at_end() {
                break;
            }
            if self.cursor.check_contextual("module") || self.cursor.check_contextual("open") {
                return Err(ParseError::unsupported(
                    "module declaration",
                    self.cursor.current_span(),
                ));
            }
            let comments = self.leading_comments();
            let prefix = self.parse_decl_prefix()?;
            unit.types.push(self.parse_type_decl(comments, prefix)?);
        }
        unit.trailing_comments = self.leading_comments();
        unit.arena = std::mem::take(&mut self.arena);
        Ok(unit)
    }

    fn package_follows_annotations(&mut self) -> bool {
        self.look_ahead(|p| p.parse_decl_prefix().is_ok() && p.cursor.check(TokenKind::Package))
    }

    fn parse_package(&mut self, annotations: Vec<vulnfix_ir::Annotation>) -> PResult<PackageDecl> {
        self.cursor.expect(TokenKind::Package)?;
        let name = self.parse_qualified_name()?;
        self.cursor.expect(TokenKind::Semi)?;
        Ok(PackageDecl { annotations, name })
    }

    fn parse_import(&mut self) -> PResult<ImportDecl> {
        self.cursor.expect(TokenKind::Import)?;
        let is_static = self.cursor.eat(TokenKind::Static);
        let mut path = self.cursor.expect_ident()?;
        let mut wildcard = false;
        while self.cursor.eat(TokenKind::Dot) {
            if self.cursor.eat(TokenKind::Star) {
                wildcard = true;
                break;
            }
            path.push('.');
            path.push_str(&self.cursor.expect_ident()?);
        }
        self.cursor.expect(TokenKind::Semi)?;
        Ok(ImportDecl {
            path,
            is_static,
            wildcard,
        })
    }

    fn parse_qualified_name(&mut self) -> PResult<String> {
        let mut name = self.cursor.expect_ident()?;
        while self.cursor.eat(TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.cursor.expect_ident()?);
        }
        Ok(name)
    }

    /// A type declaration after its comments and modifiers.
    pub(crate) fn parse_type_decl(
        &mut self,
        comments: Vec<Comment>,
        prefix: DeclPrefix,
    ) -> PResult<TypeDecl> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Class => TypeKind::Class,
            TokenKind::Interface => TypeKind::Interface,
            TokenKind::Enum => TypeKind::Enum,
            TokenKind::At => {
                self.cursor.advance();
                TypeKind::Annotation
            }
            TokenKind::Ident if self.cursor.check_contextual("record") => TypeKind::Record,
            other => return Err(ParseError::expected("type declaration", other, start)),
        };
        self.cursor.advance();

        let mut decl = TypeDecl::new(kind, self.cursor.expect_ident()?);
        decl.modifiers = prefix.modifiers;
        decl.annotations = prefix.annotations;
        decl.comments = comments;
        decl.type_params = self.parse_type_params()?;

        if kind == TypeKind::Record {
            decl.record_components = self.parse_params()?;
        }
        if self.cursor.eat(TokenKind::Extends) {
            decl.extends = self.parse_type_list()?;
        }
        if self.cursor.eat(TokenKind::Implements) {
            decl.implements = self.parse_type_list()?;
        }
        if self.cursor.check_contextual("permits") {
            self.cursor.advance();
            decl.permits = self.parse_type_list()?;
        }

        self.cursor.expect(TokenKind::LBrace)?;
        if kind == TypeKind::Enum {
            decl.enum_constants = self.parse_enum_constants(&decl.name)?;
        }
        decl.members = self.parse_members(&decl.name)?;
        decl.trailing_comments = self.leading_comments();
        self.cursor.expect(TokenKind::RBrace)?;
        decl.span = self.span_from(start);
        Ok(decl)
    }

    /// Enum constants up to and including the optional `;`.
    fn parse_enum_constants(&mut self, owner: &str) -> PResult<Vec<EnumConstant>> {
        let mut constants = Vec::new();
        while self.cursor.check_ident() || self.cursor.check(TokenKind::At) {
            let comments = self.leading_comments();
            let prefix = self.parse_decl_prefix()?;
            let name = self.cursor.expect_ident()?;
            let args = if self.cursor.check(TokenKind::LParen) {
                Some(self.parse_args()?)
            } else {
                None
            };
            let body = if self.cursor.check(TokenKind::LBrace) {
                Some(self.parse_class_body(owner)?)
            } else {
                None
            };
            constants.push(EnumConstant {
                annotations: prefix.annotations,
                name,
                args,
                body,
                comments,
            });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.eat(TokenKind::Semi);
        Ok(constants)
    }

    /// `{ members }` of an anonymous class or enum constant body. Comments
    /// before the closing brace are left for the next declaration.
    pub(crate) fn parse_class_body(&mut self, owner: &str) -> PResult<Vec<Member>> {
        self.cursor.expect(TokenKind::LBrace)?;
        let members = self.parse_members(owner)?;
        self.cursor.expect(TokenKind::RBrace)?;
        Ok(members)
    }

    /// Members up to (not including) the closing brace.
    fn parse_members(&mut self, owner: &str) -> PResult<Vec<Member>> {
        let mut members = Vec::new();
        loop {
            while self.cursor.eat(TokenKind::Semi) {}
            if self.cursor.check(TokenKind::RBrace) || self.cursor.is_at_end() {
                return Ok(members);
            }
            let comments = self.leading_comments();
            let kind = self.parse_member_kind(owner)?;
            let trailing = self.trailing_comment();
            members.push(Member {
                kind,
                comments,
                trailing,
            });
        }
    }

    fn parse_member_kind(&mut self, owner: &str) -> PResult<MemberKind> {
        if self.cursor.check(TokenKind::LBrace) {
            let body = self.parse_block()?;
            return Ok(MemberKind::Initializer {
                is_static: false,
                body,
            });
        }
        if self.cursor.check(TokenKind::Static) && self.cursor.peek_kind(1) == TokenKind::LBrace {
            self.cursor.advance();
            let body = self.parse_block()?;
            return Ok(MemberKind::Initializer {
                is_static: true,
                body,
            });
        }

        let prefix = self.parse_decl_prefix()?;
        if self.at_type_decl_keyword() {
            return Ok(MemberKind::Type(self.parse_type_decl(Vec::new(), prefix)?));
        }

        let type_params = self.parse_type_params()?;

        // Constructor: `Owner(`
        if self.cursor.check_ident() && self.cursor.current_text() == owner {
            match self.cursor.peek_kind(1) {
                TokenKind::LParen => {
                    let name = self.cursor.expect_ident()?;
                    let mut method = self.parse_method_rest(name, None, prefix)?;
                    method.type_params = type_params;
                    return Ok(MemberKind::Method(method));
                }
                TokenKind::LBrace => {
                    return Err(ParseError::unsupported(
                        "compact record constructor",
                        self.cursor.current_span(),
                    ));
                }
                _ => {}
            }
        }

        let ty = self.parse_type()?;
        let name = self.cursor.expect_ident()?;
        if self.cursor.check(TokenKind::LParen) {
            let mut method = self.parse_method_rest(name, Some(ty), prefix)?;
            method.type_params = type_params;
            return Ok(MemberKind::Method(method));
        }
        if !type_params.is_empty() {
            return Err(ParseError::expected(
                "method after type parameters",
                self.cursor.current_kind(),
                self.cursor.current_span(),
            ));
        }

        // Field: the first declarator's name is already consumed.
        let mut declarators = Vec::new();
        let dims = self.parse_dims();
        let init = if self.cursor.eat(TokenKind::Eq) {
            Some(self.parse_var_init()?)
        } else {
            None
        };
        declarators.push(vulnfix_ir::VarDeclarator { name, dims, init });
        if self.cursor.eat(TokenKind::Comma) {
            declarators.extend(self.parse_declarators()?);
        }
        self.cursor.expect(TokenKind::Semi)?;
        Ok(MemberKind::Field(FieldDecl {
            modifiers: prefix.modifiers,
            annotations: prefix.annotations,
            ty,
            declarators,
        }))
    }

    /// Parameters, throws clause, default value, and body or `;`.
    fn parse_method_rest(
        &mut self,
        name: String,
        return_type: Option<vulnfix_ir::TypeRef>,
        prefix: DeclPrefix,
    ) -> PResult<MethodDecl> {
        let params = self.parse_params()?;
        if self.parse_dims() > 0 {
            return Err(ParseError::unsupported(
                "array dimensions after a method signature",
                self.cursor.previous_span(),
            ));
        }
        let throws = if self.cursor.eat(TokenKind::Throws) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };
        let default_value = if self.cursor.eat(TokenKind::Default) {
            Some(self.parse_element_value()?)
        } else {
            None
        };
        let body = if self.cursor.eat(TokenKind::Semi) {
            None
        } else {
            Some(self.parse_block()?)
        };
        Ok(MethodDecl {
            modifiers: prefix.modifiers,
            annotations: prefix.annotations,
            type_params: Vec::new(),
            return_type,
            name,
            params,
            throws,
            body,
            default_value,
        })
    }

    /// `(Type a, final @A Type... rest)`
    fn parse_params(&mut self) -> PResult<Vec<Param>> {
        self.cursor.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if self.cursor.eat(TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            params.push(self.parse_param()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RParen)?;
        Ok(params)
    }

    pub(crate) fn parse_param(&mut self) -> PResult<Param> {
        let prefix = self.parse_decl_prefix()?;
        let mut ty = self.parse_type()?;
        let varargs = self.cursor.eat(TokenKind::Ellipsis);
        if self.cursor.check(TokenKind::This) {
            return Err(ParseError::unsupported(
                "receiver parameter",
                self.cursor.current_span(),
            ));
        }
        let name = self.cursor.expect_ident()?;
        ty.dims = ty.dims.saturating_add(self.parse_dims());
        Ok(Param {
            modifiers: prefix.modifiers,
            annotations: prefix.annotations,
            ty,
            varargs,
            name,
        })
    }
}
