//! Declarations: the unit header, types, members, and type syntax.

use vulnfix_ir::{
    Annotation, AnnotationArgs, CompilationUnit, EnumConstant, FieldDecl, Member, MemberKind,
    MethodDecl, Modifiers, Param, TypeArg, TypeDecl, TypeKind, TypeParam, TypeRef,
    VarDeclarator, WildcardBound,
};

use super::Printer;
use crate::emitter::Emitter;

impl<E: Emitter> Printer<'_, E> {
    pub(crate) fn unit(&mut self, unit: &CompilationUnit) {
        let mut started = false;
        for comment in &unit.header_comments {
            self.own_line_comment(comment);
            started = true;
        }
        if let Some(package) = &unit.package {
            self.own_line_annotations(&package.annotations);
            self.emit("package ");
            self.emit(&package.name);
            self.emit(";");
            self.newline();
            started = true;
        }
        if !unit.imports.is_empty() {
            if unit.package.is_some() {
                self.newline();
            }
            for import in &unit.imports {
                self.emit("import ");
                if import.is_static {
                    self.emit("static ");
                }
                self.emit(&import.path);
                if import.wildcard {
                    self.emit(".*");
                }
                self.emit(";");
                self.newline();
            }
            started = true;
        }
        for ty in &unit.types {
            if started {
                self.newline();
            }
            self.type_decl(ty);
            self.newline();
            started = true;
        }
        if !unit.trailing_comments.is_empty() {
            if started {
                self.newline();
            }
            self.own_line_comments(&unit.trailing_comments);
        }
    }

    pub(super) fn type_decl(&mut self, ty: &TypeDecl) {
        self.own_line_comments(&ty.comments);
        self.own_line_annotations(&ty.annotations);
        self.modifiers(ty.modifiers);
        self.emit(ty.kind.keyword());
        self.emit(" ");
        self.emit(&ty.name);
        self.type_params(&ty.type_params);
        if ty.kind == TypeKind::Record {
            self.emit("(");
            self.comma_list(&ty.record_components, Self::param);
            self.emit(")");
        }
        self.type_clause(" extends ", &ty.extends);
        self.type_clause(" implements ", &ty.implements);
        self.type_clause(" permits ", &ty.permits);
        self.emit(" ");

        if ty.enum_constants.is_empty()
            && ty.members.is_empty()
            && ty.trailing_comments.is_empty()
        {
            self.emit("{}");
            return;
        }
        self.emit("{");
        self.indent += 1;
        if ty.kind == TypeKind::Enum {
            self.enum_constants(&ty.enum_constants, !ty.members.is_empty());
            if !ty.enum_constants.is_empty() && !ty.members.is_empty() {
                self.out.emit_newline();
            }
        }
        self.members(&ty.members);
        self.closing_comments(&ty.trailing_comments);
        self.indent -= 1;
        self.newline();
        self.emit("}");
    }

    fn type_clause(&mut self, keyword: &str, types: &[TypeRef]) {
        if types.is_empty() {
            return;
        }
        self.emit(keyword);
        self.comma_list(types, Self::type_ref);
    }

    fn enum_constants(&mut self, constants: &[EnumConstant], has_members: bool) {
        for (index, constant) in constants.iter().enumerate() {
            self.newline();
            self.own_line_comments(&constant.comments);
            self.inline_annotations(&constant.annotations);
            self.emit(&constant.name);
            if let Some(args) = &constant.args {
                self.args(args);
            }
            if let Some(body) = &constant.body {
                self.emit(" ");
                self.class_body(body);
            }
            if index + 1 < constants.len() {
                self.emit(",");
            } else if has_members {
                self.emit(";");
            }
        }
        if constants.is_empty() && has_members {
            self.newline();
            self.emit(";");
        }
    }

    /// `{ members }` of an anonymous class or enum constant.
    pub(super) fn class_body(&mut self, members: &[Member]) {
        if members.is_empty() {
            self.emit("{}");
            return;
        }
        self.emit("{");
        self.indent += 1;
        self.members(members);
        self.indent -= 1;
        self.newline();
        self.emit("}");
    }

    /// Members, one blank line apart; consecutive fields stay together.
    fn members(&mut self, members: &[Member]) {
        let mut previous_field = None;
        for member in members {
            match previous_field {
                Some(true) if member.is_field() => self.newline(),
                Some(_) => self.blank_line(),
                None => self.newline(),
            }
            self.member(member);
            previous_field = Some(member.is_field());
        }
    }

    fn member(&mut self, member: &Member) {
        self.own_line_comments(&member.comments);
        match &member.kind {
            MemberKind::Field(field) => self.field(field),
            MemberKind::Method(method) => self.method(method),
            MemberKind::Initializer { is_static, body } => {
                if *is_static {
                    self.emit("static ");
                }
                self.block(body);
            }
            MemberKind::Type(ty) => self.type_decl(ty),
        }
        self.trailing_comment(member.trailing.as_ref());
    }

    fn field(&mut self, field: &FieldDecl) {
        self.own_line_annotations(&field.annotations);
        self.modifiers(field.modifiers);
        self.type_ref(&field.ty);
        self.emit(" ");
        self.declarators(&field.declarators);
        self.emit(";");
    }

    pub(super) fn declarators(&mut self, declarators: &[VarDeclarator]) {
        self.comma_list(declarators, |p, declarator| {
            p.emit(&declarator.name);
            p.dims(declarator.dims);
            if let Some(init) = declarator.init {
                p.emit(" = ");
                p.expr(init);
            }
        });
    }

    fn method(&mut self, method: &MethodDecl) {
        self.own_line_annotations(&method.annotations);
        self.modifiers(method.modifiers);
        if !method.type_params.is_empty() {
            self.type_params(&method.type_params);
            self.emit(" ");
        }
        if let Some(return_type) = &method.return_type {
            self.type_ref(return_type);
            self.emit(" ");
        }
        self.emit(&method.name);
        self.emit("(");
        self.comma_list(&method.params, Self::param);
        self.emit(")");
        if !method.throws.is_empty() {
            self.emit(" throws ");
            self.comma_list(&method.throws, Self::type_ref);
        }
        if let Some(value) = method.default_value {
            self.emit(" default ");
            self.expr(value);
        }
        match &method.body {
            Some(body) => {
                self.emit(" ");
                self.block(body);
            }
            None => self.emit(";"),
        }
    }

    pub(super) fn param(&mut self, param: &Param) {
        self.inline_annotations(&param.annotations);
        self.modifiers(param.modifiers);
        self.type_ref(&param.ty);
        if param.varargs {
            self.emit("...");
        }
        self.emit(" ");
        self.emit(&param.name);
    }

    /// Modifier keywords in canonical order, each followed by a space.
    pub(super) fn modifiers(&mut self, modifiers: Modifiers) {
        for keyword in modifiers.keywords() {
            self.emit(keyword);
            self.emit(" ");
        }
    }

    fn own_line_annotations(&mut self, annotations: &[Annotation]) {
        for annotation in annotations {
            self.annotation(annotation);
            self.newline();
        }
    }

    pub(super) fn inline_annotations(&mut self, annotations: &[Annotation]) {
        for annotation in annotations {
            self.annotation(annotation);
            self.emit(" ");
        }
    }

    pub(super) fn annotation(&mut self, annotation: &Annotation) {
        self.emit("@");
        self.emit(&annotation.name);
        match &annotation.args {
            AnnotationArgs::Marker => {}
            AnnotationArgs::Single(value) => {
                self.emit("(");
                self.expr(*value);
                self.emit(")");
            }
            AnnotationArgs::Named(pairs) => {
                self.emit("(");
                self.comma_list(pairs, |p, (name, value)| {
                    p.emit(name);
                    p.emit(" = ");
                    p.expr(*value);
                });
                self.emit(")");
            }
        }
    }

    fn type_params(&mut self, params: &[TypeParam]) {
        if params.is_empty() {
            return;
        }
        self.emit("<");
        self.comma_list(params, |p, param| {
            p.emit(&param.name);
            for (index, bound) in param.bounds.iter().enumerate() {
                p.emit(if index == 0 { " extends " } else { " & " });
                p.type_ref(bound);
            }
        });
        self.emit(">");
    }

    pub(super) fn type_ref(&mut self, ty: &TypeRef) {
        self.type_ref_no_dims(ty);
        self.dims(ty.dims);
    }

    pub(super) fn type_ref_no_dims(&mut self, ty: &TypeRef) {
        self.emit(&ty.name);
        if let Some(args) = &ty.args {
            self.emit("<");
            self.comma_list(args, |p, arg| match arg {
                TypeArg::Type(ty) => p.type_ref(ty),
                TypeArg::Wildcard(None) => p.emit("?"),
                TypeArg::Wildcard(Some((bound, ty))) => {
                    p.emit(match bound {
                        WildcardBound::Extends => "? extends ",
                        WildcardBound::Super => "? super ",
                    });
                    p.type_ref(ty);
                }
            });
            self.emit(">");
        }
    }

    pub(super) fn dims(&mut self, dims: u8) {
        for _ in 0..dims {
            self.emit("[]");
        }
    }
}
