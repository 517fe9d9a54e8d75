//! Declarations: compilation units, types, and their members.

use super::stmt::{Block, VarDeclarator};
use super::types::{TypeParam, TypeRef};
use crate::{Comment, ExprArena, ExprId, Modifiers, Span};

/// One parsed source file.
#[derive(Clone, Debug, Default)]
pub struct CompilationUnit {
    pub package: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
    pub arena: ExprArena,
    /// Comments before the package declaration (license headers and such).
    pub header_comments: Vec<Comment>,
    /// Comments after the last type declaration.
    pub trailing_comments: Vec<Comment>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PackageDecl {
    pub annotations: Vec<Annotation>,
    pub name: String,
}

/// `import [static] path[.*];`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImportDecl {
    /// Dotted path without the trailing `.*`.
    pub path: String,
    pub is_static: bool,
    pub wildcard: bool,
}

impl ImportDecl {
    /// A single-type import.
    pub fn single(path: impl Into<String>) -> Self {
        ImportDecl {
            path: path.into(),
            is_static: false,
            wildcard: false,
        }
    }

    /// Simple name bound by a single-type import (`None` for wildcards).
    pub fn bound_name(&self) -> Option<&str> {
        if self.wildcard {
            return None;
        }
        self.path.rsplit('.').next()
    }
}

impl CompilationUnit {
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_ref().map(|p| p.name.as_str())
    }

    /// Whether `qualified` is visible through an import or the unit's package.
    pub fn imports_type(&self, qualified: &str) -> bool {
        let (package, _) = split_qualified(qualified);
        if self.package_name() == Some(package) {
            return true;
        }
        self.imports.iter().any(|import| {
            !import.is_static
                && ((!import.wildcard && import.path == qualified)
                    || (import.wildcard && import.path == package))
        })
    }

    /// A non-static single-type import that binds `simple`.
    pub fn import_binding(&self, simple: &str) -> Option<&ImportDecl> {
        self.imports
            .iter()
            .find(|import| !import.is_static && import.bound_name() == Some(simple))
    }

    /// Appends an import unless an identical one exists. Returns whether it was added.
    pub fn add_import(&mut self, import: ImportDecl) -> bool {
        if self.imports.contains(&import) {
            return false;
        }
        self.imports.push(import);
        true
    }

    /// Whether any type declared in this unit (at any nesting depth) is named `simple`.
    pub fn declares_type(&self, simple: &str) -> bool {
        fn any(types: &[TypeDecl], simple: &str) -> bool {
            types
                .iter()
                .any(|ty| ty.name == simple || any_nested(ty, simple))
        }
        fn any_nested(ty: &TypeDecl, simple: &str) -> bool {
            ty.members.iter().any(|m| match &m.kind {
                MemberKind::Type(inner) => inner.name == simple || any_nested(inner, simple),
                _ => false,
            })
        }
        any(&self.types, simple)
    }
}

/// Splits `a.b.C` into (`a.b`, `C`).
fn split_qualified(qualified: &str) -> (&str, &str) {
    match qualified.rfind('.') {
        Some(dot) => (&qualified[..dot], &qualified[dot + 1..]),
        None => ("", qualified),
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Record => "record",
            TypeKind::Annotation => "@interface",
        }
    }

    /// Interfaces and annotation types, whose fields are implicitly constants.
    pub fn is_interface_like(self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Annotation)
    }
}

/// A class, interface, enum, record, or annotation type declaration.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParam>,
    pub extends: Vec<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub permits: Vec<TypeRef>,
    pub record_components: Vec<Param>,
    pub enum_constants: Vec<EnumConstant>,
    pub members: Vec<Member>,
    pub comments: Vec<Comment>,
    /// Comments before the closing brace.
    pub trailing_comments: Vec<Comment>,
    pub span: Span,
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        TypeDecl {
            kind,
            name: name.into(),
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
            type_params: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            permits: Vec::new(),
            record_components: Vec::new(),
            enum_constants: Vec::new(),
            members: Vec::new(),
            comments: Vec::new(),
            trailing_comments: Vec::new(),
            span: Span::DUMMY,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match &m.kind {
            MemberKind::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match &m.kind {
            MemberKind::Method(method) if !method.is_constructor() => Some(method),
            _ => None,
        })
    }

    /// The field declaration declaring `name`, if any.
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields().find(|field| field.declares(name))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Whether a method named `name` with `arity` parameters is declared.
    pub fn has_method(&self, name: &str, arity: usize) -> bool {
        self.methods()
            .any(|m| m.name == name && m.params.len() == arity)
    }

    /// Whether the type lists `simple` (unqualified or `package.simple`)
    /// among its direct supertypes.
    pub fn inherits(&self, package: &str, simple: &str) -> bool {
        self.extends
            .iter()
            .chain(&self.implements)
            .any(|ty| ty.is_named(package, simple))
    }

    /// Inserts a synthesized field after the leading run of `static final`
    /// fields, keeping constants grouped at the top of the body.
    pub fn insert_field(&mut self, member: Member) {
        self.insert_field_after(member, Member::is_static_final_field);
    }

    /// Inserts a field after the leading run of members accepted by
    /// `leading`; at the top of the body when the first member is not.
    pub fn insert_field_after(&mut self, member: Member, leading: impl Fn(&Member) -> bool) {
        let at = self
            .members
            .iter()
            .position(|m| !leading(m))
            .unwrap_or(self.members.len());
        self.members.insert(at, member);
    }
}

/// `NAME(args) { body }` inside an enum.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EnumConstant {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub args: Option<Vec<ExprId>>,
    pub body: Option<Vec<Member>>,
    pub comments: Vec<Comment>,
}

/// A member of a type body with its attached comments.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Member {
    pub kind: MemberKind,
    pub comments: Vec<Comment>,
    pub trailing: Option<Comment>,
}

impl Member {
    pub fn new(kind: MemberKind) -> Self {
        Member {
            kind,
            comments: Vec::new(),
            trailing: None,
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field(_))
    }

    fn is_static_final_field(&self) -> bool {
        match &self.kind {
            MemberKind::Field(field) => field
                .modifiers
                .contains(Modifiers::STATIC | Modifiers::FINAL),
            _ => false,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum MemberKind {
    Field(FieldDecl),
    /// Methods and constructors (`return_type` is `None` for constructors).
    Method(MethodDecl),
    Initializer { is_static: bool, body: Block },
    Type(TypeDecl),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FieldDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    pub declarators: Vec<VarDeclarator>,
}

impl FieldDecl {
    pub fn declares(&self, name: &str) -> bool {
        self.declarators.iter().any(|d| d.name == name)
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MethodDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParam>,
    /// `None` for constructors.
    pub return_type: Option<TypeRef>,
    pub name: String,
    pub params: Vec<Param>,
    pub throws: Vec<TypeRef>,
    /// `None` for abstract and interface methods.
    pub body: Option<Block>,
    /// `default` value of an annotation type element.
    pub default_value: Option<ExprId>,
}

impl MethodDecl {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn has_annotation(&self, simple: &str) -> bool {
        self.annotations.iter().any(|a| a.is_named(simple))
    }
}

/// A formal parameter (also used for record components).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Param {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    pub varargs: bool,
    pub name: String,
}

impl Param {
    pub fn has_annotation(&self, simple: &str) -> bool {
        self.annotations.iter().any(|a| a.is_named(simple))
    }
}

/// `@Name`, `@Name(value)`, or `@Name(k = v, ...)`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Annotation {
    pub name: String,
    pub args: AnnotationArgs,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum AnnotationArgs {
    Marker,
    Single(ExprId),
    Named(Vec<(String, ExprId)>),
}

impl Annotation {
    pub fn marker(name: impl Into<String>) -> Self {
        Annotation {
            name: name.into(),
            args: AnnotationArgs::Marker,
        }
    }

    /// Matches on the simple name, so `@javax.validation.constraints.Size`
    /// and `@Size` are both `Size`.
    pub fn is_named(&self, simple: &str) -> bool {
        self.name.rsplit('.').next() == Some(simple)
    }
}

#[cfg(test)]
mod tests;
