use pretty_assertions::assert_eq;

use super::*;
use crate::{Modifiers, TypeRef, VarDeclarator};

fn field(name: &str, modifiers: Modifiers) -> Member {
    Member::new(MemberKind::Field(FieldDecl {
        modifiers,
        annotations: Vec::new(),
        ty: TypeRef::simple("String"),
        declarators: vec![VarDeclarator::new(name, None)],
    }))
}

fn field_names(ty: &TypeDecl) -> Vec<&str> {
    ty.fields()
        .flat_map(|f| f.declarators.iter().map(|d| d.name.as_str()))
        .collect()
}

#[test]
fn insert_field_goes_after_leading_constants() {
    let mut ty = TypeDecl::new(TypeKind::Class, "Job");
    ty.members.push(field("A", Modifiers::STATIC | Modifiers::FINAL));
    ty.members.push(field("name", Modifiers::PRIVATE));
    ty.insert_field(field("B", Modifiers::STATIC | Modifiers::FINAL));
    assert_eq!(field_names(&ty), vec!["A", "B", "name"]);
}

#[test]
fn insert_field_after_custom_run() {
    let mut ty = TypeDecl::new(TypeKind::Class, "Job");
    ty.members.push(field("A", Modifiers::STATIC | Modifiers::FINAL));
    ty.members.push(field("name", Modifiers::PRIVATE));
    let is_named_a = |m: &Member| matches!(&m.kind, MemberKind::Field(f) if f.declares("A"));
    ty.insert_field_after(field("B", Modifiers::STATIC), is_named_a);
    ty.insert_field_after(field("C", Modifiers::STATIC), |_| false);
    assert_eq!(field_names(&ty), vec!["C", "A", "B", "name"]);
}

#[test]
fn insert_field_into_empty_body() {
    let mut ty = TypeDecl::new(TypeKind::Class, "Job");
    ty.insert_field(field("log", Modifiers::PRIVATE));
    assert_eq!(field_names(&ty), vec!["log"]);
}

#[test]
fn imports_type_checks_exact_wildcard_and_package() {
    let mut unit = CompilationUnit::default();
    unit.package = Some(PackageDecl {
        annotations: Vec::new(),
        name: "com.acme".to_string(),
    });
    unit.add_import(ImportDecl::single("java.util.Objects"));
    unit.add_import(ImportDecl {
        path: "java.nio.file".to_string(),
        is_static: false,
        wildcard: true,
    });
    assert!(unit.imports_type("java.util.Objects"));
    assert!(unit.imports_type("java.nio.file.Paths"));
    assert!(unit.imports_type("com.acme.Helper"));
    assert!(!unit.imports_type("org.slf4j.Logger"));
}

#[test]
fn add_import_deduplicates() {
    let mut unit = CompilationUnit::default();
    assert!(unit.add_import(ImportDecl::single("org.slf4j.Logger")));
    assert!(!unit.add_import(ImportDecl::single("org.slf4j.Logger")));
    assert_eq!(unit.imports.len(), 1);
}

#[test]
fn declares_nested_type() {
    let mut outer = TypeDecl::new(TypeKind::Class, "Outer");
    outer
        .members
        .push(Member::new(MemberKind::Type(TypeDecl::new(TypeKind::Class, "Logger"))));
    let unit = CompilationUnit {
        types: vec![outer],
        ..CompilationUnit::default()
    };
    assert!(unit.declares_type("Logger"));
    assert!(!unit.declares_type("Objects"));
}

#[test]
fn annotation_matches_simple_name() {
    assert!(Annotation::marker("javax.validation.constraints.Size").is_named("Size"));
    assert!(!Annotation::marker("Sized").is_named("Size"));
}
