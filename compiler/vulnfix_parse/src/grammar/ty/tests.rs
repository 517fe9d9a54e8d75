#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vulnfix_ir::{AnnotationArgs, MemberKind, TypeArg, WildcardBound};

use crate::parse;

fn field_type(source: &str) -> vulnfix_ir::TypeRef {
    let unit = match parse(&format!("class A {{ {source} f; }}")) {
        Ok(unit) => unit,
        Err(err) => panic!("parse failed: {err}"),
    };
    match &unit.types[0].members[0].kind {
        MemberKind::Field(field) => field.ty.clone(),
        other => panic!("expected field, got {other:?}"),
    }
}

#[test]
fn qualified_generic_array_type() {
    let ty = field_type("java.util.Map<String, List<Integer>>[]");
    assert_eq!(ty.name, "java.util.Map");
    assert_eq!(ty.dims, 1);
    assert_eq!(ty.args.as_ref().map(Vec::len), Some(2));
}

#[test]
fn wildcards() {
    let ty = field_type("List<? extends Number>");
    let Some(args) = ty.args else {
        panic!("expected type arguments")
    };
    assert!(matches!(
        &args[0],
        TypeArg::Wildcard(Some((WildcardBound::Extends, _)))
    ));
}

#[test]
fn annotation_argument_forms() {
    let unit = match parse(
        "@A @B(\"x\") @C(name = \"n\", values = {1, 2}) @D(@E) class T {}",
    ) {
        Ok(unit) => unit,
        Err(err) => panic!("parse failed: {err}"),
    };
    let args: Vec<_> = unit.types[0]
        .annotations
        .iter()
        .map(|a| match &a.args {
            AnnotationArgs::Marker => "marker",
            AnnotationArgs::Single(_) => "single",
            AnnotationArgs::Named(_) => "named",
        })
        .collect();
    assert_eq!(args, vec!["marker", "single", "named", "single"]);
}

#[test]
fn non_sealed_modifier() {
    let unit = match parse("non-sealed class T extends S {}") {
        Ok(unit) => unit,
        Err(err) => panic!("parse failed: {err}"),
    };
    assert!(unit.types[0]
        .modifiers
        .contains(vulnfix_ir::Modifiers::NON_SEALED));
}
