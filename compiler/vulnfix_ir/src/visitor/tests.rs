use pretty_assertions::assert_eq;

use super::*;
use crate::ast::{Block, Literal, LambdaParams, MethodDecl, TypeKind};
use crate::{Member, Modifiers, TypeRef};

/// `void run() { a(b("x")); list.forEach(v -> c(v)); }`
fn sample() -> (ExprArena, TypeDecl) {
    let mut arena = ExprArena::new();
    let x = arena.string_literal("x");
    let b = arena.call(None, "b", vec![x]);
    let a = arena.call(None, "a", vec![b]);
    let first = arena.expr_stmt(a);

    let v = arena.name("v");
    let c = arena.call(None, "c", vec![v]);
    let lambda = arena.alloc(ExprKind::Lambda {
        params: LambdaParams::Inferred {
            names: vec!["v".into()],
            parenthesized: false,
        },
        body: LambdaBody::Expr(c),
    });
    let list = arena.name("list");
    let for_each = arena.call(Some(list), "forEach", vec![lambda]);
    let second = arena.expr_stmt(for_each);

    let mut ty = TypeDecl::new(TypeKind::Class, "Job");
    ty.members.push(Member::new(MemberKind::Method(MethodDecl {
        modifiers: Modifiers::empty(),
        annotations: Vec::new(),
        type_params: Vec::new(),
        return_type: Some(TypeRef::void()),
        name: "run".into(),
        params: Vec::new(),
        throws: Vec::new(),
        body: Some(Block::new(vec![first, second])),
        default_value: None,
    })));
    (arena, ty)
}

fn call_names(arena: &ExprArena, ids: &[ExprId]) -> Vec<String> {
    ids.iter()
        .map(|&id| match arena.kind(id) {
            ExprKind::MethodCall { name, .. } => name.clone(),
            other => panic!("not a call: {other:?}"),
        })
        .collect()
}

#[test]
fn find_exprs_is_document_order() {
    let (arena, ty) = sample();
    let calls = arena.find_exprs(type_roots(&ty), ExprTag::MethodCall);
    assert_eq!(call_names(&arena, &calls), vec!["a", "b", "forEach", "c"]);
}

#[test]
fn body_scope_skips_lambda_bodies() {
    let (arena, ty) = sample();
    let calls: Vec<ExprId> = arena
        .preorder(type_roots(&ty), Scope::Body)
        .into_iter()
        .filter_map(|node| match node {
            Node::Expr(id) if arena.kind(id).tag() == ExprTag::MethodCall => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(call_names(&arena, &calls), vec!["a", "b", "forEach"]);
}

#[test]
fn walk_mut_descends_into_rewritten_nodes() {
    let (mut arena, ty) = sample();
    let mut seen = Vec::new();
    arena.walk_mut(type_roots(&ty), Scope::Deep, |arena, node| {
        let Node::Expr(id) = node else { return };
        if let ExprKind::Literal(Literal::String(s)) = arena.kind(id) {
            seen.push(s.clone());
            return;
        }
        // Wrap the outermost call's argument in a fresh call; the walk must
        // visit the new node's child literal.
        if matches!(arena.kind(id), ExprKind::MethodCall { name, .. } if name == "b") {
            let inner = arena.string_literal("y");
            arena.replace_expr(
                id,
                ExprKind::MethodCall {
                    target: None,
                    type_args: Vec::new(),
                    name: "wrapped".into(),
                    args: vec![inner],
                },
            );
        }
    });
    assert_eq!(seen, vec!["y".to_string()]);
}

#[test]
fn for_each_type_visits_nested_types() {
    let mut outer = TypeDecl::new(TypeKind::Class, "Outer");
    let mut inner = TypeDecl::new(TypeKind::Class, "Inner");
    inner
        .members
        .push(Member::new(MemberKind::Type(TypeDecl::new(TypeKind::Enum, "Deep"))));
    outer.members.push(Member::new(MemberKind::Type(inner)));
    let mut names = Vec::new();
    for_each_type_mut(std::slice::from_mut(&mut outer), &mut |ty| {
        names.push(ty.name.clone());
    });
    assert_eq!(names, vec!["Outer", "Inner", "Deep"]);
}
