//! `hashCode` to go with `equals`.

use rustc_hash::FxHashSet;
use vulnfix_ir::visitor::{block_roots, for_each_type_mut};
use vulnfix_ir::{
    Annotation, Block, ExprArena, ExprKind, Member, MemberKind, MethodDecl, Modifiers, Node,
    Scope, TypeDecl, TypeKind, TypeRef,
};

use super::{Rule, RuleContext, RuleId};
use crate::error::RuleError;
use crate::imports::spelling;

/// A class overriding `equals(Object)` without `hashCode()` gets one built
/// from the fields `equals` compares.
pub struct MissingHashCode;

impl Rule for MissingHashCode {
    fn id(&self) -> RuleId {
        RuleId::MissingHashCode
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let objects = spelling(cx.unit, "java.util.Objects");
        let unit = &mut *cx.unit;
        let arena = &mut unit.arena;
        let mut count = 0;
        for_each_type_mut(&mut unit.types, &mut |ty| {
            if ty.kind != TypeKind::Class
                || !ty.has_method("equals", 1)
                || ty.has_method("hashCode", 0)
            {
                return;
            }
            let Some(at) = ty.members.iter().position(|m| {
                matches!(&m.kind, MemberKind::Method(method)
                    if method.name == "equals" && method.params.len() == 1 && !method.is_constructor())
            }) else {
                return;
            };
            let fields = compared_fields(arena, ty, at);
            let value = if fields.is_empty() {
                let class = arena.call(None, "getClass", Vec::new());
                let name = arena.call(Some(class), "getName", Vec::new());
                arena.call(Some(name), "hashCode", Vec::new())
            } else {
                let args = fields.iter().map(|field| arena.name(field.as_str())).collect();
                arena.static_call(&objects, "hash", args)
            };
            let body = Block::new(vec![arena.return_stmt(Some(value))]);
            let method = MethodDecl {
                modifiers: Modifiers::PUBLIC,
                annotations: vec![Annotation::marker("Override")],
                type_params: Vec::new(),
                return_type: Some(TypeRef::simple("int")),
                name: "hashCode".to_string(),
                params: Vec::new(),
                throws: Vec::new(),
                body: Some(body),
                default_value: None,
            };
            ty.members.insert(at + 1, Member::new(MemberKind::Method(method)));
            count += 1;
        });
        Ok(count)
    }
}

/// Instance fields the `equals` at `members[at]` reads, in declaration order.
fn compared_fields(arena: &ExprArena, ty: &TypeDecl, at: usize) -> Vec<String> {
    let MemberKind::Method(equals) = &ty.members[at].kind else {
        return Vec::new();
    };
    let Some(body) = &equals.body else {
        return Vec::new();
    };
    let params: FxHashSet<&str> = equals.params.iter().map(|p| p.name.as_str()).collect();
    let mut used = FxHashSet::default();
    for node in arena.preorder(block_roots(body), Scope::Deep) {
        let Node::Expr(id) = node else { continue };
        match arena.kind(id) {
            ExprKind::FieldAccess { name, .. } => {
                used.insert(name.as_str());
            }
            ExprKind::Name(name) if !params.contains(name.as_str()) => {
                used.insert(name.as_str());
            }
            _ => {}
        }
    }
    ty.fields()
        .filter(|field| !field.modifiers.contains(Modifiers::STATIC))
        .flat_map(|field| &field.declarators)
        .filter(|declarator| used.contains(declarator.name.as_str()))
        .map(|declarator| declarator.name.clone())
        .collect()
}
