//! Mutable state escaping a class.

use vulnfix_ir::visitor::{block_roots, for_each_type_mut};
use vulnfix_ir::{
    BinaryOp, ExprArena, ExprId, ExprKind, MemberKind, Modifiers, Scope, StmtKind, StmtTag,
    TypeRef,
};

use super::{Rule, RuleContext, RuleId};
use crate::error::RuleError;

/// Mutable `java.util` value types handed out by reference.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Mutable {
    Date,
    Calendar,
}

impl Mutable {
    fn of(ty: &TypeRef) -> Option<Self> {
        if ty.is_named("java.util", "Date") {
            Some(Mutable::Date)
        } else if ty.is_named("java.util", "Calendar") {
            Some(Mutable::Calendar)
        } else {
            None
        }
    }
}

/// `return created;` from a `Date` getter returns a null-safe copy.
pub struct MutableExposure;

impl Rule for MutableExposure {
    fn id(&self) -> RuleId {
        RuleId::MutableExposure
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let unit = &mut *cx.unit;
        let arena = &mut unit.arena;
        let mut count = 0;
        for_each_type_mut(&mut unit.types, &mut |ty| {
            for member in &ty.members {
                let MemberKind::Method(method) = &member.kind else {
                    continue;
                };
                let (Some(return_type), Some(body)) = (&method.return_type, &method.body) else {
                    continue;
                };
                let Some(mutable) = Mutable::of(return_type) else {
                    continue;
                };
                let returns = arena.find_stmts(block_roots(body), StmtTag::Return, Scope::Body);
                for stmt in returns {
                    let StmtKind::Return(Some(value)) = arena.get_stmt(stmt).kind else {
                        continue;
                    };
                    if !is_plain_reference(arena, value) {
                        continue;
                    }
                    if defensive_copy(arena, value, return_type, mutable).is_some() {
                        count += 1;
                    }
                }
            }
        });
        Ok(count)
    }
}

/// A local, parameter, or `this.field`.
fn is_plain_reference(arena: &ExprArena, id: ExprId) -> bool {
    match arena.kind(id) {
        ExprKind::Name(_) => true,
        ExprKind::FieldAccess { target, .. } => matches!(arena.kind(*target), ExprKind::This),
        _ => false,
    }
}

/// Rewrite `value` in place to `value == null ? null : <copy of value>`.
fn defensive_copy(
    arena: &mut ExprArena,
    value: ExprId,
    ty: &TypeRef,
    mutable: Mutable,
) -> Option<()> {
    let copied = arena.try_clone_expr(value)?;
    let original = arena.relocate_expr(value);
    let null = arena.null_literal();
    let cond = arena.binary(BinaryOp::Eq, original, null);
    let copy = match mutable {
        Mutable::Date => {
            let time = arena.call(Some(copied), "getTime", Vec::new());
            arena.new_object(TypeRef::simple(ty.name.clone()), vec![time])
        }
        Mutable::Calendar => {
            let cloned = arena.call(Some(copied), "clone", Vec::new());
            arena.alloc(ExprKind::Cast {
                ty: TypeRef::simple(ty.name.clone()),
                expr: cloned,
            })
        }
    };
    let then_expr = arena.null_literal();
    arena.replace_expr(
        value,
        ExprKind::Conditional {
            cond,
            then_expr,
            else_expr: copy,
        },
    );
    Some(())
}

/// `public static` fields become `private static`, and also `final` when
/// every variable has an initializer.
pub struct PublicMutableStatic;

impl Rule for PublicMutableStatic {
    fn id(&self) -> RuleId {
        RuleId::PublicMutableStatic
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let mut count = 0;
        for_each_type_mut(&mut cx.unit.types, &mut |ty| {
            if ty.kind.is_interface_like() {
                return;
            }
            for member in &mut ty.members {
                let MemberKind::Field(field) = &mut member.kind else {
                    continue;
                };
                if !field.modifiers.is_public_mutable_static() {
                    continue;
                }
                field.modifiers.remove(Modifiers::PUBLIC);
                field.modifiers.insert(Modifiers::PRIVATE);
                if field.declarators.iter().all(|d| d.init.is_some()) {
                    field.modifiers.insert(Modifiers::FINAL);
                }
                count += 1;
            }
        });
        Ok(count)
    }
}
