//! String literals passed to method calls.

use rustc_hash::FxHashSet;
use vulnfix_ir::visitor::type_roots;
use vulnfix_ir::{ExprArena, ExprId, ExprKind, ExprTag, Node, TypeDecl};

use super::{Rule, RuleContext, RuleId};
use crate::error::RuleError;

/// `call("text")` becomes `call(CONST_TEXT)` with a constant on the
/// enclosing top-level type. Only direct arguments are replaced; literals
/// nested in other expressions or in constructor arguments stay put.
pub struct LiteralExtraction;

impl Rule for LiteralExtraction {
    fn id(&self) -> RuleId {
        RuleId::LiteralExtraction
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let unit = &mut *cx.unit;
        let mut count = 0;
        for owner in 0..unit.types.len() {
            let ty = &unit.types[owner];
            let roots = type_roots(ty);
            let qualified = enum_argument_calls(&unit.arena, ty);
            let type_name = ty.name.clone();
            let arena = &mut unit.arena;
            for call in arena.find_exprs(roots, ExprTag::MethodCall) {
                let ExprKind::MethodCall { args, .. } = arena.kind(call) else {
                    continue;
                };
                for arg in args.clone() {
                    let Some(value) = arena.kind(arg).as_string_literal() else {
                        continue;
                    };
                    let name = cx.constants.intern(owner, value);
                    let reference = if qualified.contains(&call) {
                        let target = arena.name(type_name.clone());
                        ExprKind::FieldAccess { target, name }
                    } else {
                        ExprKind::Name(name)
                    };
                    arena.replace_expr(arg, reference);
                    count += 1;
                }
            }
        }
        Ok(count)
    }
}

/// Calls in the arguments of `ty`'s own enum constants. Those run before
/// any field of `ty` is initialized, so a simple name there would be a
/// forward reference; the constant is reached through the type instead.
fn enum_argument_calls(arena: &ExprArena, ty: &TypeDecl) -> FxHashSet<ExprId> {
    let roots: Vec<Node> = ty
        .enum_constants
        .iter()
        .filter_map(|constant| constant.args.as_ref())
        .flatten()
        .map(|&arg| Node::Expr(arg))
        .collect();
    arena
        .find_exprs(roots, ExprTag::MethodCall)
        .into_iter()
        .collect()
}
