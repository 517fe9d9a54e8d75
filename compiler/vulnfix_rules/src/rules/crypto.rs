//! Weak randomness and hashing.

use vulnfix_fmt::render_expr;
use vulnfix_ir::visitor::unit_roots;
use vulnfix_ir::{ExprKind, ExprTag, Literal, TypeRef};

use super::{call_name, Rule, RuleContext, RuleId};
use crate::error::RuleError;
use crate::imports::spelling;

/// `new Random(..)` becomes `new SecureRandom()`.
pub struct WeakRandom;

impl Rule for WeakRandom {
    fn id(&self) -> RuleId {
        RuleId::WeakRandom
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let roots = unit_roots(cx.unit);
        let secure = spelling(cx.unit, "java.security.SecureRandom");
        let arena = &mut cx.unit.arena;
        let mut count = 0;
        for id in arena.find_exprs(roots, ExprTag::New) {
            let is_random = matches!(
                arena.kind(id),
                ExprKind::New { ty, body: None, .. } if ty.is_named("java.util", "Random")
            );
            if is_random {
                arena.replace_expr(
                    id,
                    ExprKind::New {
                        ty: TypeRef::simple(secure.clone()),
                        args: Vec::new(),
                        body: None,
                    },
                );
                count += 1;
            }
        }
        Ok(count)
    }
}

/// The `MD5` argument of a `getInstance(..)` call becomes `"SHA-256"`.
pub struct WeakHash;

impl Rule for WeakHash {
    fn id(&self) -> RuleId {
        RuleId::WeakHash
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let roots = unit_roots(cx.unit);
        let arena = &mut cx.unit.arena;
        let mut count = 0;
        for id in arena.find_exprs(roots, ExprTag::MethodCall) {
            if call_name(arena, id) != Some("getInstance") {
                continue;
            }
            let ExprKind::MethodCall { args, .. } = arena.kind(id) else {
                continue;
            };
            let weak: Vec<_> = args
                .iter()
                .copied()
                .filter(|&arg| render_expr(arena, arg).to_ascii_uppercase().contains("MD5"))
                .collect();
            for arg in weak {
                arena.replace_expr(arg, ExprKind::Literal(Literal::String("SHA-256".into())));
                count += 1;
            }
        }
        Ok(count)
    }
}
