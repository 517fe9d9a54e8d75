//! Exception handling.

use vulnfix_ir::visitor::{block_roots, for_each_type_mut, unit_roots};
use vulnfix_ir::{ExprKind, ExprTag, MemberKind, Node, Scope, StmtKind, StmtTag};

use super::{log_error_stmt, Rule, RuleContext, RuleId};
use crate::error::RuleError;

/// `catch (E e) {}` logs the exception.
pub struct EmptyCatch;

impl Rule for EmptyCatch {
    fn id(&self) -> RuleId {
        RuleId::EmptyCatch
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let roots = unit_roots(cx.unit);
        let arena = &mut cx.unit.arena;
        let mut count = 0;
        for stmt in arena.find_stmts(roots, StmtTag::Try, Scope::Deep) {
            let StmtKind::Try { catches, .. } = &arena.get_stmt(stmt).kind else {
                continue;
            };
            let empty: Vec<(usize, String)> = catches
                .iter()
                .enumerate()
                .filter(|(_, catch)| catch.body.is_empty())
                .map(|(index, catch)| (index, catch.name.clone()))
                .collect();
            for (index, name) in empty {
                let logged = log_error_stmt(arena, &name);
                if let StmtKind::Try { catches, .. } = &mut arena.get_stmt_mut(stmt).kind {
                    catches[index].body.stmts.push(logged);
                }
                count += 1;
            }
        }
        Ok(count)
    }
}

/// A bare `new RuntimeException()` inside a handler gets the caught
/// exception as its cause.
pub struct SwallowedException;

impl Rule for SwallowedException {
    fn id(&self) -> RuleId {
        RuleId::SwallowedException
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let roots = unit_roots(cx.unit);
        let arena = &mut cx.unit.arena;
        let mut count = 0;
        // Innermost handlers first, so a nested catch claims its own throws.
        let tries = arena.find_stmts(roots, StmtTag::Try, Scope::Deep);
        for &stmt in tries.iter().rev() {
            let StmtKind::Try { catches, .. } = &arena.get_stmt(stmt).kind else {
                continue;
            };
            let handlers: Vec<(String, Vec<Node>)> = catches
                .iter()
                .map(|catch| (catch.name.clone(), block_roots(&catch.body)))
                .collect();
            for (name, roots) in handlers {
                for id in arena.find_exprs(roots, ExprTag::New) {
                    let bare = matches!(
                        arena.kind(id),
                        ExprKind::New { ty, args, body: None }
                            if args.is_empty() && ty.is_named("java.lang", "RuntimeException")
                    );
                    if !bare {
                        continue;
                    }
                    let cause = arena.name(name.clone());
                    if let ExprKind::New { args, .. } = &mut arena.get_expr_mut(id).kind {
                        args.push(cause);
                    }
                    count += 1;
                }
            }
        }
        Ok(count)
    }
}

/// `throws Exception` is dropped from method signatures.
pub struct OverbroadThrows;

impl Rule for OverbroadThrows {
    fn id(&self) -> RuleId {
        RuleId::OverbroadThrows
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let mut count = 0;
        for_each_type_mut(&mut cx.unit.types, &mut |ty| {
            for member in &mut ty.members {
                let MemberKind::Method(method) = &mut member.kind else {
                    continue;
                };
                let before = method.throws.len();
                method
                    .throws
                    .retain(|ty| !ty.is_named("java.lang", "Exception"));
                count += before - method.throws.len();
            }
        });
        Ok(count)
    }
}
