//! Console output.

use vulnfix_ir::visitor::{type_roots, unit_roots};
use vulnfix_ir::{ExprKind, ExprTag, Scope, StmtKind, StmtTag};

use super::{is_console_print, retarget_to_logger, Rule, RuleContext, RuleId};
use crate::error::RuleError;

/// `System.out.println("..")` statements become `log.info(CONST_..)`.
pub struct ConsoleRedirect;

impl Rule for ConsoleRedirect {
    fn id(&self) -> RuleId {
        RuleId::ConsoleRedirect
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let unit = &mut *cx.unit;
        let mut count = 0;
        for owner in 0..unit.types.len() {
            let roots = type_roots(&unit.types[owner]);
            let arena = &mut unit.arena;
            for stmt in arena.find_stmts(roots, StmtTag::Expr, Scope::Deep) {
                let StmtKind::Expr(call) = arena.get_stmt(stmt).kind else {
                    continue;
                };
                if !is_console_print(arena, call, &["out"]) {
                    continue;
                }
                let ExprKind::MethodCall { args, .. } = arena.kind(call) else {
                    continue;
                };
                let Some(&first) = args.first() else {
                    continue;
                };
                if let Some(value) = arena.kind(first).as_string_literal() {
                    let name = cx.constants.intern(owner, value);
                    arena.replace_expr(first, ExprKind::Name(name));
                }
                retarget_to_logger(arena, call, "info");
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Any other `System.out`/`System.err` print becomes `log.info(..)`.
pub struct ResidualConsole;

impl Rule for ResidualConsole {
    fn id(&self) -> RuleId {
        RuleId::ResidualConsole
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let roots = unit_roots(cx.unit);
        let arena = &mut cx.unit.arena;
        let mut count = 0;
        for call in arena.find_exprs(roots, ExprTag::MethodCall) {
            if !is_console_print(arena, call, &["out", "err"]) {
                continue;
            }
            let empty = matches!(arena.kind(call), ExprKind::MethodCall { args, .. } if args.is_empty());
            if empty {
                let blank = arena.string_literal("");
                if let ExprKind::MethodCall { args, .. } = &mut arena.get_expr_mut(call).kind {
                    args.push(blank);
                }
            }
            retarget_to_logger(arena, call, "info");
            count += 1;
        }
        Ok(count)
    }
}
