//! Sensitive values in log messages.

use vulnfix_fmt::render_expr;
use vulnfix_ir::builder::escape_string;
use vulnfix_ir::visitor::type_roots;
use vulnfix_ir::{ExprKind, ExprTag, Literal};

use super::{call_name, Rule, RuleContext, RuleId};
use crate::constants::names_constant;
use crate::error::RuleError;

/// An `info(..)` call that mentions a password logs a fixed redaction
/// message instead of its first argument.
pub struct SensitiveLogging;

impl Rule for SensitiveLogging {
    fn id(&self) -> RuleId {
        RuleId::SensitiveLogging
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let redacted = escape_string(&cx.config.redaction_message);
        let unit = &mut *cx.unit;
        let mut count = 0;
        for owner in 0..unit.types.len() {
            let roots = type_roots(&unit.types[owner]);
            let arena = &mut unit.arena;
            for id in arena.find_exprs(roots, ExprTag::MethodCall) {
                if call_name(arena, id) != Some("info") {
                    continue;
                }
                let ExprKind::MethodCall { args, .. } = arena.kind(id) else {
                    continue;
                };
                let Some(&first) = args.first() else {
                    continue;
                };
                let first_kind = arena.kind(first);
                if first_kind.as_string_literal() == Some(redacted.as_str())
                    || names_constant(cx.constants, first_kind, owner, &redacted)
                {
                    continue;
                }
                if !render_expr(arena, id).to_ascii_lowercase().contains("password") {
                    continue;
                }
                arena.replace_expr(first, ExprKind::Literal(Literal::String(redacted.clone())));
                count += 1;
            }
        }
        Ok(count)
    }
}
