//! Injection sinks: SQL strings, file paths, and shell commands.

use vulnfix_ir::visitor::unit_roots;
use vulnfix_ir::{BinaryOp, Comment, ExprArena, ExprId, ExprKind, ExprTag, Node, Scope, TypeRef};

use super::{Rule, RuleContext, RuleId};
use crate::error::RuleError;
use crate::imports::spelling;

const SQL_NOTE: &str =
    "SECURITY: use a parameterized query (PreparedStatement) instead of string concatenation";

/// `"SELECT .. " + id + ..` collapses to its leading literal, marked with a
/// comment pointing at prepared statements.
pub struct SqlLiteral;

impl Rule for SqlLiteral {
    fn id(&self) -> RuleId {
        RuleId::SqlLiteral
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let roots = unit_roots(cx.unit);
        let mut count = 0;
        cx.unit.arena.walk_mut(roots, Scope::Deep, |arena, node| {
            let Node::Expr(id) = node else { return };
            let ExprKind::Binary { left, .. } = *arena.kind(id) else {
                return;
            };
            let literal = leftmost(arena, left);
            let is_query = arena
                .kind(literal)
                .as_string_literal()
                .is_some_and(|text| text.to_ascii_lowercase().contains("select"));
            if is_query {
                arena.replace_expr(
                    id,
                    ExprKind::Commented {
                        comments: vec![Comment::block(SQL_NOTE)],
                        expr: literal,
                    },
                );
                count += 1;
            }
        });
        Ok(count)
    }
}

/// First operand of a `+` chain.
fn leftmost(arena: &ExprArena, mut id: ExprId) -> ExprId {
    while let ExprKind::Binary {
        op: BinaryOp::Add,
        left,
        ..
    } = arena.kind(id)
    {
        id = *left;
    }
    id
}

/// `new File(x)` becomes `Paths.get(base).resolve(x).normalize().toFile()`.
pub struct PathTraversal;

impl Rule for PathTraversal {
    fn id(&self) -> RuleId {
        RuleId::PathTraversal
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let roots = unit_roots(cx.unit);
        let paths = spelling(cx.unit, "java.nio.file.Paths");
        let base_dir = &cx.config.safe_base_path;
        let arena = &mut cx.unit.arena;
        let mut count = 0;
        for id in arena.find_exprs(roots, ExprTag::New) {
            let ExprKind::New {
                ty,
                args,
                body: None,
            } = arena.kind(id)
            else {
                continue;
            };
            let [path] = args[..] else { continue };
            if !ty.is_named("java.io", "File") {
                continue;
            }
            let base = arena.string_value(base_dir);
            let root = arena.static_call(&paths, "get", vec![base]);
            let resolved = arena.call(Some(root), "resolve", vec![path]);
            let normalized = arena.call(Some(resolved), "normalize", Vec::new());
            arena.replace_expr(
                id,
                ExprKind::MethodCall {
                    target: Some(normalized),
                    type_args: Vec::new(),
                    name: "toFile".to_string(),
                    args: Vec::new(),
                },
            );
            count += 1;
        }
        Ok(count)
    }
}

/// Any `exec(..)` call is replaced by a process builder running a fixed
/// command. The original arguments are dropped.
pub struct CommandInjection;

impl Rule for CommandInjection {
    fn id(&self) -> RuleId {
        RuleId::CommandInjection
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let roots = unit_roots(cx.unit);
        let command = &cx.config.command;
        let arena = &mut cx.unit.arena;
        let mut count = 0;
        for id in arena.find_exprs(roots, ExprTag::MethodCall) {
            if super::call_name(arena, id) != Some("exec") {
                continue;
            }
            let words = command.iter().map(|word| arena.string_value(word)).collect();
            let builder = arena.new_object(TypeRef::simple("ProcessBuilder"), words);
            arena.replace_expr(
                id,
                ExprKind::MethodCall {
                    target: Some(builder),
                    type_args: Vec::new(),
                    name: "start".to_string(),
                    args: Vec::new(),
                },
            );
            count += 1;
        }
        Ok(count)
    }
}
