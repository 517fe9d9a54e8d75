//! Hardcoded secrets.

use vulnfix_ir::visitor::{for_each_type_mut, unit_roots};
use vulnfix_ir::{ExprId, ExprKind, MemberKind, Modifiers, Scope, StmtKind, StmtTag, TypeDecl};

use super::{Rule, RuleContext, RuleId};
use crate::error::RuleError;
use crate::naming::{env_var_name, is_synthesized_constant};

/// Length above which a string field value is treated as a token.
const TOKEN_MIN_LEN: usize = 20;

const CREDENTIAL_WORDS: [&str; 3] = ["password", "secret", "key"];

/// `String dbPassword = "hunter2"` reads `System.getenv("DB_PASSWORD")`
/// instead.
pub struct HardcodedCredential;

impl Rule for HardcodedCredential {
    fn id(&self) -> RuleId {
        RuleId::HardcodedCredential
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let unit = &mut *cx.unit;
        let mut targets = Vec::new();
        field_inits(&unit.types, &mut targets);

        let roots = unit_roots(unit);
        let arena = &mut unit.arena;
        for stmt in arena.find_stmts(roots, StmtTag::LocalVar, Scope::Deep) {
            if let StmtKind::LocalVar(local) = &arena.get_stmt(stmt).kind {
                targets.extend(
                    local
                        .declarators
                        .iter()
                        .filter_map(|d| d.init.map(|init| (d.name.clone(), init))),
                );
            }
        }

        let mut count = 0;
        for (name, init) in targets {
            if !is_credential_name(&name) || arena.kind(init).as_string_literal().is_none() {
                continue;
            }
            let variable = arena.string_value(&env_var_name(&name));
            let system = arena.name("System");
            arena.replace_expr(
                init,
                ExprKind::MethodCall {
                    target: Some(system),
                    type_args: Vec::new(),
                    name: "getenv".to_string(),
                    args: vec![variable],
                },
            );
            count += 1;
        }
        Ok(count)
    }
}

/// Initialized field declarators of `types` and their member types.
fn field_inits(types: &[TypeDecl], out: &mut Vec<(String, ExprId)>) {
    for ty in types {
        for member in &ty.members {
            match &member.kind {
                MemberKind::Field(field) => out.extend(
                    field
                        .declarators
                        .iter()
                        .filter_map(|d| d.init.map(|init| (d.name.clone(), init))),
                ),
                MemberKind::Type(inner) => field_inits(std::slice::from_ref(inner), out),
                MemberKind::Method(_) | MemberKind::Initializer { .. } => {}
            }
        }
    }
}

fn is_credential_name(name: &str) -> bool {
    if is_synthesized_constant(name) {
        return false;
    }
    let lower = name.to_ascii_lowercase();
    CREDENTIAL_WORDS.iter().any(|word| lower.contains(word))
}

/// Long literal values of `String` fields are dropped, leaving the field
/// to be set from outside.
pub struct HardcodedToken;

impl Rule for HardcodedToken {
    fn id(&self) -> RuleId {
        RuleId::HardcodedToken
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let unit = &mut *cx.unit;
        let arena = &unit.arena;
        let mut count = 0;
        for_each_type_mut(&mut unit.types, &mut |ty| {
            if ty.kind.is_interface_like() {
                return;
            }
            for member in &mut ty.members {
                let MemberKind::Field(field) = &mut member.kind else {
                    continue;
                };
                if !field.ty.is_string() {
                    continue;
                }
                let mut dropped = false;
                for declarator in &mut field.declarators {
                    if declarator.dims != 0 || is_synthesized_constant(&declarator.name) {
                        continue;
                    }
                    let long = declarator
                        .init
                        .and_then(|init| arena.kind(init).as_string_literal())
                        .is_some_and(|value| value.chars().count() > TOKEN_MIN_LEN);
                    if long {
                        declarator.init = None;
                        dropped = true;
                        count += 1;
                    }
                }
                if dropped {
                    field.modifiers.remove(Modifiers::FINAL);
                }
            }
        });
        Ok(count)
    }
}
