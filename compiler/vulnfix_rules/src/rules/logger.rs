//! Logger declaration.

use vulnfix_ir::visitor::for_each_type_mut;
use vulnfix_ir::{
    FieldDecl, Member, MemberKind, Modifiers, TypeKind, TypeRef, VarDeclarator,
};

use super::{Rule, RuleContext, RuleId, LOGGER_FIELD};
use crate::error::RuleError;
use crate::imports::spelling;

/// Gives every class, enum, record, and interface a `log` field.
pub struct LoggerPresence;

impl Rule for LoggerPresence {
    fn id(&self) -> RuleId {
        RuleId::LoggerPresence
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let unit = &mut *cx.unit;
        let logger = spelling(unit, "org.slf4j.Logger");
        let factory = spelling(unit, "org.slf4j.LoggerFactory");
        let arena = &mut unit.arena;
        let mut count = 0;
        for_each_type_mut(&mut unit.types, &mut |ty| {
            if ty.kind == TypeKind::Annotation || ty.has_field(LOGGER_FIELD) {
                return;
            }
            let class = arena.class_literal(&ty.name);
            let init = arena.static_call(&factory, "getLogger", vec![class]);
            // Interface fields are implicitly public static final.
            let modifiers = if ty.kind == TypeKind::Interface {
                Modifiers::empty()
            } else {
                Modifiers::PRIVATE | Modifiers::STATIC | Modifiers::FINAL
            };
            let field = FieldDecl {
                modifiers,
                annotations: Vec::new(),
                ty: TypeRef::simple(logger.clone()),
                declarators: vec![VarDeclarator::new(LOGGER_FIELD, Some(init))],
            };
            ty.members.insert(0, Member::new(MemberKind::Field(field)));
            count += 1;
        });
        Ok(count)
    }
}
