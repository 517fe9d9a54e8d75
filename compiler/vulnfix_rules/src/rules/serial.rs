//! `serialVersionUID` on serializable classes.

use vulnfix_ir::visitor::for_each_type_mut;
use vulnfix_ir::{
    FieldDecl, Member, MemberKind, Modifiers, TypeKind, TypeRef, VarDeclarator,
};

use super::{Rule, RuleContext, RuleId};
use crate::error::RuleError;

const SERIAL_FIELD: &str = "serialVersionUID";

/// A class that directly implements `Serializable` declares its
/// `serialVersionUID`.
pub struct SerialVersion;

impl Rule for SerialVersion {
    fn id(&self) -> RuleId {
        RuleId::SerialVersion
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let version = &cx.config.serial_version;
        let unit = &mut *cx.unit;
        let arena = &mut unit.arena;
        let mut count = 0;
        for_each_type_mut(&mut unit.types, &mut |ty| {
            if ty.kind != TypeKind::Class
                || !ty.inherits("java.io", "Serializable")
                || ty.has_field(SERIAL_FIELD)
            {
                return;
            }
            let init = arena.int_literal(version.clone());
            ty.insert_field(Member::new(MemberKind::Field(FieldDecl {
                modifiers: Modifiers::PRIVATE | Modifiers::STATIC | Modifiers::FINAL,
                annotations: Vec::new(),
                ty: TypeRef::simple("long"),
                declarators: vec![VarDeclarator::new(SERIAL_FIELD, Some(init))],
            })));
            count += 1;
        });
        Ok(count)
    }
}
