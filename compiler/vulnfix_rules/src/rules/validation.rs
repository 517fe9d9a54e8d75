//! Request parameter validation.

use vulnfix_ir::visitor::for_each_type_mut;
use vulnfix_ir::{Annotation, AnnotationArgs, MemberKind};

use super::{Rule, RuleContext, RuleId};
use crate::error::RuleError;
use crate::imports::spelling;

/// Annotations that bind a parameter to client input.
const REQUEST_BINDINGS: [&str; 2] = ["RequestParam", "PathVariable"];

/// `@RequestParam String name` gains `@Size(max = 255)`.
pub struct RequestValidation;

impl Rule for RequestValidation {
    fn id(&self) -> RuleId {
        RuleId::RequestValidation
    }

    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError> {
        let size = spelling(cx.unit, "jakarta.validation.constraints.Size");
        let max = cx.config.size_max.to_string();
        let unit = &mut *cx.unit;
        let arena = &mut unit.arena;
        let mut count = 0;
        for_each_type_mut(&mut unit.types, &mut |ty| {
            for member in &mut ty.members {
                let MemberKind::Method(method) = &mut member.kind else {
                    continue;
                };
                for param in &mut method.params {
                    let bound = REQUEST_BINDINGS.iter().any(|name| param.has_annotation(name));
                    if !bound || !param.ty.is_string() || param.has_annotation("Size") {
                        continue;
                    }
                    let value = arena.int_literal(max.clone());
                    param.annotations.push(Annotation {
                        name: size.clone(),
                        args: AnnotationArgs::Named(vec![("max".to_string(), value)]),
                    });
                    count += 1;
                }
            }
        });
        Ok(count)
    }
}
