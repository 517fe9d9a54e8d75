//! Synthesized string constants.
//!
//! Literals pulled out of method calls are collected per top-level type and
//! written back as `public static final String` fields once all rules have
//! run. They go at the very top of the body, ahead of any initializer that
//! reads them. Constants from an earlier pass are seeded first so a second
//! pass reuses them instead of minting duplicates.

use rustc_hash::{FxHashMap, FxHashSet};
use vulnfix_ir::{
    CompilationUnit, ExprKind, FieldDecl, Member, MemberKind, Modifiers, TypeRef, VarDeclarator,
};

use crate::error::RuleError;
use crate::naming::{constant_name, first_free, is_synthesized_constant};

/// One synthesized constant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Constant {
    pub name: String,
    /// Escaped literal content.
    pub value: String,
    /// Index of the owning top-level type in `CompilationUnit::types`.
    pub owner: usize,
}

/// Name/value table for one compilation unit.
#[derive(Clone, Debug, Default)]
pub struct ConstantTable {
    entries: Vec<Constant>,
    by_value: FxHashMap<(usize, String), String>,
    taken: FxHashSet<(usize, String)>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the fields already declared by each top-level type.
    ///
    /// Every field name becomes unavailable. Only synthesized `CONST_*`
    /// fields are reused for their literal: a field the author declared may
    /// still be rewritten by a later rule.
    pub fn seed(&mut self, unit: &CompilationUnit) {
        for (owner, ty) in unit.types.iter().enumerate() {
            for field in ty.fields() {
                let reusable = field.ty.is_string()
                    && field.modifiers.contains(Modifiers::STATIC | Modifiers::FINAL);
                for declarator in &field.declarators {
                    self.taken.insert((owner, declarator.name.clone()));
                    if !reusable
                        || declarator.dims != 0
                        || !is_synthesized_constant(&declarator.name)
                    {
                        continue;
                    }
                    let literal = declarator
                        .init
                        .and_then(|init| unit.arena.kind(init).as_string_literal());
                    if let Some(value) = literal {
                        self.by_value
                            .entry((owner, value.to_string()))
                            .or_insert_with(|| declarator.name.clone());
                    }
                }
            }
        }
    }

    /// Name of the constant holding `value` in `owner`, minting one if needed.
    pub fn intern(&mut self, owner: usize, value: &str) -> String {
        let key = (owner, value.to_string());
        if let Some(name) = self.by_value.get(&key) {
            return name.clone();
        }
        let base = constant_name(value);
        let name = first_free(&base, |candidate| {
            self.taken.contains(&(owner, candidate.to_string()))
        });
        if name != base {
            tracing::warn!(
                constant = %base,
                chosen = %name,
                "constant name already holds a different value"
            );
        }
        self.taken.insert((owner, name.clone()));
        self.by_value.insert(key, name.clone());
        self.entries.push(Constant {
            name: name.clone(),
            value: value.to_string(),
            owner,
        });
        name
    }

    /// Name of an existing constant for `value`, without minting one.
    pub fn lookup(&self, owner: usize, value: &str) -> Option<&str> {
        self.by_value
            .get(&(owner, value.to_string()))
            .map(String::as_str)
    }

    /// Constants minted so far, in the order they were first requested.
    pub fn entries(&self) -> &[Constant] {
        &self.entries
    }

    /// Declare every minted constant its owner does not already have.
    /// Returns the number of fields inserted.
    pub fn flush(&self, unit: &mut CompilationUnit) -> Result<usize, RuleError> {
        let mut added = 0;
        for constant in &self.entries {
            let Some(ty) = unit.types.get_mut(constant.owner) else {
                return Err(RuleError::MissingOwner {
                    what: format!("constant {}", constant.name),
                });
            };
            if ty.has_field(&constant.name) {
                continue;
            }
            let init = unit.arena.string_literal(constant.value.clone());
            let field = Member::new(MemberKind::Field(FieldDecl {
                modifiers: Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL,
                annotations: Vec::new(),
                ty: TypeRef::simple("String"),
                declarators: vec![VarDeclarator::new(constant.name.clone(), Some(init))],
            }));
            ty.insert_field_after(field, is_constant_field);
            added += 1;
        }
        Ok(added)
    }
}

/// A field declaring only synthesized constants.
fn is_constant_field(member: &Member) -> bool {
    match &member.kind {
        MemberKind::Field(field) => field
            .declarators
            .iter()
            .all(|d| is_synthesized_constant(&d.name)),
        _ => false,
    }
}

/// Whether `kind` is a name bound to the constant holding `value`.
pub(crate) fn names_constant(
    constants: &ConstantTable,
    kind: &ExprKind,
    owner: usize,
    value: &str,
) -> bool {
    match kind {
        ExprKind::Name(name) => constants.lookup(owner, value) == Some(name.as_str()),
        _ => false,
    }
}
