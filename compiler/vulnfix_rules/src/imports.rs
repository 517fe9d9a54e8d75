//! Import reconciliation.
//!
//! Rewrites refer to a handful of library types by simple name. After
//! rendering, each registered name that shows up in code gets its import,
//! unless the unit already sees it or something else owns that name.

use vulnfix_ir::{CompilationUnit, ImportDecl};

/// Simple names rewrites may introduce, and where they come from.
pub const REGISTRY: [(&str, &str); 6] = [
    ("Logger", "org.slf4j.Logger"),
    ("LoggerFactory", "org.slf4j.LoggerFactory"),
    ("Objects", "java.util.Objects"),
    ("SecureRandom", "java.security.SecureRandom"),
    ("Paths", "java.nio.file.Paths"),
    ("Size", "jakarta.validation.constraints.Size"),
];

/// Whether `simple` is bound in `unit` to something other than `qualified`.
pub fn binds_elsewhere(unit: &CompilationUnit, simple: &str, qualified: &str) -> bool {
    if unit
        .import_binding(simple)
        .is_some_and(|import| import.path != qualified)
    {
        return true;
    }
    unit.declares_type(simple)
}

/// How a rewrite should spell `qualified`: its simple name, unless that
/// name already means something else in the unit.
pub fn spelling(unit: &CompilationUnit, qualified: &str) -> String {
    let simple = qualified.rsplit('.').next().unwrap_or(qualified);
    if binds_elsewhere(unit, simple, qualified) {
        qualified.to_string()
    } else {
        simple.to_string()
    }
}

/// Add the imports `rendered` needs. Returns the qualified names added,
/// in registry order.
pub fn reconcile(unit: &mut CompilationUnit, rendered: &str) -> Vec<String> {
    let mut added = Vec::new();
    for (simple, qualified) in REGISTRY {
        if unit.imports_type(qualified) {
            continue;
        }
        if !mentions(rendered, simple) {
            continue;
        }
        if binds_elsewhere(unit, simple, qualified) {
            tracing::warn!(name = simple, import = qualified, "name already bound, import skipped");
            continue;
        }
        if unit.add_import(ImportDecl::single(qualified)) {
            added.push(qualified.to_string());
        }
    }
    added
}

/// `word` as a standalone identifier not preceded by `.`, outside the
/// package and import lines.
fn mentions(text: &str, word: &str) -> bool {
    text.lines()
        .filter(|line| {
            let line = line.trim_start();
            !line.starts_with("package ") && !line.starts_with("import ")
        })
        .any(|line| line_mentions(line, word))
}

fn line_mentions(line: &str, word: &str) -> bool {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    line.match_indices(word).any(|(at, _)| {
        let before = line[..at].chars().next_back();
        let after = line[at + word.len()..].chars().next();
        !before.is_some_and(|c| is_ident(c) || c == '.') && !after.is_some_and(is_ident)
    })
}
