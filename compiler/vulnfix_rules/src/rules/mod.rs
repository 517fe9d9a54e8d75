//! The rewrite rules and their fixed running order.
//!
//! Each rule is a unit struct implementing [`Rule`]. Rules see the whole
//! compilation unit, rewrite nodes in place, and report how many rewrites
//! they made. Later rules see the tree as earlier rules left it, so the
//! order in [`STANDARD`] is part of the behavior.

mod console;
mod crypto;
mod equality;
mod exceptions;
mod exposure;
mod hashcode;
mod injection;
mod literals;
mod logger;
mod logging;
mod resources;
mod secrets;
mod serial;
mod validation;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use vulnfix_ir::{CompilationUnit, ExprArena, ExprId, ExprKind, StmtId};

use crate::config::RuleConfig;
use crate::constants::ConstantTable;
use crate::error::{RuleError, UnknownRule};

pub use console::{ConsoleRedirect, ResidualConsole};
pub use crypto::{WeakHash, WeakRandom};
pub use equality::ReferenceEquality;
pub use exceptions::{EmptyCatch, OverbroadThrows, SwallowedException};
pub use exposure::{MutableExposure, PublicMutableStatic};
pub use hashcode::MissingHashCode;
pub use injection::{CommandInjection, PathTraversal, SqlLiteral};
pub use literals::LiteralExtraction;
pub use logger::LoggerPresence;
pub use logging::SensitiveLogging;
pub use resources::ResourceScope;
pub use secrets::{HardcodedCredential, HardcodedToken};
pub use serial::SerialVersion;
pub use validation::RequestValidation;

/// Name of the logger field every type gets.
pub const LOGGER_FIELD: &str = "log";

/// Stable identifier of a rule, used in reports and configuration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    LoggerPresence,
    ConsoleRedirect,
    LiteralExtraction,
    ReferenceEquality,
    HardcodedCredential,
    HardcodedToken,
    SqlLiteral,
    PathTraversal,
    CommandInjection,
    WeakRandom,
    WeakHash,
    SensitiveLogging,
    ResidualConsole,
    EmptyCatch,
    SwallowedException,
    #[serde(rename = "missing-hashcode")]
    MissingHashCode,
    MutableExposure,
    PublicMutableStatic,
    SerialVersion,
    OverbroadThrows,
    RequestValidation,
    ResourceScope,
}

impl RuleId {
    /// Every rule, in running order.
    pub const ALL: [RuleId; 22] = [
        RuleId::LoggerPresence,
        RuleId::ConsoleRedirect,
        RuleId::LiteralExtraction,
        RuleId::ReferenceEquality,
        RuleId::HardcodedCredential,
        RuleId::HardcodedToken,
        RuleId::SqlLiteral,
        RuleId::PathTraversal,
        RuleId::CommandInjection,
        RuleId::WeakRandom,
        RuleId::WeakHash,
        RuleId::SensitiveLogging,
        RuleId::ResidualConsole,
        RuleId::EmptyCatch,
        RuleId::SwallowedException,
        RuleId::MissingHashCode,
        RuleId::MutableExposure,
        RuleId::PublicMutableStatic,
        RuleId::SerialVersion,
        RuleId::OverbroadThrows,
        RuleId::RequestValidation,
        RuleId::ResourceScope,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::LoggerPresence => "logger-presence",
            RuleId::ConsoleRedirect => "console-redirect",
            RuleId::LiteralExtraction => "literal-extraction",
            RuleId::ReferenceEquality => "reference-equality",
            RuleId::HardcodedCredential => "hardcoded-credential",
            RuleId::HardcodedToken => "hardcoded-token",
            RuleId::SqlLiteral => "sql-literal",
            RuleId::PathTraversal => "path-traversal",
            RuleId::CommandInjection => "command-injection",
            RuleId::WeakRandom => "weak-random",
            RuleId::WeakHash => "weak-hash",
            RuleId::SensitiveLogging => "sensitive-logging",
            RuleId::ResidualConsole => "residual-console",
            RuleId::EmptyCatch => "empty-catch",
            RuleId::SwallowedException => "swallowed-exception",
            RuleId::MissingHashCode => "missing-hashcode",
            RuleId::MutableExposure => "mutable-exposure",
            RuleId::PublicMutableStatic => "public-mutable-static",
            RuleId::SerialVersion => "serial-version",
            RuleId::OverbroadThrows => "overbroad-throws",
            RuleId::RequestValidation => "request-validation",
            RuleId::ResourceScope => "resource-scope",
        }
    }

    /// One-line summary for `--list-rules`.
    pub fn describe(self) -> &'static str {
        match self {
            RuleId::LoggerPresence => "declare an slf4j logger in every type",
            RuleId::ConsoleRedirect => "route System.out statements to the logger",
            RuleId::LiteralExtraction => "move string arguments into named constants",
            RuleId::ReferenceEquality => "compare objects with Objects.equals",
            RuleId::HardcodedCredential => "read credentials from the environment",
            RuleId::HardcodedToken => "drop long hardcoded string field values",
            RuleId::SqlLiteral => "flag SQL built by string concatenation",
            RuleId::PathTraversal => "resolve files under a fixed base directory",
            RuleId::CommandInjection => "replace Runtime.exec with a fixed ProcessBuilder",
            RuleId::WeakRandom => "use SecureRandom instead of Random",
            RuleId::WeakHash => "use SHA-256 instead of MD5",
            RuleId::SensitiveLogging => "redact log messages that mention passwords",
            RuleId::ResidualConsole => "route remaining console output to the logger",
            RuleId::EmptyCatch => "log exceptions caught by empty handlers",
            RuleId::SwallowedException => "keep the caught exception as the cause",
            RuleId::MissingHashCode => "add hashCode next to equals",
            RuleId::MutableExposure => "return copies of Date and Calendar fields",
            RuleId::PublicMutableStatic => "make public static fields private",
            RuleId::SerialVersion => "declare serialVersionUID on Serializable classes",
            RuleId::OverbroadThrows => "remove throws Exception clauses",
            RuleId::RequestValidation => "bound the size of request string parameters",
            RuleId::ResourceScope => "close JDBC resources with try-with-resources",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

/// Everything a rule may touch while it runs on one unit.
pub struct RuleContext<'a> {
    pub unit: &'a mut CompilationUnit,
    pub constants: &'a mut ConstantTable,
    pub config: &'a RuleConfig,
}

/// A rewrite over one compilation unit.
pub trait Rule: Send + Sync {
    fn id(&self) -> RuleId;

    /// Rewrite the unit in place and return the number of rewrites made.
    fn apply(&self, cx: &mut RuleContext<'_>) -> Result<usize, RuleError>;
}

/// Registration list for the standard pipeline, in running order.
pub static STANDARD: [&dyn Rule; 22] = [
    &LoggerPresence,
    &ConsoleRedirect,
    &LiteralExtraction,
    &ReferenceEquality,
    &HardcodedCredential,
    &HardcodedToken,
    &SqlLiteral,
    &PathTraversal,
    &CommandInjection,
    &WeakRandom,
    &WeakHash,
    &SensitiveLogging,
    &ResidualConsole,
    &EmptyCatch,
    &SwallowedException,
    &MissingHashCode,
    &MutableExposure,
    &PublicMutableStatic,
    &SerialVersion,
    &OverbroadThrows,
    &RequestValidation,
    &ResourceScope,
];

/// An ordered list of rules.
#[derive(Clone)]
pub struct Pipeline {
    rules: Vec<&'static dyn Rule>,
}

impl Pipeline {
    pub fn standard() -> Self {
        Pipeline {
            rules: STANDARD.to_vec(),
        }
    }

    /// The standard rules restricted to `ids`, still in standard order.
    pub fn only(ids: &[RuleId]) -> Self {
        Pipeline {
            rules: STANDARD
                .iter()
                .copied()
                .filter(|rule| ids.contains(&rule.id()))
                .collect(),
        }
    }

    pub fn rules(&self) -> &[&'static dyn Rule] {
        &self.rules
    }

    pub fn ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

// Shared node shapes.

/// `System.<stream>.print(..)` or `.println(..)` for one of `streams`.
pub(crate) fn is_console_print(arena: &ExprArena, id: ExprId, streams: &[&str]) -> bool {
    let ExprKind::MethodCall {
        target: Some(target),
        name,
        ..
    } = arena.kind(id)
    else {
        return false;
    };
    if name != "print" && name != "println" {
        return false;
    }
    match arena.kind(*target) {
        ExprKind::FieldAccess { target, name } => {
            streams.contains(&name.as_str())
                && matches!(arena.kind(*target), ExprKind::Name(system) if system == "System")
        }
        _ => false,
    }
}

/// Point a call at `log.<method>`, keeping its arguments.
pub(crate) fn retarget_to_logger(arena: &mut ExprArena, call: ExprId, method: &str) {
    let log = arena.name(LOGGER_FIELD);
    if let ExprKind::MethodCall {
        target,
        type_args,
        name,
        ..
    } = &mut arena.get_expr_mut(call).kind
    {
        *target = Some(log);
        type_args.clear();
        *name = method.to_string();
    }
}

/// `log.error(<var>.getMessage(), <var>);`
pub(crate) fn log_error_stmt(arena: &mut ExprArena, var: &str) -> StmtId {
    let receiver = arena.name(var);
    let message = arena.call(Some(receiver), "getMessage", Vec::new());
    let cause = arena.name(var);
    let log = arena.name(LOGGER_FIELD);
    let call = arena.call(Some(log), "error", vec![message, cause]);
    arena.expr_stmt(call)
}

/// The method call's name, if `id` is one.
pub(crate) fn call_name(arena: &ExprArena, id: ExprId) -> Option<&str> {
    match arena.kind(id) {
        ExprKind::MethodCall { name, .. } => Some(name),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
