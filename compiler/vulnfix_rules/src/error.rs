//! Rule errors.

use thiserror::Error;
use vulnfix_ir::Span;

/// A rule found a node it cannot rewrite.
///
/// Rule failures never abort a unit: the engine logs them and carries on
/// with the remaining rules on the partially rewritten tree.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RuleError {
    #[error("unexpected node shape at {span}: expected {expected}")]
    UnexpectedShape { expected: &'static str, span: Span },
    #[error("no enclosing type for {what}")]
    MissingOwner { what: String },
}

impl RuleError {
    pub fn shape(expected: &'static str, span: Span) -> Self {
        RuleError::UnexpectedShape { expected, span }
    }
}

/// A rule name that matches no registered rule.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown rule `{0}`")]
pub struct UnknownRule(pub String);
