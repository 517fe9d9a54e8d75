//! Rule configuration.

use rustc_hash::FxHashSet;

use crate::rules::RuleId;

/// Values the rewrites insert, and which rules are switched off.
#[derive(Clone, Debug)]
pub struct RuleConfig {
    /// Base directory that file paths are resolved against.
    pub safe_base_path: String,
    /// Command run by the process builder that replaces `exec` calls.
    pub command: Vec<String>,
    /// Literal spelling of the synthesized `serialVersionUID`.
    pub serial_version: String,
    /// Message logged instead of sensitive data.
    pub redaction_message: String,
    /// `max` of the synthesized `@Size` constraint.
    pub size_max: u32,
    pub disabled: FxHashSet<RuleId>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            safe_base_path: "/app/data".to_string(),
            command: vec!["echo".to_string()],
            serial_version: "1L".to_string(),
            redaction_message: "Sensitive data redacted".to_string(),
            size_max: 255,
            disabled: FxHashSet::default(),
        }
    }
}

impl RuleConfig {
    #[must_use]
    pub fn disable(mut self, rule: RuleId) -> Self {
        self.disabled.insert(rule);
        self
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        !self.disabled.contains(&rule)
    }
}
