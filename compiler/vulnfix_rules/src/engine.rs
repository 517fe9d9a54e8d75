//! Running the pipeline over one compilation unit.

use std::collections::BTreeMap;

use serde::Serialize;
use vulnfix_fmt::render;
use vulnfix_ir::CompilationUnit;
use vulnfix_parse::{parse, ParseError};

use crate::config::RuleConfig;
use crate::constants::ConstantTable;
use crate::imports::reconcile;
use crate::rules::{Pipeline, RuleContext, RuleId};

/// A rule or stage that failed on a unit. The unit is still rendered with
/// whatever the other rules did.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RuleFailure {
    /// Rule id, or `constants` for the constant flush.
    pub stage: String,
    pub message: String,
}

/// What the pipeline did to a unit (or, merged, to a batch of units).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RuleReport {
    /// Rewrites per rule; rules that changed nothing are absent.
    pub rewrites: BTreeMap<RuleId, usize>,
    pub constants_added: usize,
    /// Qualified names of the imports added.
    pub imports_added: Vec<String>,
    pub failures: Vec<RuleFailure>,
}

impl RuleReport {
    fn record(&mut self, rule: RuleId, count: usize) {
        if count > 0 {
            *self.rewrites.entry(rule).or_default() += count;
        }
    }

    pub fn count(&self, rule: RuleId) -> usize {
        self.rewrites.get(&rule).copied().unwrap_or(0)
    }

    pub fn total_rewrites(&self) -> usize {
        self.rewrites.values().sum()
    }

    /// Add `other`'s counts to this report. Import names and failures are
    /// not carried over; batch callers keep those per unit.
    pub fn merge_counts(&mut self, other: &RuleReport) {
        for (&rule, &count) in &other.rewrites {
            self.record(rule, count);
        }
        self.constants_added += other.constants_added;
    }
}

/// Rewritten source and the report for it.
#[derive(Clone, Debug)]
pub struct Remediated {
    pub text: String,
    pub report: RuleReport,
}

/// Applies a rule pipeline with a fixed configuration.
#[derive(Debug)]
pub struct Engine {
    config: RuleConfig,
    pipeline: Pipeline,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(RuleConfig::default())
    }
}

impl Engine {
    /// The standard pipeline with `config`.
    pub fn new(config: RuleConfig) -> Self {
        Engine::with_pipeline(config, Pipeline::standard())
    }

    pub fn with_pipeline(config: RuleConfig, pipeline: Pipeline) -> Self {
        Engine { config, pipeline }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Parse, rewrite, and render one source file.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn remediate_source(&self, source: &str) -> Result<Remediated, ParseError> {
        let mut unit = parse(source)?;
        Ok(self.remediate_unit(&mut unit))
    }

    /// Rewrite an already parsed unit in place and render it.
    ///
    /// Rule failures are logged and recorded; the remaining rules still run
    /// on the partially rewritten tree.
    #[tracing::instrument(level = "debug", skip_all, fields(types = unit.types.len()))]
    pub fn remediate_unit(&self, unit: &mut CompilationUnit) -> Remediated {
        let mut report = RuleReport::default();
        let mut constants = ConstantTable::new();
        constants.seed(unit);

        let mut cx = RuleContext {
            unit: &mut *unit,
            constants: &mut constants,
            config: &self.config,
        };
        for rule in self.pipeline.rules() {
            let id = rule.id();
            if !self.config.is_enabled(id) {
                continue;
            }
            match rule.apply(&mut cx) {
                Ok(count) => {
                    tracing::debug!(rule = %id, rewrites = count, "rule applied");
                    report.record(id, count);
                }
                Err(err) => {
                    tracing::warn!(rule = %id, error = %err, "rule failed");
                    report.failures.push(RuleFailure {
                        stage: id.to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        match constants.flush(unit) {
            Ok(added) => report.constants_added = added,
            Err(err) => {
                tracing::warn!(error = %err, "constant flush failed");
                report.failures.push(RuleFailure {
                    stage: "constants".to_string(),
                    message: err.to_string(),
                });
            }
        }

        let mut text = render(unit);
        report.imports_added = reconcile(unit, &text);
        if !report.imports_added.is_empty() {
            text = render(unit);
        }
        Remediated { text, report }
    }
}
