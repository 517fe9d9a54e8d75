//! Driver configuration.

use vulnfix_rules::RuleConfig;

/// What to do with a `.java` file that does not parse.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum UnparsablePolicy {
    /// Leave it out of the target tree.
    #[default]
    Skip,
    /// Copy it to the target tree unchanged.
    Copy,
}

/// Settings for one [`remediate_with`](crate::remediate_with) run.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Worker threads; `None` uses rayon's global pool.
    pub jobs: Option<usize>,
    pub unparsable: UnparsablePolicy,
    /// Copy files that are not `.java` through to the target tree.
    pub copy_other: bool,
    pub rules: RuleConfig,
}
