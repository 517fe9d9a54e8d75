//! Vulnfix rules - security rewrites over a Java syntax tree.
//!
//! An [`Engine`] runs the [`Pipeline`] of [`Rule`]s over a parsed unit,
//! declares the constants the rules asked for, renders the result, and
//! adds the imports the new code needs.
//!
//! # Modules
//!
//! - [`rules`]: the rules, their ids, and the standard order
//! - [`constants`]: the per-unit constant table
//! - [`imports`]: import reconciliation after rendering
//! - [`naming`]: constant and environment variable names
//! - [`engine`]: driving one unit through all of the above

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod imports;
pub mod naming;
pub mod rules;

pub use config::RuleConfig;
pub use constants::ConstantTable;
pub use engine::{Engine, Remediated, RuleFailure, RuleReport};
pub use error::{RuleError, UnknownRule};
pub use naming::{constant_name, env_var_name};
pub use rules::{Pipeline, Rule, RuleContext, RuleId};
