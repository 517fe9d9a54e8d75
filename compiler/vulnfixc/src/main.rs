//! `vulnfix` command-line interface.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_tree::HierarchicalLayer;
use vulnfix_rules::{RuleConfig, RuleId};
use vulnfixc::{remediate_with, Config, UnparsablePolicy};

/// Rewrite a tree of Java sources to close common security defects.
#[derive(Parser, Debug)]
#[command(name = "vulnfix", version)]
struct Cli {
    /// Root of the sources to remediate.
    #[arg(required_unless_present = "list_rules")]
    source: Option<PathBuf>,

    /// Where the remediated tree is written.
    #[arg(required_unless_present = "list_rules")]
    target: Option<PathBuf>,

    /// Worker threads (defaults to one per core).
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Skip a rule; may be repeated.
    #[arg(long, value_name = "RULE")]
    disable: Vec<RuleId>,

    /// Copy `.java` files that do not parse instead of leaving them out.
    #[arg(long)]
    copy_unparsable: bool,

    /// Copy files that are not `.java` to the target tree.
    #[arg(long)]
    copy_other: bool,

    /// Write a JSON summary to this file.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Print the rules in pipeline order and exit.
    #[arg(long)]
    list_rules: bool,

    /// Debug logging with a span tree.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let rules = self
            .disable
            .iter()
            .fold(RuleConfig::default(), |rules, &id| rules.disable(id));
        Config {
            jobs: self.jobs,
            unparsable: if self.copy_unparsable {
                UnparsablePolicy::Copy
            } else {
                UnparsablePolicy::Skip
            },
            copy_other: self.copy_other,
            rules,
        }
    }
}

/// `RUST_LOG` wins over the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let registry = tracing_subscriber::registry().with(filter);
    if verbose {
        registry
            .with(HierarchicalLayer::new(2).with_targets(true))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_rules {
        for id in RuleId::ALL {
            println!("{:<24} {}", id.as_str(), id.describe());
        }
        return ExitCode::SUCCESS;
    }

    let (Some(source), Some(target)) = (&cli.source, &cli.target) else {
        eprintln!("error: SOURCE and TARGET are required");
        return ExitCode::FAILURE;
    };

    let summary = match remediate_with(source, target, &cli.config()) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &cli.report {
        if let Err(err) = summary.write_report(path) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    for failure in &summary.failures {
        eprintln!("{}: {}", failure.path.display(), failure.message);
    }
    println!(
        "{} remediated, {} failed, {} copied, {} rewrites",
        summary.files_processed,
        summary.files_failed,
        summary.files_copied,
        summary.rules.total_rewrites()
    );

    if summary.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
