//! docguard command-line entry.
//!
//! - `check`: load + compile a policy config
//! - `eval`:  evaluate one operation and print ALLOW/DENY
//! - `test`:  run conformance scenario files, exit 1 on any failure

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use docguard_core::error::Result;
use docguard_core::model::fields_from_json;
use docguard_core::{Document, Identity, Operation, Request};
use docguard_engine::harness::{runner, ScenarioFile};
use docguard_engine::{config, PolicyEngine};

#[derive(Parser)]
#[command(
    name = "docguard",
    version,
    about = "Per-document access-control and validation policy engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and compile a policy config.
    Check {
        #[arg(long, default_value = "docguard.yaml")]
        config: PathBuf,
    },
    /// Evaluate a single operation.
    Eval {
        #[arg(long, default_value = "docguard.yaml")]
        config: PathBuf,
        #[arg(long)]
        collection: String,
        #[arg(long)]
        op: Operation,
        /// Requester identity; omit for unauthenticated.
        #[arg(long = "as")]
        identity: Option<String>,
        /// Stored document fields as JSON.
        #[arg(long)]
        existing: Option<String>,
        /// Candidate payload as JSON.
        #[arg(long)]
        data: Option<String>,
        #[arg(long, default_value = "doc")]
        doc_id: String,
        /// Print the internal reason code.
        #[arg(long)]
        explain: bool,
    },
    /// Run conformance scenario files.
    Test {
        #[arg(long, default_value = "docguard.yaml")]
        config: PathBuf,
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,
        /// Print decision metrics after the run.
        #[arg(long)]
        metrics: bool,
    },
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), "{e}");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn load_engine(path: &Path) -> Result<PolicyEngine> {
    let cfg = config::load_from_file(path)?;
    PolicyEngine::new(&cfg)
}

fn parse_fields(raw: Option<&str>) -> Result<Option<docguard_core::Fields>> {
    raw.map(|s| {
        serde_json::from_str::<serde_json::Value>(s)
            .map_err(|e| docguard_core::DocGuardError::InvalidValue(format!("invalid json: {e}")))
            .and_then(fields_from_json)
    })
    .transpose()
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Check { config } => {
            let engine = load_engine(&config)?;
            for name in engine.collection_names() {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Eval { config, collection, op, identity, existing, data, doc_id, explain } => {
            let engine = load_engine(&config)?;
            let identity = Identity::from(identity);
            let existing = parse_fields(existing.as_deref())?.map(|f| Document::new(doc_id, f));
            let payload = parse_fields(data.as_deref())?;

            let req = Request {
                operation: op,
                identity: &identity,
                existing: existing.as_ref(),
                payload: payload.as_ref(),
            };
            let decision = engine.evaluate(&collection, &req);

            match (explain, decision.reason()) {
                (true, Some(reason)) => {
                    println!("{} {} ({reason})", decision.outcome().as_str(), reason.code())
                }
                _ => println!("{}", decision.outcome().as_str()),
            }
            Ok(if decision.is_allow() { ExitCode::SUCCESS } else { ExitCode::from(1) })
        }

        Command::Test { config, scenarios, metrics } => {
            let engine = load_engine(&config)?;
            let files = scenarios
                .iter()
                .map(|p| ScenarioFile::load_from_file(p))
                .collect::<Result<Vec<_>>>()?;

            let report = runner::run_files(&engine, &files);
            for case in &report.cases {
                match &case.failure {
                    None => println!("PASS - {}", case.name),
                    Some(why) => println!("FAIL - {}\n  {why}", case.name),
                }
            }
            if metrics {
                print!("{}", engine.metrics().render());
            }

            let failures = report.failures();
            println!("{} passed, {failures} failed", report.cases.len() - failures);
            Ok(if failures > 0 { ExitCode::from(1) } else { ExitCode::SUCCESS })
        }
    }
}
