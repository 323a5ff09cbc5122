mod session;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ws_api::{create_runner, load_script_file, CreateRunnerOptions};

use session::DryRunSession;

#[derive(Debug, Parser)]
#[command(name = "ws-cli")]
#[command(about = "JSON step-script checker and dry runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a script file and validate every action's block structure.
    Check(CheckArgs),
    /// Execute one action against a dry-run session that logs each step.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    file: PathBuf,
}

#[derive(Debug, Args)]
struct RunArgs {
    file: PathBuf,
    #[arg(long)]
    action: String,
    #[arg(long)]
    url: String,
    /// Variable table entries, key=value, repeatable.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    vars: Vec<String>,
    #[arg(long = "max-steps")]
    max_steps: Option<usize>,
}

fn parse_vars(entries: &[String]) -> Result<BTreeMap<String, String>> {
    let mut table = BTreeMap::new();
    for entry in entries {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("variable \"{entry}\" is not in key=value form"))?;
        table.insert(key.to_string(), value.to_string());
    }
    Ok(table)
}

fn check(args: CheckArgs) -> Result<()> {
    let script = load_script_file(&args.file)
        .with_context(|| format!("checking {}", args.file.display()))?;
    for (name, steps) in &script.actions {
        println!("{name}: {} steps, ok", steps.len());
    }
    Ok(())
}

fn run(args: RunArgs) -> Result<()> {
    let script = load_script_file(&args.file)
        .with_context(|| format!("loading {}", args.file.display()))?;
    let variables = parse_vars(&args.vars)?;
    let mut runner = create_runner(
        Box::new(DryRunSession::new()),
        CreateRunnerOptions {
            script,
            variables,
            max_step_count: args.max_steps,
        },
    );
    runner
        .run(&args.url, &args.action)
        .with_context(|| format!("running action \"{}\"", args.action))?;
    println!("action \"{}\" finished", args.action);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    match Cli::parse().command {
        Command::Check(args) => check(args),
        Command::Run(args) => run(args),
    }
}
