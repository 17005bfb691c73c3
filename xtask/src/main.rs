use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for tinytown")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and the headless smoke run
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Run the layout benchmark
    Bench,
    /// Drive the town headless through the CLI
    Smoke {
        /// Frames to simulate
        #[arg(short, long, default_value = "2000")]
        ticks: u64,
    },
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
}

const FMT_ARGS: &[&str] = &["fmt", "--all", "--", "--check"];
const CLIPPY_ARGS: &[&str] = &["clippy", "--workspace", "--tests", "--", "-D", "warnings"];
const TEST_ARGS: &[&str] = &["test", "--workspace"];

/// Run one cargo invocation, failing with `step` in the message.
fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> {step}: cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{step} failed");
    }
    Ok(())
}

/// Run the headless CLI with `extra` arguments.
fn run_cli(step: &str, extra: &[&str]) -> Result<()> {
    let mut args = vec!["run", "-q", "-p", "tinytown-cli", "--"];
    args.extend_from_slice(extra);
    cargo(step, &args)
}

fn smoke(ticks: u64) -> Result<()> {
    let ticks = ticks.to_string();
    run_cli("smoke frame", &["frame"])?;
    run_cli("smoke simulate", &["simulate", "--ticks", &ticks])
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo("fmt", FMT_ARGS)?;
            cargo("clippy", CLIPPY_ARGS)?;
            cargo("test", TEST_ARGS)?;
            smoke(600)?;
        }
        Commands::Fmt => cargo("fmt", FMT_ARGS)?,
        Commands::Clippy => cargo("clippy", CLIPPY_ARGS)?,
        Commands::Test => cargo("test", TEST_ARGS)?,
        Commands::Bench => cargo("bench", &["bench", "-p", "tinytown-layout"])?,
        Commands::Smoke { ticks } => smoke(ticks)?,
        Commands::Doc => cargo("doc", &["doc", "--workspace", "--no-deps"])?,
        Commands::Build => cargo("build", &["build", "--workspace"])?,
    }

    Ok(())
}
