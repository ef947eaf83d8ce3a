//! Interactive operator console for the supervisor state machine.
//!
//! Run with: cargo run --bin supervisor-console -- --delay 500

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use supervisor_fsm::command::{CommandSource, ConsoleCommands, ScriptedCommands};
use supervisor_fsm::config::{MachineConfig, MachineConfigBuilder};
use supervisor_fsm::report::{JsonReporter, Reporter, TextReporter};
use supervisor_fsm::{Machine, MonotonicClock, RunSummary};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the supervisor console
#[derive(Parser, Debug)]
#[command(author, version, about = "Supervisory state machine operator console")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inter-step delay in milliseconds (overrides the config file)
    #[arg(short, long)]
    delay: Option<u64>,

    /// Comma-separated command codes to replay instead of reading stdin
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    script: Option<Vec<i64>>,

    /// Emit reports as JSON lines
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<MachineConfig> {
    let base = match &args.config {
        Some(path) => MachineConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => MachineConfig::default(),
    };

    let mut builder = MachineConfigBuilder::from_config(base);
    if let Some(delay) = args.delay {
        builder = builder.delay(delay);
    }
    Ok(builder.build()?)
}

/// Wires the machine to the given streams and runs it to completion.
///
/// Reports go to stdout. In JSON mode the operator prompt goes to stderr so
/// stdout carries nothing but JSON lines.
fn run_session<'a, I, O, E>(
    args: &Args,
    config: MachineConfig,
    input: I,
    stdout: impl Fn() -> O,
    stderr: impl Fn() -> E,
) -> Result<RunSummary>
where
    I: BufRead + 'a,
    O: Write + 'a,
    E: Write + 'a,
{
    let commands: Box<dyn CommandSource + 'a> = match &args.script {
        Some(codes) => Box::new(codes.iter().copied().collect::<ScriptedCommands>()),
        None if args.json => Box::new(ConsoleCommands::new(input, stderr())),
        None => Box::new(ConsoleCommands::new(input, stdout())),
    };
    let reporter: Box<dyn Reporter + 'a> = if args.json {
        Box::new(JsonReporter::new(stdout()))
    } else {
        Box::new(TextReporter::new(stdout()))
    };

    let machine = Machine::with_config(config, MonotonicClock::new(), commands, reporter)?;
    Ok(machine.run())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let stdin = io::stdin();
    let summary = run_session(&args, config, stdin.lock(), io::stdout, io::stderr)?;

    info!(
        run_id = %summary.run_id,
        transitions = summary.transitions(),
        errors = summary.error_count,
        elapsed_ms = summary.wall_time().num_milliseconds(),
        "run complete"
    );
    Ok(())
}
