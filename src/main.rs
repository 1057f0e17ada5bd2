mod cli;
mod script;
mod settings;
mod workflow;

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use searchveil::logging;
use settings::ResolvedConfig;
use workflow::ReplayWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(&cli.log_level);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let source = match cli.script.clone() {
		Some(script) => script,
		None if io::stdin().is_terminal() && cli.print_config => return Ok(()),
		None => io::read_to_string(io::stdin()).context("failed to read commands from stdin")?,
	};

	run_replay(cli.output, resolved, &source)
}

/// Replay the command script and print output in the chosen format.
fn run_replay(format: OutputFormat, settings: ResolvedConfig, source: &str) -> Result<()> {
	let commands = script::parse(source).context("invalid command script")?;
	let snapshots = ReplayWorkflow::from_config(settings).run(&commands);

	match format {
		OutputFormat::Plain => print_plain(&snapshots),
		OutputFormat::Json => print_json(&snapshots)?,
	}

	Ok(())
}
