use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, ValueEnum,
	builder::{
		BoolishValueParser, Styles,
		styling::{AnsiColor, Effects},
	},
};
use searchveil::app_dirs;

/// Produce the full version banner including the config directory.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("searchveil {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");

	Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

#[derive(Parser, Debug)]
#[command(
	name = "searchveil",
	version,
	long_version = long_version(),
	about = "Replay search bar sessions against a headless host screen",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `searchveil` binary.
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "SEARCHVEIL_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 's',
		long,
		value_name = "COMMANDS",
		help = "Commands to replay, separated by ';' or newlines (default: read stdin)"
	)]
	pub(crate) script: Option<String>,
	#[arg(
		short = 'q',
		long = "initial-text",
		value_name = "TEXT",
		help = "Text in the bar before the first command (default: empty)"
	)]
	pub(crate) initial_text: Option<String>,
	#[arg(
		long,
		value_name = "TEXT",
		help = "Placeholder shown while the bar is empty (default: Search...)"
	)]
	pub(crate) placeholder: Option<String>,
	#[arg(
		long = "cancel-label",
		value_name = "TEXT",
		help = "Label of the cancel affordance (default: Cancel)"
	)]
	pub(crate) cancel_label: Option<String>,
	#[arg(
		long = "clear-on-end",
		value_parser = BoolishValueParser::new(),
		help = "Blank the text when a session ends (default: enabled)"
	)]
	pub(crate) clear_on_end_editing: Option<bool>,
	#[arg(
		long = "return-on-cancel",
		value_parser = BoolishValueParser::new(),
		help = "Restore the pre-edit text when a session ends (default: disabled)"
	)]
	pub(crate) return_text_on_cancel: Option<bool>,
	#[arg(
		long = "always-show-cancel",
		value_parser = BoolishValueParser::new(),
		help = "Keep the cancel affordance visible while inactive (default: disabled)"
	)]
	pub(crate) always_show_cancel_button: Option<bool>,
	#[arg(
		long = "hide-chrome",
		value_parser = BoolishValueParser::new(),
		help = "Hide host chrome while the overlay is presented (default: enabled)"
	)]
	pub(crate) hides_chrome_during_presentation: Option<bool>,
	#[arg(
		long = "embedded-in-chrome",
		value_parser = BoolishValueParser::new(),
		help = "Treat the bar as part of the host chrome for layout (default: disabled)"
	)]
	pub(crate) embedded_in_chrome: Option<bool>,
	#[arg(
		long = "animation-ms",
		value_name = "MS",
		help = "Length of each fade stage in milliseconds (default: 250)"
	)]
	pub(crate) animation_ms: Option<u64>,
	#[arg(
		long,
		value_name = "COLS",
		help = "Host width in cells (default: 80)"
	)]
	pub(crate) width: Option<u16>,
	#[arg(
		long,
		value_name = "ROWS",
		help = "Host height in cells (default: 24)"
	)]
	pub(crate) height: Option<u16>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		long = "log-level",
		value_name = "FILTER",
		default_value = "warn",
		help = "Tracing filter used when SEARCHVEIL_LOG is unset"
	)]
	pub(crate) log_level: String,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print each snapshot")]
	pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
