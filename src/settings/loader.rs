use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File, Map, Value};
use searchveil::app_dirs;
use tracing::debug;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use crate::cli::CliArgs;

/// Top-level tables understood in config files and `SEARCHVEIL__*` variables.
const SECTIONS: [&str; 3] = ["search_bar", "overlay", "host"];

const ENV_PREFIX: &str = "searchveil";
const ENV_SEPARATOR: &str = "__";

/// Load configuration by combining config files, `SEARCHVEIL__<SECTION>__<KEY>`
/// variables and CLI flags, in increasing order of precedence.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	ConfigLayers::from_cli(cli).load(cli)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ConfigFile {
	path: PathBuf,
	required: bool,
}

/// Ordered configuration sources, lowest precedence first.
#[derive(Debug, Default)]
struct ConfigLayers {
	files: Vec<ConfigFile>,
	/// Replaces the process environment when set.
	env: Option<Map<String, String>>,
}

impl ConfigLayers {
	fn from_cli(cli: &CliArgs) -> Self {
		let mut layers = Self::default();
		if !cli.no_config {
			layers.files.extend(default_config_files().into_iter().map(|path| ConfigFile {
				path,
				required: false,
			}));
		}
		layers.files.extend(cli.config.iter().map(|path| ConfigFile {
			path: path.clone(),
			required: true,
		}));
		layers
	}

	#[cfg(test)]
	fn with_env<const N: usize>(mut self, vars: [(&str, &str); N]) -> Self {
		self.env = Some(
			vars.into_iter()
				.map(|(key, value)| (key.to_string(), value.to_string()))
				.collect(),
		);
		self
	}

	fn build(&self) -> Result<Config> {
		let mut builder = Config::builder();
		for file in &self.files {
			debug!(path = %file.path.display(), required = file.required, "config file layer");
			builder = builder.add_source(File::from(file.path.clone()).required(file.required));
		}
		builder = builder.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.prefix_separator(ENV_SEPARATOR)
				.separator(ENV_SEPARATOR)
				.try_parsing(true)
				.source(self.env.clone()),
		);
		builder.build().context("failed to read configuration sources")
	}

	fn load(&self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let config = self.build()?;
		check_sections(&config)?;
		let mut raw: RawConfig = config
			.try_deserialize()
			.context("failed to deserialize configuration")?;
		raw.apply_cli_overrides(cli);
		raw.resolve()
	}
}

/// Reject top-level keys outside [`SECTIONS`] so a misspelt table is not
/// silently ignored.
fn check_sections(config: &Config) -> Result<()> {
	let tables: Map<String, Value> = config
		.clone()
		.try_deserialize()
		.context("failed to read configuration tables")?;
	let mut unknown: Vec<&str> = tables
		.keys()
		.map(String::as_str)
		.filter(|key| !SECTIONS.contains(key))
		.collect();
	if unknown.is_empty() {
		return Ok(());
	}
	unknown.sort_unstable();
	bail!(
		"unknown configuration section(s): {} (expected one of: {})",
		unknown.join(", "),
		SECTIONS.join(", ")
	)
}

/// Default configuration file locations, lowest precedence first.
fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();
	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}
	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".searchveil.toml"));
		files.push(current_dir.join("searchveil.toml"));
	}
	files
}
