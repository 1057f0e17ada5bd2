//! Command scripts replayed by the demo binary.
//!
//! One command per line or `;`-separated segment. Blank segments and lines
//! starting with `#` are skipped.

use std::fmt;
use std::time::Duration;

use searchveil::Size;
use thiserror::Error;

/// A single scripted interaction with the search bar or the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
	Focus,
	/// Append text as if typed, one key at a time.
	Type(String),
	/// Replace the buffer programmatically.
	Set(String),
	Clear,
	Backspace,
	Submit,
	Cancel,
	Activate,
	Deactivate,
	Collapse,
	Tick(Duration),
	Resize(Size),
	AlwaysCancel(bool),
}

impl fmt::Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Focus => f.write_str("focus"),
			Self::Type(text) => write!(f, "type {text}"),
			Self::Set(text) => write!(f, "set {text}"),
			Self::Clear => f.write_str("clear"),
			Self::Backspace => f.write_str("backspace"),
			Self::Submit => f.write_str("submit"),
			Self::Cancel => f.write_str("cancel"),
			Self::Activate => f.write_str("activate"),
			Self::Deactivate => f.write_str("deactivate"),
			Self::Collapse => f.write_str("collapse"),
			Self::Tick(delta) => write!(f, "tick {}", delta.as_millis()),
			Self::Resize(size) => write!(f, "resize {}x{}", size.width, size.height),
			Self::AlwaysCancel(on) => {
				write!(f, "always-cancel {}", if *on { "on" } else { "off" })
			}
		}
	}
}

/// Failure to parse one segment of a command script.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
	#[error("line {line}: unknown command `{command}`")]
	UnknownCommand { line: usize, command: String },
	#[error("line {line}: `{command}` expects {expected}")]
	MissingArgument {
		line: usize,
		command: &'static str,
		expected: &'static str,
	},
	#[error("line {line}: `{command}` does not accept `{argument}`: {reason}")]
	InvalidArgument {
		line: usize,
		command: &'static str,
		argument: String,
		reason: &'static str,
	},
}

/// Parse a whole script into commands, stopping at the first bad segment.
pub(crate) fn parse(source: &str) -> Result<Vec<Command>, ScriptError> {
	let mut commands = Vec::new();
	for (index, line) in source.lines().enumerate() {
		let line_number = index + 1;
		let line = line.trim();
		if line.starts_with('#') {
			continue;
		}
		for segment in line.split(';') {
			let segment = segment.trim();
			if segment.is_empty() {
				continue;
			}
			commands.push(parse_command(line_number, segment)?);
		}
	}
	Ok(commands)
}

fn parse_command(line: usize, segment: &str) -> Result<Command, ScriptError> {
	let (name, argument) = match segment.split_once(char::is_whitespace) {
		Some((name, rest)) => (name, rest.trim_start()),
		None => (segment, ""),
	};

	let command = match name {
		"focus" => Command::Focus,
		"type" => Command::Type(required(line, "type", "some text", argument)?.to_string()),
		// `set` without an argument blanks the buffer.
		"set" => Command::Set(argument.to_string()),
		"clear" => Command::Clear,
		"backspace" => Command::Backspace,
		"submit" => Command::Submit,
		"cancel" => Command::Cancel,
		"activate" => Command::Activate,
		"deactivate" => Command::Deactivate,
		"collapse" => Command::Collapse,
		"tick" => {
			let raw = required(line, "tick", "a duration in milliseconds", argument)?;
			let millis = raw.parse::<u64>().map_err(|_| ScriptError::InvalidArgument {
				line,
				command: "tick",
				argument: raw.to_string(),
				reason: "not a whole number of milliseconds",
			})?;
			Command::Tick(Duration::from_millis(millis))
		}
		"resize" => {
			let raw = required(line, "resize", "a size such as 80x24", argument)?;
			Command::Resize(parse_size(line, raw)?)
		}
		"always-cancel" => {
			let raw = required(line, "always-cancel", "`on` or `off`", argument)?;
			let on = match raw {
				"on" | "true" | "yes" => true,
				"off" | "false" | "no" => false,
				_ => {
					return Err(ScriptError::InvalidArgument {
						line,
						command: "always-cancel",
						argument: raw.to_string(),
						reason: "expected `on` or `off`",
					});
				}
			};
			Command::AlwaysCancel(on)
		}
		other => {
			return Err(ScriptError::UnknownCommand {
				line,
				command: other.to_string(),
			});
		}
	};
	Ok(command)
}

fn required<'a>(
	line: usize,
	command: &'static str,
	expected: &'static str,
	argument: &'a str,
) -> Result<&'a str, ScriptError> {
	if argument.is_empty() {
		return Err(ScriptError::MissingArgument {
			line,
			command,
			expected,
		});
	}
	Ok(argument)
}

fn parse_size(line: usize, raw: &str) -> Result<Size, ScriptError> {
	let invalid = |reason| ScriptError::InvalidArgument {
		line,
		command: "resize",
		argument: raw.to_string(),
		reason,
	};
	let (width, height) = raw
		.split_once(['x', 'X'])
		.ok_or_else(|| invalid("expected WIDTHxHEIGHT"))?;
	let width = width
		.trim()
		.parse::<u16>()
		.map_err(|_| invalid("width is not a cell count"))?;
	let height = height
		.trim()
		.parse::<u16>()
		.map_err(|_| invalid("height is not a cell count"))?;
	if width == 0 || height == 0 {
		return Err(invalid("size must be non-zero"));
	}
	Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_semicolons_and_newlines() {
		let commands = parse("focus; type iPhone\n# comment\nsubmit;;tick 250").expect("parses");
		assert_eq!(commands, vec![
			Command::Focus,
			Command::Type("iPhone".into()),
			Command::Submit,
			Command::Tick(Duration::from_millis(250)),
		]);
	}

	#[test]
	fn keeps_inner_whitespace_of_text_arguments() {
		let commands = parse("type   red  shoes").expect("parses");
		assert_eq!(commands, vec![Command::Type("red  shoes".into())]);
		assert_eq!(parse("set").expect("parses"), vec![Command::Set(String::new())]);
	}

	#[test]
	fn parses_host_commands() {
		let commands = parse("resize 120x40; always-cancel on").expect("parses");
		assert_eq!(commands, vec![
			Command::Resize(Size::new(120, 40)),
			Command::AlwaysCancel(true),
		]);
	}

	#[test]
	fn reports_line_of_bad_segment() {
		let err = parse("focus\nfocus; jump").expect_err("unknown command");
		assert_eq!(err, ScriptError::UnknownCommand {
			line: 2,
			command: "jump".into(),
		});
		assert_eq!(err.to_string(), "line 2: unknown command `jump`");
	}

	#[test]
	fn rejects_malformed_arguments() {
		assert!(matches!(
			parse("tick soon"),
			Err(ScriptError::InvalidArgument { command: "tick", .. })
		));
		assert!(matches!(
			parse("resize 0x10"),
			Err(ScriptError::InvalidArgument { command: "resize", .. })
		));
		assert!(matches!(
			parse("type"),
			Err(ScriptError::MissingArgument { command: "type", .. })
		));
	}

	#[test]
	fn display_matches_script_syntax() {
		let command = Command::Resize(Size::new(80, 24));
		assert_eq!(command.to_string(), "resize 80x24");
		assert_eq!(parse(&command.to_string()).expect("parses"), vec![command]);
	}
}
