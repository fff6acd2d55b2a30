//! TOML configuration for gates and command metadata overrides.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::descriptor::{Tag, tags};
use crate::error::ConfigurationError;

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The config file could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	/// The file is not valid TOML or does not match the schema.
	#[error("config parse error: {0}")]
	Parse(#[from] toml::de::Error),
	/// An override carries invalid metadata.
	#[error("invalid command metadata: {0}")]
	Invalid(#[from] ConfigurationError),
}

/// Non-fatal problem found while applying a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// An override names a command that is not registered.
	UnknownCommand { name: String, suggestion: Option<String> },
}

impl std::fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigWarning::UnknownCommand { name, suggestion: Some(s) } => {
				write!(f, "unknown command '{name}' (did you mean '{s}'?)")
			}
			ConfigWarning::UnknownCommand { name, suggestion: None } => write!(f, "unknown command '{name}'"),
		}
	}
}

/// What a gate does with a rejected invocation besides halting it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RejectionPolicy {
	/// Halt without notifying anyone.
	#[default]
	Silent,
	/// Halt and forward the rejection to the gate's sink.
	Report,
}

/// `[gate]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateSettings {
	/// Upper bound on one middleware call, in milliseconds.
	pub timeout_ms: Option<u64>,
	pub on_rejection: Option<RejectionPolicy>,
}

impl GateSettings {
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout_ms.map(Duration::from_millis)
	}

	pub fn policy(&self) -> RejectionPolicy {
		self.on_rejection.unwrap_or_default()
	}

	/// Merges `other` into `self`, with `other` taking precedence.
	pub fn merge(&mut self, other: GateSettings) {
		self.timeout_ms = other.timeout_ms.or(self.timeout_ms);
		self.on_rejection = other.on_rejection.or(self.on_rejection);
	}
}

/// `[commands.<name>]` table: metadata overrides for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandOverride {
	pub description: Option<String>,
	pub usage: Option<String>,
	pub aliases: Option<Vec<String>>,
}

impl CommandOverride {
	/// The tags this override applies, in key order.
	pub fn tags(&self) -> Vec<Tag> {
		let mut out = Vec::new();
		if let Some(description) = &self.description {
			out.push(tags::description(description.clone()));
		}
		if let Some(aliases) = &self.aliases {
			out.push(tags::aliases(aliases.iter().cloned()));
		}
		if let Some(usage) = &self.usage {
			out.push(tags::usage(usage.clone()));
		}
		out
	}

	fn merge(&mut self, other: CommandOverride) {
		if other.description.is_some() {
			self.description = other.description;
		}
		if other.usage.is_some() {
			self.usage = other.usage;
		}
		if other.aliases.is_some() {
			self.aliases = other.aliases;
		}
	}
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub gate: GateSettings,
	/// Overrides keyed by command name or alias.
	pub commands: BTreeMap<String, CommandOverride>,
}

impl Config {
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	/// Reads and parses a TOML config file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml_str(&content)?;
		tracing::debug!(path = %path.display(), commands = config.commands.len(), "loaded config");
		Ok(config)
	}

	/// Merges another config, with `other` taking precedence.
	pub fn merge(&mut self, other: Config) {
		self.gate.merge(other.gate);
		for (name, overrides) in other.commands {
			self.commands.entry(name).or_default().merge(overrides);
		}
	}
}
