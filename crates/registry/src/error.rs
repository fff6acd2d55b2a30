use thiserror::Error;

use crate::descriptor::MetaKey;

/// Malformed command metadata, reported at registration time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
	/// The metadata key is not one of `name`, `description`, `aliases`, `usage`.
	#[error("unknown metadata key: {key}{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
	UnknownKey {
		key: String,
		suggestion: Option<&'static str>,
	},
	/// The value shape does not match the key (text vs. list).
	#[error("metadata key '{key}' expects {expected}")]
	ShapeMismatch { key: MetaKey, expected: &'static str },
	/// A name or alias is empty.
	#[error("metadata key '{key}' must not be empty")]
	EmptyValue { key: MetaKey },
	/// A name or alias contains whitespace.
	#[error("invalid {key} '{value}': whitespace is not allowed")]
	InvalidName { key: MetaKey, value: String },
	/// An alias repeats another alias or the command's own name.
	#[error("duplicate alias: {0}")]
	DuplicateAlias(String),
	/// A name or alias is already claimed by a different command type.
	#[error("'{name}' is already registered by {owner}")]
	Collision { name: String, owner: &'static str },
	/// A descriptor was built without a name.
	#[error("command descriptor has no name")]
	MissingName,
}
