//! Command descriptors and the tags that build them.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// The fixed set of metadata keys a command type can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaKey {
	Name,
	Description,
	Aliases,
	Usage,
}

impl MetaKey {
	/// All keys, in enumeration order.
	pub const ALL: [MetaKey; 4] = [Self::Name, Self::Description, Self::Aliases, Self::Usage];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Name => "name",
			Self::Description => "description",
			Self::Aliases => "aliases",
			Self::Usage => "usage",
		}
	}

	const fn expects_list(self) -> bool {
		matches!(self, Self::Aliases)
	}
}

impl fmt::Display for MetaKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for MetaKey {
	type Err = ConfigurationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL.into_iter().find(|k| k.as_str() == s).ok_or_else(|| ConfigurationError::UnknownKey {
			key: s.to_string(),
			suggestion: Self::ALL
				.into_iter()
				.map(MetaKey::as_str)
				.min_by_key(|k| strsim::levenshtein(s, k))
				.filter(|k| strsim::levenshtein(s, k) <= 3),
		})
	}
}

/// Owned value for a dynamically keyed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
	Text(String),
	List(Vec<String>),
}

impl From<&str> for TagValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for TagValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<Vec<String>> for TagValue {
	fn from(value: Vec<String>) -> Self {
		Self::List(value)
	}
}

/// Borrowed view of one descriptor field, for generic metadata readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaValue<'a> {
	Text(&'a str),
	List(&'a [String]),
}

/// One `(key, value)` metadata assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
	Name(String),
	Description(String),
	Aliases(Vec<String>),
	Usage(String),
}

impl Tag {
	/// Builds a tag from a runtime key and value, checking the value shape.
	pub fn new(key: MetaKey, value: impl Into<TagValue>) -> Result<Self, ConfigurationError> {
		match (key, value.into()) {
			(MetaKey::Name, TagValue::Text(v)) => Ok(Self::Name(v)),
			(MetaKey::Description, TagValue::Text(v)) => Ok(Self::Description(v)),
			(MetaKey::Usage, TagValue::Text(v)) => Ok(Self::Usage(v)),
			(MetaKey::Aliases, TagValue::List(v)) => Ok(Self::Aliases(v)),
			(key, _) => Err(ConfigurationError::ShapeMismatch {
				key,
				expected: if key.expects_list() { "a list of strings" } else { "a string" },
			}),
		}
	}

	pub fn key(&self) -> MetaKey {
		match self {
			Self::Name(_) => MetaKey::Name,
			Self::Description(_) => MetaKey::Description,
			Self::Aliases(_) => MetaKey::Aliases,
			Self::Usage(_) => MetaKey::Usage,
		}
	}
}

/// Tag constructors named after the metadata they set.
pub mod tags {
	use super::Tag;

	pub fn name(value: impl Into<String>) -> Tag {
		Tag::Name(value.into())
	}

	pub fn description(value: impl Into<String>) -> Tag {
		Tag::Description(value.into())
	}

	/// Collects any number of aliases, keeping declaration order.
	pub fn aliases<I, S>(values: I) -> Tag
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Tag::Aliases(values.into_iter().map(Into::into).collect())
	}

	pub fn usage(value: impl Into<String>) -> Tag {
		Tag::Usage(value.into())
	}
}

/// Static identity of a command type.
///
/// Descriptors are immutable once built. Re-tagging a type produces a new
/// descriptor that replaces the stored one; readers holding the old value
/// are unaffected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandDescriptor {
	name: String,
	description: String,
	aliases: Vec<String>,
	usage: String,
}

impl CommandDescriptor {
	pub fn builder() -> DescriptorBuilder {
		DescriptorBuilder::default()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	/// Aliases in declaration order.
	pub fn aliases(&self) -> &[String] {
		&self.aliases
	}

	pub fn usage(&self) -> &str {
		&self.usage
	}

	/// Returns true if `input` is this command's name or one of its aliases.
	pub fn matches(&self, input: &str) -> bool {
		self.labels().any(|label| label == input)
	}

	/// Name followed by aliases, skipping an unset name.
	pub fn labels(&self) -> impl Iterator<Item = &str> {
		std::iter::once(self.name.as_str())
			.filter(|n| !n.is_empty())
			.chain(self.aliases.iter().map(String::as_str))
	}

	/// Reads one field.
	pub fn get(&self, key: MetaKey) -> MetaValue<'_> {
		match key {
			MetaKey::Name => MetaValue::Text(&self.name),
			MetaKey::Description => MetaValue::Text(&self.description),
			MetaKey::Aliases => MetaValue::List(&self.aliases),
			MetaKey::Usage => MetaValue::Text(&self.usage),
		}
	}

	/// Every field as `(key, value)`, in [`MetaKey::ALL`] order.
	pub fn fields(&self) -> impl Iterator<Item = (MetaKey, MetaValue<'_>)> {
		MetaKey::ALL.into_iter().map(|key| (key, self.get(key)))
	}

	/// Returns a copy with one field replaced, after validating the tag.
	pub fn with_tag(&self, tag: Tag) -> Result<Self, ConfigurationError> {
		let mut next = self.clone();
		match tag {
			Tag::Name(name) => {
				validate_label(MetaKey::Name, &name)?;
				if next.aliases.contains(&name) {
					return Err(ConfigurationError::DuplicateAlias(name));
				}
				next.name = name;
			}
			Tag::Description(description) => next.description = description,
			Tag::Aliases(aliases) => {
				validate_aliases(&next.name, &aliases)?;
				next.aliases = aliases;
			}
			Tag::Usage(usage) => next.usage = usage,
		}
		Ok(next)
	}
}

/// Builds a validated [`CommandDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder {
	name: Option<String>,
	description: String,
	aliases: Vec<String>,
	usage: String,
}

impl DescriptorBuilder {
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn aliases<I, S>(mut self, aliases: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.aliases = aliases.into_iter().map(Into::into).collect();
		self
	}

	pub fn usage(mut self, usage: impl Into<String>) -> Self {
		self.usage = usage.into();
		self
	}

	/// Applies a tag, so dynamically keyed metadata can feed the builder.
	pub fn tag(self, tag: Tag) -> Self {
		match tag {
			Tag::Name(v) => self.name(v),
			Tag::Description(v) => self.description(v),
			Tag::Aliases(v) => self.aliases(v),
			Tag::Usage(v) => self.usage(v),
		}
	}

	pub fn build(self) -> Result<CommandDescriptor, ConfigurationError> {
		let name = self.name.ok_or(ConfigurationError::MissingName)?;
		validate_label(MetaKey::Name, &name)?;
		validate_aliases(&name, &self.aliases)?;
		Ok(CommandDescriptor {
			name,
			description: self.description,
			aliases: self.aliases,
			usage: self.usage,
		})
	}
}

fn validate_label(key: MetaKey, value: &str) -> Result<(), ConfigurationError> {
	if value.is_empty() {
		return Err(ConfigurationError::EmptyValue { key });
	}
	if value.chars().any(char::is_whitespace) {
		return Err(ConfigurationError::InvalidName {
			key,
			value: value.to_string(),
		});
	}
	Ok(())
}

fn validate_aliases(name: &str, aliases: &[String]) -> Result<(), ConfigurationError> {
	for (i, alias) in aliases.iter().enumerate() {
		validate_label(MetaKey::Aliases, alias)?;
		if alias == name || aliases[..i].contains(alias) {
			return Err(ConfigurationError::DuplicateAlias(alias.clone()));
		}
	}
	Ok(())
}
