//! Per-type descriptor registry.

use std::any::{TypeId, type_name};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::config::{Config, ConfigError, ConfigWarning};
use crate::descriptor::{CommandDescriptor, Tag};
use crate::error::ConfigurationError;
use crate::statics::DescriptorReg;

/// Maximum edit distance for "did you mean" suggestions.
const SUGGEST_DISTANCE: usize = 3;

#[derive(Clone)]
struct Entry {
	type_name: &'static str,
	descriptor: Arc<CommandDescriptor>,
}

/// Maps command types to their descriptors.
///
/// Descriptors are stored per [`TypeId`], so every instance of a command type
/// reads the same metadata. Iteration follows first-registration order, which
/// help listings rely on.
#[derive(Default)]
pub struct DescriptorRegistry {
	entries: RwLock<IndexMap<TypeId, Entry>>,
}

impl std::fmt::Debug for DescriptorRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let entries = self.entries.read();
		f.debug_map()
			.entries(entries.values().map(|e| (e.type_name, e.descriptor.name())))
			.finish()
	}
}

impl DescriptorRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a registry from every descriptor submitted with [`command!`](crate::command).
	pub fn from_inventory() -> Result<Self, ConfigurationError> {
		let registry = Self::new();
		for reg in inventory::iter::<DescriptorReg> {
			registry.register_id((reg.type_id)(), (reg.type_name)(), reg.descriptor()?)?;
		}
		Ok(registry)
	}

	/// Stores `descriptor` for `T`, replacing any previous one.
	pub fn register<T: 'static>(&self, descriptor: CommandDescriptor) -> Result<(), ConfigurationError> {
		self.register_id(TypeId::of::<T>(), type_name::<T>(), descriptor)
	}

	/// Stores `descriptor` for a type given by id.
	pub fn register_id(&self, id: TypeId, type_name: &'static str, descriptor: CommandDescriptor) -> Result<(), ConfigurationError> {
		let mut entries = self.entries.write();
		check_collisions(&entries, id, &descriptor)?;
		tracing::debug!(command = descriptor.name(), ty = type_name, "registered command descriptor");
		entries.insert(
			id,
			Entry {
				type_name,
				descriptor: Arc::new(descriptor),
			},
		);
		Ok(())
	}

	/// Sets one metadata field on `T`'s descriptor.
	///
	/// An untagged type starts from an empty descriptor. Tagging the same key
	/// again overwrites the previous value.
	pub fn tag<T: 'static>(&self, tag: Tag) -> Result<(), ConfigurationError> {
		self.tag_id(TypeId::of::<T>(), type_name::<T>(), tag)
	}

	pub fn tag_id(&self, id: TypeId, type_name: &'static str, tag: Tag) -> Result<(), ConfigurationError> {
		let mut entries = self.entries.write();
		let key = tag.key();
		let next = match entries.get(&id) {
			Some(entry) => entry.descriptor.with_tag(tag)?,
			None => CommandDescriptor::default().with_tag(tag)?,
		};
		check_collisions(&entries, id, &next)?;
		tracing::debug!(%key, ty = type_name, "tagged command metadata");
		entries.insert(
			id,
			Entry {
				type_name,
				descriptor: Arc::new(next),
			},
		);
		Ok(())
	}

	/// Applies several tags in order, stopping at the first invalid one.
	pub fn tag_all<T: 'static>(&self, tags: impl IntoIterator<Item = Tag>) -> Result<(), ConfigurationError> {
		tags.into_iter().try_for_each(|tag| self.tag::<T>(tag))
	}

	pub fn get<T: 'static>(&self) -> Option<Arc<CommandDescriptor>> {
		self.get_by_id(TypeId::of::<T>())
	}

	pub fn get_by_id(&self, id: TypeId) -> Option<Arc<CommandDescriptor>> {
		self.entries.read().get(&id).map(|e| Arc::clone(&e.descriptor))
	}

	/// Reads the descriptor of a command instance's type.
	pub fn descriptor_of<T: 'static>(&self, _command: &T) -> Option<Arc<CommandDescriptor>> {
		self.get::<T>()
	}

	/// Finds the command whose name or alias is exactly `input`.
	pub fn find(&self, input: &str) -> Option<Arc<CommandDescriptor>> {
		self.find_type(input).and_then(|id| self.get_by_id(id))
	}

	/// Like [`find`](Self::find), returning the owning type.
	pub fn find_type(&self, input: &str) -> Option<TypeId> {
		self.entries
			.read()
			.iter()
			.find(|(_, e)| e.descriptor.matches(input))
			.map(|(id, _)| *id)
	}

	/// Suggests the closest command name for a mistyped `input`.
	pub fn suggest(&self, input: &str) -> Option<String> {
		closest_name(&self.entries.read(), input)
	}

	/// Snapshot of every descriptor in registration order.
	pub fn descriptors(&self) -> Vec<Arc<CommandDescriptor>> {
		self.entries.read().values().map(|e| Arc::clone(&e.descriptor)).collect()
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// Applies `[commands.<name>]` overrides from a config.
	///
	/// Overrides naming no registered command are reported as warnings. The
	/// overrides are applied together: if any of them is invalid, no
	/// descriptor changes.
	pub fn apply_config(&self, config: &Config) -> Result<Vec<ConfigWarning>, ConfigurationError> {
		let mut entries = self.entries.write();
		let mut staged = entries.clone();
		let mut touched = Vec::new();
		let mut warnings = Vec::new();

		for (name, overrides) in &config.commands {
			let Some(id) = entries.iter().find(|(_, e)| e.descriptor.matches(name)).map(|(id, _)| *id) else {
				let warning = ConfigWarning::UnknownCommand {
					name: name.clone(),
					suggestion: closest_name(&entries, name),
				};
				tracing::warn!(%warning, "ignoring command override");
				warnings.push(warning);
				continue;
			};
			let Some(entry) = staged.get_mut(&id) else { continue };
			let mut next = (*entry.descriptor).clone();
			for tag in overrides.tags() {
				next = next.with_tag(tag)?;
			}
			entry.descriptor = Arc::new(next);
			touched.push(id);
		}

		for id in &touched {
			if let Some(entry) = staged.get(id) {
				check_collisions(&staged, *id, &entry.descriptor)?;
			}
		}
		for id in &touched {
			if let Some(entry) = staged.get(id) {
				tracing::debug!(command = entry.descriptor.name(), ty = entry.type_name, "applied config override");
			}
		}
		*entries = staged;
		Ok(warnings)
	}

	/// Loads a TOML config file and applies its command overrides.
	pub fn load_config(&self, path: &std::path::Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
		let config = Config::load(path)?;
		let warnings = self.apply_config(&config)?;
		Ok((config, warnings))
	}
}

fn closest_name(entries: &IndexMap<TypeId, Entry>, input: &str) -> Option<String> {
	entries
		.values()
		.flat_map(|e| e.descriptor.labels().map(move |label| (strsim::levenshtein(input, label), e.descriptor.name())))
		.filter(|(distance, _)| *distance <= SUGGEST_DISTANCE)
		.min_by_key(|(distance, _)| *distance)
		.map(|(_, name)| name.to_string())
}

fn check_collisions(entries: &IndexMap<TypeId, Entry>, id: TypeId, descriptor: &CommandDescriptor) -> Result<(), ConfigurationError> {
	for (other_id, other) in entries {
		if *other_id == id {
			continue;
		}
		if let Some(label) = descriptor.labels().find(|label| other.descriptor.matches(label)) {
			return Err(ConfigurationError::Collision {
				name: label.to_string(),
				owner: other.type_name,
			});
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests;
