//! Link-time descriptor registration via `inventory`.

use std::any::TypeId;

use crate::descriptor::CommandDescriptor;
use crate::error::ConfigurationError;

/// Static descriptor entry collected via `inventory`.
///
/// Created by the [`command!`](crate::command) macro; validated when
/// [`DescriptorRegistry::from_inventory`](crate::DescriptorRegistry::from_inventory) builds a registry.
pub struct DescriptorReg {
	/// Identifies the command type.
	pub type_id: fn() -> TypeId,
	/// Type name for diagnostics.
	pub type_name: fn() -> &'static str,
	pub name: &'static str,
	pub description: &'static str,
	pub aliases: &'static [&'static str],
	pub usage: &'static str,
}

impl DescriptorReg {
	/// Builds and validates the owned descriptor.
	pub fn descriptor(&self) -> Result<CommandDescriptor, ConfigurationError> {
		CommandDescriptor::builder()
			.name(self.name)
			.description(self.description)
			.aliases(self.aliases.iter().copied())
			.usage(self.usage)
			.build()
	}
}

inventory::collect!(DescriptorReg);

/// Declares a command type's metadata next to the type.
///
/// ```ignore
/// pub struct Ban;
///
/// warden_registry::command!(Ban, {
/// 	name: "ban",
/// 	description: "Ban a user from the channel",
/// 	aliases: ["b", "banuser"],
/// 	usage: "ban <user> [reason]",
/// });
/// ```
#[macro_export]
macro_rules! command {
	($ty:ty, {
		name: $name:expr
		$(, description: $desc:expr)?
		$(, aliases: [$($alias:expr),* $(,)?])?
		$(, usage: $usage:expr)?
		$(,)?
	}) => {
		$crate::inventory::submit! {
			$crate::DescriptorReg {
				type_id: ::std::any::TypeId::of::<$ty>,
				type_name: ::std::any::type_name::<$ty>,
				name: $name,
				description: $crate::__warden_opt!($({$desc})?, ""),
				aliases: $crate::__warden_opt!($({&[$($alias),*]})?, &[]),
				usage: $crate::__warden_opt!($({$usage})?, ""),
			}
		}
	};
}

/// Selects a provided value or falls back to a default.
#[doc(hidden)]
#[macro_export]
macro_rules! __warden_opt {
	({$val:expr}, $default:expr) => {
		$val
	};
	(, $default:expr) => {
		$default
	};
}
