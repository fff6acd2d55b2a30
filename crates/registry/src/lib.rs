//! Declarative command metadata.
//!
//! Every command type carries a [`CommandDescriptor`]: its name, description,
//! aliases and usage text. Descriptors live in a [`DescriptorRegistry`] keyed
//! by the command's [`TypeId`](std::any::TypeId), so any reader of the type
//! (a dispatcher matching names and aliases, a help command listing
//! descriptions) sees the same metadata.
//!
//! Metadata is declared in one of three ways:
//!
//! - field by field with [`DescriptorRegistry::tag`] and the [`tags`] constructors;
//! - all at once with [`CommandDescriptor::builder`] and [`DescriptorRegistry::register`];
//! - next to the type with [`command!`], collected by [`DescriptorRegistry::from_inventory`].
//!
//! All three validate their input and fail with [`ConfigurationError`].

pub mod config;
mod descriptor;
mod error;
mod statics;
mod store;

pub use config::{CommandOverride, Config, ConfigError, ConfigWarning, GateSettings, RejectionPolicy};
pub use descriptor::{CommandDescriptor, DescriptorBuilder, MetaKey, MetaValue, Tag, TagValue, tags};
pub use error::ConfigurationError;
#[doc(hidden)]
pub use inventory;
pub use statics::DescriptorReg;
pub use store::DescriptorRegistry;
