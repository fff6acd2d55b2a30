//! Descriptors declared with `command!` and collected at link time.

use warden_registry::{ConfigurationError, DescriptorRegistry, command, tags};

pub struct Ban;
pub struct Uptime;
pub struct Unregistered;

command!(Ban, {
	name: "ban",
	description: "Ban a user from the channel",
	aliases: ["b", "banuser"],
	usage: "ban <user> [reason]",
});

command!(Uptime, { name: "uptime" });

#[test]
fn collects_declared_descriptors() {
	let registry = DescriptorRegistry::from_inventory().unwrap();
	assert_eq!(registry.len(), 2);

	let ban = registry.get::<Ban>().unwrap();
	assert_eq!(ban.name(), "ban");
	assert_eq!(ban.description(), "Ban a user from the channel");
	assert_eq!(ban.aliases(), ["b", "banuser"]);
	assert_eq!(ban.usage(), "ban <user> [reason]");

	let uptime = registry.get::<Uptime>().unwrap();
	assert_eq!(uptime.description(), "");
	assert!(uptime.aliases().is_empty());
	assert!(registry.get::<Unregistered>().is_none());
}

#[test]
fn collected_registry_accepts_later_tags() {
	let registry = DescriptorRegistry::from_inventory().unwrap();
	registry.tag::<Uptime>(tags::description("Show bot uptime")).unwrap();
	assert_eq!(registry.find("uptime").unwrap().description(), "Show bot uptime");

	assert!(matches!(
		registry.tag::<Unregistered>(tags::aliases(["b"])),
		Err(ConfigurationError::Collision { .. })
	));
}
