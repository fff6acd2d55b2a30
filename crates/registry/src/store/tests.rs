use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::descriptor::{MetaKey, MetaValue, tags};

struct Ban;
struct Kick;
struct Uptime;

fn descriptor(name: &str, aliases: &[&str]) -> CommandDescriptor {
	CommandDescriptor::builder()
		.name(name)
		.aliases(aliases.iter().copied())
		.build()
		.unwrap()
}

#[rstest]
#[case(tags::name("ban"), MetaKey::Name)]
#[case(tags::description("Ban a user"), MetaKey::Description)]
#[case(tags::aliases(["b", "banuser"]), MetaKey::Aliases)]
#[case(tags::usage("ban <user>"), MetaKey::Usage)]
fn tag_then_read_back(#[case] tag: Tag, #[case] key: MetaKey) {
	let registry = DescriptorRegistry::new();
	registry.tag::<Ban>(tag.clone()).unwrap();
	let desc = registry.get::<Ban>().unwrap();
	let expected = CommandDescriptor::default().with_tag(tag).unwrap();
	assert_eq!(desc.get(key), expected.get(key));
}

#[test]
fn retagging_last_writer_wins() {
	let registry = DescriptorRegistry::new();
	registry.tag::<Ban>(tags::description("first")).unwrap();
	registry.tag::<Ban>(tags::description("second")).unwrap();
	assert_eq!(registry.get::<Ban>().unwrap().description(), "second");
	assert_eq!(registry.len(), 1);
}

#[test]
fn aliases_read_back_in_order() {
	let registry = DescriptorRegistry::new();
	registry.tag::<Ban>(tags::aliases(["a", "b", "c"])).unwrap();
	assert_eq!(registry.get::<Ban>().unwrap().aliases(), ["a", "b", "c"]);
}

#[test]
fn every_instance_reads_the_same_descriptor() {
	let registry = DescriptorRegistry::new();
	registry
		.tag_all::<Ban>([tags::name("ban"), tags::aliases(["b"])])
		.unwrap();
	let first = registry.descriptor_of(&Ban).unwrap();
	let second = registry.descriptor_of(&Ban).unwrap();
	assert!(Arc::ptr_eq(&first, &second));
	assert!(registry.descriptor_of(&Kick).is_none());
}

#[test]
fn readers_keep_the_value_they_read() {
	let registry = DescriptorRegistry::new();
	registry.tag::<Ban>(tags::usage("old")).unwrap();
	let before = registry.get::<Ban>().unwrap();
	registry.tag::<Ban>(tags::usage("new")).unwrap();
	assert_eq!(before.usage(), "old");
	assert_eq!(registry.get::<Ban>().unwrap().usage(), "new");
}

#[test]
fn invalid_tag_leaves_descriptor_untouched() {
	let registry = DescriptorRegistry::new();
	registry.tag::<Ban>(tags::name("ban")).unwrap();
	let err = registry.tag::<Ban>(tags::aliases(["ok", "not ok"])).unwrap_err();
	assert_eq!(
		err,
		ConfigurationError::InvalidName {
			key: MetaKey::Aliases,
			value: "not ok".into(),
		}
	);
	assert!(registry.get::<Ban>().unwrap().aliases().is_empty());
}

#[test]
fn register_replaces_previous_descriptor() {
	let registry = DescriptorRegistry::new();
	registry.register::<Ban>(descriptor("ban", &["b"])).unwrap();
	registry.register::<Ban>(descriptor("ban", &["bn"])).unwrap();
	assert_eq!(registry.get::<Ban>().unwrap().aliases(), ["bn"]);
}

#[test]
fn collisions_across_types_are_rejected() {
	let registry = DescriptorRegistry::new();
	registry.register::<Ban>(descriptor("ban", &["b"])).unwrap();

	let err = registry.register::<Kick>(descriptor("kick", &["b"])).unwrap_err();
	assert!(matches!(err, ConfigurationError::Collision { ref name, .. } if name == "b"));

	let err = registry.tag::<Kick>(tags::name("ban")).unwrap_err();
	assert!(matches!(err, ConfigurationError::Collision { ref name, .. } if name == "ban"));
	assert!(registry.get::<Kick>().is_none());
}

#[test]
fn find_by_name_or_alias() {
	let registry = DescriptorRegistry::new();
	registry.register::<Ban>(descriptor("ban", &["b", "banuser"])).unwrap();
	registry.register::<Kick>(descriptor("kick", &[])).unwrap();

	assert_eq!(registry.find("banuser").unwrap().name(), "ban");
	assert_eq!(registry.find("kick").unwrap().name(), "kick");
	assert_eq!(registry.find_type("b"), Some(TypeId::of::<Ban>()));
	assert!(registry.find("unban").is_none());
}

#[test]
fn suggest_closest_label() {
	let registry = DescriptorRegistry::new();
	registry.register::<Ban>(descriptor("ban", &["banuser"])).unwrap();
	registry.register::<Uptime>(descriptor("uptime", &[])).unwrap();

	assert_eq!(registry.suggest("uptme").as_deref(), Some("uptime"));
	assert_eq!(registry.suggest("banusr").as_deref(), Some("ban"));
	assert_eq!(registry.suggest("something-else-entirely"), None);
}

#[test]
fn descriptors_follow_registration_order() {
	let registry = DescriptorRegistry::new();
	registry.register::<Uptime>(descriptor("uptime", &[])).unwrap();
	registry.register::<Ban>(descriptor("ban", &[])).unwrap();
	registry.register::<Kick>(descriptor("kick", &[])).unwrap();
	registry.tag::<Uptime>(tags::description("Show uptime")).unwrap();

	let names: Vec<String> = registry.descriptors().iter().map(|d| d.name().to_string()).collect();
	assert_eq!(names, ["uptime", "ban", "kick"]);
}

#[test]
fn help_listing_reads_fields_generically() {
	let registry = DescriptorRegistry::new();
	registry
		.tag_all::<Ban>([tags::name("ban"), tags::description("Ban a user"), tags::usage("ban <user>")])
		.unwrap();
	let desc = registry.get::<Ban>().unwrap();
	let texts: Vec<&str> = desc
		.fields()
		.filter_map(|(key, value)| match (key, value) {
			(MetaKey::Description | MetaKey::Usage, MetaValue::Text(text)) => Some(text),
			_ => None,
		})
		.collect();
	assert_eq!(texts, ["Ban a user", "ban <user>"]);
}

#[test]
fn apply_config_overrides_and_warns() {
	let registry = DescriptorRegistry::new();
	registry.register::<Ban>(descriptor("ban", &["b"])).unwrap();
	let config = Config::from_toml_str(
		r#"
[commands.b]
description = "Ban someone"
aliases = ["b", "banuser"]

[commands.bna]
usage = "ignored"
"#,
	)
	.unwrap();

	let warnings = registry.apply_config(&config).unwrap();
	let desc = registry.get::<Ban>().unwrap();
	assert_eq!(desc.description(), "Ban someone");
	assert_eq!(desc.aliases(), ["b", "banuser"]);
	assert_eq!(
		warnings,
		vec![ConfigWarning::UnknownCommand {
			name: "bna".into(),
			suggestion: Some("ban".into()),
		}]
	);
}

#[test]
fn apply_config_propagates_invalid_metadata() {
	let registry = DescriptorRegistry::new();
	registry.register::<Ban>(descriptor("ban", &[])).unwrap();
	let config = Config::from_toml_str("[commands.ban]\naliases = [\"\"]\n").unwrap();
	assert_eq!(
		registry.apply_config(&config),
		Err(ConfigurationError::EmptyValue { key: MetaKey::Aliases })
	);
}

#[test]
fn rejected_config_changes_nothing() {
	let registry = DescriptorRegistry::new();
	registry.register::<Ban>(descriptor("ban", &["b"])).unwrap();
	registry.register::<Kick>(descriptor("kick", &[])).unwrap();
	let before = registry.descriptors();
	let config = Config::from_toml_str(
		r#"
[commands.ban]
description = "changed"
aliases = ["bad alias"]

[commands.kick]
description = "also changed"
"#,
	)
	.unwrap();

	assert_eq!(
		registry.apply_config(&config),
		Err(ConfigurationError::InvalidName {
			key: MetaKey::Aliases,
			value: "bad alias".into(),
		})
	);
	assert_eq!(registry.descriptors(), before);
	assert_eq!(registry.get::<Ban>().unwrap().description(), "");
	assert_eq!(registry.get::<Kick>().unwrap().description(), "");
}

#[test]
fn config_collision_between_overrides_changes_nothing() {
	let registry = DescriptorRegistry::new();
	registry.register::<Ban>(descriptor("ban", &[])).unwrap();
	registry.register::<Kick>(descriptor("kick", &[])).unwrap();
	let config = Config::from_toml_str(
		r#"
[commands.ban]
aliases = ["x"]

[commands.kick]
aliases = ["x"]
"#,
	)
	.unwrap();

	assert!(matches!(
		registry.apply_config(&config),
		Err(ConfigurationError::Collision { ref name, .. }) if name == "x"
	));
	assert!(registry.get::<Ban>().unwrap().aliases().is_empty());
	assert!(registry.find("x").is_none());
}

#[test]
fn load_config_reads_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("warden.toml");
	std::fs::write(&path, "[gate]\ntimeout_ms = 50\n\n[commands.ban]\nusage = \"ban <user>\"\n").unwrap();

	let registry = DescriptorRegistry::new();
	registry.register::<Ban>(descriptor("ban", &[])).unwrap();
	let (config, warnings) = registry.load_config(&path).unwrap();
	assert!(warnings.is_empty());
	assert_eq!(config.gate.timeout_ms, Some(50));
	assert_eq!(registry.get::<Ban>().unwrap().usage(), "ban <user>");
}
