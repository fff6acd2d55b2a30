use pretty_assertions::assert_eq;

use super::*;

#[derive(Debug, Clone, PartialEq)]
struct Msg(&'static str);

#[derive(Debug, PartialEq)]
struct ResolvedUser {
	id: u64,
}

#[test]
fn args_macro_converts_each_value() {
	let args = args!["target", 3, 1.5, true];
	assert_eq!(
		args,
		vec![Arg::Text("target".into()), Arg::Int(3), Arg::Float(1.5), Arg::Bool(true)]
	);
	assert!(args![].is_empty());
}

#[test]
fn parts_round_trip() {
	let inv = Invocation::new(Msg("hi"), args!["a", "b"]);
	let (message, args) = inv.clone().into_parts();
	assert_eq!(Invocation::from((message, args)), inv);
}

#[test]
fn with_args_keeps_message() {
	let inv = Invocation::new(Msg("hi"), args!["a"]).with_args(args!["b", "c"]);
	assert_eq!(inv.message, Msg("hi"));
	assert_eq!(inv.args, args!["b", "c"]);
}

#[test]
fn extension_lookup_finds_injected_value() {
	let mut inv = Invocation::new(Msg("hi"), args!["target"]);
	assert!(inv.extension::<ResolvedUser>().is_none());

	inv.push_arg(Arg::ext(ResolvedUser { id: 7 }));
	assert_eq!(inv.extension::<ResolvedUser>(), Some(&ResolvedUser { id: 7 }));
	assert_eq!(inv.arg(0).and_then(Arg::as_text), Some("target"));
}

#[test]
fn map_message_preserves_args() {
	let inv = Invocation::new(Msg("hi"), args![1]).map_message(|m| m.0.len());
	assert_eq!(inv.message, 2);
	assert_eq!(inv.args, args![1]);
}

#[test]
fn describe_args_joins_display_forms() {
	let inv = Invocation::new(Msg("hi"), args!["user", 10, false]);
	assert_eq!(inv.describe_args(), "user 10 false");
}

#[test]
fn validate_delegates_to_signature() {
	let sig = Signature::new().required("user", ArgKind::Text);
	assert!(Invocation::new(Msg("hi"), args!["bob"]).validate(&sig).is_ok());
	assert_eq!(
		Invocation::bare(Msg("hi")).validate(&sig),
		Err(SignatureError::TooFewArgs { expected: 1, got: 0 })
	);
}
