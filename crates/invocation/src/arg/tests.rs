use rstest::rstest;

use super::*;

#[rstest]
#[case(Arg::from("x"), ArgKind::Text)]
#[case(Arg::from(String::from("x")), ArgKind::Text)]
#[case(Arg::from(4i64), ArgKind::Int)]
#[case(Arg::from(4), ArgKind::Int)]
#[case(Arg::from(0.5), ArgKind::Float)]
#[case(Arg::from(false), ArgKind::Bool)]
#[case(Arg::ext(42u8), ArgKind::Ext)]
fn kind_matches_variant(#[case] arg: Arg, #[case] kind: ArgKind) {
	assert_eq!(arg.kind(), kind);
}

#[test]
fn accessors_only_match_their_variant() {
	let text = Arg::from("hello");
	assert_eq!(text.as_text(), Some("hello"));
	assert_eq!(text.as_int(), None);
	assert_eq!(Arg::Int(3).as_int(), Some(3));
	assert_eq!(Arg::Float(2.0).as_float(), Some(2.0));
	assert_eq!(Arg::Bool(true).as_bool(), Some(true));
	assert_eq!(Arg::Int(3).as_bool(), None);
}

#[test]
fn extension_downcasts_to_wrapped_type() {
	let arg = Arg::ext(String::from("resolved"));
	assert_eq!(arg.downcast_ref::<String>().map(String::as_str), Some("resolved"));
	assert!(arg.downcast_ref::<u32>().is_none());
	assert!(Arg::from("plain").downcast_ref::<String>().is_none());
}

#[test]
fn extension_equality_is_identity() {
	let a = Extension::new(1u32);
	let b = Extension::new(1u32);
	assert_eq!(a, a.clone());
	assert_ne!(a, b);
	assert!(a.is::<u32>());
	assert_eq!(a.type_name(), "u32");
}

#[test]
fn display_forms() {
	assert_eq!(Arg::from("abc").to_string(), "abc");
	assert_eq!(Arg::Int(-2).to_string(), "-2");
	assert_eq!(Arg::Bool(true).to_string(), "true");
	assert_eq!(Arg::ext(1u8).to_string(), "<u8>");
}

#[test]
fn any_kind_accepts_everything() {
	for kind in [ArgKind::Text, ArgKind::Int, ArgKind::Float, ArgKind::Bool, ArgKind::Ext] {
		assert!(ArgKind::Any.accepts(kind));
		assert!(kind.accepts(kind));
	}
	assert!(!ArgKind::Int.accepts(ArgKind::Float));
}
