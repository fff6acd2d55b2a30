use rstest::rstest;

use super::*;
use crate::args;

fn ban_signature() -> Signature {
	Signature::new()
		.required("user", ArgKind::Text)
		.optional("days", ArgKind::Int)
}

#[rstest]
#[case(args!["bob"])]
#[case(args!["bob", 3])]
fn accepts_conforming_args(#[case] args: Vec<Arg>) {
	assert_eq!(ban_signature().check(&args), Ok(()));
}

#[test]
fn rejects_missing_required() {
	assert_eq!(
		ban_signature().check(&[]),
		Err(SignatureError::TooFewArgs { expected: 1, got: 0 })
	);
}

#[test]
fn rejects_extra_args() {
	assert_eq!(
		ban_signature().check(&args!["bob", 3, "extra"]),
		Err(SignatureError::TooManyArgs { max: 2, got: 3 })
	);
}

#[test]
fn rejects_wrong_kind() {
	assert_eq!(
		ban_signature().check(&args!["bob", "three"]),
		Err(SignatureError::KindMismatch {
			param: "days".into(),
			expected: ArgKind::Int,
			got: ArgKind::Text,
		})
	);
}

#[test]
fn required_after_optional_raises_minimum() {
	let sig = Signature::new()
		.optional("a", ArgKind::Any)
		.required("b", ArgKind::Any);
	assert_eq!(sig.min_args(), 2);
	assert_eq!(sig.max_args(), 2);
}

#[test]
fn empty_signature_takes_no_args() {
	let sig = Signature::new();
	assert_eq!(sig.check(&[]), Ok(()));
	assert!(sig.check(&args![1]).is_err());
}

#[test]
fn usage_line() {
	let sig = ban_signature().optional("note", ArgKind::Any);
	assert_eq!(sig.usage("ban"), "ban <user:text> [days:int] [note]");
}

#[test]
fn collects_from_param_specs() {
	let sig: Signature = [ParamSpec::required("x", ArgKind::Bool)].into_iter().collect();
	assert_eq!(sig.params().len(), 1);
	assert_eq!(sig.min_args(), 1);
}
