use thiserror::Error;

use crate::{Arg, ArgKind};

/// Reasons an argument list does not fit a [`Signature`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
	/// Fewer arguments than the last required parameter needs.
	#[error("expected at least {expected} argument(s), got {got}")]
	TooFewArgs { expected: usize, got: usize },
	/// More arguments than declared parameters.
	#[error("expected at most {max} argument(s), got {got}")]
	TooManyArgs { max: usize, got: usize },
	/// An argument has the wrong kind for its parameter.
	#[error("argument '{param}' expects {expected}, got {got}")]
	KindMismatch {
		param: String,
		expected: ArgKind,
		got: ArgKind,
	},
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
	pub name: String,
	pub kind: ArgKind,
	pub required: bool,
}

impl ParamSpec {
	pub fn required(name: impl Into<String>, kind: ArgKind) -> Self {
		Self {
			name: name.into(),
			kind,
			required: true,
		}
	}

	pub fn optional(name: impl Into<String>, kind: ArgKind) -> Self {
		Self {
			name: name.into(),
			kind,
			required: false,
		}
	}
}

/// Ordered parameter list a command declares for its arguments.
///
/// Gates check the context produced by middleware against this, so a
/// rewriting middleware cannot hand the handler a malformed argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
	params: Vec<ParamSpec>,
}

impl Signature {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a required parameter.
	pub fn required(mut self, name: impl Into<String>, kind: ArgKind) -> Self {
		self.params.push(ParamSpec::required(name, kind));
		self
	}

	/// Appends an optional parameter.
	pub fn optional(mut self, name: impl Into<String>, kind: ArgKind) -> Self {
		self.params.push(ParamSpec::optional(name, kind));
		self
	}

	pub fn params(&self) -> &[ParamSpec] {
		&self.params
	}

	/// Minimum argument count: everything up to the last required parameter.
	pub fn min_args(&self) -> usize {
		self.params.iter().rposition(|p| p.required).map_or(0, |i| i + 1)
	}

	pub fn max_args(&self) -> usize {
		self.params.len()
	}

	/// Checks `args` for arity and per-position kind.
	pub fn check(&self, args: &[Arg]) -> Result<(), SignatureError> {
		let got = args.len();
		if got < self.min_args() {
			return Err(SignatureError::TooFewArgs {
				expected: self.min_args(),
				got,
			});
		}
		if got > self.max_args() {
			return Err(SignatureError::TooManyArgs {
				max: self.max_args(),
				got,
			});
		}
		for (param, arg) in self.params.iter().zip(args) {
			if !param.kind.accepts(arg.kind()) {
				return Err(SignatureError::KindMismatch {
					param: param.name.clone(),
					expected: param.kind,
					got: arg.kind(),
				});
			}
		}
		Ok(())
	}

	/// Renders a usage line such as `ban <user:text> [reason:text]`.
	pub fn usage(&self, command: &str) -> String {
		let mut out = command.to_string();
		for param in &self.params {
			let (open, close) = if param.required { ('<', '>') } else { ('[', ']') };
			out.push(' ');
			out.push(open);
			out.push_str(&param.name);
			if param.kind != ArgKind::Any {
				out.push(':');
				out.push_str(param.kind.as_str());
			}
			out.push(close);
		}
		out
	}
}

impl FromIterator<ParamSpec> for Signature {
	fn from_iter<I: IntoIterator<Item = ParamSpec>>(iter: I) -> Self {
		Self {
			params: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests;
