//! Canonical invocation context for warden commands.
//!
//! Every command call, gated or not, is expressed as an [`Invocation`]: the
//! opaque transport message that triggered it plus the already-parsed,
//! typed argument list. Middleware consumes one invocation and hands the
//! next step a (possibly rewritten) one.

mod arg;
mod signature;

pub use arg::{Arg, ArgKind, Extension};
pub use signature::{ParamSpec, Signature, SignatureError};

/// Builds a `Vec<Arg>` from heterogeneous values convertible into [`Arg`].
///
/// ```
/// use warden_invocation::{Arg, args};
///
/// let args = args!["target", 3, true];
/// assert_eq!(args[1], Arg::Int(3));
/// ```
#[macro_export]
macro_rules! args {
	() => {
		::std::vec::Vec::<$crate::Arg>::new()
	};
	($($value:expr),+ $(,)?) => {
		::std::vec![$($crate::Arg::from($value)),+]
	};
}

/// The `(message, args)` pair flowing through a middleware chain.
///
/// `M` is the chat transport's message type. It is never inspected here;
/// middleware may replace it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation<M> {
	/// Message that triggered the command.
	pub message: M,
	/// Parsed arguments in declaration order.
	pub args: Vec<Arg>,
}

impl<M> Invocation<M> {
	/// Creates an invocation from a message and its parsed arguments.
	pub fn new(message: M, args: Vec<Arg>) -> Self {
		Self { message, args }
	}

	/// Creates an invocation with no arguments.
	pub fn bare(message: M) -> Self {
		Self::new(message, Vec::new())
	}

	/// Splits the invocation back into its message and arguments.
	pub fn into_parts(self) -> (M, Vec<Arg>) {
		(self.message, self.args)
	}

	/// Returns the argument at `index`, if present.
	pub fn arg(&self, index: usize) -> Option<&Arg> {
		self.args.get(index)
	}

	/// Replaces the argument list, keeping the message.
	pub fn with_args(self, args: Vec<Arg>) -> Self {
		Self { message: self.message, args }
	}

	/// Appends one argument.
	pub fn push_arg(&mut self, arg: impl Into<Arg>) {
		self.args.push(arg.into());
	}

	/// Returns the first injected extension of type `T`, searching every argument.
	pub fn extension<T: std::any::Any>(&self) -> Option<&T> {
		self.args.iter().find_map(Arg::downcast_ref::<T>)
	}

	/// Converts the message while keeping the arguments.
	pub fn map_message<N>(self, f: impl FnOnce(M) -> N) -> Invocation<N> {
		Invocation {
			message: f(self.message),
			args: self.args,
		}
	}

	/// Checks the arguments against a declared signature.
	pub fn validate(&self, signature: &Signature) -> Result<(), SignatureError> {
		signature.check(&self.args)
	}

	/// Short argument summary for tracing.
	pub fn describe_args(&self) -> String {
		let parts: Vec<String> = self.args.iter().map(Arg::to_string).collect();
		parts.join(" ")
	}
}

impl<M> From<(M, Vec<Arg>)> for Invocation<M> {
	fn from((message, args): (M, Vec<Arg>)) -> Self {
		Self::new(message, args)
	}
}

impl<M> From<Invocation<M>> for (M, Vec<Arg>) {
	fn from(invocation: Invocation<M>) -> Self {
		invocation.into_parts()
	}
}

#[cfg(test)]
mod tests;
