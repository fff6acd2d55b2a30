use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// One parsed command argument.
///
/// Plain values cover what a command parser produces from message text.
/// [`Arg::Ext`] carries values that middleware resolves and injects, such as
/// a looked-up user or a permission grant.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
	Text(String),
	Int(i64),
	Float(f64),
	Bool(bool),
	/// Type-erased value injected by middleware.
	Ext(Extension),
}

impl Arg {
	/// Returns the runtime kind of this argument.
	pub fn kind(&self) -> ArgKind {
		match self {
			Self::Text(_) => ArgKind::Text,
			Self::Int(_) => ArgKind::Int,
			Self::Float(_) => ArgKind::Float,
			Self::Bool(_) => ArgKind::Bool,
			Self::Ext(_) => ArgKind::Ext,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Downcasts an [`Arg::Ext`] payload.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Self::Ext(ext) => ext.downcast_ref(),
			_ => None,
		}
	}

	/// Wraps `value` as an extension argument.
	pub fn ext<T: Any + Send + Sync>(value: T) -> Self {
		Self::Ext(Extension::new(value))
	}
}

impl fmt::Display for Arg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(s) => f.write_str(s),
			Self::Int(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::Bool(v) => write!(f, "{v}"),
			Self::Ext(ext) => write!(f, "<{}>", ext.type_name()),
		}
	}
}

impl From<&str> for Arg {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for Arg {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<i64> for Arg {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for Arg {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<f64> for Arg {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<bool> for Arg {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<Extension> for Arg {
	fn from(value: Extension) -> Self {
		Self::Ext(value)
	}
}

/// Kind tag for arguments and declared parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
	Text,
	Int,
	Float,
	Bool,
	Ext,
	/// Parameter-only kind that accepts any argument.
	Any,
}

impl ArgKind {
	/// Returns true if an argument of kind `got` satisfies a parameter of this kind.
	pub fn accepts(self, got: ArgKind) -> bool {
		self == Self::Any || self == got
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Int => "int",
			Self::Float => "float",
			Self::Bool => "bool",
			Self::Ext => "ext",
			Self::Any => "any",
		}
	}
}

impl fmt::Display for ArgKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Shared, type-erased argument payload.
///
/// Cloning is cheap; clones point at the same value and compare equal.
#[derive(Clone)]
pub struct Extension {
	value: Arc<dyn Any + Send + Sync>,
	type_name: &'static str,
}

impl Extension {
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self {
			value: Arc::new(value),
			type_name: std::any::type_name::<T>(),
		}
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.value.downcast_ref::<T>()
	}

	pub fn is<T: Any>(&self) -> bool {
		self.value.is::<T>()
	}

	/// Name of the wrapped type, for diagnostics.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}
}

impl fmt::Debug for Extension {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Extension").field(&self.type_name).finish()
	}
}

impl PartialEq for Extension {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.value, &other.value)
	}
}

#[cfg(test)]
mod tests;
