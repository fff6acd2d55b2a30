use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use warden_invocation::SignatureError;

/// Why a gate halted an invocation.
///
/// Rejections never surface as service errors; a gate turns them into
/// [`Outcome::Halted`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
	/// Middleware vetoed the call with a reason meant for the caller.
	#[error("denied: {reason}")]
	Denied { reason: String },
	/// Middleware failed for an internal reason.
	#[error("middleware failed: {0}")]
	Failed(String),
	/// Middleware panicked.
	#[error("middleware panicked: {0}")]
	Panicked(String),
	/// Middleware did not settle within the gate's timeout.
	#[error("middleware timed out after {0:?}")]
	TimedOut(Duration),
	/// Middleware produced arguments that do not fit the command's signature.
	#[error("malformed invocation: {0}")]
	Malformed(#[from] SignatureError),
}

impl Rejection {
	/// Vetoes the call with a reason for the caller.
	pub fn deny(reason: impl Into<String>) -> Self {
		Self::Denied { reason: reason.into() }
	}

	/// Wraps an internal middleware error.
	pub fn failed(error: impl fmt::Display) -> Self {
		Self::Failed(error.to_string())
	}
}

/// Result of calling a gated handler.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Outcome<R> {
	/// Every gate passed and the handler ran.
	Completed(R),
	/// A gate halted the call; the handler never ran.
	Halted(Rejection),
}

impl<R> Outcome<R> {
	/// Whether the handler ran.
	pub fn is_completed(&self) -> bool {
		matches!(self, Self::Completed(_))
	}

	/// Whether a gate halted the call.
	pub fn is_halted(&self) -> bool {
		matches!(self, Self::Halted(_))
	}

	/// The handler's result, or `None` if the call was halted.
	pub fn into_completed(self) -> Option<R> {
		match self {
			Self::Completed(value) => Some(value),
			Self::Halted(_) => None,
		}
	}

	/// The rejection that halted the call.
	pub fn rejection(&self) -> Option<&Rejection> {
		match self {
			Self::Completed(_) => None,
			Self::Halted(rejection) => Some(rejection),
		}
	}

	/// Converts into a `Result`, with the rejection as the error.
	pub fn into_result(self) -> Result<R, Rejection> {
		match self {
			Self::Completed(value) => Ok(value),
			Self::Halted(rejection) => Err(rejection),
		}
	}

	/// Maps the handler's result, keeping a rejection as is.
	pub fn map<U>(self, f: impl FnOnce(R) -> U) -> Outcome<U> {
		match self {
			Self::Completed(value) => Outcome::Completed(f(value)),
			Self::Halted(rejection) => Outcome::Halted(rejection),
		}
	}
}

/// A rejection forwarded to a [`RejectionSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionNotice {
	/// Command the gate guards, if the gate was told.
	pub command: Option<String>,
	/// Name of the middleware that halted the call.
	pub gate: String,
	/// Why the call was halted.
	pub rejection: Rejection,
}

/// Receives rejections from gates running under [`RejectionPolicy::Report`](crate::RejectionPolicy::Report).
pub trait RejectionSink: Send + Sync + 'static {
	/// Called once per halted invocation, from the task that ran the gate.
	fn notify(&self, notice: RejectionNotice);
}

impl<F> RejectionSink for F
where
	F: Fn(RejectionNotice) + Send + Sync + 'static,
{
	fn notify(&self, notice: RejectionNotice) {
		self(notice)
	}
}

/// Forwards notices over an unbounded channel, e.g. to a task that replies in chat.
#[derive(Debug, Clone)]
pub struct ChannelSink {
	tx: mpsc::UnboundedSender<RejectionNotice>,
}

impl ChannelSink {
	/// Sends notices on `tx`.
	pub fn new(tx: mpsc::UnboundedSender<RejectionNotice>) -> Self {
		Self { tx }
	}

	/// Creates a sink and the receiver it feeds.
	pub fn channel() -> (Self, mpsc::UnboundedReceiver<RejectionNotice>) {
		let (tx, rx) = mpsc::unbounded_channel();
		(Self { tx }, rx)
	}
}

impl RejectionSink for ChannelSink {
	fn notify(&self, notice: RejectionNotice) {
		if self.tx.send(notice).is_err() {
			tracing::warn!("rejection receiver dropped, discarding notice");
		}
	}
}
