//! Middleware gates for bot commands.
//!
//! A [`Gate`] runs one [`Middleware`] in front of a handler service. The
//! middleware receives the [`Invocation`](warden_invocation::Invocation) (the
//! triggering message plus parsed arguments) and either hands back a possibly
//! rewritten invocation, which is forwarded to the handler, or a
//! [`Rejection`], which halts the call before the handler runs.
//!
//! Gates are ordinary [`tower_service::Service`]s built by a [`GateLayer`],
//! so they nest: wrapping a gate in another gate puts the new middleware in
//! front, and a halt anywhere stops every gate further in as well as the
//! handler. [`Chain`] declares a stack of gates in execution order.
//!
//! Halting is not an error. A halted call resolves to [`Outcome::Halted`]
//! and, under the default [`RejectionPolicy::Silent`], is only visible at
//! `debug` log level. [`GateLayer::report_to`] forwards rejections to a
//! [`RejectionSink`] so the bot can tell the user why nothing happened.
//!
//! Middleware failures are all absorbed the same way: an `Err`, a panic, a
//! timeout set with [`GateLayer::timeout`], or arguments that no longer fit
//! the [`Signature`](warden_invocation::Signature) given to
//! [`GateLayer::signature`].

mod chain;
mod gate;
mod handler;
mod middleware;
mod rejection;

pub use chain::Chain;
pub use gate::{Gate, GateLayer};
pub use handler::{Command, CommandService, HandlerFn, call_ready, handler_fn};
pub use middleware::{FromFn, FromSyncFn, Middleware, PassThrough, from_fn, from_sync_fn};
pub use rejection::{ChannelSink, Outcome, Rejection, RejectionNotice, RejectionSink};
pub use warden_registry::{GateSettings, RejectionPolicy};
