use tower_layer::{Identity, Layer, Stack};

use crate::gate::GateLayer;
use crate::handler::CommandService;
use crate::middleware::Middleware;

/// Declares a command's gates in execution order.
///
/// The first gate added runs first and wraps everything added after it,
/// the same nesting as `tower::ServiceBuilder`:
///
/// ```
/// use warden_gate::{Chain, Rejection, from_sync_fn, handler_fn};
/// use warden_invocation::Invocation;
///
/// let service = Chain::new()
/// 	.middleware(from_sync_fn(|inv: Invocation<()>| Ok(inv)))
/// 	.middleware(from_sync_fn(|_: Invocation<()>| Err(Rejection::deny("closed"))))
/// 	.service(handler_fn(|_inv: Invocation<()>| async { "ran" }));
/// # let _ = service;
/// ```
#[derive(Debug, Clone)]
pub struct Chain<L> {
	layer: L,
}

impl Default for Chain<Identity> {
	fn default() -> Self {
		Self::new()
	}
}

impl Chain<Identity> {
	/// An empty chain; services pass through unwrapped.
	pub fn new() -> Self {
		Self { layer: Identity::new() }
	}
}

impl<L> Chain<L> {
	/// Adds a configured gate inside the gates added so far.
	pub fn gate<M: 'static>(self, gate: GateLayer<M>) -> Chain<Stack<GateLayer<M>, L>> {
		self.layer(gate)
	}

	/// Adds a gate running `middleware` with default options.
	pub fn middleware<M: 'static>(self, middleware: impl Middleware<M>) -> Chain<Stack<GateLayer<M>, L>> {
		self.gate(GateLayer::new(middleware))
	}

	/// Adds any other `tower` layer at this position.
	pub fn layer<T>(self, layer: T) -> Chain<Stack<T, L>> {
		Chain {
			layer: Stack::new(layer, self.layer),
		}
	}

	/// Wraps `service` in every declared gate.
	pub fn service<S>(&self, service: S) -> L::Service
	where
		L: Layer<S>,
	{
		self.layer.layer(service)
	}

	/// Wraps a command instance in every declared gate.
	pub fn command<C>(&self, command: C) -> L::Service
	where
		L: Layer<CommandService<C>>,
	{
		self.service(CommandService::new(command))
	}

	/// The composed layer.
	pub fn into_inner(self) -> L {
		self.layer
	}
}
