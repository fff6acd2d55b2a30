//! The gate service and its layer.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::FutureExt;
use tower_layer::Layer;
use tower_service::Service;
use tracing::Instrument;
use warden_invocation::{Invocation, Signature};
use warden_primitives::BoxFutureSend;
use warden_registry::{CommandDescriptor, GateSettings, RejectionPolicy};

use crate::middleware::Middleware;
use crate::rejection::{Outcome, Rejection, RejectionNotice, RejectionSink};

#[derive(Clone, Default)]
struct GateOptions {
	command: Option<String>,
	timeout: Option<Duration>,
	signature: Option<Signature>,
	policy: RejectionPolicy,
	sink: Option<Arc<dyn RejectionSink>>,
}

impl GateOptions {
	fn halt(&self, gate: &str, rejection: &Rejection) {
		match self.policy {
			RejectionPolicy::Silent => {
				tracing::debug!(%rejection, "invocation halted");
			}
			RejectionPolicy::Report => {
				tracing::info!(%rejection, "invocation halted");
				if let Some(sink) = &self.sink {
					sink.notify(RejectionNotice {
						command: self.command.clone(),
						gate: gate.to_string(),
						rejection: rejection.clone(),
					});
				}
			}
		}
	}
}

/// Builds [`Gate`]s around handler services.
///
/// Every gate produced by one layer shares its middleware and options.
pub struct GateLayer<M> {
	middleware: Arc<dyn Middleware<M>>,
	options: Arc<GateOptions>,
}

impl<M> Clone for GateLayer<M> {
	fn clone(&self) -> Self {
		Self {
			middleware: Arc::clone(&self.middleware),
			options: Arc::clone(&self.options),
		}
	}
}

impl<M: 'static> std::fmt::Debug for GateLayer<M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GateLayer")
			.field("middleware", &self.middleware.name())
			.field("command", &self.options.command)
			.field("timeout", &self.options.timeout)
			.field("policy", &self.options.policy)
			.finish()
	}
}

impl<M: 'static> GateLayer<M> {
	/// Creates a layer running `middleware` with default options.
	pub fn new(middleware: impl Middleware<M>) -> Self {
		Self::from_arc(Arc::new(middleware))
	}

	/// Shares one middleware instance across several layers.
	pub fn from_arc(middleware: Arc<dyn Middleware<M>>) -> Self {
		Self {
			middleware,
			options: Arc::new(GateOptions::default()),
		}
	}

	fn options_mut(&mut self) -> &mut GateOptions {
		Arc::make_mut(&mut self.options)
	}

	/// Names the command this gate guards, for logs and notices.
	pub fn command(mut self, name: impl Into<String>) -> Self {
		self.options_mut().command = Some(name.into());
		self
	}

	/// Takes the guarded command's name from its descriptor.
	pub fn for_descriptor(self, descriptor: &CommandDescriptor) -> Self {
		self.command(descriptor.name())
	}

	/// Bounds the middleware call. Requires a tokio runtime with the time driver.
	pub fn timeout(mut self, limit: Duration) -> Self {
		self.options_mut().timeout = Some(limit);
		self
	}

	/// Rejects rewritten invocations that do not fit `signature`.
	pub fn signature(mut self, signature: Signature) -> Self {
		self.options_mut().signature = Some(signature);
		self
	}

	/// Sets how halted invocations are surfaced.
	pub fn policy(mut self, policy: RejectionPolicy) -> Self {
		self.options_mut().policy = policy;
		self
	}

	/// Reports rejections to `sink` and switches to [`RejectionPolicy::Report`].
	pub fn report_to(mut self, sink: impl RejectionSink) -> Self {
		let options = self.options_mut();
		options.sink = Some(Arc::new(sink));
		options.policy = RejectionPolicy::Report;
		self
	}

	/// Applies the `[gate]` config table.
	pub fn configure(mut self, settings: &GateSettings) -> Self {
		let options = self.options_mut();
		options.timeout = settings.timeout().or(options.timeout);
		if let Some(policy) = settings.on_rejection {
			options.policy = policy;
		}
		self
	}

	/// Name of the wrapped middleware.
	pub fn middleware_name(&self) -> &str {
		self.middleware.name()
	}
}

impl<S, M: 'static> Layer<S> for GateLayer<M> {
	type Service = Gate<S, M>;

	fn layer(&self, inner: S) -> Self::Service {
		Gate {
			inner,
			middleware: Arc::clone(&self.middleware),
			options: Arc::clone(&self.options),
		}
	}
}

/// Runs one middleware ahead of an inner service.
///
/// If the middleware passes, the inner service is called with the
/// invocation the middleware returned. If it fails, the inner service is
/// never called and the gate resolves to [`Outcome::Halted`]. Wrapping a gate
/// in another gate puts the new middleware in front.
pub struct Gate<S, M> {
	inner: S,
	middleware: Arc<dyn Middleware<M>>,
	options: Arc<GateOptions>,
}

impl<S, M: 'static> Gate<S, M> {
	/// Wraps `inner` with `middleware` using default options.
	pub fn new(inner: S, middleware: impl Middleware<M>) -> Self {
		GateLayer::new(middleware).layer(inner)
	}

	/// The wrapped service.
	pub fn get_ref(&self) -> &S {
		&self.inner
	}

	/// Unwraps the gate, dropping its middleware.
	pub fn into_inner(self) -> S {
		self.inner
	}
}

impl<S: Clone, M> Clone for Gate<S, M> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
			middleware: Arc::clone(&self.middleware),
			options: Arc::clone(&self.options),
		}
	}
}

impl<S, M: 'static> std::fmt::Debug for Gate<S, M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Gate")
			.field("middleware", &self.middleware.name())
			.field("command", &self.options.command)
			.finish_non_exhaustive()
	}
}

impl<S, M, R> Service<Invocation<M>> for Gate<S, M>
where
	S: Service<Invocation<M>, Response = Outcome<R>> + Clone + Send + 'static,
	S::Future: Send + 'static,
	S::Error: Send + 'static,
	M: Send + 'static,
	R: Send + 'static,
{
	type Response = Outcome<R>;
	type Error = S::Error;
	type Future = BoxFutureSend<'static, Result<Outcome<R>, S::Error>>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, invocation: Invocation<M>) -> Self::Future {
		// Take the service that was driven to readiness, leave a clone behind.
		let clone = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, clone);
		let middleware = Arc::clone(&self.middleware);
		let options = Arc::clone(&self.options);
		let span = tracing::debug_span!(
			"gate",
			gate = middleware.name(),
			command = options.command.as_deref().unwrap_or("-")
		);

		Box::pin(
			async move {
				match run_middleware(middleware.as_ref(), &options, invocation).await {
					Ok(invocation) => {
						tracing::trace!(args = %invocation.describe_args(), "middleware passed");
						inner.call(invocation).await
					}
					Err(rejection) => {
						options.halt(middleware.name(), &rejection);
						Ok(Outcome::Halted(rejection))
					}
				}
			}
			.instrument(span),
		)
	}
}

async fn run_middleware<M: Send + 'static>(
	middleware: &dyn Middleware<M>,
	options: &GateOptions,
	invocation: Invocation<M>,
) -> Result<Invocation<M>, Rejection> {
	let guarded = AssertUnwindSafe(middleware.handle(invocation)).catch_unwind();
	let settled = match options.timeout {
		Some(limit) => tokio::time::timeout(limit, guarded)
			.await
			.map_err(|_| Rejection::TimedOut(limit))?,
		None => guarded.await,
	};
	let invocation = settled.map_err(|payload| Rejection::Panicked(panic_message(payload.as_ref())))??;
	if let Some(signature) = &options.signature {
		invocation.validate(signature)?;
	}
	Ok(invocation)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		(*s).to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"unknown panic payload".to_string()
	}
}
