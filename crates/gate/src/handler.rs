//! Base handler services that gates wrap.

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use tower_service::Service;
use warden_invocation::Invocation;
use warden_primitives::BoxFutureSend;

use crate::rejection::Outcome;

/// A bot command's own logic, run once every gate has passed.
#[async_trait]
pub trait Command<M>: Send + Sync + 'static {
	type Output: Send + 'static;

	/// Runs the command with the invocation every gate agreed on.
	async fn execute(&self, invocation: Invocation<M>) -> Self::Output;
}

/// Service that runs a shared [`Command`] instance.
///
/// Every call goes to the same instance, so state the command keeps is
/// visible across invocations.
pub struct CommandService<C> {
	command: Arc<C>,
}

impl<C> CommandService<C> {
	/// Wraps an owned command instance.
	pub fn new(command: C) -> Self {
		Self::from_arc(Arc::new(command))
	}

	/// Wraps a command instance the caller keeps a handle to.
	pub fn from_arc(command: Arc<C>) -> Self {
		Self { command }
	}

	/// The shared command instance.
	pub fn command(&self) -> &Arc<C> {
		&self.command
	}
}

impl<C> Clone for CommandService<C> {
	fn clone(&self) -> Self {
		Self {
			command: Arc::clone(&self.command),
		}
	}
}

impl<C, M> Service<Invocation<M>> for CommandService<C>
where
	C: Command<M>,
	M: Send + 'static,
{
	type Response = Outcome<C::Output>;
	type Error = Infallible;
	type Future = BoxFutureSend<'static, Result<Self::Response, Infallible>>;

	fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, invocation: Invocation<M>) -> Self::Future {
		let command = Arc::clone(&self.command);
		Box::pin(async move { Ok(Outcome::Completed(command.execute(invocation).await)) })
	}
}

/// Service built from an async closure. See [`handler_fn`].
pub struct HandlerFn<F> {
	f: Arc<F>,
}

impl<F> Clone for HandlerFn<F> {
	fn clone(&self) -> Self {
		Self { f: Arc::clone(&self.f) }
	}
}

/// Wraps an async closure as a handler service.
pub fn handler_fn<M, F, Fut>(f: F) -> HandlerFn<F>
where
	F: Fn(Invocation<M>) -> Fut,
	Fut: Future,
{
	HandlerFn { f: Arc::new(f) }
}

impl<F, Fut, M, R> Service<Invocation<M>> for HandlerFn<F>
where
	F: Fn(Invocation<M>) -> Fut,
	Fut: Future<Output = R> + Send + 'static,
{
	type Response = Outcome<R>;
	type Error = Infallible;
	type Future = BoxFutureSend<'static, Result<Outcome<R>, Infallible>>;

	fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, invocation: Invocation<M>) -> Self::Future {
		let fut = (self.f)(invocation);
		Box::pin(async move { Ok(Outcome::Completed(fut.await)) })
	}
}

/// Waits for `service` to become ready, then calls it once.
pub async fn call_ready<S, Req>(service: &mut S, request: Req) -> Result<S::Response, S::Error>
where
	S: Service<Req>,
{
	std::future::poll_fn(|cx| service.poll_ready(cx)).await?;
	service.call(request).await
}
