use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use warden_invocation::Invocation;

use crate::rejection::Rejection;

/// A guard or transform that runs before a command handler.
///
/// Returning `Ok` passes the (possibly rewritten) invocation on to the next
/// gate or the handler. Returning `Err` halts the chain.
#[async_trait]
pub trait Middleware<M>: Send + Sync + 'static {
	async fn handle(&self, invocation: Invocation<M>) -> Result<Invocation<M>, Rejection>;

	/// Name used in logs and rejection notices.
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}
}

#[async_trait]
impl<M, T> Middleware<M> for Arc<T>
where
	M: Send + 'static,
	T: Middleware<M> + ?Sized,
{
	async fn handle(&self, invocation: Invocation<M>) -> Result<Invocation<M>, Rejection> {
		(**self).handle(invocation).await
	}

	fn name(&self) -> &str {
		(**self).name()
	}
}

/// Middleware built from an async closure. See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
	f: F,
	name: &'static str,
}

/// Middleware built from a synchronous closure. See [`from_sync_fn`].
#[derive(Clone)]
pub struct FromSyncFn<F> {
	f: F,
	name: &'static str,
}

/// Wraps an async closure as middleware.
///
/// ```
/// use warden_gate::{Rejection, from_fn};
/// use warden_invocation::Invocation;
///
/// let require_args = from_fn(|inv: Invocation<String>| async move {
/// 	if inv.args.is_empty() {
/// 		Err(Rejection::deny("missing arguments"))
/// 	} else {
/// 		Ok(inv)
/// 	}
/// });
/// ```
pub fn from_fn<M, F, Fut>(f: F) -> FromFn<F>
where
	F: Fn(Invocation<M>) -> Fut,
	Fut: Future<Output = Result<Invocation<M>, Rejection>>,
{
	FromFn {
		f,
		name: std::any::type_name::<F>(),
	}
}

/// Wraps a synchronous closure as middleware.
pub fn from_sync_fn<M, F>(f: F) -> FromSyncFn<F>
where
	F: Fn(Invocation<M>) -> Result<Invocation<M>, Rejection>,
{
	FromSyncFn {
		f,
		name: std::any::type_name::<F>(),
	}
}

impl<F> FromFn<F> {
	/// Replaces the closure's type name in logs.
	pub fn named(mut self, name: &'static str) -> Self {
		self.name = name;
		self
	}
}

impl<F> FromSyncFn<F> {
	pub fn named(mut self, name: &'static str) -> Self {
		self.name = name;
		self
	}
}

#[async_trait]
impl<M, F, Fut> Middleware<M> for FromFn<F>
where
	M: Send + 'static,
	F: Fn(Invocation<M>) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Invocation<M>, Rejection>> + Send + 'static,
{
	async fn handle(&self, invocation: Invocation<M>) -> Result<Invocation<M>, Rejection> {
		(self.f)(invocation).await
	}

	fn name(&self) -> &str {
		self.name
	}
}

#[async_trait]
impl<M, F> Middleware<M> for FromSyncFn<F>
where
	M: Send + 'static,
	F: Fn(Invocation<M>) -> Result<Invocation<M>, Rejection> + Send + Sync + 'static,
{
	async fn handle(&self, invocation: Invocation<M>) -> Result<Invocation<M>, Rejection> {
		(self.f)(invocation)
	}

	fn name(&self) -> &str {
		self.name
	}
}

/// Passes every invocation through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

#[async_trait]
impl<M: Send + 'static> Middleware<M> for PassThrough {
	async fn handle(&self, invocation: Invocation<M>) -> Result<Invocation<M>, Rejection> {
		Ok(invocation)
	}

	fn name(&self) -> &str {
		"pass_through"
	}
}
