//! Transport seam used to deliver XML-RPC envelopes.
//!
//! [`RpcTransport`] is the crate's only dependency on an HTTP stack. The
//! bundled [`ReqwestTransport`] covers the default case; tests and downstream
//! callers can substitute any implementation that can POST a `text/xml` body
//! and hand back the response text.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::CONTENT_TYPE;
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`RpcTransport`] implementations.
pub type TransportFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Transport contract for delivering XML-RPC envelopes to an endpoint.
pub trait RpcTransport
where
	Self: 'static + Send + Sync,
{
	/// POSTs `body` as `text/xml` and returns the raw response body.
	fn post_xml<'a>(&'a self, endpoint: &'a Url, body: String) -> TransportFuture<'a, String>;
}

#[cfg(feature = "reqwest")]
/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. The API applies no retry or backoff of its own; a request either
/// completes or surfaces its transport failure to the caller.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a transport whose requests abort after `timeout`.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().timeout(timeout).build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl RpcTransport for ReqwestTransport {
	fn post_xml<'a>(&'a self, endpoint: &'a Url, body: String) -> TransportFuture<'a, String> {
		Box::pin(async move {
			let response = self
				.0
				.post(endpoint.clone())
				.header(CONTENT_TYPE, "text/xml")
				.body(body)
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status();

			if !status.is_success() {
				return Err(TransportError::Status { status: status.as_u16() });
			}

			response.text().await.map_err(TransportError::from)
		})
	}
}
