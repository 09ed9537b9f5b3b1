//! Typed PLCAPI client over the RPC transport seam.

// self
use crate::{
	_prelude::*,
	auth::PasswordAuth,
	http::RpcTransport,
	rpc::{self, Value},
	slice::{Slice, SliceUpdate},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Authenticated PLCAPI client bound to a single endpoint.
///
/// Constructed once with the endpoint URL and credentials; every remote call
/// sends the auth payload as its first positional parameter. Faults and
/// transport failures propagate unmodified, with no retry.
pub struct PlcApi<C>
where
	C: RpcTransport + ?Sized,
{
	endpoint: Url,
	auth: PasswordAuth,
	transport: Arc<C>,
}
impl<C> PlcApi<C>
where
	C: RpcTransport + ?Sized,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		endpoint: Url,
		auth: PasswordAuth,
		transport: impl Into<Arc<C>>,
	) -> Self {
		Self { endpoint, auth, transport: transport.into() }
	}

	/// Endpoint this client is bound to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Lists slices visible to the account, optionally filtered to one name.
	///
	/// The server's ordering is preserved; callers relying on "the first
	/// slice" get exactly what the listing returned first.
	pub async fn get_slices(&self, filter: Option<&str>) -> Result<Vec<Slice>> {
		let mut params = vec![self.auth.to_value()];

		if let Some(name) = filter {
			params.push(Value::Array(vec![Value::from(name)]));
		}

		let result = self.call("GetSlices", &params).await?;
		let items = result
			.as_array()
			.ok_or(rpc::ProtocolError::UnexpectedType { name: "GetSlices result" })?;

		items.iter().map(Slice::from_value).collect::<Result<Vec<_>, _>>().map_err(Error::from)
	}

	/// Applies `update` to the named slice, returning the server's raw status
	/// value.
	pub async fn update_slice(&self, name: &str, update: &SliceUpdate) -> Result<i64> {
		let params = [self.auth.to_value(), Value::from(name), update.to_value()];
		let result = self.call("UpdateSlice", &params).await?;

		result
			.as_i64()
			.ok_or_else(|| rpc::ProtocolError::UnexpectedType { name: "UpdateSlice result" }.into())
	}

	async fn call(&self, method: &'static str, params: &[Value]) -> Result<Value> {
		let body = rpc::encode_request(method, params);

		tracing::debug!(method, endpoint = %self.endpoint, "calling remote procedure");

		let response = self.transport.post_xml(&self.endpoint, body).await?;
		let value = rpc::decode_response(&response)?;

		Ok(value)
	}
}
#[cfg(feature = "reqwest")]
impl PlcApi<ReqwestTransport> {
	/// Creates a client backed by the bundled reqwest transport.
	pub fn new(endpoint: Url, auth: PasswordAuth) -> Self {
		Self::with_transport(endpoint, auth, ReqwestTransport::default())
	}
}
impl<C> Clone for PlcApi<C>
where
	C: RpcTransport + ?Sized,
{
	fn clone(&self) -> Self {
		Self {
			endpoint: self.endpoint.clone(),
			auth: self.auth.clone(),
			transport: Arc::clone(&self.transport),
		}
	}
}
impl<C> Debug for PlcApi<C>
where
	C: RpcTransport + ?Sized,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PlcApi")
			.field("endpoint", &self.endpoint)
			.field("username", &self.auth.username)
			.finish()
	}
}
