//! Renews a PlanetLab slice through the PLCAPI XML-RPC interface—resolve
//! credentials, extend the expiration, and confirm the write in one pass.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
#[cfg(feature = "reqwest")] pub mod cli;
pub mod cred;
pub mod error;
pub mod http;
pub mod renew;
pub mod report;
pub mod rpc;
pub mod slice;
#[cfg(feature = "reqwest")]
pub mod _preludet {
	//! Convenience re-exports and helpers for the crate's integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{api::PlcApi, auth::PasswordAuth, http::ReqwestTransport};

	/// Client wired to a mock endpoint for integration tests.
	pub fn test_api(endpoint: &str) -> PlcApi<ReqwestTransport> {
		let endpoint = Url::parse(endpoint).expect("Failed to parse mock endpoint URL.");

		PlcApi::with_transport(
			endpoint,
			PasswordAuth::new("pl_user", "pl_password"),
			ReqwestTransport::default(),
		)
	}

	/// Renders a `GetSlices` response listing the given name/expires pairs.
	pub fn slices_response(slices: &[(&str, i64)]) -> String {
		let mut body = String::from(
			"<?xml version=\"1.0\"?><methodResponse><params><param><value><array><data>",
		);

		for (name, expires) in slices {
			body.push_str(&format!(
				"<value><struct>\
				<member><name>name</name><value><string>{name}</string></value></member>\
				<member><name>expires</name><value><int>{expires}</int></value></member>\
				</struct></value>",
			));
		}
		body.push_str("</data></array></value></param></params></methodResponse>");

		body
	}

	/// Renders an integer response, e.g. the `UpdateSlice` status.
	pub fn int_response(status: i64) -> String {
		format!(
			"<?xml version=\"1.0\"?><methodResponse><params><param>\
			<value><int>{status}</int></value></param></params></methodResponse>",
		)
	}

	/// Renders a `<fault>` response envelope.
	pub fn fault_response(code: i64, message: &str) -> String {
		format!(
			"<methodResponse><fault><value><struct>\
			<member><name>faultCode</name><value><int>{code}</int></value></member>\
			<member><name>faultString</name><value><string>{message}</string></value></member>\
			</struct></value></fault></methodResponse>",
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		path::PathBuf,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime, UtcOffset};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
#[cfg(not(feature = "reqwest"))]
use {clap as _, rpassword as _, tokio as _, tracing_subscriber as _};
