//! Error types shared across the credential, transport, and renewal layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by the renewal flow and the CLI.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Invalid command-line arguments or credential files.
	#[error(transparent)]
	Usage(#[from] UsageError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, HTTP status).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Malformed XML-RPC envelope or value.
	#[error(transparent)]
	Protocol(#[from] crate::rpc::ProtocolError),
	/// Fault raised by the remote procedure.
	#[error(transparent)]
	Fault(#[from] crate::rpc::Fault),
	/// Formatting the confirmed expiration failed.
	#[error(transparent)]
	Report(#[from] crate::report::ReportError),

	/// Reading the interactive password prompt failed.
	#[error("Unable to read the password prompt.")]
	Prompt {
		/// Underlying terminal read failure.
		#[source]
		source: std::io::Error,
	},
	/// The listing returned no slice to operate on.
	#[error("No slice matches {}.", filter_label(.filter.as_deref()))]
	SliceNotFound {
		/// Slice-name filter sent with the listing call, if any.
		filter: Option<String>,
	},
	/// The update call returned something other than the success sentinel.
	#[error("Unable to renew slice {slice}; the update returned {status}.")]
	RenewalRejected {
		/// Name of the slice the update targeted.
		slice: String,
		/// Status value the server returned instead of `1`.
		status: i64,
	},
}
impl From<crate::rpc::DecodeError> for Error {
	fn from(error: crate::rpc::DecodeError) -> Self {
		match error {
			crate::rpc::DecodeError::Protocol(e) => Self::Protocol(e),
			crate::rpc::DecodeError::Fault(e) => Self::Fault(e),
		}
	}
}

fn filter_label(filter: Option<&str>) -> String {
	match filter {
		Some(name) => format!("the requested name `{name}`"),
		None => "the account's slice listing".to_owned(),
	}
}

/// Command-line and credential-file validation failures.
#[derive(Debug, ThisError)]
pub enum UsageError {
	/// Neither a USER argument nor a readable credentials file was provided.
	#[error("Missing required argument USER and no readable credentials file at {}.", .path.display())]
	MissingUser {
		/// Default credentials file path that was tried.
		path: PathBuf,
	},
	/// The credentials file did not hold the expected three tokens.
	#[error("Malformed credentials file {}; expected one line `user password slice`.", .path.display())]
	MalformedAuthFile {
		/// Path of the offending file.
		path: PathBuf,
	},
	/// An explicitly requested credentials file could not be read.
	#[error("Unable to read credentials file {}.", .path.display())]
	AuthFileUnreadable {
		/// Path of the unreadable file.
		path: PathBuf,
		/// Underlying read failure.
		#[source]
		source: std::io::Error,
	},
	/// No home directory to resolve the default credentials file against.
	#[error("Unable to locate a home directory for the default credentials file.")]
	NoHomeDirectory,
}

/// Configuration and validation failures raised before any remote call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The API endpoint is not a valid URL.
	#[error("Invalid API endpoint URL `{endpoint}`.")]
	InvalidEndpoint {
		/// Endpoint string as given on the command line.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, HTTP status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The endpoint answered with a non-success HTTP status.
	#[error("API endpoint answered with HTTP status {status}.")]
	Status {
		/// Status code of the response.
		status: u16,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn slice_not_found_names_the_filter() {
		let with_filter = Error::SliceNotFound { filter: Some("myslice".to_owned()) };
		let without_filter = Error::SliceNotFound { filter: None };

		assert_eq!(with_filter.to_string(), "No slice matches the requested name `myslice`.");
		assert_eq!(without_filter.to_string(), "No slice matches the account's slice listing.");
	}

	#[test]
	fn renewal_rejected_names_the_slice() {
		let error = Error::RenewalRejected { slice: "myslice".to_owned(), status: 0 };

		assert_eq!(error.to_string(), "Unable to renew slice myslice; the update returned 0.");
	}
}
