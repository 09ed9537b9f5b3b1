//! Command-line surface and run loop for the `slice-renew` binary.

// std
use std::io::ErrorKind;
// crates.io
use clap::Parser;
use tracing_subscriber::EnvFilter;
// self
use crate::{
	_prelude::*,
	api::PlcApi,
	auth::PasswordAuth,
	cred::{self, AuthFile},
	error::{ConfigError, UsageError},
	http::ReqwestTransport,
	renew::{PLCAPI_URL, RENEW_DAYS_DEFAULT, RenewalRequest},
	report,
	slice::Slice,
};

const ABOUT: &str = "Renews a PlanetLab slice through the PLCAPI.\n\n\
	USER is a PLC user name or a path to a file containing it. The password is \
	prompted for when not given on the command line. Some slice is renewed when \
	no slice is specified.";

/// Command-line options for the `slice-renew` binary.
#[derive(Clone, Debug, Parser)]
#[command(name = "slice-renew", about = ABOUT)]
pub struct Opts {
	/// PLC user, or path to a file containing the PLC user.
	pub user: Option<String>,
	/// PLCAPI URL.
	#[arg(short, long, default_value = PLCAPI_URL)]
	pub url: String,
	/// PLC password, or path to a file containing the PLC password; prompts
	/// when omitted.
	#[arg(short, long)]
	pub password: Option<String>,
	/// Slice name; some slice the account can see is renewed when omitted.
	#[arg(short, long)]
	pub slice: Option<String>,
	/// Days to renew for.
	#[arg(
		short,
		long,
		default_value_t = RENEW_DAYS_DEFAULT,
		value_parser = clap::value_parser!(i64).range(1..),
	)]
	pub days: i64,
	/// Credentials file holding `user password slice`; consulted when USER is
	/// omitted.
	#[arg(short, long)]
	pub file: Option<PathBuf>,
	/// Request timeout in seconds; 0 disables the timeout.
	#[arg(long, default_value_t = 60)]
	pub timeout: u64,
}

/// How a run ended, short of an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
	/// The slice was renewed; carries the confirmed record.
	Renewed(Slice),
	/// The user cancelled the password prompt; nothing was attempted.
	PromptCancelled,
}

/// Resolved credentials plus the slice they designate, if any.
#[derive(Clone, Debug)]
struct ResolvedCredentials {
	user: String,
	password: String,
	slice: Option<String>,
}

/// Installs the stderr tracing subscriber honoring `RUST_LOG`.
///
/// Logs go to stderr; stdout is reserved for the single result line.
pub fn init_tracing() {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slice_renew=warn"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(false)
		.init();
}

/// Runs one renewal using `opts`, printing the result line on success.
///
/// Returns [`Outcome::PromptCancelled`] without touching the network when the
/// user declines the password prompt.
pub async fn run(opts: Opts, local_offset: UtcOffset) -> Result<Outcome> {
	let Some(credentials) = resolve_credentials(&opts).await? else {
		return Ok(Outcome::PromptCancelled);
	};
	let endpoint = Url::parse(&opts.url)
		.map_err(|e| ConfigError::InvalidEndpoint { endpoint: opts.url.clone(), source: e })?;
	let transport = match opts.timeout {
		0 => ReqwestTransport::default(),
		secs => ReqwestTransport::with_timeout(std::time::Duration::from_secs(secs))?,
	};
	let auth = PasswordAuth::new(credentials.user, credentials.password);
	let api = PlcApi::with_transport(endpoint, auth, transport);
	let request = RenewalRequest { slice: credentials.slice, days: opts.days };
	let renewed = api.renew(&request).await?;

	println!("{}", report::renewed_line(&renewed, local_offset)?);

	Ok(Outcome::Renewed(renewed))
}

/// Resolves credentials in priority order: positional USER (with flag or
/// prompted password), then the structured auth file.
///
/// `None` means the user cancelled the prompt.
async fn resolve_credentials(opts: &Opts) -> Result<Option<ResolvedCredentials>> {
	if let Some(raw_user) = &opts.user {
		let user = cred::resolve_file_or_literal(raw_user);
		let password = match &opts.password {
			Some(raw) => cred::resolve_file_or_literal(raw),
			None => match prompt_password().await? {
				Some(password) => password,
				None => return Ok(None),
			},
		};

		return Ok(Some(ResolvedCredentials { user, password, slice: opts.slice.clone() }));
	}

	let (path, explicit) = match &opts.file {
		Some(path) => (path.clone(), true),
		None => (cred::default_auth_file_path()?, false),
	};
	let auth_file = match AuthFile::load(&path) {
		Ok(auth_file) => auth_file,
		Err(UsageError::AuthFileUnreadable { .. }) if !explicit =>
			return Err(UsageError::MissingUser { path }.into()),
		Err(e) => return Err(e.into()),
	};

	Ok(Some(ResolvedCredentials {
		user: auth_file.user,
		password: auth_file.password,
		slice: Some(opts.slice.clone().unwrap_or(auth_file.slice)),
	}))
}

/// Prompts for the password without echoing input.
///
/// End-of-input and an interrupt both resolve to `None`: declining the prompt
/// is a clean exit, not a failure.
async fn prompt_password() -> Result<Option<String>> {
	let prompt = tokio::task::spawn_blocking(|| rpassword::prompt_password("Password: "));

	tokio::select! {
		joined = prompt => match joined {
			Ok(Ok(password)) => Ok(Some(password)),
			Ok(Err(e)) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
			Ok(Err(e)) => Err(Error::Prompt { source: e }),
			Err(_) => Ok(None),
		},
		signal = tokio::signal::ctrl_c() => match signal {
			Ok(()) => Ok(None),
			Err(e) => Err(Error::Prompt { source: e }),
		},
	}
}
