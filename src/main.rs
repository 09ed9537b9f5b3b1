//! `slice-renew` binary entry point.

// std
use std::process::ExitCode;
// crates.io
use clap::Parser;
use time::UtcOffset;
// self
use slice_renew::cli::{self, Opts};

fn main() -> ExitCode {
	let opts = Opts::parse();

	cli::init_tracing();

	// The time crate refuses local-offset lookups once extra threads exist,
	// so capture the offset before the runtime starts.
	let local_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
	let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
		Ok(runtime) => runtime,
		Err(error) => {
			eprintln!("slice-renew: {error}");

			return ExitCode::FAILURE;
		},
	};

	match runtime.block_on(cli::run(opts, local_offset)) {
		Ok(_) => ExitCode::SUCCESS,
		Err(error) => {
			eprintln!("slice-renew: {error}");

			let mut source = std::error::Error::source(&error);

			while let Some(cause) = source {
				eprintln!("  caused by: {cause}");

				source = cause.source();
			}

			ExitCode::FAILURE
		},
	}
}
