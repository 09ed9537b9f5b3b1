//! Renders the confirmed renewal as the program's single output line.

// crates.io
use time::{format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{_prelude::*, slice::Slice};

/// Calendar format matching `DD Month YYYY HH:MM:SS`.
const EXPIRES_FORMAT: &[BorrowedFormatItem<'static>] =
	format_description!("[day] [month repr:long] [year] [hour]:[minute]:[second]");

/// Failures converting the confirmed expiration into calendar time.
#[derive(Debug, ThisError)]
pub enum ReportError {
	/// The expiration timestamp is outside the representable range.
	#[error("Expiration timestamp {timestamp} is out of range.")]
	TimestampOutOfRange {
		/// Raw Unix timestamp returned by the server.
		timestamp: i64,
		/// Underlying range failure.
		#[source]
		source: time::error::ComponentRange,
	},
	/// The calendar representation could not be formatted.
	#[error("Unable to format the expiration timestamp.")]
	Format(#[from] time::error::Format),
}

/// Formats a Unix timestamp as calendar time at `offset`.
pub fn format_expiration(timestamp: i64, offset: UtcOffset) -> Result<String, ReportError> {
	let moment = OffsetDateTime::from_unix_timestamp(timestamp)
		.map_err(|e| ReportError::TimestampOutOfRange { timestamp, source: e })?
		.to_offset(offset);

	Ok(moment.format(EXPIRES_FORMAT)?)
}

/// Renders the success line for a confirmed renewal.
pub fn renewed_line(slice: &Slice, offset: UtcOffset) -> Result<String, ReportError> {
	Ok(format!("Slice {} renewed until {}", slice.name, format_expiration(slice.expires, offset)?))
}
