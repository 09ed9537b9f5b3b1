//! The renewal flow: list, update, confirm.

// self
use crate::{
	_prelude::*,
	api::PlcApi,
	http::RpcTransport,
	slice::{Slice, SliceUpdate},
};

/// Default PLCAPI endpoint.
pub const PLCAPI_URL: &str = "https://www.planet-lab.org/PLCAPI/";
/// Default renewal window in days.
///
/// The server caps renewals at eight weeks and compares against its own
/// clock, so the default stays a couple of days under the cap.
pub const RENEW_DAYS_DEFAULT: i64 = 54;
/// Status value `UpdateSlice` returns when the write succeeded.
pub const UPDATE_SUCCESS: i64 = 1;

/// Parameters of a single renewal run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalRequest {
	/// Slice to renew; `None` targets the first slice the account can see.
	pub slice: Option<String>,
	/// Days added to the current time to compute the new expiration.
	pub days: i64,
}
impl Default for RenewalRequest {
	fn default() -> Self {
		Self { slice: None, days: RENEW_DAYS_DEFAULT }
	}
}

impl<C> PlcApi<C>
where
	C: RpcTransport + ?Sized,
{
	/// Renews a slice and returns the confirmed, post-update record.
	///
	/// The sequence is strict: list, pick the first match, write the new
	/// expiration, re-list to confirm. An update status other than
	/// [`UPDATE_SUCCESS`] is a rejection and the confirming re-fetch is not
	/// attempted.
	pub async fn renew(&self, request: &RenewalRequest) -> Result<Slice> {
		let filter = request.slice.as_deref();
		let listed = self.get_slices(filter).await?;
		let target = listed
			.into_iter()
			.next()
			.ok_or_else(|| Error::SliceNotFound { filter: filter.map(ToOwned::to_owned) })?;
		let expires = expiration_after(OffsetDateTime::now_utc(), request.days);
		let status = self.update_slice(&target.name, &SliceUpdate { expires }).await?;

		if status != UPDATE_SUCCESS {
			return Err(Error::RenewalRejected { slice: target.name, status });
		}

		tracing::info!(slice = %target.name, expires, "slice renewed");

		let confirmed = self
			.get_slices(Some(&target.name))
			.await?
			.into_iter()
			.next()
			.ok_or_else(|| Error::SliceNotFound { filter: Some(target.name.clone()) })?;

		Ok(confirmed)
	}
}

/// Expiration timestamp `days` after `now`, in whole Unix seconds.
///
/// Epoch arithmetic is offset-independent, so the value written here and the
/// calendar rendering of the read-back agree regardless of time zone.
pub fn expiration_after(now: OffsetDateTime, days: i64) -> i64 {
	(now + Duration::days(days)).unix_timestamp()
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn expiration_adds_whole_days() {
		let now = datetime!(2012-02-28 12:00:00 UTC);

		assert_eq!(expiration_after(now, 10), now.unix_timestamp() + 10 * 86_400);
		assert_eq!(expiration_after(now, RENEW_DAYS_DEFAULT), now.unix_timestamp() + 54 * 86_400);
	}

	#[test]
	fn expiration_is_offset_independent() {
		let utc = datetime!(2012-02-28 12:00:00 UTC);
		let shifted = utc.to_offset(UtcOffset::from_hms(2, 0, 0).expect("Offset should build."));

		assert_eq!(expiration_after(utc, 54), expiration_after(shifted, 54));
	}

	#[test]
	fn default_request_targets_some_slice() {
		let request = RenewalRequest::default();

		assert_eq!(request.slice, None);
		assert_eq!(request.days, RENEW_DAYS_DEFAULT);
	}
}
