//! Slice records exchanged with the PLCAPI.

// self
use crate::{
	_prelude::*,
	rpc::{ProtocolError, Value},
};

/// Slice record as returned by `GetSlices`.
///
/// The API returns many more members per slice; only the two this program
/// consumes are modeled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
	/// Unique slice name.
	pub name: String,
	/// Expiration instant as a Unix timestamp in seconds.
	pub expires: i64,
}
impl Slice {
	/// Decodes a slice record from a `GetSlices` result element.
	pub(crate) fn from_value(value: &Value) -> Result<Self, ProtocolError> {
		let members = value.as_struct().ok_or(ProtocolError::UnexpectedType { name: "slice" })?;
		let name = members
			.get("name")
			.ok_or(ProtocolError::MissingMember { name: "name" })?
			.as_str()
			.ok_or(ProtocolError::UnexpectedType { name: "name" })?
			.to_owned();
		let expires = members
			.get("expires")
			.ok_or(ProtocolError::MissingMember { name: "expires" })?
			.as_i64()
			.ok_or(ProtocolError::UnexpectedType { name: "expires" })?;

		Ok(Self { name, expires })
	}
}

/// Field update submitted through `UpdateSlice`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceUpdate {
	/// New expiration instant as a Unix timestamp in seconds.
	pub expires: i64,
}
impl SliceUpdate {
	/// Encodes the update as the fields struct the API expects.
	pub(crate) fn to_value(&self) -> Value {
		Value::Struct(BTreeMap::from_iter([("expires".to_owned(), Value::Int(self.expires))]))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn record(name: &str, expires: i64) -> Value {
		Value::Struct(BTreeMap::from_iter([
			("name".to_owned(), Value::from(name)),
			("expires".to_owned(), Value::Int(expires)),
			("site_id".to_owned(), Value::Int(7)),
		]))
	}

	#[test]
	fn records_decode_and_ignore_extra_members() {
		let slice = Slice::from_value(&record("myslice", 1_000))
			.expect("Record with extra members should decode.");

		assert_eq!(slice, Slice { name: "myslice".to_owned(), expires: 1_000 });
	}

	#[test]
	fn missing_members_are_named() {
		let value = Value::Struct(BTreeMap::from_iter([(
			"name".to_owned(),
			Value::from("myslice"),
		)]));
		let error = Slice::from_value(&value).expect_err("Record without expires should fail.");

		assert_eq!(error, ProtocolError::MissingMember { name: "expires" });
	}

	#[test]
	fn mistyped_members_are_named() {
		let value = Value::Struct(BTreeMap::from_iter([
			("name".to_owned(), Value::from("myslice")),
			("expires".to_owned(), Value::from("tomorrow")),
		]));
		let error = Slice::from_value(&value).expect_err("Record with string expires should fail.");

		assert_eq!(error, ProtocolError::UnexpectedType { name: "expires" });
	}

	#[test]
	fn updates_encode_the_expires_member() {
		let mut out = String::new();

		SliceUpdate { expires: 42 }.to_value().write_xml(&mut out);

		assert_eq!(
			out,
			"<value><struct><member><name>expires</name><value><int>42</int></value></member>\
			</struct></value>",
		);
	}
}
