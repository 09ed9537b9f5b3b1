//! Credential payload attached to every PLCAPI call.

// self
use crate::{_prelude::*, rpc::Value};

/// Redacted password wrapper keeping credential material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordSecret(String);
impl PasswordSecret {
	/// Wraps a new password string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner password. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for PasswordSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for PasswordSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("PasswordSecret").field(&"<redacted>").finish()
	}
}
impl Display for PasswordSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Password-method authentication payload sent with every call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordAuth {
	/// Account name the calls authenticate as.
	pub username: String,
	/// Account password; redacted in debug output.
	pub password: PasswordSecret,
}
impl PasswordAuth {
	/// Builds a password-method auth payload.
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self { username: username.into(), password: PasswordSecret::new(password) }
	}

	/// Encodes the payload as the auth struct the PLCAPI expects as the first
	/// positional parameter.
	pub(crate) fn to_value(&self) -> Value {
		let members = BTreeMap::from_iter([
			("AuthMethod".to_owned(), Value::from("password")),
			("Username".to_owned(), Value::from(self.username.as_str())),
			("AuthString".to_owned(), Value::from(self.password.expose())),
		]);

		Value::Struct(members)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = PasswordSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "PasswordSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn auth_struct_carries_the_password_method() {
		let auth = PasswordAuth::new("alice", "secret");
		let value = auth.to_value();
		let members = value.as_struct().expect("Auth payload should encode as a struct.");

		assert_eq!(members.get("AuthMethod"), Some(&Value::from("password")));
		assert_eq!(members.get("Username"), Some(&Value::from("alice")));
		assert_eq!(members.get("AuthString"), Some(&Value::from("secret")));
	}
}
