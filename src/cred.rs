//! Credential resolution: literal values, file indirection, and the auth file.

// std
use std::{fs, path::Path};
// crates.io
use directories::UserDirs;
// self
use crate::{_prelude::*, error::UsageError};

/// File name of the default credentials file under the home directory.
pub const AUTH_FILE_NAME: &str = ".pl_auth";

/// Returns the trimmed contents of `value` when it names a readable file, and
/// `value` itself otherwise.
///
/// The fallback fires on I/O errors only; a value that happens to look like a
/// path is simply used as the literal credential.
pub fn resolve_file_or_literal(value: &str) -> String {
	match fs::read_to_string(value) {
		Ok(contents) => contents.trim().to_owned(),
		Err(_) => value.to_owned(),
	}
}

/// Credentials parsed from the structured auth file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFile {
	/// Account name.
	pub user: String,
	/// Account password.
	pub password: String,
	/// Slice the file designates as the renewal target.
	pub slice: String,
}
impl AuthFile {
	/// Reads and parses the auth file at `path`.
	pub fn load(path: &Path) -> Result<Self, UsageError> {
		let contents = fs::read_to_string(path)
			.map_err(|e| UsageError::AuthFileUnreadable { path: path.to_owned(), source: e })?;

		Self::parse(&contents, path)
	}

	/// Parses `user password slice` out of the file contents.
	pub fn parse(contents: &str, path: &Path) -> Result<Self, UsageError> {
		let mut tokens = contents.split_whitespace();
		let (Some(user), Some(password), Some(slice), None) =
			(tokens.next(), tokens.next(), tokens.next(), tokens.next())
		else {
			return Err(UsageError::MalformedAuthFile { path: path.to_owned() });
		};

		Ok(Self {
			user: user.to_owned(),
			password: password.to_owned(),
			slice: slice.to_owned(),
		})
	}
}

/// Default auth file path under the user's home directory.
pub fn default_auth_file_path() -> Result<PathBuf, UsageError> {
	let dirs = UserDirs::new().ok_or(UsageError::NoHomeDirectory)?;

	Ok(dirs.home_dir().join(AUTH_FILE_NAME))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn auth_file_parses_three_tokens() {
		let path = Path::new("/tmp/pl_auth_fixture");
		let parsed = AuthFile::parse("alice secret myslice\n", path)
			.expect("Three-token contents should parse.");

		assert_eq!(parsed, AuthFile {
			user: "alice".to_owned(),
			password: "secret".to_owned(),
			slice: "myslice".to_owned(),
		});
	}

	#[test]
	fn auth_file_rejects_wrong_token_counts() {
		let path = Path::new("/tmp/pl_auth_fixture");

		assert!(AuthFile::parse("alice secret", path).is_err());
		assert!(AuthFile::parse("alice secret myslice extra", path).is_err());
		assert!(AuthFile::parse("", path).is_err());
	}

	#[test]
	fn malformed_auth_file_cites_the_expected_format() {
		let path = Path::new("/tmp/pl_auth_fixture");
		let error = AuthFile::parse("alice", path).expect_err("One token should not parse.");

		assert!(error.to_string().contains("user password slice"));
	}

	#[test]
	fn unreadable_values_resolve_to_themselves() {
		let literal = "no-such-file-anywhere";

		assert_eq!(resolve_file_or_literal(literal), literal);
	}
}
