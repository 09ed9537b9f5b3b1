// std
use std::{env, fs, path::PathBuf, process};
// self
use slice_renew::{
	_preludet::*,
	cred::{self, AuthFile},
	error::UsageError,
};

fn temp_path(label: &str) -> PathBuf {
	let unique = format!(
		"slice_renew_{label}_{}_{}",
		process::id(),
		OffsetDateTime::now_utc().unix_timestamp_nanos(),
	);

	env::temp_dir().join(unique)
}

#[test]
fn structured_auth_file_resolves_three_tokens() {
	let path = temp_path("auth_file");

	fs::write(&path, "alice secret myslice\n").expect("Failed to write auth file fixture.");

	let parsed = AuthFile::load(&path).expect("Three-token auth file should load.");

	assert_eq!(parsed, AuthFile {
		user: "alice".to_owned(),
		password: "secret".to_owned(),
		slice: "myslice".to_owned(),
	});

	fs::remove_file(&path).expect("Failed to remove auth file fixture.");
}

#[test]
fn malformed_auth_file_is_a_usage_error() {
	let path = temp_path("bad_auth_file");

	fs::write(&path, "alice secret\n").expect("Failed to write auth file fixture.");

	let error = AuthFile::load(&path).expect_err("Two-token auth file should not load.");

	assert!(matches!(error, UsageError::MalformedAuthFile { .. }));
	assert!(error.to_string().contains("user password slice"));

	fs::remove_file(&path).expect("Failed to remove auth file fixture.");
}

#[test]
fn missing_auth_file_is_unreadable() {
	let path = temp_path("absent_auth_file");
	let error = AuthFile::load(&path).expect_err("An absent auth file should not load.");

	assert!(matches!(error, UsageError::AuthFileUnreadable { .. }));
}

#[test]
fn password_files_resolve_to_trimmed_contents() {
	let path = temp_path("password_file");

	fs::write(&path, "topsecret\n").expect("Failed to write password fixture.");

	let resolved = cred::resolve_file_or_literal(&path.display().to_string());

	assert_eq!(resolved, "topsecret");

	fs::remove_file(&path).expect("Failed to remove password fixture.");
}

#[test]
fn unreadable_password_values_stay_literal() {
	let literal = temp_path("never_written").display().to_string();

	assert_eq!(cred::resolve_file_or_literal(&literal), literal);
}
