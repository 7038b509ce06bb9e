//! Login gate over the persisted session flag.
//!
//! A single hardcoded credential pair controls access, and the logged-in
//! state lives in the same key-value namespace as the data records.

use crate::db::{KeyValueStore, LOGIN_KEY};
use crate::error::{Error, Result};

const USERNAME: &str = "admin";
const PASSWORD: &str = "admin";

/// Check the built-in credential pair
#[must_use]
pub fn verify_credentials(username: &str, password: &str) -> bool {
    username == USERNAME && password == PASSWORD
}

/// Validate credentials and persist the login flag
pub fn login<S: KeyValueStore>(store: &mut S, username: &str, password: &str) -> Result<()> {
    if !verify_credentials(username, password) {
        return Err(Error::InvalidInput("Invalid credentials".to_string()));
    }
    store.set(LOGIN_KEY, "true")
}

/// Clear the persisted login flag
pub fn logout<S: KeyValueStore>(store: &mut S) -> Result<()> {
    store.remove(LOGIN_KEY)
}

/// Whether a login flag is persisted
pub fn is_logged_in<S: KeyValueStore>(store: &S) -> Result<bool> {
    Ok(store.get(LOGIN_KEY)?.as_deref() == Some("true"))
}
