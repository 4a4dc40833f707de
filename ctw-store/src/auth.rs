//! Demo login.
//!
//! There is no credential check and no token: logging in only sets the
//! persisted `isAuthenticated` flag. Keep it out of anything that needs
//! real access control.

use crate::settings::{keys, SettingsStore};
use std::time::Duration;

/// Pacing applied by callers before reporting a successful login.
pub const LOGIN_DISPLAY_DELAY: Duration = Duration::from_millis(1200);

/// Credentials shown on the login form.
pub const DEMO_EMAIL: &str = "admin@nagpur.gov.in";
pub const DEMO_PASSWORD: &str = "demo123";

/// Accept any credentials and persist the authenticated flag.
pub fn login(store: &dyn SettingsStore, email: &str, _password: &str) -> anyhow::Result<bool> {
    log::warn!(
        "demo login for '{}': credentials are not verified",
        email
    );
    store.set(keys::IS_AUTHENTICATED, "true")?;
    Ok(true)
}

pub fn is_authenticated(store: &dyn SettingsStore) -> anyhow::Result<bool> {
    Ok(store.get(keys::IS_AUTHENTICATED)?.as_deref() == Some("true"))
}

/// Clear the authenticated flag along with any token and user entry.
pub fn logout(store: &dyn SettingsStore) -> anyhow::Result<()> {
    for key in [keys::IS_AUTHENTICATED, keys::TOKEN, keys::USER] {
        store.remove(key)?;
    }
    log::info!("logged out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, MemoryStore};

    #[test]
    fn login_always_succeeds() {
        let store = MemoryStore::default();
        assert!(!is_authenticated(&store).unwrap());
        assert!(login(&store, "someone@example.com", "wrong").unwrap());
        assert!(is_authenticated(&store).unwrap());
    }

    #[test]
    fn logout_clears_auth_keys() {
        let db = Database::new().unwrap();
        login(&db, DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        db.set(keys::TOKEN, "abc").unwrap();
        db.set(keys::USER, "{\"name\":\"admin\"}").unwrap();
        db.set(keys::THEME, "dark").unwrap();

        logout(&db).unwrap();
        assert_eq!(db.get(keys::IS_AUTHENTICATED).unwrap(), None);
        assert_eq!(db.get(keys::TOKEN).unwrap(), None);
        assert_eq!(db.get(keys::USER).unwrap(), None);
        assert_eq!(db.get(keys::THEME).unwrap().as_deref(), Some("dark"));
        assert!(!is_authenticated(&db).unwrap());
    }
}
