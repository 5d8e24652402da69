//! Single-teacher sign-in backed by the `user` storage key.
//!
//! # Responsibility
//! - Check the hardcoded demo teacher credential.
//! - Persist and restore the signed-in user record.
//!
//! # Invariants
//! - The stored record never contains a password.
//! - A malformed stored record is removed and treated as signed out.
//! - This is a demo gate, not a security boundary.

use crate::model::user::{User, UserRole};
use crate::storage::{KeyValueStorage, StorageError, USER_KEY};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));

struct Account {
    id: i64,
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: UserRole,
}

const ACCOUNTS: &[Account] = &[Account {
    id: 1,
    name: "Professor Silva",
    email: "professor@exemplo.com",
    password: "senha123",
    role: UserRole::Teacher,
}];

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug)]
pub enum AuthError {
    /// Form input rejected before the credential check.
    InvalidInput(&'static str),
    /// No account matches the email/password pair.
    InvalidCredentials,
    Storage(StorageError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid sign-in input: {message}"),
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for AuthError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Sign-in state over a storage backend.
pub struct AuthService<S: KeyValueStorage> {
    storage: S,
    user: Option<User>,
    loaded: bool,
}

impl<S: KeyValueStorage> AuthService<S> {
    /// Creates a signed-out service. Call [`Self::restore`] to pick up a
    /// persisted session.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            user: None,
            loaded: false,
        }
    }

    /// Reads the persisted user, if any.
    ///
    /// Never fails: unreadable or malformed state yields signed-out.
    pub fn restore(&mut self) -> Option<&User> {
        self.user = match self.storage.get_item(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(
                        "event=auth_restore module=auth status=fallback reason=malformed error={err}"
                    );
                    if let Err(err) = self.storage.remove_item(USER_KEY) {
                        warn!(
                            "event=auth_restore module=auth status=error reason=remove_failed error={err}"
                        );
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("event=auth_restore module=auth status=fallback reason=read_failed error={err}");
                None
            }
        };
        self.loaded = true;
        self.user.as_ref()
    }

    /// Checks the credential pair and persists the signed-in user.
    ///
    /// # Errors
    /// - `InvalidInput` for a blank or malformed email, or a blank password.
    /// - `InvalidCredentials` when no account matches.
    /// - `Storage` when the user record cannot be written.
    pub fn login(&mut self, email: &str, password: &str) -> AuthResult<User> {
        validate_login_input(email, password)?;

        let Some(account) = ACCOUNTS
            .iter()
            .find(|account| account.email == email && account.password == password)
        else {
            info!("event=auth_login module=auth status=rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let user = User {
            id: account.id,
            name: account.name.to_string(),
            email: account.email.to_string(),
            role: account.role,
        };
        let serialized = serde_json::to_string(&user).map_err(StorageError::from)?;
        self.storage.set_item(USER_KEY, &serialized)?;

        info!("event=auth_login module=auth status=ok user_id={}", user.id);
        self.user = Some(user.clone());
        self.loaded = true;
        Ok(user)
    }

    /// Clears the session in memory and in storage.
    pub fn logout(&mut self) -> AuthResult<()> {
        self.storage.remove_item(USER_KEY)?;
        self.user = None;
        info!("event=auth_logout module=auth status=ok");
        Ok(())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_teacher(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.role == UserRole::Teacher)
    }

    /// Returns `true` until [`Self::restore`] or a login has run.
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }
}

fn validate_login_input(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::InvalidInput("email is required"));
    }
    if !EMAIL_SHAPE_RE.is_match(email) {
        return Err(AuthError::InvalidInput("email is malformed"));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidInput("password is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{AuthError, AuthService};
    use crate::model::user::UserRole;
    use crate::storage::{KeyValueStorage, MemoryStorage, USER_KEY};

    #[test]
    fn login_persists_user_without_password() {
        let storage = MemoryStorage::new();
        let mut auth = AuthService::new(&storage);

        let user = auth.login("professor@exemplo.com", "senha123").unwrap();
        assert_eq!(user.role, UserRole::Teacher);
        assert!(auth.is_teacher());

        let raw = storage.get_item(USER_KEY).unwrap().unwrap();
        assert!(raw.contains("Professor Silva"));
        assert!(!raw.contains("senha123"));

        let mut restored = AuthService::new(&storage);
        assert!(restored.is_loading());
        assert_eq!(restored.restore(), Some(&user));
    }

    #[test]
    fn login_rejects_bad_input_and_wrong_password() {
        let storage = MemoryStorage::new();
        let mut auth = AuthService::new(&storage);

        assert!(matches!(
            auth.login("  ", "x"),
            Err(AuthError::InvalidInput("email is required"))
        ));
        assert!(matches!(
            auth.login("professor", "x"),
            Err(AuthError::InvalidInput("email is malformed"))
        ));
        assert!(matches!(
            auth.login("professor@exemplo.com", ""),
            Err(AuthError::InvalidInput("password is required"))
        ));
        assert!(matches!(
            auth.login("professor@exemplo.com", "senha"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(!auth.is_authenticated());
        assert!(storage.get_item(USER_KEY).unwrap().is_none());
    }

    #[test]
    fn malformed_session_is_discarded_on_restore() {
        let storage = MemoryStorage::new();
        storage.set_item(USER_KEY, "{not json").unwrap();

        let mut auth = AuthService::new(&storage);
        assert!(auth.restore().is_none());
        assert!(storage.get_item(USER_KEY).unwrap().is_none());
    }

    #[test]
    fn logout_clears_session() {
        let storage = MemoryStorage::new();
        let mut auth = AuthService::new(&storage);
        auth.login("professor@exemplo.com", "senha123").unwrap();

        auth.logout().unwrap();
        assert!(auth.current_user().is_none());
        assert!(storage.get_item(USER_KEY).unwrap().is_none());
    }
}
