//! Users table and current session.

mod credentials;

pub use credentials::*;

use std::sync::Arc;

use thiserror::Error;

use crate::config::{SeedPolicy, AUTH_KEY, USERS_KEY};
use crate::models::{NewUser, Role, Session, User};
use crate::seed;
use crate::storage::{
    read_json, try_read_json, write_json, KeyValueStore, StorageError, StorageResult,
};

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid credentials for {requested} role")]
    RoleMismatch { requested: Role, actual: Role },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Owns the users table and the persisted session.
#[derive(Clone)]
pub struct AuthStore {
    storage: Arc<dyn KeyValueStore>,
    credentials: Arc<dyn CredentialScheme>,
}

impl AuthStore {
    /// Create a store that compares plaintext passwords.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_credentials(storage, Arc::new(PlaintextCredentials))
    }

    /// Create a store with a custom credential scheme.
    pub fn with_credentials(
        storage: Arc<dyn KeyValueStore>,
        credentials: Arc<dyn CredentialScheme>,
    ) -> Self {
        Self {
            storage,
            credentials,
        }
    }

    /// Write the demo users according to `policy`.
    ///
    /// With [`SeedPolicy::Always`] any registered user is discarded.
    pub fn initialize(&self, policy: SeedPolicy) -> StorageResult<()> {
        if policy == SeedPolicy::IfAbsent && self.storage.contains(USERS_KEY)? {
            tracing::debug!("Users table present, skipping seed");
            return Ok(());
        }

        let users = seed::demo_users(self.credentials.as_ref());
        write_json(self.storage.as_ref(), USERS_KEY, &users)?;
        tracing::info!(count = users.len(), "Initialized users");
        Ok(())
    }

    /// All registered users; empty if the table is missing or corrupt.
    pub fn list_users(&self) -> Vec<User> {
        read_json(self.storage.as_ref(), USERS_KEY).unwrap_or_default()
    }

    /// Find a user by exact username.
    pub fn find_user(&self, username: &str) -> Option<User> {
        self.list_users().into_iter().find(|u| u.username == username)
    }

    fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        self.list_users().into_iter().find(|u| {
            u.username == username && self.credentials.verify(&u.password, password)
        })
    }

    /// Log in with a username and password.
    ///
    /// On success the session is persisted and returned. A miss returns
    /// the cleared session and writes nothing.
    pub fn login(&self, username: &str, password: &str) -> StorageResult<Session> {
        let Some(user) = self.authenticate(username, password) else {
            tracing::warn!(username, "Login rejected");
            return Ok(Session::cleared());
        };

        let session = Session::for_user(&user);
        write_json(self.storage.as_ref(), AUTH_KEY, &session)?;
        tracing::info!(username, role = %user.role, "Logged in");
        Ok(session)
    }

    /// Log in and require the matched user to hold `role`.
    ///
    /// The role is checked before anything is persisted, so a mismatch
    /// leaves any existing session untouched.
    pub fn login_as(&self, username: &str, password: &str, role: Role) -> AuthResult<Session> {
        let user = self.authenticate(username, password).ok_or_else(|| {
            tracing::warn!(username, "Login rejected");
            AuthError::InvalidCredentials
        })?;

        if user.role != role {
            tracing::warn!(username, requested = %role, actual = %user.role, "Login role mismatch");
            return Err(AuthError::RoleMismatch {
                requested: role,
                actual: user.role,
            });
        }

        let session = Session::for_user(&user);
        write_json(self.storage.as_ref(), AUTH_KEY, &session)?;
        tracing::info!(username, role = %user.role, "Logged in");
        Ok(session)
    }

    /// Delete the persisted session and return the cleared one.
    pub fn logout(&self) -> StorageResult<Session> {
        self.storage.remove(AUTH_KEY)?;
        tracing::info!("Logged out");
        Ok(Session::cleared())
    }

    /// The persisted session, or the cleared session if absent or corrupt.
    pub fn current_session(&self) -> Session {
        read_json(self.storage.as_ref(), AUTH_KEY).unwrap_or_default()
    }

    /// Append a new user with the next free id.
    ///
    /// Fails without writing if the stored users table cannot be decoded
    /// or the largest id is already `i64::MAX`.
    /// Usernames are not checked for collisions; `login` matches the
    /// first user in table order.
    pub fn register(&self, new_user: NewUser) -> StorageResult<User> {
        let mut users: Vec<User> =
            try_read_json(self.storage.as_ref(), USERS_KEY)?.unwrap_or_default();
        let id = match users.iter().map(|u| u.id).max() {
            None => 1,
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| StorageError::Backend("User id space exhausted".into()))?,
        };

        let user = User {
            id,
            username: new_user.username,
            password: self.credentials.encode(&new_user.password),
            role: new_user.role,
            name: new_user.name,
        };
        users.push(user.clone());
        write_json(self.storage.as_ref(), USERS_KEY, &users)?;

        tracing::info!(id, username = %user.username, "Registered user");
        Ok(user)
    }
}
