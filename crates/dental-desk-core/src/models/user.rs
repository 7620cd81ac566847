//! User and session models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Patient,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Patient => "patient",
        }
    }

    /// Parse the lowercase wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "patient" => Some(Role::Patient),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user (auth record).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Encoded by the active credential scheme (plaintext by default)
    pub password: String,
    pub role: Role,
    /// Display name; patient-role users are matched to Patient records by it
    pub name: String,
}

/// Fields supplied when registering a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub name: String,
}

/// The user as exposed through a session (no password).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub name: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            name: user.name.clone(),
        }
    }
}

/// Current authentication state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<SessionUser>,
}

impl Session {
    /// The signed-out session.
    pub fn cleared() -> Self {
        Self {
            is_authenticated: false,
            user: None,
        }
    }

    /// A signed-in session for `user`.
    pub fn for_user(user: &User) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user.into()),
        }
    }

    /// Role of the signed-in user, if any.
    ///
    /// A session flagged authenticated but missing its user is treated
    /// as signed out.
    pub fn role(&self) -> Option<Role> {
        if !self.is_authenticated {
            return None;
        }
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::cleared()
    }
}
