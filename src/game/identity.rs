//! Player identity
//!
//! The engine never authenticates. It consumes a user already resolved by
//! whatever front end sits in front of it, through [`IdentityProvider`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a user is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Player,
    /// Admins manage the site and do not play
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "player" | "user" => Ok(Self::Player),
            "admin" => Ok(Self::Admin),
            other => Err(format!("Unknown role: {other} (expected 'player' or 'admin')")),
        }
    }
}

/// A resolved user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn player(id: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            role: Role::Player,
        }
    }

    #[must_use]
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            role: Role::Admin,
        }
    }
}

/// Source of the current user
pub trait IdentityProvider {
    /// The user behind the current request, or `None` if nobody is signed in
    fn current_user(&self) -> Option<User>;
}

/// Identity fixed at construction
///
/// Used by the CLI, where the user comes from flags, and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<User>);

impl StaticIdentity {
    #[must_use]
    pub const fn new(user: Option<User>) -> Self {
        Self(user)
    }

    #[must_use]
    pub const fn anonymous() -> Self {
        Self(None)
    }
}

impl From<User> for StaticIdentity {
    fn from(user: User) -> Self {
        Self(Some(user))
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<User> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_str() {
        assert_eq!("player".parse::<Role>(), Ok(Role::Player));
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn static_identity_yields_user() {
        let identity = StaticIdentity::from(User::player("alice"));
        assert_eq!(identity.current_user(), Some(User::player("alice")));
        assert_eq!(StaticIdentity::anonymous().current_user(), None);
    }
}
