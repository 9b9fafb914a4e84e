//! CMS user entity.
//!
//! ## Invariants
//! - `email` has a non-empty local part and domain separated by one `@` and
//!   contains no whitespace. Uniqueness is enforced by the CMS.
//! - `role` is one of [`UserRole`]'s three variants.
//! - Role and name changes produce new values with a later `updated_at`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::timestamps::next_revision;
use super::{ValidationError, ValidationErrorCode};

/// Numeric CMS identifier. `0` marks a value not yet persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(u64);

impl UserId {
    pub const PENDING: Self = Self(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_pending(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Access role assigned in the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Editor,
    User,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "user" => Ok(Self::User),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// CMS user.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: String,
    name: Option<String>,
    role: UserRole,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new, not yet persisted user.
    ///
    /// # Examples
    /// ```
    /// use folio::domain::{User, UserRole};
    /// use mockable::DefaultClock;
    ///
    /// let user = User::create("ada@example.com", Some("Ada".into()), UserRole::Editor, &DefaultClock)
    ///     .unwrap();
    /// assert!(user.can_edit_posts());
    /// assert!(!user.is_admin());
    /// ```
    pub fn create(
        email: impl Into<String>,
        name: Option<String>,
        role: UserRole,
        clock: &dyn Clock,
    ) -> Result<Self, ValidationError> {
        let email = validate_email(email.into())?;
        let now = clock.utc();
        Ok(Self {
            id: UserId::PENDING,
            email,
            name,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a persisted user.
    pub fn reconstruct(
        id: UserId,
        email: impl Into<String>,
        name: Option<String>,
        role: UserRole,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            email: validate_email(email.into())?,
            name,
            role,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Name when set, otherwise the email address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_editor(&self) -> bool {
        self.role == UserRole::Editor
    }

    /// Admins and editors may write posts.
    pub fn can_edit_posts(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Editor)
    }

    pub fn can_manage_users(&self) -> bool {
        self.is_admin()
    }

    /// Copy with a different role.
    #[must_use]
    pub fn change_role(&self, role: UserRole, clock: &dyn Clock) -> Self {
        let mut next = self.revise(clock);
        next.role = role;
        next
    }

    /// Copy with a different display name; `None` clears it.
    #[must_use]
    pub fn update_name(&self, name: Option<String>, clock: &dyn Clock) -> Self {
        let mut next = self.revise(clock);
        next.name = name;
        next
    }

    fn revise(&self, clock: &dyn Clock) -> Self {
        let mut next = self.clone();
        next.updated_at = next_revision(self.updated_at, clock);
        next
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

fn validate_email(email: String) -> Result<String, ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(ValidationError::new(ValidationErrorCode::EmailInvalid).with_metadata("value", email))
    }
}
