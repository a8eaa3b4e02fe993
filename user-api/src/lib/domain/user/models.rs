use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Owns its phones; removing the user removes them.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub active: bool,
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub phones: Vec<Phone>,
}

impl User {
    /// Swap the whole phone collection, re-owning each entry.
    pub fn replace_phones(&mut self, phones: Vec<NewPhone>) {
        self.phones = phones
            .into_iter()
            .map(|phone| Phone::owned_by(self.id, phone))
            .collect();
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number belonging to exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    pub id: Uuid,
    pub user_id: UserId,
    pub number: String,
    pub city_code: String,
    pub country_code: String,
}

impl Phone {
    pub fn owned_by(user_id: UserId, phone: NewPhone) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            number: phone.number,
            city_code: phone.city_code,
            country_code: phone.country_code,
        }
    }
}

/// Phone data as supplied by a client, before it has an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhone {
    pub number: String,
    pub city_code: String,
    pub country_code: String,
}

/// Externally visible projection of a [`User`].
///
/// Leaves out the password digest and the phones.
#[derive(Debug, Clone, PartialEq)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub token: Option<String>,
    pub active: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            modified_at: user.modified_at,
            last_login: user.last_login,
            token: user.token.clone(),
            active: user.active,
        }
    }
}

/// Command to register a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phones: Vec<NewPhone>,
}

/// Login input. Never persisted.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Command to overwrite every mutable field of a user.
#[derive(Debug, Clone)]
pub struct FullUpdateCommand {
    pub name: String,
    pub email: String,
    pub password: String,
    pub active: bool,
    pub phones: Vec<NewPhone>,
}

/// One field of a partial update.
#[derive(Debug, Clone, PartialEq)]
pub enum UserPatchField {
    Name(String),
    Email(String),
    Password(String),
    Active(bool),
    Phones(Vec<NewPhone>),
}

/// Command to update only the supplied fields, applied in order.
#[derive(Debug, Clone, Default)]
pub struct PatchUserCommand {
    pub fields: Vec<UserPatchField>,
}
