use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::FullUpdateCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::PatchUserCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserView;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and issue its first token.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `InvalidFormat` - Email or password fails the configured pattern
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<UserView, UserError>;

    /// Check credentials, stamp the login and issue a fresh token.
    ///
    /// # Errors
    /// * `UnknownUser` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<UserView, UserError>;

    /// Project every stored user, in storage order.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self) -> Result<Vec<UserView>, UserError>;

    /// Overwrite all mutable fields of a user and replace its phones.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `InvalidFormat` - Email or password fails the configured pattern
    /// * `DuplicateEmail` - Email belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn full_update(
        &self,
        id: &UserId,
        command: FullUpdateCommand,
    ) -> Result<UserView, UserError>;

    /// Apply only the supplied fields. Token and modification time always change.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `InvalidFormat` - Format rules fail (only when validation on patch is enabled)
    /// * `DuplicateEmail` - Email belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn patch(&self, id: &UserId, command: PatchUserCommand) -> Result<UserView, UserError>;

    /// Remove a user.
    ///
    /// # Returns
    /// Whether a user existed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<bool, UserError>;

    /// Direct lookup by email. Absence is not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations store the user and its phones together.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user and its phones.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all users in insertion order.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Save every field of an existing user and replace its phones.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DuplicateEmail` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Stamp a successful login. Touches only the login time and token.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn record_login(
        &self,
        id: &UserId,
        last_login: DateTime<Utc>,
        token: &str,
    ) -> Result<(), UserError>;

    /// Remove user and, by cascade, its phones.
    ///
    /// # Returns
    /// Whether a row was removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<bool, UserError>;
}
