use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::FullUpdateCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::PatchUserCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatchField;
use crate::domain::user::models::UserView;
use crate::domain::user::policy::CredentialPolicy;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    policy: CredentialPolicy,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `policy` - Configured email and password format rules
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        policy: CredentialPolicy,
    ) -> Self {
        Self {
            repository,
            authenticator,
            policy,
        }
    }

    async fn load(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    /// Reject `email` when it is registered to anyone other than `owner`.
    async fn ensure_email_available(
        &self,
        email: &str,
        owner: Option<&UserId>,
    ) -> Result<(), UserError> {
        match self.repository.find_by_email(email).await? {
            Some(existing) if Some(&existing.id) != owner => {
                Err(UserError::DuplicateEmail(email.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn check_formats(&self, email: &str, password: &str) -> Result<(), UserError> {
        self.policy.check_email(email)?;
        self.policy.check_password(password)
    }

    async fn apply_patch_field(
        &self,
        user: &mut User,
        field: UserPatchField,
    ) -> Result<(), UserError> {
        match field {
            UserPatchField::Name(name) => user.name = name,
            UserPatchField::Email(email) => {
                if self.policy.validate_on_patch() {
                    self.policy.check_email(&email)?;
                }
                if email != user.email {
                    self.ensure_email_available(&email, Some(&user.id)).await?;
                }
                user.email = email;
            }
            UserPatchField::Password(password) => {
                if self.policy.validate_on_patch() {
                    self.policy.check_password(&password)?;
                }
                user.password_hash = self.authenticator.hash_password(&password)?;
            }
            UserPatchField::Active(active) => user.active = active,
            UserPatchField::Phones(phones) => user.replace_phones(phones),
        }
        Ok(())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<UserView, UserError> {
        self.ensure_email_available(&command.email, None).await?;
        self.check_formats(&command.email, &command.password)?;

        let password_hash = self.authenticator.hash_password(&command.password)?;
        let token = self.authenticator.issue_token(&command.email)?;
        let now = Utc::now();

        let mut user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            active: true,
            token: Some(token),
            created_at: now,
            modified_at: None,
            last_login: Some(now),
            phones: Vec::new(),
        };
        user.replace_phones(command.phones);

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            phones = created_user.phones.len(),
            "User registered"
        );

        Ok(UserView::from(&created_user))
    }

    async fn login(&self, command: LoginCommand) -> Result<UserView, UserError> {
        let mut user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| UserError::UnknownUser(command.email.clone()))?;

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, &user.email)
            .map_err(|e| {
                tracing::warn!(user_id = %user.id, error = %e, "Login rejected");
                UserError::from(e)
            })?;

        let now = Utc::now();
        self.repository
            .record_login(&user.id, now, &result.access_token)
            .await?;
        user.last_login = Some(now);
        user.token = Some(result.access_token);
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(UserView::from(&user))
    }

    async fn list(&self) -> Result<Vec<UserView>, UserError> {
        let users = self.repository.list_all().await?;
        Ok(users.iter().map(UserView::from).collect())
    }

    async fn full_update(
        &self,
        id: &UserId,
        command: FullUpdateCommand,
    ) -> Result<UserView, UserError> {
        let mut user = self.load(id).await?;

        self.ensure_email_available(&command.email, Some(id)).await?;
        self.check_formats(&command.email, &command.password)?;

        user.name = command.name;
        user.email = command.email;
        user.password_hash = self.authenticator.hash_password(&command.password)?;
        user.active = command.active;
        user.replace_phones(command.phones);
        user.token = Some(self.authenticator.issue_token(&user.email)?);
        user.modified_at = Some(Utc::now());

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(UserView::from(&updated_user))
    }

    async fn patch(&self, id: &UserId, command: PatchUserCommand) -> Result<UserView, UserError> {
        let mut user = self.load(id).await?;

        for field in command.fields {
            self.apply_patch_field(&mut user, field).await?;
        }

        user.token = Some(self.authenticator.issue_token(&user.email)?);
        user.modified_at = Some(Utc::now());

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User patched");

        Ok(UserView::from(&updated_user))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserError> {
        let existed = self.repository.delete(id).await?;
        if existed {
            tracing::info!(user_id = %id, "User deleted");
        } else {
            tracing::debug!(user_id = %id, "Delete requested for missing user");
        }
        Ok(existed)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.repository.find_by_email(email).await
    }
}
