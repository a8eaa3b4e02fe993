use regex::Regex;

use crate::user::errors::CredentialPolicyError;
use crate::user::errors::UserError;

/// Format rules for emails and passwords, supplied by configuration.
///
/// Patterns must match the whole input, so they are anchored on construction.
#[derive(Debug, Clone)]
pub struct CredentialPolicy {
    email: Regex,
    password: Regex,
    validate_on_patch: bool,
}

impl CredentialPolicy {
    /// Compile the configured patterns.
    ///
    /// # Errors
    /// * `EmailPattern` / `PasswordPattern` - Pattern is not a valid regular expression
    pub fn new(
        email_pattern: &str,
        password_pattern: &str,
        validate_on_patch: bool,
    ) -> Result<Self, CredentialPolicyError> {
        let email = Regex::new(&anchored(email_pattern))
            .map_err(|e| CredentialPolicyError::EmailPattern(e.to_string()))?;
        let password = Regex::new(&anchored(password_pattern))
            .map_err(|e| CredentialPolicyError::PasswordPattern(e.to_string()))?;

        Ok(Self {
            email,
            password,
            validate_on_patch,
        })
    }

    pub fn check_email(&self, email: &str) -> Result<(), UserError> {
        if self.email.is_match(email) {
            Ok(())
        } else {
            Err(UserError::InvalidFormat("Invalid email format".to_string()))
        }
    }

    pub fn check_password(&self, password: &str) -> Result<(), UserError> {
        if self.password.is_match(password) {
            Ok(())
        } else {
            Err(UserError::InvalidFormat("Invalid password format".to_string()))
        }
    }

    /// Whether partial updates re-run the format rules on supplied fields.
    pub fn validate_on_patch(&self) -> bool {
        self.validate_on_patch
    }
}

fn anchored(pattern: &str) -> String {
    format!("^(?:{})$", pattern)
}
