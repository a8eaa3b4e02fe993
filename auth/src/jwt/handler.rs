use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Token codec for issuing and reading bearer tokens.
///
/// Tokens use the JWS compact layout signed with HS256:
/// `base64url(header) "." base64url(claims) "." base64url(HMAC-SHA256(secret, first two parts))`.
/// The header is `{"typ":"JWT","alg":"HS256"}` and the claims follow [`Claims`] field order.
///
/// Decoding checks the signature only. Expiry is reported through
/// [`JwtHandler::is_valid`] so an expired token is never a decode error.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a new codec with a shared secret and token lifetime.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (at least 32 bytes recommended for HS256)
    /// * `ttl` - Time between issuance and expiry
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Lifetime applied to newly issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from now.
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_at(subject, BTreeMap::new(), Utc::now())
    }

    /// Issue a token carrying additional claims.
    pub fn issue_with_claims(
        &self,
        subject: &str,
        extra: BTreeMap<String, serde_json::Value>,
    ) -> Result<String, JwtError> {
        self.issue_at(subject, extra, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        subject: &str,
        extra: BTreeMap<String, serde_json::Value>,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, issued_at, self.ttl).with_extras(extra);
        self.encode(&claims)
    }

    /// Sign an arbitrary claims set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify the signature and decode the claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed token, or missing `sub`/`iat`/`exp`
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is evaluated by `is_valid`, never while decoding
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }

    /// Subject carried by a signed token.
    pub fn subject(&self, token: &str) -> Result<String, JwtError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Expiry instant of a signed token.
    pub fn expiry(&self, token: &str) -> Result<DateTime<Utc>, JwtError> {
        let claims = self.decode(token)?;
        claims
            .expires_at()
            .ok_or_else(|| JwtError::InvalidToken(format!("exp out of range: {}", claims.exp)))
    }

    /// True when the token belongs to `expected_subject` and has not expired.
    ///
    /// # Errors
    /// * `InvalidToken` - Only for tokens that fail to decode; expired tokens yield `Ok(false)`
    pub fn is_valid(&self, token: &str, expected_subject: &str) -> Result<bool, JwtError> {
        self.is_valid_at(token, expected_subject, Utc::now())
    }

    /// [`JwtHandler::is_valid`] evaluated at an explicit instant.
    pub fn is_valid_at(
        &self,
        token: &str,
        expected_subject: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, JwtError> {
        let claims = self.decode(token)?;
        Ok(claims.sub == expected_subject && !claims.is_expired(now))
    }
}
