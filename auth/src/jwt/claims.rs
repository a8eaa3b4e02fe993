use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by every issued token.
///
/// Field order is part of the signed byte layout: `sub`, `iat`, `exp`, then
/// any extra claims in key order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the login identifier, i.e. the user's email)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims for `subject` issued at `issued_at` and valid for `ttl`.
    pub fn for_subject(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            extra: BTreeMap::new(),
        }
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Merge a set of custom fields. Reserved names (`sub`, `iat`, `exp`) are ignored.
    pub fn with_extras(mut self, extra: BTreeMap<String, serde_json::Value>) -> Self {
        for (key, value) in extra {
            if !matches!(key.as_str(), "sub" | "iat" | "exp") {
                self.extra.insert(key, value);
            }
        }
        self
    }

    /// Expiration as a UTC timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// A token is live only while its expiry is strictly after `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued_at() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("ana@example.com", issued_at(), Duration::seconds(1440));

        assert_eq!(claims.sub, "ana@example.com");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 1440);
        assert!(claims.extra.is_empty());
    }

    #[test]
    fn test_canonical_field_order() {
        let claims = Claims::for_subject("ana@example.com", issued_at(), Duration::seconds(60))
            .with_extra("role", "admin")
            .with_extra("active", true);

        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(
            json,
            r#"{"sub":"ana@example.com","iat":1700000000,"exp":1700000060,"active":true,"role":"admin"}"#
        );
    }

    #[test]
    fn test_with_extras_skips_reserved_names() {
        let mut extra = BTreeMap::new();
        extra.insert("sub".to_string(), serde_json::json!("someone-else"));
        extra.insert("tenant".to_string(), serde_json::json!("acme"));

        let claims =
            Claims::for_subject("ana@example.com", issued_at(), Duration::seconds(60)).with_extras(extra);

        assert_eq!(claims.sub, "ana@example.com");
        assert_eq!(claims.extra.len(), 1);
        assert_eq!(claims.extra.get("tenant").unwrap().as_str(), Some("acme"));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::for_subject("ana@example.com", issued_at(), Duration::seconds(10));
        let at = |secs: i64| Utc.timestamp_opt(secs, 0).unwrap();

        assert!(!claims.is_expired(at(1_700_000_009)));
        assert!(claims.is_expired(at(1_700_000_010))); // exactly at expiration
        assert!(claims.is_expired(at(1_700_000_011)));
    }

    #[test]
    fn test_expires_at() {
        let claims = Claims::for_subject("ana@example.com", issued_at(), Duration::seconds(10));
        assert_eq!(claims.expires_at(), Some(issued_at() + Duration::seconds(10)));
    }
}
