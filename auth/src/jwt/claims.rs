use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Class of a token, carried in the `type` claim.
///
/// Both classes are signed with the same key; the consuming operation
/// decides which class it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Bearer token authorizing API calls.
    Access,
    /// Single-purpose token proving ownership of an email address.
    Confirm,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Confirm => "confirm",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims set.
///
/// `sub` and `type` are optional on the wire so that a token lacking them is
/// reported as such instead of as an unparseable token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user email)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Token class
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create claims for a subject expiring `ttl_minutes` from now.
    ///
    /// A negative TTL produces claims that are already expired.
    ///
    /// # Errors
    /// * `EncodingFailed` - The expiry falls outside the representable range
    pub fn new(
        subject: impl ToString,
        token_type: TokenType,
        ttl_minutes: i64,
    ) -> Result<Self, TokenError> {
        let now = Utc::now();
        let expiration = Duration::try_minutes(ttl_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                TokenError::EncodingFailed(format!(
                    "token lifetime of {} minutes is out of range",
                    ttl_minutes
                ))
            })?;

        Ok(Self {
            sub: Some(subject.to_string()),
            token_type: Some(token_type),
            exp: expiration.timestamp(),
            iat: Some(now.timestamp()),
        })
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("a@b.com", TokenType::Access, 30).unwrap();

        assert_eq!(claims.sub, Some("a@b.com".to_string()));
        assert_eq!(claims.token_type, Some(TokenType::Access));

        let iat = claims.iat.unwrap();
        assert_eq!(claims.exp - iat, 30 * 60);
    }

    #[test]
    fn test_negative_ttl_is_expired() {
        let claims = Claims::new("a@b.com", TokenType::Confirm, -1).unwrap();
        assert!(claims.is_expired(Utc::now().timestamp()));
    }

    #[test]
    fn test_out_of_range_ttl_is_error() {
        for ttl in [i64::MAX, i64::MIN, i64::MAX / 60_000 + 1, 200_000_000_000_000] {
            assert!(
                matches!(
                    Claims::new("a@b.com", TokenType::Access, ttl),
                    Err(TokenError::EncodingFailed(_))
                ),
                "ttl: {ttl}"
            );
        }
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: None,
            token_type: None,
            exp: 1000,
            iat: None,
        };

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_wire_names() {
        let claims = Claims::new("a@b.com", TokenType::Confirm, 5).unwrap();
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["sub"], "a@b.com");
        assert_eq!(json["type"], "confirm");
        assert!(json["exp"].is_i64());
    }

    #[test]
    fn test_missing_optional_claims_deserialize() {
        let claims: Claims = serde_json::from_str(r#"{"exp": 42}"#).unwrap();

        assert!(claims.sub.is_none());
        assert!(claims.token_type.is_none());
        assert!(claims.iat.is_none());
    }
}
