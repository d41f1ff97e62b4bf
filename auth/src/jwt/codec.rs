use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenType;
use super::errors::TokenError;

/// Lifetimes, in minutes, of the two token classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access_minutes: i64,
    pub confirm_minutes: i64,
}

impl TokenLifetimes {
    pub const DEFAULT_ACCESS_MINUTES: i64 = 30;
    pub const DEFAULT_CONFIRM_MINUTES: i64 = 24 * 60;

    pub fn new(access_minutes: i64, confirm_minutes: i64) -> Self {
        Self {
            access_minutes,
            confirm_minutes,
        }
    }

    /// Lifetime configured for a token class.
    pub fn for_type(&self, token_type: TokenType) -> i64 {
        match token_type {
            TokenType::Access => self.access_minutes,
            TokenType::Confirm => self.confirm_minutes,
        }
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ACCESS_MINUTES, Self::DEFAULT_CONFIRM_MINUTES)
    }
}

/// Issues and decodes signed, typed, expiring tokens.
///
/// All tokens are HS256 JWTs signed with one process-wide secret. The secret
/// and lifetimes are fixed at construction.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetimes: TokenLifetimes,
}

impl TokenCodec {
    /// Create a codec with the default lifetimes.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self::with_lifetimes(secret, TokenLifetimes::default())
    }

    /// Create a codec with explicit lifetimes.
    pub fn with_lifetimes(secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetimes,
        }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Issue a token for `subject` valid for `ttl_minutes`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed, or `ttl_minutes` puts the
    ///   expiry out of range
    pub fn issue(
        &self,
        subject: &str,
        token_type: TokenType,
        ttl_minutes: i64,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, token_type, ttl_minutes)?;

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Issue an access token with the configured access lifetime.
    pub fn issue_access(&self, email: &str) -> Result<String, TokenError> {
        tracing::debug!("Creating access token");
        self.issue(
            email,
            TokenType::Access,
            self.lifetimes.for_type(TokenType::Access),
        )
    }

    /// Issue an email confirmation token with the configured confirm lifetime.
    pub fn issue_confirmation(&self, email: &str) -> Result<String, TokenError> {
        tracing::debug!("Creating confirmation token");
        self.issue(
            email,
            TokenType::Confirm,
            self.lifetimes.for_type(TokenType::Confirm),
        )
    }

    /// Decode a token and return its subject.
    ///
    /// Checks run in order: signature and format, expiry, subject, type.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, unparseable or wrongly signed token
    /// * `TokenExpired` - Valid signature but `exp` is in the past
    /// * `MissingSubject` - Valid token without a `sub` claim
    /// * `WrongTokenType` - Valid token of another class
    pub fn decode(&self, token: &str, expected: TokenType) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => {
                    tracing::debug!(error = %e, "Token rejected");
                    TokenError::InvalidToken
                }
            })?
            .claims;

        let subject = claims.sub.ok_or(TokenError::MissingSubject)?;

        if claims.token_type != Some(expected) {
            return Err(TokenError::WrongTokenType { expected });
        }

        Ok(subject)
    }
}
