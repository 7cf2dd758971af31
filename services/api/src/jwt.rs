//! JWT service for token generation and validation
//!
//! Tokens are HS256-signed with a shared secret. The subject is the user's
//! email. Two kinds exist: access tokens guard the catalog mutations, and
//! password-reset tokens are mailed out by the password retrieval flow. A token
//! of one kind is never accepted where the other is expected.

use anyhow::Result;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, get_current_timestamp,
};
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Access token expiration time in seconds (default: 15 minutes)
    pub access_token_expiry: u64,
    /// Password reset token expiration time in seconds (default: 1 hour)
    pub reset_token_expiry: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_expiry: 900,
            reset_token_expiry: 3600,
        }
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User email
    pub sub: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
    /// Token type (access or password reset)
    pub token_type: TokenType,
}

/// Token type enum
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum TokenType {
    /// Bearer credential for protected routes
    Access,
    /// Single-purpose credential for setting a new password
    PasswordReset,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Result<Self> {
        if config.secret.is_empty() {
            anyhow::bail!("JWT secret is not configured");
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Ok(JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Generate an access token bound to an email
    pub fn generate_access_token(&self, email: &str) -> Result<String> {
        self.generate(email, TokenType::Access, self.config.access_token_expiry)
    }

    /// Generate a password reset token bound to an email
    pub fn generate_reset_token(&self, email: &str) -> Result<String> {
        self.generate(
            email,
            TokenType::PasswordReset,
            self.config.reset_token_expiry,
        )
    }

    fn generate(&self, email: &str, token_type: TokenType, expiry: u64) -> Result<String> {
        let now = get_current_timestamp();

        let claims = Claims {
            sub: email.to_string(),
            iat: now,
            exp: now + expiry,
            token_type,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token of the expected kind and return the claims
    pub fn validate_token(&self, token: &str, expected: TokenType) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        if token_data.claims.token_type != expected {
            anyhow::bail!(
                "Expected a {:?} token, got {:?}",
                expected,
                token_data.claims.token_type
            );
        }

        Ok(token_data.claims)
    }

    /// Get the access token expiry time
    pub fn access_token_expiry(&self) -> u64 {
        self.config.access_token_expiry
    }

    /// Get the reset token expiry time
    pub fn reset_token_expiry(&self) -> u64 {
        self.config.reset_token_expiry
    }
}
