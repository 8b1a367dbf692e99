use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::audit::{AuditLog, UNKNOWN_USER};
use crate::auth::clock::Clock;
use crate::auth::credentials::CredentialStore;
use crate::config::{AuthConfig, MAX_TOKEN_TTL_MINUTES};
use crate::error::{AppError, AuthError};

pub const LOGIN_SUCCESS: &str = "Successful login";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

/// Outcome of checking a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Valid { username: String },
    Invalid,
}

/// Pulls the token out of an `Authorization: <scheme> <token>` header.
///
/// The scheme itself is not checked. A missing header, a header without a
/// second segment, or an empty second segment all yield `None`.
pub fn extract_token(header: Option<&str>) -> Option<&str> {
    header?.split(' ').nth(1).filter(|token| !token.is_empty())
}

/// Issues and verifies HS256 session tokens. Holds no per-token state.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        if secret.trim().is_empty() {
            return Err(AppError::ConfigError("jwt secret must not be empty".into()));
        }
        if ttl <= Duration::zero() || ttl > Duration::minutes(MAX_TOKEN_TTL_MINUTES) {
            return Err(AppError::ConfigError(format!(
                "token ttl must be between 1 and {} minutes",
                MAX_TOKEN_TTL_MINUTES
            )));
        }

        // Expiry is checked against the injected clock rather than the
        // library's view of system time.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            clock,
        })
    }

    pub fn from_config(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        // Checked before building the Duration, which panics out of range
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&config.token_ttl_minutes) {
            return Err(AppError::ConfigError(format!(
                "token ttl must be between 1 and {} minutes",
                MAX_TOKEN_TTL_MINUTES
            )));
        }
        Self::new(
            &config.jwt_secret,
            Duration::minutes(config.token_ttl_minutes),
            clock,
        )
    }

    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = self.clock.now();
        let claims = Claims {
            username: username.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?;

        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Verification {
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!("Rejected session token: {}", e);
                return Verification::Invalid;
            }
        };

        if self.clock.now().timestamp() >= claims.exp {
            debug!("Rejected expired session token");
            return Verification::Invalid;
        }

        Verification::Valid { username: claims.username }
    }
}

/// Login and the authorization preamble shared by every protected handler.
pub struct AuthService {
    credentials: CredentialStore,
    tokens: TokenService,
    audit: Arc<dyn AuditLog>,
}

impl AuthService {
    pub fn new(credentials: CredentialStore, tokens: TokenService, audit: Arc<dyn AuditLog>) -> Self {
        Self {
            credentials,
            tokens,
            audit,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Checks the submitted pair and returns a fresh session token.
    ///
    /// Wrong username and wrong password fail identically.
    pub fn login(&self, username: Option<&str>, password: Option<&str>) -> Result<String, AppError> {
        match (username, password) {
            (Some(username), Some(password)) if self.credentials.verify(username, password) => {
                let token = self.tokens.issue(username)?;
                info!("Login successful for user: {}", username);
                self.audit.record_action(username, LOGIN_SUCCESS);
                Ok(token)
            }
            _ => {
                let username = username.unwrap_or(UNKNOWN_USER);
                warn!("Login failed for user: {}", username);
                self.audit
                    .record_error(username, "Login error: incorrect username or password");
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }

    /// Resolves the caller's username from the `Authorization` header.
    ///
    /// `operation` names the handler in the audit record when the token is
    /// absent or invalid; both cases produce the same error.
    pub fn authorize(&self, authorization: Option<&str>, operation: &str) -> Result<String, AppError> {
        let verification = match extract_token(authorization) {
            Some(token) => self.tokens.verify(token),
            None => Verification::Invalid,
        };

        match verification {
            Verification::Valid { username } => Ok(username),
            Verification::Invalid => {
                self.audit.record_error(
                    UNKNOWN_USER,
                    &format!("Token missing or invalid in {}", operation),
                );
                Err(AuthError::Unauthorized.into())
            }
        }
    }
}
