use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::{engine::general_purpose::URL_SAFE, Engine};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{PorticoError, PorticoState};

/// Session tokens stay valid for one hour.
pub const TOKEN_LIFETIME_SECS: u64 = 3600;

pub const OAUTH_STATE_COOKIE: &str = "portico_oauth_state";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub email: String,
    pub exp: u64,
}

/// Signs and verifies HS256 session tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
        }
    }

    pub fn issue(&self, email: &str) -> Result<String, PorticoError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|error| PorticoError::Internal(format!("{}", error)))?
            .as_secs();

        self.issue_with_expiry(email, now + TOKEN_LIFETIME_SECS)
    }

    pub fn issue_with_expiry(&self, email: &str, exp: u64) -> Result<String, PorticoError> {
        let claims = Claims {
            email: email.to_string(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|error| PorticoError::Internal(format!("{}", error)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, PorticoError> {
        Ok(decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims)
    }
}

/// The caller identified by a valid `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
}

#[async_trait]
impl FromRequestParts<PorticoState> for AuthenticatedUser {
    type Rejection = PorticoError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &PorticoState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(PorticoError::MissingToken)?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(PorticoError::InvalidToken)?;

        let claims = state.keys.verify(token.trim())?;

        Ok(AuthenticatedUser {
            email: claims.email,
        })
    }
}

/// A random value tying the OAuth callback to the browser that started it.
pub fn generate_oauth_state() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE.encode(bytes)
}

pub fn oauth_state_cookie(state: String) -> Cookie<'static> {
    Cookie::build((OAUTH_STATE_COOKIE, state))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/auth")
        .max_age(time::Duration::minutes(10))
        .build()
}

#[cfg(test)]
pub mod tests {
    use anyhow::Result;

    use super::{generate_oauth_state, TokenKeys};
    use crate::PorticoError;

    #[test]
    fn it_round_trips_the_email_claim() -> Result<()> {
        let keys = TokenKeys::new(b"secret");
        let token = keys.issue("dev@example.com")?;

        assert_eq!(token.split('.').count(), 3);
        assert_eq!(keys.verify(&token)?.email, "dev@example.com");

        Ok(())
    }

    #[test]
    fn it_rejects_tokens_signed_with_another_secret() -> Result<()> {
        let token = TokenKeys::new(b"other").issue("dev@example.com")?;

        assert!(matches!(
            TokenKeys::new(b"secret").verify(&token),
            Err(PorticoError::InvalidToken)
        ));

        Ok(())
    }

    #[test]
    fn it_rejects_expired_tokens() -> Result<()> {
        let keys = TokenKeys::new(b"secret");
        let token = keys.issue_with_expiry("dev@example.com", 1_000)?;

        assert!(matches!(keys.verify(&token), Err(PorticoError::InvalidToken)));

        Ok(())
    }

    #[test]
    fn it_generates_distinct_states() {
        let first = generate_oauth_state();

        assert_eq!(first.len(), 24);
        assert_ne!(first, generate_oauth_state());
    }
}
