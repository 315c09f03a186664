use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value as JsonValue;

use crate::CoreError;

/// Wall-clock source used to judge token expiry.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn unix_seconds(&self) -> f64;
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> f64 {
        self.0
    }
}

/// Claims read from a bearer token without verifying its signature.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub exp: Option<f64>,
}

impl TokenClaims {
    pub fn decode(token: &str) -> Result<Self, CoreError> {
        let segments: Vec<&str> = token.split('.').collect();
        let payload = match segments.as_slice() {
            [_, payload, _] => *payload,
            _ => {
                return Err(CoreError::TokenMalformed(format!(
                    "expected 3 segments, found {}",
                    segments.len()
                )))
            }
        };

        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        let claims: JsonValue = serde_json::from_slice(&bytes)
            .map_err(|error| CoreError::TokenMalformed(format!("{}", error)))?;

        let claims = match claims {
            JsonValue::Object(claims) => claims,
            _ => return Err(CoreError::TokenMalformed("claims are not an object".into())),
        };

        let exp = match claims.get("exp") {
            None => None,
            Some(JsonValue::Number(exp)) => exp.as_f64(),
            Some(_) => return Err(CoreError::TokenMalformed("exp is not a number".into())),
        };

        Ok(TokenClaims { exp })
    }

    pub fn is_expired_at(&self, now: f64) -> bool {
        matches!(self.exp, Some(exp) if exp < now)
    }
}

/// Checks that a token decodes and, when it carries `exp`, that it has not
/// passed. Tokens without `exp` never expire.
pub fn check_token<C: Clock + ?Sized>(token: &str, clock: &C) -> Result<TokenClaims, CoreError> {
    let claims = TokenClaims::decode(token)?;

    if claims.is_expired_at(clock.unix_seconds()) {
        return Err(CoreError::TokenExpired);
    }

    Ok(claims)
}
