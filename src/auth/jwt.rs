use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by access tokens issued by the auth service.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    pub username: String,
    /// Admin privilege, looked up by the auth service when the token is issued.
    #[serde(default)]
    pub is_admin: bool,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued-at time (Unix timestamp).
    pub iat: i64,
    pub jti: String,
}

/// Encode an access token the way the auth service does.
///
/// # Errors
///
/// Returns an error if JWT encoding fails.
pub fn encode_access_token(
    user_id: i32,
    username: &str,
    is_admin: bool,
    secret: &str,
    ttl_secs: i64,
) -> anyhow::Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        exp: now + ttl_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key)
        .map_err(|e| anyhow::anyhow!("Failed to encode access token: {e}"))
}

/// Validate an access token and return its claims.
///
/// # Errors
///
/// Returns an error if the token is malformed, has a bad signature, or is expired.
pub fn validate_access_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)
        .map_err(|e| anyhow::anyhow!("Invalid access token: {e}"))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn round_trips_identity_and_admin_claim() {
        let token = encode_access_token(12, "mod_jane", true, SECRET, 900).unwrap_or_default();
        let claims = validate_access_token(&token, SECRET).ok();
        let claims = claims.as_ref();

        assert_eq!(claims.map(|c| c.sub.as_str()), Some("12"));
        assert_eq!(claims.map(|c| c.is_admin), Some(true));
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = encode_access_token(1, "someone", false, SECRET, 900).unwrap_or_default();
        assert!(validate_access_token(&token, "another-secret-another-secret!!").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let token = encode_access_token(1, "someone", false, SECRET, -3600).unwrap_or_default();
        assert!(validate_access_token(&token, SECRET).is_err());
    }
}
