use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};
use uuid::Uuid;

// Errors returned by access-token verification + strict claim validation.
//
// These exist for logging only. The auth gate collapses every variant into
// the same 401 so callers cannot tell "bad token" from "unknown subject".
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
    InvalidSubUuid,
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::InvalidSubUuid => write!(f, "invalid 'sub' (expected UUID)"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Access token (JWT) claims.
///
/// The claims contract is `sub` (user id, UUID string) + `exp` only.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    pub exp: u64,
}

/// AuthService が返す「検証済み・アプリ側で使う型」
///
/// - `sub` はプロジェクト規約として UUID なので、ここでは `Uuid` に昇格させる
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub user_id: Uuid,
}

/// HS256 (shared secret) access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret);

        let mut validation = Validation::new(Algorithm::HS256);
        // claims contract は sub + exp のみ。iss/aud は検証しない。
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    // Verify signature + exp and decode the claims.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks signature and `exp`.
    /// This method additionally checks:
    /// - `sub` is present, non-empty, and parses as a UUID
    /// - `exp` is not a meaningless zero
    pub fn verify_strict(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }
        if claims.exp == 0 {
            return Err(AccessJwtError::EmptyClaim("exp"));
        }

        if Self::parse_sub_uuid(&claims.sub).is_err() {
            return Err(AccessJwtError::InvalidSubUuid);
        }

        Ok(claims)
    }

    /// Verify + strict claim validation, then convert claims into an
    /// application-friendly type.
    ///
    /// This is the entry-point used by the auth gate middleware.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify_strict(token)?;

        let user_id =
            Self::parse_sub_uuid(&claims.sub).map_err(|_| AccessJwtError::InvalidSubUuid)?;

        Ok(VerifiedAccessToken { user_id })
    }

    // Helper: parse `sub` into UUID
    pub fn parse_sub_uuid(sub: &str) -> Result<Uuid, ()> {
        Uuid::parse_str(sub).map_err(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};
    use serde::Serialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &[u8] = b"test-signing-secret";

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: u64,
    }

    fn now_unix() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn sign(secret: &[u8], sub: &str, exp: u64) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &TestClaims {
                sub: sub.to_string(),
                exp,
            },
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_resolves_to_the_same_user_every_time() {
        let auth = AuthService::new(SECRET, 0);
        let user_id = Uuid::new_v4();
        let token = sign(SECRET, &user_id.to_string(), now_unix() + 3600);

        let first = auth.verify_verified(&token).unwrap();
        let second = auth.verify_verified(&token).unwrap();
        assert_eq!(first.user_id, user_id);
        assert_eq!(second.user_id, user_id);
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = AuthService::new(SECRET, 0);
        let token = sign(SECRET, &Uuid::new_v4().to_string(), now_unix() - 3600);

        assert!(matches!(
            auth.verify_verified(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn leeway_accepts_a_just_expired_token() {
        let auth = AuthService::new(SECRET, 120);
        let token = sign(SECRET, &Uuid::new_v4().to_string(), now_unix() - 30);

        assert!(auth.verify_verified(&token).is_ok());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let auth = AuthService::new(SECRET, 0);
        let token = sign(SECRET, &Uuid::new_v4().to_string(), now_unix() + 3600);

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(auth.verify_verified(&tampered).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let auth = AuthService::new(SECRET, 0);
        let token = sign(
            b"some-other-secret",
            &Uuid::new_v4().to_string(),
            now_unix() + 3600,
        );

        assert!(matches!(
            auth.verify_verified(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let auth = AuthService::new(SECRET, 0);
        let token = sign(SECRET, "user-123", now_unix() + 3600);

        assert!(matches!(
            auth.verify_verified(&token),
            Err(AccessJwtError::InvalidSubUuid)
        ));
    }

    #[test]
    fn empty_subject_is_rejected() {
        let auth = AuthService::new(SECRET, 0);
        let token = sign(SECRET, "  ", now_unix() + 3600);

        assert!(matches!(
            auth.verify_verified(&token),
            Err(AccessJwtError::EmptyClaim("sub"))
        ));
    }
}
