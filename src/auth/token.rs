//! Session Token Module
//!
//! Issues and verifies RSA-signed JWTs. The private key only signs; anything
//! holding the public key can verify without being able to forge tokens.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::models::{Role, User};

/// Issuer claim used when none is configured
pub const DEFAULT_ISSUER: &str = "job-portal";

/// Session lifetime used when none is configured
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

// == Claims ==
/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id in decimal
    pub sub: String,
    pub role: Role,
    pub iss: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// Parses the subject back into a user id.
    pub fn user_id(&self) -> Result<u64, AuthError> {
        self.sub
            .parse()
            .map_err(|_| AuthError::Malformed(format!("subject '{}' is not a user id", self.sub)))
    }
}

// == Token Auth ==
/// Stateless token issuer/verifier.
///
/// Holds parsed keys only, so it is `Send + Sync` and can be shared across
/// request handlers without locking.
#[derive(Clone)]
pub struct TokenAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    ttl: Duration,
}

impl TokenAuth {
    // == Constructor ==
    /// Parses a PEM-encoded RSA key pair.
    ///
    /// The pair is exercised once with a probe token so that a malformed
    /// or mismatched key fails here, at startup, rather than on first login.
    pub fn new(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, AuthError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| AuthError::KeyError(format!("private key: {e}")))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| AuthError::KeyError(format!("public key: {e}")))?;

        let auth = Self {
            encoding_key,
            decoding_key,
            algorithm: Algorithm::RS256,
            issuer: DEFAULT_ISSUER.to_string(),
            ttl: DEFAULT_TOKEN_TTL,
        };
        auth.probe()?;
        Ok(auth)
    }

    /// Switches to another RSA signature algorithm (RS384, RS512, PS256, ...).
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Result<Self, AuthError> {
        if !matches!(
            algorithm,
            Algorithm::RS256
                | Algorithm::RS384
                | Algorithm::RS512
                | Algorithm::PS256
                | Algorithm::PS384
                | Algorithm::PS512
        ) {
            return Err(AuthError::KeyError(format!(
                "{algorithm:?} cannot be used with an RSA key pair"
            )));
        }
        self.algorithm = algorithm;
        self.probe()?;
        Ok(self)
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    // == Issue ==
    /// Signs a session token for `user`, valid for the configured TTL.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.issue_at(user.id, user.role, Utc::now().timestamp())
    }

    fn issue_at(&self, user_id: u64, role: Role, now: i64) -> Result<String, AuthError> {
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| {
                AuthError::Signing(format!(
                    "token lifetime of {}s is out of range",
                    self.ttl.as_secs()
                ))
            })?;
        let claims = TokenClaims {
            sub: user_id.to_string(),
            role,
            iss: self.issuer.clone(),
            iat: now,
            exp,
        };
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            match AuthError::from(e) {
                key @ AuthError::KeyError(_) => key,
                other => AuthError::Signing(other.to_string()),
            }
        })
    }

    // == Verify ==
    /// Checks signature, issuer and expiry, returning the embedded claims.
    ///
    /// No I/O: the result depends only on the token, the public key and the
    /// current time.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AuthError::from)
    }

    fn probe(&self) -> Result<(), AuthError> {
        let token = self.issue_at(0, Role::Applicant, Utc::now().timestamp())?;
        self.verify(&token).map(|_| ()).map_err(|e| match e {
            AuthError::InvalidSignature => {
                AuthError::KeyError("public key does not match private key".to_string())
            }
            other => AuthError::KeyError(other.to_string()),
        })
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat => {
                AuthError::KeyError(err.to_string())
            }
            _ => AuthError::Malformed(err.to_string()),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    const PRIVATE_PEM: &str = include_str!("../../tests/fixtures/private.pem");
    const PUBLIC_PEM: &str = include_str!("../../tests/fixtures/public.pem");
    const OTHER_PRIVATE_PEM: &str = include_str!("../../tests/fixtures/other_private.pem");
    const OTHER_PUBLIC_PEM: &str = include_str!("../../tests/fixtures/other_public.pem");

    fn auth() -> TokenAuth {
        TokenAuth::new(PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes()).unwrap()
    }

    fn user(id: u64, role: Role) -> User {
        User {
            id,
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            password_hash: String::new(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let auth = auth();
        let token = auth.issue(&user(42, Role::Employer)).unwrap();

        let claims = auth.verify(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.role, Role::Employer);
        assert_eq!(claims.iss, DEFAULT_ISSUER);
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL.as_secs() as i64);
    }

    #[test]
    fn test_verify_expired_token() {
        let auth = auth().with_ttl(Duration::from_secs(60));
        let two_minutes_ago = Utc::now().timestamp() - 120;
        let token = auth.issue_at(7, Role::Applicant, two_minutes_ago).unwrap();

        assert_eq!(auth.verify(&token), Err(AuthError::Expired));
    }

    #[test]
    fn test_issue_rejects_unrepresentable_ttl() {
        let now = Utc::now().timestamp();

        // Above i64::MAX seconds
        let auth = auth().with_ttl(Duration::from_secs(u64::MAX));
        assert!(matches!(
            auth.issue_at(1, Role::Applicant, now),
            Err(AuthError::Signing(_))
        ));

        // Fits in i64 but overflows once added to the current time
        let auth = self::auth().with_ttl(Duration::from_secs(i64::MAX as u64));
        assert!(matches!(
            auth.issue(&user(1, Role::Applicant)),
            Err(AuthError::Signing(_))
        ));
    }

    #[test]
    fn test_long_ttl_token_verifies() {
        let auth = auth().with_ttl(Duration::from_secs(365 * 24 * 60 * 60));
        let token = auth.issue(&user(9, Role::Employer)).unwrap();

        assert_eq!(auth.verify(&token).unwrap().sub, "9");
    }

    #[test]
    fn test_expired_token_from_other_key_is_invalid_signature() {
        let other = TokenAuth::new(OTHER_PRIVATE_PEM.as_bytes(), OTHER_PUBLIC_PEM.as_bytes())
            .unwrap()
            .with_ttl(Duration::from_secs(60));
        let token = other
            .issue_at(7, Role::Applicant, Utc::now().timestamp() - 120)
            .unwrap();

        // Signature is checked before expiry
        assert_eq!(auth().verify(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_verify_token_from_other_key() {
        let other = TokenAuth::new(OTHER_PRIVATE_PEM.as_bytes(), OTHER_PUBLIC_PEM.as_bytes())
            .unwrap();
        let token = other.issue(&user(1, Role::Admin)).unwrap();

        assert_eq!(auth().verify(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let auth = auth();
        let token = auth.issue(&user(1, Role::Applicant)).unwrap();
        let forged = auth.issue(&user(1, Role::Admin)).unwrap();

        // Graft the admin payload onto the applicant signature
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = forged.split('.').nth(1).unwrap();
        let tampered = parts.join(".");

        assert_eq!(auth.verify(&tampered), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_verify_malformed_token() {
        let auth = auth();
        assert!(matches!(auth.verify("not-a-token"), Err(AuthError::Malformed(_))));
        assert!(matches!(auth.verify(""), Err(AuthError::Malformed(_))));
        assert!(matches!(auth.verify("a.b.c"), Err(AuthError::Malformed(_))));
    }

    #[test]
    fn test_verify_rejects_foreign_issuer() {
        let issuer = auth().with_issuer("someone-else");
        let token = issuer.issue(&user(3, Role::Applicant)).unwrap();

        assert!(matches!(auth().verify(&token), Err(AuthError::Malformed(_))));
    }

    #[test]
    fn test_new_rejects_garbage_keys() {
        let result = TokenAuth::new(b"not a key", PUBLIC_PEM.as_bytes());
        assert!(matches!(result, Err(AuthError::KeyError(_))));

        let result = TokenAuth::new(PRIVATE_PEM.as_bytes(), b"-----BEGIN PUBLIC KEY-----");
        assert!(matches!(result, Err(AuthError::KeyError(_))));
    }

    #[test]
    fn test_new_rejects_mismatched_pair() {
        let result = TokenAuth::new(PRIVATE_PEM.as_bytes(), OTHER_PUBLIC_PEM.as_bytes());
        assert!(matches!(result, Err(AuthError::KeyError(_))));
    }

    #[test]
    fn test_with_algorithm() {
        let auth = auth().with_algorithm(Algorithm::RS384).unwrap();
        let token = auth.issue(&user(5, Role::Applicant)).unwrap();
        assert_eq!(auth.verify(&token).unwrap().sub, "5");

        // An RS256 verifier refuses RS384 tokens
        assert!(matches!(self::auth().verify(&token), Err(AuthError::Malformed(_))));

        assert!(matches!(
            self::auth().with_algorithm(Algorithm::HS256),
            Err(AuthError::KeyError(_))
        ));
    }

    fn role_strategy() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::Applicant), Just(Role::Employer), Just(Role::Admin)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        // Verify(Issue(p)) returns p's identifier and role before expiry
        #[test]
        fn prop_issue_verify_round_trip(id in any::<u64>(), role in role_strategy()) {
            let auth = auth();
            let token = auth.issue(&user(id, role)).unwrap();
            let claims = auth.verify(&token).unwrap();

            prop_assert_eq!(claims.user_id().unwrap(), id);
            prop_assert_eq!(claims.role, role);
        }
    }
}
