use std::str::FromStr;
use std::time::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use na_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HMAC-signed access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenService {
    pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(30 * 60);

    pub fn new(secret: &str, algorithm: Algorithm, lifetime: Duration) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::Config("JWT secret must not be empty".to_string()));
        }
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(Error::Config(format!(
                "Unsupported JWT algorithm {:?}; use HS256, HS384 or HS512",
                algorithm
            )));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            lifetime,
        })
    }

    /// Like [`TokenService::new`] with the algorithm given by name, e.g. `HS256`.
    pub fn from_algorithm_name(secret: &str, algorithm: &str, lifetime: Duration) -> Result<Self> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| Error::Config(format!("Unknown JWT algorithm '{}'", algorithm)))?;
        Self::new(secret, algorithm, lifetime)
    }

    pub fn create_token(&self, user_id: i64) -> Result<String> {
        let now = chrono::Utc::now();
        let lifetime = chrono::Duration::from_std(self.lifetime)
            .map_err(|e| Error::Config(format!("Token lifetime out of range: {}", e)))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| Error::External(e.into()))
    }

    /// Any decoding failure is reported as `Error::Unauthorized`.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(self.algorithm);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| Error::Unauthorized("Could not validate credentials".to_string()))
    }
}
