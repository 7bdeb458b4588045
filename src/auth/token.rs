use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::Token;

const ARGON2_MEMORY_KIB: u32 = 64 * 1024;
const ARGON2_ITERATIONS: u32 = 1;
const ARGON2_PARALLELISM: u32 = 4;
const ARGON2_OUTPUT_LEN: usize = 32;

const TOKEN_PREFIX: &str = "dayreport";
const LOOKUP_LEN: usize = 8;
const SECRET_LEN: usize = 24;
const MAX_LOOKUP_RETRIES: u32 = 3;

/// A freshly issued credential. `raw` is shown to the holder once and never
/// stored; `token` is the row to persist.
pub struct IssuedToken {
    pub raw: String,
    pub token: Token,
}

/// The two variable parts of a raw token string.
#[derive(Debug, PartialEq, Eq)]
pub struct TokenParts<'a> {
    pub lookup: &'a str,
    pub secret: &'a str,
}

/// Issues and verifies bearer tokens of the form `dayreport_<lookup>_<secret>`.
pub struct TokenIssuer {
    argon2: Argon2<'static>,
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenIssuer {
    #[must_use]
    pub fn new() -> Self {
        let params = Params::new(
            ARGON2_MEMORY_KIB,
            ARGON2_ITERATIONS,
            ARGON2_PARALLELISM,
            Some(ARGON2_OUTPUT_LEN),
        )
        .expect("static argon2 params are valid");

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Issues an admin token (no profile) or a profile token.
    pub fn issue(&self, profile_id: Option<String>, ttl: Option<Duration>) -> Result<IssuedToken> {
        let now = Utc::now();
        let lookup = random_lookup();
        let raw = format!("{TOKEN_PREFIX}_{lookup}_{}", random_secret());
        let expires_at: Option<DateTime<Utc>> = ttl.map(|ttl| now + ttl);

        let token = Token {
            id: Uuid::new_v4().to_string(),
            token_hash: self.hash(&raw)?,
            token_lookup: lookup,
            is_admin: profile_id.is_none(),
            profile_id,
            created_at: now,
            expires_at,
            last_used_at: None,
        };

        Ok(IssuedToken { raw, token })
    }

    /// Issues a token and persists it, retrying on lookup collisions.
    pub fn issue_stored(
        &self,
        store: &dyn Store,
        profile_id: Option<&str>,
        ttl: Option<Duration>,
    ) -> Result<IssuedToken> {
        for _ in 0..MAX_LOOKUP_RETRIES {
            let issued = self.issue(profile_id.map(str::to_string), ttl)?;
            match store.create_token(&issued.token) {
                Ok(()) => return Ok(issued),
                Err(Error::TokenLookupCollision) => {
                    tracing::debug!("Token lookup collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::TokenLookupCollision)
    }

    fn hash(&self, raw: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| Error::Config(format!("failed to hash token: {e}")))
    }

    /// Checks a raw token against a stored PHC hash.
    pub fn verify(&self, raw: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| Error::Config(format!("invalid hash format: {e}")))?;

        match self.argon2.verify_password(raw.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::Config(format!("failed to verify token: {e}"))),
        }
    }
}

fn random_lookup() -> String {
    Uuid::new_v4().simple().to_string()[..LOOKUP_LEN].to_string()
}

fn random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LEN)
        .map(char::from)
        .collect()
}

/// Splits a raw token into lookup and secret, rejecting anything malformed.
pub fn parse_token(raw: &str) -> Result<TokenParts<'_>> {
    let rest = raw
        .strip_prefix(TOKEN_PREFIX)
        .and_then(|r| r.strip_prefix('_'))
        .ok_or(Error::InvalidTokenFormat)?;
    let (lookup, secret) = rest.split_once('_').ok_or(Error::InvalidTokenFormat)?;

    let well_formed = lookup.len() == LOOKUP_LEN
        && secret.len() == SECRET_LEN
        && lookup.chars().all(|c| c.is_ascii_alphanumeric())
        && secret.chars().all(|c| c.is_ascii_alphanumeric());
    if !well_formed {
        return Err(Error::InvalidTokenFormat);
    }

    Ok(TokenParts { lookup, secret })
}
