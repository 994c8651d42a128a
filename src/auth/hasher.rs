//! Argon2id password hashing.
//!
//! Each hash gets its own random salt, so hashing the same password twice yields
//! two different PHC strings that both verify. Verification re-derives the hash
//! with the salt and parameters embedded in the stored string and compares in
//! constant time.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{Error as PasswordHashError, SaltString},
};
use rand::rngs::OsRng;

use super::error::AuthError;

/// Argon2id cost parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HasherConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Hasher {
    params: Params,
}

impl Hasher {
    /// Build a hasher with the given cost.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if Argon2 rejects the parameters.
    pub fn new(config: HasherConfig) -> Result<Self, AuthError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::Configuration(format!("invalid argon2 parameters: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a freshly generated salt.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Hash`] if hashing fails.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Check a password against a stored PHC hash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Hash`] if the stored hash cannot be parsed or the
    /// verifier fails for a reason other than a mismatch.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| AuthError::Hash(format!("invalid stored hash: {e}")))?;

        match self.argon2().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(AuthError::Hash(e.to_string())),
        }
    }
}
