use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Hashes a password using Argon2id with a random salt.
///
/// ## Errors
/// Returns an error if password hashing fails.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ServiceError::InvalidConfiguration(format!("Failed to hash password: {e}")))?;

    Ok(password_hash.to_string())
}

/// ## Summary
/// Verifies a password against a stored Argon2 hash.
///
/// ## Errors
/// Returns `NotAuthenticated` if the password does not match, or
/// `InvalidConfiguration` if the stored hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> ServiceResult<()> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| ServiceError::InvalidConfiguration(format!("Invalid password hash: {e}")))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|err| {
            tracing::trace!("Password verification failed: {err}");
            ServiceError::NotAuthenticated
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("cantemos ao Senhor").expect("Failed to hash password");

        assert!(verify_password("cantemos ao Senhor", &hash).is_ok());
        assert!(matches!(
            verify_password("outra senha", &hash),
            Err(ServiceError::NotAuthenticated)
        ));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let first = hash_password("mesma").expect("Failed to hash password");
        let second = hash_password("mesma").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(verify_password("mesma", &first).is_ok());
        assert!(verify_password("mesma", &second).is_ok());
    }

    #[test]
    fn malformed_hash_is_a_configuration_error() {
        assert!(matches!(
            verify_password("senha", "not_a_valid_hash"),
            Err(ServiceError::InvalidConfiguration(_))
        ));
    }
}
