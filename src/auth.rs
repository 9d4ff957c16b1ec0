//! Password hashing and login decisions.
//!
//! Hashes are bcrypt strings (`$2b$<cost>$<salt+digest>`), so every hash carries
//! its own salt and work factor and verification needs nothing but the stored
//! string.
//!
//! bcrypt only reads the first 72 bytes of its input, so longer passwords are
//! refused when hashing and never verify.

use thiserror::Error;
use tracing::warn;

use crate::models::{Credentials, UserStatus};

/// Longest password bcrypt hashes without truncation
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password is longer than {} bytes", MAX_PASSWORD_BYTES)]
    PasswordTooLong,

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    Inactive,
    WrongPassword,
    UnknownUser,
}

/// Hash a password with a freshly generated salt
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::PasswordTooLong);
    }
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a password against a stored hash. A malformed hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if password.len() > MAX_PASSWORD_BYTES {
        return false;
    }
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(err) => {
            warn!(error = %err, "stored password hash could not be parsed");
            false
        }
    }
}

/// Decide a login attempt. Account status is checked before the password.
pub fn authenticate(credentials: Option<&Credentials>, password: &str) -> LoginOutcome {
    let Some(credentials) = credentials else {
        return LoginOutcome::UnknownUser;
    };

    if credentials.status == UserStatus::Inactive {
        return LoginOutcome::Inactive;
    }

    if verify_password(password, &credentials.password_hash) {
        LoginOutcome::Authenticated
    } else {
        LoginOutcome::WrongPassword
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COST: u32 = 4;

    fn credentials(password: &str, status: UserStatus) -> Credentials {
        Credentials {
            password_hash: hash_password(password, COST).unwrap(),
            status,
        }
    }

    #[test]
    fn verifies_only_the_original_password() {
        let hash = hash_password("s3cret", COST).unwrap();
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("s3cret ", &hash));
        assert!(!verify_password("S3cret", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let first = hash_password("repeat", COST).unwrap();
        let second = hash_password("repeat", COST).unwrap();
        assert_ne!(first, second);
        assert!(verify_password("repeat", &first));
        assert!(verify_password("repeat", &second));
    }

    #[test]
    fn passwords_over_the_bcrypt_limit_are_refused() {
        let at_limit = "a".repeat(MAX_PASSWORD_BYTES);
        let over_limit = format!("{at_limit}correct-suffix");

        assert!(matches!(
            hash_password(&over_limit, COST),
            Err(AuthError::PasswordTooLong)
        ));
        assert_eq!(
            AuthError::PasswordTooLong.to_string(),
            "password is longer than 72 bytes"
        );

        let hash = hash_password(&at_limit, COST).unwrap();
        assert!(verify_password(&at_limit, &hash));
        assert!(!verify_password(&over_limit, &hash));
    }

    #[test]
    fn shared_long_prefix_does_not_verify() {
        let prefix = "a".repeat(MAX_PASSWORD_BYTES - 1);
        let original = format!("{prefix}b");
        let hash = hash_password(&original, COST).unwrap();

        assert!(verify_password(&original, &hash));
        assert!(!verify_password(&format!("{prefix}c"), &hash));
        assert!(!verify_password(&format!("{original}totally-different"), &hash));
        assert!(!verify_password(&prefix, &hash));
    }

    #[test]
    fn malformed_hash_does_not_verify() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn active_user_with_right_password_authenticates() {
        let creds = credentials("pw", UserStatus::Active);
        assert_eq!(authenticate(Some(&creds), "pw"), LoginOutcome::Authenticated);
        assert_eq!(authenticate(Some(&creds), "nope"), LoginOutcome::WrongPassword);
    }

    #[test]
    fn inactive_user_is_rejected_even_with_right_password() {
        let creds = credentials("pw", UserStatus::Inactive);
        assert_eq!(authenticate(Some(&creds), "pw"), LoginOutcome::Inactive);
        assert_eq!(authenticate(Some(&creds), "wrong"), LoginOutcome::Inactive);
    }

    #[test]
    fn missing_user_is_unknown() {
        assert_eq!(authenticate(None, "pw"), LoginOutcome::UnknownUser);
    }
}
