//! Authentication service.
//!
//! Handles registration and password login. Passwords are stored as salted
//! Argon2id hashes and verified with the crate's constant-time verifier;
//! plaintext never reaches the database.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use crate::db::users::UserRepository;
use crate::models::user::{NewUser, User};

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// Names are not required to be unique; duplicate registrations simply
    /// create additional accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails and
    /// `AuthError::Repository` if the insert fails.
    pub async fn register(&self, new_user: &NewUser, password: &str) -> Result<User, AuthError> {
        let password_hash = hash_password(password)?;

        let user = self.users.create(new_user, &password_hash).await?;

        Ok(user)
    }

    /// Login with name and password.
    ///
    /// Looks up the first account with the given name (the store's
    /// first-match semantics when names collide).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches the
    /// name or the password does not verify.
    pub async fn login(&self, name: &str, password: &str) -> Result<User, AuthError> {
        let (user, password_hash) = self
            .users
            .find_first_by_name(name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("masala-dosa-9").expect("hashing failed");
        assert_ne!(hash, "masala-dosa-9");
        assert!(verify_password("masala-dosa-9", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_fails_verification() {
        let hash = hash_password("correct-horse").expect("hashing failed");
        assert!(matches!(
            verify_password("wrong-horse", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_garbage_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
