use anyhow::anyhow;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

/// Credentials are stored as salted argon2 hashes; the plaintext never
/// reaches the database.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hashed.to_string())
}

/// Full argon2 verification against a stored hash. A stored value that is
/// not a valid hash string is an error, not a mismatch.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| anyhow!("parse stored password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_verifies_the_original_password() {
        let hash = hash_password("plum-galette-9").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("plum-galette-9", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("plum-galette-9").unwrap();
        assert!(!verify_password("plum-galette-8", &hash).unwrap());
    }

    #[test]
    fn equal_passwords_hash_differently_per_salt() {
        let first = hash_password("same-secret").unwrap();
        let second = hash_password("same-secret").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same-secret", &second).unwrap());
    }

    #[test]
    fn plaintext_left_in_the_hash_column_is_an_error() {
        let err = verify_password("p1", "p1").unwrap_err();
        assert!(err.to_string().contains("parse stored password hash"));
    }
}
