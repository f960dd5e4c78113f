use crate::error::AppError;
use bcrypt::{hash, verify};

/// Range of work factors bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Hashes a password with a per-call random salt at the given bcrypt cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let hashed = hash_password("pw1", MIN_BCRYPT_COST).unwrap();

        assert_ne!(hashed, "pw1");
        assert!(verify_password("pw1", &hashed).unwrap());
        assert!(!verify_password("pw2", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same", MIN_BCRYPT_COST).unwrap();
        let second = hash_password("same", MIN_BCRYPT_COST).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        match verify_password("pw1", "invalidhashformat") {
            Err(AppError::Internal(msg)) => assert!(msg.contains("Failed to verify password")),
            Ok(false) => {}
            Ok(true) => panic!("Password verification should fail for invalid hash format"),
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }
}
