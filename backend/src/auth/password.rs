use bcrypt::BcryptError;

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(password, cost)
}

/// Verify a password against a bcrypt hash
pub fn verify_password(password: &str, hash: Option<&str>) -> Result<bool, BcryptError> {
    // No stored hash means nothing can match
    let Some(hash) = hash else {
        return Ok(false);
    };
    bcrypt::verify(password, hash)
}
