use crate::errors::HasherError;

/// Salted one-way hashing of secrets.
///
/// Implementations are shared across threads and called concurrently.
pub trait Hasher: Send + Sync {
    /// Hash `secret`, returning a self-describing encoded hash.
    ///
    /// # Errors
    /// * `EmptyInput` - `secret` is empty
    /// * Implementation-specific failures
    fn encode(&self, secret: &[u8]) -> Result<String, HasherError>;

    /// Check whether `encoded_hash` is a hash of `secret`.
    ///
    /// A well-formed hash of a different secret yields `Ok(false)`.
    ///
    /// # Errors
    /// * `EmptyInput` - `secret` is empty
    /// * `EmptyHash` - `encoded_hash` is empty
    /// * Implementation-specific failures
    fn verify(&self, secret: &[u8], encoded_hash: &str) -> Result<bool, HasherError>;
}
