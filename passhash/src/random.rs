use argon2::password_hash::rand_core;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

/// Source of cryptographically secure random bytes for salts.
///
/// Shared by every concurrent call on a hasher, so implementations must be
/// safe to use from many threads at once without repeating output.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    /// Any failure of the underlying generator, returned as is
    fn try_fill(&self, dest: &mut [u8]) -> Result<(), rand_core::Error>;
}

/// Operating system CSPRNG.
///
/// `OsRng` holds no state and reads the system generator on every call,
/// which is safe to share across threads without locking.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn try_fill(&self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        OsRng.try_fill_bytes(dest)
    }
}
