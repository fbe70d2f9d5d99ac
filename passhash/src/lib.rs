//! Salted password hashing library
//!
//! Provides memory-hard password hashing and verification over Argon2:
//! - Configuration with defaults and ordered single-field overrides
//! - Encoding with a fresh secure random salt per call
//! - Verification driven by the variant embedded in the encoded hash
//!
//! The Argon2 engine and the salt source are pluggable, so the hashing
//! flow stays the same across backends and tests can substitute failures.
//!
//! # Examples
//!
//! ## Hash and verify
//! ```
//! use passhash::{Argon2Hasher, Argon2Option};
//!
//! let hasher = Argon2Hasher::with_options([
//!     Argon2Option::MemoryKb(19456),
//!     Argon2Option::Iterations(2),
//!     Argon2Option::Parallelism(1),
//! ]);
//!
//! let hash = hasher.encode(b"my_password").unwrap();
//! assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
//!
//! assert!(hasher.verify(b"my_password", &hash).unwrap());
//! assert!(!hasher.verify(b"wrong_password", &hash).unwrap());
//! ```
//!
//! ## Hashes from another variant
//! ```
//! use passhash::{Argon2Config, Argon2Hasher, Variant};
//!
//! let config = Argon2Config::new()
//!     .with_memory_kb(64)
//!     .with_iterations(1)
//!     .with_parallelism(1);
//!
//! let hash = Argon2Hasher::with_config(config.clone().with_variant(Variant::D))
//!     .encode(b"my_password")
//!     .unwrap();
//!
//! // The `$argon2d` prefix wins over the configured variant
//! let hasher = Argon2Hasher::with_config(config.with_variant(Variant::ID));
//! assert!(hasher.verify(b"my_password", &hash).unwrap());
//! ```

pub mod argon2;
pub mod errors;
pub mod hasher;
pub mod random;

// Re-export commonly used items
pub use crate::argon2::Argon2Config;
pub use crate::argon2::Argon2Hasher;
pub use crate::argon2::Argon2Option;
pub use crate::argon2::Primitive;
pub use crate::argon2::RustCryptoArgon2;
pub use crate::argon2::Status;
pub use crate::argon2::Variant;
pub use crate::argon2::Version;
pub use errors::HasherError;
pub use hasher::Hasher;
pub use random::OsRandom;
pub use random::RandomSource;
