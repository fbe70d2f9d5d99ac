pub mod backend;
pub mod config;
pub mod encoded;
pub mod hasher;
pub mod primitive;
pub mod variant;

pub use backend::RustCryptoArgon2;
pub use config::Argon2Config;
pub use config::Argon2Option;
pub use config::Variant;
pub use config::Version;
pub use encoded::EncodedHash;
pub use hasher::Argon2Hasher;
pub use primitive::Primitive;
pub use primitive::Status;
pub use variant::parse_variant;
