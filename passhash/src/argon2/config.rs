use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Argon2 algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Data-dependent memory access (argon2d)
    D,
    /// Data-independent memory access (argon2i)
    I,
    /// Hybrid of the two (argon2id)
    ID,
}

impl Variant {
    /// Identifier used in the PHC string, e.g. `argon2id`.
    pub fn ident(self) -> &'static str {
        match self {
            Self::D => "argon2d",
            Self::I => "argon2i",
            Self::ID => "argon2id",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}

/// Argon2 algorithm version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    /// Version 1.0 (0x10)
    V10,
    /// Version 1.3 (0x13)
    V13,
    /// Whatever the primitive considers current, which is 1.3.
    Default,
}

impl Version {
    /// Numeric version as written in the `v=` field.
    pub fn number(self) -> u32 {
        match self {
            Self::V10 => 0x10,
            Self::V13 | Self::Default => 0x13,
        }
    }

    /// Version for a numeric `v=` value.
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            0x10 => Some(Self::V10),
            0x13 => Some(Self::V13),
            _ => None,
        }
    }
}

/// Argon2 configuration.
///
/// Values are not validated here. Cost parameters are primitive-specific,
/// so invalid ones (zero memory, too few lanes) surface as primitive errors
/// when encoding or verifying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Argon2Config {
    /// Time cost (number of passes)
    pub iterations: u32,

    /// Memory cost in kibibytes
    pub memory_kb: u32,

    /// Number of lanes
    pub parallelism: u32,

    /// Output length in bytes
    pub hash_length: u32,

    /// Salt length in bytes; zero leaves the hasher unable to encode
    pub salt_length: u32,

    /// Algorithm family
    pub variant: Variant,

    /// Algorithm version
    pub version: Version,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            iterations: 8,
            memory_kb: 1 << 16,
            parallelism: 8,
            hash_length: 64,
            salt_length: 64,
            variant: Variant::ID,
            version: Version::V13,
        }
    }
}

impl Argon2Config {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from the defaults overlaid with `options`.
    ///
    /// # Arguments
    /// * `options` - Options applied in order; a later option wins over an
    ///   earlier one targeting the same field
    ///
    /// # Returns
    /// Resulting configuration
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = Argon2Option>,
    {
        options
            .into_iter()
            .fold(Self::default(), |config, option| option.apply(config))
    }

    /// Set the time cost.
    pub fn with_iterations(self, iterations: u32) -> Self {
        Argon2Option::Iterations(iterations).apply(self)
    }

    /// Set the memory cost in kibibytes.
    pub fn with_memory_kb(self, memory_kb: u32) -> Self {
        Argon2Option::MemoryKb(memory_kb).apply(self)
    }

    /// Set the number of lanes.
    pub fn with_parallelism(self, parallelism: u32) -> Self {
        Argon2Option::Parallelism(parallelism).apply(self)
    }

    /// Set the output length in bytes.
    pub fn with_hash_length(self, hash_length: u32) -> Self {
        Argon2Option::HashLength(hash_length).apply(self)
    }

    /// Set the salt length in bytes.
    pub fn with_salt_length(self, salt_length: u32) -> Self {
        Argon2Option::SaltLength(salt_length).apply(self)
    }

    /// Set the algorithm family.
    pub fn with_variant(self, variant: Variant) -> Self {
        Argon2Option::Variant(variant).apply(self)
    }

    /// Set the algorithm version.
    pub fn with_version(self, version: Version) -> Self {
        Argon2Option::Version(version).apply(self)
    }
}

/// A single-field change to an [`Argon2Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argon2Option {
    /// Time cost
    Iterations(u32),
    /// Memory cost in kibibytes
    MemoryKb(u32),
    /// Number of lanes
    Parallelism(u32),
    /// Output length in bytes
    HashLength(u32),
    /// Salt length in bytes
    SaltLength(u32),
    /// Algorithm family
    Variant(Variant),
    /// Algorithm version
    Version(Version),
}

impl Argon2Option {
    /// Apply this option to `config`, returning the changed configuration.
    pub fn apply(self, mut config: Argon2Config) -> Argon2Config {
        match self {
            Self::Iterations(value) => config.iterations = value,
            Self::MemoryKb(value) => config.memory_kb = value,
            Self::Parallelism(value) => config.parallelism = value,
            Self::HashLength(value) => config.hash_length = value,
            Self::SaltLength(value) => config.salt_length = value,
            Self::Variant(value) => config.variant = value,
            Self::Version(value) => config.version = value,
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = Argon2Config::default();

        assert_eq!(config.iterations, 8);
        assert_eq!(config.memory_kb, 65536);
        assert_eq!(config.parallelism, 8);
        assert_eq!(config.hash_length, 64);
        assert_eq!(config.salt_length, 64);
        assert_eq!(config.variant, Variant::ID);
        assert_eq!(config.version, Version::V13);
    }

    #[test]
    fn test_options_each_set_one_field() {
        let config = Argon2Config::from_options([
            Argon2Option::Iterations(3),
            Argon2Option::MemoryKb(19456),
            Argon2Option::Parallelism(2),
            Argon2Option::HashLength(32),
            Argon2Option::SaltLength(16),
            Argon2Option::Variant(Variant::I),
            Argon2Option::Version(Version::V10),
        ]);

        assert_eq!(
            config,
            Argon2Config {
                iterations: 3,
                memory_kb: 19456,
                parallelism: 2,
                hash_length: 32,
                salt_length: 16,
                variant: Variant::I,
                version: Version::V10,
            }
        );
    }

    #[test]
    fn test_later_option_wins() {
        let config = Argon2Config::from_options([
            Argon2Option::MemoryKb(1024),
            Argon2Option::Iterations(2),
            Argon2Option::MemoryKb(2048),
        ]);

        assert_eq!(config.memory_kb, 2048);
        assert_eq!(config.iterations, 2);
        assert_eq!(config.parallelism, 8);
    }

    #[test]
    fn test_no_validation_at_construction() {
        let config = Argon2Config::new().with_memory_kb(0).with_salt_length(0);

        assert_eq!(config.memory_kb, 0);
        assert_eq!(config.salt_length, 0);
    }

    #[test]
    fn test_version_numbers() {
        assert_eq!(Version::V10.number(), 16);
        assert_eq!(Version::V13.number(), 19);
        assert_eq!(Version::Default.number(), 19);
        assert_eq!(Version::from_number(19), Some(Version::V13));
        assert_eq!(Version::from_number(16), Some(Version::V10));
        assert_eq!(Version::from_number(18), None);
    }

    #[test]
    fn test_variant_ident() {
        assert_eq!(Variant::D.to_string(), "argon2d");
        assert_eq!(Variant::I.to_string(), "argon2i");
        assert_eq!(Variant::ID.to_string(), "argon2id");
    }
}
