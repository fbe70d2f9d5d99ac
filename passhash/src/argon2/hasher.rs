use super::backend::RustCryptoArgon2;
use super::config::Argon2Config;
use super::config::Argon2Option;
use super::primitive::Primitive;
use super::primitive::Status;
use super::variant::parse_variant;
use crate::errors::HasherError;
use crate::hasher::Hasher;
use crate::random::OsRandom;
use crate::random::RandomSource;

/// Argon2 password hasher.
///
/// Owns one configuration for its lifetime and is meant to be shared across
/// threads: the configuration is only read, and the primitive and random
/// source are `Send + Sync`. Each call allocates `memory_kb` of working
/// memory, so callers bound the number of calls in flight.
pub struct Argon2Hasher<P = RustCryptoArgon2, R = OsRandom>
where
    P: Primitive,
    R: RandomSource,
{
    config: Option<Argon2Config>,
    primitive: P,
    random: R,
}

impl Argon2Hasher {
    /// Create a hasher with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Argon2Config::default())
    }

    /// Create a hasher from the defaults overlaid with `options`.
    ///
    /// # Arguments
    /// * `options` - Options applied in order, later ones winning per field
    ///
    /// # Returns
    /// Hasher bound to the resulting configuration, not validated
    pub fn with_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = Argon2Option>,
    {
        Self::with_config(Argon2Config::from_options(options))
    }

    /// Create a hasher bound to `config`.
    pub fn with_config(config: Argon2Config) -> Self {
        Self::from_parts(config, RustCryptoArgon2::new(), OsRandom)
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, R> Argon2Hasher<P, R>
where
    P: Primitive,
    R: RandomSource,
{
    /// Create a hasher with an explicit primitive and random source.
    ///
    /// # Arguments
    /// * `config` - Configuration the hasher is bound to
    /// * `primitive` - Argon2 engine
    /// * `random` - Salt source
    pub fn from_parts(config: Argon2Config, primitive: P, random: R) -> Self {
        Self {
            config: Some(config),
            primitive,
            random,
        }
    }

    /// Bound configuration, `None` once cleared.
    pub fn config(&self) -> Option<&Argon2Config> {
        self.config.as_ref()
    }

    /// Detach the configuration, leaving the hasher unconfigured.
    ///
    /// Every later `encode` and `verify` fails with `NotConfigured`.
    pub fn clear_config(&mut self) -> Option<Argon2Config> {
        self.config.take()
    }

    /// Hash `secret` with a fresh random salt.
    ///
    /// # Arguments
    /// * `secret` - Secret to hash, must be non-empty
    ///
    /// # Returns
    /// Encoded hash in PHC string format, without trailing NUL bytes
    ///
    /// # Errors
    /// * `NotConfigured` - No configuration, or a zero salt length
    /// * `EmptyInput` - `secret` is empty
    /// * `RandomSource` - The random source failed
    /// * `Primitive` - The primitive rejected the parameters or failed
    pub fn encode(&self, secret: &[u8]) -> Result<String, HasherError> {
        let config = self.config.as_ref().ok_or(HasherError::NotConfigured)?;

        if secret.is_empty() {
            return Err(HasherError::EmptyInput);
        }

        if config.salt_length == 0 {
            return Err(HasherError::NotConfigured);
        }

        let mut salt = vec![0u8; config.salt_length as usize];
        self.random.try_fill(&mut salt).map_err(|e| {
            tracing::warn!(error = %e, "Salt generation failed");
            HasherError::RandomSource(e)
        })?;

        tracing::debug!(
            variant = %config.variant,
            memory_kb = config.memory_kb,
            iterations = config.iterations,
            parallelism = config.parallelism,
            "Encoding secret"
        );

        let mut buffer = vec![0u8; self.primitive.encoded_len(config)];
        let status = self.primitive.derive(config, secret, &salt, &mut buffer);

        if !status.is_ok() {
            return Err(self.primitive_error(status));
        }

        let end = buffer
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        buffer.truncate(end);

        String::from_utf8(buffer).map_err(|_| self.primitive_error(Status::EncodingFail))
    }

    /// Check `secret` against `encoded_hash`.
    ///
    /// The variant embedded in `encoded_hash` drives verification, not the
    /// configured one, so hashes produced under another variant still verify.
    ///
    /// # Arguments
    /// * `secret` - Candidate secret, must be non-empty
    /// * `encoded_hash` - Hash in PHC string format, must be non-empty
    ///
    /// # Returns
    /// True if the secret matches, false if the hash is well formed but does not match
    ///
    /// # Errors
    /// * `NotConfigured` - No configuration
    /// * `EmptyInput` - `secret` is empty
    /// * `EmptyHash` - `encoded_hash` is empty
    /// * `InvalidVariant` - `encoded_hash` has no known variant prefix
    /// * `Primitive` - Hash is malformed, has unusable parameters, or the primitive failed
    pub fn verify(&self, secret: &[u8], encoded_hash: &str) -> Result<bool, HasherError> {
        if self.config.is_none() {
            return Err(HasherError::NotConfigured);
        }

        if secret.is_empty() {
            return Err(HasherError::EmptyInput);
        }

        if encoded_hash.is_empty() {
            return Err(HasherError::EmptyHash);
        }

        let variant = parse_variant(encoded_hash)?;

        tracing::debug!(variant = %variant, "Verifying secret");

        match self.primitive.verify(encoded_hash, secret, variant) {
            Status::Ok => Ok(true),
            Status::VerifyMismatch => Ok(false),
            status => Err(self.primitive_error(status)),
        }
    }

    // Every failing status other than a mismatch goes through here.
    fn primitive_error(&self, status: Status) -> HasherError {
        let message = self.primitive.status_message(status);

        tracing::warn!(
            status = ?status,
            code = status.code(),
            message = %message,
            "Argon2 primitive failed"
        );

        HasherError::Primitive { status, message }
    }
}

impl<P, R> Hasher for Argon2Hasher<P, R>
where
    P: Primitive,
    R: RandomSource,
{
    fn encode(&self, secret: &[u8]) -> Result<String, HasherError> {
        Argon2Hasher::encode(self, secret)
    }

    fn verify(&self, secret: &[u8], encoded_hash: &str) -> Result<bool, HasherError> {
        Argon2Hasher::verify(self, secret, encoded_hash)
    }
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::rand_core;
    use mockall::mock;

    use super::*;
    use crate::argon2::config::Variant;

    mock! {
        pub TestPrimitive {}

        impl Primitive for TestPrimitive {
            fn encoded_len(&self, config: &Argon2Config) -> usize;
            fn derive(&self, config: &Argon2Config, secret: &[u8], salt: &[u8], out: &mut [u8]) -> Status;
            fn verify(&self, encoded_hash: &str, secret: &[u8], variant: Variant) -> Status;
        }
    }

    mock! {
        pub TestRandom {}

        impl RandomSource for TestRandom {
            fn try_fill(&self, dest: &mut [u8]) -> Result<(), rand_core::Error>;
        }
    }

    fn fixed_random() -> MockTestRandom {
        let mut random = MockTestRandom::new();
        random.expect_try_fill().returning(|dest| {
            dest.fill(0xab);
            Ok(())
        });
        random
    }

    fn hasher(
        primitive: MockTestPrimitive,
        random: MockTestRandom,
    ) -> Argon2Hasher<MockTestPrimitive, MockTestRandom> {
        Argon2Hasher::from_parts(Argon2Config::default(), primitive, random)
    }

    #[test]
    fn test_encode_trims_trailing_nul() {
        let mut primitive = MockTestPrimitive::new();

        primitive.expect_encoded_len().times(1).returning(|_| 32);
        primitive
            .expect_derive()
            .withf(|config, secret, salt, out| {
                config.variant == Variant::ID
                    && secret.to_vec() == b"secret"
                    && salt.to_vec() == vec![0xabu8; 64]
                    && out.len() == 32
            })
            .times(1)
            .returning(|_, _, _, out| {
                out[..12].copy_from_slice(b"$argon2id$v=");
                Status::Ok
            });

        let encoded = hasher(primitive, fixed_random())
            .encode(b"secret")
            .expect("Failed to encode");

        assert_eq!(encoded, "$argon2id$v=");
    }

    #[test]
    fn test_encode_translates_status() {
        let mut primitive = MockTestPrimitive::new();

        primitive.expect_encoded_len().returning(|_| 32);
        primitive
            .expect_derive()
            .times(1)
            .returning(|_, _, _, _| Status::MemoryTooLittle);

        let error = hasher(primitive, fixed_random())
            .encode(b"secret")
            .unwrap_err();

        assert_eq!(error.status(), Some(Status::MemoryTooLittle));
        assert_eq!(error.to_string(), "Memory cost is too small");
    }

    #[test]
    fn test_encode_propagates_random_failure() {
        let mut primitive = MockTestPrimitive::new();
        let mut random = MockTestRandom::new();

        random
            .expect_try_fill()
            .times(1)
            .returning(|_| Err(rand_core::Error::new(std::io::Error::other("entropy exhausted"))));
        primitive.expect_derive().times(0);

        let error = hasher(primitive, random).encode(b"secret").unwrap_err();

        assert!(matches!(error, HasherError::RandomSource(_)));
        assert_eq!(error.to_string(), "entropy exhausted");
    }

    #[test]
    fn test_encode_zero_salt_length_is_not_configured() {
        let mut primitive = MockTestPrimitive::new();
        let mut random = MockTestRandom::new();

        primitive.expect_derive().times(0);
        random.expect_try_fill().times(0);

        let hasher = Argon2Hasher::from_parts(
            Argon2Config::default().with_salt_length(0),
            primitive,
            random,
        );

        assert!(matches!(
            hasher.encode(b"secret"),
            Err(HasherError::NotConfigured)
        ));
    }

    #[test]
    fn test_encode_checks_empty_input_before_salt_length() {
        let hasher = Argon2Hasher::from_parts(
            Argon2Config::default().with_salt_length(0),
            MockTestPrimitive::new(),
            MockTestRandom::new(),
        );

        assert!(matches!(hasher.encode(b""), Err(HasherError::EmptyInput)));
    }

    #[test]
    fn test_verify_uses_embedded_variant() {
        let mut primitive = MockTestPrimitive::new();

        primitive
            .expect_verify()
            .withf(|_, secret, variant| secret.to_vec() == b"secret" && *variant == Variant::I)
            .times(1)
            .returning(|_, _, _| Status::Ok);

        let hasher = Argon2Hasher::from_parts(
            Argon2Config::default().with_variant(Variant::D),
            primitive,
            MockTestRandom::new(),
        );

        assert!(hasher
            .verify(b"secret", "$argon2i$v=19$m=64,t=1,p=1$c2FsdHNhbHQ$aGFzaA")
            .expect("Failed to verify"));
    }

    #[test]
    fn test_verify_mismatch_is_not_an_error() {
        let mut primitive = MockTestPrimitive::new();

        primitive
            .expect_verify()
            .times(1)
            .returning(|_, _, _| Status::VerifyMismatch);

        let matched = hasher(primitive, MockTestRandom::new())
            .verify(b"secret", "$argon2id$v=19$m=64,t=1,p=1$c2FsdHNhbHQ$aGFzaA")
            .expect("Mismatch should not be an error");

        assert!(!matched);
    }

    #[test]
    fn test_verify_translates_failure_status() {
        let mut primitive = MockTestPrimitive::new();

        primitive
            .expect_verify()
            .times(1)
            .returning(|_, _, _| Status::DecodingFail);

        let error = hasher(primitive, MockTestRandom::new())
            .verify(b"secret", "$argon2id$garbage")
            .unwrap_err();

        assert_eq!(error.status(), Some(Status::DecodingFail));
        assert_eq!(error.to_string(), "Decoding failed");
    }

    #[test]
    fn test_verify_invalid_variant_skips_primitive() {
        let mut primitive = MockTestPrimitive::new();
        primitive.expect_verify().times(0);

        let result = hasher(primitive, MockTestRandom::new()).verify(b"secret", "$2b$10$abc");

        assert!(matches!(result, Err(HasherError::InvalidVariant)));
    }

    #[test]
    fn test_guards_order() {
        let mut hasher = hasher(MockTestPrimitive::new(), MockTestRandom::new());

        assert!(matches!(hasher.verify(b"", ""), Err(HasherError::EmptyInput)));
        assert!(matches!(
            hasher.verify(b"secret", ""),
            Err(HasherError::EmptyHash)
        ));

        assert!(hasher.clear_config().is_some());
        assert!(hasher.config().is_none());
        assert!(matches!(hasher.encode(b""), Err(HasherError::NotConfigured)));
        assert!(matches!(
            hasher.verify(b"", ""),
            Err(HasherError::NotConfigured)
        ));
    }
}
