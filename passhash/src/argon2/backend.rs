use argon2::Algorithm;
use argon2::Argon2;
use argon2::Block;
use argon2::Params;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::config::Argon2Config;
use super::config::Variant;
use super::config::Version;
use super::encoded;
use super::encoded::EncodedHash;
use super::primitive::Primitive;
use super::primitive::Status;

/// Code reported for `argon2::Error` values without a reference equivalent.
const UNMAPPED_ERROR: i32 = -1000;

/// Pure-Rust Argon2 primitive backed by the RustCrypto `argon2` crate.
///
/// The PHC string is rendered and parsed here rather than through
/// `password_hash`, whose salt type caps salts at 48 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoArgon2;

impl RustCryptoArgon2 {
    pub fn new() -> Self {
        Self
    }

    fn try_derive(
        config: &Argon2Config,
        secret: &[u8],
        salt: &[u8],
        out: &mut [u8],
    ) -> Result<(), Status> {
        let mut output = vec![0u8; config.hash_length as usize];

        engine(
            config.variant,
            config.version,
            config.memory_kb,
            config.iterations,
            config.parallelism,
            output.len(),
        )
        .and_then(|engine| hash_into(&engine, secret, salt, &mut output))?;

        let encoded = EncodedHash {
            variant: config.variant,
            version: config.version,
            memory_kb: config.memory_kb,
            iterations: config.iterations,
            parallelism: config.parallelism,
            salt: salt.to_vec(),
            output,
        }
        .to_string();

        // Room for the terminator is required
        if encoded.len() >= out.len() {
            return Err(Status::EncodingFail);
        }

        let (head, tail) = out.split_at_mut(encoded.len());
        head.copy_from_slice(encoded.as_bytes());
        tail.fill(0);

        Ok(())
    }

    fn try_verify(encoded_hash: &str, secret: &[u8], variant: Variant) -> Result<bool, Status> {
        let expected = EncodedHash::decode(encoded_hash, variant).map_err(|e| {
            tracing::debug!(error = %e, variant = %variant, "Encoded hash rejected");
            Status::DecodingFail
        })?;

        let mut candidate = Zeroizing::new(vec![0u8; expected.output.len()]);

        engine(
            expected.variant,
            expected.version,
            expected.memory_kb,
            expected.iterations,
            expected.parallelism,
            candidate.len(),
        )
        .and_then(|engine| hash_into(&engine, secret, &expected.salt, &mut candidate))?;

        Ok(candidate.as_slice().ct_eq(expected.output.as_slice()).into())
    }
}

impl Primitive for RustCryptoArgon2 {
    fn encoded_len(&self, config: &Argon2Config) -> usize {
        encoded::encoded_len(config)
    }

    fn derive(&self, config: &Argon2Config, secret: &[u8], salt: &[u8], out: &mut [u8]) -> Status {
        match Self::try_derive(config, secret, salt, out) {
            Ok(()) => Status::Ok,
            Err(status) => status,
        }
    }

    fn verify(&self, encoded_hash: &str, secret: &[u8], variant: Variant) -> Status {
        match Self::try_verify(encoded_hash, secret, variant) {
            Ok(true) => Status::Ok,
            Ok(false) => Status::VerifyMismatch,
            Err(status) => status,
        }
    }
}

fn engine(
    variant: Variant,
    version: Version,
    memory_kb: u32,
    iterations: u32,
    parallelism: u32,
    output_len: usize,
) -> Result<Argon2<'static>, Status> {
    let params =
        Params::new(memory_kb, iterations, parallelism, Some(output_len)).map_err(status_for)?;

    let algorithm = match variant {
        Variant::D => Algorithm::Argon2d,
        Variant::I => Algorithm::Argon2i,
        Variant::ID => Algorithm::Argon2id,
    };

    let version = match version {
        Version::V10 => argon2::Version::V0x10,
        Version::V13 | Version::Default => argon2::Version::V0x13,
    };

    Ok(Argon2::new(algorithm, version, params))
}

/// Hash into `out` over a block buffer whose allocation failure is reported
/// as `MemoryAllocationError` instead of aborting.
fn hash_into(
    engine: &Argon2<'_>,
    secret: &[u8],
    salt: &[u8],
    out: &mut [u8],
) -> Result<(), Status> {
    let block_count = engine.params().block_count();

    let mut blocks: Vec<Block> = Vec::new();
    blocks.try_reserve_exact(block_count).map_err(|e| {
        tracing::warn!(error = %e, block_count, "Argon2 memory allocation failed");
        Status::MemoryAllocationError
    })?;
    blocks.resize(block_count, Block::new());

    engine
        .hash_password_into_with_memory(secret, salt, out, &mut blocks)
        .map_err(status_for)
}

fn status_for(error: argon2::Error) -> Status {
    match error {
        argon2::Error::AdTooLong => Status::AdTooLong,
        argon2::Error::AlgorithmInvalid | argon2::Error::VersionInvalid => Status::IncorrectType,
        argon2::Error::MemoryTooLittle => Status::MemoryTooLittle,
        argon2::Error::MemoryTooMuch => Status::MemoryTooMuch,
        argon2::Error::OutputTooShort => Status::OutputTooShort,
        argon2::Error::OutputTooLong => Status::OutputTooLong,
        argon2::Error::PwdTooLong => Status::PwdTooLong,
        argon2::Error::SaltTooShort => Status::SaltTooShort,
        argon2::Error::SaltTooLong => Status::SaltTooLong,
        argon2::Error::SecretTooLong => Status::SecretTooLong,
        argon2::Error::ThreadsTooFew => Status::LanesTooFew,
        argon2::Error::ThreadsTooMany => Status::LanesTooMany,
        argon2::Error::TimeTooSmall => Status::TimeTooSmall,
        other => {
            tracing::warn!(error = %other, "Unmapped argon2 error");
            Status::Unknown(UNMAPPED_ERROR)
        }
    }
}
