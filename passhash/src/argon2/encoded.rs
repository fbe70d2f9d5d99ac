use std::fmt;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use thiserror::Error;

use super::config::Argon2Config;
use super::config::Variant;
use super::config::Version;

/// Error for malformed encoded hashes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Hash does not start with ${0}")]
    VariantMismatch(Variant),

    #[error("Unsupported argon2 version: {0}")]
    UnsupportedVersion(u32),

    #[error("Malformed hash: expected {0}")]
    Malformed(&'static str),

    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Parsed PHC string:
/// `$argon2<variant>$v=<version>$m=<memory>,t=<iterations>,p=<parallelism>$<salt>$<output>`.
///
/// Salt and output are base64 in the standard alphabet without padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    pub variant: Variant,
    pub version: Version,
    pub memory_kb: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt: Vec<u8>,
    pub output: Vec<u8>,
}

impl EncodedHash {
    /// Decode `encoded` as a hash of the given variant.
    ///
    /// A missing `v=` field means version 1.0.
    ///
    /// # Errors
    /// * `VariantMismatch` - Prefix is not `$` followed by the variant identifier
    /// * `UnsupportedVersion` - Version is neither 16 nor 19
    /// * `Malformed` - A field separator or decimal is missing or invalid
    /// * `Base64` - Salt or output is not valid unpadded base64
    pub fn decode(encoded: &str, variant: Variant) -> Result<Self, DecodeError> {
        let rest = encoded
            .strip_prefix('$')
            .and_then(|rest| rest.strip_prefix(variant.ident()))
            .ok_or(DecodeError::VariantMismatch(variant))?;

        let (version, rest) = match rest.strip_prefix("$v=") {
            Some(rest) => {
                let (number, rest) = decimal(rest)?;
                let version =
                    Version::from_number(number).ok_or(DecodeError::UnsupportedVersion(number))?;
                (version, rest)
            }
            None => (Version::V10, rest),
        };

        let (memory_kb, rest) = decimal(expect(rest, "$m=")?)?;
        let (iterations, rest) = decimal(expect(rest, ",t=")?)?;
        let (parallelism, rest) = decimal(expect(rest, ",p=")?)?;

        let (salt, output) = expect(rest, "$")?
            .split_once('$')
            .ok_or(DecodeError::Malformed("$ before output"))?;

        Ok(Self {
            variant,
            version,
            memory_kb,
            iterations,
            parallelism,
            salt: STANDARD_NO_PAD.decode(salt)?,
            output: STANDARD_NO_PAD.decode(output)?,
        })
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            self.variant,
            self.version.number(),
            self.memory_kb,
            self.iterations,
            self.parallelism,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.output),
        )
    }
}

/// Size of the buffer an encoded hash for `config` is written into.
///
/// Accounts for a terminating NUL, so it always exceeds the string length.
pub fn encoded_len(config: &Argon2Config) -> usize {
    "$$v=$m=,t=,p=$$".len()
        + config.variant.ident().len()
        + num_len(config.iterations)
        + num_len(config.memory_kb)
        + num_len(config.parallelism)
        + b64_len(config.salt_length)
        + b64_len(config.hash_length)
        + num_len(config.version.number())
        + 1
}

fn num_len(number: u32) -> usize {
    number.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}

fn b64_len(len: u32) -> usize {
    let len = len as usize;
    let tail = match len % 3 {
        2 => 3,
        1 => 2,
        _ => 0,
    };
    len / 3 * 4 + tail
}

fn expect<'a>(input: &'a str, token: &'static str) -> Result<&'a str, DecodeError> {
    input
        .strip_prefix(token)
        .ok_or(DecodeError::Malformed(token))
}

// Unsigned decimal without sign or leading zeros.
fn decimal(input: &str) -> Result<(u32, &str), DecodeError> {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, rest) = input.split_at(end);

    if digits.is_empty() || (digits.len() > 1 && digits.starts_with('0')) {
        return Err(DecodeError::Malformed("decimal"));
    }

    let value = digits
        .parse()
        .map_err(|_| DecodeError::Malformed("decimal"))?;

    Ok((value, rest))
}
