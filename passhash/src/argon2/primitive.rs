use std::fmt;

use super::config::Argon2Config;
use super::config::Variant;

/// Result code of a primitive call.
///
/// Codes and messages follow the reference Argon2 library so that status
/// values stay meaningful across backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    OutputTooShort,
    OutputTooLong,
    PwdTooShort,
    PwdTooLong,
    SaltTooShort,
    SaltTooLong,
    AdTooLong,
    SecretTooLong,
    TimeTooSmall,
    TimeTooLarge,
    MemoryTooLittle,
    MemoryTooMuch,
    LanesTooFew,
    LanesTooMany,
    MemoryAllocationError,
    IncorrectType,
    ThreadsTooFew,
    ThreadsTooMany,
    EncodingFail,
    DecodingFail,
    DecodingLengthFail,
    VerifyMismatch,
    /// Code not known to this crate
    Unknown(i32),
}

impl Status {
    /// Numeric status code.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::OutputTooShort => -2,
            Self::OutputTooLong => -3,
            Self::PwdTooShort => -4,
            Self::PwdTooLong => -5,
            Self::SaltTooShort => -6,
            Self::SaltTooLong => -7,
            Self::AdTooLong => -9,
            Self::SecretTooLong => -11,
            Self::TimeTooSmall => -12,
            Self::TimeTooLarge => -13,
            Self::MemoryTooLittle => -14,
            Self::MemoryTooMuch => -15,
            Self::LanesTooFew => -16,
            Self::LanesTooMany => -17,
            Self::MemoryAllocationError => -22,
            Self::IncorrectType => -26,
            Self::ThreadsTooFew => -28,
            Self::ThreadsTooMany => -29,
            Self::EncodingFail => -31,
            Self::DecodingFail => -32,
            Self::DecodingLengthFail => -34,
            Self::VerifyMismatch => -35,
            Self::Unknown(code) => code,
        }
    }

    /// Status for a numeric code; unrecognized codes map to `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Ok,
            -2 => Self::OutputTooShort,
            -3 => Self::OutputTooLong,
            -4 => Self::PwdTooShort,
            -5 => Self::PwdTooLong,
            -6 => Self::SaltTooShort,
            -7 => Self::SaltTooLong,
            -9 => Self::AdTooLong,
            -11 => Self::SecretTooLong,
            -12 => Self::TimeTooSmall,
            -13 => Self::TimeTooLarge,
            -14 => Self::MemoryTooLittle,
            -15 => Self::MemoryTooMuch,
            -16 => Self::LanesTooFew,
            -17 => Self::LanesTooMany,
            -22 => Self::MemoryAllocationError,
            -26 => Self::IncorrectType,
            -28 => Self::ThreadsTooFew,
            -29 => Self::ThreadsTooMany,
            -31 => Self::EncodingFail,
            -32 => Self::DecodingFail,
            -34 => Self::DecodingLengthFail,
            -35 => Self::VerifyMismatch,
            other => Self::Unknown(other),
        }
    }

    /// Canonical message text.
    pub fn message(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::OutputTooShort => "Output is too short",
            Self::OutputTooLong => "Output is too long",
            Self::PwdTooShort => "Password is too short",
            Self::PwdTooLong => "Password is too long",
            Self::SaltTooShort => "Salt is too short",
            Self::SaltTooLong => "Salt is too long",
            Self::AdTooLong => "Associated data is too long",
            Self::SecretTooLong => "Secret is too long",
            Self::TimeTooSmall => "Time cost is too small",
            Self::TimeTooLarge => "Time cost is too large",
            Self::MemoryTooLittle => "Memory cost is too small",
            Self::MemoryTooMuch => "Memory cost is too large",
            Self::LanesTooFew => "Too few lanes",
            Self::LanesTooMany => "Too many lanes",
            Self::MemoryAllocationError => "Memory allocation error",
            Self::IncorrectType => "There is no such version of Argon2",
            Self::ThreadsTooFew => "Not enough threads",
            Self::ThreadsTooMany => "Too many threads",
            Self::EncodingFail => "Encoding failed",
            Self::DecodingFail => "Decoding failed",
            Self::DecodingLengthFail => "Some of encoded parameters are too long or too short",
            Self::VerifyMismatch => "The password does not match the supplied hash",
            Self::Unknown(_) => "Unknown error code",
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Argon2 engine consumed by the hasher.
///
/// Implementations own parameter validation: the hasher never checks cost
/// parameters itself and relies on the returned status.
pub trait Primitive: Send + Sync {
    /// Buffer size needed by `derive` for `config`, terminator included.
    fn encoded_len(&self, config: &Argon2Config) -> usize;

    /// Derive a hash of `secret` with `salt` and write its encoded form into `out`.
    ///
    /// Bytes of `out` past the encoded string are left as NUL.
    fn derive(&self, config: &Argon2Config, secret: &[u8], salt: &[u8], out: &mut [u8]) -> Status;

    /// Check `secret` against `encoded_hash`, decoding it as `variant`.
    ///
    /// Returns `Status::Ok` on match and `Status::VerifyMismatch` when the
    /// hash is well formed but the secret differs.
    fn verify(&self, encoded_hash: &str, secret: &[u8], variant: Variant) -> Status;

    /// Human-readable text for `status`.
    fn status_message(&self, status: Status) -> String {
        status.message().to_string()
    }
}
