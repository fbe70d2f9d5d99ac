use std::io::BufRead;
use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use passhash::Argon2Config;
use passhash::Argon2Hasher;
use passhash::Argon2Option;
use passhash::HasherError;
use passhash::Variant;
use passhash::Version;
use thiserror::Error;

/// Hash and verify secrets with Argon2.
#[derive(Debug, Parser)]
#[command(name = "passhash", version)]
pub struct Cli {
    /// Configuration file; replaces config/ files and environment overrides
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Hash a secret and print the encoded hash
    Encode {
        /// Secret to hash; read from the first line of stdin when omitted
        #[arg(long)]
        secret: Option<String>,
    },

    /// Check a secret against an encoded hash
    Verify {
        /// Encoded hash in PHC string format
        #[arg(long)]
        hash: String,

        /// Secret to check; read from the first line of stdin when omitted
        #[arg(long)]
        secret: Option<String>,
    },
}

/// Cost and shape overrides applied on top of the loaded configuration.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    #[arg(long, global = true)]
    pub iterations: Option<u32>,

    #[arg(long, global = true)]
    pub memory_kb: Option<u32>,

    #[arg(long, global = true)]
    pub parallelism: Option<u32>,

    #[arg(long, global = true)]
    pub hash_length: Option<u32>,

    #[arg(long, global = true)]
    pub salt_length: Option<u32>,

    #[arg(long, global = true, value_enum)]
    pub variant: Option<VariantArg>,

    #[arg(id = "argon2_version", long = "argon2-version", global = true, value_enum)]
    pub version: Option<VersionArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    D,
    I,
    Id,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::D => Variant::D,
            VariantArg::I => Variant::I,
            VariantArg::Id => Variant::ID,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VersionArg {
    V10,
    V13,
    Default,
}

impl From<VersionArg> for Version {
    fn from(arg: VersionArg) -> Self {
        match arg {
            VersionArg::V10 => Version::V10,
            VersionArg::V13 => Version::V13,
            VersionArg::Default => Version::Default,
        }
    }
}

impl Overrides {
    /// Options for every override given, in a fixed field order.
    pub fn options(&self) -> Vec<Argon2Option> {
        [
            self.iterations.map(Argon2Option::Iterations),
            self.memory_kb.map(Argon2Option::MemoryKb),
            self.parallelism.map(Argon2Option::Parallelism),
            self.hash_length.map(Argon2Option::HashLength),
            self.salt_length.map(Argon2Option::SaltLength),
            self.variant.map(|v| Argon2Option::Variant(v.into())),
            self.version.map(|v| Argon2Option::Version(v.into())),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply the overrides to `config`.
    pub fn apply(&self, config: Argon2Config) -> Argon2Config {
        self.options()
            .into_iter()
            .fold(config, |config, option| option.apply(config))
    }
}

/// Result of a command, printed by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Encoded(String),
    Matched,
    Mismatched,
}

/// Error for command execution
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to read secret from stdin: {0}")]
    Stdin(#[from] std::io::Error),

    #[error(transparent)]
    Hasher(#[from] HasherError),
}

/// Run `command` with a hasher bound to `config`.
///
/// # Arguments
/// * `command` - Parsed subcommand
/// * `config` - Final hasher configuration
/// * `stdin` - Source of the secret when it is not given on the command line
///
/// # Errors
/// * `Stdin` - Secret could not be read
/// * `Hasher` - Hashing or verification failed
pub fn run<B: BufRead>(
    command: &Command,
    config: Argon2Config,
    stdin: B,
) -> Result<Outcome, CommandError> {
    let hasher = Argon2Hasher::with_config(config);

    match command {
        Command::Encode { secret } => {
            let secret = resolve_secret(secret.as_deref(), stdin)?;
            let encoded = hasher.encode(secret.as_bytes())?;
            tracing::info!(length = encoded.len(), "Secret encoded");
            Ok(Outcome::Encoded(encoded))
        }
        Command::Verify { hash, secret } => {
            let secret = resolve_secret(secret.as_deref(), stdin)?;
            let matched = hasher.verify(secret.as_bytes(), hash)?;
            tracing::info!(matched, "Secret verified");
            if matched {
                Ok(Outcome::Matched)
            } else {
                Ok(Outcome::Mismatched)
            }
        }
    }
}

fn resolve_secret<B: BufRead>(secret: Option<&str>, mut stdin: B) -> Result<String, std::io::Error> {
    if let Some(secret) = secret {
        return Ok(secret.to_string());
    }

    let mut line = String::new();
    stdin.read_line(&mut line)?;

    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);

    Ok(line)
}
