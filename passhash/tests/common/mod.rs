use passhash::Argon2Config;
use passhash::Argon2Hasher;
use passhash::Variant;

/// Low-cost configuration so tests stay fast
pub fn light_config() -> Argon2Config {
    Argon2Config::new()
        .with_memory_kb(256)
        .with_iterations(1)
        .with_parallelism(2)
        .with_hash_length(32)
        .with_salt_length(16)
}

/// Hasher over the real backend with a low-cost configuration
pub fn light_hasher(variant: Variant) -> Argon2Hasher {
    Argon2Hasher::with_config(light_config().with_variant(variant))
}

/// Split an encoded hash into its `$`-separated fields
pub fn fields(encoded: &str) -> Vec<&str> {
    encoded.split('$').collect()
}
