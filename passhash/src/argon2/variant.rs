use super::config::Variant;
use crate::errors::HasherError;

/// Recover the Argon2 variant from the prefix of an encoded hash.
///
/// Only the prefix is inspected; the remaining fields are left to the
/// primitive. `$argon2id` is checked before `$argon2i`, which it extends.
///
/// # Errors
/// * `InvalidVariant` - Input is empty or has no known variant prefix
pub fn parse_variant(encoded_hash: &str) -> Result<Variant, HasherError> {
    const PREFIXES: [(&str, Variant); 3] = [
        ("$argon2id", Variant::ID),
        ("$argon2i", Variant::I),
        ("$argon2d", Variant::D),
    ];

    PREFIXES
        .iter()
        .find(|(prefix, _)| encoded_hash.starts_with(*prefix))
        .map(|(_, variant)| *variant)
        .ok_or(HasherError::InvalidVariant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_prefixes() {
        assert_eq!(
            parse_variant("$argon2id$v=19$m=65536,t=8,p=8$c2FsdA$aGFzaA").unwrap(),
            Variant::ID
        );
        assert_eq!(
            parse_variant("$argon2i$v=19$m=65536,t=2,p=1$c29tZXNhbHQ$aGFzaA").unwrap(),
            Variant::I
        );
        assert_eq!(
            parse_variant("$argon2d$v=16$m=64,t=1,p=1$c2FsdA$aGFzaA").unwrap(),
            Variant::D
        );
    }

    #[test]
    fn test_parse_prefix_only() {
        assert_eq!(parse_variant("$argon2id").unwrap(), Variant::ID);
        assert_eq!(parse_variant("$argon2i").unwrap(), Variant::I);
        assert_eq!(parse_variant("$argon2d").unwrap(), Variant::D);
        // Trailing garbage is the primitive's concern
        assert_eq!(parse_variant("$argon2dx").unwrap(), Variant::D);
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(parse_variant(""), Err(HasherError::InvalidVariant)));
    }

    #[test]
    fn test_parse_unknown_prefix() {
        for hash in [
            "$argon2",
            "argon2id$v=19",
            "$2b$12$abcdefghijklmnopqrstuv",
            "$scrypt$ln=15,r=8,p=1$c2FsdA$aGFzaA",
            "$ARGON2ID$v=19",
            " $argon2id$v=19",
        ] {
            assert!(
                matches!(parse_variant(hash), Err(HasherError::InvalidVariant)),
                "{hash} should be rejected"
            );
        }
    }
}
