use ulid::Ulid;

/// Generate a random, lexicographically time-ordered suffix for ad hoc keys.
///
/// Suffixes are 26-character Crockford base32 ULIDs, so two keys minted for
/// the same target never collide in practice.
#[must_use]
pub fn random_suffix() -> String {
    Ulid::new().to_string()
}
