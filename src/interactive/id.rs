use rand::Rng;

/// Generates an opaque custom id for a short-lived interactive element.
///
/// Identifiers are unique per call for all practical purposes (64 random
/// bits), which is what keeps unrelated registrations from ever colliding
/// in the registry.
pub fn generate(prefix: &str) -> String {
    format!("{prefix}_{}", rand::rng().random::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_the_prefix() {
        assert!(generate("cmp").starts_with("cmp_"));
    }

    #[test]
    fn consecutive_ids_differ() {
        assert_ne!(generate("cmp"), generate("cmp"));
    }
}
