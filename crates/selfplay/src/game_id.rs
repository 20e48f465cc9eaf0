//! Random game identifiers for naming output files.

use std::fmt::Write;

use rand::Rng;

/// 128 random bits in the canonical 8-4-4-4-12 hex grouping, with the
/// version/variant bits of a random UUID. Only used to name dump files;
/// never part of the trained-on data.
pub fn generate_game_id<R: Rng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    bytes[6] = (bytes[6] & 0x0F) | 0x40;
    bytes[8] = (bytes[8] & 0x3F) | 0x80;

    let mut id = String::with_capacity(36);
    for (i, byte) in bytes.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            id.push('-');
        }
        write!(id, "{byte:02x}").expect("writing to a String cannot fail");
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn canonical_grouping() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let id = generate_game_id(&mut rng);
        assert_eq!(id.len(), 36);

        let groups: Vec<&str> = id.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(lengths, vec![8, 4, 4, 4, 12]);
        assert!(groups
            .iter()
            .all(|g| g.chars().all(|c| c.is_ascii_hexdigit())));

        // Version and variant nibbles.
        assert_eq!(id.as_bytes()[14], b'4');
        assert!(matches!(id.as_bytes()[19], b'8' | b'9' | b'a' | b'b'));
    }

    #[test]
    fn seeded_ids_are_reproducible_and_distinct() {
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        let first = generate_game_id(&mut a);
        assert_eq!(first, generate_game_id(&mut b));
        assert_ne!(first, generate_game_id(&mut a));
    }
}
