use crate::constants::hash::{FNV1A64_OFFSET, FNV1A64_PRIME, PART_SEPARATOR};

fn fnv1a_64(mut hash: u64, bytes: &[u8]) -> u64 {
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV1A64_PRIME);
    }
    hash
}

/// Fold an ordered sequence of string parts into one FNV-1a digest.
///
/// The digest depends only on the bytes of each part, so it is identical
/// across builds, toolchains, and platforms.
pub fn stable_hash_parts<I, S>(parts: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts.into_iter().fold(FNV1A64_OFFSET, |hash, part| {
        let hash = fnv1a_64(hash, part.as_ref().as_bytes());
        fnv1a_64(hash, &[PART_SEPARATOR])
    })
}
