use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::seed::SecretSeed;

// Deterministic path derivation using the provably-fair HMAC construction:
// secret_seed (key) + "public_seed-counter" (message) -> HMAC-SHA256 -> hex
// nibbles -> one left/right decision per nibble.

pub type HmacSha256 = Hmac<Sha256>;

/// One peg decision. Even nibble goes right, odd goes left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Left,
    Right,
}

impl Decision {
    pub fn as_bit(self) -> u8 {
        match self {
            Decision::Left => 0,
            Decision::Right => 1,
        }
    }

    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            Decision::Left
        } else {
            Decision::Right
        }
    }
}

/// A derived drop: the full decision sequence and the landing slot
/// (count of rightward decisions, in 0..=steps).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOutcome {
    pub path: Vec<Decision>,
    pub slot: u8,
}

fn block_digest(secret: &SecretSeed, public_seed: &str, counter: u64, block: u32) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    if block == 0 {
        mac.update(format!("{public_seed}-{counter}").as_bytes());
    } else {
        // Stream extension for step counts beyond one digest's 64 nibbles.
        // Each block is an independent keyed digest, so the whole path stays
        // reproducible from the revealed seed.
        mac.update(format!("{public_seed}-{counter}-{block}").as_bytes());
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Derive the drop path for one bet. Pure: identical inputs always produce
/// identical output, with no clock or machine-state dependency.
pub fn derive_path(
    secret: &SecretSeed,
    public_seed: &str,
    counter: u64,
    steps: u8,
) -> PathOutcome {
    let mut path = Vec::with_capacity(steps as usize);
    let mut slot = 0u8;
    let mut digest = block_digest(secret, public_seed, counter, 0);
    let mut block = 0u32;

    for i in 0..steps as usize {
        let offset = i - block as usize * 64;
        if offset >= 64 {
            block += 1;
            digest = block_digest(secret, public_seed, counter, block);
        }
        let offset = i - block as usize * 64;
        let byte = digest[offset / 2];
        // High nibble first, matching the hex rendering of the digest.
        let nibble = if offset % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if nibble % 2 == 0 {
            path.push(Decision::Right);
            slot += 1;
        } else {
            path.push(Decision::Left);
        }
    }

    PathOutcome { path, slot }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> SecretSeed {
        SecretSeed::from_bytes([0x42; 32])
    }

    #[test]
    fn test_determinism() {
        let a = derive_path(&seed(), "clientSeed", 3, 16);
        let b = derive_path(&seed(), "clientSeed", 3, 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_golden_vector() {
        // HMAC-SHA256(0x42*32, "clientSeed-0") = c8182e60... -> nibbles
        // c,8,1,8,2,e,6,0 -> R,R,L,R,R,R,R,R
        let out = derive_path(&seed(), "clientSeed", 0, 8);
        let bits: Vec<u8> = out.path.iter().map(|d| d.as_bit()).collect();
        assert_eq!(bits, vec![1, 1, 0, 1, 1, 1, 1, 1]);
        assert_eq!(out.slot, 7);

        let out = derive_path(&seed(), "clientSeed", 1, 8);
        let bits: Vec<u8> = out.path.iter().map(|d| d.as_bit()).collect();
        assert_eq!(bits, vec![1, 1, 0, 1, 0, 1, 0, 1]);
        assert_eq!(out.slot, 5);
    }

    #[test]
    fn test_slot_counts_rights() {
        for counter in 0..50 {
            let out = derive_path(&seed(), "abc", counter, 12);
            assert_eq!(out.path.len(), 12);
            let rights = out.path.iter().filter(|d| **d == Decision::Right).count();
            assert_eq!(out.slot as usize, rights);
        }
    }

    #[test]
    fn test_stream_extension_prefix() {
        // Past 64 steps the stream extends with block digests; the first 64
        // decisions must be unchanged.
        let short = derive_path(&seed(), "clientSeed", 0, 64);
        let long = derive_path(&seed(), "clientSeed", 0, 80);
        assert_eq!(long.path.len(), 80);
        assert_eq!(&long.path[..64], &short.path[..]);
        let again = derive_path(&seed(), "clientSeed", 0, 80);
        assert_eq!(long, again);
    }
}
