use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Secret server seed for one epoch. 256 bits, kept server-side until the
/// epoch is retired, hex-encoded only for storage and the final reveal.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretSeed([u8; 32]);

impl SecretSeed {
    /// Draw a fresh seed from the OS entropy source.
    pub fn generate() -> Result<Self> {
        let mut buf = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|_| Error::EntropyUnavailable)?;
        Ok(Self(buf))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let raw = hex::decode(s).map_err(|_| Error::InvalidSeedHex)?;
        let bytes: [u8; 32] = raw.try_into().map_err(|_| Error::InvalidSeedHex)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Public commitment: SHA-256 over the raw seed bytes, hex-encoded.
    /// Published before any bet so the seed cannot be picked after the fact.
    pub fn commitment(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hex::encode(hasher.finalize())
    }

    /// Expose the seed for verification once the epoch ends.
    pub fn reveal_hex(&self) -> String {
        hex::encode(self.0)
    }
}

// Keep the secret out of debug output.
impl std::fmt::Debug for SecretSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretSeed(commit={})", self.commitment())
    }
}
