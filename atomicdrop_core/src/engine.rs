use crate::{
    error::{Error, Result},
    multipliers::{multiplier_row, RiskTier, MAX_STEPS, MIN_STEPS},
    path::{derive_path, Decision},
    seed::SecretSeed,
};

/// Board configuration for one bet resolution.
#[derive(Debug, Clone)]
pub struct EngineParams {
    pub steps: u8,
    pub risk: RiskTier,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            steps: 16,
            risk: RiskTier::Medium,
        }
    }
}

impl EngineParams {
    /// `resolve_bet` with this board configuration.
    pub fn resolve(
        &self,
        secret: &SecretSeed,
        public_seed: &str,
        counter: u64,
        stake: f64,
    ) -> Result<BetOutcome> {
        resolve_bet(secret, public_seed, counter, self.steps, Some(self.risk), stake)
    }
}

/// Result of one resolved bet. Fully determined by the inputs; the engine
/// retains nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct BetOutcome {
    pub path: Vec<Decision>,
    pub slot: u8,
    pub multiplier: f64,
    pub win_amount: f64,
    pub counter: u64,
}

/// Resolve a single bet: validate, derive the path, apply the multiplier row.
///
/// The counter must be used for at most one bet per (secret, public seed)
/// pair; the session owning the counter enforces that, not this function.
pub fn resolve_bet(
    secret: &SecretSeed,
    public_seed: &str,
    counter: u64,
    steps: u8,
    risk: Option<RiskTier>,
    stake: f64,
) -> Result<BetOutcome> {
    if !(MIN_STEPS..=MAX_STEPS).contains(&steps) {
        return Err(Error::InvalidConfiguration { steps });
    }
    if !(stake > 0.0) || !stake.is_finite() {
        return Err(Error::InvalidStake);
    }
    let outcome = derive_path(secret, public_seed, counter, steps);
    let row = multiplier_row(steps, risk);
    let multiplier = row[outcome.slot as usize];
    Ok(BetOutcome {
        path: outcome.path,
        slot: outcome.slot,
        multiplier,
        win_amount: stake * multiplier,
        counter,
    })
}

/// Check a revealed seed against a published commitment and a claimed path.
/// Both must hold for the game to be genuine.
pub fn verify(
    revealed: &SecretSeed,
    published_commitment: &str,
    public_seed: &str,
    counter: u64,
    steps: u8,
    claimed_path: &[u8],
) -> bool {
    if revealed.commitment() != published_commitment {
        return false;
    }
    let derived = derive_path(revealed, public_seed, counter, steps);
    let bits: Vec<u8> = derived.path.iter().map(|d| d.as_bit()).collect();
    bits == claimed_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> SecretSeed {
        SecretSeed::from_bytes([0x42; 32])
    }

    #[test]
    fn test_resolve_deterministic() {
        let a = resolve_bet(&seed(), "clientSeed", 9, 12, Some(RiskTier::High), 2.5).unwrap();
        let b = resolve_bet(&seed(), "clientSeed", 9, 12, Some(RiskTier::High), 2.5).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.win_amount, 2.5 * a.multiplier);
        assert_eq!(a.counter, 9);
    }

    #[test]
    fn test_params_resolve_matches_free_fn() {
        let params = EngineParams {
            steps: 10,
            risk: RiskTier::Low,
        };
        let via_params = params.resolve(&seed(), "c", 4, 1.0).unwrap();
        let direct = resolve_bet(&seed(), "c", 4, 10, Some(RiskTier::Low), 1.0).unwrap();
        assert_eq!(via_params, direct);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let s = seed();
        assert_eq!(
            resolve_bet(&s, "c", 0, 7, None, 1.0).unwrap_err(),
            Error::InvalidConfiguration { steps: 7 }
        );
        assert_eq!(
            resolve_bet(&s, "c", 0, 17, None, 1.0).unwrap_err(),
            Error::InvalidConfiguration { steps: 17 }
        );
        assert_eq!(resolve_bet(&s, "c", 0, 8, None, 0.0).unwrap_err(), Error::InvalidStake);
        assert_eq!(resolve_bet(&s, "c", 0, 8, None, -1.0).unwrap_err(), Error::InvalidStake);
        assert_eq!(
            resolve_bet(&s, "c", 0, 8, None, f64::NAN).unwrap_err(),
            Error::InvalidStake
        );
    }

    #[test]
    fn test_verify_round_trip() {
        let s = seed();
        let commitment = s.commitment();
        let out = resolve_bet(&s, "clientSeed", 0, 8, None, 1.0).unwrap();
        let bits: Vec<u8> = out.path.iter().map(|d| d.as_bit()).collect();
        assert!(verify(&s, &commitment, "clientSeed", 0, 8, &bits));

        // Flipping one byte of the secret breaks the commitment check.
        let mut tampered = *s.as_bytes();
        tampered[0] ^= 0x01;
        let tampered = SecretSeed::from_bytes(tampered);
        assert!(!verify(&tampered, &commitment, "clientSeed", 0, 8, &bits));

        // A tampered path fails even with the genuine seed.
        let mut wrong = bits.clone();
        wrong[0] ^= 1;
        assert!(!verify(&s, &commitment, "clientSeed", 0, 8, &wrong));
    }
}
