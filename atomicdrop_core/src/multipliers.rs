use serde::{Deserialize, Serialize};

/// Which curated payout curve to use. Higher tiers pay more at the edges and
/// less at the center for the same step count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl std::str::FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskTier::Low),
            "medium" => Ok(RiskTier::Medium),
            "high" => Ok(RiskTier::High),
            other => Err(format!("unknown risk tier: {other}")),
        }
    }
}

// Hand-tuned rows for the supported 8..=16 step boards, indexed by landing
// slot. These encode the house edge and are configuration data, never derived
// at runtime. Each row has steps+1 entries and is symmetric around the center.

static LOW: [&[f64]; 9] = [
    &[5.6, 2.1, 1.1, 1.0, 0.5, 1.0, 1.1, 2.1, 5.6],
    &[5.6, 2.0, 1.6, 1.0, 0.7, 0.7, 1.0, 1.6, 2.0, 5.6],
    &[8.9, 3.0, 1.4, 1.1, 1.0, 0.5, 1.0, 1.1, 1.4, 3.0, 8.9],
    &[8.4, 3.0, 1.9, 1.3, 1.0, 0.7, 0.7, 1.0, 1.3, 1.9, 3.0, 8.4],
    &[10.0, 3.0, 1.6, 1.4, 1.1, 1.0, 0.5, 1.0, 1.1, 1.4, 1.6, 3.0, 10.0],
    &[8.1, 4.0, 3.0, 1.9, 1.2, 0.9, 0.7, 0.7, 0.9, 1.2, 1.9, 3.0, 4.0, 8.1],
    &[7.1, 4.0, 1.9, 1.4, 1.3, 1.1, 1.0, 0.5, 1.0, 1.1, 1.3, 1.4, 1.9, 4.0, 7.1],
    &[15.0, 8.0, 3.0, 2.0, 1.5, 1.1, 1.0, 0.7, 0.7, 1.0, 1.1, 1.5, 2.0, 3.0, 8.0, 15.0],
    &[16.0, 9.0, 2.0, 1.4, 1.4, 1.2, 1.1, 1.0, 0.5, 1.0, 1.1, 1.2, 1.4, 1.4, 2.0, 9.0, 16.0],
];

static MEDIUM: [&[f64]; 9] = [
    &[13.0, 3.0, 1.3, 0.7, 0.4, 0.7, 1.3, 3.0, 13.0],
    &[18.0, 4.0, 1.7, 0.9, 0.5, 0.5, 0.9, 1.7, 4.0, 18.0],
    &[22.0, 5.0, 2.0, 1.4, 0.6, 0.4, 0.6, 1.4, 2.0, 5.0, 22.0],
    &[24.0, 6.0, 3.0, 1.8, 0.7, 0.5, 0.5, 0.7, 1.8, 3.0, 6.0, 24.0],
    &[33.0, 11.0, 4.0, 2.0, 1.1, 0.6, 0.3, 0.6, 1.1, 2.0, 4.0, 11.0, 33.0],
    &[43.0, 13.0, 6.0, 3.0, 1.3, 0.7, 0.4, 0.4, 0.7, 1.3, 3.0, 6.0, 13.0, 43.0],
    &[58.0, 15.0, 7.0, 4.0, 1.9, 1.0, 0.5, 0.2, 0.5, 1.0, 1.9, 4.0, 7.0, 15.0, 58.0],
    &[88.0, 18.0, 11.0, 5.0, 3.0, 1.3, 0.5, 0.3, 0.3, 0.5, 1.3, 3.0, 5.0, 11.0, 18.0, 88.0],
    &[110.0, 41.0, 10.0, 5.0, 3.0, 1.5, 1.0, 0.5, 0.3, 0.5, 1.0, 1.5, 3.0, 5.0, 10.0, 41.0, 110.0],
];

static HIGH: [&[f64]; 9] = [
    &[29.0, 4.0, 1.5, 0.3, 0.2, 0.3, 1.5, 4.0, 29.0],
    &[43.0, 7.0, 2.0, 0.6, 0.2, 0.2, 0.6, 2.0, 7.0, 43.0],
    &[76.0, 10.0, 3.0, 0.9, 0.3, 0.2, 0.3, 0.9, 3.0, 10.0, 76.0],
    &[120.0, 14.0, 5.2, 1.4, 0.4, 0.2, 0.2, 0.4, 1.4, 5.2, 14.0, 120.0],
    &[170.0, 24.0, 8.1, 2.0, 0.7, 0.2, 0.2, 0.2, 0.7, 2.0, 8.1, 24.0, 170.0],
    &[260.0, 37.0, 11.0, 4.0, 1.0, 0.2, 0.2, 0.2, 0.2, 1.0, 4.0, 11.0, 37.0, 260.0],
    &[420.0, 56.0, 18.0, 5.0, 1.9, 0.3, 0.2, 0.2, 0.2, 0.3, 1.9, 5.0, 18.0, 56.0, 420.0],
    &[620.0, 83.0, 27.0, 8.0, 3.0, 0.5, 0.2, 0.2, 0.2, 0.2, 0.5, 3.0, 8.0, 27.0, 83.0, 620.0],
    &[1000.0, 130.0, 26.0, 9.0, 4.0, 2.0, 0.2, 0.2, 0.2, 0.2, 0.2, 2.0, 4.0, 9.0, 26.0, 130.0, 1000.0],
];

pub const MIN_STEPS: u8 = 8;
pub const MAX_STEPS: u8 = 16;

/// Curated row for a supported (steps, tier) pair, if configured.
pub fn curated_row(steps: u8, risk: RiskTier) -> Option<&'static [f64]> {
    if !(MIN_STEPS..=MAX_STEPS).contains(&steps) {
        return None;
    }
    let idx = (steps - MIN_STEPS) as usize;
    let table = match risk {
        RiskTier::Low => &LOW,
        RiskTier::Medium => &MEDIUM,
        RiskTier::High => &HIGH,
    };
    Some(table[idx])
}

// Exact C(n, k). The multiplicative form keeps every intermediate an integer.
fn binomial(n: u8, k: u8) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut res: u128 = 1;
    for i in 1..=k {
        res = res * (n - i + 1) / i;
    }
    res
}

/// Zero-house-edge fallback for step counts with no curated row:
/// row[k] = 2^steps / C(steps, k). Symmetric by binomial symmetry. Kept
/// usable for unconfigured depths; callers should prefer the curated rows.
pub fn fallback_row(steps: u8) -> Vec<f64> {
    let total = (1u128 << steps) as f64;
    (0..=steps)
        .map(|k| {
            let ways = binomial(steps, k);
            if ways == 0 {
                0.0
            } else {
                total / ways as f64
            }
        })
        .collect()
}

/// Payout row for a board: curated when configured, binomial fallback
/// otherwise. `None` risk selects the medium curve.
pub fn multiplier_row(steps: u8, risk: Option<RiskTier>) -> Vec<f64> {
    match curated_row(steps, risk.unwrap_or_default()) {
        Some(row) => row.to_vec(),
        None => fallback_row(steps),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_shape_and_symmetry() {
        for steps in MIN_STEPS..=MAX_STEPS {
            for risk in [RiskTier::Low, RiskTier::Medium, RiskTier::High] {
                let row = curated_row(steps, risk).unwrap();
                assert_eq!(row.len(), steps as usize + 1);
                for k in 0..row.len() {
                    assert_eq!(row[k], row[row.len() - 1 - k], "steps={steps} risk={risk:?} k={k}");
                    assert!(row[k] > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_fallback_symmetry() {
        for steps in [5u8, 8, 17, 20] {
            let row = fallback_row(steps);
            assert_eq!(row.len(), steps as usize + 1);
            for k in 0..row.len() {
                assert_eq!(row[k], row[row.len() - 1 - k]);
            }
        }
    }

    #[test]
    fn test_fallback_eight_steps() {
        // C(8,0)=1 so the edges pay exactly 2^8; the center is the minimum.
        let row = fallback_row(8);
        assert_eq!(row[0], 256.0);
        assert_eq!(row[8], 256.0);
        let center = row[4];
        assert!(row.iter().all(|&m| m >= center));
        assert_eq!(center, 256.0 / 70.0);
    }

    #[test]
    fn test_unconfigured_steps_fall_back() {
        assert_eq!(multiplier_row(6, None), fallback_row(6));
        assert_eq!(multiplier_row(10, None), curated_row(10, RiskTier::Medium).unwrap());
        assert_eq!(
            multiplier_row(16, Some(RiskTier::High)),
            curated_row(16, RiskTier::High).unwrap()
        );
    }

    #[test]
    fn test_risk_tier_str_round_trip() {
        for risk in [RiskTier::Low, RiskTier::Medium, RiskTier::High] {
            assert_eq!(risk.as_str().parse::<RiskTier>().unwrap(), risk);
        }
        assert!("extreme".parse::<RiskTier>().is_err());
    }

    #[test]
    fn test_binomial_exact() {
        assert_eq!(binomial(8, 4), 70);
        assert_eq!(binomial(16, 8), 12870);
        assert_eq!(binomial(10, 0), 1);
        assert_eq!(binomial(4, 7), 0);
    }
}
