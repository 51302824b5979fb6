use atomicdrop_core::{
    derive_path, fallback_row, multiplier_row, resolve_bet, verify, RiskTier, SecretSeed, Session,
};

#[test]
fn derivation_repeatable() {
    let seed = SecretSeed::from_bytes([7; 32]);
    for counter in 0..20 {
        let a = derive_path(&seed, "c", counter, 16);
        let b = derive_path(&seed, "c", counter, 16);
        assert_eq!(a, b);
    }
}

#[test]
fn path_shape_over_all_depths() {
    let seed = SecretSeed::from_bytes([9; 32]);
    for steps in 8..=16u8 {
        let out = derive_path(&seed, "shape", 0, steps);
        assert_eq!(out.path.len(), steps as usize);
        assert!(out.slot <= steps);
    }
}

#[test]
fn full_protocol_round_trip() {
    // Commit, bet, reveal, verify: the whole fairness protocol in order.
    let mut session = Session::new("playerSeed");
    let commitment = session.commit_epoch().unwrap();

    let mut claimed = Vec::new();
    for _ in 0..10 {
        let out = session.place_bet(12, Some(RiskTier::High), 1.0).unwrap();
        let bits: Vec<u8> = out.path.iter().map(|d| d.as_bit()).collect();
        claimed.push((out.counter, bits));
    }

    let revealed_hex = session.reveal().unwrap();
    let revealed = SecretSeed::from_hex(&revealed_hex).unwrap();
    for (counter, bits) in &claimed {
        assert!(verify(&revealed, &commitment, "playerSeed", *counter, 12, bits));
    }
}

#[test]
fn payout_matches_row() {
    let seed = SecretSeed::from_bytes([3; 32]);
    for counter in 0..100 {
        let out = resolve_bet(&seed, "payout", counter, 10, Some(RiskTier::Low), 4.0).unwrap();
        let row = multiplier_row(10, Some(RiskTier::Low));
        assert_eq!(out.multiplier, row[out.slot as usize]);
        assert_eq!(out.win_amount, 4.0 * out.multiplier);
    }
}

#[test]
fn house_edge_simulation_smoke() {
    // RTP over many bets should land well below the fallback's 100%.
    let seed = SecretSeed::from_bytes([5; 32]);
    let mut total_win = 0.0;
    let bets = 5000u64;
    for counter in 0..bets {
        let out = resolve_bet(&seed, "rtp", counter, 16, Some(RiskTier::Medium), 1.0).unwrap();
        total_win += out.win_amount;
    }
    let rtp = total_win / bets as f64;
    assert!(rtp > 0.3 && rtp < 1.5, "rtp={rtp}");
}

#[test]
fn fallback_center_is_minimum() {
    for steps in 8..=16u8 {
        let row = fallback_row(steps);
        let center = row[steps as usize / 2];
        assert!(row.iter().all(|&m| m >= center));
        assert_eq!(row[0], (1u64 << steps) as f64);
    }
}
