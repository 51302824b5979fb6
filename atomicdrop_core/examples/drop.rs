use atomicdrop_core::{EngineParams, RiskTier, SecretSeed};

fn main() -> atomicdrop_core::Result<()> {
    // Example end-to-end bet
    let secret = SecretSeed::generate()?;
    let public_seed = "example-client-seed";
    let counter = 0u64;
    println!("commitment={}", secret.commitment());

    let params = EngineParams {
        steps: 16,
        risk: RiskTier::Medium,
    };
    let outcome = params.resolve(&secret, public_seed, counter, 1.0)?;
    let bits: Vec<u8> = outcome.path.iter().map(|d| d.as_bit()).collect();
    println!(
        "counter={} path={:?} slot={} multiplier={} win={}",
        outcome.counter, bits, outcome.slot, outcome.multiplier, outcome.win_amount
    );

    println!("revealed={}", secret.reveal_hex());
    Ok(())
}
