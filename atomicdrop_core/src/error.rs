use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The OS entropy source could not be read. Fatal for seed generation;
    /// there is no fallback to a weaker source.
    #[error("secure random source unavailable")]
    EntropyUnavailable,
    #[error("unsupported step count: {steps} (supported 8..=16)")]
    InvalidConfiguration { steps: u8 },
    #[error("stake must be positive and finite")]
    InvalidStake,
    #[error("no epoch committed yet")]
    SeedNotReady,
    #[error("counter {got} already consumed or out of order (expected {expected})")]
    CounterReuse { expected: u64, got: u64 },
    #[error("epoch revealed; no further bets under this seed")]
    EpochClosed,
    #[error("epoch already active; reveal it before committing a new one")]
    EpochActive,
    #[error("secret seed must be 64 hex characters")]
    InvalidSeedHex,
}

pub type Result<T> = std::result::Result<T, Error>;
