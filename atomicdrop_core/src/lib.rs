pub mod engine;
pub mod error;
pub mod multipliers;
pub mod path;
pub mod seed;
pub mod session;

pub use crate::engine::{resolve_bet, verify, BetOutcome, EngineParams};
pub use crate::error::{Error, Result};
pub use crate::multipliers::{fallback_row, multiplier_row, RiskTier, MAX_STEPS, MIN_STEPS};
pub use crate::path::{derive_path, Decision, PathOutcome};
pub use crate::seed::SecretSeed;
pub use crate::session::{Session, SessionState};
