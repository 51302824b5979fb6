use atomicdrop_core::RiskTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BetRequest {
    pub client_seed: String,
    pub steps: u8,
    #[serde(default)]
    pub risk: Option<RiskTier>,
    pub stake: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BetResponse {
    pub commitment: String,
    pub counter: u64,
    /// 0 = left, 1 = right, one entry per step.
    pub path: Vec<u8>,
    pub slot: u8,
    pub multiplier: f64,
    pub win_amount: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommitmentResponse {
    pub commitment: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VerifyRequest {
    pub revealed_seed: String,
    pub commitment: String,
    pub client_seed: String,
    pub counter: u64,
    pub steps: u8,
    pub claimed_path: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VerifyResponse {
    pub valid: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RotateEpochResponse {
    /// Secret of the epoch just ended, for player-side verification.
    pub revealed_seed: String,
    pub revealed_commitment: String,
    /// Commitment of the fresh epoch now accepting bets.
    pub commitment: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BetLogEntry {
    pub id: i64,
    pub ts: DateTime<Utc>,
    pub client_seed: String,
    pub counter: i64,
    pub commitment: String,
    pub steps: u8,
    pub risk: RiskTier,
    pub stake: f64,
    pub slot: u8,
    pub multiplier: f64,
    pub win_amount: f64,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("epoch closed")]
    EpochClosed,
    #[error("internal server error")]
    Internal,
}

pub type ApiResult<T> = Result<T, ApiError>;
