use crate::{
    engine::{resolve_bet, BetOutcome},
    error::{Error, Result},
    multipliers::RiskTier,
    seed::SecretSeed,
};

/// Epoch lifecycle. `Revealed` is terminal for the seed pair; a new epoch
/// starts the cycle over with a fresh seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoEpoch,
    Committed,
    Betting,
    Revealed,
}

/// One player session: owns the secret seed, the public seed, and the bet
/// counter. The counter is the only mutable state shared across bets, and it
/// advances by exactly one per accepted bet — rejected bets leave it alone.
///
/// Concurrent use of one session must go through a single mutual-exclusion
/// boundary so two bets cannot consume the same counter value.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    secret: Option<SecretSeed>,
    public_seed: String,
    next_counter: u64,
}

impl Session {
    pub fn new(public_seed: impl Into<String>) -> Self {
        Self {
            state: SessionState::NoEpoch,
            secret: None,
            public_seed: public_seed.into(),
            next_counter: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn public_seed(&self) -> &str {
        &self.public_seed
    }

    /// Counter the next accepted bet will consume.
    pub fn next_counter(&self) -> u64 {
        self.next_counter
    }

    /// Start a new epoch: draw a seed and return its public commitment.
    /// The commitment must reach the player before any bet is accepted.
    pub fn commit_epoch(&mut self) -> Result<String> {
        match self.state {
            SessionState::NoEpoch | SessionState::Revealed => {}
            SessionState::Committed | SessionState::Betting => return Err(Error::EpochActive),
        }
        let secret = SecretSeed::generate()?;
        let commitment = secret.commitment();
        self.secret = Some(secret);
        self.next_counter = 0;
        self.state = SessionState::Committed;
        Ok(commitment)
    }

    pub fn commitment(&self) -> Option<String> {
        self.secret.as_ref().map(|s| s.commitment())
    }

    /// Resolve a bet with the session's current counter and advance it.
    /// Counter allocation and outcome production happen as a unit; any
    /// rejection leaves the counter unchanged.
    pub fn place_bet(&mut self, steps: u8, risk: Option<RiskTier>, stake: f64) -> Result<BetOutcome> {
        let secret = match self.state {
            SessionState::NoEpoch => return Err(Error::SeedNotReady),
            SessionState::Revealed => return Err(Error::EpochClosed),
            SessionState::Committed | SessionState::Betting => {
                self.secret.as_ref().ok_or(Error::SeedNotReady)?
            }
        };
        let outcome = resolve_bet(secret, &self.public_seed, self.next_counter, steps, risk, stake)?;
        self.next_counter += 1;
        self.state = SessionState::Betting;
        Ok(outcome)
    }

    /// `place_bet` with a caller-supplied counter, for callers that track the
    /// counter externally. The counter must be exactly the next one.
    pub fn place_bet_at(
        &mut self,
        counter: u64,
        steps: u8,
        risk: Option<RiskTier>,
        stake: f64,
    ) -> Result<BetOutcome> {
        if counter != self.next_counter {
            return Err(Error::CounterReuse {
                expected: self.next_counter,
                got: counter,
            });
        }
        self.place_bet(steps, risk, stake)
    }

    /// End the epoch and expose the secret for verification. Terminal: no
    /// further bets are accepted under this seed pair.
    pub fn reveal(&mut self) -> Result<String> {
        match self.state {
            SessionState::NoEpoch => Err(Error::SeedNotReady),
            SessionState::Revealed => Err(Error::EpochClosed),
            SessionState::Committed | SessionState::Betting => {
                self.state = SessionState::Revealed;
                let secret = self.secret.as_ref().ok_or(Error::SeedNotReady)?;
                Ok(secret.reveal_hex())
            }
        }
    }
}
