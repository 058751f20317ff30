use ark_ff::Field;

use super::challenger::Challenger;
use super::univariate::RoundMessage;
use crate::errors::{Result, SumCheckError};
use crate::traits::EvaluationOracle;

/// Why a run was rejected. Rejection is a protocol outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection<F: Field> {
    /// g_round(0) + g_round(1) did not match the running claim
    SumCheckFailed { round: usize, expected: F, actual: F },
    /// The last claim did not match the oracle evaluation at the challenge point
    FinalCheckFailed { expected: F, actual: F },
}

impl<F: Field> Rejection<F> {
    pub fn into_error(self) -> SumCheckError {
        match self {
            Rejection::SumCheckFailed { round, .. } => SumCheckError::SumCheckFailed { round },
            Rejection::FinalCheckFailed { .. } => SumCheckError::FinalCheckFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<F: Field> {
    Accepted,
    Rejected(Rejection<F>),
}

impl<F: Field> Verdict<F> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Turn a rejection into `SumCheckFailed` / `FinalCheckFailed` for `?`-style callers
    pub fn into_result(self) -> Result<()> {
        match self {
            Verdict::Accepted => Ok(()),
            Verdict::Rejected(rejection) => Err(rejection.into_error()),
        }
    }
}

/// Result of feeding one round message to the verifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome<F: Field> {
    /// Message accepted; forward this challenge to the prover
    Challenge(F),
    Rejected(Rejection<F>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierState<F: Field> {
    AwaitingStart,
    /// Waiting for the message of this (1-based) round
    RunningRound(usize),
    /// Round message checked, waiting for the round's challenge
    AwaitingChallenge(usize),
    /// All rounds done, waiting for the oracle evaluation
    AwaitingFinalCheck,
    Accepted,
    Rejected(Rejection<F>),
}

impl<F: Field> VerifierState<F> {
    pub fn name(&self) -> &'static str {
        match self {
            VerifierState::AwaitingStart => "awaiting start",
            VerifierState::RunningRound(_) => "running a round",
            VerifierState::AwaitingChallenge(_) => "awaiting a challenge",
            VerifierState::AwaitingFinalCheck => "awaiting the final check",
            VerifierState::Accepted => "accepted",
            VerifierState::Rejected(_) => "rejected",
        }
    }
}

/// Verifier for sum-check. Maintains current target sum and random challenges.
///
/// Every piece of protocol state lives in this struct and it serializes
/// canonically, so a run can be paused at any round boundary (e.g. across a
/// network round trip) and resumed in another process.
#[derive(Debug, Clone)]
pub struct SumCheckVerifier<F: Field> {
    pub(super) state: VerifierState<F>,
    pub(super) num_vars: usize,
    pub(super) claim: F,
    pub(super) challenges: Vec<F>,
    pub(super) pending: Option<RoundMessage<F>>,
}

impl<F: Field> Default for SumCheckVerifier<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> SumCheckVerifier<F> {
    pub fn new() -> Self {
        Self {
            state: VerifierState::AwaitingStart,
            num_vars: 0,
            claim: F::zero(),
            challenges: Vec::new(),
            pending: None,
        }
    }

    /// Verifier already started on the claim Σ P = `claimed_sum` over `num_vars` variables
    pub fn with_claim(num_vars: usize, claimed_sum: F) -> Self {
        let mut verifier = Self::new();
        verifier.init(num_vars, claimed_sum);
        verifier
    }

    pub fn start(&mut self, num_vars: usize, claimed_sum: F) -> Result<()> {
        match self.state {
            VerifierState::AwaitingStart => {
                self.init(num_vars, claimed_sum);
                Ok(())
            }
            other => Err(SumCheckError::UnexpectedCall {
                call: "start",
                state: other.name(),
            }),
        }
    }

    fn init(&mut self, num_vars: usize, claimed_sum: F) {
        self.num_vars = num_vars;
        self.claim = claimed_sum;
        self.challenges = Vec::with_capacity(num_vars);
        self.pending = None;
        self.state = if num_vars == 0 {
            VerifierState::AwaitingFinalCheck
        } else {
            VerifierState::RunningRound(1)
        };
    }

    pub fn state(&self) -> VerifierState<F> {
        self.state
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Current running claim
    pub fn claim(&self) -> F {
        self.claim
    }

    /// Challenges issued so far, r_1 first
    pub fn challenges(&self) -> &[F] {
        &self.challenges
    }

    /// 1-based round currently in progress, if any
    pub fn round(&self) -> Option<usize> {
        match self.state {
            VerifierState::RunningRound(round) | VerifierState::AwaitingChallenge(round) => Some(round),
            _ => None,
        }
    }

    /// Check g(0) + g(1) against the running claim, then draw the challenge from `challenger`
    pub fn receive_round<C: Challenger<F> + ?Sized>(
        &mut self,
        msg: &RoundMessage<F>,
        challenger: &mut C,
    ) -> Result<RoundOutcome<F>> {
        if let Some(rejection) = self.check_round(msg)? {
            return Ok(RoundOutcome::Rejected(rejection));
        }
        challenger.observe(msg);
        let r = challenger.sample();
        self.set_challenge(r)?;
        Ok(RoundOutcome::Challenge(r))
    }

    /// Same as [`Self::receive_round`] with a challenge fixed by the caller
    pub fn receive_round_with_challenge(
        &mut self,
        msg: &RoundMessage<F>,
        r: F,
    ) -> Result<RoundOutcome<F>> {
        if let Some(rejection) = self.check_round(msg)? {
            return Ok(RoundOutcome::Rejected(rejection));
        }
        self.set_challenge(r)?;
        Ok(RoundOutcome::Challenge(r))
    }

    /// Per-round consistency check. A failed check moves the verifier to
    /// `Rejected` for good; a passing one leaves it waiting for the challenge.
    pub fn check_round(&mut self, msg: &RoundMessage<F>) -> Result<Option<Rejection<F>>> {
        let round = match self.state {
            VerifierState::RunningRound(round) => round,
            other => return Err(self.misuse("check_round", other)),
        };
        let actual = msg.sum_over_boolean();
        if actual != self.claim {
            let rejection = Rejection::SumCheckFailed {
                round,
                expected: self.claim,
                actual,
            };
            tracing::warn!(round, "sum-check round rejected");
            self.state = VerifierState::Rejected(rejection);
            return Ok(Some(rejection));
        }
        self.pending = Some(*msg);
        self.state = VerifierState::AwaitingChallenge(round);
        Ok(None)
    }

    /// Bind the checked round message to r: claim := g(r), history += r
    pub fn set_challenge(&mut self, r: F) -> Result<()> {
        let round = match self.state {
            VerifierState::AwaitingChallenge(round) => round,
            other => return Err(self.misuse("set_challenge", other)),
        };
        let msg = self.pending.take().ok_or(SumCheckError::UnexpectedCall {
            call: "set_challenge",
            state: "missing the checked round message",
        })?;
        self.claim = msg.evaluate(r);
        self.challenges.push(r);
        tracing::debug!(round, "sum-check round accepted");
        self.state = if round == self.num_vars {
            VerifierState::AwaitingFinalCheck
        } else {
            VerifierState::RunningRound(round + 1)
        };
        Ok(())
    }

    /// Final check: accept iff the running claim equals P(r_1, ..., r_n)
    pub fn finish(&mut self, oracle_evaluation: F) -> Result<Verdict<F>> {
        match self.state {
            VerifierState::AwaitingFinalCheck => {}
            other => return Err(self.misuse("finish", other)),
        }
        if oracle_evaluation == self.claim {
            self.state = VerifierState::Accepted;
            Ok(Verdict::Accepted)
        } else {
            let rejection = Rejection::FinalCheckFailed {
                expected: oracle_evaluation,
                actual: self.claim,
            };
            tracing::warn!(num_vars = self.num_vars, "sum-check final check rejected");
            self.state = VerifierState::Rejected(rejection);
            Ok(Verdict::Rejected(rejection))
        }
    }

    /// Query `oracle` at the challenge point and run the final check
    pub fn finish_with_oracle<O: EvaluationOracle<F> + ?Sized>(&mut self, oracle: &O) -> Result<Verdict<F>> {
        match self.state {
            VerifierState::AwaitingFinalCheck => {}
            other => return Err(self.misuse("finish_with_oracle", other)),
        }
        let oracle_evaluation = oracle.evaluate(&self.challenges)?;
        self.finish(oracle_evaluation)
    }

    fn misuse(&self, call: &'static str, state: VerifierState<F>) -> SumCheckError {
        match state {
            VerifierState::Rejected(_) => SumCheckError::AlreadyRejected,
            other => SumCheckError::UnexpectedCall {
                call,
                state: other.name(),
            },
        }
    }
}
