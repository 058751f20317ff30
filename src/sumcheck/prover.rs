use ark_ff::Field;

use super::univariate::RoundMessage;
use crate::config::SumCheckConfig;
use crate::errors::{Result, SumCheckError};
use crate::polynomial::MultilinearPolynomial;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProverState {
    AwaitingStart,
    /// 1-based round; `message_sent` once `produce_round` answered for it
    RunningRound { round: usize, message_sent: bool },
    Finished,
}

impl ProverState {
    pub fn name(&self) -> &'static str {
        match self {
            ProverState::AwaitingStart => "awaiting start",
            ProverState::RunningRound { message_sent: false, .. } => "running a round",
            ProverState::RunningRound { message_sent: true, .. } => "awaiting a challenge",
            ProverState::Finished => "finished",
        }
    }
}

/// Prover for the sum-check protocol over a multilinear polynomial
///
/// Holds only the current, partially bound polynomial: each challenge halves
/// the table and the previous one is dropped.
#[derive(Debug, Clone)]
pub struct SumCheckProver<F: Field> {
    pub(super) config: SumCheckConfig,
    pub(super) state: ProverState,
    pub(super) num_vars: usize,
    pub(super) poly: Option<MultilinearPolynomial<F>>,
}

impl<F: Field> Default for SumCheckProver<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> SumCheckProver<F> {
    pub fn new() -> Self {
        Self::with_config(SumCheckConfig::default())
    }

    pub fn with_config(config: SumCheckConfig) -> Self {
        Self {
            config,
            state: ProverState::AwaitingStart,
            num_vars: 0,
            poly: None,
        }
    }

    /// Load P and the claim Σ P = `claimed_sum`.
    ///
    /// A wrong claim is a caller bug, reported as `InvalidClaim`: an honest
    /// prover never argues for a false sum.
    pub fn start(&mut self, poly: MultilinearPolynomial<F>, claimed_sum: F) -> Result<()> {
        if self.state != ProverState::AwaitingStart {
            return Err(SumCheckError::UnexpectedCall {
                call: "start",
                state: self.state.name(),
            });
        }
        if poly.sum_with_threshold(self.config.parallel_threshold) != claimed_sum {
            return Err(SumCheckError::InvalidClaim);
        }
        self.num_vars = poly.num_vars();
        self.state = if self.num_vars == 0 {
            ProverState::Finished
        } else {
            ProverState::RunningRound {
                round: 1,
                message_sent: false,
            }
        };
        self.poly = Some(poly);
        Ok(())
    }

    /// Swap the tunables, e.g. after resuming a serialized prover
    pub fn set_config(&mut self, config: SumCheckConfig) {
        self.config = config;
    }

    pub fn config(&self) -> SumCheckConfig {
        self.config
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn state(&self) -> ProverState {
        self.state
    }

    /// 1-based round currently in progress, if any
    pub fn round(&self) -> Option<usize> {
        match self.state {
            ProverState::RunningRound { round, .. } => Some(round),
            _ => None,
        }
    }

    /// Compute g_i(X) = Σ_{rest} P(r_1, ..., r_{i-1}, X, rest) as (g_i(0), g_i(1)).
    ///
    /// With the bound prefix already folded into the table, g_i(0) and g_i(1)
    /// are the sums of its low and high halves.
    #[tracing::instrument(skip_all, name = "SumCheckProver::produce_round", fields(round = ?self.round()))]
    pub fn produce_round(&mut self) -> Result<RoundMessage<F>> {
        let round = match self.state {
            ProverState::RunningRound {
                round,
                message_sent: false,
            } => round,
            other => {
                return Err(SumCheckError::UnexpectedCall {
                    call: "produce_round",
                    state: other.name(),
                })
            }
        };
        let (eval_0, eval_1) = self
            .current()?
            .half_sums_with_threshold(self.config.parallel_threshold)?;
        self.state = ProverState::RunningRound {
            round,
            message_sent: true,
        };
        tracing::debug!(round, "produced round message");
        Ok(RoundMessage::new(eval_0, eval_1))
    }

    /// Bind the current variable to the verifier's challenge r_i
    #[tracing::instrument(skip_all, name = "SumCheckProver::receive_challenge", fields(round = ?self.round()))]
    pub fn receive_challenge(&mut self, r: F) -> Result<()> {
        let round = match self.state {
            ProverState::RunningRound {
                round,
                message_sent: true,
            } => round,
            other => {
                return Err(SumCheckError::UnexpectedCall {
                    call: "receive_challenge",
                    state: other.name(),
                })
            }
        };
        let folded = self
            .current()?
            .fold_first(r, self.config.parallel_threshold)?;
        self.poly = Some(folded);
        self.state = if round == self.num_vars {
            ProverState::Finished
        } else {
            ProverState::RunningRound {
                round: round + 1,
                message_sent: false,
            }
        };
        Ok(())
    }

    /// P(r_1, ..., r_n), the single entry left once every variable is bound
    pub fn final_evaluation(&self) -> Result<F> {
        if self.state != ProverState::Finished {
            return Err(SumCheckError::UnexpectedCall {
                call: "final_evaluation",
                state: self.state.name(),
            });
        }
        Ok(self.current()?.evaluations()[0])
    }

    fn current(&self) -> Result<&MultilinearPolynomial<F>> {
        self.poly.as_ref().ok_or(SumCheckError::UnexpectedCall {
            call: "current polynomial",
            state: self.state.name(),
        })
    }
}
