//! Protocol drivers wiring the prover, the verifier and a challenge source
//!
//! Rounds run strictly in order: each message depends on the previous
//! challenge and each check on the previous claim.

use ark_ff::{Field, PrimeField};
use digest::Digest;

use super::challenger::Challenger;
use super::prover::SumCheckProver;
use super::transcript::{AuditTranscript, SumCheckProof, Transcript};
use super::verifier::{Rejection, RoundOutcome, SumCheckVerifier, Verdict, VerifierState};
use crate::config::SumCheckConfig;
use crate::errors::{Result, SumCheckError};
use crate::polynomial::MultilinearPolynomial;
use crate::traits::EvaluationOracle;

/// Run prover and verifier against each other, recording the exchange.
///
/// `oracle` supplies P(r) for the final check and must describe the same
/// polynomial as `poly`, in the same variable order.
#[tracing::instrument(skip_all, name = "sumcheck::run_interactive", fields(num_vars = poly.num_vars()))]
pub fn run_interactive<F, C, O>(
    poly: MultilinearPolynomial<F>,
    claimed_sum: F,
    challenger: &mut C,
    oracle: &O,
    config: SumCheckConfig,
) -> Result<(Verdict<F>, AuditTranscript<F>)>
where
    F: Field,
    C: Challenger<F> + ?Sized,
    O: EvaluationOracle<F> + ?Sized,
{
    let num_vars = poly.num_vars();
    check_oracle_arity(oracle, num_vars)?;

    let mut prover = SumCheckProver::with_config(config);
    prover.start(poly, claimed_sum)?;
    let mut verifier = SumCheckVerifier::with_claim(num_vars, claimed_sum);
    let mut record = AuditTranscript::new(num_vars, claimed_sum);

    for _ in 0..num_vars {
        let msg = prover.produce_round()?;
        record.record_message(msg);
        match verifier.receive_round(&msg, challenger)? {
            RoundOutcome::Challenge(r) => {
                record.record_challenge(r);
                prover.receive_challenge(r)?;
            }
            RoundOutcome::Rejected(rejection) => return Ok((Verdict::Rejected(rejection), record)),
        }
    }

    let verdict = verifier.finish_with_oracle(oracle)?;
    tracing::debug!(accepted = verdict.is_accepted(), "interactive sum-check finished");
    Ok((verdict, record))
}

/// Non-interactive prover: challenges come from `transcript`.
///
/// `config.transcript_label` is absorbed with the statement, so the verifier
/// must be run with the same label. Returns the proof and the challenge point
/// (r_1, ..., r_n) it reduces to.
#[tracing::instrument(skip_all, name = "sumcheck::prove", fields(num_vars = poly.num_vars()))]
pub fn prove<F, D>(
    poly: MultilinearPolynomial<F>,
    claimed_sum: F,
    transcript: &mut Transcript<F, D>,
    config: SumCheckConfig,
) -> Result<(SumCheckProof<F>, Vec<F>)>
where
    F: PrimeField,
    D: Digest + Clone,
{
    let num_vars = poly.num_vars();
    absorb_statement(transcript, config.transcript_label, num_vars, &claimed_sum);

    let mut prover = SumCheckProver::with_config(config);
    prover.start(poly, claimed_sum)?;
    let mut round_messages = Vec::with_capacity(num_vars);
    let mut challenges = Vec::with_capacity(num_vars);

    for _ in 0..num_vars {
        let msg = prover.produce_round()?;
        transcript.observe(&msg);
        let r = transcript.sample();
        prover.receive_challenge(r)?;
        round_messages.push(msg);
        challenges.push(r);
    }

    let proof = SumCheckProof {
        round_messages,
        final_eval: prover.final_evaluation()?,
    };
    Ok((proof, challenges))
}

/// Replay the rounds of `proof` through a verifier, stopping before the final check.
///
/// The returned verifier is either `Rejected` or `AwaitingFinalCheck`; in the
/// latter case `claim()` and `challenges()` are the reduced claim P(r) = claim
/// for a caller that evaluates P some other way (e.g. the next GKR layer).
pub fn verify_rounds<F, D>(
    proof: &SumCheckProof<F>,
    num_vars: usize,
    claimed_sum: F,
    transcript: &mut Transcript<F, D>,
    config: SumCheckConfig,
) -> Result<SumCheckVerifier<F>>
where
    F: PrimeField,
    D: Digest + Clone,
{
    if proof.num_rounds() != num_vars {
        return Err(SumCheckError::TranscriptMismatch(format!(
            "expected {} round messages, proof has {}",
            num_vars,
            proof.num_rounds()
        )));
    }
    absorb_statement(transcript, config.transcript_label, num_vars, &claimed_sum);

    let mut verifier = SumCheckVerifier::with_claim(num_vars, claimed_sum);
    for msg in &proof.round_messages {
        if let RoundOutcome::Rejected(_) = verifier.receive_round(msg, transcript)? {
            break;
        }
    }
    Ok(verifier)
}

/// Non-interactive verifier with the final oracle check.
///
/// Besides claim == P(r), the prover's reported `final_eval` must also match
/// the oracle; a proof that disagrees with itself is rejected.
#[tracing::instrument(skip_all, name = "sumcheck::verify", fields(num_vars = num_vars))]
pub fn verify<F, D, O>(
    proof: &SumCheckProof<F>,
    num_vars: usize,
    claimed_sum: F,
    transcript: &mut Transcript<F, D>,
    oracle: &O,
    config: SumCheckConfig,
) -> Result<Verdict<F>>
where
    F: PrimeField,
    D: Digest + Clone,
    O: EvaluationOracle<F> + ?Sized,
{
    check_oracle_arity(oracle, num_vars)?;
    let mut verifier = verify_rounds(proof, num_vars, claimed_sum, transcript, config)?;
    if let VerifierState::Rejected(rejection) = verifier.state() {
        return Ok(Verdict::Rejected(rejection));
    }

    let oracle_evaluation = oracle.evaluate(verifier.challenges())?;
    let verdict = verifier.finish(oracle_evaluation)?;
    if verdict.is_accepted() && proof.final_eval != oracle_evaluation {
        tracing::warn!("prover's final evaluation disagrees with the oracle");
        return Ok(Verdict::Rejected(Rejection::FinalCheckFailed {
            expected: oracle_evaluation,
            actual: proof.final_eval,
        }));
    }
    Ok(verdict)
}

impl<F: Field> AuditTranscript<F> {
    /// Re-run verification from the recorded messages and challenges.
    ///
    /// A run rejected mid-way records one more message than challenges; the
    /// replay must reject at that same message.
    #[tracing::instrument(skip_all, name = "AuditTranscript::replay", fields(num_vars = self.num_vars))]
    pub fn replay<O: EvaluationOracle<F> + ?Sized>(&self, oracle: &O) -> Result<Verdict<F>> {
        check_oracle_arity(oracle, self.num_vars)?;
        if self.messages.len() > self.num_vars || self.challenges.len() > self.messages.len() {
            return Err(SumCheckError::TranscriptMismatch(format!(
                "{} messages and {} challenges for {} variables",
                self.messages.len(),
                self.challenges.len(),
                self.num_vars
            )));
        }

        let mut verifier = SumCheckVerifier::with_claim(self.num_vars, self.claimed_sum);
        for (i, msg) in self.messages.iter().enumerate() {
            if let Some(rejection) = verifier.check_round(msg)? {
                return Ok(Verdict::Rejected(rejection));
            }
            let r = self.challenges.get(i).ok_or_else(|| {
                SumCheckError::TranscriptMismatch(format!("no challenge recorded for round {}", i + 1))
            })?;
            verifier.set_challenge(*r)?;
        }
        if self.messages.len() != self.num_vars {
            return Err(SumCheckError::TranscriptMismatch(format!(
                "run stopped after {} of {} rounds without a rejection",
                self.messages.len(),
                self.num_vars
            )));
        }
        verifier.finish_with_oracle(oracle)
    }
}

impl<F: PrimeField> SumCheckProof<F> {
    /// Shorthand for [`prove`] on a fresh Blake2b transcript, dropping the challenge point
    pub fn prove(poly: MultilinearPolynomial<F>, claimed_sum: F, config: SumCheckConfig) -> Result<Self> {
        let mut transcript = Transcript::<F>::new(config.transcript_label);
        prove(poly, claimed_sum, &mut transcript, config).map(|(proof, _)| proof)
    }

    /// Counterpart of [`SumCheckProof::prove`] under the default config
    pub fn verify<O: EvaluationOracle<F> + ?Sized>(
        &self,
        num_vars: usize,
        claimed_sum: F,
        oracle: &O,
    ) -> Result<Verdict<F>> {
        self.verify_with_config(num_vars, claimed_sum, oracle, SumCheckConfig::default())
    }

    /// Counterpart of [`SumCheckProof::prove`]; `config` must carry the prover's label
    pub fn verify_with_config<O: EvaluationOracle<F> + ?Sized>(
        &self,
        num_vars: usize,
        claimed_sum: F,
        oracle: &O,
        config: SumCheckConfig,
    ) -> Result<Verdict<F>> {
        let mut transcript = Transcript::<F>::new(config.transcript_label);
        verify(self, num_vars, claimed_sum, &mut transcript, oracle, config)
    }
}

/// Bind the statement (domain label, arity and claimed sum) before any round message
fn absorb_statement<F: PrimeField, D: Digest + Clone>(
    transcript: &mut Transcript<F, D>,
    label: &[u8],
    num_vars: usize,
    claimed_sum: &F,
) {
    transcript.append_bytes(b"sumcheck_domain", label);
    transcript.append_u64(b"sumcheck_num_vars", num_vars as u64);
    transcript.append_scalar(b"sumcheck_claimed_sum", claimed_sum);
}

fn check_oracle_arity<F: Field, O: EvaluationOracle<F> + ?Sized>(oracle: &O, num_vars: usize) -> Result<()> {
    if oracle.num_vars() != num_vars {
        return Err(SumCheckError::DimensionMismatch {
            expected: num_vars,
            actual: oracle.num_vars(),
        });
    }
    Ok(())
}
