//! Sum-check protocol for multilinear polynomials
//!
//! Reduces a claim Σ_{x∈{0,1}^n} P(x) = S to P(r) = e, where r is random.
//!
//! Supports both interactive (prover/verifier) and non-interactive (NIZK via Fiat-Shamir).

mod challenger;
mod protocol;
mod prover;
mod state_serde;
mod univariate;
mod verifier;
pub mod transcript;

pub use challenger::{Challenger, RandomChallenger};
pub use protocol::{prove, run_interactive, verify, verify_rounds};
pub use prover::{ProverState, SumCheckProver};
pub use transcript::{AuditTranscript, KeccakTranscript, SumCheckProof, Transcript};
pub use univariate::RoundMessage;
pub use verifier::{Rejection, RoundOutcome, SumCheckVerifier, Verdict, VerifierState};
