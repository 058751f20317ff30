//! # Hypercube sum-check
//!
//! The sum-check protocol over multilinear polynomials on a prime field:
//! a prover convinces a verifier that Σ_{x∈{0,1}^n} P(x) = S with n rounds of
//! degree-1 messages and a single evaluation of P at a random point.
//!
//! ## Structure
//!
//! - `field`: Prime fields (BLS12-381 scalar field, and F17 for small worked examples)
//! - `polynomial`: Multilinear polynomials in evaluation form, and ẽq
//! - `sumcheck`: Prover, verifier, challengers and the protocol drivers
//! - `traits`: Oracle access to P for the final check
//! - `config`: Parallelism and transcript settings
//!
//! ## Usage
//!
//! ```ignore
//! let poly = MultilinearPolynomial::new(evals)?;
//! let sum = poly.sum_over_hypercube();
//! let config = SumCheckConfig::default().with_transcript_label(b"example");
//! let proof = SumCheckProof::prove(poly.clone(), sum, config)?;
//! assert!(proof.verify_with_config(poly.num_vars(), sum, &poly, config)?.is_accepted());
//!
//! // or drive the transcript yourself and keep the challenge point
//! let mut transcript = Transcript::<Fr>::new(b"example");
//! let (proof, point) = prove(poly.clone(), sum, &mut transcript, config)?;
//! let mut transcript = Transcript::<Fr>::new(b"example");
//! assert!(verify(&proof, poly.num_vars(), sum, &mut transcript, &poly, config)?.is_accepted());
//! ```
//!
//! Hypercube points are indexed with x_1 as the most significant bit.

pub mod config;
pub mod field;
pub mod polynomial;
pub mod sumcheck;
pub mod traits;

pub mod errors;
pub mod utils;

// Re-exports
pub use config::SumCheckConfig;
pub use errors::{Result, SumCheckError};
pub use polynomial::MultilinearPolynomial;
pub use sumcheck::{
    prove, run_interactive, verify, AuditTranscript, RoundMessage, SumCheckProof, SumCheckProver,
    SumCheckVerifier, Transcript, Verdict,
};
pub use traits::EvaluationOracle;
