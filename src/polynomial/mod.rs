//! Multilinear polynomial utilities and equality polynomials
//!
//! MLE definition: P̃(x) = Σ P(e) · ẽq(x, e), where x ∈ F^ℓ, e ∈ {0,1}^ℓ

pub mod eq;
pub mod multilinear;

pub use eq::{eq_evaluations, eq_polynomial};
pub use multilinear::MultilinearPolynomial;
