//! Concrete prime fields
//!
//! The sum-check core is generic over `ark_ff::Field` (and `PrimeField` where a
//! transcript has to hash elements). Two fields ship with the crate: the
//! BLS12-381 scalar field for realistic soundness, and `F17` for hand-checkable
//! examples.

pub mod bls12_381;
pub mod f17;

pub use ark_bls12_381::Fr as Bls12381Fr;
pub use ark_ff::{Field as ArkField, PrimeField};
pub use f17::F17;
