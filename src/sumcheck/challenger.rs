//! Challenge sources for the verifier
//!
//! The round loop only ever asks for "the next challenge given the messages so
//! far". An interactive verifier answers with fresh randomness; the
//! non-interactive variant hashes the transcript (see [`super::transcript`]).

use ark_ff::Field;
use rand::Rng;

use super::univariate::RoundMessage;

pub trait Challenger<F: Field> {
    /// Absorb a prover message that the next challenge must depend on
    fn observe(&mut self, msg: &RoundMessage<F>);

    /// Next verifier challenge
    fn sample(&mut self) -> F;
}

impl<F: Field, C: Challenger<F> + ?Sized> Challenger<F> for &mut C {
    fn observe(&mut self, msg: &RoundMessage<F>) {
        (**self).observe(msg)
    }

    fn sample(&mut self) -> F {
        (**self).sample()
    }
}

/// Interactive verifier randomness: uniform field elements, messages ignored
#[derive(Debug, Clone)]
pub struct RandomChallenger<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomChallenger<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<F: Field, R: Rng> Challenger<F> for RandomChallenger<R> {
    fn observe(&mut self, _msg: &RoundMessage<F>) {}

    fn sample(&mut self) -> F {
        F::rand(&mut self.rng)
    }
}
