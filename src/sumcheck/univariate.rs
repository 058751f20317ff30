//! Prover round messages
//!
//! Summing a multilinear polynomial over all but one variable leaves a
//! univariate of degree at most 1, so a round message is just g(0) and g(1).

use ark_ff::Field;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

/// Univariate polynomial of degree at most 1, stored by its values at 0 and 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct RoundMessage<F: Field> {
    pub eval_0: F,
    pub eval_1: F,
}

impl<F: Field> RoundMessage<F> {
    pub fn new(eval_0: F, eval_1: F) -> Self {
        Self { eval_0, eval_1 }
    }

    /// From coefficient form g(t) = c0 + c1·t
    pub fn from_coefficients(c0: F, c1: F) -> Self {
        Self {
            eval_0: c0,
            eval_1: c0 + c1,
        }
    }

    /// Coefficient form (c0, c1) with g(t) = c0 + c1·t
    pub fn coefficients(&self) -> (F, F) {
        (self.eval_0, self.eval_1 - self.eval_0)
    }

    /// g(r) = (1 - r)·g(0) + r·g(1)
    pub fn evaluate(&self, r: F) -> F {
        self.eval_0 + r * (self.eval_1 - self.eval_0)
    }

    /// Returns g(0) + g(1), the sum over the Boolean domain {0, 1}
    pub fn sum_over_boolean(&self) -> F {
        self.eval_0 + self.eval_1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Bls12381Fr as Fr, F17};
    use ark_std::test_rng;
    use rand::Rng;

    #[test]
    fn interpolates_between_endpoints() {
        let g = RoundMessage::new(F17::from(8u64), F17::from(9u64));
        assert_eq!(g.evaluate(F17::from(0u64)), F17::from(8u64));
        assert_eq!(g.evaluate(F17::from(1u64)), F17::from(9u64));
        assert_eq!(g.evaluate(F17::from(4u64)), F17::from(12u64));
        assert_eq!(g.sum_over_boolean(), F17::from(0u64));
    }

    #[test]
    fn coefficient_form_agrees() {
        let mut rng = test_rng();
        for _ in 0..20 {
            let c0 = Fr::from(rng.gen::<u64>());
            let c1 = Fr::from(rng.gen::<u64>());
            let t = Fr::from(rng.gen::<u64>());
            let g = RoundMessage::from_coefficients(c0, c1);
            assert_eq!(g.coefficients(), (c0, c1));
            assert_eq!(g.evaluate(t), c0 + c1 * t);
            assert_eq!(g.sum_over_boolean(), c0 + c0 + c1);
        }
    }

    #[test]
    fn serialized_size_is_two_elements() {
        let g = RoundMessage::new(Fr::from(1u64), Fr::from(2u64));
        let mut bytes = Vec::new();
        g.serialize_compressed(&mut bytes).unwrap();
        assert_eq!(bytes.len(), 64);
        let back = RoundMessage::<Fr>::deserialize_compressed(&bytes[..]).unwrap();
        assert_eq!(back, g);
    }
}
