//! Oracle access to the summed polynomial
//!
//! The verifier's last step compares its running claim against P(r_1, ..., r_n).
//! That value must come from whoever owns P's defining formula, never from the
//! prover's messages. An oracle must use the same variable order as the
//! evaluation table (x_1 first, most significant index bit).

use ark_ff::Field;

use crate::errors::{Result, SumCheckError};
use crate::polynomial::MultilinearPolynomial;

pub trait EvaluationOracle<F: Field> {
    /// Number of variables of the oracle polynomial
    fn num_vars(&self) -> usize;

    /// P(point); implementations reject points of the wrong arity with `DimensionMismatch`
    fn evaluate(&self, point: &[F]) -> Result<F>;
}

impl<F: Field> EvaluationOracle<F> for MultilinearPolynomial<F> {
    fn num_vars(&self) -> usize {
        MultilinearPolynomial::num_vars(self)
    }

    fn evaluate(&self, point: &[F]) -> Result<F> {
        MultilinearPolynomial::evaluate(self, point)
    }
}

impl<F: Field, O: EvaluationOracle<F> + ?Sized> EvaluationOracle<F> for &O {
    fn num_vars(&self) -> usize {
        (**self).num_vars()
    }

    fn evaluate(&self, point: &[F]) -> Result<F> {
        (**self).evaluate(point)
    }
}

/// Oracle backed by a closure, e.g. a circuit's wiring predicate evaluated in closed form
pub struct FnOracle<Func> {
    num_vars: usize,
    func: Func,
}

impl<Func> FnOracle<Func> {
    pub fn new(num_vars: usize, func: Func) -> Self {
        Self { num_vars, func }
    }
}

impl<F, Func> EvaluationOracle<F> for FnOracle<Func>
where
    F: Field,
    Func: Fn(&[F]) -> F,
{
    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn evaluate(&self, point: &[F]) -> Result<F> {
        if point.len() != self.num_vars {
            return Err(SumCheckError::DimensionMismatch {
                expected: self.num_vars,
                actual: point.len(),
            });
        }
        Ok((self.func)(point))
    }
}
