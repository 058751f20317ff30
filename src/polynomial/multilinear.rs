//! Multilinear polynomial with dense representation over {0,1}^ℓ
//!
//! Index convention: variable x_1 is the most significant bit of the table
//! index (see [`crate::utils::index_to_bits`]). Every operation that binds a
//! variable returns a fresh, shorter polynomial; tables are never mutated.

use crate::config::DEFAULT_PARALLEL_THRESHOLD;
use crate::errors::{Result, SumCheckError};
use crate::polynomial::eq::eq_evaluations;
use crate::utils::{bits_to_index, is_power_of_two, num_vars_for_size};
use ark_ff::Field;
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilinearPolynomial<F: Field> {
    evaluations: Vec<F>, // dense evaluations over Boolean hypercube
    num_vars: usize,     // ℓ
}

impl<F: Field> MultilinearPolynomial<F> {
    /// Create from evaluations; len must be 2^ℓ for some ℓ ≥ 0
    pub fn new(evaluations: Vec<F>) -> Result<Self> {
        if !is_power_of_two(evaluations.len()) {
            return Err(SumCheckError::InvalidLength(evaluations.len()));
        }
        let num_vars = num_vars_for_size(evaluations.len());
        Ok(Self { evaluations, num_vars })
    }

    /// Create from evaluations and check the arity matches `num_vars`
    pub fn from_evaluations(evaluations: Vec<F>, num_vars: usize) -> Result<Self> {
        let poly = Self::new(evaluations)?;
        if poly.num_vars != num_vars {
            return Err(SumCheckError::DimensionMismatch {
                expected: num_vars,
                actual: poly.num_vars,
            });
        }
        Ok(poly)
    }

    /// Zero-variable polynomial
    pub fn constant(value: F) -> Self {
        Self {
            evaluations: vec![value],
            num_vars: 0,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    /// Always false: a table holds at least one entry
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.num_vars == 0
    }

    pub fn evaluations(&self) -> &[F] {
        &self.evaluations
    }

    pub fn into_evaluations(self) -> Vec<F> {
        self.evaluations
    }

    /// Evaluate at Boolean point e ∈ {0,1}^ℓ (given as bools)
    pub fn eval_boolean(&self, e: &[bool]) -> Result<F> {
        self.check_arity(e.len())?;
        Ok(self.evaluations[bits_to_index(e)])
    }

    /// Bind x_1 := value.
    ///
    /// result[i] = (1 - v)·e[i] + v·e[i + half], the line through the x_1 = 0
    /// and x_1 = 1 halves of the table. Fails on a constant polynomial.
    pub fn fix_first_variable(&self, value: F) -> Result<Self> {
        self.fold_first(value, DEFAULT_PARALLEL_THRESHOLD)
    }

    pub(crate) fn fold_first(&self, value: F, parallel_threshold: usize) -> Result<Self> {
        if self.num_vars == 0 {
            return Err(SumCheckError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let half = self.evaluations.len() / 2;
        let (lo, hi) = self.evaluations.split_at(half);
        let evaluations: Vec<F> = if self.evaluations.len() >= parallel_threshold {
            lo.par_iter()
                .zip(hi.par_iter())
                .map(|(a, b)| *a + value * (*b - a))
                .collect()
        } else {
            lo.iter()
                .zip(hi.iter())
                .map(|(a, b)| *a + value * (*b - a))
                .collect()
        };
        Ok(Self {
            evaluations,
            num_vars: self.num_vars - 1,
        })
    }

    /// Bind x_1..x_k to `prefix` in order, leaving ℓ - k variables
    pub fn fix_variables(&self, prefix: &[F]) -> Result<Self> {
        if prefix.len() > self.num_vars {
            return Err(SumCheckError::DimensionMismatch {
                expected: self.num_vars,
                actual: prefix.len(),
            });
        }
        let mut current = self.clone();
        for r in prefix {
            current = current.fix_first_variable(*r)?;
        }
        Ok(current)
    }

    /// Bind the variable at 0-based position `index` (x_{index+1}) to `value`
    pub fn fix_variable(&self, index: usize, value: F) -> Result<Self> {
        if index >= self.num_vars {
            return Err(SumCheckError::DimensionMismatch {
                expected: self.num_vars,
                actual: index + 1,
            });
        }
        let stride = 1usize << (self.num_vars - 1 - index);
        let evaluations = self
            .evaluations
            .chunks_exact(2 * stride)
            .flat_map(|block| {
                let (lo, hi) = block.split_at(stride);
                lo.iter().zip(hi.iter()).map(move |(a, b)| *a + value * (*b - a))
            })
            .collect();
        Ok(Self {
            evaluations,
            num_vars: self.num_vars - 1,
        })
    }

    /// Σ_{x ∈ {0,1}^ℓ} P(x)
    pub fn sum_over_hypercube(&self) -> F {
        self.sum_with_threshold(DEFAULT_PARALLEL_THRESHOLD)
    }

    pub(crate) fn sum_with_threshold(&self, parallel_threshold: usize) -> F {
        sum_slice(&self.evaluations, parallel_threshold)
    }

    /// (Σ P(0, rest), Σ P(1, rest)) over the remaining variables, i.e. the
    /// two evaluations of the sum-check round polynomial for x_1.
    pub fn half_sums(&self) -> Result<(F, F)> {
        self.half_sums_with_threshold(DEFAULT_PARALLEL_THRESHOLD)
    }

    pub(crate) fn half_sums_with_threshold(&self, parallel_threshold: usize) -> Result<(F, F)> {
        if self.num_vars == 0 {
            return Err(SumCheckError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let (lo, hi) = self.evaluations.split_at(self.evaluations.len() / 2);
        if self.evaluations.len() >= parallel_threshold {
            Ok(rayon::join(
                || sum_slice(lo, parallel_threshold),
                || sum_slice(hi, parallel_threshold),
            ))
        } else {
            Ok((sum_slice(lo, parallel_threshold), sum_slice(hi, parallel_threshold)))
        }
    }

    /// Evaluate the MLE at x ∈ F^ℓ by folding one variable at a time, O(2^ℓ)
    #[tracing::instrument(skip_all, name = "MultilinearPolynomial::evaluate", fields(num_vars = self.num_vars))]
    pub fn evaluate(&self, x: &[F]) -> Result<F> {
        self.check_arity(x.len())?;
        let mut current = self.clone();
        for r in x {
            current = current.fold_first(*r, DEFAULT_PARALLEL_THRESHOLD)?;
        }
        Ok(current.evaluations[0])
    }

    /// Evaluate via the closed form Σ_e P(e)·ẽq(x, e)
    #[tracing::instrument(skip_all, name = "MultilinearPolynomial::evaluate_lagrange", fields(num_vars = self.num_vars))]
    pub fn evaluate_lagrange(&self, x: &[F]) -> Result<F> {
        self.check_arity(x.len())?;
        let weights = eq_evaluations(x);
        let acc = if self.evaluations.len() >= DEFAULT_PARALLEL_THRESHOLD {
            self.evaluations
                .par_iter()
                .zip(weights.par_iter())
                .map(|(e, w)| *e * w)
                .reduce(|| F::zero(), |a, b| a + b)
        } else {
            self.evaluations
                .iter()
                .zip(weights.iter())
                .fold(F::zero(), |acc, (e, w)| acc + *e * w)
        };
        Ok(acc)
    }

    pub fn scalar_mul(&self, value: F) -> Self {
        Self {
            evaluations: self.evaluations.iter().map(|e| *e * value).collect(),
            num_vars: self.num_vars,
        }
    }

    /// Pointwise sum of two polynomials over the same hypercube
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        if self.num_vars != other.num_vars {
            return Err(SumCheckError::DimensionMismatch {
                expected: self.num_vars,
                actual: other.num_vars,
            });
        }
        Ok(Self {
            evaluations: self
                .evaluations
                .iter()
                .zip(other.evaluations.iter())
                .map(|(a, b)| *a + b)
                .collect(),
            num_vars: self.num_vars,
        })
    }

    /// Pointwise product of the two tables.
    ///
    /// The result is the multilinear extension of f·g on the hypercube: it
    /// agrees with f·g at Boolean points (so the hypercube sums match) but not
    /// elsewhere, since f·g itself has degree 2 per variable.
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        if self.num_vars != other.num_vars {
            return Err(SumCheckError::DimensionMismatch {
                expected: self.num_vars,
                actual: other.num_vars,
            });
        }
        let evaluations = if self.evaluations.len() >= DEFAULT_PARALLEL_THRESHOLD {
            self.evaluations
                .par_iter()
                .zip(other.evaluations.par_iter())
                .map(|(a, b)| *a * b)
                .collect()
        } else {
            self.evaluations
                .iter()
                .zip(other.evaluations.iter())
                .map(|(a, b)| *a * b)
                .collect()
        };
        Ok(Self {
            evaluations,
            num_vars: self.num_vars,
        })
    }

    /// Lift to `num_vars` variables by prepending unused ones: Q(y, x) = P(x)
    pub fn extend_left(&self, num_vars: usize) -> Result<Self> {
        self.check_extension(num_vars)?;
        let mask = self.evaluations.len() - 1;
        Ok(Self {
            evaluations: (0..1usize << num_vars).map(|i| self.evaluations[i & mask]).collect(),
            num_vars,
        })
    }

    /// Lift to `num_vars` variables by appending unused ones: Q(x, y) = P(x)
    pub fn extend_right(&self, num_vars: usize) -> Result<Self> {
        self.check_extension(num_vars)?;
        let shift = num_vars - self.num_vars;
        Ok(Self {
            evaluations: (0..1usize << num_vars).map(|i| self.evaluations[i >> shift]).collect(),
            num_vars,
        })
    }

    fn check_extension(&self, num_vars: usize) -> Result<()> {
        if num_vars < self.num_vars || num_vars >= usize::BITS as usize {
            return Err(SumCheckError::DimensionMismatch {
                expected: self.num_vars,
                actual: num_vars,
            });
        }
        Ok(())
    }

    fn check_arity(&self, actual: usize) -> Result<()> {
        if actual != self.num_vars {
            return Err(SumCheckError::DimensionMismatch {
                expected: self.num_vars,
                actual,
            });
        }
        Ok(())
    }
}

fn sum_slice<F: Field>(values: &[F], parallel_threshold: usize) -> F {
    if values.len() >= parallel_threshold {
        values.par_iter().copied().reduce(|| F::zero(), |a, b| a + b)
    } else {
        values.iter().copied().fold(F::zero(), |a, b| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Bls12381Fr as Fr, F17};
    use crate::utils::{index_to_bits, index_to_point};
    use ark_std::test_rng;
    use rand::Rng;

    fn f17(values: &[u64]) -> Vec<F17> {
        values.iter().map(|&v| F17::from(v)).collect()
    }

    fn random_poly(num_vars: usize) -> MultilinearPolynomial<Fr> {
        let mut rng = test_rng();
        let evals: Vec<Fr> = (0..1usize << num_vars).map(|_| Fr::from(rng.gen::<u64>())).collect();
        MultilinearPolynomial::new(evals).unwrap()
    }

    #[test]
    fn rejects_non_power_of_two() {
        for len in [0usize, 3, 5, 6, 12] {
            let evals = vec![F17::from(1u64); len];
            assert_eq!(
                MultilinearPolynomial::new(evals),
                Err(SumCheckError::InvalidLength(len))
            );
        }
    }

    #[test]
    fn from_evaluations_checks_arity() {
        let err = MultilinearPolynomial::from_evaluations(f17(&[1, 2, 3, 4]), 3).unwrap_err();
        assert_eq!(err, SumCheckError::DimensionMismatch { expected: 3, actual: 2 });
    }

    #[test]
    fn constant_has_zero_vars() {
        let poly = MultilinearPolynomial::new(f17(&[9])).unwrap();
        assert_eq!(poly.num_vars(), 0);
        assert!(poly.is_constant());
        assert_eq!(poly.sum_over_hypercube(), F17::from(9u64));
        assert_eq!(poly.evaluate(&[]).unwrap(), F17::from(9u64));
        assert_eq!(poly, MultilinearPolynomial::constant(F17::from(9u64)));
        assert!(poly.fix_first_variable(F17::from(1u64)).is_err());
    }

    #[test]
    fn fixing_to_zero_and_one_gives_halves() {
        let poly = random_poly(4);
        let half = poly.len() / 2;
        let low = poly.fix_first_variable(Fr::from(0u64)).unwrap();
        let high = poly.fix_first_variable(Fr::from(1u64)).unwrap();
        assert_eq!(low.num_vars(), 3);
        assert_eq!(low.evaluations(), &poly.evaluations()[..half]);
        assert_eq!(high.evaluations(), &poly.evaluations()[half..]);
    }

    #[test]
    fn boolean_points_round_trip_table() {
        let poly = random_poly(3);
        for idx in 0..poly.len() {
            let x: Vec<Fr> = index_to_point(idx, 3);
            assert_eq!(poly.evaluate(&x).unwrap(), poly.evaluations()[idx]);
            assert_eq!(poly.evaluate_lagrange(&x).unwrap(), poly.evaluations()[idx]);
            assert_eq!(poly.eval_boolean(&index_to_bits(idx, 3)).unwrap(), poly.evaluations()[idx]);
        }
    }

    #[test]
    fn fold_and_lagrange_agree_off_cube() {
        let mut rng = test_rng();
        let poly = random_poly(5);
        for _ in 0..20 {
            let x: Vec<Fr> = (0..5).map(|_| Fr::from(rng.gen::<u64>())).collect();
            assert_eq!(poly.evaluate(&x).unwrap(), poly.evaluate_lagrange(&x).unwrap());
        }
    }

    #[test]
    fn arity_mismatch() {
        let poly = random_poly(3);
        let x = vec![Fr::from(1u64); 2];
        assert_eq!(
            poly.evaluate(&x),
            Err(SumCheckError::DimensionMismatch { expected: 3, actual: 2 })
        );
        assert!(poly.evaluate_lagrange(&x).is_err());
        assert!(poly.eval_boolean(&[true]).is_err());
        assert!(poly.fix_variables(&[Fr::from(1u64); 4]).is_err());
        assert!(poly.fix_variable(3, Fr::from(1u64)).is_err());
    }

    /// f(x, y) = 4y + 7xy, table over (0,0), (0,1), (1,0), (1,1)
    #[test]
    fn partial_evaluate_4y_7xy() {
        let poly = MultilinearPolynomial::new(f17(&[0, 4, 0, 11])).unwrap();
        // x = 2 leaves 18y, and 18 ≡ 1 mod 17
        let fixed = poly.fix_first_variable(F17::from(2u64)).unwrap();
        assert_eq!(fixed.evaluations(), f17(&[0, 18]).as_slice());
        // f(2, 3) = 54 ≡ 3 mod 17
        assert_eq!(poly.evaluate(&f17(&[2, 3])).unwrap(), F17::from(54u64));
        // y = 3 leaves 12 + 21x
        let fixed_y = poly.fix_variable(1, F17::from(3u64)).unwrap();
        assert_eq!(fixed_y.evaluations(), f17(&[12, 33]).as_slice());
    }

    #[test]
    fn fix_variable_commutes_with_evaluate() {
        let mut rng = test_rng();
        let poly = random_poly(4);
        let x: Vec<Fr> = (0..4).map(|_| Fr::from(rng.gen::<u64>())).collect();
        let expected = poly.evaluate(&x).unwrap();
        for k in 0..4 {
            let fixed = poly.fix_variable(k, x[k]).unwrap();
            let mut rest = x.clone();
            rest.remove(k);
            assert_eq!(fixed.evaluate(&rest).unwrap(), expected);
        }
        assert_eq!(
            poly.fix_variable(0, x[0]).unwrap(),
            poly.fix_first_variable(x[0]).unwrap()
        );
    }

    #[test]
    fn fix_variables_prefix() {
        let mut rng = test_rng();
        let poly = random_poly(4);
        let x: Vec<Fr> = (0..4).map(|_| Fr::from(rng.gen::<u64>())).collect();
        let fixed = poly.fix_variables(&x[..2]).unwrap();
        assert_eq!(fixed.num_vars(), 2);
        assert_eq!(fixed.evaluate(&x[2..]).unwrap(), poly.evaluate(&x).unwrap());
    }

    #[test]
    fn half_sums_match_table_halves() {
        let poly = MultilinearPolynomial::new(f17(&[3, 5, 7, 2])).unwrap();
        assert_eq!(poly.half_sums().unwrap(), (F17::from(8u64), F17::from(9u64)));
        assert_eq!(poly.sum_over_hypercube(), F17::from(0u64));
    }

    #[test]
    fn parallel_paths_match_sequential() {
        let mut rng = test_rng();
        let poly = random_poly(11);
        let r = Fr::from(rng.gen::<u64>());
        assert_eq!(poly.fold_first(r, 1).unwrap(), poly.fold_first(r, usize::MAX).unwrap());
        assert_eq!(poly.sum_with_threshold(1), poly.sum_with_threshold(usize::MAX));
        assert_eq!(
            poly.half_sums_with_threshold(1).unwrap(),
            poly.half_sums_with_threshold(usize::MAX).unwrap()
        );
    }

    #[test]
    fn linearity_property() {
        let mut rng = test_rng();
        let f = random_poly(3);
        let g = f.scalar_mul(Fr::from(7u64));
        let h = f.checked_add(&g).unwrap();
        for _ in 0..20 {
            let x: Vec<Fr> = (0..3).map(|_| Fr::from(rng.gen::<u64>())).collect();
            let lhs = h.evaluate(&x).unwrap();
            let rhs = f.evaluate(&x).unwrap() * Fr::from(8u64);
            assert_eq!(lhs, rhs);
        }
        assert!(f.checked_add(&random_poly(2)).is_err());
    }

    #[test]
    fn product_matches_on_cube() {
        let f = random_poly(3);
        let g = random_poly(3).scalar_mul(Fr::from(3u64));
        let h = f.checked_mul(&g).unwrap();
        for idx in 0..8 {
            let point = index_to_point::<Fr>(idx, 3);
            assert_eq!(
                h.evaluate(&point).unwrap(),
                f.evaluate(&point).unwrap() * g.evaluate(&point).unwrap()
            );
        }
        let direct = f
            .evaluations()
            .iter()
            .zip(g.evaluations())
            .fold(Fr::from(0u64), |acc, (a, b)| acc + *a * b);
        assert_eq!(h.sum_over_hypercube(), direct);
        assert_eq!(
            f.checked_mul(&random_poly(2)),
            Err(SumCheckError::DimensionMismatch { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn extensions_ignore_new_variables() {
        let mut rng = test_rng();
        let p = random_poly(2);
        let left = p.extend_left(5).unwrap();
        let right = p.extend_right(5).unwrap();
        assert_eq!(left.num_vars(), 5);
        assert_eq!(right.num_vars(), 5);
        for _ in 0..10 {
            let x: Vec<Fr> = (0..2).map(|_| Fr::from(rng.gen::<u64>())).collect();
            let y: Vec<Fr> = (0..3).map(|_| Fr::from(rng.gen::<u64>())).collect();
            let expected = p.evaluate(&x).unwrap();
            let yx: Vec<Fr> = y.iter().chain(x.iter()).copied().collect();
            let xy: Vec<Fr> = x.iter().chain(y.iter()).copied().collect();
            assert_eq!(left.evaluate(&yx).unwrap(), expected);
            assert_eq!(right.evaluate(&xy).unwrap(), expected);
        }
        // each unused variable doubles the hypercube sum
        assert_eq!(left.sum_over_hypercube(), p.sum_over_hypercube() * Fr::from(8u64));
        assert_eq!(p.extend_right(2).unwrap(), p);
        assert_eq!(
            p.extend_left(1),
            Err(SumCheckError::DimensionMismatch { expected: 2, actual: 1 })
        );
    }
}
