//! Equality polynomial ẽq(x, e) = Π_i (e_i·x_i + (1-e_i)·(1-x_i))

use ark_ff::Field;

use crate::errors::{Result, SumCheckError};

/// Evaluate equality polynomial at point `x` for Boolean vector `e`
pub fn eq_polynomial<F: Field>(x: &[F], e: &[bool]) -> Result<F> {
    if x.len() != e.len() {
        return Err(SumCheckError::DimensionMismatch {
            expected: e.len(),
            actual: x.len(),
        });
    }
    let mut acc = F::one();
    for (xi, &ei) in x.iter().zip(e.iter()) {
        let term = if ei { *xi } else { F::one() - xi };
        acc *= term;
    }
    Ok(acc)
}

/// Table of ẽq(r, e) for every e ∈ {0,1}^ℓ, indexed most significant variable first.
///
/// Built one variable at a time in O(2^ℓ): each pass doubles the table, so
/// r_1 ends up governing the top bit of the index.
pub fn eq_evaluations<F: Field>(r: &[F]) -> Vec<F> {
    let mut table = Vec::with_capacity(1 << r.len());
    table.push(F::one());
    for ri in r {
        let mut next = Vec::with_capacity(table.len() * 2);
        for t in &table {
            let hi = *t * ri;
            next.push(*t - hi);
            next.push(hi);
        }
        table = next;
    }
    table
}
