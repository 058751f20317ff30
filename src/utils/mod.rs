//! Utility functions
//!
//! Hypercube indexing convention: the first variable is the most significant
//! bit of the table index, so index `i` of an n-variable table is the point
//! `(b_1, ..., b_n)` with `i = Σ b_k · 2^(n-k)`.

use ark_ff::Field;
use ark_std::log2;

/// Calculate the number of variables needed for 2^n evaluations
pub fn num_vars_for_size(size: usize) -> usize {
    log2(size) as usize
}

/// Check if a number is a power of 2
pub fn is_power_of_two(n: usize) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

/// Boolean point for table index `idx`, most significant variable first
pub fn index_to_bits(idx: usize, num_vars: usize) -> Vec<bool> {
    (0..num_vars)
        .map(|i| ((idx >> (num_vars - 1 - i)) & 1) == 1)
        .collect()
}

/// Inverse of [`index_to_bits`]
pub fn bits_to_index(bits: &[bool]) -> usize {
    bits.iter()
        .fold(0usize, |idx, &b| (idx << 1) | usize::from(b))
}

/// Table index `idx` lifted to a field point with 0/1 coordinates
pub fn index_to_point<F: Field>(idx: usize, num_vars: usize) -> Vec<F> {
    index_to_bits(idx, num_vars)
        .into_iter()
        .map(|b| if b { F::one() } else { F::zero() })
        .collect()
}
