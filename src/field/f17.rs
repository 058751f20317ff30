//! Prime field of order 17
//!
//! Soundness error is 1/17 per round, so this field is only for small worked
//! examples and tests where every intermediate value can be checked by hand.

use ark_ff::fields::{Fp64, MontBackend, MontConfig};

#[derive(MontConfig)]
#[modulus = "17"]
#[generator = "3"]
pub struct F17Config;

pub type F17 = Fp64<MontBackend<F17Config, 1>>;

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{BigInteger, Field, One, PrimeField, Zero};
    use ark_std::{test_rng, UniformRand};

    #[test]
    fn arithmetic_wraps_at_17() {
        assert_eq!(F17::from(8u64) + F17::from(9u64), F17::zero());
        assert_eq!(F17::from(3u64) - F17::from(5u64), F17::from(15u64));
        assert_eq!(F17::from(4u64) * F17::from(5u64), F17::from(3u64));
        assert_eq!(-F17::from(1u64), F17::from(16u64));
        assert_eq!(F17::from(20u64), F17::from(3u64));
    }

    #[test]
    fn inverses() {
        assert_eq!(F17::from(4u64).inverse(), Some(F17::from(13u64)));
        assert!(F17::zero().inverse().is_none());
        for v in 1..17u64 {
            let a = F17::from(v);
            assert_eq!(a * a.inverse().unwrap(), F17::one());
        }
    }

    #[test]
    fn modulus_is_17() {
        assert_eq!(F17::MODULUS.to_bytes_le()[0], 17);
        assert_eq!(F17::MODULUS_BIT_SIZE, 5);
    }

    #[test]
    fn random_stays_in_range() {
        let mut rng = test_rng();
        for _ in 0..100 {
            let a = F17::rand(&mut rng);
            let v = a.into_bigint().to_bytes_le()[0];
            assert!(v < 17);
        }
    }
}
