//! Fiat-Shamir transcript and proof records
//!
//! Converts the interactive sum-check protocol to a non-interactive one by
//! deriving verifier challenges from a hash of everything sent so far.

use ark_ff::{BigInteger, Field, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use blake2::Blake2b512;
use digest::{Digest, Output};
use std::marker::PhantomData;

use super::challenger::Challenger;
use super::univariate::RoundMessage;

/// Hash-based transcript, generic over the digest (Blake2b-512 by default)
#[derive(Clone)]
pub struct Transcript<F: PrimeField, D: Digest + Clone = Blake2b512> {
    hasher: D,
    _field: PhantomData<F>,
}

/// Keccak-256 transcript, for verifiers that prefer the EVM hash
pub type KeccakTranscript<F> = Transcript<F, sha3::Keccak256>;

impl<F: PrimeField, D: Digest + Clone> Transcript<F, D> {
    /// Create new transcript with a domain separator label
    pub fn new(domain_label: &[u8]) -> Self {
        let mut hasher = D::new();
        Digest::update(&mut hasher, domain_label);
        Self {
            hasher,
            _field: PhantomData,
        }
    }

    /// Labelled, length-prefixed append
    pub fn append_bytes(&mut self, label: &[u8], bytes: &[u8]) {
        Digest::update(&mut self.hasher, label);
        Digest::update(&mut self.hasher, (bytes.len() as u64).to_le_bytes());
        Digest::update(&mut self.hasher, bytes);
    }

    pub fn append_u64(&mut self, label: &[u8], value: u64) {
        self.append_bytes(label, &value.to_le_bytes());
    }

    pub fn append_scalar(&mut self, label: &[u8], x: &F) {
        self.append_bytes(label, &x.into_bigint().to_bytes_le());
    }

    pub fn append_scalars(&mut self, label: &[u8], xs: &[F]) {
        self.append_u64(label, xs.len() as u64);
        for x in xs {
            self.append_scalar(label, x);
        }
    }

    pub fn append_round_message(&mut self, msg: &RoundMessage<F>) {
        self.append_scalar(b"round_eval_0", &msg.eval_0);
        self.append_scalar(b"round_eval_1", &msg.eval_1);
    }

    /// Derive a challenge from the current state, then absorb the digest so
    /// the next challenge differs even with no new messages in between
    pub fn challenge_scalar(&mut self, label: &[u8]) -> F {
        Digest::update(&mut self.hasher, label);
        let digest: Output<D> = self.hasher.clone().finalize();
        let fe = F::from_le_bytes_mod_order(&digest);
        Digest::update(&mut self.hasher, &digest);
        fe
    }

    pub fn challenge_scalars(&mut self, label: &[u8], n: usize) -> Vec<F> {
        (0..n).map(|_| self.challenge_scalar(label)).collect()
    }
}

impl<F: PrimeField, D: Digest + Clone> Challenger<F> for Transcript<F, D> {
    fn observe(&mut self, msg: &RoundMessage<F>) {
        self.append_round_message(msg);
    }

    fn sample(&mut self) -> F {
        self.challenge_scalar(b"sumcheck_challenge")
    }
}

/// Non-interactive sum-check proof
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct SumCheckProof<F: Field> {
    /// Round polynomials g_i as (g_i(0), g_i(1))
    pub round_messages: Vec<RoundMessage<F>>,
    /// Prover's P(r_1, ..., r_n)
    pub final_eval: F,
}

impl<F: Field> SumCheckProof<F> {
    pub fn num_rounds(&self) -> usize {
        self.round_messages.len()
    }
}

/// Everything exchanged in one run: enough for an auditor to replay verification
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct AuditTranscript<F: Field> {
    pub num_vars: usize,
    pub claimed_sum: F,
    pub messages: Vec<RoundMessage<F>>,
    pub challenges: Vec<F>,
}

impl<F: Field> AuditTranscript<F> {
    pub fn new(num_vars: usize, claimed_sum: F) -> Self {
        Self {
            num_vars,
            claimed_sum,
            messages: Vec::with_capacity(num_vars),
            challenges: Vec::with_capacity(num_vars),
        }
    }

    pub fn record_message(&mut self, msg: RoundMessage<F>) {
        self.messages.push(msg);
    }

    pub fn record_challenge(&mut self, r: F) {
        self.challenges.push(r);
    }
}
