//! Canonical serialization for prover and verifier state
//!
//! Both state machines can be written out at any round boundary and resumed in
//! another process. Enum states are encoded as a one-byte tag followed by their
//! fields. The prover's `SumCheckConfig` is not part of the encoding; a
//! deserialized prover runs with the default config until `set_config`.

use ark_ff::Field;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate, Write,
};

use super::prover::{ProverState, SumCheckProver};
use super::univariate::RoundMessage;
use super::verifier::{Rejection, SumCheckVerifier, VerifierState};
use crate::config::SumCheckConfig;
use crate::polynomial::MultilinearPolynomial;

impl<F: Field> Valid for MultilinearPolynomial<F> {
    fn check(&self) -> Result<(), SerializationError> {
        F::batch_check(self.evaluations().iter())
    }
}

impl<F: Field> CanonicalSerialize for MultilinearPolynomial<F> {
    fn serialize_with_mode<W: Write>(&self, writer: W, compress: Compress) -> Result<(), SerializationError> {
        self.evaluations().serialize_with_mode(writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.evaluations().serialized_size(compress)
    }
}

impl<F: Field> CanonicalDeserialize for MultilinearPolynomial<F> {
    fn deserialize_with_mode<R: Read>(
        reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let evaluations = Vec::<F>::deserialize_with_mode(reader, compress, validate)?;
        MultilinearPolynomial::new(evaluations).map_err(|_| SerializationError::InvalidData)
    }
}

impl<F: Field> Valid for Rejection<F> {
    fn check(&self) -> Result<(), SerializationError> {
        Ok(())
    }
}

impl<F: Field> CanonicalSerialize for Rejection<F> {
    fn serialize_with_mode<W: Write>(&self, mut writer: W, compress: Compress) -> Result<(), SerializationError> {
        match self {
            Rejection::SumCheckFailed { round, expected, actual } => {
                0u8.serialize_with_mode(&mut writer, compress)?;
                round.serialize_with_mode(&mut writer, compress)?;
                expected.serialize_with_mode(&mut writer, compress)?;
                actual.serialize_with_mode(&mut writer, compress)
            }
            Rejection::FinalCheckFailed { expected, actual } => {
                1u8.serialize_with_mode(&mut writer, compress)?;
                expected.serialize_with_mode(&mut writer, compress)?;
                actual.serialize_with_mode(&mut writer, compress)
            }
        }
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        1 + match self {
            Rejection::SumCheckFailed { round, expected, actual } => {
                round.serialized_size(compress) + expected.serialized_size(compress) + actual.serialized_size(compress)
            }
            Rejection::FinalCheckFailed { expected, actual } => {
                expected.serialized_size(compress) + actual.serialized_size(compress)
            }
        }
    }
}

impl<F: Field> CanonicalDeserialize for Rejection<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        match u8::deserialize_with_mode(&mut reader, compress, validate)? {
            0 => Ok(Rejection::SumCheckFailed {
                round: usize::deserialize_with_mode(&mut reader, compress, validate)?,
                expected: F::deserialize_with_mode(&mut reader, compress, validate)?,
                actual: F::deserialize_with_mode(&mut reader, compress, validate)?,
            }),
            1 => Ok(Rejection::FinalCheckFailed {
                expected: F::deserialize_with_mode(&mut reader, compress, validate)?,
                actual: F::deserialize_with_mode(&mut reader, compress, validate)?,
            }),
            _ => Err(SerializationError::InvalidData),
        }
    }
}

impl<F: Field> Valid for VerifierState<F> {
    fn check(&self) -> Result<(), SerializationError> {
        Ok(())
    }
}

impl<F: Field> CanonicalSerialize for VerifierState<F> {
    fn serialize_with_mode<W: Write>(&self, mut writer: W, compress: Compress) -> Result<(), SerializationError> {
        match self {
            VerifierState::AwaitingStart => 0u8.serialize_with_mode(&mut writer, compress),
            VerifierState::RunningRound(round) => {
                1u8.serialize_with_mode(&mut writer, compress)?;
                round.serialize_with_mode(&mut writer, compress)
            }
            VerifierState::AwaitingChallenge(round) => {
                2u8.serialize_with_mode(&mut writer, compress)?;
                round.serialize_with_mode(&mut writer, compress)
            }
            VerifierState::AwaitingFinalCheck => 3u8.serialize_with_mode(&mut writer, compress),
            VerifierState::Accepted => 4u8.serialize_with_mode(&mut writer, compress),
            VerifierState::Rejected(rejection) => {
                5u8.serialize_with_mode(&mut writer, compress)?;
                rejection.serialize_with_mode(&mut writer, compress)
            }
        }
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        1 + match self {
            VerifierState::RunningRound(round) | VerifierState::AwaitingChallenge(round) => {
                round.serialized_size(compress)
            }
            VerifierState::Rejected(rejection) => rejection.serialized_size(compress),
            _ => 0,
        }
    }
}

impl<F: Field> CanonicalDeserialize for VerifierState<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        match u8::deserialize_with_mode(&mut reader, compress, validate)? {
            0 => Ok(VerifierState::AwaitingStart),
            1 => Ok(VerifierState::RunningRound(usize::deserialize_with_mode(
                &mut reader,
                compress,
                validate,
            )?)),
            2 => Ok(VerifierState::AwaitingChallenge(usize::deserialize_with_mode(
                &mut reader,
                compress,
                validate,
            )?)),
            3 => Ok(VerifierState::AwaitingFinalCheck),
            4 => Ok(VerifierState::Accepted),
            5 => Ok(VerifierState::Rejected(Rejection::deserialize_with_mode(
                &mut reader,
                compress,
                validate,
            )?)),
            _ => Err(SerializationError::InvalidData),
        }
    }
}

impl<F: Field> Valid for SumCheckVerifier<F> {
    /// The challenge history and the pending message must fit the state
    fn check(&self) -> Result<(), SerializationError> {
        let consistent = match self.state {
            VerifierState::AwaitingStart => self.challenges.is_empty() && self.pending.is_none(),
            VerifierState::RunningRound(round) => {
                (1..=self.num_vars).contains(&round) && self.challenges.len() == round - 1 && self.pending.is_none()
            }
            VerifierState::AwaitingChallenge(round) => {
                (1..=self.num_vars).contains(&round) && self.challenges.len() == round - 1 && self.pending.is_some()
            }
            VerifierState::AwaitingFinalCheck | VerifierState::Accepted => {
                self.challenges.len() == self.num_vars && self.pending.is_none()
            }
            VerifierState::Rejected(_) => self.challenges.len() <= self.num_vars,
        };
        if consistent {
            Ok(())
        } else {
            Err(SerializationError::InvalidData)
        }
    }
}

impl<F: Field> CanonicalSerialize for SumCheckVerifier<F> {
    fn serialize_with_mode<W: Write>(&self, mut writer: W, compress: Compress) -> Result<(), SerializationError> {
        self.state.serialize_with_mode(&mut writer, compress)?;
        self.num_vars.serialize_with_mode(&mut writer, compress)?;
        self.claim.serialize_with_mode(&mut writer, compress)?;
        self.challenges.serialize_with_mode(&mut writer, compress)?;
        self.pending.serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.state.serialized_size(compress)
            + self.num_vars.serialized_size(compress)
            + self.claim.serialized_size(compress)
            + self.challenges.serialized_size(compress)
            + self.pending.serialized_size(compress)
    }
}

impl<F: Field> CanonicalDeserialize for SumCheckVerifier<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let verifier = SumCheckVerifier {
            state: VerifierState::deserialize_with_mode(&mut reader, compress, validate)?,
            num_vars: usize::deserialize_with_mode(&mut reader, compress, validate)?,
            claim: F::deserialize_with_mode(&mut reader, compress, validate)?,
            challenges: Vec::<F>::deserialize_with_mode(&mut reader, compress, validate)?,
            pending: Option::<RoundMessage<F>>::deserialize_with_mode(&mut reader, compress, validate)?,
        };
        if let Validate::Yes = validate {
            verifier.check()?;
        }
        Ok(verifier)
    }
}

impl Valid for ProverState {
    fn check(&self) -> Result<(), SerializationError> {
        Ok(())
    }
}

impl CanonicalSerialize for ProverState {
    fn serialize_with_mode<W: Write>(&self, mut writer: W, compress: Compress) -> Result<(), SerializationError> {
        match self {
            ProverState::AwaitingStart => 0u8.serialize_with_mode(&mut writer, compress),
            ProverState::RunningRound { round, message_sent } => {
                1u8.serialize_with_mode(&mut writer, compress)?;
                round.serialize_with_mode(&mut writer, compress)?;
                message_sent.serialize_with_mode(&mut writer, compress)
            }
            ProverState::Finished => 2u8.serialize_with_mode(&mut writer, compress),
        }
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        1 + match self {
            ProverState::RunningRound { round, message_sent } => {
                round.serialized_size(compress) + message_sent.serialized_size(compress)
            }
            _ => 0,
        }
    }
}

impl CanonicalDeserialize for ProverState {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        match u8::deserialize_with_mode(&mut reader, compress, validate)? {
            0 => Ok(ProverState::AwaitingStart),
            1 => Ok(ProverState::RunningRound {
                round: usize::deserialize_with_mode(&mut reader, compress, validate)?,
                message_sent: bool::deserialize_with_mode(&mut reader, compress, validate)?,
            }),
            2 => Ok(ProverState::Finished),
            _ => Err(SerializationError::InvalidData),
        }
    }
}

impl<F: Field> Valid for SumCheckProver<F> {
    /// The stored table must have exactly the variables not yet bound
    fn check(&self) -> Result<(), SerializationError> {
        let consistent = match (&self.state, &self.poly) {
            (ProverState::AwaitingStart, None) => true,
            (ProverState::RunningRound { round, .. }, Some(poly)) => {
                (1..=self.num_vars).contains(round) && poly.num_vars() == self.num_vars - (round - 1)
            }
            (ProverState::Finished, Some(poly)) => poly.num_vars() == 0,
            _ => false,
        };
        if consistent {
            Ok(())
        } else {
            Err(SerializationError::InvalidData)
        }
    }
}

impl<F: Field> CanonicalSerialize for SumCheckProver<F> {
    fn serialize_with_mode<W: Write>(&self, mut writer: W, compress: Compress) -> Result<(), SerializationError> {
        self.state.serialize_with_mode(&mut writer, compress)?;
        self.num_vars.serialize_with_mode(&mut writer, compress)?;
        self.poly.serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.state.serialized_size(compress)
            + self.num_vars.serialized_size(compress)
            + self.poly.serialized_size(compress)
    }
}

impl<F: Field> CanonicalDeserialize for SumCheckProver<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let prover = SumCheckProver {
            config: SumCheckConfig::default(),
            state: ProverState::deserialize_with_mode(&mut reader, compress, validate)?,
            num_vars: usize::deserialize_with_mode(&mut reader, compress, validate)?,
            poly: Option::<MultilinearPolynomial<F>>::deserialize_with_mode(&mut reader, compress, validate)?,
        };
        if let Validate::Yes = validate {
            prover.check()?;
        }
        Ok(prover)
    }
}
