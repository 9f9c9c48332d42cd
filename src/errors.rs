//! Failures surfaced by key generation, encryption and decryption
use thiserror::Error;

/// The error type shared by every operation in this crate
#[derive(Error, Debug, Eq, PartialEq, Clone)]
pub enum KnapsackError {
    /// Key length is zero or too long for native 64-bit key material
    #[error("invalid key length {0}: must be between 1 and {max}", max = crate::MAX_KEY_LENGTH)]
    InvalidKeyLength(usize),

    /// A message needs at least one character
    #[error("message is empty")]
    EmptyMessage,

    /// Only characters with 8-bit codes can be encoded
    #[error("character {0:?} does not fit in 8 bits")]
    NonByteCharacter(char),

    /// A recovered bit vector cannot be grouped into whole bytes
    #[error("{0} bits cannot be grouped into 8-bit characters")]
    MalformedBitGroups(usize),

    /// The weight at `index` does not exceed the sum of the weights before it
    #[error("weight at index {index} breaks the superincreasing property")]
    NotSuperincreasing { index: usize },

    /// The (w, q, r) triple does not form a usable trapdoor
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(&'static str),

    /// The ciphertext is not a knapsack sum over the private weights
    #[error("ciphertext is not a subset sum of the key")]
    InvalidCiphertext,

    /// `a` has no inverse modulo `m` because they share a factor
    #[error("{a} is not invertible modulo {m}")]
    NotInvertible { a: u64, m: u64 },

    /// An intermediate value left the range of u64
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// The message needs more bits than a block of the key can carry
    #[error("message needs {bits} bits but one block holds {capacity}")]
    CapacityMismatch { bits: usize, capacity: usize },
}

pub type Result<T, E = KnapsackError> = std::result::Result<T, E>;
