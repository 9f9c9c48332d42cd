//! The Merkle-Hellman knapsack public-key cryptosystem
//!
//! The private key is a superincreasing sequence w together with a modulus q > sum(w) and a
//! multiplier r coprime to q. The public key disguises every weight as (w[i] * r) mod q. A block of
//! plaintext bits is encrypted as the sum of the public weights its set bits select; the holder of
//! the trapdoor multiplies by r^-1 and solves the now easy knapsack greedily.
//!
//! This is a teaching cipher. It is broken by lattice reduction and must not protect anything.
//!
//! ```rust
//! use knapsack_cryptosystem::{decrypt, encrypt, KeyPair};
//! use rand::SeedableRng;
//! use rand_chacha::ChaChaRng;
//!
//! let mut log = vec![];
//! let keypair = KeyPair::keygen(8, &mut ChaChaRng::seed_from_u64(42))
//!     .unwrap()
//!     .log_into(&mut log);
//! let ciphertext = encrypt("k", keypair.get_pk()).unwrap().log_into(&mut log);
//! let message = decrypt(ciphertext, keypair.get_sk()).unwrap().log_into(&mut log);
//! assert_eq!(message, "k");
//! assert_eq!(log.len(), 5);
//! ```
#![forbid(unsafe_code)]

pub use self::{
    decoding::{decrypt, decrypt_blocks},
    encoding::{encrypt, encrypt_blocks, BlockCiphertext},
    errors::{KnapsackError, Result},
    keys::{KeyPair, PrivateKey, PublicKey, SuperincreasingSequence},
    sampling::Sampler,
    trace::Traced,
};

/// Longest key whose knapsack sums still fit in native 64-bit integers. With weights drawn from
/// (sum, sum + 10], sum(w) < 10 * 2^n, and n * q must stay below 2^63
pub const MAX_KEY_LENGTH: usize = 52;

/// A knapsack sum over the public key
pub type Ciphertext = u64;

pub mod arithmetics;
pub mod decoding;
pub mod encoding;
pub mod errors;
pub mod keys;
pub mod sampling;
pub mod trace;
