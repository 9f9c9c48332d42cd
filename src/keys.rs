//! The key pairs
use std::fmt;

use crate::{
    arithmetics::{gcd, mul_mod},
    errors::{KnapsackError, Result},
    sampling::Sampler,
    trace::Traced,
    MAX_KEY_LENGTH,
};

/// Each generated weight exceeds the running sum by at most this much
pub const WEIGHT_SPREAD: u64 = 10;

/// The modulus exceeds the sum of the weights by at most this much
pub const MODULUS_MARGIN: u64 = 10;

fn check_length(length: usize) -> Result<()> {
    if length == 0 || length > MAX_KEY_LENGTH {
        return Err(KnapsackError::InvalidKeyLength(length));
    }
    return Ok(());
}

/// Positive weights, each strictly greater than the sum of the weights before it
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct SuperincreasingSequence {
    weights: Vec<u64>,
    total: u64,
}

impl SuperincreasingSequence {
    pub fn new(weights: Vec<u64>) -> Result<Self> {
        let mut total: u64 = 0;
        for (index, &weight) in weights.iter().enumerate() {
            if weight == 0 || weight <= total {
                return Err(KnapsackError::NotSuperincreasing { index });
            }
            total = total
                .checked_add(weight)
                .ok_or(KnapsackError::ArithmeticOverflow)?;
        }
        return Ok(Self { weights, total });
    }

    /// Draw `length` weights, the next one uniformly from (sum, sum + WEIGHT_SPREAD]
    pub fn generate<S: Sampler>(length: usize, sampler: &mut S) -> Result<Self> {
        check_length(length)?;
        let mut weights = Vec::with_capacity(length);
        let mut total: u64 = 0;
        for _ in 0..length {
            let low = total.checked_add(1);
            let high = total.checked_add(WEIGHT_SPREAD);
            let (Some(low), Some(high)) = (low, high) else {
                return Err(KnapsackError::ArithmeticOverflow);
            };
            let next = sampler.sample_inclusive(low, high);
            weights.push(next);
            total = total
                .checked_add(next)
                .ok_or(KnapsackError::ArithmeticOverflow)?;
        }

        // the sampler is trusted for its range, not for the invariant
        return Self::new(weights);
    }

    pub fn get_weights(&self) -> &[u64] {
        return &self.weights;
    }

    pub fn get_total(&self) -> u64 {
        return self.total;
    }

    pub fn len(&self) -> usize {
        return self.weights.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.weights.is_empty();
    }
}

/// The general knapsack obtained by disguising the private weights
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct PublicKey {
    knapsack: Vec<u64>,
}

impl PublicKey {
    /// Instantiate an instance with no check
    pub fn new(knapsack: Vec<u64>) -> Self {
        return Self { knapsack };
    }

    pub fn get_knapsack(&self) -> &[u64] {
        return &self.knapsack;
    }

    /// Number of bits one block of plaintext carries
    pub fn len(&self) -> usize {
        return self.knapsack.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.knapsack.is_empty();
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.knapsack)
    }
}

/// The trapdoor: superincreasing weights w, modulus q and multiplier r
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct PrivateKey {
    weights: SuperincreasingSequence,
    q: u64,
    r: u64,
}

impl PrivateKey {
    /// Check q > sum(w), 1 <= r < q and gcd(r, q) = 1
    pub fn new(weights: SuperincreasingSequence, q: u64, r: u64) -> Result<Self> {
        check_length(weights.len())?;
        if q <= weights.get_total() {
            return Err(KnapsackError::InvalidPrivateKey(
                "modulus must exceed the sum of the weights",
            ));
        }
        if r == 0 || r >= q {
            return Err(KnapsackError::InvalidPrivateKey(
                "multiplier must lie in [1, q)",
            ));
        }
        if gcd(r, q) != 1 {
            return Err(KnapsackError::InvalidPrivateKey(
                "multiplier and modulus must be coprime",
            ));
        }
        return Ok(Self { weights, q, r });
    }

    pub fn get_weights(&self) -> &SuperincreasingSequence {
        return &self.weights;
    }

    pub fn get_q(&self) -> u64 {
        return self.q;
    }

    pub fn get_r(&self) -> u64 {
        return self.r;
    }

    pub fn len(&self) -> usize {
        return self.weights.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.weights.is_empty();
    }

    /// public[i] = (w[i] * r) mod q
    pub fn derive_public_key(&self) -> PublicKey {
        let knapsack = self
            .weights
            .get_weights()
            .iter()
            .map(|&w| mul_mod(w, self.r, self.q))
            .collect();
        return PublicKey::new(knapsack);
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ w: {:?}, q: {}, r: {} }}",
            self.weights.get_weights(),
            self.q,
            self.r
        )
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct KeyPair {
    pk: PublicKey,
    sk: PrivateKey,
}

impl KeyPair {
    pub fn new(pk: PublicKey, sk: PrivateKey) -> Self {
        Self { pk, sk }
    }

    pub fn get_pk(&self) -> &PublicKey {
        &self.pk
    }

    pub fn get_sk(&self) -> &PrivateKey {
        &self.sk
    }

    /// Build a key pair from explicit trapdoor parameters, deriving the public key
    pub fn from_parts(weights: Vec<u64>, q: u64, r: u64) -> Result<Self> {
        let sk = PrivateKey::new(SuperincreasingSequence::new(weights)?, q, r)?;
        return Ok(Self::new(sk.derive_public_key(), sk));
    }

    /// Sample a multiplier from [1, q - 1] until it is coprime to q.
    /// r = 1 is always accepted, so for q >= 2 this terminates with probability 1
    fn sample_multiplier<S: Sampler>(q: u64, sampler: &mut S) -> u64 {
        loop {
            let r = sampler.sample_inclusive(1, q - 1);
            if gcd(r, q) == 1 {
                return r;
            }
        }
    }

    /// Generate a key pair whose public key has `length` elements:
    /// 1. draw a superincreasing sequence w
    /// 2. q = sum(w) + a margin from [1, MODULUS_MARGIN]
    /// 3. r uniformly from [1, q - 1], redrawn until gcd(r, q) = 1
    /// 4. public[i] = (w[i] * r) mod q
    pub fn keygen<S: Sampler>(length: usize, sampler: &mut S) -> Result<Traced<Self>> {
        let weights = SuperincreasingSequence::generate(length, sampler)?;
        let margin = sampler.sample_inclusive(1, MODULUS_MARGIN);
        let q = weights
            .get_total()
            .checked_add(margin)
            .ok_or(KnapsackError::ArithmeticOverflow)?;
        let r = Self::sample_multiplier(q, sampler);
        let sk = PrivateKey::new(weights, q, r)?;
        let keypair = Self::new(sk.derive_public_key(), sk);
        let line = format!(
            "Generated Keys: Public Key = {}, Private Key = {}",
            keypair.pk, keypair.sk
        );
        return Ok(Traced::with_line(keypair, line));
    }

    /// Generate a key pair with the thread-local generator
    pub fn random(length: usize) -> Result<Traced<Self>> {
        return Self::keygen(length, &mut rand::thread_rng());
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::sampling::tests::Scripted;

    fn check_invariants(keypair: &KeyPair, length: usize) {
        let sk = keypair.get_sk();
        let weights = sk.get_weights().get_weights();
        assert_eq!(weights.len(), length);
        let mut sum = 0u64;
        for &w in weights {
            assert!(w > sum);
            sum += w;
        }
        assert_eq!(sk.get_weights().get_total(), sum);
        assert!(sk.get_q() > sum);
        assert!(sk.get_r() >= 1 && sk.get_r() < sk.get_q());
        assert_eq!(gcd(sk.get_r(), sk.get_q()), 1);

        let knapsack = keypair.get_pk().get_knapsack();
        assert_eq!(knapsack.len(), length);
        for (&p, &w) in knapsack.iter().zip(weights) {
            assert!(p < sk.get_q());
            assert_eq!(p, mul_mod(w, sk.get_r(), sk.get_q()));
        }
    }

    #[test]
    fn test_textbook_public_key() {
        let keypair = KeyPair::from_parts(vec![2, 3, 6, 13], 27, 5).unwrap();
        assert_eq!(keypair.get_pk().get_knapsack(), [10, 15, 3, 11]);
        assert_eq!(keypair.get_pk().to_string(), "[10, 15, 3, 11]");
        assert_eq!(keypair.get_sk().to_string(), "{ w: [2, 3, 6, 13], q: 27, r: 5 }");
    }

    #[test]
    fn test_rejects_non_superincreasing() {
        assert_matches!(
            SuperincreasingSequence::new(vec![2, 3, 5]),
            Err(KnapsackError::NotSuperincreasing { index: 2 })
        );
        assert_matches!(
            SuperincreasingSequence::new(vec![0, 1]),
            Err(KnapsackError::NotSuperincreasing { index: 0 })
        );
        assert_matches!(
            SuperincreasingSequence::new(vec![u64::MAX - 1, u64::MAX]),
            Err(KnapsackError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_rejects_bad_trapdoor() {
        assert_matches!(
            KeyPair::from_parts(vec![], 27, 5),
            Err(KnapsackError::InvalidKeyLength(0))
        );
        assert_matches!(
            KeyPair::from_parts(vec![2, 3, 6, 13], 24, 5),
            Err(KnapsackError::InvalidPrivateKey(_))
        );
        assert_matches!(
            KeyPair::from_parts(vec![2, 3, 6, 13], 27, 0),
            Err(KnapsackError::InvalidPrivateKey(_))
        );
        assert_matches!(
            KeyPair::from_parts(vec![2, 3, 6, 13], 27, 27),
            Err(KnapsackError::InvalidPrivateKey(_))
        );
        assert_matches!(
            KeyPair::from_parts(vec![2, 3, 6, 13], 27, 3),
            Err(KnapsackError::InvalidPrivateKey(_))
        );
    }

    #[test]
    fn test_keygen_with_scripted_draws() {
        // weights 3, 5, 9; margin 4 gives q = 21; 7 and 14 share a factor with 21
        let mut sampler = Scripted::new(&[3, 5, 9, 4, 7, 14, 5]);
        let (keypair, trace) = KeyPair::keygen(3, &mut sampler).unwrap().into_parts();
        assert_eq!(keypair.get_sk().get_weights().get_weights(), [3, 5, 9]);
        assert_eq!(keypair.get_sk().get_q(), 21);
        assert_eq!(keypair.get_sk().get_r(), 5);
        assert_eq!(keypair.get_pk().get_knapsack(), [15, 4, 3]);
        assert_eq!(
            trace,
            vec![
                "Generated Keys: Public Key = [15, 4, 3], Private Key = { w: [3, 5, 9], q: 21, r: 5 }"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_multiplier_redraws_against_composite_modulus() {
        // q = 4 + 6 + 12 + 8 = 30; every draw before 7 shares a factor with 30
        let mut sampler = Scripted::new(&[4, 6, 12, 8, 2, 3, 5, 6, 10, 15, 25, 28, 7]);
        let keypair = KeyPair::keygen(3, &mut sampler).unwrap().into_parts().0;
        assert_eq!(keypair.get_sk().get_q(), 30);
        assert_eq!(keypair.get_sk().get_r(), 7);
        check_invariants(&keypair, 3);
    }

    #[test]
    fn test_misbehaving_sampler_is_caught() {
        let mut sampler = Scripted::new(&[3, 2]);
        assert_matches!(
            KeyPair::keygen(2, &mut sampler),
            Err(KnapsackError::NotSuperincreasing { index: 1 })
        );
    }

    #[test]
    fn test_keygen_length_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xDEADBEEF);
        assert_matches!(
            KeyPair::keygen(0, &mut rng),
            Err(KnapsackError::InvalidKeyLength(0))
        );
        assert_matches!(
            KeyPair::keygen(MAX_KEY_LENGTH + 1, &mut rng),
            Err(KnapsackError::InvalidKeyLength(_))
        );

        let single = KeyPair::keygen(1, &mut rng).unwrap().into_parts().0;
        check_invariants(&single, 1);
        let longest = KeyPair::keygen(MAX_KEY_LENGTH, &mut rng).unwrap().into_parts().0;
        check_invariants(&longest, MAX_KEY_LENGTH);
    }

    #[test]
    fn test_random_keygen() {
        let keypair = KeyPair::random(8).unwrap();
        assert_eq!(keypair.get_trace().len(), 1);
        check_invariants(keypair.get_value(), 8);
    }

    proptest! {
        #[test]
        fn test_generated_keys_hold_invariants(length in 1..=MAX_KEY_LENGTH, seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let keypair = KeyPair::keygen(length, &mut rng).unwrap().into_parts().0;
            check_invariants(&keypair, length);
        }
    }
}
