//! Recovering text with the trapdoor
use crate::{
    arithmetics::{modular_inverse, mul_mod},
    encoding::{bits_to_message, render_bits, BlockCiphertext},
    errors::{KnapsackError, Result},
    keys::{PrivateKey, SuperincreasingSequence},
    trace::Traced,
    Ciphertext,
};

/// Greedy decomposition of `target` into a subset of the weights.
///
/// Weights are visited from the largest down; a weight is taken whenever it still fits. Because
/// every weight exceeds the sum of all smaller ones, a weight that fits must be taken, so the
/// answer is unique. The visiting order must stay descending. A non-zero remainder means the
/// target is not a subset sum at all.
pub fn decompose(target: u64, weights: &SuperincreasingSequence) -> Result<Vec<u8>> {
    let weights = weights.get_weights();
    let mut bits = vec![0u8; weights.len()];
    let mut remainder = target;
    for i in (0..weights.len()).rev() {
        if remainder >= weights[i] {
            bits[i] = 1;
            remainder -= weights[i];
        }
    }
    if remainder != 0 {
        return Err(KnapsackError::InvalidCiphertext);
    }
    return Ok(bits);
}

/// c' = c * r^-1 mod q, the knapsack sum over the private weights
pub fn unblind(ciphertext: Ciphertext, sk: &PrivateKey) -> Result<Traced<u64>> {
    let (r_inverse, mut trace) = modular_inverse(sk.get_r(), sk.get_q())?.into_parts();
    let c_prime = mul_mod(ciphertext, r_inverse, sk.get_q());
    trace.push(format!(
        "Decrypt: Ciphertext = {}, r^-1 = {}, C' = {}",
        ciphertext, r_inverse, c_prime
    ));
    return Ok(Traced::new(c_prime, trace));
}

/// Decrypt a single-block ciphertext produced by [`crate::encoding::encrypt`].
///
/// The recovered n-bit vector is read back as n / 8 characters, so n must be a multiple of 8. With
/// n = 8 this is the exact inverse of `encrypt`; with wider keys the single character comes back
/// preceded by NUL characters from its zero padding.
pub fn decrypt(ciphertext: Ciphertext, sk: &PrivateKey) -> Result<Traced<String>> {
    let (c_prime, mut trace) = unblind(ciphertext, sk)?.into_parts();
    let bits = decompose(c_prime, sk.get_weights())?;
    let message = bits_to_message(&bits)?;
    trace.push(format!(
        "Decrypt: Binary Array = {}, Message = {}",
        render_bits(&bits),
        message
    ));
    return Ok(Traced::new(message, trace));
}

/// Decrypt the output of [`crate::encoding::encrypt_blocks`]
pub fn decrypt_blocks(ciphertext: &BlockCiphertext, sk: &PrivateKey) -> Result<Traced<String>> {
    let n = sk.len();
    let blocks = ciphertext.get_blocks();
    let bit_len = ciphertext.get_bit_len();
    if blocks.len() != bit_len.div_ceil(n) {
        return Err(KnapsackError::CapacityMismatch {
            bits: bit_len,
            capacity: blocks.len() * n,
        });
    }

    let mut trace = vec![];
    let r_inverse = modular_inverse(sk.get_r(), sk.get_q())?.log_into(&mut trace);
    let mut bits = Vec::with_capacity(blocks.len() * n);
    for (index, &block) in blocks.iter().enumerate() {
        let c_prime = mul_mod(block, r_inverse, sk.get_q());
        let block_bits = decompose(c_prime, sk.get_weights())?;
        trace.push(format!(
            "Decrypt: Block {} Ciphertext = {}, r^-1 = {}, C' = {}, Bits = {}",
            index,
            block,
            r_inverse,
            c_prime,
            render_bits(&block_bits)
        ));
        bits.extend(block_bits);
    }

    // padding of the last block must be zero
    if bits[bit_len..].iter().any(|&bit| bit != 0) {
        return Err(KnapsackError::InvalidCiphertext);
    }
    bits.truncate(bit_len);
    let message = bits_to_message(&bits)?;
    trace.push(format!(
        "Decrypt: Binary Array = {}, Message = {}",
        render_bits(&bits),
        message
    ));
    return Ok(Traced::new(message, trace));
}
