//! Turning text into knapsack sums
//!
//! Bit vectors are `Vec<u8>` holding 0 or 1, most significant bit first. A message is only ever
//! made of characters with 8-bit codes.
use crate::{
    errors::{KnapsackError, Result},
    keys::PublicKey,
    trace::Traced,
    Ciphertext,
};

const BYTE_BITS: usize = 8;

/// Render every character as a zero-padded binary number `width` bits wide
pub fn message_to_bits(message: &str, width: usize) -> Result<Vec<u8>> {
    let mut bits = Vec::with_capacity(message.len() * width);
    for c in message.chars() {
        let code = c as u32;
        if code > u8::MAX as u32 {
            return Err(KnapsackError::NonByteCharacter(c));
        }
        let needed = (u32::BITS - code.leading_zeros()) as usize;
        if needed > width {
            return Err(KnapsackError::CapacityMismatch {
                bits: needed,
                capacity: width,
            });
        }
        bits.extend(
            (0..width)
                .rev()
                .map(|i| if i < BYTE_BITS { ((code >> i) & 1) as u8 } else { 0 }),
        );
    }
    return Ok(bits);
}

/// Read the bits back in 8-bit groups, one character per group
pub fn bits_to_message(bits: &[u8]) -> Result<String> {
    if bits.len() % BYTE_BITS != 0 {
        return Err(KnapsackError::MalformedBitGroups(bits.len()));
    }
    let message = bits
        .chunks(BYTE_BITS)
        .map(|group| char::from(group.iter().fold(0u8, |acc, &bit| (acc << 1) | bit)))
        .collect();
    return Ok(message);
}

pub fn render_bits(bits: &[u8]) -> String {
    return bits.iter().map(|bit| if *bit == 0 { '0' } else { '1' }).collect();
}

/// sum(b[i] * public[i]) over one block of at most `public.len()` bits
pub fn knapsack_sum(bits: &[u8], pk: &PublicKey) -> Result<Ciphertext> {
    if bits.len() > pk.len() {
        return Err(KnapsackError::CapacityMismatch {
            bits: bits.len(),
            capacity: pk.len(),
        });
    }
    let mut sum: Ciphertext = 0;
    for (&bit, &weight) in bits.iter().zip(pk.get_knapsack()) {
        if bit != 0 {
            sum = sum
                .checked_add(weight)
                .ok_or(KnapsackError::ArithmeticOverflow)?;
        }
    }
    return Ok(sum);
}

/// Encrypt a message that fits in a single block.
///
/// Each character is rendered `n` bits wide, where n is the public key length, so the whole
/// message must be one character. Anything longer is a capacity error; use [`encrypt_blocks`] for
/// longer messages.
pub fn encrypt(message: &str, pk: &PublicKey) -> Result<Traced<Ciphertext>> {
    if pk.is_empty() {
        return Err(KnapsackError::InvalidKeyLength(0));
    }
    if message.is_empty() {
        return Err(KnapsackError::EmptyMessage);
    }
    let bits = message_to_bits(message, pk.len())?;
    let ciphertext = knapsack_sum(&bits, pk)?;
    let line = format!(
        "Encrypt: Binary Message = {}, Ciphertext = {}",
        render_bits(&bits),
        ciphertext
    );
    return Ok(Traced::with_line(ciphertext, line));
}

/// One knapsack sum per block, plus the number of meaningful message bits
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct BlockCiphertext {
    blocks: Vec<Ciphertext>,
    bit_len: usize,
}

impl BlockCiphertext {
    pub fn new(blocks: Vec<Ciphertext>, bit_len: usize) -> Self {
        return Self { blocks, bit_len };
    }

    pub fn get_blocks(&self) -> &[Ciphertext] {
        return &self.blocks;
    }

    pub fn get_bit_len(&self) -> usize {
        return self.bit_len;
    }
}

/// Encrypt a message of any length by chaining blocks.
///
/// Characters are 8 bits each; the bit string is cut into blocks of n bits and the last block is
/// padded with zeros on the right. The message bit length travels with the blocks so the padding
/// can be dropped on decryption.
pub fn encrypt_blocks(message: &str, pk: &PublicKey) -> Result<Traced<BlockCiphertext>> {
    if pk.is_empty() {
        return Err(KnapsackError::InvalidKeyLength(0));
    }
    if message.is_empty() {
        return Err(KnapsackError::EmptyMessage);
    }
    let bits = message_to_bits(message, BYTE_BITS)?;
    let mut trace = vec![];
    let mut blocks = vec![];
    for (index, block) in bits.chunks(pk.len()).enumerate() {
        let ciphertext = knapsack_sum(block, pk)?;
        trace.push(format!(
            "Encrypt: Block {} = {}, Ciphertext = {}",
            index,
            render_bits(block),
            ciphertext
        ));
        blocks.push(ciphertext);
    }
    trace.push(format!(
        "Encrypt: Binary Message = {}, Ciphertext = {:?}",
        render_bits(&bits),
        blocks
    ));
    return Ok(Traced::new(BlockCiphertext::new(blocks, bits.len()), trace));
}
