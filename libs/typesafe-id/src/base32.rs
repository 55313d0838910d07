//! Base32 transcoding between a 16-byte big-endian value and its 26-character suffix.
//!
//! The alphabet is Crockford's: digits plus lowercase letters without `i`, `l`,
//! `o` and `u`. 128 bits do not divide evenly into 5-bit symbols, so the first
//! symbol carries only the top 3 bits and is always in `0..=7`.

use crate::error::IdError;

/// Number of characters in an encoded suffix.
pub const ENCODED_LEN: usize = 26;

/// Number of bytes in a decoded value.
pub const DECODED_LEN: usize = 16;

/// The 32 symbols, indexed by their 5-bit value.
pub const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

const INVALID: u8 = 0xFF;

/// Maps every byte to its 5-bit value, or [`INVALID`].
const DECODE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Encodes 16 big-endian bytes into 26 ASCII symbols.
#[must_use]
pub fn encode(bytes: &[u8; DECODED_LEN]) -> [u8; ENCODED_LEN] {
    let mut value = u128::from_be_bytes(*bytes);
    let mut out = [0u8; ENCODED_LEN];
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(value & 0x1f) as usize];
        value >>= 5;
    }
    out
}

/// Decodes 26 ASCII symbols back into 16 big-endian bytes.
///
/// Fails with [`IdError::InvalidSuffix`] if the input is not exactly 26 bytes,
/// contains a byte outside the alphabet, or starts with a symbol above `7`.
pub fn decode(input: &[u8]) -> Result<[u8; DECODED_LEN], IdError> {
    if input.len() != ENCODED_LEN {
        return Err(IdError::InvalidSuffix);
    }

    let mut value: u128 = 0;
    for (i, &c) in input.iter().enumerate() {
        let bits = DECODE[c as usize];
        if bits == INVALID || (i == 0 && bits > 7) {
            return Err(IdError::InvalidSuffix);
        }
        value = (value << 5) | u128::from(bits);
    }

    Ok(value.to_be_bytes())
}

/// Returns true if `input` would decode successfully.
#[must_use]
pub fn is_valid(input: &[u8]) -> bool {
    input.len() == ENCODED_LEN
        && DECODE[input[0] as usize] <= 7
        && input.iter().all(|&c| DECODE[c as usize] != INVALID)
}
