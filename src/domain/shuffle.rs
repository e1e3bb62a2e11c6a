//! Cryptographically seeded, reproducible deck shuffle.
//!
//! The composed seed (server ∥ players ∥ optional dealer) is hashed with
//! SHA-512; each 32-byte half keys an AES-128 counter-mode keystream: the
//! first 16 bytes are the key, the next 8 the block nonce, the last 8 the
//! little-endian initial counter. The deck is shuffled twice, one full swap
//! pass per keystream: a single AES-128 keystream has a narrower effective
//! margin than the ~118 bits of a 32-card permutation.
//!
//! Any party holding all seed contributions can re-run the shuffle and audit
//! the deal.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Block};
use sha2::{Digest, Sha512};

use super::cards_types::CardSet;
use crate::errors::domain::DomainError;

/// Source of pseudo-random bytes for index draws.
pub trait ByteStream {
    fn next_byte(&mut self) -> u8;
}

/// Unbounded keystream seeded from one 32-byte half of the seed digest.
/// Block k is `AES-128(key, nonce ∥ LE64(counter₀ + k))`.
pub struct SeededStream {
    cipher: Aes128,
    nonce: [u8; 8],
    counter: u64,
    buf: [u8; 16],
    pos: usize,
}

impl SeededStream {
    /// `half` must be exactly 32 bytes (16 key + 8 nonce + 8 counter).
    pub fn new(half: &[u8]) -> Result<Self, DomainError> {
        if half.len() != 32 {
            return Err(DomainError::IncorrectSeedLength);
        }
        let key: &[u8; 16] = half[..16]
            .try_into()
            .map_err(|_| DomainError::IncorrectSeedLength)?;
        let nonce: [u8; 8] = half[16..24]
            .try_into()
            .map_err(|_| DomainError::IncorrectSeedLength)?;
        let counter_bytes: [u8; 8] = half[24..32]
            .try_into()
            .map_err(|_| DomainError::IncorrectSeedLength)?;
        Ok(Self {
            cipher: Aes128::new(key.into()),
            nonce,
            counter: u64::from_le_bytes(counter_bytes),
            buf: [0u8; 16],
            pos: 16,
        })
    }
}

impl ByteStream for SeededStream {
    fn next_byte(&mut self) -> u8 {
        if self.pos == self.buf.len() {
            let mut block = [0u8; 16];
            block[..8].copy_from_slice(&self.nonce);
            block[8..].copy_from_slice(&self.counter.to_le_bytes());
            let mut block = Block::from(block);
            self.cipher.encrypt_block(&mut block);
            self.buf = block.into();
            self.counter = self.counter.wrapping_add(1);
            self.pos = 0;
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        b
    }
}

/// Draw a uniform integer in `[0, nmax]` from a byte stream.
///
/// Rejection sampling against the smallest power-of-two mask covering `nmax`
/// keeps the draw unbiased; at least half of all candidate bytes are
/// accepted, so the loop terminates quickly on any non-degenerate stream.
pub fn pull_u8<S: ByteStream>(stream: &mut S, nmax: u8) -> u8 {
    if nmax == 0 {
        return 0;
    }
    let mask = u8::MAX >> nmax.leading_zeros();
    loop {
        let candidate = stream.next_byte() & mask;
        if candidate <= nmax {
            return candidate;
        }
    }
}

/// One in-place pass driven by `stream`: every position is swapped with a
/// uniformly drawn partner.
fn shuffle_with_stream<S: ByteStream>(
    deck: &mut CardSet,
    stream: &mut S,
) -> Result<(), DomainError> {
    if deck.len() > 256 {
        return Err(DomainError::TooManyItems);
    }
    if deck.is_empty() {
        return Ok(());
    }
    let last = (deck.len() - 1) as u8;
    for i in 0..deck.len() {
        let j = pull_u8(stream, last) as usize;
        deck.swap(i, j);
    }
    Ok(())
}

/// Shuffle `deck` reproducibly under `seed`. Never fails for the 32-card
/// deck; the error paths guard against misuse with oversized inputs.
pub fn shuffle_deck_with_seed(seed: &[u8], deck: &mut CardSet) -> Result<(), DomainError> {
    let digest = Sha512::digest(seed);
    let mut first = SeededStream::new(&digest[..32])?;
    shuffle_with_stream(deck, &mut first)?;
    let mut second = SeededStream::new(&digest[32..])?;
    shuffle_with_stream(deck, &mut second)?;
    Ok(())
}
