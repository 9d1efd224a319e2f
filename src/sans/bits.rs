//! Conversion of six-bit armored text into a queryable bit buffer.

use thiserror::Error;

/// An error converting armored text to bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitError {
    /// A character outside the six-bit armoring alphabet.
    #[error("Invalid armored character {0:?}.")]
    BadCharacter(char),
}

const INVALID: u8 = 0xFF;

/// Armored character to six-bit value, built once at compile time.
const ARMOR: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut c = b'0';
    while c <= b'W' {
        table[c as usize] = c - b'0';
        c += 1;
    }
    let mut c = b'`';
    while c <= b'w' {
        table[c as usize] = c - b'0' - 8;
        c += 1;
    }
    table
};

/// Six-bit value to text character.
const SIXBIT_ASCII: &[u8; 64] =
    b"@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_ !\"#$%&'()*+,-./0123456789:;<=>?";

/// A sequence of bits decoded from armored text.
///
/// Reads past the end of the buffer yield zero bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    len: usize,
}

/// Convert armored text to a bit buffer, six bits per character.
pub fn armor_to_bits(armored: &str) -> Result<BitBuffer, BitError> {
    let mut bytes = Vec::with_capacity(armored.len() * 6 / 8 + 1);

    let mut acc = 0u16;
    let mut held = 0;

    for c in armored.chars() {
        let value = ARMOR
            .get(c as usize)
            .copied()
            .filter(|&v| v != INVALID)
            .ok_or(BitError::BadCharacter(c))?;

        acc = (acc << 6) | u16::from(value);
        held += 6;

        if held >= 8 {
            held -= 8;
            bytes.push((acc >> held) as u8);
            acc &= (1 << held) - 1;
        }
    }

    if held > 0 {
        bytes.push((acc << (8 - held)) as u8);
    }

    Ok(BitBuffer {
        bytes,
        len: armored.len() * 6,
    })
}

impl BitBuffer {
    /// Number of usable bits in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no usable bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discard trailing pad bits.
    pub fn without_pad(mut self, pad_bits: u32) -> Self {
        self.len = self.len.saturating_sub(pad_bits as usize);
        self
    }

    /// Read an unsigned big-endian field of up to 64 bits.
    pub fn ubits(&self, offset: usize, width: usize) -> u64 {
        if width == 0 {
            return 0;
        }
        debug_assert!(width <= 64);

        let start = offset / 8;
        let shift = offset % 8;

        let mut window = [0u8; 16];
        if let Some(available) = self.bytes.get(start..) {
            let n = available.len().min(16);
            window[..n].copy_from_slice(&available[..n]);
        }

        ((u128::from_be_bytes(window) << shift) >> (128 - width)) as u64
    }

    /// Read a two's complement big-endian field of up to 64 bits.
    pub fn sbits(&self, offset: usize, width: usize) -> i64 {
        if width == 0 {
            return 0;
        }
        let shift = 64 - width as u32;
        ((self.ubits(offset, width) << shift) as i64) >> shift
    }

    /// Read a single bit.
    pub fn bit(&self, offset: usize) -> bool {
        self.ubits(offset, 1) == 1
    }

    /// Read six-bit text, one character per six bits.
    ///
    /// Any remainder of `width` shorter than a character is ignored.
    pub fn text(&self, offset: usize, width: usize) -> String {
        (0..width / 6)
            .map(|i| SIXBIT_ASCII[self.ubits(offset + i * 6, 6) as usize] as char)
            .collect()
    }
}
