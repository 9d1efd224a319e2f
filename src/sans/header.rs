//! Decoding of the header common to every message.

use tartan_bitfield::bitfield;
use thiserror::Error;

use super::{
    bits::{BitBuffer, BitError, armor_to_bits},
    fragment::BitPayload,
};

/// Armored characters spanning the header.
const HEADER_CHARS: usize = 7;
/// Bits occupied by the header.
pub const HEADER_BITS: usize = 38;

/// An error decoding a message header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Too few bits for the header.
    #[error("Payload holds {available} bits, too few for a header.")]
    InsufficientBits { available: usize },
    /// Found a character outside the armoring alphabet.
    #[error("Invalid armored character {0:?}.")]
    BadNmeaCharacter(char),
}

impl From<BitError> for HeaderError {
    fn from(err: BitError) -> Self {
        match err {
            BitError::BadCharacter(c) => Self::BadNmeaCharacter(c),
        }
    }
}

/// Fields leading every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MessageHeader {
    /// Message type, 0 to 63.
    pub message_id: u8,
    /// Number of times the message has been repeated, 0 to 3.
    pub repeat_indicator: u8,
    /// Maritime Mobile Service Identity of the source station.
    pub mmsi: u32,
}

/// Decode the header of a payload.
///
/// Only the leading characters are converted, so a bad character further
/// along is reported by the message decoder instead. The message type is
/// not range-checked.
pub fn decode_header(payload: &BitPayload) -> Result<MessageHeader, HeaderError> {
    let body = payload.body();
    let available = payload.usable_bits();

    if body.len() < HEADER_CHARS || available < HEADER_BITS {
        Err(HeaderError::InsufficientBits { available })?;
    }

    // A multi-byte character may straddle the header, so cut on a character
    // boundary and let the armor table reject it.
    let end = body.char_indices().nth(HEADER_CHARS).map_or(body.len(), |(i, _)| i);
    Ok(read_header(&armor_to_bits(&body[..end])?))
}

/// Read a header from the start of a bit buffer.
pub(crate) fn read_header(bits: &BitBuffer) -> MessageHeader {
    bitfield! {
        struct Leading(u8) {
            [0..2] repeat_indicator: u8,
            [2..8] message_id: u8,
        }
    }

    let leading = Leading(bits.ubits(0, 8) as u8);

    MessageHeader {
        message_id: leading.message_id(),
        repeat_indicator: leading.repeat_indicator(),
        mmsi: bits.ubits(8, 30) as u32,
    }
}

/// Designated area code and function identifier of a binary message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApplicationId {
    pub dac: u16,
    pub fi: u8,
}

impl ApplicationId {
    /// Read the sixteen-bit application identifier at an offset.
    pub fn read(bits: &BitBuffer, offset: usize) -> Self {
        bitfield! {
            struct Word(u16) {
                [0..6] fi: u8,
                [6..16] dac: u16,
            }
        }

        let word = Word(bits.ubits(offset, 16) as u16);

        Self {
            dac: word.dac(),
            fi: word.fi(),
        }
    }
}
