//! Dispatch of payloads to the per-type field decoders.
//!
//! Every decoder reads fixed bit offsets from a [`Layout`], mapping each
//! field's reserved values to [`DecodedField::Missing`]. Binary messages
//! (types 6 and 8) are further dispatched on their application identifier,
//! falling back to the fields common to the message type when it is not
//! recognised.
//!
//! [`DecodedField::Missing`]: super::data::DecodedField::Missing

use thiserror::Error;

use super::{
    bits::BitError,
    data::{DecodeStatus, DecodedMessage, Fields, Groups, Layout, valid},
    fragment::BitPayload,
    header::{HeaderError, MessageHeader, decode_header},
};

mod acknowledge;
mod aid_to_navigation;
mod area_notice;
mod assignment;
mod base_station;
mod binary_addressed;
mod binary_broadcast;
mod channel_management;
mod class_b;
mod comm_state;
mod dgnss;
mod inland;
mod inquiry;
mod link_management;
mod long_range;
mod met_hydro;
mod position;
mod safety;
mod sar;
mod sensor_report;
mod slot_binary;
mod static_voyage;

/// An error decoding the fields of a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload is shorter than the fixed portion of the layout.
    #[error("Payload holds {available} bits, at least {needed} are required.")]
    InsufficientBits { needed: usize, available: usize },
    /// Found a character outside the armoring alphabet.
    #[error("Invalid armored character {0:?}.")]
    BadNmeaCharacter(char),
    /// The message type is recognised but deliberately not decoded.
    #[error("Message type {0} is not supported.")]
    UnsupportedMessageType(u8),
}

impl From<BitError> for DecodeError {
    fn from(err: BitError) -> Self {
        match err {
            BitError::BadCharacter(c) => Self::BadNmeaCharacter(c),
        }
    }
}

impl From<HeaderError> for DecodeError {
    fn from(err: HeaderError) -> Self {
        match err {
            HeaderError::InsufficientBits { available } => Self::InsufficientBits {
                needed: super::header::HEADER_BITS,
                available,
            },
            HeaderError::BadNmeaCharacter(c) => Self::BadNmeaCharacter(c),
        }
    }
}

impl Layout<'_> {
    /// Fail unless the message holds at least `needed` bits.
    pub fn require(&self, needed: usize) -> Result<(), DecodeError> {
        let available = self.len();
        if available < needed {
            Err(DecodeError::InsufficientBits { needed, available })?;
        }
        Ok(())
    }
}

type FieldDecoder = fn(&mut Layout<'_>) -> Result<DecodeStatus, DecodeError>;

/// Decode the header and fields of a payload.
pub fn decode(payload: &BitPayload) -> Result<(DecodedMessage, DecodeStatus), DecodeError> {
    let header = decode_header(payload)?;
    dispatch(payload, &header)
}

/// Decode the fields of a payload whose header has already been read.
///
/// Unknown message types yield a record carrying only the header, along with
/// [`DecodeStatus::UnknownMessageType`].
pub fn dispatch(
    payload: &BitPayload,
    header: &MessageHeader,
) -> Result<(DecodedMessage, DecodeStatus), DecodeError> {
    let decoder: FieldDecoder = match header.message_id {
        1..=3 => position::decode,
        4 | 11 => base_station::decode,
        5 => static_voyage::decode,
        6 => binary_addressed::decode,
        7 | 13 => acknowledge::decode,
        8 => binary_broadcast::decode,
        9 => sar::decode,
        10 => inquiry::decode,
        12 => safety::decode_addressed,
        14 => safety::decode_broadcast,
        16 => assignment::decode_assignment,
        17 => dgnss::decode,
        18 => class_b::decode_position,
        20 => link_management::decode,
        21 => aid_to_navigation::decode,
        22 => channel_management::decode,
        23 => assignment::decode_group_assignment,
        24 => class_b::decode_static,
        25 => slot_binary::decode_single,
        26 => slot_binary::decode_multiple,
        27 => long_range::decode,
        id @ (15 | 19) => Err(DecodeError::UnsupportedMessageType(id))?,
        _ => {
            let message = DecodedMessage::new(*header, Fields::default(), Groups::default());
            return Ok((message, DecodeStatus::UnknownMessageType));
        }
    };

    let bits = payload.to_bits()?;
    let mut layout = Layout::new(&bits);
    let status = decoder(&mut layout)?;

    let (fields, groups) = layout.into_parts();
    Ok((DecodedMessage::new(*header, fields, groups), status))
}

/// Read a month, day, hour and minute stamp of 4, 5, 5 and 6 bits.
fn utc_stamp(layout: &mut Layout<'_>, names: [&'static str; 4], offset: usize) {
    let [month, day, hour, minute] = names;
    layout.uint_where(month, offset, 4, valid::within(1, 12));
    layout.uint_where(day, offset + 4, 5, valid::not(0));
    layout.uint_where(hour, offset + 9, 5, valid::below(24));
    layout.uint_where(minute, offset + 14, 6, valid::below(60));
}

/// Read a day, hour and minute stamp of 5, 5 and 6 bits.
fn utc_day_stamp(layout: &mut Layout<'_>, names: [&'static str; 3], offset: usize) {
    let [day, hour, minute] = names;
    layout.uint_where(day, offset, 5, valid::not(0));
    layout.uint_where(hour, offset + 5, 5, valid::below(24));
    layout.uint_where(minute, offset + 10, 6, valid::below(60));
}
