//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module are suited to decoding messages from single
//! sentences, fragment trains and batches of sentences. Batches are decoded
//! by publishing to the [`FromMessages`] and [`FromMessage`] traits, or, for
//! position reports, by [`decode_positions`].
//!
//! In many cases (when messages are of a known shape), these traits can be
//! derived. See the [`FromMessages`](macro@FromMessages) and
//! [`FromMessage`](macro@FromMessage) macros for details.

use std::borrow::Cow;

use thiserror::Error;

use crate::sans::{
    data::{DecodeStatus, DecodedField, DecodedMessage, Fields},
    fragment::{BitPayload, ReassemblyError, reassemble},
    header::MessageHeader,
    message::{self, DecodeError},
    sentence::{FieldError, extract_body, has_envelope},
};

pub mod positions;
pub mod slice;

pub use positions::{PositionOptions, PositionReportRow, Positions, decode_positions};
pub use slice::decode as decode_slice;

/// Errors occurring while decoding a single message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A bare payload was supplied with an invalid default pad.
    #[error("Invalid bare payload: {0}")]
    Payload(#[from] FieldError),
    /// The sentences could not be reassembled into a payload.
    #[error("Could not reassemble message: {0}")]
    Reassembly(#[from] ReassemblyError),
    /// The reassembled payload could not be decoded.
    #[error("Could not decode message spanning {consumed} sentences: {source}")]
    Decode { consumed: usize, source: DecodeError },
}

impl Error {
    /// Number of sentences examined before the failure, which a driver may
    /// skip before resuming.
    pub fn consumed(&self) -> usize {
        match self {
            Self::Payload(_) => 0,
            Self::Reassembly(err) => err.consumed(),
            Self::Decode { consumed, .. } => *consumed,
        }
    }
}

/// Options for [`decode_one`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Pad bits assumed for a bare payload, which carries no pad field.
    pub default_pad_bits: u32,
}

/// A decoded message and the number of sentences it spanned.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub message: DecodedMessage,
    pub fragments_consumed: usize,
    /// Whether the message type and application were recognised.
    pub status: DecodeStatus,
}

/// Decode one message from the start of a run of sentences.
///
/// The first sentence may begin a fragment train, in which case the
/// following sentences complete it. A bare armored payload (with no leading
/// `!` or `$`) is decoded on its own, with the pad from `options`.
///
/// An unknown message type is decoded successfully, with only its header,
/// and reported through [`Decoded::status`].
pub fn decode_one(
    sentences: &[impl AsRef<str>],
    options: &DecodeOptions,
) -> Result<Decoded, Error> {
    let (payload, consumed) = match sentences.first().map(AsRef::<str>::as_ref) {
        Some(bare) if !has_envelope(bare) => {
            let (body, pad_bits) = extract_body(bare, options.default_pad_bits)?;
            (BitPayload::new(body, pad_bits), 1)
        }
        _ => reassemble(sentences, 0)?,
    };

    let (message, status) =
        message::decode(&payload).map_err(|source| Error::Decode { consumed, source })?;

    Ok(Decoded {
        message,
        fragments_consumed: consumed,
        status,
    })
}

/// Derive [`FromMessages`] for a struct holding a collection of messages.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// To collect a single message, add the `message(N, ..)` attribute to an
/// `Option<T>` struct field, where `N` are the message types and `T` is a
/// type implementing [`FromMessage`] and [`Default`]. Additional messages
/// received for the same types will overwrite earlier ones. To collect
/// multiple occurrences of a message, apply the attribute to a `Vec<T>`
/// instead.
///
/// ```
/// #[derive(Debug, Default, FromMessages)]
/// struct Traffic {
///     #[message(1, 2, 3)]
///     positions: Vec<Position>,
///     #[message(5)]
///     voyage: Option<Voyage>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use aisling_derive::FromMessages;

/// Produce message receivers for a batch of sentences.
///
/// See the [`FromMessages`](macro@FromMessages) derive macro for an automatic
/// implementation of this trait.
pub trait FromMessages {
    /// Retrieve a receiver for a message type, if one exists.
    fn add_message(&mut self, message_id: u8) -> Option<&mut dyn FromMessage>;
}

/// Derive [`FromMessage`] for a struct representing a single message.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To receive a single value for a field, add the `field("name")` attribute
/// to an `Option<T>` struct field, where `name` is the decoded field name and
/// `T` is `i64`, `f64`, `bool` or `String`. Additional values received for
/// the same field will replace earlier ones. Fields of repeated groups are
/// named `group.field`.
///
/// To receive the message header, supply `header` in place of a field name.
///
/// ```
/// #[derive(Debug, Default, FromMessage)]
/// struct Position {
///     #[field(header)]
///     header: Option<MessageHeader>,
///     #[field("lat")]
///     lat: Option<f64>,
///     #[field("lon")]
///     lon: Option<f64>,
///     #[field("sog")]
///     sog: Option<f64>,
/// }
/// ```
///
/// To receive every value of a repeated group field, or to convert while
/// receiving, supply an accumulator closure. Since the value type cannot be
/// inferred, the second argument must be typed.
///
/// ```
/// #[derive(Debug, Default, FromMessage)]
/// struct Acknowledgement {
///     #[field("destinations.mmsi", |v, m: i64| v.push(m as u32))]
///     destinations: Vec<u32>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use aisling_derive::FromMessage;

/// Receive field values for a message.
///
/// Missing fields are skipped. Repeated groups are published entry by entry,
/// with each field named `group.field`.
///
/// The default implementation of each method ignores received values.
///
/// See the [`FromMessage`](macro@FromMessage) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromMessage {
    /// Add the header to the message.
    fn add_header(&mut self, _: MessageHeader) {}
    /// Add an integer for a field to the message.
    fn add_integer(&mut self, field: &str, _: i64) {}
    /// Add a float for a field to the message.
    fn add_float(&mut self, field: &str, _: f64) {}
    /// Add text for a field to the message.
    fn add_text(&mut self, field: &str, _: &str) {}
    /// Add a flag for a field to the message.
    fn add_boolean(&mut self, field: &str, _: bool) {}
}

/// Publish a decoded message to a receiver.
pub fn publish(message: &DecodedMessage, o: &mut (impl FromMessage + ?Sized)) {
    o.add_header(message.header());

    publish_fields(&message.fields, o, |name| name.into());

    for (group, entries) in message.sub_fields.iter() {
        for entry in entries {
            publish_fields(entry, o, |name| format!("{group}.{name}").into());
        }
    }
}

fn publish_fields<O: FromMessage + ?Sized>(
    fields: &Fields,
    o: &mut O,
    name: impl Fn(&'static str) -> Cow<'static, str>,
) {
    for (field, value) in fields.iter() {
        let field = name(field);
        match value {
            DecodedField::Integer(v) => o.add_integer(&field, *v),
            DecodedField::Float(v) => o.add_float(&field, *v),
            DecodedField::Text(v) => o.add_text(&field, v),
            DecodedField::Boolean(v) => o.add_boolean(&field, *v),
            DecodedField::Missing => {}
        }
    }
}
