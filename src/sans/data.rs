//! Decoded records and the field readers that build them.
//!
//! Every field is read from a fixed bit offset and width, then checked
//! against the field's validity rule. Values failing the rule (a reserved
//! 'not available' code, a saturated range boundary, a padding-only string)
//! are recorded as [`DecodedField::Missing`] rather than as the raw value.

use super::{bits::BitBuffer, header::MessageHeader};

/// A single decoded value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DecodedField {
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    /// The value was not transmitted, or fell outside its valid range.
    Missing,
}

impl DecodedField {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as a float, converting integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

/// Named fields in the order they were decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(&'static str, DecodedField)>);

impl Fields {
    /// Retrieve a field by name.
    pub fn get(&self, name: &str) -> Option<&DecodedField> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &DecodedField)> {
        self.0.iter().map(|(n, v)| (*n, v))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Set a field, replacing any earlier value of the same name in place.
    pub(crate) fn insert(&mut self, name: &'static str, value: DecodedField) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name, value)),
        }
    }
}

/// Named lists of repeated entries, in the order they were decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Groups(Vec<(&'static str, Vec<Fields>)>);

impl Groups {
    /// Retrieve the entries of a group by name.
    pub fn get(&self, name: &str) -> Option<&[Fields]> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[Fields])> {
        self.0.iter().map(|(n, v)| (*n, v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, name: &'static str, entry: Fields) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => v.push(entry),
            None => self.0.push((name, vec![entry])),
        }
    }

    /// Declare a group, so that it is present even with no entries.
    pub(crate) fn declare(&mut self, name: &'static str) {
        if !self.0.iter().any(|(n, _)| *n == name) {
            self.0.push((name, Vec::new()));
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fields {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Groups {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// A fully decoded message.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedMessage {
    pub message_id: u8,
    pub repeat_indicator: u8,
    pub mmsi: u32,
    /// Fields specific to the message type, in bit order.
    pub fields: Fields,
    /// Repeated groups, such as waypoints or sensor reports.
    pub sub_fields: Groups,
}

impl DecodedMessage {
    pub(crate) fn new(header: MessageHeader, fields: Fields, sub_fields: Groups) -> Self {
        Self {
            message_id: header.message_id,
            repeat_indicator: header.repeat_indicator,
            mmsi: header.mmsi,
            fields,
            sub_fields,
        }
    }

    pub fn header(&self) -> MessageHeader {
        MessageHeader {
            message_id: self.message_id,
            repeat_indicator: self.repeat_indicator,
            mmsi: self.mmsi,
        }
    }

    /// Retrieve a field by name, treating absent fields as missing.
    pub fn field(&self, name: &str) -> &DecodedField {
        self.fields.get(name).unwrap_or(&DecodedField::Missing)
    }

    /// Retrieve the entries of a repeated group, or none.
    pub fn group(&self, name: &str) -> &[Fields] {
        self.sub_fields.get(name).unwrap_or_default()
    }
}

/// Soft outcome of a successful decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The message type and any sub-type were recognised.
    Decoded,
    /// The message type is not in the catalog; only the header was decoded.
    UnknownMessageType,
    /// A binary message of an unrecognised DAC and FI; only fields common to
    /// the message type were decoded.
    UnknownApplication,
}

/// Field validity rules over raw unsigned values.
pub(crate) mod valid {
    /// Any value is valid.
    pub fn any(_: u64) -> bool {
        true
    }

    /// Valid unless equal to a 'not available' code.
    pub fn not(sentinel: u64) -> impl Fn(u64) -> bool {
        move |v| v != sentinel
    }

    /// Valid below an exclusive limit.
    pub fn below(limit: u64) -> impl Fn(u64) -> bool {
        move |v| v < limit
    }

    /// Valid within an inclusive range.
    pub fn within(low: u64, high: u64) -> impl Fn(u64) -> bool {
        move |v| (low..=high).contains(&v)
    }
}

/// Accumulator reading fields from a bit buffer into a record.
pub(crate) struct Layout<'a> {
    bits: &'a BitBuffer,
    fields: Fields,
    groups: Groups,
}

impl<'a> Layout<'a> {
    pub fn new(bits: &'a BitBuffer) -> Self {
        Self {
            bits,
            fields: Fields::default(),
            groups: Groups::default(),
        }
    }

    /// Start an empty record over the same bits, for a group entry.
    pub fn entry(&self) -> Layout<'a> {
        Layout::new(self.bits)
    }

    pub fn bits(&self) -> &'a BitBuffer {
        self.bits
    }

    /// Number of message bits available.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Message type, from the leading six bits.
    pub fn message_id(&self) -> u8 {
        self.bits.ubits(0, 6) as u8
    }

    /// Record a value directly.
    pub fn set(&mut self, name: &'static str, value: DecodedField) {
        self.fields.insert(name, value);
    }

    pub fn missing(&mut self, name: &'static str) {
        self.set(name, DecodedField::Missing);
    }

    /// Read an unsigned integer, recording it as missing unless valid.
    pub fn uint_where(
        &mut self,
        name: &'static str,
        offset: usize,
        width: usize,
        valid: impl FnOnce(u64) -> bool,
    ) -> Option<u64> {
        let raw = self.bits.ubits(offset, width);
        let value = valid(raw).then_some(raw);
        self.set(name, value.map_or(DecodedField::Missing, |v| DecodedField::Integer(v as i64)));
        value
    }

    /// Read an unsigned integer with no reserved values.
    pub fn uint(&mut self, name: &'static str, offset: usize, width: usize) -> u64 {
        let raw = self.bits.ubits(offset, width);
        self.set(name, DecodedField::Integer(raw as i64));
        raw
    }

    /// Read an unsigned integer in units of `1 / divisor`, and record it as
    /// missing unless the raw value is valid.
    pub fn scaled(
        &mut self,
        name: &'static str,
        offset: usize,
        width: usize,
        divisor: f64,
        valid: impl FnOnce(u64) -> bool,
    ) -> Option<f64> {
        let raw = self.bits.ubits(offset, width);
        let value = valid(raw).then(|| raw as f64 / divisor);
        self.set(name, value.map_or(DecodedField::Missing, DecodedField::Float));
        value
    }

    /// Read an unsigned integer, apply `raw / divisor + bias`, and record it
    /// as missing unless the raw value is valid.
    pub fn biased(
        &mut self,
        name: &'static str,
        offset: usize,
        width: usize,
        divisor: f64,
        bias: f64,
        valid: impl FnOnce(u64) -> bool,
    ) -> Option<f64> {
        let raw = self.bits.ubits(offset, width);
        let value = valid(raw).then(|| raw as f64 / divisor + bias);
        self.set(name, value.map_or(DecodedField::Missing, DecodedField::Float));
        value
    }

    /// Read a signed integer in units of `1 / divisor`, and record it as
    /// missing unless the raw value is valid.
    pub fn signed_scaled(
        &mut self,
        name: &'static str,
        offset: usize,
        width: usize,
        divisor: f64,
        valid: impl FnOnce(i64) -> bool,
    ) -> Option<f64> {
        let raw = self.bits.sbits(offset, width);
        let value = valid(raw).then(|| raw as f64 / divisor);
        self.set(name, value.map_or(DecodedField::Missing, DecodedField::Float));
        value
    }

    /// Read a longitude in degrees, given the raw units per degree.
    pub fn lon(
        &mut self,
        name: &'static str,
        offset: usize,
        width: usize,
        per_degree: f64,
    ) -> Option<f64> {
        self.signed_scaled(name, offset, width, per_degree, |raw| {
            (raw as f64 / per_degree).abs() <= 180.0
        })
    }

    /// Read a latitude in degrees, given the raw units per degree.
    pub fn lat(
        &mut self,
        name: &'static str,
        offset: usize,
        width: usize,
        per_degree: f64,
    ) -> Option<f64> {
        self.signed_scaled(name, offset, width, per_degree, |raw| {
            (raw as f64 / per_degree).abs() <= 90.0
        })
    }

    /// Read a single-bit flag.
    pub fn flag(&mut self, name: &'static str, offset: usize) -> bool {
        let value = self.bits.bit(offset);
        self.set(name, DecodedField::Boolean(value));
        value
    }

    /// Read six-bit text, recording it as missing if it holds only padding.
    ///
    /// Trailing padding and spaces are stripped.
    pub fn text(&mut self, name: &'static str, offset: usize, width: usize) -> Option<String> {
        let raw = self.bits.text(offset, width);
        let value = (!raw.bytes().all(|b| b == b'@'))
            .then(|| raw.trim_end_matches(['@', ' ']).to_string());
        self.set(
            name,
            value.clone().map_or(DecodedField::Missing, DecodedField::Text),
        );
        value
    }

    /// Read whole characters of six-bit text from an offset to the end of
    /// the message.
    pub fn text_to_end(&mut self, name: &'static str, offset: usize) -> Option<String> {
        let width = self.len().saturating_sub(offset) / 6 * 6;
        self.text(name, offset, width)
    }

    /// Append a finished entry to a repeated group.
    pub fn push(&mut self, group: &'static str, entry: Layout<'_>) {
        self.groups.push(group, entry.fields);
    }

    /// Declare a repeated group that may receive no entries.
    pub fn group(&mut self, group: &'static str) {
        self.groups.declare(group);
    }

    pub fn into_parts(self) -> (Fields, Groups) {
        (self.fields, self.groups)
    }
}
