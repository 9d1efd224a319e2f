//! Splitting of comma-delimited sentence fields.
//!
//! A full sentence has the shape
//! `!AIVDM,<total>,<number>,<sequence>,<channel>,<payload>,<pad>*<checksum>`,
//! optionally followed by `,<trailing data>`. A string without a leading
//! `!` or `$` is treated as a bare armored payload.

use thiserror::Error;

/// Index of the fragment count field.
const TOTAL_FIELD: usize = 1;
/// Index of the fragment number field.
const NUMBER_FIELD: usize = 2;
/// Index of the sequence identifier field.
const SEQUENCE_FIELD: usize = 3;
/// Index of the armored payload field.
const BODY_FIELD: usize = 5;
/// Index of the pad bit field, which runs into the checksum.
const PAD_FIELD: usize = 6;

/// The largest pad a six-bit character can carry.
pub const MAX_PAD_BITS: u32 = 5;

/// An error extracting a field from a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The sentence has too few comma-delimited fields.
    #[error("Sentence has no field at index {0}.")]
    MissingField(usize),
    /// The pad bit count is not a number between 0 and 5.
    #[error("Invalid pad bit count ({0:?}).")]
    BadPadBits(String),
    /// A fragment count or number is not a positive integer.
    #[error("Invalid fragment count or number ({0:?}).")]
    BadFragmentNumber(String),
    /// The sequence identifier is neither empty nor a single digit.
    #[error("Invalid sequence identifier ({0:?}).")]
    BadSequenceId(String),
}

/// Fragment bookkeeping carried by a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentInfo {
    /// Number of sentences in the fragment train.
    pub total: u32,
    /// One-based position of this sentence within the train.
    pub number: u32,
    /// Identifier shared by all sentences of one train, if given.
    pub sequence_id: Option<u8>,
}

/// Whether a string carries a sentence envelope rather than a bare payload.
pub fn has_envelope(sentence: &str) -> bool {
    matches!(sentence.as_bytes().first(), Some(b'!' | b'$'))
}

/// Retrieve a comma-delimited field by index.
fn nth_field(sentence: &str, index: usize) -> Result<&str, FieldError> {
    sentence
        .split(',')
        .nth(index)
        .ok_or(FieldError::MissingField(index))
}

/// Extract the armored payload and pad bit count of a sentence.
///
/// Bare payloads are returned whole, with the supplied default pad.
pub fn extract_body(sentence: &str, default_pad: u32) -> Result<(&str, u32), FieldError> {
    if !has_envelope(sentence) {
        if default_pad > MAX_PAD_BITS {
            Err(FieldError::BadPadBits(default_pad.to_string()))?;
        }
        return Ok((sentence, default_pad));
    }

    let body = nth_field(sentence, BODY_FIELD)?;

    let pad = nth_field(sentence, PAD_FIELD)?;
    let pad = pad.split('*').next().unwrap_or_default();
    let pad_bits = parse_digits(pad)
        .filter(|&p| p <= u64::from(MAX_PAD_BITS))
        .ok_or_else(|| FieldError::BadPadBits(pad.to_string()))?;

    Ok((body, pad_bits as u32))
}

/// Extract the fragment count, number and sequence identifier of a sentence.
pub fn fragment_info(sentence: &str) -> Result<FragmentInfo, FieldError> {
    let positive = |index| -> Result<u32, FieldError> {
        let field = nth_field(sentence, index)?;
        parse_digits(field)
            .filter(|&n| n != 0)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| FieldError::BadFragmentNumber(field.to_string()))
    };

    let total = positive(TOTAL_FIELD)?;
    let number = positive(NUMBER_FIELD)?;

    let sequence = nth_field(sentence, SEQUENCE_FIELD)?;
    let sequence_id = match sequence.as_bytes() {
        [] => None,
        [d @ b'0'..=b'9'] => Some(d - b'0'),
        _ => Err(FieldError::BadSequenceId(sequence.to_string()))?,
    };

    Ok(FragmentInfo {
        total,
        number,
        sequence_id,
    })
}

/// Parse a trailing receiver timestamp appended after the checksum.
///
/// Everything after the final comma must be a non-empty run of decimal
/// digits, otherwise no timestamp is present.
pub fn trailing_timestamp(sentence: &str) -> Option<u64> {
    let (_, tail) = sentence.rsplit_once(',')?;
    parse_digits(tail)
}

/// Parse a non-empty run of ASCII digits.
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
