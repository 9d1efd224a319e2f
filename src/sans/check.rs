//! Helpers for validating sentence envelopes and computing checksums.

use thiserror::Error;

/// An error validating the envelope of a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The sentence does not begin with `!` or `$`.
    #[error("Sentence does not begin with '!' or '$'.")]
    MalformedEnvelope,
    /// The end of the sentence was reached before a `*`.
    #[error("Sentence has no checksum delimiter.")]
    MissingChecksumDelimiter,
    /// Fewer than two characters follow the `*`, or they are followed by
    /// something other than a comma.
    #[error("Checksum field is truncated or malformed.")]
    TruncatedChecksum,
    /// Calculated and found checksums do not match.
    #[error("Calculated ({calculated:02X}) and found ({found}) checksums do not match.")]
    ChecksumMismatch { found: String, calculated: u8 },
}

/// Accumulate the bytes of a sentence body into a checksum value.
///
/// The body excludes the leading `!` or `$` and everything from the `*` on.
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Wrap a sentence body in a `!` delimiter and a trailing checksum.
pub fn format_with_checksum(body: &str) -> String {
    format!("!{body}*{:02X}", checksum(body))
}

/// Validate the envelope and checksum of a single sentence.
///
/// Anything following the checksum is ignored, provided it is separated by
/// a comma. Hexadecimal digits are compared case-sensitively.
pub fn validate(sentence: &str) -> Result<(), EnvelopeError> {
    let bytes = sentence.as_bytes();

    if !matches!(bytes.first(), Some(b'!' | b'$')) {
        Err(EnvelopeError::MalformedEnvelope)?;
    }

    let star = bytes[1..]
        .iter()
        .position(|&b| b == b'*')
        .map(|i| i + 1)
        .ok_or(EnvelopeError::MissingChecksumDelimiter)?;

    let calculated = bytes[1..star].iter().fold(0, |acc, b| acc ^ b);

    let found = bytes
        .get(star + 1..star + 3)
        .ok_or(EnvelopeError::TruncatedChecksum)?;

    if !matches!(bytes.get(star + 3), None | Some(b',')) {
        Err(EnvelopeError::TruncatedChecksum)?;
    }

    let expected = format!("{calculated:02X}");

    if expected.as_bytes() != found {
        Err(EnvelopeError::ChecksumMismatch {
            found: String::from_utf8_lossy(found).into_owned(),
            calculated,
        })?;
    }

    Ok(())
}
