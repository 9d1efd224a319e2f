//! Slice-based batch decoder implementation.

use tracing::debug;

use super::{DecodeOptions, FromMessages, decode_one, publish};

/// Decode every message in a slice of sentences, publishing to a receiver.
///
/// Sentences that cannot be decoded are logged and skipped. After a failed
/// reassembly, decoding resumes at the rejected sentence, which may begin a
/// new fragment train. Returns the number of messages decoded.
///
/// This method is also re-exported as `aisling::avec::decode_slice`.
pub fn decode(
    sentences: &[impl AsRef<str>],
    options: &DecodeOptions,
    o: &mut impl FromMessages,
) -> usize {
    let mut i = 0; // Index of the next sentence to decode.
    let mut decoded = 0;

    while let Some(remaining) = sentences.get(i..).filter(|r| !r.is_empty()) {
        match decode_one(remaining, options) {
            Ok(message) => {
                if let Some(o) = o.add_message(message.message.message_id) {
                    publish(&message.message, o);
                }
                decoded += 1;
                i += message.fragments_consumed;
            }
            Err(err) => {
                debug!(index = i, error = %err, "Skipping undecodable sentence.");
                i += err.consumed().max(1);
            }
        }
    }

    decoded
}
