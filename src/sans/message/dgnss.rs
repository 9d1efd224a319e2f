//! GNSS broadcast binary messages (type 17).

use crate::sans::data::{DecodeStatus, Layout};

use super::DecodeError;

/// Length through the correction header.
const HEADER_END: usize = 120;
const WORD_BITS: usize = 24;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(80)?;

    layout.uint("spare", 38, 2);
    layout.lon("lon", 40, 18, 600.0);
    layout.lat("lat", 58, 17, 600.0);
    layout.uint("spare2", 75, 5);

    layout.group("words");
    if layout.len() < HEADER_END {
        for name in ["gnss_type", "station", "z_count", "seq_num", "num_words", "health"] {
            layout.missing(name);
        }
        return Ok(DecodeStatus::Decoded);
    }

    layout.uint("gnss_type", 80, 6);
    layout.uint("station", 86, 10);
    layout.uint("z_count", 96, 13);
    layout.uint("seq_num", 109, 3);
    let num_words = layout.uint("num_words", 112, 5) as usize;
    layout.uint("health", 117, 3);

    let count = num_words.min((layout.len() - HEADER_END) / WORD_BITS);
    for i in 0..count {
        let mut entry = layout.entry();
        entry.uint("word", HEADER_END + i * WORD_BITS, WORD_BITS);
        layout.push("words", entry);
    }

    Ok(DecodeStatus::Decoded)
}
