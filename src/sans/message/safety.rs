//! Safety related text, addressed (type 12) and broadcast (type 14).

use crate::sans::data::{DecodeStatus, Layout};

use super::DecodeError;

pub fn decode_addressed(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(72)?;

    layout.uint("seq_num", 38, 2);
    layout.uint("dest_mmsi", 40, 30);
    layout.flag("retransmitted", 70);
    layout.uint("spare", 71, 1);
    layout.text_to_end("text", 72);

    Ok(DecodeStatus::Decoded)
}

pub fn decode_broadcast(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(40)?;

    layout.uint("spare", 38, 2);
    layout.text_to_end("text", 40);

    Ok(DecodeStatus::Decoded)
}
