//! Binary and safety acknowledgements (types 7 and 13).

use crate::sans::data::{DecodeStatus, Layout};

use super::DecodeError;

const FIRST_DESTINATION: usize = 40;
const DESTINATION_BITS: usize = 32;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(FIRST_DESTINATION + DESTINATION_BITS)?;

    layout.uint("spare", 38, 2);

    layout.group("destinations");
    let count = ((layout.len() - FIRST_DESTINATION) / DESTINATION_BITS).min(4);
    for i in 0..count {
        let base = FIRST_DESTINATION + i * DESTINATION_BITS;
        let mut entry = layout.entry();
        entry.uint("mmsi", base, 30);
        entry.uint("seq_num", base + 30, 2);
        layout.push("destinations", entry);
    }

    Ok(DecodeStatus::Decoded)
}
