//! Data link management (type 20).

use crate::sans::data::{DecodeStatus, Layout};

use super::DecodeError;

const FIRST_BLOCK: usize = 40;
const BLOCK_BITS: usize = 30;

/// Field names of each reservation block, in bit order.
const BLOCKS: [[&str; 4]; 4] = [
    ["offset_1", "num_slots_1", "timeout_1", "incr_1"],
    ["offset_2", "num_slots_2", "timeout_2", "incr_2"],
    ["offset_3", "num_slots_3", "timeout_3", "incr_3"],
    ["offset_4", "num_slots_4", "timeout_4", "incr_4"],
];

/// Decode up to four slot reservations, each present only if the payload
/// reaches its end.
pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(FIRST_BLOCK + BLOCK_BITS)?;

    layout.uint("spare", 38, 2);

    for (i, [offset, num_slots, timeout, incr]) in BLOCKS.into_iter().enumerate() {
        let base = FIRST_BLOCK + i * BLOCK_BITS;
        if layout.len() >= base + BLOCK_BITS {
            layout.uint(offset, base, 12);
            layout.uint(num_slots, base + 12, 4);
            layout.uint(timeout, base + 16, 3);
            layout.uint(incr, base + 19, 11);
        } else {
            for name in [offset, num_slots, timeout, incr] {
                layout.missing(name);
            }
        }
    }

    Ok(DecodeStatus::Decoded)
}
