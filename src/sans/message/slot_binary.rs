//! Single slot (type 25) and multiple slot (type 26) binary messages.
//!
//! Two leading flags select whether a destination and an application
//! identifier precede the binary data. Fields left out by the flags are
//! missing.

use crate::sans::data::{DecodeStatus, Layout};

use super::{DecodeError, comm_state};

/// Bits of the communication state and its selector flag.
const COMM_STATE_TAIL: usize = 1 + comm_state::COMM_STATE_BITS;

pub fn decode_single(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    addressing(layout, 0)?;
    Ok(DecodeStatus::Decoded)
}

pub fn decode_multiple(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    addressing(layout, COMM_STATE_TAIL)?;

    let tail = layout.len() - COMM_STATE_TAIL;
    let itdma = layout.flag("commstate_flag", tail);
    comm_state::selected(layout, tail + 1, itdma);

    Ok(DecodeStatus::Decoded)
}

/// Decode the flags, destination and application identifier, requiring
/// `trailing` further bits after them.
fn addressing(layout: &mut Layout<'_>, trailing: usize) -> Result<(), DecodeError> {
    layout.require(40 + trailing)?;

    let addressed = layout.flag("addressed", 38);
    let use_app_id = layout.flag("use_app_id", 39);

    let mut next = 40;
    if addressed {
        layout.require(next + 30 + trailing)?;
        layout.uint("dest_mmsi", next, 30);
        next += 30;
    } else {
        layout.missing("dest_mmsi");
    }

    if use_app_id {
        layout.require(next + 16 + trailing)?;
        layout.uint("dac", next, 10);
        layout.uint("fi", next + 10, 6);
    } else {
        layout.missing("dac");
        layout.missing("fi");
    }

    Ok(())
}
