//! Communication state trailing the self-organising report types.

use tartan_bitfield::bitfield;

use crate::sans::data::{DecodedField, Layout};

/// Bits occupied by a communication state, including the sync state.
pub const COMM_STATE_BITS: usize = 19;

/// Decode a SOTDMA communication state starting at `offset`.
///
/// The slot timeout selects which sub-message follows it.
pub fn sotdma(layout: &mut Layout<'_>, offset: usize) {
    bitfield! {
        struct Sotdma(u32) {
            [0..14] sub_message: u16,
            [14..17] slot_timeout: u8,
            [17..19] sync_state: u8,
        }
    }

    bitfield! {
        struct UtcTime(u16) {
            [0..2] spare: u8,
            [2..9] minute: u8,
            [9..14] hour: u8,
        }
    }

    let state = Sotdma(layout.bits().ubits(offset, COMM_STATE_BITS) as u32);
    let int = |v: u64| DecodedField::Integer(v as i64);

    layout.set("sync_state", int(state.sync_state().into()));
    layout.set("slot_timeout", int(state.slot_timeout().into()));

    let sub_message = state.sub_message();
    match state.slot_timeout() {
        0 => layout.set("slot_offset", int(sub_message.into())),
        1 => {
            let time = UtcTime(sub_message);
            let hour = u64::from(time.hour());
            let minute = u64::from(time.minute());
            layout.set(
                "utc_hour",
                if hour < 24 { int(hour) } else { DecodedField::Missing },
            );
            layout.set(
                "utc_min",
                if minute < 60 { int(minute) } else { DecodedField::Missing },
            );
            layout.set("utc_spare", int(time.spare().into()));
        }
        2 | 4 | 6 => layout.set("slot_number", int(sub_message.into())),
        _ => layout.set("received_stations", int(sub_message.into())),
    }
}

/// Decode an ITDMA communication state starting at `offset`.
pub fn itdma(layout: &mut Layout<'_>, offset: usize) {
    bitfield! {
        struct Itdma(u32) {
            [0] keep_flag,
            [1..4] slots_to_allocate: u8,
            [4..17] slot_increment: u16,
            [17..19] sync_state: u8,
        }
    }

    let state = Itdma(layout.bits().ubits(offset, COMM_STATE_BITS) as u32);
    let int = |v: u64| DecodedField::Integer(v as i64);

    layout.set("sync_state", int(state.sync_state().into()));
    layout.set("slot_increment", int(state.slot_increment().into()));
    layout.set("slots_to_allocate", int(state.slots_to_allocate().into()));
    layout.set("keep_flag", DecodedField::Boolean(state.keep_flag()));
}

/// Decode a communication state of the kind selected by a flag bit.
pub fn selected(layout: &mut Layout<'_>, offset: usize, itdma_selected: bool) {
    if itdma_selected {
        itdma(layout, offset)
    } else {
        sotdma(layout, offset)
    }
}
