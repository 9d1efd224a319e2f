//! Class A position reports (types 1, 2 and 3).

use crate::sans::data::{DecodeStatus, DecodedField, Layout, valid};

use super::{DecodeError, comm_state};

const POSITION_BITS: usize = 168;

/// Largest rate-of-turn magnitude with a defined turn rate.
const ROT_LIMIT: i64 = 126;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(POSITION_BITS)?;

    layout.uint_where("nav_status", 38, 4, valid::not(15));
    rate_of_turn(layout, 42);
    layout.scaled("sog", 50, 10, 10.0, valid::below(1022));
    layout.flag("position_accuracy", 60);
    layout.lon("lon", 61, 28, 600_000.0);
    layout.lat("lat", 89, 27, 600_000.0);
    layout.scaled("cog", 116, 12, 10.0, valid::below(3600));
    layout.uint_where("true_heading", 128, 9, valid::below(360));
    layout.uint("timestamp", 137, 6);
    layout.uint_where("special_manoeuvre", 143, 2, valid::within(1, 2));
    layout.uint("spare", 145, 3);
    layout.flag("raim", 148);

    match layout.message_id() {
        3 => comm_state::itdma(layout, 149),
        _ => comm_state::sotdma(layout, 149),
    }

    Ok(DecodeStatus::Decoded)
}

/// Decode the rate of turn, in degrees per minute, from its square-root
/// encoding.
///
/// Raw values beyond ±126 carry only a turn direction, so the rate is
/// missing and `rot_over_range` is set.
pub fn rate_of_turn(layout: &mut Layout<'_>, offset: usize) {
    let raw = layout.bits().sbits(offset, 8);

    let over_range = raw.abs() > ROT_LIMIT;
    let rot = if over_range {
        DecodedField::Missing
    } else {
        let rate = (raw as f64 / 4.733).powi(2);
        DecodedField::Float(if raw < 0 { -rate } else { rate })
    };

    layout.set("rot_over_range", DecodedField::Boolean(over_range));
    layout.set("rot", rot);
}
