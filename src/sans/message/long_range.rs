//! Long range position reports (type 27).

use crate::sans::data::{DecodeStatus, DecodedField, Layout, valid};

use super::DecodeError;

const LONG_RANGE_BITS: usize = 96;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(LONG_RANGE_BITS)?;

    layout.flag("position_accuracy", 38);
    layout.flag("raim", 39);
    layout.uint_where("nav_status", 40, 4, valid::not(15));
    layout.lon("lon", 44, 18, 600.0);
    layout.lat("lat", 62, 17, 600.0);
    layout.uint_where("sog", 79, 6, valid::not(63));
    layout.uint_where("cog", 85, 9, valid::below(360));

    // The position latency bit is clear when latency is under five seconds.
    let latency = layout.bits().bit(94);
    layout.set("gnss", DecodedField::Boolean(!latency));
    layout.uint("spare", 95, 1);

    Ok(DecodeStatus::Decoded)
}
