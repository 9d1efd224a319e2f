//! Static and voyage related data (type 5).

use crate::sans::data::{DecodeStatus, Layout, valid};

use super::DecodeError;

const STATIC_VOYAGE_BITS: usize = 424;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(STATIC_VOYAGE_BITS)?;

    layout.uint("ais_version", 38, 2);
    layout.uint_where("imo_num", 40, 30, valid::not(0));
    layout.text("callsign", 70, 42);
    layout.text("name", 112, 120);
    layout.uint_where("type_and_cargo", 232, 8, valid::not(0));
    dimensions(layout, 240);
    layout.uint_where("fix_type", 270, 4, valid::not(0));
    layout.uint_where("eta_month", 274, 4, valid::within(1, 12));
    layout.uint_where("eta_day", 278, 5, valid::not(0));
    layout.uint_where("eta_hour", 283, 5, valid::below(24));
    layout.uint_where("eta_minute", 288, 6, valid::below(60));
    layout.scaled("draught", 294, 8, 10.0, valid::not(0));
    layout.text("destination", 302, 120);
    layout.flag("dte", 422);
    layout.uint("spare", 423, 1);

    Ok(DecodeStatus::Decoded)
}

/// Decode the 30-bit reference point dimensions, in metres from the bow,
/// stern, port and starboard.
pub fn dimensions(layout: &mut Layout<'_>, offset: usize) {
    layout.uint_where("dim_a", offset, 9, valid::not(0));
    layout.uint_where("dim_b", offset + 9, 9, valid::not(0));
    layout.uint_where("dim_c", offset + 18, 6, valid::not(0));
    layout.uint_where("dim_d", offset + 24, 6, valid::not(0));
}
