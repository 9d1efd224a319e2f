//! Aid to navigation reports (type 21).

use crate::sans::data::{DecodeStatus, Layout, valid};

use super::{DecodeError, static_voyage::dimensions};

const ATON_BITS: usize = 272;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(ATON_BITS)?;

    layout.uint_where("aton_type", 38, 5, valid::not(0));
    layout.text("name", 43, 120);
    layout.flag("position_accuracy", 163);
    layout.lon("lon", 164, 28, 600_000.0);
    layout.lat("lat", 192, 27, 600_000.0);
    dimensions(layout, 219);
    layout.uint_where("fix_type", 249, 4, valid::not(0));
    layout.uint("timestamp", 253, 6);
    layout.flag("off_position", 259);
    layout.uint("aton_status", 260, 8);
    layout.flag("raim", 268);
    layout.flag("virtual_aton", 269);
    layout.flag("assigned_mode", 270);
    layout.uint("spare", 271, 1);

    if layout.len() >= ATON_BITS + 6 {
        layout.text_to_end("name_extension", ATON_BITS);
    } else {
        layout.missing("name_extension");
    }

    Ok(DecodeStatus::Decoded)
}
