//! Assignment mode commands (type 16) and group assignments (type 23).

use crate::sans::data::{DecodeStatus, Layout, valid};

use super::DecodeError;

/// Length of a command carrying a second station.
const PAIRED_BITS: usize = 144;

pub fn decode_assignment(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(92)?;

    layout.uint("spare", 38, 2);
    layout.uint("dest_mmsi_a", 40, 30);
    layout.uint("offset_a", 70, 12);
    layout.uint("inc_a", 82, 10);

    if layout.len() >= PAIRED_BITS {
        layout.uint("dest_mmsi_b", 92, 30);
        layout.uint("offset_b", 122, 12);
        layout.uint("inc_b", 134, 10);
    } else {
        for name in ["dest_mmsi_b", "offset_b", "inc_b"] {
            layout.missing(name);
        }
        layout.uint("spare2", 92, 4);
    }

    Ok(DecodeStatus::Decoded)
}

pub fn decode_group_assignment(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(160)?;

    layout.uint("spare", 38, 2);
    layout.lon("lon1", 40, 18, 600.0);
    layout.lat("lat1", 58, 17, 600.0);
    layout.lon("lon2", 75, 18, 600.0);
    layout.lat("lat2", 93, 17, 600.0);
    layout.uint("station_type", 110, 4);
    layout.uint_where("type_and_cargo", 114, 8, valid::not(0));
    layout.uint("spare2", 122, 22);
    layout.uint("txrx_mode", 144, 2);
    layout.uint("interval", 146, 4);
    layout.uint("quiet", 150, 4);
    layout.uint("spare3", 154, 6);

    Ok(DecodeStatus::Decoded)
}
