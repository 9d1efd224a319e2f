//! Channel management (type 22).

use crate::sans::data::{DecodeStatus, Layout};

use super::DecodeError;

const CHANNEL_BITS: usize = 168;
/// Offset of the flag selecting addressed or regional operation.
const ADDRESSED_FLAG: usize = 139;

/// Decode a channel management command.
///
/// Addressed commands carry two destination stations where broadcast
/// commands carry the corners of a region, so the fields of the other
/// variant are missing.
pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(CHANNEL_BITS)?;

    layout.uint("spare", 38, 2);
    layout.uint("chan_a", 40, 12);
    layout.uint("chan_b", 52, 12);
    layout.uint("txrx_mode", 64, 4);
    layout.flag("power_low", 68);

    if layout.bits().bit(ADDRESSED_FLAG) {
        layout.uint("dest_mmsi_1", 69, 30);
        layout.uint("dest_mmsi_2", 104, 30);
        for name in ["lon1", "lat1", "lon2", "lat2"] {
            layout.missing(name);
        }
    } else {
        for name in ["dest_mmsi_1", "dest_mmsi_2"] {
            layout.missing(name);
        }
        layout.lon("lon1", 69, 18, 600.0);
        layout.lat("lat1", 87, 17, 600.0);
        layout.lon("lon2", 104, 18, 600.0);
        layout.lat("lat2", 122, 17, 600.0);
    }

    layout.flag("addressed", ADDRESSED_FLAG);
    layout.flag("bw_a", 140);
    layout.flag("bw_b", 141);
    layout.uint("zone_size", 142, 3);
    layout.uint("spare2", 145, 23);

    Ok(DecodeStatus::Decoded)
}
