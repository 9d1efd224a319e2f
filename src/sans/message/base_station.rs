//! Base station reports (type 4) and UTC responses (type 11).

use crate::sans::data::{DecodeStatus, Layout, valid};

use super::{DecodeError, comm_state};

const BASE_STATION_BITS: usize = 168;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(BASE_STATION_BITS)?;

    layout.uint_where("year", 38, 14, valid::not(0));
    layout.uint_where("month", 52, 4, valid::within(1, 12));
    layout.uint_where("day", 56, 5, valid::not(0));
    layout.uint_where("hour", 61, 5, valid::below(24));
    layout.uint_where("minute", 66, 6, valid::below(60));
    layout.uint_where("second", 72, 6, valid::below(60));
    layout.flag("position_accuracy", 78);
    layout.lon("lon", 79, 28, 600_000.0);
    layout.lat("lat", 107, 27, 600_000.0);
    layout.uint_where("fix_type", 134, 4, valid::not(0));
    layout.flag("transmission_ctl", 138);
    layout.uint("spare", 139, 9);
    layout.flag("raim", 148);
    comm_state::sotdma(layout, 149);

    Ok(DecodeStatus::Decoded)
}
