//! Standard search and rescue aircraft position reports (type 9).

use crate::sans::data::{DecodeStatus, Layout, valid};

use super::{DecodeError, comm_state};

const SAR_BITS: usize = 168;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(SAR_BITS)?;

    layout.uint_where("alt", 38, 12, valid::not(4095));
    layout.uint_where("sog", 50, 10, valid::not(1023));
    layout.flag("position_accuracy", 60);
    layout.lon("lon", 61, 28, 600_000.0);
    layout.lat("lat", 89, 27, 600_000.0);
    layout.scaled("cog", 116, 12, 10.0, valid::below(3600));
    layout.uint("timestamp", 128, 6);
    layout.flag("alt_sensor", 134);
    layout.uint("spare", 135, 7);
    layout.flag("dte", 142);
    layout.uint("spare2", 143, 3);
    layout.flag("assigned_mode", 146);
    layout.flag("raim", 147);
    let itdma = layout.flag("commstate_flag", 148);
    comm_state::selected(layout, 149, itdma);

    Ok(DecodeStatus::Decoded)
}
