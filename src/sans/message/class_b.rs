//! Class B equipment: position reports (type 18) and static data (type 24).

use crate::sans::data::{DecodeStatus, Layout, valid};

use super::{DecodeError, comm_state, static_voyage::dimensions};

const POSITION_BITS: usize = 168;
const STATIC_PART_A_BITS: usize = 160;
const STATIC_PART_B_BITS: usize = 162;

/// Fields carried by part A of a static data report.
const PART_A_FIELDS: &[&str] = &["name"];

/// Fields carried by part B of a static data report.
const PART_B_FIELDS: &[&str] = &[
    "type_and_cargo",
    "vendor_id",
    "model",
    "serial",
    "callsign",
    "dim_a",
    "dim_b",
    "dim_c",
    "dim_d",
    "mothership_mmsi",
    "spare",
];

pub fn decode_position(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(POSITION_BITS)?;

    layout.uint("spare", 38, 8);
    layout.scaled("sog", 46, 10, 10.0, valid::below(1022));
    layout.flag("position_accuracy", 56);
    layout.lon("lon", 57, 28, 600_000.0);
    layout.lat("lat", 85, 27, 600_000.0);
    layout.scaled("cog", 112, 12, 10.0, valid::below(3600));
    layout.uint_where("true_heading", 124, 9, valid::below(360));
    layout.uint("timestamp", 133, 6);
    layout.uint("spare2", 139, 2);
    let carrier_sense = layout.flag("unit_flag", 141);
    layout.flag("display_flag", 142);
    layout.flag("dsc_flag", 143);
    layout.flag("band_flag", 144);
    layout.flag("m22_flag", 145);
    layout.flag("mode_flag", 146);
    layout.flag("raim", 147);
    let itdma = layout.flag("commstate_flag", 148);

    // Carrier sense units transmit a fixed filler instead.
    if !carrier_sense {
        comm_state::selected(layout, 149, itdma);
    }

    Ok(DecodeStatus::Decoded)
}

/// Decode one part of a static data report.
///
/// Part A carries the name, part B everything else. Parts 2 and 3 are
/// reserved, so every field of both parts is missing.
pub fn decode_static(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(40)?;

    match layout.uint("part_num", 38, 2) {
        0 => {
            layout.require(STATIC_PART_A_BITS)?;
            layout.text("name", 40, 120);
        }
        1 => {
            layout.require(STATIC_PART_B_BITS)?;
            layout.uint_where("type_and_cargo", 40, 8, valid::not(0));
            layout.text("vendor_id", 48, 18);
            layout.uint("model", 66, 4);
            layout.uint("serial", 70, 20);
            layout.text("callsign", 90, 42);
            if is_auxiliary_craft(layout) {
                layout.uint("mothership_mmsi", 132, 30);
            } else {
                dimensions(layout, 132);
            }
            if layout.len() >= 168 {
                layout.uint("spare", 162, 6);
            }
        }
        _ => {
            for &name in PART_A_FIELDS.iter().chain(PART_B_FIELDS) {
                layout.missing(name);
            }
        }
    }

    Ok(DecodeStatus::Decoded)
}

/// Auxiliary craft carry an MMSI of the form 98XXXYYYY, and report their
/// mother ship in place of dimensions.
fn is_auxiliary_craft(layout: &Layout<'_>) -> bool {
    layout.bits().ubits(8, 30) / 10_000_000 == 98
}
