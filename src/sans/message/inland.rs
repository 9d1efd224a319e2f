//! River information services applications (DAC 200).

use crate::sans::data::{DecodedField, Layout, valid};

use super::DecodeError;

/// Inland ship static and voyage related data.
pub fn static_voyage(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(168)?;

    layout.text("eu_id", 56, 48);
    layout.scaled("length", 104, 13, 10.0, valid::not(0));
    layout.scaled("beam", 117, 10, 10.0, valid::not(0));
    layout.uint_where("ship_type", 127, 14, valid::not(0));
    layout.uint_where("haz_cargo", 141, 3, valid::below(5));
    layout.scaled("draught", 144, 11, 10.0, valid::not(0));
    layout.uint_where("loaded", 155, 2, valid::within(1, 2));
    layout.flag("speed_qual", 157);
    layout.flag("course_qual", 158);
    layout.flag("heading_qual", 159);
    layout.uint("spare2", 160, 8);
    Ok(())
}

/// Water levels at up to four gauges, in centimetres.
pub fn water_levels(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    const FIRST_GAUGE: usize = 68;
    const GAUGE_BITS: usize = 25;
    layout.require(FIRST_GAUGE + 4 * GAUGE_BITS)?;

    layout.text("country", 56, 12);

    layout.group("gauges");
    for i in 0..4 {
        let base = FIRST_GAUGE + i * GAUGE_BITS;
        let mut entry = layout.entry();
        let gauge_id = entry.uint_where("gauge_id", base, 11, valid::not(0));
        // The sign bit is set for positive levels.
        let positive = entry.bits().bit(base + 11);
        let magnitude = entry.bits().ubits(base + 12, 13) as i64;
        let level = match gauge_id {
            Some(_) => DecodedField::Integer(if positive { magnitude } else { -magnitude }),
            None => DecodedField::Missing,
        };
        entry.set("level", level);
        layout.push("gauges", entry);
    }
    Ok(())
}

/// Signal status at a signal station.
pub fn signal_status(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(168)?;

    layout.lon("lon", 56, 28, 600_000.0);
    layout.lat("lat", 84, 27, 600_000.0);
    layout.uint_where("form", 111, 4, valid::not(0));
    layout.uint_where("dir", 115, 9, valid::below(360));
    layout.uint_where("stream_dir", 124, 3, valid::not(0));
    layout.uint("status_raw", 127, 30);
    layout.uint("spare2", 157, 11);
    Ok(())
}

/// Number of persons on board an inland vessel.
pub fn persons_on_board(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(88)?;

    layout.uint_where("crew", 56, 8, valid::not(255));
    layout.uint_where("passengers", 64, 13, valid::not(8191));
    layout.uint_where("yet_more_personnel", 77, 8, valid::not(255));
    Ok(())
}
