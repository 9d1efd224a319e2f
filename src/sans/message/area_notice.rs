//! Area notices (DAC 1, FI 22), a notice header followed by sub-areas of
//! several shapes.

use crate::sans::data::{DecodedField, Layout, valid};

use super::{DecodeError, utc_stamp};

const FIRST_SUB_AREA: usize = 111;
const SUB_AREA_BITS: usize = 87;

/// Multipliers selected by a sub-area's two-bit scale factor.
const SCALE_MULTIPLIERS: [u64; 4] = [1, 10, 100, 1000];

/// Shape of a sub-area, from its leading three bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AreaShape {
    Circle,
    Rectangle,
    Sector,
    Polyline,
    Polygon,
    Text,
    Reserved,
}

impl AreaShape {
    fn from_code(code: u64) -> Self {
        match code {
            0 => Self::Circle,
            1 => Self::Rectangle,
            2 => Self::Sector,
            3 => Self::Polyline,
            4 => Self::Polygon,
            5 => Self::Text,
            _ => Self::Reserved,
        }
    }
}

pub fn decode(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(FIRST_SUB_AREA)?;

    layout.uint("link_id", 56, 10);
    layout.uint_where("notice_type", 66, 7, valid::below(127));
    utc_stamp(layout, ["month", "day", "hour", "minute"], 73);
    layout.uint("duration_minutes", 93, 18);

    layout.group("sub_areas");
    let count = (layout.len() - FIRST_SUB_AREA) / SUB_AREA_BITS;
    for i in 0..count {
        let base = FIRST_SUB_AREA + i * SUB_AREA_BITS;
        let mut entry = layout.entry();
        sub_area(&mut entry, base);
        layout.push("sub_areas", entry);
    }
    Ok(())
}

/// Decode one sub-area. Reserved shapes carry only the shape code.
fn sub_area(entry: &mut Layout<'_>, base: usize) {
    let shape = AreaShape::from_code(entry.uint("area_shape", base, 3));

    match shape {
        AreaShape::Circle => {
            let multiplier = scale(entry, base);
            anchor(entry, base);
            scaled_distance(entry, "radius", base + 57, 12, multiplier);
            entry.uint("spare", base + 69, 18);
        }
        AreaShape::Rectangle => {
            let multiplier = scale(entry, base);
            anchor(entry, base);
            scaled_distance(entry, "e_dim", base + 57, 8, multiplier);
            scaled_distance(entry, "n_dim", base + 65, 8, multiplier);
            entry.uint_where("orient_deg", base + 73, 9, valid::below(360));
            entry.uint("spare", base + 82, 5);
        }
        AreaShape::Sector => {
            let multiplier = scale(entry, base);
            anchor(entry, base);
            scaled_distance(entry, "radius", base + 57, 12, multiplier);
            entry.uint_where("left_bound_deg", base + 69, 9, valid::below(360));
            entry.uint_where("right_bound_deg", base + 78, 9, valid::below(360));
        }
        AreaShape::Polyline | AreaShape::Polygon => {
            const ANGLES: [&str; 4] = ["angle_1", "angle_2", "angle_3", "angle_4"];
            const DISTS: [&str; 4] = ["dist_1", "dist_2", "dist_3", "dist_4"];

            let multiplier = scale(entry, base);
            for (i, (angle, dist)) in ANGLES.into_iter().zip(DISTS).enumerate() {
                let point = base + 5 + i * 20;
                entry.scaled(angle, point, 10, 2.0, valid::below(720));
                scaled_distance(entry, dist, point + 10, 10, multiplier);
            }
            entry.uint("spare", base + 85, 2);
        }
        AreaShape::Text => {
            entry.text("text", base + 3, 84);
        }
        AreaShape::Reserved => {}
    }
}

/// Read the scale factor, returning its distance multiplier.
fn scale(entry: &mut Layout<'_>, base: usize) -> u64 {
    let factor = entry.uint("scale_factor", base + 3, 2);
    SCALE_MULTIPLIERS[factor as usize]
}

/// Position and precision of a circle, rectangle or sector.
fn anchor(entry: &mut Layout<'_>, base: usize) {
    entry.lon("lon", base + 5, 25, 60_000.0);
    entry.lat("lat", base + 30, 24, 60_000.0);
    entry.uint("precision", base + 54, 3);
}

/// Read a distance in metres, scaled by the sub-area's multiplier.
fn scaled_distance(
    entry: &mut Layout<'_>,
    name: &'static str,
    offset: usize,
    width: usize,
    multiplier: u64,
) {
    let raw = entry.bits().ubits(offset, width);
    entry.set(name, DecodedField::Integer((raw * multiplier) as i64));
}
