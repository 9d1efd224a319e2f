//! Broadcast binary messages (type 8) and their international applications.
//!
//! Meteorological, area notice, sensor and inland waterway applications
//! live in their own modules.

use crate::sans::{
    data::{DecodeStatus, Layout, valid},
    header::ApplicationId,
};

use super::{DecodeError, area_notice, inland, met_hydro, sensor_report, utc_stamp};

/// Bits through the application identifier.
const COMMON_BITS: usize = 56;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(COMMON_BITS)?;

    layout.uint("spare", 38, 2);
    layout.uint("dac", 40, 10);
    layout.uint("fi", 50, 6);

    let ApplicationId { dac, fi } = ApplicationId::read(layout.bits(), 40);

    match (dac, fi) {
        (1, 0) => text_telegram(layout)?,
        (1, 11) => met_hydro::decode_old(layout)?,
        (1, 13) => fairway_closed(layout)?,
        (1, 15) => air_draught(layout)?,
        (1, 16) => persons_on_board(layout)?,
        (1, 17) => vts_targets(layout)?,
        (1, 19) => traffic_signal(layout)?,
        (1, 22) => area_notice::decode(layout)?,
        (1, 24) => extended_voyage(layout)?,
        (1, 26) => sensor_report::decode(layout)?,
        (1, 27) => route_information(layout)?,
        (1, 29) => text_description(layout)?,
        (1, 31) => met_hydro::decode(layout)?,
        (200, 10) => inland::static_voyage(layout)?,
        (200, 24) => inland::water_levels(layout)?,
        (200, 40) => inland::signal_status(layout)?,
        (200, 55) => inland::persons_on_board(layout)?,
        _ => return Ok(DecodeStatus::UnknownApplication),
    }

    Ok(DecodeStatus::Decoded)
}

fn text_telegram(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(68)?;

    layout.flag("ack_required", 56);
    layout.uint("msg_seq", 57, 11);
    layout.text_to_end("text", 68);
    Ok(())
}

/// Fairway closed, between two named locations.
fn fairway_closed(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(468)?;

    layout.text("reason", 56, 120);
    layout.text("location_from", 176, 120);
    layout.text("location_to", 296, 120);
    layout.uint_where("radius", 416, 10, valid::below(1001));
    layout.uint("units", 426, 2);
    layout.uint_where("day_from", 428, 5, valid::not(0));
    layout.uint_where("month_from", 433, 4, valid::within(1, 12));
    layout.uint_where("hour_from", 437, 5, valid::below(24));
    layout.uint_where("minute_from", 442, 6, valid::below(60));
    layout.uint_where("day_to", 448, 5, valid::not(0));
    layout.uint_where("month_to", 453, 4, valid::within(1, 12));
    layout.uint_where("hour_to", 457, 5, valid::below(24));
    layout.uint_where("minute_to", 462, 6, valid::below(60));
    if layout.len() >= 472 {
        layout.uint("spare2", 468, 4);
    }
    Ok(())
}

/// Extended ship static and voyage data, air draught only.
fn air_draught(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(72)?;

    layout.scaled("air_draught", 56, 11, 10.0, valid::not(0));
    layout.uint("spare2", 67, 5);
    Ok(())
}

fn persons_on_board(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(72)?;

    layout.uint_where("persons", 56, 13, valid::not(0));
    layout.uint("spare2", 69, 3);
    Ok(())
}

/// VTS generated or synthetic targets, up to four per message.
fn vts_targets(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    const FIRST_TARGET: usize = 56;
    const TARGET_BITS: usize = 120;
    layout.require(FIRST_TARGET + TARGET_BITS)?;

    layout.group("targets");
    let count = ((layout.len() - FIRST_TARGET) / TARGET_BITS).min(4);
    for i in 0..count {
        let base = FIRST_TARGET + i * TARGET_BITS;
        let mut entry = layout.entry();
        entry.uint("type", base, 2);
        entry.text("id", base + 2, 42);
        entry.uint("spare", base + 44, 4);
        entry.lat("lat", base + 48, 24, 60_000.0);
        entry.lon("lon", base + 72, 25, 60_000.0);
        entry.uint_where("cog", base + 97, 9, valid::below(360));
        entry.uint_where("timestamp", base + 106, 6, valid::below(60));
        entry.uint_where("sog", base + 112, 8, valid::not(255));
        layout.push("targets", entry);
    }
    Ok(())
}

fn traffic_signal(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(258)?;

    layout.uint("link_id", 56, 10);
    layout.text("name", 66, 120);
    layout.lon("lon", 186, 25, 60_000.0);
    layout.lat("lat", 211, 24, 60_000.0);
    layout.uint_where("status", 235, 2, valid::not(0));
    layout.uint_where("signal", 237, 5, valid::not(0));
    layout.uint_where("utc_hour_next", 242, 5, valid::below(24));
    layout.uint_where("utc_min_next", 247, 6, valid::below(60));
    layout.uint_where("next_signal", 253, 5, valid::not(0));
    Ok(())
}

/// Extended ship static and voyage related data.
fn extended_voyage(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(350)?;

    layout.uint("link_id", 56, 10);
    layout.scaled("air_draught", 66, 13, 10.0, valid::not(0));
    layout.text("last_port", 79, 30);
    layout.text("next_port_1", 109, 30);
    layout.text("next_port_2", 139, 30);

    layout.group("solas_status");
    for i in 0..26 {
        let mut entry = layout.entry();
        entry.uint_where("status", 169 + i * 2, 2, valid::not(0));
        layout.push("solas_status", entry);
    }

    layout.uint_where("ice_class", 221, 4, valid::not(15));
    layout.uint_where("shaft_power", 225, 18, valid::not(0));
    layout.uint_where("vhf", 243, 12, valid::not(0));
    layout.text("lloyds_ship_type", 255, 42);
    layout.uint_where("gross_tonnage", 297, 18, valid::not(0));
    layout.uint_where("laden_ballast", 315, 2, valid::not(0));
    layout.uint_where("heavy_oil", 317, 2, valid::not(0));
    layout.uint_where("light_oil", 319, 2, valid::not(0));
    layout.uint_where("diesel", 321, 2, valid::not(0));
    layout.uint_where("bunker_oil", 323, 14, valid::not(0));
    layout.uint_where("persons", 337, 13, valid::not(0));
    if layout.len() >= 360 {
        layout.uint("spare2", 350, 10);
    }
    Ok(())
}

/// Route information broadcast, a list of up to sixteen waypoints.
fn route_information(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    const FIRST_WAYPOINT: usize = 117;
    const WAYPOINT_BITS: usize = 55;
    layout.require(FIRST_WAYPOINT)?;

    layout.uint("link_id", 56, 10);
    layout.uint("sender_type", 66, 3);
    layout.uint("route_type", 69, 5);
    utc_stamp(layout, ["utc_month", "utc_day", "utc_hour", "utc_min"], 74);
    layout.uint("duration", 94, 18);
    layout.uint("num_waypoints", 112, 5);

    layout.group("waypoints");
    let count = ((layout.len() - FIRST_WAYPOINT) / WAYPOINT_BITS).min(16);
    for i in 0..count {
        let base = FIRST_WAYPOINT + i * WAYPOINT_BITS;
        let mut entry = layout.entry();
        entry.lon("lon", base, 28, 600_000.0);
        entry.lat("lat", base + 28, 27, 600_000.0);
        layout.push("waypoints", entry);
    }
    Ok(())
}

fn text_description(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(72)?;

    layout.uint("link_id", 56, 10);
    layout.text_to_end("text", 66);
    Ok(())
}
