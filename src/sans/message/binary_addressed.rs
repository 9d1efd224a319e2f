//! Addressed binary messages (type 6) and their international applications.

use crate::sans::{
    data::{DecodeStatus, DecodedField, Layout, valid},
    header::ApplicationId,
};

use super::{DecodeError, utc_stamp};

/// Bits through the application identifier.
const COMMON_BITS: usize = 88;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(COMMON_BITS)?;

    layout.uint("seq", 38, 2);
    layout.uint("mmsi_dest", 40, 30);
    layout.flag("retransmit", 70);
    layout.uint("spare", 71, 1);
    layout.uint("dac", 72, 10);
    layout.uint("fi", 82, 6);

    let ApplicationId { dac, fi } = ApplicationId::read(layout.bits(), 72);

    match (dac, fi) {
        (0, 0) => monitoring(layout)?,
        (1, 0) => text_telegram(layout)?,
        (1, 1) => application_ack(layout)?,
        (1, 2) => function_interrogation(layout)?,
        (1, 3) => capability_interrogation(layout)?,
        (1, 4) => capability_reply(layout)?,
        (1, 5) => function_ack(layout)?,
        (1, 14) => tidal_window(layout, TIDAL_WINDOW_OLD)?,
        (1, 18) => clearance_time(layout)?,
        (1, 20) => berthing_data(layout)?,
        (1, 25) => dangerous_cargo(layout)?,
        (1, 32) => tidal_window(layout, TIDAL_WINDOW)?,
        (1, 40) => persons_on_board(layout)?,
        _ => return Ok(DecodeStatus::UnknownApplication),
    }

    Ok(DecodeStatus::Decoded)
}

/// AtoN monitoring data, as used in the UK and Republic of Ireland.
fn monitoring(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(136)?;

    layout.uint("sub_id", 88, 16);
    layout.scaled("voltage", 104, 12, 10.0, valid::any);
    layout.scaled("current", 116, 10, 10.0, valid::any);
    layout.flag("dc_power_supply", 126);
    layout.flag("light_on", 127);
    layout.flag("battery_low", 128);
    layout.flag("off_position", 129);
    layout.uint("spare2", 130, 6);
    Ok(())
}

fn text_telegram(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(100)?;

    layout.flag("ack_required", 88);
    layout.uint("msg_seq", 89, 11);
    layout.text_to_end("text", 100);
    Ok(())
}

fn application_ack(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(112)?;

    layout.uint("ack_dac", 88, 10);
    layout.uint("msg_seq", 98, 11);
    layout.uint("spare2", 109, 3);
    Ok(())
}

fn function_interrogation(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(104)?;

    layout.uint("req_dac", 88, 10);
    layout.uint("req_fi", 98, 6);
    Ok(())
}

fn capability_interrogation(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(104)?;

    layout.uint("req_dac", 88, 10);
    layout.uint("spare2", 98, 6);
    Ok(())
}

/// Capability reply, one entry per function identifier of the DAC.
fn capability_reply(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(232)?;

    layout.uint("ack_dac", 88, 10);
    layout.group("capabilities");
    for fi in 0..64 {
        let offset = 98 + fi * 2;
        let mut entry = layout.entry();
        entry.set("fi", DecodedField::Integer(fi as i64));
        entry.flag("available", offset);
        entry.uint("reserved", offset + 1, 1);
        layout.push("capabilities", entry);
    }
    layout.uint("spare2", 226, 6);
    Ok(())
}

fn function_ack(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(168)?;

    layout.uint("ack_dac", 88, 10);
    layout.uint("ack_fi", 98, 6);
    layout.uint("seq_num", 104, 11);
    layout.flag("ai_available", 115);
    layout.uint("ai_response", 116, 3);
    layout.uint("spare2", 119, 32);
    layout.uint("spare3", 151, 17);
    Ok(())
}

/// Shape of one tidal window entry.
struct TidalWindowLayout {
    entry_bits: usize,
    lat: (usize, usize),
    lon: (usize, usize),
    per_degree: f64,
    times: usize,
    cur_dir: usize,
    cur_speed: (usize, usize),
    /// Exclusive limit of valid raw speeds.
    speed_limit: u64,
}

/// IMO Circ 236 tidal window, latitude first.
const TIDAL_WINDOW_OLD: TidalWindowLayout = TidalWindowLayout {
    entry_bits: 93,
    lat: (0, 27),
    lon: (27, 28),
    per_degree: 600_000.0,
    times: 55,
    cur_dir: 77,
    cur_speed: (86, 7),
    speed_limit: 127,
};

/// IMO Circ 289 tidal window, longitude first.
const TIDAL_WINDOW: TidalWindowLayout = TidalWindowLayout {
    entry_bits: 88,
    lat: (25, 24),
    lon: (0, 25),
    per_degree: 60_000.0,
    times: 49,
    cur_dir: 71,
    cur_speed: (80, 8),
    speed_limit: 251,
};

/// Tidal windows, up to three entries following the date.
fn tidal_window(layout: &mut Layout<'_>, shape: TidalWindowLayout) -> Result<(), DecodeError> {
    const FIRST_WINDOW: usize = 97;
    layout.require(FIRST_WINDOW + shape.entry_bits)?;

    layout.uint_where("utc_month", 88, 4, valid::within(1, 12));
    layout.uint_where("utc_day", 92, 5, valid::not(0));

    layout.group("windows");
    let count = ((layout.len() - FIRST_WINDOW) / shape.entry_bits).min(3);
    for i in 0..count {
        let base = FIRST_WINDOW + i * shape.entry_bits;
        let mut entry = layout.entry();
        entry.lon("lon", base + shape.lon.0, shape.lon.1, shape.per_degree);
        entry.lat("lat", base + shape.lat.0, shape.lat.1, shape.per_degree);
        let times = base + shape.times;
        entry.uint_where("from_utc_hour", times, 5, valid::below(24));
        entry.uint_where("from_utc_min", times + 5, 6, valid::below(60));
        entry.uint_where("to_utc_hour", times + 11, 5, valid::below(24));
        entry.uint_where("to_utc_min", times + 16, 6, valid::below(60));
        entry.uint_where("cur_dir", base + shape.cur_dir, 9, valid::below(360));
        let (offset, width) = shape.cur_speed;
        entry.scaled("cur_speed", base + offset, width, 10.0, valid::below(shape.speed_limit));
        layout.push("windows", entry);
    }
    Ok(())
}

/// Clearance time to enter port.
fn clearance_time(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(317)?;

    layout.uint("link_id", 88, 10);
    utc_stamp(layout, ["utc_month", "utc_day", "utc_hour", "utc_min"], 98);
    layout.text("port_berth", 118, 120);
    layout.text("dest", 238, 30);
    layout.lon("lon", 268, 25, 60_000.0);
    layout.lat("lat", 293, 24, 60_000.0);
    if layout.len() >= 360 {
        layout.uint("spare2", 317, 32);
        layout.uint("spare3", 349, 11);
    }
    Ok(())
}

/// Berthing data, with the availability of 26 port services.
fn berthing_data(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(360)?;

    layout.uint("link_id", 88, 10);
    layout.uint_where("berth_length", 98, 9, valid::not(0));
    layout.scaled("berth_depth", 107, 8, 10.0, valid::not(0));
    layout.uint_where("mooring_position", 115, 3, valid::not(0));
    utc_stamp(layout, ["utc_month", "utc_day", "utc_hour", "utc_min"], 118);
    layout.flag("services_known", 138);

    layout.group("services");
    for i in 0..26 {
        let mut entry = layout.entry();
        entry.set("service", DecodedField::Integer(i as i64));
        entry.uint("status", 139 + i * 2, 2);
        layout.push("services", entry);
    }

    layout.text("name", 191, 120);
    layout.lon("lon", 311, 25, 60_000.0);
    layout.lat("lat", 336, 24, 60_000.0);
    Ok(())
}

/// Dangerous cargo indication, a list of 17-bit cargo entries.
fn dangerous_cargo(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    const FIRST_CARGO: usize = 100;
    const CARGO_BITS: usize = 17;
    layout.require(FIRST_CARGO + CARGO_BITS)?;

    layout.uint("amount_unit", 88, 2);
    layout.uint("amount", 90, 10);

    layout.group("cargos");
    let count = (layout.len() - FIRST_CARGO) / CARGO_BITS;
    for i in 0..count {
        let base = FIRST_CARGO + i * CARGO_BITS;
        let mut entry = layout.entry();
        let code_type = entry.uint("code_type", base, 4);
        let body = base + 4;
        match code_type {
            1 => {
                entry.uint("imdg", body, 7);
                entry.uint("spare", body + 7, 6);
            }
            2 => {
                entry.uint("un", body, 13);
            }
            3 => {
                entry.uint("bc", body, 3);
                entry.uint("imdg", body + 3, 7);
                entry.uint("spare", body + 10, 3);
            }
            4 => {
                entry.uint("marpol_oil", body, 4);
                entry.uint("spare", body + 4, 9);
            }
            5 => {
                entry.uint("marpol_cat", body, 3);
                entry.uint("spare", body + 3, 10);
            }
            _ => {}
        }
        layout.push("cargos", entry);
    }
    Ok(())
}

fn persons_on_board(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(104)?;

    layout.uint_where("persons", 88, 13, valid::not(0));
    layout.uint("spare2", 101, 3);
    Ok(())
}
