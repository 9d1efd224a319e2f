//! Environmental sensor reports (DAC 1, FI 26).
//!
//! The message carries a run of fixed-size reports, each opening with a
//! report type, a day, hour and minute stamp and a site identifier.

use crate::sans::data::{Layout, valid};

use super::{DecodeError, met_hydro::visibility, utc_day_stamp};

const FIRST_REPORT: usize = 56;
const REPORT_BITS: usize = 112;
/// Bits of the header common to every report type.
const REPORT_HEADER_BITS: usize = 27;

/// Kind of sensor report, from its leading four bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportType {
    Location,
    Station,
    Wind,
    WaterLevel,
    Current2d,
    Current3d,
    HorizontalFlow,
    SeaState,
    Salinity,
    Weather,
    AirDraught,
    Reserved,
}

impl ReportType {
    fn from_code(code: u64) -> Self {
        match code {
            0 => Self::Location,
            1 => Self::Station,
            2 => Self::Wind,
            3 => Self::WaterLevel,
            4 => Self::Current2d,
            5 => Self::Current3d,
            6 => Self::HorizontalFlow,
            7 => Self::SeaState,
            8 => Self::Salinity,
            9 => Self::Weather,
            10 => Self::AirDraught,
            _ => Self::Reserved,
        }
    }
}

pub fn decode(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(FIRST_REPORT + REPORT_BITS)?;

    layout.group("reports");
    let count = (layout.len() - FIRST_REPORT) / REPORT_BITS;
    for i in 0..count {
        let base = FIRST_REPORT + i * REPORT_BITS;
        let mut entry = layout.entry();
        report(&mut entry, base);
        layout.push("reports", entry);
    }
    Ok(())
}

/// Decode one report. Reserved report types carry only the common header.
fn report(entry: &mut Layout<'_>, base: usize) {
    let report_type = ReportType::from_code(entry.uint("report_type", base, 4));
    utc_day_stamp(entry, ["utc_day", "utc_hour", "utc_min"], base + 4);
    entry.uint("site_id", base + 20, 7);

    let body = base + REPORT_HEADER_BITS;
    match report_type {
        ReportType::Location => location(entry, body),
        ReportType::Station => {
            entry.text("name", body, 84);
            entry.uint("spare", body + 84, 1);
        }
        ReportType::Wind => wind(entry, body),
        ReportType::WaterLevel => water_level(entry, body),
        ReportType::Current2d => current_2d(entry, body),
        ReportType::Current3d => current_3d(entry, body),
        ReportType::HorizontalFlow => horizontal_flow(entry, body),
        ReportType::SeaState => sea_state(entry, body),
        ReportType::Salinity => salinity(entry, body),
        ReportType::Weather => weather(entry, body),
        ReportType::AirDraught => air_draught(entry, body),
        ReportType::Reserved => {}
    }
}

fn location(entry: &mut Layout<'_>, body: usize) {
    entry.lon("lon", body, 28, 600_000.0);
    entry.lat("lat", body + 28, 27, 600_000.0);
    entry.scaled("alt", body + 55, 12, 10.0, valid::within(0, 2000));
    entry.uint("owner", body + 67, 4);
    entry.uint("timeout", body + 71, 3);
    entry.uint("spare", body + 74, 11);
}

fn wind(entry: &mut Layout<'_>, body: usize) {
    entry.uint_where("wind_speed", body, 7, valid::below(127));
    entry.uint_where("wind_gust", body + 7, 7, valid::below(127));
    entry.uint_where("wind_dir", body + 14, 9, valid::below(360));
    entry.uint_where("wind_gust_dir", body + 23, 9, valid::below(360));
    entry.uint("sensor_type", body + 32, 3);
    entry.uint_where("wind_forecast", body + 35, 7, valid::below(127));
    entry.uint_where("wind_gust_forecast", body + 42, 7, valid::below(127));
    entry.uint_where("wind_dir_forecast", body + 49, 9, valid::below(360));
    utc_day_stamp(
        entry,
        ["utc_day_forecast", "utc_hour_forecast", "utc_min_forecast"],
        body + 58,
    );
    entry.uint("duration", body + 74, 8);
    entry.uint("spare", body + 82, 3);
}

fn water_level(entry: &mut Layout<'_>, body: usize) {
    entry.uint("water_level_type", body, 1);
    entry.signed_scaled("water_level", body + 1, 16, 100.0, |v| v != -32768);
    entry.uint_where("trend", body + 17, 2, valid::below(3));
    entry.uint("vdatum", body + 19, 5);
    entry.uint("sensor_type", body + 24, 3);
    entry.uint("forecast_type", body + 27, 1);
    entry.signed_scaled("level_forecast", body + 28, 16, 100.0, |v| v != -32768);
    utc_day_stamp(
        entry,
        ["utc_day_forecast", "utc_hour_forecast", "utc_min_forecast"],
        body + 44,
    );
    entry.uint("duration", body + 60, 8);
    entry.uint("spare", body + 68, 17);
}

fn current_2d(entry: &mut Layout<'_>, body: usize) {
    const SPEEDS: [&str; 3] = ["cur_speed_1", "cur_speed_2", "cur_speed_3"];
    const DIRS: [&str; 3] = ["cur_dir_1", "cur_dir_2", "cur_dir_3"];
    const DEPTHS: [&str; 3] = ["cur_depth_1", "cur_depth_2", "cur_depth_3"];

    for i in 0..3 {
        let start = body + i * 26;
        entry.scaled(SPEEDS[i], start, 8, 10.0, valid::within(0, 250));
        entry.uint_where(DIRS[i], start + 8, 9, valid::below(360));
        entry.uint_where(DEPTHS[i], start + 17, 9, valid::not(511));
    }
    entry.uint("sensor_type", body + 78, 3);
    entry.uint("spare", body + 81, 4);
}

fn current_3d(entry: &mut Layout<'_>, body: usize) {
    const NORTHS: [&str; 2] = ["cur_north_1", "cur_north_2"];
    const EASTS: [&str; 2] = ["cur_east_1", "cur_east_2"];
    const UPS: [&str; 2] = ["cur_up_1", "cur_up_2"];
    const DEPTHS: [&str; 2] = ["cur_depth_1", "cur_depth_2"];

    for i in 0..2 {
        let start = body + i * 33;
        entry.scaled(NORTHS[i], start, 8, 10.0, valid::within(0, 250));
        entry.scaled(EASTS[i], start + 8, 8, 10.0, valid::within(0, 250));
        entry.scaled(UPS[i], start + 16, 8, 10.0, valid::within(0, 250));
        entry.uint_where(DEPTHS[i], start + 24, 9, valid::not(511));
    }
    entry.uint("sensor_type", body + 66, 3);
    entry.uint("spare", body + 69, 16);
}

fn horizontal_flow(entry: &mut Layout<'_>, body: usize) {
    const BEARINGS: [&str; 2] = ["bearing_1", "bearing_2"];
    const DISTS: [&str; 2] = ["dist_1", "dist_2"];
    const SPEEDS: [&str; 2] = ["cur_speed_1", "cur_speed_2"];
    const DIRS: [&str; 2] = ["cur_dir_1", "cur_dir_2"];
    const LEVELS: [&str; 2] = ["cur_level_1", "cur_level_2"];

    for i in 0..2 {
        let start = body + i * 42;
        entry.uint_where(BEARINGS[i], start, 9, valid::below(360));
        entry.uint_where(DISTS[i], start + 9, 7, valid::not(127));
        entry.scaled(SPEEDS[i], start + 16, 8, 10.0, valid::within(0, 250));
        entry.uint_where(DIRS[i], start + 24, 9, valid::below(360));
        entry.uint_where(LEVELS[i], start + 33, 9, valid::not(511));
    }
    entry.uint("spare", body + 84, 1);
}

fn sea_state(entry: &mut Layout<'_>, body: usize) {
    entry.scaled("swell_height", body, 8, 10.0, valid::within(0, 250));
    entry.uint_where("swell_period", body + 8, 6, valid::below(61));
    entry.uint_where("swell_dir", body + 14, 9, valid::below(360));
    entry.uint_where("sea_state", body + 23, 4, valid::below(13));
    entry.uint("swell_sensor_type", body + 27, 3);
    entry.signed_scaled("water_temp", body + 30, 10, 10.0, |v| (-100..=500).contains(&v));
    entry.scaled("water_temp_depth", body + 40, 7, 10.0, valid::not(127));
    entry.uint("water_sensor_type", body + 47, 3);
    entry.scaled("wave_height", body + 50, 8, 10.0, valid::within(0, 250));
    entry.uint_where("wave_period", body + 58, 6, valid::below(61));
    entry.uint_where("wave_dir", body + 64, 9, valid::below(360));
    entry.uint("wave_sensor_type", body + 73, 3);
    entry.scaled("salinity", body + 76, 9, 10.0, valid::within(0, 500));
}

fn salinity(entry: &mut Layout<'_>, body: usize) {
    entry.biased("water_temp", body, 10, 10.0, -10.0, valid::within(0, 600));
    entry.scaled("conductivity", body + 10, 10, 100.0, valid::within(0, 700));
    entry.scaled("pressure", body + 20, 16, 10.0, valid::within(0, 60000));
    entry.scaled("salinity", body + 36, 9, 10.0, valid::within(0, 500));
    entry.uint("salinity_type", body + 45, 2);
    entry.uint("sensor_type", body + 47, 3);
    entry.uint("spare", body + 50, 32);
    entry.uint("spare2", body + 82, 3);
}

fn weather(entry: &mut Layout<'_>, body: usize) {
    entry.signed_scaled("air_temp", body, 11, 10.0, |v| (-600..=600).contains(&v));
    entry.uint("air_temp_sensor_type", body + 11, 3);
    entry.uint_where("precip", body + 14, 2, valid::below(3));
    visibility(entry, ["horz_vis_greater", "horz_vis"], body + 16);
    entry.signed_scaled("dew_point", body + 24, 10, 10.0, |v| (-200..=500).contains(&v));
    entry.uint("dew_point_type", body + 34, 3);
    entry.biased("air_pressure", body + 37, 9, 1.0, 799.0, valid::within(0, 402));
    entry.uint_where("air_pressure_trend", body + 46, 2, valid::below(3));
    entry.uint("air_pressure_sensor_type", body + 48, 3);
    entry.scaled("salinity", body + 51, 9, 10.0, valid::within(0, 500));
    entry.uint("spare", body + 60, 25);
}

fn air_draught(entry: &mut Layout<'_>, body: usize) {
    entry.scaled("draught", body, 13, 100.0, valid::not(0));
    entry.scaled("gap", body + 13, 13, 10.0, valid::not(0));
    entry.uint_where("trend", body + 26, 2, valid::below(3));
    entry.scaled("forecast_gap", body + 28, 13, 10.0, valid::not(0));
    utc_day_stamp(
        entry,
        ["utc_day_forecast", "utc_hour_forecast", "utc_min_forecast"],
        body + 41,
    );
    entry.uint("spare", body + 57, 28);
}
