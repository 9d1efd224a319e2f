//! Meteorological and hydrographic data, the IMO Circ 236 layout (DAC 1,
//! FI 11) and its IMO Circ 289 successor (DAC 1, FI 31).

use crate::sans::data::{Layout, valid};

use super::{DecodeError, utc_day_stamp};

const OLD_BITS: usize = 352;
const CURRENT_BITS: usize = 360;

/// Decode the superseded layout, which carries latitude first.
pub fn decode_old(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(OLD_BITS)?;

    layout.lat("lat", 56, 24, 60_000.0);
    layout.lon("lon", 80, 25, 60_000.0);
    utc_day_stamp(layout, ["utc_day", "utc_hour", "utc_min"], 105);
    layout.uint_where("wind_ave", 121, 7, valid::below(127));
    layout.uint_where("wind_gust", 128, 7, valid::below(127));
    layout.uint_where("wind_dir", 135, 9, valid::below(360));
    layout.uint_where("wind_gust_dir", 144, 9, valid::below(360));
    layout.biased("air_temp", 153, 11, 10.0, -60.0, valid::within(0, 1200));
    layout.uint_where("rel_humid", 164, 7, valid::within(0, 100));
    layout.biased("dew_point", 171, 10, 10.0, -20.0, valid::within(0, 700));
    layout.biased("air_pres", 181, 9, 1.0, 800.0, valid::within(0, 400));
    layout.uint_where("air_pres_trend", 190, 2, valid::below(3));
    layout.scaled("horz_vis", 192, 8, 10.0, valid::within(0, 250));
    layout.biased("water_level", 200, 9, 10.0, -10.0, valid::within(0, 400));
    layout.uint_where("water_level_trend", 209, 2, valid::below(3));
    layout.scaled("surf_cur_speed", 211, 8, 10.0, valid::within(0, 250));
    layout.uint_where("surf_cur_dir", 219, 9, valid::below(360));
    layout.scaled("cur_speed_2", 228, 8, 10.0, valid::within(0, 250));
    layout.uint_where("cur_dir_2", 236, 9, valid::below(360));
    layout.uint_where("cur_depth_2", 245, 5, valid::below(31));
    layout.scaled("cur_speed_3", 250, 8, 10.0, valid::within(0, 250));
    layout.uint_where("cur_dir_3", 258, 9, valid::below(360));
    layout.uint_where("cur_depth_3", 267, 5, valid::below(31));
    layout.scaled("wave_height", 272, 8, 10.0, valid::within(0, 250));
    layout.uint_where("wave_period", 280, 6, valid::below(61));
    layout.uint_where("wave_dir", 286, 9, valid::below(360));
    layout.scaled("swell_height", 295, 8, 10.0, valid::within(0, 250));
    layout.uint_where("swell_period", 303, 6, valid::below(61));
    layout.uint_where("swell_dir", 309, 9, valid::below(360));
    layout.uint_where("sea_state", 318, 4, valid::below(13));
    layout.biased("water_temp", 322, 10, 10.0, -10.0, valid::within(0, 600));
    layout.uint_where("precip_type", 332, 3, valid::below(7));
    layout.scaled("salinity", 335, 9, 10.0, valid::within(0, 500));
    layout.uint_where("ice", 344, 2, valid::below(3));
    layout.uint("spare2", 346, 6);
    Ok(())
}

/// Decode the current layout, which carries longitude first and signed
/// temperatures.
pub fn decode(layout: &mut Layout<'_>) -> Result<(), DecodeError> {
    layout.require(CURRENT_BITS)?;

    layout.lon("lon", 56, 25, 60_000.0);
    layout.lat("lat", 81, 24, 60_000.0);
    layout.flag("position_accuracy", 105);
    utc_day_stamp(layout, ["utc_day", "utc_hour", "utc_min"], 106);
    layout.uint_where("wind_ave", 122, 7, valid::below(127));
    layout.uint_where("wind_gust", 129, 7, valid::below(127));
    layout.uint_where("wind_dir", 136, 9, valid::below(360));
    layout.uint_where("wind_gust_dir", 145, 9, valid::below(360));
    layout.signed_scaled("air_temp", 154, 11, 10.0, |v| (-600..=600).contains(&v));
    layout.uint_where("rel_humid", 165, 7, valid::within(0, 100));
    layout.signed_scaled("dew_point", 172, 10, 10.0, |v| (-200..=500).contains(&v));
    layout.biased("air_pres", 182, 9, 1.0, 799.0, valid::within(0, 402));
    layout.uint_where("air_pres_trend", 191, 2, valid::below(3));
    visibility(layout, ["horz_vis_greater", "horz_vis"], 193);
    layout.biased("water_level", 201, 12, 100.0, -10.0, valid::within(0, 4000));
    layout.uint_where("water_level_trend", 213, 2, valid::below(3));
    layout.scaled("surf_cur_speed", 215, 8, 10.0, valid::within(0, 250));
    layout.uint_where("surf_cur_dir", 223, 9, valid::below(360));
    layout.scaled("cur_speed_2", 232, 8, 10.0, valid::within(0, 250));
    layout.uint_where("cur_dir_2", 240, 9, valid::below(360));
    layout.uint_where("cur_depth_2", 249, 5, valid::below(31));
    layout.scaled("cur_speed_3", 254, 8, 10.0, valid::within(0, 250));
    layout.uint_where("cur_dir_3", 262, 9, valid::below(360));
    layout.uint_where("cur_depth_3", 271, 5, valid::below(31));
    layout.scaled("wave_height", 276, 8, 10.0, valid::within(0, 250));
    layout.uint_where("wave_period", 284, 6, valid::below(61));
    layout.uint_where("wave_dir", 290, 9, valid::below(360));
    layout.scaled("swell_height", 299, 8, 10.0, valid::within(0, 250));
    layout.uint_where("swell_period", 307, 6, valid::below(61));
    layout.uint_where("swell_dir", 313, 9, valid::below(360));
    layout.uint_where("sea_state", 322, 4, valid::below(13));
    layout.signed_scaled("water_temp", 326, 10, 10.0, |v| (-100..=500).contains(&v));
    layout.uint_where("precip_type", 336, 3, valid::below(7));
    layout.scaled("salinity", 339, 9, 10.0, valid::within(0, 500));
    layout.uint_where("ice", 348, 2, valid::below(3));
    layout.uint("spare2", 350, 10);
    Ok(())
}

/// Read an eight-bit horizontal visibility in nautical miles. The leading
/// bit flags a visibility greater than the value given.
pub fn visibility(layout: &mut Layout<'_>, names: [&'static str; 2], offset: usize) {
    let [greater, distance] = names;
    layout.flag(greater, offset);
    layout.scaled(distance, offset + 1, 7, 10.0, valid::not(127));
}
