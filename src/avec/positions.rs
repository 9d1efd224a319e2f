//! Bulk decoding of position reports into fixed rows.
//!
//! Only single-sentence Class A (types 1, 2 and 3), Class B (type 18) and
//! long range (type 27) reports are decoded. Each is checked against the
//! acceptance filters, projected onto a [`PositionReportRow`] and optionally
//! converted to SI units.

use std::f64::consts::{FRAC_PI_2, PI};

use either::Either::Right;
use tracing::{debug, trace};

use super::Error;
use crate::sans::{
    data::DecodedMessage,
    fragment::{FragmentGroup, ReassemblyError},
    message,
    sentence::trailing_timestamp,
};

/// Largest UTC second reported while the positioning system is working.
const MAX_WORKING_SECOND: i64 = 61;

/// Metres per nautical mile.
const METRES_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Options for [`decode_positions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Convert rows to SI units and mathematical angles (default).
    pub metric: bool,
    /// Parse a receiver timestamp following the final comma of each
    /// sentence.
    pub timestamps: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            metric: true,
            timestamps: false,
        }
    }
}

/// A position report projected onto eleven fixed slots.
///
/// In nautical units, angles are degrees clockwise from north, speeds are
/// knots, and the rate of turn is degrees per minute. In metric units,
/// angles are radians counter-clockwise from east, speeds are metres per
/// second, and the rate of turn is radians per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PositionReportRow {
    pub mmsi: u32,
    pub nav_status: Option<u8>,
    pub rot: Option<f64>,
    pub sog: Option<f64>,
    pub position_accuracy: bool,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub cog: Option<f64>,
    pub true_heading: Option<f64>,
    /// Second of the UTC minute at which the report was generated.
    pub utc_second: Option<u8>,
    pub special_manoeuvre: Option<u8>,
}

impl PositionReportRow {
    /// Project a decoded message, if it is a position report.
    ///
    /// Values outside a slot's valid range are missing. UTC seconds of 60
    /// and above, which flag an unavailable or degraded position fix, are
    /// missing too.
    pub fn from_message(message: &DecodedMessage) -> Option<Self> {
        let float = |name| message.field(name).as_float();
        let small = |name| message.field(name).as_integer().map(|v| v as u8);

        let mut row = PositionReportRow {
            mmsi: message.mmsi,
            position_accuracy: message.field("position_accuracy").as_boolean()?,
            sog: float("sog"),
            lat: float("lat"),
            lon: float("lon"),
            cog: float("cog"),
            ..Default::default()
        };

        match message.message_id {
            1..=3 => {
                row.nav_status = small("nav_status");
                row.rot = float("rot");
                row.true_heading = float("true_heading");
                row.utc_second = small("timestamp").filter(|&s| s < 60);
                row.special_manoeuvre = small("special_manoeuvre");
            }
            18 => {
                row.true_heading = float("true_heading");
                row.utc_second = small("timestamp").filter(|&s| s < 60);
            }
            27 => {
                row.nav_status = small("nav_status");
            }
            _ => return None,
        }

        Some(row)
    }

    /// Convert from nautical units to SI units and mathematical angles.
    ///
    /// Missing slots remain missing.
    pub fn to_metric(self) -> Self {
        let radians = |deg: f64| deg * PI / 180.0;
        let bearing = |deg: f64| FRAC_PI_2 - radians(deg);

        Self {
            rot: self.rot.map(|v| -radians(v) / 60.0),
            sog: self.sog.map(|v| v * METRES_PER_NAUTICAL_MILE / 3600.0),
            lat: self.lat.map(radians),
            lon: self.lon.map(radians),
            cog: self.cog.map(bearing),
            true_heading: self.true_heading.map(bearing),
            ..self
        }
    }

    /// Flatten to the eleven slots, with missing slots as NaN.
    pub fn to_array(&self) -> [f64; 11] {
        let small = |v: Option<u8>| v.map_or(f64::NAN, f64::from);
        let float = |v: Option<f64>| v.unwrap_or(f64::NAN);

        [
            f64::from(self.mmsi),
            small(self.nav_status),
            float(self.rot),
            float(self.sog),
            f64::from(u8::from(self.position_accuracy)),
            float(self.lat),
            float(self.lon),
            float(self.cog),
            float(self.true_heading),
            small(self.utc_second),
            small(self.special_manoeuvre),
        ]
    }
}

/// Accepted position reports, in input order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Positions {
    pub rows: Vec<PositionReportRow>,
    /// Receiver timestamp of each row, if requested.
    pub timestamps: Option<Vec<Option<u64>>>,
}

/// Decode position reports from a batch of single-sentence messages.
///
/// Sentences failing validation or decoding, fragments of multi-sentence
/// messages, and other message types are skipped. Reports are discarded
/// when their position is unavailable, when a Class A or B report's UTC
/// second is above 61 (the positioning system is inoperative), or when a
/// long range report's position latency exceeds five seconds.
pub fn decode_positions(sentences: &[impl AsRef<str>], options: &PositionOptions) -> Positions {
    let mut positions = Positions {
        rows: Vec::new(),
        timestamps: options.timestamps.then(Vec::new),
    };

    for (index, sentence) in sentences.iter().enumerate() {
        let sentence = sentence.as_ref();

        let message = match decode_single(sentence) {
            Ok(Some(message)) => message,
            Ok(None) => {
                trace!(index, "Skipping fragment of a multi-sentence message.");
                continue;
            }
            Err(err) => {
                debug!(index, error = %err, "Skipping sentence.");
                continue;
            }
        };

        let Some(row) = PositionReportRow::from_message(&message) else {
            continue;
        };

        if !accepted(&message) {
            trace!(index, mmsi = message.mmsi, "Discarding position report.");
            continue;
        }

        positions
            .rows
            .push(if options.metric { row.to_metric() } else { row });

        if let Some(timestamps) = &mut positions.timestamps {
            timestamps.push(trailing_timestamp(sentence));
        }
    }

    positions
}

/// Decode a message held in one sentence, or `None` if the sentence
/// begins a fragment train.
fn decode_single(sentence: &str) -> Result<Option<DecodedMessage>, Error> {
    let begun = FragmentGroup::begin(sentence)
        .map_err(|source| ReassemblyError::Fragment { consumed: 0, source })?;

    let Right(payload) = begun else {
        return Ok(None);
    };

    let (message, _) =
        message::decode(&payload).map_err(|source| Error::Decode { consumed: 1, source })?;

    Ok(Some(message))
}

/// Whether a position report passes the acceptance filters.
fn accepted(message: &DecodedMessage) -> bool {
    let positioned = !message.field("lat").is_missing() && !message.field("lon").is_missing();

    let working = match message.message_id {
        27 => message.field("gnss").as_boolean() == Some(true),
        _ => message
            .field("timestamp")
            .as_integer()
            .is_some_and(|s| s <= MAX_WORKING_SECOND),
    };

    positioned && working
}
