//! UTC and date inquiries (type 10).

use crate::sans::data::{DecodeStatus, Layout};

use super::DecodeError;

pub fn decode(layout: &mut Layout<'_>) -> Result<DecodeStatus, DecodeError> {
    layout.require(72)?;

    layout.uint("spare", 38, 2);
    layout.uint("dest_mmsi", 40, 30);
    layout.uint("spare2", 70, 2);

    Ok(DecodeStatus::Decoded)
}
