//! A decoder for AIS messages carried in NMEA 0183 `AIVDM` and `AIVDO`
//! sentences.
//!
//! Aisling validates sentence checksums, reassembles messages split across
//! several sentences, and decodes every message type of ITU-R M.1371 in
//! common use, along with the international and inland binary applications.
//! Fields holding a 'not available' code, or a value outside their valid
//! range, are decoded as missing rather than as the raw code.
//!
//! Most users should begin with the functions and derive macros in the [`avec`]
//! module. These are suited to decoding single messages, batches of
//! sentences, and position reports in bulk. If these prove insufficient,
//! consider implementing a decoder as described in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `serde`: implement `Serialize` for decoded records.

pub mod avec;
pub mod sans;
