use aisling::{
    avec::{
        DecodeOptions, Error, FromMessage, FromMessages, PositionOptions, decode_one,
        decode_positions, decode_slice,
    },
    sans::{
        check::{EnvelopeError, checksum, format_with_checksum, validate},
        data::{DecodeStatus, DecodedField},
        fragment::{FragmentError, ReassemblyError, reassemble},
        header::MessageHeader,
        message::DecodeError,
        sentence::{FieldError, trailing_timestamp},
    },
};
use csv::ReaderBuilder;

mod support;

use support::{Bits, ClassA, sentence};

const CLASS_A: &str = "!AIVDM,1,1,,B,177KQJ5000G?tO`K>RA1wUbN0TKH,0*5C";

const STATIC_VOYAGE: [&str; 2] = [
    "!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C",
    "!AIVDM,2,2,1,A,88888888880,2*25",
];

fn decode(sentences: &[impl AsRef<str>]) -> aisling::avec::Decoded {
    decode_one(sentences, &DecodeOptions::default()).unwrap()
}

fn assert_close(found: &DecodedField, expected: f64) {
    let found = found.as_float().unwrap();
    assert!(
        (found - expected).abs() < 1e-6,
        "expected {expected}, found {found}"
    );
}

#[test]
fn decode_class_a_position() {
    let decoded = decode(&[CLASS_A]);
    let message = &decoded.message;

    assert_eq!(decoded.fragments_consumed, 1);
    assert_eq!(decoded.status, DecodeStatus::Decoded);
    assert_eq!(message.message_id, 1);
    assert_eq!(message.repeat_indicator, 0);
    assert_eq!(message.mmsi, 477553000);

    assert_eq!(message.field("nav_status"), &DecodedField::Integer(5));
    assert_eq!(message.field("rot"), &DecodedField::Float(0.0));
    assert_eq!(message.field("rot_over_range"), &DecodedField::Boolean(false));
    assert_eq!(message.field("sog"), &DecodedField::Float(0.0));
    assert_eq!(message.field("position_accuracy"), &DecodedField::Boolean(false));
    assert_close(message.field("lon"), -122.345833);
    assert_close(message.field("lat"), 47.582833);
    assert_close(message.field("cog"), 51.0);
    assert_eq!(message.field("true_heading"), &DecodedField::Integer(181));
    assert_eq!(message.field("timestamp"), &DecodedField::Integer(15));
    assert_eq!(message.field("special_manoeuvre"), &DecodedField::Missing);
    assert_eq!(message.field("raim"), &DecodedField::Boolean(false));

    assert_eq!(message.field("sync_state"), &DecodedField::Integer(1));
    assert_eq!(message.field("slot_timeout"), &DecodedField::Integer(1));
    assert_eq!(message.field("utc_hour"), &DecodedField::Integer(3));
    assert_eq!(message.field("utc_min"), &DecodedField::Integer(54));
    assert_eq!(message.field("utc_spare"), &DecodedField::Integer(0));
}

#[test]
fn decode_static_voyage_across_two_sentences() {
    let decoded = decode(&STATIC_VOYAGE);
    let message = &decoded.message;

    assert_eq!(decoded.fragments_consumed, 2);
    assert_eq!(message.message_id, 5);
    assert_eq!(message.mmsi, 351759000);

    assert_eq!(message.field("imo_num"), &DecodedField::Integer(9134270));
    assert_eq!(message.field("callsign").as_text(), Some("3FOF8"));
    assert_eq!(message.field("name").as_text(), Some("EVER DIADEM"));
    assert_eq!(message.field("type_and_cargo"), &DecodedField::Integer(70));
    assert_eq!(message.field("dim_a"), &DecodedField::Integer(225));
    assert_eq!(message.field("dim_b"), &DecodedField::Integer(70));
    assert_eq!(message.field("dim_c"), &DecodedField::Integer(1));
    assert_eq!(message.field("dim_d"), &DecodedField::Integer(31));
    assert_eq!(message.field("fix_type"), &DecodedField::Integer(1));
    assert_eq!(message.field("eta_month"), &DecodedField::Integer(5));
    assert_eq!(message.field("eta_day"), &DecodedField::Integer(15));
    assert_eq!(message.field("eta_hour"), &DecodedField::Integer(14));
    assert_eq!(message.field("eta_minute"), &DecodedField::Integer(0));
    assert_close(message.field("draught"), 12.2);
    assert_eq!(message.field("destination").as_text(), Some("NEW YORK"));
}

#[test]
fn decode_bare_payload() {
    let payload = CLASS_A.split(',').nth(5).unwrap();
    let decoded = decode(&[payload]);
    assert_eq!(decoded, decode(&[CLASS_A]));

    let options = DecodeOptions {
        default_pad_bits: 6,
    };
    let err = decode_one(&[payload], &options).unwrap_err();
    assert_eq!(err, Error::Payload(FieldError::BadPadBits("6".to_string())));
}

#[test]
fn validate_envelopes() {
    validate(CLASS_A).unwrap();
    validate(&format!("{CLASS_A},1241544035")).unwrap();

    let body = &CLASS_A[1..CLASS_A.find('*').unwrap()];
    assert_eq!(checksum(body), 0x5C);

    assert_eq!(
        validate(&CLASS_A[1..]),
        Err(EnvelopeError::MalformedEnvelope)
    );
    assert_eq!(
        validate(&CLASS_A.replace('*', ",")),
        Err(EnvelopeError::MissingChecksumDelimiter)
    );
    assert_eq!(
        validate(&CLASS_A[..CLASS_A.len() - 1]),
        Err(EnvelopeError::TruncatedChecksum)
    );

    let corrupted = CLASS_A.replace("177KQJ", "177KQK");
    let Err(EnvelopeError::ChecksumMismatch { found, .. }) = validate(&corrupted) else {
        panic!("corrupted sentence was accepted");
    };
    assert_eq!(found, "5C");
}

#[test]
fn checksum_round_trip() {
    let body = &CLASS_A[1..CLASS_A.find('*').unwrap()];
    let sentence = format_with_checksum(body);
    assert_eq!(sentence, CLASS_A);
    validate(&sentence).unwrap();

    let payload = CLASS_A.split(',').nth(5).unwrap();
    let start = sentence.find(payload).unwrap();
    for i in start..start + payload.len() {
        let mut flipped = sentence.clone().into_bytes();
        flipped[i] = if flipped[i] == b'0' { b'1' } else { b'0' };
        let flipped = String::from_utf8(flipped).unwrap();

        assert!(
            matches!(validate(&flipped), Err(EnvelopeError::ChecksumMismatch { .. })),
            "{flipped} was accepted"
        );
    }
}

#[test]
fn checksum_matches_built_sentences() {
    let built = ClassA::default().sentence();
    validate(&built).unwrap();

    let star = built.find('*').unwrap();
    let stated = u8::from_str_radix(&built[star + 1..], 16).unwrap();
    assert_eq!(checksum(&built[1..star]), stated);
}

#[test]
fn reject_swapped_fragments() {
    let swapped = [STATIC_VOYAGE[1], STATIC_VOYAGE[0]];

    let err = decode_one(&swapped, &DecodeOptions::default()).unwrap_err();
    let Error::Reassembly(ReassemblyError::Fragment { consumed, source }) = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(*consumed, 0);
    assert!(matches!(source, FragmentError::BadFragmentSequence { .. }));
    assert_eq!(err.consumed(), 0);
}

#[test]
fn reject_interleaved_sequence() {
    let other = STATIC_VOYAGE[1].replace(",2,2,1,", ",2,2,2,");
    let body = &other[1..other.find('*').unwrap()];
    let other = format!("!{body}*{:02X}", checksum(body));

    let err = reassemble(&[STATIC_VOYAGE[0], other.as_str()], 0).unwrap_err();
    assert!(matches!(
        err,
        ReassemblyError::Fragment {
            consumed: 1,
            source: FragmentError::BadFragmentSequence { .. },
        }
    ));
}

#[test]
fn reject_incomplete_train() {
    let err = reassemble(&STATIC_VOYAGE[..1], 0).unwrap_err();
    assert_eq!(
        err,
        ReassemblyError::InsufficientFragments {
            needed: 2,
            available: 1,
        }
    );
    assert_eq!(err.consumed(), 0);
}

#[test]
fn reassemble_from_offset() {
    let sentences = [CLASS_A, STATIC_VOYAGE[0], STATIC_VOYAGE[1]];
    let (payload, consumed) = reassemble(&sentences, 1).unwrap();
    assert_eq!(consumed, 2);
    assert_eq!(payload.pad_bits(), 2);
    assert_eq!(payload.usable_bits(), 424);
}

#[test]
fn decode_sentinel_neighbours() {
    let mut reader = ReaderBuilder::new()
        .from_path("fixtures/sentinels.csv")
        .unwrap();

    for record in reader.records() {
        let record = record.unwrap();
        let message_id: u64 = record[0].parse().unwrap();
        let len: usize = record[2].parse().unwrap();
        let field = &record[3];
        let offset: usize = record[4].parse().unwrap();
        let width: usize = record[5].parse().unwrap();
        let raw: i64 = record[6].parse().unwrap();
        let expected = &record[7];

        let mut bits = Bits::header(message_id, 244_670_316).pad_to(len);
        if let Some((dac, fi)) = record[1].split_once('.') {
            let at = if message_id == 6 { 72 } else { 40 };
            bits = bits
                .set(at, dac.parse().unwrap(), 10)
                .set(at + 10, fi.parse().unwrap(), 6);
        }
        let decoded = decode(&[bits.set(offset, raw, width).sentence()]);
        assert_eq!(decoded.status, DecodeStatus::Decoded);

        let found = match field.split_once('.') {
            Some((group, name)) => decoded.message.group(group)[0].get(name).cloned(),
            None => decoded.message.fields.get(field).cloned(),
        };
        let found = found.unwrap_or_else(|| panic!("type {message_id} has no {field}"));

        if expected == "missing" {
            assert!(found.is_missing(), "type {message_id} {field} = {raw} decoded as {found:?}");
        } else {
            let expected: f64 = expected.parse().unwrap();
            let found = found.as_float().unwrap();
            assert!(
                (found - expected).abs() < 1e-9,
                "type {message_id} {field} = {raw} decoded as {found}, expected {expected}"
            );
        }
    }
}

#[test]
fn flag_rate_of_turn_over_range() {
    for (raw, over_range) in [(-128, true), (127, true), (126, false), (-5, false)] {
        let report = ClassA {
            rot: raw,
            ..Default::default()
        };
        let decoded = decode(&[report.sentence()]);
        assert_eq!(
            decoded.message.field("rot_over_range"),
            &DecodedField::Boolean(over_range)
        );
    }
}

#[test]
fn decode_unknown_message_types() {
    for message_id in [0, 28, 63] {
        let bits = Bits::header(message_id, 123456789).pad_to(168);
        let decoded = decode(&[bits.sentence()]);

        assert_eq!(decoded.status, DecodeStatus::UnknownMessageType);
        assert_eq!(decoded.message.message_id, message_id as u8);
        assert_eq!(decoded.message.mmsi, 123456789);
        assert!(decoded.message.fields.is_empty());
        assert!(decoded.message.sub_fields.is_empty());
    }
}

#[test]
fn reject_unsupported_message_types() {
    for message_id in [15, 19] {
        let bits = Bits::header(message_id, 123456789).pad_to(168);
        let err = decode_one(&[bits.sentence()], &DecodeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            Error::Decode {
                consumed: 1,
                source: DecodeError::UnsupportedMessageType(message_id as u8),
            }
        );
    }
}

#[test]
fn reject_short_payloads() {
    let bits = ClassA::default().bits();
    let (payload, _) = bits.armor();
    let short = sentence(1, 1, "", &payload[..20], 0);

    let err = decode_one(&[short], &DecodeOptions::default()).unwrap_err();
    assert_eq!(
        err,
        Error::Decode {
            consumed: 1,
            source: DecodeError::InsufficientBits {
                needed: 168,
                available: 120,
            },
        }
    );

    let err = decode_one(&["15M6"], &DecodeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode {
            source: DecodeError::InsufficientBits { needed: 38, .. },
            ..
        }
    ));
}

#[test]
fn reject_bad_armor_characters() {
    let (payload, pad) = ClassA::default().bits().armor();
    let bad = format!("{}X{}", &payload[..10], &payload[11..]);
    let err = decode_one(&[sentence(1, 1, "", &bad, pad)], &DecodeOptions::default()).unwrap_err();
    assert_eq!(
        err,
        Error::Decode {
            consumed: 1,
            source: DecodeError::BadNmeaCharacter('X'),
        }
    );
}

#[test]
fn reject_multibyte_character_in_header() {
    let err = decode_one(&["15M6F0\u{e9}000000000000000000000"], &DecodeOptions::default())
        .unwrap_err();
    assert_eq!(
        err,
        Error::Decode {
            consumed: 1,
            source: DecodeError::BadNmeaCharacter('\u{e9}'),
        }
    );
}

#[test]
fn decode_static_data_parts() {
    let part_a = Bits::header(24, 338_088_483).uint(0, 2).text("PROVIDENCE", 120);
    let message = decode(&[part_a.sentence()]).message;
    assert_eq!(message.field("part_num"), &DecodedField::Integer(0));
    assert_eq!(message.field("name").as_text(), Some("PROVIDENCE"));
    assert!(message.fields.get("callsign").is_none());

    let part_b = Bits::header(24, 338_088_483)
        .uint(1, 2)
        .uint(37, 8)
        .text("SRT", 18)
        .uint(2, 4)
        .uint(1234, 20)
        .text("WDF5902", 42)
        .uint(12, 9)
        .uint(8, 9)
        .uint(3, 6)
        .uint(3, 6)
        .uint(0, 6);
    let message = decode(&[part_b.sentence()]).message;
    assert_eq!(message.field("type_and_cargo"), &DecodedField::Integer(37));
    assert_eq!(message.field("vendor_id").as_text(), Some("SRT"));
    assert_eq!(message.field("model"), &DecodedField::Integer(2));
    assert_eq!(message.field("serial"), &DecodedField::Integer(1234));
    assert_eq!(message.field("callsign").as_text(), Some("WDF5902"));
    assert_eq!(message.field("dim_a"), &DecodedField::Integer(12));
    assert_eq!(message.field("dim_d"), &DecodedField::Integer(3));
    assert!(message.fields.get("mothership_mmsi").is_none());

    for part in [2, 3] {
        let reserved = Bits::header(24, 338_088_483).uint(part, 2).pad_to(168);
        let message = decode(&[reserved.sentence()]).message;
        for name in ["name", "type_and_cargo", "callsign", "dim_a", "mothership_mmsi"] {
            assert_eq!(message.fields.get(name), Some(&DecodedField::Missing));
        }
    }
}

#[test]
fn decode_auxiliary_craft_mothership() {
    let part_b = Bits::header(24, 982_470_011)
        .uint(1, 2)
        .uint(36, 8)
        .text("", 18)
        .uint(0, 4)
        .uint(0, 20)
        .text("", 42)
        .uint(247_000_123, 30)
        .uint(0, 6);
    let message = decode(&[part_b.sentence()]).message;

    assert_eq!(message.field("mothership_mmsi"), &DecodedField::Integer(247_000_123));
    assert_eq!(message.field("vendor_id"), &DecodedField::Missing);
    assert!(message.fields.get("dim_a").is_none());
}

#[test]
fn decode_unknown_application_fallback() {
    let bits = Bits::header(6, 2_655_651)
        .uint(0, 2)
        .uint(265_001_000, 30)
        .flag(false)
        .uint(0, 1)
        .uint(1, 10)
        .uint(63, 6)
        .uint(0xDEAD_BEEF, 32);
    let decoded = decode(&[bits.sentence()]);

    assert_eq!(decoded.status, DecodeStatus::UnknownApplication);
    assert_eq!(decoded.message.field("mmsi_dest"), &DecodedField::Integer(265_001_000));
    assert_eq!(decoded.message.field("dac"), &DecodedField::Integer(1));
    assert_eq!(decoded.message.field("fi"), &DecodedField::Integer(63));
}

#[test]
fn decode_acknowledgement_destinations() {
    let bits = Bits::header(7, 2_655_651)
        .uint(0, 2)
        .uint(265_001_000, 30)
        .uint(1, 2)
        .uint(265_002_000, 30)
        .uint(3, 2);
    let message = decode(&[bits.sentence()]).message;

    let destinations = message.group("destinations");
    assert_eq!(destinations.len(), 2);
    assert_eq!(destinations[0].get("mmsi"), Some(&DecodedField::Integer(265_001_000)));
    assert_eq!(destinations[0].get("seq_num"), Some(&DecodedField::Integer(1)));
    assert_eq!(destinations[1].get("mmsi"), Some(&DecodedField::Integer(265_002_000)));
    assert_eq!(destinations[1].get("seq_num"), Some(&DecodedField::Integer(3)));
}

fn long_range(latency: bool, lat: i64) -> String {
    Bits::header(27, 211_234_560)
        .flag(true)
        .flag(false)
        .uint(0, 4)
        .int(-7_380, 18)
        .int(lat, 17)
        .uint(12, 6)
        .uint(270, 9)
        .flag(latency)
        .uint(0, 1)
        .sentence()
}

#[test]
fn decode_long_range_position() {
    let message = decode(&[long_range(false, 32_160)]).message;

    assert_close(message.field("lon"), -12.3);
    assert_close(message.field("lat"), 53.6);
    assert_eq!(message.field("sog"), &DecodedField::Integer(12));
    assert_eq!(message.field("cog"), &DecodedField::Integer(270));
    assert_eq!(message.field("gnss"), &DecodedField::Boolean(true));

    let message = decode(&[long_range(true, 32_160)]).message;
    assert_eq!(message.field("gnss"), &DecodedField::Boolean(false));
}

#[test]
fn parse_trailing_timestamps() {
    assert_eq!(trailing_timestamp(&format!("{CLASS_A},1241544035")), Some(1241544035));
    assert_eq!(trailing_timestamp(&format!("{CLASS_A},r003669945")), None);
    assert_eq!(trailing_timestamp(&format!("{CLASS_A},")), None);
    assert_eq!(trailing_timestamp(CLASS_A), None);
}

#[test]
fn decode_positions_in_nautical_units() {
    let options = PositionOptions {
        metric: false,
        timestamps: true,
    };
    let sentences = [
        format!("{CLASS_A},1241544035"),
        STATIC_VOYAGE[0].to_string(),
        STATIC_VOYAGE[1].to_string(),
        "garbage".to_string(),
        ClassA::default().sentence(),
    ];
    let positions = decode_positions(&sentences, &options);

    assert_eq!(positions.rows.len(), 2);
    assert_eq!(positions.timestamps, Some(vec![Some(1241544035), None]));

    let row = &positions.rows[0];
    assert_eq!(row.mmsi, 477553000);
    assert_eq!(row.nav_status, Some(5));
    assert_eq!(row.rot, Some(0.0));
    assert_eq!(row.sog, Some(0.0));
    assert!(!row.position_accuracy);
    assert!((row.lat.unwrap() - 47.582833).abs() < 1e-6);
    assert!((row.lon.unwrap() + 122.345833).abs() < 1e-6);
    assert_eq!(row.true_heading, Some(181.0));
    assert_eq!(row.utc_second, Some(15));
    assert_eq!(row.special_manoeuvre, None);

    let array = row.to_array();
    assert_eq!(array[0], 477553000.0);
    assert!(array[10].is_nan());
}

#[test]
fn decode_positions_in_metric_units() {
    let sentences = [CLASS_A.to_string(), ClassA::default().sentence()];

    let nautical = decode_positions(
        &sentences,
        &PositionOptions {
            metric: false,
            ..Default::default()
        },
    );
    let metric = decode_positions(&sentences, &PositionOptions::default());

    assert_eq!(metric.timestamps, None);
    assert_eq!(metric.rows.len(), 2);

    for (nautical, metric) in nautical.rows.iter().zip(&metric.rows) {
        assert_eq!(nautical.to_metric(), *metric);
    }

    // 12.3 knots due east at 52 degrees north, 45 degrees east.
    let row = &metric.rows[1];
    let deg = std::f64::consts::PI / 180.0;
    assert!((row.sog.unwrap() - 12.3 * 1852.0 / 3600.0).abs() < 1e-9);
    assert!(row.cog.unwrap().abs() < 1e-9);
    assert!(row.true_heading.unwrap().abs() < 1e-9);
    assert!((row.lat.unwrap() - 52.0 * deg).abs() < 1e-9);
    assert!((row.lon.unwrap() - 45.0 * deg).abs() < 1e-9);
}

#[test]
fn decode_positions_filters_reports() {
    let unavailable_lat = ClassA {
        lat: 91 * 600_000,
        ..Default::default()
    };
    let inoperative = ClassA {
        timestamp: 63,
        ..Default::default()
    };
    let dead_reckoning = ClassA {
        timestamp: 61,
        ..Default::default()
    };
    let sentences = [
        unavailable_lat.sentence(),
        inoperative.sentence(),
        dead_reckoning.sentence(),
        long_range(true, 32_160),
        long_range(false, 32_160),
    ];

    let positions = decode_positions(&sentences, &PositionOptions::default());
    assert_eq!(positions.rows.len(), 2);

    assert_eq!(positions.rows[0].utc_second, None);
    assert_eq!(positions.rows[1].mmsi, 211_234_560);
    assert_eq!(positions.rows[1].rot, None);
    assert_eq!(positions.rows[1].true_heading, None);
    assert_eq!(positions.rows[1].utc_second, None);
}

#[test]
fn decode_positions_omits_corrupted_sentences() {
    let corrupted = CLASS_A.replace("177KQJ", "177KQK");
    assert!(matches!(
        validate(&corrupted),
        Err(EnvelopeError::ChecksumMismatch { .. })
    ));

    let sentences = [corrupted, ClassA::default().sentence()];
    let positions = decode_positions(&sentences, &PositionOptions::default());

    assert_eq!(positions.rows.len(), 1);
    assert_eq!(positions.rows[0].mmsi, 244_670_316);
}

#[derive(Debug, Default)]
struct Tally {
    headers: Vec<MessageHeader>,
    names: Vec<String>,
    destinations: Vec<i64>,
}

impl FromMessages for Tally {
    fn add_message(&mut self, _: u8) -> Option<&mut dyn FromMessage> {
        Some(self)
    }
}

impl FromMessage for Tally {
    fn add_header(&mut self, header: MessageHeader) {
        self.headers.push(header);
    }

    fn add_integer(&mut self, field: &str, value: i64) {
        if field == "destinations.mmsi" {
            self.destinations.push(value);
        }
    }

    fn add_text(&mut self, field: &str, value: &str) {
        if field == "name" {
            self.names.push(value.to_string());
        }
    }
}

#[test]
fn decode_slice_skipping_bad_sentences() {
    let acknowledgement = Bits::header(13, 2_655_651)
        .uint(0, 2)
        .uint(265_001_000, 30)
        .uint(0, 2)
        .sentence();
    let sentences = [
        STATIC_VOYAGE[1].to_string(),
        CLASS_A.to_string(),
        CLASS_A.replace("*5C", "*5D"),
        STATIC_VOYAGE[0].to_string(),
        STATIC_VOYAGE[1].to_string(),
        acknowledgement,
        STATIC_VOYAGE[0].to_string(),
    ];

    let mut tally = Tally::default();
    let decoded = decode_slice(&sentences, &DecodeOptions::default(), &mut tally);

    assert_eq!(decoded, 3);
    let ids: Vec<u8> = tally.headers.iter().map(|h| h.message_id).collect();
    assert_eq!(ids, [1, 5, 13]);
    assert_eq!(tally.names, ["EVER DIADEM"]);
    assert_eq!(tally.destinations, [265_001_000]);
}
