#![cfg(feature = "serde")]

use aisling::avec::{DecodeOptions, PositionOptions, decode_one, decode_positions};
use serde_json::{Value, json};

const CLASS_A: &str = "!AIVDM,1,1,,B,177KQJ5000G?tO`K>RA1wUbN0TKH,0*5C";

#[test]
fn serialize_decoded_message() {
    let decoded = decode_one(&[CLASS_A], &DecodeOptions::default()).unwrap();
    let value = serde_json::to_value(&decoded.message).unwrap();

    assert_eq!(value["message_id"], json!(1));
    assert_eq!(value["mmsi"], json!(477553000));
    assert_eq!(value["fields"]["nav_status"], json!(5));
    assert_eq!(value["fields"]["true_heading"], json!(181));
    assert_eq!(value["fields"]["raim"], json!(false));
    assert_eq!(value["fields"]["special_manoeuvre"], Value::Null);
    assert_eq!(value["sub_fields"], json!({}));
}

#[test]
fn serialize_position_rows() {
    let options = PositionOptions {
        metric: false,
        timestamps: true,
    };
    let positions = decode_positions(&[format!("{CLASS_A},1241544035")], &options);
    let value = serde_json::to_value(&positions).unwrap();

    assert_eq!(value["rows"][0]["mmsi"], json!(477553000));
    assert_eq!(value["rows"][0]["utc_second"], json!(15));
    assert_eq!(value["rows"][0]["special_manoeuvre"], Value::Null);
    assert_eq!(value["timestamps"], json!([1241544035]));
}
