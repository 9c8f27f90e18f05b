use bmsframe_lib::{decode_bytes, decode_hex, hex, FrameDecoder, Warning, TITAN};

const REFERENCE: &str = "01031201a000330055003000010c0d010a00810002";

#[test]
fn reference_frame_through_public_api() {
    let frame = FrameDecoder::new(&TITAN).decode_hex(REFERENCE.to_uppercase().as_str());
    assert_eq!(frame.raw_hex, REFERENCE);
    assert_eq!(frame.capacity_ah, Some(416));
    assert_eq!(frame.soc_pct, Some(51));
    assert_eq!(frame.current_a, Some(-30.85));
    assert_eq!(frame.voltage_v, Some(26.6));
    assert_eq!(frame.power_w, Some(-820.61));
    assert!(frame.warnings.is_empty());
}

#[test]
fn hex_and_bytes_entry_points_agree() {
    let bytes = hex::decode(REFERENCE).unwrap();
    assert_eq!(decode_hex(REFERENCE), decode_bytes(bytes.as_slice()));

    let truncated = &bytes[..9];
    assert_eq!(
        decode_hex(hex::encode(truncated).as_str()),
        decode_bytes(truncated)
    );
}

#[test]
fn every_prefix_decodes_without_panic() {
    let bytes = hex::decode(REFERENCE).unwrap();
    for end in 0..=bytes.len() {
        let frame = decode_bytes(&bytes[..end]);
        assert_eq!(frame.raw_hex, hex::encode(&bytes[..end]));
        // a field is only present once its word is complete
        let words = end.saturating_sub(3) / 2;
        assert_eq!(frame.words_be.len(), words);
        assert_eq!(frame.status2.is_some(), words >= 9);
        assert_eq!(frame.current_a.is_some(), words >= 7);
        assert_eq!(frame.power_w.is_some(), words >= 7);
        if end < 3 {
            assert_eq!(frame.warnings, vec![Warning::FrameTooShort]);
        } else if end < bytes.len() {
            assert_eq!(
                frame.warnings,
                vec![Warning::LengthOverrun {
                    declared: 18,
                    available: end - 3
                }]
            );
        } else {
            assert!(frame.warnings.is_empty());
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn serialized_field_names() {
    let value = serde_json::to_value(decode_hex(REFERENCE)).unwrap();
    assert_eq!(value["rawHex"], REFERENCE);
    assert_eq!(value["header"], 1);
    assert_eq!(value["opcode"], 3);
    assert_eq!(value["length"], 18);
    assert_eq!(value["payloadHex"], &REFERENCE[6..]);
    assert_eq!(value["capacityAh"], 416);
    assert_eq!(value["currentA"], -30.85);
    assert_eq!(value["powerW"], -820.61);
    assert_eq!(value["status2"], 2);
    assert!(value.get("trailerHex").is_none());
    assert!(value.get("warnings").is_none());

    let value = serde_json::to_value(decode_hex("zz")).unwrap();
    assert_eq!(value["rawHex"], "zz");
    assert_eq!(value["wordsBE"], serde_json::json!([]));
    assert_eq!(value["warnings"], serde_json::json!(["Invalid hex string."]));
    assert!(value.get("socPct").is_none());
}
