use crate::tlv::{MAX_DATASET_SIZE, Tlv, TlvError, TlvType, decode_tlvs, encode_tlvs};
use proptest::prelude::*;

#[test]
fn decode_preserves_order_and_unknown_types() {
    let bytes = [0x40, 0x02, 0xaa, 0xbb, 0x00, 0x03, 0x00, 0x00, 0x0b, 0x80, 0x00];
    let tlvs = decode_tlvs(&bytes).expect("well-formed tlvs should decode");

    assert_eq!(tlvs.len(), 3);
    assert_eq!(tlvs[0].tlv_type(), None);
    assert_eq!(tlvs[0].code(), 0x40);
    assert_eq!(tlvs[1].tlv_type(), Some(TlvType::Channel));
    assert_eq!(tlvs[1].value(), &[0x00, 0x00, 0x0b]);
    assert_eq!(tlvs[2].code(), 0x80);
    assert!(tlvs[2].value().is_empty());
    assert_eq!(encode_tlvs(&tlvs), bytes);
}

#[test]
fn decode_rejects_truncated_header_and_value() {
    assert_eq!(
        decode_tlvs(&[0x01]),
        Err(TlvError::Truncated { offset: 0 })
    );
    assert_eq!(
        decode_tlvs(&[0x01, 0x02, 0xfa, 0xce, 0x05, 0x10, 0x00]),
        Err(TlvError::Truncated { offset: 4 })
    );
}

#[test]
fn decode_rejects_duplicate_types() {
    let bytes = [0x01, 0x02, 0xfa, 0xce, 0x01, 0x02, 0xbe, 0xef];

    assert_eq!(decode_tlvs(&bytes), Err(TlvError::Duplicate { code: 1 }));
}

#[test]
fn decode_rejects_bad_known_lengths() {
    // delay timer must be four bytes
    let bytes = [0x34, 0x02, 0x00, 0x01];

    assert_eq!(
        decode_tlvs(&bytes),
        Err(TlvError::InvalidLength { code: 52, len: 2 })
    );
}

#[test]
fn decode_rejects_oversize_input() {
    let bytes = vec![0u8; MAX_DATASET_SIZE + 1];

    assert_eq!(
        decode_tlvs(&bytes),
        Err(TlvError::TooLarge {
            size: MAX_DATASET_SIZE + 1
        })
    );
}

#[test]
fn type_codes_round_trip_through_catalogue() {
    for code in 0..=u8::MAX {
        if let Some(ty) = TlvType::from_code(code) {
            assert_eq!(ty.code(), code);
        }
    }
}

#[test]
fn largest_entry_keeps_its_length_byte() {
    let mut bytes = vec![0x40, 252];
    bytes.extend_from_slice(&[0x5a; 252]);

    let tlvs = decode_tlvs(&bytes).unwrap();

    assert_eq!(tlvs[0].value().len(), 252);
    assert_eq!(encode_tlvs(&tlvs), bytes);
}

// Codes above the catalogue only, so no per-type length rule applies.
fn arb_unknown_tlvs() -> impl Strategy<Value = Vec<Tlv>> {
    prop::collection::btree_map(
        60u8..=250,
        prop::collection::vec(any::<u8>(), 0..12),
        0..8,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(code, value)| Tlv::new(code, value))
            .collect()
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(tlvs in arb_unknown_tlvs()) {
        let bytes = encode_tlvs(&tlvs);
        let decoded = decode_tlvs(&bytes).expect("encoded tlvs should decode");

        prop_assert_eq!(decoded, tlvs);
    }

    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..300)) {
        let _ = decode_tlvs(&bytes);
    }
}
