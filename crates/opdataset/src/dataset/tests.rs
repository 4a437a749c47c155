use crate::{
    dataset::{Dataset, DatasetInfo, DatasetKind, DatasetTlvs, SecurityPolicy, Timestamp},
    tlv::{MAX_DATASET_SIZE, TlvError, TlvType},
};

fn full_info() -> DatasetInfo {
    DatasetInfo {
        active_timestamp: Some(Timestamp::new(1, 0, false)),
        pending_timestamp: Some(Timestamp::new(2, 0, false)),
        network_key: Some([0x11; 16]),
        network_name: Some("OpenMesh".to_string()),
        extended_pan_id: Some([0xde, 0xad, 0x00, 0xbe, 0xef, 0x00, 0xca, 0xfe]),
        mesh_local_prefix: Some([0xfd, 0, 0x0d, 0xb8, 0, 0, 0, 0]),
        delay: Some(30_000),
        pan_id: Some(0xface),
        channel: Some(15),
        pskc: Some([0x22; 16]),
        security_policy: Some(SecurityPolicy {
            rotation_time: 672,
            flags: vec![0xff, 0xf8],
        }),
        channel_mask: Some(0x07ff_f800),
    }
}

#[test]
fn set_tlv_replaces_in_place() {
    let mut dataset = Dataset::new();
    dataset.set_tlv(TlvType::PanId, &[0x12, 0x34]).unwrap();
    dataset.set_tlv(TlvType::Channel, &[0, 0, 11]).unwrap();
    dataset.set_tlv(TlvType::PanId, &[0xbe, 0xef]).unwrap();

    assert_eq!(dataset.tlvs().len(), 2);
    assert_eq!(dataset.tlvs()[0].value(), &[0xbe, 0xef]);
    assert_eq!(dataset.size(), 4 + 5);
}

#[test]
fn set_tlv_rejects_bad_length_and_overflow() {
    let mut dataset = Dataset::new();

    assert_eq!(
        dataset.set_tlv(TlvType::NetworkKey, &[0; 15]),
        Err(TlvError::InvalidLength { code: 5, len: 15 })
    );

    dataset.set_tlv(TlvType::NetworkKey, &[0; 16]).unwrap();
    assert_eq!(
        dataset.set_tlv(TlvType::ChannelMask, &[0; 240]),
        Err(TlvError::TooLarge { size: 18 + 242 })
    );
    assert_eq!(dataset.size(), 18);
}

#[test]
fn remove_pending_fields_strips_only_pending_entries() {
    let mut dataset = Dataset::new();
    dataset
        .set_timestamp(DatasetKind::Active, &Timestamp::new(5, 0, false))
        .unwrap();
    dataset
        .set_timestamp(DatasetKind::Pending, &Timestamp::new(6, 0, false))
        .unwrap();
    dataset.set_delay_timer(1_000).unwrap();

    dataset.remove_pending_fields();

    assert!(dataset.contains(TlvType::ActiveTimestamp));
    assert!(!dataset.contains(TlvType::PendingTimestamp));
    assert_eq!(dataset.delay_timer(), None);
}

#[test]
fn copy_for_active_drops_pending_entries_but_keeps_source() {
    let mut source = Dataset::new();
    source.set_delay_timer(500).unwrap();
    source.set_tlv(TlvType::PanId, &[0, 1]).unwrap();

    let active = Dataset::copy_for(DatasetKind::Active, &source);
    let pending = Dataset::copy_for(DatasetKind::Pending, &source);

    assert_eq!(active.delay_timer(), None);
    assert_eq!(pending.delay_timer(), Some(500));
    assert_eq!(source.delay_timer(), Some(500));
}

#[test]
fn timestamp_is_variant_specific() {
    let mut dataset = Dataset::new();
    let ts = Timestamp::new(77, 3, true);
    dataset.set_timestamp(DatasetKind::Pending, &ts).unwrap();

    assert_eq!(dataset.timestamp(DatasetKind::Pending), Some(ts));
    assert_eq!(dataset.timestamp(DatasetKind::Active), None);
}

#[test]
fn info_conversion_covers_every_component() {
    let info = full_info();
    let dataset = Dataset::try_from(&info).expect("info should convert");
    let back = DatasetInfo::try_from(&dataset).expect("dataset should convert");

    assert_eq!(back, info);
    assert_eq!(dataset.delay_timer(), Some(30_000));
    assert_eq!(
        dataset.tlv(TlvType::Channel).map(|tlv| tlv.value().to_vec()),
        Some(vec![0, 0, 15])
    );
}

#[test]
fn info_rejects_oversize_network_name() {
    let info = DatasetInfo {
        network_name: Some("a-name-longer-than-16".to_string()),
        ..DatasetInfo::default()
    };

    assert!(matches!(
        Dataset::try_from(&info),
        Err(TlvError::InvalidLength { code: 3, .. })
    ));
}

#[test]
fn info_rejects_non_utf8_network_name() {
    let tlvs = DatasetTlvs::new(vec![0x03, 0x02, 0xff, 0xfe]).unwrap();
    let dataset = Dataset::try_from(&tlvs).unwrap();

    assert!(matches!(
        DatasetInfo::try_from(&dataset),
        Err(TlvError::InvalidValue { code: 3, .. })
    ));
}

#[test]
fn info_rejects_truncated_channel_mask() {
    let tlvs = DatasetTlvs::new(vec![0x35, 0x03, 0x00, 0x04, 0xff]).unwrap();
    let dataset = Dataset::try_from(&tlvs).unwrap();

    assert!(matches!(
        DatasetInfo::try_from(&dataset),
        Err(TlvError::InvalidValue { code: 53, .. })
    ));
}

#[test]
fn info_ignores_unknown_tlvs() {
    let tlvs = DatasetTlvs::new(vec![0x01, 0x02, 0xab, 0xcd, 0x99, 0x01, 0x00]).unwrap();
    let dataset = Dataset::try_from(&tlvs).unwrap();
    let info = DatasetInfo::try_from(&dataset).unwrap();

    assert_eq!(info.pan_id, Some(0xabcd));
    assert_eq!(info, DatasetInfo {
        pan_id: Some(0xabcd),
        ..DatasetInfo::default()
    });
}

#[test]
fn raw_tlvs_are_bounded() {
    assert_eq!(
        DatasetTlvs::new(vec![0; MAX_DATASET_SIZE + 1]),
        Err(TlvError::TooLarge {
            size: MAX_DATASET_SIZE + 1
        })
    );

    let tlvs = DatasetTlvs::from(&Dataset::try_from(&full_info()).unwrap());
    assert_eq!(Dataset::try_from(&tlvs).unwrap().to_bytes(), tlvs.as_bytes());
}
