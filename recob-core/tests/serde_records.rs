#![cfg(feature = "serde")]
#![allow(clippy::float_cmp)]
use recob_core::{Cluster, OpFlash, PlaneId, View};

#[test]
fn test_flash_dump_keeps_missing_x() {
    let flash = OpFlash::builder()
        .time(4.0)
        .time_width(0.2)
        .abs_time(900.0)
        .frame(2)
        .pe_per_channel(vec![1.0, 2.0])
        .build();

    let json = serde_json::to_string(&flash).unwrap();
    assert!(json.contains("\"x_center\":null"));

    let restored: OpFlash = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, flash);
    assert!(!restored.has_x_center());
}

#[test]
fn test_cluster_dump_keeps_identity_and_plane() {
    let cluster = Cluster::builder()
        .n_hits(4)
        .integral(20.0)
        .id(42)
        .view(View::Z)
        .plane(PlaneId::new(0, 0, 2))
        .build();

    let json = serde_json::to_value(&cluster).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["view"], "Z");
    assert_eq!(json["plane"]["plane"], 2);

    let restored: Cluster = serde_json::from_value(json).unwrap();
    assert_eq!(restored, cluster);
    assert_eq!(restored.integral_average(), 5.0);
}

#[test]
fn test_legacy_sentinel_in_dump_reads_as_absent() {
    let json = r#"{
        "time": 1.0, "time_width": 0.1, "abs_time": 1.0, "frame": 0,
        "pe_per_channel": [2.0, 3.0],
        "x_center": 1.7976931348623157e308, "x_width": 1.7976931348623157e308,
        "y_center": 0.0, "y_width": 0.0, "z_center": 0.0, "z_width": 0.0,
        "fast_to_total": 1.0, "in_beam_frame": false, "on_beam_time": 0
    }"#;
    let flash: OpFlash = serde_json::from_str(json).unwrap();
    assert!(!flash.has_x_center());
    assert_eq!(flash.x_width(), None);
    assert_eq!(flash.x_center_or_sentinel(), OpFlash::NO_CENTER);
    assert_eq!(flash.total_pe(), 5.0);
}

#[test]
fn test_cluster_dump_has_no_averages() {
    let cluster = Cluster::builder().n_hits(4).integral(20.0).id(1).build();
    let json = serde_json::to_value(&cluster).unwrap();
    assert!(json.get("charge_averages").is_none());
    assert!(json.get("integral_average").is_none());
}

#[test]
fn test_cluster_averages_recomputed_from_dump() {
    let mut json = serde_json::to_value(
        Cluster::builder().n_hits(4).integral(20.0).summed_adc(8.0).build(),
    )
    .unwrap();
    json["n_hits"] = serde_json::json!(0);

    let cluster: Cluster = serde_json::from_value(json).unwrap();
    assert_eq!(cluster.n_hits(), 0);
    assert_eq!(cluster.integral(), 20.0);
    assert_eq!(cluster.integral_average(), 0.0);
    assert_eq!(cluster.summed_adc_average(), 0.0);
}

#[test]
fn test_cluster_dump_missing_fields_take_defaults() {
    let cluster: Cluster = serde_json::from_str(r#"{"n_hits": 2, "summed_adc": 9.0}"#).unwrap();
    assert_eq!(cluster.id(), Cluster::INVALID_ID);
    assert!(!cluster.has_plane());
    assert_eq!(cluster.summed_adc_average(), 4.5);
}
