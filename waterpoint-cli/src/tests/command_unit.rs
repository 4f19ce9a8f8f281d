//! Unit tests running command bodies against in-memory storage.

use super::helpers::{MemoryHarness, output_of};
use super::*;
use crate::browse::{ListConfig, execute_list};
use crate::detail::{MapLinkConfig, ShowConfig, execute_map_link, execute_show};
use crate::edit::{execute_add, execute_delete, execute_update};
use crate::feedback::{execute_rate, execute_report};
use rstest::{fixture, rstest};
use waterpoint_core::test_support::{sample_point, sample_point_at, sample_time};
use waterpoint_core::validation::{ValidationError, WaterPointDraft};
use waterpoint_core::{
    NewReport, Platform, PointFilter, ReportKind, STORAGE_KEY, StoreError, WaterPoint,
    WaterPointPatch, WaterPointStatus,
};

#[fixture]
fn harness() -> MemoryHarness {
    MemoryHarness::new()
}

fn seed(harness: &MemoryHarness, points: &[WaterPoint]) {
    harness.store().replace_all(points).expect("seed storage");
}

fn list_config(filter: PointFilter, user_location: Option<Location>) -> ListConfig {
    ListConfig {
        data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
        filter,
        user_location,
        json: false,
    }
}

fn draft() -> WaterPointDraft {
    WaterPointDraft {
        name: "Pump 1".to_owned(),
        district: "Gounghin".to_owned(),
        price: "25".to_owned(),
        status: WaterPointStatus::Functional,
        location: None,
    }
}

#[rstest]
fn list_on_empty_storage_prints_a_hint(harness: MemoryHarness) {
    let mut out = Vec::new();
    execute_list(
        &list_config(PointFilter::All, None),
        &harness.store(),
        None,
        &mut out,
    )
    .expect("list");
    assert!(output_of(out).starts_with("No water points found."));
}

#[rstest]
fn nearby_filter_sorts_by_distance_and_marks_close_points(harness: MemoryHarness) {
    seed(
        &harness,
        &[
            sample_point_at("far", 12.4, -1.5),
            sample_point_at("near", 12.3005, -1.5),
        ],
    );
    let here = Location::new(12.3, -1.5);
    let provider = FixedLocation(here);
    let mut out = Vec::new();
    execute_list(
        &list_config(PointFilter::Nearby, Some(here)),
        &harness.store(),
        Some(&provider),
        &mut out,
    )
    .expect("list");
    let text = output_of(out);
    let near = text.find("near  ").expect("near row");
    let far = text.find("far  ").expect("far row");
    assert!(near < far, "{text}");
    assert_eq!(text.matches("(nearby)").count(), 1, "{text}");
}

#[rstest]
fn list_json_round_trips_the_filtered_view(harness: MemoryHarness) {
    let mut broken = sample_point("2");
    broken.status = WaterPointStatus::Broken;
    seed(&harness, &[sample_point("1"), broken]);
    let config = ListConfig {
        json: true,
        ..list_config(PointFilter::Functional, None)
    };
    let mut out = Vec::new();
    execute_list(&config, &harness.store(), None, &mut out).expect("list");
    let points: Vec<WaterPoint> = serde_json::from_slice(&out).expect("json output");
    assert_eq!(points, vec![sample_point("1")]);
}

#[rstest]
fn add_without_a_location_writes_nothing(harness: MemoryHarness) {
    let mut out = Vec::new();
    let err = execute_add(draft(), &harness.store(), None, sample_time(), &mut out)
        .expect_err("location is required");
    assert!(
        matches!(err, CliError::InvalidInput(ValidationError::MissingLocation)),
        "{err:?}"
    );
    assert_eq!(harness.storage.raw(STORAGE_KEY), None);
    assert!(out.is_empty());
}

#[rstest]
fn add_uses_the_provider_location_and_prints_the_id(harness: MemoryHarness) {
    let here = Location::new(12.37, -1.53);
    let provider = FixedLocation(here);
    let mut out = Vec::new();
    let id = execute_add(
        draft(),
        &harness.store(),
        Some(&provider),
        sample_time(),
        &mut out,
    )
    .expect("add");

    assert_eq!(output_of(out).trim_end(), id.as_str());
    let stored = harness.store().find_by_id(&id).expect("stored point");
    assert_eq!(stored.location, here);
    assert_eq!(stored.last_update, sample_time());
    assert!(stored.ratings.is_empty());
}

#[rstest]
fn add_rejects_blank_names_before_the_store(harness: MemoryHarness) {
    let provider = FixedLocation(Location::new(12.3, -1.5));
    let blank = WaterPointDraft {
        name: "  ".to_owned(),
        ..draft()
    };
    let err = execute_add(
        blank,
        &harness.store(),
        Some(&provider),
        sample_time(),
        &mut Vec::new(),
    )
    .expect_err("blank name");
    match err {
        CliError::InvalidInput(ValidationError::MissingField { field }) => {
            assert_eq!(field, "name");
        }
        other => panic!("expected MissingField, found {other:?}"),
    }
    assert_eq!(harness.storage.raw(STORAGE_KEY), None);
}

#[rstest]
fn show_prints_the_detail_view(harness: MemoryHarness) {
    seed(&harness, &[sample_point("1")]);
    let config = ShowConfig {
        data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
        id: "1".into(),
    };
    let mut out = Vec::new();
    execute_show(&config, &harness.store(), sample_time(), &mut out).expect("show");
    let text = output_of(out);
    assert!(text.starts_with("Pump 1\n"), "{text}");
    assert!(text.contains("Price (20 L): 25 FCFA"), "{text}");
}

#[rstest]
fn show_reports_unknown_ids(harness: MemoryHarness) {
    let config = ShowConfig {
        data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
        id: "missing".into(),
    };
    let err = execute_show(&config, &harness.store(), sample_time(), &mut Vec::new())
        .expect_err("unknown id");
    match err {
        CliError::NotFound { id } => assert_eq!(id.as_str(), "missing"),
        other => panic!("expected NotFound, found {other:?}"),
    }
}

#[rstest]
#[case(Platform::Android, "geo:12.3,-1.5?q=12.3,-1.5(Pump%201)")]
#[case(Platform::Ios, "maps://app?daddr=12.3,-1.5&q=Pump%201")]
fn map_link_prints_platform_link_then_fallback(
    harness: MemoryHarness,
    #[case] platform: Platform,
    #[case] primary: &str,
) {
    seed(&harness, &[sample_point("1")]);
    let config = MapLinkConfig {
        data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
        id: "1".into(),
        platform,
    };
    let mut out = Vec::new();
    execute_map_link(&config, &harness.store(), &mut out).expect("map link");
    let text = output_of(out);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(primary));
    assert_eq!(
        lines.next(),
        Some("fallback: https://www.google.com/maps/search/?api=1&query=12.3,-1.5")
    );
}

#[rstest]
fn update_changes_only_patched_fields(harness: MemoryHarness) {
    seed(&harness, &[sample_point("1")]);
    harness.clock.advance(chrono::TimeDelta::hours(2));
    let mut out = Vec::new();
    execute_update(
        "1".into(),
        WaterPointPatch::status(WaterPointStatus::Broken),
        &harness.store(),
        &mut out,
    )
    .expect("update");

    let stored = harness.store().find_by_id(&"1".into()).expect("stored");
    let mut expected = sample_point("1");
    expected.status = WaterPointStatus::Broken;
    expected.last_update = sample_time() + chrono::TimeDelta::hours(2);
    assert_eq!(stored, expected);
    assert_eq!(output_of(out), "Updated 1\n");
}

#[rstest]
fn update_of_unknown_id_leaves_storage_untouched(harness: MemoryHarness) {
    seed(&harness, &[sample_point("1")]);
    let before = harness.storage.raw(STORAGE_KEY);
    let err = execute_update(
        "2".into(),
        WaterPointPatch::status(WaterPointStatus::Broken),
        &harness.store(),
        &mut Vec::new(),
    )
    .expect_err("unknown id");
    assert!(matches!(err, CliError::NotFound { .. }), "{err:?}");
    assert_eq!(harness.storage.raw(STORAGE_KEY), before);
}

#[rstest]
fn delete_succeeds_whether_or_not_the_id_exists(harness: MemoryHarness) {
    seed(&harness, &[sample_point("1")]);
    for _ in 0..2 {
        execute_delete(&"1".into(), &harness.store(), &mut Vec::new()).expect("delete");
    }
    assert!(harness.store().list_all().is_empty());
}

#[rstest]
fn report_is_dated_by_the_store_clock(harness: MemoryHarness) {
    seed(&harness, &[sample_point("1")]);
    let report = NewReport {
        kind: ReportKind::Cleanliness,
        description: "dirty basin".to_owned(),
    };
    execute_report("1".into(), report, &harness.store(), &mut Vec::new()).expect("report");
    let stored = harness.store().find_by_id(&"1".into()).expect("stored");
    assert_eq!(stored.reports.len(), 1);
    assert_eq!(
        stored.reports.first().map(|report| report.date),
        Some(sample_time())
    );
}

#[rstest]
fn rate_prints_the_new_average(harness: MemoryHarness) {
    seed(&harness, &[sample_point("1")]);
    execute_rate(&"1".into(), 4, &harness.store(), &mut Vec::new()).expect("first rating");
    let mut out = Vec::new();
    execute_rate(&"1".into(), 2, &harness.store(), &mut out).expect("second rating");
    assert_eq!(output_of(out), "Rated 1: ★★★☆☆ (3.0 from 2 ratings)\n");
}

#[rstest]
fn write_failures_surface_as_store_errors(harness: MemoryHarness) {
    seed(&harness, &[sample_point("1")]);
    harness.storage.fail_writes(true);
    let err = execute_rate(&"1".into(), 5, &harness.store(), &mut Vec::new())
        .expect_err("write should fail");
    assert!(
        matches!(err, CliError::Store(StoreError::Write(_))),
        "{err:?}"
    );
}
