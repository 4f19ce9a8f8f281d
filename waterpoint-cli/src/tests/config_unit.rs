//! Focused unit tests covering argument conversion and configuration layering.

use super::helpers::DataDir;
use super::*;
use crate::browse::ListConfig;
use crate::detail::{MapLinkArgs, MapLinkConfig};
use crate::edit::{AddConfig, UpdateConfig};
use crate::feedback::{RateConfig, ReportConfig, config_from_layers_for_test};
use rstest::rstest;
use waterpoint_core::validation::ValidationError;
use waterpoint_core::{Platform, PointFilter, ReportKind, WaterPointStatus};

fn add_args(dir: &DataDir) -> AddArgs {
    AddArgs {
        data_dir: Some(dir.path().to_path_buf()),
        name: Some("Pump 1".to_owned()),
        district: Some("Gounghin".to_owned()),
        price: Some("25".to_owned()),
        status: None,
        latitude: Some(12.3),
        longitude: Some(-1.5),
    }
}

#[rstest]
#[case::name(ARG_NAME, ENV_ADD_NAME)]
#[case::district(ARG_DISTRICT, ENV_ADD_DISTRICT)]
#[case::price(ARG_PRICE, ENV_ADD_PRICE)]
fn converting_add_without_required_fields_errors(
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let dir = DataDir::new();
    let mut args = add_args(&dir);
    match field {
        ARG_NAME => args.name = None,
        ARG_DISTRICT => args.district = None,
        _ => args.price = None,
    }
    let err = AddConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn add_config_defaults_status_to_unknown() {
    let dir = DataDir::new();
    let config = AddConfig::try_from(add_args(&dir)).expect("config should build");
    assert_eq!(config.draft.status, WaterPointStatus::Unknown);
    assert_eq!(config.draft.price, "25");
    assert_eq!(config.data_dir, dir.path());
}

#[rstest]
#[case(Some(12.3), None)]
#[case(None, Some(-1.5))]
fn half_a_location_is_rejected(#[case] latitude: Option<f64>, #[case] longitude: Option<f64>) {
    let dir = DataDir::new();
    let args = AddArgs {
        latitude,
        longitude,
        ..add_args(&dir)
    };
    let err = AddConfig::try_from(args).expect_err("incomplete location should error");
    assert!(matches!(err, CliError::IncompleteLocation), "{err:?}");
}

#[rstest]
fn out_of_range_coordinates_are_invalid_input() {
    let dir = DataDir::new();
    let args = AddArgs {
        latitude: Some(91.0),
        ..add_args(&dir)
    };
    let err = AddConfig::try_from(args).expect_err("bad latitude should error");
    match err {
        CliError::InvalidInput(ValidationError::InvalidCoordinate { latitude, .. }) => {
            assert_eq!(latitude, 91.0);
        }
        other => panic!("expected InvalidCoordinate, found {other:?}"),
    }
}

#[rstest]
fn update_without_fields_is_rejected() {
    let args = UpdateArgs {
        id: Some("1".to_owned()),
        ..UpdateArgs::default()
    };
    let err = UpdateConfig::try_from(args).expect_err("empty update should error");
    assert!(matches!(err, CliError::EmptyUpdate), "{err:?}");
}

#[rstest]
fn update_checks_the_fields_it_is_given() {
    let args = UpdateArgs {
        id: Some("1".to_owned()),
        name: Some("   ".to_owned()),
        ..UpdateArgs::default()
    };
    let err = UpdateConfig::try_from(args).expect_err("blank name should error");
    match err {
        CliError::InvalidInput(ValidationError::MissingField { field }) => {
            assert_eq!(field, ARG_NAME);
        }
        other => panic!("expected MissingField, found {other:?}"),
    }
}

#[rstest]
fn update_builds_a_partial_patch() {
    let dir = DataDir::new();
    let args = UpdateArgs {
        id: Some("1".to_owned()),
        data_dir: Some(dir.path().to_path_buf()),
        price: Some(" 30 ".to_owned()),
        status: Some(WaterPointStatus::Crowded),
        ..UpdateArgs::default()
    };
    let config = UpdateConfig::try_from(args).expect("config should build");
    assert_eq!(config.id.as_str(), "1");
    assert_eq!(config.patch.price, Some(30));
    assert_eq!(config.patch.status, Some(WaterPointStatus::Crowded));
    assert_eq!(config.patch.name, None);
    assert_eq!(config.patch.location, None);
}

#[rstest]
fn commands_without_an_id_name_their_env_var() {
    let err = UpdateConfig::try_from(UpdateArgs::default()).expect_err("missing id");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_ID);
            assert_eq!(env, ENV_UPDATE_ID);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn report_requires_a_description() {
    let args = ReportArgs {
        id: Some("1".to_owned()),
        ..ReportArgs::default()
    };
    let err = ReportConfig::try_from(args).expect_err("missing description");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_DESCRIPTION);
            assert_eq!(env, ENV_REPORT_DESCRIPTION);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn report_kind_defaults_to_outage() {
    let dir = DataDir::new();
    let args = ReportArgs {
        id: Some("1".to_owned()),
        data_dir: Some(dir.path().to_path_buf()),
        kind: None,
        description: Some(" no water since morning ".to_owned()),
    };
    let config = ReportConfig::try_from(args).expect("config should build");
    assert_eq!(config.report.kind, ReportKind::Outage);
    assert_eq!(config.report.description, "no water since morning");
}

#[rstest]
#[case(0)]
#[case(6)]
fn ratings_outside_one_to_five_are_rejected(#[case] stars: u8) {
    let args = RateArgs {
        id: Some("1".to_owned()),
        stars: Some(stars),
        ..RateArgs::default()
    };
    let err = RateConfig::try_from(args).expect_err("out of range rating");
    match err {
        CliError::InvalidInput(ValidationError::RatingOutOfRange { value }) => {
            assert_eq!(value, stars);
        }
        other => panic!("expected RatingOutOfRange, found {other:?}"),
    }
}

#[rstest]
fn list_defaults_to_every_point_without_location() {
    let dir = DataDir::new();
    let args = ListArgs {
        data_dir: Some(dir.path().to_path_buf()),
        ..ListArgs::default()
    };
    let config = ListConfig::try_from(args).expect("config should build");
    assert_eq!(config.filter, PointFilter::All);
    assert_eq!(config.user_location, None);
    assert!(!config.json);
}

#[rstest]
fn map_link_defaults_to_the_web_platform() {
    let dir = DataDir::new();
    let args = MapLinkArgs {
        id: Some("1".to_owned()),
        data_dir: Some(dir.path().to_path_buf()),
        platform: None,
    };
    let config = MapLinkConfig::try_from(args).expect("config should build");
    assert_eq!(config.platform, Platform::Web);
}

#[rstest]
fn data_dir_that_is_a_file_is_rejected() {
    let dir = DataDir::new();
    let file = dir.path().join("points.json");
    waterpoint_fs::write_atomic(&file, b"[]").expect("write file");
    let err = resolve_data_dir(Some(file.clone())).expect_err("file is not a directory");
    match err {
        CliError::DataDirNotDirectory { path } => assert_eq!(path, file),
        other => panic!("expected DataDirNotDirectory, found {other:?}"),
    }
}

#[rstest]
fn missing_data_dir_is_created_later() {
    let dir = DataDir::new();
    let nested = dir.path().join("not-yet");
    assert_eq!(resolve_data_dir(Some(nested.clone())).expect("resolve"), nested);
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "stars": "many" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let dir = DataDir::new();
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "data_dir": dir.path().join("from-file").as_str(),
            "stars": 2,
        }),
        None,
    );
    composer.push_environment(json!({
        "id": "from-env",
        "stars": 3,
    }));
    composer.push_cli(json!({ "stars": 5 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.id.as_str(), "from-env");
    assert_eq!(config.stars, 5);
    assert_eq!(config.data_dir, dir.path().join("from-file"));
}
