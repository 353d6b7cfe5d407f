use std::fs;
use std::path::{Path, PathBuf};

use sanewire_core::{
    DecodeOptions, DecodeReport, DecodedValue, NullPointerPolicy, ResponseKind, decode_file,
};

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn load_expected_report(dir: &str) -> DecodeReport {
    let expected_path = repo_root().join(dir).join("expected_report.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str, kind: ResponseKind) {
    let input = repo_root().join(dir).join("input.bin");
    let expected = load_expected_report(dir);

    let mut actual = decode_file(&input, kind, DecodeOptions::default()).expect("decode input");
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_device_list_two() {
    run_golden("tests/golden/device_list_two", ResponseKind::DeviceList);
}

#[test]
fn golden_device_list_empty() {
    run_golden("tests/golden/device_list_empty", ResponseKind::DeviceList);
}

#[test]
fn golden_device_list_null_pointer() {
    run_golden("tests/golden/device_list_null_pointer", ResponseKind::DeviceList);
}

#[test]
fn golden_parameters_rgb() {
    run_golden("tests/golden/parameters_rgb", ResponseKind::Parameters);
}

#[test]
fn golden_parameters_unknown_lines() {
    run_golden("tests/golden/parameters_unknown_lines", ResponseKind::Parameters);
}

#[test]
fn golden_string_latin1() {
    run_golden("tests/golden/string_latin1", ResponseKind::String);
}

#[test]
fn golden_status_device_busy() {
    run_golden("tests/golden/status_device_busy", ResponseKind::Status);
}

#[test]
fn golden_device_list_empty_is_two_words() {
    let report = load_expected_report("tests/golden/device_list_empty");
    assert_eq!(report.consumed_bytes, 8);
    assert_eq!(report.response, DecodedValue::DeviceList(Vec::new()));
}

#[test]
fn golden_parameters_unknown_lines_leaves_trailing_word() {
    let report = load_expected_report("tests/golden/parameters_unknown_lines");
    assert_eq!(report.unconsumed_bytes, 4);
    match report.response {
        DecodedValue::Parameters(params) => assert_eq!(params.known_lines(), None),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn null_pointer_fixture_rejected_under_strict_policy() {
    let input = repo_root()
        .join("tests/golden/device_list_null_pointer")
        .join("input.bin");
    let options = DecodeOptions::default().with_null_pointer(NullPointerPolicy::Reject);
    let err = decode_file(&input, ResponseKind::DeviceList, options).unwrap_err();
    assert!(err.to_string().contains("null device pointer"));
}
