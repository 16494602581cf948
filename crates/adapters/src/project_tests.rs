// SPDX-License-Identifier: MIT

use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn resolves_round_trip_for_real_directory_with_dashes_in_name() {
    let root = TempDir::new().expect("tempdir");
    let nested = root.path().join("my-app");
    fs::create_dir_all(&nested).expect("mkdir");
    let canonical = nested.canonicalize().expect("canonicalize");

    let encoded = ccvr_core::encode_project_dir(&canonical.to_string_lossy());
    let descriptor = resolve(&encoded);

    assert_eq!(descriptor.display_name, "my-app");
    assert_eq!(descriptor.encoded_dir, encoded);
}

#[test]
fn resolves_plain_segment_without_dashes() {
    let root = TempDir::new().expect("tempdir");
    let nested = root.path().join("plainapp");
    fs::create_dir_all(&nested).expect("mkdir");
    let canonical = nested.canonicalize().expect("canonicalize");

    let encoded = ccvr_core::encode_project_dir(&canonical.to_string_lossy());
    let descriptor = resolve(&encoded);

    assert_eq!(descriptor.display_name, "plainapp");
}

#[test]
fn falls_back_when_directory_no_longer_exists() {
    let encoded = "-no-such-path-ever-existed-xyz";
    let descriptor = resolve(encoded);
    assert_eq!(descriptor.display_name, "xyz");
}
