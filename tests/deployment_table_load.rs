// Copyright (c) 2026 Amunchain
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]

use ocr_config::core::audit::compare;
use ocr_config::core::codec::{decode, encode_with_source};
use ocr_config::core::identity::TranscodeError;
use ocr_config::core::params::{validate, validate_with, ValidationError, ValidationPolicy};
use ocr_config::core::version::MonotonicVersion;
use ocr_config::registry::deployment_table::{load_deployment_table, TableError};
use std::fs;
use std::time::Duration;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/deployments.toml");

#[test]
fn fixture_table_loads_by_name() {
    let table = load_deployment_table(FIXTURE).expect("load");
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.names().collect::<Vec<_>>(),
        vec!["bitlayer-test/1inch", "sepolia/1inch-slow"]
    );

    let d = table.get("bitlayer-test/1inch").unwrap();
    assert_eq!(d.identities.len(), 5);
    assert_eq!(d.params.transmission_schedule, vec![1, 2, 2, 2, 2]);
    validate(&d.params, d.identities.len()).expect("valid");
}

#[test]
fn encode_and_audit_deployment() {
    let table = load_deployment_table(FIXTURE).unwrap();
    let d = table.get("bitlayer-test/1inch").unwrap();
    let versions = MonotonicVersion::after(3);

    let cfg = encode_with_source(&d.params, &d.identities, &versions).unwrap();
    assert_eq!(cfg.version, 4);
    assert_eq!(
        cfg.signers[0].to_string(),
        "0xd618b820fafc1f4b98d7bca6f125186a5fc04f8c"
    );

    let decoded = decode(&cfg).unwrap();
    assert!(compare(&d.params, &d.identities, &decoded).is_empty());

    // A different deployment of overlapping nodes must not pass.
    let other = table.get("sepolia/1inch-slow").unwrap();
    assert!(!compare(&other.params, &other.identities, &decoded).is_empty());
}

#[test]
fn four_node_deployment_needs_lenient_policy() {
    let table = load_deployment_table(FIXTURE).unwrap();
    let d = table.get("sepolia/1inch-slow").unwrap();
    assert_eq!(d.params.delta_c, Duration::from_secs(3600));
    assert_eq!(d.params.delta_progress, Duration::from_secs(65));

    assert_eq!(
        validate(&d.params, 4),
        Err(ValidationError::BelowRecommendedOracleCount { count: 4, recommended: 5 })
    );
    assert_eq!(validate_with(&d.params, 4, ValidationPolicy::Lenient), Ok(()));
}

#[test]
fn bad_record_reports_deployment_and_index() {
    let raw = fs::read_to_string(FIXTURE).unwrap().replacen(
        "3a59c3bf117db4183ee3f980dfc8eca5ca51bb5b82c4ce9aaf8cc540ca12e464",
        "zz",
        1,
    );
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deployments.toml");
    fs::write(&path, raw).expect("write");

    match load_deployment_table(&path) {
        Err(TableError::Transcode { deployment, index, source }) => {
            assert_eq!(deployment, "bitlayer-test/1inch");
            assert_eq!(index, 2);
            assert_eq!(source, TranscodeError::MalformedHex { field: "config_pub_key" });
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(matches!(
        load_deployment_table(dir.path().join("absent.toml")),
        Err(TableError::Read)
    ));
}
