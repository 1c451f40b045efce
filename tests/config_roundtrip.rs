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

use ocr_config::core::codec::{decode, decode_payload, encode, DecodeError, EncodeError};
use ocr_config::core::identity::{transcode, NodeRecord, TranscodeError};
use ocr_config::core::params::{validate, ProtocolParameters, ValidationError};
use ocr_config::core::types::OracleIdentityExtra;
use std::time::Duration;

fn record(transmit: &str, sign: &str, config: &str, offchain: &str, peer: &str) -> NodeRecord {
    NodeRecord {
        id: None,
        transmit_address: transmit.into(),
        sign_address: sign.into(),
        config_pub_key: config.into(),
        off_chain_pub_key: offchain.into(),
        peer_id: peer.into(),
        off_chain_key_id: None,
    }
}

fn records() -> Vec<NodeRecord> {
    vec![
        record(
            "0x60A1b1932BbB7E6cCe543c0630f283f39ACfF21a",
            "0x78Ec0b787d4baEc3b9970D57De3894a05ebb7f3a",
            "8528cafe173b7d0904f40e5822b383ec3415eae1ff1818027b3c9f974232cd00",
            "4b3b101552011af5a53914f59a8a79051f66f818a31d3a1cc392764c5df056e8",
            "12D3KooWJCEsfgchffSMFo3WWpJaeVKpb1cx5iUhax7GPGXmvpto",
        ),
        record(
            "0x14cBF542Aa01EFF4e8a869db97aE04ba75C5D9F4",
            "0x020C371e6eB32111e390370D16561d5cF54feb40",
            "885dacf4e88fa97ce7f9c9dc08bcafcc4a1806e4c5aedd8175b6c6fe57742358",
            "e976613c8dcd0c0e280ad00f5d59c71955acaa6a9b3e2cddf216da75c4153ce4",
            "12D3KooWK2N5cverNrfdu7DswaNGFu4iCFG1dgwgotY7iVkQNE1F",
        ),
        record(
            "0x4e1fa23140017d34F9904e6A2a8109F9C0b672D9",
            "0xD1308da16391e0ffAB05cCFfa6ad1d713Ded2527",
            "8c1235d463ae93adfaab17747d01f5c5ed0248025c30a3fa98434807dcd84965",
            "cec8fc656019f4ff1e26415af59a04fea8bab885df80adbfc5aa156b4642f7e0",
            "12D3KooWDjoTCv3HBUfVGTBxo9z4zjsVYdDSPaUWZKZKFKKJ6akq",
        ),
        record(
            "0x4B8cf000ccd6FefEFf586E7E50406E2845d83080",
            "0x988722c55d231ba13Feb39F53a402F3a35EA079c",
            "3b1d8e27c64d21491647471d3f8b81b0d8673deba243b6d24e1f812906185b51",
            "01a37258fa071968ae944b5f06b3b7aae3123037029fec784fd0a22f299670ec",
            "12D3KooWKaVh29LwUq9NfvRQw8nFuzUJrPfYzpzQFWPSCwnpkhij",
        ),
        record(
            "0x2B979C416BF7D37920b61C4E266d2da72Bd0c772",
            "0x79f1D85B77ac14D901C83C015A7f696107d6FC5f",
            "869d1342208dfcaed5c596fae64290b4a669c07c3bce45b5357d0264b3c64312",
            "3f930dc6e25223622d1e12e70c506b8caeff61a116c2f3d1ee7672d25eb6bbdf",
            "12D3KooWC5Bi42rp3gH9p3DmDCk4HVgyA67BcXTDhWRtp8sdwWcz",
        ),
    ]
}

fn identities() -> Vec<OracleIdentityExtra> {
    records().iter().map(|r| transcode(r).expect("valid record")).collect()
}

fn scenario_params() -> ProtocolParameters {
    ProtocolParameters {
        delta_progress: Duration::from_secs(35),
        delta_resend: Duration::from_secs(17),
        delta_round: Duration::from_secs(30),
        delta_grace: Duration::from_secs(12),
        delta_c: Duration::from_secs(10 * 60),
        delta_stage: Duration::from_secs(60),
        alpha_ppb: 10_000_000,
        r_max: 6,
        transmission_schedule: vec![1, 2, 2, 2, 2],
        f: 1,
        oracle_count: 5,
    }
}

#[test]
fn five_oracle_scenario_encodes_and_decodes() {
    let params = scenario_params();
    let ids = identities();
    validate(&params, ids.len()).expect("valid params");

    let cfg = encode(&params, &ids, 1).expect("encode");
    assert_eq!(cfg.signers.len(), 5);
    assert_eq!(cfg.transmitters.len(), 5);
    assert_eq!(cfg.threshold, 1);
    assert_eq!(
        cfg.signers[2].to_string(),
        "0xd1308da16391e0ffab05ccffa6ad1d713ded2527"
    );
    assert_eq!(
        cfg.transmitters[4].to_string(),
        "0x2b979c416bf7d37920b61c4e266d2da72bd0c772"
    );

    let p = decode_payload(&cfg.payload).expect("decode");
    assert_eq!(p.r_max, 6);
    assert_eq!(p.alpha_ppb, 10_000_000);
    assert_eq!(p.transmission_schedule, vec![1, 2, 2, 2, 2]);
    assert_eq!(p.delta_c, Duration::from_secs(600));
    assert_eq!(p.peer_ids[1], "12D3KooWK2N5cverNrfdu7DswaNGFu4iCFG1dgwgotY7iVkQNE1F");
    assert_eq!(
        hex::encode(p.offchain_public_keys[0].as_bytes()),
        "4b3b101552011af5a53914f59a8a79051f66f818a31d3a1cc392764c5df056e8"
    );
    assert_eq!(
        hex::encode(p.shared_secret_encryption_public_keys[4].as_bytes()),
        "869d1342208dfcaed5c596fae64290b4a669c07c3bce45b5357d0264b3c64312"
    );
}

#[test]
fn decoded_config_rebuilds_parameters() {
    let params = scenario_params();
    let cfg = encode(&params, &identities(), 42).unwrap();
    let d = decode(&cfg).unwrap();
    assert_eq!(d.to_parameters(), params);
    assert_eq!(d.version, 42);
}

#[test]
fn encoding_is_deterministic() {
    let a = encode(&scenario_params(), &identities(), 1).unwrap();
    let b = encode(&scenario_params(), &identities(), 1).unwrap();
    assert_eq!(a, b);
}

#[test]
fn malformed_config_key_is_rejected() {
    let mut r = records().remove(0);
    r.config_pub_key = "zz".into();
    assert!(matches!(transcode(&r), Err(TranscodeError::MalformedHex { .. })));
}

#[test]
fn thirty_one_byte_offchain_key_is_rejected() {
    let mut r = records().remove(0);
    r.off_chain_pub_key.truncate(62);
    assert!(matches!(
        transcode(&r),
        Err(TranscodeError::LengthMismatch { expected: 32, actual: 31, .. })
    ));
}

#[test]
fn round_ordering_violation() {
    let mut params = scenario_params();
    params.delta_round = Duration::from_secs(10);
    params.delta_progress = Duration::from_secs(5);
    assert_eq!(validate(&params, 5), Err(ValidationError::RoundOrderingViolated));
}

#[test]
fn four_identities_for_five_oracles() {
    let params = scenario_params();
    let mut ids = identities();
    ids.pop();
    assert_eq!(
        validate(&params, ids.len()),
        Err(ValidationError::IdentityCountMismatch { expected: 5, actual: 4 })
    );
    assert_eq!(
        encode(&params, &ids, 1),
        Err(EncodeError::CountMismatch { expected: 5, actual: 4 })
    );
}

#[test]
fn payload_missing_last_four_bytes_is_truncated() {
    let cfg = encode(&scenario_params(), &identities(), 1).unwrap();
    let cut = &cfg.payload[..cfg.payload.len() - 4];
    assert!(matches!(decode_payload(cut), Err(DecodeError::Truncated { .. })));
}
