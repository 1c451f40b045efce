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


#![no_main]
#![forbid(unsafe_code)]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ocr_config::core::codec::{decode, encode};
use ocr_config::core::params::ProtocolParameters;
use ocr_config::core::types::{
    Address, OffchainPublicKey, OracleIdentity, OracleIdentityExtra,
    SharedSecretEncryptionPublicKey,
};
use std::time::Duration;

#[derive(Clone, Debug, Arbitrary)]
struct Oracle {
    transmit: [u8; 20],
    signer: [u8; 20],
    peer_id: String,
    offchain: [u8; 32],
    shared: [u8; 32],
}

#[derive(Clone, Debug, Arbitrary)]
struct Input {
    nanos: [u64; 6],
    alpha_ppb: u64,
    r_max: u8,
    schedule: Vec<u8>,
    f: u8,
    version: u64,
    oracles: Vec<Oracle>,
}

fuzz_target!(|inp: Input| {
    let ids: Vec<OracleIdentityExtra> = inp
        .oracles
        .into_iter()
        .map(|o| OracleIdentityExtra {
            identity: OracleIdentity {
                transmit_address: Address::from_bytes(o.transmit),
                on_chain_signing_address: Address::from_bytes(o.signer),
                peer_id: o.peer_id,
                offchain_public_key: OffchainPublicKey::from_bytes(o.offchain),
            },
            shared_secret_encryption_public_key: SharedSecretEncryptionPublicKey::from_bytes(
                o.shared,
            ),
        })
        .collect();
    let d = |i: usize| Duration::from_nanos(inp.nanos[i]);
    let params = ProtocolParameters {
        delta_progress: d(0),
        delta_resend: d(1),
        delta_round: d(2),
        delta_grace: d(3),
        delta_c: d(4),
        delta_stage: d(5),
        alpha_ppb: inp.alpha_ppb,
        r_max: inp.r_max,
        transmission_schedule: inp.schedule,
        f: inp.f,
        oracle_count: ids.len(),
    };

    let Ok(cfg) = encode(&params, &ids, inp.version) else { return; };
    let back = decode(&cfg).expect("encoded config must decode");
    assert_eq!(back.to_parameters(), params);
});
