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
#![warn(missing_docs)]

//! Compare a config read back from chain with the intended one.

use crate::core::{
    codec::DecodedConfig,
    params::ProtocolParameters,
    types::OracleIdentityExtra,
};
use ring::digest;

/// Domain tag mixed into payload fingerprints.
const FINGERPRINT_DOMAIN: &[u8] = b"OCR-Config-Payload-v1";

/// SHA-256 over `domain || version || payload`.
pub fn payload_fingerprint(version: u64, payload: &[u8]) -> [u8; 32] {
    let mut ctx = digest::Context::new(&digest::SHA256);
    ctx.update(FINGERPRINT_DOMAIN);
    ctx.update(&version.to_be_bytes());
    ctx.update(payload);
    let d = ctx.finish();
    let mut out = [0u8; 32];
    out.copy_from_slice(d.as_ref());
    out
}

/// One field that differs between the intended and the decoded config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Field name, indexed for per-oracle fields (e.g. `peer_id[2]`).
    pub field: String,
    /// Intended value, rendered.
    pub expected: String,
    /// Decoded value, rendered.
    pub actual: String,
}

fn check<T: std::fmt::Debug + PartialEq>(out: &mut Vec<Mismatch>, field: String, a: &T, b: &T) {
    if a != b {
        out.push(Mismatch {
            field,
            expected: format!("{a:?}"),
            actual: format!("{b:?}"),
        });
    }
}

/// Every field where `decoded` differs from `intended`. Empty means identical.
pub fn compare(
    intended: &ProtocolParameters,
    identities: &[OracleIdentityExtra],
    decoded: &DecodedConfig,
) -> Vec<Mismatch> {
    let mut out = Vec::new();
    let got = decoded.to_parameters();

    check(&mut out, "delta_progress".into(), &intended.delta_progress, &got.delta_progress);
    check(&mut out, "delta_resend".into(), &intended.delta_resend, &got.delta_resend);
    check(&mut out, "delta_round".into(), &intended.delta_round, &got.delta_round);
    check(&mut out, "delta_grace".into(), &intended.delta_grace, &got.delta_grace);
    check(&mut out, "delta_c".into(), &intended.delta_c, &got.delta_c);
    check(&mut out, "delta_stage".into(), &intended.delta_stage, &got.delta_stage);
    check(&mut out, "alpha_ppb".into(), &intended.alpha_ppb, &got.alpha_ppb);
    check(&mut out, "r_max".into(), &intended.r_max, &got.r_max);
    check(
        &mut out,
        "transmission_schedule".into(),
        &intended.transmission_schedule,
        &got.transmission_schedule,
    );
    check(&mut out, "f".into(), &intended.f, &got.f);
    check(&mut out, "oracle_count".into(), &intended.oracle_count, &got.oracle_count);

    let n = identities.len();
    if n != decoded.payload.oracle_count
        || n != decoded.signers.len()
        || n != decoded.transmitters.len()
    {
        // Per-oracle comparison is meaningless once counts differ.
        check(
            &mut out,
            "identities".into(),
            &identities.len(),
            &decoded.payload.oracle_count,
        );
        return out;
    }

    let p = &decoded.payload;
    for (i, id) in identities.iter().enumerate() {
        check(
            &mut out,
            format!("signer[{i}]"),
            &id.identity.on_chain_signing_address,
            &decoded.signers[i],
        );
        check(
            &mut out,
            format!("transmitter[{i}]"),
            &id.identity.transmit_address,
            &decoded.transmitters[i],
        );
        check(&mut out, format!("peer_id[{i}]"), &id.identity.peer_id, &p.peer_ids[i]);
        check(
            &mut out,
            format!("offchain_public_key[{i}]"),
            &id.identity.offchain_public_key,
            &p.offchain_public_keys[i],
        );
        check(
            &mut out,
            format!("shared_secret_encryption_public_key[{i}]"),
            &id.shared_secret_encryption_public_key,
            &p.shared_secret_encryption_public_keys[i],
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::{decode, encode};
    use crate::core::types::{
        Address, OffchainPublicKey, OracleIdentity, SharedSecretEncryptionPublicKey,
    };

    fn identities() -> Vec<OracleIdentityExtra> {
        (0u8..5)
            .map(|i| OracleIdentityExtra {
                identity: OracleIdentity {
                    transmit_address: Address::from_bytes([i; 20]),
                    on_chain_signing_address: Address::from_bytes([i + 10; 20]),
                    peer_id: format!("p{i}"),
                    offchain_public_key: OffchainPublicKey::from_bytes([i; 32]),
                },
                shared_secret_encryption_public_key: SharedSecretEncryptionPublicKey::from_bytes(
                    [i; 32],
                ),
            })
            .collect()
    }

    #[test]
    fn identical_config_has_no_mismatches() {
        let p = ProtocolParameters::slow_updates(5);
        let ids = identities();
        let d = decode(&encode(&p, &ids, 1).unwrap()).unwrap();
        assert!(compare(&p, &ids, &d).is_empty());
    }

    #[test]
    fn reports_changed_fields() {
        let p = ProtocolParameters::slow_updates(5);
        let ids = identities();
        let d = decode(&encode(&p, &ids, 1).unwrap()).unwrap();

        let mut intended = p.clone();
        intended.r_max = 7;
        let mut want_ids = ids.clone();
        want_ids[3].identity.peer_id = "other".into();

        let m = compare(&intended, &want_ids, &d);
        let fields: Vec<_> = m.iter().map(|m| m.field.as_str()).collect();
        assert_eq!(fields, vec!["r_max", "peer_id[3]"]);
        assert_eq!(m[0].expected, "7");
        assert_eq!(m[0].actual, "6");
    }

    #[test]
    fn fingerprint_binds_version() {
        let a = payload_fingerprint(1, b"payload");
        let b = payload_fingerprint(2, b"payload");
        assert_ne!(a, b);
        assert_eq!(a, payload_fingerprint(1, b"payload"));
    }
}
