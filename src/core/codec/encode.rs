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

use super::wire::{put_u64, put_varint};
use super::EncodeError;
use crate::core::{
    params::ProtocolParameters,
    types::{
        EncodedConfig, OracleIdentityExtra, MAX_ORACLES, MAX_PEER_ID_LEN, MAX_SCHEDULE_LEN,
        OFFCHAIN_PUBLIC_KEY_LEN, SHARED_SECRET_KEY_LEN,
    },
    version::VersionSource,
};
use std::time::Duration;
use tracing::debug;

fn nanos(field: &'static str, d: Duration) -> Result<u64, EncodeError> {
    u64::try_from(d.as_nanos()).map_err(|_| EncodeError::DurationOverflow { field })
}

/// Cheap structural checks. Callers are expected to have run `validate` already.
fn precheck(
    params: &ProtocolParameters,
    identities: &[OracleIdentityExtra],
) -> Result<(), EncodeError> {
    if identities.is_empty() {
        return Err(EncodeError::EmptyIdentitySet);
    }
    if identities.len() > MAX_ORACLES {
        return Err(EncodeError::TooManyOracles {
            count: identities.len(),
            max: MAX_ORACLES,
        });
    }
    if identities.len() != params.oracle_count {
        return Err(EncodeError::CountMismatch {
            expected: params.oracle_count,
            actual: identities.len(),
        });
    }
    let len = params.transmission_schedule.len();
    if len > MAX_SCHEDULE_LEN {
        return Err(EncodeError::ScheduleOverflow {
            len,
            max: MAX_SCHEDULE_LEN,
        });
    }
    if let Some(index) = identities
        .iter()
        .position(|o| o.identity.peer_id.len() > MAX_PEER_ID_LEN)
    {
        return Err(EncodeError::PeerIdTooLong { index });
    }
    Ok(())
}

fn write_payload(
    params: &ProtocolParameters,
    identities: &[OracleIdentityExtra],
) -> Result<Vec<u8>, EncodeError> {
    let n = identities.len();
    let peer_bytes: usize = identities.iter().map(|o| o.identity.peer_id.len() + 1).sum();
    let mut out = Vec::with_capacity(
        7 * 8
            + 1
            + 8
            + params.transmission_schedule.len()
            + 8
            + peer_bytes
            + n * (OFFCHAIN_PUBLIC_KEY_LEN + SHARED_SECRET_KEY_LEN),
    );

    put_u64(&mut out, nanos("delta_progress", params.delta_progress)?);
    put_u64(&mut out, nanos("delta_resend", params.delta_resend)?);
    put_u64(&mut out, nanos("delta_round", params.delta_round)?);
    put_u64(&mut out, nanos("delta_grace", params.delta_grace)?);
    put_u64(&mut out, nanos("delta_c", params.delta_c)?);
    put_u64(&mut out, params.alpha_ppb);
    put_u64(&mut out, nanos("delta_stage", params.delta_stage)?);
    out.push(params.r_max);

    put_u64(&mut out, params.transmission_schedule.len() as u64);
    out.extend_from_slice(&params.transmission_schedule);

    put_u64(&mut out, n as u64);
    for o in identities {
        put_varint(&mut out, o.identity.peer_id.len() as u64);
        out.extend_from_slice(o.identity.peer_id.as_bytes());
    }
    for o in identities {
        out.extend_from_slice(o.identity.offchain_public_key.as_bytes());
    }
    for o in identities {
        out.extend_from_slice(o.shared_secret_encryption_public_key.as_bytes());
    }
    Ok(out)
}

/// Build the `setConfig` arguments for `identities` (kept in the given order).
///
/// `version` comes from the caller's version counter.
pub fn encode(
    params: &ProtocolParameters,
    identities: &[OracleIdentityExtra],
    version: u64,
) -> Result<EncodedConfig, EncodeError> {
    build(params, identities, || Some(version))
}

/// Like [`encode`], allocating the version from `source` only once encoding is
/// certain to succeed.
pub fn encode_with_source<V: VersionSource + ?Sized>(
    params: &ProtocolParameters,
    identities: &[OracleIdentityExtra],
    source: &V,
) -> Result<EncodedConfig, EncodeError> {
    build(params, identities, || source.next_version())
}

fn build(
    params: &ProtocolParameters,
    identities: &[OracleIdentityExtra],
    version: impl FnOnce() -> Option<u64>,
) -> Result<EncodedConfig, EncodeError> {
    precheck(params, identities)?;
    let payload = write_payload(params, identities)?;
    let version = version().ok_or(EncodeError::VersionExhausted)?;
    let cfg = EncodedConfig {
        signers: identities
            .iter()
            .map(|o| o.identity.on_chain_signing_address)
            .collect(),
        transmitters: identities
            .iter()
            .map(|o| o.identity.transmit_address)
            .collect(),
        threshold: params.f,
        version,
        payload,
    };

    debug!(
        oracles = identities.len(),
        threshold = params.f,
        version,
        payload_len = cfg.payload.len(),
        "encoded config"
    );
    Ok(cfg)
}
