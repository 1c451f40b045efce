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

use super::wire::Reader;
use super::DecodeError;
use crate::core::{
    params::ProtocolParameters,
    types::{
        Address, EncodedConfig, OffchainPublicKey, SharedSecretEncryptionPublicKey, MAX_ORACLES,
        MAX_PEER_ID_LEN, MAX_SCHEDULE_LEN, OFFCHAIN_PUBLIC_KEY_LEN, SHARED_SECRET_KEY_LEN,
    },
};
use std::time::Duration;
use tracing::debug;

/// Everything carried inside a payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedPayload {
    /// See [`ProtocolParameters::delta_progress`].
    pub delta_progress: Duration,
    /// See [`ProtocolParameters::delta_resend`].
    pub delta_resend: Duration,
    /// See [`ProtocolParameters::delta_round`].
    pub delta_round: Duration,
    /// See [`ProtocolParameters::delta_grace`].
    pub delta_grace: Duration,
    /// See [`ProtocolParameters::delta_c`].
    pub delta_c: Duration,
    /// See [`ProtocolParameters::alpha_ppb`].
    pub alpha_ppb: u64,
    /// See [`ProtocolParameters::delta_stage`].
    pub delta_stage: Duration,
    /// See [`ProtocolParameters::r_max`].
    pub r_max: u8,
    /// See [`ProtocolParameters::transmission_schedule`].
    pub transmission_schedule: Vec<u8>,
    /// Number of oracles.
    pub oracle_count: usize,
    /// Peer ids, in oracle order.
    pub peer_ids: Vec<String>,
    /// Off-chain public keys, in oracle order.
    pub offchain_public_keys: Vec<OffchainPublicKey>,
    /// Shared-secret encryption keys, in oracle order.
    pub shared_secret_encryption_public_keys: Vec<SharedSecretEncryptionPublicKey>,
}

/// A payload together with the outer `setConfig` fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedConfig {
    /// Signing addresses as submitted.
    pub signers: Vec<Address>,
    /// Transmit addresses as submitted.
    pub transmitters: Vec<Address>,
    /// Fault threshold.
    pub f: u8,
    /// Config version.
    pub version: u64,
    /// Decoded payload.
    pub payload: DecodedPayload,
}

impl DecodedConfig {
    /// Rebuild the parameter set this config was encoded from.
    pub fn to_parameters(&self) -> ProtocolParameters {
        let p = &self.payload;
        ProtocolParameters {
            delta_progress: p.delta_progress,
            delta_resend: p.delta_resend,
            delta_round: p.delta_round,
            delta_grace: p.delta_grace,
            delta_c: p.delta_c,
            delta_stage: p.delta_stage,
            alpha_ppb: p.alpha_ppb,
            r_max: p.r_max,
            transmission_schedule: p.transmission_schedule.clone(),
            f: self.f,
            oracle_count: p.oracle_count,
        }
    }
}

fn duration(r: &mut Reader<'_>, field: &'static str) -> Result<Duration, DecodeError> {
    Ok(Duration::from_nanos(r.u64(field)?))
}

/// Decode a raw payload. Any structural inconsistency fails the whole call.
pub fn decode_payload(blob: &[u8]) -> Result<DecodedPayload, DecodeError> {
    let mut r = Reader::new(blob);

    let delta_progress = duration(&mut r, "delta_progress")?;
    let delta_resend = duration(&mut r, "delta_resend")?;
    let delta_round = duration(&mut r, "delta_round")?;
    let delta_grace = duration(&mut r, "delta_grace")?;
    let delta_c = duration(&mut r, "delta_c")?;
    let alpha_ppb = r.u64("alpha_ppb")?;
    let delta_stage = duration(&mut r, "delta_stage")?;
    let r_max = r.u8("r_max")?;

    let schedule_len = r.u64("schedule_len")?;
    if schedule_len > MAX_SCHEDULE_LEN as u64 {
        return Err(DecodeError::LengthFieldInvalid {
            field: "schedule_len",
            value: schedule_len,
        });
    }
    let transmission_schedule = r.take("schedule", schedule_len as usize)?.to_vec();

    let count = r.u64("oracle_count")?;
    if count == 0 || count > MAX_ORACLES as u64 {
        return Err(DecodeError::LengthFieldInvalid {
            field: "oracle_count",
            value: count,
        });
    }
    let n = count as usize;

    let mut peer_ids = Vec::with_capacity(n);
    for index in 0..n {
        let len = r.varint("peer_id_len")?;
        if len > MAX_PEER_ID_LEN as u64 {
            return Err(DecodeError::LengthFieldInvalid {
                field: "peer_id_len",
                value: len,
            });
        }
        let raw = r.take("peer_id", len as usize)?;
        let s = std::str::from_utf8(raw).map_err(|_| DecodeError::InvalidPeerId { index })?;
        peer_ids.push(s.to_string());
    }

    let mut offchain_public_keys = Vec::with_capacity(n);
    for _ in 0..n {
        let k = r.array::<OFFCHAIN_PUBLIC_KEY_LEN>("offchain_public_key")?;
        offchain_public_keys.push(OffchainPublicKey::from_bytes(k));
    }

    let mut shared_secret_encryption_public_keys = Vec::with_capacity(n);
    for _ in 0..n {
        let k = r.array::<SHARED_SECRET_KEY_LEN>("shared_secret_encryption_public_key")?;
        shared_secret_encryption_public_keys.push(SharedSecretEncryptionPublicKey::from_bytes(k));
    }

    r.finish()?;

    Ok(DecodedPayload {
        delta_progress,
        delta_resend,
        delta_round,
        delta_grace,
        delta_c,
        alpha_ppb,
        delta_stage,
        r_max,
        transmission_schedule,
        oracle_count: n,
        peer_ids,
        offchain_public_keys,
        shared_secret_encryption_public_keys,
    })
}

/// Decode a full `setConfig` tuple. Signer and transmitter counts must agree
/// with the payload's oracle count.
pub fn decode(cfg: &EncodedConfig) -> Result<DecodedConfig, DecodeError> {
    let payload = decode_payload(&cfg.payload)?;
    for (field, len) in [
        ("signers", cfg.signers.len()),
        ("transmitters", cfg.transmitters.len()),
    ] {
        if len != payload.oracle_count {
            return Err(DecodeError::LengthFieldInvalid {
                field,
                value: len as u64,
            });
        }
    }
    debug!(
        oracles = payload.oracle_count,
        version = cfg.version,
        "decoded config"
    );
    Ok(DecodedConfig {
        signers: cfg.signers.clone(),
        transmitters: cfg.transmitters.clone(),
        f: cfg.threshold,
        version: cfg.version,
        payload,
    })
}
