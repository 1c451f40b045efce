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
#![deny(missing_docs)]

//! Identity transcoder: textual node records into fixed-width oracle identities.
//!
//! A node record is what operators hand over when joining a feed:
//!
//! ```text
//! transmit_address  = "0x60A1b1932BbB7E6cCe543c0630f283f39ACfF21a"
//! sign_address      = "0xd618B820FAFC1F4B98d7BCa6F125186A5fc04F8C"
//! config_pub_key    = "8f8602b5...c12c3e"   # 32 bytes, X25519
//! off_chain_pub_key = "9ec24f84...ec8b6a"   # 32 bytes, Ed25519
//! peer_id           = "12D3KooW..."
//! ```

use crate::core::{
    hexutil::{decode_fixed, HexError},
    types::{
        Address, OffchainPublicKey, OracleIdentity, OracleIdentityExtra,
        SharedSecretEncryptionPublicKey, ADDRESS_LEN, MAX_PEER_ID_LEN, OFFCHAIN_PUBLIC_KEY_LEN,
        SHARED_SECRET_KEY_LEN,
    },
};
use libp2p::PeerId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transcoding errors. `field` names the offending record field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscodeError {
    /// Field is not valid hex.
    #[error("{field}: malformed hex")]
    MalformedHex {
        /// Record field.
        field: &'static str,
    },
    /// Field decoded to the wrong width.
    #[error("{field}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Record field.
        field: &'static str,
        /// Required width.
        expected: usize,
        /// Decoded width.
        actual: usize,
    },
    /// Peer id is empty, unprintable, oversized or not a libp2p peer id.
    #[error("invalid peer id")]
    InvalidPeerId,
}

/// One operator-supplied node record, as stored in deployment tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Operator-side numbering, informational only.
    #[serde(default)]
    pub id: Option<u32>,
    /// Transmitter address (`0x` hex).
    #[serde(alias = "TransmitAddress")]
    pub transmit_address: String,
    /// On-chain signing address (`0x` hex).
    #[serde(alias = "SignAddress")]
    pub sign_address: String,
    /// Shared-secret encryption public key (raw hex).
    #[serde(alias = "ConfigPubKey")]
    pub config_pub_key: String,
    /// Off-chain signing public key (raw hex).
    #[serde(alias = "OffChainPubKey")]
    pub off_chain_pub_key: String,
    /// libp2p peer id (base58).
    #[serde(alias = "PeerID")]
    pub peer_id: String,
    /// Node-local key bundle id. Not part of the on-chain config.
    #[serde(default, alias = "OffChainKeyId")]
    pub off_chain_key_id: Option<String>,
}

fn fixed<const N: usize>(field: &'static str, s: &str) -> Result<[u8; N], TranscodeError> {
    decode_fixed::<N>(s).map_err(|e| match e {
        HexError::Malformed => TranscodeError::MalformedHex { field },
        HexError::Length { expected, actual } => TranscodeError::LengthMismatch {
            field,
            expected,
            actual,
        },
    })
}

fn check_peer_id(s: &str) -> Result<String, TranscodeError> {
    if s.is_empty() || s.len() > MAX_PEER_ID_LEN || !s.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(TranscodeError::InvalidPeerId);
    }
    let raw = bs58::decode(s)
        .into_vec()
        .map_err(|_| TranscodeError::InvalidPeerId)?;
    PeerId::from_bytes(&raw).map_err(|_| TranscodeError::InvalidPeerId)?;
    Ok(s.to_string())
}

/// Transcode one node record. Fields are checked in record order and the first
/// failure is returned.
pub fn transcode(record: &NodeRecord) -> Result<OracleIdentityExtra, TranscodeError> {
    let transmit = fixed::<ADDRESS_LEN>("transmit_address", &record.transmit_address)?;
    let signer = fixed::<ADDRESS_LEN>("sign_address", &record.sign_address)?;
    let config_key = fixed::<SHARED_SECRET_KEY_LEN>("config_pub_key", &record.config_pub_key)?;
    let offchain_key =
        fixed::<OFFCHAIN_PUBLIC_KEY_LEN>("off_chain_pub_key", &record.off_chain_pub_key)?;
    let peer_id = check_peer_id(&record.peer_id)?;

    Ok(OracleIdentityExtra {
        identity: OracleIdentity {
            transmit_address: Address::from_bytes(transmit),
            on_chain_signing_address: Address::from_bytes(signer),
            peer_id,
            offchain_public_key: OffchainPublicKey::from_bytes(offchain_key),
        },
        shared_secret_encryption_public_key: SharedSecretEncryptionPublicKey::from_bytes(
            config_key,
        ),
    })
}

/// Transcode records in order. On failure, returns the index of the first bad record.
pub fn transcode_all(
    records: &[NodeRecord],
) -> Result<Vec<OracleIdentityExtra>, (usize, TranscodeError)> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| transcode(r).map_err(|e| (i, e)))
        .collect()
}
