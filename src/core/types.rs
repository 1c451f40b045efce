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

//! Fixed-width identity types, protocol constants and the on-chain config tuple.

use std::fmt;
use std::time::Duration;

/// EVM address width.
pub const ADDRESS_LEN: usize = 20;
/// Off-chain (Ed25519) public key width declared by the protocol.
pub const OFFCHAIN_PUBLIC_KEY_LEN: usize = 32;
/// Shared-secret (X25519) encryption public key width.
pub const SHARED_SECRET_KEY_LEN: usize = 32;

/// Hard upper bound on the number of oracles in one configuration.
pub const MAX_ORACLES: usize = 31;
/// Longest accepted transmission schedule (`len(s) < 1000`).
pub const MAX_SCHEDULE_LEN: usize = 999;
/// Longest accepted peer id, in bytes.
pub const MAX_PEER_ID_LEN: usize = 128;
/// Oracle count below which a configuration is flagged.
pub const RECOMMENDED_MIN_ORACLES: usize = 5;

/// Lower bound for `delta_c` on slow-update chains.
pub const MIN_DELTA_C: Duration = Duration::from_secs(10 * 60);
/// Lower bound for `delta_stage`.
pub const MIN_DELTA_STAGE: Duration = Duration::from_secs(10);

/// 20-byte EVM address (transmitter or on-chain signer).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Construct from raw bytes.
    pub fn from_bytes(b: [u8; ADDRESS_LEN]) -> Self {
        Self(b)
    }
    /// Return bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

/// Off-chain signing public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffchainPublicKey([u8; OFFCHAIN_PUBLIC_KEY_LEN]);

impl OffchainPublicKey {
    /// Construct from raw bytes.
    pub fn from_bytes(b: [u8; OFFCHAIN_PUBLIC_KEY_LEN]) -> Self {
        Self(b)
    }
    /// Return bytes.
    pub fn as_bytes(&self) -> &[u8; OFFCHAIN_PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for OffchainPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OffchainPublicKey({})", hex::encode(self.0))
    }
}

/// Public key used to encrypt the shared secret for one oracle.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SharedSecretEncryptionPublicKey([u8; SHARED_SECRET_KEY_LEN]);

impl SharedSecretEncryptionPublicKey {
    /// Construct from raw bytes.
    pub fn from_bytes(b: [u8; SHARED_SECRET_KEY_LEN]) -> Self {
        Self(b)
    }
    /// Return bytes.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SharedSecretEncryptionPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecretEncryptionPublicKey({})", hex::encode(self.0))
    }
}

/// Validated identity of one oracle node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleIdentity {
    /// Address that submits transactions.
    pub transmit_address: Address,
    /// Address whose signatures the contract accepts.
    pub on_chain_signing_address: Address,
    /// libp2p peer id (base58).
    pub peer_id: String,
    /// Off-chain signing key.
    pub offchain_public_key: OffchainPublicKey,
}

/// `OracleIdentity` plus the key used for shared-secret distribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleIdentityExtra {
    /// Base identity.
    pub identity: OracleIdentity,
    /// Shared-secret encryption key.
    pub shared_secret_encryption_public_key: SharedSecretEncryptionPublicKey,
}

/// The arguments of the contract's `setConfig` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedConfig {
    /// On-chain signing addresses, in identity order.
    pub signers: Vec<Address>,
    /// Transmit addresses, in identity order.
    pub transmitters: Vec<Address>,
    /// Fault threshold (`f`).
    pub threshold: u8,
    /// Version tag from the external counter.
    pub version: u64,
    /// Opaque encoded parameters.
    pub payload: Vec<u8>,
}

impl EncodedConfig {
    /// Payload as `0x`-prefixed lowercase hex.
    pub fn payload_hex(&self) -> String {
        crate::core::hexutil::encode_prefixed(&self.payload)
    }
}
