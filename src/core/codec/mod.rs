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

//! Config payload codec.
//!
//! ## Payload layout (big-endian, durations in nanoseconds)
//!
//! ```text
//! delta_progress u64 | delta_resend u64 | delta_round u64 | delta_grace u64 | delta_c u64
//! alpha_ppb u64 | delta_stage u64 | r_max u8
//! schedule_len u64 | schedule_len x u8
//! oracle_count u64
//! oracle_count x (varint len || peer_id utf8)
//! oracle_count x offchain_public_key[32]
//! oracle_count x shared_secret_encryption_public_key[32]
//! ```
//!
//! Signers, transmitters, threshold and version travel beside the payload in the
//! contract call, not inside it.

/// Payload reader.
pub mod decode;
/// Payload writer and `setConfig` argument builder.
pub mod encode;
mod wire;

pub use decode::{decode, decode_payload, DecodedConfig, DecodedPayload};
pub use encode::{encode, encode_with_source};

use thiserror::Error;

/// Encoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// No identities supplied.
    #[error("empty identity set")]
    EmptyIdentitySet,
    /// Identity count differs from `oracle_count`.
    #[error("oracle_count {expected} but {actual} identities")]
    CountMismatch {
        /// `oracle_count`.
        expected: usize,
        /// Identities supplied.
        actual: usize,
    },
    /// Schedule longer than the wire format allows.
    #[error("schedule of {len} entries exceeds {max}")]
    ScheduleOverflow {
        /// Schedule length.
        len: usize,
        /// Maximum.
        max: usize,
    },
    /// Duration does not fit in u64 nanoseconds.
    #[error("{field} overflows u64 nanoseconds")]
    DurationOverflow {
        /// Field.
        field: &'static str,
    },
    /// More identities than the protocol allows.
    #[error("{count} oracles exceeds {max}")]
    TooManyOracles {
        /// Identities supplied.
        count: usize,
        /// Maximum.
        max: usize,
    },
    /// The version source has no versions left.
    #[error("version source exhausted")]
    VersionExhausted,
    /// Peer id longer than the wire cap.
    #[error("peer id of oracle {index} too long")]
    PeerIdTooLong {
        /// Oracle index.
        index: usize,
    },
}

/// Decoding errors. Decoding is all-or-nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A field runs past the end of the payload.
    #[error("{field}: need {needed} bytes, {remaining} left")]
    Truncated {
        /// Field being read.
        field: &'static str,
        /// Bytes required.
        needed: usize,
        /// Bytes available.
        remaining: usize,
    },
    /// Bytes remain after the last field.
    #[error("{count} trailing bytes")]
    TrailingBytes {
        /// Excess bytes.
        count: usize,
    },
    /// A length or count field is out of range.
    #[error("{field}: invalid length {value}")]
    LengthFieldInvalid {
        /// Field.
        field: &'static str,
        /// Decoded value.
        value: u64,
    },
    /// Peer id bytes are not UTF-8.
    #[error("peer id of oracle {index} is not utf-8")]
    InvalidPeerId {
        /// Oracle index.
        index: usize,
    },
}
