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

//! OCR configuration codec.
//!
//! Turns operator node records and protocol timing parameters into the
//! arguments of an offchain-aggregator `setConfig` call, and reads a submitted
//! payload back for audit:
//! - Identity transcoding (hex addresses/keys, libp2p peer ids)
//! - Parameter validation against protocol bounds
//! - Payload encoding/decoding with strict length checks
//! - Deployment tables (TOML) and structured logging for the CLI

/// Codec core (types, transcoding, validation, encode/decode, audit).
pub mod core;
/// Observability (structured logging setup).
pub mod monitoring;
/// Deployment tables.
pub mod registry;

pub use crate::core::codec::{decode, decode_payload, encode, encode_with_source};
pub use crate::core::identity::transcode;
pub use crate::core::params::{validate, validate_with};
