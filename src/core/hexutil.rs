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

//! Hex helpers for addresses and keys.
//!
//! Addresses follow the EVM convention: optional `0x` prefix, any letter case,
//! checksum casing ignored.

use thiserror::Error;

/// Hex parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexError {
    /// Non-hex character or odd length.
    #[error("malformed hex")]
    Malformed,
    /// Decoded to the wrong number of bytes.
    #[error("expected {expected} bytes, got {actual}")]
    Length {
        /// Required width.
        expected: usize,
        /// Decoded width.
        actual: usize,
    },
}

fn strip_prefix(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string, tolerating a `0x` prefix and surrounding whitespace.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, HexError> {
    hex::decode(strip_prefix(s)).map_err(|_| HexError::Malformed)
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], HexError> {
    let bytes = decode_hex(s)?;
    if bytes.len() != N {
        return Err(HexError::Length {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Parse a 20-byte EVM address.
pub fn parse_address(s: &str) -> Result<[u8; 20], HexError> {
    decode_fixed::<20>(s)
}

/// Encode as `0x`-prefixed lowercase hex.
pub fn encode_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_case_is_ignored() {
        let mixed = parse_address("0xd618B820FAFC1F4B98d7BCa6F125186A5fc04F8C").unwrap();
        let lower = parse_address("0xd618b820fafc1f4b98d7bca6f125186a5fc04f8c").unwrap();
        let bare = parse_address("D618B820FAFC1F4B98D7BCA6F125186A5FC04F8C").unwrap();
        assert_eq!(mixed, lower);
        assert_eq!(mixed, bare);
        assert_eq!(mixed[0], 0xd6);
    }

    #[test]
    fn short_address_is_length_error() {
        assert_eq!(
            parse_address("0xd618"),
            Err(HexError::Length { expected: 20, actual: 2 })
        );
    }

    #[test]
    fn non_hex_is_malformed() {
        assert_eq!(decode_hex("zz"), Err(HexError::Malformed));
        assert_eq!(decode_hex("abc"), Err(HexError::Malformed));
    }

    #[test]
    fn encode_prefixed_lowercases() {
        assert_eq!(encode_prefixed(&[0xAB, 0x01]), "0xab01");
        assert_eq!(encode_prefixed(&[]), "0x");
    }
}
