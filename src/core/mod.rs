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

/// Audit helpers (decoded vs intended, payload fingerprints).
pub mod audit;
/// Payload encoder and decoder.
pub mod codec;
/// Hex and address parsing.
pub mod hexutil;
/// Node record transcoding.
pub mod identity;
/// Protocol parameters and validation.
pub mod params;
/// Identity, key and config tuple types.
pub mod types;
/// Config version allocation.
pub mod version;
