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

//! Structured logging setup for binaries.
//!
//! - `OCR_CONFIG_LOG`: env-filter directive (default `info`).
//! - `OCR_CONFIG_LOG_JSON=1`: JSON lines instead of compact text.

use tracing_subscriber::EnvFilter;

/// Filter directive variable.
pub const LOG_ENV: &str = "OCR_CONFIG_LOG";
/// JSON toggle variable.
pub const LOG_JSON_ENV: &str = "OCR_CONFIG_LOG_JSON";

fn json_enabled() -> bool {
    matches!(
        std::env::var(LOG_JSON_ENV).as_deref().map(str::trim),
        Ok("1") | Ok("true")
    )
}

/// Install the global subscriber. Logs go to stderr so stdout stays machine-readable.
/// A second call is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    let _ = if json_enabled() {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
