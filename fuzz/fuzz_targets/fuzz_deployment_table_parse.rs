// Copyright (c) 2026 Amunchain
// Licensed under the Apache-2.0 License.

#![no_main]
#![forbid(unsafe_code)]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = ocr_config::registry::deployment_table::parse_deployment_table_toml(s);
        let _ = ocr_config::registry::deployment_table::deployment_table_from_toml(s);
    }
});
