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

//! `ocr-config` command line.
//!
//! ```text
//! ocr-config encode <table.toml> <deployment> <version>
//! ocr-config decode <payload-hex>
//! ocr-config audit  <table.toml> <deployment> <version> <payload-hex>
//! ```
//!
//! `OCR_CONFIG_LENIENT=1` accepts deployments below the recommended oracle count.

use anyhow::{bail, Context, Result};
use ocr_config::core::{
    audit::{compare, payload_fingerprint},
    codec::{decode_payload, encode, DecodedConfig, DecodedPayload},
    hexutil::{decode_hex, encode_prefixed},
    params::{validate_with, ValidationPolicy},
    types::{Address, EncodedConfig},
};
use ocr_config::monitoring::logging;
use ocr_config::registry::deployment_table::{load_deployment_table, Deployment};
use tracing::{info, warn};

const USAGE: &str = "usage:
  ocr-config encode <table.toml> <deployment> <version>
  ocr-config decode <payload-hex>
  ocr-config audit  <table.toml> <deployment> <version> <payload-hex>";

fn env_flag(key: &str) -> bool {
    matches!(std::env::var(key).as_deref(), Ok("1") | Ok("true"))
}

fn policy() -> ValidationPolicy {
    if env_flag("OCR_CONFIG_LENIENT") {
        ValidationPolicy::Lenient
    } else {
        ValidationPolicy::Strict
    }
}

fn load(table: &str, name: &str) -> Result<Deployment> {
    let t = load_deployment_table(table).with_context(|| format!("loading {table}"))?;
    let d = t.get(name)?.clone();
    validate_with(&d.params, d.identities.len(), policy())
        .with_context(|| format!("deployment {name} fails validation"))?;
    Ok(d)
}

fn parse_version(s: &str) -> Result<u64> {
    s.parse::<u64>().with_context(|| format!("bad version {s:?}"))
}

fn join(v: &[Address]) -> String {
    v.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

fn print_encoded(cfg: &EncodedConfig) {
    println!("signers: [{}]", join(&cfg.signers));
    println!("transmitters: [{}]", join(&cfg.transmitters));
    println!("threshold: {}", cfg.threshold);
    println!("version: {}", cfg.version);
    println!("payload: {}", cfg.payload_hex());
    println!(
        "fingerprint: {}",
        encode_prefixed(&payload_fingerprint(cfg.version, &cfg.payload))
    );
}

fn print_payload(p: &DecodedPayload) {
    println!("delta_progress: {:?}", p.delta_progress);
    println!("delta_resend: {:?}", p.delta_resend);
    println!("delta_round: {:?}", p.delta_round);
    println!("delta_grace: {:?}", p.delta_grace);
    println!("delta_c: {:?}", p.delta_c);
    println!("alpha_ppb: {}", p.alpha_ppb);
    println!("delta_stage: {:?}", p.delta_stage);
    println!("r_max: {}", p.r_max);
    println!("transmission_schedule: {:?}", p.transmission_schedule);
    println!("oracle_count: {}", p.oracle_count);
    for i in 0..p.oracle_count {
        println!(
            "oracle[{i}]: peer_id={} offchain_public_key={} shared_secret_encryption_public_key={}",
            p.peer_ids[i],
            hex::encode(p.offchain_public_keys[i].as_bytes()),
            hex::encode(p.shared_secret_encryption_public_keys[i].as_bytes()),
        );
    }
}

fn run(args: &[String]) -> Result<()> {
    match args {
        [cmd, table, name, version] if cmd == "encode" => {
            let d = load(table, name)?;
            let cfg = encode(&d.params, &d.identities, parse_version(version)?)?;
            info!(deployment = %name, version = cfg.version, "config encoded");
            print_encoded(&cfg);
        }
        [cmd, payload] if cmd == "decode" => {
            let blob = decode_hex(payload).context("payload is not hex")?;
            let p = decode_payload(&blob)?;
            print_payload(&p);
        }
        [cmd, table, name, version, payload] if cmd == "audit" => {
            let d = load(table, name)?;
            let version = parse_version(version)?;
            let blob = decode_hex(payload).context("payload is not hex")?;

            // Only the payload is supplied; the outer fields come from the table.
            let decoded = DecodedConfig {
                signers: d.identities.iter().map(|o| o.identity.on_chain_signing_address).collect(),
                transmitters: d.identities.iter().map(|o| o.identity.transmit_address).collect(),
                f: d.params.f,
                version,
                payload: decode_payload(&blob)?,
            };
            let mismatches = compare(&d.params, &d.identities, &decoded);
            println!(
                "fingerprint: {}",
                encode_prefixed(&payload_fingerprint(version, &blob))
            );
            if !mismatches.is_empty() {
                for m in &mismatches {
                    warn!(field = %m.field, expected = %m.expected, actual = %m.actual, "mismatch");
                    println!("{}: expected {} got {}", m.field, m.expected, m.actual);
                }
                bail!("{} field(s) differ from deployment {name}", mismatches.len());
            }
            println!("ok: payload matches deployment {name}");
        }
        _ => bail!("{USAGE}"),
    }
    Ok(())
}

fn main() {
    logging::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
