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

//! Deployment tables: per-feed node records and parameter overrides.
//!
//! ## Format (TOML)
//! A table is an operator-maintained file handed to the codec by the caller. Each
//! deployment is looked up by name.
//!
//! ```text
//! version = 1
//!
//! [[deployment]]
//! name = "bitlayer-test/btc"
//!
//! [deployment.params]        # optional, defaults to the slow-update preset
//! delta_round_ms = 30000
//! r_max = 6
//!
//! [[deployment.node]]
//! transmit_address = "0x..."
//! sign_address = "0x..."
//! config_pub_key = "..."
//! off_chain_pub_key = "..."
//! peer_id = "12D3KooW..."
//! ```
//!
//! Loading transcodes every node record, so a table that loads only holds
//! well-formed identities. Parameter bounds are *not* checked here; run
//! `core::params::validate` before encoding.

use crate::core::{
    identity::{transcode_all, NodeRecord, TranscodeError},
    params::ProtocolParameters,
    types::OracleIdentityExtra,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Deployment table errors.
#[derive(Debug, Error)]
pub enum TableError {
    /// Cannot read table file.
    #[error("read deployment table")]
    Read,
    /// Cannot parse TOML.
    #[error("parse deployment table")]
    Parse(#[from] toml::de::Error),
    /// Table format version is unsupported.
    #[error("unsupported deployment table version {0}")]
    UnsupportedVersion(u32),
    /// Two deployments share a name.
    #[error("duplicate deployment {0:?}")]
    DuplicateDeployment(String),
    /// Deployment has no nodes.
    #[error("deployment {0:?} has no nodes")]
    EmptyDeployment(String),
    /// No deployment with that name.
    #[error("unknown deployment {0:?}")]
    UnknownDeployment(String),
    /// A node record failed to transcode.
    #[error("deployment {deployment:?} node {index}: {source}")]
    Transcode {
        /// Deployment name.
        deployment: String,
        /// Node index within the deployment.
        index: usize,
        /// Cause.
        source: TranscodeError,
    },
}

#[derive(Debug, Deserialize)]
struct TableFile {
    version: u32,
    #[serde(default, rename = "deployment")]
    deployments: Vec<DeploymentEntry>,
}

#[derive(Debug, Deserialize)]
struct DeploymentEntry {
    name: String,
    #[serde(default)]
    params: ParamsOverride,
    #[serde(default, rename = "node")]
    nodes: Vec<NodeRecord>,
}

/// Optional overrides on top of [`ProtocolParameters::slow_updates`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsOverride {
    /// `delta_progress` in ms.
    pub delta_progress_ms: Option<u64>,
    /// `delta_resend` in ms.
    pub delta_resend_ms: Option<u64>,
    /// `delta_round` in ms.
    pub delta_round_ms: Option<u64>,
    /// `delta_grace` in ms.
    pub delta_grace_ms: Option<u64>,
    /// `delta_c` in ms.
    pub delta_c_ms: Option<u64>,
    /// `delta_stage` in ms.
    pub delta_stage_ms: Option<u64>,
    /// `alpha_ppb`.
    pub alpha_ppb: Option<u64>,
    /// `r_max`.
    pub r_max: Option<u8>,
    /// Fault threshold.
    pub f: Option<u8>,
    /// Explicit transmission schedule.
    pub transmission_schedule: Option<Vec<u8>>,
}

impl ParamsOverride {
    /// Apply overrides to `base`.
    pub fn apply(&self, mut base: ProtocolParameters) -> ProtocolParameters {
        let ms = Duration::from_millis;
        if let Some(v) = self.delta_progress_ms {
            base.delta_progress = ms(v);
        }
        if let Some(v) = self.delta_resend_ms {
            base.delta_resend = ms(v);
        }
        if let Some(v) = self.delta_round_ms {
            base.delta_round = ms(v);
        }
        if let Some(v) = self.delta_grace_ms {
            base.delta_grace = ms(v);
        }
        if let Some(v) = self.delta_c_ms {
            base.delta_c = ms(v);
        }
        if let Some(v) = self.delta_stage_ms {
            base.delta_stage = ms(v);
        }
        if let Some(v) = self.alpha_ppb {
            base.alpha_ppb = v;
        }
        if let Some(v) = self.r_max {
            base.r_max = v;
        }
        if let Some(v) = self.f {
            base.f = v;
        }
        if let Some(s) = &self.transmission_schedule {
            base.transmission_schedule = s.clone();
        }
        base
    }
}

/// One deployment target: its parameters and transcoded identities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// Deployment name.
    pub name: String,
    /// Parameters (preset plus overrides), not yet validated.
    pub params: ProtocolParameters,
    /// Identities in table order.
    pub identities: Vec<OracleIdentityExtra>,
}

/// Name-indexed set of deployments.
#[derive(Clone, Debug, Default)]
pub struct DeploymentTable {
    deployments: BTreeMap<String, Deployment>,
}

impl DeploymentTable {
    /// Look up a deployment by name.
    pub fn get(&self, name: &str) -> Result<&Deployment, TableError> {
        self.deployments
            .get(name)
            .ok_or_else(|| TableError::UnknownDeployment(name.to_string()))
    }

    /// Deployment names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.deployments.keys().map(String::as_str)
    }

    /// Number of deployments.
    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    /// True if the table has no deployments.
    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }
}

fn parse_file(raw: &str) -> Result<TableFile, TableError> {
    let file: TableFile = toml::from_str(raw)?;
    if file.version != 1 {
        return Err(TableError::UnsupportedVersion(file.version));
    }
    Ok(file)
}

/// Parse a table document (syntax + schema only, no transcoding).
///
/// Intended for tooling and fuzzing.
pub fn parse_deployment_table_toml(raw: &str) -> Result<(), TableError> {
    parse_file(raw).map(|_| ())
}

/// Parse and transcode a table document.
pub fn deployment_table_from_toml(raw: &str) -> Result<DeploymentTable, TableError> {
    let file = parse_file(raw)?;
    let mut deployments = BTreeMap::new();

    for entry in file.deployments {
        if deployments.contains_key(&entry.name) {
            return Err(TableError::DuplicateDeployment(entry.name));
        }
        if entry.nodes.is_empty() {
            return Err(TableError::EmptyDeployment(entry.name));
        }
        let identities = transcode_all(&entry.nodes).map_err(|(index, source)| {
            TableError::Transcode {
                deployment: entry.name.clone(),
                index,
                source,
            }
        })?;
        let params = entry
            .params
            .apply(ProtocolParameters::slow_updates(identities.len()));

        debug!(deployment = %entry.name, oracles = identities.len(), "loaded deployment");
        deployments.insert(
            entry.name.clone(),
            Deployment {
                name: entry.name,
                params,
                identities,
            },
        );
    }
    Ok(DeploymentTable { deployments })
}

/// Load and transcode a table file.
pub fn load_deployment_table(path: impl AsRef<Path>) -> Result<DeploymentTable, TableError> {
    let raw = fs::read_to_string(path).map_err(|_| TableError::Read)?;
    deployment_table_from_toml(&raw)
}
