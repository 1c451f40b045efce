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

//! Protocol timing parameters and the validator that gates encoding.
//!
//! Bounds (slow-update chains):
//! - `delta_grace < delta_round < delta_progress`
//! - `delta_c >= 10m`, `delta_stage >= 10s`
//! - `0 < r_max < 255`
//! - `len(s) < 1000`, each entry in `1..=n`, `sum(s) >= n`
//! - `3f + 1 <= n <= 31`

use crate::core::types::{
    MAX_ORACLES, MAX_SCHEDULE_LEN, MIN_DELTA_C, MIN_DELTA_STAGE, RECOMMENDED_MIN_ORACLES,
};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Parameter set for one configuration change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolParameters {
    /// Time a leader has to make progress before being replaced.
    pub delta_progress: Duration,
    /// Resend interval for NEWEPOCH messages.
    pub delta_resend: Duration,
    /// Duration after which a new round starts.
    pub delta_round: Duration,
    /// Grace period for late observations.
    pub delta_grace: Duration,
    /// Minimum spacing of transmissions while the median stays within `alpha_ppb`.
    pub delta_c: Duration,
    /// Stagger between transmission stages.
    pub delta_stage: Duration,
    /// Deviation (parts per billion) that bypasses `delta_c`.
    pub alpha_ppb: u64,
    /// Maximum rounds per epoch.
    pub r_max: u8,
    /// Oracles allowed to transmit in each stage.
    pub transmission_schedule: Vec<u8>,
    /// Tolerated faulty oracles.
    pub f: u8,
    /// Number of oracles.
    pub oracle_count: usize,
}

impl ProtocolParameters {
    /// Default slow-update preset for `oracle_count` oracles with `f = 1`.
    ///
    /// The schedule lets the first stage use one transmitter and every later
    /// stage two.
    pub fn slow_updates(oracle_count: usize) -> Self {
        let mut s = Vec::with_capacity(oracle_count);
        if oracle_count > 0 {
            s.push(1);
            s.extend(std::iter::repeat(2).take(oracle_count - 1));
        }
        Self {
            delta_progress: Duration::from_secs(35),
            delta_resend: Duration::from_secs(17),
            delta_round: Duration::from_secs(30),
            delta_grace: Duration::from_secs(12),
            delta_c: Duration::from_secs(10 * 60),
            delta_stage: Duration::from_secs(60),
            alpha_ppb: 10_000_000,
            r_max: 6,
            transmission_schedule: s,
            f: 1,
            oracle_count,
        }
    }
}

/// Duration field that fell below its floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationField {
    /// `delta_c`.
    DeltaC,
    /// `delta_stage`.
    DeltaStage,
}

/// First violated parameter bound.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// `delta_grace < delta_round < delta_progress` does not hold.
    #[error("require delta_grace < delta_round < delta_progress")]
    RoundOrderingViolated,
    /// A duration is below its protocol floor.
    #[error("{field:?} {actual:?} below minimum {min:?}")]
    DurationFloorViolated {
        /// Field.
        field: DurationField,
        /// Floor.
        min: Duration,
        /// Supplied value.
        actual: Duration,
    },
    /// `r_max` outside `1..=254`.
    #[error("r_max {0} out of range")]
    RMaxOutOfRange(u8),
    /// Schedule has 1000 or more entries.
    #[error("transmission schedule too long ({len} entries)")]
    ScheduleTooLong {
        /// Schedule length.
        len: usize,
    },
    /// More oracles than the protocol supports.
    #[error("{count} oracles exceeds maximum {max}")]
    TooManyOracles {
        /// Oracle count.
        count: usize,
        /// Maximum.
        max: usize,
    },
    /// `n < 3f + 1`.
    #[error("{count} oracles cannot tolerate f={f}, need {needed}")]
    InsufficientOracles {
        /// Oracle count.
        count: usize,
        /// Fault threshold.
        f: u8,
        /// `3f + 1`.
        needed: usize,
    },
    /// Schedule has an entry outside `1..=n` or does not cover every oracle.
    #[error("transmission schedule does not cover {count} oracles")]
    ScheduleCoverage {
        /// Oracle count.
        count: usize,
    },
    /// `oracle_count` differs from the identities supplied.
    #[error("oracle_count {expected} but {actual} identities")]
    IdentityCountMismatch {
        /// `oracle_count`.
        expected: usize,
        /// Identities supplied.
        actual: usize,
    },
    /// Fault tolerant but below the recommended operating size.
    #[error("{count} oracles is below the recommended {recommended}")]
    BelowRecommendedOracleCount {
        /// Oracle count.
        count: usize,
        /// Recommended minimum.
        recommended: usize,
    },
}

/// How advisory violations are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Every violation is an error.
    #[default]
    Strict,
    /// `BelowRecommendedOracleCount` is logged and accepted.
    Lenient,
}

/// Validate with [`ValidationPolicy::Strict`].
pub fn validate(params: &ProtocolParameters, identity_count: usize) -> Result<(), ValidationError> {
    validate_with(params, identity_count, ValidationPolicy::Strict)
}

/// Validate `params` for `identity_count` identities, returning the first violation.
pub fn validate_with(
    params: &ProtocolParameters,
    identity_count: usize,
    policy: ValidationPolicy,
) -> Result<(), ValidationError> {
    let p = params;
    if !(p.delta_grace < p.delta_round && p.delta_round < p.delta_progress) {
        return Err(ValidationError::RoundOrderingViolated);
    }
    if p.delta_c < MIN_DELTA_C {
        return Err(ValidationError::DurationFloorViolated {
            field: DurationField::DeltaC,
            min: MIN_DELTA_C,
            actual: p.delta_c,
        });
    }
    if p.delta_stage < MIN_DELTA_STAGE {
        return Err(ValidationError::DurationFloorViolated {
            field: DurationField::DeltaStage,
            min: MIN_DELTA_STAGE,
            actual: p.delta_stage,
        });
    }
    if p.r_max == 0 || p.r_max == u8::MAX {
        return Err(ValidationError::RMaxOutOfRange(p.r_max));
    }

    let s = &p.transmission_schedule;
    if s.len() > MAX_SCHEDULE_LEN {
        return Err(ValidationError::ScheduleTooLong { len: s.len() });
    }

    let n = p.oracle_count;
    if n > MAX_ORACLES {
        return Err(ValidationError::TooManyOracles {
            count: n,
            max: MAX_ORACLES,
        });
    }
    let needed = 3 * usize::from(p.f) + 1;
    if n < needed {
        return Err(ValidationError::InsufficientOracles {
            count: n,
            f: p.f,
            needed,
        });
    }

    let in_range = s.iter().all(|&e| e >= 1 && usize::from(e) <= n);
    let total: usize = s.iter().map(|&e| usize::from(e)).sum();
    if !in_range || total < n {
        return Err(ValidationError::ScheduleCoverage { count: n });
    }

    if identity_count != n {
        return Err(ValidationError::IdentityCountMismatch {
            expected: n,
            actual: identity_count,
        });
    }

    if n < RECOMMENDED_MIN_ORACLES {
        match policy {
            ValidationPolicy::Strict => {
                return Err(ValidationError::BelowRecommendedOracleCount {
                    count: n,
                    recommended: RECOMMENDED_MIN_ORACLES,
                })
            }
            ValidationPolicy::Lenient => {
                warn!(
                    oracles = n,
                    recommended = RECOMMENDED_MIN_ORACLES,
                    "oracle count below recommended minimum"
                );
            }
        }
    }
    Ok(())
}
