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

//! Config version allocation.
//!
//! Versions must be unique per configuration target. The encoder never
//! allocates one; callers hand it a version or a [`VersionSource`]. Whoever
//! owns the source is responsible for serializing allocation across processes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of monotonically increasing config versions.
pub trait VersionSource: Send + Sync {
    /// Allocate the next version, or `None` once the source is exhausted.
    fn next_version(&self) -> Option<u64>;
}

/// In-process counter. Starts after `last` (the version currently on chain).
#[derive(Debug)]
pub struct MonotonicVersion {
    last: AtomicU64,
}

impl MonotonicVersion {
    /// Counter whose first allocation is `last + 1`.
    pub fn after(last: u64) -> Self {
        Self { last: AtomicU64::new(last) }
    }

    /// Last allocated version.
    pub fn current(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }
}

impl VersionSource for MonotonicVersion {
    fn next_version(&self) -> Option<u64> {
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_add(1))
            .ok()
            .map(|prev| prev + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    #[test]
    fn allocates_after_last() {
        let v = MonotonicVersion::after(7);
        assert_eq!(v.next_version(), Some(8));
        assert_eq!(v.next_version(), Some(9));
        assert_eq!(v.current(), 9);
    }

    #[test]
    fn concurrent_allocation_is_unique() {
        let v = Arc::new(MonotonicVersion::after(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let v = v.clone();
                std::thread::spawn(move || (0..100).map(|_| v.next_version().unwrap()).collect::<Vec<_>>())
            })
            .collect();
        let mut seen = BTreeSet::new();
        for h in handles {
            for x in h.join().unwrap() {
                assert!(seen.insert(x));
            }
        }
        assert_eq!(seen.len(), 800);
        assert_eq!(seen.iter().next_back(), Some(&800));
    }

    #[test]
    fn exhausted_counter_never_repeats_or_wraps() {
        let v = MonotonicVersion::after(u64::MAX - 1);
        assert_eq!(v.next_version(), Some(u64::MAX));
        assert_eq!(v.next_version(), None);
        assert_eq!(v.next_version(), None);
        assert_eq!(v.current(), u64::MAX);
    }
}
