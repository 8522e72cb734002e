// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session reuse policy.

use std::time::Duration;

/// Policy for reusing the access token and resolved device across clean
/// cycles.
///
/// The vendor does not document token lifetimes, so the default is to
/// re-authenticate and re-resolve on every cycle. `TimeBound` trades that
/// simplicity for fewer login calls; the command-dispatch contract is the
/// same under both policies.
///
/// # Examples
///
/// ```
/// use scnr_lib::SessionCache;
/// use std::time::Duration;
///
/// let fresh_every_time = SessionCache::NoCache;
/// let reuse_for_an_hour = SessionCache::TimeBound(Duration::from_secs(3600));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCache {
    /// Login and device lookup are repeated on every cycle.
    NoCache,
    /// A token/device pair is reused while younger than the given TTL.
    TimeBound(Duration),
}

impl SessionCache {
    /// Returns whether a cached pair of the given age may be reused.
    #[must_use]
    pub fn allows_reuse(&self, age: Duration) -> bool {
        match self {
            Self::NoCache => false,
            Self::TimeBound(ttl) => age < *ttl,
        }
    }

    /// Returns whether this policy stores anything at all.
    #[must_use]
    pub fn is_caching(&self) -> bool {
        matches!(self, Self::TimeBound(_))
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::NoCache
    }
}
