// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The clean-cycle coordinator.
//!
//! One coordinator is constructed per physical robot and owns everything
//! with a lifetime longer than a single command: the configuration, the
//! credentials, the client identity, the HTTP transport and the session
//! reuse policy. A clean cycle is one sequential pipeline of
//! authenticate → resolve device → poll readiness → dispatch.

use std::time::Instant;

use parking_lot::Mutex;

use crate::cache::SessionCache;
use crate::config::{CloudConfig, Credentials};
use crate::dispatcher::CommandDispatcher;
use crate::error::Error;
use crate::identity::ClientIdentity;
use crate::params::ParameterStore;
use crate::poller::ReadinessPoller;
use crate::registry::{DeviceRef, DeviceRegistry};
use crate::session::{AccessToken, Session};
use crate::transport::ApiTransport;

/// A cached token/device pair with its fetch time.
#[derive(Debug, Clone)]
struct CachedCycle {
    token: AccessToken,
    device: DeviceRef,
    refreshed_at: Instant,
}

/// Session/command coordinator for one robot.
///
/// # Concurrency
///
/// Each clean cycle is one sequential task with no internal parallelism.
/// Overlapping cycles are not mutually excluded: two concurrent invocations
/// each authenticate and dispatch independently, which may issue duplicate
/// device commands. Hosts that need duplicate suppression must serialize
/// their triggers per device.
///
/// Dropping a cycle's future cancels it cooperatively; a cancelled cycle
/// never sends a partial command, because the invoke call is the last step.
///
/// # Examples
///
/// ```no_run
/// use scnr_lib::{CloudConfig, Coordinator, Credentials, SessionCache};
/// use std::time::Duration;
///
/// # fn example() -> scnr_lib::Result<()> {
/// let coordinator = Coordinator::new(
///     CloudConfig::new(),
///     Credentials::new("user@example.com", "hunter2"),
/// )?
/// .with_cache(SessionCache::TimeBound(Duration::from_secs(300)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Coordinator {
    config: CloudConfig,
    credentials: Credentials,
    identity: ClientIdentity,
    transport: ApiTransport,
    registry: DeviceRegistry,
    dispatcher: CommandDispatcher,
    poller: ReadinessPoller,
    cache_policy: SessionCache,
    cached: Mutex<Option<CachedCycle>>,
}

impl Coordinator {
    /// Creates a coordinator with a fresh installation identity.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP transport cannot be created.
    pub fn new(config: CloudConfig, credentials: Credentials) -> Result<Self, Error> {
        let transport = ApiTransport::new(config.timeout()).map_err(Error::Transport)?;
        let registry = DeviceRegistry::new(transport.clone(), config.clone());
        let dispatcher = CommandDispatcher::new(transport.clone(), config.clone());

        Ok(Self {
            config,
            credentials,
            identity: ClientIdentity::new(),
            transport,
            registry,
            dispatcher,
            poller: ReadinessPoller::new(),
            cache_policy: SessionCache::NoCache,
            cached: Mutex::new(None),
        })
    }

    /// Sets the session reuse policy.
    #[must_use]
    pub fn with_cache(mut self, policy: SessionCache) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Replaces the readiness poller.
    #[must_use]
    pub fn with_poller(mut self, poller: ReadinessPoller) -> Self {
        self.poller = poller;
        self
    }

    /// Returns the client identity of this coordinator.
    #[must_use]
    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// Returns the cloud configuration.
    #[must_use]
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Re-runs login and device discovery.
    ///
    /// Under a caching policy the fresh token/device pair replaces the
    /// cached one; under [`SessionCache::NoCache`] this only verifies that
    /// the account and device are reachable. Hosts that refresh
    /// periodically should invoke this.
    ///
    /// # Errors
    ///
    /// Returns error if login or device resolution fails.
    pub async fn refresh(&self) -> Result<(), Error> {
        self.login_and_resolve().await?;
        Ok(())
    }

    /// Runs one complete clean cycle and returns the raw vendor response.
    ///
    /// # Errors
    ///
    /// Any failure aborts the cycle immediately: authentication and device
    /// resolution errors before polling, readiness or parameter errors
    /// before dispatch, command errors after. Nothing is retried within
    /// one invocation.
    pub async fn clean_cycle(&self, store: &dyn ParameterStore) -> Result<String, Error> {
        let (session, device) = self.establish().await?;
        let request = self
            .poller
            .wait_for_parameters(store, device.mac())
            .await?;
        self.dispatcher.clean_room(&session, &device, &request).await
    }

    /// Host-facing zero-argument clean trigger.
    ///
    /// Runs a clean cycle and reports failures through the logging channel
    /// only; a fresh trigger is the retry mechanism.
    pub async fn trigger_clean(&self, store: &dyn ParameterStore) {
        match self.clean_cycle(store).await {
            Ok(body) => {
                tracing::debug!(body = %body, "clean command accepted");
            }
            Err(error) => {
                tracing::error!(%error, "clean cycle failed");
            }
        }
    }

    /// Produces an authenticated session and resolved device, reusing the
    /// cached pair when the policy allows.
    async fn establish(&self) -> Result<(Session, DeviceRef), Error> {
        if let Some((session, device)) = self.resume_cached() {
            tracing::debug!(device = %device, "reusing cached session");
            return Ok((session, device));
        }
        self.login_and_resolve().await
    }

    fn resume_cached(&self) -> Option<(Session, DeviceRef)> {
        let guard = self.cached.lock();
        let cached = guard.as_ref()?;
        if !self.cache_policy.allows_reuse(cached.refreshed_at.elapsed()) {
            return None;
        }
        let session = Session::resume(
            self.transport.clone(),
            self.config.clone(),
            self.credentials.clone(),
            self.identity,
            cached.token.clone(),
        );
        Some((session, cached.device.clone()))
    }

    async fn login_and_resolve(&self) -> Result<(Session, DeviceRef), Error> {
        let mut session = Session::new(
            self.transport.clone(),
            self.config.clone(),
            self.credentials.clone(),
            self.identity,
        );
        session.authenticate().await?;
        let device = self.registry.resolve_device(&session).await?;

        if self.cache_policy.is_caching() {
            if let Some(token) = session.token() {
                *self.cached.lock() = Some(CachedCycle {
                    token: token.clone(),
                    device: device.clone(),
                    refreshed_at: Instant::now(),
                });
            }
        }

        Ok((session, device))
    }
}
