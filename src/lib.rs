// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SCNR` Lib - A Rust library to control SwitchBot S10 floor cleaning
//! robots via the SwitchBot cloud API.
//!
//! This library bridges a home-automation host to the vendor cloud: it
//! authenticates against the account service, discovers the robot in the
//! account's device listing, and issues room-cleaning commands with
//! selectable room, mode, water level, fan level and pass count.
//!
//! # How a clean cycle works
//!
//! 1. **Authenticate**: a password-grant login yields an access token.
//! 2. **Discover**: the device listing is searched for the first entry
//!    whose name contains the S10 model fragment.
//! 3. **Poll readiness**: the five clean parameters live in controls owned
//!    by the host (see [`params::ParameterStore`]) and may not be populated
//!    yet; the [`ReadinessPoller`] retries until all five resolve, up to
//!    20 attempts 500 ms apart.
//! 4. **Dispatch**: the assembled [`CleanRequest`] is sent to the
//!    function-invoke endpoint, exactly once.
//!
//! By default every cycle re-authenticates and re-discovers; see
//! [`SessionCache`] for token reuse.
//!
//! # Quick Start
//!
//! ```no_run
//! use scnr_lib::params::{Parameter, ParameterStore, ParameterValue};
//! use scnr_lib::{CloudConfig, Coordinator, Credentials};
//!
//! /// Settings provider backed by fixed values.
//! struct FixedStore;
//!
//! impl ParameterStore for FixedStore {
//!     fn get(&self, _device_id: &str, parameter: Parameter) -> Option<ParameterValue> {
//!         Some(match parameter {
//!             Parameter::Room => ParameterValue::text("ROOM_003"),
//!             Parameter::Mode => ParameterValue::text("sweep_mop"),
//!             Parameter::WaterLevel => ParameterValue::number(2.0),
//!             Parameter::FanLevel => ParameterValue::number(4.0),
//!             Parameter::CleanTimes => ParameterValue::number(1.0),
//!         })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> scnr_lib::Result<()> {
//!     let coordinator = Coordinator::new(
//!         CloudConfig::new(),
//!         Credentials::new("user@example.com", "hunter2"),
//!     )?;
//!
//!     let response = coordinator.clean_cycle(&FixedStore).await?;
//!     println!("robot accepted: {response}");
//!     Ok(())
//! }
//! ```
//!
//! # Fire-and-forget triggering
//!
//! Hosts exposing a parameterless "clean" action can use
//! [`Coordinator::trigger_clean`], which reports failures through
//! `tracing` instead of returning them.

mod cache;
pub mod command;
mod config;
mod coordinator;
mod dispatcher;
pub mod error;
mod identity;
pub mod params;
mod poller;
mod registry;
mod session;
mod transport;
pub mod types;

pub use cache::SessionCache;
pub use command::{CleanCommand, CleanRequest};
pub use config::{CloudConfig, Credentials};
pub use coordinator::Coordinator;
pub use dispatcher::CommandDispatcher;
pub use error::{AuthError, CommandError, Error, Result, TransportError, ValueError};
pub use identity::ClientIdentity;
pub use params::{Parameter, ParameterStore, ParameterValue};
pub use poller::ReadinessPoller;
pub use registry::{DeviceRef, DeviceRegistry};
pub use session::{AccessToken, Session};
pub use transport::{ApiResponse, ApiTransport, RequestHeaders};
