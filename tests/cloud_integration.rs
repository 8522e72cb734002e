// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the cloud pipeline using wiremock.

use std::time::Duration;

use scnr_lib::params::{Parameter, ParameterStore, ParameterValue};
use scnr_lib::{
    AuthError, CloudConfig, Coordinator, Credentials, Error, ReadinessPoller, SessionCache,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PATH: &str = "/account/api/v1/user/login";
const DEVICE_LIST_PATH: &str = "/wonder/device/v3/getdevice";
const INVOKE_PATH: &str = "/command/cmd/api/v1/func/invoke";

/// Settings provider that reports the scenario values immediately.
struct ReadyStore;

impl ParameterStore for ReadyStore {
    fn get(&self, _device_id: &str, parameter: Parameter) -> Option<ParameterValue> {
        Some(match parameter {
            Parameter::Room => ParameterValue::text("ROOM_003"),
            Parameter::Mode => ParameterValue::text("sweep_mop"),
            Parameter::WaterLevel => ParameterValue::number(2.0),
            Parameter::FanLevel => ParameterValue::number(4.0),
            Parameter::CleanTimes => ParameterValue::number(1.0),
        })
    }
}

/// Settings provider whose fan level never becomes available.
struct MissingFanStore;

impl ParameterStore for MissingFanStore {
    fn get(&self, _device_id: &str, parameter: Parameter) -> Option<ParameterValue> {
        match parameter {
            Parameter::FanLevel => None,
            Parameter::Room => Some(ParameterValue::text("ROOM_003")),
            Parameter::Mode => Some(ParameterValue::text("sweep")),
            _ => Some(ParameterValue::number(1.0)),
        }
    }
}

fn coordinator_for(server: &MockServer) -> Coordinator {
    let config = CloudConfig::new()
        .with_auth_host(server.uri())
        .with_api_host(server.uri());
    Coordinator::new(config, Credentials::new("user@example.com", "pw"))
        .unwrap()
        .with_poller(ReadinessPoller::new().with_interval(Duration::from_millis(5)))
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(header("authorization", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "body": { "access_token": token }
        })))
        .mount(server)
        .await;
}

async fn mount_device_list(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(DEVICE_LIST_PATH))
        .and(header("authorization", token))
        .and(body_partial_json(serde_json::json!({"required_type": "All"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "body": {
                "Items": [
                    { "device_name": "Hub 2", "device_mac": "AA:BB" },
                    { "device_name": "Floor Cleaning Robot S10 Pro", "device_mac": "CC:DD:EE:FF" },
                ]
            }
        })))
        .mount(server)
        .await;
}

// ============================================================================
// End-to-end clean cycle
// ============================================================================

#[tokio::test]
async fn clean_cycle_dispatches_exact_payload() {
    let server = MockServer::start().await;
    mount_login(&server, "T1").await;
    mount_device_list(&server, "T1").await;

    let coordinator = coordinator_for(&server);
    let topic = coordinator.identity().notify_topic();

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .and(header("authorization", "T1"))
        .and(body_partial_json(serde_json::json!({
            "deviceID": "CC:DD:EE:FF",
            "functionID": 1001,
            "notify": { "type": "mqtt", "url": topic },
            "params": {
                "0": "clean_rooms",
                "1": {
                    "force_order": true,
                    "mode": {
                        "fan_level": 4,
                        "times": 1,
                        "type": "sweep_mop",
                        "water_level": 2,
                    },
                    "rooms": [{
                        "mode": {
                            "fan_level": 4,
                            "times": 1,
                            "type": "sweep_mop",
                            "water_level": 2,
                        },
                        "room_id": "ROOM_003",
                    }],
                },
            },
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"statusCode": 100})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = coordinator.clean_cycle(&ReadyStore).await.unwrap();
    assert!(body.contains("100"));
}

#[tokio::test]
async fn readiness_timeout_never_invokes() {
    let server = MockServer::start().await;
    mount_login(&server, "T1").await;
    mount_device_list(&server, "T1").await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let coordinator = coordinator_for(&server);
    let err = coordinator.clean_cycle(&MissingFanStore).await.unwrap_err();

    match err {
        Error::ReadinessTimeout { attempts, missing } => {
            assert_eq!(attempts, 20);
            assert_eq!(missing, vec![Parameter::FanLevel]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn rejected_login_aborts_cycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("denied"))
        .mount(&server)
        .await;

    let coordinator = coordinator_for(&server);
    let err = coordinator.clean_cycle(&ReadyStore).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Auth(AuthError::Rejected { status: 401, .. })
    ));
}

#[tokio::test]
async fn login_without_token_aborts_cycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "body": {}
        })))
        .mount(&server)
        .await;

    let coordinator = coordinator_for(&server);
    let err = coordinator.clean_cycle(&ReadyStore).await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::MissingToken)));
}

// ============================================================================
// Device resolution
// ============================================================================

#[tokio::test]
async fn unmatched_listing_reports_device_not_found() {
    let server = MockServer::start().await;
    mount_login(&server, "T1").await;

    Mock::given(method("POST"))
        .and(path(DEVICE_LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "body": {
                "Items": [
                    { "device_name": "Hub 2", "device_mac": "AA:BB" },
                    { "device_name": "Curtain 3", "device_mac": "11:22" },
                ]
            }
        })))
        .mount(&server)
        .await;

    let coordinator = coordinator_for(&server);
    let err = coordinator.clean_cycle(&ReadyStore).await.unwrap_err();
    assert!(matches!(err, Error::DeviceNotFound { .. }));
}

// ============================================================================
// Session reuse policy
// ============================================================================

#[tokio::test]
async fn no_cache_logs_in_every_cycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "body": { "access_token": "T1" }
        })))
        .expect(2)
        .mount(&server)
        .await;
    mount_device_list(&server, "T1").await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(2)
        .mount(&server)
        .await;

    let coordinator = coordinator_for(&server);
    coordinator.clean_cycle(&ReadyStore).await.unwrap();
    coordinator.clean_cycle(&ReadyStore).await.unwrap();
}

#[tokio::test]
async fn time_bound_cache_reuses_token_and_device() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "body": { "access_token": "T1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(DEVICE_LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "body": {
                "Items": [
                    { "device_name": "Floor Cleaning Robot S10", "device_mac": "CC:DD" },
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .and(header("authorization", "T1"))
        .and(body_partial_json(serde_json::json!({"deviceID": "CC:DD"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(2)
        .mount(&server)
        .await;

    let coordinator =
        coordinator_for(&server).with_cache(SessionCache::TimeBound(Duration::from_secs(300)));
    coordinator.clean_cycle(&ReadyStore).await.unwrap();
    coordinator.clean_cycle(&ReadyStore).await.unwrap();
}

#[tokio::test]
async fn refresh_performs_login_and_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "body": { "access_token": "T1" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_device_list(&server, "T1").await;

    let coordinator = coordinator_for(&server);
    coordinator.refresh().await.unwrap();
}

// ============================================================================
// Fire-and-forget trigger
// ============================================================================

#[tokio::test]
async fn trigger_clean_swallows_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    // Must not panic or propagate; failures go to the logging channel.
    let coordinator = coordinator_for(&server);
    coordinator.trigger_clean(&ReadyStore).await;
}
