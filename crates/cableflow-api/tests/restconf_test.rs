#![allow(clippy::unwrap_used)]
// Integration tests for the `Restconf` facade using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cableflow_api::{
    ConnectionProfile, Error, RESTCONF_PORT, RestClient, Restconf, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Restconf) {
    let server = MockServer::start().await;
    let addr = server.address();
    let client = RestClient::with_client(
        reqwest::Client::new(),
        ConnectionProfile::new(addr.ip().to_string()),
    );
    let restconf = Restconf::with_port(client, addr.port());
    (server, restconf)
}

fn flow_path(node: u64, id: u64) -> String {
    format!("/restconf/config/opendaylight-inventory:nodes/node/openflow:{node}/table/0/flow/{id}")
}

fn flow(node: u64, id: u64, name: &str) -> serde_json::Value {
    json!({
        "flow": {
            "id": id,
            "node": { "id": format!("openflow:{node}") },
            "flow-name": name,
            "priority": 100
        }
    })
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn test_new_targets_restconf_port() {
    let client = RestClient::new("127.0.0.1").unwrap();
    let restconf = Restconf::new(client);
    assert_eq!(restconf.client().port(), RESTCONF_PORT);
    assert_eq!(restconf.client().server(), "127.0.0.1");
}

// ── Topology ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_topology() {
    let (server, mut restconf) = setup().await;

    let nodes = json!({
        "nodes": { "node": [{ "id": "openflow:1" }, { "id": "openflow:2" }] }
    });

    Mock::given(method("GET"))
        .and(path("/restconf/operational/opendaylight-inventory:nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&nodes))
        .expect(1)
        .mount(&server)
        .await;

    let topology = restconf.topology().await.unwrap();
    assert_eq!(topology, nodes);
}

#[tokio::test]
async fn test_topology_with_garbage_body() {
    let (server, mut restconf) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let result = restconf.topology().await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body == "<html>"),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_read_rejected_credentials_is_unauthorized() {
    let (server, mut restconf) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let result = restconf.statistics_flows().await;
    assert!(
        matches!(result, Err(Error::Unauthorized { ref path }) if path == "/controller/nb/v2/statistics/default/flow"),
        "expected Unauthorized, got: {result:?}"
    );
}

// ── Flow add / remove ───────────────────────────────────────────────

#[tokio::test]
async fn test_flow_add_explains_status() {
    let (server, mut restconf) = setup().await;

    Mock::given(method("PUT"))
        .and(path(flow_path(1, 1)))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = restconf.flow_add(&flow(1, 1, "cableflow-1")).await.unwrap();
    assert_eq!(outcome.status, 201);
    assert_eq!(outcome.reason, "Created");
    assert_eq!(
        outcome.explanation,
        Some("Flow Config processed successfully")
    );
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_flow_add_conflict() {
    let (server, mut restconf) = setup().await;

    Mock::given(method("PUT"))
        .and(path(flow_path(2, 5)))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let outcome = restconf.flow_add(&flow(2, 5, "dup")).await.unwrap();
    assert_eq!(outcome.status, 409);
    assert_eq!(
        outcome.explanation,
        Some("Failed to create Static Flow entry due to Conflicting Name or configuration")
    );
}

#[tokio::test]
async fn test_flow_update_uses_post() {
    let (server, mut restconf) = setup().await;

    Mock::given(method("POST"))
        .and(path(flow_path(1, 3)))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = restconf.flow_update(&flow(1, 3, "x")).await.unwrap();
    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.explanation, None);
}

#[tokio::test]
async fn test_flow_remove() {
    let (server, mut restconf) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(flow_path(2, 2)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = restconf.flow_remove(&flow(2, 2, "cableflow-2")).await.unwrap();
    assert_eq!(outcome.explanation, Some("Flow Config deleted successfully"));
}

#[tokio::test]
async fn test_flow_add_rejects_record_without_ids() {
    let (_server, mut restconf) = setup().await;

    let result = restconf.flow_add(&json!({ "flow": { "flow-name": "x" } })).await;
    assert!(matches!(result, Err(Error::InvalidRecord { .. })));
}

// ── Remove all ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_remove_all_one_delete_per_flow_in_order() {
    let (server, mut restconf) = setup().await;

    let listing = json!({
        "flow-node-inventory:table": [{
            "id": 0,
            "flow": [
                { "id": 3, "flow-name": "c" },
                { "id": 1, "flow-name": "a" },
                { "id": 2, "flow-name": "b" }
            ]
        }]
    });

    Mock::given(method("GET"))
        .and(path(
            "/restconf/config/opendaylight-inventory:nodes/node/openflow:1/table/0",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&listing))
        .expect(1)
        .mount(&server)
        .await;

    for id in [1, 2, 3] {
        Mock::given(method("DELETE"))
            .and(path(flow_path(1, id)))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    let removed = restconf.flow_remove_all(1, 0).await.unwrap();
    let names: Vec<String> = removed.iter().map(|r| r.key.label()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);

    let deletes: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .map(|r| r.url.path().to_owned())
        .collect();
    assert_eq!(deletes, vec![flow_path(1, 3), flow_path(1, 1), flow_path(1, 2)]);
}

#[tokio::test]
async fn test_remove_all_addresses_named_and_string_id_flows() {
    let (server, mut restconf) = setup().await;

    let listing = json!({
        "flowConfig": [
            { "name": "flow1", "node": { "id": "00:00:00:00:00:00:00:01", "type": "OF" } },
            { "priority": 7 },
            { "id": "voice-upstream", "flow-name": "voice" }
        ]
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&listing))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let removed = restconf.flow_remove_all(1, 0).await.unwrap();
    let names: Vec<String> = removed.iter().map(|r| r.key.label()).collect();
    assert_eq!(names, vec!["flow1", "voice"]);

    let deletes: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .map(|r| r.url.path().to_owned())
        .collect();
    let table = "/restconf/config/opendaylight-inventory:nodes/node/openflow:1/table/0";
    assert_eq!(
        deletes,
        vec![format!("{table}/flow/flow1"), format!("{table}/flow/voice-upstream")]
    );
}

#[tokio::test]
async fn test_remove_all_stops_at_first_transport_failure() {
    let server = MockServer::start().await;
    let addr = server.address();
    let transport = TransportConfig::with_timeout(Some(Duration::from_millis(300)));
    let client = RestClient::with_transport(addr.ip().to_string(), &transport).unwrap();
    let mut restconf = Restconf::with_port(client, addr.port());

    let listing = json!({
        "flow-node-inventory:table": [{
            "id": 0,
            "flow": [{ "id": 1 }, { "id": 2 }, { "id": 3 }]
        }]
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&listing))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(flow_path(1, 1)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(flow_path(1, 2)))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(5)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(flow_path(1, 3)))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let result = restconf.flow_remove_all(1, 0).await;
    assert!(
        matches!(result, Err(Error::Timeout { .. })),
        "expected Timeout, got: {result:?}"
    );

    let deletes: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .map(|r| r.url.path().to_owned())
        .collect();
    assert_eq!(deletes, vec![flow_path(1, 1), flow_path(1, 2)]);
}

#[tokio::test]
async fn test_remove_all_with_nothing_configured() {
    let (server, mut restconf) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": { "error": [{ "error-tag": "data-missing" }] }
        })))
        .mount(&server)
        .await;

    let removed = restconf.flow_remove_all(1, 0).await.unwrap();
    assert!(removed.is_empty());

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

// ── Statistics ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_statistics_flows() {
    let (server, mut restconf) = setup().await;

    let report = json!({
        "flowStatistics": [{
            "node": { "id": "00:00:00:00:00:00:00:01" },
            "flowStatistic": [{
                "packetCount": 12,
                "flow": {
                    "actions": { "type": "OUTPUT", "port": { "id": "1" } },
                    "match": { "matchField": [{ "value": "10.0.0.9" }] }
                }
            }]
        }]
    });

    Mock::given(method("GET"))
        .and(path("/controller/nb/v2/statistics/default/flow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&report))
        .mount(&server)
        .await;

    let stats = restconf.statistics_flows().await.unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].switch_id, "00:00:00:00:00:00:00:01");
    assert_eq!(stats[0].rows[0].count, 12);
    assert_eq!(stats[0].rows[0].dest_ip, "10.0.0.9");
}

// ── CMTS ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_cmts_add_and_remove() {
    let (server, mut restconf) = setup().await;

    let cmts = json!({
        "cmts-node": { "id": 1, "address": "10.200.90.3", "port": 3918 }
    });
    let cmts_path = "/restconf/config/opendaylight-inventory:nodes/node/cmts:1";

    Mock::given(method("PUT"))
        .and(path(cmts_path))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(cmts_path))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let added = restconf.cmts_add(&cmts).await.unwrap();
    assert_eq!(added.explanation, Some("CMTS Config processed successfully"));

    let removed = restconf.cmts_remove(&cmts).await.unwrap();
    assert_eq!(
        removed.explanation,
        Some("The Container Name or Node-id passed is not found")
    );
}
