// Flow provisioning endpoints
//
// Flows live in a node's configured flow table. Add is a PUT of the whole
// record onto its own path, update a POST, removal a DELETE; the
// controller's status is explained through the flow response tables.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::records::FlowKey;
use super::{Outcome, Restconf, paths};
use crate::error::Error;
use crate::response_codes::ResponseTable;

/// A node's configured flow table as returned by the controller.
#[derive(Debug, Clone)]
pub struct FlowListing {
    pub node: u64,
    pub table: u64,
    /// Raw response body, for `show`-style rendering.
    pub raw: Value,
    /// Individual flow records, in listing order.
    pub flows: Vec<Value>,
}

impl FlowListing {
    /// Pull the flow records out of a listing body.
    ///
    /// Accepts the AD-SAL `flowConfig` array, the inventory
    /// `flow-node-inventory:table[*].flow` shape, and a bare `flow` array,
    /// checked in that order. Anything else lists no flows.
    pub fn parse(node: u64, table: u64, raw: Value) -> Self {
        let flows = extract_flows(&raw);
        Self {
            node,
            table,
            raw,
            flows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Key of each listed flow, `None` for an entry that cannot be
    /// addressed. Same length and order as `flows`.
    pub fn entries(&self) -> Vec<Option<FlowKey>> {
        self.flows
            .iter()
            .map(|f| FlowKey::from_listed(f, self.node, self.table).ok())
            .collect()
    }

    /// Keys of every addressable flow, in listing order. Entries with
    /// neither an id nor a name are skipped with a warning.
    pub fn keys(&self) -> Vec<FlowKey> {
        self.entries()
            .into_iter()
            .zip(&self.flows)
            .filter_map(|(key, flow)| {
                if key.is_none() {
                    warn!(node = self.node, table = self.table, %flow, "listed flow has no id or name, skipping");
                }
                key
            })
            .collect()
    }
}

fn extract_flows(raw: &Value) -> Vec<Value> {
    if let Some(Value::Array(configs)) = raw.get("flowConfig") {
        return configs.clone();
    }

    if let Some(Value::Array(tables)) = raw.get("flow-node-inventory:table") {
        return tables
            .iter()
            .filter_map(|t| t.get("flow").and_then(Value::as_array))
            .flatten()
            .cloned()
            .collect();
    }

    match raw.get("flow") {
        Some(Value::Array(flows)) => flows.clone(),
        _ => Vec::new(),
    }
}

/// One flow removed as part of a remove-all sweep.
#[derive(Debug, Clone, Serialize)]
pub struct Removal {
    pub key: FlowKey,
    pub outcome: Outcome,
}

impl Restconf {
    /// List the flows configured in one table of one node.
    ///
    /// `GET /restconf/config/.../node/openflow:{node}/table/{table}`
    pub async fn flow_list(&mut self, node: u64, table: u64) -> Result<FlowListing, Error> {
        debug!(node, table, "listing flows");
        self.ws.set_path(paths::flow_table(node, table));
        let resp = self.read().await?;
        let raw = resp.json_or_null()?;
        Ok(FlowListing::parse(node, table, raw))
    }

    /// Provision a flow.
    ///
    /// `PUT /restconf/config/.../node/openflow:{node}/table/{table}/flow/{id}`
    pub async fn flow_add(&mut self, flow: &Value) -> Result<Outcome, Error> {
        let key = FlowKey::from_value(flow)?;
        debug!(node = key.node, flow = %key.id, "adding flow");
        self.ws.set_path(paths::flow(key.node, key.table, &key.id));
        let resp = self.ws.put(flow).await?;
        Ok(Outcome::from_response(resp, ResponseTable::FlowAdd))
    }

    /// Update an existing flow in place.
    ///
    /// `POST` to the same path as [`flow_add`](Self::flow_add).
    pub async fn flow_update(&mut self, flow: &Value) -> Result<Outcome, Error> {
        let key = FlowKey::from_value(flow)?;
        debug!(node = key.node, flow = %key.id, "updating flow");
        self.ws.set_path(paths::flow(key.node, key.table, &key.id));
        let resp = self.ws.post(flow).await?;
        Ok(Outcome::from_response(resp, ResponseTable::FlowAdd))
    }

    /// Remove the flow described by `flow`.
    pub async fn flow_remove(&mut self, flow: &Value) -> Result<Outcome, Error> {
        let key = FlowKey::from_value(flow)?;
        self.flow_remove_key(&key).await
    }

    /// Remove one flow by key.
    ///
    /// `DELETE /restconf/config/.../node/openflow:{node}/table/{table}/flow/{id}`
    pub async fn flow_remove_key(&mut self, key: &FlowKey) -> Result<Outcome, Error> {
        debug!(node = key.node, flow = %key.id, "removing flow");
        self.ws.set_path(paths::flow(key.node, key.table, &key.id));
        let resp = self.ws.remove().await?;
        Ok(Outcome::from_response(resp, ResponseTable::FlowDelete))
    }

    /// Remove every flow listed in a node's table, one DELETE per flow in
    /// listing order.
    ///
    /// The first transport failure aborts the sweep; flows after it are
    /// left alone.
    pub async fn flow_remove_all(&mut self, node: u64, table: u64) -> Result<Vec<Removal>, Error> {
        let listing = self.flow_list(node, table).await?;
        let keys = listing.keys();

        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            info!(flow = %key.label(), "removing");
            let outcome = self.flow_remove_key(&key).await?;
            removed.push(Removal { key, outcome });
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::FlowListing;

    #[test]
    fn parses_flow_config_shape() {
        let raw = json!({
            "flowConfig": [
                { "name": "a", "id": 1, "node": { "id": "openflow:1" } },
                { "name": "b", "id": 2, "node": { "id": "openflow:1" } }
            ],
            "flow": [{ "id": 99 }]
        });
        let listing = FlowListing::parse(1, 0, raw);
        assert_eq!(listing.flows.len(), 2);
        assert_eq!(listing.flows[1]["name"], "b");
    }

    #[test]
    fn parses_inventory_table_shape() {
        let raw = json!({
            "flow-node-inventory:table": [
                { "id": 0, "flow": [{ "id": 1 }, { "id": 2 }] },
                { "id": 1 },
                { "id": 2, "flow": [{ "id": 3 }] }
            ]
        });
        let listing = FlowListing::parse(4, 0, raw);
        let keys = listing.keys();
        let ids: Vec<&str> = keys.iter().map(|k| k.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(keys.iter().all(|k| k.node == 4));
    }

    #[test]
    fn unaddressable_entries_are_skipped_not_fatal() {
        let raw = json!({
            "flowConfig": [
                { "name": "flow1", "node": { "id": "00:00:00:00:00:00:00:01" } },
                { "priority": 3 },
                { "id": "voice-upstream" }
            ]
        });
        let listing = FlowListing::parse(1, 0, raw);
        assert_eq!(listing.entries().iter().filter(|k| k.is_none()).count(), 1);

        let ids: Vec<String> = listing.keys().into_iter().map(|k| k.id).collect();
        assert_eq!(ids, vec!["flow1", "voice-upstream"]);
    }

    #[test]
    fn error_body_lists_nothing() {
        let raw = json!({ "errors": { "error": [{ "error-tag": "data-missing" }] } });
        assert!(FlowListing::parse(1, 0, raw).is_empty());
        assert!(FlowListing::parse(1, 0, serde_json::Value::Null).is_empty());
    }
}
