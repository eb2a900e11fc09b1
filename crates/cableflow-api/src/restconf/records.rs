//! Identifier extraction from untyped flow and CMTS records.
//!
//! Records stay opaque `serde_json::Value`s everywhere; only the pieces
//! needed to build a resource path are pulled out. Node and CMTS ids may
//! arrive as JSON numbers, numeric strings, or prefixed strings such as
//! `"openflow:3"`. Flow ids are path segments and may be any string.

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// Flow table used when a record does not name one.
pub const DEFAULT_TABLE: u64 = 0;

/// Parse `3`, `"3"` or `"openflow:3"` into `3`.
pub fn numeric_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.rsplit(':').next()?.trim().parse().ok(),
        _ => None,
    }
}

/// Flow id as a path segment: `4` or `"4"` become `"4"`, a string id such
/// as `"voice-upstream"` is kept as-is.
pub fn segment_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.is_u64() => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        _ => None,
    }
}

/// The flow body inside a record, unwrapping the common envelopes:
/// `{"flow": {...}}`, `{"flow": [{...}]}` and
/// `{"flow-node-inventory:flow": [{...}]}`.
pub fn flow_body(record: &Value) -> &Value {
    for key in ["flow", "flow-node-inventory:flow"] {
        match record.get(key) {
            Some(inner @ Value::Object(_)) => return inner,
            Some(Value::Array(items)) => {
                if let Some(first) = items.first().filter(|v| v.is_object()) {
                    return first;
                }
            }
            _ => {}
        }
    }
    record
}

/// The CMTS node inside a record, with or without the module prefix.
pub fn cmts_body(record: &Value) -> Option<&Value> {
    record
        .get("cmts-node")
        .or_else(|| record.get("packetcable-cmts:cmts-node"))
        .filter(|v| v.is_object())
}

// ── FlowKey ──────────────────────────────────────────────────────────

/// Everything needed to address one configured flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowKey {
    pub node: u64,
    pub table: u64,
    /// Last segment of the flow's path.
    pub id: String,
    pub name: Option<String>,
}

impl FlowKey {
    /// Extract the key from a standalone flow record.
    pub fn from_value(record: &Value) -> Result<Self, Error> {
        let flow = flow_body(record);

        let node = flow
            .get("node")
            .and_then(|n| n.get("id").map_or_else(|| numeric_id(n), numeric_id))
            .ok_or_else(|| Error::invalid_record("flow record has no numeric node id"))?;

        let id = flow
            .get("id")
            .and_then(segment_id)
            .ok_or_else(|| Error::invalid_record("flow record has no flow id"))?;

        let table = flow
            .get("table_id")
            .and_then(numeric_id)
            .unwrap_or(DEFAULT_TABLE);

        Ok(Self {
            node,
            table,
            id,
            name: flow_name(flow),
        })
    }

    /// Extract the key from a flow that came out of a table listing.
    ///
    /// The listing fixes node and table, whatever node id the entry itself
    /// carries (`flowConfig` entries use the switch's datapath id). Entries
    /// without an `id` are addressed by name.
    pub fn from_listed(record: &Value, node: u64, table: u64) -> Result<Self, Error> {
        let flow = flow_body(record);
        let name = flow_name(flow);

        let id = flow
            .get("id")
            .and_then(segment_id)
            .or_else(|| name.clone())
            .ok_or_else(|| Error::invalid_record("listed flow has neither an id nor a name"))?;

        Ok(Self {
            node,
            table,
            id,
            name,
        })
    }

    /// Display label: the flow name, or `flow {id}` if unnamed.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("flow {}", self.id))
    }
}

fn flow_name(flow: &Value) -> Option<String> {
    ["flow-name", "name"]
        .iter()
        .find_map(|k| flow.get(*k).and_then(Value::as_str))
        .map(str::to_owned)
}

// ── CmtsKey ──────────────────────────────────────────────────────────

/// Everything needed to address one CMTS node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmtsKey {
    pub id: u64,
    pub address: Option<String>,
}

impl CmtsKey {
    pub fn from_value(record: &Value) -> Result<Self, Error> {
        let body = cmts_body(record);

        let id = body
            .and_then(|b| b.get("id"))
            .or_else(|| record.get("id"))
            .and_then(numeric_id)
            .ok_or_else(|| Error::invalid_record("CMTS record has no numeric id"))?;

        let address = body
            .and_then(|b| b.get("address"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(Self { id, address })
    }
}
