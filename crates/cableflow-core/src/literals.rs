//! Built-in CMTS and flow records the numbered menu actions provision.
//!
//! Two CMTS nodes on the PCMM port, and five flows: flows 1, 3 and 5 sit on
//! the switch fronting CMTS 1, flows 2 and 4 on the one fronting CMTS 2.

use serde_json::{Value, json};

/// COPS/PCMM listener port on a CMTS.
pub const PCMM_PORT: u16 = 3918;

pub fn cmts1() -> Value {
    cmts(1, "10.200.90.3")
}

pub fn cmts2() -> Value {
    cmts(2, "10.200.90.4")
}

pub fn flow1() -> Value {
    flow(1, 1, "cableflow-voice-1", "10.0.1.10/32", 46)
}

pub fn flow2() -> Value {
    flow(2, 2, "cableflow-voice-2", "10.0.2.10/32", 46)
}

pub fn flow3() -> Value {
    flow(1, 3, "cableflow-video-1", "10.0.1.20/32", 34)
}

pub fn flow4() -> Value {
    flow(2, 4, "cableflow-video-2", "10.0.2.20/32", 34)
}

pub fn flow5() -> Value {
    flow(1, 5, "cableflow-data-1", "10.0.1.30/32", 0)
}

/// Every built-in record by name, for lookup from the command line.
pub fn by_name(name: &str) -> Option<Value> {
    Some(match name {
        "cmts1" => cmts1(),
        "cmts2" => cmts2(),
        "flow1" => flow1(),
        "flow2" => flow2(),
        "flow3" => flow3(),
        "flow4" => flow4(),
        "flow5" => flow5(),
        _ => return None,
    })
}

pub const NAMES: [&str; 7] = [
    "cmts1", "cmts2", "flow1", "flow2", "flow3", "flow4", "flow5",
];

fn cmts(id: u64, address: &str) -> Value {
    json!({
        "cmts-node": {
            "id": id,
            "address": address,
            "port": PCMM_PORT
        }
    })
}

fn flow(node: u64, id: u64, name: &str, destination: &str, dscp: u8) -> Value {
    json!({
        "flow": {
            "id": id,
            "table_id": 0,
            "flow-name": name,
            "node": { "id": format!("openflow:{node}") },
            "priority": 100,
            "match": {
                "ethernet-match": { "ethernet-type": { "type": 2048 } },
                "ipv4-destination": destination
            },
            "instructions": {
                "instruction": [{
                    "order": 0,
                    "apply-actions": {
                        "action": [
                            { "order": 0, "set-nw-tos-action": { "tos": dscp } },
                            { "order": 1, "output-action": { "output-node-connector": "NORMAL" } }
                        ]
                    }
                }]
            }
        }
    })
}
