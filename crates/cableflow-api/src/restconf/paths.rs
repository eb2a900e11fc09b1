//! Resource path templates.
//!
//! Every configurable resource hangs off an inventory node. Flow and CMTS
//! paths are built by substituting numeric identifiers into these templates.

/// Operational view of all inventory nodes.
pub const TOPOLOGY: &str = "/restconf/operational/opendaylight-inventory:nodes";

/// Configured flow statistics, per switch.
pub const FLOW_STATISTICS: &str = "/controller/nb/v2/statistics/default/flow";

const CONFIG_NODES: &str = "/restconf/config/opendaylight-inventory:nodes/node";

/// `…/node/openflow:{node}/table/{table}`
pub fn flow_table(node: u64, table: u64) -> String {
    format!("{CONFIG_NODES}/openflow:{node}/table/{table}")
}

/// `…/node/openflow:{node}/table/{table}/flow/{flow}`
pub fn flow(node: u64, table: u64, flow: &str) -> String {
    format!("{}/flow/{flow}", flow_table(node, table))
}

/// `…/node/cmts:{id}`
pub fn cmts(id: u64) -> String {
    format!("{CONFIG_NODES}/cmts:{id}")
}
