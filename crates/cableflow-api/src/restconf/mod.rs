// RESTCONF controller facade
//
// Translates harness operations (list topology, add/remove flows, list
// statistics, add/remove CMTS nodes) into controller resource paths and
// verbs on top of `RestClient`. Endpoint groups live in sibling files as
// inherent methods so this module only holds the shared plumbing.

mod cmts;
mod flows;
pub mod paths;
pub mod records;
mod stats;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::{RestClient, RestResponse};
use crate::error::Error;
use crate::response_codes::ResponseTable;

pub use flows::{FlowListing, Removal};
pub use records::{CmtsKey, FlowKey};
pub use stats::{FlowStatRow, SwitchStats};

/// Port the controller's RESTCONF northbound listens on.
pub const RESTCONF_PORT: u16 = 8181;

/// The controller's answer to a configuration change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub status: u16,
    pub reason: String,
    /// Human-readable meaning of `status`, if the operation documents it.
    pub explanation: Option<&'static str>,
    pub body: String,
}

impl Outcome {
    fn from_response(resp: RestResponse, table: ResponseTable) -> Self {
        Self {
            explanation: table.explain(resp.status),
            status: resp.status,
            reason: resp.reason,
            body: resp.body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Controller facade over a [`RestClient`].
///
/// Owns the client because every operation rewrites its path.
pub struct Restconf {
    ws: RestClient,
}

impl Restconf {
    /// Wrap `ws` and point it at the RESTCONF port.
    pub fn new(mut ws: RestClient) -> Self {
        ws.set_port(RESTCONF_PORT);
        Self { ws }
    }

    /// Wrap `ws` and point it at an explicit port.
    pub fn with_port(mut ws: RestClient, port: u16) -> Self {
        ws.set_port(port);
        Self { ws }
    }

    pub fn client(&self) -> &RestClient {
        &self.ws
    }

    /// Fetch the operational inventory of all nodes.
    ///
    /// `GET /restconf/operational/opendaylight-inventory:nodes`
    pub async fn topology(&mut self) -> Result<Value, Error> {
        debug!("listing topology");
        self.ws.set_path(paths::TOPOLOGY);
        let resp = self.read().await?;
        resp.json()
    }

    /// GET the current path. Reads have no outcome table, so a 401 is an
    /// error here rather than a status to explain.
    async fn read(&mut self) -> Result<RestResponse, Error> {
        let resp = self.ws.get().await?;
        if resp.status == 401 {
            return Err(Error::Unauthorized {
                path: self.ws.path().unwrap_or_default().to_owned(),
            });
        }
        Ok(resp)
    }
}
