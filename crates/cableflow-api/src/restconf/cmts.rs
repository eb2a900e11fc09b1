// CMTS node endpoints
//
// A CMTS is configured as an inventory node carrying a `cmts-node`
// augmentation (address, PCMM port). The controller's packetcable provider
// picks it up and opens the COPS session on its own.

use serde_json::Value;
use tracing::debug;

use super::records::CmtsKey;
use super::{Outcome, Restconf, paths};
use crate::error::Error;
use crate::response_codes::ResponseTable;

impl Restconf {
    /// Register a CMTS with the controller.
    ///
    /// `PUT /restconf/config/.../node/cmts:{id}`
    pub async fn cmts_add(&mut self, cmts: &Value) -> Result<Outcome, Error> {
        let key = CmtsKey::from_value(cmts)?;
        debug!(id = key.id, address = ?key.address, "adding CMTS");
        self.ws.set_path(paths::cmts(key.id));
        let resp = self.ws.put(cmts).await?;
        Ok(Outcome::from_response(resp, ResponseTable::CmtsAdd))
    }

    /// Remove a CMTS from the controller.
    ///
    /// `DELETE /restconf/config/.../node/cmts:{id}`
    pub async fn cmts_remove(&mut self, cmts: &Value) -> Result<Outcome, Error> {
        let key = CmtsKey::from_value(cmts)?;
        debug!(id = key.id, "removing CMTS");
        self.ws.set_path(paths::cmts(key.id));
        let resp = self.ws.remove().await?;
        Ok(Outcome::from_response(resp, ResponseTable::CmtsDelete))
    }
}
