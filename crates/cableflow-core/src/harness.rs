// ── Harness ──
//
// Owns the RESTCONF facade and the fixture store for one session, and
// implements every menu action on top of them. Actions run strictly one
// after another; a transport failure ends the action with an error and
// leaves any later steps undone.

use serde_json::Value;
use tracing::{debug, info};

use cableflow_api::{
    CmtsKey, FlowListing, Outcome, Removal, RestClient, Restconf, SwitchStats, TransportConfig,
};

use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::fixtures::{CatalogueEntry, FixtureStore};
use crate::literals;
use crate::menu::MenuAction;

/// Result of one harness action, ready for rendering.
#[derive(Debug, Clone)]
pub enum ActionReport {
    /// A single configuration change and the controller's verdict.
    Outcome(Outcome),
    /// A remove-all sweep, one entry per flow in listing order.
    Removals(Vec<Removal>),
    /// Operational inventory, as returned.
    Topology(Value),
    Flows(FlowListing),
    Stats(Vec<SwitchStats>),
    /// Lettered fixture listing; the caller prompts for a selection.
    Catalogue(Vec<CatalogueEntry>),
    Quit,
}

/// One interactive or scripted harness session.
pub struct Harness {
    restconf: Restconf,
    fixtures: FixtureStore,
    node: u64,
    table: u64,
}

impl Harness {
    /// Build the REST client from `config` and wrap it.
    ///
    /// Nothing is sent until the first action runs.
    pub fn connect(config: &ControllerConfig, fixtures: FixtureStore) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let mut ws = RestClient::with_transport(config.host.clone(), &transport)?;
        if let Some(ref auth) = config.auth {
            ws.credentials(auth.username.clone(), auth.password.clone());
        }
        debug!(host = %config.host, port = config.port, auth = ws.uses_credentials(), "harness ready");

        let restconf = Restconf::with_port(ws, config.port);
        Ok(Self::with_restconf(restconf, fixtures, config.node, config.table))
    }

    pub fn with_restconf(restconf: Restconf, fixtures: FixtureStore, node: u64, table: u64) -> Self {
        Self {
            restconf,
            fixtures,
            node,
            table,
        }
    }

    pub fn fixtures(&self) -> &FixtureStore {
        &self.fixtures
    }

    pub fn restconf(&self) -> &Restconf {
        &self.restconf
    }

    /// Node and table targeted by list/remove-all.
    pub fn target(&self) -> (u64, u64) {
        (self.node, self.table)
    }

    // ── Menu dispatch ────────────────────────────────────────────────

    /// Run one numbered menu action.
    pub async fn run(&mut self, action: MenuAction) -> Result<ActionReport, CoreError> {
        debug!(?action, "running menu action");
        let report = match action {
            MenuAction::AddCmts1 => ActionReport::Outcome(self.cmts_add(&literals::cmts1()).await?),
            MenuAction::AddCmts2 => ActionReport::Outcome(self.cmts_add(&literals::cmts2()).await?),
            MenuAction::AddFlow1 => ActionReport::Outcome(self.flow_add(&literals::flow1()).await?),
            MenuAction::AddFlow2 => ActionReport::Outcome(self.flow_add(&literals::flow2()).await?),
            MenuAction::RemoveFlow1 => {
                ActionReport::Outcome(self.flow_remove(&literals::flow1()).await?)
            }
            MenuAction::RemoveFlow2 => {
                ActionReport::Outcome(self.flow_remove(&literals::flow2()).await?)
            }
            MenuAction::RemoveAllFlows => ActionReport::Removals(self.flow_remove_all().await?),
            MenuAction::ListFlowStats => ActionReport::Stats(self.statistics().await?),
            MenuAction::ListTopology => ActionReport::Topology(self.topology().await?),
            MenuAction::ListFlows => ActionReport::Flows(self.flow_list().await?),
            MenuAction::RemoveCmts2 => {
                ActionReport::Outcome(self.cmts_remove(&literals::cmts2()).await?)
            }
            MenuAction::RemoveCmts1 => {
                ActionReport::Outcome(self.cmts_remove(&literals::cmts1()).await?)
            }
            MenuAction::PrintJson => ActionReport::Catalogue(self.fixtures.catalogue()),
            MenuAction::Quit => ActionReport::Quit,
        };
        Ok(report)
    }

    // ── Records ──────────────────────────────────────────────────────

    /// Resolve a record by name: a loaded fixture first, then a built-in
    /// literal (`cmts1`, `flow3`, ...).
    pub fn record(&self, name: &str) -> Result<Value, CoreError> {
        if self.fixtures.get(name).is_some() {
            return self.fixtures.record(name);
        }
        literals::by_name(name).ok_or_else(|| CoreError::UnknownRecord {
            name: name.to_owned(),
        })
    }

    // ── Operations ───────────────────────────────────────────────────

    pub async fn topology(&mut self) -> Result<Value, CoreError> {
        Ok(self.restconf.topology().await?)
    }

    pub async fn flow_list(&mut self) -> Result<FlowListing, CoreError> {
        Ok(self.restconf.flow_list(self.node, self.table).await?)
    }

    pub async fn flow_add(&mut self, flow: &Value) -> Result<Outcome, CoreError> {
        Ok(self.restconf.flow_add(flow).await?)
    }

    pub async fn flow_update(&mut self, flow: &Value) -> Result<Outcome, CoreError> {
        Ok(self.restconf.flow_update(flow).await?)
    }

    pub async fn flow_remove(&mut self, flow: &Value) -> Result<Outcome, CoreError> {
        Ok(self.restconf.flow_remove(flow).await?)
    }

    pub async fn flow_remove_all(&mut self) -> Result<Vec<Removal>, CoreError> {
        let removed = self
            .restconf
            .flow_remove_all(self.node, self.table)
            .await?;
        info!(count = removed.len(), node = self.node, "removed all flows");
        Ok(removed)
    }

    /// Provision all five built-in flows, in order.
    pub async fn flow_add_several(&mut self) -> Result<Vec<Outcome>, CoreError> {
        let flows = [
            literals::flow1(),
            literals::flow2(),
            literals::flow3(),
            literals::flow4(),
            literals::flow5(),
        ];
        let mut outcomes = Vec::with_capacity(flows.len());
        for flow in &flows {
            outcomes.push(self.flow_add(flow).await?);
        }
        Ok(outcomes)
    }

    pub async fn statistics(&mut self) -> Result<Vec<SwitchStats>, CoreError> {
        Ok(self.restconf.statistics_flows().await?)
    }

    pub async fn cmts_add(&mut self, cmts: &Value) -> Result<Outcome, CoreError> {
        let key = CmtsKey::from_value(cmts)?;
        info!(id = key.id, address = ?key.address, "adding CMTS");
        Ok(self.restconf.cmts_add(cmts).await?)
    }

    pub async fn cmts_remove(&mut self, cmts: &Value) -> Result<Outcome, CoreError> {
        Ok(self.restconf.cmts_remove(cmts).await?)
    }
}
