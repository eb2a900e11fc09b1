// Flow statistics endpoint
//
// The statistics report is loosely typed: `actions` is a list on some
// controller builds and a single object on others, and switches with no
// installed flows omit `flowStatistic` entirely.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{Restconf, paths};
use crate::error::Error;

/// Per-switch section of the statistics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchStats {
    pub switch_id: String,
    pub rows: Vec<FlowStatRow>,
}

/// One installed flow's counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowStatRow {
    pub count: u64,
    pub action: String,
    pub port: String,
    pub dest_ip: String,
}

impl SwitchStats {
    /// Parse the `flowStatistics` array of a statistics report.
    pub fn parse_report(report: &Value) -> Vec<Self> {
        report
            .get("flowStatistics")
            .and_then(Value::as_array)
            .map(|switches| switches.iter().map(Self::parse_switch).collect())
            .unwrap_or_default()
    }

    fn parse_switch(switch: &Value) -> Self {
        let switch_id = text(&switch["node"]["id"]);
        let rows = switch
            .get("flowStatistic")
            .and_then(Value::as_array)
            .map(|flows| flows.iter().map(FlowStatRow::parse).collect())
            .unwrap_or_default();
        Self { switch_id, rows }
    }
}

impl FlowStatRow {
    fn parse(stat: &Value) -> Self {
        let flow = &stat["flow"];

        // Lists carry the output action second, after the DSCP/VLAN rewrite.
        let action = match &flow["actions"] {
            Value::Array(actions) => actions.get(1).or_else(|| actions.first()),
            obj @ Value::Object(_) => Some(obj),
            _ => None,
        };

        Self {
            count: stat["packetCount"].as_u64().unwrap_or_default(),
            action: action.map(|a| text(&a["type"])).unwrap_or_default(),
            port: action.map(|a| text(&a["port"]["id"])).unwrap_or_default(),
            dest_ip: text(&flow["match"]["matchField"][0]["value"]),
        }
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl Restconf {
    /// Fetch per-switch flow statistics.
    ///
    /// `GET /controller/nb/v2/statistics/default/flow`
    pub async fn statistics_flows(&mut self) -> Result<Vec<SwitchStats>, Error> {
        debug!("fetching flow statistics");
        self.ws.set_path(paths::FLOW_STATISTICS);
        let resp = self.read().await?;
        let report = resp.json()?;
        Ok(SwitchStats::parse_report(&report))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_list_and_object_actions() {
        let report = json!({
            "flowStatistics": [
                {
                    "node": { "id": "00:00:00:00:00:00:00:01", "type": "OF" },
                    "flowStatistic": [
                        {
                            "packetCount": 42,
                            "flow": {
                                "actions": [
                                    { "type": "SET_NW_TOS", "tos": 46 },
                                    { "type": "OUTPUT", "port": { "id": "2" } }
                                ],
                                "match": { "matchField": [{ "type": "NW_DST", "value": "10.0.0.2" }] }
                            }
                        },
                        {
                            "packetCount": 7,
                            "flow": {
                                "actions": { "type": "OUTPUT", "port": { "id": 3 } },
                                "match": { "matchField": [{ "type": "NW_DST", "value": "10.0.0.3" }] }
                            }
                        }
                    ]
                },
                { "node": { "id": "00:00:00:00:00:00:00:02" } }
            ]
        });

        let stats = SwitchStats::parse_report(&report);
        assert_eq!(stats.len(), 2);
        assert_eq!(
            stats[0].rows,
            vec![
                FlowStatRow {
                    count: 42,
                    action: "OUTPUT".into(),
                    port: "2".into(),
                    dest_ip: "10.0.0.2".into(),
                },
                FlowStatRow {
                    count: 7,
                    action: "OUTPUT".into(),
                    port: "3".into(),
                    dest_ip: "10.0.0.3".into(),
                },
            ]
        );
        assert_eq!(stats[1].switch_id, "00:00:00:00:00:00:00:02");
        assert!(stats[1].rows.is_empty());
    }

    #[test]
    fn single_element_action_list_falls_back_to_first() {
        let row = FlowStatRow::parse(&json!({
            "packetCount": 1,
            "flow": { "actions": [{ "type": "DROP" }] }
        }));
        assert_eq!(row.action, "DROP");
        assert_eq!(row.port, "");
        assert_eq!(row.dest_ip, "");
    }

    #[test]
    fn report_without_statistics_is_empty() {
        assert!(SwitchStats::parse_report(&json!({})).is_empty());
    }
}
