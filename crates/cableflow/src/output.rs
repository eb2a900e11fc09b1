//! Output formatting: table or JSON.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde. Status lines are colored with
//! `owo-colors` when enabled.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use cableflow_core::{
    ActionReport, CatalogueEntry, FlowListing, Outcome, Removal, SwitchStats, show,
};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable items as a table of `R` rows or
/// as JSON.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
    }
}

/// Render a single item; table mode uses `detail_fn` for a text view.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let text = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(text)
}

// ── Outcomes ─────────────────────────────────────────────────────────

/// `201 Created Flow Config processed successfully`, green on success and
/// red otherwise.
pub fn outcome_line(outcome: &Outcome, color: bool) -> String {
    let status = format!("{} {}", outcome.status, outcome.reason);
    let status = match (color, outcome.is_success()) {
        (false, _) => status,
        (true, true) => status.green().to_string(),
        (true, false) => status.red().to_string(),
    };
    match outcome.explanation {
        Some(msg) => format!("{status} {msg}"),
        None => status,
    }
}

pub fn render_outcome(
    format: OutputFormat,
    outcome: &Outcome,
    color: bool,
) -> Result<String, CliError> {
    render_single(format, outcome, |o| outcome_line(o, color))
}

pub fn render_outcomes(
    format: OutputFormat,
    outcomes: &[Outcome],
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(outcomes
            .iter()
            .map(|o| outcome_line(o, color))
            .collect::<Vec<_>>()
            .join("\n")),
        _ => render_list(format, outcomes, |o| OutcomeRow::from(o)),
    }
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Status")]
    status: u16,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl From<&Outcome> for OutcomeRow {
    fn from(o: &Outcome) -> Self {
        Self {
            status: o.status,
            reason: o.reason.clone(),
        }
    }
}

// ── Removals ─────────────────────────────────────────────────────────

pub fn render_removals(
    format: OutputFormat,
    removed: &[Removal],
    color: bool,
) -> Result<String, CliError> {
    if format == OutputFormat::Table {
        if removed.is_empty() {
            return Ok("No flows to remove".into());
        }
        let lines: Vec<String> = removed
            .iter()
            .map(|r| format!("Removing {} ... {}", r.key.label(), outcome_line(&r.outcome, color)))
            .collect();
        return Ok(lines.join("\n"));
    }
    render_list(format, removed, |r| RemovalRow::from(r))
}

#[derive(Tabled)]
struct RemovalRow {
    #[tabled(rename = "Node")]
    node: u64,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: u16,
}

impl From<&Removal> for RemovalRow {
    fn from(r: &Removal) -> Self {
        Self {
            node: r.key.node,
            id: r.key.id.clone(),
            status: r.outcome.status,
        }
    }
}

// ── Flow listing ─────────────────────────────────────────────────────

#[derive(Tabled)]
struct FlowRow {
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Table")]
    table: u64,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Priority")]
    priority: String,
}

pub fn render_flows(format: OutputFormat, listing: &FlowListing) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            if listing.is_empty() {
                return Ok(format!(
                    "No flows configured on openflow:{} table {}",
                    listing.node, listing.table
                ));
            }
            let rows: Vec<FlowRow> = listing
                .entries()
                .into_iter()
                .zip(&listing.flows)
                .map(|(key, flow)| FlowRow {
                    node: format!("openflow:{}", listing.node),
                    table: listing.table,
                    id: key.as_ref().map(|k| k.id.clone()).unwrap_or_default(),
                    name: key.and_then(|k| k.name).unwrap_or_default(),
                    priority: flow
                        .get("priority")
                        .map(Value::to_string)
                        .unwrap_or_default(),
                })
                .collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => Ok(show(&listing.raw)),
        OutputFormat::JsonCompact => render_json(&listing.raw, true),
    }
}

// ── Statistics ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Count")]
    count: u64,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "DestIP")]
    dest_ip: String,
}

pub fn render_stats(format: OutputFormat, stats: &[SwitchStats]) -> Result<String, CliError> {
    if format != OutputFormat::Table {
        return render_list(format, stats, |s| SwitchRow {
            switch: s.switch_id.clone(),
            flows: s.rows.len(),
        });
    }

    let sections: Vec<String> = stats
        .iter()
        .map(|s| {
            let body = if s.rows.is_empty() {
                "  none".to_owned()
            } else {
                let rows: Vec<StatRow> = s
                    .rows
                    .iter()
                    .map(|r| StatRow {
                        count: r.count,
                        action: r.action.clone(),
                        port: r.port.clone(),
                        dest_ip: r.dest_ip.clone(),
                    })
                    .collect();
                render_table(&rows)
            };
            format!("Switch ID : {}\n{body}", s.switch_id)
        })
        .collect();
    Ok(sections.join("\n\n"))
}

#[derive(Tabled)]
struct SwitchRow {
    #[tabled(rename = "Switch")]
    switch: String,
    #[tabled(rename = "Flows")]
    flows: usize,
}

// ── Fixtures ─────────────────────────────────────────────────────────

/// `a. voice - flow voice-1`, or `c. broken - invalid json file`.
pub fn catalogue_line(entry: &CatalogueEntry) -> String {
    match entry.kind.detail() {
        Some(detail) => format!(
            "{}. {} - {} {detail}",
            entry.letter,
            entry.name,
            entry.kind.label()
        ),
        None => format!("{}. {} - {}", entry.letter, entry.name, entry.kind.label()),
    }
}

#[derive(Tabled)]
struct CatalogueRow {
    #[tabled(rename = "Key")]
    letter: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Detail")]
    detail: String,
}

pub fn render_catalogue(
    format: OutputFormat,
    catalogue: &[CatalogueEntry],
) -> Result<String, CliError> {
    if format == OutputFormat::Table && catalogue.is_empty() {
        return Ok("No fixtures found".into());
    }
    render_list(format, catalogue, |e| CatalogueRow {
        letter: e.letter.clone(),
        name: e.name.clone(),
        kind: e.kind.label(),
        detail: e.kind.detail().unwrap_or_default().to_owned(),
    })
}

/// Pretty JSON for JSON fixtures; other text verbatim.
pub fn render_fixture_text(format: OutputFormat, text: &str) -> Result<String, CliError> {
    match serde_json::from_str::<Value>(text) {
        Ok(json) if format == OutputFormat::JsonCompact => render_json(&json, true),
        Ok(json) => Ok(show(&json)),
        Err(_) => Ok(text.to_owned()),
    }
}

// ── Reports ──────────────────────────────────────────────────────────

/// Render any harness report. `Catalogue` renders as lettered lines, the
/// form the menu prompts from.
pub fn render_report(
    format: OutputFormat,
    report: &ActionReport,
    color: bool,
) -> Result<String, CliError> {
    match report {
        ActionReport::Outcome(outcome) => render_outcome(format, outcome, color),
        ActionReport::Removals(removed) => render_removals(format, removed, color),
        ActionReport::Topology(nodes) => match format {
            OutputFormat::JsonCompact => render_json(nodes, true),
            _ => Ok(show(nodes)),
        },
        ActionReport::Flows(listing) => render_flows(format, listing),
        ActionReport::Stats(stats) => render_stats(format, stats),
        ActionReport::Catalogue(entries) => {
            if entries.is_empty() {
                return Ok("No fixtures found".into());
            }
            Ok(entries.iter().map(catalogue_line).collect::<Vec<_>>().join("\n"))
        }
        ActionReport::Quit => Ok(String::new()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cableflow_core::{FixtureKind, FlowKey};
    use serde_json::json;

    use super::*;

    fn outcome(status: u16, explanation: Option<&'static str>) -> Outcome {
        Outcome {
            status,
            reason: "Created".into(),
            explanation,
            body: String::new(),
        }
    }

    #[test]
    fn outcome_line_without_color() {
        let o = outcome(201, Some("Flow Config processed successfully"));
        assert_eq!(
            outcome_line(&o, false),
            "201 Created Flow Config processed successfully"
        );
        assert_eq!(outcome_line(&outcome(299, None), false), "299 Created");
    }

    #[test]
    fn catalogue_lines() {
        let flow = CatalogueEntry {
            letter: "a".into(),
            name: "voice".into(),
            kind: FixtureKind::Flow {
                name: "voice-1".into(),
            },
        };
        assert_eq!(catalogue_line(&flow), "a. voice - flow voice-1");

        let bad = CatalogueEntry {
            letter: "b".into(),
            name: "broken".into(),
            kind: FixtureKind::Invalid,
        };
        assert_eq!(catalogue_line(&bad), "b. broken - invalid json file");
    }

    #[test]
    fn empty_switch_renders_none() {
        let stats = vec![SwitchStats {
            switch_id: "openflow:1".into(),
            rows: Vec::new(),
        }];
        let text = render_stats(OutputFormat::Table, &stats).unwrap();
        assert_eq!(text, "Switch ID : openflow:1\n  none");
    }

    #[test]
    fn fixture_text_is_sorted_json_or_verbatim() {
        let text = render_fixture_text(OutputFormat::Table, r#"{"b": 1, "a": 2}"#).unwrap();
        assert!(text.find("\"a\"").unwrap() < text.find("\"b\"").unwrap());
        assert_eq!(
            render_fixture_text(OutputFormat::Table, "<flow/>").unwrap(),
            "<flow/>"
        );
    }

    #[test]
    fn flow_config_listing_renders_as_table() {
        let raw = json!({
            "flowConfig": [
                { "name": "flow1", "node": { "id": "00:00:00:00:00:00:00:01", "type": "OF" }, "priority": 500 },
                { "priority": 1 }
            ]
        });
        let listing = FlowListing::parse(1, 0, raw);
        let text = render_flows(OutputFormat::Table, &listing).unwrap();
        assert!(text.contains("flow1"));
        assert!(text.contains("500"));
        assert_eq!(text.matches("openflow:1").count(), 2);
    }

    #[test]
    fn string_flow_id_listing_renders_as_table() {
        let raw = json!({
            "flow-node-inventory:table": [{
                "id": 0,
                "flow": [{ "id": "voice-upstream", "flow-name": "voice" }, { "id": 3 }]
            }]
        });
        let listing = FlowListing::parse(2, 0, raw);
        let text = render_flows(OutputFormat::Table, &listing).unwrap();
        assert!(text.contains("voice-upstream"));
        assert!(text.contains("voice"));
        assert!(text.contains("openflow:2"));
    }

    #[test]
    fn outcomes_and_removals_render_as_json() {
        let outcomes = vec![outcome(201, None), outcome(409, None)];
        let text = render_outcomes(OutputFormat::JsonCompact, &outcomes, false).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[1]["status"], 409);

        let removed = vec![Removal {
            key: FlowKey {
                node: 1,
                table: 0,
                id: "voice-upstream".into(),
                name: None,
            },
            outcome: outcome(204, None),
        }];
        let text = render_removals(OutputFormat::Json, &removed, false).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["key"]["id"], "voice-upstream");
        assert_eq!(parsed[0]["outcome"]["status"], 204);
    }

    #[test]
    fn flows_json_is_raw_listing() {
        let raw = json!({ "flow": [{ "id": 1, "node": { "id": "openflow:1" } }] });
        let listing = FlowListing::parse(1, 0, raw.clone());
        let text = render_flows(OutputFormat::JsonCompact, &listing).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), raw);
    }
}
