//! Interactive numbered menu.
//!
//! Lists the loaded fixture names once, then reads one selection per line
//! until `q`, `quit` or end of input. Each action runs to completion before
//! the next prompt; a controller failure ends the session with that error.

use std::io::{BufRead, Write};

use cableflow_core::menu::entries;
use cableflow_core::{ActionReport, Harness, MenuAction};

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

const RULE_WIDTH: usize = 30;

pub fn print_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    let rule = "-".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "   CABLEFLOW")?;
    writeln!(out, "{rule}")?;
    for (key, action) in entries() {
        let key = format!("{key}.");
        writeln!(out, "{key:<4}{action}")?;
    }
    Ok(())
}

/// Prompt and read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    text: &str,
) -> std::io::Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

pub async fn run<R: BufRead, W: Write>(
    harness: &mut Harness,
    settings: &Settings,
    mut input: R,
    mut out: W,
) -> Result<(), CliError> {
    for name in harness.fixtures().names() {
        writeln!(out, "{name}")?;
    }

    loop {
        print_menu(&mut out)?;
        let Some(selection) = prompt(&mut input, &mut out, "Enter selection: ")? else {
            writeln!(out)?;
            return Ok(());
        };

        let Some(action) = MenuAction::from_key(&selection) else {
            writeln!(out, "Invalid option!")?;
            continue;
        };
        if action == MenuAction::Quit {
            return Ok(());
        }

        writeln!(out, "{action}")?;
        let report = harness.run(action).await?;
        let text = output::render_report(settings.format, &report, settings.color)?;
        if !text.is_empty() {
            writeln!(out, "{text}")?;
        }

        if let ActionReport::Catalogue(ref catalogue) = report {
            if catalogue.is_empty() {
                continue;
            }
            let Some(letter) = prompt(&mut input, &mut out, "Enter selection: ")? else {
                writeln!(out)?;
                return Ok(());
            };
            match harness.fixtures().select(&letter) {
                Some((_, text)) => {
                    writeln!(out, "{}", output::render_fixture_text(settings.format, text)?)?;
                }
                None => writeln!(out, "Invalid option!")?,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use cableflow_core::{ControllerConfig, FixtureStore};

    use super::*;
    use crate::cli::OutputFormat;

    fn settings() -> Settings {
        Settings {
            profile_name: "default".into(),
            controller: ControllerConfig::default(),
            fixtures_dir: ".".into(),
            extension: "json".into(),
            format: OutputFormat::Table,
            color: false,
            quiet: false,
            yes: false,
        }
    }

    async fn session(fixtures: FixtureStore, input: &str) -> String {
        let settings = settings();
        let mut harness = Harness::connect(&settings.controller, fixtures).unwrap();
        let mut out = Vec::new();
        run(&mut harness, &settings, Cursor::new(input.to_owned()), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn menu_lists_every_action_once() {
        let mut out = Vec::new();
        print_menu(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(&"-".repeat(30)));
        assert!(text.contains("1.  Add CMTS 1"));
        assert!(text.contains("10. List Flows"));
        assert!(text.contains("q.  Quit"));
        assert_eq!(text.matches("Remove Flow 2 CMTS 2").count(), 1);
    }

    #[tokio::test]
    async fn unknown_input_is_rejected_and_quit_ends() {
        let text = session(FixtureStore::new(), "99\n\nq\nthis is never read\n").await;
        assert_eq!(text.matches("Invalid option!").count(), 2);
        assert_eq!(text.matches("Enter selection: ").count(), 3);
    }

    #[tokio::test]
    async fn end_of_input_ends_the_session() {
        let text = session(FixtureStore::new(), "").await;
        assert!(text.contains("CABLEFLOW"));
    }

    #[tokio::test]
    async fn print_json_lists_and_shows_a_fixture() {
        let mut store = FixtureStore::new();
        store.insert("edge", r#"{"cmts-node": {"address": "10.1.1.1", "id": 7}}"#);
        store.insert("voice", r#"{"flow": {"flow-name": "voice-1"}}"#);

        let text = session(store, "13\nb\n13\nz\nquit\n").await;
        assert!(text.starts_with("edge\nvoice\n-----"), "{text}");
        assert!(text.contains("a. edge - cmts 10.1.1.1"));
        assert!(text.contains("b. voice - flow voice-1"));
        assert!(text.contains("\"flow-name\": \"voice-1\""));
        assert!(text.contains("Invalid option!"));
    }
}
