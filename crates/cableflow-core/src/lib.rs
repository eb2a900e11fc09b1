//! Harness layer between `cableflow-api` and the `cableflow` CLI.
//!
//! - **[`Harness`]**: owns the RESTCONF facade and the fixture store for a
//!   session and implements every numbered [`MenuAction`], returning an
//!   [`ActionReport`] for the CLI to render.
//!
//! - **[`FixtureStore`]**: flow and CMTS definitions scanned from local
//!   files, keyed by file stem and classified by [`classify`].
//!
//! - **[`literals`]**: the built-in CMTS and flow records the menu uses.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod literals;
pub mod menu;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, ControllerConfig};
pub use error::CoreError;
pub use fixtures::{CatalogueEntry, DEFAULT_EXTENSION, FixtureKind, FixtureStore, classify};
pub use harness::{ActionReport, Harness};
pub use menu::MenuAction;

pub use cableflow_api::{
    FlowKey, FlowListing, FlowStatRow, Outcome, Removal, SwitchStats, show,
};
