// cableflow-api: REST client and RESTCONF facade for CMTS flow provisioning

pub mod auth;
pub mod client;
pub mod error;
pub mod response_codes;
pub mod restconf;
pub mod transport;

pub use auth::BasicCredentials;
pub use client::{ConnectionProfile, RestClient, RestResponse, show};
pub use error::Error;
pub use response_codes::ResponseTable;
pub use restconf::{
    CmtsKey, FlowKey, FlowListing, FlowStatRow, Outcome, RESTCONF_PORT, Removal, Restconf,
    SwitchStats,
};
pub use transport::TransportConfig;
