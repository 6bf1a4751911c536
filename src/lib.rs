//! Typed Rust client for the VoIP.ms REST API.
//!
//! VoIP.ms answers every call with HTTP 200 and a JSON body whose scalars are
//! mostly strings, whatever their real type. The crate is split in three
//! layers: a domain layer of strong types, a transport layer for those
//! wire-format quirks, and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use voipms::{Credentials, Did, ServerHostname, VoipMsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), voipms::VoipMsError> {
//!     let client = VoipMsClient::new(Credentials::new("me@example.com", "api-key")?)?;
//!     let did = Did::new("5551234567")?;
//!     let pop = ServerHostname::new("atlanta1.voip.ms")?;
//!     let envelope = client.set_did_pop_by_hostname(did, &pop).await?;
//!     println!("success: {}", envelope.is_success());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;
pub mod wire;

pub use client::{
    Credentials, DEFAULT_API_URL, DEFAULT_TIMEOUT, VoipMsClient, VoipMsClientBuilder, VoipMsError,
};
pub use domain::{
    Account, ApiPassword, ApiUsername, ClientId, ClientsResponse, Did, DidInfo, DidsInfoResponse,
    GetClients, GetDidsInfo, GetRegistrationStatus, GetServersInfo, Pop, Registration,
    RegistrationStatusResponse, ResponseEnvelope, ServerHostname, ServerInfo,
    ServersInfoResponse, SetDidPop, ValidationError,
};
