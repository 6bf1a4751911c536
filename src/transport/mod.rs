//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod accounts;
mod clients;
mod dids;
mod envelope;
mod params;
mod servers;

pub use accounts::decode_registration_status_json_response;
pub use clients::decode_clients_json_response;
pub use dids::decode_dids_info_json_response;
pub use envelope::{decode_envelope, encode_dispatch};
pub use servers::decode_servers_info_json_response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Patch,
}

/// A provider method: its name, the verb it is sent with, and its parameters.
pub trait ApiMethod: params::ToParams {
    const METHOD: &'static str;
    const VERB: HttpVerb = HttpVerb::Get;
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response carries none of success, status or message")]
    MissingEnvelope,
}
