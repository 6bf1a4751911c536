use serde::Deserialize;

use super::params::{Field, ToParams};
use super::{ApiMethod, DecodeError, decode_envelope};
use crate::domain::{ClientId, ClientsResponse, GetClients};

impl ToParams for GetClients {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text(ClientId::FIELD, self.client().map_or("", ClientId::as_str))
                .omit_when_empty(),
        ]
    }
}

impl ApiMethod for GetClients {
    const METHOD: &'static str = "getClients";
}

#[derive(Debug, Clone, Deserialize)]
struct ClientsJsonResponse {
    #[serde(default)]
    clients: Vec<serde_json::Value>,
}

pub fn decode_clients_json_response(json: &str) -> Result<ClientsResponse, DecodeError> {
    let envelope = decode_envelope(json)?;
    let parsed: ClientsJsonResponse = serde_json::from_str(json)?;
    Ok(ClientsResponse {
        envelope,
        clients: parsed.clients,
    })
}
