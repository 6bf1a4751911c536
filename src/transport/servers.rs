use serde::Deserialize;

use super::params::{Field, ToParams};
use super::{ApiMethod, DecodeError, decode_envelope};
use crate::domain::{GetServersInfo, Pop, ServerInfo, ServersInfoResponse, is_truthy_token};
use crate::wire::{WireInt, WireText};

const SERVER_POP_FIELD: &str = "server_pop";

impl ToParams for GetServersInfo {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::optional_int(
            SERVER_POP_FIELD,
            self.server_pop().map(Pop::value),
        )]
    }
}

impl ApiMethod for GetServersInfo {
    const METHOD: &'static str = "getServersInfo";
}

#[derive(Debug, Clone, Deserialize)]
struct ServersInfoJsonResponse {
    #[serde(default)]
    servers: Vec<ServerJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerJson {
    server_pop: WireInt,
    #[serde(default)]
    server_name: String,
    #[serde(default)]
    server_shortname: String,
    #[serde(default)]
    server_hostname: String,
    #[serde(default)]
    server_ip: String,
    #[serde(default)]
    server_country: String,
    #[serde(default)]
    server_recommended: WireText,
}

impl From<ServerJson> for ServerInfo {
    fn from(value: ServerJson) -> Self {
        let recommended_text = value.server_recommended.into_string();
        Self {
            pop: Pop::new(value.server_pop.0),
            name: value.server_name,
            shortname: value.server_shortname,
            hostname: value.server_hostname,
            ip: value.server_ip,
            country: value.server_country,
            recommended: is_truthy_token(&recommended_text),
            recommended_text,
        }
    }
}

pub fn decode_servers_info_json_response(json: &str) -> Result<ServersInfoResponse, DecodeError> {
    let envelope = decode_envelope(json)?;
    let parsed: ServersInfoJsonResponse = serde_json::from_str(json)?;
    Ok(ServersInfoResponse {
        envelope,
        servers: parsed.servers.into_iter().map(ServerInfo::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::params::encode_params;

    #[test]
    fn encode_server_pop_only_when_set() {
        assert!(encode_params(&GetServersInfo::all().fields()).is_empty());

        let params = encode_params(&GetServersInfo::for_pop(Pop::new(7)).fields());
        assert_eq!(params.get("server_pop").map(String::as_str), Some("7"));
    }

    #[test]
    fn decode_servers_derives_recommended_flag() {
        let json = r#"
        {
          "status": "success",
          "servers": [
            {
              "server_name": "Atlanta",
              "server_shortname": "ATL1",
              "server_hostname": "atlanta1.voip.ms",
              "server_ip": "208.100.60.8",
              "server_country": "USA",
              "server_pop": "1",
              "server_recommended": "yes"
            },
            {
              "server_name": "New York",
              "server_hostname": "newyork1.voip.ms",
              "server_pop": 2,
              "server_recommended": "no"
            },
            {
              "server_name": "Montreal",
              "server_hostname": "montreal1.voip.ms",
              "server_pop": "3",
              "server_recommended": 1
            }
          ]
        }
        "#;

        let response = decode_servers_info_json_response(json).unwrap();
        assert_eq!(response.servers.len(), 3);

        let atl = &response.servers[0];
        assert_eq!(atl.pop, Pop::new(1));
        assert_eq!(atl.shortname, "ATL1");
        assert_eq!(atl.hostname, "atlanta1.voip.ms");
        assert!(atl.recommended);
        assert_eq!(atl.recommended_text, "yes");

        assert_eq!(response.servers[1].pop, Pop::new(2));
        assert!(!response.servers[1].recommended);
        assert!(response.servers[2].recommended);
        assert_eq!(response.servers[2].recommended_text, "1");
    }

    #[test]
    fn decode_rejects_non_numeric_pop() {
        let json = r#"{"status": "success", "servers": [{"server_pop": "atl"}]}"#;
        let err = decode_servers_info_json_response(json).unwrap_err();
        assert!(err.to_string().contains("atl"), "{err}");
    }
}
