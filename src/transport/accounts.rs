use serde::Deserialize;

use super::params::{Field, ToParams};
use super::{ApiMethod, DecodeError, decode_envelope};
use crate::domain::{Account, GetRegistrationStatus, Pop, Registration, RegistrationStatusResponse};
use crate::wire::{self, WireDateTime, WireInt, WireText};

impl ToParams for GetRegistrationStatus {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::text(Account::FIELD, self.account().as_str())]
    }
}

impl ApiMethod for GetRegistrationStatus {
    const METHOD: &'static str = "getRegistrationStatus";
}

#[derive(Debug, Clone, Deserialize)]
struct RegistrationStatusJsonResponse {
    #[serde(default, deserialize_with = "wire::optional")]
    registered: Option<WireText>,
    #[serde(default)]
    rerouted: WireInt,
    #[serde(default, deserialize_with = "wire::optional")]
    from_server_pop: Option<WireInt>,
    #[serde(default)]
    registrations: Vec<RegistrationJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct RegistrationJson {
    #[serde(default)]
    account: String,
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
    #[serde(default, deserialize_with = "wire::optional")]
    server_pop: Option<WireInt>,
    #[serde(default)]
    register_ip: String,
    #[serde(default, deserialize_with = "wire::optional")]
    register_port: Option<WireInt>,
    #[serde(default, deserialize_with = "wire::optional")]
    register_next: Option<WireDateTime>,
    #[serde(default)]
    register_protocol: String,
    #[serde(default)]
    register_transport: String,
    #[serde(default)]
    register_useragent: String,
    #[serde(default)]
    rerouted: WireInt,
    #[serde(default, deserialize_with = "wire::optional")]
    from_server_pop: Option<WireInt>,
}

impl From<RegistrationJson> for Registration {
    fn from(value: RegistrationJson) -> Self {
        Self {
            account: value.account,
            server_name: value.server_name,
            server_shortname: value.server_shortname,
            server_hostname: value.server_hostname,
            server_ip: value.server_ip,
            server_country: value.server_country,
            server_pop: value.server_pop.map(|pop| Pop::new(pop.0)),
            register_ip: value.register_ip,
            register_port: value.register_port.map(|port| port.0),
            register_next: value.register_next.map(|next| next.0),
            register_protocol: value.register_protocol,
            register_transport: value.register_transport,
            register_useragent: value.register_useragent,
            rerouted: value.rerouted.0,
            from_server_pop: value.from_server_pop.map(|pop| Pop::new(pop.0)),
        }
    }
}

pub fn decode_registration_status_json_response(
    json: &str,
) -> Result<RegistrationStatusResponse, DecodeError> {
    let envelope = decode_envelope(json)?;
    let parsed: RegistrationStatusJsonResponse = serde_json::from_str(json)?;
    Ok(RegistrationStatusResponse {
        envelope,
        registered: parsed.registered.map(WireText::into_string),
        rerouted: parsed.rerouted.0,
        from_server_pop: parsed.from_server_pop.map(|pop| Pop::new(pop.0)),
        registrations: parsed
            .registrations
            .into_iter()
            .map(Registration::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::params::encode_params;

    #[test]
    fn encode_account_param() {
        let request = GetRegistrationStatus::new(Account::new("100000_VoIP").unwrap());
        let params = encode_params(&request.fields());
        assert_eq!(params.get("account").map(String::as_str), Some("100000_VoIP"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn decode_registration_status() {
        let json = r#"
        {
          "status": "success",
          "registered": "yes",
          "rerouted": 0,
          "registrations": [
            {
              "account": "100000_VoIP",
              "server_name": "Atlanta",
              "server_shortname": "ATL1",
              "server_hostname": "atlanta1.voip.ms",
              "server_ip": "208.100.60.8",
              "server_country": "USA",
              "server_pop": "1",
              "register_ip": "203.0.113.10",
              "register_port": "5060",
              "register_next": "2024-03-01 13:45:00",
              "register_protocol": "SIP",
              "register_transport": "UDP",
              "register_useragent": "Asterisk PBX",
              "rerouted": "1",
              "from_server_pop": "4"
            }
          ]
        }
        "#;

        let response = decode_registration_status_json_response(json).unwrap();
        assert!(response.envelope.is_success());
        assert!(response.is_registered());
        assert_eq!(response.rerouted, 0);
        assert_eq!(response.from_server_pop, None);

        let registration = &response.registrations[0];
        assert_eq!(registration.account, "100000_VoIP");
        assert_eq!(registration.server_pop, Some(Pop::new(1)));
        assert_eq!(registration.register_port, Some(5060));
        assert_eq!(
            registration.register_next.map(|next| next.to_string()).as_deref(),
            Some("2024-03-01 13:45:00")
        );
        assert_eq!(registration.register_transport, "UDP");
        assert_eq!(registration.rerouted, 1);
        assert_eq!(registration.from_server_pop, Some(Pop::new(4)));
    }

    #[test]
    fn decode_unregistered_account() {
        let json = r#"{"status": "success", "registered": "no"}"#;
        let response = decode_registration_status_json_response(json).unwrap();
        assert!(!response.is_registered());
        assert!(response.registrations.is_empty());
    }
}
