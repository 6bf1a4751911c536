use serde::Deserialize;

use super::params::{Field, ToParams};
use super::{ApiMethod, DecodeError, HttpVerb, decode_envelope};
use crate::domain::{ClientId, Did, DidInfo, DidsInfoResponse, GetDidsInfo, Pop, SetDidPop};
use crate::wire::{self, WireDate, WireDateTime, WireDecimal, WireInt};

const POP_FIELD: &str = "pop";

impl ToParams for GetDidsInfo {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::optional_text(ClientId::FIELD, self.client().map(ClientId::as_str)),
            Field::optional_text(Did::FIELD, self.did().map(Did::as_str)),
        ]
    }
}

impl ApiMethod for GetDidsInfo {
    const METHOD: &'static str = "getDIDsInfo";
}

impl ToParams for SetDidPop {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text(Did::FIELD, self.did().as_str()),
            Field::int(POP_FIELD, self.pop().value()),
        ]
    }
}

impl ApiMethod for SetDidPop {
    const METHOD: &'static str = "setDIDPOP";
    const VERB: HttpVerb = HttpVerb::Patch;
}

#[derive(Debug, Clone, Deserialize)]
struct DidsInfoJsonResponse {
    #[serde(default)]
    dids: Vec<DidJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct DidJson {
    did: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    routing: String,
    #[serde(default)]
    failover_busy: String,
    #[serde(default)]
    failover_unreachable: String,
    #[serde(default)]
    failover_noanswer: String,
    #[serde(default)]
    voicemail: String,
    #[serde(default)]
    pop: WireInt,
    #[serde(default)]
    dialtime: WireInt,
    #[serde(default)]
    cnam: WireInt,
    #[serde(default)]
    e911: WireInt,
    #[serde(default)]
    callerid_prefix: String,
    #[serde(default)]
    record_calls: WireInt,
    #[serde(default)]
    note: String,
    #[serde(default)]
    billing_type: WireInt,
    #[serde(default, deserialize_with = "wire::optional")]
    next_billing: Option<WireDate>,
    #[serde(default, deserialize_with = "wire::optional")]
    order_date: Option<WireDateTime>,
    #[serde(default, deserialize_with = "wire::optional")]
    reseller_account: Option<WireInt>,
    #[serde(default, deserialize_with = "wire::optional")]
    reseller_next_billing: Option<WireDate>,
    #[serde(default, deserialize_with = "wire::optional")]
    reseller_monthly: Option<WireDecimal>,
    #[serde(default, deserialize_with = "wire::optional")]
    reseller_minute: Option<WireDecimal>,
    #[serde(default, deserialize_with = "wire::optional")]
    reseller_setup: Option<WireDecimal>,
    #[serde(default)]
    sms_available: WireInt,
    #[serde(default)]
    sms_enabled: WireInt,
    #[serde(default)]
    mms_available: WireInt,
    #[serde(default)]
    transcribe: WireInt,
    #[serde(default)]
    transcription_locale: String,
    #[serde(default)]
    transcription_email: String,
    #[serde(default)]
    sms_email: String,
    #[serde(default)]
    sms_email_enabled: WireInt,
    #[serde(default)]
    sms_forward: String,
    #[serde(default)]
    sms_forward_enabled: WireInt,
    #[serde(default)]
    sms_url_callback: String,
    #[serde(default)]
    sms_url_callback_enabled: WireInt,
    #[serde(default)]
    sms_url_callback_retry: WireInt,
    #[serde(default)]
    smpp_enabled: WireInt,
    #[serde(default)]
    smpp_url: String,
    #[serde(default)]
    smpp_user: String,
    #[serde(default)]
    smpp_pass: String,
}

impl From<DidJson> for DidInfo {
    fn from(value: DidJson) -> Self {
        Self {
            did: value.did,
            description: value.description,
            routing: value.routing,
            failover_busy: value.failover_busy,
            failover_unreachable: value.failover_unreachable,
            failover_noanswer: value.failover_noanswer,
            voicemail: value.voicemail,
            pop: Pop::new(value.pop.0),
            dialtime: value.dialtime.0,
            cnam: value.cnam.0,
            e911: value.e911.0,
            callerid_prefix: value.callerid_prefix,
            record_calls: value.record_calls.0,
            note: value.note,
            billing_type: value.billing_type.0,
            next_billing: value.next_billing.map(|date| date.0),
            order_date: value.order_date.map(|datetime| datetime.0),
            reseller_account: value.reseller_account.map(|account| account.0),
            reseller_next_billing: value.reseller_next_billing.map(|date| date.0),
            reseller_monthly: value.reseller_monthly.map(WireDecimal::into_string),
            reseller_minute: value.reseller_minute.map(WireDecimal::into_string),
            reseller_setup: value.reseller_setup.map(WireDecimal::into_string),
            sms_available: value.sms_available.0,
            sms_enabled: value.sms_enabled.0,
            mms_available: value.mms_available.0,
            transcribe: value.transcribe.0,
            transcription_locale: value.transcription_locale,
            transcription_email: value.transcription_email,
            sms_email: value.sms_email,
            sms_email_enabled: value.sms_email_enabled.0,
            sms_forward: value.sms_forward,
            sms_forward_enabled: value.sms_forward_enabled.0,
            sms_url_callback: value.sms_url_callback,
            sms_url_callback_enabled: value.sms_url_callback_enabled.0,
            sms_url_callback_retry: value.sms_url_callback_retry.0,
            smpp_enabled: value.smpp_enabled.0,
            smpp_url: value.smpp_url,
            smpp_user: value.smpp_user,
            smpp_pass: value.smpp_pass,
        }
    }
}

pub fn decode_dids_info_json_response(json: &str) -> Result<DidsInfoResponse, DecodeError> {
    let envelope = decode_envelope(json)?;
    let parsed: DidsInfoJsonResponse = serde_json::from_str(json)?;
    Ok(DidsInfoResponse {
        envelope,
        dids: parsed.dids.into_iter().map(DidInfo::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::transport::params::encode_params;

    fn pairs(fields: &[Field<'_>]) -> Vec<(String, String)> {
        encode_params(fields).into_iter().collect()
    }

    #[test]
    fn encode_did_filter_omits_unset_fields() {
        let request = GetDidsInfo::for_did(Did::new("5551234567").unwrap());
        assert_eq!(
            pairs(&request.fields()),
            vec![("did".to_owned(), "5551234567".to_owned())]
        );

        assert!(pairs(&GetDidsInfo::all().fields()).is_empty());

        let request = GetDidsInfo::new(
            Some(ClientId::new("561115").unwrap()),
            Some(Did::new("5551234567").unwrap()),
        );
        assert_eq!(
            pairs(&request.fields()),
            vec![
                ("client".to_owned(), "561115".to_owned()),
                ("did".to_owned(), "5551234567".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_set_did_pop_sends_integer_pop() {
        let request = SetDidPop::new(Did::new("5551234567").unwrap(), Pop::new(1));
        assert_eq!(
            pairs(&request.fields()),
            vec![
                ("did".to_owned(), "5551234567".to_owned()),
                ("pop".to_owned(), "1".to_owned()),
            ]
        );
        assert_eq!(SetDidPop::VERB, HttpVerb::Patch);
        assert_eq!(GetDidsInfo::VERB, HttpVerb::Get);
    }

    #[test]
    fn decode_dids_with_string_wrapped_and_native_values() {
        let json = r#"
        {
          "status": "success",
          "dids": [
            {
              "did": "5551234567",
              "description": "Main line",
              "routing": "account:100000_VoIP",
              "pop": "3",
              "dialtime": 60,
              "cnam": "1",
              "e911": "0",
              "billing_type": "1",
              "next_billing": "2024-04-01",
              "order_date": "2024-03-01 13:45:00",
              "reseller_account": "",
              "reseller_next_billing": "",
              "reseller_monthly": 1.50,
              "reseller_minute": "0.0100",
              "reseller_setup": "",
              "sms_available": "1",
              "sms_enabled": "1",
              "mms_available": 0,
              "some_future_field": "ignored"
            }
          ]
        }
        "#;

        let response = decode_dids_info_json_response(json).unwrap();
        assert!(response.envelope.is_success());
        assert_eq!(response.dids.len(), 1);

        let did = &response.dids[0];
        assert_eq!(did.did, "5551234567");
        assert_eq!(did.routing, "account:100000_VoIP");
        assert_eq!(did.pop, Pop::new(3));
        assert_eq!(did.dialtime, 60);
        assert_eq!(did.cnam, 1);
        assert_eq!(did.e911, 0);
        assert_eq!(did.next_billing, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(
            did.order_date,
            NaiveDateTime::parse_from_str("2024-03-01 13:45:00", "%Y-%m-%d %H:%M:%S").ok()
        );
        assert_eq!(did.reseller_account, None);
        assert_eq!(did.reseller_next_billing, None);
        assert_eq!(did.reseller_monthly.as_deref(), Some("1.50"));
        assert_eq!(did.reseller_minute.as_deref(), Some("0.0100"));
        assert_eq!(did.reseller_setup, None);
        assert_eq!(did.sms_enabled, 1);
        assert_eq!(did.mms_available, 0);
    }

    #[test]
    fn decode_failure_envelope_without_dids() {
        let json = r#"{"status": "invalid_did"}"#;
        let response = decode_dids_info_json_response(json).unwrap();
        assert!(!response.envelope.is_success());
        assert!(response.dids.is_empty());
    }

    #[test]
    fn decode_rejects_malformed_dates() {
        let json = r#"{"status": "success", "dids": [{"did": "1", "next_billing": "03/01/2024"}]}"#;
        let err = decode_dids_info_json_response(json).unwrap_err();
        assert!(err.to_string().contains("03/01/2024"), "{err}");
    }
}
