use serde::Deserialize;

use super::params::{Field, Params, ToParams, encode_params};
use super::{ApiMethod, DecodeError};
use crate::domain::{ApiPassword, ApiUsername, ResponseEnvelope};
use crate::wire::WireText;

const METHOD_FIELD: &str = "method";

/// Parameters every call carries. Built per dispatch, never stored on a request.
#[derive(Debug, Clone, Copy)]
pub struct RequestEnvelope<'a> {
    username: &'a ApiUsername,
    password: &'a ApiPassword,
    method: &'static str,
}

impl<'a> RequestEnvelope<'a> {
    pub fn new(username: &'a ApiUsername, password: &'a ApiPassword, method: &'static str) -> Self {
        Self {
            username,
            password,
            method,
        }
    }
}

impl ToParams for RequestEnvelope<'_> {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text(ApiUsername::FIELD, self.username.as_str()),
            Field::text(ApiPassword::FIELD, self.password.as_str()),
            Field::text(METHOD_FIELD, self.method),
        ]
    }
}

/// Encode a request decorated with the shared envelope.
///
/// Envelope fields are visited first, so a request field with the same name
/// overrides it.
pub fn encode_dispatch<R: ApiMethod>(
    username: &ApiUsername,
    password: &ApiPassword,
    request: &R,
) -> Params {
    let envelope = RequestEnvelope::new(username, password, R::METHOD);
    encode_params(&[
        Field::Group(envelope.fields()),
        Field::Group(request.fields()),
    ])
}

/// Only a missing key or `null` is absent; `""` is kept as sent.
#[derive(Debug, Clone, Deserialize)]
struct EnvelopeJson {
    #[serde(default)]
    success: Option<WireText>,
    #[serde(default)]
    status: Option<WireText>,
    #[serde(default)]
    message: Option<WireText>,
}

/// Decode the shared response fields; unknown fields are ignored.
pub fn decode_envelope(json: &str) -> Result<ResponseEnvelope, DecodeError> {
    let parsed: EnvelopeJson = serde_json::from_str(json)?;
    if parsed.success.is_none() && parsed.status.is_none() && parsed.message.is_none() {
        return Err(DecodeError::MissingEnvelope);
    }
    Ok(ResponseEnvelope {
        success: parsed.success.map(WireText::into_string),
        status: parsed.status.map(WireText::into_string),
        message: parsed.message.map(WireText::into_string),
        raw: json.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Did, GetDidsInfo};

    #[test]
    fn dispatch_adds_credentials_and_method() {
        let username = ApiUsername::new("a@x.com").unwrap();
        let password = ApiPassword::new("k").unwrap();
        let request = GetDidsInfo::for_did(Did::new("5551234567").unwrap());

        let params = encode_dispatch(&username, &password, &request);

        let expected: Params = [
            ("api_username", "a@x.com"),
            ("api_password", "k"),
            ("method", "getDIDsInfo"),
            ("did", "5551234567"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
        assert_eq!(params, expected);
    }

    #[test]
    fn decodes_bare_envelope() {
        let json = r#"{"success": "1", "status": "success", "message": "done"}"#;
        let envelope = decode_envelope(json).unwrap();
        assert_eq!(envelope.success.as_deref(), Some("1"));
        assert_eq!(envelope.status.as_deref(), Some("success"));
        assert_eq!(envelope.message.as_deref(), Some("done"));
        assert_eq!(envelope.raw, json);
        assert!(envelope.is_success());
    }

    #[test]
    fn ignores_unknown_fields() {
        let json = r#"{"status": "success", "dids": [], "brand_new_field": {"x": 1}}"#;
        let envelope = decode_envelope(json).unwrap();
        assert_eq!(envelope.status.as_deref(), Some("success"));
        assert!(envelope.success.is_none());
    }

    #[test]
    fn keeps_non_boolean_success_tokens_verbatim() {
        let envelope = decode_envelope(r#"{"success": "partial", "status": "x"}"#).unwrap();
        assert_eq!(envelope.success.as_deref(), Some("partial"));

        let envelope = decode_envelope(r#"{"success": true}"#).unwrap();
        assert_eq!(envelope.success.as_deref(), Some("true"));
    }

    #[test]
    fn keeps_empty_tokens_verbatim() {
        let envelope = decode_envelope(r#"{"success": "", "status": "", "message": ""}"#).unwrap();
        assert_eq!(envelope.success.as_deref(), Some(""));
        assert_eq!(envelope.status.as_deref(), Some(""));
        assert_eq!(envelope.message.as_deref(), Some(""));
        assert!(!envelope.is_success());
    }

    #[test]
    fn rejects_payload_without_envelope_fields() {
        let err = decode_envelope(r#"{"servers": []}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingEnvelope));

        let err = decode_envelope(r#"{"success": null, "status": null}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingEnvelope));

        let err = decode_envelope("not json").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }
}
