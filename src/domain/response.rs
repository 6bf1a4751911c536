use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::value::Pop;

/// Fields VoIP.ms returns on every response, whatever the method.
///
/// A failed call is still an HTTP 200; inspect [`ResponseEnvelope::is_success`] or the
/// raw `status`/`message` tokens. Values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub success: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
    /// Full response body as received, kept for diagnostics.
    pub raw: String,
}

impl ResponseEnvelope {
    /// Status token VoIP.ms uses for a successful call.
    pub const SUCCESS_STATUS: &'static str = "success";

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(Self::SUCCESS_STATUS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DidInfo {
    pub did: String,
    pub description: String,
    pub routing: String,
    pub failover_busy: String,
    pub failover_unreachable: String,
    pub failover_noanswer: String,
    pub voicemail: String,
    pub pop: Pop,
    pub dialtime: i64,
    pub cnam: i64,
    pub e911: i64,
    pub callerid_prefix: String,
    pub record_calls: i64,
    pub note: String,
    pub billing_type: i64,
    /// Provider-local date, no timezone attached.
    pub next_billing: Option<NaiveDate>,
    /// Provider-local wall-clock time, no timezone attached.
    pub order_date: Option<NaiveDateTime>,
    pub reseller_account: Option<i64>,
    pub reseller_next_billing: Option<NaiveDate>,
    /// Decimal amounts exactly as the provider formatted them.
    pub reseller_monthly: Option<String>,
    pub reseller_minute: Option<String>,
    pub reseller_setup: Option<String>,
    pub sms_available: i64,
    pub sms_enabled: i64,
    pub mms_available: i64,
    pub transcribe: i64,
    pub transcription_locale: String,
    pub transcription_email: String,
    pub sms_email: String,
    pub sms_email_enabled: i64,
    pub sms_forward: String,
    pub sms_forward_enabled: i64,
    pub sms_url_callback: String,
    pub sms_url_callback_enabled: i64,
    pub sms_url_callback_retry: i64,
    pub smpp_enabled: i64,
    pub smpp_url: String,
    pub smpp_user: String,
    pub smpp_pass: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DidsInfoResponse {
    pub envelope: ResponseEnvelope,
    pub dids: Vec<DidInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub pop: Pop,
    pub name: String,
    pub shortname: String,
    pub hostname: String,
    pub ip: String,
    pub country: String,
    /// Derived from `recommended_text` (`"1"`, `"yes"`, `"true"`, ...).
    pub recommended: bool,
    pub recommended_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServersInfoResponse {
    pub envelope: ResponseEnvelope,
    pub servers: Vec<ServerInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub account: String,
    pub server_name: String,
    pub server_shortname: String,
    pub server_hostname: String,
    pub server_ip: String,
    pub server_country: String,
    pub server_pop: Option<Pop>,
    pub register_ip: String,
    pub register_port: Option<i64>,
    pub register_next: Option<NaiveDateTime>,
    pub register_protocol: String,
    pub register_transport: String,
    pub register_useragent: String,
    pub rerouted: i64,
    pub from_server_pop: Option<Pop>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationStatusResponse {
    pub envelope: ResponseEnvelope,
    /// Raw `registered` token (`"yes"`/`"no"` in practice).
    pub registered: Option<String>,
    pub rerouted: i64,
    pub from_server_pop: Option<Pop>,
    pub registrations: Vec<Registration>,
}

impl RegistrationStatusResponse {
    pub fn is_registered(&self) -> bool {
        self.registered.as_deref().is_some_and(is_truthy_token)
    }
}

/// Client records are passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientsResponse {
    pub envelope: ResponseEnvelope,
    pub clients: Vec<serde_json::Value>,
}

/// Accepts the loose "yes" spellings the provider uses in flag-like text fields.
pub(crate) fn is_truthy_token(token: &str) -> bool {
    matches!(
        token.trim().to_ascii_lowercase().as_str(),
        "1" | "yes" | "y" | "true"
    )
}
