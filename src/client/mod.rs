//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{
    ApiPassword, ApiUsername, ClientId, ClientsResponse, Did, DidInfo, DidsInfoResponse,
    GetClients, GetDidsInfo, GetRegistrationStatus, GetServersInfo, Pop,
    RegistrationStatusResponse, ResponseEnvelope, ServerHostname, ServerInfo,
    ServersInfoResponse, SetDidPop, ValidationError,
};
use crate::transport::{ApiMethod, DecodeError, HttpVerb};

/// Production REST endpoint.
pub const DEFAULT_API_URL: &str = "https://voip.ms/api/v1/rest.php";
/// Per-call timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: Vec<u8>,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        verb: HttpVerb,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        verb: HttpVerb,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let method = match verb {
                HttpVerb::Get => reqwest::Method::GET,
                HttpVerb::Patch => reqwest::Method::PATCH,
            };
            let response = self
                .client
                .request(method, url)
                .header(reqwest::header::ACCEPT, "application/json")
                .query(&params)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// API credentials for VoIP.ms calls.
///
/// They are attached to each request at dispatch time and never copied into
/// request values.
pub struct Credentials {
    username: ApiUsername,
    password: ApiPassword,
}

impl Credentials {
    /// Validate and pair an API username (account e-mail) with its API password.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: ApiUsername::new(username)?,
            password: ApiPassword::new(password)?,
        })
    }

    pub fn username(&self) -> &ApiUsername {
        &self.username
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`VoipMsClient`].
///
/// A business failure reported by VoIP.ms inside an HTTP 200 body is not an
/// error for plain calls: it comes back in the decoded [`ResponseEnvelope`].
/// The lookup helpers report their own policy violations (no match, wrong count).
pub enum VoipMsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, refused connections).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code with a body that could not be decoded.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be decoded into the expected shape.
    #[error("decode error: {source}")]
    Decode {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
        body: String,
    },

    /// No returned DID record matched the requested DID exactly.
    ///
    /// `status` carries the provider status when the lookup call itself failed.
    #[error("couldn't find DID {did}{}", status_suffix(.status))]
    DidNotFound { did: String, status: Option<String> },

    /// No server carries the requested hostname.
    #[error("couldn't find server {hostname}{}", status_suffix(.status))]
    ServerNotFound {
        hostname: String,
        status: Option<String>,
    },

    /// A POP lookup did not return exactly one server.
    #[error(
        "couldn't find exactly 1 server with POP {pop}, found {count}{}",
        status_suffix(.status)
    )]
    ServerCount {
        pop: Pop,
        count: usize,
        status: Option<String>,
    },

    /// The server matched by hostname carries an unusable POP id.
    #[error("couldn't find POP for {hostname} (got {pop})")]
    InvalidPop { hostname: String, pop: Pop },

    /// The configured API URL is not an absolute http(s) URL.
    #[error("invalid API URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn status_suffix(status: &Option<String>) -> String {
    match status {
        Some(status) => format!(" (provider status: {status})"),
        None => String::new(),
    }
}

#[derive(Debug, Clone)]
/// Builder for [`VoipMsClient`].
///
/// Use this when you need to customize the API URL, timeout, or user-agent.
pub struct VoipMsClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl VoipMsClientBuilder {
    /// Create a builder with the production URL and the default 2 second timeout.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the REST endpoint URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the timeout applied to each request as a whole.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`VoipMsClient`].
    pub fn build(self) -> Result<VoipMsClient, VoipMsError> {
        let base_url = validate_base_url(&self.base_url)?;

        // Idle connections are never kept, so every call opens its own.
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(0);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| VoipMsError::Transport(Box::new(err)))?;

        Ok(VoipMsClient {
            credentials: self.credentials,
            base_url,
            timeout: self.timeout,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn validate_base_url(raw: &str) -> Result<String, VoipMsError> {
    let parsed = url::Url::parse(raw).map_err(|err| VoipMsError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(VoipMsError::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }
    Ok(parsed.into())
}

#[derive(Clone)]
/// High-level VoIP.ms client.
///
/// Every operation performs its network calls one after another, never in
/// parallel, and never retries. The configuration is immutable, so a client can
/// be cloned and shared freely.
pub struct VoipMsClient {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for VoipMsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoipMsClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl VoipMsClient {
    /// Create a client using the production URL and default timeout.
    ///
    /// For more customization, use [`VoipMsClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, VoipMsError> {
        VoipMsClientBuilder::new(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> VoipMsClientBuilder {
        VoipMsClientBuilder::new(credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn call<R, T>(
        &self,
        request: &R,
        decode: fn(&str) -> Result<T, DecodeError>,
    ) -> Result<T, VoipMsError>
    where
        R: ApiMethod,
    {
        let params = crate::transport::encode_dispatch(
            &self.credentials.username,
            &self.credentials.password,
            request,
        );
        debug!(method = R::METHOD, verb = ?R::VERB, params = params.len(), "sending request");

        let response = self
            .http
            .send(R::VERB, &self.base_url, params.into_iter().collect())
            .await
            .map_err(|err| {
                debug!(method = R::METHOD, error = %err, "request failed");
                VoipMsError::Transport(err)
            })?;
        debug!(
            method = R::METHOD,
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );

        // Invalid UTF-8 fails decoding; only the diagnostic body is lossy.
        let err: Box<dyn StdError + Send + Sync> = match std::str::from_utf8(&response.body) {
            Ok(json) => match decode(json) {
                Ok(parsed) => return Ok(parsed),
                Err(err) => Box::new(err),
            },
            Err(err) => Box::new(err),
        };

        let body = String::from_utf8_lossy(&response.body).into_owned();
        if !(200..=299).contains(&response.status) {
            debug!(method = R::METHOD, error = %err, "undecodable error response");
            let body = if body.trim().is_empty() { None } else { Some(body) };
            return Err(VoipMsError::HttpStatus {
                status: response.status,
                body,
            });
        }
        Err(VoipMsError::Decode { source: err, body })
    }

    /// List DIDs (`getDIDsInfo`), optionally filtered server-side.
    ///
    /// An empty list is not an error; a provider failure is reported in the envelope.
    pub async fn get_dids_info(
        &self,
        request: GetDidsInfo,
    ) -> Result<DidsInfoResponse, VoipMsError> {
        self.call(&request, crate::transport::decode_dids_info_json_response)
            .await
    }

    /// Fetch the record of a single DID.
    ///
    /// The server-side filter has been seen returning extra records, so the result
    /// is scanned for an exact match.
    ///
    /// Errors:
    /// - [`VoipMsError::DidNotFound`] when no returned record carries `did`.
    pub async fn find_did(
        &self,
        did: &Did,
        client: Option<&ClientId>,
    ) -> Result<DidInfo, VoipMsError> {
        let request = GetDidsInfo::new(client.cloned(), Some(did.clone()));
        let response = self.get_dids_info(request).await?;
        warn_on_failure(&response.envelope, GetDidsInfo::METHOD);

        let DidsInfoResponse { envelope, dids } = response;
        dids.into_iter()
            .find(|info| info.did == did.as_str())
            .ok_or_else(|| VoipMsError::DidNotFound {
                did: did.as_str().to_owned(),
                status: failure_status(&envelope),
            })
    }

    /// Route a DID through the POP with the given id (`setDIDPOP`).
    ///
    /// Returns the envelope as decoded; check [`ResponseEnvelope::is_success`].
    pub async fn set_did_pop(&self, request: SetDidPop) -> Result<ResponseEnvelope, VoipMsError> {
        self.call(&request, crate::transport::decode_envelope).await
    }

    /// Route a DID through the POP serving `hostname`.
    ///
    /// Resolves the hostname with [`VoipMsClient::find_server_by_hostname`] first;
    /// a failed resolution is returned unchanged and no update is sent.
    pub async fn set_did_pop_by_hostname(
        &self,
        did: Did,
        hostname: &ServerHostname,
    ) -> Result<ResponseEnvelope, VoipMsError> {
        let server = self.find_server_by_hostname(hostname).await?;
        if server.pop.value() < 0 {
            return Err(VoipMsError::InvalidPop {
                hostname: hostname.as_str().to_owned(),
                pop: server.pop,
            });
        }

        debug!(did = did.as_str(), hostname = hostname.as_str(), pop = %server.pop, "resolved POP");
        self.set_did_pop(SetDidPop::new(did, server.pop)).await
    }

    /// List servers (`getServersInfo`), optionally a single POP.
    pub async fn get_servers_info(
        &self,
        request: GetServersInfo,
    ) -> Result<ServersInfoResponse, VoipMsError> {
        self.call(&request, crate::transport::decode_servers_info_json_response)
            .await
    }

    /// Fetch the server for a POP id.
    ///
    /// Errors:
    /// - [`VoipMsError::ServerCount`] unless exactly one server comes back.
    pub async fn find_server_by_pop(&self, pop: Pop) -> Result<ServerInfo, VoipMsError> {
        let response = self.get_servers_info(GetServersInfo::for_pop(pop)).await?;
        warn_on_failure(&response.envelope, GetServersInfo::METHOD);

        let ServersInfoResponse { envelope, servers } = response;
        let count = servers.len();
        let mut servers = servers.into_iter();
        match (servers.next(), count) {
            (Some(server), 1) => Ok(server),
            _ => Err(VoipMsError::ServerCount {
                pop,
                count,
                status: failure_status(&envelope),
            }),
        }
    }

    /// Fetch the server with the given hostname.
    ///
    /// VoIP.ms has no hostname filter: the full list is fetched and the first
    /// exact (case-sensitive) match wins.
    ///
    /// Errors:
    /// - [`VoipMsError::ServerNotFound`] when no server carries `hostname`.
    pub async fn find_server_by_hostname(
        &self,
        hostname: &ServerHostname,
    ) -> Result<ServerInfo, VoipMsError> {
        let response = self.get_servers_info(GetServersInfo::all()).await?;
        warn_on_failure(&response.envelope, GetServersInfo::METHOD);

        let ServersInfoResponse { envelope, servers } = response;
        servers
            .into_iter()
            .find(|server| server.hostname == hostname.as_str())
            .ok_or_else(|| VoipMsError::ServerNotFound {
                hostname: hostname.as_str().to_owned(),
                status: failure_status(&envelope),
            })
    }

    /// Registration status of a SIP account (`getRegistrationStatus`).
    pub async fn get_registration_status(
        &self,
        request: GetRegistrationStatus,
    ) -> Result<RegistrationStatusResponse, VoipMsError> {
        self.call(
            &request,
            crate::transport::decode_registration_status_json_response,
        )
        .await
    }

    /// List reseller clients (`getClients`), or a single one.
    pub async fn get_clients(&self, request: GetClients) -> Result<ClientsResponse, VoipMsError> {
        self.call(&request, crate::transport::decode_clients_json_response)
            .await
    }
}

fn warn_on_failure(envelope: &ResponseEnvelope, method: &'static str) {
    if !envelope.is_success() {
        warn!(
            method,
            status = envelope.status.as_deref().unwrap_or_default(),
            message = envelope.message.as_deref().unwrap_or_default(),
            "provider reported a failure status"
        );
    }
}

/// Provider status of a failed envelope, for lookup errors.
fn failure_status(envelope: &ResponseEnvelope) -> Option<String> {
    if envelope.is_success() {
        None
    } else {
        envelope.status.clone().or_else(|| envelope.message.clone())
    }
}
