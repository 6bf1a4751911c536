//! Command-line front end for the VoIP.ms REST API.
//!
//! Credentials come from flags or the environment:
//!
//! ```sh
//! export VOIPMS_USERNAME=me@example.com
//! export VOIPMS_API_KEY=...
//! voipms getserversinfo
//! voipms setdidpop 5551234567 atlanta1.voip.ms
//! ```
//!
//! `VOIPMS_API_URL` and `VOIPMS_API_TIMEOUT` (`2s`, `500ms`, ...) override the
//! endpoint and the per-request timeout. Logs go to stderr, filtered by `RUST_LOG`.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use voipms::{
    Account, ClientId, Credentials, Did, GetClients, GetDidsInfo, GetRegistrationStatus,
    GetServersInfo, Pop, ServerHostname, ServerInfo, VoipMsClient,
};

/// Command-line client for the VoIP.ms API
#[derive(Parser)]
#[command(name = "voipms", version, about, long_about = None)]
struct Cli {
    /// VoIP.ms account e-mail address.
    #[arg(short = 'u', long, env = "VOIPMS_USERNAME", global = true)]
    username: Option<String>,

    /// VoIP.ms API key.
    #[arg(
        short = 'p',
        long = "api-key",
        env = "VOIPMS_API_KEY",
        hide_env_values = true,
        global = true
    )]
    api_key: Option<String>,

    /// VoIP.ms API URL (defaults to the production endpoint).
    #[arg(long = "api-url", env = "VOIPMS_API_URL", global = true)]
    api_url: Option<String>,

    /// Timeout for each HTTP request, e.g. `2s` or `500ms`.
    #[arg(
        long = "api-timeout",
        env = "VOIPMS_API_TIMEOUT",
        default_value = "2s",
        value_parser = parse_duration,
        global = true
    )]
    api_timeout: Duration,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set the POP of a DID, given the POP server hostname.
    #[command(name = "setdidpop")]
    SetDidPop {
        did: String,
        /// Server hostname, e.g. `atlanta1.voip.ms`.
        pop: String,
    },

    /// Get information about VoIP.ms servers.
    ///
    /// With an argument, show one server: numeric arguments are POP ids,
    /// anything else is matched against server hostnames.
    #[command(name = "getserversinfo")]
    GetServersInfo { pop: Option<String> },

    /// Get registration status for a SIP account.
    #[command(name = "getregistrationstatus")]
    GetRegistrationStatus { account: String },

    /// Get a list of reseller clients.
    #[command(name = "getclients")]
    GetClients { client: Option<String> },

    /// Get information about one DID.
    #[command(name = "getdidinfo")]
    GetDidInfo { did: String, client: Option<String> },

    /// Get information about every DID on the account.
    #[command(name = "getalldidsinfo")]
    GetAllDidsInfo,

    /// Get the DIDs of a reseller client.
    #[command(name = "getdidinfoforclient")]
    GetDidInfoForClient { client: String, did: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "voipms=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = build_client(&cli)?;
    run(&client, cli.command).await
}

fn build_client(cli: &Cli) -> Result<VoipMsClient> {
    let (Some(username), Some(api_key)) = (non_blank(&cli.username), non_blank(&cli.api_key))
    else {
        bail!("username and API key are both required");
    };

    let credentials = Credentials::new(username, api_key)?;
    let mut builder = VoipMsClient::builder(credentials).timeout(cli.api_timeout);
    if let Some(url) = non_blank(&cli.api_url) {
        builder = builder.base_url(url);
    }
    Ok(builder.build()?)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

async fn run(client: &VoipMsClient, command: Command) -> Result<()> {
    match command {
        Command::SetDidPop { did, pop } => {
            let did = Did::new(did)?;
            let hostname = ServerHostname::new(pop)?;
            let envelope = client
                .set_did_pop_by_hostname(did.clone(), &hostname)
                .await
                .with_context(|| {
                    format!(
                        "error setting pop of {} to {}",
                        did.as_str(),
                        hostname.as_str()
                    )
                })?;
            if !envelope.is_success() {
                bail!(
                    "VoIP.ms refused to set pop of {} to {}: {} {}",
                    did.as_str(),
                    hostname.as_str(),
                    envelope.status.as_deref().unwrap_or_default(),
                    envelope.message.as_deref().unwrap_or_default()
                );
            }
            println!(
                "success: {}",
                envelope
                    .success
                    .as_deref()
                    .or(envelope.status.as_deref())
                    .unwrap_or_default()
            );
        }
        Command::GetServersInfo { pop: Some(pop) } => {
            let server = match pop.trim().parse::<i64>() {
                Ok(id) => client
                    .find_server_by_pop(Pop::new(id))
                    .await
                    .with_context(|| format!("error getting server for POP {id}"))?,
                Err(_) => client
                    .find_server_by_hostname(&ServerHostname::new(pop.as_str())?)
                    .await
                    .with_context(|| format!("error getting server {pop}"))?,
            };
            print_server(&server);
        }
        Command::GetServersInfo { pop: None } => {
            let response = client
                .get_servers_info(GetServersInfo::all())
                .await
                .context("error getting servers info")?;
            if response.servers.is_empty() {
                println!("no server listed");
            }
            for server in &response.servers {
                print_server(server);
            }
        }
        Command::GetRegistrationStatus { account } => {
            let account = Account::new(account)?;
            let response = client
                .get_registration_status(GetRegistrationStatus::new(account.clone()))
                .await
                .with_context(|| {
                    format!("error getting registration status of {}", account.as_str())
                })?;
            println!("{response:#?}");
        }
        Command::GetClients { client: id } => {
            let request = match id {
                Some(id) => GetClients::one(ClientId::new(id)?),
                None => GetClients::all(),
            };
            let response = client
                .get_clients(request)
                .await
                .context("error while fetching clients")?;
            println!("{}", serde_json::to_string_pretty(&response.clients)?);
        }
        Command::GetDidInfo { did, client: owner } => {
            let did = Did::new(did)?;
            let owner = owner.map(ClientId::new).transpose()?;
            let info = client
                .find_did(&did, owner.as_ref())
                .await
                .with_context(|| format!("error while fetching info of DID {}", did.as_str()))?;
            println!("{info:#?}");
        }
        Command::GetAllDidsInfo => {
            let response = client
                .get_dids_info(GetDidsInfo::all())
                .await
                .context("error while fetching DIDs info")?;
            println!("{:#?}", response.dids);
        }
        Command::GetDidInfoForClient { client: owner, did } => {
            let owner = ClientId::new(owner)?;
            let dids = match did {
                Some(did) => {
                    let did = Did::new(did)?;
                    let info = client
                        .find_did(&did, Some(&owner))
                        .await
                        .with_context(|| {
                            format!(
                                "error while fetching DID {} of client {}",
                                did.as_str(),
                                owner.as_str()
                            )
                        })?;
                    vec![info]
                }
                None => {
                    client
                        .get_dids_info(GetDidsInfo::for_client(owner.clone()))
                        .await
                        .with_context(|| {
                            format!("error while fetching DIDs of client {}", owner.as_str())
                        })?
                        .dids
                }
            };
            println!("{dids:#?}");
        }
    }
    Ok(())
}

fn print_server(server: &ServerInfo) {
    let recommended = if server.recommended { "✅" } else { "" };
    println!(
        "{} {} ({} : {}) {}",
        server.pop, server.name, server.hostname, server.ip, recommended
    );
}

/// Parse `1500ms`, `2s`, `1m`, `1h`, or a bare number of seconds.
fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let (number, seconds_per_unit, divisor) = if let Some(ms) = raw.strip_suffix("ms") {
        (ms, 1.0, 1000.0)
    } else if let Some(s) = raw.strip_suffix('s') {
        (s, 1.0, 1.0)
    } else if let Some(m) = raw.strip_suffix('m') {
        (m, 60.0, 1.0)
    } else if let Some(h) = raw.strip_suffix('h') {
        (h, 3600.0, 1.0)
    } else {
        (raw, 1.0, 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration {raw}"))?;
    Duration::try_from_secs_f64(value * seconds_per_unit / divisor)
        .map_err(|_| format!("invalid duration {raw}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_duration_forms() {
        assert_eq!(parse_duration("2s"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("3"), Ok(Duration::from_secs(3)));
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
    }

    #[test]
    fn rejects_bad_durations() {
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("-1s").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn parses_subcommands_and_global_flags() {
        let cli = Cli::try_parse_from([
            "voipms",
            "-u",
            "me@example.com",
            "-p",
            "key",
            "--api-timeout",
            "5s",
            "setdidpop",
            "5551234567",
            "atlanta1.voip.ms",
        ])
        .unwrap();
        assert_eq!(cli.api_timeout, Duration::from_secs(5));
        assert!(matches!(
            cli.command,
            Command::SetDidPop { ref did, ref pop } if did == "5551234567" && pop == "atlanta1.voip.ms"
        ));
    }

    #[test]
    fn missing_credentials_are_fatal() {
        let cli = Cli {
            username: Some("me@example.com".to_owned()),
            api_key: Some("  ".to_owned()),
            api_url: None,
            api_timeout: Duration::from_secs(2),
            command: Command::GetAllDidsInfo,
        };
        let err = build_client(&cli).unwrap_err();
        assert_eq!(err.to_string(), "username and API key are both required");
    }
}
