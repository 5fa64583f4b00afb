//! rest-api-tool: command-line front end for `RestClient`
//!
//! Usage:
//!   rest-api-tool <BASE_URL> <get|post|put|delete> <ENDPOINT> [--token T] [--data JSON|FILE]
//!                 [--headers JSON] [--log-file PATH] [--config YAML]

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use rest_api_tool::{ApiError, ClientConfig, HeaderSet, RequestOptions, RestClient};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "rest-api-tool")]
#[command(author, version, about = "REST API Tool CLI")]
struct Cli {
    /// Base API URL
    url: String,

    /// HTTP method
    #[arg(value_enum)]
    method: CliMethod,

    /// API endpoint
    endpoint: String,

    /// Authorization token
    #[arg(long)]
    token: Option<String>,

    /// Request data (JSON string or path to a JSON file)
    #[arg(long)]
    data: Option<String>,

    /// Additional headers (JSON object)
    #[arg(long)]
    headers: Option<String>,

    /// Path to log file (enables DEBUG file logging)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// YAML client configuration; positional URL and --token take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CliMethod {
    Get,
    Post,
    Put,
    Delete,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            match err.downcast_ref::<ApiError>() {
                Some(api) => println!("API Error: {api}"),
                None => println!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Value> {
    let data = cli
        .data
        .as_deref()
        .map(parse_data)
        .transpose()
        .map_err(|e| anyhow!("Error reading data: {e:#}"))?;

    let headers = cli
        .headers
        .as_deref()
        .map(parse_headers)
        .transpose()
        .map_err(|e| anyhow!("Invalid headers format: {e}"))?;

    let config = build_config(&cli)?;
    let client = RestClient::new(config)?;

    let mut options = RequestOptions::new();
    if let Some(headers) = &headers {
        options = options.headers(headers);
    }

    let response = match cli.method {
        CliMethod::Get => {
            warn_ignored_data(&data, "GET");
            client.get(&cli.endpoint, options)?
        }
        CliMethod::Post => client.post(&cli.endpoint, data, options)?,
        CliMethod::Put => client.put(&cli.endpoint, data, options)?,
        CliMethod::Delete => {
            warn_ignored_data(&data, "DELETE");
            client.delete(&cli.endpoint, options)?
        }
    };

    Ok(response.into_value())
}

fn build_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ClientConfig::from_yaml_file(path)?;
            config.set_base_url(&cli.url);
            config
        }
        None => ClientConfig::new(&cli.url),
    };
    if let Some(token) = &cli.token {
        config.token = Some(token.clone());
    }
    if let Some(log_file) = &cli.log_file {
        config.logging.file = Some(log_file.clone());
    }
    Ok(config)
}

/// Inline JSON first, then a path to a JSON file.
fn parse_data(raw: &str) -> anyhow::Result<Value> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Ok(value);
    }
    let path = Path::new(raw);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("not valid JSON and cannot read file {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn parse_headers(raw: &str) -> serde_json::Result<HeaderSet> {
    serde_json::from_str(raw)
}

fn warn_ignored_data(data: &Option<Value>, method: &str) {
    if data.is_some() {
        eprintln!("Warning: --data is ignored for {method} requests");
    }
}
