use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use serde_json::Value;
use tokio::io::AsyncReadExt;

const SESSION_COOKIE: &str = "admin_session";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing admin password; pass --admin-password or set SITE_ADMIN_PASSWORD")]
    MissingAdminPassword,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("server returned error for {request}: {message}")]
    ServerError { request: String, message: String },
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "site-cli", about = "Operator client for the holdings site document API")]
struct Cli {
    #[arg(long, env = "SITE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "SITE_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    admin_password: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    /// Print the live document and the tier it was resolved from.
    Show {
        #[arg(long, help = "Print only the source tier and counts")]
        summary: bool,
    },
    /// Download the document as pretty JSON.
    Export {
        #[arg(long, short, help = "Write to this file instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Replace the document with a JSON file (`-` reads stdin).
    Import { file: String },
    /// Drop the saved document and resolve again from the published copy or the default.
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext {
        base_url: cli.base_url,
        admin_password: cli.admin_password,
    };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Show { summary } => run_show(&ctx, summary).await,
        Command::Export { output } => run_export(&ctx, output).await,
        Command::Import { file } => run_import(&ctx, &file).await,
        Command::Reset => run_reset(&ctx).await,
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let response = client.get(endpoint(&cli.base_url, "/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError {
            request: format!("HTTP {}", status.as_u16()),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

async fn run_show(cli: &CliContext, summary: bool) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let response = client.get(endpoint(&cli.base_url, "/api/site")).send().await?;
    let response = ensure_success(response, "GET /api/site").await?;
    let json = response.json::<Value>().await?;

    if summary {
        print_json(&serde_json::json!({
            "source": json.get("source").cloned().unwrap_or(Value::Null),
            "summary": json.get("summary").cloned().unwrap_or(Value::Null),
        }))
    } else {
        print_json(&json)
    }
}

async fn run_export(cli: &CliContext, output: Option<PathBuf>) -> Result<(), CliError> {
    let client = admin_client(cli).await?;
    let response = client.get(endpoint(&cli.base_url, "/api/site/export")).send().await?;
    let body = ensure_success(response, "GET /api/site/export").await?.text().await?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, body.as_bytes()).await?;
            eprintln!("wrote {} bytes to {}", body.len(), path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}

async fn run_import(cli: &CliContext, file: &str) -> Result<(), CliError> {
    let text = read_import_source(file).await?;
    // Reject locally before logging in; the server would refuse it anyway.
    serde_json::from_str::<Value>(&text)?;

    let client = admin_client(cli).await?;
    let response = client
        .post(endpoint(&cli.base_url, "/api/site/import"))
        .header(CONTENT_TYPE, "application/json")
        .body(text)
        .send()
        .await?;
    let json = ensure_success(response, "POST /api/site/import").await?.json::<Value>().await?;
    print_json(&json)
}

async fn run_reset(cli: &CliContext) -> Result<(), CliError> {
    let client = admin_client(cli).await?;
    let response = client.post(endpoint(&cli.base_url, "/api/site/reset")).send().await?;
    let json = ensure_success(response, "POST /api/site/reset").await?.json::<Value>().await?;
    print_json(&json)
}

// =============================================================================
// HTTP HELPERS
// =============================================================================

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}")
}

/// Exchange the admin password for a session token.
async fn login(cli: &CliContext) -> Result<String, CliError> {
    let password = cli
        .admin_password
        .as_deref()
        .ok_or(CliError::MissingAdminPassword)?;

    let client = reqwest::Client::new();
    let response = client
        .post(endpoint(&cli.base_url, "/api/admin/login"))
        .json(&serde_json::json!({ "password": password }))
        .send()
        .await?;
    let json = ensure_success(response, "POST /api/admin/login").await?.json::<Value>().await?;

    json.get("token")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(CliError::MissingField("token"))
}

/// A client that sends the admin session cookie on every request.
async fn admin_client(cli: &CliContext) -> Result<reqwest::Client, CliError> {
    let token = login(cli).await?;

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(&session_cookie(&token))?);

    Ok(reqwest::Client::builder().default_headers(headers).build()?)
}

async fn ensure_success(response: reqwest::Response, request: &str) -> Result<reqwest::Response, CliError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(CliError::ServerError {
        request: format!("{request} (HTTP {})", status.as_u16()),
        message,
    })
}

async fn read_import_source(file: &str) -> Result<String, CliError> {
    if file == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }
    Ok(tokio::fs::read_to_string(file).await?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
