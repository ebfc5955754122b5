//! CLI for the reqchain request builder.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use reqchain_core::config::{self, ClientConfig};
use reqchain_core::{ProxyConfig, RequestBuilder};
use std::path::PathBuf;
use std::time::Duration;

use commands::{run_get, run_head, run_post};

/// Top-level CLI for reqchain.
#[derive(Debug, Parser)]
#[command(name = "reqchain")]
#[command(about = "reqchain: send HTTP requests with retries, cookies and proxies", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options shared by every subcommand; they override values from config.toml.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Total attempts per request (0 = build the request but never send it).
    #[arg(long, global = true, value_name = "N")]
    pub retry: Option<u32>,

    /// Pause between a failed attempt and the next one.
    #[arg(long, global = true, value_name = "MS")]
    pub retry_wait_ms: Option<u64>,

    /// Per-attempt timeout.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Extra header, repeatable.
    #[arg(short = 'H', long = "header", global = true, value_name = "NAME: VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Proxy URL: http://[user:pass@]host:port or socks5://[user:pass@]host:port.
    #[arg(long, global = true, value_name = "URL")]
    pub proxy: Option<ProxyConfig>,

    /// Log every failed attempt.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print response headers before the body.
    #[arg(short = 'i', long, global = true)]
    pub include: bool,

    /// Read settings from this file instead of the XDG config.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Send a HEAD request.
    Head {
        url: String,
    },

    /// Send a GET request; query parameters are appended after any in the URL.
    Get {
        url: String,
        /// Query parameter, repeatable.
        #[arg(short = 'q', long = "query", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },

    /// Send a POST request with an optional form or JSON body.
    Post {
        url: String,
        /// Raw JSON body.
        #[arg(long, value_name = "JSON", conflicts_with = "form")]
        json: Option<String>,
        /// Form field, repeatable; sent as application/x-www-form-urlencoded.
        #[arg(short = 'f', long = "form", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        form: Vec<(String, String)>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.global.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let builder = cli.global.apply(&cfg);
        let include = cli.global.include;

        match cli.command {
            CliCommand::Head { url } => run_head(builder, &url, include)?,
            CliCommand::Get { url, query } => run_get(builder, &url, &query, include)?,
            CliCommand::Post { url, json, form } => {
                run_post(builder, &url, json.as_deref(), &form, include)?
            }
        }

        Ok(())
    }
}

impl GlobalArgs {
    /// Builder from `cfg`, with every flag given on the command line taking precedence.
    /// `--proxy` replaces the config proxy instead of being applied after it.
    pub fn apply(&self, cfg: &ClientConfig) -> RequestBuilder {
        let mut cfg = cfg.clone();
        if self.proxy.is_some() {
            cfg.proxy = self.proxy.clone();
        }
        let mut builder = RequestBuilder::from_config(&cfg).headers(self.headers.clone());
        if let Some(n) = self.retry {
            builder = builder.retry(n);
        }
        if let Some(ms) = self.retry_wait_ms {
            builder = builder.retry_wait(Duration::from_millis(ms));
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ua) = &self.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        if self.debug {
            builder = builder.debug(true);
        }
        builder
    }
}

/// Parses `Name: value`.
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in '{}'", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parses `key=value`; the value may be empty or contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected 'key=value', got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests;
