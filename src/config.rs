// src/config.rs
//! Command-line and environment configuration.
//!
//! Everything ambient (flags, `.env`, process environment) is resolved here,
//! once, into plain values. Nothing below this module reads the environment.

use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_SERVER_PORT, NOTION_API_BASE_URL};
use crate::error::AppError;
use crate::types::ApiKey;
use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Credential variables, in order of preference.
pub const TOKEN_VARIABLES: [&str; 2] = ["NOTION_API_TOKEN", "NOTION_TOKEN"];
/// Default page variables, in order of preference.
pub const PAGE_VARIABLES: [&str; 2] = ["NOTION_PAGE_URL", "NOTION_PAGE_ID"];
/// Overrides the API base URL.
pub const BASE_URL_VARIABLE: &str = "NOTION_API_BASE_URL";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the page-content API, background uploads and the built front-end
    Serve(ServeArgs),
    /// Fetch a page once and print or save its Markdown
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_SERVER_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Directory served first; uploaded backgrounds land here
    #[arg(long, default_value = "public")]
    pub public_dir: PathBuf,

    /// Built front-end, served after the public directory
    #[arg(long, default_value = "dist")]
    pub dist_dir: PathBuf,

    /// Page URL or ID used when a request names none
    #[arg(long)]
    pub page: Option<String>,

    /// Upper bound in seconds on one fetch-and-render pass
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout: u64,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Notion page URL or ID (falls back to NOTION_PAGE_URL / NOTION_PAGE_ID)
    pub page: Option<String>,

    /// Write the Markdown to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also print the content hash
    #[arg(long, default_value_t = false)]
    pub hash: bool,
}

/// The environment variables this program reads, captured once.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub api_token: Option<String>,
    pub default_page: Option<String>,
    pub api_base_url: Option<String>,
}

impl Environment {
    /// Captures the process environment.
    pub fn from_process() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Captures variables through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first_set = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .find(|value| !value.trim().is_empty())
        };

        Self {
            api_token: first_set(&TOKEN_VARIABLES),
            default_page: first_set(&PAGE_VARIABLES),
            api_base_url: first_set(&[BASE_URL_VARIABLE]),
        }
    }

    /// The credential, validated, if one is set.
    pub fn api_key(&self) -> Result<Option<ApiKey>, AppError> {
        self.api_token
            .as_deref()
            .map(ApiKey::new)
            .transpose()
            .map_err(AppError::from)
    }

    pub fn base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| NOTION_API_BASE_URL.to_string())
    }
}

/// Resolved configuration for `serve`.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub bind: SocketAddr,
    pub public_dir: PathBuf,
    pub dist_dir: PathBuf,
    pub default_page: Option<String>,
    pub fetch_timeout: Duration,
    /// Absent credentials are reported per request, not at startup.
    pub api_key: Option<ApiKey>,
    pub api_base_url: String,
}

impl ServeConfig {
    pub fn resolve(args: ServeArgs, env: &Environment) -> Result<Self, AppError> {
        let api_key = env.api_key()?;
        if api_key.is_none() {
            log::warn!(
                "Neither {} nor {} is set; page requests will fail",
                TOKEN_VARIABLES[0],
                TOKEN_VARIABLES[1]
            );
        }

        Ok(Self {
            bind: SocketAddr::new(args.host, args.port),
            public_dir: args.public_dir,
            dist_dir: args.dist_dir,
            default_page: args.page.or_else(|| env.default_page.clone()),
            fetch_timeout: Duration::from_secs(args.fetch_timeout.max(1)),
            api_key,
            api_base_url: env.base_url(),
        })
    }
}

/// Resolved configuration for `render`.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub page: String,
    pub api_key: ApiKey,
    pub api_base_url: String,
    pub output: Option<PathBuf>,
    pub print_hash: bool,
}

impl RenderConfig {
    pub fn resolve(args: RenderArgs, env: &Environment) -> Result<Self, AppError> {
        let page = args
            .page
            .or_else(|| env.default_page.clone())
            .ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "no page given and neither {} nor {} is set",
                    PAGE_VARIABLES[0], PAGE_VARIABLES[1]
                ))
            })?;

        let api_key = env.api_key()?.ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} not set", TOKEN_VARIABLES[0]))
        })?;

        Ok(Self {
            page,
            api_key,
            api_base_url: env.base_url(),
            output: args.output,
            print_hash: args.hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_token_fallback_order() {
        let both = env(&[("NOTION_API_TOKEN", "secret_a"), ("NOTION_TOKEN", "secret_b")]);
        assert_eq!(both.api_token.as_deref(), Some("secret_a"));

        let legacy = env(&[("NOTION_API_TOKEN", ""), ("NOTION_TOKEN", "secret_b")]);
        assert_eq!(legacy.api_token.as_deref(), Some("secret_b"));
    }

    #[test]
    fn test_page_fallback_order() {
        let vars = env(&[("NOTION_PAGE_ID", "id"), ("NOTION_PAGE_URL", "url")]);
        assert_eq!(vars.default_page.as_deref(), Some("url"));
    }

    #[test]
    fn test_serve_defaults() {
        let cli = CommandLineInput::parse_from(["notion-typewriter", "serve", "--port", "8080"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };

        let config = ServeConfig::resolve(args, &env(&[("NOTION_PAGE_ID", "abc")])).unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
        assert_eq!(config.default_page.as_deref(), Some("abc"));
        assert_eq!(config.fetch_timeout, Duration::from_secs(60));
        assert!(config.api_key.is_none());
        assert_eq!(config.api_base_url, NOTION_API_BASE_URL);
    }

    #[test]
    fn test_render_requires_token() {
        let cli = CommandLineInput::parse_from(["notion-typewriter", "render", "abc"]);
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };

        let err = RenderConfig::resolve(args, &Environment::default()).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = CommandLineInput::parse_from(["notion-typewriter", "render", "abc", "-v", "--hash"]);
        assert!(cli.verbose);
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert!(args.hash);
    }
}
