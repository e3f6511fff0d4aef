//! karen-mcp: persona-response tools over the Model Context Protocol.
//!
//! Usage:
//!   karen-mcp serve                     Run the MCP server on stdio
//!   karen-mcp list                      List the active profile's tools
//!   karen-mcp call <tool> --arg k=v     Invoke one tool and print the reply
//!   karen-mcp status                    Show configuration status

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use karen_mcp::catalog::{Backend, Catalog};
use karen_mcp::clients::{ImgflipClient, OpenAiClient};
use karen_mcp::config::{self, KarenConfig};
use karen_mcp::mcp::McpServer;
use karen_mcp::tools::ToolContext;
use karen_mcp::types::Profile;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "karen-mcp")]
#[command(version)]
#[command(about = "Karen persona tools served over MCP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file (default: ~/.karen/karen.toml).
    #[arg(long, global = true)]
    config: Option<String>,

    /// Tool profile (pm, pm-meme, customer). Overrides config and KAREN_PROFILE.
    #[arg(long, global = true)]
    profile: Option<Profile>,

    /// Log level (debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server on stdin/stdout.
    Serve,

    /// List the tools in the active profile.
    List,

    /// Invoke one tool and print its response.
    Call {
        /// Tool name.
        tool: String,

        /// Tool argument as key=value. Repeatable.
        #[arg(long = "arg", value_parser = parse_key_val)]
        args: Vec<(String, String)>,
    },

    /// Show profile, model, and credential status.
    Status,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(config::resolve_path)
        .unwrap_or_else(config::default_config_path);
    let mut cfg = config::load_effective_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(profile) = cli.profile {
        cfg.profile = profile;
    }

    // Logs go to stderr; stdout carries the protocol.
    let level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve => cmd_serve(&cfg).await,
        Commands::List => cmd_list(&cfg),
        Commands::Call { tool, args } => cmd_call(&cfg, &tool, args).await,
        Commands::Status => cmd_status(&cfg, &config_path),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

async fn cmd_serve(cfg: &KarenConfig) -> Result<()> {
    let ctx = build_context(cfg);
    info!("Starting karen MCP server (profile: {})", cfg.profile);
    if cfg.ai_enabled() {
        info!("AI responses enabled (model: {})", cfg.openai_model);
    } else {
        info!("No OpenAI API key configured, using canned responses");
    }

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    McpServer::new(ctx).serve_stdio(cancel).await
}

fn cmd_list(cfg: &KarenConfig) -> Result<()> {
    let catalog = Catalog::for_profile(cfg.profile);

    println!();
    println!(
        "{}",
        format!("=== Karen Tools ({}) ===", catalog.profile()).bold()
    );
    println!();
    for spec in catalog.tools() {
        let kind = match spec.backend {
            Backend::Text => "text".dimmed(),
            Backend::Meme => "meme".magenta(),
        };
        println!("  {} [{}]", spec.name.green().bold(), kind);
        println!("    {}", spec.description);
        for p in spec.params {
            println!(
                "      {} {} (default: {})",
                p.name.cyan(),
                p.description.dimmed(),
                p.default
            );
        }
    }
    println!();
    Ok(())
}

async fn cmd_call(cfg: &KarenConfig, tool: &str, args: Vec<(String, String)>) -> Result<()> {
    let ctx = build_context(cfg);
    if ctx.catalog().get(tool).is_none() {
        bail!(
            "Unknown tool '{}' in profile {}. Run `karen-mcp list` to see available tools.",
            tool,
            cfg.profile
        );
    }

    let arguments: Map<String, Value> = args
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    let response = ctx.invoke(tool, &Value::Object(arguments)).await?;
    println!("{}", response);
    Ok(())
}

fn cmd_status(cfg: &KarenConfig, config_path: &Path) -> Result<()> {
    let catalog = Catalog::for_profile(cfg.profile);
    let imgflip = ImgflipClient::from_config(cfg);

    println!();
    println!("{}", "=== Karen Status ===".bold());
    println!();
    println!("  {}:", "Config".bold());
    println!("    Path:     {} ({})", config_path.display(), file_state(config_path));
    println!("    Profile:  {}", cfg.profile);
    println!("    Tools:    {}", catalog.tools().len());
    println!();
    println!("  {}:", "OpenAI".bold());
    println!("    Mode:     {}", colorize_mode(cfg.ai_enabled()));
    println!("    Model:    {}", cfg.openai_model);
    println!("    API URL:  {}", cfg.openai_api_url);
    println!("    API key:  {}", redact(&cfg.openai_api_key));
    println!();
    println!("  {}:", "Imgflip".bold());
    if imgflip.uses_demo_account() {
        println!("    Account:  {}", "demo account".yellow());
    } else {
        println!("    Account:  {}", cfg.imgflip_username.green());
    }
    println!("    API URL:  {}", cfg.imgflip_api_url);
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Wire the clients for the configured profile.
fn build_context(cfg: &KarenConfig) -> ToolContext {
    let text = Arc::new(OpenAiClient::from_config(cfg));
    let captioner = Arc::new(ImgflipClient::from_config(cfg));
    ToolContext::new(Catalog::for_profile(cfg.profile), text, captioner)
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

fn file_state(path: &Path) -> colored::ColoredString {
    if path.exists() {
        "found".green()
    } else {
        "missing, using defaults".dimmed()
    }
}

fn colorize_mode(ai_enabled: bool) -> String {
    if ai_enabled {
        "AI responses".green().to_string()
    } else {
        "canned responses only".yellow().to_string()
    }
}

fn redact(secret: &str) -> String {
    let secret = secret.trim();
    if secret.is_empty() {
        return "not set".dimmed().to_string();
    }
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}
