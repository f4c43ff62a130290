//! Lookup Tools - command line host
//!
//! Lists, describes and invokes the configured lookup tools. Results go to
//! stdout; logs go to stderr.

use clap::{Parser, Subcommand};
use lookup_tools::config::LookupConfig;
use lookup_tools::error::{AppError, AppResult};
use lookup_tools::observability::{init_default_logging, init_logging, LogFormat};
use lookup_tools::tools::ToolSystem;
use serde_json::Value;
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info, Level};

const DEFAULT_CONFIG_PATHS: &[&str] = &["lookup-tools.toml", "config/lookup-tools.toml"];

/// Agent-callable lookup tools for PokéAPI and Binance
#[derive(Parser)]
#[command(name = "lookup-tools")]
#[command(about = "Agent-callable lookup tools for PokéAPI and Binance")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "LOOKUP_TOOLS_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured tools
    List,
    /// Print a tool's input schema
    Describe {
        /// Tool name, e.g. pokemon.get
        tool: String,
    },
    /// Invoke a tool once and print its result
    Call {
        /// Tool name, e.g. binance.ticker_price.get
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.verbose {
        0 => init_default_logging(),
        1 => init_logging(Level::INFO, log_format_from_env(), false),
        _ => init_logging(Level::DEBUG, log_format_from_env(), false),
    }

    let config = match load_configuration(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            print_error(&e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List => list_tools(&config).await,
        Commands::Describe { tool } => describe_tool(&config, &tool).await,
        Commands::Call { tool, args } => call_tool(&config, &tool, &args).await,
        Commands::Config { show } => handle_config_command(&config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        print_error(&e);
        process::exit(1);
    }
}

fn log_format_from_env() -> LogFormat {
    LogFormat::parse(&env::var("LOG_FORMAT").unwrap_or_default())
}

fn load_configuration(config_path: Option<&PathBuf>) -> AppResult<LookupConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from: {}", path.display());
        return Ok(LookupConfig::load_from_file(path)?);
    }

    for path_str in DEFAULT_CONFIG_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading configuration from: {}", path.display());
            return Ok(LookupConfig::load_from_file(&path)?);
        }
    }

    debug!("No configuration file found, enabling all builtin tools");
    Ok(LookupConfig::default())
}

async fn build_tool_system(config: &LookupConfig) -> AppResult<ToolSystem> {
    let mut tools = ToolSystem::new();
    tools.initialize(&config.tools).await?;
    Ok(tools)
}

async fn list_tools(config: &LookupConfig) -> AppResult<()> {
    let tools = build_tool_system(config).await?;
    for name in tools.list_tools() {
        if let Some(description) = tools.describe_tool(&name) {
            println!("{}\t{}", description.name, description.description);
        }
    }
    Ok(())
}

async fn describe_tool(config: &LookupConfig, tool: &str) -> AppResult<()> {
    let tools = build_tool_system(config).await?;
    let description = tools
        .describe_tool(tool)
        .ok_or_else(|| AppError::from(lookup_tools::ToolError::UnknownTool(tool.to_string())))?;

    let rendered = serde_json::to_string_pretty(&description.parameters)
        .map_err(|e| AppError::internal(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

async fn call_tool(config: &LookupConfig, tool: &str, raw_args: &str) -> AppResult<()> {
    let args: Value = serde_json::from_str(raw_args)
        .map_err(|e| AppError::invalid_input(format!("--args is not valid JSON: {e}")))?;

    let mut tools = build_tool_system(config).await?;
    let result = tools.execute_tool(tool, &args).await;
    tools.shutdown().await?;

    println!("{}", result?);
    Ok(())
}

fn handle_config_command(config: &LookupConfig, show: bool) -> AppResult<()> {
    if show {
        let rendered =
            toml::to_string_pretty(config).map_err(|e| AppError::internal(e.to_string()))?;
        println!("{rendered}");
    }

    info!("Configuration validation complete");
    Ok(())
}

fn print_error(error: &AppError) {
    match serde_json::to_string(&error.to_error_envelope()) {
        Ok(envelope) => println!("{envelope}"),
        Err(_) => println!("{error}"),
    }
}
