//! Lookup Tools
//!
//! Agent-callable tools that fetch PokéAPI species/ability data and Binance
//! spot ticker prices, returning a compact normalized JSON string instead of
//! the raw upstream payload.
//!
//! # Overview
//!
//! Every tool runs the same adapter pipeline:
//! - input validation against a declarative shape ([`tools::shape`])
//! - request construction and one upstream GET ([`tools::upstream`])
//! - status classification (404 is a normal "not found" result)
//! - response normalization into a documented output contract
//!
//! # Quick Start
//!
//! ```no_run
//! use lookup_tools::config::LookupConfig;
//! use lookup_tools::tools::ToolSystem;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tools = ToolSystem::new();
//! tools.initialize(&LookupConfig::default().tools).await?;
//!
//! let summary = tools
//!     .execute_tool("pokemon.get", &json!({"nameOrId": "pikachu", "moves_limit": 2}))
//!     .await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod observability;
pub mod testing;
pub mod tools;

pub use config::{ConfigError, LookupConfig, ToolConfig};
pub use error::{AppError, AppResult, ErrorCode, ErrorEnvelope};
pub use tools::{Tool, ToolDescription, ToolError, ToolSystem};
