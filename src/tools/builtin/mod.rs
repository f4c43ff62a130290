//! Builtin lookup tools
//!
//! One module per tool. Each module keeps its normalizer as a pure function
//! next to the adapter that wires it into the shared lookup pipeline.

pub mod ability;
pub mod pokemon;
pub mod ticker;

pub use ability::{AbilityAdapter, AbilityTool};
pub use pokemon::{PokemonAdapter, PokemonTool};
pub use ticker::{TickerAdapter, TickerTool};

use crate::tools::{LookupTool, Tool};

/// Names of every builtin tool
pub const BUILTIN_TOOLS: &[&str] = &[pokemon::NAME, ability::NAME, ticker::NAME];

/// Create an uninitialized builtin tool by name
pub fn create_builtin_tool(tool_name: &str) -> Option<Box<dyn Tool>> {
    match tool_name {
        pokemon::NAME => Some(Box::new(LookupTool::new(PokemonAdapter))),
        ability::NAME => Some(Box::new(LookupTool::new(AbilityAdapter))),
        ticker::NAME => Some(Box::new(LookupTool::new(TickerAdapter))),
        _ => None,
    }
}
