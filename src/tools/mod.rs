//! Tools the model can ask the host to run.

mod definition;
mod error;
mod registry;
mod time;
mod web_search;

pub use definition::{ToolDefinition, ToolHandler, ToolParam};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use time::{current_time_tool, CURRENT_TIME_TOOL};
pub use web_search::{
    web_search_tool, WebSearchConfig, DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_ENDPOINT,
    DEFAULT_SEARCH_TIMEOUT_SECS, WEB_SEARCH_TOOL,
};
