//! Crate-level error type and `Result` alias for structured error handling.
//! Local construction problems (bad locators, missing locators, malformed option
//! names) are reported before any process is spawned; failures of the external
//! tool are only turned into errors on request via `ExecutionOutput::into_result`.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid locator '{path}': {reason}")]
    InvalidLocator { path: String, reason: &'static str },

    #[error("Invalid option name '{name}'")]
    InvalidOption { name: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("Failed to launch '{executable}': {source}")]
    Launch {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("carisbatch exited with status {code:?}: {stderr}")]
    ToolFailed { code: Option<i32>, stderr: String },
}
