use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Invalid setting '{setting}': expected KEY, KEY=VALUE, KEY+=VALUE or KEY:=V1,V2")]
    InvalidSetting { setting: String },

    #[error("{0}")]
    Batch(#[from] caris_batch::Error),
}
