//! Command Line Interface (CLI) layer for caris-batch.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-job and job-file runs.
//! It turns command-line settings into `caris_batch::JobParams` and hands
//! them to the library.
//!
//! If you are embedding caris-batch into another application, use the
//! library API (`caris_batch::api`) instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
