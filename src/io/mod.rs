//! Process boundary: launching the rendered invocation and capturing its exit
//! status and output streams.
pub mod process;
pub use process::{ExecutionOutput, execute};
