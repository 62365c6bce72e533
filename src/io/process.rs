use std::process::Command;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::core::command::Invocation;
use crate::error::{Error, Result};

/// Exit status and captured streams of one external run, surfaced verbatim.
#[derive(Debug, Clone)]
pub struct ExecutionOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// The rendered command line, for reporting.
    pub command: String,
}

impl ExecutionOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into `Error::ToolFailed` carrying stderr unmodified.
    pub fn into_result(self) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::ToolFailed {
                code: self.code,
                stderr: self.stderr,
            })
        }
    }
}

/// Spawn the program directly (no shell) and block until it exits.
pub fn execute(invocation: &Invocation) -> Result<ExecutionOutput> {
    let command = invocation.to_string();
    debug!("executing {}", command);

    let started = Instant::now();
    let output = Command::new(invocation.program())
        .args(invocation.args())
        .output()
        .map_err(|source| Error::Launch {
            executable: invocation.program().to_string(),
            source,
        })?;

    let code = output.status.code();
    let elapsed = started.elapsed().as_secs_f64();
    if output.status.success() {
        info!("{} finished in {:.1}s", invocation.program(), elapsed);
    } else {
        warn!(
            "{} exited with status {:?} after {:.1}s",
            invocation.program(),
            code,
            elapsed
        );
    }

    Ok(ExecutionOutput {
        code,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        command,
    })
}
