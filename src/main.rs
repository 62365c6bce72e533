//! caris-batch CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, build the job(s),
//! render or run them, and exit with the tool's status.
//! For programmatic use, prefer the library API (`caris_batch::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    let code = cli::run(args)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
