use clap::Parser;
use std::path::PathBuf;

use caris_batch::{DEFAULT_EXECUTABLE, Operation};

#[derive(Parser)]
#[command(name = "caris-batch", version, about = "Build and run carisbatch command lines")]
pub struct CliArgs {
    /// JSON job file: a single job object or an array of jobs
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Process to run (e.g. ImportToHIPS, GeoreferenceHIPSBathymetry, ExportRaster)
    #[arg(long, value_enum, ignore_case = true, hide_possible_values = true)]
    pub operation: Option<Operation>,

    /// Option setting, in command-line order. Forms:
    /// - KEY          bare flag (e.g. convert_navigation)
    /// - KEY=VALUE    flag with a value (e.g. input_format=KONGSBERGKMALL)
    /// - KEY+=VALUE   one more occurrence of a repeated flag (e.g. include_band+=Depth);
    ///   an earlier KEY=VALUE becomes the first occurrence
    /// - KEY:=V1,V2   one flag followed by several values (e.g. extent:=0,0,10,10)
    #[arg(short = 's', long = "set", value_name = "SETTING")]
    pub settings: Vec<String>,

    /// Input file or project (repeatable, kept in order)
    #[arg(short, long)]
    pub input: Vec<String>,

    /// Output file or project (repeatable, kept in order)
    #[arg(short, long)]
    pub output: Vec<String>,

    /// Pass inputs as file:/// URIs (required for HIPS projects)
    #[arg(long, default_value_t = false)]
    pub input_as_uri: bool,

    /// Pass outputs as file:/// URIs (required for HIPS projects)
    #[arg(long, default_value_t = false)]
    pub output_as_uri: bool,

    /// Vessel qualifier for URI locators
    #[arg(long)]
    pub vessel: Vec<String>,

    /// Day qualifier for URI locators (YYYY-DDD)
    #[arg(long)]
    pub day: Vec<String>,

    /// Line qualifier for URI locators (repeatable)
    #[arg(long)]
    pub line: Vec<String>,

    /// carisbatch executable name or path
    #[arg(long, default_value = DEFAULT_EXECUTABLE)]
    pub executable: String,

    /// Print the command line(s) instead of running them
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Job files: keep running the remaining jobs after a failure
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// List the known processes and exit
    #[arg(long, default_value_t = false)]
    pub list_operations: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
