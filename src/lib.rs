#![doc = r#"
caris-batch — a typed command builder and runner for the CARIS `carisbatch` tool.

`carisbatch` is a license-gated batch processor for marine-survey data (HIPS
projects, CSAR surfaces, CZMIL lidar, S-57 products). Each process is run as
`carisbatch --run <Operation> [options] <inputs> <outputs>`. This crate knows the
operation names, maps attribute-style option names to the tool's hyphenated flags,
encodes HIPS locators (`file:///...?Vessel=..;Day=..;Line=..`) and launches the
tool, handing back its exit status and output untouched.

No option is checked against the tool's grammar: the tool itself remains the
authority on which flags are legal for which process.

Requirements
------------
- A CARIS installation providing `carisbatch` (on `PATH`, or set the executable).
- Rust 2024 edition toolchain.

Quick start: export a surface
-----------------------------
```rust,no_run
use std::path::Path;
use caris_batch::export_raster;

fn main() -> caris_batch::Result<()> {
    let cmd = export_raster(
        Path::new("/Surfaces/Surface001.csar"),
        Path::new("/Export/Surface.asc"),
        [("output_format", "ESRI_ASCII"), ("include_band", "Depth")],
    )?;

    // carisbatch --run ExportRaster --output-format "ESRI_ASCII" --include-band "Depth" ...
    println!("{}", cmd.render()?);

    let output = cmd.execute()?;
    if !output.success() {
        eprintln!("{}", output.stderr);
    }
    Ok(())
}
```

Building a command by hand
--------------------------
```rust
use caris_batch::{CommandBuilder, Operation, OptionValue, Qualifiers};

fn main() -> caris_batch::Result<()> {
    let mut cmd = CommandBuilder::new(Operation::ImportToHIPS);
    cmd.set_option("convert_navigation", true)
        .set_option("gps_timestamps", "GPS")
        .set_option("input_format", "KONGSBERGKMALL")
        .set_option("extent", OptionValue::list(["0", "0", "10", "10"]));
    cmd.input(CommandBuilder::build_locator("/raw/0001.kmall", false, &Qualifiers::new())?);
    cmd.output(CommandBuilder::build_locator(
        "/survey/Project.hips",
        true,
        &Qualifiers::new().vessel("Vessel1"),
    )?);

    let argv = cmd.render()?.argv();
    assert_eq!(argv[0], "carisbatch");
    assert_eq!(argv.last().unwrap(), "file:///survey/Project.hips?Vessel=Vessel1");
    Ok(())
}
```

Job files
---------
Jobs can be described in JSON and run one after another:

```json
[
  {
    "operation": "GeoreferenceHIPSBathymetry",
    "options": {"compute_tpu": true, "tide_measured": "0.1"},
    "inputs": [{"path": "D:/Survey/Project.hips", "as_uri": true,
                "vessel": "Vessel1", "day": "2023-328", "line": ["Line002", "Line003"]}]
  }
]
```

```rust,no_run
use std::path::Path;
use caris_batch::{load_jobs, run_jobs};

fn main() -> caris_batch::Result<()> {
    let jobs = load_jobs(Path::new("jobs.json"))?;
    let report = run_jobs(&jobs, true);
    println!("succeeded={} failed={}", report.succeeded, report.failed);
    for (index, error) in &report.errors {
        eprintln!("job {}: {}", index + 1, error);
    }
    Ok(())
}
```

Error handling
--------------
All fallible functions return `caris_batch::Result<T>`. Construction problems
(relative path for a URI, no locators, malformed option names) are reported before
anything is spawned. A non-zero exit of the tool is *not* an error: inspect
`ExecutionOutput` or call `ExecutionOutput::into_result`.

Useful modules
--------------
- [`api`] — ready-made builders and job/batch runners.
- [`core`] — options, locators, the command builder and job parameters.
- [`types`] — the `Operation` catalogue.
- [`io`] — process launching.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::command::{CommandBuilder, DEFAULT_EXECUTABLE, Invocation, Token};
pub use crate::core::locator::{Locator, Qualifiers, build_locator, day_of_year};
pub use crate::core::options::{OptionSet, OptionValue, normalize_flag};
pub use crate::core::params::{JobParams, LocatorSpec, load_jobs};
pub use error::{Error, Result};
pub use io::process::ExecutionOutput;
pub use types::{Family, Operation};

pub use api::{
    BatchReport, export_raster, georeference_hips_bathymetry, import_to_hips, run_job, run_jobs,
};
