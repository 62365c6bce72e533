//! High-level, ergonomic library API: ready-made builders for the common HIPS
//! workflow steps (import, georeference, raster export) plus job and batch
//! runners. Prefer these entrypoints over assembling `CommandBuilder`s by hand.
use std::path::Path;

use tracing::{info, warn};

use crate::core::command::CommandBuilder;
use crate::core::locator::{Qualifiers, build_locator};
use crate::core::options::OptionValue;
use crate::core::params::JobParams;
use crate::error::{Error, Result};
use crate::io::process::ExecutionOutput;
use crate::types::Operation;

/// Summary of a sequential batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    /// Jobs never started because an earlier one failed
    pub skipped: usize,
    /// Outputs of every job that ran, in job order
    pub outputs: Vec<ExecutionOutput>,
    /// Jobs that could not be built or launched, by zero-based job index
    pub errors: Vec<(usize, Error)>,
}

/// `ImportToHIPS`: raw sensor files into a HIPS project.
///
/// Raw files are passed as plain paths; the project is addressed by URI so it can
/// carry the vessel (and optionally day) the lines are imported under.
pub fn import_to_hips<P, I, K, V>(
    files: &[P],
    project: &Path,
    qualifiers: &Qualifiers,
    options: I,
) -> Result<CommandBuilder>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<OptionValue>,
{
    let mut cmd = CommandBuilder::new(Operation::ImportToHIPS);
    cmd.set_many(options);
    for file in files {
        cmd.input(build_locator(file, false, &Qualifiers::new())?);
    }
    cmd.output(build_locator(project, true, qualifiers)?);
    Ok(cmd)
}

/// `GeoreferenceHIPSBathymetry` over the vessel/day/lines selected in a project.
pub fn georeference_hips_bathymetry<I, K, V>(
    project: &Path,
    qualifiers: &Qualifiers,
    options: I,
) -> Result<CommandBuilder>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<OptionValue>,
{
    let mut cmd = CommandBuilder::new(Operation::GeoreferenceHIPSBathymetry);
    cmd.set_many(options)
        .input(build_locator(project, true, qualifiers)?);
    Ok(cmd)
}

/// `ExportRaster` from a CSAR surface to another raster format.
pub fn export_raster<I, K, V>(input: &Path, output: &Path, options: I) -> Result<CommandBuilder>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<OptionValue>,
{
    let mut cmd = CommandBuilder::new(Operation::ExportRaster);
    cmd.set_many(options)
        .input(build_locator(input, false, &Qualifiers::new())?)
        .output(build_locator(output, false, &Qualifiers::new())?);
    Ok(cmd)
}

/// Build and run a single job, returning the tool's output verbatim.
pub fn run_job(job: &JobParams) -> Result<ExecutionOutput> {
    job.to_builder()?.execute()
}

/// Run jobs one after another.
///
/// A job fails when it cannot be built, cannot be launched or exits non-zero.
/// With `continue_on_error` every job is attempted; otherwise the first failure
/// stops the batch and the remaining jobs are counted as skipped. Outputs of the
/// jobs that ran are always kept, build and launch errors land in `errors`.
pub fn run_jobs(jobs: &[JobParams], continue_on_error: bool) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, job) in jobs.iter().enumerate() {
        info!("Job {}/{}: {}", index + 1, jobs.len(), job.operation);

        let ok = match run_job(job) {
            Ok(output) => {
                let ok = output.success();
                if !ok {
                    warn!("Job {} ({}) exited with {:?}", index + 1, job.operation, output.code);
                }
                report.outputs.push(output);
                ok
            }
            Err(e) => {
                warn!("Job {} ({}) failed: {}", index + 1, job.operation, e);
                report.errors.push((index, e));
                false
            }
        };

        if ok {
            report.succeeded += 1;
        } else {
            report.failed += 1;
            if !continue_on_error {
                report.skipped = jobs.len() - index - 1;
                break;
            }
        }
    }

    info!(
        "Batch complete: succeeded={} failed={} skipped={}",
        report.succeeded, report.failed, report.skipped
    );
    report
}
