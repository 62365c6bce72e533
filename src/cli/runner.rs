use indexmap::IndexMap;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use caris_batch::{
    DEFAULT_EXECUTABLE, JobParams, LocatorSpec, Operation, OptionValue, load_jobs,
    normalize_flag, run_jobs,
};

use super::args::CliArgs;
use super::errors::AppError;

fn list_operations() {
    let mut current = None;
    for op in Operation::ALL {
        if current != Some(op.family()) {
            println!("{}:", op.family());
            current = Some(op.family());
        }
        println!("  {}", op);
    }
}

/// Apply one `--set` value: `KEY`, `KEY=VALUE`, `KEY+=VALUE` or `KEY:=V1,V2,..`.
fn apply_setting(
    options: &mut IndexMap<String, OptionValue>,
    setting: &str,
) -> Result<(), AppError> {
    let invalid = || AppError::InvalidSetting {
        setting: setting.to_string(),
    };

    let Some((lhs, value)) = setting.split_once('=') else {
        let key = normalize_flag(setting.trim());
        if key.is_empty() {
            return Err(invalid());
        }
        options.insert(key, OptionValue::Flag(true));
        return Ok(());
    };

    let (key, op) = match lhs.strip_suffix('+') {
        Some(key) => (key, '+'),
        None => match lhs.strip_suffix(':') {
            Some(key) => (key, ':'),
            None => (lhs, '='),
        },
    };
    let key = normalize_flag(key.trim());
    if key.is_empty() {
        return Err(invalid());
    }
    let value = value.to_string();

    match op {
        '+' => {
            let entry = options
                .entry(key)
                .or_insert_with(|| OptionValue::Sequence(Vec::new()));
            // a plain value becomes the first occurrence of the repeated flag
            *entry = match std::mem::replace(entry, OptionValue::Flag(false)) {
                OptionValue::Sequence(mut values) => {
                    values.push(value);
                    OptionValue::Sequence(values)
                }
                OptionValue::List(mut values) => {
                    values.push(value);
                    OptionValue::List(values)
                }
                OptionValue::Value(first) => OptionValue::Sequence(vec![first, value]),
                OptionValue::Flag(_) => OptionValue::Sequence(vec![value]),
            };
        }
        ':' => {
            let values = value.split(',').filter(|v| !v.is_empty());
            options.insert(key, OptionValue::list(values));
        }
        _ => {
            options.insert(key, OptionValue::Value(value));
        }
    }
    Ok(())
}

fn locator_spec(path: &str, as_uri: bool, args: &CliArgs) -> LocatorSpec {
    if as_uri {
        LocatorSpec::Detailed {
            path: path.to_string(),
            as_uri,
            vessel: args.vessel.clone(),
            day: args.day.clone(),
            line: args.line.clone(),
        }
    } else {
        LocatorSpec::Path(path.to_string())
    }
}

fn job_from_args(args: &CliArgs) -> Result<JobParams, AppError> {
    let operation = args.operation.ok_or(AppError::MissingArgument {
        arg: "--operation (or --config)".to_string(),
    })?;

    let mut job = JobParams::new(operation);
    job.executable = args.executable.clone();
    for setting in &args.settings {
        apply_setting(&mut job.options, setting)?;
    }

    let has_qualifiers = !(args.vessel.is_empty() && args.day.is_empty() && args.line.is_empty());
    if has_qualifiers && !args.input_as_uri && !args.output_as_uri {
        warn!("--vessel/--day/--line only apply with --input-as-uri or --output-as-uri");
    }

    job.inputs = args
        .input
        .iter()
        .map(|p| locator_spec(p, args.input_as_uri, args))
        .collect();
    job.outputs = args
        .output
        .iter()
        .map(|p| locator_spec(p, args.output_as_uri, args))
        .collect();

    Ok(job)
}

fn render_job(job: &JobParams) -> Result<String, AppError> {
    Ok(job.to_builder()?.render()?.to_string())
}

/// Returns the process exit code: the tool's own code for a single job,
/// 0/1 for a job file depending on whether every job succeeded.
pub fn run(args: CliArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if args.log {
        // RUST_LOG narrows or widens the default debug level
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    if args.list_operations {
        list_operations();
        return Ok(0);
    }

    let mut jobs = match &args.config {
        Some(path) => {
            info!("Loading jobs from {:?}", path);
            load_jobs(path)?
        }
        None => vec![job_from_args(&args)?],
    };

    if args.config.is_some() && args.executable != DEFAULT_EXECUTABLE {
        for job in &mut jobs {
            job.executable = args.executable.clone();
        }
    }

    if args.dry_run {
        for job in &jobs {
            println!("{}", render_job(job)?);
        }
        return Ok(0);
    }

    let mut report = run_jobs(&jobs, args.continue_on_error);
    for output in &report.outputs {
        print!("{}", output.stdout);
        eprint!("{}", output.stderr);
    }

    if args.config.is_none() {
        if let Some((_, e)) = report.errors.pop() {
            return Err(e.into());
        }
        return Ok(report.outputs.first().and_then(|o| o.code).unwrap_or(1));
    }

    for (index, e) in &report.errors {
        eprintln!("Job {} failed: {}", index + 1, e);
    }
    if report.skipped > 0 {
        eprintln!("{} job(s) skipped", report.skipped);
    }
    Ok(if report.failed == 0 { 0 } else { 1 })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_apply_setting_forms() {
        let mut options = IndexMap::new();
        apply_setting(&mut options, "convert_navigation").unwrap();
        apply_setting(&mut options, "gps_timestamps=GPS").unwrap();
        apply_setting(&mut options, "include_band+=Depth").unwrap();
        apply_setting(&mut options, "include-band+=Uncertainty").unwrap();
        apply_setting(&mut options, "filter=a=b").unwrap();
        apply_setting(&mut options, "extent:=0,0,10,10").unwrap();

        let entries: Vec<(&str, &OptionValue)> =
            options.iter().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(
            entries,
            vec![
                ("convert-navigation", &OptionValue::Flag(true)),
                ("gps-timestamps", &OptionValue::Value("GPS".to_string())),
                (
                    "include-band",
                    &OptionValue::sequence(["Depth", "Uncertainty"])
                ),
                ("filter", &OptionValue::Value("a=b".to_string())),
                ("extent", &OptionValue::list(["0", "0", "10", "10"])),
            ]
        );
    }

    #[test]
    fn test_append_keeps_an_earlier_value() {
        let mut options = IndexMap::new();
        apply_setting(&mut options, "include_band=Depth").unwrap();
        apply_setting(&mut options, "include_band+=Density").unwrap();
        apply_setting(&mut options, "resolution:=1").unwrap();
        apply_setting(&mut options, "resolution+=2").unwrap();
        apply_setting(&mut options, "create_tfw").unwrap();
        apply_setting(&mut options, "create_tfw+=yes").unwrap();

        assert_eq!(
            options.get("include-band"),
            Some(&OptionValue::sequence(["Depth", "Density"]))
        );
        assert_eq!(options.get("resolution"), Some(&OptionValue::list(["1", "2"])));
        assert_eq!(options.get("create-tfw"), Some(&OptionValue::sequence(["yes"])));
    }

    #[test]
    fn test_empty_list_setting_emits_nothing() {
        let mut options = IndexMap::new();
        apply_setting(&mut options, "extent:=").unwrap();
        assert_eq!(options.get("extent"), Some(&OptionValue::List(Vec::new())));
        assert!(apply_setting(&mut options, ":=1,2").is_err());
    }

    #[test]
    fn test_apply_setting_rejects_empty_key() {
        let mut options = IndexMap::new();
        assert!(apply_setting(&mut options, "=value").is_err());
        assert!(apply_setting(&mut options, "").is_err());
    }
}
