use std::io::Write;

use caris_batch::{Error, JobParams, Operation, OptionValue, load_jobs};
use rstest::rstest;
use tempfile::NamedTempFile;

fn job_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[rstest]
fn single_job_object() {
    let file = job_file(
        r#"{
            "operation": "GeoreferenceHIPSBathymetry",
            "options": {"compute_tpu": true, "tide_measured": "0.1", "svp": ["/svp/a.svp", "/svp/b.svp"]},
            "inputs": [{"path": "/survey/Project.hips", "as_uri": true,
                        "vessel": "Vessel1", "day": "2023-328", "line": ["Line002", "Line003"]}]
        }"#,
    );

    let jobs = load_jobs(file.path()).unwrap();
    assert_eq!(jobs.len(), 1);

    let job = &jobs[0];
    assert_eq!(job.operation, Operation::GeoreferenceHIPSBathymetry);
    let keys: Vec<&str> = job.options.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["compute_tpu", "tide_measured", "svp"]);

    assert_eq!(
        job.to_builder().unwrap().render().unwrap().to_string(),
        concat!(
            r#"carisbatch --run GeoreferenceHIPSBathymetry --compute-tpu --tide-measured "0.1" "#,
            r#"--svp "/svp/a.svp" --svp "/svp/b.svp" "#,
            r#""file:///survey/Project.hips?Vessel=Vessel1;Day=2023-328;Line=Line002;Line=Line003""#,
        )
    );
}

#[rstest]
fn job_array_with_custom_executable() {
    let file = job_file(
        r#"[
            {"operation": "ExportRaster", "executable": "/opt/caris/bin/carisbatch",
             "options": {"output_format": "GEOTIFF", "resolution": {"list": [2, 2]}},
             "inputs": ["/in.csar"], "outputs": ["/out.tif"]},
            {"operation": "CreateHIPSFile", "outputs": [{"path": "/survey/New.hips", "as_uri": true}]}
        ]"#,
    );

    let jobs = load_jobs(file.path()).unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(
        jobs[0].options.get("resolution"),
        Some(&OptionValue::list(["2", "2"]))
    );
    assert_eq!(
        jobs[0].to_builder().unwrap().render().unwrap().to_string(),
        r#"/opt/caris/bin/carisbatch --run ExportRaster --output-format "GEOTIFF" --resolution "2" "2" "/in.csar" "/out.tif""#
    );
    assert_eq!(
        jobs[1].to_builder().unwrap().render().unwrap().argv(),
        vec!["carisbatch", "--run", "CreateHIPSFile", "file:///survey/New.hips"]
    );
}

#[rstest]
fn job_round_trips_through_json() {
    let mut job = JobParams::new(Operation::ExportRaster);
    job.options
        .insert("include_band".to_string(), OptionValue::sequence(["Depth"]));
    let json = serde_json::to_string(&job).unwrap();
    let back: JobParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, job);
}

#[rstest]
#[case(r#"{"operation": "NotAProcess"}"#)]
#[case(r#"{"options": {}}"#)]
#[case("not json")]
fn malformed_job_files(#[case] contents: &str) {
    let file = job_file(contents);
    assert!(matches!(load_jobs(file.path()), Err(Error::Json(_))));
}

#[rstest]
fn missing_job_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_jobs(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}
