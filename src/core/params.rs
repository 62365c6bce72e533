use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::command::{CommandBuilder, DEFAULT_EXECUTABLE};
use crate::core::locator::{Locator, Qualifiers, build_locator};
use crate::core::options::OptionValue;
use crate::error::Result;
use crate::types::Operation;

fn default_executable() -> String {
    DEFAULT_EXECUTABLE.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// A locator as written in a job file: either a bare path string or an object
/// with URI mode and vessel/day/line qualifiers (each a string or an array).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocatorSpec {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        as_uri: bool,
        #[serde(default, deserialize_with = "one_or_many")]
        vessel: Vec<String>,
        #[serde(default, deserialize_with = "one_or_many")]
        day: Vec<String>,
        #[serde(default, deserialize_with = "one_or_many")]
        line: Vec<String>,
    },
}

impl LocatorSpec {
    pub fn to_locator(&self) -> Result<Locator> {
        match self {
            LocatorSpec::Path(path) => build_locator(path, false, &Qualifiers::new()),
            LocatorSpec::Detailed {
                path,
                as_uri,
                vessel,
                day,
                line,
            } => {
                let qualifiers = Qualifiers {
                    vessels: vessel.clone(),
                    days: day.clone(),
                    lines: line.clone(),
                };
                build_locator(path, *as_uri, &qualifiers)
            }
        }
    }
}

/// One carisbatch run, suitable for JSON job files and CLI-assembled jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobParams {
    #[serde(default = "default_executable")]
    pub executable: String,
    pub operation: Operation,
    /// Option names as attribute-style keys; JSON object order is kept
    #[serde(default)]
    pub options: IndexMap<String, OptionValue>,
    #[serde(default)]
    pub inputs: Vec<LocatorSpec>,
    #[serde(default)]
    pub outputs: Vec<LocatorSpec>,
}

impl JobParams {
    pub fn new(operation: Operation) -> Self {
        Self {
            executable: default_executable(),
            operation,
            options: IndexMap::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn to_builder(&self) -> Result<CommandBuilder> {
        let mut builder = CommandBuilder::new(self.operation);
        builder
            .executable(self.executable.clone())
            .set_many(self.options.iter().map(|(k, v)| (k, v.clone())));
        for spec in &self.inputs {
            builder.input(spec.to_locator()?);
        }
        for spec in &self.outputs {
            builder.output(spec.to_locator()?);
        }
        Ok(builder)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JobFile {
    Many(Vec<JobParams>),
    One(Box<JobParams>),
}

/// Read a JSON job file holding either one job object or an array of jobs.
pub fn load_jobs(path: &Path) -> Result<Vec<JobParams>> {
    let reader = BufReader::new(File::open(path)?);
    let jobs = match serde_json::from_reader(reader)? {
        JobFile::Many(jobs) => jobs,
        JobFile::One(job) => vec![*job],
    };
    Ok(jobs)
}
