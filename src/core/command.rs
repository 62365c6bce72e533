//! The command builder: an operation, ordered options and locators rendered into
//! a `carisbatch --run <Operation> ...` invocation.
use std::path::Path;

use tracing::debug;

use crate::core::locator::{self, Locator, Qualifiers};
use crate::core::options::{OptionSet, OptionValue, validate_flag};
use crate::error::{Error, Result};
use crate::io::process::{self, ExecutionOutput};
use crate::types::Operation;

pub const DEFAULT_EXECUTABLE: &str = "carisbatch";

/// A single command-line token. `Quoted` tokens are wrapped in `"` when the
/// invocation is displayed; both kinds are passed raw in the argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Bare(String),
    Quoted(String),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match self {
            Token::Bare(s) | Token::Quoted(s) => s,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Bare(s) => write!(f, "{}", s),
            Token::Quoted(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
        }
    }
}

/// Fully ordered invocation: executable, `--run`, operation, options, inputs, outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    tokens: Vec<Token>,
}

impl Invocation {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn program(&self) -> &str {
        self.tokens[0].as_str()
    }

    /// Arguments after the program name, unquoted.
    pub fn args(&self) -> impl Iterator<Item = &str> {
        self.tokens[1..].iter().map(Token::as_str)
    }

    pub fn argv(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self.tokens.iter().map(Token::to_string).collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// Mutable builder for one external process run.
///
/// No option names are checked against the tool's grammar; unknown flags are only
/// rejected by the tool itself.
///
/// ```
/// use caris_batch::{CommandBuilder, Locator, Operation};
///
/// let mut cmd = CommandBuilder::new(Operation::ExportRaster);
/// cmd.set_option("output_format", "ESRI_ASCII")
///     .set_option("include_band", "Depth")
///     .input(Locator::Path("/Surfaces/Surface001.csar".into()))
///     .output(Locator::Path("/Export/Surface.asc".into()));
///
/// assert_eq!(
///     cmd.render().unwrap().to_string(),
///     r#"carisbatch --run ExportRaster --output-format "ESRI_ASCII" --include-band "Depth" "/Surfaces/Surface001.csar" "/Export/Surface.asc""#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    executable: String,
    operation: Operation,
    options: OptionSet,
    inputs: Vec<Locator>,
    outputs: Vec<Locator>,
}

impl CommandBuilder {
    pub fn new(operation: Operation) -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            operation,
            options: OptionSet::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn executable(&mut self, executable: impl Into<String>) -> &mut Self {
        self.executable = executable.into();
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn set_option(&mut self, name: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.options.set(name, value);
        self
    }

    pub fn set_many<I, K, V>(&mut self, options: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        for (name, value) in options {
            self.options.set(name.as_ref(), value);
        }
        self
    }

    pub fn unset_option(&mut self, name: &str) -> &mut Self {
        self.options.remove(name);
        self
    }

    pub fn input(&mut self, locator: Locator) -> &mut Self {
        self.inputs.push(locator);
        self
    }

    pub fn inputs(&mut self, locators: impl IntoIterator<Item = Locator>) -> &mut Self {
        self.inputs.extend(locators);
        self
    }

    pub fn output(&mut self, locator: Locator) -> &mut Self {
        self.outputs.push(locator);
        self
    }

    /// See [`locator::build_locator`].
    pub fn build_locator(
        path: impl AsRef<Path>,
        as_uri: bool,
        qualifiers: &Qualifiers,
    ) -> Result<Locator> {
        locator::build_locator(path, as_uri, qualifiers)
    }

    pub fn render(&self) -> Result<Invocation> {
        if self.inputs.is_empty() && self.outputs.is_empty() {
            return Err(Error::MissingArgument {
                arg: "input and/or output locator".to_string(),
            });
        }
        if self.executable.trim().is_empty() {
            return Err(Error::MissingArgument {
                arg: "executable".to_string(),
            });
        }

        let program = if self.executable.contains(char::is_whitespace) {
            Token::Quoted(self.executable.clone())
        } else {
            Token::Bare(self.executable.clone())
        };
        let mut tokens = vec![
            program,
            Token::Bare("--run".to_string()),
            Token::Bare(self.operation.to_string()),
        ];

        for (flag, value) in self.options.iter() {
            validate_flag(flag)?;
            push_option(&mut tokens, flag, value);
        }

        tokens.extend(
            self.inputs
                .iter()
                .chain(self.outputs.iter())
                .map(|l| Token::Quoted(l.as_str().to_string())),
        );

        Ok(Invocation { tokens })
    }

    /// Render and run to completion. A non-zero exit is returned as-is.
    pub fn execute(&self) -> Result<ExecutionOutput> {
        let invocation = self.render()?;
        debug!("Running {} with {} option(s)", self.operation, self.options.len());
        process::execute(&invocation)
    }
}

fn push_option(tokens: &mut Vec<Token>, flag: &str, value: &OptionValue) {
    let flag_token = || Token::Bare(format!("--{}", flag));
    match value {
        OptionValue::Flag(true) => tokens.push(flag_token()),
        OptionValue::Flag(false) => {}
        OptionValue::Value(v) if v.is_empty() => {}
        OptionValue::Value(v) => {
            tokens.push(flag_token());
            tokens.push(Token::Quoted(v.clone()));
        }
        OptionValue::Sequence(values) => {
            for v in values {
                tokens.push(flag_token());
                tokens.push(Token::Quoted(v.clone()));
            }
        }
        OptionValue::List(values) if values.is_empty() => {}
        OptionValue::List(values) => {
            tokens.push(flag_token());
            tokens.extend(values.iter().map(|v| Token::Quoted(v.clone())));
        }
    }
}
