//! Rendering of objects and confirmations
use pi_core::Object;
use std::{fmt, io::Write, str::FromStr};
use thiserror::Error;

/// Errors from printing
#[derive(Error, Debug)]
pub enum PrintError {
    /// Writing to the output stream failed
    #[error("write error: {0}")]
    Io(#[source] std::io::Error),
    /// JSON rendering failed
    #[error("json error: {0}")]
    Json(#[source] serde_json::Error),
    /// YAML rendering failed
    #[error("yaml error: {0}")]
    Yaml(#[source] serde_yaml::Error),
}

/// How to render an object
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty printed JSON
    Json,
    /// YAML
    Yaml,
    /// Just `<kind>/<name>`
    Name,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Name => "name",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "name" => Ok(OutputFormat::Name),
            other => Err(format!("unsupported output format {other:?}, expected json, yaml or name")),
        }
    }
}

/// Destination for command results
pub trait Printer {
    /// Render a full object in the given format
    fn print_object(&mut self, object: &Object, format: OutputFormat) -> Result<(), PrintError>;

    /// Print the short `<kind> "<name>" created` confirmation
    fn print_success(&mut self, object: &Object, dry_run: bool) -> Result<(), PrintError>;
}

/// A [`Printer`] writing to any [`Write`] stream
#[derive(Debug)]
pub struct StreamPrinter<W> {
    out: W,
}

impl<W: Write> StreamPrinter<W> {
    /// Print to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying stream
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Printer for StreamPrinter<W> {
    fn print_object(&mut self, object: &Object, format: OutputFormat) -> Result<(), PrintError> {
        let rendered = match format {
            OutputFormat::Json => serde_json::to_string_pretty(object).map_err(PrintError::Json)?,
            // serde_yaml already terminates documents with a newline
            OutputFormat::Yaml => serde_yaml::to_string(object)
                .map(|s| s.trim_end().to_string())
                .map_err(PrintError::Yaml)?,
            OutputFormat::Name => format!("{}/{}", object.kind().to_lowercase(), object.name()),
        };
        writeln!(self.out, "{rendered}").map_err(PrintError::Io)
    }

    fn print_success(&mut self, object: &Object, dry_run: bool) -> Result<(), PrintError> {
        let suffix = if dry_run { " (dry run)" } else { "" };
        writeln!(
            self.out,
            "{} {:?} created{suffix}",
            object.kind().to_lowercase(),
            object.name()
        )
        .map_err(PrintError::Io)
    }
}
