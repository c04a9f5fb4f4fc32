//! Batch report serialization.
//!
//! A report can be written as one JSON document (outcomes plus counters) or as
//! JSON Lines, one outcome per line, which is easier to grep and to stream
//! into other tools.

use serde::Serialize;
use std::io::{self, Write};

use crate::types::{BatchReport, FileOutcome};

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single JSON document
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Writes batch outcomes to any [`Write`] sink.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new report writer.
    ///
    /// `pretty` only affects the JSON format; JSON Lines is always compact.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            items_written: 0,
        }
    }

    /// Write a single outcome as it is produced.
    ///
    /// Meant for JSON Lines streaming; with the JSON format each call emits a
    /// standalone object.
    pub fn write_outcome(&mut self, outcome: &FileOutcome) -> io::Result<()> {
        self.write_value(outcome, self.pretty && self.format == OutputFormat::Json)?;
        self.items_written += 1;
        Ok(())
    }

    /// Write a complete batch report.
    ///
    /// JSON: one document with `outcomes`, counters and `elapsed_ms`.
    /// JSON Lines: one line per outcome.
    pub fn write_report(&mut self, report: &BatchReport) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                self.write_value(report, self.pretty)?;
                self.items_written += report.outcomes.len();
            }
            OutputFormat::JsonLines => {
                for outcome in &report.outcomes {
                    self.write_outcome(outcome)?;
                }
            }
        }
        Ok(())
    }

    fn write_value<T: Serialize + ?Sized>(&mut self, value: &T, pretty: bool) -> io::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut self.writer, value).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, value).map_err(io::Error::other)?;
        }
        writeln!(self.writer)
    }

    /// Get the number of outcomes written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
