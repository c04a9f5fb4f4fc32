//! Batch orchestration: discovery, destination planning, skip/overwrite policy
//! and per-file error isolation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{normalize_extension, Config, LimitsConfig};
use crate::error::{Result, WhiteoutError};
use crate::types::{BatchReport, FileOutcome, FileTask};

use super::destination::DestinationPlanner;
use super::discovery::FileDiscovery;
use super::processor::ImageProcessor;

/// Reason reported when an existing output is left alone.
pub const SKIP_EXISTS: &str = "exists";

/// Everything one batch run needs to know.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Folder containing images
    pub input_dir: PathBuf,
    /// Where results are written
    pub output_dir: PathBuf,
    /// Recurse into subfolders
    pub recursive: bool,
    /// Mirror the input subfolder structure inside the output dir
    pub keep_subdirs: bool,
    /// Suffix appended to output file stems
    pub suffix: String,
    /// Channel threshold for "white-ish"
    pub threshold: u8,
    /// Extensions to process, lower-case without dots
    pub extensions: Vec<String>,
    /// Replace existing outputs instead of skipping them
    pub overwrite: bool,
}

impl ConvertOptions {
    /// Build options from configuration defaults for `input_dir`.
    pub fn from_config(input_dir: PathBuf, config: &Config) -> Self {
        let output_dir = config.output_dir().unwrap_or_else(|| input_dir.clone());
        Self {
            input_dir,
            output_dir,
            recursive: config.convert.recursive,
            keep_subdirs: config.convert.keep_subdirs,
            suffix: config.convert.suffix.clone(),
            threshold: config.convert.threshold,
            extensions: config.convert.extensions.clone(),
            overwrite: config.convert.overwrite,
        }
    }

    /// Replace the extension list, normalizing each entry.
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        self
    }
}

/// A configured batch run.
pub struct Batch {
    options: ConvertOptions,
    discovery: FileDiscovery,
    planner: DestinationPlanner,
    processor: ImageProcessor,
}

impl Batch {
    /// Create a batch for the given options and limits.
    pub fn new(options: ConvertOptions, limits: LimitsConfig) -> Self {
        let discovery = FileDiscovery::new(&options.extensions, options.recursive);
        let planner = DestinationPlanner::new(
            &options.input_dir,
            &options.output_dir,
            &options.suffix,
            options.keep_subdirs,
        );
        let processor = ImageProcessor::new(options.threshold, limits);
        Self {
            options,
            discovery,
            planner,
            processor,
        }
    }

    /// Pre-flight check of the input directory, then discovery and planning.
    ///
    /// A discovered file that is the planned destination of another discovered
    /// file is an output of an earlier run and is left out. Fails only when the
    /// input directory is missing or is not a directory. An empty result is not
    /// an error.
    pub fn discover(&self) -> Result<Vec<FileTask>> {
        let input = &self.options.input_dir;
        if !input.exists() {
            return Err(WhiteoutError::InputNotFound(input.clone()));
        }
        if !input.is_dir() {
            return Err(WhiteoutError::NotADirectory(input.clone()));
        }

        let planned: Vec<FileTask> = self
            .discovery
            .discover(input)
            .into_iter()
            .map(|source| self.planner.plan(source))
            .collect();

        let destinations: HashSet<&Path> = planned
            .iter()
            .filter(|task| task.source != task.destination)
            .map(|task| task.destination.as_path())
            .collect();
        let previous_outputs: HashSet<PathBuf> = planned
            .iter()
            .filter(|task| destinations.contains(task.source.as_path()))
            .map(|task| task.source.clone())
            .collect();

        let tasks: Vec<FileTask> = planned
            .into_iter()
            .filter(|task| {
                let keep = !previous_outputs.contains(&task.source);
                if !keep {
                    tracing::debug!("Ignoring previous output {:?}", task.source);
                }
                keep
            })
            .collect();
        tracing::debug!("Discovered {} file(s) under {:?}", tasks.len(), input);
        Ok(tasks)
    }

    /// Process one task: skip policy, then conversion. Never fails; errors are
    /// captured in the outcome.
    pub fn process(&self, task: &FileTask) -> FileOutcome {
        if !self.options.overwrite && task.destination.exists() {
            tracing::debug!("Skipping {:?}: {:?} exists", task.source, task.destination);
            return FileOutcome::skipped(task, SKIP_EXISTS);
        }

        match self.processor.convert(task) {
            Ok(converted) => {
                FileOutcome::saved(task, converted.cleared_pixels, converted.resolution)
            }
            Err(e) => {
                tracing::debug!("Failed: {:?} - {}", task.source, e);
                FileOutcome::failed(task, e)
            }
        }
    }

    /// Process every task in order, handing each outcome to `on_outcome` as
    /// soon as it is known. One failing file never stops the batch.
    pub fn run<F>(&self, tasks: Vec<FileTask>, mut on_outcome: F) -> BatchReport
    where
        F: FnMut(&FileOutcome),
    {
        let start = Instant::now();
        let mut report = BatchReport::default();

        for task in &tasks {
            let outcome = self.process(task);
            on_outcome(&outcome);
            report.push(outcome);
        }

        report.elapsed = start.elapsed();
        report
    }
}

/// Make a path absolute against the current directory without touching the
/// filesystem, so missing inputs can still be reported by their full path.
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
