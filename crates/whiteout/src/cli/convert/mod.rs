//! The conversion command: argument surface and option resolution.

mod batch;
pub mod types;

pub use types::ReportFormat;

use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};
use whiteout_core::pipeline::absolutize;
use whiteout_core::{Batch, Config, ConvertOptions};

use batch::{run_batch, write_report};

/// Arguments for a conversion run.
///
/// Options left unset fall back to the config file, then to built-in defaults.
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Folder containing images
    #[arg(required_unless_present = "show_config")]
    pub input_dir: Option<PathBuf>,

    /// Where to save results (default: input_dir)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Recurse into subfolders
    #[arg(short, long)]
    pub recursive: bool,

    /// Mirror the input subfolder structure inside the output dir
    #[arg(short, long)]
    pub keep_subdirs: bool,

    /// Suffix for output filenames [default: _transparent]
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// 0-255. Higher = more pixels become transparent [default: 240]
    #[arg(short, long, value_parser = clap::value_parser!(u8))]
    pub threshold: Option<u8>,

    /// File extensions to process [default: png jpg jpeg webp]
    #[arg(long, num_args = 0.., value_name = "EXT")]
    pub ext: Option<Vec<String>>,

    /// Overwrite existing files in the output directory
    #[arg(long)]
    pub overwrite: bool,

    /// Write a machine-readable report of every outcome to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Report format (defaults to output.format from the config)
    #[arg(long, value_enum)]
    pub report_format: Option<ReportFormat>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl ConvertArgs {
    /// Merge CLI flags over configuration defaults.
    ///
    /// Boolean flags can only switch a behaviour on; a config default of
    /// `true` is not turned off by omitting the flag.
    pub fn resolve(&self, input_dir: PathBuf, config: &Config) -> ConvertOptions {
        let input_dir = absolutize(&input_dir);
        let mut options = ConvertOptions::from_config(input_dir, config);

        if let Some(output_dir) = &self.output_dir {
            options.output_dir = output_dir.clone();
        }
        options.output_dir = resolve_path(&options.output_dir);

        options.recursive |= self.recursive;
        options.keep_subdirs |= self.keep_subdirs;
        options.overwrite |= self.overwrite;
        if let Some(suffix) = &self.suffix {
            options.suffix = suffix.clone();
        }
        if let Some(threshold) = self.threshold {
            options.threshold = threshold;
        }
        match &self.ext {
            Some(ext) => options.with_extensions(ext.as_slice()),
            None => options,
        }
    }
}

/// Expand a leading `~` and make the path absolute.
fn resolve_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    absolutize(Path::new(shellexpand::tilde(&raw).as_ref()))
}

/// Execute a conversion run, printing outcome lines to stdout.
///
/// Errors returned from here are fatal: a missing input directory or an
/// unwritable report. Per-file failures are reported and do not fail the run.
pub fn execute(args: ConvertArgs, config: &Config) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute_to(args, config, &mut out)
}

fn execute_to<W: Write>(args: ConvertArgs, config: &Config, out: &mut W) -> anyhow::Result<()> {
    let Some(input_dir) = args.input_dir.clone() else {
        anyhow::bail!("an input directory is required");
    };
    let options = args.resolve(input_dir, config);
    if options.keep_subdirs && !options.recursive {
        tracing::debug!("--keep-subdirs has no effect without --recursive");
    }
    tracing::debug!("Options: {:?}", options);

    let batch = Batch::new(options, config.limits.clone());
    let tasks = batch.discover()?;
    if tasks.is_empty() {
        writeln!(out, "No matching images found.")?;
        return Ok(());
    }
    tracing::info!("Found {} image(s) to process", tasks.len());

    let report = run_batch(&batch, tasks, !args.no_progress, out)?;

    if let Some(path) = &args.report {
        let path = resolve_path(path);
        let format = args
            .report_format
            .map(whiteout_core::OutputFormat::from)
            .or_else(|| whiteout_core::OutputFormat::parse(&config.output.format))
            .unwrap_or(whiteout_core::OutputFormat::Json);
        write_report(&report, &path, format, config.output.pretty)?;
        tracing::info!("Report written to {:?}", path);
    }

    Ok(())
}
