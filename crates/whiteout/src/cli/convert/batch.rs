//! Batch execution with progress, per-file outcome lines and a summary.

use console::style;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use whiteout_core::{
    Batch, BatchReport, FileOutcome, FileTask, OutcomeKind, OutputFormat, OutputWriter,
};

/// Run every task, writing one line per outcome to `out` and `Done.` at the end.
///
/// Lines are written in processing order. The progress bar (stderr) is
/// suspended while a line is written so the two never interleave.
pub fn run_batch<W: Write>(
    batch: &Batch,
    tasks: Vec<FileTask>,
    show_progress: bool,
    out: &mut W,
) -> std::io::Result<BatchReport> {
    let progress = create_progress_bar(tasks.len() as u64, show_progress);
    let mut write_result = Ok(());

    let report = batch.run(tasks, |outcome| {
        progress.suspend(|| {
            if write_result.is_ok() {
                write_result = writeln!(out, "{}", render_outcome(outcome));
            }
        });
        progress.inc(1);
    });

    progress.finish_and_clear();
    write_result?;
    writeln!(out, "Done.")?;

    print_summary(&report);
    Ok(report)
}

/// Styled form of [`FileOutcome`]'s display line.
fn render_outcome(outcome: &FileOutcome) -> String {
    match &outcome.kind {
        OutcomeKind::Saved { destination, .. } => {
            format!("{} {}", style("Saved:").green(), destination.display())
        }
        OutcomeKind::Skipped {
            destination,
            reason,
        } => format!(
            "{} {}",
            style(format!("Skip ({}):", reason)).yellow(),
            destination.display()
        ),
        OutcomeKind::Failed { error } => format!(
            "{} {}: {}",
            style("Error processing").red(),
            outcome.source.display(),
            error
        ),
    }
}

/// Write the full report to `path`.
pub fn write_report(
    report: &BatchReport,
    path: &Path,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = OutputWriter::new(BufWriter::new(file), format, pretty);
    writer.write_report(report)?;
    writer.flush()?;
    Ok(())
}

/// Create a progress bar for batch processing.
fn create_progress_bar(total: u64, visible: bool) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb
}

/// Print a formatted summary table after batch processing.
fn print_summary(report: &BatchReport) {
    let secs = report.elapsed.as_secs_f64();
    let processed = report.saved + report.failed;
    let rate = if secs > 0.0 {
        processed as f64 / secs
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Saved:        {:>8}", report.saved);
    if report.skipped > 0 {
        eprintln!("    Skipped:      {:>8}", report.skipped);
    }
    if report.failed > 0 {
        eprintln!("    Failed:       {:>8}", report.failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", report.total());
    eprintln!("    Duration:     {:>7.1}s", secs);
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
}
