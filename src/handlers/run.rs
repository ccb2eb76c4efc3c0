use anyhow::Result;
use console::{Term, style};
use dcfetch::download::{DownloadManager, DownloadProgress, ProgressTracker};
use dcfetch::{Config, read_candidates};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

pub async fn handle_run(config: &Config, verbose: bool) -> Result<()> {
    let term = Term::stdout();
    let general = &config.general;

    // An unreadable list is fatal; per-item problems below are not
    let candidates = read_candidates(&general.input_file)?;

    term.write_line(&format!(
        "{} Processing {} URLs from {}",
        style("⬇️").cyan(),
        style(candidates.len()).cyan().bold(),
        style(general.input_file.display()).cyan()
    ))?;
    term.write_line(&format!(
        "{} Output directory: {}",
        style("📁").cyan(),
        style(general.output_dir.display()).cyan()
    ))?;
    term.write_line(&format!(
        "{} Strategy: {}, download cap: {}",
        style("🔄").cyan(),
        style(general.strategy).blue(),
        general.max_downloads
    ))?;

    let (manager, mut progress_receiver) = DownloadManager::from_config(config)?;

    // Debug logging and a redrawing bar do not mix well
    let pb = if verbose {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(candidates.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let renderer = tokio::spawn(async move {
        while let Some(event) = progress_receiver.recv().await {
            match event {
                DownloadProgress::Started { candidate, .. } => {
                    pb.set_message(candidate);
                }
                DownloadProgress::Downloaded { .. }
                | DownloadProgress::Skipped { .. }
                | DownloadProgress::Unresolved { .. }
                | DownloadProgress::Failed { .. } => pb.inc(1),
                DownloadProgress::CapReached { max_downloads, .. } => {
                    pb.abandon_with_message(format!("stopped at cap of {}", max_downloads));
                    return;
                }
            }
        }
        pb.finish_and_clear();
    });

    let start_time = Instant::now();
    let summary = manager.run(&candidates).await;
    drop(manager);
    renderer.await?;

    term.write_line(&format!("\n{} Summary:", style("📊").cyan().bold()))?;
    term.write_line(&format!(
        "   {}: {} ({})",
        style("Downloaded").green(),
        style(summary.downloaded).green().bold(),
        ProgressTracker::format_bytes(summary.bytes_downloaded)
    ))?;
    term.write_line(&format!(
        "   {}: {}",
        style("Already present").dim(),
        summary.skipped
    ))?;
    if summary.unresolved > 0 {
        term.write_line(&format!(
            "   {}: {}",
            style("Unrecognized URLs").yellow(),
            style(summary.unresolved).yellow()
        ))?;
    }
    if summary.failed > 0 {
        term.write_line(&format!(
            "   {}: {}",
            style("Failed").red(),
            style(summary.failed).red().bold()
        ))?;
    }
    term.write_line(&format!(
        "   {}: {}",
        style("Elapsed").dim(),
        ProgressTracker::format_duration(start_time.elapsed())
    ))?;

    if summary.cap_reached {
        term.write_line(&format!(
            "{} Reached maximum download limit of {}; {} URLs left for the next run",
            style("⏹️").yellow(),
            general.max_downloads,
            candidates.len() - summary.processed
        ))?;
    }

    Ok(())
}
