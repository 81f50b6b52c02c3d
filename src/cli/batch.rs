//! Batch command implementation.

// Rates are reported as f64
#![allow(clippy::cast_precision_loss)]

use super::output::{JsonBatchResult, format_batch_csv, format_batch_text};
use super::{BatchFormat, CliError};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use survival::voyage::{VoyageConfig, run_voyages};

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the progress template is invalid or the result
/// cannot be serialized.
pub(crate) fn execute(
    games: u64,
    threads: Option<usize>,
    threshold: u8,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let config = VoyageConfig {
        threshold,
        record_days: false,
    };

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} voyages ({per_sec})")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let stats = run_voyages(games, &config);

    // Update progress bar after completion (no atomic overhead in hot path)
    if let Some(pb) = pb {
        pb.set_position(stats.voyages);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let voyages_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.voyages as f64 / duration.as_secs_f64()
    } else {
        0.0
    };
    log::info!(
        "{} voyages in {:.2}s ({voyages_per_sec:.0}/s)",
        stats.voyages,
        duration.as_secs_f64()
    );

    match format {
        BatchFormat::Text => {
            print!("{}", format_batch_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} voyages/sec)",
                duration.as_secs_f64(),
                voyages_per_sec
            );
        }
        BatchFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonBatchResult::from_stats(&stats))?;
            println!("{json}");
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats));
        }
    }

    Ok(())
}
