//! Run command implementation.

use super::output::{JsonVoyageResult, format_voyage_text};
use super::{CliError, OutputFormat};
use survival::voyage::{VoyageConfig, run_voyage};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the result cannot be serialized.
pub(crate) fn execute(format: OutputFormat, quiet: bool, threshold: u8) -> Result<(), CliError> {
    let config = VoyageConfig {
        threshold,
        record_days: true,
    };

    if !quiet && format == OutputFormat::Text {
        println!("Setting sail (autopilot uses items below {threshold}%)...");
        println!();
    }

    let result = run_voyage(&mut rand::thread_rng(), &config);

    match format {
        OutputFormat::Text => {
            print!("{}", format_voyage_text(&result, quiet));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonVoyageResult::from_result(&result))?;
            println!("{json}");
        }
    }

    Ok(())
}
