//! Output formatting utilities for CLI.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string)]

use serde::Serialize;
use survival::game::Levels;
use survival::voyage::{DayLog, VoyageEnd, VoyageResult, VoyageStats};

/// JSON-serializable resource levels.
#[derive(Debug, Serialize)]
pub(super) struct JsonLevels {
    health: u8,
    sanity: u8,
    food: u8,
    water: u8,
    ship_condition: u8,
}

impl From<Levels> for JsonLevels {
    fn from(levels: Levels) -> Self {
        Self {
            health: levels.health,
            sanity: levels.sanity,
            food: levels.food,
            water: levels.water,
            ship_condition: levels.ship_condition,
        }
    }
}

/// JSON-serializable day of a voyage.
#[derive(Debug, Serialize)]
pub(super) struct JsonDay {
    /// Day the disaster struck on.
    day: u32,
    /// Disaster name.
    disaster: &'static str,
    /// Items used before sailing.
    items_used: u32,
    /// Levels after the disaster.
    levels: JsonLevels,
}

/// JSON-serializable voyage result.
#[derive(Debug, Serialize)]
pub(super) struct JsonVoyageResult {
    /// "victory" or "lost".
    outcome: &'static str,
    /// Fatal disaster (null on victory).
    cause: Option<&'static str>,
    /// Final day.
    day: u32,
    /// Disasters survived.
    survived: u32,
    /// Health + sanity + ship condition.
    final_score: u32,
    /// Items used over the voyage.
    items_used: u32,
    /// Final levels.
    levels: JsonLevels,
    /// Per-day log.
    days: Vec<JsonDay>,
}

impl JsonVoyageResult {
    /// Create from a VoyageResult.
    pub(super) fn from_result(result: &VoyageResult) -> Self {
        let (outcome, cause) = match result.end {
            VoyageEnd::Victory => ("victory", None),
            VoyageEnd::Lost { cause } => ("lost", Some(cause)),
        };
        Self {
            outcome,
            cause,
            day: result.day,
            survived: result.survived,
            final_score: result.final_score,
            items_used: result.items_used,
            levels: result.levels.into(),
            days: result
                .days
                .iter()
                .map(|d| JsonDay {
                    day: d.day,
                    disaster: d.disaster,
                    items_used: d.items_used,
                    levels: d.levels.into(),
                })
                .collect(),
        }
    }
}

fn format_levels(levels: Levels) -> String {
    format!(
        "H{:>3} S{:>3} F{:>3} W{:>3} Ship{:>3}",
        levels.health, levels.sanity, levels.food, levels.water, levels.ship_condition
    )
}

fn format_day(day: &DayLog) -> String {
    let items = if day.items_used > 0 {
        format!(" (+{} items)", day.items_used)
    } else {
        String::new()
    };
    format!(
        "  Day {:>2}: {:<20} {}{items}\n",
        day.day,
        day.disaster,
        format_levels(day.levels)
    )
}

/// Format a voyage as human-readable text.
pub(super) fn format_voyage_text(result: &VoyageResult, quiet: bool) -> String {
    let mut output = String::new();

    if !quiet {
        for day in &result.days {
            output.push_str(&format_day(day));
        }
        output.push('\n');
    }

    match result.end {
        VoyageEnd::Victory => {
            output.push_str(&format!(
                "Voyage Result: VICTORY after {} disasters\n",
                result.survived
            ));
            output.push_str(&format!("  Final Score: {}\n", result.final_score));
        }
        VoyageEnd::Lost { cause } => {
            output.push_str(&format!("Voyage Result: LOST to {cause}\n"));
            output.push_str(&format!(
                "  You survived {} disasters over {} days.\n",
                result.survived, result.day
            ));
        }
    }
    output.push_str(&format!("  Items used: {}\n", result.items_used));
    output.push_str(&format!("  Final levels: {}\n", format_levels(result.levels)));

    output
}

/// JSON-serializable batch statistics.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Voyages played.
    voyages: u64,
    /// Voyages won.
    victories: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Mean disasters survived.
    avg_survived: f64,
    /// Mean final score over victories.
    avg_victory_score: f64,
    /// Best final score over victories.
    best_score: Option<u32>,
    /// Mean items used.
    avg_items: f64,
    /// Losses per fatal disaster.
    causes: Vec<JsonCause>,
}

/// JSON-serializable loss count.
#[derive(Debug, Serialize)]
pub(super) struct JsonCause {
    disaster: &'static str,
    losses: u64,
}

impl JsonBatchResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &VoyageStats) -> Self {
        Self {
            voyages: stats.voyages,
            victories: stats.victories,
            win_rate: stats.win_rate(),
            avg_survived: stats.avg_survived(),
            avg_victory_score: stats.avg_victory_score(),
            best_score: stats.best_score,
            avg_items: stats.avg_items(),
            causes: stats
                .causes
                .iter()
                .map(|&(disaster, losses)| JsonCause { disaster, losses })
                .collect(),
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &VoyageStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Batch Results ({} voyages)\n", stats.voyages));
    output.push_str("========================================\n\n");

    output.push_str(&format!(
        "Victories: {} ({:.1}%)\n",
        stats.victories,
        stats.win_rate() * 100.0
    ));
    output.push_str(&format!("Losses: {}\n", stats.losses()));
    output.push_str(&format!(
        "Average disasters survived: {:.1}\n",
        stats.avg_survived()
    ));
    output.push_str(&format!("Average items used: {:.1}\n", stats.avg_items()));
    if let Some(best) = stats.best_score {
        output.push_str(&format!(
            "Victory score: {:.1} avg, {best} best\n",
            stats.avg_victory_score()
        ));
    }

    if !stats.causes.is_empty() {
        output.push_str("\nLosses by disaster:\n");
        let mut causes = stats.causes.clone();
        causes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        for (disaster, n) in causes {
            output.push_str(&format!("  {disaster:<20} {n}\n"));
        }
    }

    output
}

/// Format batch stats as CSV.
pub(super) fn format_batch_csv(stats: &VoyageStats) -> String {
    let mut output = String::new();

    output.push_str("voyages,victories,win_rate,avg_survived,avg_victory_score,avg_items\n");
    output.push_str(&format!(
        "{},{},{:.4},{:.2},{:.2},{:.2}\n",
        stats.voyages,
        stats.victories,
        stats.win_rate(),
        stats.avg_survived(),
        stats.avg_victory_score(),
        stats.avg_items()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use survival::voyage::{VoyageConfig, run_voyage};

    fn voyage(seed: u64) -> VoyageResult {
        run_voyage(&mut StdRng::seed_from_u64(seed), &VoyageConfig::default())
    }

    #[test]
    fn test_voyage_text() {
        let result = voyage(4);
        let text = format_voyage_text(&result, false);
        assert!(text.contains("Day  1:"));
        assert!(text.contains("Voyage Result:"));
        assert!(text.contains("Items used:"));

        let quiet = format_voyage_text(&result, true);
        assert!(!quiet.contains("Day  1:"));
        assert!(quiet.starts_with("Voyage Result:"));
    }

    #[test]
    fn test_voyage_json() {
        let result = voyage(8);
        let json = serde_json::to_value(JsonVoyageResult::from_result(&result)).unwrap();
        assert_eq!(json["survived"], result.survived);
        assert_eq!(json["days"].as_array().unwrap().len(), result.days.len());
        if result.is_victory() {
            assert_eq!(json["outcome"], "victory");
            assert!(json["cause"].is_null());
        } else {
            assert_eq!(json["outcome"], "lost");
            assert!(json["cause"].is_string());
        }
    }

    #[test]
    fn test_batch_formats() {
        let mut stats = VoyageStats::new();
        for seed in 0..10 {
            stats.add(&voyage(seed));
        }

        let text = format_batch_text(&stats);
        assert!(text.starts_with("Batch Results (10 voyages)"));

        let csv = format_batch_csv(&stats);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("10,"));

        let json = serde_json::to_value(JsonBatchResult::from_stats(&stats)).unwrap();
        assert_eq!(json["voyages"], 10);
    }
}
