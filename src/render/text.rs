//! Plain-text status report, for logs and non-interactive output.

// Allow format! with push_str for readability - the allocation overhead is negligible for text rendering
#![allow(clippy::format_push_string)]

use crate::game::{GameState, Tier};
use crate::render::Hud;

const BAR_WIDTH: usize = 20;

/// Render the state as a short multi-line report.
///
/// Output format:
/// ```text
/// Day 3 | Disasters 2/25 | Afloat
///   Health  [#################---]  85%
///   Sanity  [#############-------]  65%
///   Food    [################----]  80%
///   Water   [######--------------]  30% !
///   Ship    [####################] 100%
///   Stores: medical kit x1, repair kit x1, emergency ration x2, fresh water x3
///   Last disaster: Navigation Failure (lost)
/// ```
#[must_use]
pub fn render_text(state: &GameState) -> String {
    let hud = Hud::project(state);
    let mut output = String::new();

    let status = if state.alive { "Afloat" } else { "Lost" };
    output.push_str(&format!(
        "Day {} | Disasters {} | {status}\n",
        hud.day,
        hud.progress()
    ));

    for bar in hud.bars {
        output.push_str(&format!(
            "  {:<7} [{}] {:>4}{}\n",
            bar.resource.label(),
            bar_glyphs(bar.value),
            bar.text(),
            tier_marker(bar.tier)
        ));
    }

    let stores: Vec<String> = hud
        .items
        .iter()
        .map(|slot| format!("{} x{}", slot.kind, slot.count))
        .collect();
    output.push_str(&format!("  Stores: {}\n", stores.join(", ")));

    if let Some(current) = state.current_disaster {
        output.push_str(&format!(
            "  Last disaster: {} ({})\n",
            current.disaster.name,
            current.disaster.category.tag()
        ));
    }

    output
}

/// Fixed-width bar for a 0-100 value.
fn bar_glyphs(value: u8) -> String {
    let filled = usize::from(value.min(100)) * BAR_WIDTH / 100;
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(BAR_WIDTH - filled));
    bar
}

const fn tier_marker(tier: Tier) -> &'static str {
    match tier {
        Tier::Normal => "",
        Tier::Warning => " !",
        Tier::Critical => " !!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::find;

    #[test]
    fn test_bar_glyphs() {
        assert_eq!(bar_glyphs(100), "#".repeat(20));
        assert_eq!(bar_glyphs(0), "-".repeat(20));
        assert_eq!(bar_glyphs(50), format!("{}{}", "#".repeat(10), "-".repeat(10)));
    }

    #[test]
    fn test_render_text_fresh() {
        let output = render_text(&GameState::new());
        assert!(output.starts_with("Day 1 | Disasters 0/25 | Afloat"));
        assert!(output.contains("Health"));
        assert!(output.contains("medical kit x1"));
        assert!(output.contains("fresh water x3"));
        assert!(!output.contains("Last disaster"));
        assert!(!output.contains('!'));
    }

    #[test]
    fn test_render_text_after_disaster() {
        let mut game = GameState::new();
        game.strike(find("Water Shortage").unwrap());
        game.strike(find("Navigation Failure").unwrap());

        let output = render_text(&game);
        assert!(output.contains("Day 3 | Disasters 2/25"));
        assert!(output.contains("Last disaster: Navigation Failure (lost)"));
        assert!(output.contains(" 30% !\n"));
    }

    #[test]
    fn test_render_text_lost() {
        let mut game = GameState::new();
        game.levels.health = 5;
        game.strike(find("Toxic Spill").unwrap());

        let output = render_text(&game);
        assert!(output.contains("| Lost"));
        assert!(output.contains("  0% !!"));
    }
}
