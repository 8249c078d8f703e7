//! Read-side aggregation over scanned ledger rows. Everything here is a
//! pure function of its input; there are no counters kept anywhere else
//! that could drift from the records themselves.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;
use types::MatchResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub wins: u64,
    pub losses: u64,
    pub total: u64,
}

impl Summary {
    pub fn record(&mut self, result: MatchResult) {
        self.total += 1;
        match result {
            MatchResult::Win => self.wins += 1,
            MatchResult::Loss => self.losses += 1,
        }
    }

    /// Percentage of wins. An empty summary rates 0.0 rather than dividing
    /// by zero. Unrounded; user-facing rendering trims to one decimal.
    pub fn win_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.wins as f64 / self.total as f64 * 100.0
        }
    }
}

pub fn overall(results: impl IntoIterator<Item = MatchResult>) -> Summary {
    let mut summary = Summary::default();
    for result in results {
        summary.record(result);
    }
    summary
}

/// Groups one player's outcomes by the opponent-deck string exactly as
/// stored, so renamed archetypes show up as separate groups.
pub fn by_opponent_deck(
    pairs: impl IntoIterator<Item = (String, MatchResult)>,
) -> BTreeMap<String, Summary> {
    pairs
        .into_iter()
        .into_group_map()
        .into_iter()
        .map(|(deck, results)| (deck, overall(results)))
        .collect()
}

/// How often each opponent deck shows up across the given records.
pub fn deck_distribution(decks: impl IntoIterator<Item = String>) -> BTreeMap<String, u64> {
    decks
        .into_iter()
        .counts()
        .into_iter()
        .map(|(deck, count)| (deck, count as u64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::MatchResult::{Loss, Win};

    #[test]
    fn overall_of_nothing_is_all_zeros() {
        let summary = overall([]);
        assert_eq!(summary.wins, 0);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.win_rate(), 0.0);
    }

    #[test]
    fn overall_counts_wins_losses_and_rate() {
        let summary = overall([Win, Win, Loss]);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.total, 3);
        assert!((summary.win_rate() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn by_opponent_deck_groups_on_the_stored_string() {
        let breakdown = by_opponent_deck([
            ("Control".to_string(), Win),
            ("Control".to_string(), Loss),
            ("Aggro".to_string(), Win),
        ]);

        assert_eq!(breakdown.len(), 2);
        let control = &breakdown["Control"];
        assert_eq!((control.total, control.wins, control.losses), (2, 1, 1));
        assert_eq!(control.win_rate(), 50.0);
        let aggro = &breakdown["Aggro"];
        assert_eq!((aggro.total, aggro.wins, aggro.losses), (1, 1, 0));
        assert_eq!(aggro.win_rate(), 100.0);
    }

    #[test]
    fn drifted_names_stay_separate_groups() {
        let breakdown = by_opponent_deck([
            ("Control".to_string(), Win),
            ("control".to_string(), Loss),
        ]);
        assert_eq!(breakdown.len(), 2);
    }

    #[test]
    fn deck_distribution_counts_each_appearance() {
        let counts = deck_distribution(
            ["Aggro", "Control", "Aggro"].map(String::from),
        );
        assert_eq!(counts["Aggro"], 2);
        assert_eq!(counts["Control"], 1);
    }
}
