//! Final results of a finished game.

use super::scoring::{ScoringMode, Territory};
use super::seats::Roster;
use super::types::{Claim, PlayerId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Scores and history of a completed game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Reported score per seat, under `mode`.
    scores: BTreeMap<PlayerId, usize>,
    /// Full territory breakdown per seat.
    territories: BTreeMap<PlayerId, Territory>,
    /// Which figure `scores` reports.
    mode: ScoringMode,
    /// Seats sharing the top score.
    winners: Vec<PlayerId>,
    /// Every successful claim in order.
    history: Vec<Claim>,
}

impl GameOutcome {
    /// Builds the outcome, filling in zero for seats that own nothing.
    pub(crate) fn new(
        roster: &Roster,
        mut territories: BTreeMap<PlayerId, Territory>,
        mode: ScoringMode,
        history: Vec<Claim>,
    ) -> Self {
        for seat in roster.iter() {
            territories.entry(*seat.id()).or_default();
        }

        let scores: BTreeMap<PlayerId, usize> = territories
            .iter()
            .map(|(id, territory)| (*id, mode.score(territory)))
            .collect();

        let best = scores.values().copied().max().unwrap_or(0);
        let winners = scores
            .iter()
            .filter(|(_, score)| **score == best)
            .map(|(id, _)| *id)
            .collect();

        Self {
            scores,
            territories,
            mode,
            winners,
            history,
        }
    }

    /// Score reported for `player`.
    pub fn score(&self, player: PlayerId) -> usize {
        self.scores.get(&player).copied().unwrap_or(0)
    }

    /// True when more than one seat shares the top score.
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }

    /// Human-readable score summary.
    pub fn summary(&self, roster: &Roster) -> String {
        let mut out = format!("Final scores ({}):\n", self.mode);
        for (id, score) in &self.scores {
            let territory = self.territories.get(id).copied().unwrap_or_default();
            let _ = writeln!(
                out,
                "  {} '{}': {} (largest {}, total {}, {} components)",
                roster.name(*id),
                roster.marker(*id),
                score,
                territory.largest(),
                territory.total(),
                territory.components(),
            );
        }
        let names: Vec<String> = self.winners.iter().map(|id| roster.name(*id)).collect();
        if self.is_tie() {
            let _ = write!(out, "Tie between {}", names.join(", "));
        } else {
            let _ = write!(out, "Winner: {}", names.join(", "));
        }
        out
    }
}
