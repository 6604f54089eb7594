//! The match driver: runs the per-minute trial grid over a strength-adjusted
//! odds table, expands triggered draws through the cascade resolver and tallies
//! the outcome.

use ordinalizer::Ordinal;
use strum::EnumCount;
use tinyrand::Rand;
use tracing::trace;

use crate::cascade::{self, CascadeConfig};
use crate::domain::{EventCategory, MatchEvent, Score, Side};
use crate::odds::{OddsTable, MINUTES_PER_MATCH};
use crate::probs::SliceExt;
use crate::random;
use crate::roster::Team;

/// Independent event trials drawn for every minute of the match.
pub const TRIALS_PER_MINUTE: usize = 135;

/// Substitutions counted per side; draws beyond the cap still reach the event
/// log but not the tallies.
pub const MAX_SUBSTITUTIONS: u32 = 3;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub trials_per_minute: usize,
    pub max_substitutions: u32,
    pub cascade: CascadeConfig,
}
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trials_per_minute: TRIALS_PER_MINUTE,
            max_substitutions: MAX_SUBSTITUTIONS,
            cascade: CascadeConfig::default(),
        }
    }
}

/// Per-side event counts, indexed by category ordinal.
#[derive(Clone, Debug, Default)]
pub struct Tally {
    counts: [u32; EventCategory::COUNT],
}
impl Tally {
    pub fn count(&self, category: EventCategory) -> u32 {
        self.counts[category.ordinal()]
    }

    fn bump(&mut self, category: EventCategory) {
        self.counts[category.ordinal()] += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult {
    Win { winner: Side },
    Draw,
}
impl MatchResult {
    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchResult::Win { winner } => Some(*winner),
            MatchResult::Draw => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MatchOutcome {
    home: Tally,
    away: Tally,
    events: Vec<MatchEvent>,
}
impl MatchOutcome {
    pub fn tally(&self, side: Side) -> &Tally {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn score(&self) -> Score {
        Score::new(
            self.home.count(EventCategory::Goal) as u16,
            self.away.count(EventCategory::Goal) as u16,
        )
    }

    /// Derived purely from the Goal tallies.
    pub fn result(&self) -> MatchResult {
        let score = self.score();
        if score.home == score.away {
            MatchResult::Draw
        } else if score.home > score.away {
            MatchResult::Win { winner: Side::Home }
        } else {
            MatchResult::Win { winner: Side::Away }
        }
    }

    fn record(&mut self, event: MatchEvent, max_substitutions: u32) {
        let tally = match event.side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        };
        let counted = event.category != EventCategory::Substitution
            || tally.count(EventCategory::Substitution) < max_substitutions;
        if counted {
            tally.bump(event.category);
        }
        trace!(
            "{}' {} {} ({:?})",
            event.minute,
            event.side,
            event.category,
            event.player
        );
        self.events.push(event);
    }
}

/// Simulates one match. The supplied table is cloned and strength-adjusted
/// before the first trial; the caller's table is never touched. Assumes a
/// validated table; malformed odds are a configuration error caught at load
/// time, not here.
pub fn run_match(
    home: &Team,
    away: &Team,
    odds: &OddsTable,
    config: &EngineConfig,
    rand: &mut impl Rand,
) -> MatchOutcome {
    let odds = odds.adjusted(&home.strength, &away.strength);
    let mut outcome = MatchOutcome {
        home: Tally::default(),
        away: Tally::default(),
        events: Vec::new(),
    };

    for minute in 0..MINUTES_PER_MATCH {
        let minute_odds = odds.minute(minute);
        for _ in 0..config.trials_per_minute {
            if !random::chance(minute_odds.any_event, rand) {
                continue;
            }

            let mut side_probs = [minute_odds.home.prob, minute_odds.away.prob];
            side_probs.normalise(1.0);
            let side = if random::chance(side_probs[0], rand) {
                Side::Home
            } else {
                Side::Away
            };

            let index = random::pick_weighted(&minute_odds.side(side).weights, rand);
            let category = odds.categories()[index];
            if category.is_foul_derived() {
                // only reachable through a Foul cascade
                continue;
            }

            let events = cascade::resolve(
                category,
                side,
                minute as u8,
                &odds,
                &home.squad,
                &away.squad,
                &config.cascade,
                rand,
            );
            for event in events {
                outcome.record(event, config.max_substitutions);
            }
        }
    }
    outcome
}
