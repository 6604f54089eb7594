//! The per-minute odds table consumed by the match engine, its validation, and
//! the team-strength adjustment applied to a private copy before every match.

use std::collections::HashMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::domain::{EventCategory, Side, TeamStrength};

/// A match is simulated over this many one-minute intervals (regulation time
/// plus stoppage).
pub const MINUTES_PER_MATCH: usize = 100;

/// Exponent applied to the defensive-factor ratio when rescaling the
/// opponent's attempt weight.
pub const DEFENSIVE_EXPONENT: f64 = 2.33;

/// One minute's odds as read from configuration. Field names follow the
/// configuration document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MinuteConfig {
    /// Probability that any single trial in this minute produces an event.
    #[serde(rename = "Event")]
    pub event: f64,
    #[serde(rename = "Home")]
    pub home: SideConfig,
    #[serde(rename = "Away")]
    pub away: SideConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SideConfig {
    /// Relative probability of this side owning a triggered event.
    #[serde(rename = "Probability")]
    pub probability: f64,
    /// Category weights for this side in this minute. The key set defines the
    /// drawable categories; it must be identical across all minutes and sides.
    #[serde(rename = "Events")]
    pub events: HashMap<EventCategory, f64>,
}

#[derive(Clone, Debug)]
pub struct SideOdds {
    pub prob: f64,
    /// Weights aligned with [`OddsTable::categories`].
    pub weights: Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct MinuteOdds {
    pub any_event: f64,
    pub home: SideOdds,
    pub away: SideOdds,
}
impl MinuteOdds {
    pub fn side(&self, side: Side) -> &SideOdds {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

#[derive(Debug, Error)]
pub enum InvalidOdds {
    #[error("expected {expected} minutes, got {actual}")]
    WrongMinuteCount { expected: usize, actual: usize },

    #[error("no event categories at minute 0 for Home")]
    EmptyCategories,

    #[error("category set at minute {minute} for {side} differs from minute 0")]
    CategoryMismatch { minute: usize, side: Side },

    #[error("negative weight {weight} for {category} at minute {minute} for {side}")]
    NegativeWeight {
        minute: usize,
        side: Side,
        category: EventCategory,
        weight: f64,
    },

    #[error("probability {value} out of range for {name} at minute {minute}")]
    ProbabilityOutOfRange {
        minute: usize,
        name: &'static str,
        value: f64,
    },

    #[error("sides cannot both carry zero probability at minute {minute}")]
    DeadSides { minute: usize },

    #[error("card weights {cards} exceed foul weight {foul} at minute {minute} for {side}")]
    CardWeightsExceedFoul {
        minute: usize,
        side: Side,
        cards: f64,
        foul: f64,
    },

    #[error("required category {category} missing from the odds table")]
    MissingCategory { category: EventCategory },
}

/// Validated per-minute odds. The category list is taken from the
/// configuration's key set, ordered canonically; per-side weight vectors are
/// index-aligned with it. Consumers that need per-match mutation clone the
/// whole table; the loaded instance is never written again.
#[derive(Clone, Debug)]
pub struct OddsTable {
    categories: Vec<EventCategory>,
    category_index: FxHashMap<EventCategory, usize>,
    minutes: Vec<MinuteOdds>,
}
impl OddsTable {
    pub fn from_config(config: Vec<MinuteConfig>) -> Result<OddsTable, InvalidOdds> {
        if config.len() != MINUTES_PER_MATCH {
            return Err(InvalidOdds::WrongMinuteCount {
                expected: MINUTES_PER_MATCH,
                actual: config.len(),
            });
        }

        let key_set = &config[0].home.events;
        let categories: Vec<EventCategory> = EventCategory::iter()
            .filter(|category| key_set.contains_key(category))
            .collect();
        if categories.is_empty() {
            return Err(InvalidOdds::EmptyCategories);
        }
        if !categories.contains(&EventCategory::Attempt) {
            return Err(InvalidOdds::MissingCategory {
                category: EventCategory::Attempt,
            });
        }
        let category_index: FxHashMap<EventCategory, usize> = categories
            .iter()
            .enumerate()
            .map(|(index, &category)| (category, index))
            .collect();

        let mut minutes = Vec::with_capacity(config.len());
        for (minute, entry) in config.iter().enumerate() {
            check_probability(minute, "Event", entry.event)?;
            let home = convert_side(minute, Side::Home, &entry.home, &categories)?;
            let away = convert_side(minute, Side::Away, &entry.away, &categories)?;
            if home.prob + away.prob <= 0.0 {
                return Err(InvalidOdds::DeadSides { minute });
            }
            minutes.push(MinuteOdds {
                any_event: entry.event,
                home,
                away,
            });
        }

        Ok(OddsTable {
            categories,
            category_index,
            minutes,
        })
    }

    /// The built-in table used when no odds file is supplied: flat across
    /// minutes, symmetric between the sides.
    pub fn baseline() -> OddsTable {
        let events: HashMap<EventCategory, f64> = BASELINE_EVENTS.iter().copied().collect();
        let minute = MinuteConfig {
            event: BASELINE_ANY_EVENT,
            home: SideConfig {
                probability: BASELINE_SIDE_PROB,
                events: events.clone(),
            },
            away: SideConfig {
                probability: BASELINE_SIDE_PROB,
                events,
            },
        };
        let config = vec![minute; MINUTES_PER_MATCH];
        Self::from_config(config).unwrap_or_else(|err| panic!("invalid baseline odds: {err}"))
    }

    pub fn categories(&self) -> &[EventCategory] {
        &self.categories
    }

    pub fn index_of(&self, category: EventCategory) -> Option<usize> {
        self.category_index.get(&category).copied()
    }

    pub fn minute(&self, minute: usize) -> &MinuteOdds {
        &self.minutes[minute]
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    /// Returns a copy of this table with each side's attempt weight divided by
    /// the opposing side's defensive factor `(defence² × midfield) /
    /// (attack_opp² × midfield_opp)` raised to [`DEFENSIVE_EXPONENT`]. A side
    /// whose defence and midfield outweigh the opponent's attack and midfield
    /// therefore sees the opponent attempt strictly less often. `self` is left
    /// untouched.
    pub fn adjusted(&self, home: &TeamStrength, away: &TeamStrength) -> OddsTable {
        let home_factor = defensive_factor(home, away);
        let away_factor = defensive_factor(away, home);
        debug_assert!(home_factor.is_finite() && home_factor > 0.0);
        debug_assert!(away_factor.is_finite() && away_factor > 0.0);

        let attempt = self.category_index[&EventCategory::Attempt];
        let mut adjusted = self.clone();
        for minute in &mut adjusted.minutes {
            minute.home.weights[attempt] /= away_factor.powf(DEFENSIVE_EXPONENT);
            minute.away.weights[attempt] /= home_factor.powf(DEFENSIVE_EXPONENT);
        }
        adjusted
    }
}

fn defensive_factor(own: &TeamStrength, opponent: &TeamStrength) -> f64 {
    (own.defence.powi(2) * own.midfield) / (opponent.attack.powi(2) * opponent.midfield)
}

fn check_probability(minute: usize, name: &'static str, value: f64) -> Result<(), InvalidOdds> {
    if !(0.0..=1.0).contains(&value) || !value.is_finite() {
        return Err(InvalidOdds::ProbabilityOutOfRange {
            minute,
            name,
            value,
        });
    }
    Ok(())
}

fn convert_side(
    minute: usize,
    side: Side,
    config: &SideConfig,
    categories: &[EventCategory],
) -> Result<SideOdds, InvalidOdds> {
    check_probability(
        minute,
        match side {
            Side::Home => "Home.Probability",
            Side::Away => "Away.Probability",
        },
        config.probability,
    )?;

    if config.events.len() != categories.len() {
        return Err(InvalidOdds::CategoryMismatch { minute, side });
    }
    let mut weights = Vec::with_capacity(categories.len());
    for &category in categories {
        let weight = *config
            .events
            .get(&category)
            .ok_or(InvalidOdds::CategoryMismatch { minute, side })?;
        if weight < 0.0 || !weight.is_finite() {
            return Err(InvalidOdds::NegativeWeight {
                minute,
                side,
                category,
                weight,
            });
        }
        weights.push(weight);
    }

    // the card ratios P(Yellow|Foul) and P(Red|Foul) must form a probability
    if let Some(&foul) = config.events.get(&EventCategory::Foul) {
        let cards = config
            .events
            .get(&EventCategory::YellowCard)
            .copied()
            .unwrap_or(0.0)
            + config
                .events
                .get(&EventCategory::RedCard)
                .copied()
                .unwrap_or(0.0);
        if cards > foul {
            return Err(InvalidOdds::CardWeightsExceedFoul {
                minute,
                side,
                cards,
                foul,
            });
        }
    }

    Ok(SideOdds {
        prob: config.probability,
        weights,
    })
}

const BASELINE_ANY_EVENT: f64 = 0.006;
const BASELINE_SIDE_PROB: f64 = 0.5;
const BASELINE_EVENTS: &[(EventCategory, f64)] = &[
    (EventCategory::Attempt, 26.0),
    (EventCategory::Foul, 22.0),
    (EventCategory::FreeKickWon, 20.0),
    (EventCategory::YellowCard, 3.5),
    (EventCategory::SecondYellowCard, 0.2),
    (EventCategory::RedCard, 0.2),
    (EventCategory::Substitution, 5.5),
    (EventCategory::Corner, 10.0),
    (EventCategory::Offside, 4.0),
];
