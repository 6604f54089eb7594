use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter};

/// The closed set of event categories a match can produce. Display names double
/// as the key names used by the odds configuration, so a category is never
/// spelled twice.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Ordinal,
    EnumCount,
    EnumIter,
    Display,
    Serialize,
    Deserialize,
)]
pub enum EventCategory {
    Attempt,
    #[strum(serialize = "On target")]
    #[serde(rename = "On target")]
    OnTarget,
    #[strum(serialize = "Off target")]
    #[serde(rename = "Off target")]
    OffTarget,
    Blocked,
    #[strum(serialize = "Hit the bar")]
    #[serde(rename = "Hit the bar")]
    HitTheBar,
    Saved,
    Goal,
    Foul,
    #[strum(serialize = "Free kick won")]
    #[serde(rename = "Free kick won")]
    FreeKickWon,
    #[strum(serialize = "Yellow card")]
    #[serde(rename = "Yellow card")]
    YellowCard,
    #[strum(serialize = "Second yellow card")]
    #[serde(rename = "Second yellow card")]
    SecondYellowCard,
    #[strum(serialize = "Red card")]
    #[serde(rename = "Red card")]
    RedCard,
    Substitution,
    Corner,
    Offside,
}
impl EventCategory {
    /// Categories that only arise as sub-steps of a Foul cascade. They may sit
    /// in the odds table's key set, but a top-level draw landing on one is
    /// discarded rather than expanded.
    pub fn is_foul_derived(&self) -> bool {
        matches!(
            self,
            EventCategory::FreeKickWon
                | EventCategory::YellowCard
                | EventCategory::SecondYellowCard
                | EventCategory::RedCard
        )
    }
}

#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
pub enum Side {
    Home,
    Away,
}
impl Side {
    pub fn flip(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Position groups a squad is organised into.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Ordinal,
    EnumCount,
    EnumIter,
    Display,
    Serialize,
    Deserialize,
)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

/// Aggregate strength scalars derived from a team's player pool. Owned by the
/// roster collaborator; read-only to the simulation core.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamStrength {
    pub attack: f64,
    pub midfield: f64,
    pub defence: f64,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u16,
    pub away: u16,
}
impl Score {
    pub fn new(home: u16, away: u16) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn total(&self) -> u16 {
        self.home + self.away
    }
}

/// One atomic event in a match's log. Created by the cascade resolver and
/// immutable afterwards; the `side` field is only final once the full cascade
/// has been resolved (a save flips ownership to the defending side).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub minute: u8,
    pub category: EventCategory,
    pub side: Side,
    pub player: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn side_flip() {
        assert_eq!(Side::Away, Side::Home.flip());
        assert_eq!(Side::Home, Side::Away.flip());
    }

    #[test]
    fn category_names_match_config_keys() {
        assert_eq!("On target", EventCategory::OnTarget.to_string());
        assert_eq!("Hit the bar", EventCategory::HitTheBar.to_string());
        assert_eq!("Free kick won", EventCategory::FreeKickWon.to_string());
        assert_eq!(
            "Second yellow card",
            EventCategory::SecondYellowCard.to_string()
        );
        assert_eq!("Substitution", EventCategory::Substitution.to_string());
    }

    #[test]
    fn foul_derived_categories() {
        let derived: Vec<_> = EventCategory::iter()
            .filter(EventCategory::is_foul_derived)
            .collect();
        assert_eq!(
            vec![
                EventCategory::FreeKickWon,
                EventCategory::YellowCard,
                EventCategory::SecondYellowCard,
                EventCategory::RedCard
            ],
            derived
        );
    }

    #[test]
    fn score_total() {
        assert_eq!(0, Score::nil_all().total());
        assert_eq!(5, Score::new(3, 2).total());
    }
}
