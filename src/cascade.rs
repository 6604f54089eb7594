//! Expansion of a top-level event draw into its ordered list of atomic match
//! events: shots cascade through outcome and save/goal resolution, fouls
//! through free kicks and cards. An event's owning side is only final once the
//! whole cascade has resolved, since a save hands the event to the defenders.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use tinyrand::Rand;

use crate::domain::{EventCategory, MatchEvent, Position, Side};
use crate::odds::OddsTable;
use crate::random;
use crate::roster::Squad;

/// Weights for the dependent resolutions of a shot. Both lists are ordered
/// configuration: in particular the Saved/Goal split is data, not a hardcoded
/// index convention.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CascadeConfig {
    pub shot_outcomes: Vec<(EventCategory, f64)>,
    pub on_target_split: Vec<(EventCategory, f64)>,
}
impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            shot_outcomes: vec![
                (EventCategory::OnTarget, 0.33),
                (EventCategory::OffTarget, 0.37),
                (EventCategory::Blocked, 0.24),
                (EventCategory::HitTheBar, 0.06),
            ],
            on_target_split: vec![(EventCategory::Saved, 0.7), (EventCategory::Goal, 0.3)],
        }
    }
}

/// Resolves one candidate event into the full list of atomic events it
/// expands to, with a player attributed to each.
pub fn resolve(
    category: EventCategory,
    side: Side,
    minute: u8,
    odds: &OddsTable,
    home_squad: &Squad,
    away_squad: &Squad,
    config: &CascadeConfig,
    rand: &mut impl Rand,
) -> Vec<MatchEvent> {
    let chain = match category {
        EventCategory::Attempt => resolve_attempt(side, config, rand),
        EventCategory::Foul => resolve_foul(side, minute, odds, rand),
        other => vec![(other, side)],
    };
    attribute_players(chain, minute, home_squad, away_squad, rand)
}

fn resolve_attempt(
    side: Side,
    config: &CascadeConfig,
    rand: &mut impl Rand,
) -> Vec<(EventCategory, Side)> {
    let mut chain = vec![(EventCategory::Attempt, side)];

    let weights: Vec<f64> = config.shot_outcomes.iter().map(|(_, weight)| *weight).collect();
    let (outcome, _) = config.shot_outcomes[random::pick_weighted(&weights, rand)];
    chain.push((outcome, side));

    if outcome == EventCategory::OnTarget {
        let weights: Vec<f64> = config
            .on_target_split
            .iter()
            .map(|(_, weight)| *weight)
            .collect();
        let (result, _) = config.on_target_split[random::pick_weighted(&weights, rand)];
        let owner = if result == EventCategory::Saved {
            side.flip()
        } else {
            side
        };
        chain.push((result, owner));
    }
    chain
}

fn resolve_foul(
    side: Side,
    minute: u8,
    odds: &OddsTable,
    rand: &mut impl Rand,
) -> Vec<(EventCategory, Side)> {
    let mut chain = vec![
        (EventCategory::Foul, side),
        (EventCategory::FreeKickWon, side.flip()),
    ];

    let side_odds = odds.minute(minute as usize).side(side);
    let weight_of = |category| {
        odds.index_of(category)
            .map(|index| side_odds.weights[index])
            .unwrap_or(0.0)
    };
    let foul = weight_of(EventCategory::Foul);
    let (yellow_prob, red_prob) = if foul > 0.0 {
        (
            weight_of(EventCategory::YellowCard) / foul,
            weight_of(EventCategory::RedCard) / foul,
        )
    } else {
        (0.0, 0.0)
    };
    let no_card_prob = (1.0 - yellow_prob - red_prob).max(0.0);

    match random::pick_weighted(&[yellow_prob, red_prob, no_card_prob], rand) {
        0 => chain.push((EventCategory::YellowCard, side)),
        1 => chain.push((EventCategory::RedCard, side)),
        _ => {}
    }
    chain
}

/// One player carries the whole cascade: a position group is drawn uniformly,
/// then a player within it, from the squad of the side that originated the
/// chain. A save is the goalkeeper's alone, so any Saved event is handed to
/// the defending side's keeper instead.
fn attribute_players(
    chain: Vec<(EventCategory, Side)>,
    minute: u8,
    home_squad: &Squad,
    away_squad: &Squad,
    rand: &mut impl Rand,
) -> Vec<MatchEvent> {
    let squad_for = |side| match side {
        Side::Home => home_squad,
        Side::Away => away_squad,
    };

    let origin_squad = squad_for(chain[0].1);
    let positions: Vec<Position> = Position::iter().collect();
    let position = positions[random::pick_uniform(Position::COUNT, rand)];
    let group = origin_squad.group(position);
    let carrier = &group[random::pick_uniform(group.len(), rand)];

    chain
        .into_iter()
        .map(|(category, side)| {
            let player = if category == EventCategory::Saved {
                let keeper = squad_for(side).goalkeeper.first().unwrap_or_else(|| {
                    panic!("no goalkeeper in the {side} squad")
                });
                keeper.name.clone()
            } else {
                carrier.name.clone()
            };
            MatchEvent {
                minute,
                category,
                side,
                player: Some(player),
            }
        })
        .collect()
}
