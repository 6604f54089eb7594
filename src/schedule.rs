//! Round-robin fixture generation by the circle method: a deterministic
//! single-orientation rotation, and the full double round-robin used for a
//! season, whose rounds are deliberately decorrelated from rotation order.

use serde::{Deserialize, Serialize};
use tinyrand::Rand;

use crate::random;

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub home: String,
    pub away: String,
}
impl Fixture {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }
}

/// Fixtures played concurrently in one week.
pub type Round = Vec<Fixture>;

/// Which orientation a rotation pass assigns: the second leg mirrors the
/// first's home advantage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Leg {
    First,
    Second,
}

/// Seat pairings per round of a circle-method rotation over `count` seats
/// (`count` even). Seat 0 is the fixed point; after each round the last seat
/// moves to index 1 and the rest shift along.
fn circle_rounds(count: usize) -> Vec<Vec<(usize, usize)>> {
    if count < 2 {
        return vec![];
    }
    let mid = count / 2;
    let mut seats: Vec<usize> = (0..count).collect();
    let mut rounds = Vec::with_capacity(count - 1);
    for _ in 0..count - 1 {
        let round: Vec<(usize, usize)> = (0..mid)
            .map(|index| (seats[index], seats[count - 1 - index]))
            .collect();
        rounds.push(round);
        if let Some(last) = seats.pop() {
            seats.insert(1, last);
        }
    }
    rounds
}

/// Pads an odd team list with an empty seat so the circle closes; a pairing
/// touching the empty seat is a bye and produces no fixture.
fn pad(teams: &[String]) -> Vec<Option<&String>> {
    let mut padded: Vec<Option<&String>> = teams.iter().map(Some).collect();
    if padded.len() % 2 == 1 {
        padded.push(None);
    }
    padded
}

/// One single-orientation pass: N−1 rounds in rotation order, each team at
/// most once per round. `Leg::Second` flips every pairing's home advantage,
/// so two passes cover every ordered pair exactly once.
pub fn rotation(teams: &[String], leg: Leg) -> Vec<Round> {
    let padded = pad(teams);
    circle_rounds(padded.len())
        .into_iter()
        .map(|round| {
            round
                .into_iter()
                .filter_map(|(first, second)| match (padded[first], padded[second]) {
                    (Some(one), Some(other)) => Some(match leg {
                        Leg::First => Fixture::new(one.clone(), other.clone()),
                        Leg::Second => Fixture::new(other.clone(), one.clone()),
                    }),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

/// A full season's fixtures: the team list is shuffled, each rotation round
/// emits both orientations of its pairings and is shuffled internally, and the
/// flattened fixture list is then reshuffled and re-chunked, preserving the
/// fixtures-per-round count while decorrelating round order from rotation
/// order.
pub fn double_round_robin(teams: &[String], rand: &mut impl Rand) -> Vec<Round> {
    let mut seeded = teams.to_vec();
    random::shuffle(&mut seeded, rand);
    let padded = pad(&seeded);

    let mut rounds: Vec<Round> = Vec::new();
    for pairings in circle_rounds(padded.len()) {
        let mut fixtures = Vec::with_capacity(pairings.len() * 2);
        for (first, second) in pairings {
            if let (Some(one), Some(other)) = (padded[first], padded[second]) {
                fixtures.push(Fixture::new(one.clone(), other.clone()));
                fixtures.push(Fixture::new(other.clone(), one.clone()));
            }
        }
        random::shuffle(&mut fixtures, rand);
        rounds.push(fixtures);
    }

    let round_size = rounds.first().map(Vec::len).unwrap_or(0);
    if round_size == 0 {
        return vec![];
    }
    let mut flattened: Vec<Fixture> = rounds.into_iter().flatten().collect();
    random::shuffle(&mut flattened, rand);
    flattened
        .chunks(round_size)
        .map(<[Fixture]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests;
