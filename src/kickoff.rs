//! Kickoff-slot assignment: every fixture receives a time from a finite
//! catalogue, keeping each team's kickoffs at least a buffer apart where the
//! catalogue allows it and degrading gracefully where it does not.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schedule::{Fixture, Round};

/// Minimum separation between two kickoff times involving a shared team.
pub const DEFAULT_BUFFER: u16 = 5;

/// Kickoff times as minutes of the day, 12:00 through 21:00.
pub const DEFAULT_CATALOGUE: &[u16] = &[720, 810, 900, 990, 1080, 1170, 1260];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KickoffConfig {
    /// Ordered catalogue of assignable times.
    pub catalogue: Vec<u16>,
    pub buffer: u16,
}
impl Default for KickoffConfig {
    fn default() -> Self {
        Self {
            catalogue: DEFAULT_CATALOGUE.to_vec(),
            buffer: DEFAULT_BUFFER,
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFixture {
    pub home: String,
    pub away: String,
    pub kickoff: u16,
}
impl ScheduledFixture {
    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }
}

#[derive(Debug, Error)]
pub enum InvalidKickoff {
    #[error("kickoff catalogue is empty")]
    EmptyCatalogue,
}

/// Annotates every fixture with a kickoff time. Candidate times are tried in
/// three tiers, each only when the previous one is empty: all catalogue times
/// a buffer clear of both teams' existing assignments; all times avoiding an
/// exact collision; and finally the time violating the buffer against the
/// fewest assignments, earlier catalogue entries winning ties. The reverse
/// pairing's time is excluded wherever its return leg landed, and each
/// round's output is sorted by kickoff ascending.
pub fn assign(
    rounds: &[Round],
    config: &KickoffConfig,
) -> Result<Vec<Vec<ScheduledFixture>>, InvalidKickoff> {
    if config.catalogue.is_empty() {
        return Err(InvalidKickoff::EmptyCatalogue);
    }

    let mut team_times: FxHashMap<String, Vec<u16>> = FxHashMap::default();
    let mut pairing_times: FxHashMap<(String, String), u16> = FxHashMap::default();

    let mut scheduled_rounds = Vec::with_capacity(rounds.len());
    for round in rounds {
        let mut scheduled_round = Vec::with_capacity(round.len());
        for fixture in round {
            let exclude = pairing_times
                .get(&(fixture.away.clone(), fixture.home.clone()))
                .copied();
            let kickoff = choose(fixture, exclude, &team_times, config);

            team_times
                .entry(fixture.home.clone())
                .or_default()
                .push(kickoff);
            team_times
                .entry(fixture.away.clone())
                .or_default()
                .push(kickoff);
            pairing_times.insert((fixture.home.clone(), fixture.away.clone()), kickoff);

            scheduled_round.push(ScheduledFixture {
                home: fixture.home.clone(),
                away: fixture.away.clone(),
                kickoff,
            });
        }
        scheduled_round.sort_by_key(|fixture| fixture.kickoff);
        scheduled_rounds.push(scheduled_round);
    }
    Ok(scheduled_rounds)
}

fn choose(
    fixture: &Fixture,
    exclude: Option<u16>,
    team_times: &FxHashMap<String, Vec<u16>>,
    config: &KickoffConfig,
) -> u16 {
    let taken: Vec<u16> = [&fixture.home, &fixture.away]
        .into_iter()
        .flat_map(|team| team_times.get(team).into_iter().flatten())
        .copied()
        .collect();
    let candidates = || {
        config
            .catalogue
            .iter()
            .copied()
            .filter(|&time| exclude != Some(time))
    };

    // strict: a full buffer clear of everything already assigned
    if let Some(time) =
        candidates().find(|&time| taken.iter().all(|&other| time.abs_diff(other) >= config.buffer))
    {
        return time;
    }

    // relaxed: merely avoid exact collisions
    if let Some(time) = candidates().find(|&time| !taken.contains(&time)) {
        return time;
    }

    // least-conflicting: fewest buffer violations, catalogue order breaking ties
    candidates()
        .min_by_key(|&time| {
            taken
                .iter()
                .filter(|&&other| time.abs_diff(other) < config.buffer)
                .count()
        })
        .unwrap_or(config.catalogue[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyrand::{Seeded, StdRand};

    use crate::schedule::{double_round_robin, Fixture};

    fn teams(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("Team {index}")).collect()
    }

    fn config(catalogue: &[u16], buffer: u16) -> KickoffConfig {
        KickoffConfig {
            catalogue: catalogue.to_vec(),
            buffer,
        }
    }

    #[test]
    fn ample_catalogue_respects_the_buffer_everywhere() {
        let teams = teams(4);
        let mut rand = StdRand::seed(8);
        let rounds = double_round_robin(&teams, &mut rand);
        let catalogue: Vec<u16> = (0..30).map(|slot| slot * 10).collect();
        let scheduled = assign(&rounds, &config(&catalogue, 5)).unwrap();

        for team in &teams {
            let mut times: Vec<u16> = scheduled
                .iter()
                .flatten()
                .filter(|fixture| fixture.involves(team))
                .map(|fixture| fixture.kickoff)
                .collect();
            times.sort_unstable();
            for pair in times.windows(2) {
                assert!(
                    pair[1] - pair[0] >= 5,
                    "{team} kicks off at {} and {}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn starved_catalogue_still_schedules_everything() {
        let teams = teams(6);
        let mut rand = StdRand::seed(21);
        let rounds = double_round_robin(&teams, &mut rand);
        let total: usize = rounds.iter().map(Vec::len).sum();
        let scheduled = assign(&rounds, &config(&[100], 5)).unwrap();

        let assigned: usize = scheduled.iter().map(Vec::len).sum();
        assert_eq!(total, assigned);
        assert!(scheduled
            .iter()
            .flatten()
            .all(|fixture| fixture.kickoff == 100));
    }

    #[test]
    fn return_leg_avoids_the_first_leg_time() {
        let rounds = vec![vec![
            Fixture::new("A", "B"),
            Fixture::new("B", "A"),
        ]];
        let scheduled = assign(&rounds, &config(&[10, 20], 50)).unwrap();

        let times: Vec<u16> = scheduled[0].iter().map(|fixture| fixture.kickoff).collect();
        assert_eq!(vec![10, 20], times);
    }

    #[test]
    fn return_leg_excluded_across_rounds() {
        let rounds = vec![
            vec![Fixture::new("A", "B")],
            vec![Fixture::new("B", "A")],
        ];
        let scheduled = assign(&rounds, &config(&[10, 20], 1)).unwrap();
        assert_ne!(scheduled[0][0].kickoff, scheduled[1][0].kickoff);
    }

    #[test]
    fn rounds_are_sorted_by_kickoff() {
        let teams = teams(8);
        let mut rand = StdRand::seed(30);
        let rounds = double_round_robin(&teams, &mut rand);
        let catalogue: Vec<u16> = (0..60).map(|slot| slot * 7).collect();
        let scheduled = assign(&rounds, &config(&catalogue, 5)).unwrap();

        for round in &scheduled {
            for pair in round.windows(2) {
                assert!(pair[0].kickoff <= pair[1].kickoff);
            }
        }
    }

    #[test]
    fn single_slot_catalogue_reuses_the_slot_for_the_return_leg() {
        let rounds = vec![vec![
            Fixture::new("A", "B"),
            Fixture::new("B", "A"),
        ]];
        let scheduled = assign(&rounds, &config(&[45], 5)).unwrap();
        assert_eq!(2, scheduled[0].len());
        assert!(scheduled[0].iter().all(|fixture| fixture.kickoff == 45));
    }

    #[test]
    fn empty_catalogue_is_rejected() {
        let rounds = vec![vec![Fixture::new("A", "B")]];
        let err = assign(&rounds, &config(&[], 5)).unwrap_err();
        assert_eq!("kickoff catalogue is empty", err.to_string());
    }
}
