//! Orchestrates one league season: team assembly, schedule generation with
//! kickoff annotation, week-by-week match simulation and the standings.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tinyrand::Rand;
use tracing::{debug, info};

use crate::engine::{self, EngineConfig, MatchOutcome};
use crate::kickoff::{self, InvalidKickoff, KickoffConfig, ScheduledFixture};
use crate::odds::OddsTable;
use crate::roster::{InvalidRoster, PlayerRecord, Team};
use crate::schedule::{double_round_robin, Round};
use crate::standings::Standings;

#[derive(Clone, Debug, Default)]
pub struct LeagueConfig {
    pub engine: EngineConfig,
    pub kickoff: KickoffConfig,
}

#[derive(Debug, Error)]
pub enum InvalidLeague {
    #[error("league {league} has no clubs")]
    NoClubs { league: String },

    #[error("fixture {home} v {away} references unknown team {team}")]
    UnknownTeam {
        home: String,
        away: String,
        team: String,
    },

    #[error("{0}")]
    Roster(#[from] InvalidRoster),

    #[error("{0}")]
    Kickoff(#[from] InvalidKickoff),
}

/// One simulated match, as reported by [`League::simulate_week`].
#[derive(Debug)]
pub struct PlayedMatch {
    pub fixture: ScheduledFixture,
    pub outcome: MatchOutcome,
}

#[derive(Debug)]
pub struct League {
    name: String,
    teams: FxHashMap<String, Team>,
    schedule: Vec<Vec<ScheduledFixture>>,
    standings: Standings,
    week: usize,
    odds: OddsTable,
    config: LeagueConfig,
}
impl League {
    /// Builds the teams for every club, generates the double round-robin and
    /// annotates it with kickoff times. Every fixture is checked against the
    /// team map; a mismatch means the schedule generator broke its contract
    /// and is reported rather than deferred to a panic mid-season.
    pub fn new(
        name: impl Into<String>,
        clubs: &[String],
        records: &[PlayerRecord],
        odds: OddsTable,
        config: LeagueConfig,
        rand: &mut impl Rand,
    ) -> Result<League, InvalidLeague> {
        let name = name.into();
        if clubs.is_empty() {
            return Err(InvalidLeague::NoClubs { league: name });
        }

        let mut teams = FxHashMap::default();
        for club in clubs {
            let team = Team::build(club, records, rand)?;
            teams.insert(club.clone(), team);
        }

        let rounds: Vec<Round> = double_round_robin(clubs, rand);
        for fixture in rounds.iter().flatten() {
            for team in [&fixture.home, &fixture.away] {
                if !teams.contains_key(team) {
                    return Err(InvalidLeague::UnknownTeam {
                        home: fixture.home.clone(),
                        away: fixture.away.clone(),
                        team: team.clone(),
                    });
                }
            }
        }
        let schedule = kickoff::assign(&rounds, &config.kickoff)?;

        info!(
            "assembled {name}: {} clubs, {} rounds",
            clubs.len(),
            schedule.len()
        );
        Ok(League {
            name,
            standings: Standings::new(clubs.iter().cloned()),
            teams,
            schedule,
            week: 0,
            odds,
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schedule(&self) -> &[Vec<ScheduledFixture>] {
        &self.schedule
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn weeks(&self) -> usize {
        self.schedule.len()
    }

    /// The next week to be played.
    pub fn week(&self) -> usize {
        self.week
    }

    /// Simulates the next week's fixtures, or returns `None` once the season
    /// is complete.
    pub fn simulate_week(&mut self, rand: &mut impl Rand) -> Option<Vec<PlayedMatch>> {
        let round = self.schedule.get(self.week)?.clone();
        debug!("{}: simulating week {}", self.name, self.week + 1);

        let mut played = Vec::with_capacity(round.len());
        for fixture in round {
            let home = &self.teams[&fixture.home];
            let away = &self.teams[&fixture.away];
            let outcome = engine::run_match(home, away, &self.odds, &self.config.engine, rand);

            let score = outcome.score();
            info!(
                "{} {} - {} {}",
                fixture.home, score.home, score.away, fixture.away
            );
            self.standings.apply(&fixture.home, &fixture.away, &score);
            played.push(PlayedMatch { fixture, outcome });
        }
        self.week += 1;
        Some(played)
    }

    /// Runs every remaining week and returns the total number of matches
    /// simulated.
    pub fn simulate_season(&mut self, rand: &mut impl Rand) -> usize {
        let mut matches = 0;
        while let Some(played) = self.simulate_week(rand) {
            matches += played.len();
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyrand::{Seeded, StdRand};

    use crate::standings::{DRAW_POINTS, WIN_POINTS};

    fn record(name: &str, club: &str, overall: f64, positions: &str) -> PlayerRecord {
        PlayerRecord {
            short_name: name.into(),
            nationality: "Testland".into(),
            club: club.into(),
            overall,
            player_positions: positions.into(),
            gk_diving: None,
            gk_handling: None,
            gk_kicking: None,
            gk_reflexes: None,
            gk_speed: None,
            gk_positioning: None,
        }
    }

    fn records_for(clubs: &[String]) -> Vec<PlayerRecord> {
        let mut records = Vec::new();
        for (club_index, club) in clubs.iter().enumerate() {
            let base = 68.0 + club_index as f64;
            records.push(record(&format!("{club} GK"), club, base + 5.0, "GK"));
            for index in 0..5 {
                records.push(record(
                    &format!("{club} DF{index}"),
                    club,
                    base + index as f64 * 0.5,
                    "CB",
                ));
                records.push(record(
                    &format!("{club} MF{index}"),
                    club,
                    base + index as f64 * 0.5,
                    "CM",
                ));
            }
            for index in 0..3 {
                records.push(record(
                    &format!("{club} AT{index}"),
                    club,
                    base + index as f64,
                    "ST",
                ));
            }
        }
        records
    }

    fn clubs(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("Club {index}")).collect()
    }

    #[test]
    fn full_season_bookkeeping_is_consistent() {
        let clubs = clubs(4);
        let records = records_for(&clubs);
        let mut rand = StdRand::seed(77);
        let mut league = League::new(
            "Testleague",
            &clubs,
            &records,
            OddsTable::baseline(),
            LeagueConfig::default(),
            &mut rand,
        )
        .unwrap();

        let matches = league.simulate_season(&mut rand);
        assert_eq!(4 * 3, matches);
        assert_eq!(league.weeks(), league.week());
        assert!(league.simulate_week(&mut rand).is_none());

        for row in league.standings().rows() {
            // a double round-robin: every club plays all others twice
            assert_eq!(6, row.played);
            assert_eq!(row.played, row.wins + row.draws + row.losses);
            assert_eq!(row.points, WIN_POINTS * row.wins + DRAW_POINTS * row.draws);
        }

        let total_for: u32 = league.standings().rows().iter().map(|row| row.goals_for).sum();
        let total_against: u32 = league
            .standings()
            .rows()
            .iter()
            .map(|row| row.goals_against)
            .sum();
        assert_eq!(total_for, total_against);
    }

    #[test]
    fn week_results_cover_the_round() {
        let clubs = clubs(4);
        let records = records_for(&clubs);
        let mut rand = StdRand::seed(5);
        let mut league = League::new(
            "Testleague",
            &clubs,
            &records,
            OddsTable::baseline(),
            LeagueConfig::default(),
            &mut rand,
        )
        .unwrap();

        let played = league.simulate_week(&mut rand).unwrap();
        assert_eq!(league.schedule()[0].len(), played.len());
        for play in &played {
            assert_eq!(
                play.outcome.score().home as u32,
                play.outcome
                    .events()
                    .iter()
                    .filter(|event| {
                        event.category == crate::domain::EventCategory::Goal
                            && event.side == crate::domain::Side::Home
                    })
                    .count() as u32
            );
        }
    }

    #[test]
    fn empty_club_list_is_rejected() {
        let mut rand = StdRand::seed(5);
        let err = League::new(
            "Ghost league",
            &[],
            &[],
            OddsTable::baseline(),
            LeagueConfig::default(),
            &mut rand,
        )
        .unwrap_err();
        assert_eq!("league Ghost league has no clubs", err.to_string());
    }

    #[test]
    fn missing_roster_is_reported() {
        let clubs = clubs(2);
        let records = records_for(&clubs[..1]);
        let mut rand = StdRand::seed(5);
        let err = League::new(
            "Half league",
            &clubs,
            &records,
            OddsTable::baseline(),
            LeagueConfig::default(),
            &mut rand,
        )
        .unwrap_err();
        assert_eq!("no players found for club Club 1", err.to_string());
    }
}
