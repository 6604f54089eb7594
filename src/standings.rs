use serde::{Deserialize, Serialize};

use crate::domain::Score;

pub const WIN_POINTS: u32 = 3;
pub const DRAW_POINTS: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub club: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
}
impl Record {
    fn new(club: String) -> Record {
        Record {
            club,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            points: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
        }
    }

    fn absorb(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference += scored as i32 - conceded as i32;
        if scored > conceded {
            self.wins += 1;
            self.points += WIN_POINTS;
        } else if scored < conceded {
            self.losses += 1;
        } else {
            self.draws += 1;
            self.points += DRAW_POINTS;
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Standings {
    rows: Vec<Record>,
}
impl Standings {
    pub fn new(clubs: impl IntoIterator<Item = String>) -> Standings {
        Standings {
            rows: clubs.into_iter().map(Record::new).collect(),
        }
    }

    /// Rows in table order: points descending, goal difference descending,
    /// goals-for descending.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Feeds one final score into both clubs' records and re-sorts the table.
    /// The clubs must have been registered at construction.
    pub fn apply(&mut self, home: &str, away: &str, score: &Score) {
        self.row_mut(home).absorb(score.home as u32, score.away as u32);
        self.row_mut(away).absorb(score.away as u32, score.home as u32);
        self.rows.sort_by(|one, other| {
            other
                .points
                .cmp(&one.points)
                .then(other.goal_difference.cmp(&one.goal_difference))
                .then(other.goals_for.cmp(&one.goals_for))
        });
    }

    fn row_mut(&mut self, club: &str) -> &mut Record {
        self.rows
            .iter_mut()
            .find(|row| row.club == club)
            .unwrap_or_else(|| panic!("no standings row for {club}"))
    }
}
