//! Player parsing and team assembly: position classification, strength-scalar
//! aggregation and formation-driven squad selection.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tinyrand::Rand;

use crate::domain::{Position, TeamStrength};
use crate::random;

/// One row of the players dataset. Unknown columns are ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub short_name: String,
    pub nationality: String,
    pub club: String,
    pub overall: f64,
    pub player_positions: String,
    #[serde(default)]
    pub gk_diving: Option<f64>,
    #[serde(default)]
    pub gk_handling: Option<f64>,
    #[serde(default)]
    pub gk_kicking: Option<f64>,
    #[serde(default)]
    pub gk_reflexes: Option<f64>,
    #[serde(default)]
    pub gk_speed: Option<f64>,
    #[serde(default)]
    pub gk_positioning: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Starter,
    Substitute,
    Reserve,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub nationality: String,
    pub overall: f64,
    /// Goalkeeping rating: mean of the present gk_* attributes, 0 otherwise.
    pub keeping: f64,
    pub position: Position,
    pub status: Status,
}
impl Player {
    pub fn from_record(record: &PlayerRecord) -> Player {
        Player {
            name: record.short_name.clone(),
            nationality: record.nationality.clone(),
            overall: record.overall,
            keeping: keeping_rating(record),
            position: classify_position(&record.player_positions),
            status: Status::Reserve,
        }
    }
}

/// Classifies a player from the first code in the dataset's comma-separated
/// position list: a 'B' marks a defender, otherwise 'M' a midfielder,
/// otherwise 'S'/'F'/'W' an attacker; anything left is a goalkeeper.
fn classify_position(codes: &str) -> Position {
    let main = codes.split(',').next().unwrap_or_default().trim();
    if main.contains('B') {
        Position::Defender
    } else if main.contains('M') {
        Position::Midfielder
    } else if main.contains('S') || main.contains('F') || main.contains('W') {
        Position::Attacker
    } else {
        Position::Goalkeeper
    }
}

fn keeping_rating(record: &PlayerRecord) -> f64 {
    let attributes = [
        record.gk_diving,
        record.gk_handling,
        record.gk_kicking,
        record.gk_reflexes,
        record.gk_speed,
        record.gk_positioning,
    ];
    let present: Vec<f64> = attributes.into_iter().flatten().collect();
    if present.is_empty() {
        0.0
    } else {
        (present.iter().sum::<f64>() / present.len() as f64).floor()
    }
}

/// Starting-eleven counts per outfield position group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub defenders: usize,
    pub midfielders: usize,
    pub attackers: usize,
}

const FORMATIONS: &[[usize; 3]] = &[
    [4, 4, 2],
    [4, 3, 3],
    [3, 5, 2],
    [5, 3, 2],
    [4, 5, 1],
    [3, 4, 3],
];

const MANAGER_NAMES: &[&str] = &[
    "T. Albrecht",
    "R. Castellano",
    "J. Duarte",
    "M. Eriksen",
    "P. Ferreira",
    "A. Kovacs",
    "D. Martens",
    "L. Ricci",
    "S. Okafor",
    "H. Vermeulen",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Manager {
    pub name: String,
    pub formation: Formation,
}
impl Manager {
    /// Each formation axis is drawn independently from the catalogue, so the
    /// resulting shape need not be any single catalogued formation.
    pub fn random(rand: &mut impl Rand) -> Manager {
        Manager {
            name: MANAGER_NAMES[random::pick_uniform(MANAGER_NAMES.len(), rand)].into(),
            formation: Formation {
                defenders: FORMATIONS[random::pick_uniform(FORMATIONS.len(), rand)][0],
                midfielders: FORMATIONS[random::pick_uniform(FORMATIONS.len(), rand)][1],
                attackers: FORMATIONS[random::pick_uniform(FORMATIONS.len(), rand)][2],
            },
        }
    }
}

/// The starting selection, grouped by position. Every group is nonempty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Squad {
    pub goalkeeper: Vec<Player>,
    pub defenders: Vec<Player>,
    pub midfielders: Vec<Player>,
    pub attackers: Vec<Player>,
}
impl Squad {
    pub fn group(&self, position: Position) -> &[Player] {
        match position {
            Position::Goalkeeper => &self.goalkeeper,
            Position::Defender => &self.defenders,
            Position::Midfielder => &self.midfielders,
            Position::Attacker => &self.attackers,
        }
    }
}

#[derive(Debug, Error)]
pub enum InvalidRoster {
    #[error("no players found for club {club}")]
    UnknownClub { club: String },

    #[error("club {club} has no goalkeeper")]
    NoGoalkeeper { club: String },

    #[error("club {club} has no {position} in its player pool")]
    EmptyPositionGroup { club: String, position: Position },
}

#[derive(Clone, Debug)]
pub struct Team {
    pub name: String,
    pub manager: Manager,
    pub strength: TeamStrength,
    pub squad: Squad,
    pub players: Vec<Player>,
}
impl Team {
    /// Assembles a club's team from the dataset: filters the club's players,
    /// derives the strength scalars, and picks the highest-rated starters per
    /// the manager's formation.
    pub fn build(
        club: &str,
        records: &[PlayerRecord],
        rand: &mut impl Rand,
    ) -> Result<Team, InvalidRoster> {
        let players: Vec<Player> = records
            .iter()
            .filter(|record| record.club == club)
            .map(Player::from_record)
            .collect();
        if players.is_empty() {
            return Err(InvalidRoster::UnknownClub { club: club.into() });
        }

        let mut goalkeepers = group_of(&players, Position::Goalkeeper);
        let mut defenders = group_of(&players, Position::Defender);
        let mut midfielders = group_of(&players, Position::Midfielder);
        let mut attackers = group_of(&players, Position::Attacker);
        if goalkeepers.is_empty() {
            return Err(InvalidRoster::NoGoalkeeper { club: club.into() });
        }
        for (position, group) in [
            (Position::Defender, &defenders),
            (Position::Midfielder, &midfielders),
            (Position::Attacker, &attackers),
        ] {
            if group.is_empty() {
                return Err(InvalidRoster::EmptyPositionGroup {
                    club: club.into(),
                    position,
                });
            }
        }

        let strength = TeamStrength {
            attack: mean_overall(&attackers),
            midfield: mean_overall(&midfielders),
            defence: mean_overall_of(&[&defenders, &goalkeepers]),
        };

        let manager = Manager::random(rand);
        let squad = Squad {
            goalkeeper: select_starters(&mut goalkeepers, 1),
            defenders: select_starters(&mut defenders, manager.formation.defenders),
            midfielders: select_starters(&mut midfielders, manager.formation.midfielders),
            attackers: select_starters(&mut attackers, manager.formation.attackers),
        };

        let mut players = goalkeepers;
        players.append(&mut defenders);
        players.append(&mut midfielders);
        players.append(&mut attackers);

        Ok(Team {
            name: club.into(),
            manager,
            strength,
            squad,
            players,
        })
    }
}

fn group_of(players: &[Player], position: Position) -> Vec<Player> {
    players
        .iter()
        .filter(|player| player.position == position)
        .cloned()
        .collect()
}

fn mean_overall(group: &[Player]) -> f64 {
    (group.iter().map(|player| player.overall).sum::<f64>() / group.len() as f64).floor()
}

fn mean_overall_of(groups: &[&Vec<Player>]) -> f64 {
    let count: usize = groups.iter().map(|group| group.len()).sum();
    let sum: f64 = groups
        .iter()
        .flat_map(|group| group.iter())
        .map(|player| player.overall)
        .sum();
    (sum / count as f64).floor()
}

/// Sorts the group by descending overall, marks the leading `count` players as
/// starters in place, and returns clones of them.
fn select_starters(group: &mut [Player], count: usize) -> Vec<Player> {
    group.sort_by(|a, b| b.overall.total_cmp(&a.overall));
    let count = count.min(group.len());
    for player in &mut group[..count] {
        player.status = Status::Starter;
    }
    group[..count].to_vec()
}
