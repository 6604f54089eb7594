//! Loading of the external datasets: the players file, the optional league
//! catalogue, and the optional odds and kickoff configuration files.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::file;
use crate::kickoff::KickoffConfig;
use crate::odds::{InvalidOdds, MinuteConfig, OddsTable};
use crate::roster::PlayerRecord;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeagueEntry {
    pub name: String,
    pub clubs: Vec<String>,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid odds table in {path}: {source}")]
    Odds {
        path: String,
        #[source]
        source: InvalidOdds,
    },
}

fn read<D: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, DataError> {
    file::read_json(path.as_ref()).map_err(|source| DataError::Io {
        path: path.as_ref().display().to_string(),
        source,
    })
}

pub fn load_players(path: impl AsRef<Path>) -> Result<Vec<PlayerRecord>, DataError> {
    read(path)
}

pub fn load_leagues(path: impl AsRef<Path>) -> Result<Vec<LeagueEntry>, DataError> {
    read(path)
}

pub fn load_kickoffs(path: impl AsRef<Path>) -> Result<KickoffConfig, DataError> {
    read(path)
}

pub fn load_odds(path: impl AsRef<Path>) -> Result<OddsTable, DataError> {
    let config: Vec<MinuteConfig> = read(&path)?;
    OddsTable::from_config(config).map_err(|source| DataError::Odds {
        path: path.as_ref().display().to_string(),
        source,
    })
}

/// The fallback league when no catalogue is supplied: every distinct club in
/// the dataset, in name order.
pub fn combined_league(records: &[PlayerRecord]) -> LeagueEntry {
    let clubs: BTreeSet<String> = records.iter().map(|record| record.club.clone()).collect();
    LeagueEntry {
        name: "All Clubs".into(),
        clubs: clubs.into_iter().collect(),
    }
}
