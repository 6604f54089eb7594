//! A seedable round-robin football league simulator. Builds a conflict-aware
//! fixture schedule for a set of teams and simulates each match minute by
//! minute from team-strength-adjusted odds, aggregating results into a league
//! table.

#![allow(clippy::too_many_arguments)]

pub mod cascade;
pub mod data;
pub mod domain;
pub mod engine;
pub mod file;
pub mod kickoff;
pub mod league;
pub mod odds;
pub mod print;
pub mod probs;
pub mod random;
pub mod roster;
pub mod schedule;
pub mod standings;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
