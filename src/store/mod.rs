//! Key-value persistence for the staging list, the active competitions and lifetime counters.
//!
//! Records are stored as JSON strings. A missing or unreadable record loads as
//! "nothing active"; only backend failures are reported as errors.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::logic::TeamList;
use crate::models::{CompetitionError, League, Tournament};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Keys used in the store.
pub mod keys {
    pub const TEAMS: &str = "teams";
    pub const TOURNAMENT: &str = "currentTournament";
    pub const LEAGUE: &str = "currentLeague";
    pub const TOURNAMENT_COUNT: &str = "tournamentCount";
    pub const LEAGUE_COUNT: &str = "leagueCount";
}

/// String key-value store holding serialized records.
pub trait CompetitionStore {
    fn get(&self, key: &str) -> Result<Option<String>, CompetitionError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CompetitionError>;
    fn remove(&mut self, key: &str) -> Result<(), CompetitionError>;
}

/// Lifetime counters and staging size (for the landing page).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub tournaments_created: u64,
    pub leagues_created: u64,
    pub staged_teams: usize,
}

fn load_record<T, S>(store: &S, key: &str) -> Result<Option<T>, CompetitionError>
where
    T: DeserializeOwned,
    S: CompetitionStore + ?Sized,
{
    let raw = match store.get(key)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    match serde_json::from_str(&raw) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            warn!("Ignoring unreadable record '{}': {}", key, e);
            Ok(None)
        }
    }
}

fn save_record<T, S>(store: &mut S, key: &str, record: &T) -> Result<(), CompetitionError>
where
    T: Serialize,
    S: CompetitionStore + ?Sized,
{
    let json = serde_json::to_string(record)?;
    store.set(key, &json)
}

fn load_counter<S: CompetitionStore + ?Sized>(store: &S, key: &str) -> Result<u64, CompetitionError> {
    Ok(store
        .get(key)?
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0))
}

fn increment_counter<S: CompetitionStore + ?Sized>(store: &mut S, key: &str) -> Result<u64, CompetitionError> {
    let next = load_counter(store, key)? + 1;
    store.set(key, &next.to_string())?;
    Ok(next)
}

pub fn load_teams<S: CompetitionStore + ?Sized>(store: &S) -> Result<TeamList, CompetitionError> {
    Ok(load_record(store, keys::TEAMS)?.unwrap_or_default())
}

pub fn save_teams<S: CompetitionStore + ?Sized>(store: &mut S, teams: &TeamList) -> Result<(), CompetitionError> {
    save_record(store, keys::TEAMS, teams)
}

pub fn load_tournament<S: CompetitionStore + ?Sized>(store: &S) -> Result<Option<Tournament>, CompetitionError> {
    load_record(store, keys::TOURNAMENT)
}

pub fn save_tournament<S: CompetitionStore + ?Sized>(
    store: &mut S,
    tournament: &Tournament,
) -> Result<(), CompetitionError> {
    save_record(store, keys::TOURNAMENT, tournament)
}

pub fn clear_tournament<S: CompetitionStore + ?Sized>(store: &mut S) -> Result<(), CompetitionError> {
    store.remove(keys::TOURNAMENT)
}

/// Persist a freshly created tournament, bump the counter and empty the staging list.
pub fn record_new_tournament<S: CompetitionStore + ?Sized>(
    store: &mut S,
    tournament: &Tournament,
) -> Result<(), CompetitionError> {
    save_tournament(store, tournament)?;
    increment_counter(store, keys::TOURNAMENT_COUNT)?;
    save_teams(store, &TeamList::new())
}

pub fn load_league<S: CompetitionStore + ?Sized>(store: &S) -> Result<Option<League>, CompetitionError> {
    load_record(store, keys::LEAGUE)
}

pub fn save_league<S: CompetitionStore + ?Sized>(store: &mut S, league: &League) -> Result<(), CompetitionError> {
    save_record(store, keys::LEAGUE, league)
}

pub fn clear_league<S: CompetitionStore + ?Sized>(store: &mut S) -> Result<(), CompetitionError> {
    store.remove(keys::LEAGUE)
}

/// Persist a freshly created league, bump the counter and empty the staging list.
pub fn record_new_league<S: CompetitionStore + ?Sized>(
    store: &mut S,
    league: &League,
) -> Result<(), CompetitionError> {
    save_league(store, league)?;
    increment_counter(store, keys::LEAGUE_COUNT)?;
    save_teams(store, &TeamList::new())
}

pub fn load_stats<S: CompetitionStore + ?Sized>(store: &S) -> Result<Stats, CompetitionError> {
    Ok(Stats {
        tournaments_created: load_counter(store, keys::TOURNAMENT_COUNT)?,
        leagues_created: load_counter(store, keys::LEAGUE_COUNT)?,
        staged_teams: load_teams(store)?.len(),
    })
}
