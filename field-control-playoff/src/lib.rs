//! # field-control-playoff
//!
//! This crate contains the playoff bracket engine of the field control system. A bracket is a
//! graph of [`Matchup`]s rooted at the final. Each matchup pulls its two alliances from an
//! [`AllianceSource`], which is either a fixed alliance selection seed or the winner/loser of
//! another matchup.
//!
//! Important types:
//! - [`PlayoffTournament`]: Builds a bracket for a [`PlayoffType`] and reconciles it against a
//! [`Store`].
//! - [`Bracket`]: The arena owning all [`Matchup`]s of a bracket. All graph walks go through it.
//! - [`Matchup`]: A node in the bracket. Owns the [`MatchSpec`]s played between its alliances.
//! - [`MatchSpec`]: A single schedulable match slot.
//! - [`BreakSpec`]: A break inserted into the playoff schedule.
//!
//! ## Feature Flags
//!
//! `serde`: Adds `Serialize` and `Deserialize` impls to all persisted records and to
//! [`MemoryStore`].
//!
mod alliance_source;
mod bracket;
mod double_elimination;
mod match_group;
mod matchup;
#[cfg(feature = "serde")]
mod serde_impl;
mod single_elimination;
mod specs;
pub mod store;
pub mod tournament;

pub use alliance_source::AllianceSource;
pub use bracket::{Bracket, BracketBuilder, MatchupId};
pub use double_elimination::new_double_elimination_bracket;
pub use match_group::{collect_match_groups, collect_match_specs, MatchGroup, MatchSpec, MatchSpecRef};
pub use matchup::Matchup;
pub use single_elimination::new_single_elimination_bracket;
pub use specs::{BreakSpec, MatchStatus, PlayoffMatchResult, TbaMatchKey};
pub use store::{MemoryStore, Store};
pub use tournament::{ParsePlayoffTypeError, PlayoffTournament, PlayoffType};

use std::collections::HashMap;
use std::result;

use thiserror::Error;

/// The id of an alliance. Alliances are numbered densely starting from 1. An id of `0` means
/// that the alliance is not yet determined.
pub type AllianceId = u32;

/// The id of a team.
pub type TeamId = u32;

/// The results of all completed playoff matches, keyed by the match order.
pub type PlayoffMatchResults = HashMap<u32, PlayoffMatchResult>;

/// An `Result<T>` using [`enum@Error`] as an error type.
pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported playoff type: {0}")]
    UnsupportedPlayoffType(u8),
    #[error("{kind} bracket does not support {count} alliances")]
    InvalidAllianceCount { kind: PlayoffType, count: usize },
    #[error("duplicate match group id: {0}")]
    DuplicateMatchGroupId(String),
    #[error("duplicate long name: {0}")]
    DuplicateLongName(String),
    #[error("duplicate short name: {0}")]
    DuplicateShortName(String),
    #[error("duplicate order: {0}")]
    DuplicateOrder(u32),
    #[error("duplicate match key: {0}")]
    DuplicateMatchKey(String),
    #[error("playoff matches already exist")]
    MatchesExist,
    #[error("scheduled breaks already exist")]
    ScheduledBreaksExist,
    #[error("no playoff matches exist")]
    NoMatches,
    #[error("match {0} not found")]
    MatchNotFound(u32),
    #[error("store error: {0}")]
    Store(String),
}

#[cfg(test)]
mod tests {
    use crate::{AllianceId, Bracket, MatchSpec, PlayoffMatchResult, PlayoffMatchResults};

    #[macro_export]
    macro_rules! results {
        ($($order:expr => $result:expr),*$(,)?) => {{
            let mut results = $crate::PlayoffMatchResults::new();
            $(
                results.insert($order, $result);
            )*

            results
        }};
    }

    pub use PlayoffMatchResult::{BlueWon, RedWon, Tie};

    /// Returns the `(red, blue)` alliances of all `specs`.
    pub fn alliances(specs: &[&MatchSpec]) -> Vec<(AllianceId, AllianceId)> {
        specs
            .iter()
            .map(|spec| (spec.red_alliance_id, spec.blue_alliance_id))
            .collect()
    }

    /// Returns the red and blue destination texts of the matchup `id`.
    pub fn outcome(bracket: &Bracket, id: &str) -> (String, String) {
        let matchup = bracket.find(id).unwrap();
        (
            bracket.red_alliance_destination(matchup),
            bracket.blue_alliance_destination(matchup),
        )
    }

    #[test]
    fn test_results_macro() {
        let results: PlayoffMatchResults = results!(1 => RedWon, 2 => Tie);
        assert_eq!(results.len(), 2);
        assert_eq!(results[&1], RedWon);
        assert_eq!(results[&2], Tie);
    }
}
