//! Persistence of alliances, matches and scheduled breaks.
//!
//! The playoff engine only talks to persistence through the [`Store`] trait. [`MemoryStore`]
//! is an in-memory implementation that can be serialized as a whole with the `serde` feature.
use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AllianceId, Error, MatchStatus, Result, TbaMatchKey, TeamId};

/// The persistence contract of the playoff engine.
pub trait Store {
    /// Returns all alliances ordered by their id.
    fn read_alliances(&self) -> Result<Vec<Alliance>>;

    /// Returns all matches of the given `kind` ordered by their order, hidden matches included.
    fn read_matches_by_type(&self, kind: MatchType) -> Result<Vec<Match>>;

    /// Returns all breaks scheduled between matches of the given `kind`.
    fn read_scheduled_breaks_by_match_type(&self, kind: MatchType) -> Result<Vec<ScheduledBreak>>;

    /// Inserts a new match, returning the match with its assigned id.
    fn create_match(&mut self, r#match: Match) -> Result<Match>;

    /// Replaces the match with the same type and order as `r#match`.
    fn update_match(&mut self, r#match: &Match) -> Result<()>;

    /// Inserts a new scheduled break, returning the break with its assigned id.
    fn create_scheduled_break(&mut self, scheduled_break: ScheduledBreak)
        -> Result<ScheduledBreak>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatchType {
    Test,
    Practice,
    Qualification,
    Playoff,
}

impl MatchType {
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Test => 0,
            Self::Practice => 1,
            Self::Qualification => 2,
            Self::Playoff => 3,
        }
    }

    #[inline]
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Test),
            1 => Some(Self::Practice),
            2 => Some(Self::Qualification),
            3 => Some(Self::Playoff),
            _ => None,
        }
    }
}

impl Display for MatchType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Test => "Test",
            Self::Practice => "Practice",
            Self::Qualification => "Qualification",
            Self::Playoff => "Playoff",
        })
    }
}

/// An alliance formed during alliance selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alliance {
    pub id: AllianceId,
    /// All teams of the alliance, in picking order.
    pub team_ids: Vec<TeamId>,
    /// The teams playing the next match, by driver station.
    pub line_up: [TeamId; 3],
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match {
    pub id: u64,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: MatchType,
    pub type_order: u32,
    pub scheduled_time: DateTime<Utc>,
    pub long_name: String,
    pub short_name: String,
    pub name_detail: String,
    pub playoff_match_group_id: String,
    pub playoff_red_alliance: AllianceId,
    pub playoff_blue_alliance: AllianceId,
    pub red1: TeamId,
    pub red2: TeamId,
    pub red3: TeamId,
    pub blue1: TeamId,
    pub blue2: TeamId,
    pub blue3: TeamId,
    pub status: MatchStatus,
    pub use_tiebreak_criteria: bool,
    pub tba_match_key: TbaMatchKey,
}

impl Match {
    #[inline]
    pub fn red_teams(&self) -> [TeamId; 3] {
        [self.red1, self.red2, self.red3]
    }

    #[inline]
    pub fn blue_teams(&self) -> [TeamId; 3] {
        [self.blue1, self.blue2, self.blue3]
    }

    /// Assigns the red driver stations 1 to 3.
    #[inline]
    pub fn set_red_teams(&mut self, teams: [TeamId; 3]) {
        [self.red1, self.red2, self.red3] = teams;
    }

    #[inline]
    pub fn set_blue_teams(&mut self, teams: [TeamId; 3]) {
        [self.blue1, self.blue2, self.blue3] = teams;
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }
}

/// A break in the schedule before the match with `type_order_before`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduledBreak {
    pub id: u64,
    pub match_type: MatchType,
    pub type_order_before: u32,
    pub time: DateTime<Utc>,
    pub duration_sec: u32,
    pub description: String,
}

/// A [`Store`] that keeps all records in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemoryStore {
    alliances: Vec<Alliance>,
    matches: Vec<Match>,
    scheduled_breaks: Vec<ScheduledBreak>,
    next_id: u64,
}

impl MemoryStore {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `alliance`, replacing any alliance with the same id.
    pub fn save_alliance(&mut self, alliance: Alliance) {
        match self.alliances.iter_mut().find(|a| a.id == alliance.id) {
            Some(a) => *a = alliance,
            None => {
                self.alliances.push(alliance);
                self.alliances.sort_by_key(|a| a.id);
            }
        }
    }

    #[inline]
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Store for MemoryStore {
    fn read_alliances(&self) -> Result<Vec<Alliance>> {
        Ok(self.alliances.clone())
    }

    fn read_matches_by_type(&self, kind: MatchType) -> Result<Vec<Match>> {
        let mut matches: Vec<_> = self
            .matches
            .iter()
            .filter(|m| m.kind == kind)
            .cloned()
            .collect();

        matches.sort_by_key(|m| m.type_order);
        Ok(matches)
    }

    fn read_scheduled_breaks_by_match_type(&self, kind: MatchType) -> Result<Vec<ScheduledBreak>> {
        let mut scheduled_breaks: Vec<_> = self
            .scheduled_breaks
            .iter()
            .filter(|b| b.match_type == kind)
            .cloned()
            .collect();

        scheduled_breaks.sort_by_key(|b| b.type_order_before);
        Ok(scheduled_breaks)
    }

    fn create_match(&mut self, mut r#match: Match) -> Result<Match> {
        if self
            .matches
            .iter()
            .any(|m| m.kind == r#match.kind && m.type_order == r#match.type_order)
        {
            return Err(Error::Store(format!(
                "{} match {} already exists",
                r#match.kind, r#match.type_order
            )));
        }

        r#match.id = self.next_id();
        self.matches.push(r#match.clone());
        Ok(r#match)
    }

    fn update_match(&mut self, r#match: &Match) -> Result<()> {
        match self
            .matches
            .iter_mut()
            .find(|m| m.kind == r#match.kind && m.type_order == r#match.type_order)
        {
            Some(m) => {
                let id = m.id;
                *m = r#match.clone();
                m.id = id;
                Ok(())
            }
            None => Err(Error::Store(format!(
                "{} match {} does not exist",
                r#match.kind, r#match.type_order
            ))),
        }
    }

    fn create_scheduled_break(
        &mut self,
        mut scheduled_break: ScheduledBreak,
    ) -> Result<ScheduledBreak> {
        scheduled_break.id = self.next_id();
        self.scheduled_breaks.push(scheduled_break.clone());
        Ok(scheduled_break)
    }
}
