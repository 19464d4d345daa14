use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::store::{Alliance, Match, MatchType, ScheduledBreak, Store};
use crate::{
    collect_match_groups, collect_match_specs, new_double_elimination_bracket,
    new_single_elimination_bracket, AllianceId, Bracket, Error, MatchSpec, MatchSpecRef,
    MatchStatus, Matchup, MatchupId, PlayoffMatchResult, PlayoffMatchResults, Result, TeamId,
};

/// The bracket format of the playoffs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayoffType {
    DoubleElimination,
    SingleElimination,
}

impl PlayoffType {
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::DoubleElimination => 0,
            Self::SingleElimination => 1,
        }
    }

    #[inline]
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::DoubleElimination),
            1 => Some(Self::SingleElimination),
            _ => None,
        }
    }
}

impl TryFrom<u8> for PlayoffType {
    type Error = Error;

    #[inline]
    fn try_from(byte: u8) -> Result<Self> {
        Self::from_u8(byte).ok_or(Error::UnsupportedPlayoffType(byte))
    }
}

impl Display for PlayoffType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::DoubleElimination => "double elimination",
            Self::SingleElimination => "single elimination",
        })
    }
}

impl FromStr for PlayoffType {
    type Err = ParsePlayoffTypeError;

    /// Parses either the integer value or a name like `single-elimination`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Ok(byte) = s.parse::<u8>() {
            return Self::from_u8(byte).ok_or(ParsePlayoffTypeError);
        }

        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "double elimination" | "double" => Ok(Self::DoubleElimination),
            "single elimination" | "single" => Ok(Self::SingleElimination),
            _ => Err(ParsePlayoffTypeError),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid playoff type")]
pub struct ParsePlayoffTypeError;

/// The playoffs of an event: a bracket of the configured [`PlayoffType`] together with the
/// operations that keep the persisted playoff matches in sync with it.
#[derive(Clone, Debug)]
pub struct PlayoffTournament {
    bracket: Bracket,
    match_groups: HashMap<String, MatchupId>,
    match_specs: Vec<MatchSpecRef>,
}

impl PlayoffTournament {
    /// Creates a new bracket of type `kind` for `num_alliances` alliances.
    ///
    /// # Errors
    ///
    /// Returns an error if `kind` does not support `num_alliances` alliances or the bracket
    /// contains duplicate identifiers.
    pub fn new(kind: PlayoffType, num_alliances: usize) -> Result<Self> {
        let mut bracket = match kind {
            PlayoffType::DoubleElimination => new_double_elimination_bracket(num_alliances)?,
            PlayoffType::SingleElimination => new_single_elimination_bracket(num_alliances)?,
        };

        let match_groups = collect_match_groups(&bracket)?;
        let match_specs = collect_match_specs(&mut bracket)?;

        bracket.set_source_destinations(bracket.final_matchup());
        bracket.update(&PlayoffMatchResults::new());

        log::debug!(
            "Created {} playoff tournament for {} alliances",
            kind,
            num_alliances
        );

        Ok(Self {
            bracket,
            match_groups,
            match_specs,
        })
    }

    /// Returns all match groups keyed by their id.
    #[inline]
    pub fn match_groups(&self) -> &HashMap<String, MatchupId> {
        &self.match_groups
    }

    /// Returns the matchup with the match group id `id`.
    #[inline]
    pub fn match_group(&self, id: &str) -> Option<&Matchup> {
        self.match_groups.get(id).map(|id| &self.bracket[*id])
    }

    #[inline]
    pub fn final_matchup(&self) -> MatchupId {
        self.bracket.final_matchup()
    }

    #[inline]
    pub fn bracket(&self) -> &Bracket {
        &self.bracket
    }

    /// Returns all match specs ordered by their order.
    pub fn match_specs(&self) -> Vec<&MatchSpec> {
        self.match_specs
            .iter()
            .map(|spec| self.bracket.match_spec(*spec))
            .collect()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.bracket[self.final_matchup()].is_complete()
    }

    #[inline]
    pub fn winning_alliance_id(&self) -> AllianceId {
        self.bracket[self.final_matchup()].winning_alliance_id()
    }

    #[inline]
    pub fn finalist_alliance_id(&self) -> AllianceId {
        self.bracket[self.final_matchup()].losing_alliance_id()
    }

    #[inline]
    pub fn traverse<F>(&self, visit: F)
    where
        F: FnMut(MatchupId, &Matchup),
    {
        self.bracket.traverse(visit);
    }

    /// Re-evaluates the whole bracket using `results`.
    #[inline]
    pub fn update(&mut self, results: &PlayoffMatchResults) {
        self.bracket.update(results);
    }

    /// Persists every playoff match and break in schedule order, starting at `start_time`.
    ///
    /// Each break is scheduled directly before the match with its `order_before`. Breaks that
    /// refer to a match that does not exist are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MatchesExist`] or [`Error::ScheduledBreaksExist`] if the playoffs were
    /// already scheduled.
    pub fn create_match_and_breaks<S>(
        &self,
        store: &mut S,
        start_time: DateTime<Utc>,
    ) -> Result<()>
    where
        S: Store + ?Sized,
    {
        if !store.read_matches_by_type(MatchType::Playoff)?.is_empty() {
            return Err(Error::MatchesExist);
        }

        if !store
            .read_scheduled_breaks_by_match_type(MatchType::Playoff)?
            .is_empty()
        {
            return Err(Error::ScheduledBreaksExist);
        }

        let alliances = store.read_alliances()?;
        let break_specs = self.bracket.break_specs();

        let mut break_index = 0;
        let mut next_event_time = start_time;
        let mut num_breaks = 0;

        let match_specs = self.match_specs();
        for spec in &match_specs {
            while break_index < break_specs.len()
                && break_specs[break_index].order_before < spec.order
            {
                break_index += 1;
            }

            if let Some(break_spec) = break_specs
                .get(break_index)
                .filter(|break_spec| break_spec.order_before == spec.order)
            {
                store.create_scheduled_break(ScheduledBreak {
                    id: 0,
                    match_type: MatchType::Playoff,
                    type_order_before: break_spec.order_before,
                    time: next_event_time,
                    duration_sec: break_spec.duration_sec,
                    description: break_spec.description.clone(),
                })?;

                break_index += 1;
                num_breaks += 1;
                next_event_time =
                    next_event_time + Duration::seconds(break_spec.duration_sec.into());
            }

            let status = if spec.is_hidden {
                MatchStatus::Hidden
            } else {
                MatchStatus::Scheduled
            };

            let mut r#match = Match {
                id: 0,
                kind: MatchType::Playoff,
                type_order: spec.order,
                scheduled_time: next_event_time,
                long_name: spec.long_name.clone(),
                short_name: spec.short_name.clone(),
                name_detail: spec.name_detail.clone(),
                playoff_match_group_id: spec.match_group_id.clone(),
                playoff_red_alliance: spec.red_alliance_id,
                playoff_blue_alliance: spec.blue_alliance_id,
                red1: 0,
                red2: 0,
                red3: 0,
                blue1: 0,
                blue2: 0,
                blue3: 0,
                status,
                use_tiebreak_criteria: spec.use_tiebreak_criteria,
                tba_match_key: spec.tba_match_key.clone(),
            };

            if let Some(teams) = line_up(&alliances, spec.red_alliance_id) {
                r#match.set_red_teams(teams);
            }

            if let Some(teams) = line_up(&alliances, spec.blue_alliance_id) {
                r#match.set_blue_teams(teams);
            }

            store.create_match(r#match)?;

            next_event_time = next_event_time + Duration::seconds(spec.duration_sec.into());
        }

        log::info!(
            "Scheduled {} playoff matches and {} breaks starting at {}",
            match_specs.len(),
            num_breaks,
            start_time
        );

        Ok(())
    }

    /// Updates the bracket from the results of all completed playoff matches and writes the
    /// resulting alliances, teams and visibility back to every match that has not been played.
    ///
    /// Completed matches are never modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMatches`] if the playoffs were not scheduled yet and
    /// [`Error::MatchNotFound`] if a match of the bracket is missing from `store`.
    pub fn update_matches<S>(&mut self, store: &mut S) -> Result<()>
    where
        S: Store + ?Sized,
    {
        let matches = store.read_matches_by_type(MatchType::Playoff)?;
        if matches.is_empty() {
            return Err(Error::NoMatches);
        }

        let results: PlayoffMatchResults = matches
            .iter()
            .filter_map(|m| PlayoffMatchResult::from_status(m.status).map(|res| (m.type_order, res)))
            .collect();
        self.bracket.update(&results);

        let mut matches: HashMap<u32, Match> =
            matches.into_iter().map(|m| (m.type_order, m)).collect();
        let alliances = store.read_alliances()?;

        let match_specs = self.match_specs();
        let mut num_updated = 0;
        for spec in &match_specs {
            let r#match = matches
                .get_mut(&spec.order)
                .ok_or(Error::MatchNotFound(spec.order))?;

            if r#match.is_complete() {
                continue;
            }

            r#match.status = if spec.is_hidden {
                MatchStatus::Hidden
            } else {
                MatchStatus::Scheduled
            };
            r#match.playoff_red_alliance = spec.red_alliance_id;
            r#match.playoff_blue_alliance = spec.blue_alliance_id;

            let is_scheduled = r#match.status == MatchStatus::Scheduled;
            let teams = |alliance_id| {
                if is_scheduled {
                    line_up(&alliances, alliance_id).unwrap_or_default()
                } else {
                    [0; 3]
                }
            };

            r#match.set_red_teams(teams(spec.red_alliance_id));
            r#match.set_blue_teams(teams(spec.blue_alliance_id));

            store.update_match(r#match)?;
            num_updated += 1;
        }

        log::debug!(
            "Updated {} of {} playoff matches ({} results)",
            num_updated,
            match_specs.len(),
            results.len()
        );

        Ok(())
    }
}

/// Returns the driver station line-up of the alliance `alliance_id`, or `None` if the alliance
/// is undetermined or does not exist.
fn line_up(alliances: &[Alliance], alliance_id: AllianceId) -> Option<[TeamId; 3]> {
    if alliance_id == 0 {
        return None;
    }

    alliances
        .iter()
        .find(|alliance| alliance.id == alliance_id)
        .map(|alliance| alliance.line_up)
}
