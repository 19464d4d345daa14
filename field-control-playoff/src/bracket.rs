use std::convert::Infallible;
use std::ops::{Index, IndexMut};

use crate::match_group::format_destination_match_name;
use crate::{
    AllianceId, AllianceSource, BreakSpec, MatchGroup, MatchSpec, MatchSpecRef, Matchup,
    PlayoffMatchResults,
};

/// The index of a [`Matchup`] within a [`Bracket`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MatchupId(pub(crate) usize);

/// A playoff bracket: an arena of [`Matchup`]s rooted at the final matchup, and the breaks
/// scheduled between its matches.
///
/// Matchups only reference matchups that were pushed before them, so the graph formed by the
/// [`AllianceSource`]s is acyclic. Destination links are the only edges pointing the other way
/// and are filled in by [`set_source_destinations`].
///
/// [`set_source_destinations`]: Self::set_source_destinations
#[derive(Clone, Debug)]
pub struct Bracket {
    matchups: Vec<Matchup>,
    final_matchup: MatchupId,
    break_specs: Vec<BreakSpec>,
}

impl Bracket {
    /// Returns the id of the root matchup.
    #[inline]
    pub fn final_matchup(&self) -> MatchupId {
        self.final_matchup
    }

    #[inline]
    pub fn break_specs(&self) -> &[BreakSpec] {
        &self.break_specs
    }

    #[inline]
    pub fn matchups(&self) -> &[Matchup] {
        &self.matchups
    }

    /// Returns the id of the matchup with the given match group `id`.
    pub fn find(&self, id: &str) -> Option<MatchupId> {
        self.matchups
            .iter()
            .position(|matchup| matchup.id() == id)
            .map(MatchupId)
    }

    #[inline]
    pub fn match_spec(&self, spec: MatchSpecRef) -> &MatchSpec {
        &self[spec.matchup].match_specs()[spec.index]
    }

    /// Re-evaluates the whole bracket from the root using `results`.
    #[inline]
    pub fn update(&mut self, results: &PlayoffMatchResults) {
        self.update_matchup(self.final_matchup, results);
    }

    /// Re-evaluates the matchup `id` and everything upstream of it.
    ///
    /// The sources are updated first, so every call recomputes the complete subgraph.
    pub fn update_matchup(&mut self, id: MatchupId, results: &PlayoffMatchResults) {
        let red_source = self[id].red_alliance_source;
        let blue_source = self[id].blue_alliance_source;

        red_source.update(self, results);
        blue_source.update(self, results);

        let red_alliance_id = red_source.alliance_id(self);
        let blue_alliance_id = blue_source.alliance_id(self);

        self[id].apply_results(red_alliance_id, blue_alliance_id, results);
    }

    /// Registers the matchup `id` as the destination of both its sources, cascading up to the
    /// first round.
    pub fn set_source_destinations(&mut self, id: MatchupId) {
        let red_source = self[id].red_alliance_source;
        let blue_source = self[id].blue_alliance_source;

        red_source.set_destination(self, id);
        blue_source.set_destination(self, id);
    }

    /// Visits every matchup reachable from the root, parents before their sources.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(MatchupId, &Matchup),
    {
        let _ = self.try_traverse_from::<_, Infallible>(self.final_matchup, &mut |id, matchup| {
            visit(id, matchup);
            Ok(())
        });
    }

    /// Visits every matchup reachable from the root, stopping at the first error returned by
    /// `visit`.
    #[inline]
    pub fn try_traverse<F, E>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(MatchupId, &Matchup) -> Result<(), E>,
    {
        self.try_traverse_from(self.final_matchup, &mut visit)
    }

    pub(crate) fn try_traverse_from<F, E>(&self, id: MatchupId, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(MatchupId, &Matchup) -> Result<(), E>,
    {
        let matchup = &self[id];
        visit(id, matchup)?;
        matchup.red_alliance_source.traverse(self, visit)?;
        matchup.blue_alliance_source.traverse(self, visit)
    }

    #[inline]
    pub fn red_alliance_source_display_name(&self, id: MatchupId) -> String {
        self[id].red_alliance_source.display_name(self)
    }

    #[inline]
    pub fn blue_alliance_source_display_name(&self, id: MatchupId) -> String {
        self[id].blue_alliance_source.display_name(self)
    }

    #[inline]
    pub fn red_alliance_destination(&self, id: MatchupId) -> String {
        self.alliance_destination(id, self[id].red_alliance_id())
    }

    #[inline]
    pub fn blue_alliance_destination(&self, id: MatchupId) -> String {
        self.alliance_destination(id, self[id].blue_alliance_id())
    }

    /// Returns where `alliance_id` goes after the matchup `id`. Returns an empty string while the
    /// matchup is undecided.
    pub fn alliance_destination(&self, id: MatchupId, alliance_id: AllianceId) -> String {
        let matchup = &self[id];
        if !matchup.is_complete() {
            return String::new();
        }

        if matchup.is_final() {
            return if matchup.winning_alliance_id() == alliance_id {
                String::from("Tournament Winner")
            } else {
                String::from("Tournament Finalist")
            };
        }

        let destination = if matchup.winning_alliance_id() == alliance_id {
            matchup.winning_alliance_destination
        } else {
            match matchup.losing_alliance_destination {
                Some(destination) => Some(destination),
                None => return String::from("Eliminated"),
            }
        };

        let destination = destination.map(|id| &self[id] as &dyn MatchGroup);
        format!("Advances to {}", format_destination_match_name(destination))
    }
}

impl Index<MatchupId> for Bracket {
    type Output = Matchup;

    #[inline]
    fn index(&self, index: MatchupId) -> &Self::Output {
        &self.matchups[index.0]
    }
}

impl IndexMut<MatchupId> for Bracket {
    #[inline]
    fn index_mut(&mut self, index: MatchupId) -> &mut Self::Output {
        &mut self.matchups[index.0]
    }
}

/// Builds a [`Bracket`] bottom-up.
///
/// Matchups must be pushed before any matchup that uses them as a source.
#[derive(Clone, Debug, Default)]
pub struct BracketBuilder {
    matchups: Vec<Matchup>,
}

impl BracketBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `matchup` to the bracket, returning its id.
    pub fn push(&mut self, matchup: Matchup) -> MatchupId {
        let id = MatchupId(self.matchups.len());
        self.matchups.push(matchup);
        id
    }

    /// Returns the alliance `source` resolves to while the bracket is being built.
    ///
    /// No match has been played at this point: seeds resolve to their alliance and all matchup
    /// sources resolve to `0`. Bye decisions are based on this seeding-time value and never on
    /// live results.
    #[inline]
    pub fn alliance_id(&self, source: AllianceSource) -> AllianceId {
        source.resolve(&self.matchups)
    }

    pub fn build(self, final_matchup: MatchupId, break_specs: Vec<BreakSpec>) -> Bracket {
        log::debug!(
            "Built bracket with {} matchups and {} breaks",
            self.matchups.len(),
            break_specs.len()
        );

        Bracket {
            matchups: self.matchups,
            final_matchup,
            break_specs,
        }
    }
}
