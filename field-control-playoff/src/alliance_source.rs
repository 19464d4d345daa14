use std::fmt::{self, Display, Formatter};

use crate::{AllianceId, Bracket, Matchup, MatchupId, PlayoffMatchResults};

/// The place an alliance of a [`Matchup`] comes from.
///
/// A `Seed` is a fixed alliance from alliance selection. A `Matchup` source is a read-through
/// view of the winner (or loser) of another matchup; its alliance is always recomputed from the
/// current state of that matchup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AllianceSource {
    Seed(AllianceId),
    Matchup {
        matchup: MatchupId,
        use_winner: bool,
    },
}

impl AllianceSource {
    #[inline]
    pub fn seed(alliance_id: AllianceId) -> Self {
        Self::Seed(alliance_id)
    }

    #[inline]
    pub fn winner(matchup: MatchupId) -> Self {
        Self::Matchup {
            matchup,
            use_winner: true,
        }
    }

    #[inline]
    pub fn loser(matchup: MatchupId) -> Self {
        Self::Matchup {
            matchup,
            use_winner: false,
        }
    }

    /// Returns the alliance currently provided by this source, or `0` if it is not yet known.
    #[inline]
    pub fn alliance_id(&self, bracket: &Bracket) -> AllianceId {
        self.resolve(bracket.matchups())
    }

    pub(crate) fn resolve(&self, matchups: &[Matchup]) -> AllianceId {
        match *self {
            Self::Seed(alliance_id) => alliance_id,
            Self::Matchup {
                matchup,
                use_winner,
            } => {
                let matchup = &matchups[matchup.0];
                if use_winner {
                    matchup.winning_alliance_id()
                } else {
                    matchup.losing_alliance_id()
                }
            }
        }
    }

    /// Returns the short name of this source as shown on the bracket, e.g. `A 1` or `W M3`.
    pub fn display_name(&self, bracket: &Bracket) -> String {
        self.display(bracket).to_string()
    }

    #[inline]
    fn display<'a>(&self, bracket: &'a Bracket) -> SourceDisplay<'a> {
        match *self {
            Self::Seed(alliance_id) => SourceDisplay::Seed(alliance_id),
            Self::Matchup {
                matchup,
                use_winner,
            } => SourceDisplay::Matchup(bracket[matchup].id(), use_winner),
        }
    }

    /// Registers `destination` as the matchup the alliance from this source advances to, then
    /// continues registering destinations upstream of the source matchup.
    pub(crate) fn set_destination(&self, bracket: &mut Bracket, destination: MatchupId) {
        if let Self::Matchup {
            matchup,
            use_winner,
        } = *self
        {
            let source = &mut bracket[matchup];
            if use_winner {
                source.winning_alliance_destination = Some(destination);
            } else {
                source.losing_alliance_destination = Some(destination);
            }

            bracket.set_source_destinations(matchup);
        }
    }

    /// Updates the source matchup with `results`.
    ///
    /// Only winner sources update their matchup. Every matchup is consumed as a winner exactly
    /// once, so this updates each upstream matchup exactly once per pass.
    pub(crate) fn update(&self, bracket: &mut Bracket, results: &PlayoffMatchResults) {
        if let Self::Matchup {
            matchup,
            use_winner: true,
        } = *self
        {
            bracket.update_matchup(matchup, results);
        }
    }

    /// Continues a traversal into the source matchup. Loser sources are not followed for the
    /// same reason as in [`update`](Self::update).
    pub(crate) fn traverse<F, E>(&self, bracket: &Bracket, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(MatchupId, &Matchup) -> Result<(), E>,
    {
        match *self {
            Self::Matchup {
                matchup,
                use_winner: true,
            } => bracket.try_traverse_from(matchup, visit),
            _ => Ok(()),
        }
    }
}

enum SourceDisplay<'a> {
    Seed(AllianceId),
    Matchup(&'a str, bool),
}

impl<'a> Display for SourceDisplay<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Seed(alliance_id) => write!(f, "A {}", alliance_id),
            Self::Matchup(id, true) => write!(f, "W {}", id),
            Self::Matchup(id, false) => write!(f, "L {}", id),
        }
    }
}
