use crate::{
    AllianceId, AllianceSource, MatchGroup, MatchSpec, MatchupId, PlayoffMatchResult,
    PlayoffMatchResults,
};

/// A node in a [`Bracket`]: a series of matches between two alliances, where the first alliance
/// to reach `num_wins_to_advance` wins advances.
///
/// [`Bracket`]: crate::Bracket
#[derive(Clone, Debug)]
pub struct Matchup {
    id: String,
    num_wins_to_advance: u32,
    pub red_alliance_source: AllianceSource,
    pub blue_alliance_source: AllianceSource,
    match_specs: Vec<MatchSpec>,
    pub(crate) red_alliance_id: AllianceId,
    pub(crate) blue_alliance_id: AllianceId,
    pub(crate) red_alliance_wins: u32,
    pub(crate) blue_alliance_wins: u32,
    num_matches_played: u32,
    /// The matchup the winner of this matchup plays next. `None` for the final.
    pub winning_alliance_destination: Option<MatchupId>,
    /// The matchup the loser of this matchup plays next. `None` if the loser is eliminated.
    pub losing_alliance_destination: Option<MatchupId>,
}

impl Matchup {
    pub fn new<T>(
        id: T,
        num_wins_to_advance: u32,
        red_alliance_source: AllianceSource,
        blue_alliance_source: AllianceSource,
        match_specs: Vec<MatchSpec>,
    ) -> Self
    where
        T: ToString,
    {
        Self {
            id: id.to_string(),
            num_wins_to_advance,
            red_alliance_source,
            blue_alliance_source,
            match_specs,
            red_alliance_id: 0,
            blue_alliance_id: 0,
            red_alliance_wins: 0,
            blue_alliance_wins: 0,
            num_matches_played: 0,
            winning_alliance_destination: None,
            losing_alliance_destination: None,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn match_specs(&self) -> &[MatchSpec] {
        &self.match_specs
    }

    #[inline]
    pub(crate) fn match_specs_mut(&mut self) -> &mut [MatchSpec] {
        &mut self.match_specs
    }

    #[inline]
    pub fn num_wins_to_advance(&self) -> u32 {
        self.num_wins_to_advance
    }

    #[inline]
    pub fn red_alliance_id(&self) -> AllianceId {
        self.red_alliance_id
    }

    #[inline]
    pub fn blue_alliance_id(&self) -> AllianceId {
        self.blue_alliance_id
    }

    #[inline]
    pub fn red_alliance_wins(&self) -> u32 {
        self.red_alliance_wins
    }

    #[inline]
    pub fn blue_alliance_wins(&self) -> u32 {
        self.blue_alliance_wins
    }

    /// Returns the number of matches with a result, ties included.
    #[inline]
    pub fn num_matches_played(&self) -> u32 {
        self.num_matches_played
    }

    /// Recomputes the state of this matchup from `results` once its sources resolved to
    /// `red_alliance_id` and `blue_alliance_id`.
    ///
    /// Unplayed matches are revealed until enough are visible to decide the series. Once the
    /// matchup is complete all remaining unplayed matches are hidden. Matches outside of these
    /// two cases keep their visibility.
    pub(crate) fn apply_results(
        &mut self,
        red_alliance_id: AllianceId,
        blue_alliance_id: AllianceId,
        results: &PlayoffMatchResults,
    ) {
        self.red_alliance_id = red_alliance_id;
        self.blue_alliance_id = blue_alliance_id;

        self.red_alliance_wins = 0;
        self.blue_alliance_wins = 0;
        self.num_matches_played = 0;

        let mut unplayed = Vec::new();
        for (index, spec) in self.match_specs.iter_mut().enumerate() {
            spec.red_alliance_id = red_alliance_id;
            spec.blue_alliance_id = blue_alliance_id;

            match results.get(&spec.order) {
                Some(PlayoffMatchResult::RedWon) => {
                    self.red_alliance_wins += 1;
                    self.num_matches_played += 1;
                }
                Some(PlayoffMatchResult::BlueWon) => {
                    self.blue_alliance_wins += 1;
                    self.num_matches_played += 1;
                }
                Some(PlayoffMatchResult::Tie) => self.num_matches_played += 1,
                None => unplayed.push(index),
            }
        }

        let num_wins = i64::from(self.num_wins_to_advance);
        let mut to_schedule = i64::min(
            num_wins - i64::from(self.red_alliance_wins),
            num_wins - i64::from(self.blue_alliance_wins),
        );

        let is_complete = self.is_complete();
        for index in unplayed {
            let spec = &mut self.match_specs[index];
            if to_schedule > 0 {
                spec.is_hidden = false;
                to_schedule -= 1;
            } else if is_complete {
                spec.is_hidden = true;
            }
        }
    }

    /// Returns the leading side (`"red"`, `"blue"` or `""`) and a short summary of the series,
    /// e.g. `Red Leads 2-1`.
    pub fn status_text(&self) -> (&'static str, String) {
        let win_text = if self.is_final() { "Wins" } else { "Advances" };

        let red = self.red_alliance_wins;
        let blue = self.blue_alliance_wins;

        if red >= self.num_wins_to_advance {
            ("red", format!("Red {} {}-{}", win_text, red, blue))
        } else if blue >= self.num_wins_to_advance {
            ("blue", format!("Blue {} {}-{}", win_text, blue, red))
        } else if red > blue {
            ("red", format!("Red Leads {}-{}", red, blue))
        } else if blue > red {
            ("blue", format!("Blue Leads {}-{}", blue, red))
        } else if red > 0 {
            ("", format!("Series Tied {}-{}", red, blue))
        } else {
            ("", String::new())
        }
    }

    /// Returns the alliance that won this matchup, or `0` if it is undecided.
    pub fn winning_alliance_id(&self) -> AllianceId {
        if self.red_alliance_wins >= self.num_wins_to_advance {
            self.red_alliance_id
        } else if self.blue_alliance_wins >= self.num_wins_to_advance {
            self.blue_alliance_id
        } else {
            0
        }
    }

    /// Returns the alliance that lost this matchup, or `0` if it is undecided.
    pub fn losing_alliance_id(&self) -> AllianceId {
        if self.red_alliance_wins >= self.num_wins_to_advance {
            self.blue_alliance_id
        } else if self.blue_alliance_wins >= self.num_wins_to_advance {
            self.red_alliance_id
        } else {
            0
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.winning_alliance_id() > 0
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.id == "F"
    }
}

impl MatchGroup for Matchup {
    #[inline]
    fn id(&self) -> &str {
        Matchup::id(self)
    }

    #[inline]
    fn match_specs(&self) -> &[MatchSpec] {
        Matchup::match_specs(self)
    }
}
