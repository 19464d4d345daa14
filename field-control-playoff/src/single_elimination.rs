use crate::{
    AllianceId, AllianceSource, Bracket, BracketBuilder, BreakSpec, Error, MatchSpec, Matchup,
    PlayoffType, Result, TbaMatchKey,
};

/// The first round pairings of a full 16 alliance bracket.
const EIGHTHFINAL_SEEDS: [(AllianceId, AllianceId); 8] = [
    (1, 16),
    (8, 9),
    (4, 13),
    (5, 12),
    (2, 15),
    (7, 10),
    (3, 14),
    (6, 11),
];

/// Creates a best-of-three single elimination bracket for `num_alliances` alliances.
///
/// The bracket is laid out for 16 alliances. Alliances that do not exist receive a bye: their
/// opponent takes their place in the next round and the matchup is never added to the bracket.
///
/// # Errors
///
/// Returns [`Error::InvalidAllianceCount`] if `num_alliances` is not within `2..=16`.
pub fn new_single_elimination_bracket(num_alliances: usize) -> Result<Bracket> {
    if !(2..=16).contains(&num_alliances) {
        return Err(Error::InvalidAllianceCount {
            kind: PlayoffType::SingleElimination,
            count: num_alliances,
        });
    }

    let mut builder = SingleEliminationBuilder {
        builder: BracketBuilder::new(),
        num_alliances: num_alliances as AllianceId,
    };

    let eighthfinals: Vec<_> = EIGHTHFINAL_SEEDS
        .iter()
        .zip(1..)
        .map(|(&(red, blue), set)| {
            builder.source(Matchup::new(
                format!("EF{}", set),
                2,
                AllianceSource::seed(red),
                AllianceSource::seed(blue),
                round_matches("Eighthfinal", "EF", set, |game| set + 8 * (game - 1)),
            ))
        })
        .collect();

    let quarterfinals = builder.round(&eighthfinals, "Quaterfinal", "QF", |set, game| {
        24 + set + 4 * (game - 1)
    });
    let semifinals = builder.round(&quarterfinals, "Semifinal", "SF", |set, game| {
        36 + set + 2 * (game - 1)
    });

    let final_matchup = builder.builder.push(Matchup::new(
        "F",
        2,
        semifinals[0],
        semifinals[1],
        new_final_matches(43),
    ));

    let mut break_specs = Vec::new();
    if num_alliances > 2 {
        break_specs.push(BreakSpec::new(43, 480, "Field Break"));
    }
    break_specs.push(BreakSpec::new(44, 480, "Field Break"));
    break_specs.push(BreakSpec::new(45, 480, "Field Break"));

    Ok(builder.builder.build(final_matchup, break_specs))
}

struct SingleEliminationBuilder {
    builder: BracketBuilder,
    num_alliances: AllianceId,
}

impl SingleEliminationBuilder {
    /// Returns the source that feeds the next round from `matchup`.
    ///
    /// If one side of `matchup` is a seed beyond the number of alliances the other side advances
    /// directly and `matchup` is dropped.
    fn source(&mut self, matchup: Matchup) -> AllianceSource {
        let red_alliance_id = self.builder.alliance_id(matchup.red_alliance_source);
        let blue_alliance_id = self.builder.alliance_id(matchup.blue_alliance_source);

        if blue_alliance_id > red_alliance_id && blue_alliance_id > self.num_alliances {
            return matchup.red_alliance_source;
        }

        if red_alliance_id > blue_alliance_id && red_alliance_id > self.num_alliances {
            return matchup.blue_alliance_source;
        }

        AllianceSource::winner(self.builder.push(matchup))
    }

    /// Pairs up the consecutive `sources` of the previous round.
    fn round<F>(
        &mut self,
        sources: &[AllianceSource],
        long_round_name: &str,
        short_round_name: &str,
        order: F,
    ) -> Vec<AllianceSource>
    where
        F: Fn(u32, u32) -> u32,
    {
        sources
            .chunks_exact(2)
            .zip(1..)
            .map(|(pair, set)| {
                self.source(Matchup::new(
                    format!("{}{}", short_round_name, set),
                    2,
                    pair[0],
                    pair[1],
                    round_matches(long_round_name, short_round_name, set, |game| {
                        order(set, game)
                    }),
                ))
            })
            .collect()
    }
}

fn round_matches<F>(
    long_round_name: &str,
    short_round_name: &str,
    set_number: u32,
    order: F,
) -> Vec<MatchSpec>
where
    F: Fn(u32) -> u32,
{
    (1..=3)
        .map(|game| {
            new_single_elimination_match(
                long_round_name,
                short_round_name,
                set_number,
                game,
                order(game),
            )
        })
        .collect()
}

pub(crate) fn new_single_elimination_match(
    long_round_name: &str,
    short_round_name: &str,
    set_number: u32,
    match_number: u32,
    order: u32,
) -> MatchSpec {
    MatchSpec {
        long_name: format!("{} {}-{}", long_round_name, set_number, match_number),
        short_name: format!("{}{}-{}", short_round_name, set_number, match_number),
        order,
        duration_sec: 600,
        use_tiebreak_criteria: true,
        tba_match_key: TbaMatchKey::new(
            short_round_name.to_lowercase(),
            set_number,
            match_number,
        ),
        ..Default::default()
    }
}

/// Returns the matches of a best-of-three final starting at `starting_order`, followed by three
/// hidden overtime matches.
pub(crate) fn new_final_matches(starting_order: u32) -> Vec<MatchSpec> {
    let finals = (1..=3).map(|number| MatchSpec {
        long_name: format!("Final {}", number),
        short_name: format!("F{}", number),
        order: starting_order + number - 1,
        duration_sec: 300,
        use_tiebreak_criteria: false,
        tba_match_key: TbaMatchKey::new("f", 1, number),
        ..Default::default()
    });

    let overtimes = (1..=3).map(|number| MatchSpec {
        long_name: format!("Overtime {}", number),
        short_name: format!("O{}", number),
        order: starting_order + number + 2,
        duration_sec: 600,
        use_tiebreak_criteria: true,
        is_hidden: true,
        tba_match_key: TbaMatchKey::new("f", 1, number + 3),
        ..Default::default()
    });

    finals.chain(overtimes).collect()
}
