use crate::single_elimination::new_final_matches;
use crate::{
    AllianceSource, Bracket, BracketBuilder, BreakSpec, Error, MatchSpec, Matchup, PlayoffType,
    Result, TbaMatchKey,
};

/// Creates an eight alliance double elimination bracket.
///
/// Every matchup before the final is a single match. Alliances that lose in the upper bracket
/// drop into the lower bracket and are eliminated on their second loss. The final is a best of
/// three between the winners of both brackets.
///
/// # Errors
///
/// Returns [`Error::InvalidAllianceCount`] if `num_alliances` is not `8`.
pub fn new_double_elimination_bracket(num_alliances: usize) -> Result<Bracket> {
    if num_alliances != 8 {
        return Err(Error::InvalidAllianceCount {
            kind: PlayoffType::DoubleElimination,
            count: num_alliances,
        });
    }

    use AllianceSource as Source;

    let mut builder = BracketBuilder::new();
    let mut matchup = |number: u32,
                       red: AllianceSource,
                       blue: AllianceSource,
                       name_detail: &str,
                       duration_sec: u32| {
        builder.push(Matchup::new(
            format!("M{}", number),
            1,
            red,
            blue,
            new_double_elimination_match(number, name_detail, duration_sec),
        ))
    };

    // Round 1
    let m1 = matchup(1, Source::seed(1), Source::seed(8), "Round 1 Upper", 540);
    let m2 = matchup(2, Source::seed(4), Source::seed(5), "Round 1 Upper", 540);
    let m3 = matchup(3, Source::seed(2), Source::seed(7), "Round 1 Upper", 540);
    let m4 = matchup(4, Source::seed(3), Source::seed(6), "Round 1 Upper", 540);

    // Round 2
    let m5 = matchup(5, Source::loser(m1), Source::loser(m2), "Round 2 Lower", 540);
    let m6 = matchup(6, Source::loser(m3), Source::loser(m4), "Round 2 Lower", 540);
    let m7 = matchup(7, Source::winner(m1), Source::winner(m2), "Round 2 Upper", 540);
    let m8 = matchup(8, Source::winner(m3), Source::winner(m4), "Round 2 Upper", 540);

    // Round 3
    let m9 = matchup(9, Source::loser(m7), Source::winner(m6), "Round 3 Lower", 540);
    let m10 = matchup(10, Source::loser(m8), Source::winner(m5), "Round 3 Lower", 300);

    // Round 4
    let m11 = matchup(11, Source::winner(m7), Source::winner(m8), "Round 4 Upper", 540);
    let m12 = matchup(12, Source::winner(m10), Source::winner(m9), "Round 4 Lower", 300);

    // Round 5
    let m13 = matchup(13, Source::loser(m11), Source::winner(m12), "Round 5 Lower", 300);

    let final_matchup = builder.push(Matchup::new(
        "F",
        2,
        Source::winner(m11),
        Source::winner(m13),
        new_final_matches(14),
    ));

    let break_specs = vec![
        BreakSpec::new(11, 360, "Field Break"),
        BreakSpec::new(13, 900, "Award Break"),
        BreakSpec::new(14, 900, "Award Break"),
        BreakSpec::new(15, 900, "Award Break"),
        BreakSpec::new(16, 900, "Award Break"),
    ];

    Ok(builder.build(final_matchup, break_specs))
}

pub(crate) fn new_double_elimination_match(
    number: u32,
    name_detail: &str,
    duration_sec: u32,
) -> Vec<MatchSpec> {
    vec![MatchSpec {
        long_name: format!("Match {}", number),
        short_name: format!("M{}", number),
        name_detail: name_detail.to_owned(),
        order: number,
        duration_sec,
        use_tiebreak_criteria: true,
        tba_match_key: TbaMatchKey::new("sf", number, 1),
        ..Default::default()
    }]
}

#[cfg(test)]
mod tests {
    use super::new_double_elimination_bracket;
    use crate::tests::{alliances, outcome, BlueWon, RedWon, Tie};
    use crate::{
        collect_match_groups, collect_match_specs, results, BreakSpec, Error, PlayoffTournament,
        PlayoffType, TbaMatchKey,
    };

    #[test]
    fn test_double_elimination_initial() {
        let mut bracket = new_double_elimination_bracket(8).unwrap();
        let specs = collect_match_specs(&mut bracket).unwrap();
        bracket.update(&results!());

        let specs: Vec<_> = specs.into_iter().map(|spec| bracket.match_spec(spec)).collect();
        assert_eq!(specs.len(), 19);

        let details = [
            "Round 1 Upper",
            "Round 1 Upper",
            "Round 1 Upper",
            "Round 1 Upper",
            "Round 2 Lower",
            "Round 2 Lower",
            "Round 2 Upper",
            "Round 2 Upper",
            "Round 3 Lower",
            "Round 3 Lower",
            "Round 4 Upper",
            "Round 4 Lower",
            "Round 5 Lower",
        ];
        for (i, spec) in specs[..13].iter().enumerate() {
            let number = i as u32 + 1;
            assert_eq!(spec.long_name, format!("Match {}", number));
            assert_eq!(spec.short_name, format!("M{}", number));
            assert_eq!(spec.name_detail, details[i]);
            assert_eq!(spec.match_group_id, format!("M{}", number));
            assert_eq!(spec.order, number);
            assert_eq!(spec.tba_match_key, TbaMatchKey::new("sf", number, 1));
            assert!(spec.use_tiebreak_criteria);
            assert!(!spec.is_hidden);

            let duration_sec = if matches!(number, 10 | 12 | 13) { 300 } else { 540 };
            assert_eq!(spec.duration_sec, duration_sec);
        }

        let names: Vec<_> = specs[13..].iter().map(|spec| spec.long_name.as_str()).collect();
        assert_eq!(
            names,
            ["Final 1", "Final 2", "Final 3", "Overtime 1", "Overtime 2", "Overtime 3"]
        );
        for (i, spec) in specs[13..].iter().enumerate() {
            assert_eq!(spec.order, 14 + i as u32);
            assert_eq!(spec.match_group_id, "F");
        }

        assert_eq!(alliances(&specs[..4]), [(1, 8), (4, 5), (2, 7), (3, 6)]);
        assert_eq!(alliances(&specs[4..]), [(0, 0); 15]);

        assert_eq!(collect_match_groups(&bracket).unwrap().len(), 14);
        assert_eq!(
            bracket.break_specs(),
            [
                BreakSpec::new(11, 360, "Field Break"),
                BreakSpec::new(13, 900, "Award Break"),
                BreakSpec::new(14, 900, "Award Break"),
                BreakSpec::new(15, 900, "Award Break"),
                BreakSpec::new(16, 900, "Award Break"),
            ]
        );
    }

    #[test]
    fn test_double_elimination_errors() {
        for num_alliances in [0, 2, 7, 9, 16] {
            assert_eq!(
                new_double_elimination_bracket(num_alliances).unwrap_err(),
                Error::InvalidAllianceCount {
                    kind: PlayoffType::DoubleElimination,
                    count: num_alliances
                }
            );
        }
    }

    #[test]
    fn test_double_elimination_progression() {
        let mut tournament = PlayoffTournament::new(PlayoffType::DoubleElimination, 8).unwrap();
        let mut results = results!();

        assert_eq!(
            outcome(tournament.bracket(), "M1"),
            (String::new(), String::new())
        );

        results.insert(1, RedWon);
        tournament.update(&results);
        assert_eq!(
            alliances(&tournament.match_specs()[4..7]),
            [(8, 0), (0, 0), (1, 0)]
        );
        assert_eq!(alliances(&tournament.match_specs()[7..]), [(0, 0); 12]);
        assert_eq!(
            outcome(tournament.bracket(), "M1"),
            (
                String::from("Advances to Match 7 - Round 2 Upper"),
                String::from("Advances to Match 5 - Round 2 Lower")
            )
        );

        results.insert(1, BlueWon);
        tournament.update(&results);
        assert_eq!(
            alliances(&tournament.match_specs()[4..7]),
            [(1, 0), (0, 0), (8, 0)]
        );
        assert_eq!(
            outcome(tournament.bracket(), "M1"),
            (
                String::from("Advances to Match 5 - Round 2 Lower"),
                String::from("Advances to Match 7 - Round 2 Upper")
            )
        );

        results.insert(2, RedWon);
        tournament.update(&results);
        assert_eq!(
            alliances(&tournament.match_specs()[4..7]),
            [(1, 5), (0, 0), (8, 4)]
        );

        results.insert(3, BlueWon);
        tournament.update(&results);
        assert_eq!(
            alliances(&tournament.match_specs()[5..8]),
            [(2, 0), (8, 4), (7, 0)]
        );
        assert_eq!(
            outcome(tournament.bracket(), "M3"),
            (
                String::from("Advances to Match 6 - Round 2 Lower"),
                String::from("Advances to Match 8 - Round 2 Upper")
            )
        );

        results.insert(4, RedWon);
        tournament.update(&results);
        assert_eq!(
            alliances(&tournament.match_specs()[5..8]),
            [(2, 6), (8, 4), (7, 3)]
        );
        assert_eq!(alliances(&tournament.match_specs()[8..]), [(0, 0); 11]);

        results.insert(5, BlueWon);
        tournament.update(&results);
        assert_eq!(
            alliances(&tournament.match_specs()[8..10]),
            [(0, 0), (0, 5)]
        );
        assert_eq!(
            outcome(tournament.bracket(), "M5"),
            (
                String::from("Eliminated"),
                String::from("Advances to Match 10 - Round 3 Lower")
            )
        );

        results.insert(6, RedWon);
        tournament.update(&results);
        assert_eq!(
            alliances(&tournament.match_specs()[8..10]),
            [(0, 2), (0, 5)]
        );

        // A tie does not decide a single match series.
        results.insert(7, Tie);
        tournament.update(&results);
        assert_eq!(
            alliances(&tournament.match_specs()[8..10]),
            [(0, 2), (0, 5)]
        );

        results.insert(7, BlueWon);
        tournament.update(&results);
        assert_eq!(
            alliances(&tournament.match_specs()[8..11]),
            [(8, 2), (0, 5), (4, 0)]
        );

        results.insert(8, BlueWon);
        tournament.update(&results);
        assert_eq!(
            alliances(&tournament.match_specs()[8..11]),
            [(8, 2), (7, 5), (4, 3)]
        );

        results.insert(9, RedWon);
        results.insert(10, RedWon);
        tournament.update(&results);
        assert_eq!(alliances(&tournament.match_specs()[11..12]), [(7, 8)]);

        results.insert(11, RedWon);
        tournament.update(&results);
        assert_eq!(alliances(&tournament.match_specs()[12..13]), [(3, 0)]);
        assert_eq!(alliances(&tournament.match_specs()[13..]), [(4, 0); 6]);
        assert_eq!(
            outcome(tournament.bracket(), "M11"),
            (
                String::from("Advances to Final 1"),
                String::from("Advances to Match 13 - Round 5 Lower")
            )
        );

        results.insert(12, RedWon);
        tournament.update(&results);
        assert_eq!(alliances(&tournament.match_specs()[12..13]), [(3, 7)]);
        assert_eq!(alliances(&tournament.match_specs()[13..]), [(4, 0); 6]);

        results.insert(13, RedWon);
        tournament.update(&results);
        assert_eq!(alliances(&tournament.match_specs()[13..]), [(4, 3); 6]);
        assert_eq!(
            outcome(tournament.bracket(), "M13"),
            (
                String::from("Advances to Final 1"),
                String::from("Eliminated")
            )
        );

        results.insert(14, BlueWon);
        results.insert(15, RedWon);
        results.insert(16, BlueWon);
        tournament.update(&results);
        assert!(tournament.is_complete());
        assert_eq!(tournament.winning_alliance_id(), 3);
        assert_eq!(tournament.finalist_alliance_id(), 4);
        assert_eq!(
            outcome(tournament.bracket(), "F"),
            (
                String::from("Tournament Finalist"),
                String::from("Tournament Winner")
            )
        );
    }
}
