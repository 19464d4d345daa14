use chrono::{DateTime, Utc};
use clap::{Subcommand, ValueEnum};
use field_control_playoff::store::{Alliance, MatchType};
use field_control_playoff::{
    AllianceId, Bracket, MatchStatus, MatchupId, PlayoffMatchResult, PlayoffMatchResults,
    PlayoffTournament, Store, TeamId,
};

use crate::config::Config;
use crate::store::JsonStore;
use crate::{Error, Result};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Records an alliance. The first three teams form the driver station line-up.
    Alliance {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        id: AllianceId,
        #[arg(required = true, num_args = 3..)]
        teams: Vec<TeamId>,
    },
    /// Creates all playoff matches and breaks.
    Schedule {
        /// The time of the first playoff match in RFC 3339 format. Defaults to now.
        #[arg(long)]
        start: Option<DateTime<Utc>>,
    },
    /// Commits the result of a playoff match and advances the bracket.
    Result {
        order: u32,
        #[arg(value_enum)]
        outcome: Outcome,
    },
    /// Re-evaluates the bracket against the stored match results.
    Update,
    /// Lists all playoff matches and breaks.
    Matches,
    /// Prints the current state of the bracket.
    Bracket,
}

impl Command {
    /// Returns `true` if the command modifies the event store.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Matches | Self::Bracket)
    }

    pub fn run(&self, config: &Config, store: &mut JsonStore) -> Result<()> {
        match self {
            Self::Alliance { id, teams } => {
                let line_up = match teams.as_slice() {
                    [team1, team2, team3, ..] => [*team1, *team2, *team3],
                    _ => return Err(Error::InvalidLineUp),
                };

                store.save_alliance(Alliance {
                    id: *id,
                    team_ids: teams.clone(),
                    line_up,
                });

                log::info!("Saved alliance {} with teams {:?}", id, teams);
            }
            Self::Schedule { start } => {
                let tournament = tournament(config)?;
                tournament.create_match_and_breaks(store, start.unwrap_or_else(Utc::now))?;
            }
            Self::Result { order, outcome } => {
                let mut r#match = store
                    .read_matches_by_type(MatchType::Playoff)?
                    .into_iter()
                    .find(|m| m.type_order == *order)
                    .ok_or(field_control_playoff::Error::MatchNotFound(*order))?;

                if r#match.status == MatchStatus::Hidden {
                    return Err(Error::MatchHidden(*order));
                }

                r#match.status = MatchStatus::from(outcome.result());
                store.update_match(&r#match)?;

                log::info!("Committed result of {}: {}", r#match.long_name, r#match.status);

                tournament(config)?.update_matches(store)?;
            }
            Self::Update => {
                tournament(config)?.update_matches(store)?;
            }
            Self::Matches => {
                let matches = store.read_matches_by_type(MatchType::Playoff)?;
                let mut breaks = store
                    .read_scheduled_breaks_by_match_type(MatchType::Playoff)?
                    .into_iter()
                    .peekable();

                println!("Order | Time | Name | Detail | Red | Blue | Status");
                for r#match in matches {
                    while let Some(scheduled_break) =
                        breaks.next_if(|b| b.type_order_before <= r#match.type_order)
                    {
                        println!(
                            "- | {} | {} ({} min)",
                            scheduled_break.time,
                            scheduled_break.description,
                            scheduled_break.duration_sec / 60
                        );
                    }

                    println!(
                        "{} | {} | {} | {} | {} {:?} | {} {:?} | {}",
                        r#match.type_order,
                        r#match.scheduled_time,
                        r#match.short_name,
                        r#match.name_detail,
                        alliance_name(r#match.playoff_red_alliance),
                        r#match.red_teams(),
                        alliance_name(r#match.playoff_blue_alliance),
                        r#match.blue_teams(),
                        r#match.status,
                    );
                }
            }
            Self::Bracket => {
                let mut tournament = tournament(config)?;

                let results: PlayoffMatchResults = store
                    .read_matches_by_type(MatchType::Playoff)?
                    .iter()
                    .filter_map(|m| {
                        PlayoffMatchResult::from_status(m.status).map(|res| (m.type_order, res))
                    })
                    .collect();
                tournament.update(&results);

                let bracket = tournament.bracket();

                println!("Matchup | Red | Blue | Status | Red Destination | Blue Destination");
                tournament.traverse(|id, matchup| {
                    let (_, status) = matchup.status_text();

                    println!(
                        "{} | {} | {} | {} | {} | {}",
                        matchup.id(),
                        source_name(bracket, id, true),
                        source_name(bracket, id, false),
                        status,
                        bracket.red_alliance_destination(id),
                        bracket.blue_alliance_destination(id),
                    );
                });

                if tournament.is_complete() {
                    println!(
                        "Winner: {}, Finalist: {}",
                        alliance_name(tournament.winning_alliance_id()),
                        alliance_name(tournament.finalist_alliance_id())
                    );
                }
            }
        }

        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    Red,
    Blue,
    Tie,
}

impl Outcome {
    #[inline]
    pub fn result(self) -> PlayoffMatchResult {
        match self {
            Self::Red => PlayoffMatchResult::RedWon,
            Self::Blue => PlayoffMatchResult::BlueWon,
            Self::Tie => PlayoffMatchResult::Tie,
        }
    }
}

fn tournament(config: &Config) -> Result<PlayoffTournament> {
    Ok(PlayoffTournament::new(
        config.playoff.kind,
        config.playoff.alliances,
    )?)
}

fn alliance_name(id: AllianceId) -> String {
    match id {
        0 => String::from("TBD"),
        id => format!("A{}", id),
    }
}

fn source_name(bracket: &Bracket, id: MatchupId, red: bool) -> String {
    let matchup = &bracket[id];
    let (name, alliance_id) = if red {
        (
            bracket.red_alliance_source_display_name(id),
            matchup.red_alliance_id(),
        )
    } else {
        (
            bracket.blue_alliance_source_display_name(id),
            matchup.blue_alliance_id(),
        )
    };

    format!("{} ({})", name, alliance_name(alliance_id))
}

#[cfg(test)]
mod tests {
    use std::env;

    use chrono::{TimeZone, Utc};
    use field_control_playoff::store::MatchType;
    use field_control_playoff::{MatchStatus, Store};

    use super::{alliance_name, Command, Outcome};
    use crate::config::Config;
    use crate::store::JsonStore;
    use crate::Error;

    fn store(name: &str) -> JsonStore {
        let path = env::temp_dir().join(format!(
            "field-control-{}-{}.json",
            name,
            std::process::id()
        ));

        JsonStore::open(path).unwrap()
    }

    fn schedule(config: &Config, store: &mut JsonStore) {
        for id in 1..=8 {
            Command::Alliance {
                id,
                teams: vec![id * 100 + 1, id * 100 + 2, id * 100 + 3, id * 100 + 4],
            }
            .run(config, store)
            .unwrap();
        }

        Command::Schedule {
            start: Some(Utc.timestamp_opt(5000, 0).unwrap()),
        }
        .run(config, store)
        .unwrap();
    }

    #[test]
    fn test_command_alliance() {
        let config = Config::default();
        let mut store = store("alliance");

        Command::Alliance {
            id: 2,
            teams: vec![254, 1114, 2056, 148],
        }
        .run(&config, &mut store)
        .unwrap();

        let alliances = store.read_alliances().unwrap();
        assert_eq!(alliances.len(), 1);
        assert_eq!(alliances[0].id, 2);
        assert_eq!(alliances[0].team_ids, [254, 1114, 2056, 148]);
        assert_eq!(alliances[0].line_up, [254, 1114, 2056]);

        let res = Command::Alliance {
            id: 3,
            teams: vec![1, 2],
        }
        .run(&config, &mut store);
        assert!(matches!(res, Err(Error::InvalidLineUp)));
    }

    #[test]
    fn test_command_schedule() {
        let config = Config::default();
        let mut store = store("schedule");
        schedule(&config, &mut store);

        let matches = store.read_matches_by_type(MatchType::Playoff).unwrap();
        assert_eq!(matches.len(), 19);
        assert_eq!(matches[0].scheduled_time, Utc.timestamp_opt(5000, 0).unwrap());
        assert_eq!(matches[0].red_teams(), [101, 102, 103]);
        assert_eq!(matches[0].blue_teams(), [801, 802, 803]);

        let res = Command::Schedule { start: None }.run(&config, &mut store);
        assert!(matches!(
            res,
            Err(Error::Playoff(field_control_playoff::Error::MatchesExist))
        ));
    }

    #[test]
    fn test_command_result() {
        let config = Config::default();
        let mut store = store("result");
        schedule(&config, &mut store);

        Command::Result {
            order: 1,
            outcome: Outcome::Blue,
        }
        .run(&config, &mut store)
        .unwrap();

        let matches = store.read_matches_by_type(MatchType::Playoff).unwrap();
        assert_eq!(matches[0].status, MatchStatus::BlueWon);

        let res = Command::Result {
            order: 17,
            outcome: Outcome::Red,
        }
        .run(&config, &mut store);
        assert!(matches!(res, Err(Error::MatchHidden(17))));

        let res = Command::Result {
            order: 99,
            outcome: Outcome::Red,
        }
        .run(&config, &mut store);
        assert!(matches!(
            res,
            Err(Error::Playoff(field_control_playoff::Error::MatchNotFound(
                99
            )))
        ));

        Command::Update.run(&config, &mut store).unwrap();
        Command::Matches.run(&config, &mut store).unwrap();
        Command::Bracket.run(&config, &mut store).unwrap();
    }

    #[test]
    fn test_command_update_without_matches() {
        let config = Config::default();
        let mut store = store("update");

        let res = Command::Update.run(&config, &mut store);
        assert!(matches!(
            res,
            Err(Error::Playoff(field_control_playoff::Error::NoMatches))
        ));

        Command::Bracket.run(&config, &mut store).unwrap();
    }

    #[test]
    fn test_command_is_mutating() {
        assert!(Command::Update.is_mutating());
        assert!(Command::Schedule { start: None }.is_mutating());
        assert!(!Command::Matches.is_mutating());
        assert!(!Command::Bracket.is_mutating());
    }

    #[test]
    fn test_alliance_name() {
        assert_eq!(alliance_name(0), "TBD");
        assert_eq!(alliance_name(4), "A4");
    }
}
