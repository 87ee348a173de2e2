//! Unit tests for command parsing and dispatch

use super::*;
use crate::{config::SessionConfig, storage::LeagueDatabase, LeagueError};

fn create_test_context() -> AppContext {
    AppContext::new(LeagueDatabase::new_in_memory().unwrap(), SessionConfig::default())
}

/// Parse and execute one line, returning what the command printed
fn run(ctx: &mut AppContext, line: &str) -> Result<String> {
    let mut out = Vec::new();
    let mut console = Console::new(&mut out);
    let command = parse_line(line)?.expect("non-blank line");
    ctx.execute(command, &mut console)?;
    Ok(String::from_utf8(out).unwrap())
}

/// Yankees (with a field) and Mets (with one too), plus four officials
fn create_league() -> AppContext {
    let mut ctx = create_test_context();
    run(&mut ctx, "create-team Yankees \"Yankee Stadium\" Bronx").unwrap();
    run(&mut ctx, "create-team Mets \"Citi Field\" Queens").unwrap();
    for (last, first) in [("West", "Joe"), ("Kulpa", "Ron"), ("Hernandez", "Angel"), ("Wendelstedt", "Hunter")] {
        run(&mut ctx, &format!("create-official {} {}", last, first)).unwrap();
    }
    ctx
}

mod parser_tests {
    use super::*;

    #[test]
    fn test_tokenize_groups_quoted_words() {
        let tokens = tokenize("create-team \"Red Sox\" \"Fenway Park\"  \"4 Jersey St\"").unwrap();
        assert_eq!(tokens, vec!["create-team", "Red Sox", "Fenway Park", "4 Jersey St"]);
    }

    #[test]
    fn test_tokenize_keeps_empty_quoted_argument() {
        let tokens = tokenize("create-team Yankees \"\"").unwrap();
        assert_eq!(tokens, vec!["create-team", "Yankees", ""]);
    }

    #[test]
    fn test_tokenize_rejects_unterminated_quote() {
        let result = tokenize("create-team \"Red Sox");
        assert!(matches!(result, Err(LeagueError::InvalidArgument { .. })));
    }

    #[test]
    fn test_blank_line_is_not_a_command() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   \t ").unwrap(), None);
    }

    #[test]
    fn test_alias_and_case_insensitive_verb() {
        let expected = Command::CreateTeam {
            team: "Yankees".to_string(),
            field: None,
            address: None,
        };
        assert_eq!(parse_line("creerEquipe Yankees").unwrap(), Some(expected.clone()));
        assert_eq!(parse_line("CREATE-TEAM Yankees").unwrap(), Some(expected));
        assert_eq!(parse_line("QUITTER").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_unknown_verb() {
        match parse_line("trade-player Jeter Derek") {
            Err(LeagueError::UnknownCommand { name }) => assert_eq!(name, "trade-player"),
            other => panic!("Expected UnknownCommand, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_parameter_names_command_and_field() {
        match parse_line("create-player Jeter") {
            Err(LeagueError::MissingParameter { command, parameter }) => {
                assert_eq!(command, "create-player");
                assert_eq!(parameter, "FirstName");
            }
            other => panic!("Expected MissingParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_team_without_number_is_missing_number() {
        match parse_line("create-player Jeter Derek Yankees") {
            Err(LeagueError::MissingParameter { parameter, .. }) => assert_eq!(parameter, "Number"),
            other => panic!("Expected MissingParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_create_player_with_roster_spot() {
        let command = parse_line("create-player Jeter Derek Yankees 2 1995-05-29").unwrap();
        match command {
            Some(Command::CreatePlayer { last_name, first_name, roster: Some(spot) }) => {
                assert_eq!(last_name, "Jeter");
                assert_eq!(first_name, "Derek");
                assert_eq!(spot.team, "Yankees");
                assert_eq!(spot.number, 2);
                assert_eq!(spot.start_date.unwrap().to_string(), "1995-05-29");
            }
            other => panic!("Expected CreatePlayer with roster, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_number_is_invalid() {
        let result = parse_line("create-player Jeter Derek Yankees -2");
        assert!(matches!(result, Err(LeagueError::InvalidArgument { .. })));
    }

    #[test]
    fn test_negative_score() {
        match parse_line("enter-match-result 2024-05-01 19:05 Yankees Mets -3 2") {
            Err(LeagueError::NegativeScore { value }) => assert_eq!(value, -3),
            other => panic!("Expected NegativeScore, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_score() {
        let result = parse_line("enter-match-result 2024-05-01 19:05 Yankees Mets three 2");
        assert!(matches!(result, Err(LeagueError::InvalidArgument { .. })));
    }

    #[test]
    fn test_invalid_match_date() {
        let result = parse_line("create-match 2024-13-01 19:05 Yankees Mets");
        assert!(matches!(result, Err(LeagueError::InvalidArgument { .. })));
    }

    #[test]
    fn test_too_many_parameters() {
        match parse_line("list-teams everything") {
            Err(LeagueError::TooManyParameters { command, max }) => {
                assert_eq!(command, "list-teams");
                assert_eq!(max, 0);
            }
            other => panic!("Expected TooManyParameters, got {:?}", other),
        }
        assert!(matches!(
            parse_line("delete-team Yankees Mets"),
            Err(LeagueError::TooManyParameters { max: 1, .. })
        ));
    }

    #[test]
    fn test_optional_arguments() {
        assert_eq!(
            parse_line("list-results-by-date").unwrap(),
            Some(Command::ListResultsByDate { from: None })
        );
        assert_eq!(
            parse_line("afficherJoueursEquipe").unwrap(),
            Some(Command::ListPlayersForTeam { team: None })
        );
    }

    #[test]
    fn test_every_registered_verb_parses() {
        for spec in registry::COMMANDS.iter().filter(|s| s.usage.is_empty()) {
            assert!(parse_line(spec.name).unwrap().is_some(), "{} did not parse", spec.name);
            assert!(parse_line(spec.alias).unwrap().is_some(), "{} did not parse", spec.alias);
        }
    }
}

mod dispatch_tests {
    use super::*;

    #[test]
    fn test_create_and_list_teams() {
        let mut ctx = create_test_context();
        let output = run(&mut ctx, "create-team Yankees \"Yankee Stadium\" Bronx").unwrap();
        assert_eq!(output, "Team Yankees created with field Yankee Stadium.\n");
        run(&mut ctx, "create-team Mets").unwrap();

        let output = run(&mut ctx, "list-teams").unwrap();
        assert_eq!(output, "Mets, team #2\nYankees, team #1 (field: Yankee Stadium)\n");
    }

    #[test]
    fn test_list_teams_empty() {
        let mut ctx = create_test_context();
        assert_eq!(run(&mut ctx, "list-teams").unwrap(), "No teams.\n");
    }

    #[test]
    fn test_duplicate_team_writes_nothing() {
        let mut ctx = create_test_context();
        run(&mut ctx, "create-team Yankees \"Yankee Stadium\"").unwrap();

        let result = run(&mut ctx, "create-team Yankees \"Other Park\"");
        assert!(matches!(result, Err(LeagueError::TeamNameTaken { .. })));
        assert_eq!(ctx.db.count_rows("teams").unwrap(), 1);
        assert_eq!(ctx.db.count_rows("fields").unwrap(), 1);
    }

    #[test]
    fn test_existing_field_name_rolls_back_team() {
        let mut ctx = create_test_context();
        run(&mut ctx, "create-team Yankees \"Shared Park\"").unwrap();

        let result = run(&mut ctx, "create-team Mets \"Shared Park\"");
        assert!(matches!(result, Err(LeagueError::FieldNameTaken { .. })));
        assert_eq!(ctx.db.count_rows("teams").unwrap(), 1);
    }

    #[test]
    fn test_delete_team_with_active_player_fails() {
        let mut ctx = create_league();
        run(&mut ctx, "create-player Jeter Derek Yankees 2").unwrap();

        let result = run(&mut ctx, "delete-team Yankees");
        assert!(matches!(result, Err(LeagueError::TeamNotEmpty { players: 1, .. })));
        assert_eq!(ctx.db.count_rows("teams").unwrap(), 2);
        assert_eq!(ctx.db.count_rows("team_memberships").unwrap(), 1);
    }

    #[test]
    fn test_delete_team() {
        let mut ctx = create_test_context();
        run(&mut ctx, "create-team Expos").unwrap();
        assert_eq!(run(&mut ctx, "delete-team Expos").unwrap(), "Team Expos deleted.\n");
        assert!(matches!(
            run(&mut ctx, "delete-team Expos"),
            Err(LeagueError::TeamNotFound { .. })
        ));
    }

    #[test]
    fn test_player_roster_listing() {
        let mut ctx = create_league();
        run(&mut ctx, "create-player Rivera Mariano Yankees 42").unwrap();
        run(&mut ctx, "create-player Jeter Derek Yankees 2").unwrap();
        run(&mut ctx, "create-player Free Agent").unwrap();

        let output = run(&mut ctx, "list-players-for-team Yankees").unwrap();
        assert_eq!(output, "  -> Derek Jeter #2\n  -> Mariano Rivera #42\n");

        let output = run(&mut ctx, "list-players-for-team").unwrap();
        assert_eq!(
            output,
            "Team: Mets\n  No players.\nTeam: Yankees\n  -> Derek Jeter #2\n  -> Mariano Rivera #42\n"
        );
    }

    #[test]
    fn test_create_player_unknown_team_writes_nothing() {
        let mut ctx = create_league();
        let result = run(&mut ctx, "create-player Ruth Babe \"Red Sox\" 3");
        assert!(matches!(result, Err(LeagueError::TeamNotFound { .. })));
        assert_eq!(ctx.db.count_rows("players").unwrap(), 0);
    }

    #[test]
    fn test_duplicate_player() {
        let mut ctx = create_league();
        run(&mut ctx, "create-player Jeter Derek").unwrap();
        let result = run(&mut ctx, "create-player Jeter Derek Yankees 2");
        assert!(matches!(result, Err(LeagueError::PlayerAlreadyExists { .. })));
    }

    #[test]
    fn test_delete_player_confirmation() {
        let mut ctx = create_league();
        run(&mut ctx, "create-player Jeter Derek Yankees 2").unwrap();

        let mut out = Vec::new();
        let mut input: &[u8] = b"n\n";
        let mut console = Console::interactive(&mut out, &mut input);
        let command = parse_line("delete-player Jeter Derek").unwrap().unwrap();
        ctx.execute(command, &mut console).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Delete player Derek Jeter? (y/n)"));
        assert!(text.contains("Deletion cancelled."));
        assert_eq!(ctx.db.count_rows("players").unwrap(), 1);

        let mut out = Vec::new();
        let mut input: &[u8] = b"yes\n";
        let mut console = Console::interactive(&mut out, &mut input);
        let command = parse_line("delete-player Jeter Derek").unwrap().unwrap();
        ctx.execute(command, &mut console).unwrap();
        assert_eq!(ctx.db.count_rows("players").unwrap(), 0);
        assert_eq!(ctx.db.count_rows("team_memberships").unwrap(), 0);
    }

    #[test]
    fn test_delete_player_end_of_input_cancels() {
        let mut ctx = create_league();
        run(&mut ctx, "create-player Jeter Derek").unwrap();

        let mut out = Vec::new();
        let mut input: &[u8] = b"";
        let mut console = Console::interactive(&mut out, &mut input);
        let command = parse_line("delete-player Jeter Derek").unwrap().unwrap();
        ctx.execute(command, &mut console).unwrap();
        assert_eq!(ctx.db.count_rows("players").unwrap(), 1);
    }

    #[test]
    fn test_delete_missing_player() {
        let mut ctx = create_league();
        let result = run(&mut ctx, "delete-player Ruth Babe");
        assert!(matches!(result, Err(LeagueError::PlayerNotFound { .. })));
    }

    #[test]
    fn test_match_against_itself_ignores_case() {
        let mut ctx = create_league();
        let result = run(&mut ctx, "create-match 2024-05-01 19:05 Yankees yankees");
        assert!(matches!(result, Err(LeagueError::TeamCannotPlayItself { .. })));
        assert_eq!(ctx.db.count_rows("matches").unwrap(), 0);
    }

    #[test]
    fn test_local_team_without_field_cannot_host() {
        let mut ctx = create_league();
        run(&mut ctx, "create-team Expos").unwrap();
        let result = run(&mut ctx, "create-match 2024-05-01 19:05 Expos Mets");
        assert!(matches!(result, Err(LeagueError::TeamHasNoField { .. })));
    }

    #[test]
    fn test_duplicate_match() {
        let mut ctx = create_league();
        run(&mut ctx, "create-match 2024-05-01 19:05 Yankees Mets").unwrap();
        let result = run(&mut ctx, "create-match 2024-05-01 19:05:00 Yankees Mets");
        assert!(matches!(result, Err(LeagueError::MatchAlreadyExists { .. })));
    }

    #[test]
    fn test_fifth_official_is_rejected() {
        let mut ctx = create_league();
        run(&mut ctx, "create-official Davis Gerry").unwrap();
        run(&mut ctx, "create-match 2024-05-01 19:05 Yankees Mets").unwrap();

        for (last, first) in [("West", "Joe"), ("Kulpa", "Ron"), ("Hernandez", "Angel"), ("Wendelstedt", "Hunter")] {
            run(
                &mut ctx,
                &format!("assign-official-to-match 2024-05-01 19:05 Yankees Mets {} {}", last, first),
            )
            .unwrap();
        }

        let result = run(&mut ctx, "arbitrerMatch 2024-05-01 19:05 Yankees Mets Davis Gerry");
        assert!(matches!(result, Err(LeagueError::TooManyOfficials { max: 4 })));
        assert_eq!(ctx.db.count_rows("match_officials").unwrap(), 4);
    }

    #[test]
    fn test_assign_official_to_unknown_match() {
        let mut ctx = create_league();
        let result = run(&mut ctx, "assign-official-to-match 2024-05-01 19:05 Yankees Mets West Joe");
        assert!(matches!(result, Err(LeagueError::MatchNotFound { .. })));
    }

    #[test]
    fn test_result_listing() {
        let mut ctx = create_league();
        run(&mut ctx, "create-match 2024-05-01 19:05 Yankees Mets").unwrap();
        run(&mut ctx, "create-match 2024-06-01 13:10 Mets Yankees").unwrap();
        run(&mut ctx, "assign-official-to-match 2024-05-01 19:05 Yankees Mets West Joe").unwrap();
        run(&mut ctx, "assign-official-to-match 2024-05-01 19:05 Yankees Mets Kulpa Ron").unwrap();
        let output = run(&mut ctx, "enter-match-result 2024-05-01 19:05 Yankees Mets 5 3").unwrap();
        assert_eq!(output, "Result recorded: Yankees 5 - 3 Mets.\n");

        let output = run(&mut ctx, "list-results-by-date").unwrap();
        assert_eq!(
            output,
            "Match #1: 2024-05-01 19:05:00 at Yankee Stadium\n  Yankees 5 - 3 Mets\n  Officials: Ron Kulpa, Joe West\n\
             Match #2: 2024-06-01 13:10:00 at Citi Field\n  Mets vs Yankees (no result yet)\n  No officials for this match.\n"
        );

        let output = run(&mut ctx, "list-results-by-date 2024-05-02").unwrap();
        assert!(output.starts_with("Match #2"));
        assert!(!output.contains("Match #1"));
    }

    #[test]
    fn test_results_for_unknown_team() {
        let mut ctx = create_league();
        let result = run(&mut ctx, "list-results-for-team Expos");
        assert!(matches!(result, Err(LeagueError::TeamNotFound { .. })));
    }

    #[test]
    fn test_results_without_matches() {
        let mut ctx = create_league();
        assert_eq!(run(&mut ctx, "list-results-for-team Yankees").unwrap(), "No matches.\n");
    }

    #[test]
    fn test_list_officials_alphabetical() {
        let mut ctx = create_league();
        let output = run(&mut ctx, "list-officials").unwrap();
        assert_eq!(
            output,
            "Officials:\n  Hernandez, Angel\n  Kulpa, Ron\n  Wendelstedt, Hunter\n  West, Joe\n"
        );
    }

    #[test]
    fn test_list_fields() {
        let mut ctx = create_league();
        run(&mut ctx, "create-team Expos \"Olympic Stadium\"").unwrap();
        let output = run(&mut ctx, "list-fields").unwrap();
        assert_eq!(output, "Citi Field (Queens)\nOlympic Stadium\nYankee Stadium (Bronx)\n");
    }

    #[test]
    fn test_standings_count_recorded_results_only() {
        let mut ctx = create_league();
        run(&mut ctx, "create-match 2024-05-01 19:05 Yankees Mets").unwrap();
        run(&mut ctx, "create-match 2024-05-02 19:05 Yankees Mets").unwrap();
        run(&mut ctx, "enter-match-result 2024-05-01 19:05 Yankees Mets 2 7").unwrap();

        ctx.config.as_json = true;
        let output = run(&mut ctx, "list-standings").unwrap();
        let standings: Vec<crate::storage::Standing> = serde_json::from_str(&output).unwrap();
        assert_eq!(standings[0].team, "Mets");
        assert_eq!(standings[0].played, 1);
        assert_eq!(standings[0].wins, 1);
        assert_eq!(standings[1].team, "Yankees");
        assert_eq!(standings[1].losses, 1);
        assert_eq!(standings[1].runs_against, 7);
    }

    #[test]
    fn test_standings_columns_align_with_accented_names() {
        let mut ctx = create_test_context();
        run(&mut ctx, "create-team \"Montréal Expos\"").unwrap();
        run(&mut ctx, "create-team \"Toronto Blue Jays\"").unwrap();

        let output = run(&mut ctx, "list-standings").unwrap();
        let widths: Vec<usize> = output.lines().map(|line| line.chars().count()).collect();
        assert_eq!(widths.len(), 3);
        assert!(widths.iter().all(|w| *w == widths[0]), "{:?}", widths);
    }

    #[test]
    fn test_json_team_listing() {
        let mut ctx = create_league();
        ctx.config.as_json = true;
        let output = run(&mut ctx, "list-teams").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let teams = value.as_array().unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[1]["name"], "Yankees");
        assert_eq!(teams[1]["field"], "Yankee Stadium");
    }

    #[test]
    fn test_help_lists_every_command() {
        let mut ctx = create_test_context();
        let output = run(&mut ctx, "aide").unwrap();
        for spec in registry::COMMANDS {
            assert!(output.contains(spec.name), "help is missing {}", spec.name);
        }
        assert!(output.contains(" - create-team <TeamName> [<FieldName> [<FieldAddress>]] (alias: creerEquipe)"));
    }

    #[test]
    fn test_quit() {
        let mut ctx = create_test_context();
        let mut out = Vec::new();
        let mut console = Console::new(&mut out);
        assert_eq!(ctx.execute(Command::Quit, &mut console).unwrap(), Outcome::Quit);
        assert_eq!(ctx.execute(Command::ListTeams, &mut console).unwrap(), Outcome::Continue);
    }
}
