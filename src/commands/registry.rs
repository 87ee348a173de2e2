//! The fixed table of console commands.

/// Every operation the console understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    CreateTeam,
    ListTeams,
    DeleteTeam,
    CreatePlayer,
    ListPlayersForTeam,
    DeletePlayer,
    CreateMatch,
    CreateOfficial,
    ListOfficials,
    AssignOfficialToMatch,
    EnterMatchResult,
    ListResultsByDate,
    ListResultsForTeam,
    ListFields,
    ListStandings,
    Help,
    Quit,
}

/// Verb, alias and usage line of a command
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub kind: CommandKind,
    pub name: &'static str,
    /// Older verb still accepted in scripts
    pub alias: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        kind: CommandKind::CreateTeam,
        name: "create-team",
        alias: "creerEquipe",
        usage: "<TeamName> [<FieldName> [<FieldAddress>]]",
        summary: "Create a team, optionally with a new home field",
    },
    CommandSpec {
        kind: CommandKind::ListTeams,
        name: "list-teams",
        alias: "afficherEquipes",
        usage: "",
        summary: "List all teams",
    },
    CommandSpec {
        kind: CommandKind::DeleteTeam,
        name: "delete-team",
        alias: "supprimerEquipe",
        usage: "<TeamName>",
        summary: "Delete a team that has no active player and no match",
    },
    CommandSpec {
        kind: CommandKind::CreatePlayer,
        name: "create-player",
        alias: "creerJoueur",
        usage: "<LastName> <FirstName> [<TeamName> <Number> [<StartDate>]]",
        summary: "Create a player, optionally on a team's roster",
    },
    CommandSpec {
        kind: CommandKind::ListPlayersForTeam,
        name: "list-players-for-team",
        alias: "afficherJoueursEquipe",
        usage: "[<TeamName>]",
        summary: "List the roster of one team, or of every team",
    },
    CommandSpec {
        kind: CommandKind::DeletePlayer,
        name: "delete-player",
        alias: "supprimerJoueur",
        usage: "<LastName> <FirstName>",
        summary: "Delete a player and their roster history",
    },
    CommandSpec {
        kind: CommandKind::CreateMatch,
        name: "create-match",
        alias: "creerMatch",
        usage: "<MatchDate> <MatchTime> <LocalTeam> <VisitorTeam>",
        summary: "Schedule a match at the local team's field",
    },
    CommandSpec {
        kind: CommandKind::CreateOfficial,
        name: "create-official",
        alias: "creerArbitre",
        usage: "<LastName> <FirstName>",
        summary: "Create an official",
    },
    CommandSpec {
        kind: CommandKind::ListOfficials,
        name: "list-officials",
        alias: "afficherArbitres",
        usage: "",
        summary: "List officials alphabetically",
    },
    CommandSpec {
        kind: CommandKind::AssignOfficialToMatch,
        name: "assign-official-to-match",
        alias: "arbitrerMatch",
        usage: "<MatchDate> <MatchTime> <LocalTeam> <VisitorTeam> <LastName> <FirstName>",
        summary: "Assign an official to a match (at most 4 per match)",
    },
    CommandSpec {
        kind: CommandKind::EnterMatchResult,
        name: "enter-match-result",
        alias: "entrerResultatMatch",
        usage: "<MatchDate> <MatchTime> <LocalTeam> <VisitorTeam> <LocalScore> <VisitorScore>",
        summary: "Record the final score of a match",
    },
    CommandSpec {
        kind: CommandKind::ListResultsByDate,
        name: "list-results-by-date",
        alias: "afficherResultatsDate",
        usage: "[<FromDate>]",
        summary: "List match results on or after a date",
    },
    CommandSpec {
        kind: CommandKind::ListResultsForTeam,
        name: "list-results-for-team",
        alias: "afficherResultats",
        usage: "[<TeamName>]",
        summary: "List match results of one team, or of every team",
    },
    CommandSpec {
        kind: CommandKind::ListFields,
        name: "list-fields",
        alias: "afficherTerrains",
        usage: "",
        summary: "List fields",
    },
    CommandSpec {
        kind: CommandKind::ListStandings,
        name: "list-standings",
        alias: "afficherClassement",
        usage: "",
        summary: "Show wins, losses and ties per team",
    },
    CommandSpec {
        kind: CommandKind::Help,
        name: "help",
        alias: "aide",
        usage: "",
        summary: "Show this list",
    },
    CommandSpec {
        kind: CommandKind::Quit,
        name: "quit",
        alias: "quitter",
        usage: "",
        summary: "Leave the console",
    },
];

/// Find a command by verb or alias, ignoring case
pub fn lookup(verb: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(verb) || spec.alias.eq_ignore_ascii_case(verb))
}

