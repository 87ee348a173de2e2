//! Script runs against an on-disk database

use baseball_league::{
    commands::{AppContext, Outcome},
    config::SessionConfig,
    session::Session,
    storage::LeagueDatabase,
};
use std::{fs, path::Path};
use tempfile::TempDir;

fn open_session(dir: &TempDir) -> Session {
    let db = LeagueDatabase::open(&dir.path().join("league.db")).unwrap();
    Session::new(AppContext::new(db, SessionConfig::default()))
}

fn run_file(session: &mut Session, path: &Path) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = session.run_script(path, &mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

const OPENING_DAY: &str = "\
-- Opening day setup
create-team Yankees \"Yankee Stadium\" \"1 E 161st St\"
create-team Mets \"Citi Field\"
create-player Jeter Derek Yankees 2
create-official West Joe
create-match 2024-04-01 13:05 Yankees Mets
assign-official-to-match 2024-04-01 13:05 Yankees Mets West Joe

-- Results
enter-match-result 2024-04-01 13:05 Yankees Mets 3 1
afficherResultatsDate 2024-04-01
";

#[test]
fn test_script_file_runs_every_command() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("opening.txt");
    fs::write(&script, OPENING_DAY).unwrap();

    let mut session = open_session(&dir);
    let (outcome, output) = run_file(&mut session, &script);

    assert_eq!(outcome, Outcome::Continue);
    assert!(output.starts_with("Opening day setup\n$ create-team Yankees"));
    assert!(!output.contains("Error["));
    assert!(output.contains("Match #1: 2024-04-01 13:05:00 at Yankee Stadium\n  Yankees 3 - 1 Mets\n  Officials: Joe West\n"));
}

#[test]
fn test_second_session_sees_first_sessions_rows() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("opening.txt");
    fs::write(&script, OPENING_DAY).unwrap();
    {
        let mut session = open_session(&dir);
        run_file(&mut session, &script);
    }

    let followup = dir.path().join("followup.txt");
    fs::write(&followup, "create-match 2024-04-02 19:10 Mets Yankees\nlist-teams\n").unwrap();

    let mut session = open_session(&dir);
    let (_, output) = run_file(&mut session, &followup);
    assert!(output.contains("Mets, team #2 (field: Citi Field)"));
    assert_eq!(session.context().db.count_rows("matches").unwrap(), 2);
}

#[test]
fn test_rerunning_script_reports_conflicts() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("opening.txt");
    fs::write(&script, OPENING_DAY).unwrap();

    let mut session = open_session(&dir);
    run_file(&mut session, &script);
    let (outcome, output) = run_file(&mut session, &script);

    assert_eq!(outcome, Outcome::Continue);
    assert!(output.contains("Error[conflict]: Team name already taken: Yankees"));
    assert!(output.contains("Error[conflict]: Official Joe West is already assigned to this match"));
    assert_eq!(session.context().db.count_rows("teams").unwrap(), 2);
    assert_eq!(session.context().db.count_rows("fields").unwrap(), 2);
}

#[test]
fn test_script_quit_skips_remaining_lines() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("short.txt");
    fs::write(&script, "create-team Yankees\nquitter\ncreate-team Mets\n").unwrap();

    let mut session = open_session(&dir);
    let (outcome, _) = run_file(&mut session, &script);
    assert_eq!(outcome, Outcome::Quit);
    assert_eq!(session.context().db.count_rows("teams").unwrap(), 1);
}
