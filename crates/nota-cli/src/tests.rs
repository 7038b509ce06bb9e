use std::path::PathBuf;

use chrono::{Duration, Utc};
use nota_core::Note;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::cli::CompletionShell;
use crate::commands::add::run_add;
use crate::commands::attach::{run_attach, run_detach};
use crate::commands::auth_cmd::{run_login, run_logout};
use crate::commands::common::{
    format_relative_time, normalize_search_query, note_preview, open_repository, parse_region,
    resolve_note, short_id, truncate_text,
};
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::folder_cmd::{run_folder_add, run_folder_delete};
use crate::commands::init::run_init;
use crate::error::CliError;

fn test_store() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nota.db");
    (dir, path)
}

fn login(path: &PathBuf) {
    run_login("admin", "admin", path).unwrap();
}

#[test]
fn parse_region_accepts_three_numbers() {
    assert_eq!(parse_region("10,20,160").unwrap(), (10.0, 20.0, 160.0));
    assert_eq!(parse_region(" 0 , 0 , 50.5 ").unwrap(), (0.0, 0.0, 50.5));
}

#[test]
fn parse_region_rejects_malformed_input() {
    assert!(matches!(parse_region("10,20"), Err(CliError::InvalidRegion(_))));
    assert!(matches!(parse_region("a,b,c"), Err(CliError::InvalidRegion(_))));
    assert!(matches!(parse_region("1,2,NaN"), Err(CliError::InvalidRegion(_))));
    assert!(matches!(parse_region("1,2,3,4"), Err(CliError::InvalidRegion(_))));
}

#[test]
fn truncate_text_appends_ellipsis() {
    assert_eq!(truncate_text("short", 10), "short");
    assert_eq!(truncate_text("a very long folder name", 10), "a very ...");
}

#[test]
fn short_id_takes_thirteen_chars() {
    assert_eq!(short_id("0190a1b2-c3d4-7000-8000-1234567890ab"), "0190a1b2-c3d4");
    assert_eq!(short_id("42"), "42");
}

#[test]
fn format_relative_time_units() {
    let now = Utc::now();
    assert_eq!(format_relative_time(now - Duration::seconds(30), now), "just now");
    assert_eq!(format_relative_time(now - Duration::minutes(2), now), "2m ago");
    assert_eq!(format_relative_time(now - Duration::hours(2), now), "2h ago");
    assert_eq!(format_relative_time(now - Duration::days(3), now), "3d ago");
}

#[test]
fn note_preview_strips_markup_and_collapses_whitespace() {
    let note = Note::new("T", "<p>Hello   world</p>\nsecond line").unwrap();
    assert_eq!(note_preview(&note, 40), "Hello world");
}

#[test]
fn normalize_search_query_rejects_empty() {
    assert!(matches!(
        normalize_search_query(" \n\t "),
        Err(CliError::EmptySearchQuery)
    ));
    assert_eq!(normalize_search_query("  exact phrase  ").unwrap(), "exact phrase");
}

#[test]
fn data_commands_require_login() {
    let (_dir, path) = test_store();

    let err = run_add("Title", "content", None, &path).unwrap_err();
    assert!(matches!(err, CliError::NotLoggedIn));

    login(&path);
    run_add("Title", "content", None, &path).unwrap();

    run_logout(&path).unwrap();
    assert!(matches!(
        run_delete("anything", &path),
        Err(CliError::NotLoggedIn)
    ));
}

#[test]
fn login_rejects_bad_credentials() {
    let (_dir, path) = test_store();
    let err = run_login("admin", "hunter2", &path).unwrap_err();
    assert!(matches!(err, CliError::Core(nota_core::Error::InvalidInput(_))));
}

#[test]
fn add_edit_delete_flow_persists_through_the_store() {
    let (_dir, path) = test_store();
    login(&path);

    run_folder_add("Work", &path).unwrap();
    run_add("Standup", "Discuss roadmap", Some("Work"), &path).unwrap();

    let note = {
        let repo = open_repository(&path).unwrap();
        assert_eq!(repo.list_notes().len(), 1);
        let note = repo.list_notes()[0].clone();
        assert!(note.folder_id.is_some());
        note
    };

    // Edit resolves a unique id prefix
    let prefix: String = note.id.as_str().chars().take(8).collect();
    run_edit(
        &prefix,
        Some("Standup notes".to_string()),
        None,
        None,
        false,
        &path,
    )
    .unwrap();

    {
        let repo = open_repository(&path).unwrap();
        assert_eq!(repo.list_notes()[0].title, "Standup notes");
        assert_eq!(repo.list_notes()[0].created_at, note.created_at);
    }

    run_delete(note.id.as_str(), &path).unwrap();
    let repo = open_repository(&path).unwrap();
    assert!(repo.list_notes().is_empty());
}

#[test]
fn edit_can_unfile_a_note() {
    let (_dir, path) = test_store();
    login(&path);

    run_folder_add("Work", &path).unwrap();
    run_add("Filed", "body", Some("Work"), &path).unwrap();

    let id = {
        let repo = open_repository(&path).unwrap();
        repo.list_notes()[0].id.to_string()
    };

    run_edit(&id, None, None, None, true, &path).unwrap();

    let repo = open_repository(&path).unwrap();
    assert_eq!(repo.list_notes()[0].folder_id, None);
}

#[test]
fn folder_delete_keeps_notes_as_dangling_unfiled() {
    let (_dir, path) = test_store();
    login(&path);

    run_folder_add("Work", &path).unwrap();
    run_add("Standup", "notes", Some("Work"), &path).unwrap();
    run_folder_delete("Work", &path).unwrap();

    let repo = open_repository(&path).unwrap();
    assert!(repo.list_folders().is_empty());
    assert_eq!(repo.list_notes().len(), 1);

    let note = &repo.list_notes()[0];
    assert!(note.folder_id.is_some());
    assert_eq!(repo.folder_name(note.folder_id.as_ref()), None);
}

#[test]
fn resolve_note_handles_prefix_and_ambiguity() {
    let (_dir, path) = test_store();
    login(&path);

    {
        let mut repo = open_repository(&path).unwrap();
        let mut left = Note::new("Left", "body").unwrap();
        left.id = "aaa-1111".parse().unwrap();
        let mut right = Note::new("Right", "body").unwrap();
        right.id = "aaa-2222".parse().unwrap();
        repo.upsert_note(left).unwrap();
        repo.upsert_note(right).unwrap();
    }

    let repo = open_repository(&path).unwrap();
    assert_eq!(resolve_note(&repo, "aaa-1111").unwrap().title, "Left");
    assert_eq!(resolve_note(&repo, "aaa-2").unwrap().title, "Right");
    assert!(matches!(
        resolve_note(&repo, "aaa"),
        Err(CliError::AmbiguousNoteId(_))
    ));
    assert!(matches!(
        resolve_note(&repo, "zzz"),
        Err(CliError::NoteNotFound(_))
    ));
}

#[test]
fn init_seeds_sample_data_once() {
    let (_dir, path) = test_store();

    run_init(true, &path).unwrap();
    run_init(true, &path).unwrap();

    login(&path);
    let repo = open_repository(&path).unwrap();
    assert_eq!(repo.list_folders().len(), 2);
    assert_eq!(repo.list_notes().len(), 2);
}

#[test]
fn attach_rejects_missing_and_non_image_files() {
    let (dir, path) = test_store();
    login(&path);
    run_add("Pic", "body", None, &path).unwrap();

    let id = {
        let repo = open_repository(&path).unwrap();
        repo.list_notes()[0].id.to_string()
    };

    let missing = dir.path().join("missing.png");
    assert!(matches!(
        run_attach(&id, &missing, None, &path),
        Err(CliError::Io(_))
    ));

    let not_an_image = dir.path().join("note.txt");
    std::fs::write(&not_an_image, "plain text").unwrap();
    assert!(matches!(
        run_attach(&id, &not_an_image, None, &path),
        Err(CliError::Core(nota_core::Error::InvalidInput(_)))
    ));

    // Failed attaches leave the note untouched
    let repo = open_repository(&path).unwrap();
    assert_eq!(repo.list_notes()[0].image, None);
}

#[test]
fn detach_clears_the_image_field() {
    let (_dir, path) = test_store();
    login(&path);

    {
        let mut repo = open_repository(&path).unwrap();
        let mut note = Note::new("Pic", "body").unwrap();
        note.image = Some("data:image/jpeg;base64,AAAA".to_string());
        repo.upsert_note(note).unwrap();
    }

    let id = {
        let repo = open_repository(&path).unwrap();
        repo.list_notes()[0].id.to_string()
    };

    run_detach(&id, &path).unwrap();

    let repo = open_repository(&path).unwrap();
    assert_eq!(repo.list_notes()[0].image, None);
}

#[test]
fn run_completions_writes_bash_script_file() {
    let (dir, _path) = test_store();
    let output_path = dir.path().join("nota.bash");

    run_completions(CompletionShell::Bash, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("_nota()"));
    assert!(script.contains("complete -F _nota"));
}
