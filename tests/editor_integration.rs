//! End-to-end command-driven tests over the editing core.

use nanoedit::{persist, Command, Config, EditorCore, Notice};
use std::fs;

#[test]
fn edit_save_reopen_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("story.txt");

    let mut editor = EditorCore::open(&path, Config::default()).expect("open");
    editor.handle(Command::InsertText("chapter one\n".into()));
    editor.handle(Command::InsertText("chapter two\n".into()));
    let state = editor.handle(Command::Save);
    assert!(matches!(state.notice, Some(Notice::Saved { .. })));
    assert!(!state.modified);
    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "chapter one\nchapter two\n"
    );

    let mut reopened = EditorCore::open(&path, Config::default()).expect("reopen");
    assert_eq!(reopened.text(), "chapter one\nchapter two\n");
    assert!(!reopened.state().modified);
}

#[test]
fn saving_twice_keeps_a_backup_of_the_previous_version() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("doc.txt");

    let mut editor = EditorCore::open(&path, Config::default()).expect("open");
    editor.handle(Command::InsertText("version one".into()));
    editor.handle(Command::Save);
    editor.handle(Command::InsertText(" and two".into()));
    editor.handle(Command::Save);

    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "version one and two"
    );
    assert_eq!(
        fs::read_to_string(persist::backup_path(&path)).expect("backup"),
        "version one"
    );
}

#[test]
fn undo_returns_to_the_initial_state_and_redo_replays_every_edit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("seeded.txt");
    fs::write(&path, "seed\n").expect("seed");

    let mut editor = EditorCore::open(&path, Config::default()).expect("open");
    let edits = ["alpha ", "beta ", "gamma ", "delta"];
    let mut states = vec![editor.text().to_string()];
    for edit in edits {
        editor.handle(Command::InsertText(edit.into()));
        states.push(editor.text().to_string());
    }

    for expected in states.iter().rev().skip(1) {
        editor.handle(Command::Undo);
        assert_eq!(editor.text(), expected);
    }
    assert_eq!(editor.text(), "seed\n");
    // Away from the history tail the document counts as modified, even
    // though the content currently matches what is on disk.
    assert!(editor.state().modified);

    for expected in states.iter().skip(1) {
        editor.handle(Command::Redo);
        assert_eq!(editor.text(), expected);
    }
}

#[test]
fn history_eviction_keeps_only_the_most_recent_states() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        max_history_size: 5,
        ..Config::default()
    };
    let mut editor = EditorCore::open(dir.path().join("t.txt"), config).expect("open");

    let mut states = vec![String::new()];
    for i in 0..10 {
        editor.handle(Command::InsertText(format!("{} ", i)));
        states.push(editor.text().to_string());
    }

    // Five entries retained: four undo steps, then the log bottoms out.
    for expected in states[6..10].iter().rev() {
        let state = editor.handle(Command::Undo);
        assert_eq!(editor.text(), expected);
        assert_eq!(state.notice, None);
    }
    let exhausted = editor.handle(Command::Undo);
    assert_eq!(exhausted.notice, Some(Notice::NothingToUndo));
    assert_eq!(editor.text(), states[6]);
}

#[test]
fn replace_and_advance_rewrites_each_occurrence_in_turn() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut editor = EditorCore::open(dir.path().join("t.txt"), Config::default()).expect("open");
    editor.handle(Command::InsertText("cat dog cat dog cat".into()));

    editor.handle(Command::StartReplace);
    // Submitting from the end of the document wraps to the first match.
    let state = editor.handle(Command::SubmitSearchQuery("cat".into()));
    assert_eq!(state.last_match, Some(0));

    let mut replacements = 0;
    loop {
        let state = editor.handle(Command::SubmitReplace {
            query: "cat".into(),
            replacement: "bird".into(),
        });
        match state.notice {
            Some(Notice::Replaced { .. }) => replacements += 1,
            Some(Notice::NotFound { .. }) => break,
            other => panic!("unexpected notice: {:?}", other),
        }
        assert!(replacements <= 3, "replace loop failed to terminate");
    }

    assert_eq!(replacements, 3);
    assert_eq!(editor.text(), "bird dog bird dog bird");
}

#[test]
fn oversized_files_are_never_loaded_as_editable_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("big.log");
    let content = "x".repeat(1000);
    fs::write(&path, &content).expect("seed");

    let config = Config {
        max_file_size: 100,
        ..Config::default()
    };
    let editor = EditorCore::open(&path, config).expect("open");
    assert!(editor.text().contains("FILE TOO LARGE FOR EDITING"));
    assert!(editor.text().contains("1000 > 100"));
    assert!(!editor.text().contains("xxx"));
}

#[test]
fn saving_to_a_protected_location_is_refused_without_a_partial_write() {
    let mut editor =
        EditorCore::open("/etc/nanoedit_refused.txt", Config::default()).expect("open");
    editor.handle(Command::InsertText("must not land".into()));
    let state = editor.handle(Command::Save);
    assert!(matches!(state.notice, Some(Notice::SaveFailed { .. })));
    assert!(state.modified);
    assert!(!std::path::Path::new("/etc/nanoedit_refused.txt").exists());
}

#[test]
fn autosave_writes_without_an_explicit_save_command() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("auto.txt");
    let config = Config {
        autosave_interval_secs: 0,
        ..Config::default()
    };
    let mut editor = EditorCore::open(&path, config).expect("open");
    editor.handle(Command::InsertText("tick".into()));
    assert_eq!(fs::read_to_string(&path).expect("autosaved"), "tick");
}

#[test]
fn search_session_state_survives_cursor_motion() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut editor = EditorCore::open(dir.path().join("t.txt"), Config::default()).expect("open");
    editor.handle(Command::InsertText("needle hay needle hay needle".into()));

    editor.handle(Command::StartSearch);
    editor.handle(Command::SubmitSearchQuery("needle".into()));
    editor.handle(Command::MoveCursor(12));
    let state = editor.handle(Command::FindNext);
    assert_eq!(state.cursor, 22);
    let state = editor.handle(Command::FindPrev);
    assert_eq!(state.cursor, 11);
}
