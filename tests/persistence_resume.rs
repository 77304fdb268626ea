//! Session persistence across controller restarts, on a real session file.

mod common;

use common::ScriptedClient;
use picsearch::app::Command;
use picsearch::storage::{JsonSessionStore, SessionPersistence};
use picsearch::{build_controller, Config, SessionPhase};
use std::sync::Arc;
use tempfile::TempDir;

fn config(dir: &TempDir, persist_results: bool) -> Config {
    Config {
        api_key: "test-key".to_string(),
        search_engine_id: "test-cx".to_string(),
        data_dir: Some(dir.path().to_string_lossy().into_owned()),
        persist_results,
        ..Config::default()
    }
}

#[tokio::test]
async fn archived_results_resume_pagination() {
    let dir = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::new());

    {
        let mut controller = build_controller(&config(&dir, true), client.clone()).unwrap();
        controller.handle(Command::Search("cats".to_string()).into());
        controller.settle().await;
        assert_eq!(controller.session().results().count(), 10);
    }

    let mut controller = build_controller(&config(&dir, true), client.clone()).unwrap();
    let session = controller.session();
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(session.results().count(), 10);
    let state = session.state().unwrap();
    assert_eq!(state.search_term, "cats");
    assert_eq!(state.next_start_index, 11);

    controller.handle(Command::LoadMore.into());
    controller.settle().await;
    assert_eq!(controller.session().results().count(), 14);
    assert_eq!(controller.session().phase(), SessionPhase::Exhausted);
    assert_eq!(client.calls().last().unwrap().start_index, 11);
}

#[tokio::test]
async fn cursor_without_results_is_not_resumed() {
    let dir = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::new());

    {
        let mut controller = build_controller(&config(&dir, false), client.clone()).unwrap();
        controller.handle(Command::Search("cats".to_string()).into());
        controller.settle().await;
    }

    let store = JsonSessionStore::open(dir.path().join("session.json"), "picture_search").unwrap();
    assert_eq!(store.load().unwrap().unwrap().next_start_index, 11);

    let mut controller = build_controller(&config(&dir, false), client.clone()).unwrap();
    assert!(controller.session().state().is_none());
    assert_eq!(controller.session().results().count(), 0);

    controller.handle(Command::LoadMore.into());
    assert_eq!(controller.session().phase(), SessionPhase::Idle);
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn new_search_replaces_the_archive() {
    let dir = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::new());

    {
        let mut controller = build_controller(&config(&dir, true), client.clone()).unwrap();
        controller.handle(Command::Search("cats".to_string()).into());
        controller.settle().await;
        controller.handle(Command::Search("zzznotfound".to_string()).into());
        controller.settle().await;
    }

    let store = JsonSessionStore::open(dir.path().join("session.json"), "picture_search")
        .unwrap()
        .with_result_archive(true);
    assert!(store.load_results().unwrap().is_empty());
    assert_eq!(store.load().unwrap().unwrap().search_term, "zzznotfound");

    let controller = build_controller(&config(&dir, true), client).unwrap();
    assert!(controller.session().state().is_none());
}

#[tokio::test]
async fn namespaces_do_not_share_sessions() {
    let dir = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::new());

    {
        let mut controller = build_controller(&config(&dir, true), client.clone()).unwrap();
        controller.handle(Command::Search("dogs".to_string()).into());
        controller.settle().await;
    }

    let other = Config {
        namespace: "wallpapers".to_string(),
        ..config(&dir, true)
    };
    let controller = build_controller(&other, client.clone()).unwrap();
    assert!(controller.session().state().is_none());
    assert_eq!(controller.session().results().count(), 0);

    let controller = build_controller(&config(&dir, true), client).unwrap();
    assert_eq!(controller.session().results().count(), 10);
}

#[tokio::test]
async fn failed_page_write_resumes_without_gap() {
    let dir = TempDir::new().unwrap();
    let client = Arc::new(ScriptedClient::new());
    let blocker = dir.path().join("session.tmp");

    {
        let mut controller = build_controller(&config(&dir, true), client.clone()).unwrap();
        controller.handle(Command::Search("dogs".to_string()).into());
        controller.settle().await;

        // The second page is merged in memory but cannot be written out.
        std::fs::create_dir(&blocker).unwrap();
        controller.handle(Command::LoadMore.into());
        controller.settle().await;
        assert_eq!(controller.session().results().count(), 20);
        assert_eq!(controller.session().state().unwrap().next_start_index, 21);
    }
    std::fs::remove_dir(&blocker).unwrap();

    let mut controller = build_controller(&config(&dir, true), client.clone()).unwrap();
    let restored = controller.session().results().count();
    assert_eq!(restored, 10);
    assert_eq!(controller.session().state().unwrap().next_start_index, restored + 1);

    controller.handle(Command::LoadMore.into());
    controller.settle().await;
    assert_eq!(client.calls().last().unwrap().start_index, 11);

    let titles: Vec<String> = controller
        .session()
        .results()
        .snapshot()
        .into_iter()
        .map(|item| item.title)
        .collect();
    let expected: Vec<String> = (1..=20).map(|n| format!("dogs #{n}")).collect();
    assert_eq!(titles, expected);
}
