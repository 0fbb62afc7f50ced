mod common;

use common::{ACCOUNT_SOURCE, MockParser, account_forest, decl};
use declscope_core::config::ViewerConfig;
use declscope_core::error::DeclscopeError;
use declscope_core::locate::{Notification, SearchOptions, StringBuffer, TextBuffer};
use declscope_core::model::DeclarationKind;
use declscope_core::parser::DeclarationParser;
use declscope_core::view::{NavigationRequest, SourceView, StatusEvent};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

fn account_parser() -> Arc<dyn DeclarationParser> {
    Arc::new(MockParser::returning(account_forest()))
}

fn write_account(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("Account.java");
    std::fs::write(&path, ACCOUNT_SOURCE).unwrap();
    path
}

fn unopened_view() -> Arc<SourceView> {
    Arc::new(SourceView::new(
        PathBuf::from("Account.java"),
        StringBuffer::new(ACCOUNT_SOURCE),
        SearchOptions::default(),
        None,
    ))
}

#[tokio::test]
async fn test_open_reports_progress_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_account(&dir);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let view = SourceView::open(&path, account_parser(), &ViewerConfig::default(), Some(tx))
        .await
        .unwrap();

    assert_eq!(
        rx.try_recv().unwrap(),
        StatusEvent::Loading("Account.java".to_string())
    );
    assert_eq!(
        rx.try_recv().unwrap(),
        StatusEvent::Parsing("Account.java".to_string())
    );
    match rx.try_recv().unwrap() {
        StatusEvent::Parsed {
            file, declarations, ..
        } => {
            assert_eq!(file, "Account.java");
            assert_eq!(declarations, 8);
        }
        other => panic!("unexpected event {:?}", other),
    }

    assert_eq!(view.file_name(), "Account.java");
    assert!(view.loaded().is_some());
}

#[tokio::test]
async fn test_open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = SourceView::open(
        dir.path().join("Missing.java"),
        account_parser(),
        &ViewerConfig::default(),
        None,
    )
    .await;
    match result {
        Err(DeclscopeError::Parsing(message)) => {
            assert!(message.starts_with("failed to read source"));
            assert!(message.contains("Missing.java"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("opening a missing file succeeded"),
    }
}

#[tokio::test]
async fn test_lookup_and_autocomplete_after_load() {
    let view = unopened_view();
    assert!(view.lookup("process").is_none());
    assert!(view.autocomplete_prefix("p").is_empty());

    assert!(view.load(account_parser()).await.unwrap());

    assert_eq!(view.lookup("process").unwrap().begin_line(), 14);
    assert_eq!(view.all_names().len(), 8);
    assert_eq!(view.autocomplete_prefix("p"), vec!["process"]);
    assert_eq!(view.autocomplete_prefix("C"), vec!["CREDIT"]);

    view.add_completion_words(["processAll", "Ledger"]);
    assert_eq!(view.autocomplete_prefix("proc"), vec!["process", "processAll"]);
}

#[tokio::test]
async fn test_navigation_failure_is_reported_on_status_line() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let view = Arc::new(SourceView::new(
        PathBuf::from("Account.java"),
        StringBuffer::new(ACCOUNT_SOURCE),
        SearchOptions::regex(),
        Some(tx),
    ));
    view.load(account_parser()).await.unwrap();
    while rx.try_recv().is_ok() {}

    let result = view.navigate_to(NavigationRequest::Key("doesNotExist".to_string()));
    assert_eq!(result, Notification::NotFound("doesNotExist".to_string()));
    assert_eq!(
        rx.try_recv().unwrap(),
        StatusEvent::NothingFound("doesNotExist".to_string())
    );

    let result = view.navigate_to(NavigationRequest::Key("((".to_string()));
    assert!(matches!(result, Notification::SearchError(_)));
    assert!(matches!(rx.try_recv().unwrap(), StatusEvent::RegexError(_)));
}

#[tokio::test]
async fn test_close_discards_model() {
    let view = unopened_view();
    view.load(account_parser()).await.unwrap();
    assert!(view.loaded().is_some());

    view.close();
    assert!(view.is_closed());
    assert!(view.loaded().is_none());
    assert!(view.lookup("process").is_none());
}

#[tokio::test]
async fn test_close_during_parse_discards_result() {
    let view = unopened_view();
    let handle = view.spawn_load(account_parser());
    view.close();

    assert!(!handle.await.unwrap());
    assert!(view.loaded().is_none());
}

#[tokio::test]
async fn test_newer_load_supersedes_older() {
    let view = unopened_view();
    let stale = view.spawn_load(Arc::new(MockParser::failing()));
    let fresh = view.spawn_load(account_parser());

    assert!(!stale.await.unwrap());
    assert!(fresh.await.unwrap());
    assert_eq!(view.loaded().unwrap().model.declaration_count(), 8);
}

#[tokio::test]
async fn test_superseded_load_adds_no_completions() {
    let view = unopened_view();
    let stale_forest = vec![decl("Ghost", DeclarationKind::Type, 1, 1, 1)];
    let stale = view.spawn_load(Arc::new(MockParser::returning(stale_forest)));
    let fresh = view.spawn_load(account_parser());

    assert!(!stale.await.unwrap());
    assert!(fresh.await.unwrap());
    assert!(view.lookup("Ghost").is_none());
    assert!(view.autocomplete_prefix("Gh").is_empty());
    assert_eq!(view.autocomplete_prefix("proc"), vec!["process"]);
}

#[tokio::test]
async fn test_failed_parse_falls_back_to_text_search() {
    let view = unopened_view();
    assert!(view.load(Arc::new(MockParser::failing())).await.unwrap());

    let loaded = view.loaded().unwrap();
    assert!(loaded.model.is_empty());
    assert!(loaded.outline.is_empty());

    let result = view.navigate_to(NavigationRequest::Key("balance".to_string()));
    assert!(result.is_found());
    view.with_buffer(|b| {
        assert_eq!(b.line_of_offset(b.caret()).unwrap(), 4);
    });
}

#[tokio::test]
async fn test_navigation_before_load_uses_text_search() {
    let view = unopened_view();
    let result = view.navigate_to(NavigationRequest::Key("enum Kind".to_string()));
    assert!(result.is_found());
    assert_eq!(view.highlight_enclosing(), Notification::NotFound(String::new()));
}

#[tokio::test]
async fn test_outline_search_records_selection() {
    let view = unopened_view();
    view.load(account_parser()).await.unwrap();
    assert_eq!(view.selected_outline_path(), None);

    assert!(view.search_outline("Kind").is_found());
    assert_eq!(view.selected_outline_path(), Some(vec![0, 4]));

    assert!(!view.search_outline("Nope").is_found());
    assert_eq!(view.selected_outline_path(), Some(vec![0, 4]));
}

#[tokio::test]
async fn test_node_request_and_enclosing_highlight() {
    let view = unopened_view();
    view.load(account_parser()).await.unwrap();

    let first = view.loaded().unwrap().model.lookup_all("process")[0].clone();
    assert!(view.navigate_to(NavigationRequest::Node(first)).is_found());
    view.with_buffer(|b| assert_eq!(b.line_of_offset(b.caret()).unwrap(), 10));

    assert!(view.highlight_enclosing().is_found());
    view.with_buffer(|b| {
        let selected = b.text_at(b.selection().unwrap()).unwrap();
        assert_eq!(selected, "public class Account");
    });
}

#[tokio::test]
async fn test_concurrent_requests_are_serialized() {
    let view = unopened_view();
    view.load(account_parser()).await.unwrap();

    let keys = ["process", "balance", "Kind", "CREDIT", "amount", "Account"];
    let handles: Vec<_> = (0..4)
        .flat_map(|_| keys)
        .map(|key| {
            let view = Arc::clone(&view);
            std::thread::spawn(move || view.navigate_to(NavigationRequest::Key(key.to_string())))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_found());
    }

    view.with_buffer(|b| {
        let selection = b.selection().unwrap();
        assert_eq!(b.caret(), selection.start);
    });
}
