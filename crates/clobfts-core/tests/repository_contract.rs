//! Repository contract against a scripted fake store.
//!
//! The fake records every command it receives and counts how many
//! connections were opened and dropped, so these tests can check argument
//! binding, validation ordering and connection release without a database.

use std::cell::RefCell;
use std::rc::Rc;

use clobfts_core::storage::command::{
    DELETE_DOCUMENT, INSERT_DOCUMENT, LIST_NAMES, PARAM_CONTENT, PARAM_DOCUMENT_NAME,
    PARAM_FTS_QUERY, SEARCH_CONTENT, SEARCH_NAME,
};
use clobfts_core::storage::{Command, Row, StorageError, StorageResult, StoreConnection};
use clobfts_core::{Document, DocumentRepository, RepositoryError, SqlDocumentRepository};

#[derive(Default)]
struct FakeState {
    opened: usize,
    released: usize,
    commands: Vec<Command>,
    affected: usize,
    rows: Vec<Row>,
    fail_connect: bool,
    fail_execute: bool,
}

struct FakeConnection {
    state: Rc<RefCell<FakeState>>,
}

impl StoreConnection for FakeConnection {
    fn execute(&mut self, command: &Command) -> StorageResult<usize> {
        let mut state = self.state.borrow_mut();
        state.commands.push(command.clone());
        if state.fail_execute {
            return Err(StorageError::Backend("execution failed".to_string()));
        }
        Ok(state.affected)
    }

    fn query(&mut self, command: &Command) -> StorageResult<Vec<Row>> {
        let mut state = self.state.borrow_mut();
        state.commands.push(command.clone());
        if state.fail_execute {
            return Err(StorageError::Backend("execution failed".to_string()));
        }
        Ok(state.rows.clone())
    }
}

impl Drop for FakeConnection {
    fn drop(&mut self) {
        self.state.borrow_mut().released += 1;
    }
}

type FakeSource = Box<dyn Fn() -> StorageResult<FakeConnection>>;

fn fake_repo() -> (Rc<RefCell<FakeState>>, SqlDocumentRepository<FakeSource>) {
    let state = Rc::new(RefCell::new(FakeState::default()));
    let shared = Rc::clone(&state);
    let source: FakeSource = Box::new(move || {
        let mut s = shared.borrow_mut();
        if s.fail_connect {
            return Err(StorageError::Backend("connection refused".to_string()));
        }
        s.opened += 1;
        Ok(FakeConnection {
            state: Rc::clone(&shared),
        })
    });
    (state, SqlDocumentRepository::new(source))
}

fn row(columns: &[&str]) -> Row {
    columns.iter().copied().collect()
}

#[test]
fn add_binds_name_and_content() {
    let (state, repo) = fake_repo();
    state.borrow_mut().affected = 1;

    repo.add_document("Doc1", Some("alpha beta")).unwrap();

    let state = state.borrow();
    assert_eq!(state.commands.len(), 1);
    let cmd = &state.commands[0];
    assert_eq!(cmd.text(), INSERT_DOCUMENT);
    assert_eq!(cmd.param(PARAM_DOCUMENT_NAME), Some("Doc1"));
    assert_eq!(cmd.param(PARAM_CONTENT), Some("alpha beta"));
    assert_eq!((state.opened, state.released), (1, 1));
}

#[test]
fn validation_happens_before_connecting() {
    let (state, repo) = fake_repo();

    assert!(repo.add_document(" ", Some("x")).is_err());
    assert!(matches!(
        repo.add_document("Doc1", None),
        Err(RepositoryError::MissingContent)
    ));
    assert!(repo.delete_document("").is_err());
    assert!(repo.search_documents("  ").is_err());
    assert!(repo.search_documents_by_name("").is_err());
    assert!(repo.search_documents_by_name_phrase("\n").is_err());

    let state = state.borrow();
    assert_eq!(state.opened, 0);
    assert!(state.commands.is_empty());
}

#[test]
fn delete_with_no_affected_rows_is_not_found() {
    let (state, repo) = fake_repo();
    state.borrow_mut().affected = 0;

    let err = repo.delete_document("Ghost").unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound { ref name } if name == "Ghost"));
    assert!(err.to_string().contains("Ghost"));
    let state = state.borrow();
    assert_eq!(state.commands[0].text(), DELETE_DOCUMENT);
    assert_eq!(state.commands[0].param(PARAM_DOCUMENT_NAME), Some("Ghost"));
    assert_eq!(state.released, 1);
}

#[test]
fn delete_with_one_affected_row_succeeds() {
    let (state, repo) = fake_repo();
    state.borrow_mut().affected = 1;

    repo.delete_document("Doc1").unwrap();
    assert_eq!(state.borrow().released, 1);
}

#[test]
fn connection_released_when_execution_fails() {
    let (state, repo) = fake_repo();
    state.borrow_mut().fail_execute = true;

    let add = repo.add_document("Doc1", Some("x")).unwrap_err();
    let search = repo.search_documents("alpha").unwrap_err();
    let list = repo.get_all_document_names().unwrap_err();

    for err in [add, search, list] {
        assert!(matches!(err, RepositoryError::Storage(StorageError::Backend(_))));
    }
    let state = state.borrow();
    assert_eq!(state.opened, 3);
    assert_eq!(state.released, 3);
}

#[test]
fn connect_failure_is_a_storage_error() {
    let (state, repo) = fake_repo();
    state.borrow_mut().fail_connect = true;

    let err = repo.get_all_document_names().unwrap_err();

    assert!(matches!(err, RepositoryError::Storage(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn raw_search_passes_query_through_unchanged() {
    let (state, repo) = fake_repo();
    state.borrow_mut().rows = vec![row(&["Doc1", "alpha beta"])];

    let hits = repo
        .search_documents("\"machine learning\" OR ai*")
        .unwrap();

    assert_eq!(hits, vec![Document::new("Doc1", "alpha beta")]);
    let state = state.borrow();
    assert_eq!(state.commands[0].text(), SEARCH_CONTENT);
    assert_eq!(
        state.commands[0].param(PARAM_FTS_QUERY),
        Some("\"machine learning\" OR ai*")
    );
}

#[test]
fn name_search_uses_name_template() {
    let (state, repo) = fake_repo();
    state.borrow_mut().rows = vec![
        row(&["User Guide Manual", "one"]),
        row(&["User Guide Index", "two"]),
    ];

    let hits = repo.search_documents_by_name("\"User Guide\"").unwrap();

    // Engine order is preserved
    assert_eq!(hits[0].name, "User Guide Manual");
    assert_eq!(hits[1].content, "two");
    assert_eq!(state.borrow().commands[0].text(), SEARCH_NAME);
}

#[test]
fn phrase_search_escapes_before_binding() {
    let (state, repo) = fake_repo();

    repo.search_documents_phrase("  the \"best\" guide ").unwrap();
    repo.search_documents_by_name_phrase("User Guide").unwrap();

    let state = state.borrow();
    assert_eq!(state.commands[0].text(), SEARCH_CONTENT);
    assert_eq!(
        state.commands[0].param(PARAM_FTS_QUERY),
        Some("\"the \"\"best\"\" guide\"")
    );
    assert_eq!(state.commands[1].text(), SEARCH_NAME);
    assert_eq!(
        state.commands[1].param(PARAM_FTS_QUERY),
        Some("\"User Guide\"")
    );
}

#[test]
fn short_rows_are_reported() {
    let (state, repo) = fake_repo();
    state.borrow_mut().rows = vec![row(&["OnlyName"])];

    let err = repo.search_documents("x").unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::Storage(StorageError::MissingColumn { index: 1 })
    ));
    assert_eq!(state.borrow().released, 1);
}

#[test]
fn listing_returns_names_in_store_order() {
    let (state, repo) = fake_repo();
    state.borrow_mut().rows = vec![row(&["Alpha"]), row(&["Beta"]), row(&["Gamma"])];

    let names = repo.get_all_document_names().unwrap();

    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    assert_eq!(state.borrow().commands[0].text(), LIST_NAMES);
}

#[test]
fn empty_results_are_not_errors() {
    let (_state, repo) = fake_repo();

    assert!(repo.search_documents("nothing").unwrap().is_empty());
    assert!(repo.search_documents_by_name("nothing").unwrap().is_empty());
    assert!(repo.get_all_document_names().unwrap().is_empty());
}
