//! Store, components and the ureq transport against the live mock server.

use std::time::Duration;

use todo_cli::command::Action;
use todo_cli::session::{OnlineSession, Session};
use todo_cli::transport::UreqTransport;
use todo_core::{RootView, Screen, StoreError, Summary, TodoClient, TodoStore};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

fn store(base_url: &str) -> TodoStore<UreqTransport> {
    TodoStore::new(
        TodoClient::new(base_url),
        UreqTransport::new(Duration::from_secs(5)),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn session_round_trip() {
    let base_url = start_server().await;
    let mut session = OnlineSession::new(store(&base_url));
    session.start().await;
    assert_eq!(session.screen().await, Screen::Empty);

    assert_eq!(session.apply(Action::Add("Buy milk".into())).await, None);
    assert_eq!(session.apply(Action::Add("Walk dog".into())).await, None);
    assert_eq!(session.apply(Action::Toggle(1)).await, None);
    assert_eq!(session.apply(Action::Edit(2, "Walk the dog".into())).await, None);

    let Screen::List { rows, summary } = session.screen().await else {
        panic!("expected list");
    };
    assert_eq!(rows.len(), 2);
    assert!(rows[0].completed);
    assert_eq!(rows[1].text, "Walk the dog");
    assert_eq!(
        summary,
        Summary {
            total: 2,
            finished: 1,
            pending: 1
        }
    );

    // A second client sees the server's state after a refresh.
    let mut other = RootView::new(store(&base_url));
    other.mount().await.unwrap();
    assert_eq!(other.store().items().await, view_items(&session).await);

    assert_eq!(session.apply(Action::Delete(1)).await, None);
    assert_eq!(session.apply(Action::Delete(1)).await, Some("no todo with id 1".into()));
    assert!(session.apply(Action::Add("   ".into())).await.is_some());
    assert_eq!(session.screen().await.summary().unwrap().total, 1);
}

async fn view_items(session: &OnlineSession<UreqTransport>) -> Vec<todo_core::Todo> {
    session.view().store().items().await
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_shows_fetch_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut view = RootView::new(store(&format!("http://{addr}")));
    assert_eq!(view.mount().await, Err(StoreError::Fetch));
    assert_eq!(view.screen().await, Screen::Failed(StoreError::Fetch));
    assert!(!view.store().is_loading().await);
}
