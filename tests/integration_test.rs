//! Integration tests for the search → preview pipeline.
//!
//! A wiremock server stands in for Hound, so these tests exercise the real
//! HTTP client, the debounce timer and the result shaping end to end.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hound_preview::config::Config;
use hound_preview::models::{ActionPayload, FileMatch, LineMatch, ResultEntry, UiState};
use hound_preview::plugin::preview_document;
use hound_preview::preview::merge::merge;
use hound_preview::search::{ResultSink, SearchOrchestrator};
use hound_preview::state::{AppState, UiEvent};

fn repos_body() -> serde_json::Value {
    serde_json::json!({
        "hound": {"url": "https://github.com/hound-search/hound.git", "vcs": "git"},
        "ripgrep": {"url": "https://github.com/BurntSushi/ripgrep", "vcs": "git"}
    })
}

fn search_body() -> serde_json::Value {
    serde_json::json!({
        "Results": {
            "hound": {
                "FilesWithMatch": 9,
                "Matches": [{
                    "Filename": "cmds/houndd/main.go",
                    "Matches": [
                        {"Line": "func main() {", "LineNumber": 10,
                         "Before": ["", "// main starts houndd"], "After": ["\tflag.Parse()"]},
                        {"Line": "\tflag.Parse()", "LineNumber": 11,
                         "Before": ["func main() {"], "After": null},
                        {"Line": "}", "LineNumber": 30, "Before": null, "After": null}
                    ]
                }]
            }
        }
    })
}

async fn mount_hound(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("repos", "hound,ripgrep"))
        .and(query_param("rng", "0:5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer) -> Config {
    Config {
        hound_base_url: server.uri(),
        debounce_ms: 20,
        request_timeout_secs: 5,
        ..Config::default()
    }
}

/// Sink forwarding every state into a channel.
fn channel_sink() -> (Arc<dyn ResultSink>, mpsc::UnboundedReceiver<UiState>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink: Arc<dyn ResultSink> = Arc::new(move |state: UiState| {
        let _ = tx.send(state);
    });
    (sink, rx)
}

async fn next_state(rx: &mut mpsc::UnboundedReceiver<UiState>) -> UiState {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for UI state")
        .expect("sink closed")
}

fn open_payload(entry: &ResultEntry) -> (&FileMatch, &str) {
    match &entry.payload {
        ActionPayload::Open {
            file_match,
            target_url,
        } => (file_match, target_url.as_str()),
        ActionPayload::Prefs => panic!("expected an open payload"),
    }
}

#[tokio::test]
async fn test_end_to_end_search_and_preview() {
    let server = MockServer::start().await;
    mount_hound(&server).await;

    let orchestrator = SearchOrchestrator::new(&config_for(&server));
    let (sink, mut rx) = channel_sink();

    orchestrator.search("main", sink);
    assert_eq!(next_state(&mut rx).await, UiState::Loading);

    let entries = match next_state(&mut rx).await {
        UiState::Results(entries) => entries,
        other => panic!("expected results, got {other:?}"),
    };
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry.title, "main.go");
    assert_eq!(entry.group_label, "hound: showing 1/9 matches");

    let (file_match, target_url) = open_payload(entry);
    assert_eq!(
        target_url,
        "https://github.com/hound-search/hound/tree/master/cmds/houndd/main.go"
    );

    // Overlapping windows collapse into one run, the lone match stays apart.
    let groups = merge(file_match);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].first_line_number, 8);
    assert_eq!(
        groups[0].lines,
        vec!["", "// main starts houndd", "func main() {", "\tflag.Parse()"]
    );
    assert_eq!(groups[1].first_line_number, 30);

    let html = preview_document(Some(&entry.payload)).unwrap();
    assert!(html.contains("<h3>cmds/houndd/main.go</h3>"));
    assert!(html.contains("<?prettify linenums=8?>"));
    assert!(html.contains("<?prettify linenums=30?>"));
}

#[tokio::test]
async fn test_burst_sends_one_request_sequence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("q", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = SearchOrchestrator::new(&config_for(&server));
    let (sink, mut rx) = channel_sink();

    for q in ["a", "ab", "abc"] {
        orchestrator.search(q, sink.clone());
    }
    for _ in 0..3 {
        assert_eq!(next_state(&mut rx).await, UiState::Loading);
    }
    assert!(matches!(next_state(&mut rx).await, UiState::Results(_)));

    server.verify().await;
}

#[tokio::test]
async fn test_backend_error_surfaces_failed_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("index not ready"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = SearchOrchestrator::new(&config_for(&server));
    let (sink, mut rx) = channel_sink();

    orchestrator.search("main", sink);
    assert_eq!(next_state(&mut rx).await, UiState::Loading);
    assert_eq!(next_state(&mut rx).await, UiState::Failed);
}

#[tokio::test]
async fn test_result_for_unlisted_repo_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ripgrep": {"url": "https://github.com/BurntSushi/ripgrep"}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;

    let orchestrator = SearchOrchestrator::new(&config_for(&server));
    let (sink, mut rx) = channel_sink();

    orchestrator.search("main", sink);
    assert_eq!(next_state(&mut rx).await, UiState::Loading);
    assert_eq!(next_state(&mut rx).await, UiState::Failed);
}

#[tokio::test]
async fn test_app_state_publishes_unconfigured_prompt() {
    let state = AppState::new(Config::default());
    let mut events = state.events.subscribe();

    state.plugin.search("foo", state.sink());

    match events.recv().await.unwrap() {
        UiEvent::State { state, message } => {
            assert_eq!(state, UiState::Unconfigured);
            assert_eq!(message.unwrap().title, "Please enter Hound url");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_app_state_reconfigures_on_config_change() {
    let server = MockServer::start().await;
    mount_hound(&server).await;

    let state = AppState::new(Config::default());
    let mut events = state.events.subscribe();

    let uri = server.uri();
    state.config.send_modify(|c| {
        c.hound_base_url = uri;
        c.debounce_ms = 20;
    });
    for _ in 0..100 {
        if state.plugin.orchestrator().is_configured() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(state.plugin.orchestrator().is_configured());

    state.plugin.search("main", state.sink());
    let mut saw_results = false;
    while let Ok(Ok(event)) = tokio::time::timeout(Duration::from_secs(5), events.recv()).await {
        if let UiEvent::State { state: UiState::Results(entries), message } = event {
            assert_eq!(entries.len(), 1);
            assert!(message.is_none());
            saw_results = true;
            break;
        }
    }
    assert!(saw_results);
}

#[test]
fn test_context_window_becomes_one_group() {
    let file_match = FileMatch {
        filename: "x.txt".into(),
        matches: vec![LineMatch {
            line_number: 10,
            line: "X".into(),
            before: vec!["A".into(), "B".into()],
            after: vec!["Y".into()],
        }],
    };
    let groups = merge(&file_match);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].first_line_number, 8);
    assert_eq!(groups[0].lines, vec!["A", "B", "X", "Y"]);
}
