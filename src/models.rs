use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// ─── Hound wire types ────────────────────────────────────

/// A repository known to the Hound server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub id: String,
    pub url: String,
}

/// Repository directory keyed by repository id, as returned by `GET /api/v1/repos`.
pub type RepoDirectory = BTreeMap<String, RepositoryInfo>;

/// One entry of the `/api/v1/repos` body. Hound sends more fields; only `url` is used.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoListing {
    pub url: String,
}

/// A single match occurrence plus its surrounding context lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineMatch {
    pub line_number: i64,
    pub line: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub before: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub after: Vec<String>,
}

/// All matches found in one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileMatch {
    pub filename: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub matches: Vec<LineMatch>,
}

/// Per-repository block of a search response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepoSearchResult {
    pub files_with_match: usize,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub matches: Vec<FileMatch>,
}

pub type SearchResultsByRepo = BTreeMap<String, RepoSearchResult>;

/// Body of `GET /api/v1/search`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: SearchResultsByRepo,
}

/// Go encodes empty slices as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ─── Derived types ───────────────────────────────────────

/// A maximal run of consecutive line numbers with their contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineGroup {
    pub first_line_number: i64,
    pub lines: Vec<String>,
}

impl LineGroup {
    /// Line number of the last line in the run.
    pub fn last_line_number(&self) -> i64 {
        self.first_line_number + self.lines.len() as i64 - 1
    }
}

/// What happens when the user selects an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionPayload {
    /// Open the file on the repository host.
    Open {
        file_match: FileMatch,
        target_url: String,
    },
    /// Open the preferences page.
    Prefs,
}

/// A UI-ready search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    pub id: String,
    /// File basename
    pub title: String,
    pub group_label: String,
    pub payload: ActionPayload,
    pub preview: bool,
}

/// The placeholder item shown while there are no results to display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusMessage {
    pub id: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
    pub icon: &'static str,
    pub payload: Option<ActionPayload>,
}

/// UI state pushed to the result sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "entries", rename_all = "snake_case")]
pub enum UiState {
    Loading,
    Unconfigured,
    Failed,
    Results(Vec<ResultEntry>),
}

impl UiState {
    /// The status message item for this state, if it shows one.
    pub fn message(&self) -> Option<StatusMessage> {
        match self {
            Self::Loading => Some(StatusMessage {
                id: "message",
                title: "Loading...",
                desc: "Results are on their way.",
                icon: "#fa fa fa-spinner fa-spin fa-3x fa-fw",
                payload: None,
            }),
            Self::Unconfigured => Some(StatusMessage {
                id: "message",
                title: "Please enter Hound url",
                desc: "Click this to open preferences",
                icon: "#fa fa-unlock-alt",
                payload: Some(ActionPayload::Prefs),
            }),
            Self::Failed => Some(StatusMessage {
                id: "message",
                title: "Oops, couldn't get your results",
                desc: "Make sure plugin preferences are correct, Click here to check",
                icon: "#fa fa-exclamation-circle",
                payload: Some(ActionPayload::Prefs),
            }),
            Self::Results(_) => None,
        }
    }
}
