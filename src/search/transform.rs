use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::{Result, SearchError};
use crate::models::{ActionPayload, RepoDirectory, ResultEntry, SearchResultsByRepo};

/// Settings that shape result entries.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Files shown per repository
    pub max_results: usize,
    /// Branch used in "open in browser" links
    pub branch: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            max_results: 5,
            branch: "master".to_string(),
        }
    }
}

/// Turn raw per-repository results into UI entries, keyed by repository id.
///
/// Fails with [`SearchError::UnknownRepository`] if a result names a
/// repository that is not in `repos`.
pub fn transform(
    repos: &RepoDirectory,
    raw: SearchResultsByRepo,
    options: &TransformOptions,
) -> Result<BTreeMap<String, Vec<ResultEntry>>> {
    let mut out = BTreeMap::new();

    for (repo_id, result) in raw {
        let repo = repos
            .get(&repo_id)
            .ok_or_else(|| SearchError::UnknownRepository(repo_id.clone()))?;
        let web_url = repo.url.strip_suffix(".git").unwrap_or(&repo.url);

        let shown = result.matches.len().min(options.max_results);
        let group_label = format!(
            "{repo_id}: showing {shown}/{} matches",
            result.files_with_match
        );

        let entries = result
            .matches
            .into_iter()
            .take(options.max_results)
            .map(|file_match| {
                let title = basename(&file_match.filename).to_string();
                let target_url = format!(
                    "{web_url}/tree/{}/{}",
                    options.branch, file_match.filename
                );
                ResultEntry {
                    id: Uuid::now_v7().to_string(),
                    title,
                    group_label: group_label.clone(),
                    payload: ActionPayload::Open {
                        file_match,
                        target_url,
                    },
                    preview: true,
                }
            })
            .collect();

        out.insert(repo_id, entries);
    }

    Ok(out)
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
