//! GitLab REST API client.
//!
//! Talks to `/api/v4` with a `reqwest` client. Listing paginates through
//! `x-next-page`; commits go through the multi-action commit endpoint so
//! the whole staged change set lands atomically.

use async_trait::async_trait;
use canopy_types::{CommitAction, RemoteEntry};
use tracing::{debug, info};

use crate::api::{CommitInfo, CommitRequest, TreeEntryDto};
use crate::auth::AuthMethod;
use crate::error::{RemoteError, RemoteResult};
use crate::transport::{ListTreeOptions, RemoteRepository};

/// A GitLab instance reachable over HTTPS.
#[derive(Clone, Debug)]
pub struct GitlabRemote {
    http: reqwest::Client,
    base_url: String,
    auth: AuthMethod,
}

impl GitlabRemote {
    pub const DEFAULT_BASE_URL: &'static str = "https://gitlab.com";

    /// Client against an arbitrary GitLab instance.
    pub fn new(base_url: impl Into<String>, auth: AuthMethod) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            auth,
        }
    }

    /// Client against gitlab.com.
    pub fn gitlab_com(auth: AuthMethod) -> Self {
        Self::new(Self::DEFAULT_BASE_URL, auth)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn project_url(&self, repository: &str, tail: &str) -> String {
        format!(
            "{}/api/v4/projects/{}/{tail}",
            self.base_url,
            encode_project(repository)
        )
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            AuthMethod::Bearer(token) => request.bearer_auth(token),
            AuthMethod::Anonymous => request,
        }
    }
}

#[async_trait]
impl RemoteRepository for GitlabRemote {
    async fn list_tree(
        &self,
        repository: &str,
        options: &ListTreeOptions,
    ) -> RemoteResult<Vec<RemoteEntry>> {
        let url = self.project_url(repository, "repository/tree");
        let mut entries = Vec::new();
        let mut page = 1u32;

        loop {
            let request = self.http.get(&url).query(&[
                ("recursive", options.recursive.to_string()),
                ("path", options.path.clone()),
                ("per_page", options.per_page.to_string()),
                ("page", page.to_string()),
            ]);
            let response = check_status(self.apply_auth(request).send().await?).await?;
            let next_page = response
                .headers()
                .get("x-next-page")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u32>().ok());

            let rows: Vec<TreeEntryDto> = response.json().await?;
            for row in rows {
                entries.push(row.into_remote_entry()?);
            }

            match next_page {
                Some(next) => page = next,
                None => break,
            }
        }

        debug!(
            repository,
            path = %options.path,
            entries = entries.len(),
            "listed remote subtree"
        );
        Ok(entries)
    }

    async fn create_commit(
        &self,
        repository: &str,
        branch: &str,
        message: &str,
        actions: &[CommitAction],
    ) -> RemoteResult<CommitInfo> {
        let url = self.project_url(repository, "repository/commits");
        let body = CommitRequest {
            branch,
            commit_message: message,
            actions,
        };
        let request = self.http.post(&url).json(&body);
        let response = check_status(self.apply_auth(request).send().await?).await?;
        let commit: CommitInfo = response.json().await?;

        info!(
            repository,
            branch,
            commit = %commit.id,
            actions = actions.len(),
            "commit accepted by remote"
        );
        Ok(commit)
    }
}

async fn check_status(response: reqwest::Response) -> RemoteResult<reqwest::Response> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(RemoteError::Unauthorized);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

/// Percent-encode a namespaced project path for use as one URL segment.
fn encode_project(repository: &str) -> String {
    repository.replace('/', "%2F")
}
