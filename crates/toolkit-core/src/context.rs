// The workflow run context: `GITHUB_*` variables plus the webhook event
// payload the runner writes to disk at `GITHUB_EVENT_PATH`.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use toolkit_sdk::EnvironmentProvider;

use crate::error::{Result, ToolkitError};

/// A repository reference resolved from the run context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repo {
    pub owner: String,
    pub repo: String,
}

/// An issue or pull request reference resolved from the event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub owner: String,
    pub repo: String,
    pub number: Option<u64>,
}

/// A snapshot of the workflow run the step executes in.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    /// The parsed webhook event payload.
    pub payload: Value,
    /// The name of the event that triggered the run.
    pub event_name: String,
    /// The commit SHA that triggered the run.
    pub sha: String,
    /// The fully-formed ref (e.g. `refs/heads/main`).
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// The workflow name.
    pub workflow: String,
    /// The current action reference.
    pub action: String,
    /// The user that triggered the run.
    pub actor: String,
    /// The job name.
    pub job: String,
    pub run_number: u64,
    pub run_id: u64,
    /// The repository in `owner/name` form.
    pub repository: String,
    pub api_url: String,
    pub server_url: String,
    pub graphql_url: String,
}

impl Context {
    /// Build the context from the environment, loading the event payload
    /// from `GITHUB_EVENT_PATH` when present.
    ///
    /// A designated payload file that does not exist is tolerated (the
    /// payload stays empty); a payload that fails to parse is not.
    pub fn from_environment(env: &dyn EnvironmentProvider) -> Result<Self> {
        let get = |name: &str| env.get(name).unwrap_or_default();
        let get_or = |name: &str, default: &str| {
            env.get(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let payload = match env.get("GITHUB_EVENT_PATH") {
            Some(path) if !path.is_empty() => {
                if Path::new(&path).exists() {
                    let raw = fs::read_to_string(&path)?;
                    serde_json::from_str(&raw).map_err(|err| {
                        ToolkitError::Validation(format!("Invalid event payload at {path}: {err}"))
                    })?
                } else {
                    tracing::warn!(path = %path, "GITHUB_EVENT_PATH does not exist");
                    Value::Object(serde_json::Map::new())
                }
            }
            _ => Value::Object(serde_json::Map::new()),
        };

        Ok(Self {
            payload,
            event_name: get("GITHUB_EVENT_NAME"),
            sha: get("GITHUB_SHA"),
            git_ref: get("GITHUB_REF"),
            workflow: get("GITHUB_WORKFLOW"),
            action: get("GITHUB_ACTION"),
            actor: get("GITHUB_ACTOR"),
            job: get("GITHUB_JOB"),
            run_number: get("GITHUB_RUN_NUMBER").parse().unwrap_or(0),
            run_id: get("GITHUB_RUN_ID").parse().unwrap_or(0),
            repository: get("GITHUB_REPOSITORY"),
            api_url: get_or("GITHUB_API_URL", "https://api.github.com"),
            server_url: get_or("GITHUB_SERVER_URL", "https://github.com"),
            graphql_url: get_or("GITHUB_GRAPHQL_URL", "https://api.github.com/graphql"),
        })
    }

    /// The repository the run belongs to, from `GITHUB_REPOSITORY` or the
    /// payload's `repository` object.
    pub fn repo(&self) -> Option<Repo> {
        if let Some((owner, repo)) = self.repository.split_once('/') {
            if !owner.is_empty() && !repo.is_empty() {
                return Some(Repo {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                });
            }
        }
        let repository = self.payload.get("repository")?;
        let owner = repository.get("owner")?.get("login")?.as_str()?;
        let name = repository.get("name")?.as_str()?;
        Some(Repo {
            owner: owner.to_string(),
            repo: name.to_string(),
        })
    }

    /// The issue or pull request the event refers to, with its number taken
    /// from `issue`, `pull_request`, or the top-level payload.
    pub fn issue(&self) -> Option<Issue> {
        let repo = self.repo()?;
        let subject = self
            .payload
            .get("issue")
            .or_else(|| self.payload.get("pull_request"))
            .unwrap_or(&self.payload);
        Some(Issue {
            owner: repo.owner,
            repo: repo.repo,
            number: subject.get("number").and_then(Value::as_u64),
        })
    }
}
