use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Owner and repository name as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    pub owner: String,
    pub repo: String,
}

impl Inputs {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Both fields carry at least one character
    pub fn is_complete(&self) -> bool {
        !self.owner.is_empty() && !self.repo.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Actor {
    pub login: String,
    pub url: String,
}

/// One entry of a repository's event feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub actor: Actor,
    pub created_at: Option<DateTime<Utc>>,
    /// The upstream `type` field
    pub kind: Option<String>,
}

/// Outcome of one fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Success(Vec<Event>),
    Failure(String),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }
}
