use serde::{Deserialize, Serialize};
use std::fmt;

pub const NOT_FOUND_MESSAGE: &str = "No comic found for this UPC.";
pub const MODEL_UNAVAILABLE_MESSAGE: &str = "Failed to connect to Ollama. Make sure it's running.";

/// Issue number as published by the catalog. Numbers are doubles there
/// (`0.1`, `11`), so ordering is partial.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(pub f64);

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<f64> for IssueNumber {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRef {
    pub resource_uri: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub title: String,
    pub issue_number: IssueNumber,
    pub description: Option<String>,
    pub upc: Option<String>,
    pub series: SeriesRef,
    #[serde(default)]
    pub stories: Vec<String>,
    #[serde(default)]
    pub events: Vec<String>,
}

impl Issue {
    /// Description text; the catalog sends `null` for many issues.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_order_by(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "issueNumber",
            SortOrder::Descending => "-issueNumber",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub order: SortOrder,
    pub limit: u32,
    pub no_variants: bool,
}

impl Default for SeriesQuery {
    fn default() -> Self {
        Self {
            order: SortOrder::Descending,
            limit: 100,
            no_variants: true,
        }
    }
}

/// The current issue plus the issues leading up to it, oldest first.
#[derive(Debug, Clone)]
pub struct RecapRequest {
    pub current: Issue,
    pub previous: Vec<Issue>,
}

impl RecapRequest {
    pub fn new(current: Issue, previous: Vec<Issue>) -> Self {
        Self { current, previous }
    }
}

#[derive(Debug, Clone)]
pub enum RecapOutcome {
    NotFound {
        code: String,
    },
    NoPreviousIssues {
        issue: Issue,
        text: String,
    },
    Generated {
        issue: Issue,
        previous_count: usize,
        text: String,
    },
    ModelUnavailable {
        issue: Issue,
        reason: String,
    },
}

impl RecapOutcome {
    pub fn message(&self) -> &str {
        match self {
            RecapOutcome::NotFound { .. } => NOT_FOUND_MESSAGE,
            RecapOutcome::NoPreviousIssues { text, .. } | RecapOutcome::Generated { text, .. } => {
                text
            }
            RecapOutcome::ModelUnavailable { .. } => MODEL_UNAVAILABLE_MESSAGE,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RecapOutcome::NotFound { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Base64-encoded images, only sent to vision models.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            images: Vec::new(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, encoded: String) -> Self {
        self.images.push(encoded);
        self
    }
}
