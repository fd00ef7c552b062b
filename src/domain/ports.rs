use crate::domain::model::{ChatMessage, Issue, SeriesQuery, SeriesRef};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Catalog: Send + Sync {
    /// `Ok(None)` when the catalog has no issue for the code.
    async fn lookup_by_code(&self, code: &str) -> Result<Option<Issue>>;

    async fn list_series_issues(&self, series: &SeriesRef, query: &SeriesQuery)
        -> Result<Vec<Issue>>;
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the raw content of the model's reply.
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String>;
}
