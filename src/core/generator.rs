use crate::core::prompt::build_conversation;
use crate::core::think::strip_think_blocks;
use crate::domain::model::RecapRequest;
use crate::domain::ports::ChatModel;
use crate::utils::error::Result;
use std::sync::Arc;

pub const DEFAULT_TEXT_MODEL: &str = "deepseek-r1:14b";

pub struct RecapGenerator {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

impl RecapGenerator {
    pub fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// One chat round trip, no retry. Think blocks are stripped from the reply.
    pub async fn generate(&self, request: &RecapRequest) -> Result<String> {
        let conversation = build_conversation(request);
        tracing::debug!(
            "Requesting recap from {} ({} previous issues, {} prompt chars)",
            self.model_name,
            request.previous.len(),
            conversation.iter().map(|m| m.content.len()).sum::<usize>()
        );

        let raw = self.model.chat(&self.model_name, &conversation).await?;
        Ok(strip_think_blocks(&raw))
    }
}
