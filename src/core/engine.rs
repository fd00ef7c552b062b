use crate::adapters::catalog::MarvelCatalog;
use crate::adapters::ollama::OllamaClient;
use crate::config::AppConfig;
use crate::core::barcode::{combine_code, validate_primary, BarcodeReader, DEFAULT_VISION_MODEL};
use crate::core::context::{select_previous_within, RecapWindow};
use crate::core::generator::{RecapGenerator, DEFAULT_TEXT_MODEL};
use crate::core::prompt::recap_header;
use crate::domain::model::{Issue, RecapOutcome, RecapRequest, SeriesQuery};
use crate::domain::ports::{Catalog, ChatModel};
use crate::utils::error::{RecapError, Result};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RecapSettings {
    pub text_model: String,
    pub vision_model: String,
    pub window: RecapWindow,
    pub series_query: SeriesQuery,
}

impl Default for RecapSettings {
    fn default() -> Self {
        Self {
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            window: RecapWindow::default(),
            series_query: SeriesQuery::default(),
        }
    }
}

impl RecapSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            text_model: config.llm.model.clone(),
            vision_model: config.llm.vision_model.clone(),
            window: RecapWindow::new(config.recap.window),
            series_query: SeriesQuery {
                limit: config.catalog.series_limit,
                no_variants: config.catalog.no_variants,
                ..SeriesQuery::default()
            },
        }
    }
}

/// Runs one recap request end to end: lookup, context, generation.
pub struct RecapEngine {
    catalog: Arc<dyn Catalog>,
    generator: RecapGenerator,
    barcode: BarcodeReader,
    settings: RecapSettings,
}

impl RecapEngine {
    pub fn new(catalog: Arc<dyn Catalog>, model: Arc<dyn ChatModel>, settings: RecapSettings) -> Self {
        Self {
            catalog,
            generator: RecapGenerator::new(model.clone(), settings.text_model.clone()),
            barcode: BarcodeReader::new(model, settings.vision_model.clone()),
            settings,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let catalog = MarvelCatalog::new(&config.catalog)?;
        let model = OllamaClient::new(&config.llm)?;
        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(model),
            RecapSettings::from_config(config),
        ))
    }

    /// Not found and "no earlier issues" finish without a model call. A model
    /// failure becomes [`RecapOutcome::ModelUnavailable`]; catalog failures
    /// are returned as errors.
    pub async fn recap(&self, code: &str) -> Result<RecapOutcome> {
        let code = code.trim();
        if code.is_empty() {
            return Err(RecapError::MissingInput {
                field: "upc".to_string(),
            });
        }

        tracing::info!("Looking up issue for code {}", code);
        let Some(issue) = self.catalog.lookup_by_code(code).await? else {
            tracing::info!("No issue found for code {}", code);
            return Ok(RecapOutcome::NotFound {
                code: code.to_string(),
            });
        };
        tracing::info!("Found {} (#{})", issue.title, issue.issue_number);

        let previous = self.previous_issues(&issue).await?;
        let header = recap_header(&issue);

        if previous.is_empty() {
            tracing::info!("No previous issues for {}, returning its description", issue.title);
            let text = format!("{}{}", header, issue.description_text());
            return Ok(RecapOutcome::NoPreviousIssues { issue, text });
        }

        let previous_count = previous.len();
        let request = RecapRequest::new(issue, previous);
        match self.generator.generate(&request).await {
            Ok(recap) => {
                tracing::info!(
                    "Generated recap for {} from {} previous issues",
                    request.current.title,
                    previous_count
                );
                Ok(RecapOutcome::Generated {
                    issue: request.current,
                    previous_count,
                    text: format!("{}{}", header, recap),
                })
            }
            Err(e) => {
                tracing::warn!(
                    "Recap generation with {} failed: {}",
                    self.generator.model_name(),
                    e
                );
                Ok(RecapOutcome::ModelUnavailable {
                    issue: request.current,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Decodes the barcode add-on from `image`, appends it to `code`, then
    /// runs [`RecapEngine::recap`]. `code` is checked before the vision call.
    pub async fn recap_from_scan(&self, code: &str, image: &[u8]) -> Result<RecapOutcome> {
        let code = validate_primary(code)?;

        let addon = self.barcode.read_addon(image).await?;
        let full_code = combine_code(code, &addon)?;
        tracing::info!("Decoded add-on {}, full code {}", addon, full_code);

        self.recap(&full_code).await
    }

    pub async fn previous_issues(&self, issue: &Issue) -> Result<Vec<Issue>> {
        let siblings = self
            .catalog
            .list_series_issues(&issue.series, &self.settings.series_query)
            .await?;
        tracing::debug!(
            "Series {} returned {} issues",
            issue.series.name,
            siblings.len()
        );

        Ok(select_previous_within(
            siblings,
            issue.issue_number,
            self.settings.window,
        ))
    }
}
