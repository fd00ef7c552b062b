use crate::config::CatalogConfig;
use crate::core::auth::AuthSigner;
use crate::domain::model::{Issue, IssueNumber, SeriesQuery, SeriesRef};
use crate::domain::ports::Catalog;
use crate::utils::error::{RecapError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Marvel catalog response wrapper: `{code, status, data: {results: [...]}}`.
#[derive(Debug, Deserialize)]
struct CatalogEnvelope {
    #[serde(default)]
    data: Option<CatalogPage>,
}

#[derive(Debug, Deserialize)]
struct CatalogPage {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    results: Vec<RawComic>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComic {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    issue_number: f64,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    upc: Option<String>,
    series: RawSeries,
    #[serde(default)]
    stories: Option<ResourceList>,
    #[serde(default)]
    events: Option<ResourceList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeries {
    #[serde(rename = "resourceURI")]
    resource_uri: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct ResourceList {
    #[serde(default)]
    items: Vec<ResourceSummary>,
}

#[derive(Debug, Deserialize)]
struct ResourceSummary {
    name: String,
}

impl ResourceList {
    fn names(self) -> Vec<String> {
        self.items.into_iter().map(|item| item.name).collect()
    }
}

impl From<RawComic> for Issue {
    fn from(raw: RawComic) -> Self {
        Issue {
            id: raw.id,
            title: raw.title,
            issue_number: IssueNumber(raw.issue_number),
            description: raw.description,
            upc: raw.upc.filter(|u| !u.is_empty()),
            series: SeriesRef {
                resource_uri: raw.series.resource_uri,
                name: raw.series.name,
            },
            stories: raw.stories.map(ResourceList::names).unwrap_or_default(),
            events: raw.events.map(ResourceList::names).unwrap_or_default(),
        }
    }
}

pub struct MarvelCatalog {
    client: Client,
    base_url: String,
    signer: AuthSigner,
}

impl MarvelCatalog {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            signer: AuthSigner::new(&config.public_key, &config.private_key),
        })
    }

    /// One signed GET. Anything but 200 is a transport error.
    async fn fetch(&self, url: &str, params: &[(&str, String)]) -> Result<Vec<Issue>> {
        let auth = self.signer.sign();

        tracing::debug!("Making catalog request to: {}", url);
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&auth.as_query())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        if status != StatusCode::OK {
            return Err(RecapError::TransportError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let envelope: CatalogEnvelope = response.json().await?;
        let Some(page) = envelope.data else {
            return Ok(Vec::new());
        };

        tracing::debug!(
            "Catalog returned {} results (total {:?})",
            page.results.len(),
            page.total
        );
        Ok(page.results.into_iter().map(Issue::from).collect())
    }
}

#[async_trait]
impl Catalog for MarvelCatalog {
    async fn lookup_by_code(&self, code: &str) -> Result<Option<Issue>> {
        let url = format!("{}/comics", self.base_url);
        let issues = self.fetch(&url, &[("upc", code.to_string())]).await?;
        Ok(issues.into_iter().next())
    }

    async fn list_series_issues(
        &self,
        series: &SeriesRef,
        query: &SeriesQuery,
    ) -> Result<Vec<Issue>> {
        let url = format!("{}/comics", series.resource_uri.trim_end_matches('/'));
        let params = [
            ("orderBy", query.order.as_order_by().to_string()),
            ("limit", query.limit.to_string()),
            ("noVariants", query.no_variants.to_string()),
        ];
        self.fetch(&url, &params).await
    }
}
