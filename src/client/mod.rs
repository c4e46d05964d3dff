
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::SearchError;
use crate::config::Config;
use crate::search::{HybridSearchArgs, SearchContentArgs, SearchResult};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const REST_PATH: &str = "rest/v1";

static CLIENT: OnceLock<ContentClient> = OnceLock::new();

/// Returns the process-wide client, constructing it from the environment on
/// first use.
///
/// The first call reads `SUPABASE_URL` and `SUPABASE_ANON_KEY` and fails if
/// either is missing or malformed; nothing is stored on failure, so a later
/// call retries construction. Once a client has been stored every caller
/// observes the same instance. If two threads race the first call the loser's
/// freshly built client is dropped, which has no side effects because
/// construction only stores configuration.
#[inline]
pub fn client() -> crate::Result<&'static ContentClient> {
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }

    let config = Config::from_env().map_err(|e| SearchError::Config(format!("{e:#}")))?;
    let constructed =
        ContentClient::new(&config).map_err(|e| SearchError::Config(format!("{e:#}")))?;

    Ok(CLIENT.get_or_init(|| constructed))
}

/// A handle to the content database, speaking PostgREST conventions over
/// HTTP. Construction performs no network I/O.
#[derive(Debug, Clone)]
pub struct ContentClient {
    base_url: Url,
    anon_key: String,
    agent: ureq::Agent,
}

/// A pending row query against a single table.
#[derive(Debug)]
pub struct TableQuery<'a> {
    client: &'a ContentClient,
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<u32>,
}

impl ContentClient {
    #[inline]
    pub fn new(config: &Config) -> Result<Self> {
        config.validate().context("Invalid client configuration")?;

        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS)))
            .build()
            .into();

        Ok(Self {
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
            agent,
        })
    }

    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        self
    }

    #[inline]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run vector similarity search over the documentation content.
    #[inline]
    pub fn search_content(&self, args: &SearchContentArgs) -> Result<Vec<SearchResult>> {
        debug!(
            "Running vector search with a {}-dimension embedding",
            args.embedding.len()
        );

        let results: Vec<SearchResult> = self.rpc("search_content", args)?;

        debug!("Vector search returned {} rows", results.len());
        Ok(results)
    }

    /// Run hybrid (full-text + vector) search over the documentation content.
    #[inline]
    pub fn search_content_hybrid(&self, args: &HybridSearchArgs) -> Result<Vec<SearchResult>> {
        debug!(
            "Running hybrid search for {:?} with a {}-dimension embedding",
            args.query_text,
            args.query_embedding.len()
        );

        let results: Vec<SearchResult> = self.rpc("search_content_hybrid", args)?;

        debug!("Hybrid search returned {} rows", results.len());
        Ok(results)
    }

    /// Invoke a stored procedure with a JSON argument object and parse its
    /// JSON response.
    #[inline]
    pub fn rpc<A, R>(&self, function: &str, args: &A) -> Result<R>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.rest_url(&format!("rpc/{function}"))?;
        let body = serde_json::to_string(args)
            .with_context(|| format!("Failed to serialize arguments for '{function}'"))?;

        debug!("Calling stored procedure {} at {}", function, url);

        let response_text = self
            .post_json(&url, &body)
            .with_context(|| format!("Stored procedure '{function}' call failed"))?;

        serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse response from stored procedure '{function}'"))
    }

    /// Begin a row query against `table`.
    #[inline]
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery {
            client: self,
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Insert rows into `table`. The response body is not requested.
    #[inline]
    pub fn insert<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<()> {
        let url = self.rest_url(table)?;
        let body = serde_json::to_string(rows)
            .with_context(|| format!("Failed to serialize rows for table '{table}'"))?;

        debug!("Inserting {} rows into {}", rows.len(), table);

        let bearer = format!("Bearer {}", self.anon_key);
        self.agent
            .post(url.as_str())
            .header("apikey", self.anon_key.as_str())
            .header("Authorization", bearer.as_str())
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .send(&body)
            .map_err(|error| self.map_http_error(&url, error))
            .with_context(|| format!("Insert into table '{table}' failed"))?;

        Ok(())
    }

    fn rest_url(&self, segment: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{REST_PATH}/{segment}"))
            .with_context(|| format!("Failed to build request URL for '{segment}'"))
    }

    fn get_json(&self, url: &Url) -> Result<String> {
        let bearer = format!("Bearer {}", self.anon_key);
        self.agent
            .get(url.as_str())
            .header("apikey", self.anon_key.as_str())
            .header("Authorization", bearer.as_str())
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|error| self.map_http_error(url, error))
    }

    fn post_json(&self, url: &Url, body: &str) -> Result<String> {
        let bearer = format!("Bearer {}", self.anon_key);
        self.agent
            .post(url.as_str())
            .header("apikey", self.anon_key.as_str())
            .header("Authorization", bearer.as_str())
            .header("Content-Type", "application/json")
            .send(body)
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|error| self.map_http_error(url, error))
    }

    fn map_http_error(&self, url: &Url, error: ureq::Error) -> anyhow::Error {
        match error {
            ureq::Error::StatusCode(status) => {
                warn!("Request to {} failed with HTTP {}", url, status);
                anyhow::anyhow!("HTTP {} from {}", status, url)
            }
            other => {
                warn!("Transport error for {}: {}", url, other);
                anyhow::anyhow!("Transport error: {}", other)
            }
        }
    }
}

impl TableQuery<'_> {
    /// Restrict the returned columns (PostgREST `select=` parameter).
    #[inline]
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    /// Keep only rows where `column` equals `value`.
    #[inline]
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    #[inline]
    pub fn order(mut self, column: &str, descending: bool) -> Self {
        let direction = if descending { "desc" } else { "asc" };
        self.order = Some(format!("{column}.{direction}"));
        self
    }

    #[inline]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Execute the query and parse the rows.
    #[inline]
    pub fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let url = self.request_url()?;

        debug!("Fetching rows from {}", url);

        let response_text = self.client.get_json(&url)?;

        serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse rows from table '{}'", self.table))
    }

    fn request_url(&self) -> Result<Url> {
        let mut url = self.client.rest_url(&self.table)?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", &self.columns);
            for (column, filter) in &self.filters {
                pairs.append_pair(column, filter);
            }
            if let Some(order) = &self.order {
                pairs.append_pair("order", order);
            }
            if let Some(limit) = self.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }

        Ok(url)
    }
}
