#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A documentation page row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub path: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub source: Option<String>,
    pub checksum: Option<String>,
    pub last_refresh: Option<DateTime<Utc>>,
}

/// A section of a page. Sections are the unit the search procedures match
/// against; their embeddings live server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSection {
    pub id: i64,
    pub page_id: i64,
    pub slug: Option<String>,
    pub heading: Option<String>,
    pub content: Option<String>,
}
