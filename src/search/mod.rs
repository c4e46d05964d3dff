#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

/// Arguments for the `search_content` stored procedure.
///
/// The embedding is a concrete ordered sequence of floats rather than the
/// opaque vector type the database schema declares. Optional tuning
/// parameters are omitted from the request body when unset so the
/// procedure's SQL defaults apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchContentArgs {
    pub embedding: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_result_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_full_content: Option<bool>,
}

/// Arguments for the `search_content_hybrid` stored procedure, which
/// combines full-text rank with vector similarity via reciprocal rank
/// fusion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridSearchArgs {
    pub query_text: String,
    pub query_embedding: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_result_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrf_k: Option<u32>,
}

/// A result row from either search procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub page_title: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub href: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub metadata: SectionMetadata,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

/// The recognized metadata attributes of a result row.
///
/// The procedures return `jsonb` here; only these four attributes are part
/// of the contract, and deserialization discards anything else the row
/// carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "methodName", skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// A nested subsection of a matched page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SearchContentArgs {
    #[inline]
    pub fn new(embedding: Vec<f32>) -> Self {
        Self {
            embedding,
            match_threshold: None,
            max_result_count: None,
            include_full_content: None,
        }
    }
}

impl HybridSearchArgs {
    #[inline]
    pub fn new(query_text: impl Into<String>, query_embedding: Vec<f32>) -> Self {
        Self {
            query_text: query_text.into(),
            query_embedding,
            max_result_count: None,
            full_text_weight: None,
            semantic_weight: None,
            rrf_k: None,
        }
    }
}
