//! Payload types mirroring the search API's `SearchInput` and `SearchFilter`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TaskResult;

/// A property filter, e.g. `kind = Pod OR Deployment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub property: String,
    pub values: Vec<String>,
}

impl SearchFilter {
    pub fn new(property: impl Into<String>, values: &[&str]) -> Self {
        Self {
            property: property.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// One entry of the `input` list accepted by `search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<SearchFilter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Restricts the `related` field to these kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_kinds: Option<Vec<String>>,
}

impl SearchInput {
    pub fn keywords(keywords: &[&str]) -> Self {
        Self {
            keywords: Some(keywords.iter().map(|k| k.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn filters(filters: Vec<SearchFilter>) -> Self {
        Self {
            filters: Some(filters),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The JSON body of a GraphQL POST: `{"query": ..., "variables": {...}}`.
///
/// `variables` is a `serde_json::Map`, which keeps keys sorted, so the same
/// request always serializes to the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
        }
    }

    /// Add a variable, serializing `value` to JSON.
    pub fn variable<T: Serialize>(mut self, name: &str, value: T) -> TaskResult<Self> {
        self.variables
            .insert(name.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn to_bytes(&self) -> TaskResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
