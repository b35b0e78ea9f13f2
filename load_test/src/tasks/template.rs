//! Template search - payload loaded from a JSON file on every invocation.
//!
//! The file must hold at least a `query` field; `variables` defaults to `{}`.
//! It is not cached, so edits take effect on the next request.

use std::path::PathBuf;

use crate::error::{TaskError, TaskResult};
use crate::graphql::GraphqlRequest;

use super::SearchTask;

pub const OPERATION: &str = "searchTemplate";

pub const DEFAULT_TEMPLATE_FILE: &str = "search-query-template.json";

#[derive(Debug, Clone)]
pub struct TemplateSearch {
    path: PathBuf,
}

impl TemplateSearch {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SearchTask for TemplateSearch {
    fn operation_name(&self) -> &str {
        OPERATION
    }

    fn payload(&self) -> TaskResult<GraphqlRequest> {
        let raw = std::fs::read(&self.path).map_err(|source| TaskError::TemplateRead {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&raw).map_err(|source| TaskError::TemplateParse {
            path: self.path.clone(),
            source,
        })
    }
}
