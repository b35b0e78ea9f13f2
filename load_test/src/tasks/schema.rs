// Schema search - list of searchable properties, no variables

use crate::error::TaskResult;
use crate::graphql::GraphqlRequest;

use super::SearchTask;

pub const OPERATION: &str = "searchSchema";

pub const QUERY: &str = "query searchSchema { searchSchema }";

#[derive(Debug, Clone, Copy)]
pub struct SchemaSearch;

impl SearchTask for SchemaSearch {
    fn operation_name(&self) -> &str {
        OPERATION
    }

    fn payload(&self) -> TaskResult<GraphqlRequest> {
        Ok(GraphqlRequest::new(QUERY))
    }
}
