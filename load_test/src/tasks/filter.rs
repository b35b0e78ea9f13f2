// Filter search - match resources by property values

use crate::error::TaskResult;
use crate::graphql::{GraphqlRequest, SearchFilter, SearchInput};

use super::SearchTask;

pub const OPERATION: &str = "searchByFilter";

pub const QUERY: &str = "query searchByFilter($input: [SearchInput]) { search(input: $input) { items } }";

#[derive(Debug, Clone, Copy)]
pub struct FilterSearch;

impl SearchTask for FilterSearch {
    fn operation_name(&self) -> &str {
        OPERATION
    }

    fn payload(&self) -> TaskResult<GraphqlRequest> {
        let input =
            vec![SearchInput::filters(vec![SearchFilter::new("namespace", &["default"])]).with_limit(1000)];
        GraphqlRequest::new(QUERY).variable("input", input)
    }
}
