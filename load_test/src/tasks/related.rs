// Related searches - resources connected to the matched ones

use crate::error::TaskResult;
use crate::graphql::{GraphqlRequest, SearchFilter, SearchInput};

use super::SearchTask;

pub const COUNT_OPERATION: &str = "searchRelatedCount";

pub const COUNT_QUERY: &str = "query searchRelatedCount($input: [SearchInput]) { search(input: $input) { related { kind count } } }";

pub const ITEMS_OPERATION: &str = "searchRelatedItems";

pub const ITEMS_QUERY: &str = "query searchRelatedItems($input: [SearchInput]) { search(input: $input) { related { kind items } } }";

/// Counts of related resources, grouped by kind, for one named resource.
#[derive(Debug, Clone, Copy)]
pub struct RelatedCountSearch;

impl SearchTask for RelatedCountSearch {
    fn operation_name(&self) -> &str {
        COUNT_OPERATION
    }

    fn payload(&self) -> TaskResult<GraphqlRequest> {
        let input =
            vec![SearchInput::filters(vec![SearchFilter::new("name", &["search-api"])]).with_limit(1000)];
        GraphqlRequest::new(COUNT_QUERY).variable("input", input)
    }
}

/// Related resources, with items, for every resource of one kind.
#[derive(Debug, Clone, Copy)]
pub struct RelatedItemsSearch;

impl SearchTask for RelatedItemsSearch {
    fn operation_name(&self) -> &str {
        ITEMS_OPERATION
    }

    fn payload(&self) -> TaskResult<GraphqlRequest> {
        let input =
            vec![SearchInput::filters(vec![SearchFilter::new("kind", &["Deployment"])]).with_limit(100)];
        GraphqlRequest::new(ITEMS_QUERY).variable("input", input)
    }
}
