// Keyword search - free-text match across all resource fields

use crate::error::TaskResult;
use crate::graphql::{GraphqlRequest, SearchInput};

use super::SearchTask;

pub const OPERATION: &str = "searchByKeyword";

pub const QUERY: &str = "query searchByKeyword($input: [SearchInput]) { search(input: $input) { items } }";

#[derive(Debug, Clone, Copy)]
pub struct KeywordSearch;

impl SearchTask for KeywordSearch {
    fn operation_name(&self) -> &str {
        OPERATION
    }

    fn payload(&self) -> TaskResult<GraphqlRequest> {
        let input = vec![SearchInput::keywords(&["openshift"]).with_limit(1000)];
        GraphqlRequest::new(QUERY).variable("input", input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_byte_identical_across_calls() {
        let first = KeywordSearch.payload().unwrap().to_bytes().unwrap();
        let second = KeywordSearch.payload().unwrap().to_bytes().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_payload_carries_keywords() {
        let payload = KeywordSearch.payload().unwrap();
        let input = &payload.variables["input"][0];
        assert_eq!(input["keywords"][0], "openshift");
        assert_eq!(input["limit"], 1000);
    }
}
