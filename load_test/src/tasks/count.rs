// Count search - two filter groups evaluated in one request

use crate::error::TaskResult;
use crate::graphql::{GraphqlRequest, SearchFilter, SearchInput};

use super::SearchTask;

pub const OPERATION: &str = "searchCount";

pub const QUERY: &str = "query searchCount($input: [SearchInput]) { search(input: $input) { count } }";

#[derive(Debug, Clone, Copy)]
pub struct CountSearch;

impl SearchTask for CountSearch {
    fn operation_name(&self) -> &str {
        OPERATION
    }

    fn payload(&self) -> TaskResult<GraphqlRequest> {
        let input = vec![
            SearchInput::filters(vec![SearchFilter::new("kind", &["Pod"])]),
            SearchInput::filters(vec![SearchFilter::new("kind", &["Deployment"])]),
        ];
        GraphqlRequest::new(QUERY).variable("input", input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_has_pod_and_deployment_groups() {
        let payload = CountSearch.payload().unwrap();
        let input = payload.variables["input"].as_array().unwrap();
        assert_eq!(input.len(), 2);
        assert_eq!(
            input[0]["filters"],
            json!([{"property": "kind", "values": ["Pod"]}])
        );
        assert_eq!(
            input[1]["filters"],
            json!([{"property": "kind", "values": ["Deployment"]}])
        );
    }
}
