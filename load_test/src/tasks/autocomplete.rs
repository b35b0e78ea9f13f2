// Autocomplete - distinct values for one property

use crate::error::TaskResult;
use crate::graphql::GraphqlRequest;

use super::SearchTask;

pub const OPERATION: &str = "searchComplete";

pub const QUERY: &str = "query searchComplete($property: String!, $query: SearchInput, $limit: Int) { searchComplete(property: $property, query: $query, limit: $limit) }";

#[derive(Debug, Clone, Copy)]
pub struct AutocompleteSearch;

impl SearchTask for AutocompleteSearch {
    fn operation_name(&self) -> &str {
        OPERATION
    }

    fn payload(&self) -> TaskResult<GraphqlRequest> {
        GraphqlRequest::new(QUERY)
            .variable("property", "name")?
            .variable("limit", 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_scalar_variables() {
        let payload = AutocompleteSearch.payload().unwrap();
        assert_eq!(payload.variables["property"], "name");
        assert_eq!(payload.variables["limit"], 1000);
        assert!(!payload.variables.contains_key("input"));
    }
}
