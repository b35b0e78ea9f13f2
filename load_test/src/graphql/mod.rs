//! GraphQL request payloads sent to the search API.

mod payload;

pub use payload::{GraphqlRequest, SearchFilter, SearchInput};
