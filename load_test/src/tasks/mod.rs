//! Search tasks a simulated user can run.
//!
//! Each task produces exactly one GraphQL request. Payloads are fixed at
//! definition time; only the template task touches the filesystem.

pub mod autocomplete;
pub mod count;
pub mod filter;
pub mod keyword;
pub mod related;
pub mod schema;
pub mod template;

use std::sync::Arc;

use rand::Rng;

use crate::error::TaskResult;
use crate::graphql::GraphqlRequest;

pub use autocomplete::AutocompleteSearch;
pub use count::CountSearch;
pub use filter::FilterSearch;
pub use keyword::KeywordSearch;
pub use related::{RelatedCountSearch, RelatedItemsSearch};
pub use schema::SchemaSearch;
pub use template::TemplateSearch;

/// A named unit of work: one GraphQL POST.
pub trait SearchTask: Send + Sync {
    /// Tag used to bucket statistics; the server ignores it.
    fn operation_name(&self) -> &str;

    /// Build the `{query, variables}` body for one invocation.
    fn payload(&self) -> TaskResult<GraphqlRequest>;
}

/// The repertoire of tasks a user picks from.
#[derive(Clone, Default)]
pub struct TaskSet {
    tasks: Vec<Arc<dyn SearchTask>>,
}

impl std::fmt::Debug for TaskSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSet")
            .field("tasks", &self.operation_names())
            .finish()
    }
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task: impl SearchTask + 'static) {
        self.tasks.push(Arc::new(task));
    }

    pub fn register_shared(&mut self, task: Arc<dyn SearchTask>) {
        self.tasks.push(task);
    }

    pub fn with(mut self, task: impl SearchTask + 'static) -> Self {
        self.register(task);
        self
    }

    /// Pick a task uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Arc<dyn SearchTask>> {
        if self.tasks.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.tasks.len());
        Some(self.tasks[idx].clone())
    }

    pub fn get(&self, operation_name: &str) -> Option<Arc<dyn SearchTask>> {
        self.tasks
            .iter()
            .find(|t| t.operation_name() == operation_name)
            .cloned()
    }

    pub fn operation_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.operation_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Every built-in task with a static payload.
pub fn catalog() -> TaskSet {
    TaskSet::new()
        .with(KeywordSearch)
        .with(FilterSearch)
        .with(CountSearch)
        .with(AutocompleteSearch)
        .with(RelatedCountSearch)
        .with(RelatedItemsSearch)
        .with(SchemaSearch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_operation_names_are_unique() {
        let set = catalog();
        let names: HashSet<&str> = set.operation_names().into_iter().collect();
        assert_eq!(names.len(), set.len());
    }

    #[test]
    fn test_choose_eventually_covers_every_task() {
        let set = catalog();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let task = set.choose(&mut rng).unwrap();
            seen.insert(task.operation_name().to_string());
        }
        assert_eq!(seen.len(), set.len());
    }

    #[test]
    fn test_choose_on_empty_set() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(TaskSet::new().choose(&mut rng).is_none());
    }

    #[test]
    fn test_every_catalog_task_declares_its_variables() {
        for name in catalog().operation_names() {
            let task = catalog().get(name).unwrap();
            let payload = task.payload().unwrap();
            for var in payload.variables.keys() {
                assert!(
                    payload.query.contains(&format!("${var}")),
                    "{name} sends ${var} but does not declare it"
                );
            }
        }
    }
}
