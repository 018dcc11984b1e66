//! Sequential execution strategy

use crate::{
    corpus::Document,
    error::Result,
    executor::{ExecutionMode, Executor},
};

/// Sequential single-threaded executor
#[derive(Debug, Clone, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn run<T, F>(&self, documents: &[Document], job: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Document) -> T + Send + Sync,
    {
        Ok(documents.iter().map(job).collect())
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_in_document_order() {
        let docs = vec![Document::new("a", "one"), Document::new("b", "three")];
        let lens = SequentialExecutor.run(&docs, |doc| doc.len()).unwrap();
        assert_eq!(lens, vec![3, 5]);
    }
}
