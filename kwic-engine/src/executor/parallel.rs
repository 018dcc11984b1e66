//! Parallel execution strategy

use crate::{
    corpus::Document,
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor},
};
use rayon::prelude::*;

/// Parallel multi-threaded executor
///
/// Runs on the global rayon pool unless a thread count is given, in which
/// case a dedicated pool of that size is built per call.
#[derive(Debug, Clone, Default)]
pub struct ParallelExecutor {
    threads: Option<usize>,
}

impl ParallelExecutor {
    /// Create a new parallel executor
    pub fn new(threads: Option<usize>) -> Self {
        Self { threads }
    }

    /// Configured thread count
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }
}

impl Executor for ParallelExecutor {
    fn run<T, F>(&self, documents: &[Document], job: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Document) -> T + Send + Sync,
    {
        // Indexed collect keeps document order
        let map_all = || documents.par_iter().map(|doc| job(doc)).collect::<Vec<T>>();

        match self.threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| EngineError::ParallelError(e.to_string()))?;
                Ok(pool.install(map_all))
            }
            None => Ok(map_all()),
        }
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_in_document_order() {
        let docs: Vec<Document> = (0..64)
            .map(|i| Document::new(format!("doc{i}"), "x".repeat(i)))
            .collect();

        let lens = ParallelExecutor::new(Some(4))
            .run(&docs, |doc| doc.len())
            .unwrap();
        assert_eq!(lens, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_global_pool() {
        let docs = vec![Document::new("a", "ab"), Document::new("b", "c")];
        let names = ParallelExecutor::default()
            .run(&docs, |doc| doc.name().to_string())
            .unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }
}
