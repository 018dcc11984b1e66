//! Execution strategies for per-document jobs

use crate::corpus::Document;
use crate::error::Result;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExecutionMode {
    /// Documents processed one after another on the calling thread
    Sequential,
    /// Documents processed on a thread pool
    Parallel,
    /// Pick sequential or parallel from the corpus size
    Adaptive,
}

/// Trait for execution strategies
///
/// Implementations run `job` once per document and return the results in
/// document order, whatever order the jobs finished in.
pub trait Executor: Send + Sync {
    /// Run `job` over every document
    fn run<T, F>(&self, documents: &[Document], job: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Document) -> T + Send + Sync;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Resolve [`ExecutionMode::Adaptive`] for a corpus
///
/// Parallel is chosen once the corpus reaches `threshold` bytes and has more
/// than one document to spread across threads.
pub fn auto_select(total_bytes: usize, documents: usize, threshold: usize) -> ExecutionMode {
    if documents < 2 || total_bytes < threshold {
        return ExecutionMode::Sequential;
    }

    #[cfg(feature = "parallel")]
    return ExecutionMode::Parallel;

    #[cfg(not(feature = "parallel"))]
    ExecutionMode::Sequential
}
