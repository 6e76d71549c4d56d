//! Searcher trait.

use crate::error::QuarryResult;
use crate::types::{Container, ResultNode};

/// Core Searcher trait - every search engine implements this.
///
/// A searcher is bound to its query when it is built; `search` only binds the
/// container, runs the query and shapes the matches into a
/// [`ResultKind::ContainerResults`](crate::types::ResultKind) node so that
/// aggregation never needs to know which format produced a match.
pub trait Searcher {
    /// Search one container.
    fn search(&self, container: &dyn Container) -> QuarryResult<ResultNode>;

    /// Human-readable name for this searcher.
    fn name(&self) -> &str;
}
