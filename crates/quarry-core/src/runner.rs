//! Run orchestration: visit each visitable, then place its results.

use crate::error::{QuarryError, QuarryResult};
use crate::output::{OutputPlacer, PlacementReport};
use crate::types::{ResultsTree, Visitable};
use crate::visitor::{Dispatcher, Visitor};

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Visitables visited.
    pub visited: usize,
    /// Every container's results from every visitable, in visiting order.
    pub aggregate: ResultsTree,
    /// One placement report per visitable.
    pub placements: Vec<PlacementReport>,
}

impl RunSummary {
    /// Total matches across the run.
    pub fn match_count(&self) -> usize {
        self.aggregate.match_count()
    }

    /// Number of artifacts written.
    pub fn written_count(&self) -> usize {
        self.placements.iter().map(|p| p.written.len()).sum()
    }

    /// Number of failed writes.
    pub fn failure_count(&self) -> usize {
        self.placements.iter().map(|p| p.failures.len()).sum()
    }
}

/// Drives a visitor over a list of visitables.
pub struct Runner<V: Visitor> {
    dispatcher: Dispatcher<V>,
    placer: OutputPlacer,
}

impl<V: Visitor> Runner<V> {
    pub fn new(visitor: V, placer: OutputPlacer) -> Self {
        Self {
            dispatcher: Dispatcher::new(visitor),
            placer,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<V> {
        &self.dispatcher
    }

    /// Visit every visitable in order and write its results.
    ///
    /// Each visitable gets its own tree, so an artifact only ever holds that
    /// visitable's results. Dispatch errors end the run; write failures are
    /// recorded in the summary. An empty list is logged and is not an error.
    pub fn run(&self, visitables: &[Visitable]) -> QuarryResult<RunSummary> {
        let mut summary = RunSummary::default();
        if visitables.is_empty() {
            tracing::error!("{}", QuarryError::EmptyInput);
            return Ok(summary);
        }

        tracing::info!("Visiting {} visitable(s)", visitables.len());
        for visitable in visitables {
            tracing::debug!("{} backed by {} file(s)", visitable, visitable.files().len());
            let tree = self.dispatcher.visit(visitable)?;
            if let Some(root) = tree.root() {
                for list in root.children() {
                    summary.aggregate.append(list.clone());
                }
            }
            let report = self.placer.place(&tree, visitable.files())?;
            if !report.is_clean() {
                tracing::warn!(
                    "{}: {} of {} artifact(s) failed",
                    visitable,
                    report.failures.len(),
                    report.failures.len() + report.written.len()
                );
            }
            summary.placements.push(report);
            summary.visited += 1;
        }

        tracing::info!(
            "Run complete: {} matches, {} artifacts written, {} failed",
            summary.match_count(),
            summary.written_count(),
            summary.failure_count()
        );
        Ok(summary)
    }
}
