// File: crates/plot-env/src/store.rs
// Summary: Single-writer holder of the current snapshot; serializes every action through one entry point.

use std::sync::Arc;

use crate::action::PlotAction;
use crate::env::PlotEnv;

/// Owns "the current snapshot". `dispatch` takes `&mut self`, so there is one
/// writer at a time and a total order over all actions; readers keep the
/// `Arc` they were handed and never see it change.
#[derive(Clone, Debug, Default)]
pub struct PlotStore {
    current: Arc<PlotEnv>,
    revision: u64,
}

impl PlotStore {
    pub fn new(initial: PlotEnv) -> Self {
        Self { current: Arc::new(initial), revision: 0 }
    }

    /// Apply `action` and return the new snapshot.
    pub fn dispatch(&mut self, action: PlotAction) -> Arc<PlotEnv> {
        self.current = Arc::new(self.current.reduce(action));
        self.revision += 1;
        Arc::clone(&self.current)
    }

    /// Apply actions in order; returns the final snapshot.
    pub fn dispatch_all<I: IntoIterator<Item = PlotAction>>(&mut self, actions: I) -> Arc<PlotEnv> {
        for action in actions {
            self.dispatch(action);
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> Arc<PlotEnv> {
        Arc::clone(&self.current)
    }

    /// Number of actions applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
