//! Barrier over the done/invalid signals of N build units.

#[derive(Debug, Clone)]
enum UnitState<S> {
    Pending,
    Done(S),
}

/// Tracks which build units are done and hands back every unit's result,
/// in index order, whenever all of them are done at the same time.
///
/// The aggregator only answers "is this the moment to fire"; invoking the
/// combined callback (and awaiting it) is left to the caller so that no
/// state is borrowed while it runs.
#[derive(Debug, Clone)]
pub struct CompletionAggregator<S> {
    units: Vec<UnitState<S>>,
    done_count: usize,
}

impl<S: Clone> CompletionAggregator<S> {
    pub fn new(unit_count: usize) -> Self {
        Self { units: (0..unit_count).map(|_| UnitState::Pending).collect(), done_count: 0 }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn done_count(&self) -> usize {
        self.done_count
    }

    pub fn is_done(&self, index: usize) -> bool {
        matches!(self.units.get(index), Some(UnitState::Done(_)))
    }

    /// Record a done signal. Returns all results when every unit is done.
    ///
    /// A repeated done without an intervening invalidate replaces the stored
    /// result and is not counted twice.
    pub fn mark_done(&mut self, index: usize, result: S) -> Option<Vec<S>> {
        let Some(slot) = self.units.get_mut(index) else {
            tracing::warn!(index, units = self.units.len(), "done signal for unknown build unit");
            return None;
        };

        if matches!(slot, UnitState::Pending) {
            self.done_count += 1;
        }
        *slot = UnitState::Done(result);
        tracing::trace!(index, done = self.done_count, units = self.units.len(), "build unit done");

        if self.done_count != self.units.len() {
            return None;
        }

        let results = self
            .units
            .iter()
            .map(|unit| match unit {
                UnitState::Done(result) => Some(result.clone()),
                UnitState::Pending => None,
            })
            .collect::<Option<Vec<S>>>();
        if results.is_some() {
            tracing::debug!(units = self.units.len(), "all build units done");
        }
        results
    }

    /// Record an invalid signal; the unit's stale result is dropped.
    pub fn mark_invalid(&mut self, index: usize) {
        let Some(slot) = self.units.get_mut(index) else {
            tracing::warn!(
                index,
                units = self.units.len(),
                "invalid signal for unknown build unit"
            );
            return;
        };

        if matches!(slot, UnitState::Done(_)) {
            *slot = UnitState::Pending;
            self.done_count -= 1;
            tracing::trace!(index, done = self.done_count, "build unit invalidated");
        }
    }
}
