use crate::models::ExercisePoint;
use crate::range::DateRange;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StatsKey {
    exercise: String,
    range: DateRange,
}

/// Memoizes aggregation results for one version of the workout history.
/// Any version bump drops every entry, and so does reaching `MAX_ENTRIES`.
#[derive(Debug, Default)]
pub struct StatsCache {
    version: u64,
    entries: HashMap<StatsKey, Arc<Vec<ExercisePoint>>>,
}

impl StatsCache {
    pub const MAX_ENTRIES: usize = 64;

    /// `compute` only runs on a miss.
    pub fn get_or_compute(
        &mut self,
        history_version: u64,
        exercise_name: &str,
        range: DateRange,
        compute: impl FnOnce() -> Vec<ExercisePoint>,
    ) -> Arc<Vec<ExercisePoint>> {
        if history_version != self.version {
            self.entries.clear();
            self.version = history_version;
        }

        let key = StatsKey {
            exercise: exercise_name.to_lowercase(),
            range,
        };
        if let Some(points) = self.entries.get(&key) {
            trace!(exercise = exercise_name, "stats cache hit");
            return Arc::clone(points);
        }

        if self.entries.len() >= Self::MAX_ENTRIES {
            trace!(entries = self.entries.len(), "stats cache full, clearing");
            self.entries.clear();
        }
        let points = Arc::new(compute());
        self.entries.insert(key, Arc::clone(&points));
        points
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
