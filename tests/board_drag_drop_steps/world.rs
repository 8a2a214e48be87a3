//! Shared world state for board drag-and-drop BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::{
    config::SuiteConfig,
    record::adapters::memory::{InMemoryRecordStore, RecordingNotifier},
    suite::TaskSuite,
    task::{domain::TaskId, services::DropOutcome},
};

/// Suite type used by the BDD world.
pub type TestSuite = TaskSuite<InMemoryRecordStore, DefaultClock>;

/// Scenario world for board behaviour tests.
pub struct BoardWorld {
    pub suite: TestSuite,
    pub notifier: Arc<RecordingNotifier>,
    pub tasks: HashMap<String, TaskId>,
    pub last_outcome: Option<DropOutcome>,
}

impl BoardWorld {
    /// Creates a world over an empty in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the suite cannot be wired, which only happens when an
    /// entity declares an invalid table name.
    #[must_use]
    pub fn new() -> Self {
        let notifier = Arc::new(RecordingNotifier::new());
        let suite = TaskSuite::new(
            InMemoryRecordStore::new(),
            Arc::new(DefaultClock),
            notifier.clone(),
            &SuiteConfig::default(),
        )
        .expect("suite wiring");

        Self {
            suite,
            notifier,
            tasks: HashMap::new(),
            last_outcome: None,
        }
    }

    /// Returns the identifier of the task seeded under `title`.
    ///
    /// # Errors
    ///
    /// Returns an error if no task was seeded with that title.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task named {title:?} in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
