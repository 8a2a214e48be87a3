//! Composition root wiring the task workflow over one record store.

use mockable::Clock;
use std::sync::Arc;
use tracing::info;

use crate::config::SuiteConfig;
use crate::record::{
    adapters::{InstrumentedRecordStore, RequestMonitor},
    ports::{Notifier, RecordStore},
    services::{CollectionCache, CollectionResult, EntityCollection, NotifyPolicy},
};
use crate::task::{
    domain::{ActivityEntry, Employee, Task},
    services::{ActivityRecorder, BoardCoordinator, TaskWorkflowService},
};

/// Record store used by every collection of a suite.
pub type SuiteStore<S, C> = InstrumentedRecordStore<S, C>;

/// One task board with its collections, sharing a cache and a store.
pub struct TaskSuite<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    store: Arc<SuiteStore<S, C>>,
    cache: Arc<CollectionCache>,
    employees: EntityCollection<Employee, SuiteStore<S, C>>,
    activity: Arc<EntityCollection<ActivityEntry, SuiteStore<S, C>>>,
    board: BoardCoordinator<SuiteStore<S, C>, C>,
    workflow: TaskWorkflowService<SuiteStore<S, C>>,
}

impl<S, C> TaskSuite<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Wires a suite over `store` according to `config`.
    ///
    /// Every collection is scoped to the configured tenant. The activity log
    /// never notifies the user, and its writes are skipped entirely when
    /// activity recording is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`crate::record::services::CollectionError::Schema`] when an
    /// entity declares an invalid table name.
    pub fn new(
        store: S,
        clock: Arc<C>,
        notifier: Arc<dyn Notifier>,
        config: &SuiteConfig,
    ) -> CollectionResult<Self> {
        let monitor = RequestMonitor::new(config.request_monitor_capacity);
        let store = Arc::new(InstrumentedRecordStore::new(
            store,
            monitor,
            Arc::clone(&clock),
        ));
        let cache = Arc::new(CollectionCache::new());
        let scope = config.scope_query();

        let tasks = Arc::new(
            EntityCollection::<Task, _>::new(
                Arc::clone(&store),
                Arc::clone(&cache),
                Arc::clone(&notifier),
            )?
            .with_scope(scope.clone()),
        );
        let employees = EntityCollection::<Employee, _>::new(
            Arc::clone(&store),
            Arc::clone(&cache),
            Arc::clone(&notifier),
        )?
        .with_scope(scope.clone());
        let activity = Arc::new(
            EntityCollection::<ActivityEntry, _>::new(
                Arc::clone(&store),
                Arc::clone(&cache),
                notifier,
            )?
            .with_scope(scope)
            .with_notify_policy(NotifyPolicy::Silent),
        );

        let recorder = if config.record_activity {
            ActivityRecorder::new(Arc::clone(&activity))
        } else {
            ActivityRecorder::disabled()
        };
        let board = BoardCoordinator::new(Arc::clone(&tasks), recorder.clone(), clock);
        let workflow = TaskWorkflowService::new(tasks, recorder);

        info!(
            tenant = config.tenant.as_deref().unwrap_or("-"),
            record_activity = config.record_activity,
            "task suite ready"
        );
        Ok(Self {
            store,
            cache,
            employees,
            activity,
            board,
            workflow,
        })
    }

    /// Returns the board coordinator.
    #[must_use]
    pub const fn board(&self) -> &BoardCoordinator<SuiteStore<S, C>, C> {
        &self.board
    }

    /// Returns the task workflow service.
    #[must_use]
    pub const fn workflow(&self) -> &TaskWorkflowService<SuiteStore<S, C>> {
        &self.workflow
    }

    /// Returns the employee collection.
    #[must_use]
    pub const fn employees(&self) -> &EntityCollection<Employee, SuiteStore<S, C>> {
        &self.employees
    }

    /// Returns the activity log collection.
    #[must_use]
    pub fn activity(&self) -> &EntityCollection<ActivityEntry, SuiteStore<S, C>> {
        &self.activity
    }

    /// Returns the cache shared by every collection.
    #[must_use]
    pub fn cache(&self) -> &CollectionCache {
        &self.cache
    }

    /// Returns the monitor capturing the suite's store requests.
    #[must_use]
    pub fn monitor(&self) -> &RequestMonitor {
        self.store.monitor()
    }

    /// Returns the undecorated store.
    #[must_use]
    pub fn store(&self) -> &S {
        self.store.inner()
    }
}
