//! Port interfaces for reconciliation

use timebridge_domain::{Activity, ActivityFilters, Project, Result};

/// Client for one instance of the remote time-tracking service.
///
/// Implementations block. Failures propagate to the caller unchanged;
/// the engine performs no retries and no rollback of writes already
/// applied.
pub trait InstanceClient: Send + Sync {
    /// Fetch active projects assigned to the authenticated user, with
    /// their tasks.
    fn assigned_projects(&self, filters: &ActivityFilters) -> Result<Vec<Project>>;

    /// Fetch activities matching the filters.
    fn activities(&self, filters: &ActivityFilters) -> Result<Vec<Activity>>;

    /// Create an activity on this instance.
    fn create_activity(&self, draft: &Activity) -> Result<Activity>;

    /// Update an existing activity on this instance.
    fn update_activity(&self, activity: &Activity) -> Result<Activity>;
}

/// Reconciliation notifications, in emission order.
///
/// `Update`/`Create` fire before the mutating call (also in dry-run);
/// `Updated`/`Created` fire after it completes and carry the API result.
#[derive(Debug, Clone)]
pub enum SyncEvent<'a> {
    /// Source and target already agree; nothing is written.
    Equal { source: &'a Activity, target: &'a Activity },
    /// Target diverges; `target` carries the fields about to be written.
    Update { source: &'a Activity, target: &'a Activity },
    /// The update was persisted.
    Updated { source: &'a Activity, target: &'a Activity, result: &'a Activity },
    /// No acceptable candidate; `target` is the record to be created.
    Create { source: &'a Activity, target: &'a Activity },
    /// The create was persisted.
    Created { source: &'a Activity, target: &'a Activity, result: &'a Activity },
}

/// Receives one callback per classification and per completed write.
pub trait SyncObserver {
    fn on_event(&mut self, event: SyncEvent<'_>);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SyncObserver for NullObserver {
    fn on_event(&mut self, _event: SyncEvent<'_>) {}
}
