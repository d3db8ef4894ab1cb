//! Reconciliation engine
//!
//! Runs one source instance against one target instance: activities are
//! bucketed by (date, project), every candidate pair in a bucket is
//! scored, and pairs are consumed greedily by descending score. A score
//! of 100 needs no write, `[60, 100)` updates the target record in
//! place, and anything below leaves both sides available for other
//! pairings; leftover source activities become creates. Dry-run performs
//! identical classification and observer notifications but skips the
//! mutating calls.
//!
//! Execution is fully synchronous and single-threaded. Client failures
//! propagate out immediately; writes already applied are not rolled back.

use std::cmp::Reverse;
use std::sync::Arc;

use timebridge_domain::constants::{SCORE_EQUAL, SCORE_UPDATE_FLOOR};
use timebridge_domain::{Activity, Result, SyncOptions};
use tracing::{debug, info};

use super::grouper;
use super::mapper::InstanceMappings;
use super::ports::{InstanceClient, SyncEvent, SyncObserver};
use super::scorer;

/// One (source, target, score) combination within a bucket.
struct ScoredPair {
    source: usize,
    target: usize,
    score: u8,
}

/// Cross-instance reconciliation engine.
///
/// Mapping tables are built once at construction and are read-only for
/// the engine's lifetime; all other state lives inside a single
/// [`sync`](Self::sync) call.
pub struct SyncEngine {
    source: Arc<dyn InstanceClient>,
    target: Arc<dyn InstanceClient>,
    options: SyncOptions,
    mappings: InstanceMappings,
}

impl SyncEngine {
    /// Fetch both sides' active projects once and build the mappings.
    pub fn new(
        source: Arc<dyn InstanceClient>,
        target: Arc<dyn InstanceClient>,
        options: SyncOptions,
    ) -> Result<Self> {
        let source_projects = source.assigned_projects(&options.source_filters)?;
        let target_projects = target.assigned_projects(&options.target_filters)?;

        let mappings = InstanceMappings::build(
            &source_projects,
            &target_projects,
            options.project_match_threshold,
            options.task_match_threshold,
        );
        info!(
            source_projects = source_projects.len(),
            target_projects = target_projects.len(),
            mapped_projects = mappings.project_count(),
            mapped_tasks = mappings.task_count(),
            "instance mappings built"
        );

        Ok(Self { source, target, options, mappings })
    }

    /// The project/task lookup tables built at construction.
    pub fn mappings(&self) -> &InstanceMappings {
        &self.mappings
    }

    /// Run one reconciliation pass.
    ///
    /// Returns the write results in application order (always empty on
    /// dry-run). Errors from either client abort the pass.
    pub fn sync(&self, observer: &mut dyn SyncObserver) -> Result<Vec<Activity>> {
        let source_activities = self.source.activities(&self.options.source_filters)?;
        let target_activities = self.target.activities(&self.options.target_filters)?;
        info!(
            source_activities = source_activities.len(),
            target_activities = target_activities.len(),
            dry_run = self.options.dry_run,
            "starting reconciliation pass"
        );

        let source_grouped = grouper::group(source_activities);
        let target_grouped = grouper::group(target_activities);

        let mut results = Vec::new();
        for (date, by_project) in &source_grouped {
            for bucket_sources in by_project.values() {
                self.reconcile_bucket(date, bucket_sources, &target_grouped, observer, &mut results)?;
            }
        }

        info!(writes = results.len(), "reconciliation pass finished");
        Ok(results)
    }

    /// Reconcile one source (date, project) bucket against its mapped
    /// target bucket.
    fn reconcile_bucket(
        &self,
        date: &str,
        bucket_sources: &[Activity],
        target_grouped: &grouper::GroupedActivities,
        observer: &mut dyn SyncObserver,
        results: &mut Vec<Activity>,
    ) -> Result<()> {
        // Activities whose project or task has no mapping are skipped
        // before any pairing and never classified.
        let mut sources: Vec<(&Activity, Activity)> = Vec::with_capacity(bucket_sources.len());
        for source_activity in bucket_sources {
            match scorer::project_activity(source_activity, &self.mappings) {
                Some(projected) => sources.push((source_activity, projected)),
                None => {
                    debug!(activity = source_activity.id, date, "no mapping for activity; skipped");
                }
            }
        }
        if sources.is_empty() {
            return Ok(());
        }

        // All projected activities in a bucket share the mapped project.
        let target_project_id = sources[0].1.project_id;
        let empty = Vec::new();
        let targets: &Vec<Activity> = target_grouped
            .get(date)
            .and_then(|by_project| by_project.get(&target_project_id))
            .unwrap_or(&empty);

        let mut pairs = Vec::with_capacity(sources.len() * targets.len());
        for (source_index, (_, projected)) in sources.iter().enumerate() {
            for (target_index, candidate) in targets.iter().enumerate() {
                let score = scorer::score_pair(projected, candidate);
                if self.options.debug {
                    debug!(
                        source = sources[source_index].0.id,
                        target = candidate.id,
                        score,
                        "scored pair"
                    );
                }
                pairs.push(ScoredPair { source: source_index, target: target_index, score });
            }
        }
        // Stable sort keeps pair-generation order among equal scores.
        pairs.sort_by_key(|pair| Reverse(pair.score));

        let mut source_used = vec![false; sources.len()];
        let mut target_used = vec![false; targets.len()];

        for pair in &pairs {
            if source_used[pair.source] || target_used[pair.target] {
                continue;
            }
            // Below the floor the pair is no match at all; both sides stay
            // eligible for other pairings in this bucket.
            if pair.score < SCORE_UPDATE_FLOOR {
                continue;
            }

            let (source_activity, projected) = (sources[pair.source].0, &sources[pair.source].1);
            let candidate = &targets[pair.target];

            if pair.score == SCORE_EQUAL {
                observer.on_event(SyncEvent::Equal { source: source_activity, target: candidate });
            } else {
                let mut updated = candidate.clone();
                apply_projection(&mut updated, projected);
                observer.on_event(SyncEvent::Update { source: source_activity, target: &updated });
                if !self.options.dry_run {
                    let result = self.target.update_activity(&updated)?;
                    observer.on_event(SyncEvent::Updated {
                        source: source_activity,
                        target: &updated,
                        result: &result,
                    });
                    results.push(result);
                }
            }

            source_used[pair.source] = true;
            target_used[pair.target] = true;
        }

        // Whatever was never consumed has no acceptable counterpart.
        for (index, (source_activity, projected)) in sources.iter().enumerate() {
            if source_used[index] {
                continue;
            }
            let source_activity = *source_activity;
            observer.on_event(SyncEvent::Create { source: source_activity, target: projected });
            if !self.options.dry_run {
                let result = self.target.create_activity(projected)?;
                observer.on_event(SyncEvent::Created {
                    source: source_activity,
                    target: projected,
                    result: &result,
                });
                results.push(result);
            }
        }

        Ok(())
    }
}

/// Copy the projected fields onto an existing target record.
///
/// The record id and the owning user/customer are never overwritten.
fn apply_projection(target: &mut Activity, projected: &Activity) {
    target.date = projected.date.clone();
    target.project_id = projected.project_id;
    target.task_id = projected.task_id;
    target.hours = projected.hours;
    target.description = projected.description.clone();
    target.billable = projected.billable;
    target.remote_id = projected.remote_id.clone();
}
