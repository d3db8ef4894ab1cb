//! Pairwise activity scoring
//!
//! A source activity is first projected into target terms through the
//! mappings, then scored against each candidate in its bucket. Scores are
//! integers in `[0, 100]`; fractional contributions truncate toward zero,
//! so 100 is reachable only by the back-reference shortcut or an exact
//! match on task, description and hours.

use timebridge_domain::constants::{
    HOURS_DIFF_CLAMP, HOURS_DIFF_EXPONENT, SCORE_DESCRIPTION_WEIGHT, SCORE_EQUAL,
    SCORE_HOURS_WEIGHT, SCORE_TASK_WEIGHT,
};
use timebridge_domain::Activity;

use super::mapper::InstanceMappings;
use crate::matching;

/// Project a source activity into target terms.
///
/// Replaces `project_id`/`task_id` through the mappings and stores the
/// source id as the `remote_id` back-reference. Returns `None` when the
/// project or task has no mapping; such activities are skipped upstream
/// rather than treated as errors.
pub fn project_activity(source: &Activity, mappings: &InstanceMappings) -> Option<Activity> {
    let target_project = mappings.target_project(source.project_id)?;
    let target_task = mappings.target_task(source.task_id)?;

    let mut projected = source.clone();
    projected.project_id = target_project.id;
    projected.task_id = target_task.id;
    projected.remote_id = Some(source.id.to_string());
    Some(projected)
}

/// Score a projected source activity against one target candidate.
///
/// A candidate whose `remote_id` points back at the source activity was
/// created from it by a previous run and scores 100 outright, whatever
/// its other fields say. Mismatched projects score 0 - bucketing already
/// guarantees equality, this guards against mapping races.
pub fn score_pair(projected: &Activity, candidate: &Activity) -> u8 {
    if candidate.remote_id.is_some() && candidate.remote_id == projected.remote_id {
        return SCORE_EQUAL;
    }
    if projected.project_id != candidate.project_id {
        return 0;
    }

    let mut score = 0u32;
    if projected.task_id == candidate.task_id {
        score += u32::from(SCORE_TASK_WEIGHT);
    }
    let description_similarity =
        matching::similarity(&projected.description, &candidate.description);
    score += (description_similarity * SCORE_DESCRIPTION_WEIGHT) as u32;
    score += (hours_closeness(projected.hours, candidate.hours) * SCORE_HOURS_WEIGHT) as u32;

    score.min(u32::from(SCORE_EQUAL)) as u8
}

/// Closeness of two durations in `[0.0, 1.0]`.
///
/// The difference is clamped to [`HOURS_DIFF_CLAMP`] hours and penalized
/// sub-linearly: small rounding drift stays near 1.0, a 1.75h gap is
/// already down to 0.5, and anything past the clamp scores 0.
fn hours_closeness(a: f64, b: f64) -> f64 {
    let difference = (a - b).abs().clamp(0.0, HOURS_DIFF_CLAMP);
    let normalized = difference / HOURS_DIFF_CLAMP;
    let penalty = normalized.powf(HOURS_DIFF_EXPONENT);
    (1.0 - penalty).max(0.0)
}

#[cfg(test)]
mod tests {
    use timebridge_domain::constants::SCORE_UPDATE_FLOOR;
    use timebridge_domain::{Project, Task};

    use super::*;

    fn activity(id: i64, project_id: i64, task_id: i64, hours: f64, description: &str) -> Activity {
        Activity {
            id,
            date: "2024-01-15".to_string(),
            project_id,
            task_id,
            hours,
            description: description.to_string(),
            billable: true,
            remote_id: None,
            user_id: None,
            customer_id: None,
        }
    }

    fn mappings() -> InstanceMappings {
        let source = vec![Project {
            id: 1,
            name: "Website Relaunch".to_string(),
            tasks: vec![Task { id: 10, name: "Design".to_string(), project_id: 1 }],
        }];
        let target = vec![Project {
            id: 101,
            name: "Website Relaunch".to_string(),
            tasks: vec![Task { id: 110, name: "Design".to_string(), project_id: 101 }],
        }];
        InstanceMappings::build(&source, &target, 0.8, 0.45)
    }

    #[test]
    fn projection_rewrites_ids_and_sets_remote_id() {
        let source = activity(42, 1, 10, 2.5, "Design");
        let projected = project_activity(&source, &mappings()).unwrap();

        assert_eq!(projected.project_id, 101);
        assert_eq!(projected.task_id, 110);
        assert_eq!(projected.remote_id.as_deref(), Some("42"));
        assert_eq!(projected.hours, 2.5);
    }

    #[test]
    fn projection_fails_without_a_mapping() {
        let unmapped_project = activity(42, 9, 10, 2.5, "Design");
        assert!(project_activity(&unmapped_project, &mappings()).is_none());

        let unmapped_task = activity(42, 1, 99, 2.5, "Design");
        assert!(project_activity(&unmapped_task, &mappings()).is_none());
    }

    #[test]
    fn remote_id_back_reference_scores_100_regardless_of_fields() {
        let projected = project_activity(&activity(42, 1, 10, 2.5, "Design"), &mappings()).unwrap();
        let mut candidate = activity(900, 101, 77, 8.0, "completely different");
        candidate.remote_id = Some("42".to_string());

        assert_eq!(score_pair(&projected, &candidate), 100);
    }

    #[test]
    fn missing_remote_id_on_both_sides_is_not_a_shortcut() {
        let mut projected = activity(42, 101, 110, 2.5, "Design");
        projected.remote_id = None;
        let candidate = activity(900, 101, 77, 8.0, "completely different");

        assert!(score_pair(&projected, &candidate) < 100);
    }

    #[test]
    fn mismatched_projects_score_zero() {
        let projected = project_activity(&activity(42, 1, 10, 2.5, "Design"), &mappings()).unwrap();
        let candidate = activity(900, 999, 110, 2.5, "Design");

        assert_eq!(score_pair(&projected, &candidate), 0);
    }

    #[test]
    fn identical_pairs_score_100() {
        let projected = project_activity(&activity(42, 1, 10, 2.5, "Design"), &mappings()).unwrap();
        let candidate = activity(900, 101, 110, 2.5, "Design");

        assert_eq!(score_pair(&projected, &candidate), 100);
    }

    #[test]
    fn close_pair_lands_in_update_range() {
        // Same task, same description, hours off by a quarter hour
        let projected = project_activity(&activity(42, 1, 10, 2.5, "Design"), &mappings()).unwrap();
        let candidate = activity(900, 101, 110, 2.75, "Design");

        let score = score_pair(&projected, &candidate);
        assert!((SCORE_UPDATE_FLOOR..100).contains(&score), "score was {score}");
    }

    #[test]
    fn distant_pair_stays_below_update_floor() {
        // Different task, unrelated description, hours off by six hours
        let projected = project_activity(&activity(42, 1, 10, 1.0, "Design"), &mappings()).unwrap();
        let candidate = activity(900, 101, 77, 7.0, "Quarterly planning");

        assert!(score_pair(&projected, &candidate) < SCORE_UPDATE_FLOOR);
    }

    #[test]
    fn empty_descriptions_count_as_a_full_match() {
        let projected = project_activity(&activity(42, 1, 10, 2.5, ""), &mappings()).unwrap();
        let candidate = activity(900, 101, 110, 2.5, "");

        assert_eq!(score_pair(&projected, &candidate), 100);
    }

    #[test]
    fn hours_closeness_curve() {
        assert_eq!(hours_closeness(2.5, 2.5), 1.0);
        // 1.75h difference halves the score
        assert!((hours_closeness(0.0, 1.75) - 0.5).abs() < 1e-9);
        // at or beyond the clamp the contribution is zero
        assert_eq!(hours_closeness(0.0, 7.0), 0.0);
        assert_eq!(hours_closeness(0.0, 12.0), 0.0);
    }

    #[test]
    fn scores_are_bounded() {
        let projected = project_activity(&activity(42, 1, 10, 2.5, "Design"), &mappings()).unwrap();
        for (task_id, hours, description) in
            [(110, 2.5, "Design"), (77, 9.0, ""), (110, 0.0, "x"), (77, 2.5, "Design")]
        {
            let candidate = activity(900, 101, task_id, hours, description);
            assert!(score_pair(&projected, &candidate) <= 100);
        }
    }
}
