//! Name similarity scoring
//!
//! Blends normalized Levenshtein and Jaro-Winkler similarity over
//! lowercased, whitespace-collapsed input. Used for project and task name
//! mapping as well as description similarity during activity scoring.

use strsim::{jaro_winkler, normalized_levenshtein};

/// Similarity between two strings in `[0.0, 1.0]`.
///
/// Two empty strings count as a full match; exactly one empty string as
/// no match.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    (normalized_levenshtein(&a, &b) + jaro_winkler(&a, &b)) / 2.0
}

/// Best candidate at or above `threshold`, as `(index, score)`.
///
/// Candidates are scanned in their given order; ties keep the earliest
/// candidate, which makes selection deterministic.
pub fn best_match<'a, I>(candidates: I, query: &str, threshold: f64) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, f64)> = None;

    for (index, candidate) in candidates.into_iter().enumerate() {
        let score = similarity(candidate, query);
        if score < threshold {
            continue;
        }
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((index, score)),
        }
    }

    best
}

fn normalize(value: &str) -> String {
    value.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("Website Relaunch", "Website Relaunch"), 1.0);
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(similarity("  Website   Relaunch ", "website relaunch"), 1.0);
    }

    #[test]
    fn empty_handling() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "   "), 1.0);
        assert_eq!(similarity("design", ""), 0.0);
    }

    #[test]
    fn similar_names_score_high_distinct_names_low() {
        assert!(similarity("Website Relaunch", "Website Relaunch 2024") > 0.8);
        assert!(similarity("Website Relaunch", "Backend Migration") < 0.5);
    }

    #[test]
    fn best_match_respects_threshold() {
        let candidates = ["Internal", "Website Relaunch", "Backend Migration"];
        let found = best_match(candidates.iter().copied(), "website relaunch", 0.8);
        assert_eq!(found.map(|(index, _)| index), Some(1));

        assert!(best_match(candidates.iter().copied(), "Something Else Entirely", 0.8).is_none());
    }

    #[test]
    fn best_match_keeps_earliest_on_tie() {
        let candidates = ["Support", "Support"];
        let found = best_match(candidates.iter().copied(), "Support", 0.5);
        assert_eq!(found.map(|(index, _)| index), Some(0));
    }
}
