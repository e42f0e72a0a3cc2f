use std::collections::HashSet;

use crate::models::{normalize_pair, Profile};

/// Interest-overlap heuristic standing in for the platform's compatibility
/// scorer. Symmetric, and always within 0..=100.
pub fn compatibility_score(a: &Profile, b: &Profile) -> i32 {
    let a_interests: HashSet<&str> = a.interests.iter().map(String::as_str).collect();
    let b_interests: HashSet<&str> = b.interests.iter().map(String::as_str).collect();

    let union = a_interests.union(&b_interests).count();
    if union == 0 {
        return 0;
    }
    let shared = a_interests.intersection(&b_interests).count();

    ((shared * 100) / union) as i32
}

/// Candidate pairs for the matchmaker: every unordered pair of active
/// profiles that does not already have a match row. Pairs come back in
/// stored order (smaller id first).
pub fn candidate_pairs<'a>(
    profiles: &'a [Profile],
    existing: &HashSet<(i32, i32)>,
) -> Vec<(&'a Profile, &'a Profile)> {
    let mut candidates = Vec::new();

    for (i, a) in profiles.iter().enumerate() {
        for b in &profiles[i + 1..] {
            let pair = match normalize_pair(a.id, b.id) {
                Some(pair) => pair,
                None => continue,
            };
            if existing.contains(&pair) {
                continue;
            }
            if a.id <= b.id {
                candidates.push((a, b));
            } else {
                candidates.push((b, a));
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(id: i32, interests: &[&str]) -> Profile {
        Profile {
            id,
            display_name: format!("user-{}", id),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_identical_interests_score_full() {
        let a = profile(1, &["hiking", "jazz", "cooking"]);
        let b = profile(2, &["hiking", "jazz", "cooking"]);
        assert_eq!(compatibility_score(&a, &b), 100);
    }

    #[test]
    fn test_disjoint_interests_score_zero() {
        let a = profile(1, &["hiking"]);
        let b = profile(2, &["chess"]);
        assert_eq!(compatibility_score(&a, &b), 0);
    }

    #[test]
    fn test_no_interests_score_zero() {
        let a = profile(1, &[]);
        let b = profile(2, &[]);
        assert_eq!(compatibility_score(&a, &b), 0);
    }

    #[test]
    fn test_score_is_symmetric() {
        let a = profile(1, &["hiking", "jazz", "film"]);
        let b = profile(2, &["jazz", "film", "chess", "running"]);
        assert_eq!(compatibility_score(&a, &b), compatibility_score(&b, &a));
    }

    #[test]
    fn test_score_stays_in_range() {
        let a = profile(1, &["hiking", "jazz"]);
        let b = profile(2, &["jazz", "chess"]);
        let score = compatibility_score(&a, &b);
        assert!((0..=100).contains(&score));
        // One shared interest out of three total
        assert_eq!(score, 33);
    }

    #[test]
    fn test_candidate_pairs_skip_existing() {
        let profiles = vec![profile(1, &[]), profile(2, &[]), profile(3, &[])];
        let existing: HashSet<(i32, i32)> = [(1, 2)].into_iter().collect();

        let pairs: Vec<(i32, i32)> = candidate_pairs(&profiles, &existing)
            .into_iter()
            .map(|(a, b)| (a.id, b.id))
            .collect();

        assert_eq!(pairs, vec![(1, 3), (2, 3)]);
    }

    #[test]
    fn test_candidate_pairs_normalized_order() {
        let profiles = vec![profile(9, &[]), profile(4, &[])];
        let pairs = candidate_pairs(&profiles, &HashSet::new());
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].0.id, pairs[0].1.id), (4, 9));
    }
}
