//! Provenance stamping on save.

use chrono::{DateTime, Utc};

use super::model::{Annotation, Provenance};

/// Diff the working list against the committed snapshot, entry by entry at the same index.
///
/// Changed entries become `UserEdited` (a `UserAdded` box keeps its provenance) and get
/// `modified_at`/`modified_by` stamped. Unchanged entries and entries with no committed
/// counterpart pass through untouched.
pub fn reconcile(
    original: &[Annotation],
    working: &[Annotation],
    actor: &str,
    now: DateTime<Utc>,
) -> Vec<Annotation> {
    working
        .iter()
        .enumerate()
        .map(|(index, current)| {
            let mut result = current.clone();
            if let Some(before) = original.get(index)
                && current.differs_from(before)
            {
                if result.provenance != Provenance::UserAdded {
                    result.provenance = Provenance::UserEdited;
                }
                result.modified_at = Some(now);
                result.modified_by = Some(actor.to_string());
            }
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::model::fixtures::detected;
    use bevy::math::Vec2;
    use chrono::Duration;

    fn sample() -> Vec<Annotation> {
        let earlier = Utc::now() - Duration::hours(1);
        let mut a = detected("A", "faulty", Vec2::new(100.0, 100.0), Vec2::splat(40.0));
        a.modified_at = Some(earlier);
        let b = detected("B", "normal", Vec2::new(300.0, 200.0), Vec2::splat(30.0));
        vec![a, b]
    }

    #[test]
    fn test_no_mutation_keeps_provenance() {
        let original = sample();
        let result = reconcile(&original, &original, "alice", Utc::now());
        assert_eq!(result, original);
    }

    #[test]
    fn test_moved_entry_becomes_user_edited() {
        let original = sample();
        let mut working = original.clone();
        working[0].center += Vec2::new(20.0, 10.0);
        let now = Utc::now();

        let result = reconcile(&original, &working, "alice", now);
        assert_eq!(result[0].provenance, Provenance::UserEdited);
        assert_eq!(result[0].center, Vec2::new(120.0, 110.0));
        assert_eq!(result[0].modified_by.as_deref(), Some("alice"));
        assert!(result[0].modified_at > original[0].modified_at);
        assert_eq!(result[1], original[1]);
    }

    #[test]
    fn test_user_added_is_never_downgraded() {
        let mut original = sample();
        original[1].provenance = Provenance::UserAdded;
        let mut working = original.clone();
        working[1].size = Vec2::splat(50.0);

        let result = reconcile(&original, &working, "bob", Utc::now());
        assert_eq!(result[1].provenance, Provenance::UserAdded);
        assert_eq!(result[1].modified_by.as_deref(), Some("bob"));
    }

    #[test]
    fn test_class_change_counts_as_edit() {
        let original = sample();
        let mut working = original.clone();
        working[1].class_label = "warning".into();

        let result = reconcile(&original, &working, "alice", Utc::now());
        assert_eq!(result[0].provenance, Provenance::ModelDetected);
        assert_eq!(result[1].provenance, Provenance::UserEdited);
    }

    #[test]
    fn test_extra_working_entries_pass_through() {
        let original = sample();
        let mut working = original.clone();
        working.push(detected("C", "critical", Vec2::splat(50.0), Vec2::splat(20.0)));

        let result = reconcile(&original, &working, "alice", Utc::now());
        assert_eq!(result.len(), 3);
        assert_eq!(result[2], working[2]);
    }
}
