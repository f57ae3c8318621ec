//! Session expansion.
//!
//! Turns the catalog into the flat list of sessions a run must place: one
//! per (batch, subject, occurrence). Subject references that do not resolve
//! are skipped without error, and so are repeats of a subject already
//! listed for the same batch.

use std::collections::HashSet;

use log::debug;

use crate::models::{Catalog, LectureSession};

/// Expands every batch curriculum into lecture sessions.
///
/// Output order follows the catalog: batches in order, each batch's
/// subjects in order, occurrences ascending. Session IDs are unique per
/// batch.
pub fn expand_sessions(catalog: &Catalog) -> Vec<LectureSession> {
    let mut sessions = Vec::new();

    for batch in &catalog.batches {
        let mut seen = HashSet::new();
        for subject_id in &batch.subjects {
            if !seen.insert(subject_id.as_str()) {
                debug!(
                    "Batch '{}' lists subject '{}' more than once, skipping repeat",
                    batch.id, subject_id
                );
                continue;
            }
            let Some(subject) = catalog.subject(subject_id) else {
                debug!(
                    "Batch '{}' references unknown subject '{}', skipping",
                    batch.id, subject_id
                );
                continue;
            };

            sessions.extend((0..subject.weekly_sessions).map(|occurrence| {
                LectureSession::new(&batch.id, &subject.id, subject.kind, occurrence)
                    .with_weekly_sessions(subject.weekly_sessions)
            }));
        }
    }

    sessions
}

/// Total period units the catalog requires per week.
pub fn required_units(catalog: &Catalog) -> usize {
    catalog
        .batches
        .iter()
        .flat_map(|b| {
            let mut seen = HashSet::new();
            b.subjects.iter().filter(move |&id| seen.insert(id))
        })
        .filter_map(|id| catalog.subject(id))
        .map(|s| s.weekly_units())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::demo_catalog;
    use crate::models::{Batch, Subject};

    #[test]
    fn test_expansion_counts() {
        let catalog = Catalog::new()
            .with_subject(Subject::theory("T").with_weekly_sessions(3))
            .with_subject(Subject::lab("L").with_weekly_sessions(2))
            .with_batch(Batch::new("B1").with_subjects(["T", "L"]))
            .with_batch(Batch::new("B2").with_subjects(["L"]));

        let sessions = expand_sessions(&catalog);
        assert_eq!(sessions.len(), 3 + 2 + 2);
        assert_eq!(sessions[0].id, "B1-T-0");
        assert_eq!(sessions[2].id, "B1-T-2");
        assert_eq!(sessions[3].id, "B1-L-0");
        assert_eq!(sessions[3].duration, 2);
        assert_eq!(sessions[3].weekly_sessions, 2);
        assert_eq!(sessions[6].batch_id, "B2");
    }

    #[test]
    fn test_dangling_subject_skipped() {
        let catalog = Catalog::new()
            .with_subject(Subject::theory("T"))
            .with_batch(Batch::new("B1").with_subjects(["GHOST", "T"]));

        let sessions = expand_sessions(&catalog);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].subject_id, "T");
    }

    #[test]
    fn test_repeated_subject_expanded_once() {
        let json = serde_json::json!({
            "subjects": [{ "id": "T", "name": "", "kind": "Theory", "weekly_sessions": 2 }],
            "batches": [{ "id": "B1", "name": "", "subjects": ["T", "T"] }],
            "rooms": [], "labs": [], "faculties": [],
            "constraints": { "max_sessions_per_day_per_faculty": 5 }
        });
        let catalog: Catalog = serde_json::from_value(json).unwrap();

        let ids: Vec<String> = expand_sessions(&catalog).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["B1-T-0", "B1-T-1"]);
        assert_eq!(required_units(&catalog), 2);
    }

    #[test]
    fn test_zero_weekly_sessions_yields_nothing() {
        let catalog = Catalog::new()
            .with_subject(Subject::theory("T").with_weekly_sessions(0))
            .with_batch(Batch::new("B1").with_subject("T"));
        assert!(expand_sessions(&catalog).is_empty());
    }

    #[test]
    fn test_required_units() {
        let catalog = demo_catalog();
        // Per batch: theory 4+3+4+3+3 = 17, labs (2+2+1)*2 = 10.
        assert_eq!(required_units(&catalog), 2 * 27);
        let total: usize = expand_sessions(&catalog).iter().map(|s| s.duration).sum();
        assert_eq!(total, required_units(&catalog));
    }
}
