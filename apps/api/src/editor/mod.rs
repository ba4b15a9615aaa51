//! Form editing operations over resume snapshots.
//!
//! Every operation takes the current [`Snapshot`] and returns the next one.
//! The previous snapshot is never mutated. Rejected or no-op edits return the
//! *same* `Arc`, so observers can detect "nothing changed" with `Arc::ptr_eq`.

use std::sync::Arc;

use crate::models::{
    EducationEntry, EducationField, EntryId, ResumeDocument, ScalarField, WorkEntry, WorkField,
};

pub type Snapshot = Arc<ResumeDocument>;

/// A repeatable section item addressable by id.
trait Entry: Clone {
    fn id(&self) -> &EntryId;
    fn blank() -> Self;
}

impl Entry for WorkEntry {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank() -> Self {
        WorkEntry::blank()
    }
}

impl Entry for EducationEntry {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank() -> Self {
        EducationEntry::blank()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generic list edits
// ────────────────────────────────────────────────────────────────────────────

fn append_blank<E: Entry>(list: &[E]) -> (Vec<E>, EntryId) {
    let mut entry = E::blank();
    // Ids must stay unique within the list.
    while list.iter().any(|e| e.id() == entry.id()) {
        entry = E::blank();
    }
    let id = entry.id().clone();
    let mut next = list.to_vec();
    next.push(entry);
    (next, id)
}

/// Returns `None` when the removal must be rejected: last remaining entry, or
/// unknown id.
fn without<E: Entry>(list: &[E], id: &EntryId) -> Option<Vec<E>> {
    if list.len() <= 1 || !list.iter().any(|e| e.id() == id) {
        return None;
    }
    Some(list.iter().filter(|e| e.id() != id).cloned().collect())
}

fn with_updated<E: Entry>(list: &[E], id: &EntryId, edit: impl FnOnce(&mut E)) -> Option<Vec<E>> {
    let index = list.iter().position(|e| e.id() == id)?;
    let mut next = list.to_vec();
    edit(&mut next[index]);
    Some(next)
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar fields
// ────────────────────────────────────────────────────────────────────────────

pub fn set_field(doc: &Snapshot, field: ScalarField, value: &str) -> Snapshot {
    let mut next = ResumeDocument::clone(doc);
    *next.scalar_mut(field) = value.to_string();
    Arc::new(next)
}

// ────────────────────────────────────────────────────────────────────────────
// Work experience
// ────────────────────────────────────────────────────────────────────────────

/// Appends a blank work entry. Always succeeds; returns the new entry's id.
pub fn add_work_entry(doc: &Snapshot) -> (Snapshot, EntryId) {
    let (work_experience, id) = append_blank(&doc.work_experience);
    let next = ResumeDocument {
        work_experience,
        ..ResumeDocument::clone(doc)
    };
    (Arc::new(next), id)
}

pub fn remove_work_entry(doc: &Snapshot, id: &EntryId) -> Snapshot {
    match without(&doc.work_experience, id) {
        Some(work_experience) => Arc::new(ResumeDocument {
            work_experience,
            ..ResumeDocument::clone(doc)
        }),
        None => Arc::clone(doc),
    }
}

pub fn update_work_entry(doc: &Snapshot, id: &EntryId, field: WorkField, value: &str) -> Snapshot {
    match with_updated(&doc.work_experience, id, |e| {
        *e.field_mut(field) = value.to_string()
    }) {
        Some(work_experience) => Arc::new(ResumeDocument {
            work_experience,
            ..ResumeDocument::clone(doc)
        }),
        None => Arc::clone(doc),
    }
}

/// Replaces an entry's responsibilities wholesale with accepted AI output.
pub fn accept_enhancement(doc: &Snapshot, id: &EntryId, text: &str) -> Snapshot {
    update_work_entry(doc, id, WorkField::Responsibilities, text)
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

pub fn add_education_entry(doc: &Snapshot) -> (Snapshot, EntryId) {
    let (education, id) = append_blank(&doc.education);
    let next = ResumeDocument {
        education,
        ..ResumeDocument::clone(doc)
    };
    (Arc::new(next), id)
}

pub fn remove_education_entry(doc: &Snapshot, id: &EntryId) -> Snapshot {
    match without(&doc.education, id) {
        Some(education) => Arc::new(ResumeDocument {
            education,
            ..ResumeDocument::clone(doc)
        }),
        None => Arc::clone(doc),
    }
}

pub fn update_education_entry(
    doc: &Snapshot,
    id: &EntryId,
    field: EducationField,
    value: &str,
) -> Snapshot {
    match with_updated(&doc.education, id, |e| {
        *e.field_mut(field) = value.to_string()
    }) {
        Some(education) => Arc::new(ResumeDocument {
            education,
            ..ResumeDocument::clone(doc)
        }),
        None => Arc::clone(doc),
    }
}
