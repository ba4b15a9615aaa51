//! Content rules shared by every layout: which sections and entries appear.
//!
//! Layouts only choose headings and presentation; the gating here is the same
//! for all of them.

use crate::models::ResumeDocument;
use crate::render::tree::{ContactKind, ContactPart, EntryBlock, Section, SectionBody, SectionKind};

const NAME_PLACEHOLDER: &str = "Your Name";

pub(super) struct Headings {
    pub summary: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ContactStyle {
    Icons,
    Separated,
}

pub(super) fn display_name(doc: &ResumeDocument) -> String {
    if doc.name.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        doc.name.clone()
    }
}

/// Contact items for the non-empty fields only. With `Separated`, a `•`
/// separator sits between each pair of present items and nowhere else.
pub(super) fn contact_parts(doc: &ResumeDocument, style: ContactStyle) -> Vec<ContactPart> {
    let present = [
        (ContactKind::Email, &doc.email, "mail"),
        (ContactKind::Phone, &doc.phone, "phone"),
        (ContactKind::Linkedin, &doc.linkedin, "linkedin"),
    ]
    .into_iter()
    .filter(|(_, text, _)| !text.is_empty());

    let mut parts = Vec::new();
    for (kind, text, icon) in present {
        if style == ContactStyle::Separated && !parts.is_empty() {
            parts.push(ContactPart::Separator);
        }
        parts.push(ContactPart::Item {
            kind,
            text: text.clone(),
            icon: match style {
                ContactStyle::Icons => Some(icon),
                ContactStyle::Separated => None,
            },
        });
    }
    parts
}

/// Builds the body sections in display order.
///
/// The experience and education sections are gated on the *first* entry's
/// title alone: a blank first title hides the whole section even when later
/// entries are filled. Within a shown section, entries with a blank title are
/// skipped individually.
pub(super) fn body_sections(doc: &ResumeDocument, headings: &Headings, accent: bool) -> Vec<Section> {
    let mut sections = Vec::new();

    if !doc.summary.is_empty() {
        sections.push(Section {
            kind: SectionKind::Summary,
            heading: headings.summary,
            body: SectionBody::Text(doc.summary.clone()),
        });
    }

    if doc
        .work_experience
        .first()
        .is_some_and(|first| !first.job_title.is_empty())
    {
        let entries = doc
            .work_experience
            .iter()
            .filter(|job| !job.job_title.is_empty())
            .map(|job| EntryBlock {
                id: job.id.clone(),
                title: job.job_title.clone(),
                date: job.dates.clone(),
                subtitle: job.company.clone(),
                body: non_empty(&job.responsibilities),
                accent,
            })
            .collect();
        sections.push(Section {
            kind: SectionKind::Experience,
            heading: headings.experience,
            body: SectionBody::Entries(entries),
        });
    }

    if doc
        .education
        .first()
        .is_some_and(|first| !first.degree.is_empty())
    {
        let entries = doc
            .education
            .iter()
            .filter(|edu| !edu.degree.is_empty())
            .map(|edu| EntryBlock {
                id: edu.id.clone(),
                title: edu.degree.clone(),
                date: edu.graduation_date.clone(),
                subtitle: edu.institution.clone(),
                body: non_empty(&edu.details),
                accent,
            })
            .collect();
        sections.push(Section {
            kind: SectionKind::Education,
            heading: headings.education,
            body: SectionBody::Entries(entries),
        });
    }

    if !doc.skills.is_empty() {
        sections.push(Section {
            kind: SectionKind::Skills,
            heading: headings.skills,
            body: SectionBody::Text(doc.skills.clone()),
        });
    }

    sections
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_contact(email: &str, phone: &str, linkedin: &str) -> ResumeDocument {
        ResumeDocument {
            email: email.to_string(),
            phone: phone.to_string(),
            linkedin: linkedin.to_string(),
            ..ResumeDocument::new()
        }
    }

    fn separators(parts: &[ContactPart]) -> usize {
        parts
            .iter()
            .filter(|p| matches!(p, ContactPart::Separator))
            .count()
    }

    #[test]
    fn test_separated_contact_only_between_present_items() {
        let doc = doc_with_contact("", "555-0100", "linkedin.com/in/jane");
        let parts = contact_parts(&doc, ContactStyle::Separated);
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[0], ContactPart::Item { kind: ContactKind::Phone, .. }));
        assert_eq!(parts[1], ContactPart::Separator);
        assert_eq!(separators(&parts), 1);
    }

    #[test]
    fn test_separated_contact_single_item_has_no_separator() {
        let doc = doc_with_contact("", "555-0100", "");
        let parts = contact_parts(&doc, ContactStyle::Separated);
        assert_eq!(parts.len(), 1);
        assert_eq!(separators(&parts), 0);
    }

    #[test]
    fn test_separated_contact_all_items() {
        let doc = doc_with_contact("a@b.c", "555", "in/x");
        let parts = contact_parts(&doc, ContactStyle::Separated);
        assert_eq!(parts.len(), 5);
        assert_eq!(separators(&parts), 2);
    }

    #[test]
    fn test_icon_contact_has_no_separators() {
        let doc = doc_with_contact("a@b.c", "555", "in/x");
        let parts = contact_parts(&doc, ContactStyle::Icons);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| matches!(p, ContactPart::Item { icon: Some(_), .. })));
    }

    #[test]
    fn test_no_contact_fields_yields_empty_line() {
        let doc = doc_with_contact("", "", "");
        assert!(contact_parts(&doc, ContactStyle::Separated).is_empty());
        assert!(contact_parts(&doc, ContactStyle::Icons).is_empty());
    }

    #[test]
    fn test_display_name_placeholder() {
        let doc = ResumeDocument::new();
        assert_eq!(display_name(&doc), "Your Name");
    }
}
