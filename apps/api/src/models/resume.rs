//! The resume document model held by an editing session.
//!
//! Field names serialize in camelCase so the document travels to the analysis
//! gateway as `resumeData` in the same shape the gateway prompts expect.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Identifiers and field selectors
// ────────────────────────────────────────────────────────────────────────────

/// Client-visible id of a work or education entry. Unique within its list and
/// stable across edits; never used for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level free-text fields of a [`ResumeDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    Name,
    Email,
    Phone,
    Linkedin,
    Summary,
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkField {
    JobTitle,
    Company,
    Dates,
    Responsibilities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    Degree,
    Institution,
    GraduationDate,
    Details,
}

/// Visual layout applied at render time. Never changes the document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    Modern,
    Classic,
    Creative,
}

impl TemplateVariant {
    pub const ALL: [TemplateVariant; 3] = [
        TemplateVariant::Modern,
        TemplateVariant::Classic,
        TemplateVariant::Creative,
    ];
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: EntryId,
    pub job_title: String,
    pub company: String,
    pub dates: String,
    /// Newline-delimited; each line reads as one bullet.
    pub responsibilities: String,
}

impl WorkEntry {
    pub fn blank() -> Self {
        Self {
            id: EntryId::generate(),
            job_title: String::new(),
            company: String::new(),
            dates: String::new(),
            responsibilities: String::new(),
        }
    }

    pub fn field_mut(&mut self, field: WorkField) -> &mut String {
        match field {
            WorkField::JobTitle => &mut self.job_title,
            WorkField::Company => &mut self.company,
            WorkField::Dates => &mut self.dates,
            WorkField::Responsibilities => &mut self.responsibilities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: EntryId,
    pub degree: String,
    pub institution: String,
    pub graduation_date: String,
    #[serde(default)]
    pub details: String,
}

impl EducationEntry {
    pub fn blank() -> Self {
        Self {
            id: EntryId::generate(),
            degree: String::new(),
            institution: String::new(),
            graduation_date: String::new(),
            details: String::new(),
        }
    }

    pub fn field_mut(&mut self, field: EducationField) -> &mut String {
        match field {
            EducationField::Degree => &mut self.degree,
            EducationField::Institution => &mut self.institution,
            EducationField::GraduationDate => &mut self.graduation_date,
            EducationField::Details => &mut self.details,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// In-memory resume for one editing session. An empty string means "absent"
/// for every scalar field; nothing is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub summary: String,
    pub work_experience: Vec<WorkEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: String,
}

impl ResumeDocument {
    /// A fresh session document: every scalar empty, one blank entry per list.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            linkedin: String::new(),
            summary: String::new(),
            work_experience: vec![WorkEntry::blank()],
            education: vec![EducationEntry::blank()],
            skills: String::new(),
        }
    }

    pub fn scalar_mut(&mut self, field: ScalarField) -> &mut String {
        match field {
            ScalarField::Name => &mut self.name,
            ScalarField::Email => &mut self.email,
            ScalarField::Phone => &mut self.phone,
            ScalarField::Linkedin => &mut self.linkedin,
            ScalarField::Summary => &mut self.summary,
            ScalarField::Skills => &mut self.skills,
        }
    }

    /// Base name for exported artifacts: the candidate's name, or "Resume".
    pub fn export_base_name(&self) -> &str {
        if self.name.is_empty() {
            "Resume"
        } else {
            &self.name
        }
    }
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self::new()
    }
}
