//! The structured preview produced by a template layout.

use serde::Serialize;

use crate::models::{EntryId, TemplateVariant};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResume {
    pub template: TemplateVariant,
    /// `font-serif` or `font-sans`; carried into the exported markup.
    pub font_class: &'static str,
    pub header: Header,
    pub sections: Vec<Section>,
}

impl RenderedResume {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStyle {
    /// Left-aligned name with a rule underneath.
    Ruled,
    /// Centered name and contact line.
    Centered,
    /// Full-width dark banner.
    Banner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub name: String,
    pub style: HeaderStyle,
    pub contact: Vec<ContactPart>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Linkedin,
}

impl ContactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactKind::Email => "email",
            ContactKind::Phone => "phone",
            ContactKind::Linkedin => "linkedin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContactPart {
    Item {
        kind: ContactKind,
        text: String,
        icon: Option<&'static str>,
    },
    Separator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
}

impl SectionKind {
    pub fn css_class(self) -> &'static str {
        match self {
            SectionKind::Summary => "section-summary",
            SectionKind::Experience => "section-experience",
            SectionKind::Education => "section-education",
            SectionKind::Skills => "section-skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SectionBody {
    Text(String),
    Entries(Vec<EntryBlock>),
}

/// One displayed work or education entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryBlock {
    pub id: EntryId,
    pub title: String,
    pub date: String,
    pub subtitle: String,
    /// Literal multi-line text; line breaks are significant.
    pub body: Option<String>,
    /// Left accent rule (creative layout).
    pub accent: bool,
}
