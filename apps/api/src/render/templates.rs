//! The three template layouts. Each one decides headings, header treatment,
//! and typography; content gating lives in `sections`.

use crate::models::{ResumeDocument, TemplateVariant};
use crate::render::sections::{body_sections, contact_parts, display_name, ContactStyle, Headings};
use crate::render::tree::{Header, HeaderStyle, RenderedResume};

/// A rendering function for one template variant.
pub trait TemplateLayout: Send + Sync {
    fn render(&self, doc: &ResumeDocument) -> RenderedResume;
}

pub struct ModernLayout;
pub struct ClassicLayout;
pub struct CreativeLayout;

impl TemplateLayout for ModernLayout {
    fn render(&self, doc: &ResumeDocument) -> RenderedResume {
        const HEADINGS: Headings = Headings {
            summary: "Professional Summary",
            experience: "Work Experience",
            education: "Education",
            skills: "Skills",
        };

        RenderedResume {
            template: TemplateVariant::Modern,
            font_class: "font-sans",
            header: Header {
                name: display_name(doc),
                style: HeaderStyle::Ruled,
                contact: contact_parts(doc, ContactStyle::Icons),
            },
            sections: body_sections(doc, &HEADINGS, false),
        }
    }
}

impl TemplateLayout for ClassicLayout {
    fn render(&self, doc: &ResumeDocument) -> RenderedResume {
        const HEADINGS: Headings = Headings {
            summary: "Professional Summary",
            experience: "Professional Experience",
            education: "Education",
            skills: "Core Competencies",
        };

        RenderedResume {
            template: TemplateVariant::Classic,
            font_class: "font-serif",
            header: Header {
                name: display_name(doc),
                style: HeaderStyle::Centered,
                contact: contact_parts(doc, ContactStyle::Separated),
            },
            sections: body_sections(doc, &HEADINGS, false),
        }
    }
}

impl TemplateLayout for CreativeLayout {
    fn render(&self, doc: &ResumeDocument) -> RenderedResume {
        const HEADINGS: Headings = Headings {
            summary: "Professional Profile",
            experience: "Career Experience",
            education: "Education",
            skills: "Key Skills",
        };

        RenderedResume {
            template: TemplateVariant::Creative,
            font_class: "font-sans",
            header: Header {
                name: display_name(doc),
                style: HeaderStyle::Banner,
                contact: contact_parts(doc, ContactStyle::Icons),
            },
            sections: body_sections(doc, &HEADINGS, true),
        }
    }
}
