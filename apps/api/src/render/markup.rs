//! Serializes a [`RenderedResume`] into the preview element's HTML markup.
//!
//! The result is a single `<div id="resume-preview">` element, the same node
//! the export pipeline captures. All user text is escaped.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::TemplateVariant;
use crate::render::tree::{
    ContactPart, EntryBlock, HeaderStyle, RenderedResume, Section, SectionBody,
};

pub const PREVIEW_ELEMENT_ID: &str = "resume-preview";

pub fn to_markup(resume: &RenderedResume) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<div id=\"{PREVIEW_ELEMENT_ID}\" class=\"resume {} {}\">\n",
        template_class(resume.template),
        resume.font_class
    ));

    let header_class = match resume.header.style {
        HeaderStyle::Ruled => "resume-header header-ruled",
        HeaderStyle::Centered => "resume-header header-centered",
        HeaderStyle::Banner => "resume-header header-banner",
    };
    out.push_str(&format!("  <header class=\"{header_class}\">\n"));
    out.push_str(&format!("    <h1>{}</h1>\n", encode_text(&resume.header.name)));
    out.push_str("    <div class=\"contact-info\">");
    for part in &resume.header.contact {
        match part {
            ContactPart::Item { kind, text, icon } => {
                let kind = kind.as_str();
                match icon {
                    Some(icon) => out.push_str(&format!(
                        "<span class=\"contact-item contact-{kind}\" data-icon=\"{icon}\">{}</span>",
                        encode_text(text)
                    )),
                    None => out.push_str(&format!(
                        "<span class=\"contact-item contact-{kind}\">{}</span>",
                        encode_text(text)
                    )),
                }
            }
            ContactPart::Separator => {
                out.push_str("<span class=\"contact-separator\">\u{2022}</span>")
            }
        }
    }
    out.push_str("</div>\n  </header>\n");

    for section in &resume.sections {
        push_section(&mut out, section);
    }

    out.push_str("</div>\n");
    out
}

fn template_class(template: TemplateVariant) -> &'static str {
    match template {
        TemplateVariant::Modern => "template-modern",
        TemplateVariant::Classic => "template-classic",
        TemplateVariant::Creative => "template-creative",
    }
}

fn push_section(out: &mut String, section: &Section) {
    out.push_str(&format!(
        "  <section class=\"resume-section {}\">\n    <h2>{}</h2>\n",
        section.kind.css_class(),
        encode_text(section.heading)
    ));
    match &section.body {
        SectionBody::Text(text) => {
            out.push_str(&format!("    <p>{}</p>\n", encode_text(text)));
        }
        SectionBody::Entries(entries) => {
            for entry in entries {
                push_entry(out, entry);
            }
        }
    }
    out.push_str("  </section>\n");
}

fn push_entry(out: &mut String, entry: &EntryBlock) {
    let class = if entry.accent { "entry entry-accent" } else { "entry" };
    out.push_str(&format!(
        "    <div class=\"{class}\" data-entry-id=\"{}\">\n",
        encode_double_quoted_attribute(entry.id.as_str())
    ));
    out.push_str(&format!(
        "      <div class=\"entry-heading\"><h3>{}</h3><span class=\"entry-date\">{}</span></div>\n",
        encode_text(&entry.title),
        encode_text(&entry.date)
    ));
    out.push_str(&format!(
        "      <p class=\"entry-subtitle\">{}</p>\n",
        encode_text(&entry.subtitle)
    ));
    if let Some(body) = &entry.body {
        out.push_str(&format!(
            "      <div class=\"entry-body\" style=\"white-space: pre-line\">{}</div>\n",
            encode_text(body)
        ));
    }
    out.push_str("    </div>\n");
}
