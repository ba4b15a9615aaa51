//! Preview rendering: (document, template) → structured preview.
//!
//! `render` is pure and recomputed on every edit; nothing is cached.

pub mod markup;
mod sections;
pub mod templates;
pub mod tree;

pub use markup::to_markup;
pub use templates::TemplateLayout;
pub use tree::RenderedResume;

use templates::{ClassicLayout, CreativeLayout, ModernLayout};

use crate::models::{ResumeDocument, TemplateVariant};

/// The single dispatch point from template variant to layout.
pub fn layout_for(template: TemplateVariant) -> &'static dyn TemplateLayout {
    match template {
        TemplateVariant::Modern => &ModernLayout,
        TemplateVariant::Classic => &ClassicLayout,
        TemplateVariant::Creative => &CreativeLayout,
    }
}

pub fn render(doc: &ResumeDocument, template: TemplateVariant) -> RenderedResume {
    layout_for(template).render(doc)
}
