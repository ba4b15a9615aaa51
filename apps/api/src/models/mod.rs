pub mod resume;

pub use resume::{
    EducationEntry, EducationField, EntryId, ResumeDocument, ScalarField, TemplateVariant,
    WorkEntry, WorkField,
};
