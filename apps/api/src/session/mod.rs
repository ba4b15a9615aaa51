//! Editing sessions.
//!
//! A session walks the landing → templates → editor flow. Entering the editor
//! starts a fresh document; leaving it discards the document. While in the
//! editor the preview target is re-mounted after every change, so an export
//! always captures what the preview currently shows.

pub mod handlers;
pub mod in_flight;
pub mod navigation;
pub mod store;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::editor::Snapshot;
use crate::export::PreviewTarget;
use crate::models::{ResumeDocument, TemplateVariant};
use crate::render::{render, RenderedResume};

pub use in_flight::{Action, ActionFlags, InFlightGuard, InFlightStatus};
pub use navigation::{NavEvent, NavigationError, View};
pub use store::SessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No resume is open; select a template first")]
    NotEditing,

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("{0:?} is already in progress")]
    ActionInProgress(Action),
}

#[derive(Debug)]
pub struct EditorSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    view: View,
    document: Option<Snapshot>,
    preview: Option<PreviewTarget>,
    flags: ActionFlags,
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            view: View::Landing,
            document: None,
            preview: None,
            flags: ActionFlags::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn template(&self) -> Option<TemplateVariant> {
        match self.view {
            View::Editor { template } => Some(template),
            _ => None,
        }
    }

    pub fn flags(&self) -> &ActionFlags {
        &self.flags
    }

    /// The mounted preview, present only while editing.
    pub fn preview(&self) -> Option<&PreviewTarget> {
        self.preview.as_ref()
    }

    pub fn document(&self) -> Result<&Snapshot, SessionError> {
        self.document.as_ref().ok_or(SessionError::NotEditing)
    }

    pub fn navigate(&mut self, event: NavEvent) -> Result<View, SessionError> {
        let next = self.view.apply(event)?;

        if next.is_editor() && !self.view.is_editor() {
            self.document = Some(Arc::new(ResumeDocument::new()));
        } else if !next.is_editor() {
            self.document = None;
        }

        self.view = next;
        self.remount();
        Ok(next)
    }

    /// Applies an editing operation to the open document.
    ///
    /// `op` returns the next snapshot plus any extra result; when the snapshot
    /// is unchanged the preview is left as is.
    pub fn edit<R>(
        &mut self,
        op: impl FnOnce(&Snapshot) -> (Snapshot, R),
    ) -> Result<(Snapshot, R), SessionError> {
        let current = self.document()?;
        let (next, extra) = op(current);
        if !Arc::ptr_eq(current, &next) {
            self.document = Some(Arc::clone(&next));
            self.remount();
        }
        Ok((next, extra))
    }

    /// Renders the open document with the selected template.
    pub fn rendered(&self) -> Result<RenderedResume, SessionError> {
        match (self.template(), self.document.as_ref()) {
            (Some(template), Some(doc)) => Ok(render(doc, template)),
            _ => Err(SessionError::NotEditing),
        }
    }

    pub fn begin(&self, action: Action) -> Result<InFlightGuard, SessionError> {
        self.flags
            .try_begin(action)
            .ok_or(SessionError::ActionInProgress(action))
    }

    fn remount(&mut self) {
        self.preview = match (self.template(), self.document.as_ref()) {
            (Some(template), Some(doc)) => Some(PreviewTarget::mount(&render(doc, template), doc)),
            _ => None,
        };
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor;
    use crate::models::ScalarField;

    fn editing(template: TemplateVariant) -> EditorSession {
        let mut session = EditorSession::new();
        session.navigate(NavEvent::GetStarted).unwrap();
        session
            .navigate(NavEvent::SelectTemplate { template })
            .unwrap();
        session
    }

    #[test]
    fn test_new_session_has_no_document_or_preview() {
        let session = EditorSession::new();
        assert_eq!(session.view(), View::Landing);
        assert!(matches!(session.document(), Err(SessionError::NotEditing)));
        assert!(session.preview().is_none());
    }

    #[test]
    fn test_entering_editor_starts_fresh_document() {
        let session = editing(TemplateVariant::Modern);
        let doc = session.document().unwrap();
        assert_eq!(doc.work_experience.len(), 1);
        assert_eq!(doc.education.len(), 1);
        assert!(doc.name.is_empty());
        assert!(session.preview().is_some());
        assert_eq!(session.template(), Some(TemplateVariant::Modern));
    }

    #[test]
    fn test_leaving_editor_discards_document() {
        let mut session = editing(TemplateVariant::Classic);
        session
            .edit(|doc| (editor::set_field(doc, ScalarField::Name, "Jane"), ()))
            .unwrap();
        session.navigate(NavEvent::Back).unwrap();
        assert!(session.document().is_err());
        assert!(session.preview().is_none());

        session
            .navigate(NavEvent::SelectTemplate {
                template: TemplateVariant::Classic,
            })
            .unwrap();
        assert!(session.document().unwrap().name.is_empty());
    }

    #[test]
    fn test_edit_remounts_preview() {
        let mut session = editing(TemplateVariant::Creative);
        let before = session.preview().cloned().unwrap();
        session
            .edit(|doc| (editor::set_field(doc, ScalarField::Name, "Jane Doe"), ()))
            .unwrap();
        let after = session.preview().unwrap();
        assert_ne!(&before, after);
        assert!(after.markup().contains("Jane Doe"));
        assert_eq!(after.title(), "Jane Doe's Resume");
    }

    #[test]
    fn test_noop_edit_keeps_snapshot() {
        let mut session = editing(TemplateVariant::Modern);
        let before = Arc::clone(session.document().unwrap());
        let id = before.work_experience[0].id.clone();
        let (after, _) = session
            .edit(|doc| (editor::remove_work_entry(doc, &id), ()))
            .unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_edit_outside_editor_fails() {
        let mut session = EditorSession::new();
        let result = session.edit(|doc| (editor::set_field(doc, ScalarField::Name, "x"), ()));
        assert!(matches!(result, Err(SessionError::NotEditing)));
        assert!(matches!(session.rendered(), Err(SessionError::NotEditing)));
    }

    #[test]
    fn test_invalid_navigation_leaves_state_untouched() {
        let mut session = editing(TemplateVariant::Modern);
        let err = session.navigate(NavEvent::GetStarted).unwrap_err();
        assert!(matches!(err, SessionError::Navigation(_)));
        assert!(session.document().is_ok());
        assert_eq!(session.template(), Some(TemplateVariant::Modern));
    }

    #[test]
    fn test_begin_refuses_second_action() {
        let session = editing(TemplateVariant::Modern);
        let _guard = session.begin(Action::JobMatch).unwrap();
        assert!(matches!(
            session.begin(Action::JobMatch),
            Err(SessionError::ActionInProgress(Action::JobMatch))
        ));
    }
}
