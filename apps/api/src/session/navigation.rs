//! Top-level view state: landing → template selection → editor.
//!
//! The view only changes through named events; anything else is rejected and
//! leaves the current view untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TemplateVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum View {
    Landing,
    Templates { selected: Option<TemplateVariant> },
    Editor { template: TemplateVariant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum NavEvent {
    GetStarted,
    SelectTemplate { template: TemplateVariant },
    Back,
}

#[derive(Debug, Error)]
#[error("Event {event:?} is not valid in view {view:?}")]
pub struct NavigationError {
    pub view: View,
    pub event: NavEvent,
}

impl View {
    pub fn apply(self, event: NavEvent) -> Result<View, NavigationError> {
        match (self, event) {
            (View::Landing, NavEvent::GetStarted) => Ok(View::Templates { selected: None }),
            (View::Landing, NavEvent::Back) => Ok(View::Landing),
            (View::Templates { .. }, NavEvent::SelectTemplate { template }) => {
                Ok(View::Editor { template })
            }
            (View::Templates { .. }, NavEvent::Back) => Ok(View::Landing),
            (View::Editor { template }, NavEvent::Back) => Ok(View::Templates {
                selected: Some(template),
            }),
            (view, event) => Err(NavigationError { view, event }),
        }
    }

    pub fn is_editor(&self) -> bool {
        matches!(self, View::Editor { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_forward_flow() {
        let view = View::Landing.apply(NavEvent::GetStarted).unwrap();
        assert_eq!(view, View::Templates { selected: None });
        let view = view
            .apply(NavEvent::SelectTemplate {
                template: TemplateVariant::Classic,
            })
            .unwrap();
        assert_eq!(
            view,
            View::Editor {
                template: TemplateVariant::Classic
            }
        );
    }

    #[test]
    fn test_back_from_editor_keeps_selection() {
        let view = View::Editor {
            template: TemplateVariant::Creative,
        };
        assert_eq!(
            view.apply(NavEvent::Back).unwrap(),
            View::Templates {
                selected: Some(TemplateVariant::Creative)
            }
        );
    }

    #[test]
    fn test_back_from_templates_clears_selection() {
        let view = View::Templates {
            selected: Some(TemplateVariant::Modern),
        };
        assert_eq!(view.apply(NavEvent::Back).unwrap(), View::Landing);
        assert_eq!(
            View::Landing.apply(NavEvent::GetStarted).unwrap(),
            View::Templates { selected: None }
        );
    }

    #[test]
    fn test_back_on_landing_stays_put() {
        assert_eq!(View::Landing.apply(NavEvent::Back).unwrap(), View::Landing);
    }

    #[test]
    fn test_invalid_events_are_rejected() {
        assert!(View::Landing
            .apply(NavEvent::SelectTemplate {
                template: TemplateVariant::Modern
            })
            .is_err());
        let editor = View::Editor {
            template: TemplateVariant::Modern,
        };
        let err = editor.apply(NavEvent::GetStarted).unwrap_err();
        assert_eq!(err.view, editor);
        assert!(View::Templates { selected: None }
            .apply(NavEvent::GetStarted)
            .is_err());
    }

    #[test]
    fn test_nav_event_deserializes_tagged() {
        let event: NavEvent =
            serde_json::from_str(r#"{"event":"selectTemplate","template":"modern"}"#).unwrap();
        assert_eq!(
            event,
            NavEvent::SelectTemplate {
                template: TemplateVariant::Modern
            }
        );
        let event: NavEvent = serde_json::from_str(r#"{"event":"getStarted"}"#).unwrap();
        assert_eq!(event, NavEvent::GetStarted);
    }
}
