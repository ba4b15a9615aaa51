//! One-at-a-time flags for long-running session actions.
//!
//! A flag is set when the action starts and cleared when its guard drops,
//! whether the action succeeded or failed. A second start while set is
//! refused; nothing is queued or cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Enhance,
    AtsCheck,
    JobMatch,
    Export,
}

#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(Arc::clone(&self.0)))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears its flag on drop.
#[derive(Debug)]
pub struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionFlags {
    enhance: InFlight,
    ats_check: InFlight,
    job_match: InFlight,
    export: InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InFlightStatus {
    pub enhance: bool,
    pub ats_check: bool,
    pub job_match: bool,
    pub export: bool,
}

impl ActionFlags {
    pub fn flag(&self, action: Action) -> &InFlight {
        match action {
            Action::Enhance => &self.enhance,
            Action::AtsCheck => &self.ats_check,
            Action::JobMatch => &self.job_match,
            Action::Export => &self.export,
        }
    }

    pub fn try_begin(&self, action: Action) -> Option<InFlightGuard> {
        self.flag(action).try_begin()
    }

    pub fn status(&self) -> InFlightStatus {
        InFlightStatus {
            enhance: self.enhance.is_active(),
            ats_check: self.ats_check.is_active(),
            job_match: self.job_match.is_active(),
            export: self.export.is_active(),
        }
    }
}
