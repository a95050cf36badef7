//! Best-effort side steps
//!
//! Some steps (sharing, header formatting) must never fail the operation around
//! them. They return [`BestEffort`]; the caller collects the [`Diagnostic`] and moves on.

use crate::api::{ApiError, ApiResult, ErrorKind};
use serde::Serialize;

/// Recorded failure of a best-effort step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub step: String,
    pub kind: ErrorKind,
    pub message: String,
}

pub type BestEffort<T> = Result<T, Diagnostic>;

impl Diagnostic {
    pub fn from_error(step: &str, error: &ApiError) -> Self {
        Self {
            step: step.to_string(),
            kind: error.kind,
            message: error.message.clone(),
        }
    }
}

/// Downgrade a remote failure to a logged diagnostic
pub fn best_effort<T>(step: &str, result: ApiResult<T>) -> BestEffort<T> {
    result.map_err(|error| {
        log::warn!("Best-effort step '{}' failed ({}): {}", step, error.kind, error.message);
        Diagnostic::from_error(step, &error)
    })
}

/// Run a best-effort step and keep its diagnostic, if any
pub fn collect(diagnostics: &mut Vec<Diagnostic>, step: &str, result: ApiResult<()>) {
    if let Err(diagnostic) = best_effort(step, result) {
        diagnostics.push(diagnostic);
    }
}
