use holdem_engine::errors::EngineError;
use thiserror::Error;

use crate::action::Action;

/// Failures raised by the advisor and regret persistence.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Unknown action: {0:?}")]
    UnknownAction(String),
    #[error("No legal action offered by the betting controller")]
    NoLegalAction,
    #[error("Refusing to store non-finite {table} for {action}")]
    NonFinite { table: &'static str, action: Action },
    #[error("Regret file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Regret file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
