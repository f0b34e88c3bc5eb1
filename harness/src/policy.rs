//! Run policy: budgets the driver enforces around the engine.
//!
//! The engine itself never loops; the budget only bounds how many `step()`
//! calls the runner issues before giving up on a run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap on `step()` calls per run.
pub const DEFAULT_MAX_STEPS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunPolicy {
    /// Hard cap on `step()` calls issued by the runner.
    pub max_steps: u64,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("max_steps must be greater than zero")]
    ZeroStepBudget,
}

impl RunPolicy {
    /// # Errors
    ///
    /// Returns [`PolicyError::ZeroStepBudget`] if `max_steps` is zero.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_steps == 0 {
            return Err(PolicyError::ZeroStepBudget);
        }
        Ok(())
    }
}
