//! Validate command implementation.

use crate::app::config::Settings;
use crate::domain::AppError;

pub fn run_validate(settings: &Settings) -> Result<i32, AppError> {
    let outcome = crate::app::api::validate(settings)?;

    Ok(outcome.exit_code)
}
