//! Generate command implementation.

use crate::app::commands::generate::GenerateMode;
use crate::app::config::Settings;
use crate::domain::AppError;

pub fn run_generate(settings: &Settings, check: bool) -> Result<i32, AppError> {
    let mode = if check { GenerateMode::Check } else { GenerateMode::Write };
    let outcome = crate::app::api::generate(settings, mode)?;

    Ok(outcome.exit_code())
}
