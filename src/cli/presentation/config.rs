//! Config command presentation.

use crate::config::ValidationError;
use owo_colors::OwoColorize;

pub fn format_config_validation(result: &Result<(), Vec<ValidationError>>) -> String {
    match result {
        Ok(()) => format!("{}", "Configuration is valid.".green()),
        Err(errors) => {
            let mut out = format!(
                "{} ({}):",
                "Configuration has errors".red().bold(),
                errors.len()
            );
            for e in errors {
                out.push_str(&format!("\n  - {}", e));
            }
            out
        }
    }
}
