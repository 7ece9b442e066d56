use crate::config::RosterConfig;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Source domain cannot be empty and must look like a URL or domain name
/// - At least one roster must be configured
/// - Roster category, competition code and pool cannot be empty
/// - If a log file path is provided, its parent directory must exist or be creatable
pub fn validate_config(
    source_domain: &str,
    rosters: &[RosterConfig],
    log_file_path: &Option<String>,
) -> Result<(), AppError> {
    if source_domain.is_empty() {
        return Err(AppError::config_error("Source domain cannot be empty"));
    }

    if !source_domain.starts_with("http://") && !source_domain.starts_with("https://") {
        // If it doesn't start with a protocol, it should at least look like a domain
        if !source_domain.contains('.') && !source_domain.starts_with("localhost") {
            return Err(AppError::config_error(
                "Source domain must be a valid URL or domain name",
            ));
        }
    }

    if rosters.is_empty() {
        return Err(AppError::config_error(
            "At least one roster must be configured",
        ));
    }

    for roster in rosters {
        if roster.category.is_empty() {
            return Err(AppError::config_error("Roster category cannot be empty"));
        }
        if roster.competition_code.is_empty() {
            return Err(AppError::config_error(format!(
                "Roster '{}' has an empty competition code",
                roster.category
            )));
        }
        if roster.pool.is_empty() {
            return Err(AppError::config_error(format!(
                "Roster '{}' has an empty pool code",
                roster.category
            )));
        }
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.exists()
        {
            // Try to create the directory to validate the path
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
