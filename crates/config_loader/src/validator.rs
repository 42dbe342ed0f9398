//! Configuration validation module
//!
//! Validation rules:
//! - field constraints from the `Validate` derive (urls, user agent, timeout)
//! - the two region URLs are distinct
//! - fixture paths, when present, are distinct

use contracts::{ContractError, FeedConfig};
use validator::Validate;

/// Validate a FeedConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &FeedConfig) -> Result<(), ContractError> {
    validate_fields(config)?;
    validate_urls_distinct(config)?;
    validate_fixtures_distinct(config)?;
    Ok(())
}

/// Run the derive-based field validation
fn validate_fields(config: &FeedConfig) -> Result<(), ContractError> {
    config.validate().map_err(|errors| {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "config".to_string());
        ContractError::config_validation(field, errors.to_string())
    })
}

/// Both regions must point at different pages
fn validate_urls_distinct(config: &FeedConfig) -> Result<(), ContractError> {
    if config.asia_url == config.global_url {
        return Err(ContractError::config_validation(
            "global_url",
            "asia_url and global_url must differ",
        ));
    }
    Ok(())
}

/// Fixture files must not alias each other
fn validate_fixtures_distinct(config: &FeedConfig) -> Result<(), ContractError> {
    if let Some(fixtures) = &config.fixtures {
        if fixtures.asia_path == fixtures.global_path {
            return Err(ContractError::config_validation(
                "fixtures.global_path",
                "asia_path and global_path must differ",
            ));
        }
    }
    Ok(())
}
