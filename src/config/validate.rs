//! Configuration validation.

use crate::config::Config;
use crate::constants::{MAX_PREDICTIONS, confidence};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_defaults(config)?;
    Ok(())
}

/// Validate default settings.
fn validate_defaults(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    if !(confidence::MIN..=confidence::MAX).contains(&defaults.confidence_threshold) {
        return Err(Error::ConfigValidation {
            message: format!(
                "confidence_threshold must be between {} and {}, got {}",
                confidence::MIN,
                confidence::MAX,
                defaults.confidence_threshold
            ),
        });
    }

    if defaults.top_k == 0 || defaults.top_k > MAX_PREDICTIONS {
        return Err(Error::ConfigValidation {
            message: format!(
                "top_k must be between 1 and {MAX_PREDICTIONS}, got {}",
                defaults.top_k
            ),
        });
    }

    if let Some(ref taxonomy) = defaults.taxonomy
        && taxonomy.as_os_str().is_empty()
    {
        return Err(Error::ConfigValidation {
            message: "taxonomy path must not be empty".to_string(),
        });
    }

    Ok(())
}
