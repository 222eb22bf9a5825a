use crate::utils::error::{GatewayError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GatewayError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GatewayError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GatewayError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(GatewayError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GatewayError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GatewayError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Request-level checks. These produce `InvalidInput`, not config errors.
pub fn validate_round(round: u32) -> Result<()> {
    if round == 0 {
        return Err(GatewayError::invalid_input("round", "round numbers start at 1"));
    }
    Ok(())
}

const MAX_DRIVER_CODE_LEN: usize = 32;

/// Driver codes are the timing-screen abbreviations (HAM, VER). Older seasons
/// without one use the provider's driver id (e.g. RAIKKONEN, DE_CESARIS).
pub fn validate_driver_code(field_name: &str, code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(GatewayError::invalid_input(field_name, "driver code cannot be empty"));
    }
    if code.len() > MAX_DRIVER_CODE_LEN
        || !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(GatewayError::invalid_input(
            field_name,
            format!("'{}' is not a driver code (e.g. HAM)", code),
        ));
    }
    Ok(())
}
