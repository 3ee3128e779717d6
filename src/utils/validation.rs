use crate::utils::error::{ApiError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ApiError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Splits a `Name: value` header line. The value is trimmed and may be empty.
pub fn parse_header_line(field_name: &str, line: &str) -> Result<(String, String)> {
    let Some((name, value)) = line.split_once(':') else {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: line.to_string(),
            reason: "Expected 'Name: value'".to_string(),
        });
    };

    let name = name.trim();
    validate_header_name(field_name, name)?;

    Ok((name.to_string(), value.trim().to_string()))
}

pub fn validate_header_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;
    if reqwest::header::HeaderName::from_bytes(name.as_bytes()).is_err() {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Not a valid header name".to_string(),
        });
    }
    Ok(())
}

pub fn validate_method(field_name: &str, method: &str) -> Result<()> {
    validate_non_empty_string(field_name, method)?;
    if reqwest::Method::from_bytes(method.as_bytes()).is_err() {
        return Err(ApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: method.to_string(),
            reason: "Not a valid HTTP method token".to_string(),
        });
    }
    Ok(())
}
